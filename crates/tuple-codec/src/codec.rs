//! Decode, encode and validate tuple records.
//!
//! Decoding runs in two stages. Stage 1 parses the input as an array of raw,
//! untyped elements, so a non-array input fails before any slot is touched.
//! Stage 2 converts each raw element into the declared type of the slot at
//! the same position.
//!
//! The options of the outermost [`decode_with`] call stay in effect while its
//! slots are hydrated, so tuple records nested inside slot values decode with
//! the same options.

use std::cell::Cell;

use serde_json::value::RawValue;
use serde_json::Value;

use crate::error::{DecodeError, EncodeError, ValidationError, ValidationErrors};
use crate::slot::{arity, SlotSpec};
use crate::validate::Validate;

/// A record encoded on the wire as a fixed-arity JSON array.
///
/// Usually implemented through [`tuple_record!`](crate::tuple_record) rather
/// than by hand. Slot positions must be unique. They need not be contiguous:
/// the array is as long as the highest position plus one.
pub trait TupleRecord: Default {
    /// One descriptor per slot, in declaration order.
    const SLOTS: &'static [SlotSpec];

    /// Decodes `raw` into the slot at `position`.
    fn hydrate(&mut self, position: usize, raw: &RawValue) -> Result<(), serde_json::Error>;

    /// The JSON value of the slot at `position`, `Null` when absent.
    fn element(&self, position: usize) -> Result<Value, serde_json::Error>;

    /// The slot value at `position` as a validatable value, `None` when absent.
    fn nested(&self, position: usize) -> Option<&dyn Validate>;
}

/// Knobs for [`decode_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject arrays longer than the declared arity instead of dropping the
    /// extra elements.
    pub strict_arity: bool,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self { strict_arity: true }
    }
}

thread_local! {
    static ACTIVE_OPTIONS: Cell<Option<DecodeOptions>> = const { Cell::new(None) };
}

/// Keeps a decode's options visible to nested decodes until dropped.
struct OptionsScope {
    previous: Option<DecodeOptions>,
}

impl OptionsScope {
    fn enter(options: DecodeOptions) -> Self {
        let previous = ACTIVE_OPTIONS.with(|active| active.replace(Some(options)));
        Self { previous }
    }
}

impl Drop for OptionsScope {
    fn drop(&mut self) {
        ACTIVE_OPTIONS.with(|active| active.set(self.previous));
    }
}

/// Decodes a JSON array into `T`, ignoring elements past the declared arity.
pub fn decode<T: TupleRecord>(raw: &[u8]) -> Result<T, DecodeError> {
    decode_with(raw, &DecodeOptions::default())
}

/// Decodes a JSON array into `T`.
pub fn decode_with<T: TupleRecord>(raw: &[u8], options: &DecodeOptions) -> Result<T, DecodeError> {
    // stage 1: the array, elements left raw
    let elements: Vec<&RawValue> =
        serde_json::from_slice(raw).map_err(|source| DecodeError::MalformedArray { source })?;

    let arity = arity(T::SLOTS);
    if elements.len() > arity {
        if options.strict_arity {
            return Err(DecodeError::TrailingElements {
                expected: arity,
                actual: elements.len(),
            });
        }
        log::debug!(
            "dropping {} tuple element(s) past declared arity {}",
            elements.len() - arity,
            arity
        );
    }

    // stage 2: each element into its slot's type
    let _scope = OptionsScope::enter(*options);
    let mut record = T::default();
    for slot in T::SLOTS {
        let element = match elements.get(slot.position) {
            Some(element) => *element,
            None => continue,
        };
        if element.get().trim() == "null" {
            log::trace!("tuple element {} ({}) is null", slot.position, slot.name);
            continue;
        }
        record
            .hydrate(slot.position, element)
            .map_err(|source| DecodeError::TypeMismatch {
                position: slot.position,
                name: slot.name,
                source,
            })?;
    }

    Ok(record)
}

/// Decodes a tuple record met inside another value, using the options of the
/// enclosing [`decode_with`] call, or the defaults outside of one.
#[doc(hidden)]
pub fn decode_nested<T: TupleRecord>(raw: &[u8]) -> Result<T, DecodeError> {
    let options = ACTIVE_OPTIONS.with(Cell::get).unwrap_or_default();
    decode_with(raw, &options)
}

/// Slot values in position order, `Null` for absent slots and unnamed
/// positions.
pub fn encode_elements<T: TupleRecord>(record: &T) -> Result<Vec<Value>, EncodeError> {
    let mut elements = vec![Value::Null; arity(T::SLOTS)];
    for slot in T::SLOTS {
        let value = record
            .element(slot.position)
            .map_err(|source| EncodeError::SerializationFailure {
                position: slot.position,
                name: slot.name,
                source,
            })?;
        elements[slot.position] = value;
    }
    Ok(elements)
}

/// Encodes `record` as a JSON array literal.
pub fn encode<T: TupleRecord>(record: &T) -> Result<Vec<u8>, EncodeError> {
    let elements = encode_elements(record)?;
    Ok(serde_json::to_vec(&elements)?)
}

/// Checks required slots and nested rules, collecting every failure.
pub fn validate<T: TupleRecord>(record: &T) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for slot in T::SLOTS {
        match record.nested(slot.position) {
            Some(value) => errors.nest(slot.segment(), value.validate()),
            None if slot.required => errors.push(ValidationError::missing(slot.segment())),
            None => {}
        }
    }

    errors.into_result()
}
