//! Tuple Codec
//!
//! Converts between fixed-arity, positionally encoded JSON arrays and typed
//! records with named fields. Position, not key, carries meaning: slot `i`
//! always decodes with slot `i`'s declared type.
//!
//! Numbers are decoded losslessly (`serde_json` is built with
//! `arbitrary_precision`), so large integers and long decimals keep their
//! exact digits when a slot is typed as [`serde_json::Number`] or
//! [`serde_json::Value`].

mod macros;

pub mod codec;
pub mod error;
pub mod slot;
pub mod validate;

pub use codec::{decode, decode_with, encode, encode_elements, validate, DecodeOptions, TupleRecord};
pub use error::{
    DecodeError, DecodeErrorKind, EncodeError, EncodeErrorKind, PathSegment, ValidationError,
    ValidationErrorKind, ValidationErrors,
};
pub use slot::{arity, SlotSpec};
pub use validate::Validate;

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;

    pub use crate::codec::decode_nested;
    pub use crate::slot::has_unique_positions;
}
