//! Nested validation.
//!
//! Every slot type implements [`Validate`]. Scalars accept anything; records
//! override [`Validate::validate`] with their own rules; containers forward to
//! their elements and add an index or key segment to each failure path.

use std::collections::{BTreeMap, HashMap};

use crate::error::{PathSegment, ValidationErrors};

/// A value that can check its own model rules after decode.
pub trait Validate {
    /// Reports every rule the value breaks. The default accepts everything.
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

macro_rules! accept_all {
    ($($ty:ty),* $(,)?) => {
        $(impl Validate for $ty {})*
    };
}

accept_all!(
    String,
    &'static str,
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    serde_json::Value,
    serde_json::Number,
    serde_json::Map<String, serde_json::Value>,
);

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Some(value) => value.validate(),
            None => Ok(()),
        }
    }
}

impl<T: Validate> Validate for Box<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        (**self).validate()
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (index, item) in self.iter().enumerate() {
            errors.nest(PathSegment::Index(index), item.validate());
        }
        errors.into_result()
    }
}

impl<T: Validate> Validate for BTreeMap<String, T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (key, item) in self {
            errors.nest(PathSegment::field(key.as_str()), item.validate());
        }
        errors.into_result()
    }
}

impl<T: Validate, S> Validate for HashMap<String, T, S> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        // Sorted so failure order does not depend on hashing.
        let mut entries: Vec<(&String, &T)> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (key, item) in entries {
            errors.nest(PathSegment::field(key.as_str()), item.validate());
        }
        errors.into_result()
    }
}
