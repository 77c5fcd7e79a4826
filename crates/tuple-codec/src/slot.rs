//! Slot descriptors.

use crate::error::PathSegment;

/// Static description of one positional tuple slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    /// 0-based position in the JSON array.
    pub position: usize,
    /// Field name, used in error paths.
    pub name: &'static str,
    /// Whether validation rejects an absent value.
    pub required: bool,
}

impl SlotSpec {
    pub const fn required(position: usize, name: &'static str) -> Self {
        Self {
            position,
            name,
            required: true,
        }
    }

    pub const fn optional(position: usize, name: &'static str) -> Self {
        Self {
            position,
            name,
            required: false,
        }
    }

    /// Path segment naming this slot.
    pub fn segment(&self) -> PathSegment {
        PathSegment::Slot {
            position: self.position,
            name: self.name,
        }
    }
}

/// Length of the JSON array that holds `slots`: the highest position plus one.
///
/// Positions between declared slots are unnamed. Decode skips them and encode
/// writes them as `null`.
pub const fn arity(slots: &[SlotSpec]) -> usize {
    let mut arity = 0;
    let mut i = 0;
    while i < slots.len() {
        if slots[i].position + 1 > arity {
            arity = slots[i].position + 1;
        }
        i += 1;
    }
    arity
}

/// Whether no two slots claim the same position.
///
/// `tuple_record!` checks this at compile time.
pub const fn has_unique_positions(slots: &[SlotSpec]) -> bool {
    let mut i = 0;
    while i < slots.len() {
        let mut j = i + 1;
        while j < slots.len() {
            if slots[i].position == slots[j].position {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_of_dense_layout() {
        let slots = [SlotSpec::required(0, "a"), SlotSpec::optional(1, "b")];
        assert_eq!(arity(&slots), 2);
        assert!(has_unique_positions(&slots));
    }

    #[test]
    fn test_arity_spans_gaps() {
        let gapped = [SlotSpec::required(0, "a"), SlotSpec::optional(3, "d")];
        assert_eq!(arity(&gapped), 4);

        let unordered = [SlotSpec::optional(2, "c"), SlotSpec::required(0, "a")];
        assert_eq!(arity(&unordered), 3);

        assert_eq!(arity(&[]), 0);
    }

    #[test]
    fn test_duplicate_positions_detected() {
        let clashing = [
            SlotSpec::required(0, "a"),
            SlotSpec::optional(1, "b"),
            SlotSpec::optional(1, "c"),
        ];
        assert!(!has_unique_positions(&clashing));
    }
}
