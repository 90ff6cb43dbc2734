//! # IL Offset Ranges
//!
//! An [`IlRange`] is the span of bytecode offsets a decompiled expression was
//! built from. Both ends are inclusive. `to = -1` marks "no coverage".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive span of IL offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IlRange {
    /// First covered offset
    pub from: i32,
    /// Last covered offset
    pub to: i32,
}

impl IlRange {
    /// The "no coverage" sentinel
    pub const EMPTY: IlRange = IlRange { from: 0, to: -1 };

    /// Creates a range covering `from..=to`
    pub fn new(from: i32, to: i32) -> Self {
        Self { from, to }
    }

    /// True when no offset satisfies `from <= offset <= to`
    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }

    /// Inclusive membership test shared by stream and tree queries
    pub fn contains(&self, offset: i32) -> bool {
        offset >= self.from && offset <= self.to
    }
}

impl Default for IlRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for IlRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "IL_empty")
        } else {
            write!(f, "IL_{:04x}-IL_{:04x}", self.from, self.to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let range = IlRange::new(4, 8);
        assert!(range.contains(4));
        assert!(range.contains(8));
        assert!(!range.contains(3));
        assert!(!range.contains(9));
    }

    #[test]
    fn test_empty_sentinel() {
        assert!(IlRange::EMPTY.is_empty());
        assert_eq!(IlRange::EMPTY.to, -1);
        assert!(!IlRange::EMPTY.contains(0));
        assert!(IlRange::new(9, 2).is_empty());
        assert!(!IlRange::new(3, 3).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(IlRange::new(0, 0x1f).to_string(), "IL_0000-IL_001f");
        assert_eq!(IlRange::EMPTY.to_string(), "IL_empty");
    }
}
