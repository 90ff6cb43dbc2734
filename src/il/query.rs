//! # Offset Queries
//!
//! Read-only lookups over an offset-ordered instruction sequence. Implemented
//! for `[Instruction]`, so they work on an [`InstructionStream`](super::InstructionStream),
//! a `Vec<Instruction>` or any slice of one.

use super::instruction::Instruction;
use crate::error::OffsetRelation;
use crate::range::IlRange;
use crate::{Error, Result};

/// Lazy iterator over the instructions inside an [`IlRange`]
///
/// Each call to `within_range` scans again from the head of the stream.
#[derive(Debug, Clone)]
pub struct WithinRange<'a> {
    iter: std::slice::Iter<'a, Instruction>,
    range: IlRange,
}

impl<'a> Iterator for WithinRange<'a> {
    type Item = &'a Instruction;

    fn next(&mut self) -> Option<Self::Item> {
        let range = self.range;
        self.iter.by_ref().find(|i| range.contains(i.offset))
    }
}

/// Offset lookups over an instruction sequence
pub trait InstructionQuery {
    /// Instructions with `range.from <= offset <= range.to`, in stream order
    fn within_range(&self, range: IlRange) -> WithinRange<'_>;

    /// The first instruction whose offset equals `offset`
    fn at_offset(&self, offset: i32) -> Result<&Instruction>;

    /// The last instruction whose offset is strictly below `offset`
    fn before_offset(&self, offset: i32) -> Result<&Instruction>;
}

impl InstructionQuery for [Instruction] {
    fn within_range(&self, range: IlRange) -> WithinRange<'_> {
        WithinRange {
            iter: self.iter(),
            range,
        }
    }

    fn at_offset(&self, offset: i32) -> Result<&Instruction> {
        self.iter()
            .find(|i| i.offset == offset)
            .ok_or(Error::InstructionNotFound {
                offset,
                relation: OffsetRelation::At,
            })
    }

    fn before_offset(&self, offset: i32) -> Result<&Instruction> {
        self.iter()
            .rev()
            .find(|i| i.offset < offset)
            .ok_or(Error::InstructionNotFound {
                offset,
                relation: OffsetRelation::Before,
            })
    }
}
