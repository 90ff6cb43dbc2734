//! # Batch Insertion
//!
//! [`IlProcessor`] builds ordered batch insertion on top of the stream's
//! single-instruction primitives.

use super::instruction::{InstrId, Instruction};
use super::stream::InstructionStream;
use crate::config::WeaveOptions;
use crate::Result;

/// Mutating view over one method body's instruction stream
///
/// Holds the only mutable borrow of the stream for its lifetime, so no query
/// can observe a half-finished batch.
pub struct IlProcessor<'a> {
    stream: &'a mut InstructionStream,
    recompute_offsets: bool,
}

impl<'a> IlProcessor<'a> {
    /// Creates a processor that leaves offsets untouched
    pub fn new(stream: &'a mut InstructionStream) -> Self {
        Self {
            stream,
            recompute_offsets: false,
        }
    }

    /// Creates a processor configured from options
    pub fn with_options(stream: &'a mut InstructionStream, options: &WeaveOptions) -> Self {
        Self {
            stream,
            recompute_offsets: options.recompute_offsets_after_insert,
        }
    }

    /// The underlying stream
    pub fn stream(&self) -> &InstructionStream {
        &*self.stream
    }

    /// Inserts `instructions` directly before `target`, in the given order
    ///
    /// The first item ends up furthest from `target`, the last item directly
    /// before it.
    pub fn insert_before<I>(&mut self, target: InstrId, instructions: I) -> Result<()>
    where
        I: IntoIterator<Item = Instruction>,
    {
        let mut count = 0usize;
        for instr in instructions {
            self.stream.insert_before(target, instr)?;
            count += 1;
        }
        tracing::debug!("inserted {} instruction(s) before {}", count, target);
        self.finish();
        Ok(())
    }

    /// Inserts `instructions` directly after `target`, in the given order
    ///
    /// The primitive places each instruction adjacent to `target`, so items
    /// are fed in reverse: the last item goes in first and is pushed along by
    /// every earlier one. Feeding them forward would emit the batch backwards.
    pub fn insert_after<I>(&mut self, target: InstrId, instructions: I) -> Result<()>
    where
        I: IntoIterator<Item = Instruction>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut count = 0usize;
        for instr in instructions.into_iter().rev() {
            self.stream.insert_after(target, instr)?;
            count += 1;
        }
        tracing::debug!("inserted {} instruction(s) after {}", count, target);
        self.finish();
        Ok(())
    }

    fn finish(&mut self) {
        if self.recompute_offsets {
            self.stream.recompute_offsets();
        }
    }
}
