//! # Instruction Stream
//!
//! Ordered container for the instructions of one method body. Offsets are
//! strictly increasing in stream order once laid out. Insertion only exists as
//! single-instruction primitives here; batch insertion lives in
//! [`IlProcessor`](super::IlProcessor).

use super::instruction::{InstrId, Instruction, OpCode};
use crate::{Error, Result};
use serde::Deserialize;
use std::ops::Deref;

/// Offset-ordered instruction sequence
///
/// Cloning a stream snapshots the whole body: instructions keep their
/// identities, so anchors taken from the original also work on the copy.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct InstructionStream {
    instructions: Vec<Instruction>,
}

impl InstructionStream {
    /// Creates an empty stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps already laid-out instructions
    pub fn from_instructions(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Appends an instruction laid out directly after the current tail and
    /// returns its identity
    pub fn emit(&mut self, opcode: OpCode) -> InstrId {
        let offset = self.next_offset();
        let instr = Instruction::at(offset, opcode);
        let id = instr.id;
        self.instructions.push(instr);
        id
    }

    /// Appends an instruction as-is
    pub fn push(&mut self, instr: Instruction) {
        self.instructions.push(instr);
    }

    /// Offset the next emitted instruction would get
    pub fn next_offset(&self) -> i32 {
        self.instructions
            .last()
            .map(|last| last.offset.saturating_add(last.size()))
            .unwrap_or(0)
    }

    /// Stream index of the instruction with this identity
    pub fn position(&self, id: InstrId) -> Option<usize> {
        self.instructions.iter().position(|i| i.id == id)
    }

    fn anchor_index(&self, anchor: InstrId) -> Result<usize> {
        self.position(anchor)
            .ok_or(Error::AnchorNotFound { id: anchor.get() })
    }

    /// Inserts one instruction directly before `anchor`
    pub fn insert_before(&mut self, anchor: InstrId, instr: Instruction) -> Result<()> {
        let index = self.anchor_index(anchor)?;
        self.instructions.insert(index, instr);
        Ok(())
    }

    /// Inserts one instruction directly after `anchor`
    ///
    /// Each call places its instruction adjacent to the anchor, pushing
    /// anything inserted earlier one slot further away.
    pub fn insert_after(&mut self, anchor: InstrId, instr: Instruction) -> Result<()> {
        let index = self.anchor_index(anchor)?;
        self.instructions.insert(index + 1, instr);
        Ok(())
    }

    /// Removes and returns the instruction with this identity
    pub fn remove(&mut self, id: InstrId) -> Result<Instruction> {
        let index = self.anchor_index(id)?;
        Ok(self.instructions.remove(index))
    }

    /// Re-lays offsets from each instruction's encoded size, starting at 0
    ///
    /// Offsets saturate at `i32::MAX` instead of wrapping.
    pub fn recompute_offsets(&mut self) {
        let mut offset: i32 = 0;
        for instr in &mut self.instructions {
            instr.offset = offset;
            offset = offset.saturating_add(instr.size());
        }
    }
}

impl Clone for InstructionStream {
    fn clone(&self) -> Self {
        Self {
            instructions: self
                .instructions
                .iter()
                .map(Instruction::with_same_identity)
                .collect(),
        }
    }
}

impl Deref for InstructionStream {
    type Target = [Instruction];

    fn deref(&self) -> &[Instruction] {
        &self.instructions
    }
}

impl FromIterator<Instruction> for InstructionStream {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self::from_instructions(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a InstructionStream {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(stream: &InstructionStream) -> Vec<i32> {
        stream.iter().map(|i| i.offset).collect()
    }

    #[test]
    fn test_emit_lays_out_offsets() {
        let mut stream = InstructionStream::new();
        stream.emit(OpCode::Ldarg(0));
        stream.emit(OpCode::Call("M::F".into()));
        stream.emit(OpCode::Ret);
        assert_eq!(offsets(&stream), vec![0, 1, 6]);
        assert_eq!(stream.next_offset(), 7);
    }

    #[test]
    fn test_single_insert_primitives() {
        let mut stream = InstructionStream::new();
        let first = stream.emit(OpCode::Nop);
        let last = stream.emit(OpCode::Ret);

        let a = Instruction::new(OpCode::Dup);
        let a_id = a.id;
        stream.insert_before(last, a).unwrap();
        let b = Instruction::new(OpCode::Pop);
        let b_id = b.id;
        stream.insert_after(first, b).unwrap();

        let ids: Vec<InstrId> = stream.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![first, b_id, a_id, last]);
    }

    #[test]
    fn test_missing_anchor() {
        let mut stream = InstructionStream::new();
        stream.emit(OpCode::Nop);
        let stranger = Instruction::new(OpCode::Ret);

        let err = stream
            .insert_after(stranger.id, Instruction::new(OpCode::Nop))
            .unwrap_err();
        assert_eq!(
            err,
            Error::AnchorNotFound {
                id: stranger.id.get()
            }
        );
        assert_eq!(stream.len(), 1);
    }

    #[test]
    fn test_recompute_offsets_after_insert() {
        let mut stream = InstructionStream::new();
        let first = stream.emit(OpCode::Nop);
        stream.emit(OpCode::Ret);
        stream
            .insert_after(first, Instruction::new(OpCode::LdcI4(1000)))
            .unwrap();
        assert_eq!(offsets(&stream), vec![0, 0, 1]);

        stream.recompute_offsets();
        assert_eq!(offsets(&stream), vec![0, 1, 6]);
    }

    #[test]
    fn test_recompute_offsets_strictly_increasing_with_zero_size() {
        let mut stream = InstructionStream::new();
        stream.push(Instruction::new(OpCode::Other {
            mnemonic: "prefix".into(),
            size: 0,
        }));
        stream.push(Instruction::new(OpCode::Other {
            mnemonic: "prefix".into(),
            size: -4,
        }));
        stream.push(Instruction::new(OpCode::Ret));
        stream.recompute_offsets();
        assert_eq!(offsets(&stream), vec![0, 1, 2]);
    }

    #[test]
    fn test_recompute_offsets_saturates() {
        let huge = || {
            Instruction::new(OpCode::Other {
                mnemonic: "blob".into(),
                size: i32::MAX,
            })
        };
        let mut stream: InstructionStream = vec![huge(), huge(), huge()].into_iter().collect();
        stream.recompute_offsets();
        assert_eq!(offsets(&stream), vec![0, i32::MAX, i32::MAX]);
        assert_eq!(stream.next_offset(), i32::MAX);
    }

    #[test]
    fn test_clone_keeps_identities() {
        let mut stream = InstructionStream::new();
        let nop = stream.emit(OpCode::Nop);
        let copy = stream.clone();
        assert_eq!(copy, stream);
        assert_eq!(copy.position(nop), Some(0));
    }

    #[test]
    fn test_remove() {
        let mut stream = InstructionStream::new();
        let nop = stream.emit(OpCode::Nop);
        stream.emit(OpCode::Ret);
        let removed = stream.remove(nop).unwrap();
        assert_eq!(removed.opcode, OpCode::Nop);
        assert_eq!(stream.len(), 1);
        assert!(stream.remove(nop).is_err());
    }
}
