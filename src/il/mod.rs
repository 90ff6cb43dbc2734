//! # IL Instruction Streams
//!
//! The flat, offset-ordered view of a method body.
//!
//! ```text
//! il/
//! ├── instruction.rs  # Instruction, InstrId, OpCode
//! ├── stream.rs       # InstructionStream + single-item insert primitives
//! ├── query.rs        # InstructionQuery: within_range / at_offset / before_offset
//! └── processor.rs    # IlProcessor: ordered batch insertion
//! ```
//!
//! ## Usage
//!
//! ```
//! use ilweave::il::{IlProcessor, Instruction, InstructionQuery, InstructionStream, OpCode};
//!
//! # fn main() -> ilweave::Result<()> {
//! let mut stream = InstructionStream::new();
//! let entry = stream.emit(OpCode::Nop);
//! stream.emit(OpCode::Ret);
//!
//! IlProcessor::new(&mut stream).insert_after(
//!     entry,
//!     vec![
//!         Instruction::new(OpCode::Ldstr("enter".into())),
//!         Instruction::new(OpCode::Call("Log::Write".into())),
//!     ],
//! )?;
//! stream.recompute_offsets();
//!
//! assert_eq!(stream.before_offset(6)?.to_asm(), "ldstr \"enter\"");
//! # Ok(())
//! # }
//! ```

mod instruction;
mod processor;
mod query;
mod stream;

pub use instruction::{InstrId, Instruction, OpCode};
pub use processor::IlProcessor;
pub use query::{InstructionQuery, WithinRange};
pub use stream::InstructionStream;
