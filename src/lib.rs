//! # ilweave - IL Queries for Bytecode Weaving
//!
//! Query helpers used by weavers that rewrite compiled .NET-style method
//! bodies. They answer three kinds of question:
//!
//! - **Type relationships**: does this type (or generic parameter) implement
//!   an interface, through its base types and constraints?
//! - **Instruction streams**: which instructions fall inside an IL range,
//!   which one sits at or before an offset, and how to splice a batch of new
//!   instructions around an anchor without scrambling their order.
//! - **Decompiled trees**: which IL offsets does a node of the decompiled AST
//!   cover, counting expressions that were rewritten along the way?
//!
//! ## Architecture
//!
//! ```text
//! metadata ──► implements_interface        (TypeRef → TypeDef → interfaces/base)
//! il       ──► InstructionQuery, IlProcessor (flat, offset-ordered stream)
//! ast      ──► IlOffsets                    (tree of IlNode/IlExpression)
//!                 └── range::IlRange shared with il::InstructionQuery
//! ```
//!
//! ## Example
//!
//! ```
//! use ilweave::ast::{IlCode, IlExpression, IlNode, IlOffsets};
//! use ilweave::il::{InstructionQuery, InstructionStream, OpCode};
//! use ilweave::IlRange;
//!
//! # fn main() -> ilweave::Result<()> {
//! let mut stream = InstructionStream::new();
//! stream.emit(OpCode::Ldarg(0));
//! stream.emit(OpCode::Callvirt("Task::GetAwaiter".into()));
//! stream.emit(OpCode::Ret);
//!
//! let node: IlNode = IlExpression::new(IlCode::Await).with_range(0, 1).into();
//! let range = IlRange::new(node.first_il_offset()?, node.last_il_offset());
//! let covered: Vec<String> = stream.within_range(range).map(|i| i.to_asm()).collect();
//!
//! assert_eq!(covered, vec!["ldarg.0", "callvirt Task::GetAwaiter"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Unresolvable types are answers, not errors: they implement nothing.
//! Broken caller contracts (looking up an offset that isn't there, inserting
//! around an instruction from another body, asking for the first offset of a
//! node with no IL ranges) come back as [`Error`].

pub mod ast;
pub mod collections;
pub mod config;
pub mod error;
pub mod il;
pub mod metadata;
pub mod range;

/// Version of the ilweave crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export main types
pub use ast::{IlBlock, IlCode, IlExpression, IlNode, IlOffsets};
pub use collections::replace_collection;
pub use config::WeaveOptions;
pub use error::{Error, ErrorSeverity, OffsetRelation, Result};
pub use il::{IlProcessor, InstrId, Instruction, InstructionQuery, InstructionStream, OpCode};
pub use metadata::{
    implements_interface, CustomAttribute, CustomAttributeProvider, MetadataStore, MethodDef,
    PropertyDef, TypeDef, TypeProvider, TypeRef,
};
pub use range::IlRange;
