//! # IL AST
//!
//! The structured, decompiled view of a method body and the offset span
//! queries that map it back onto the instruction stream.
//!
//! ## Usage
//!
//! ```
//! use ilweave::ast::{IlBlock, IlCode, IlExpression, IlNode, IlOffsets};
//!
//! // `await` recovered from a callvirt at IL_0005..IL_000a
//! let awaited = IlExpression::new(IlCode::Await)
//!     .with_range(11, 15)
//!     .with_original(IlExpression::new(IlCode::Callvirt).with_range(5, 10));
//! let body = IlNode::Block(IlBlock::new(vec![awaited.into()]));
//!
//! assert_eq!(body.first_il_offset(), Ok(5));
//! assert_eq!(body.last_il_offset(), 15);
//! ```

mod node;
mod range;

pub use node::{CaseBlock, CatchBlock, IlBlock, IlCode, IlExpression, IlNode};
pub use range::IlOffsets;
