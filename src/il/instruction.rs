//! # IL Instructions
//!
//! Atomic steps of a method body. Each instruction carries an identity that
//! survives offset changes, so an instruction can anchor insertions even after
//! the stream has been re-laid.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INSTR_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an instruction, unique per process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstrId(u64);

impl InstrId {
    /// Allocates a fresh identity
    pub fn fresh() -> Self {
        InstrId(NEXT_INSTR_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// IL opcode with its inline operand
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpCode {
    /// No operation
    Nop,
    /// Load argument by index
    Ldarg(u16),
    /// Load local by index
    Ldloc(u16),
    /// Store local by index
    Stloc(u16),
    /// Load 32-bit integer constant
    LdcI4(i32),
    /// Load string literal
    Ldstr(String),
    /// Load null reference
    Ldnull,
    /// Load instance field
    Ldfld(String),
    /// Store instance field
    Stfld(String),
    /// Call method
    Call(String),
    /// Call virtual method
    Callvirt(String),
    /// Construct object
    Newobj(String),
    /// Discard top of stack
    Pop,
    /// Duplicate top of stack
    Dup,
    /// Return from method
    Ret,
    /// Throw exception on top of stack
    Throw,
    /// Any opcode not modelled above
    Other {
        /// Assembly mnemonic
        mnemonic: String,
        /// Encoded size in bytes, operand included; at least 1
        #[serde(deserialize_with = "positive_size")]
        size: i32,
    },
}

fn positive_size<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let size = i32::deserialize(deserializer)?;
    if size < 1 {
        return Err(serde::de::Error::custom(format!(
            "instruction size must be at least 1, got {}",
            size
        )));
    }
    Ok(size)
}

impl OpCode {
    /// Assembly mnemonic, using the short form where the operand allows it
    pub fn mnemonic(&self) -> String {
        match self {
            OpCode::Nop => "nop".to_string(),
            OpCode::Ldarg(n) => Self::indexed("ldarg", *n),
            OpCode::Ldloc(n) => Self::indexed("ldloc", *n),
            OpCode::Stloc(n) => Self::indexed("stloc", *n),
            OpCode::LdcI4(v) => match v {
                -1 => "ldc.i4.m1".to_string(),
                0..=8 => format!("ldc.i4.{}", v),
                -128..=127 => "ldc.i4.s".to_string(),
                _ => "ldc.i4".to_string(),
            },
            OpCode::Ldstr(_) => "ldstr".to_string(),
            OpCode::Ldnull => "ldnull".to_string(),
            OpCode::Ldfld(_) => "ldfld".to_string(),
            OpCode::Stfld(_) => "stfld".to_string(),
            OpCode::Call(_) => "call".to_string(),
            OpCode::Callvirt(_) => "callvirt".to_string(),
            OpCode::Newobj(_) => "newobj".to_string(),
            OpCode::Pop => "pop".to_string(),
            OpCode::Dup => "dup".to_string(),
            OpCode::Ret => "ret".to_string(),
            OpCode::Throw => "throw".to_string(),
            OpCode::Other { mnemonic, .. } => mnemonic.clone(),
        }
    }

    fn indexed(base: &str, n: u16) -> String {
        match n {
            0..=3 => format!("{}.{}", base, n),
            4..=255 => format!("{}.s", base),
            _ => base.to_string(),
        }
    }

    /// Encoded size in bytes, never below 1
    pub fn size(&self) -> i32 {
        match self {
            OpCode::Nop
            | OpCode::Ldnull
            | OpCode::Pop
            | OpCode::Dup
            | OpCode::Ret
            | OpCode::Throw => 1,
            OpCode::Ldarg(n) | OpCode::Ldloc(n) | OpCode::Stloc(n) => match n {
                0..=3 => 1,
                4..=255 => 2,
                // 0xFE prefix + opcode + u16 index
                _ => 4,
            },
            OpCode::LdcI4(v) => match v {
                -1..=8 => 1,
                -128..=127 => 2,
                _ => 5,
            },
            OpCode::Ldstr(_)
            | OpCode::Ldfld(_)
            | OpCode::Stfld(_)
            | OpCode::Call(_)
            | OpCode::Callvirt(_)
            | OpCode::Newobj(_) => 5,
            OpCode::Other { size, .. } => (*size).max(1),
        }
    }

    fn operand(&self) -> Option<String> {
        match self {
            OpCode::Ldarg(n) | OpCode::Ldloc(n) | OpCode::Stloc(n) if *n > 3 => {
                Some(n.to_string())
            }
            OpCode::LdcI4(v) if !(-1..=8).contains(v) => Some(v.to_string()),
            OpCode::Ldstr(s) => Some(format!("{:?}", s)),
            OpCode::Ldfld(s)
            | OpCode::Stfld(s)
            | OpCode::Call(s)
            | OpCode::Callvirt(s)
            | OpCode::Newobj(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// A single IL instruction
///
/// Cloning allocates a fresh [`InstrId`]: a copy is a new instruction that
/// can sit next to its source without being mistaken for it as an anchor.
#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct Instruction {
    /// Identity used as an insertion anchor
    #[serde(skip_deserializing, default = "InstrId::fresh")]
    pub id: InstrId,
    /// Byte offset within the method body
    #[serde(default)]
    pub offset: i32,
    /// Opcode and operand
    pub opcode: OpCode,
}

impl Instruction {
    /// Creates a detached instruction at offset 0
    pub fn new(opcode: OpCode) -> Self {
        Self::at(0, opcode)
    }

    /// Creates a detached instruction at a known offset
    pub fn at(offset: i32, opcode: OpCode) -> Self {
        Self {
            id: InstrId::fresh(),
            offset,
            opcode,
        }
    }

    /// Copy that keeps this instruction's identity
    pub(crate) fn with_same_identity(&self) -> Self {
        Self {
            id: self.id,
            offset: self.offset,
            opcode: self.opcode.clone(),
        }
    }

    /// Encoded size in bytes
    pub fn size(&self) -> i32 {
        self.opcode.size()
    }

    /// Format as assembly string
    pub fn to_asm(&self) -> String {
        match self.opcode.operand() {
            Some(operand) => format!("{} {}", self.opcode.mnemonic(), operand),
            None => self.opcode.mnemonic(),
        }
    }
}

impl Clone for Instruction {
    fn clone(&self) -> Self {
        Self {
            id: InstrId::fresh(),
            offset: self.offset,
            opcode: self.opcode.clone(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IL_{:04x}: {}", self.offset, self.to_asm())
    }
}
