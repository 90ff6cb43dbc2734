//! IL AST nodes
//!
//! A decompiled method body is a tree of [`IlNode`]s. Only expressions carry
//! IL ranges; structural nodes (blocks, loops, conditions) reach offsets
//! through the expressions they contain.

use crate::metadata::TypeRef;
use crate::range::IlRange;
use std::fmt;

/// Operation performed by an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IlCode {
    /// No operation
    Nop,
    /// Load argument
    Ldarg,
    /// Load local
    Ldloc,
    /// Store local
    Stloc,
    /// Load constant
    Ldc,
    /// Load string
    Ldstr,
    /// Load null
    Ldnull,
    /// Load field
    Ldfld,
    /// Store field
    Stfld,
    /// Static or non-virtual call
    Call,
    /// Virtual call
    Callvirt,
    /// Object construction
    Newobj,
    /// Return
    Ret,
    /// Unconditional branch
    Br,
    /// Branch if true
    Brtrue,
    /// Leave protected region
    Leave,
    /// End of finally handler
    Endfinally,
    /// Await of a task, after async state machine recovery
    Await,
    /// Any other operation, by name
    Other(String),
}

impl fmt::Display for IlCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IlCode::Other(name) => write!(f, "{}", name),
            code => f.write_str(&format!("{:?}", code).to_lowercase()),
        }
    }
}

/// Expression node
///
/// `original` keeps the expressions this one replaced when a transform
/// rewrote it; their IL ranges still belong to this expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IlExpression {
    /// Operation
    pub code: IlCode,
    /// Inline operand (member name, literal, label)
    pub operand: Option<String>,
    /// Argument expressions, evaluation order
    pub arguments: Vec<IlExpression>,
    /// Ranges taken directly from the instructions this expression decodes
    pub il_ranges: Vec<IlRange>,
    /// Prior forms of this expression, before rewriting
    pub original: Vec<IlExpression>,
}

impl IlExpression {
    /// Expression with no operand, arguments or ranges
    pub fn new(code: IlCode) -> Self {
        Self {
            code,
            operand: None,
            arguments: Vec::new(),
            il_ranges: Vec::new(),
            original: Vec::new(),
        }
    }

    /// Sets the operand
    pub fn with_operand(mut self, operand: impl Into<String>) -> Self {
        self.operand = Some(operand.into());
        self
    }

    /// Appends an argument
    pub fn with_argument(mut self, argument: IlExpression) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Appends a directly attached range
    pub fn with_range(mut self, from: i32, to: i32) -> Self {
        self.il_ranges.push(IlRange::new(from, to));
        self
    }

    /// Records an expression this one replaced
    pub fn with_original(mut self, original: IlExpression) -> Self {
        self.original.push(original);
        self
    }

    /// Own ranges plus those of every expression in the original chain,
    /// however deep
    pub fn il_ranges_with_originals(&self) -> Vec<IlRange> {
        let mut ranges = Vec::new();
        self.collect_il_ranges(&mut ranges);
        ranges
    }

    fn collect_il_ranges(&self, out: &mut Vec<IlRange>) {
        out.extend_from_slice(&self.il_ranges);
        for original in &self.original {
            original.collect_il_ranges(out);
        }
    }

    /// Calls `f` on this expression, then on every argument, depth first
    ///
    /// Original-chain expressions are not visited; they are history, not
    /// children.
    pub fn for_each_expression<'a>(&'a self, f: &mut dyn FnMut(&'a IlExpression)) {
        f(self);
        for argument in &self.arguments {
            argument.for_each_expression(f);
        }
    }
}

/// Ordered list of statements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IlBlock {
    /// Statements
    pub body: Vec<IlNode>,
}

impl IlBlock {
    /// Block of the given statements
    pub fn new(body: Vec<IlNode>) -> Self {
        Self { body }
    }

    /// Calls `f` on every expression in the block, depth first
    pub fn for_each_expression<'a>(&'a self, f: &mut dyn FnMut(&'a IlExpression)) {
        for node in &self.body {
            node.for_each_expression(f);
        }
    }
}

/// `catch` clause of a try block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatchBlock {
    /// Caught exception type; `None` catches everything
    pub exception_type: Option<TypeRef>,
    /// Variable bound to the exception
    pub exception_variable: Option<String>,
    /// Handler body
    pub body: IlBlock,
}

/// `case` arm of a switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseBlock {
    /// Matched values; empty for the default arm
    pub values: Vec<i32>,
    /// Arm body
    pub body: IlBlock,
}

/// Node of the IL AST
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IlNode {
    /// Nested block
    Block(IlBlock),
    /// Straight-line block before structuring
    BasicBlock(IlBlock),
    /// Branch target
    Label(String),
    /// Expression statement
    Expression(IlExpression),
    /// Protected region with handlers
    TryCatch {
        /// Protected body
        try_block: IlBlock,
        /// Typed handlers, in order
        catch_blocks: Vec<CatchBlock>,
        /// `finally` handler
        finally_block: Option<IlBlock>,
        /// `fault` handler
        fault_block: Option<IlBlock>,
    },
    /// Loop; `None` condition loops forever
    WhileLoop {
        /// Loop condition
        condition: Option<IlExpression>,
        /// Loop body
        body: IlBlock,
    },
    /// If/else
    Condition {
        /// Branch condition
        condition: IlExpression,
        /// Taken when true
        true_block: IlBlock,
        /// Taken when false
        false_block: Option<IlBlock>,
    },
    /// Multi-way branch
    Switch {
        /// Switched value
        condition: IlExpression,
        /// Arms, in order
        case_blocks: Vec<CaseBlock>,
    },
}

impl IlNode {
    /// Calls `f` on this node if it is an expression, then on every
    /// expression beneath it, depth first in source order
    pub fn for_each_expression<'a>(&'a self, f: &mut dyn FnMut(&'a IlExpression)) {
        match self {
            IlNode::Block(block) | IlNode::BasicBlock(block) => block.for_each_expression(f),
            IlNode::Label(_) => {}
            IlNode::Expression(expr) => expr.for_each_expression(f),
            IlNode::TryCatch {
                try_block,
                catch_blocks,
                finally_block,
                fault_block,
            } => {
                try_block.for_each_expression(f);
                for catch in catch_blocks {
                    catch.body.for_each_expression(f);
                }
                if let Some(block) = finally_block {
                    block.for_each_expression(f);
                }
                if let Some(block) = fault_block {
                    block.for_each_expression(f);
                }
            }
            IlNode::WhileLoop { condition, body } => {
                if let Some(condition) = condition {
                    condition.for_each_expression(f);
                }
                body.for_each_expression(f);
            }
            IlNode::Condition {
                condition,
                true_block,
                false_block,
            } => {
                condition.for_each_expression(f);
                true_block.for_each_expression(f);
                if let Some(block) = false_block {
                    block.for_each_expression(f);
                }
            }
            IlNode::Switch {
                condition,
                case_blocks,
            } => {
                condition.for_each_expression(f);
                for case in case_blocks {
                    case.body.for_each_expression(f);
                }
            }
        }
    }
}

impl From<IlExpression> for IlNode {
    fn from(expr: IlExpression) -> Self {
        IlNode::Expression(expr)
    }
}
