//! # Offset Aggregation
//!
//! The IL offsets a subtree covers are the union of the ranges of every
//! expression in it, original chains included.
//!
//! `first_il_offset` and `last_il_offset` disagree on empty input on purpose:
//! callers test `last_il_offset() != -1` to see whether a node covers any code
//! at all, and only ask for the first offset once it does. Asking anyway is a
//! bug in the caller and reported as [`Error::NoIlRanges`], since a default of
//! 0 would be indistinguishable from a real offset.

use super::node::{IlBlock, IlExpression, IlNode};
use crate::range::IlRange;
use crate::{Error, Result};

/// Offset span of an IL AST subtree
pub trait IlOffsets {
    /// Calls `f` on every expression in the subtree, this node included
    fn visit_expressions<'a>(&'a self, f: &mut dyn FnMut(&'a IlExpression));

    /// Every expression in the subtree, this node included
    fn self_and_descendant_expressions(&self) -> Vec<&IlExpression> {
        let mut exprs = Vec::new();
        self.visit_expressions(&mut |e| exprs.push(e));
        exprs
    }

    /// Every contributing range in the subtree
    fn contributing_ranges(&self) -> Vec<IlRange> {
        let mut ranges = Vec::new();
        self.visit_expressions(&mut |e| ranges.extend(e.il_ranges_with_originals()));
        ranges
    }

    /// Smallest `from` over all contributing ranges
    fn first_il_offset(&self) -> Result<i32> {
        self.contributing_ranges()
            .iter()
            .map(|r| r.from)
            .min()
            .ok_or(Error::NoIlRanges)
    }

    /// Largest `to` over all contributing ranges, or `-1` when there are none
    fn last_il_offset(&self) -> i32 {
        self.contributing_ranges()
            .iter()
            .map(|r| r.to)
            .max()
            .unwrap_or(IlRange::EMPTY.to)
    }
}

impl IlOffsets for IlNode {
    fn visit_expressions<'a>(&'a self, f: &mut dyn FnMut(&'a IlExpression)) {
        self.for_each_expression(f);
    }
}

impl IlOffsets for IlBlock {
    fn visit_expressions<'a>(&'a self, f: &mut dyn FnMut(&'a IlExpression)) {
        self.for_each_expression(f);
    }
}

impl IlOffsets for IlExpression {
    fn visit_expressions<'a>(&'a self, f: &mut dyn FnMut(&'a IlExpression)) {
        self.for_each_expression(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::IlCode;

    fn expr(from: i32, to: i32) -> IlExpression {
        IlExpression::new(IlCode::Nop).with_range(from, to)
    }

    #[test]
    fn test_rewritten_expression_keeps_original_offsets() {
        let e1 = expr(5, 10);
        let e2 = IlExpression::new(IlCode::Await)
            .with_range(11, 15)
            .with_original(e1);
        let node = IlNode::Block(IlBlock::new(vec![e2.into()]));

        assert_eq!(node.first_il_offset(), Ok(5));
        assert_eq!(node.last_il_offset(), 15);
    }

    #[test]
    fn test_no_ranges() {
        let node = IlNode::Block(IlBlock::new(vec![
            IlNode::Label("L".into()),
            IlExpression::new(IlCode::Nop).into(),
        ]));

        assert_eq!(node.last_il_offset(), -1);
        assert_eq!(node.first_il_offset(), Err(Error::NoIlRanges));
    }

    #[test]
    fn test_aggregates_over_arguments_and_nested_blocks() {
        let node = IlNode::Condition {
            condition: IlExpression::new(IlCode::Brtrue)
                .with_range(20, 21)
                .with_argument(expr(18, 19)),
            true_block: IlBlock::new(vec![expr(22, 30).into()]),
            false_block: Some(IlBlock::new(vec![expr(31, 40).into()])),
        };

        assert_eq!(node.first_il_offset(), Ok(18));
        assert_eq!(node.last_il_offset(), 40);
    }

    #[test]
    fn test_original_chain_can_extend_both_ends() {
        let deepest = expr(0, 2);
        let middle = expr(3, 50).with_original(deepest);
        let top = expr(10, 12).with_original(middle);

        assert_eq!(top.first_il_offset(), Ok(0));
        assert_eq!(top.last_il_offset(), 50);
    }

    #[test]
    fn test_block_impl_and_descendants() {
        let block = IlBlock::new(vec![
            expr(4, 4).with_argument(expr(1, 3)).into(),
            IlNode::Label("L".into()),
            expr(6, 9).into(),
        ]);
        assert_eq!(block.self_and_descendant_expressions().len(), 3);
        assert_eq!(block.first_il_offset(), Ok(1));
        assert_eq!(block.last_il_offset(), 9);
    }
}
