//! Expression AST nodes for ToyC

use super::ops::{BinaryOp, UnaryOp};
use serde::{Deserialize, Serialize};
use toycc_common::SourceLocation;

/// An expression with its source location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    /// Integer literal (32-bit signed)
    IntLiteral(i32),

    /// Variable reference; binding is resolved during semantic analysis
    /// and again, independently, during IR generation
    Variable(String),

    /// Binary operation
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Unary operation
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },

    /// Direct function call; argument order is preserved
    Call {
        function: String,
        arguments: Vec<Expression>,
    },
}

impl Expression {
    pub fn new(kind: ExpressionKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_creation() {
        let expr = Expression::new(ExpressionKind::IntLiteral(42), SourceLocation::new(1, 1));

        match expr.kind {
            ExpressionKind::IntLiteral(value) => assert_eq!(value, 42),
            _ => panic!("Expected IntLiteral"),
        }
    }
}
