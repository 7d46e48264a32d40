//! IR Instructions
//!
//! Defines all instruction types available in the IR. Operator enums are
//! reused from the AST rather than duplicated.

use crate::values::Operand;
use serde::{Deserialize, Serialize};
use std::fmt;
use toycc_frontend::{BinaryOp, UnaryOp};

/// IR Instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Binary operation: dest = op lhs, rhs
    Binary {
        dest: Operand,
        op: BinaryOp,
        lhs: Operand,
        rhs: Operand,
    },

    /// Unary operation: dest = op src
    Unary {
        dest: Operand,
        op: UnaryOp,
        src: Operand,
    },

    /// Copy: dest = src
    Move { dest: Operand, src: Operand },

    /// Load through an address operand: dest = *addr
    ///
    /// Reserved for a future memory model; the lowering pass never
    /// produces it and the emitter rejects it.
    Load { dest: Operand, addr: Operand },

    /// Store through an address operand: *addr = src
    ///
    /// Reserved for a future memory model, like `Load`.
    Store { addr: Operand, src: Operand },

    /// Jump target
    Label(String),

    /// Unconditional jump
    Jump(String),

    /// Conditional jump: nonzero condition goes to `true_label`,
    /// zero to `false_label`
    CJump {
        condition: Operand,
        true_label: String,
        false_label: String,
    },

    /// Function call; arguments are in source order. The destination is
    /// always present when the call appears as an expression, even for
    /// void callees (the temp is simply never read).
    Call {
        dest: Option<Operand>,
        function: String,
        args: Vec<Operand>,
    },

    /// Return with optional value
    Return(Option<Operand>),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Binary { dest, op, lhs, rhs } => {
                write!(f, "{dest} = {lhs} {op} {rhs}")
            }
            Instruction::Unary { dest, op, src } => write!(f, "{dest} = {op}{src}"),
            Instruction::Move { dest, src } => write!(f, "{dest} = {src}"),
            Instruction::Load { dest, addr } => write!(f, "{dest} = load {addr}"),
            Instruction::Store { addr, src } => write!(f, "store {addr}, {src}"),
            Instruction::Label(label) => write!(f, "{label}:"),
            Instruction::Jump(label) => write!(f, "jump {label}"),
            Instruction::CJump {
                condition,
                true_label,
                false_label,
            } => write!(f, "if {condition} goto {true_label} else {false_label}"),
            Instruction::Call {
                dest,
                function,
                args,
            } => {
                if let Some(dest) = dest {
                    write!(f, "{dest} = ")?;
                }
                write!(f, "call {function}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Instruction::Return(Some(value)) => write!(f, "return {value}"),
            Instruction::Return(None) => write!(f, "return"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_display() {
        let inst = Instruction::Binary {
            dest: Operand::Temp(0),
            op: BinaryOp::Mul,
            lhs: Operand::Name("a@1".to_string()),
            rhs: Operand::Name("a@1".to_string()),
        };
        assert_eq!(format!("{}", inst), "t0 = a@1 * a@1");
    }

    #[test]
    fn test_call_display() {
        let inst = Instruction::Call {
            dest: Some(Operand::Temp(2)),
            function: "add".to_string(),
            args: vec![Operand::Name("s@1".to_string()), Operand::Const(1)],
        };
        assert_eq!(format!("{}", inst), "t2 = call add(s@1, 1)");
    }

    #[test]
    fn test_cjump_display() {
        let inst = Instruction::CJump {
            condition: Operand::Temp(0),
            true_label: "L1".to_string(),
            false_label: "L2".to_string(),
        };
        assert_eq!(format!("{}", inst), "if t0 goto L1 else L2");
    }

    #[test]
    fn test_return_display() {
        assert_eq!(format!("{}", Instruction::Return(None)), "return");
        assert_eq!(
            format!("{}", Instruction::Return(Some(Operand::Const(0)))),
            "return 0"
        );
    }
}
