//! IR operand representations

use serde::{Deserialize, Serialize};
use std::fmt;
use toycc_common::TempId;

/// An IR operand
///
/// Temporaries are single-assignment and numbered per function. Named
/// storage cells carry scope-qualified source names (`x@1`), which keeps
/// shadowed variables distinct; named cells may be reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operand {
    /// Constant integer
    Const(i32),

    /// Temporary, indexed by a fresh non-negative integer
    Temp(TempId),

    /// Named storage cell, keyed by a scope-qualified source name
    Name(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Const(value) => write!(f, "{value}"),
            Operand::Temp(id) => write!(f, "t{id}"),
            Operand::Name(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_display() {
        assert_eq!(format!("{}", Operand::Const(-7)), "-7");
        assert_eq!(format!("{}", Operand::Temp(3)), "t3");
        assert_eq!(format!("{}", Operand::Name("x@1".to_string())), "x@1");
    }
}
