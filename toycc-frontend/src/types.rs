//! ToyC type system
//!
//! The language has exactly two types. Only `int` is a legal value type;
//! `void` may appear as a function return type and nowhere else.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ToyC types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Int,
    Void,
}

impl Type {
    /// Whether a value of this type can be stored in a variable or passed
    /// as an argument
    pub fn is_value_type(&self) -> bool {
        matches!(self, Type::Int)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Void => write!(f, "void"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_display() {
        assert_eq!(format!("{}", Type::Int), "int");
        assert_eq!(format!("{}", Type::Void), "void");
    }

    #[test]
    fn test_value_types() {
        assert!(Type::Int.is_value_type());
        assert!(!Type::Void.is_value_type());
    }
}
