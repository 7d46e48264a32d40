//! IR functions and programs

use crate::instructions::Instruction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A lowered function: flat instruction list plus qualified parameter names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrFunction {
    pub name: String,
    /// Scope-qualified parameter names, in declaration order
    pub parameters: Vec<String>,
    pub instructions: Vec<Instruction>,
}

impl fmt::Display for IrFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function {}(", self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        writeln!(f, "):")?;

        for inst in &self.instructions {
            match inst {
                Instruction::Label(_) => writeln!(f, "{inst}")?,
                _ => writeln!(f, "  {inst}")?,
            }
        }

        Ok(())
    }
}

/// A lowered program: the unit's functions in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrProgram {
    pub functions: Vec<IrFunction>,
}

impl fmt::Display for IrProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, func) in self.functions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{func}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::Operand;

    #[test]
    fn test_function_display() {
        let func = IrFunction {
            name: "main".to_string(),
            parameters: vec![],
            instructions: vec![
                Instruction::Label("L0".to_string()),
                Instruction::Return(Some(Operand::Const(0))),
            ],
        };

        let text = format!("{}", func);
        assert!(text.starts_with("function main():\n"));
        assert!(text.contains("L0:\n"));
        assert!(text.contains("  return 0\n"));
    }

    #[test]
    fn test_function_display_with_parameters() {
        let func = IrFunction {
            name: "add".to_string(),
            parameters: vec!["a@1".to_string(), "b@1".to_string()],
            instructions: vec![],
        };

        assert!(format!("{}", func).starts_with("function add(a@1, b@1):"));
    }
}
