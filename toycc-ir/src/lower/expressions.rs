//! Expression lowering
//!
//! Each expression lowers to an operand plus the instructions that compute
//! it, appended to the current function. Evaluation order is strictly
//! left-to-right; `&&` and `||` evaluate both operands unconditionally.

use crate::instructions::Instruction;
use crate::lower::LoweringContext;
use crate::values::Operand;
use toycc_common::CompilerError;
use toycc_frontend::{Expression, ExpressionKind};

impl LoweringContext {
    /// Lower an expression, returning the operand that holds its value
    pub(crate) fn lower_expression(
        &mut self,
        expr: &Expression,
    ) -> Result<Operand, CompilerError> {
        match &expr.kind {
            ExpressionKind::IntLiteral(value) => Ok(Operand::Const(*value)),

            // The value is addressed by the qualified name; the back-end
            // materializes it with a load from the name's slot.
            ExpressionKind::Variable(name) => Ok(Operand::Name(self.resolve(name)?)),

            ExpressionKind::Unary { op, operand } => {
                let src = self.lower_expression(operand)?;
                let dest = self.fresh_temp();
                self.emit(Instruction::Unary {
                    dest: dest.clone(),
                    op: *op,
                    src,
                });
                Ok(dest)
            }

            ExpressionKind::Binary { op, left, right } => {
                let lhs = self.lower_expression(left)?;
                let rhs = self.lower_expression(right)?;
                let dest = self.fresh_temp();
                self.emit(Instruction::Binary {
                    dest: dest.clone(),
                    op: *op,
                    lhs,
                    rhs,
                });
                Ok(dest)
            }

            ExpressionKind::Call {
                function,
                arguments,
            } => {
                let mut args = Vec::with_capacity(arguments.len());
                for arg in arguments {
                    args.push(self.lower_expression(arg)?);
                }

                // Void callees get a destination too; it is never read.
                let dest = self.fresh_temp();
                self.emit(Instruction::Call {
                    dest: Some(dest.clone()),
                    function: function.clone(),
                    args,
                });
                Ok(dest)
            }
        }
    }
}
