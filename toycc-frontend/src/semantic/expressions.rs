//! Expression type checking

use crate::ast::*;
use crate::semantic::errors::SemanticError;
use crate::semantic::SemanticAnalyzer;
use crate::types::Type;
use toycc_common::CompilerError;

impl SemanticAnalyzer {
    /// Check an expression and compute its type
    pub(crate) fn check_expression(&mut self, expr: &Expression) -> Result<Type, CompilerError> {
        match &expr.kind {
            ExpressionKind::IntLiteral(_) => Ok(Type::Int),

            ExpressionKind::Variable(name) => {
                let Some(info) = self.scopes.lookup(name) else {
                    return Err(SemanticError::UndefinedVariable {
                        name: name.clone(),
                        location: expr.location,
                    }
                    .into());
                };
                Ok(info.var_type)
            }

            ExpressionKind::Unary { operand, .. } => {
                let operand_type = self.check_expression(operand)?;
                if operand_type != Type::Int {
                    return Err(SemanticError::TypeMismatch {
                        expected: Type::Int,
                        found: operand_type,
                        context: "unary operand".to_string(),
                        location: operand.location,
                    }
                    .into());
                }
                Ok(Type::Int)
            }

            ExpressionKind::Binary { left, right, .. } => {
                let left_type = self.check_expression(left)?;
                if left_type != Type::Int {
                    return Err(SemanticError::TypeMismatch {
                        expected: Type::Int,
                        found: left_type,
                        context: "binary operand".to_string(),
                        location: left.location,
                    }
                    .into());
                }

                let right_type = self.check_expression(right)?;
                if right_type != Type::Int {
                    return Err(SemanticError::TypeMismatch {
                        expected: Type::Int,
                        found: right_type,
                        context: "binary operand".to_string(),
                        location: right.location,
                    }
                    .into());
                }

                Ok(Type::Int)
            }

            ExpressionKind::Call {
                function,
                arguments,
            } => self.check_call(function, arguments, expr),
        }
    }

    /// Check a call expression: declared callee, matching arity, `int`
    /// arguments. The result is the callee's declared return type; callers
    /// in value positions reject `void` through the `int`-operand rules.
    fn check_call(
        &mut self,
        function: &str,
        arguments: &[Expression],
        expr: &Expression,
    ) -> Result<Type, CompilerError> {
        let Some(info) = self.functions.get(function).cloned() else {
            return Err(SemanticError::UndefinedFunction {
                name: function.to_string(),
                location: expr.location,
            }
            .into());
        };

        if arguments.len() != info.param_types.len() {
            return Err(SemanticError::ArgumentCountMismatch {
                function: function.to_string(),
                expected: info.param_types.len(),
                found: arguments.len(),
                location: expr.location,
            }
            .into());
        }

        for (arg, &param_type) in arguments.iter().zip(info.param_types.iter()) {
            let arg_type = self.check_expression(arg)?;
            if arg_type != param_type {
                return Err(SemanticError::TypeMismatch {
                    expected: param_type,
                    found: arg_type,
                    context: format!("argument to '{function}'"),
                    location: arg.location,
                }
                .into());
            }
        }

        Ok(info.return_type)
    }
}
