//! Statement checking

use crate::ast::*;
use crate::semantic::errors::SemanticError;
use crate::semantic::{SemanticAnalyzer, VarInfo};
use crate::types::Type;
use toycc_common::CompilerError;

impl SemanticAnalyzer {
    /// Check a statement
    pub(crate) fn check_statement(&mut self, stmt: &Statement) -> Result<(), CompilerError> {
        match &stmt.kind {
            StatementKind::Block(statements) => {
                self.scopes.push_scope();
                let mut result = Ok(());
                for stmt in statements {
                    result = self.check_statement(stmt);
                    if result.is_err() {
                        break;
                    }
                }
                self.scopes.pop_scope();
                result
            }

            StatementKind::Empty => Ok(()),

            StatementKind::Expression(expr) => {
                // A void-returning call is legal here; its value is dropped.
                self.check_expression(expr)?;
                Ok(())
            }

            StatementKind::Declaration {
                var_type,
                name,
                initializer,
            } => {
                if *var_type == Type::Void {
                    return Err(SemanticError::VoidVariable {
                        name: name.clone(),
                        location: stmt.location,
                    }
                    .into());
                }

                if self.scopes.declared_in_current_scope(name) {
                    return Err(SemanticError::RedefinedVariable {
                        name: name.clone(),
                        location: stmt.location,
                    }
                    .into());
                }

                if let Some(init) = initializer {
                    let init_type = self.check_expression(init)?;
                    if init_type != *var_type {
                        return Err(SemanticError::TypeMismatch {
                            expected: *var_type,
                            found: init_type,
                            context: format!("initializer of '{name}'"),
                            location: init.location,
                        }
                        .into());
                    }
                }

                self.scopes.declare(name, VarInfo { var_type: *var_type });
                Ok(())
            }

            StatementKind::Assignment { name, value } => {
                let Some(info) = self.scopes.lookup(name) else {
                    return Err(SemanticError::AssignToUndeclared {
                        name: name.clone(),
                        location: stmt.location,
                    }
                    .into());
                };

                let value_type = self.check_expression(value)?;
                if value_type != info.var_type {
                    return Err(SemanticError::TypeMismatch {
                        expected: info.var_type,
                        found: value_type,
                        context: format!("assignment to '{name}'"),
                        location: value.location,
                    }
                    .into());
                }
                Ok(())
            }

            StatementKind::If {
                condition,
                then_stmt,
                else_stmt,
            } => {
                self.check_condition(condition)?;
                self.check_statement(then_stmt)?;
                if let Some(else_stmt) = else_stmt {
                    self.check_statement(else_stmt)?;
                }
                Ok(())
            }

            StatementKind::While { condition, body } => {
                self.check_condition(condition)?;

                let was_in_loop = self.in_loop;
                self.in_loop = true;
                let result = self.check_statement(body);
                self.in_loop = was_in_loop;
                result
            }

            StatementKind::Break => {
                if !self.in_loop {
                    return Err(SemanticError::BreakOutsideLoop {
                        location: stmt.location,
                    }
                    .into());
                }
                Ok(())
            }

            StatementKind::Continue => {
                if !self.in_loop {
                    return Err(SemanticError::ContinueOutsideLoop {
                        location: stmt.location,
                    }
                    .into());
                }
                Ok(())
            }

            StatementKind::Return(value) => match (self.current_return_type, value) {
                (Type::Void, Some(_)) => Err(SemanticError::VoidReturnValue {
                    location: stmt.location,
                }
                .into()),
                (Type::Void, None) => Ok(()),
                (Type::Int, None) => Err(SemanticError::MissingReturnValue {
                    location: stmt.location,
                }
                .into()),
                (Type::Int, Some(expr)) => {
                    let value_type = self.check_expression(expr)?;
                    if value_type != Type::Int {
                        return Err(SemanticError::TypeMismatch {
                            expected: Type::Int,
                            found: value_type,
                            context: "return value".to_string(),
                            location: expr.location,
                        }
                        .into());
                    }
                    Ok(())
                }
            },
        }
    }

    /// Conditions are plain `int`; there is no boolean type
    fn check_condition(&mut self, condition: &Expression) -> Result<(), CompilerError> {
        let condition_type = self.check_expression(condition)?;
        if condition_type != Type::Int {
            return Err(SemanticError::TypeMismatch {
                expected: Type::Int,
                found: condition_type,
                context: "condition".to_string(),
                location: condition.location,
            }
            .into());
        }
        Ok(())
    }
}
