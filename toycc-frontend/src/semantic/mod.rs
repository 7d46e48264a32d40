//! Semantic Analysis for ToyC
//!
//! Performs scope management, name resolution, type checking and
//! control-flow context validation on the AST produced by the parser.
//! The analyzer validates only; it neither mutates nor annotates the AST.

pub mod errors;
mod expressions;
mod statements;
pub mod symbols;

pub use errors::SemanticError;
pub use symbols::{FuncInfo, ScopeStack, VarInfo};

use crate::ast::*;
use crate::types::Type;
use std::collections::HashMap;
use toycc_common::CompilerError;

/// Semantic analyzer context
///
/// State is per-unit for the function table and per-function for the scope
/// stack, return type and loop flag.
pub struct SemanticAnalyzer {
    pub(crate) functions: HashMap<String, FuncInfo>,
    pub(crate) scopes: ScopeStack,
    pub(crate) current_return_type: Type,
    pub(crate) in_loop: bool,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    /// Create a new semantic analyzer
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
            scopes: ScopeStack::new(),
            current_return_type: Type::Int,
            in_loop: false,
        }
    }

    /// Analyze a compilation unit
    ///
    /// Pass 1 collects function signatures in declaration order and checks
    /// the `main` contract; pass 2 checks each function body.
    pub fn analyze(&mut self, unit: &CompilationUnit) -> Result<(), CompilerError> {
        self.collect_functions(unit)?;

        for func in &unit.functions {
            self.analyze_function(func)?;
        }

        Ok(())
    }

    /// Pass 1: populate the function table and verify `main`
    fn collect_functions(&mut self, unit: &CompilationUnit) -> Result<(), CompilerError> {
        for func in &unit.functions {
            if self.functions.contains_key(&func.name) {
                return Err(SemanticError::RedefinedFunction {
                    name: func.name.clone(),
                    location: func.location,
                }
                .into());
            }

            self.functions.insert(
                func.name.clone(),
                FuncInfo {
                    return_type: func.return_type,
                    param_types: func.parameters.iter().map(|p| p.param_type).collect(),
                },
            );
        }

        let Some(main) = unit.functions.iter().find(|f| f.name == "main") else {
            return Err(SemanticError::MissingMain.into());
        };

        if main.return_type != Type::Int {
            return Err(SemanticError::InvalidMainSignature {
                reason: "must return int".to_string(),
                location: main.location,
            }
            .into());
        }
        if !main.parameters.is_empty() {
            return Err(SemanticError::InvalidMainSignature {
                reason: "must take no parameters".to_string(),
                location: main.location,
            }
            .into());
        }

        Ok(())
    }

    /// Pass 2: check one function body
    ///
    /// Parameters and the body's top-level statements share a single scope,
    /// matching the depth numbering the IR generator uses for qualified
    /// names. Nested blocks open their own scopes.
    fn analyze_function(&mut self, func: &FunctionDefinition) -> Result<(), CompilerError> {
        self.current_return_type = func.return_type;
        self.in_loop = false;

        self.scopes.push_scope();

        for param in &func.parameters {
            if param.param_type == Type::Void {
                return Err(SemanticError::VoidParameter {
                    name: param.name.clone(),
                    location: param.location,
                }
                .into());
            }
            if self.scopes.declared_in_current_scope(&param.name) {
                return Err(SemanticError::DuplicateParameter {
                    name: param.name.clone(),
                    location: param.location,
                }
                .into());
            }
            self.scopes.declare(
                &param.name,
                VarInfo {
                    var_type: param.param_type,
                },
            );
        }

        let result = match &func.body.kind {
            StatementKind::Block(statements) => {
                let mut result = Ok(());
                for stmt in statements {
                    result = self.check_statement(stmt);
                    if result.is_err() {
                        break;
                    }
                }
                result
            }
            _ => Err(CompilerError::internal_error(format!(
                "body of function '{}' is not a block",
                func.name
            ))),
        };

        self.scopes.pop_scope();
        result
    }
}
