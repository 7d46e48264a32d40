//! AST → IR lowering
//!
//! Translates each function body into a flat three-address instruction
//! list. Temporaries are numbered per function; labels are numbered by a
//! single generator shared across the whole unit, so every label is unique
//! program-wide (the back-end relies on this). Variable accesses are
//! rewritten to scope-qualified names (`x@1`), which keeps shadowed
//! variables distinct in the flat name space.

mod expressions;
mod statements;

use crate::function::{IrFunction, IrProgram};
use crate::instructions::Instruction;
use crate::values::Operand;
use log::{debug, trace};
use std::collections::HashMap;
use toycc_common::{CompilerError, LabelGenerator, TempGenerator};
use toycc_frontend::{CompilationUnit, FunctionDefinition, StatementKind};

/// Lowering state
///
/// One context lowers one compilation unit. The label generator lives for
/// the whole unit; everything else is reset per function.
pub struct LoweringContext {
    pub(crate) labels: LabelGenerator,
    pub(crate) temps: TempGenerator,
    pub(crate) scopes: Vec<HashMap<String, String>>,
    pub(crate) break_labels: Vec<String>,
    pub(crate) continue_labels: Vec<String>,
    pub(crate) instructions: Vec<Instruction>,
}

impl Default for LoweringContext {
    fn default() -> Self {
        Self::new()
    }
}

impl LoweringContext {
    /// Create a fresh context for one compilation unit
    pub fn new() -> Self {
        Self {
            labels: LabelGenerator::new(),
            temps: TempGenerator::new(),
            scopes: Vec::new(),
            break_labels: Vec::new(),
            continue_labels: Vec::new(),
            instructions: Vec::new(),
        }
    }

    /// Lower a whole unit
    pub fn lower_unit(&mut self, unit: &CompilationUnit) -> Result<IrProgram, CompilerError> {
        let mut functions = Vec::new();

        for func in &unit.functions {
            functions.push(self.lower_function(func)?);
        }

        Ok(IrProgram { functions })
    }

    /// Lower one function
    ///
    /// Parameters and the body's top-level declarations share the outer
    /// scope, so both qualify at depth 1. The body block's statements are
    /// lowered directly instead of through block lowering, which would
    /// open a second scope.
    fn lower_function(&mut self, func: &FunctionDefinition) -> Result<IrFunction, CompilerError> {
        debug!("lowering function '{}'", func.name);

        self.temps = TempGenerator::new();
        self.instructions.clear();
        self.scopes.clear();
        self.break_labels.clear();
        self.continue_labels.clear();

        self.push_scope();

        let mut parameters = Vec::new();
        for param in &func.parameters {
            parameters.push(self.declare(&param.name));
        }

        let StatementKind::Block(statements) = &func.body.kind else {
            return Err(CompilerError::internal_error(format!(
                "body of function '{}' is not a block",
                func.name
            )));
        };

        for stmt in statements {
            self.lower_statement(stmt)?;
        }

        self.pop_scope();

        trace!(
            "function '{}' lowered to {} instructions",
            func.name,
            self.instructions.len()
        );

        Ok(IrFunction {
            name: func.name.clone(),
            parameters,
            instructions: std::mem::take(&mut self.instructions),
        })
    }

    /// Enter a new scope
    pub(crate) fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Exit current scope
    pub(crate) fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Declare a source name in the current scope, minting its qualified
    /// name from the scope depth at the point of declaration
    pub(crate) fn declare(&mut self, name: &str) -> String {
        let qualified = format!("{}@{}", name, self.scopes.len());
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), qualified.clone());
        }
        qualified
    }

    /// Resolve a source name to its qualified name
    ///
    /// Semantic analysis has already validated every reference, so a miss
    /// here is a bug in an earlier stage.
    pub(crate) fn resolve(&self, name: &str) -> Result<String, CompilerError> {
        for scope in self.scopes.iter().rev() {
            if let Some(qualified) = scope.get(name) {
                return Ok(qualified.clone());
            }
        }
        Err(CompilerError::internal_error(format!(
            "IR generation references undeclared variable '{name}'"
        )))
    }

    /// Allocate a fresh temporary
    pub(crate) fn fresh_temp(&mut self) -> Operand {
        Operand::Temp(self.temps.new_temp())
    }

    /// Append an instruction to the current function
    pub(crate) fn emit(&mut self, inst: Instruction) {
        self.instructions.push(inst);
    }
}

/// Lower a semantically valid unit with a fresh context
pub fn lower_unit(unit: &CompilationUnit) -> Result<IrProgram, CompilerError> {
    LoweringContext::new().lower_unit(unit)
}
