//! Semantic analysis error definitions

use crate::types::Type;
use toycc_common::{CompilerError, SourceLocation};

/// Semantic analysis errors, converted into `CompilerError` messages
#[derive(Debug, Clone)]
pub enum SemanticError {
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },
    AssignToUndeclared {
        name: String,
        location: SourceLocation,
    },
    UndefinedFunction {
        name: String,
        location: SourceLocation,
    },
    RedefinedFunction {
        name: String,
        location: SourceLocation,
    },
    RedefinedVariable {
        name: String,
        location: SourceLocation,
    },
    DuplicateParameter {
        name: String,
        location: SourceLocation,
    },
    VoidVariable {
        name: String,
        location: SourceLocation,
    },
    VoidParameter {
        name: String,
        location: SourceLocation,
    },
    TypeMismatch {
        expected: Type,
        found: Type,
        context: String,
        location: SourceLocation,
    },
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        found: usize,
        location: SourceLocation,
    },
    VoidReturnValue {
        location: SourceLocation,
    },
    MissingReturnValue {
        location: SourceLocation,
    },
    BreakOutsideLoop {
        location: SourceLocation,
    },
    ContinueOutsideLoop {
        location: SourceLocation,
    },
    MissingMain,
    InvalidMainSignature {
        reason: String,
        location: SourceLocation,
    },
}

impl From<SemanticError> for CompilerError {
    fn from(err: SemanticError) -> Self {
        match err {
            SemanticError::UndefinedVariable { name, location } => {
                CompilerError::semantic_error(format!("undefined variable '{name}'"), location)
            }
            SemanticError::AssignToUndeclared { name, location } => CompilerError::semantic_error(
                format!("assignment to undeclared variable '{name}'"),
                location,
            ),
            SemanticError::UndefinedFunction { name, location } => CompilerError::semantic_error(
                format!("call to undefined function '{name}'"),
                location,
            ),
            SemanticError::RedefinedFunction { name, location } => CompilerError::semantic_error(
                format!("redefinition of function '{name}'"),
                location,
            ),
            SemanticError::RedefinedVariable { name, location } => CompilerError::semantic_error(
                format!("redefinition of variable '{name}'"),
                location,
            ),
            SemanticError::DuplicateParameter { name, location } => CompilerError::semantic_error(
                format!("duplicate parameter name '{name}'"),
                location,
            ),
            SemanticError::VoidVariable { name, location } => CompilerError::semantic_error(
                format!("variable '{name}' declared void"),
                location,
            ),
            SemanticError::VoidParameter { name, location } => CompilerError::semantic_error(
                format!("parameter '{name}' declared void"),
                location,
            ),
            SemanticError::TypeMismatch {
                expected,
                found,
                context,
                location,
            } => CompilerError::semantic_error(
                format!("type mismatch in {context}: expected {expected}, found {found}"),
                location,
            ),
            SemanticError::ArgumentCountMismatch {
                function,
                expected,
                found,
                location,
            } => CompilerError::semantic_error(
                format!("function '{function}' expects {expected} arguments, found {found}"),
                location,
            ),
            SemanticError::VoidReturnValue { location } => CompilerError::semantic_error(
                "void function cannot have a return value",
                location,
            ),
            SemanticError::MissingReturnValue { location } => CompilerError::semantic_error(
                "non-void function must return a value",
                location,
            ),
            SemanticError::BreakOutsideLoop { location } => {
                CompilerError::semantic_error("'break' outside of loop", location)
            }
            SemanticError::ContinueOutsideLoop { location } => {
                CompilerError::semantic_error("'continue' outside of loop", location)
            }
            SemanticError::MissingMain => CompilerError::semantic_error(
                "missing 'main' function",
                SourceLocation::dummy(),
            ),
            SemanticError::InvalidMainSignature { reason, location } => {
                CompilerError::semantic_error(format!("invalid 'main' signature: {reason}"), location)
            }
        }
    }
}
