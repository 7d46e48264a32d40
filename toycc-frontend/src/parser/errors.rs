//! Parse error definitions

use crate::lexer::Token;
use toycc_common::{CompilerError, SourceLocation};

/// Parse errors, converted into `CompilerError` at the parser boundary
#[derive(Debug, Clone)]
pub enum ParseError {
    UnexpectedToken { expected: String, found: Token },
    UnexpectedEndOfFile { expected: String },
}

impl From<ParseError> for CompilerError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnexpectedToken { expected, found } => CompilerError::parse_error(
                format!("expected {}, found '{}'", expected, found.token_type),
                found.location,
            ),
            ParseError::UnexpectedEndOfFile { expected } => CompilerError::parse_error(
                format!("expected {}, found end of file", expected),
                SourceLocation::dummy(),
            ),
        }
    }
}
