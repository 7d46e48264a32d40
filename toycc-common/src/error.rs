//! Error handling for the ToyC compiler
//!
//! One error type spans every phase. Each stage aborts on the first
//! diagnostic it issues; there is no error-list accumulation.

use crate::source_loc::SourceLocation;
use thiserror::Error;

/// Main compiler error type that encompasses all phases of compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("lexical error at {location}: {message}")]
    Lex {
        location: SourceLocation,
        message: String,
    },

    #[error("parse error at {location}: {message}")]
    Parse {
        location: SourceLocation,
        message: String,
    },

    #[error("semantic error at {location}: {message}")]
    Semantic {
        location: SourceLocation,
        message: String,
    },

    #[error("code generation error: {message}")]
    Codegen { message: String },

    #[error("IO error: {message}")]
    Io { message: String },

    /// Breach of an inter-stage invariant. Unreachable on well-formed input;
    /// indicates a bug in an earlier stage.
    #[error("internal compiler error: {message}")]
    Internal { message: String },
}

impl CompilerError {
    pub fn lex_error(message: impl Into<String>, location: SourceLocation) -> Self {
        CompilerError::Lex {
            location,
            message: message.into(),
        }
    }

    pub fn parse_error(message: impl Into<String>, location: SourceLocation) -> Self {
        CompilerError::Parse {
            location,
            message: message.into(),
        }
    }

    pub fn semantic_error(message: impl Into<String>, location: SourceLocation) -> Self {
        CompilerError::Semantic {
            location,
            message: message.into(),
        }
    }

    pub fn codegen_error(message: impl Into<String>) -> Self {
        CompilerError::Codegen {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        CompilerError::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CompilerError::lex_error("unexpected character '@'", SourceLocation::new(3, 7));
        assert_eq!(
            format!("{}", err),
            "lexical error at line 3, column 7: unexpected character '@'"
        );
    }

    #[test]
    fn test_semantic_error_display() {
        let err = CompilerError::semantic_error(
            "undefined variable 'x'",
            SourceLocation::new(1, 12),
        );
        assert_eq!(
            format!("{}", err),
            "semantic error at line 1, column 12: undefined variable 'x'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CompilerError = io_err.into();
        assert!(matches!(err, CompilerError::Io { .. }));
    }
}
