//! ToyC Compiler - Frontend
//!
//! This crate provides the frontend components for the ToyC compiler:
//! - Lexer: tokenizes ToyC source code
//! - Parser: builds AST from tokens
//! - AST: abstract syntax tree definitions
//! - Semantic analysis: scope, type and control-flow checking

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod types;

pub use ast::{
    BinaryOp, CompilationUnit, Expression, ExpressionKind, FunctionDefinition, Parameter,
    Statement, StatementKind, UnaryOp,
};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::Parser;
pub use semantic::SemanticAnalyzer;
pub use types::Type;

use toycc_common::CompilerError;

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Parse ToyC source code into an AST
    pub fn parse_source(source: &str) -> Result<CompilationUnit, CompilerError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;

        let mut parser = Parser::new(tokens);
        parser.parse_unit()
    }

    /// Parse and semantically check ToyC source code
    pub fn analyze_source(source: &str) -> Result<CompilationUnit, CompilerError> {
        let unit = Self::parse_source(source)?;

        let mut analyzer = SemanticAnalyzer::new();
        analyzer.analyze(&unit)?;

        Ok(unit)
    }

    /// Tokenize source code (for debugging)
    pub fn tokenize_source(source: &str) -> Result<Vec<Token>, CompilerError> {
        let mut lexer = Lexer::new(source);
        lexer.tokenize()
    }
}
