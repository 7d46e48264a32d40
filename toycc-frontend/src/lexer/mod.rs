//! ToyC Lexer
//!
//! Tokenizes ToyC source code into a stream of tokens.
//! Handles keywords, operators, literals, identifiers, and comments.

pub mod token;

pub use token::{Token, TokenType};

use std::collections::HashMap;
use toycc_common::{CompilerError, SourceLocation};

/// ToyC Lexer
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
    keywords: HashMap<String, TokenType>,
}

impl Lexer {
    /// Create a new lexer
    pub fn new(input: &str) -> Self {
        let mut lexer = Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            keywords: HashMap::new(),
        };

        lexer.initialize_keywords();
        lexer
    }

    /// Initialize keyword map
    fn initialize_keywords(&mut self) {
        let keywords = [
            ("int", TokenType::Int),
            ("void", TokenType::Void),
            ("if", TokenType::If),
            ("else", TokenType::Else),
            ("while", TokenType::While),
            ("break", TokenType::Break),
            ("continue", TokenType::Continue),
            ("return", TokenType::Return),
        ];

        for (keyword, token_type) in keywords {
            self.keywords.insert(keyword.to_string(), token_type);
        }
    }

    /// Get current character
    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        if let Some(ch) = self.current_char() {
            self.position += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(ch)
        } else {
            None
        }
    }

    /// Get current location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    /// Tokenize the whole input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, CompilerError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            let location = self.current_location();
            let Some(ch) = self.current_char() else {
                tokens.push(Token::new(TokenType::EndOfFile, location));
                break;
            };

            let token_type = if ch.is_ascii_digit() {
                self.tokenize_number()?
            } else if ch.is_ascii_alphabetic() || ch == '_' {
                self.tokenize_identifier_or_keyword()
            } else {
                self.advance();
                self.tokenize_operator(ch, location)?
            };

            tokens.push(Token::new(token_type, location));
        }

        Ok(tokens)
    }

    /// Skip whitespace and both comment forms
    fn skip_whitespace_and_comments(&mut self) -> Result<(), CompilerError> {
        loop {
            match self.current_char() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_char(1) == Some('/') => {
                    while let Some(ch) = self.current_char() {
                        if ch == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek_char(1) == Some('*') => {
                    let start = self.current_location();
                    self.advance(); // skip '/'
                    self.advance(); // skip '*'

                    let mut found_end = false;
                    while let Some(ch) = self.current_char() {
                        if ch == '*' && self.peek_char(1) == Some('/') {
                            self.advance();
                            self.advance();
                            found_end = true;
                            break;
                        }
                        self.advance();
                    }

                    if !found_end {
                        return Err(CompilerError::lex_error("unterminated block comment", start));
                    }
                }
                _ => break,
            }
        }

        Ok(())
    }

    /// Tokenize a decimal integer literal
    fn tokenize_number(&mut self) -> Result<TokenType, CompilerError> {
        let start = self.current_location();
        let mut digits = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let value: i32 = digits.parse().map_err(|_| {
            CompilerError::lex_error(format!("integer literal '{digits}' out of range"), start)
        })?;

        Ok(TokenType::IntLiteral(value))
    }

    /// Tokenize an identifier or keyword
    fn tokenize_identifier_or_keyword(&mut self) -> TokenType {
        let mut name = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                name.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if let Some(token_type) = self.keywords.get(&name) {
            token_type.clone()
        } else {
            TokenType::Identifier(name)
        }
    }

    /// Tokenize an operator or delimiter whose first character was already
    /// consumed
    fn tokenize_operator(
        &mut self,
        ch: char,
        location: SourceLocation,
    ) -> Result<TokenType, CompilerError> {
        let token_type = match ch {
            '+' => TokenType::Plus,
            '-' => TokenType::Minus,
            '*' => TokenType::Star,
            '/' => TokenType::Slash,
            '%' => TokenType::Percent,
            ';' => TokenType::Semicolon,
            ',' => TokenType::Comma,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            '{' => TokenType::LeftBrace,
            '}' => TokenType::RightBrace,

            '=' => {
                if self.current_char() == Some('=') {
                    self.advance();
                    TokenType::EqualEqual
                } else {
                    TokenType::Equal
                }
            }
            '!' => {
                if self.current_char() == Some('=') {
                    self.advance();
                    TokenType::BangEqual
                } else {
                    TokenType::Bang
                }
            }
            '<' => {
                if self.current_char() == Some('=') {
                    self.advance();
                    TokenType::LessEqual
                } else {
                    TokenType::Less
                }
            }
            '>' => {
                if self.current_char() == Some('=') {
                    self.advance();
                    TokenType::GreaterEqual
                } else {
                    TokenType::Greater
                }
            }
            '&' => {
                if self.current_char() == Some('&') {
                    self.advance();
                    TokenType::AmpAmp
                } else {
                    return Err(CompilerError::lex_error(
                        "unexpected character '&' (did you mean '&&'?)",
                        location,
                    ));
                }
            }
            '|' => {
                if self.current_char() == Some('|') {
                    self.advance();
                    TokenType::PipePipe
                } else {
                    return Err(CompilerError::lex_error(
                        "unexpected character '|' (did you mean '||'?)",
                        location,
                    ));
                }
            }

            other => {
                return Err(CompilerError::lex_error(
                    format!("unexpected character '{other}'"),
                    location,
                ));
            }
        };

        Ok(token_type)
    }
}
