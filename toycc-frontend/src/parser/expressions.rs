//! Expression parsing with operator precedence
//!
//! One method per precedence level, low to high:
//! `||`, `&&`, `== !=`, `< <= > >=`, `+ -`, `* / %`, unary `! - +`, primary.

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{ParseError, Parser};
use toycc_common::CompilerError;

impl Parser {
    /// Parse a full expression
    pub fn parse_expression(&mut self) -> Result<Expression, CompilerError> {
        self.parse_logical_or_expression()
    }

    /// Parse logical OR expression
    fn parse_logical_or_expression(&mut self) -> Result<Expression, CompilerError> {
        let mut left = self.parse_logical_and_expression()?;

        while self.match_token(&TokenType::PipePipe) {
            let right = self.parse_logical_and_expression()?;
            let location = left.location;

            left = Expression::new(
                ExpressionKind::Binary {
                    op: BinaryOp::LogicalOr,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                location,
            );
        }

        Ok(left)
    }

    /// Parse logical AND expression
    fn parse_logical_and_expression(&mut self) -> Result<Expression, CompilerError> {
        let mut left = self.parse_equality_expression()?;

        while self.match_token(&TokenType::AmpAmp) {
            let right = self.parse_equality_expression()?;
            let location = left.location;

            left = Expression::new(
                ExpressionKind::Binary {
                    op: BinaryOp::LogicalAnd,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                location,
            );
        }

        Ok(left)
    }

    /// Parse equality expression
    fn parse_equality_expression(&mut self) -> Result<Expression, CompilerError> {
        let mut left = self.parse_relational_expression()?;

        while let Some(op) = self.parse_equality_operator() {
            let right = self.parse_relational_expression()?;
            let location = left.location;

            left = Expression::new(
                ExpressionKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                location,
            );
        }

        Ok(left)
    }

    fn parse_equality_operator(&mut self) -> Option<BinaryOp> {
        match self.peek().map(|t| &t.token_type) {
            Some(TokenType::EqualEqual) => {
                self.advance();
                Some(BinaryOp::Equal)
            }
            Some(TokenType::BangEqual) => {
                self.advance();
                Some(BinaryOp::NotEqual)
            }
            _ => None,
        }
    }

    /// Parse relational expression
    fn parse_relational_expression(&mut self) -> Result<Expression, CompilerError> {
        let mut left = self.parse_additive_expression()?;

        while let Some(op) = self.parse_relational_operator() {
            let right = self.parse_additive_expression()?;
            let location = left.location;

            left = Expression::new(
                ExpressionKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                location,
            );
        }

        Ok(left)
    }

    fn parse_relational_operator(&mut self) -> Option<BinaryOp> {
        match self.peek().map(|t| &t.token_type) {
            Some(TokenType::Less) => {
                self.advance();
                Some(BinaryOp::Less)
            }
            Some(TokenType::LessEqual) => {
                self.advance();
                Some(BinaryOp::LessEqual)
            }
            Some(TokenType::Greater) => {
                self.advance();
                Some(BinaryOp::Greater)
            }
            Some(TokenType::GreaterEqual) => {
                self.advance();
                Some(BinaryOp::GreaterEqual)
            }
            _ => None,
        }
    }

    /// Parse additive expression
    fn parse_additive_expression(&mut self) -> Result<Expression, CompilerError> {
        let mut left = self.parse_multiplicative_expression()?;

        while let Some(op) = self.parse_additive_operator() {
            let right = self.parse_multiplicative_expression()?;
            let location = left.location;

            left = Expression::new(
                ExpressionKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                location,
            );
        }

        Ok(left)
    }

    fn parse_additive_operator(&mut self) -> Option<BinaryOp> {
        match self.peek().map(|t| &t.token_type) {
            Some(TokenType::Plus) => {
                self.advance();
                Some(BinaryOp::Add)
            }
            Some(TokenType::Minus) => {
                self.advance();
                Some(BinaryOp::Sub)
            }
            _ => None,
        }
    }

    /// Parse multiplicative expression
    fn parse_multiplicative_expression(&mut self) -> Result<Expression, CompilerError> {
        let mut left = self.parse_unary_expression()?;

        while let Some(op) = self.parse_multiplicative_operator() {
            let right = self.parse_unary_expression()?;
            let location = left.location;

            left = Expression::new(
                ExpressionKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                location,
            );
        }

        Ok(left)
    }

    fn parse_multiplicative_operator(&mut self) -> Option<BinaryOp> {
        match self.peek().map(|t| &t.token_type) {
            Some(TokenType::Star) => {
                self.advance();
                Some(BinaryOp::Mul)
            }
            Some(TokenType::Slash) => {
                self.advance();
                Some(BinaryOp::Div)
            }
            Some(TokenType::Percent) => {
                self.advance();
                Some(BinaryOp::Mod)
            }
            _ => None,
        }
    }

    /// Parse unary expression
    fn parse_unary_expression(&mut self) -> Result<Expression, CompilerError> {
        let op = match self.peek().map(|t| &t.token_type) {
            Some(TokenType::Bang) => Some(UnaryOp::Not),
            Some(TokenType::Minus) => Some(UnaryOp::Neg),
            Some(TokenType::Plus) => Some(UnaryOp::Plus),
            _ => None,
        };

        if let Some(op) = op {
            let location = self.current_location();
            self.advance();
            let operand = self.parse_unary_expression()?;

            return Ok(Expression::new(
                ExpressionKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                location,
            ));
        }

        self.parse_primary_expression()
    }

    /// Parse primary expression: literal, variable, call, or parenthesized
    fn parse_primary_expression(&mut self) -> Result<Expression, CompilerError> {
        let location = self.current_location();

        match self.advance() {
            Some(token) => match token.token_type {
                TokenType::IntLiteral(value) => {
                    Ok(Expression::new(ExpressionKind::IntLiteral(value), location))
                }
                TokenType::Identifier(name) => {
                    if self.check(&TokenType::LeftParen) {
                        self.parse_call_arguments(name, location)
                    } else {
                        Ok(Expression::new(ExpressionKind::Variable(name), location))
                    }
                }
                TokenType::LeftParen => {
                    let expr = self.parse_expression()?;
                    self.expect(TokenType::RightParen, "parenthesized expression")?;
                    Ok(expr)
                }
                _ => Err(ParseError::UnexpectedToken {
                    expected: "expression".to_string(),
                    found: token,
                }
                .into()),
            },
            None => Err(ParseError::UnexpectedEndOfFile {
                expected: "expression".to_string(),
            }
            .into()),
        }
    }

    /// Parse the argument list of a call whose name was already consumed
    fn parse_call_arguments(
        &mut self,
        function: String,
        location: toycc_common::SourceLocation,
    ) -> Result<Expression, CompilerError> {
        self.expect(TokenType::LeftParen, "function call")?;

        let mut arguments = Vec::new();
        if !self.check(&TokenType::RightParen) {
            loop {
                arguments.push(self.parse_expression()?);
                if !self.match_token(&TokenType::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenType::RightParen, "function call")?;

        Ok(Expression::new(
            ExpressionKind::Call {
                function,
                arguments,
            },
            location,
        ))
    }
}
