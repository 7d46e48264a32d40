//! Statement and declaration parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::Parser;
use toycc_common::CompilerError;

impl Parser {
    /// Parse a block statement
    pub(crate) fn parse_block(&mut self) -> Result<Statement, CompilerError> {
        let location = self.current_location();
        self.expect(TokenType::LeftBrace, "block")?;

        let mut statements = Vec::new();
        while !self.check(&TokenType::RightBrace) && !self.check(&TokenType::EndOfFile) {
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenType::RightBrace, "block")?;

        Ok(Statement::new(StatementKind::Block(statements), location))
    }

    /// Parse a single statement
    pub fn parse_statement(&mut self) -> Result<Statement, CompilerError> {
        let location = self.current_location();

        match self.peek().map(|t| &t.token_type) {
            Some(TokenType::LeftBrace) => self.parse_block(),

            Some(TokenType::Semicolon) => {
                self.advance();
                Ok(Statement::new(StatementKind::Empty, location))
            }

            Some(TokenType::Int) | Some(TokenType::Void) => self.parse_declaration(),

            Some(TokenType::If) => self.parse_if_statement(),

            Some(TokenType::While) => self.parse_while_statement(),

            Some(TokenType::Break) => {
                self.advance();
                self.expect(TokenType::Semicolon, "break statement")?;
                Ok(Statement::new(StatementKind::Break, location))
            }

            Some(TokenType::Continue) => {
                self.advance();
                self.expect(TokenType::Semicolon, "continue statement")?;
                Ok(Statement::new(StatementKind::Continue, location))
            }

            Some(TokenType::Return) => self.parse_return_statement(),

            // An identifier followed by `=` starts an assignment; anything
            // else falls through to an expression statement.
            Some(TokenType::Identifier(_))
                if matches!(
                    self.peek_second().map(|t| &t.token_type),
                    Some(TokenType::Equal)
                ) =>
            {
                self.parse_assignment()
            }

            _ => {
                let expr = self.parse_expression()?;
                self.expect(TokenType::Semicolon, "expression statement")?;
                Ok(Statement::new(StatementKind::Expression(expr), location))
            }
        }
    }

    /// Parse a variable declaration
    fn parse_declaration(&mut self) -> Result<Statement, CompilerError> {
        let location = self.current_location();
        let var_type = self.parse_type("variable declaration")?;
        let name = self.parse_identifier("variable declaration")?;

        let initializer = if self.match_token(&TokenType::Equal) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect(TokenType::Semicolon, "variable declaration")?;

        Ok(Statement::new(
            StatementKind::Declaration {
                var_type,
                name,
                initializer,
            },
            location,
        ))
    }

    /// Parse an assignment statement
    fn parse_assignment(&mut self) -> Result<Statement, CompilerError> {
        let location = self.current_location();
        let name = self.parse_identifier("assignment")?;
        self.expect(TokenType::Equal, "assignment")?;
        let value = self.parse_expression()?;
        self.expect(TokenType::Semicolon, "assignment")?;

        Ok(Statement::new(
            StatementKind::Assignment { name, value },
            location,
        ))
    }

    /// Parse an if statement; `else` binds to the nearest `if`
    fn parse_if_statement(&mut self) -> Result<Statement, CompilerError> {
        let location = self.current_location();
        self.expect(TokenType::If, "if statement")?;
        self.expect(TokenType::LeftParen, "if statement")?;
        let condition = self.parse_expression()?;
        self.expect(TokenType::RightParen, "if statement")?;

        let then_stmt = Box::new(self.parse_statement()?);

        let else_stmt = if self.match_token(&TokenType::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Statement::new(
            StatementKind::If {
                condition,
                then_stmt,
                else_stmt,
            },
            location,
        ))
    }

    /// Parse a while statement
    fn parse_while_statement(&mut self) -> Result<Statement, CompilerError> {
        let location = self.current_location();
        self.expect(TokenType::While, "while statement")?;
        self.expect(TokenType::LeftParen, "while statement")?;
        let condition = self.parse_expression()?;
        self.expect(TokenType::RightParen, "while statement")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Statement::new(
            StatementKind::While { condition, body },
            location,
        ))
    }

    /// Parse a return statement with optional value
    fn parse_return_statement(&mut self) -> Result<Statement, CompilerError> {
        let location = self.current_location();
        self.expect(TokenType::Return, "return statement")?;

        let value = if self.check(&TokenType::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.expect(TokenType::Semicolon, "return statement")?;

        Ok(Statement::new(StatementKind::Return(value), location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse_statement_from_str(input: &str) -> Result<Statement, CompilerError> {
        let mut lexer = Lexer::new(input);
        let tokens = lexer.tokenize().unwrap();
        let mut parser = Parser::new(tokens);
        parser.parse_statement()
    }

    #[test]
    fn test_parse_declaration_with_initializer() {
        let stmt = parse_statement_from_str("int x = 1 + 2;").unwrap();
        match stmt.kind {
            StatementKind::Declaration {
                name, initializer, ..
            } => {
                assert_eq!(name, "x");
                assert!(initializer.is_some());
            }
            _ => panic!("Expected declaration"),
        }
    }

    #[test]
    fn test_parse_declaration_without_initializer() {
        let stmt = parse_statement_from_str("int x;").unwrap();
        match stmt.kind {
            StatementKind::Declaration { initializer, .. } => assert!(initializer.is_none()),
            _ => panic!("Expected declaration"),
        }
    }

    #[test]
    fn test_parse_assignment() {
        let stmt = parse_statement_from_str("x = 5;").unwrap();
        match stmt.kind {
            StatementKind::Assignment { name, .. } => assert_eq!(name, "x"),
            _ => panic!("Expected assignment"),
        }
    }

    #[test]
    fn test_equality_is_expression_not_assignment() {
        let stmt = parse_statement_from_str("x == 5;").unwrap();
        assert!(matches!(stmt.kind, StatementKind::Expression(_)));
    }

    #[test]
    fn test_parse_if_else() {
        let stmt = parse_statement_from_str("if (x) y = 1; else y = 2;").unwrap();
        match stmt.kind {
            StatementKind::If { else_stmt, .. } => assert!(else_stmt.is_some()),
            _ => panic!("Expected if statement"),
        }
    }

    #[test]
    fn test_dangling_else_binds_to_nearest_if() {
        let stmt = parse_statement_from_str("if (a) if (b) x = 1; else x = 2;").unwrap();
        match stmt.kind {
            StatementKind::If {
                then_stmt,
                else_stmt,
                ..
            } => {
                // The outer if has no else; the inner one does.
                assert!(else_stmt.is_none());
                match &then_stmt.kind {
                    StatementKind::If { else_stmt, .. } => assert!(else_stmt.is_some()),
                    _ => panic!("Expected nested if"),
                }
            }
            _ => panic!("Expected if statement"),
        }
    }

    #[test]
    fn test_parse_while() {
        let stmt = parse_statement_from_str("while (i < 10) { i = i + 1; }").unwrap();
        match stmt.kind {
            StatementKind::While { body, .. } => {
                assert!(matches!(body.kind, StatementKind::Block(_)))
            }
            _ => panic!("Expected while statement"),
        }
    }

    #[test]
    fn test_parse_return_void() {
        let stmt = parse_statement_from_str("return;").unwrap();
        match stmt.kind {
            StatementKind::Return(value) => assert!(value.is_none()),
            _ => panic!("Expected return statement"),
        }
    }

    #[test]
    fn test_parse_empty_statement() {
        let stmt = parse_statement_from_str(";").unwrap();
        assert!(matches!(stmt.kind, StatementKind::Empty));
    }

    #[test]
    fn test_parse_nested_blocks() {
        let stmt = parse_statement_from_str("{ int x; { int y; } }").unwrap();
        match stmt.kind {
            StatementKind::Block(statements) => {
                assert_eq!(statements.len(), 2);
                assert!(matches!(statements[1].kind, StatementKind::Block(_)));
            }
            _ => panic!("Expected block"),
        }
    }
}
