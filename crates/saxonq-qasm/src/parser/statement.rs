//! Statement parsing.

use super::Parser;
use crate::ast::{Operand, Statement};
use crate::error::ParseResult;
use crate::lexer::Token;

impl Parser<'_> {
    /// Parse a statement.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Statement> {
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| self.error("expected a statement"))?;

        match token {
            Token::OpenQasm => self.parse_version(),
            Token::Include => self.parse_include(),
            Token::Qreg => {
                self.advance();
                let (name, size) = self.parse_declaration()?;
                Ok(Statement::QregDecl { name, size })
            }
            Token::Creg => {
                self.advance();
                let (name, size) = self.parse_declaration()?;
                Ok(Statement::CregDecl { name, size })
            }
            Token::Measure => self.parse_measure(),
            Token::Identifier(_) => self.parse_gate(),
            other => Err(self.error(format!("unexpected '{other}' at start of statement"))),
        }
    }

    /// Parse `OPENQASM <version>;`.
    fn parse_version(&mut self) -> ParseResult<Statement> {
        self.expect(Token::OpenQasm)?;
        let version = match self.advance() {
            Some(Token::FloatLiteral(v)) => format!("{v:.1}"),
            Some(Token::IntLiteral(v)) => format!("{v}.0"),
            Some(other) => return Err(self.error(format!("expected version number, found '{other}'"))),
            None => return Err(self.error("expected version number")),
        };
        self.expect(Token::Semicolon)?;
        Ok(Statement::Version(version))
    }

    /// Parse `include "file";`.
    fn parse_include(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Include)?;
        let path = match self.advance() {
            Some(Token::StringLiteral(s)) => s,
            Some(other) => return Err(self.error(format!("expected file name, found '{other}'"))),
            None => return Err(self.error("expected file name")),
        };
        self.expect(Token::Semicolon)?;
        Ok(Statement::Include(path))
    }

    /// Parse `name[size];` after `qreg` / `creg`.
    fn parse_declaration(&mut self) -> ParseResult<(String, u32)> {
        let name = self.parse_identifier()?;
        self.expect(Token::LBracket)?;
        let size = self.parse_int_literal()?;
        self.expect(Token::RBracket)?;
        self.expect(Token::Semicolon)?;
        Ok((name, size))
    }

    /// Parse `measure q[i] -> c[j];`.
    fn parse_measure(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Measure)?;
        let qubit = self.parse_operand()?;
        self.expect(Token::Arrow)?;
        let clbit = self.parse_operand()?;
        self.expect(Token::Semicolon)?;
        Ok(Statement::Measure { qubit, clbit })
    }

    /// Parse `name(params) operand, operand, ...;`.
    fn parse_gate(&mut self) -> ParseResult<Statement> {
        let name = self.parse_identifier()?;

        let mut params = Vec::new();
        if self.consume(&Token::LParen) {
            let mut start = self.pos;
            loop {
                let token = self.peek().cloned();
                match token {
                    Some(Token::Comma) => {
                        params.push(self.param_text(start)?);
                        self.advance();
                        start = self.pos;
                    }
                    Some(Token::RParen) => {
                        if self.pos > start || !params.is_empty() {
                            params.push(self.param_text(start)?);
                        }
                        self.advance();
                        break;
                    }
                    Some(Token::LParen) => {
                        return Err(self.error("nested parentheses in parameter list"));
                    }
                    Some(_) => {
                        self.advance();
                    }
                    None => return Err(self.error("unterminated parameter list")),
                }
            }
        }

        let mut operands = vec![self.parse_operand()?];
        while self.consume(&Token::Comma) {
            operands.push(self.parse_operand()?);
        }
        self.expect(Token::Semicolon)?;

        Ok(Statement::Gate {
            name,
            params,
            operands,
        })
    }

    fn param_text(&self, start: usize) -> ParseResult<String> {
        let text = self.slice(start, self.pos);
        if text.is_empty() {
            return Err(self.error("empty parameter"));
        }
        Ok(text.to_string())
    }

    /// Parse `name` or `name[index]`.
    fn parse_operand(&mut self) -> ParseResult<Operand> {
        let register = self.parse_identifier()?;
        let index = if self.consume(&Token::LBracket) {
            let index = self.parse_int_literal()?;
            self.expect(Token::RBracket)?;
            Some(index)
        } else {
            None
        };
        Ok(Operand { register, index })
    }

    fn parse_identifier(&mut self) -> ParseResult<String> {
        match self.advance() {
            Some(Token::Identifier(name)) => Ok(name),
            // Register and operation names may collide with keywords.
            Some(Token::Pi) => Ok("pi".into()),
            Some(other) => Err(self.error(format!("expected identifier, found '{other}'"))),
            None => Err(self.error("expected identifier")),
        }
    }

    fn parse_int_literal(&mut self) -> ParseResult<u32> {
        match self.advance() {
            Some(Token::IntLiteral(v)) => {
                u32::try_from(v).map_err(|_| self.error(format!("integer {v} is too large")))
            }
            Some(other) => Err(self.error(format!("expected integer, found '{other}'"))),
            None => Err(self.error("expected integer")),
        }
    }
}
