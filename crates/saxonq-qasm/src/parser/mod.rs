//! Parser for `OpenQASM` 2.0.
//!
//! Input is processed line by line. Each line is tokenized on its own and
//! may hold any number of `;`-terminated statements; a statement may not
//! span lines. Source line order is execution order.

mod lowering;
mod statement;

use saxonq_ir::Program;
use tracing::{debug, instrument};

use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};
use lowering::Lowerer;

/// Parse program text into a validated [`Program`].
///
/// # Errors
///
/// [`ParseError::MalformedHeader`] for missing, repeated or misplaced
/// version and register declarations, [`ParseError::InvalidInstruction`]
/// when the registry rejects a line, [`ParseError::IndexOutOfRange`] for
/// operands outside their register and [`ParseError::Syntax`] for lines
/// that are not well-formed statements.
#[instrument(skip(source), fields(bytes = source.len()))]
pub fn parse(source: &str) -> ParseResult<Program> {
    parse_lines(source.lines())
}

/// Parse a sequence of source lines; line `k` of the input is line `k + 1`
/// of error reports and instruction line numbers.
pub fn parse_lines<I, S>(lines: I) -> ParseResult<Program>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lowerer = Lowerer::new();
    let mut last_line = 0;

    for (index, text) in lines.into_iter().enumerate() {
        let line = index + 1;
        last_line = line;
        let mut parser = Parser::new(text.as_ref(), line)?;
        while !parser.is_eof() {
            let statement = parser.parse_statement()?;
            lowerer.lower(statement, line)?;
        }
    }

    let program = lowerer.finish(last_line)?;
    debug!(
        qubits = program.num_qubits(),
        clbits = program.num_clbits(),
        instructions = program.len(),
        "parsed program"
    );
    Ok(program)
}

/// Parser state for one line.
pub(super) struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<SpannedToken>,
    pub(super) pos: usize,
    pub(super) line: usize,
}

impl<'src> Parser<'src> {
    /// Tokenize a line.
    fn new(source: &'src str, line: usize) -> ParseResult<Self> {
        let mut tokens = Vec::new();

        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t),
                Err((span, message)) => {
                    return Err(ParseError::Syntax {
                        line,
                        message: format!("{message} at column {}", span.start + 1),
                    });
                }
            }
        }

        Ok(Self {
            source,
            tokens,
            pos: 0,
            line,
        })
    }

    /// Check if we've reached the end of the line.
    pub(super) fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Peek at the current token.
    pub(super) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    /// Advance and return the current token.
    pub(super) fn advance(&mut self) -> Option<Token> {
        if self.is_eof() {
            return None;
        }
        let token = self.tokens[self.pos].token.clone();
        self.pos += 1;
        Some(token)
    }

    /// Build a syntax error on this line.
    pub(super) fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            line: self.line,
            message: message.into(),
        }
    }

    /// Expect a specific token.
    #[allow(clippy::needless_pass_by_value)]
    pub(super) fn expect(&mut self, expected: Token) -> ParseResult<()> {
        match self.advance() {
            Some(found) if std::mem::discriminant(&found) == std::mem::discriminant(&expected) => {
                Ok(())
            }
            Some(found) => Err(self.error(format!("expected '{expected}', found '{found}'"))),
            None => Err(self.error(format!("expected '{expected}' before end of line"))),
        }
    }

    /// Check if current token matches.
    pub(super) fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token))
    }

    /// Consume token if it matches.
    pub(super) fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Source text between the start of token `from` and the end of the
    /// token before `to`.
    pub(super) fn slice(&self, from: usize, to: usize) -> &'src str {
        if from >= to {
            return "";
        }
        let start = self.tokens[from].span.start;
        let end = self.tokens[to - 1].span.end;
        self.source[start..end].trim()
    }
}
