pub mod error;
pub mod expressions;
pub mod statements;

use std::rc::Rc;

use tracing::debug;

use crate::lexer::{Token, TokenKind, Tokenizer};
pub use error::ParseError;
use statements::parse_statement;

/// Precedence-climbing parser over a `Tokenizer`.
///
/// The parse functions are entered with `current` on the first token of the
/// construct and leave it on the construct's last token.
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    pub(crate) current: Token,
    pub(crate) peek: Token,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(mut tokenizer: Tokenizer<'a>) -> Self {
        let current = tokenizer.next_token();
        let peek = tokenizer.next_token();
        Self {
            tokenizer,
            current,
            peek,
            errors: Vec::new(),
        }
    }

    pub(crate) fn advance(&mut self) {
        let next = self.tokenizer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    pub(crate) fn current_is(&self, kind: &TokenKind) -> bool {
        &self.current.kind == kind
    }

    pub(crate) fn peek_is(&self, kind: &TokenKind) -> bool {
        &self.peek.kind == kind
    }

    /// Moves onto the next token if it has the given kind. The lookahead is
    /// left alone on mismatch.
    pub(crate) fn expect_token(&mut self, token_kind: TokenKind) -> Result<(), ParseError> {
        if self.peek_is(&token_kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected_token(token_kind, self.peek.clone()))
        }
    }

    pub(crate) fn expect_peek_ident(&mut self) -> Result<Rc<str>, ParseError> {
        match &self.peek.kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(ParseError::unexpected_other(
                error::Expected::Identifier,
                self.peek.clone(),
            )),
        }
    }

    pub(crate) fn current_ident(&self) -> Result<Rc<str>, ParseError> {
        match &self.current.kind {
            TokenKind::Ident(name) => Ok(name.clone()),
            _ => Err(ParseError::unexpected_other(
                error::Expected::Identifier,
                self.current.clone(),
            )),
        }
    }

    /// Records `err` and skips the rest of the broken statement. Stops on its
    /// `;`, or on the `}` closing the enclosing block, so the caller resumes
    /// at the nesting level it was parsing.
    pub(crate) fn record_error(&mut self, err: ParseError) {
        debug!(%err, start = err.token().start, "parse error");
        self.errors.push(err);

        let mut depth = 0usize;
        loop {
            match self.current.kind {
                TokenKind::Eof => return,
                TokenKind::SemiColon | TokenKind::RBrace if depth == 0 => return,
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                _ => {}
            }
            self.advance();
        }
    }

    pub fn parse_program(&mut self) -> Result<crate::ast::Program, Vec<ParseError>> {
        let mut statements = Vec::new();

        while !self.current_is(&TokenKind::Eof) {
            match parse_statement(self) {
                Ok(statement) => statements.push(statement),
                Err(err) => self.record_error(err),
            }
            self.advance();
        }

        let errors = std::mem::take(&mut self.errors);
        if errors.is_empty() {
            Ok(crate::ast::Program { statements })
        } else {
            Err(errors)
        }
    }
}
