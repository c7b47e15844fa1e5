use tracing::trace;

pub use crate::token::{keywords, Token, TokenKind};

#[derive(Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    iter: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iter = input.char_indices().peekable();
        Self { input, iter }
    }

    fn is_letter(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn is_whitespace(ch: char) -> bool {
        matches!(ch, ' ' | '\t' | '\n' | '\r')
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        while self.iter.next_if(|(_, ch)| Self::is_letter(*ch)).is_some() {}

        let end = self.next_idx();
        let ident = &self.input[start..end];
        Token {
            kind: keywords(ident).unwrap_or_else(|| TokenKind::Ident(ident.into())),
            start,
            end,
        }
    }

    fn read_number(&mut self, start: usize) -> Token {
        while self.iter.next_if(|(_, ch)| ch.is_ascii_digit()).is_some() {}

        let end = self.next_idx();
        Token {
            kind: TokenKind::Int(self.input[start..end].into()),
            start,
            end,
        }
    }

    // An unterminated string runs to the end of the input.
    fn read_string(&mut self, start: usize) -> Token {
        let content_start = start + 1;
        let content_end = loop {
            match self.iter.next() {
                Some((idx, '"')) => break idx,
                Some(_) => {}
                None => break self.input.len(),
            }
        };

        Token {
            kind: TokenKind::String(self.input[content_start..content_end].into()),
            start,
            end: self.next_idx(),
        }
    }

    fn next_idx(&mut self) -> usize {
        self.iter
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }

    fn single(&mut self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            start,
            end: self.next_idx(),
        }
    }

    fn with_equal_sign(&mut self, start: usize, matched: TokenKind, otherwise: TokenKind) -> Token {
        if self.iter.next_if(|(_, ch)| *ch == '=').is_some() {
            self.single(matched, start)
        } else {
            self.single(otherwise, start)
        }
    }

    /// Returns the next token. Once the input is exhausted every call returns
    /// an `Eof` token.
    pub fn next_token(&mut self) -> Token {
        while self.iter.next_if(|(_, ch)| Self::is_whitespace(*ch)).is_some() {}

        let Some((idx, ch)) = self.iter.next() else {
            let end = self.input.len();
            return Token {
                kind: TokenKind::Eof,
                start: end,
                end,
            };
        };

        let token = match ch {
            '=' => self.with_equal_sign(idx, TokenKind::Equal, TokenKind::Assign),
            '!' => self.with_equal_sign(idx, TokenKind::NotEqual, TokenKind::Bang),
            '+' => self.single(TokenKind::Plus, idx),
            '-' => self.single(TokenKind::Minus, idx),
            '*' => self.single(TokenKind::Asterisk, idx),
            '/' => self.single(TokenKind::Slash, idx),
            '<' => self.single(TokenKind::LessThan, idx),
            '>' => self.single(TokenKind::GreaterThan, idx),
            ',' => self.single(TokenKind::Comma, idx),
            ':' => self.single(TokenKind::Colon, idx),
            ';' => self.single(TokenKind::SemiColon, idx),
            '(' => self.single(TokenKind::LParen, idx),
            ')' => self.single(TokenKind::RParen, idx),
            '{' => self.single(TokenKind::LBrace, idx),
            '}' => self.single(TokenKind::RBrace, idx),
            '[' => self.single(TokenKind::LBracket, idx),
            ']' => self.single(TokenKind::RBracket, idx),
            '"' => self.read_string(idx),
            c if Tokenizer::is_letter(c) => self.read_identifier(idx),
            c if c.is_ascii_digit() => self.read_number(idx),
            _ => self.single(TokenKind::Illegal(ch.to_string().into()), idx),
        };
        trace!(kind = %token.kind, literal = token.literal(), "token");
        token
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        match token.kind {
            TokenKind::Eof => None,
            _ => Some(token),
        }
    }
}
