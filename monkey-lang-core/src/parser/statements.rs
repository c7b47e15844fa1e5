use crate::ast::{Identifier, Statement};
use crate::lexer::TokenKind;
use crate::parser::expressions::{parse_expression, Precedence};
use crate::parser::{ParseError, Parser};

pub fn parse_statement(parser: &mut Parser) -> Result<crate::ast::Statement, ParseError> {
    match parser.current.kind {
        TokenKind::Let => Ok(Statement::Let(parse_let_statement(parser)?)),
        TokenKind::Return => Ok(Statement::Return(parse_return_statement(parser)?)),
        _ => Ok(Statement::Expression(parse_expression_statement(parser)?)),
    }
}

fn parse_let_statement(parser: &mut Parser) -> Result<crate::ast::LetStatement, ParseError> {
    let name = parser.expect_peek_ident()?;
    parser.expect_token(TokenKind::Assign)?;
    parser.advance();
    let value = parse_expression(parser, Precedence::Lowest)?;
    expect_terminator(parser)?;

    Ok(crate::ast::LetStatement {
        identifier: Identifier { name },
        value,
    })
}

fn parse_return_statement(parser: &mut Parser) -> Result<crate::ast::ReturnStatement, ParseError> {
    parser.advance();
    let value = parse_expression(parser, Precedence::Lowest)?;
    expect_terminator(parser)?;

    Ok(crate::ast::ReturnStatement { value })
}

fn parse_expression_statement(parser: &mut Parser) -> Result<crate::ast::Expression, ParseError> {
    let expression = parse_expression(parser, Precedence::Lowest)?;
    if parser.peek_is(&TokenKind::SemiColon) {
        parser.advance();
    }
    Ok(expression)
}

// `;` may be left out right before the end of a block or of the input.
fn expect_terminator(parser: &mut Parser) -> Result<(), ParseError> {
    if parser.peek_is(&TokenKind::RBrace) || parser.peek_is(&TokenKind::Eof) {
        return Ok(());
    }
    parser.expect_token(TokenKind::SemiColon)
}
