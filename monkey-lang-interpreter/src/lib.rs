pub mod builtins;
pub mod environment;
pub mod evaluator;
pub mod object;

use gc::Gc;
use monkey_lang_core::lexer::Tokenizer;
use monkey_lang_core::parser::{ParseError, Parser};

use crate::environment::Environment;
use crate::object::Object;

/// Parses `source` and, when it has no syntax errors, evaluates it in
/// `environment`. Bindings made by the program stay in `environment`.
pub fn interpret(source: &str, environment: &mut Environment) -> Result<Gc<Object>, Vec<ParseError>> {
    let mut parser = Parser::new(Tokenizer::new(source));
    let program = parser.parse_program()?;
    Ok(evaluator::eval_program(&program, environment))
}
