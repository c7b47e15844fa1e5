use gc::Gc;

use monkey_lang_core::ast::{Program, Statement};
use monkey_lang_core::lexer::{Token, Tokenizer};
use monkey_lang_core::parser::{ParseError, Parser};
use monkey_lang_interpreter::environment::Environment;
use monkey_lang_interpreter::evaluator::eval_program;
use monkey_lang_interpreter::object::Object;

/// One stage of the pipeline applied to each piece of input.
pub trait Evaluator {
    type Object;

    fn evaluate(&mut self, source: &str) -> Result<Self::Object, Vec<ParseError>>;
}

pub struct LexerEvaluator;

impl Evaluator for LexerEvaluator {
    type Object = Vec<Token>;

    fn evaluate(&mut self, source: &str) -> Result<Self::Object, Vec<ParseError>> {
        Ok(Tokenizer::new(source).collect())
    }
}

pub struct ParserEvaluator;

impl Evaluator for ParserEvaluator {
    type Object = Program;

    fn evaluate(&mut self, source: &str) -> Result<Self::Object, Vec<ParseError>> {
        Parser::new(Tokenizer::new(source)).parse_program()
    }
}

pub struct InterpreterEvaluator {
    environment: Environment,
}

impl InterpreterEvaluator {
    pub fn new() -> Self {
        Self {
            environment: Environment::new(),
        }
    }
}

impl Default for InterpreterEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for InterpreterEvaluator {
    /// `None` when the input only binds names and there is nothing to show.
    type Object = Option<Gc<Object>>;

    fn evaluate(&mut self, source: &str) -> Result<Self::Object, Vec<ParseError>> {
        let program = Parser::new(Tokenizer::new(source)).parse_program()?;
        let result = eval_program(&program, &mut self.environment);

        let silent = matches!(program.statements.last(), None | Some(Statement::Let(_)))
            && !matches!(result.as_ref(), Object::Error(_));
        Ok((!silent).then_some(result))
    }
}
