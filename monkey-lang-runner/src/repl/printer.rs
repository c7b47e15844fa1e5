use gc::Gc;

use monkey_lang_core::ast::Program;
use monkey_lang_core::lexer::Token;
use monkey_lang_core::parser::ParseError;
use monkey_lang_interpreter::object::Object;

pub trait Printer {
    type Object;

    fn print(&mut self, object: Self::Object);
}

pub struct LexerPrinter;

impl Printer for LexerPrinter {
    type Object = Vec<Token>;

    fn print(&mut self, tokens: Self::Object) {
        for token in tokens {
            println!("{:<8} {:?}", token.kind.name(), token.literal());
        }
    }
}

pub struct ParserPrinter;

impl Printer for ParserPrinter {
    type Object = Program;

    fn print(&mut self, program: Self::Object) {
        println!("{}", program);
    }
}

pub struct InterpreterPrinter;

impl Printer for InterpreterPrinter {
    type Object = Option<Gc<Object>>;

    fn print(&mut self, object: Self::Object) {
        if let Some(object) = object {
            println!("{}", object);
        }
    }
}

pub fn print_parse_errors(errors: &[ParseError]) {
    println!("parser errors:");
    for error in errors {
        println!("\t{}", error);
    }
}
