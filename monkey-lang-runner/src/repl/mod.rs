pub mod evaluator;
pub mod printer;
mod reader;

use rustyline::DefaultEditor;
use tracing::debug;

use evaluator::{Evaluator, InterpreterEvaluator, LexerEvaluator, ParserEvaluator};
use printer::{print_parse_errors, InterpreterPrinter, LexerPrinter, ParserPrinter, Printer};
use reader::{ReadOutput, Reader};

use crate::Mode;

struct Repl<E: Evaluator, P: Printer> {
    reader: Reader,
    evaluator: E,
    printer: P,
}

impl<O, E: Evaluator<Object = O>, P: Printer<Object = O>> Repl<E, P> {
    fn run(mut self) -> anyhow::Result<()> {
        loop {
            match self.reader.read()? {
                ReadOutput::Exit => break,
                ReadOutput::Clear => continue,
                ReadOutput::Line(line) => match self.evaluator.evaluate(&line) {
                    Ok(result) => self.printer.print(result),
                    Err(errors) => {
                        debug!(count = errors.len(), "input rejected");
                        print_parse_errors(&errors)
                    }
                },
            }
        }
        Ok(())
    }
}

fn greet() {
    match std::env::var("USER") {
        Ok(user) => println!("Hello {}! This is the Monkey programming language!", user),
        Err(_) => println!("Hello! This is the Monkey programming language!"),
    }
    println!("Feel free to type in commands");
}

pub fn start(mode: Mode) -> anyhow::Result<()> {
    let rl = DefaultEditor::new()?;
    greet();

    match mode {
        Mode::Lexer => Repl {
            reader: Reader::new(rl),
            evaluator: LexerEvaluator,
            printer: LexerPrinter,
        }
        .run(),
        Mode::Parser => Repl {
            reader: Reader::new(rl),
            evaluator: ParserEvaluator,
            printer: ParserPrinter,
        }
        .run(),
        Mode::Interpreter => Repl {
            reader: Reader::new(rl),
            evaluator: InterpreterEvaluator::new(),
            printer: InterpreterPrinter,
        }
        .run(),
    }
}
