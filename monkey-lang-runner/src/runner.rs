use anyhow::bail;

use crate::repl::evaluator::{Evaluator, InterpreterEvaluator, LexerEvaluator, ParserEvaluator};
use crate::repl::printer::{print_parse_errors, InterpreterPrinter, LexerPrinter, ParserPrinter, Printer};
use crate::Mode;

/// Runs a whole source file as a single input.
pub fn execute(source: &str, mode: Mode) -> anyhow::Result<()> {
    match mode {
        Mode::Lexer => run(source, LexerEvaluator, LexerPrinter),
        Mode::Parser => run(source, ParserEvaluator, ParserPrinter),
        Mode::Interpreter => run(source, InterpreterEvaluator::new(), InterpreterPrinter),
    }
}

fn run<O>(
    source: &str,
    mut evaluator: impl Evaluator<Object = O>,
    mut printer: impl Printer<Object = O>,
) -> anyhow::Result<()> {
    match evaluator.evaluate(source) {
        Ok(result) => {
            printer.print(result);
            Ok(())
        }
        Err(errors) => {
            print_parse_errors(&errors);
            bail!("found {} syntax error(s)", errors.len())
        }
    }
}
