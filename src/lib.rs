pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;
pub mod value;

use std::io::Write;

use error::Diagnostics;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;

/// Run a source string through the full pipeline: scan, parse, resolve,
/// interpret. Static errors recorded in the sink stop the pipeline before
/// execution; runtime errors are reported by the interpreter itself.
///
/// The interpreter is reusable across calls: a REPL feeds it one line at a
/// time and globals persist between lines.
///
/// ```
/// use treelox::error::Diagnostics;
/// use treelox::interpreter::Interpreter;
///
/// let mut output: Vec<u8> = Vec::new();
/// let mut interpreter = Interpreter::new(&mut output);
/// let mut diagnostics = Diagnostics::new();
///
/// treelox::run("print 3 * 2;", &mut interpreter, &mut diagnostics);
///
/// assert!(!diagnostics.had_error());
/// drop(interpreter);
/// assert_eq!(output, b"6\n");
/// ```
pub fn run<W: Write>(source: &str, interpreter: &mut Interpreter<W>, diagnostics: &mut Diagnostics) {
    let tokens = scanner::scan_tokens(source.as_bytes(), diagnostics);

    let statements = Parser::new(tokens, diagnostics).parse();

    if diagnostics.had_error() {
        return;
    }

    Resolver::new(interpreter, diagnostics).resolve(&statements);

    if diagnostics.had_error() {
        return;
    }

    interpreter.interpret(&statements, diagnostics);
}
