use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser as ClapParser;
use log::info;

use treelox::error::Diagnostics;
use treelox::interpreter::Interpreter;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Script to run; starts a REPL when omitted
    script: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Cli = Cli::parse();

    match args.script.as_slice() {
        [] => run_prompt()?,

        [script] => run_file(script)?,

        _ => {
            println!("Usage: treelox [script]");
            process::exit(1);
        }
    }

    Ok(())
}

fn run_file(path: &Path) -> anyhow::Result<()> {
    info!("Running script {}", path.display());

    let source: String = fs::read_to_string(path)?;

    let mut diagnostics = Diagnostics::new();
    let mut interpreter = Interpreter::new(io::stdout());

    treelox::run(&source, &mut interpreter, &mut diagnostics);

    if diagnostics.had_error() || diagnostics.had_runtime_error() {
        process::exit(1);
    }

    Ok(())
}

fn run_prompt() -> anyhow::Result<()> {
    info!("Starting REPL");

    let stdin = io::stdin();
    let mut diagnostics = Diagnostics::new();
    let mut interpreter = Interpreter::new(io::stdout());

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        let nbytes: usize = stdin.lock().read_line(&mut line)?;

        // Empty line or end of input ends the session.
        if nbytes == 0 || line.trim().is_empty() {
            break;
        }

        treelox::run(&line, &mut interpreter, &mut diagnostics);

        // A bad line shouldn't poison the next one.
        diagnostics.reset();
    }

    Ok(())
}
