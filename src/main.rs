use std::{error::Error, fs, process::ExitCode};

use clap::Parser;
use colored::Colorize;
use lumen::{get_result, parse, tokenize};

/// lumen is a small scripting language with lambdas, shared lists and
/// block-structured control flow.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells lumen to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Runs the script without defining `range`, `map` and `flatMap` first.
    #[arg(long)]
    no_prelude: bool,

    /// Prints every token with its index and line instead of running the
    /// script. Parse errors refer to these indices.
    #[arg(long)]
    tokens: bool,

    /// Prints the parsed program back as source, one statement per line and
    /// with every nested operator parenthesized, instead of running it.
    #[arg(long)]
    ast: bool,

    contents: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(e) => {
                report(&format!("Failed to read the input file '{}': {e}", args.contents));
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents.clone()
    };

    let result = if args.tokens {
        print_tokens(&script)
    } else if args.ast {
        print_ast(&script)
    } else {
        get_result(&script, !args.no_prelude)
    };

    if let Err(e) = result {
        report(&e.to_string());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn report(message: &str) {
    eprintln!("{} {message}", "error:".red().bold());
}

fn print_tokens(script: &str) -> Result<(), Box<dyn Error>> {
    for (index, (token, line)) in tokenize(script)?.iter().enumerate() {
        println!("{index:>10}: {token}  (line {line})");
    }
    Ok(())
}

fn print_ast(script: &str) -> Result<(), Box<dyn Error>> {
    println!("{}", parse(script)?);
    Ok(())
}
