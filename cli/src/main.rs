//! Sample console application driving the dispatch framework.
//!
//! Registers a default greeting command and an `add` command, then either
//! dispatches the process arguments once (exiting with the returned status)
//! or, when started without arguments, runs a read-evaluate loop over stdin
//! lines until an empty line or end of input.

use std::io::{self, BufRead};

use tracing::debug;
use tracing_subscriber::EnvFilter;

use console_dispatch::{Dispatcher, OutputFormat, format_summary};
use console_dispatch_core::{CommandSpec, ParsedArguments, SwitchSpec};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut dispatcher = match build_dispatcher() {
        Ok(dispatcher) => dispatcher,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();

    // Machine-readable registry description, outside normal dispatch.
    if args.first().map(String::as_str) == Some("--describe") {
        let name = args.get(1).map(String::as_str).unwrap_or("table");
        let Some(format) = OutputFormat::from_name(name) else {
            eprintln!("error: unknown output format \"{name}\" (json, yaml, table)");
            std::process::exit(2);
        };
        match format_summary(&dispatcher.summary(), format) {
            Ok(text) => {
                print!("{text}");
                return;
            }
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    }

    if !args.is_empty() {
        debug!(?args, "dispatching process arguments");
        std::process::exit(dispatcher.execute(&args));
    }

    // Read-evaluate loop: one command per line until an empty line or EOF.
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("error: failed to read input: {err}");
                std::process::exit(1);
            }
        };
        let tokens: Vec<String> = line.split_whitespace().map(ToString::to_string).collect();
        if tokens.is_empty() {
            break;
        }
        debug!(?tokens, "dispatching input line");
        dispatcher.execute(&tokens);
    }
}

/// Builds the demo registry: a default greeting command, an `add` command
/// with two required switches, and the error-code table.
fn build_dispatcher() -> Result<Dispatcher, Box<dyn std::error::Error>> {
    let mut dispatcher = Dispatcher::new(
        "dispatch-demo",
        "Demonstrates command line parsing and dispatch with a default \
         command, required switches, and an error-code table",
        "dispatch-demo [COMMAND] [SWITCHES]",
    )
    .with_version(VERSION);

    dispatcher.set_default(
        CommandSpec::new(
            "",
            "Prints a greeting",
            vec![
                SwitchSpec::value('n', "Your name"),
                SwitchSpec::boolean('l', "Shout the greeting"),
            ],
            greet,
        )?,
    );

    dispatcher.register(CommandSpec::new(
        "add",
        "Adds two numbers",
        vec![
            SwitchSpec::value('a', "First number").required(),
            SwitchSpec::value('b', "Second number").required(),
        ],
        add,
    )?)?;

    dispatcher.register_error_code(1, "parameter was not a valid integer");

    Ok(dispatcher)
}

fn greet(args: &ParsedArguments) -> i32 {
    let name = args.value('n').unwrap_or("stranger");
    let greeting = format!("Hello {name}");
    if args.contains('l') {
        println!("{}", greeting.to_uppercase());
    } else {
        println!("{greeting}");
    }
    0
}

fn add(args: &ParsedArguments) -> i32 {
    let parse = |tag| args.value(tag).and_then(|v| v.parse::<i64>().ok());
    let (Some(a), Some(b)) = (parse('a'), parse('b')) else {
        return 1;
    };
    println!("{a} + {b} = {}", a + b);
    0
}
