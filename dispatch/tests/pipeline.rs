//! End-to-end dispatch pipeline scenarios: registration through handler
//! invocation, exercised the way an application drives the library.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use console_dispatch::{
    DefaultHelp, Dispatcher, HelpRenderer, STATUS_USAGE, format_summary, OutputFormat,
};
use console_dispatch_core::{CommandSpec, ParsedArguments, RegistrySummary, SwitchSpec};

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn line(input: &str) -> Vec<String> {
    input.split_whitespace().map(ToString::to_string).collect()
}

/// Builds the sample application's dispatcher: a default greeting command,
/// an `add` command with two required switches, and an error-code table.
fn sample_app(out: SharedBuf) -> (Dispatcher, Arc<AtomicUsize>) {
    let mut dispatcher = Dispatcher::new(
        "sample",
        "Demonstrates command dispatch",
        "sample [COMMAND] [SWITCHES]",
    )
    .with_version("1.0.0")
    .with_output(Box::new(out.clone()));

    let invocations = Arc::new(AtomicUsize::new(0));
    let add_invocations = invocations.clone();
    let add_out = out.clone();
    dispatcher
        .register(
            CommandSpec::new(
                "add",
                "Adds two numbers",
                vec![
                    SwitchSpec::value('a', "First number").required(),
                    SwitchSpec::value('b', "Second number").required(),
                ],
                move |args: &ParsedArguments| {
                    add_invocations.fetch_add(1, Ordering::SeqCst);
                    let parse = |tag| args.value(tag).and_then(|v| v.parse::<i32>().ok());
                    match (parse('a'), parse('b')) {
                        (Some(a), Some(b)) => {
                            let mut out = add_out.clone();
                            let _ = writeln!(out, "{a} + {b} = {}", a + b);
                            0
                        }
                        _ => 1,
                    }
                },
            )
            .unwrap(),
        )
        .unwrap();

    let greet_out = out;
    dispatcher.set_default(
        CommandSpec::new(
            "",
            "Prints a greeting",
            vec![SwitchSpec::value('n', "Your name")],
            move |args: &ParsedArguments| {
                let mut out = greet_out.clone();
                let _ = writeln!(out, "Hello {}", args.value('n').unwrap_or("stranger"));
                0
            },
        )
        .unwrap(),
    );

    dispatcher.register_error_code(1, "parameter was not a valid integer");
    (dispatcher, invocations)
}

#[test]
fn add_command_end_to_end() {
    let out = SharedBuf::default();
    let (mut dispatcher, _) = sample_app(out.clone());

    assert_eq!(dispatcher.execute(&line("ADD -a 3 -b 4")), 0);
    assert!(out.contents().contains("3 + 4 = 7"));
}

#[test]
fn missing_required_switch_short_circuits_to_help() {
    let out = SharedBuf::default();
    let (mut dispatcher, invocations) = sample_app(out.clone());

    assert_eq!(dispatcher.execute(&line("add -a 3")), STATUS_USAGE);
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
    let output = out.contents();
    assert!(output.contains("requires the -b switch"));
    assert!(output.contains("SYNOPSIS"));
}

#[test]
fn invalid_integer_maps_through_error_code_table() {
    let out = SharedBuf::default();
    let (mut dispatcher, invocations) = sample_app(out.clone());

    assert_eq!(dispatcher.execute(&line("add -a three -b 4")), 1);
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
    assert!(out.contents().contains("parameter was not a valid integer"));
}

#[test]
fn default_command_greets_without_a_verb() {
    let out = SharedBuf::default();
    let (mut dispatcher, _) = sample_app(out.clone());

    assert_eq!(dispatcher.execute(&line("-n world")), 0);
    assert!(out.contents().contains("Hello world"));
}

#[test]
fn default_command_runs_on_empty_line() {
    let out = SharedBuf::default();
    let (mut dispatcher, _) = sample_app(out.clone());

    assert_eq!(dispatcher.execute(&[]), 0);
    assert!(out.contents().contains("Hello stranger"));
}

#[test]
fn double_dash_keeps_switch_shaped_tokens_as_trailing() {
    let out = SharedBuf::default();
    let (mut dispatcher, invocations) = sample_app(out.clone());

    // `-- -a` never records switch a, so the required check fails.
    assert_eq!(dispatcher.execute(&line("add -- -a")), STATUS_USAGE);
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
    assert!(out.contents().contains("requires the -a switch"));
}

#[test]
fn repeated_dispatch_produces_identical_results() {
    let out = SharedBuf::default();
    let (mut dispatcher, invocations) = sample_app(out.clone());

    for _ in 0..2 {
        assert_eq!(dispatcher.execute(&line("add -a 3 -b 4")), 0);
    }
    assert_eq!(invocations.load(Ordering::SeqCst), 2);
    assert_eq!(out.contents().matches("3 + 4 = 7").count(), 2);
}

#[test]
fn custom_help_renderer_replaces_default_layout() {
    struct OneLiner;
    impl HelpRenderer for OneLiner {
        fn render(&self, summary: &RegistrySummary) -> String {
            format!("usage: {}\n", summary.synopsis)
        }
    }

    let out = SharedBuf::default();
    let (dispatcher, _) = sample_app(out.clone());
    let mut dispatcher = dispatcher.with_help_renderer(Box::new(OneLiner));

    assert_eq!(dispatcher.execute(&line("-h")), 0);
    let output = out.contents();
    assert!(output.contains("usage: sample [COMMAND] [SWITCHES]"));
    assert!(!output.contains("SYNOPSIS"));
}

#[test]
fn summary_formats_reflect_the_running_registry() {
    let out = SharedBuf::default();
    let (dispatcher, _) = sample_app(out);
    let summary = dispatcher.summary();

    let json = format_summary(&summary, OutputFormat::Json).unwrap();
    assert!(json.contains("\"verb\": \"add\""));

    let table = format_summary(&summary, OutputFormat::Table).unwrap();
    assert!(table.contains("(default)"));
    assert!(table.contains("add"));

    // The default help renderer draws from the same summary.
    let help = DefaultHelp.render(&summary);
    assert!(help.contains("add - Adds two numbers"));
    assert!(help.contains("Prints a greeting"));
}
