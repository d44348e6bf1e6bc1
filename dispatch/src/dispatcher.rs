//! Command selection, validation, and handler invocation.
//!
//! The [`Dispatcher`] owns the registered command set, an optional default
//! command, the error-code table, a help renderer, and the output sink for
//! user-visible diagnostics. Registration happens once at setup; execution
//! treats the registry as read-only and builds a fresh
//! [`ParsedArguments`](console_dispatch_core::ParsedArguments) per
//! invocation.
//!
//! Every parse and validation failure is folded into a one-line diagnostic
//! plus help text and a non-success status — nothing propagates as a hard
//! failure. A panicking handler is caught at this boundary, logged, and
//! mapped to [`STATUS_FAULT`]; the dispatcher never lets an internal fault
//! terminate the process abnormally.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, error};

use console_dispatch_core::{CommandSpec, HELP_TAG, RegistrySummary, STATUS_SUCCESS};

use crate::help::{DefaultHelp, HelpRenderer};
use crate::parse::{ParseError, parse_switch_tokens};

/// Fixed status for a handler fault caught at the dispatcher boundary.
pub const STATUS_FAULT: i32 = 1;

/// Status for parse, validation, and command-selection failures.
pub const STATUS_USAGE: i32 = 2;

/// Tokens that invoke the built-in help action anywhere on the line.
pub const HELP_TOKENS: [&str; 2] = ["-h", "-?"];

/// Registration failures, detected at setup time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A command with this verb is already registered.
    #[error("a command with the verb \"{0}\" is already registered")]
    DuplicateVerb(String),
    /// Only the default command may have an empty verb.
    #[error("a registered command must have a non-empty verb")]
    EmptyVerb,
}

/// Dispatch pipeline failures.
///
/// All of these degrade to help output plus [`STATUS_USAGE`]; none of them
/// reach the application as a hard failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Tokenizer failure.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A required switch was absent from the input.
    #[error("the \"{verb}\" command requires the -{tag} switch")]
    MissingRequiredSwitch {
        /// Verb of the selected command (empty for a default command).
        verb: String,
        /// Tag of the missing switch.
        tag: char,
    },
    /// A non-boolean switch is present without a resolved value.
    #[error("no value found for the -{tag} switch")]
    MissingSwitchValue {
        /// Tag of the valueless switch.
        tag: char,
    },
    /// First token is not a registered verb and no default command applies.
    #[error("unknown command \"{0}\"")]
    UnknownCommand(String),
    /// Empty input line with no default command registered.
    #[error("no command found")]
    NoCommand,
}

enum RunOutcome {
    Status(i32),
    Help,
    Fault,
}

/// Owns the command registry and runs the dispatch pipeline.
///
/// # Examples
///
/// ```
/// use console_dispatch::Dispatcher;
/// use console_dispatch_core::{CommandSpec, SwitchSpec};
///
/// let mut dispatcher = Dispatcher::new(
///     "demo",
///     "A demonstration application",
///     "demo [COMMAND] [SWITCHES]",
/// );
/// dispatcher
///     .register(
///         CommandSpec::new(
///             "add",
///             "Adds two numbers",
///             vec![
///                 SwitchSpec::value('a', "First number").required(),
///                 SwitchSpec::value('b', "Second number").required(),
///             ],
///             |args| {
///                 let a: i32 = args.value('a').unwrap().parse().unwrap();
///                 let b: i32 = args.value('b').unwrap().parse().unwrap();
///                 println!("{}", a + b);
///                 0
///             },
///         )
///         .unwrap(),
///     )
///     .unwrap();
///
/// let line: Vec<String> = ["ADD", "-a", "3", "-b", "4"]
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(dispatcher.execute(&line), 0);
/// ```
pub struct Dispatcher {
    name: String,
    description: String,
    synopsis: String,
    version: String,
    commands: BTreeMap<String, CommandSpec>,
    default_command: Option<CommandSpec>,
    error_codes: BTreeMap<i32, String>,
    help: Box<dyn HelpRenderer + Send + Sync>,
    out: Box<dyn Write + Send>,
}

impl Dispatcher {
    /// Creates a dispatcher with the application's name, description, and
    /// one-line synopsis.
    ///
    /// Help renders with the default man-style layout and user-visible
    /// output goes to stdout until overridden.
    pub fn new(name: &str, description: &str, synopsis: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            synopsis: synopsis.to_string(),
            version: String::new(),
            commands: BTreeMap::new(),
            default_command: None,
            error_codes: BTreeMap::new(),
            help: Box::new(DefaultHelp),
            out: Box::new(io::stdout()),
        }
    }

    /// Sets the version string shown in help output.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Replaces the sink for help text and user-visible diagnostics.
    pub fn with_output(mut self, out: Box<dyn Write + Send>) -> Self {
        self.out = out;
        self
    }

    /// Replaces the default help renderer.
    pub fn with_help_renderer(mut self, help: Box<dyn HelpRenderer + Send + Sync>) -> Self {
        self.help = help;
        self
    }

    /// Registers a command under its verb.
    ///
    /// Fails on a duplicate or empty verb; verb-less commands go through
    /// [`set_default`](Self::set_default) instead.
    pub fn register(&mut self, spec: CommandSpec) -> Result<(), RegistryError> {
        if spec.verb().is_empty() {
            return Err(RegistryError::EmptyVerb);
        }
        if self.commands.contains_key(spec.verb()) {
            return Err(RegistryError::DuplicateVerb(spec.verb().to_string()));
        }
        self.commands.insert(spec.verb().to_string(), spec);
        Ok(())
    }

    /// Registers the command run when the line is empty or its first token
    /// is not a known verb. At most one; a second call replaces the first.
    pub fn set_default(&mut self, spec: CommandSpec) {
        self.default_command = Some(spec);
    }

    /// Maps a non-zero handler status to the diagnostic shown for it.
    pub fn register_error_code(&mut self, code: i32, text: &str) {
        self.error_codes.insert(code, text.to_string());
    }

    /// Produces the serializable description of the whole registry.
    pub fn summary(&self) -> RegistrySummary {
        RegistrySummary {
            name: self.name.clone(),
            synopsis: self.synopsis.clone(),
            description: self.description.clone(),
            version: self.version.clone(),
            commands: self.commands.values().map(CommandSpec::summary).collect(),
            default_command: self.default_command.as_ref().map(CommandSpec::summary),
            error_codes: self.error_codes.clone(),
        }
    }

    /// Dispatches one input line and returns the process-observable status.
    ///
    /// The pipeline: help short-circuit, command selection (default command
    /// fallback, then case-insensitive verb match), tokenization, the
    /// required-switch and value-presence checks, handler invocation, and
    /// error-code lookup for a non-zero handler status.
    pub fn execute(&mut self, line: &[String]) -> i32 {
        // A bare help token anywhere wins over all command resolution.
        if line.iter().any(|t| HELP_TOKENS.contains(&t.as_str())) {
            return self.show_help();
        }

        let outcome = self
            .select(line)
            .and_then(|(spec, tokens)| self.run(spec, tokens));

        match outcome {
            Ok(RunOutcome::Help) => self.show_help(),
            Ok(RunOutcome::Fault) => STATUS_FAULT,
            Ok(RunOutcome::Status(status)) => {
                if status != STATUS_SUCCESS {
                    match self.error_codes.get(&status) {
                        Some(text) => {
                            let text = text.clone();
                            self.emit(&text);
                        }
                        None => debug!(
                            status,
                            "handler returned a status with no registered diagnostic"
                        ),
                    }
                }
                status
            }
            Err(err) => {
                self.emit(&format!("error: {err}"));
                self.show_help();
                STATUS_USAGE
            }
        }
    }

    /// Selects the command for a line and the tokens passed to it.
    ///
    /// The default command receives the full unmodified line; a verb match
    /// consumes the first token.
    fn select<'a>(
        &'a self,
        line: &'a [String],
    ) -> Result<(&'a CommandSpec, &'a [String]), DispatchError> {
        if let Some(default) = &self.default_command {
            let use_default = match line.first() {
                None => true,
                Some(first) => !self.commands.contains_key(&first.to_lowercase()),
            };
            if use_default {
                return Ok((default, line));
            }
        }

        let Some(first) = line.first() else {
            return Err(DispatchError::NoCommand);
        };
        let verb = first.to_lowercase();
        match self.commands.get(&verb) {
            Some(spec) => Ok((spec, &line[1..])),
            None => Err(DispatchError::UnknownCommand(verb)),
        }
    }

    /// Runs the per-command sub-pipeline: parse, help check, required and
    /// value validation, handler invocation.
    fn run(&self, spec: &CommandSpec, tokens: &[String]) -> Result<RunOutcome, DispatchError> {
        let parsed = parse_switch_tokens(tokens, spec)?;

        // Help always wins over validation errors.
        if parsed.contains(HELP_TAG) {
            return Ok(RunOutcome::Help);
        }

        // Both checks walk switches in tag order, so the "first" violation
        // is deterministic.
        for switch in spec.switches().values() {
            if switch.required && !parsed.contains(switch.tag) {
                return Err(DispatchError::MissingRequiredSwitch {
                    verb: spec.verb().to_string(),
                    tag: switch.tag,
                });
            }
        }
        for switch in spec.switches().values() {
            if !switch.boolean && parsed.is_pending(switch.tag) {
                return Err(DispatchError::MissingSwitchValue { tag: switch.tag });
            }
        }

        match panic::catch_unwind(AssertUnwindSafe(|| spec.invoke(&parsed))) {
            Ok(status) => Ok(RunOutcome::Status(status)),
            Err(_) => {
                error!(verb = spec.verb(), "handler panicked; mapping to fault status");
                Ok(RunOutcome::Fault)
            }
        }
    }

    /// Renders help to the output sink. Always returns success.
    fn show_help(&mut self) -> i32 {
        let text = self.help.render(&self.summary());
        let _ = self.out.write_all(text.as_bytes());
        STATUS_SUCCESS
    }

    fn emit(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }
}
