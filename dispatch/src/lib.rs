//! Switch tokenization and command dispatch for console applications.
//!
//! An application declares its command surface with the types from
//! [`console_dispatch_core`], registers everything into a [`Dispatcher`] at
//! setup, and hands each raw input line to [`Dispatcher::execute`]. The
//! dispatcher selects a command (or falls back to the default), tokenizes
//! and validates its switches, invokes the handler, and maps the returned
//! status through the registered error-code table. The returned integer is
//! the process's externally observable result code.
//!
//! Failures never escape: parse and validation errors degrade to a one-line
//! diagnostic plus help text, and a panicking handler is caught at the
//! dispatcher boundary and mapped to a fixed fault status.
//!
//! # Example
//!
//! ```
//! use console_dispatch::Dispatcher;
//! use console_dispatch_core::{CommandSpec, SwitchSpec};
//!
//! let mut dispatcher = Dispatcher::new(
//!     "greeter",
//!     "Greets people",
//!     "greeter [COMMAND] [SWITCHES]",
//! )
//! .with_version("1.0.0");
//!
//! dispatcher
//!     .register(
//!         CommandSpec::new(
//!             "greet",
//!             "Prints a greeting",
//!             vec![SwitchSpec::value('n', "Your name").required()],
//!             |args| {
//!                 println!("Hello {}", args.value('n').unwrap_or("stranger"));
//!                 0
//!             },
//!         )
//!         .unwrap(),
//!     )
//!     .unwrap();
//!
//! let line: Vec<String> = ["greet", "-n", "world"]
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//! assert_eq!(dispatcher.execute(&line), 0);
//! ```

mod dispatcher;
mod help;
mod output;
mod parse;

pub use dispatcher::{
    DispatchError, Dispatcher, HELP_TOKENS, RegistryError, STATUS_FAULT, STATUS_USAGE,
};
pub use help::{DefaultHelp, HelpRenderer};
pub use output::{OutputFormat, format_summary};
pub use parse::{ParseError, SWITCH_PREFIX, TRAILING_MARKER, parse_switch_tokens};
