//! Core types and construction-time validation for console command dispatch.
//!
//! This crate defines the foundational types for declaring a console
//! application's command surface:
//!
//! - [`SwitchSpec`] — a single-character switch with required/boolean flags
//!   and a description.
//! - [`CommandSpec`] — an invocable command: verb, switches, usage notes, and
//!   the handler invoked with validated arguments.
//! - [`ParsedArguments`] — the per-invocation switch→value mapping plus
//!   trailing tokens, built by the tokenizer and consumed by handlers.
//! - [`CommandSummary`] / [`RegistrySummary`] — serializable descriptions of
//!   a command set, used for help rendering and machine-readable output.
//!
//! Construction-time validation ([`SpecError`]) rejects malformed switch
//! declarations before a command can ever be registered: non-alphanumeric
//! tags, duplicate tags, and the reserved help tag.
//!
//! # Example
//!
//! ```
//! use console_dispatch_core::{CommandSpec, SwitchSpec};
//!
//! let add = CommandSpec::new(
//!     "add",
//!     "Adds two numbers",
//!     vec![
//!         SwitchSpec::value('a', "First number").required(),
//!         SwitchSpec::value('b', "Second number").required(),
//!     ],
//!     |args| {
//!         let a: i32 = args.value('a').unwrap().parse().unwrap();
//!         let b: i32 = args.value('b').unwrap().parse().unwrap();
//!         println!("{a} + {b} = {}", a + b);
//!         0
//!     },
//! )
//! .unwrap();
//!
//! assert_eq!(add.verb(), "add");
//! assert!(add.switch('a').unwrap().required);
//! ```

mod summary;
mod types;
mod validate;

pub use summary::{CommandSummary, RegistrySummary};
pub use types::{CommandSpec, HELP_TAG, Handler, ParsedArguments, STATUS_SUCCESS, SwitchSpec};
pub use validate::{SpecError, validate_switches};
