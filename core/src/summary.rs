//! Serializable descriptions of a registered command set.
//!
//! Handlers are function values and cannot round-trip through serde, so the
//! dispatcher exposes its registry as these plain data types instead. They
//! feed both the help renderer and machine-readable output formats.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::SwitchSpec;

/// Serializable description of one command.
///
/// Produced by [`CommandSpec::summary`](crate::CommandSpec::summary).
/// Switches appear in tag order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSummary {
    /// Invocation keyword, lower-cased. Empty for a default command.
    pub verb: String,
    /// Description shown in help output.
    pub description: String,
    /// Declared switches in tag order.
    pub switches: Vec<SwitchSpec>,
    /// Free-text notes about trailing arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_notes: Option<String>,
}

/// Serializable description of a whole dispatcher registry.
///
/// Groups the application metadata, every registered command, the default
/// command, and the error-code table — everything a help renderer or an
/// external tool needs to describe the program's command surface.
///
/// # Examples
///
/// ```
/// use console_dispatch_core::RegistrySummary;
///
/// let summary = RegistrySummary {
///     name: "demo".into(),
///     synopsis: "demo [COMMAND] [SWITCHES]".into(),
///     description: "A demo application".into(),
///     version: "0.1.0".into(),
///     commands: vec![],
///     default_command: None,
///     error_codes: Default::default(),
/// };
/// assert_eq!(summary.name, "demo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySummary {
    /// Application name.
    pub name: String,
    /// One-line invocation syntax, e.g. `proc [COMMAND] [SWITCHES]`.
    pub synopsis: String,
    /// Longer application description.
    pub description: String,
    /// Application version string.
    pub version: String,
    /// Registered commands in verb order.
    pub commands: Vec<CommandSummary>,
    /// The verb-less default command, if one is registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_command: Option<CommandSummary>,
    /// Non-zero status code → diagnostic text.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub error_codes: BTreeMap<i32, String>,
}
