//! Switch, command, and parsed-argument type definitions.
//!
//! This module defines the immutable declarations a console application
//! registers at setup ([`SwitchSpec`], [`CommandSpec`]) and the per-invocation
//! result the tokenizer produces for handlers ([`ParsedArguments`]).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::summary::CommandSummary;
use crate::validate::{SpecError, validate_switches};

/// Status code handlers return on success.
pub const STATUS_SUCCESS: i32 = 0;

/// The reserved help tag.
///
/// `-h` (and `-?`) invoke the built-in help action at the dispatcher level,
/// so no command may declare a switch with this tag.
pub const HELP_TAG: char = 'h';

/// Handler invoked with a command's validated arguments.
///
/// Returns an integer status: [`STATUS_SUCCESS`] on success, any other value
/// is looked up in the dispatcher's error-code table for display.
pub type Handler = Box<dyn Fn(&ParsedArguments) -> i32 + Send + Sync>;

/// Declaration of one recognized switch.
///
/// A switch is invoked as `-t` where `t` is the single-character tag. Tags
/// are matched case-insensitively and stored lower-cased. Boolean switches
/// never consume a following token as their value; value switches expect the
/// next token to be their value.
///
/// # Examples
///
/// ```
/// use console_dispatch_core::SwitchSpec;
///
/// let name = SwitchSpec::value('N', "Your name");
/// assert_eq!(name.tag, 'n'); // stored lower-cased
/// assert!(!name.boolean);
/// assert!(!name.required);
///
/// let verbose = SwitchSpec::boolean('v', "Verbose output").required();
/// assert!(verbose.boolean);
/// assert!(verbose.required);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchSpec {
    /// Single-character identifier (the `a` in `-a`), lower-cased.
    pub tag: char,
    /// Display text for help output.
    pub description: String,
    /// Whether the command refuses to run without this switch.
    pub required: bool,
    /// Whether this switch is a flag that takes no value.
    pub boolean: bool,
}

impl SwitchSpec {
    /// Creates a switch that expects a value token to follow it.
    pub fn value(tag: char, description: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            description: description.to_string(),
            required: false,
            boolean: false,
        }
    }

    /// Creates a boolean flag switch (no value token).
    pub fn boolean(tag: char, description: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            description: description.to_string(),
            required: false,
            boolean: true,
        }
    }

    /// Marks the switch as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl fmt::Display for SwitchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{} - {}", self.tag, self.description)
    }
}

/// Declaration of one invocable command.
///
/// A command pairs a verb (its case-insensitive invocation keyword), a set
/// of declared switches, and the handler run once the dispatcher has parsed
/// and validated an invocation. Constructed once at program setup and
/// immutable thereafter.
///
/// The verb may be empty only for a dispatcher's default command, which is
/// invoked without a keyword.
///
/// # Examples
///
/// ```
/// use console_dispatch_core::{CommandSpec, SwitchSpec};
///
/// let greet = CommandSpec::new(
///     "GREET",
///     "Prints a greeting",
///     vec![SwitchSpec::value('n', "Your name")],
///     |_args| 0,
/// )
/// .unwrap();
///
/// assert_eq!(greet.verb(), "greet"); // stored lower-cased
/// assert!(greet.switch('n').is_some());
/// assert!(greet.switch('x').is_none());
/// ```
pub struct CommandSpec {
    verb: String,
    description: String,
    switches: BTreeMap<char, SwitchSpec>,
    usage_notes: Option<String>,
    handler: Handler,
}

impl CommandSpec {
    /// Creates a command from its verb, description, switches, and handler.
    ///
    /// The verb is lower-cased. Fails if any switch uses a non-alphanumeric
    /// tag, duplicates another tag, or claims the reserved help tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use console_dispatch_core::{CommandSpec, SpecError, SwitchSpec};
    ///
    /// // The -h tag is reserved for the built-in help action.
    /// let err = CommandSpec::new(
    ///     "run",
    ///     "Runs a thing",
    ///     vec![SwitchSpec::boolean('h', "Collides with help")],
    ///     |_args| 0,
    /// )
    /// .unwrap_err();
    /// assert!(matches!(err, SpecError::ReservedHelpTag { .. }));
    /// ```
    pub fn new<F>(
        verb: &str,
        description: &str,
        switches: Vec<SwitchSpec>,
        handler: F,
    ) -> Result<Self, SpecError>
    where
        F: Fn(&ParsedArguments) -> i32 + Send + Sync + 'static,
    {
        let verb = verb.to_lowercase();
        validate_switches(&verb, &switches)?;

        Ok(Self {
            verb,
            description: description.to_string(),
            switches: switches.into_iter().map(|s| (s.tag, s)).collect(),
            usage_notes: None,
            handler: Box::new(handler),
        })
    }

    /// Adds free-text notes about trailing (non-switch) arguments, shown in
    /// help output.
    pub fn with_usage_notes(mut self, notes: &str) -> Self {
        self.usage_notes = Some(notes.to_string());
        self
    }

    /// The lower-cased invocation keyword. Empty for a default command.
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// Description shown in help output.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared switches, keyed by tag in sorted order.
    pub fn switches(&self) -> &BTreeMap<char, SwitchSpec> {
        &self.switches
    }

    /// Looks up a declared switch by tag, case-insensitively.
    pub fn switch(&self, tag: char) -> Option<&SwitchSpec> {
        self.switches.get(&tag.to_ascii_lowercase())
    }

    /// Usage notes, if any.
    pub fn usage_notes(&self) -> Option<&str> {
        self.usage_notes.as_deref()
    }

    /// Invokes the handler with parsed arguments and returns its status.
    pub fn invoke(&self, args: &ParsedArguments) -> i32 {
        (self.handler)(args)
    }

    /// Produces the serializable description of this command.
    pub fn summary(&self) -> CommandSummary {
        CommandSummary {
            verb: self.verb.clone(),
            description: self.description.clone(),
            switches: self.switches.values().cloned().collect(),
            usage_notes: self.usage_notes.clone(),
        }
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("verb", &self.verb)
            .field("description", &self.description)
            .field("switches", &self.switches)
            .field("usage_notes", &self.usage_notes)
            .finish_non_exhaustive()
    }
}

/// Parsed arguments for one command invocation.
///
/// Holds the switch→value mapping the tokenizer produced plus the trailing
/// tokens that followed all recognized switches. A `None` value means the
/// switch is present but carries no resolved value yet: boolean switches are
/// recorded as `"true"`, so `None` only survives to the handler for a value
/// switch whose value was never supplied — which validation rejects before
/// any handler runs.
///
/// Built fresh per invocation and discarded after the handler returns.
///
/// # Examples
///
/// ```
/// use console_dispatch_core::ParsedArguments;
///
/// let mut args = ParsedArguments::default();
/// args.set_value('a', "3".to_string());
/// args.set_flag('f');
/// args.push_trailing("file.txt".to_string());
///
/// assert_eq!(args.value('a'), Some("3"));
/// assert_eq!(args.value('A'), Some("3")); // case-insensitive
/// assert_eq!(args.value('f'), Some("true"));
/// assert!(args.contains('f'));
/// assert_eq!(args.trailing(), ["file.txt"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArguments {
    values: BTreeMap<char, Option<String>>,
    trailing: Vec<String>,
}

impl ParsedArguments {
    /// Records a boolean switch as present with the value `"true"`.
    pub fn set_flag(&mut self, tag: char) {
        self.values.insert(tag.to_ascii_lowercase(), Some("true".to_string()));
    }

    /// Records a value switch as present with no value resolved yet.
    pub fn set_pending(&mut self, tag: char) {
        self.values.insert(tag.to_ascii_lowercase(), None);
    }

    /// Resolves a switch's value.
    pub fn set_value(&mut self, tag: char, value: String) {
        self.values.insert(tag.to_ascii_lowercase(), Some(value));
    }

    /// Appends a trailing (non-switch) token.
    pub fn push_trailing(&mut self, token: String) {
        self.trailing.push(token);
    }

    /// The value recorded for a tag, if present and resolved.
    pub fn value(&self, tag: char) -> Option<&str> {
        self.values
            .get(&tag.to_ascii_lowercase())
            .and_then(|v| v.as_deref())
    }

    /// Whether a switch was supplied at all, resolved or not.
    pub fn contains(&self, tag: char) -> bool {
        self.values.contains_key(&tag.to_ascii_lowercase())
    }

    /// Whether a switch is present but its value was never resolved.
    pub fn is_pending(&self, tag: char) -> bool {
        matches!(self.values.get(&tag.to_ascii_lowercase()), Some(None))
    }

    /// Tags of all supplied switches, in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = char> + '_ {
        self.values.keys().copied()
    }

    /// Number of switches supplied.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no switches were supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Tokens following all recognized switches, in input order.
    pub fn trailing(&self) -> &[String] {
        &self.trailing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_spec_lowercases_tag() {
        let spec = SwitchSpec::value('A', "First number");
        assert_eq!(spec.tag, 'a');
    }

    #[test]
    fn test_switch_spec_display() {
        let spec = SwitchSpec::boolean('v', "Verbose output");
        assert_eq!(spec.to_string(), "-v - Verbose output");
    }

    #[test]
    fn test_command_spec_lowercases_verb() {
        let cmd = CommandSpec::new("ADD", "Adds two numbers", vec![], |_| 0).unwrap();
        assert_eq!(cmd.verb(), "add");
    }

    #[test]
    fn test_command_spec_switch_lookup_is_case_insensitive() {
        let cmd = CommandSpec::new(
            "add",
            "Adds two numbers",
            vec![SwitchSpec::value('a', "First number")],
            |_| 0,
        )
        .unwrap();
        assert!(cmd.switch('A').is_some());
    }

    #[test]
    fn test_command_spec_invoke_passes_arguments() {
        let cmd = CommandSpec::new(
            "echo",
            "Echoes back a status",
            vec![SwitchSpec::value('s', "Status to return")],
            |args| args.value('s').and_then(|v| v.parse().ok()).unwrap_or(-1),
        )
        .unwrap();

        let mut args = ParsedArguments::default();
        args.set_value('s', "42".to_string());
        assert_eq!(cmd.invoke(&args), 42);
    }

    #[test]
    fn test_parsed_arguments_pending_value() {
        let mut args = ParsedArguments::default();
        args.set_pending('a');
        assert!(args.contains('a'));
        assert!(args.is_pending('a'));
        assert_eq!(args.value('a'), None);

        args.set_value('a', "resolved".to_string());
        assert!(!args.is_pending('a'));
        assert_eq!(args.value('a'), Some("resolved"));
    }

    #[test]
    fn test_command_summary_sorted_by_tag() {
        let cmd = CommandSpec::new(
            "add",
            "Adds two numbers",
            vec![
                SwitchSpec::value('b', "Second number"),
                SwitchSpec::value('a', "First number"),
            ],
            |_| 0,
        )
        .unwrap();

        let tags: Vec<char> = cmd.summary().switches.iter().map(|s| s.tag).collect();
        assert_eq!(tags, vec!['a', 'b']);
    }
}
