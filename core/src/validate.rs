//! Construction-time validation for switch declarations.
//!
//! Catches malformed switch sets when a [`CommandSpec`](crate::CommandSpec)
//! is built, before the command can be registered anywhere: tags that are not
//! a single alphanumeric character, duplicate tags within one command, and
//! the reserved help tag.

use std::collections::HashSet;

use thiserror::Error;

use crate::types::{HELP_TAG, SwitchSpec};

/// Switch declaration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// Tag is not an ASCII alphanumeric character.
    #[error("switch tag must be a single alphanumeric character, got {0:?}")]
    InvalidTag(char),
    /// Tag collides with the built-in help switch.
    #[error("the -h tag is reserved for help and cannot be declared on \"{verb}\"")]
    ReservedHelpTag {
        /// Verb of the offending command (empty for a default command).
        verb: String,
    },
    /// Two switches on the same command share a tag.
    #[error("duplicate switch tag on \"{verb}\": -{tag}")]
    DuplicateTag {
        /// Verb of the offending command.
        verb: String,
        /// The repeated tag.
        tag: char,
    },
}

/// Validates a command's switch declarations.
///
/// Tags are expected to be lower-cased already (the [`SwitchSpec`]
/// constructors do this).
///
/// # Examples
///
/// ```
/// use console_dispatch_core::{SpecError, SwitchSpec, validate_switches};
///
/// let switches = vec![
///     SwitchSpec::value('a', "First number"),
///     SwitchSpec::value('b', "Second number"),
/// ];
/// assert!(validate_switches("add", &switches).is_ok());
///
/// let dup = vec![
///     SwitchSpec::value('a', "First number"),
///     SwitchSpec::boolean('a', "Same tag again"),
/// ];
/// assert!(matches!(
///     validate_switches("add", &dup),
///     Err(SpecError::DuplicateTag { .. })
/// ));
/// ```
pub fn validate_switches(verb: &str, switches: &[SwitchSpec]) -> Result<(), SpecError> {
    let mut seen = HashSet::new();

    for switch in switches {
        if !switch.tag.is_ascii_alphanumeric() {
            return Err(SpecError::InvalidTag(switch.tag));
        }
        if switch.tag == HELP_TAG {
            return Err(SpecError::ReservedHelpTag {
                verb: verb.to_string(),
            });
        }
        if !seen.insert(switch.tag) {
            return Err(SpecError::DuplicateTag {
                verb: verb.to_string(),
                tag: switch.tag,
            });
        }
    }

    Ok(())
}
