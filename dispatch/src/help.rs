//! Help text rendering.
//!
//! The dispatcher renders help through the [`HelpRenderer`] trait so an
//! application can swap in its own layout at setup time. [`DefaultHelp`]
//! produces the classic man-style NAME/SYNOPSIS/DESCRIPTION/COMMANDS text.

use console_dispatch_core::{CommandSummary, RegistrySummary};

/// Renders help text from a registry summary.
pub trait HelpRenderer {
    /// Produces the full help text, including a trailing newline.
    fn render(&self, summary: &RegistrySummary) -> String;
}

/// The built-in man-style help layout.
///
/// Lists the default command first (when present), then every registered
/// command with one indented line per switch and its usage notes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHelp;

impl HelpRenderer for DefaultHelp {
    fn render(&self, summary: &RegistrySummary) -> String {
        let mut out = String::new();

        out.push('\n');
        out.push_str("NAME\n");
        if summary.version.is_empty() {
            out.push_str(&format!("{}\n", summary.name));
        } else {
            out.push_str(&format!("{} Version {}\n", summary.name, summary.version));
        }
        out.push('\n');

        out.push_str("SYNOPSIS\n");
        out.push_str(&format!("{}\n", summary.synopsis));
        out.push('\n');

        out.push_str("DESCRIPTION\n");
        out.push_str(&format!("{}\n", summary.description));
        out.push('\n');

        out.push_str("COMMANDS\n");
        if let Some(default) = &summary.default_command {
            out.push_str(&command_blurb(default));
            out.push('\n');
        }
        for command in &summary.commands {
            out.push_str(&command_blurb(command));
            out.push('\n');
        }

        out
    }
}

/// One command's help blurb: `verb - description`, an indented line per
/// switch, and the usage notes.
fn command_blurb(command: &CommandSummary) -> String {
    let mut out = String::new();

    if command.verb.is_empty() {
        out.push_str(&format!("{}\n", command.description));
    } else {
        out.push_str(&format!("{} - {}\n", command.verb, command.description));
    }
    for switch in &command.switches {
        out.push_str(&format!("\t{switch}\n"));
    }
    if let Some(notes) = &command.usage_notes {
        out.push_str(&format!("{notes}\n"));
    }

    out
}
