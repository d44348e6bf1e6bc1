//! Output formatting for registry summaries.

use console_dispatch_core::RegistrySummary;

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

impl OutputFormat {
    /// Parses a format name as supplied on a command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" => Some(Self::Yaml),
            "table" => Some(Self::Table),
            _ => None,
        }
    }
}

/// Formats a registry summary in the requested output format.
pub fn format_summary(summary: &RegistrySummary, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(summary)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(summary).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(summary_to_table(summary)),
    }
}

fn summary_to_table(summary: &RegistrySummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("Application: {}", summary.name));
    if !summary.version.is_empty() {
        out.push_str(&format!("  Version: {}", summary.version));
    }
    out.push('\n');
    out.push_str(&format!("  {}\n", summary.description));

    let commands = summary
        .default_command
        .iter()
        .chain(summary.commands.iter());
    out.push_str("\nCommands:\n");
    for command in commands {
        let verb = if command.verb.is_empty() {
            "(default)"
        } else {
            &command.verb
        };
        out.push_str(&format!("  {verb:<12} {}\n", command.description));
        for switch in &command.switches {
            let mut markers = String::new();
            if switch.required {
                markers.push_str(" (required)");
            }
            if switch.boolean {
                markers.push_str(" (flag)");
            }
            out.push_str(&format!(
                "    -{:<10} {}{markers}\n",
                switch.tag, switch.description
            ));
        }
    }

    if !summary.error_codes.is_empty() {
        out.push_str("\nError codes:\n");
        for (code, text) in &summary.error_codes {
            out.push_str(&format!("  {code:<4} {text}\n"));
        }
    }

    out
}
