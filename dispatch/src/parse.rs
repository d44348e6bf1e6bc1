//! Switch tokenization.
//!
//! Turns a raw token sequence into [`ParsedArguments`] against one command's
//! switch declarations. The tokenizer is a three-state machine — TAG, VALUE,
//! TRAILING — with single-token lookahead and no backtracking:
//!
//! - It starts in TAG when the first token is shaped like a switch
//!   (`-` + one character), otherwise everything is trailing input.
//! - The literal `--` unconditionally ends switch parsing.
//! - A long unprefixed word in tag position signals the start of positional
//!   arguments and flips to TRAILING.
//! - A switch-shaped token in value position starts a new tag read instead of
//!   becoming the value, leaving the previous switch pending; the value
//!   presence check in the dispatch pipeline rejects it afterwards.
//!
//! The tokenizer stops at the first failure and reports it; it never
//! recovers or produces a partial result.

use thiserror::Error;

use console_dispatch_core::{CommandSpec, ParsedArguments};

/// Prefix character that opens a switch token.
pub const SWITCH_PREFIX: char = '-';

/// Literal token that forces the rest of the line into trailing arguments.
pub const TRAILING_MARKER: &str = "--";

/// Tokenizer failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A tag-position token is not `-` followed by one character.
    #[error("expected a switch, got \"{0}\"")]
    MalformedSwitch(String),
    /// A tag not declared on the target command.
    #[error("found switch that does not exist in the command: -{0}")]
    UnknownSwitch(char),
    /// A tag supplied more than once.
    #[error("found duplicate switch: -{0}")]
    DuplicateSwitch(char),
    /// A value token supplied for a boolean switch.
    #[error("found value for switch that does not accept values: -{0}")]
    UnexpectedValue(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Tag,
    Value(char),
    Trailing,
}

/// Whether a token has the shape of a switch: the prefix plus one character.
fn looks_like_switch(token: &str) -> bool {
    token.starts_with(SWITCH_PREFIX) && token.chars().count() == 2
}

/// Parses raw switch tokens against a command's declarations.
///
/// Tags are matched case-insensitively and recorded lower-cased. Boolean
/// switches record the value `"true"`; a value switch whose value token never
/// arrives stays recorded with a pending value, which the dispatch pipeline's
/// value-presence check rejects before any handler runs.
///
/// # Examples
///
/// ```
/// use console_dispatch::parse_switch_tokens;
/// use console_dispatch_core::{CommandSpec, SwitchSpec};
///
/// let cmd = CommandSpec::new(
///     "copy",
///     "Copies files",
///     vec![
///         SwitchSpec::value('d', "Destination directory"),
///         SwitchSpec::boolean('f', "Overwrite existing files"),
///     ],
///     |_args| 0,
/// )
/// .unwrap();
///
/// let tokens: Vec<String> = ["-d", "/tmp", "-f", "a.txt", "b.txt"]
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// let parsed = parse_switch_tokens(&tokens, &cmd).unwrap();
///
/// assert_eq!(parsed.value('d'), Some("/tmp"));
/// assert_eq!(parsed.value('f'), Some("true"));
/// assert_eq!(parsed.trailing(), ["a.txt", "b.txt"]);
/// ```
pub fn parse_switch_tokens(
    tokens: &[String],
    spec: &CommandSpec,
) -> Result<ParsedArguments, ParseError> {
    let mut parsed = ParsedArguments::default();

    let Some(first) = tokens.first() else {
        return Ok(parsed);
    };

    // Bare invocation shortcut: a first token without switch shape means the
    // whole line is trailing input.
    let mut state = if looks_like_switch(first) {
        State::Tag
    } else {
        State::Trailing
    };

    for token in tokens {
        // Explicit end-of-switches marker; the token itself is discarded.
        if token == TRAILING_MARKER {
            state = State::Trailing;
            continue;
        }

        // A switch-shaped token in value position starts a new tag read.
        if matches!(state, State::Value(_)) && looks_like_switch(token) {
            state = State::Tag;
        }

        // A long bare word after switches signals positional arguments.
        if state == State::Tag && token.chars().count() > 2 && !token.starts_with(SWITCH_PREFIX) {
            state = State::Trailing;
        }

        match state {
            State::Tag => {
                if !looks_like_switch(token) {
                    return Err(ParseError::MalformedSwitch(token.clone()));
                }
                let Some(tag) = token.chars().nth(1).map(|c| c.to_ascii_lowercase()) else {
                    return Err(ParseError::MalformedSwitch(token.clone()));
                };

                let Some(switch) = spec.switch(tag) else {
                    return Err(ParseError::UnknownSwitch(tag));
                };
                if parsed.contains(tag) {
                    return Err(ParseError::DuplicateSwitch(tag));
                }

                if switch.boolean {
                    parsed.set_flag(tag);
                } else {
                    parsed.set_pending(tag);
                    state = State::Value(tag);
                }
            }
            State::Value(tag) => {
                // Boolean switches never enter VALUE state; kept as a check
                // in case that invariant is ever broken upstream.
                if spec.switch(tag).is_some_and(|s| s.boolean) {
                    return Err(ParseError::UnexpectedValue(tag));
                }
                parsed.set_value(tag, token.clone());
                state = State::Tag;
            }
            State::Trailing => parsed.push_trailing(token.clone()),
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use console_dispatch_core::SwitchSpec;

    use super::*;

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts.iter().map(ToString::to_string).collect()
    }

    fn copy_command() -> CommandSpec {
        CommandSpec::new(
            "copy",
            "Copies files",
            vec![
                SwitchSpec::value('a', "First value").required(),
                SwitchSpec::value('b', "Second value"),
                SwitchSpec::boolean('f', "Force flag"),
            ],
            |_args| 0,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_input_parses_to_empty_arguments() {
        let parsed = parse_switch_tokens(&[], &copy_command()).unwrap();
        assert!(parsed.is_empty());
        assert!(parsed.trailing().is_empty());
    }

    #[test]
    fn test_bare_invocation_treats_everything_as_trailing() {
        let parsed = parse_switch_tokens(&tokens(&["file.txt", "-a", "1"]), &copy_command()).unwrap();
        assert!(parsed.is_empty());
        assert_eq!(parsed.trailing(), ["file.txt", "-a", "1"]);
    }

    #[test]
    fn test_switch_values_recorded() {
        let parsed = parse_switch_tokens(&tokens(&["-a", "3", "-b", "4"]), &copy_command()).unwrap();
        assert_eq!(parsed.value('a'), Some("3"));
        assert_eq!(parsed.value('b'), Some("4"));
        assert!(parsed.trailing().is_empty());
    }

    #[test]
    fn test_boolean_switch_does_not_consume_following_token() {
        let parsed = parse_switch_tokens(&tokens(&["-f", "bar"]), &copy_command()).unwrap();
        assert_eq!(parsed.value('f'), Some("true"));
        assert_eq!(parsed.trailing(), ["bar"]);
    }

    #[test]
    fn test_unknown_switch_rejected() {
        let err = parse_switch_tokens(&tokens(&["-x", "1"]), &copy_command()).unwrap_err();
        assert_eq!(err, ParseError::UnknownSwitch('x'));
    }

    #[test]
    fn test_duplicate_switch_rejected() {
        let err = parse_switch_tokens(&tokens(&["-a", "1", "-a", "2"]), &copy_command()).unwrap_err();
        assert_eq!(err, ParseError::DuplicateSwitch('a'));
    }

    #[test]
    fn test_malformed_switch_in_tag_position_rejected() {
        // "-long" stays in tag position (prefixed), where its shape fails.
        let err =
            parse_switch_tokens(&tokens(&["-a", "1", "-long"]), &copy_command()).unwrap_err();
        assert_eq!(err, ParseError::MalformedSwitch("-long".to_string()));
    }

    #[test]
    fn test_two_character_bare_token_in_tag_position_rejected() {
        let err = parse_switch_tokens(&tokens(&["-a", "1", "ab"]), &copy_command()).unwrap_err();
        assert_eq!(err, ParseError::MalformedSwitch("ab".to_string()));
    }

    #[test]
    fn test_double_dash_forces_trailing() {
        let parsed = parse_switch_tokens(&tokens(&["--", "-a"]), &copy_command()).unwrap();
        assert!(!parsed.contains('a'));
        assert_eq!(parsed.trailing(), ["-a"]);
    }

    #[test]
    fn test_double_dash_after_switches() {
        let parsed =
            parse_switch_tokens(&tokens(&["-a", "1", "--", "-b", "x"]), &copy_command()).unwrap();
        assert_eq!(parsed.value('a'), Some("1"));
        assert!(!parsed.contains('b'));
        assert_eq!(parsed.trailing(), ["-b", "x"]);
    }

    #[test]
    fn test_switch_shaped_token_in_value_position_starts_new_tag() {
        // -a never receives a value; -f is read as a fresh switch.
        let parsed = parse_switch_tokens(&tokens(&["-a", "-f"]), &copy_command()).unwrap();
        assert!(parsed.contains('a'));
        assert!(parsed.is_pending('a'));
        assert_eq!(parsed.value('f'), Some("true"));
    }

    #[test]
    fn test_unresolved_value_left_pending_at_end_of_input() {
        let parsed = parse_switch_tokens(&tokens(&["-a"]), &copy_command()).unwrap();
        assert!(parsed.contains('a'));
        assert!(parsed.is_pending('a'));
    }

    #[test]
    fn test_tags_matched_case_insensitively() {
        let parsed = parse_switch_tokens(&tokens(&["-A", "3"]), &copy_command()).unwrap();
        assert_eq!(parsed.value('a'), Some("3"));
    }

    #[test]
    fn test_long_bare_word_starts_trailing_arguments() {
        let parsed = parse_switch_tokens(
            &tokens(&["-a", "1", "file.txt", "other.txt"]),
            &copy_command(),
        )
        .unwrap();
        assert_eq!(parsed.value('a'), Some("1"));
        assert_eq!(parsed.trailing(), ["file.txt", "other.txt"]);
    }
}
