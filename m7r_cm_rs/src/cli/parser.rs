//! Argument parser: raw tokens + catalog -> [`ParsedCall`].
//!
//! Order of business:
//! 1. leading global options (`m7r-cm -p root build`)
//! 2. longest registered command path
//! 3. options of the active scope (global + command-specific) and positionals
//! 4. arity check (skipped when `--help` is present)
//!
//! Every failure is an [`UnrecognizedArgumentError`] pointing at the token
//! that caused it. Parsing has no side effects.

use strsim::levenshtein;

use super::call::{OptionValues, ParsedCall};
use super::command::{CommandDefinition, OptionDefinition, Options, Parameters, PathMatch};
use super::definition::{Cli, OPTION_HELP};
use super::error::{UnrecognizedArgumentError, call_string};

/// Scope an option was found in.
#[derive(Clone, Copy)]
enum Scope {
    Global,
    Specific,
}

struct Parser<'a> {
    cli: &'a Cli,
    args: &'a [String],
    pos: usize,
    global: OptionValues,
    specific: OptionValues,
}

pub(super) fn parse(cli: &Cli, args: &[String]) -> Result<ParsedCall, UnrecognizedArgumentError> {
    let mut parser = Parser {
        cli,
        args,
        pos: 0,
        global: OptionValues::default(),
        specific: OptionValues::default(),
    };

    let no_specific = Options::new();
    let no_parameters = Parameters::None;

    // 1. Leading global options
    while parser.pos < args.len() && is_option_token(&args[parser.pos]) {
        parser.consume_option(&no_specific)?;
    }

    // 2. Command path
    let command = parser.match_command()?;
    let specific_scope = command.map_or(&no_specific, CommandDefinition::specific_options);

    // 3. Options and positionals
    let mut parameters: Vec<String> = Vec::new();
    let mut parameter_positions: Vec<usize> = Vec::new();
    let mut options_done = false;
    while parser.pos < args.len() {
        let token = &args[parser.pos];
        if !options_done && token == "--" {
            options_done = true;
            parser.pos += 1;
        } else if !options_done && is_option_token(token) {
            parser.consume_option(specific_scope)?;
        } else {
            parameters.push(token.clone());
            parameter_positions.push(parser.pos);
            parser.pos += 1;
        }
    }

    // 4. Arity
    if !parser.global.has_option(OPTION_HELP) {
        let rule = command.map_or(&no_parameters, CommandDefinition::parameters);
        if let Err(message) = rule.check(parameters.len()) {
            let index = rule
                .surplus_index(parameters.len())
                .and_then(|i| parameter_positions.get(i).copied())
                .unwrap_or(args.len());
            return Err(parser.error_at(index, message));
        }
    }

    let command_path = command.map(|c| c.path().to_vec()).unwrap_or_default();
    Ok(ParsedCall::new(
        cli.description().executable_name().to_string(),
        command_path,
        parser.global,
        parser.specific,
        parameters,
        call_string(cli.description().executable_name(), args),
    ))
}

impl<'a> Parser<'a> {
    fn error_at(&self, index: usize, message: impl Into<String>) -> UnrecognizedArgumentError {
        UnrecognizedArgumentError::at_token(
            self.cli.description().executable_name(),
            self.args,
            index,
            message,
        )
    }

    /// Match the longest command path starting at the current position.
    fn match_command(&mut self) -> Result<Option<&'a CommandDefinition>, UnrecognizedArgumentError> {
        let cli = self.cli;
        let commands = cli.commands();
        let args = self.args;
        let start = self.pos;
        let end = args[start..]
            .iter()
            .position(|t| t == "--" || is_option_token(t))
            .map_or(args.len(), |offset| start + offset);

        match commands.match_path(&args[start..end]) {
            PathMatch::Command { index, consumed } => {
                self.pos += consumed;
                Ok(commands.get(index))
            }
            PathMatch::Default if start < end => {
                let unknown = &args[start];
                let hint = suggest_similar_command(unknown, commands.first_tokens())
                    .map(|s| format!(" Did you mean '{s}'?"))
                    .unwrap_or_default();
                Err(self.error_at(start, format!("Unknown command '{unknown}'.{hint}")))
            }
            PathMatch::Default => {
                if commands.default_command().is_none() {
                    return Err(self.error_at(start, "Command expected."));
                }
                Ok(None)
            }
            PathMatch::Incomplete { consumed, expected } => {
                let matched = args[start..start + consumed].join(" ");
                Err(self.error_at(
                    start + consumed,
                    format!(
                        "Incomplete command '{matched}'. Expected one of: {}.",
                        expected.join(", ")
                    ),
                ))
            }
        }
    }

    /// Consume one option token (and its argument, if it takes one).
    fn consume_option(&mut self, specific: &Options) -> Result<(), UnrecognizedArgumentError> {
        let args = self.args;
        let index = self.pos;
        let token = &args[index];
        let (flag, inline_value) = split_inline_value(token);

        let Some((definition, scope)) = self.lookup(flag, specific) else {
            return Err(self.error_at(index, format!("Unknown option '{flag}'.")));
        };

        let value = match (definition.argument_name(), inline_value) {
            (Some(_), Some(value)) => {
                self.pos += 1;
                Some(value.to_string())
            }
            (Some(argument), None) => match args.get(index + 1) {
                Some(value) => {
                    self.pos += 2;
                    Some(value.clone())
                }
                None => {
                    return Err(self.error_at(
                        index + 1,
                        format!("Option '{flag}' requires an argument <{argument}>."),
                    ));
                }
            },
            (None, Some(_)) => {
                return Err(self.error_at(index, format!("Option '{flag}' takes no argument.")));
            }
            (None, None) => {
                self.pos += 1;
                None
            }
        };

        match scope {
            Scope::Global => self.global.insert(definition.id(), value),
            Scope::Specific => self.specific.insert(definition.id(), value),
        }
        Ok(())
    }

    fn lookup<'o>(&self, flag: &str, specific: &'o Options) -> Option<(&'o OptionDefinition, Scope)>
    where
        'a: 'o,
    {
        let cli = self.cli;
        cli.global_options()
            .find_by_token(flag)
            .map(|d| (d, Scope::Global))
            .or_else(|| specific.find_by_token(flag).map(|d| (d, Scope::Specific)))
    }
}

/// `-x`, `--name`, `--name=value`; a lone `-` and `--` are not options.
fn is_option_token(token: &str) -> bool {
    token.starts_with('-') && token != "-" && token != "--"
}

/// Split `--name=value` into flag and inline value.
fn split_inline_value(token: &str) -> (&str, Option<&str>) {
    if !token.starts_with("--") {
        return (token, None);
    }
    match token.split_once('=') {
        Some((flag, value)) => (flag, Some(value)),
        None => (token, None),
    }
}

/// Suggest a similar command word using Levenshtein distance (max 2).
fn suggest_similar_command<'c>(
    input: &str,
    candidates: impl Iterator<Item = &'c str>,
) -> Option<&'c str> {
    let input_lower = input.to_lowercase();
    let mut best_match: Option<(&str, usize)> = None;

    for candidate in candidates {
        let distance = levenshtein(&input_lower, candidate);
        if distance <= 2 && best_match.is_none_or(|(_, best)| distance < best) {
            best_match = Some((candidate, distance));
        }
    }

    best_match.map(|(cmd, _)| cmd)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::catalog::{
        OPTION_CONTENT_ROOT, OPTION_MEDIA_ABSOLUTE, OPTION_MEDIA_ORPHANED, OPTION_STACKTRACE,
        OPTION_VERBOSE, create_cli,
    };

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn parse_ok(raw: &[&str]) -> ParsedCall {
        let cli = create_cli().expect("catalog");
        cli.parse(&args(raw)).expect("valid call")
    }

    fn parse_err(raw: &[&str]) -> UnrecognizedArgumentError {
        let cli = create_cli().expect("catalog");
        cli.parse(&args(raw)).expect_err("invalid call")
    }

    #[test]
    fn test_default_command() {
        let call = parse_ok(&[]);
        assert!(call.is_default_command());
        assert!(call.parameters().is_empty());

        let call = parse_ok(&["--verbose"]);
        assert!(call.is_default_command());
        assert!(call.global_options().has_option(OPTION_VERBOSE));
    }

    #[test]
    fn test_build_with_programs() {
        let call = parse_ok(&["build", "p01", "p02"]);
        assert_eq!(call.command_path(), ["build"]);
        assert_eq!(call.parameters(), ["p01", "p02"]);
    }

    #[test]
    fn test_two_token_command_and_specific_options() {
        let call = parse_ok(&["media", "ls", "-a", "--orphaned", "p01"]);
        assert_eq!(call.command_path(), ["media", "ls"]);
        assert!(call.specific_options().has_option(OPTION_MEDIA_ABSOLUTE));
        assert!(call.specific_options().has_option(OPTION_MEDIA_ORPHANED));
        assert!(!call.global_options().has_option(OPTION_MEDIA_ABSOLUTE));
        assert_eq!(call.parameters(), ["p01"]);
    }

    #[test]
    fn test_global_options_before_and_after_command() {
        let call = parse_ok(&["-p", "/content", "build", "--stacktrace"]);
        assert_eq!(
            call.global_options().value(OPTION_CONTENT_ROOT),
            Some("/content")
        );
        assert!(call.global_options().has_option(OPTION_STACKTRACE));

        let call = parse_ok(&["build", "--content-root=/elsewhere"]);
        assert_eq!(
            call.global_options().value(OPTION_CONTENT_ROOT),
            Some("/elsewhere")
        );
    }

    #[test]
    fn test_check_requires_exactly_one_parameter() {
        let call = parse_ok(&["check", "p01_m01_intro"]);
        assert_eq!(call.parameters(), ["p01_m01_intro"]);

        let err = parse_err(&["check"]);
        assert!(err.message().contains("exactly one <content-id>"));
        assert_eq!(err.column(), err.call_string().len());

        let err = parse_err(&["check", "a", "b"]);
        assert!(err.message().contains("exactly one"));
        assert_eq!(err.call_string(), "m7r-cm check a b");
        assert_eq!(err.column(), 15);
    }

    #[test]
    fn test_unknown_option_pointer() {
        let err = parse_err(&["build", "p01", "--bogus"]);
        assert_eq!(err.executable_name(), "m7r-cm");
        assert_eq!(err.message(), "Unknown option '--bogus'.");
        assert_eq!(
            err.column(),
            err.call_string().find("--bogus").expect("token present")
        );
        assert!(err.call_pointer_string().ends_with('^'));
    }

    #[test]
    fn test_specific_option_not_valid_for_other_command() {
        let err = parse_err(&["build", "-a"]);
        assert_eq!(err.message(), "Unknown option '-a'.");
    }

    #[test]
    fn test_specific_option_before_command_is_unknown() {
        let err = parse_err(&["--orphaned", "media", "ls"]);
        assert_eq!(err.column(), 7);
    }

    #[test]
    fn test_unknown_command_with_suggestion() {
        let err = parse_err(&["bulid"]);
        assert_eq!(err.message(), "Unknown command 'bulid'. Did you mean 'build'?");
        assert_eq!(err.column(), 7);

        let err = parse_err(&["frobnicate"]);
        assert_eq!(err.message(), "Unknown command 'frobnicate'.");
    }

    #[test]
    fn test_incomplete_command() {
        let err = parse_err(&["media"]);
        assert_eq!(
            err.message(),
            "Incomplete command 'media'. Expected one of: ls, prune."
        );
        assert_eq!(err.column(), err.call_string().len());

        let err = parse_err(&["media", "rm"]);
        assert_eq!(err.column(), err.call_string().find("rm").unwrap_or(0));
    }

    #[test]
    fn test_missing_option_argument() {
        let err = parse_err(&["build", "-p"]);
        assert_eq!(
            err.message(),
            "Option '-p' requires an argument <path>."
        );
        assert_eq!(err.column(), err.call_string().len());
    }

    #[test]
    fn test_flag_with_inline_value_rejected() {
        let err = parse_err(&["build", "--verbose=yes"]);
        assert_eq!(err.message(), "Option '--verbose' takes no argument.");
    }

    #[test]
    fn test_double_dash_ends_options() {
        let call = parse_ok(&["build", "--", "--weird-program"]);
        assert_eq!(call.parameters(), ["--weird-program"]);
    }

    #[test]
    fn test_default_command_takes_no_parameters() {
        let err = parse_err(&["--", "stray"]);
        assert_eq!(err.message(), "No parameters expected.");
        assert_eq!(err.column(), err.call_string().find("stray").unwrap_or(0));
    }

    #[test]
    fn test_help_skips_arity() {
        let call = parse_ok(&["check", "--help"]);
        assert!(call.global_options().has_option(OPTION_HELP));
        assert!(call.parameters().is_empty());
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let raw = ["media", "ls", "-o", "p01"];
        assert_eq!(parse_ok(&raw), parse_ok(&raw));
        let bad = ["media", "ls", "-x"];
        assert_eq!(parse_err(&bad), parse_err(&bad));
    }

    #[test]
    fn test_suggest_similar_command() {
        let words = ["build", "check", "clean", "media", "show"];
        assert_eq!(
            suggest_similar_command("chek", words.iter().copied()),
            Some("check")
        );
        assert_eq!(
            suggest_similar_command("MEDIA", words.iter().copied()),
            Some("media")
        );
        assert_eq!(suggest_similar_command("zzzzzz", words.iter().copied()), None);
    }
}
