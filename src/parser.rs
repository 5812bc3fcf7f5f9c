use std::env;

use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::constant::HELP_NAME;
use crate::registry::Registry;
use crate::scanner::{ScanMatch, Scanner};
use crate::value;

/// Conditions that stop a parse pass before completion.
///
/// Neither touches the process; the caller decides whether to render usage and exit
/// ([`Registry::parse`] does exactly that).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The reserved `help` option was matched.
    #[error("help requested.")]
    HelpRequested,

    /// A token in option position did not match any registered option.
    #[error("unrecognized option '{token}'.")]
    UnrecognizedOption {
        /// The offending token, verbatim.
        token: String,
    },
}

/// The result of a completed parse pass.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseOutcome {
    /// How many options were supplied with a usable value.
    pub supplied: usize,
    /// Tokens left over after the last recognized option.
    /// Not an error; surface, inspect, or ignore them in the calling layer.
    pub remainder: Vec<String>,
}

impl Registry {
    /// Parse an argument vector against the registered options.
    ///
    /// `tokens[0]` is the program invocation path (skipped; it only matters for usage rendering)
    /// and `tokens[1..]` are the option tokens.
    /// Every pass starts fresh: supplied markers are cleared and the scan cursor is local to the
    /// call, so repeated passes against the same or different registries never interfere.
    ///
    /// Value conversion failures are swallowed: the option keeps whatever the conversion left
    /// behind and is not counted as supplied (best effort, no rollback).
    /// Callers needing strict validation should re-check
    /// [`parsed`](crate::OptionDefinition::parsed) markers afterwards.
    pub fn parse_tokens(&mut self, tokens: &[&str]) -> Result<ParseOutcome, ParseError> {
        self.reset_parsed();

        let specs = self.option_specs();
        let arguments = tokens.get(1..).unwrap_or_default();
        let mut scanner = Scanner::new(specs, arguments);
        let mut supplied = 0;

        loop {
            let item = scanner
                .next_match()
                .map_err(|error| ParseError::UnrecognizedOption { token: error.token })?;
            let Some(ScanMatch { short, value }) = item else {
                break;
            };

            let definition = match self.definition_by_short_mut(short) {
                Some(definition) => definition,
                None => unreachable!(
                    "internal error - scanner matched alias '{short}' with no backing definition"
                ),
            };

            if definition.name() == HELP_NAME {
                return Err(ParseError::HelpRequested);
            }

            match value::parse_into(definition.value_mut(), value) {
                Ok(()) => {
                    definition.mark_parsed();
                    supplied += 1;
                }
                Err(_error) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Skipping '{name}': {_error}.", name = definition.name());
                    }
                }
            }
        }

        // Flags whose cells were written outside the scan still count as supplied.
        supplied += self.sweep_flags();

        Ok(ParseOutcome {
            supplied,
            remainder: scanner.remainder(),
        })
    }

    /// Parse the process argument vector ([`env::args`]).
    ///
    /// Prints the usage banner and exits `0` when help is requested; prints the error followed by
    /// the usage banner and exits `1` on an unrecognized option.
    /// Returns the supplied-option count otherwise.
    pub fn parse(&mut self) -> usize {
        let arguments: Vec<String> = env::args().collect();
        let tokens: Vec<&str> = arguments.iter().map(AsRef::as_ref).collect();
        let program = tokens.first().copied().unwrap_or_default();

        match self.parse_tokens(tokens.as_slice()) {
            Ok(outcome) => outcome.supplied,
            Err(ParseError::HelpRequested) => {
                self.show_usage(program);
                std::process::exit(0);
            }
            Err(error) => {
                eprintln!("{error}");
                self.show_usage(program);
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlagCell;
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    #[rstest]
    #[case(vec!["prog", "--integer", "4321"])]
    #[case(vec!["prog", "--integer=4321"])]
    #[case(vec!["prog", "-i", "4321"])]
    #[case(vec!["prog", "-i4321"])]
    fn parse_int_forms(#[case] tokens: Vec<&str>) {
        let mut registry = Registry::new("");
        registry.add_int("integer", "This is an integer", 1234).unwrap();

        let outcome = registry.parse_tokens(tokens.as_slice()).unwrap();

        assert_eq!(outcome.supplied, 1);
        assert!(outcome.remainder.is_empty());
        let argument = registry.argument_by_name("integer").unwrap();
        assert!(argument.parsed());
        assert_eq!(argument.value().as_int(), Some(4321));
    }

    #[rstest]
    #[case(vec!["prog", "--double", "4321.1234"])]
    #[case(vec!["prog", "--double=4321.1234"])]
    #[case(vec!["prog", "-d", "4321.1234"])]
    fn parse_double_forms(#[case] tokens: Vec<&str>) {
        let mut registry = Registry::new("");
        registry.add_double("double", "This is a double", 1234.4321).unwrap();

        let outcome = registry.parse_tokens(tokens.as_slice()).unwrap();

        assert_eq!(outcome.supplied, 1);
        let argument = registry.argument_by_name("double").unwrap();
        assert!(argument.parsed());
        assert_eq!(argument.value().as_double(), Some(4321.1234));
    }

    #[rstest]
    #[case(vec!["prog", "--string", "4321.1234"])]
    #[case(vec!["prog", "--string=4321.1234"])]
    #[case(vec!["prog", "-s", "4321.1234"])]
    fn parse_string_forms(#[case] tokens: Vec<&str>) {
        let mut registry = Registry::new("");
        registry.add_str("string", "This is a string", "1234.4321").unwrap();

        let outcome = registry.parse_tokens(tokens.as_slice()).unwrap();

        assert_eq!(outcome.supplied, 1);
        let argument = registry.argument_by_name("string").unwrap();
        assert!(argument.parsed());
        assert_eq!(argument.value().as_str(), Some("4321.1234"));
    }

    #[test]
    fn parse_string_splits_at_whitespace() {
        let mut registry = Registry::new("");
        registry.add_str("string", "", "1234.4321").unwrap();

        // One token carrying an unquoted space terminates at the space.
        let outcome = registry
            .parse_tokens(&["prog", "--string", "4321 1234"])
            .unwrap();

        assert_eq!(outcome.supplied, 1);
        assert_eq!(
            registry.argument_by_name("string").unwrap().value().as_str(),
            Some("4321")
        );
    }

    #[test]
    fn parse_string_quoted_whitespace() {
        let mut registry = Registry::new("");
        registry.add_str("string", "", "1234.4321").unwrap();

        let outcome = registry
            .parse_tokens(&["prog", "--string", "\"4321 1234\""])
            .unwrap();

        assert_eq!(outcome.supplied, 1);
        // The capture keeps both quote characters verbatim.
        assert_eq!(
            registry.argument_by_name("string").unwrap().value().as_str(),
            Some("\"4321 1234\"")
        );
    }

    #[test]
    fn parse_flag_writes_cell() {
        let cell: FlagCell = Rc::new(Cell::new(0));
        let mut registry = Registry::new("");
        registry
            .add_flag("flag", "This is a flag", 1234, Some(Rc::clone(&cell)))
            .unwrap();

        let outcome = registry.parse_tokens(&["prog", "--flag"]).unwrap();

        assert_eq!(outcome.supplied, 1);
        assert!(registry.argument_by_name("flag").unwrap().parsed());
        assert_eq!(cell.get(), 1234);
    }

    #[test]
    fn parse_all_types() {
        let cell: FlagCell = Rc::new(Cell::new(0));
        let mut registry = Registry::new("");
        registry
            .add_str("string", "", "This is the initial value")
            .unwrap();
        registry.add_double("double", "", 1234.1234).unwrap();
        registry
            .add_flag("flag", "", 1234, Some(Rc::clone(&cell)))
            .unwrap();
        registry.add_int("integer", "", 1234).unwrap();

        let outcome = registry
            .parse_tokens(&[
                "prog",
                "--string",
                "new_value",
                "--double",
                "4321.4321",
                "--flag",
                "--integer",
                "4321",
            ])
            .unwrap();

        assert_eq!(outcome.supplied, 4);
        assert_eq!(
            registry.argument_by_name("string").unwrap().value().as_str(),
            Some("new_value")
        );
        assert_eq!(
            registry
                .argument_by_name("double")
                .unwrap()
                .value()
                .as_double(),
            Some(4321.4321)
        );
        assert_eq!(
            registry.argument_by_name("integer").unwrap().value().as_int(),
            Some(4321)
        );
        assert_eq!(cell.get(), 1234);
    }

    #[test]
    fn malformed_value_swallowed() {
        let mut registry = Registry::new("");
        registry.add_int("integer", "", 1234).unwrap();

        let outcome = registry
            .parse_tokens(&["prog", "--integer", "not-a-number"])
            .unwrap();

        // Best effort: the option is simply not supplied.
        assert_eq!(outcome.supplied, 0);
        let argument = registry.argument_by_name("integer").unwrap();
        assert!(!argument.parsed());
        assert_eq!(argument.value().as_int(), Some(1234));
    }

    #[test]
    fn missing_value_swallowed() {
        let mut registry = Registry::new("");
        registry.add_int("integer", "", 1234).unwrap();

        let outcome = registry.parse_tokens(&["prog", "--integer"]).unwrap();

        assert_eq!(outcome.supplied, 0);
        assert!(!registry.argument_by_name("integer").unwrap().parsed());
    }

    #[rstest]
    #[case(vec!["prog", "--help"])]
    #[case(vec!["prog", "-h"])]
    fn help_requested(#[case] tokens: Vec<&str>) {
        let mut registry = Registry::new("");
        registry.add_int("integer", "", 0).unwrap();
        registry.add_help().unwrap();

        assert_eq!(
            registry.parse_tokens(tokens.as_slice()),
            Err(ParseError::HelpRequested)
        );
    }

    #[rstest]
    #[case(vec!["prog", "--unknown"], "--unknown")]
    #[case(vec!["prog", "-z"], "-z")]
    fn unrecognized_option(#[case] tokens: Vec<&str>, #[case] offending: &str) {
        let mut registry = Registry::new("");
        registry.add_int("integer", "", 0).unwrap();

        assert_eq!(
            registry.parse_tokens(tokens.as_slice()),
            Err(ParseError::UnrecognizedOption {
                token: offending.to_string(),
            })
        );
    }

    #[test]
    fn remainder_surfaced() {
        let mut registry = Registry::new("");
        registry.add_int("integer", "", 0).unwrap();

        let outcome = registry
            .parse_tokens(&["prog", "--integer", "1", "left", "over"])
            .unwrap();

        assert_eq!(outcome.supplied, 1);
        assert_eq!(
            outcome.remainder,
            vec!["left".to_string(), "over".to_string()]
        );
    }

    #[test]
    fn preset_cell_swept_as_supplied() {
        let cell: FlagCell = Rc::new(Cell::new(1234));
        let mut registry = Registry::new("");
        registry
            .add_flag("flag", "", 1234, Some(Rc::clone(&cell)))
            .unwrap();

        // The flag never appears on the command line, yet its cell already holds the
        // present value.
        let outcome = registry.parse_tokens(&["prog"]).unwrap();

        assert_eq!(outcome.supplied, 1);
        assert!(registry.argument_by_name("flag").unwrap().parsed());
    }

    #[test]
    fn markers_reset_between_passes() {
        let mut registry = Registry::new("");
        registry.add_int("integer", "", 0).unwrap();
        registry.add_str("string", "", "value").unwrap();

        registry
            .parse_tokens(&["prog", "--integer", "1", "--string", "x"])
            .unwrap();
        assert!(registry.argument_by_name("string").unwrap().parsed());

        let outcome = registry.parse_tokens(&["prog", "--integer", "2"]).unwrap();

        assert_eq!(outcome.supplied, 1);
        assert!(registry.argument_by_name("integer").unwrap().parsed());
        assert!(!registry.argument_by_name("string").unwrap().parsed());
        // The earlier pass's value survives as the new default.
        assert_eq!(
            registry.argument_by_name("string").unwrap().value().as_str(),
            Some("x")
        );
    }

    #[test]
    fn empty_vector() {
        let mut registry = Registry::new("");
        registry.add_int("integer", "", 0).unwrap();

        let outcome = registry.parse_tokens(&[]).unwrap();

        assert_eq!(outcome.supplied, 0);
        assert!(outcome.remainder.is_empty());
    }
}
