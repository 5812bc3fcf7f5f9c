//! `argsparse` is a small command line argument registry and parser.
//!
//! Programs register long-named options with typed default values; `argsparse` derives a unique
//! single-character alias for each one, scans the argument vector for `--name value`,
//! `--name=value`, `-x value`, and `-xvalue` forms, and renders a usage banner built from the
//! registrations.
//! It deliberately stays small: options only (no positional arguments), no sub-commands, and no
//! derive layer.
//!
//! # Usage
//! ```
//! use argsparse::Registry;
//!
//! let mut registry = Registry::new("Testing version 1.0 - Arguments");
//! registry.add_int("integer", "This is an integer", 1234)?;
//! registry.add_str("string", "This is a string", "defvalue")?;
//! registry.add_flag("verbose", "Enable verbose output", 1, None)?;
//! registry.add_help()?;
//!
//! let outcome = registry
//!     .parse_tokens(&["prog", "--integer", "4321", "-v"])
//!     .map_err(|error| format!("{error}"))?;
//!
//! assert_eq!(outcome.supplied, 2);
//! let integer = registry.argument_by_name("integer").unwrap();
//! assert!(integer.parsed());
//! assert_eq!(integer.value().as_int(), Some(4321));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! In a real program, use [`Registry::parse`] instead of [`Registry::parse_tokens`]; it reads the
//! process argument vector and handles `--help` and unrecognized options by printing the usage
//! banner and exiting.
#![deny(missing_docs)]
mod constant;
mod model;
mod parser;
mod registry;
mod scanner;
mod tokens;
mod usage;
mod value;

pub use constant::{MAX_ARGS, MAX_STRING_SIZE};
pub use model::{FlagCell, OptionType, OptionValue};
pub use parser::{ParseError, ParseOutcome};
pub use registry::{OptionDefinition, Registry, RegistryError};
pub use tokens::tokenize;
pub use value::ValueError;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
