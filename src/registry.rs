use std::cell::Cell;
use std::rc::Rc;

use thiserror::Error;

use crate::constant::{HELP_MESSAGE, HELP_NAME, MAX_ARGS};
use crate::model::{FlagCell, OptionType, OptionValue};
use crate::scanner::OptSpec;
use crate::value::{self, ValueError};

/// Errors raised while registering options.
/// These are recoverable; the registry stays usable and the candidate option is discarded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// An option with the same long name is already registered.
    #[error("option '{name}' is already registered.")]
    DuplicateName {
        /// The rejected long name.
        name: String,
    },

    /// The registry already holds [`MAX_ARGS`] options.
    #[error("registry is full.")]
    RegistryFull,

    /// The supplied default value did not convert.
    #[error("cannot use the default value: {0}")]
    BadDefault(#[from] ValueError),
}

/// One registered option: long name, derived single-character alias, description, typed value,
/// and the supplied-during-last-parse marker.
///
/// Definitions are owned exclusively by their [`Registry`] and live until it is dropped; there is
/// no individual removal.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDefinition {
    name: String,
    description: String,
    short: char,
    value: OptionValue,
    parsed: bool,
}

impl OptionDefinition {
    /// The long name, unique within the registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The derived single-character alias, unique within the registry.
    pub fn short(&self) -> char {
        self.short
    }

    /// The current typed value (the default until a parse pass supplies one).
    pub fn value(&self) -> &OptionValue {
        &self.value
    }

    /// Whether this option was supplied during the most recent parse pass.
    pub fn parsed(&self) -> bool {
        self.parsed
    }

    pub(crate) fn value_mut(&mut self) -> &mut OptionValue {
        &mut self.value
    }

    pub(crate) fn mark_parsed(&mut self) {
        self.parsed = true;
    }

    pub(crate) fn reset(&mut self) {
        self.parsed = false;
    }

    /// Mark a flag whose cell already holds its `present` value.
    /// Returns whether the marker was newly set.
    pub(crate) fn sweep_flag(&mut self) -> bool {
        if let OptionValue::Flag { present, cell } = &self.value {
            if cell.get() == *present && !self.parsed {
                self.parsed = true;
                return true;
            }
        }
        false
    }
}

/// An insertion-ordered collection of option definitions for one parsing session.
///
/// Order matters for usage rendering and alias derivation, not for lookup.
/// Re-registering the same options in a different order can change the derived aliases; this is a
/// documented property of the derivation, not a defect.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    title: String,
    options: Vec<OptionDefinition>,
    shortopts: String,
}

impl Registry {
    /// Create an empty registry with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            options: Vec::default(),
            shortopts: String::default(),
        }
    }

    /// The registry title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The derived short-option specification string.
    /// One character per alias, in registration order, with value-taking aliases marked by a
    /// trailing `:`.
    pub fn shortopts(&self) -> &str {
        &self.shortopts
    }

    /// The number of registered options.
    pub fn argument_count(&self) -> usize {
        self.options.len()
    }

    /// Look up an option by its long name.
    pub fn argument_by_name(&self, name: &str) -> Option<&OptionDefinition> {
        self.options.iter().find(|option| option.name == name)
    }

    /// Look up an option by its single-character alias.
    pub fn argument_by_short_name(&self, short: char) -> Option<&OptionDefinition> {
        self.options.iter().find(|option| option.short == short)
    }

    /// Register an integer option with a typed default.
    pub fn add_int(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        value: i64,
    ) -> Result<(), RegistryError> {
        self.put(name, description, OptionValue::Int(value))
    }

    /// Register a floating-point option with a typed default.
    pub fn add_double(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        value: f64,
    ) -> Result<(), RegistryError> {
        self.put(name, description, OptionValue::Double(value))
    }

    /// Register a string option.
    ///
    /// The default passes through the same terminator scan as live values: it terminates at the
    /// first space unless wrapped in double-quotes, and must fit the string capacity.
    pub fn add_str(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        value: &str,
    ) -> Result<(), RegistryError> {
        let captured = value::capture_string(value)?;
        self.put(name, description, OptionValue::Str(captured))
    }

    /// Register a presence switch.
    ///
    /// When the switch appears on the command line, `present` is written through `cell`.
    /// Passing `None` lets the registry own the cell (initialized to `0`); retrieve it via
    /// [`OptionValue::flag_cell`].
    pub fn add_flag(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        present: i64,
        cell: Option<FlagCell>,
    ) -> Result<(), RegistryError> {
        let cell = cell.unwrap_or_else(|| Rc::new(Cell::new(0)));
        self.put(name, description, OptionValue::Flag { present, cell })
    }

    /// Register the reserved `help` option.
    ///
    /// When matched during a parse pass, the pass stops with
    /// [`ParseError::HelpRequested`](crate::ParseError::HelpRequested).
    pub fn add_help(&mut self) -> Result<(), RegistryError> {
        self.add_flag(HELP_NAME, HELP_MESSAGE, 1, None)
    }

    /// Register an option in the structured format: an [`OptionType`] plus default text.
    ///
    /// This is the form behind the typed helpers; it smells internal, but it carries enough test
    /// weight to stay public.
    /// Flags cannot be expressed as text (use [`Registry::add_flag`]), and the reserved no-type
    /// marker is rejected; both fail with [`ValueError::UnsupportedType`] wrapped in
    /// [`RegistryError::BadDefault`].
    pub fn add_text(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        ty: OptionType,
        default: &str,
    ) -> Result<(), RegistryError> {
        let value = value::with_default(ty, Some(default))?;
        self.put(name, description, value)
    }

    fn put(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        value: OptionValue,
    ) -> Result<(), RegistryError> {
        let name = name.into();

        if self.options.iter().any(|option| option.name == name) {
            return Err(RegistryError::DuplicateName { name });
        }

        if self.options.len() >= MAX_ARGS {
            return Err(RegistryError::RegistryFull);
        }

        let short = self.generate_short_name(&name, value.option_type());
        self.options.push(OptionDefinition {
            name,
            description: description.into(),
            short,
            value,
            parsed: false,
        });
        Ok(())
    }

    /// Derive and record the alias for a new option.
    ///
    /// The first character of the long name not already claimed as an alias wins; when every
    /// character is claimed, the first unclaimed character counting up from `'a'` wins instead.
    /// Deterministic given registration order.
    fn generate_short_name(&mut self, name: &str, ty: OptionType) -> char {
        let taken = |c: char| self.options.iter().any(|option| option.short == c);

        let short = match name.chars().find(|&c| !taken(c)) {
            Some(c) => c,
            None => {
                let mut c = b'a' as char;
                while taken(c) {
                    c = (c as u8 + 1) as char;
                }
                c
            }
        };

        self.shortopts.push(short);
        if ty.takes_value() {
            self.shortopts.push(':');
        }
        short
    }

    pub(crate) fn options(&self) -> &[OptionDefinition] {
        &self.options
    }

    pub(crate) fn definition_by_short_mut(&mut self, short: char) -> Option<&mut OptionDefinition> {
        self.options.iter_mut().find(|option| option.short == short)
    }

    pub(crate) fn reset_parsed(&mut self) {
        for option in &mut self.options {
            option.reset();
        }
    }

    pub(crate) fn sweep_flags(&mut self) -> usize {
        self.options
            .iter_mut()
            .map(|option| option.sweep_flag())
            .filter(|swept| *swept)
            .count()
    }

    pub(crate) fn option_specs(&self) -> Vec<OptSpec> {
        self.options
            .iter()
            .map(|option| OptSpec {
                name: option.name.clone(),
                short: option.short,
                takes_value: option.value.option_type().takes_value(),
            })
            .collect()
    }
}
