use std::cell::Cell;
use std::rc::Rc;

/// Shared mutable storage for a flag option.
///
/// When the flag is present on the command line, its configured `present` value is written
/// through this cell.
/// Callers may hand their own cell to [`Registry::add_flag`](crate::Registry::add_flag) and keep a
/// clone of it, observing the write-through without going back to the registry.
pub type FlagCell = Rc<Cell<i64>>;

/// The type of a registered option, which selects the active [`OptionValue`] variant and the
/// value-consumption rule during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    /// Reserved illegal/uninitialized sentinel.
    /// Never assigned to a live option; conversion against it fails with
    /// [`ValueError::UnsupportedType`](crate::ValueError::UnsupportedType).
    None,
    /// Text, bounded by [`MAX_STRING_SIZE`](crate::MAX_STRING_SIZE).
    Str,
    /// Decimal integer.
    Int,
    /// Decimal floating-point.
    Double,
    /// Presence switch writing through a [`FlagCell`]; consumes no value token.
    Flag,
}

impl OptionType {
    /// Whether an option of this type consumes a following value token.
    pub fn takes_value(&self) -> bool {
        matches!(self, OptionType::Str | OptionType::Int | OptionType::Double)
    }

    pub(crate) fn tag(&self) -> &'static str {
        match self {
            OptionType::None => "none",
            OptionType::Str => "str",
            OptionType::Int => "int",
            OptionType::Double => "dbl",
            OptionType::Flag => "flag",
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// The typed value of a registered option.
///
/// Exactly one variant is active per option, selected at registration; parsing never changes the
/// variant, only the payload.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Captured text; length is always less than [`MAX_STRING_SIZE`](crate::MAX_STRING_SIZE).
    Str(String),
    /// Integer payload.
    Int(i64),
    /// Floating-point payload.
    Double(f64),
    /// Flag state.
    Flag {
        /// The value written through `cell` when the switch is present.
        present: i64,
        /// The shared storage the switch writes through.
        cell: FlagCell,
    },
}

impl OptionValue {
    /// The [`OptionType`] keying this variant.
    pub fn option_type(&self) -> OptionType {
        match self {
            OptionValue::Str(_) => OptionType::Str,
            OptionValue::Int(_) => OptionType::Int,
            OptionValue::Double(_) => OptionType::Double,
            OptionValue::Flag { .. } => OptionType::Flag,
        }
    }

    /// The integer payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The floating-point payload, if this is a `Double`.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            OptionValue::Double(value) => Some(*value),
            _ => None,
        }
    }

    /// The text payload, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// The current contents of the flag cell, if this is a `Flag`.
    pub fn flag_state(&self) -> Option<i64> {
        match self {
            OptionValue::Flag { cell, .. } => Some(cell.get()),
            _ => None,
        }
    }

    /// A clone of the shared flag cell, if this is a `Flag`.
    pub fn flag_cell(&self) -> Option<FlagCell> {
        match self {
            OptionValue::Flag { cell, .. } => Some(Rc::clone(cell)),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Str(value) => write!(f, "{value}"),
            OptionValue::Int(value) => write!(f, "{value}"),
            OptionValue::Double(value) => write!(f, "{value}"),
            OptionValue::Flag { cell, .. } => write!(f, "{}", cell.get()),
        }
    }
}
