use thiserror::Error;

use crate::constant::MAX_STRING_SIZE;
use crate::model::{OptionType, OptionValue};

/// Errors raised while converting raw option text into a typed value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    /// The captured span is empty or does not fit the string capacity.
    #[error("captured span of '{text}' is empty or exceeds the string capacity.")]
    ValueTooLong {
        /// The offending raw text.
        text: String,
    },

    /// No terminator was found in the raw text (an unclosed double-quote).
    #[error("no terminator in '{text}'.")]
    NoTerminator {
        /// The offending raw text.
        text: String,
    },

    /// The raw text is not a decimal number of the expected kind.
    #[error("cannot convert '{text}' to a number.")]
    InvalidNumber {
        /// The offending raw text.
        text: String,
    },

    /// A value-taking option was matched without any raw text.
    #[error("option requires a value.")]
    MissingValue,

    /// Conversion was requested against the reserved no-type marker.
    #[error("the reserved no-type marker cannot carry a value.")]
    UnsupportedType,
}

/// Find the end of the captured span within `text`.
///
/// A bare span terminates at the first space, or end-of-string.
/// A span beginning with a double-quote instead terminates at the matching closing quote, and the
/// capture includes both quote characters verbatim.
/// Returns `None` when a leading quote is never closed.
fn find_string_end(text: &str) -> Option<usize> {
    match text.strip_prefix('"') {
        Some(rest) => rest.find('"').map(|at| at + 2),
        None => Some(text.find(' ').unwrap_or(text.len())),
    }
}

pub(crate) fn capture_string(text: &str) -> Result<String, ValueError> {
    let end = find_string_end(text).ok_or_else(|| ValueError::NoTerminator {
        text: text.to_string(),
    })?;

    if end == 0 || end >= MAX_STRING_SIZE {
        return Err(ValueError::ValueTooLong {
            text: text.to_string(),
        });
    }

    Ok(text[..end].to_string())
}

fn parse_int(text: &str) -> Result<i64, ValueError> {
    text.parse::<i64>().map_err(|_| ValueError::InvalidNumber {
        text: text.to_string(),
    })
}

fn parse_double(text: &str) -> Result<f64, ValueError> {
    text.parse::<f64>().map_err(|_| ValueError::InvalidNumber {
        text: text.to_string(),
    })
}

/// Convert `raw` into `target` per the target's active variant.
///
/// Flags consume no text; the configured `present` value is written through the shared cell
/// instead.
pub(crate) fn parse_into(target: &mut OptionValue, raw: Option<&str>) -> Result<(), ValueError> {
    match target {
        OptionValue::Str(value) => {
            let text = raw.ok_or(ValueError::MissingValue)?;
            *value = capture_string(text)?;
        }
        OptionValue::Int(value) => {
            let text = raw.ok_or(ValueError::MissingValue)?;
            *value = parse_int(text)?;
        }
        OptionValue::Double(value) => {
            let text = raw.ok_or(ValueError::MissingValue)?;
            *value = parse_double(text)?;
        }
        OptionValue::Flag { present, cell } => {
            cell.set(*present);
        }
    }

    Ok(())
}

/// Build a typed value from default text, for the structured registration path.
///
/// Flags carry no text (they are built from a `present` value and a cell), and the reserved
/// no-type marker is never convertible; both fail with [`ValueError::UnsupportedType`].
pub(crate) fn with_default(ty: OptionType, text: Option<&str>) -> Result<OptionValue, ValueError> {
    match ty {
        OptionType::Str => {
            let text = text.ok_or(ValueError::MissingValue)?;
            Ok(OptionValue::Str(capture_string(text)?))
        }
        OptionType::Int => {
            let text = text.ok_or(ValueError::MissingValue)?;
            Ok(OptionValue::Int(parse_int(text)?))
        }
        OptionType::Double => {
            let text = text.ok_or(ValueError::MissingValue)?;
            Ok(OptionValue::Double(parse_double(text)?))
        }
        OptionType::Flag | OptionType::None => Err(ValueError::UnsupportedType),
    }
}
