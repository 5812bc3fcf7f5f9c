use thiserror::Error;

/// One option's shape, as consulted by the scanner.
/// Built from the registry, one per option, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptSpec {
    pub(crate) name: String,
    pub(crate) short: char,
    pub(crate) takes_value: bool,
}

/// A recognized option occurrence.
/// Reports the alias regardless of whether the long or short form matched.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ScanMatch<'t> {
    pub(crate) short: char,
    pub(crate) value: Option<&'t str>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized option '{token}'.")]
pub(crate) struct Unrecognized {
    pub(crate) token: String,
}

/// Token-by-token option scanner over an argument vector.
///
/// This is an explicit state object built fresh for every parse pass, so the cursor can never
/// leak between passes.
/// Grammar: `--name value`, `--name=value`, `-x value`, `-xvalue`; flags take no value; `--` ends
/// option scanning; the first non-option token ends scanning and starts the remainder.
#[derive(Debug)]
pub(crate) struct Scanner<'t> {
    specs: Vec<OptSpec>,
    tokens: &'t [&'t str],
    cursor: usize,
}

impl<'t> Scanner<'t> {
    pub(crate) fn new(specs: Vec<OptSpec>, tokens: &'t [&'t str]) -> Self {
        Self {
            specs,
            tokens,
            cursor: 0,
        }
    }

    /// Advance to the next recognized option, or `Ok(None)` at end-of-options.
    pub(crate) fn next_match(&mut self) -> Result<Option<ScanMatch<'t>>, Unrecognized> {
        let Some(&token) = self.tokens.get(self.cursor) else {
            return Ok(None);
        };

        if token == "--" {
            // Conventional end-of-options marker; consumed, not part of the remainder.
            self.cursor += 1;
            return Ok(None);
        }

        if let Some(long) = token.strip_prefix("--") {
            self.cursor += 1;
            let (name, inline) = match long.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (long, None),
            };
            let spec = self
                .specs
                .iter()
                .find(|spec| spec.name == name)
                .ok_or_else(|| Unrecognized {
                    token: token.to_string(),
                })?;
            let spec_short = spec.short;
            let spec_takes_value = spec.takes_value;
            let value = if spec_takes_value {
                match inline {
                    Some(value) => Some(value),
                    None => self.take_next(),
                }
            } else {
                None
            };
            return Ok(Some(ScanMatch {
                short: spec_short,
                value,
            }));
        }

        if let Some(body) = token.strip_prefix('-') {
            if body.is_empty() {
                // A bare '-' is an operand.
                return Ok(None);
            }
            self.cursor += 1;
            let mut characters = body.chars();
            let short = match characters.next() {
                Some(c) => c,
                None => unreachable!("internal error - non-empty body must yield a character"),
            };
            let rest = characters.as_str();
            let spec = self
                .specs
                .iter()
                .find(|spec| spec.short == short)
                .ok_or_else(|| Unrecognized {
                    token: token.to_string(),
                })?;
            let spec_short = spec.short;
            let spec_takes_value = spec.takes_value;
            let value = if spec_takes_value {
                if rest.is_empty() {
                    self.take_next()
                } else {
                    Some(rest)
                }
            } else {
                if !rest.is_empty() {
                    // Grouped short switches are not part of the grammar.
                    return Err(Unrecognized {
                        token: token.to_string(),
                    });
                }
                None
            };
            return Ok(Some(ScanMatch {
                short: spec_short,
                value,
            }));
        }

        // An operand; scanning stops here.
        Ok(None)
    }

    /// The tokens left unconsumed after the last recognized option.
    pub(crate) fn remainder(&self) -> Vec<String> {
        self.tokens[self.cursor..]
            .iter()
            .map(|token| token.to_string())
            .collect()
    }

    fn take_next(&mut self) -> Option<&'t str> {
        let value = self.tokens.get(self.cursor).copied();
        if value.is_some() {
            self.cursor += 1;
        }
        value
    }
}
