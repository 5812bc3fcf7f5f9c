/// Split a command-line buffer into whitespace-separated tokens.
///
/// A plain whitespace split with no quote handling; a quoted span containing spaces arrives as
/// multiple tokens.
/// Useful for driving [`Registry::parse_tokens`](crate::Registry::parse_tokens) from a single
/// string, typically in tests or interactive shells.
pub fn tokenize(buffer: &str) -> Vec<String> {
    buffer
        .split_whitespace()
        .map(|token| token.to_string())
        .collect()
}
