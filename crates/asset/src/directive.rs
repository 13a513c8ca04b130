//! Shared plumbing for the line/directive text formats.

/// Drop everything from the first `#` on.
pub(crate) fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(head, _)| head)
}

/// Split a trimmed line into its directive tag and the rest of the line.
pub(crate) fn split_directive(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((tag, rest)) => (tag, rest.trim()),
        None => (line, ""),
    }
}

/// Parse all whitespace-separated operands as floats; `None` if any fails.
pub(crate) fn parse_floats(rest: &str) -> Option<Vec<f32>> {
    rest.split_whitespace()
        .map(|token| token.parse::<f32>().ok())
        .collect()
}
