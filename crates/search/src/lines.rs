/// Split a document into lines on `\n` or `\r\n`.
///
/// Empty lines are kept as zero-length entries and no trailing whitespace is
/// trimmed. A lone `\r` is treated as line content.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}
