/// Characters of context kept on each side of a match.
pub const PREVIEW_RADIUS: usize = 40;
/// Marker for content cut off at either end of a preview.
pub const ELLIPSIS: &str = "…";
/// Preview shown for a line with no content.
pub const EMPTY_LINE_PLACEHOLDER: &str = "(empty line)";

/// Build a bounded preview of `line` around a match.
///
/// `match_start` and `match_len` are measured in characters. Out-of-range
/// positions are clamped to the line, and the match is always at least one
/// character wide.
pub fn preview(line: &str, match_start: usize, match_len: usize) -> String {
    if line.is_empty() {
        return EMPTY_LINE_PLACEHOLDER.to_string();
    }

    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    let match_start = match_start.min(len);
    let match_len = match_len.max(1);

    let start = match_start.saturating_sub(PREVIEW_RADIUS);
    let end = match_start
        .saturating_add(match_len)
        .saturating_add(PREVIEW_RADIUS)
        .min(len);

    let mut snippet = String::with_capacity((end - start) * 4 + 2 * ELLIPSIS.len());
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < len {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}
