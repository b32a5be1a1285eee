use crate::engine::{INVALID_PATTERN_MESSAGE, MAX_MATCHED_LINES};

/// Number of matched lines shown per page.
pub const PAGE_SIZE: usize = 100;

/// One line of the document that contains at least one occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    /// 1-based line number.
    pub line_number: usize,
    pub occurrences: usize,
    pub preview: String,
}

impl LineMatch {
    pub fn new(line_number: usize, occurrences: usize, preview: String) -> Self {
        Self {
            line_number,
            occurrences,
            preview,
        }
    }
}

/// Outcome of a single search run.
///
/// When `is_truncated` is set the totals are unknown and reported as `None`;
/// callers must not present them as exact counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub matches: Vec<LineMatch>,
    pub total_occurrences: Option<usize>,
    pub total_matched_lines: Option<usize>,
    pub is_truncated: bool,
    pub error_message: Option<String>,
}

impl Default for SearchResult {
    fn default() -> Self {
        Self::idle()
    }
}

impl SearchResult {
    /// Result for a blank query.
    pub fn idle() -> Self {
        Self {
            matches: Vec::new(),
            total_occurrences: Some(0),
            total_matched_lines: Some(0),
            is_truncated: false,
            error_message: None,
        }
    }

    pub fn invalid_pattern() -> Self {
        Self {
            error_message: Some(INVALID_PATTERN_MESSAGE.to_string()),
            ..Self::idle()
        }
    }

    pub fn complete(matches: Vec<LineMatch>) -> Self {
        let total_occurrences = matches.iter().map(|m| m.occurrences).sum();
        let total_matched_lines = matches.len();
        Self {
            matches,
            total_occurrences: Some(total_occurrences),
            total_matched_lines: Some(total_matched_lines),
            is_truncated: false,
            error_message: None,
        }
    }

    pub fn truncated(matches: Vec<LineMatch>) -> Self {
        Self {
            matches,
            total_occurrences: None,
            total_matched_lines: None,
            is_truncated: true,
            error_message: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    /// Matches on the given 1-based page. Page 0 is treated as page 1 and
    /// pages past the end are empty.
    pub fn page(&self, page: usize) -> &[LineMatch] {
        let page = page.max(1);
        let start = (page - 1).saturating_mul(PAGE_SIZE).min(self.matches.len());
        let end = page.saturating_mul(PAGE_SIZE).min(self.matches.len());
        &self.matches[start..end]
    }

    pub fn page_count(&self) -> usize {
        self.matches.len().div_ceil(PAGE_SIZE)
    }

    /// Whether page controls are needed at all.
    pub fn has_pagination(&self) -> bool {
        self.matches.len() > PAGE_SIZE
    }

    /// Status line for display, in the style of a search bar counter.
    ///
    /// Empty while the query is blank. An invalid pattern reports its error
    /// instead of "No matches".
    pub fn summary(&self, query: &str) -> String {
        if let Some(error) = &self.error_message {
            return error.clone();
        }

        if self.is_truncated {
            return format!(
                "{}+ matches, showing first {} lines",
                MAX_MATCHED_LINES, MAX_MATCHED_LINES
            );
        }

        if query.trim().is_empty() {
            return String::new();
        }

        match (self.total_occurrences, self.total_matched_lines) {
            (Some(occurrences), Some(lines)) if occurrences > 0 => format!(
                "{} {} in {} {}",
                occurrences,
                if occurrences == 1 { "match" } else { "matches" },
                lines,
                if lines == 1 { "line" } else { "lines" }
            ),
            _ => "No matches".to_string(),
        }
    }
}
