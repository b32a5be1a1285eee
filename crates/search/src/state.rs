use std::sync::Arc;

use crate::engine::{SearchOptions, search};
use crate::lines::split_lines;
use crate::results::{LineMatch, SearchResult};

/// Manages a search session over one document.
///
/// Lines are split once per distinct document text and the last result is
/// memoized by query and options, so paging never re-runs the engine.
pub struct SearchState {
    text: Arc<str>,
    lines: Vec<String>,
    query: String,
    options: SearchOptions,
    current_page: usize,
    result: SearchResult,
    computed_for: Option<(String, SearchOptions)>,
    search_count: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(SearchOptions::default())
    }
}

impl SearchState {
    pub fn new(options: SearchOptions) -> Self {
        let text: Arc<str> = Arc::from("");
        let lines = split_lines(&text).into_iter().map(str::to_owned).collect();
        Self {
            text,
            lines,
            query: String::new(),
            options,
            current_page: 1,
            result: SearchResult::idle(),
            computed_for: None,
            search_count: 0,
        }
    }

    /// Load document text. Splitting is skipped when the text is unchanged.
    pub fn set_document(&mut self, text: Arc<str>) {
        if Arc::ptr_eq(&self.text, &text) || *self.text == *text {
            log::trace!("Document unchanged, reusing {} lines", self.lines.len());
            return;
        }

        self.lines = split_lines(&text).into_iter().map(str::to_owned).collect();
        self.text = text;
        self.computed_for = None;
        self.current_page = 1;
        log::debug!("Indexed document into {} lines", self.lines.len());
        self.refresh();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Get current query string
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Update the search query. A different query returns to the first page.
    pub fn set_query(&mut self, query: &str) {
        if query != self.query {
            self.query = query.to_string();
            self.current_page = 1;
        }
        self.refresh();
    }

    /// Clear the query and results
    pub fn clear(&mut self) {
        self.set_query("");
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    pub fn set_options(&mut self, options: SearchOptions) {
        self.options = options;
        self.refresh();
        self.current_page = self.clamp_page(self.current_page);
    }

    /// Toggle case sensitivity
    pub fn toggle_case_sensitive(&mut self) {
        let mut options = self.options;
        options.case_sensitive = !options.case_sensitive;
        self.set_options(options);
    }

    pub fn toggle_whole_word(&mut self) {
        let mut options = self.options;
        options.whole_word = !options.whole_word;
        self.set_options(options);
    }

    /// Toggle regex mode
    pub fn toggle_regex(&mut self) {
        let mut options = self.options;
        options.regex = !options.regex;
        self.set_options(options);
    }

    /// Get current search result
    pub fn result(&self) -> &SearchResult {
        &self.result
    }

    /// Get any pattern error
    pub fn error(&self) -> Option<&str> {
        self.result.error_message.as_deref()
    }

    pub fn summary(&self) -> String {
        self.result.summary(&self.query)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        self.result.page_count()
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = self.clamp_page(page);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.current_page.saturating_sub(1));
    }

    /// Matches on the current page
    pub fn visible_matches(&self) -> &[LineMatch] {
        self.result.page(self.current_page)
    }

    /// Number of times the engine has actually run.
    pub fn search_count(&self) -> usize {
        self.search_count
    }

    fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.page_count().max(1))
    }

    fn refresh(&mut self) {
        let key = (self.query.clone(), self.options);
        if self.computed_for.as_ref() == Some(&key) {
            log::trace!("Reusing memoized result for {:?}", self.query);
            return;
        }

        self.result = search(&self.lines, &self.query, self.options);
        self.computed_for = Some(key);
        self.search_count += 1;
        log::trace!(
            "Search #{} for {:?} found {} matched lines",
            self.search_count,
            self.query,
            self.result.matches.len()
        );
    }
}
