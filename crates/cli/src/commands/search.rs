use std::path::Path;

use anyhow::{Context, Result};
use marksearch_search::{
    LineMatch, SearchOptions, SearchResult, decode_document, search, split_lines,
};

use crate::config::load_search_options;

/// Exit code when the pattern does not compile.
const EXIT_INVALID_PATTERN: i32 = 2;

/// Options switched on from the command line. They add to the config defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchFlags {
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub regex: bool,
}

impl SearchFlags {
    fn apply(self, defaults: SearchOptions) -> SearchOptions {
        SearchOptions {
            case_sensitive: defaults.case_sensitive || self.case_sensitive,
            whole_word: defaults.whole_word || self.whole_word,
            regex: defaults.regex || self.regex,
        }
    }
}

pub fn run(path: &Path, query: &str, flags: SearchFlags, page: usize) -> i32 {
    let options = flags.apply(load_search_options());

    let result = match search_file(path, query, options) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return 1;
        }
    };

    let shown = clamp_page(&result, page);
    if shown != page {
        eprintln!(
            "Page {} is out of range, showing page {} of {}",
            page,
            shown,
            result.page_count().max(1)
        );
    }

    for line in render(&result, query, shown) {
        println!("{}", line);
    }

    if result.has_error() {
        EXIT_INVALID_PATTERN
    } else {
        0
    }
}

fn search_file(path: &Path, query: &str, options: SearchOptions) -> Result<SearchResult> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let text = decode_document(&path.display().to_string(), bytes);
    let lines = split_lines(&text);
    log::debug!("{}: {} lines", path.display(), lines.len());
    Ok(search(&lines, query, options))
}

/// Pull a requested page into `1..=page_count`.
fn clamp_page(result: &SearchResult, page: usize) -> usize {
    page.clamp(1, result.page_count().max(1))
}

fn render(result: &SearchResult, query: &str, page: usize) -> Vec<String> {
    let page = clamp_page(result, page);
    let mut output = Vec::new();

    let summary = result.summary(query);
    if !summary.is_empty() {
        output.push(summary);
    }

    if result.has_error() {
        output.push("Fix the pattern or drop --regex to search literally".to_string());
        return output;
    }

    let matches = result.page(page);
    let width = matches
        .last()
        .map(|m| m.line_number.to_string().len())
        .unwrap_or(1);
    output.extend(matches.iter().map(|m| format_match(m, width)));

    if result.has_pagination() {
        output.push(format!("Page {} of {}", page, result.page_count()));
    }

    output
}

fn format_match(line_match: &LineMatch, width: usize) -> String {
    let location = format!("{}:{}", line_match.line_number, line_match.occurrences);
    format!("{:>w$}  {}", location, line_match.preview, w = width + 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_add_to_defaults() {
        let defaults = SearchOptions {
            case_sensitive: true,
            ..SearchOptions::default()
        };
        let flags = SearchFlags {
            regex: true,
            ..SearchFlags::default()
        };
        let options = flags.apply(defaults);
        assert!(options.case_sensitive);
        assert!(!options.whole_word);
        assert!(options.regex);
    }

    #[test]
    fn renders_summary_and_matches() {
        let lines = ["alpha", "beta gamma beta", "delta"];
        let result = search(&lines, "beta", SearchOptions::default());
        let output = render(&result, "beta", 1);
        assert_eq!(output, vec!["2 matches in 1 line", "2:2  beta gamma beta"]);
    }

    #[test]
    fn renders_page_footer_when_paginated() {
        let lines: Vec<String> = (0..150).map(|n| format!("needle {}", n)).collect();
        let result = search(&lines, "needle", SearchOptions::default());
        let output = render(&result, "needle", 2);
        assert_eq!(output.first().map(String::as_str), Some("150 matches in 150 lines"));
        assert_eq!(output.len(), 1 + 50 + 1);
        assert_eq!(output.last().map(String::as_str), Some("Page 2 of 2"));
    }

    #[test]
    fn out_of_range_page_shows_last_page() {
        let lines: Vec<String> = (0..250).map(|n| format!("needle {}", n)).collect();
        let result = search(&lines, "needle", SearchOptions::default());
        assert_eq!(clamp_page(&result, 9), 3);
        assert_eq!(clamp_page(&result, 0), 1);

        let output = render(&result, "needle", 9);
        assert_eq!(output.len(), 1 + 50 + 1);
        assert_eq!(output.last().map(String::as_str), Some("Page 3 of 3"));
    }

    #[test]
    fn invalid_utf8_document_is_searched_lossily() {
        let path = std::env::temp_dir().join(format!(
            "marksearch-cli-lossy-{}.txt",
            std::process::id()
        ));
        std::fs::write(&path, b"ne\xff\nneedle").unwrap();

        let result = search_file(&path, "needle", SearchOptions::default());
        std::fs::remove_file(&path).unwrap();

        let result = result.unwrap();
        assert_eq!(result.total_matched_lines, Some(1));
        assert_eq!(result.matches[0].line_number, 2);
    }

    #[test]
    fn renders_pattern_error() {
        let options = SearchOptions {
            regex: true,
            ..SearchOptions::default()
        };
        let result = search(&["anything"], "(", options);
        let output = render(&result, "(", 1);
        assert_eq!(output[0], marksearch_search::INVALID_PATTERN_MESSAGE);
        assert_eq!(output.len(), 2);
    }
}
