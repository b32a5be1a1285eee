use regex::{Regex, RegexBuilder};

use crate::results::{LineMatch, SearchResult};
use crate::snippet::preview;

/// Matched lines collected before a search gives up on exact totals.
pub const MAX_MATCHED_LINES: usize = 500;

pub const INVALID_PATTERN_MESSAGE: &str = "Invalid regular expression";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub regex: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Literal,
    Regex,
}

impl SearchMode {
    pub fn from_options(options: SearchOptions) -> Self {
        if options.regex {
            Self::Regex
        } else {
            Self::Literal
        }
    }
}

/// Occurrences on one line plus the first one's position, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineHits {
    occurrences: usize,
    first_start: usize,
    first_len: usize,
}

/// Search `lines` for `query` and collect one [`LineMatch`] per matching line.
///
/// A blank query yields the idle result. An invalid regular expression yields
/// a result carrying [`INVALID_PATTERN_MESSAGE`]. This never panics.
pub fn search<S: AsRef<str>>(lines: &[S], query: &str, options: SearchOptions) -> SearchResult {
    if query.trim().is_empty() {
        return SearchResult::idle();
    }

    match SearchMode::from_options(options) {
        SearchMode::Literal => {
            let matcher = LiteralMatcher::new(query, options);
            collect(lines, |line| matcher.scan(line))
        }
        SearchMode::Regex => match RegexMatcher::new(query, options) {
            Ok(matcher) => collect(lines, |line| matcher.scan(line)),
            Err(e) => {
                log::debug!("Rejected search pattern {:?}: {}", query, e);
                SearchResult::invalid_pattern()
            }
        },
    }
}

fn collect<S, F>(lines: &[S], scan: F) -> SearchResult
where
    S: AsRef<str>,
    F: Fn(&str) -> Option<LineHits>,
{
    let mut matches = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let Some(hits) = scan(line) else {
            continue;
        };

        if matches.len() == MAX_MATCHED_LINES {
            log::debug!(
                "Search stopped at line {} after {} matched lines",
                index + 1,
                MAX_MATCHED_LINES
            );
            return SearchResult::truncated(matches);
        }

        matches.push(LineMatch::new(
            index + 1,
            hits.occurrences,
            preview(line, hits.first_start, hits.first_len),
        ));
    }

    SearchResult::complete(matches)
}

/// Letters, digits and underscore, across all scripts.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercase a character only when that keeps it a single character, so
/// character offsets line up between a line and its folded copy.
fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => c,
    }
}

fn fold(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

struct LiteralMatcher {
    needle: String,
    case_sensitive: bool,
    whole_word: bool,
}

impl LiteralMatcher {
    fn new(query: &str, options: SearchOptions) -> Self {
        let needle = if options.case_sensitive {
            query.to_string()
        } else {
            fold(query)
        };

        Self {
            needle,
            case_sensitive: options.case_sensitive,
            whole_word: options.whole_word,
        }
    }

    fn scan(&self, line: &str) -> Option<LineHits> {
        let folded;
        let haystack = if self.case_sensitive {
            line
        } else {
            folded = fold(line);
            folded.as_str()
        };

        let mut hits: Option<LineHits> = None;
        let mut cursor = 0;

        while cursor <= haystack.len() {
            let Some(found) = haystack[cursor..].find(self.needle.as_str()) else {
                break;
            };
            let start = cursor + found;
            let end = start + self.needle.len();

            if !self.whole_word || is_standalone(haystack, start, end) {
                hits.get_or_insert_with(|| LineHits {
                    occurrences: 0,
                    first_start: haystack[..start].chars().count(),
                    first_len: self.needle.chars().count(),
                })
                .occurrences += 1;
            }

            // Overlapping occurrences are not counted.
            cursor = if self.needle.is_empty() {
                match haystack[start..].chars().next() {
                    Some(c) => start + c.len_utf8(),
                    None => break,
                }
            } else {
                end
            };
        }

        hits
    }
}

/// True when the byte range `start..end` is not flanked by word characters.
fn is_standalone(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    fn new(pattern: &str, options: SearchOptions) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(!options.case_sensitive)
            .build()?;
        if !options.whole_word {
            return Ok(Self { regex });
        }

        // Only a pattern that compiles on its own is a single unit worth wrapping.
        let regex = RegexBuilder::new(&format!(r"\b(?:{})\b", pattern))
            .case_insensitive(!options.case_sensitive)
            .build()?;

        Ok(Self { regex })
    }

    fn scan(&self, line: &str) -> Option<LineHits> {
        let mut hits: Option<LineHits> = None;
        let mut cursor = 0;

        while cursor <= line.len() {
            let Some(m) = self.regex.find_at(line, cursor) else {
                break;
            };

            hits.get_or_insert_with(|| LineHits {
                occurrences: 0,
                first_start: line[..m.start()].chars().count(),
                first_len: m.as_str().chars().count(),
            })
            .occurrences += 1;

            // A zero-length match must still move the cursor forward.
            cursor = if m.is_empty() {
                match line[m.end()..].chars().next() {
                    Some(c) => m.end() + c.len_utf8(),
                    None => break,
                }
            } else {
                m.end()
            };
        }

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal() -> SearchOptions {
        SearchOptions::default()
    }

    fn regex() -> SearchOptions {
        SearchOptions {
            regex: true,
            ..SearchOptions::default()
        }
    }

    #[test]
    fn test_literal_search() {
        let result = search(&["hello world, hello!"], "hello", literal());
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].line_number, 1);
        assert_eq!(result.matches[0].occurrences, 2);
        assert_eq!(result.total_occurrences, Some(2));
        assert_eq!(result.total_matched_lines, Some(1));
    }

    #[test]
    fn test_case_insensitive() {
        let result = search(&["hello HELLO"], "Hello", literal());
        assert_eq!(result.matches[0].occurrences, 2);
    }

    #[test]
    fn test_case_sensitive() {
        let options = SearchOptions {
            case_sensitive: true,
            ..SearchOptions::default()
        };

        let result = search(&["hello HELLO"], "Hello", options);
        assert!(result.matches.is_empty());
        assert_eq!(result.total_occurrences, Some(0));

        let result = search(&["hello Hello HELLO"], "Hello", options);
        assert_eq!(result.matches[0].occurrences, 1);
    }

    #[test]
    fn test_whole_word() {
        let line = ["concatenate cat category"];

        let result = search(&line, "cat", literal());
        assert_eq!(result.matches[0].occurrences, 3);

        let options = SearchOptions {
            whole_word: true,
            ..SearchOptions::default()
        };
        let result = search(&line, "cat", options);
        assert_eq!(result.matches[0].occurrences, 1);
        assert_eq!(result.matches[0].preview, "concatenate cat category");
    }

    #[test]
    fn test_whole_word_is_unicode_aware() {
        let options = SearchOptions {
            whole_word: true,
            ..SearchOptions::default()
        };

        let result = search(&["кот котик кот_ кот"], "кот", options);
        assert_eq!(result.matches[0].occurrences, 2);

        let result = search(&["ä1cat catä cat"], "cat", options);
        assert_eq!(result.matches[0].occurrences, 1);
    }

    #[test]
    fn test_whole_word_ignores_punctuation() {
        let options = SearchOptions {
            whole_word: true,
            ..SearchOptions::default()
        };
        let result = search(&["(cat), cat. cat-cat"], "cat", options);
        assert_eq!(result.matches[0].occurrences, 4);
    }

    #[test]
    fn test_literal_matches_do_not_overlap() {
        let result = search(&["aaaa"], "aa", literal());
        assert_eq!(result.matches[0].occurrences, 2);

        let result = search(&["aaa"], "aa", literal());
        assert_eq!(result.matches[0].occurrences, 1);
    }

    #[test]
    fn test_literal_escapes_regex() {
        let result = search(&["fooXXXbar", "foo.*bar"], "foo.*bar", literal());
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].line_number, 2);
    }

    #[test]
    fn test_query_whitespace_is_significant() {
        let result = search(&["a cat", "concat"], " cat", literal());
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].line_number, 1);
    }

    #[test]
    fn test_case_folding_keeps_preview_aligned() {
        // U+212A KELVIN SIGN lowercases to a one-byte 'k'.
        let line = format!("\u{212A}{}needle{}", "x".repeat(60), "y".repeat(60));
        let result = search(&[line.as_str()], "NEEDLE", literal());
        let preview = &result.matches[0].preview;
        assert!(preview.starts_with(crate::snippet::ELLIPSIS));
        assert!(preview.contains("needle"));
        assert_eq!(
            *preview,
            format!("…{}needle{}…", "x".repeat(40), "y".repeat(40))
        );
    }

    #[test]
    fn test_regex_mode() {
        let result = search(&["foo 123 bar 456", "nothing"], r"\d+", regex());
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].occurrences, 2);
    }

    #[test]
    fn test_regex_case_insensitive_by_default() {
        let result = search(&["Error error ERROR"], "error", regex());
        assert_eq!(result.matches[0].occurrences, 3);

        let options = SearchOptions {
            regex: true,
            case_sensitive: true,
            ..SearchOptions::default()
        };
        let result = search(&["Error error ERROR"], "error", options);
        assert_eq!(result.matches[0].occurrences, 1);
    }

    #[test]
    fn test_regex_whole_word_wraps_alternation() {
        let options = SearchOptions {
            regex: true,
            whole_word: true,
            ..SearchOptions::default()
        };
        let result = search(&["cat dog catalog hotdog"], "cat|dog", options);
        assert_eq!(result.matches[0].occurrences, 2);
    }

    #[test]
    fn test_regex_zero_length_matches_terminate() {
        let result = search(&["baaa"], "a*", regex());
        assert_eq!(result.matches[0].occurrences, 3);

        let result = search(&["xyz"], "a*", regex());
        assert_eq!(result.matches[0].occurrences, 4);

        let result = search(&["ünï"], "", regex());
        assert!(result.matches.is_empty());

        let result = search(&["ünï"], "(?:)", regex());
        assert_eq!(result.matches[0].occurrences, 4);
    }

    #[test]
    fn test_regex_empty_line_can_match() {
        let result = search(&["", "abc"], "^$", regex());
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].line_number, 1);
        assert_eq!(result.matches[0].preview, crate::snippet::EMPTY_LINE_PLACEHOLDER);
    }

    #[test]
    fn test_invalid_regex() {
        let result = search(&["(", "anything"], "(", regex());
        assert_eq!(result.error_message.as_deref(), Some(INVALID_PATTERN_MESSAGE));
        assert!(result.matches.is_empty());
        assert_eq!(result.total_occurrences, Some(0));
        assert_eq!(result.total_matched_lines, Some(0));
        assert!(!result.is_truncated);
    }

    #[test]
    fn test_whole_word_does_not_rescue_invalid_regex() {
        let options = SearchOptions {
            regex: true,
            whole_word: true,
            ..SearchOptions::default()
        };

        for pattern in ["a)|(b", "(", "x)"] {
            let result = search(&["a b", "(x)"], pattern, options);
            assert_eq!(
                result.error_message.as_deref(),
                Some(INVALID_PATTERN_MESSAGE),
                "{pattern}"
            );
            assert!(result.matches.is_empty());
            assert_eq!(result.total_occurrences, Some(0));
        }
    }

    #[test]
    fn test_invalid_regex_is_ignored_in_literal_mode() {
        let result = search(&["f(x)"], "(", literal());
        assert!(result.error_message.is_none());
        assert_eq!(result.matches[0].occurrences, 1);
    }

    #[test]
    fn test_empty_query_is_idle() {
        let lines = ["some text", "", "more"];
        let strict = SearchOptions {
            case_sensitive: true,
            whole_word: true,
            regex: true,
        };
        for options in [literal(), regex(), strict] {
            assert_eq!(search(&lines, "", options), SearchResult::idle());
            assert_eq!(search(&lines, "   ", options), SearchResult::idle());
        }
    }

    #[test]
    fn test_truncation_after_cap() {
        let lines: Vec<String> = (0..=MAX_MATCHED_LINES)
            .map(|n| format!("line {} has the needle", n))
            .collect();
        assert_eq!(lines.len(), MAX_MATCHED_LINES + 1);

        let result = search(&lines, "needle", literal());
        assert!(result.is_truncated);
        assert_eq!(result.matches.len(), MAX_MATCHED_LINES);
        assert_eq!(result.total_occurrences, None);
        assert_eq!(result.total_matched_lines, None);
        assert_eq!(result.matches.last().map(|m| m.line_number), Some(MAX_MATCHED_LINES));
    }

    #[test]
    fn test_exactly_cap_lines_is_not_truncated() {
        let lines = vec!["needle"; MAX_MATCHED_LINES];
        let result = search(&lines, "needle", regex());
        assert!(!result.is_truncated);
        assert_eq!(result.total_matched_lines, Some(MAX_MATCHED_LINES));
        assert_eq!(result.total_occurrences, Some(MAX_MATCHED_LINES));
    }

    #[test]
    fn test_search_is_idempotent() {
        let lines = ["alpha beta", "gamma", "beta beta"];
        let options = SearchOptions {
            whole_word: true,
            ..SearchOptions::default()
        };
        assert_eq!(search(&lines, "beta", options), search(&lines, "beta", options));
    }

    #[test]
    fn test_preview_uses_first_match() {
        let line = format!("{}needle{}needle", "a".repeat(10), "b".repeat(100));
        let result = search(&[line.as_str()], "needle", regex());
        assert_eq!(result.matches[0].occurrences, 2);
        assert_eq!(
            result.matches[0].preview,
            format!("{}needle{}…", "a".repeat(10), "b".repeat(40))
        );
    }

    #[test]
    fn test_unicode_search() {
        let result = search(&["Hello \u{1F600} World \u{1F600}"], "\u{1F600}", literal());
        assert_eq!(result.matches[0].occurrences, 2);
    }
}
