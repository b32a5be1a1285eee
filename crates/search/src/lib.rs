//! In-memory document search for marksearch.

mod config;
mod debounce;
mod engine;
mod lines;
mod results;
mod snippet;
mod state;

pub use config::{CONFIG_TEMPLATE, decode_document, parse_bool};
pub use debounce::{DEFAULT_DEBOUNCE_MS, Debouncer, MAX_DEBOUNCE_MS};
pub use engine::{INVALID_PATTERN_MESSAGE, MAX_MATCHED_LINES, SearchMode, SearchOptions, search};
pub use lines::split_lines;
pub use results::{LineMatch, PAGE_SIZE, SearchResult};
pub use snippet::{ELLIPSIS, EMPTY_LINE_PLACEHOLDER, PREVIEW_RADIUS, preview};
pub use state::SearchState;
