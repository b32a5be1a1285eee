use std::path::PathBuf;

pub use marksearch_search::parse_bool;
use marksearch_search::SearchOptions;

/// Returns the path to the config file
pub fn config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        dirs::config_dir().map(|p| p.join("marksearch").join("config.txt"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config_home.trim().is_empty()
        {
            return Some(PathBuf::from(xdg_config_home).join("marksearch").join("config.txt"));
        }
        dirs::home_dir().map(|p| p.join(".config").join("marksearch").join("config.txt"))
    }
}

/// Parses the default search options from config file contents
pub fn parse_search_options(contents: &str) -> SearchOptions {
    let mut options = SearchOptions::default();

    for line in contents.lines() {
        let trimmed = line.trim();

        // Skip comments and empty lines
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };
        let Some(enabled) = parse_bool(value) else {
            continue;
        };

        match key.trim().to_ascii_lowercase().as_str() {
            "case_sensitive" => options.case_sensitive = enabled,
            "whole_word" => options.whole_word = enabled,
            "regex" => options.regex = enabled,
            _ => {}
        }
    }

    options
}

/// Reads the default search options from the config file, if there is one
pub fn load_search_options() -> SearchOptions {
    let Some(path) = config_path() else {
        return SearchOptions::default();
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => parse_search_options(&contents),
        Err(e) => {
            log::debug!("No config at {}: {}", path.display(), e);
            SearchOptions::default()
        }
    }
}
