use std::{
    env, fs,
    path::{Path, PathBuf},
};

use marksearch_search::{
    CONFIG_TEMPLATE, DEFAULT_DEBOUNCE_MS, MAX_DEBOUNCE_MS, SearchOptions, parse_bool,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub options: SearchOptions,
    pub debounce_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            options: SearchOptions::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl AppConfig {
    pub fn load_or_create() -> Self {
        let mut config = Self::default();
        let Some(path) = ensure_config_file() else {
            return config;
        };

        match fs::read_to_string(&path) {
            Ok(contents) => config = Self::from_contents(&contents),
            Err(e) => log::warn!("Failed to read {}: {}", path.display(), e),
        }

        config
    }

    fn from_contents(contents: &str) -> Self {
        let mut config = Self::default();
        for (line_number, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.splitn(2, '=');
            let key = parts.next().unwrap_or("").trim();
            let value = parts.next().unwrap_or("").trim();

            let applied = if key.eq_ignore_ascii_case("case_sensitive") {
                parse_bool(value).map(|enabled| config.options.case_sensitive = enabled)
            } else if key.eq_ignore_ascii_case("whole_word") {
                parse_bool(value).map(|enabled| config.options.whole_word = enabled)
            } else if key.eq_ignore_ascii_case("regex") {
                parse_bool(value).map(|enabled| config.options.regex = enabled)
            } else if key.eq_ignore_ascii_case("debounce_ms") {
                value
                    .parse::<u64>()
                    .ok()
                    .map(|ms| config.debounce_ms = ms.min(MAX_DEBOUNCE_MS))
            } else {
                log::warn!("Config line {}: unknown key '{}'", line_number + 1, key);
                continue;
            };

            if applied.is_none() {
                log::warn!(
                    "Config line {}: invalid value '{}' for '{}'",
                    line_number + 1,
                    value,
                    key
                );
            }
        }

        config
    }
}

pub fn ensure_config_file() -> Option<PathBuf> {
    let path = config_path()?;
    if !path.exists() {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Err(e) = fs::write(&path, CONFIG_TEMPLATE) {
            log::warn!("Failed to create {}: {}", path.display(), e);
        }
    }
    Some(path)
}

fn config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Ok(app_data) = env::var("APPDATA")
            && !app_data.trim().is_empty()
        {
            return Some(Path::new(&app_data).join("marksearch").join("config.txt"));
        }
    }

    if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME")
        && !xdg_config_home.trim().is_empty()
    {
        return Some(Path::new(&xdg_config_home).join("marksearch/config.txt"));
    }

    dirs::home_dir().map(|home| home.join(".config/marksearch/config.txt"))
}
