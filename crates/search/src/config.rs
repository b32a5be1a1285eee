/// Commented `config.txt` written on first run or by `-edit-config`.
pub const CONFIG_TEMPLATE: &str = "# Initial search options\n\
# Match letter case exactly\n\
case_sensitive = false\n\
# Only count matches flanked by non-word characters\n\
whole_word = false\n\
# Treat the query as a regular expression\n\
regex = false\n\
\n\
# Quiet period in milliseconds before a query change is searched (max 5000)\n\
# debounce_ms = 250\n";

/// Boolean config values: true/false, yes/no, on/off, 1/0.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Decode document bytes as UTF-8, replacing invalid sequences.
///
/// `name` only labels the warning logged when replacement happens.
pub fn decode_document(name: &str, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("{} is not valid UTF-8, replacing invalid bytes", name);
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}
