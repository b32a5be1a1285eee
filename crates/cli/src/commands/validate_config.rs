use marksearch_search::MAX_DEBOUNCE_MS;

use crate::config::{config_path, parse_bool};

const VALID_KEYS: &[&str] = &["case_sensitive", "whole_word", "regex", "debounce_ms"];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn validate_contents(contents: &str) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (line_num, line) in contents.lines().enumerate() {
        let line_num = line_num + 1;
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            report.errors.push(format!(
                "Line {}: Invalid syntax. Expected 'key = value'",
                line_num
            ));
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();

        if !VALID_KEYS.contains(&key.as_str()) {
            report
                .warnings
                .push(format!("Line {}: Unknown key '{}'", line_num, key));
            continue;
        }

        match key.as_str() {
            "case_sensitive" | "whole_word" | "regex" => {
                if parse_bool(value).is_none() {
                    report.errors.push(format!(
                        "Line {}: {} must be 'true' or 'false'",
                        line_num, key
                    ));
                }
            }
            "debounce_ms" => match value.parse::<u64>() {
                Ok(ms) if ms > MAX_DEBOUNCE_MS => report.warnings.push(format!(
                    "Line {}: debounce_ms above {} will be clamped",
                    line_num, MAX_DEBOUNCE_MS
                )),
                Ok(_) => {}
                Err(_) => report.errors.push(format!(
                    "Line {}: debounce_ms must be a non-negative integer",
                    line_num
                )),
            },
            _ => {}
        }
    }

    report
}

pub fn run() {
    let path = match config_path() {
        Some(p) => p,
        None => {
            eprintln!("Could not determine config directory");
            std::process::exit(1);
        }
    };

    println!("Config file: {}", path.display());

    if !path.exists() {
        println!("Status: File does not exist (using defaults)");
        println!("Result: Valid");
        return;
    }

    let contents = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            println!("Status: Failed to read file");
            println!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let ValidationReport { errors, warnings } = validate_contents(&contents);

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        println!("Status: Valid");
    } else {
        if !errors.is_empty() {
            println!();
            println!("Errors:");
            for error in &errors {
                println!("  {}", error);
            }
        }

        if !warnings.is_empty() {
            println!();
            println!("Warnings:");
            for warning in &warnings {
                println!("  {}", warning);
            }
        }

        println!();
        if errors.is_empty() {
            println!("Result: Valid (with warnings)");
        } else {
            println!("Result: Invalid");
            std::process::exit(1);
        }
    }
}
