use crate::config::{config_path, parse_search_options};

pub fn run() {
    let path = match config_path() {
        Some(p) => p,
        None => {
            eprintln!("Could not determine config directory");
            return;
        }
    };

    if !path.exists() {
        println!("# Config file: {} (not created yet)", path.display());
        println!("# Using default configuration");
        println!();
        print_defaults();
        return;
    }

    println!("# Config file: {}", path.display());
    println!();

    match std::fs::read_to_string(&path) {
        Ok(contents) => {
            if contents.trim().is_empty() {
                println!("# (empty file - using defaults)");
                println!();
                print_defaults();
            } else {
                print!("{}", contents);
                if !contents.ends_with('\n') {
                    println!();
                }
                let options = parse_search_options(&contents);
                println!();
                println!(
                    "# Effective search options: case_sensitive = {}, whole_word = {}, regex = {}",
                    options.case_sensitive, options.whole_word, options.regex
                );
            }
        }
        Err(e) => {
            eprintln!("Failed to read config file: {}", e);
        }
    }
}

fn print_defaults() {
    println!("# Default values:");
    println!("case_sensitive = false");
    println!("whole_word = false");
    println!("regex = false");
    println!("debounce_ms = {}", marksearch_search::DEFAULT_DEBOUNCE_MS);
}
