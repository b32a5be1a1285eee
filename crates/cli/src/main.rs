use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "marksearch")]
#[command(about = "Marksearch document search CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Subcommand)]
enum Action {
    /// Show version information
    #[command(name = "-version")]
    Version,

    /// Show help and available actions
    #[command(name = "-help")]
    Help,

    /// Search a document and print one page of matching lines
    #[command(name = "-search")]
    Search {
        /// Document to search
        path: PathBuf,

        /// Text or pattern to look for
        query: String,

        /// Match letter case exactly
        #[arg(long)]
        case_sensitive: bool,

        /// Only count matches flanked by non-word characters
        #[arg(long)]
        whole_word: bool,

        /// Treat the query as a regular expression
        #[arg(long)]
        regex: bool,

        /// Page of results to print (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Open config file in editor
    #[command(name = "-edit-config")]
    EditConfig,

    /// Display current configuration
    #[command(name = "-show-config")]
    ShowConfig,

    /// Validate configuration file
    #[command(name = "-validate-config")]
    ValidateConfig,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.action {
        Some(Action::Version) => commands::version::run(),
        Some(Action::Help) => commands::help::run(),
        Some(Action::Search {
            path,
            query,
            case_sensitive,
            whole_word,
            regex,
            page,
        }) => {
            let flags = commands::search::SearchFlags {
                case_sensitive,
                whole_word,
                regex,
            };
            let code = commands::search::run(&path, &query, flags, page);
            if code != 0 {
                std::process::exit(code);
            }
        }
        Some(Action::EditConfig) => commands::edit_config::run(),
        Some(Action::ShowConfig) => commands::show_config::run(),
        Some(Action::ValidateConfig) => commands::validate_config::run(),
        None => {
            // No subcommand: show help
            commands::help::run();
        }
    }
}
