pub mod edit_config;
pub mod help;
pub mod search;
pub mod show_config;
pub mod validate_config;
pub mod version;
