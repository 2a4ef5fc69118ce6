//! Configuration module - launcher settings
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions (Config, CompletionCosts, AdhocTagStyle)
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{
    ADHOC_TAG_PREFIX, DEFAULT_DELETION_COST, DEFAULT_INSERTION_COST, DEFAULT_SCRATCH_BUFFER_LEN,
    DEFAULT_SEARCH_URL_TEMPLATE, DEFAULT_SUBSTITUTION_COST, SEARCH_QUERY_PLACEHOLDER,
};

pub use types::{AdhocTagStyle, CompletionCosts, Config};

pub use loader::{default_config_path, load_config, load_config_from, read_config};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
