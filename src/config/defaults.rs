//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Search engine URL used when input is neither a URL nor a command.
/// `{query}` is replaced with the percent-escaped input.
pub const DEFAULT_SEARCH_URL_TEMPLATE: &str = "https://www.google.com/#q={query}";

/// Placeholder substituted in the search URL template
pub const SEARCH_QUERY_PLACEHOLDER: &str = "{query}";

/// Directories scanned for executable names
pub const DEFAULT_EXECUTABLE_DIRS: &[&str] = &["/usr/bin"];

/// Completion costs: substitutions are cheap, insertions and deletions are not,
/// so typo fixes rank ahead of prefix extension.
pub const DEFAULT_SUBSTITUTION_COST: usize = 1;
pub const DEFAULT_INSERTION_COST: usize = 5;
pub const DEFAULT_DELETION_COST: usize = 5;

/// Initial length of each distance scratch buffer
pub const DEFAULT_SCRATCH_BUFFER_LEN: usize = 64;

/// Default config file location
pub const DEFAULT_CONFIG_PATH: &str = "~/.tag-launcher/config.json";

/// Prefix for counter-based ad-hoc tag names
pub const ADHOC_TAG_PREFIX: &str = "adhoc";
