//! Input classification: URL, structured command, or free-text search.
//!
//! Shapes are tried in a fixed order. A bare word is also a valid command,
//! so URLs are checked first, and anything that is not a well-formed command
//! falls through to a web search instead of failing.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{DEFAULT_SEARCH_URL_TEMPLATE, SEARCH_QUERY_PLACEHOLDER};
use crate::launcher::DisplayStatus;

/// `http(s)://host.tld[:port][/path]`, host labels separated by `.` or `-`
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://[a-z0-9]+([\-.][a-z0-9]+)*\.[a-z]{2,5}(:[0-9]{1,5})?(/.*)?$")
        .expect("Invalid URL regex")
});

/// `name [@view|#tag]...`, one space between tokens
static COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9-]+( [@#][A-Za-z0-9-]+)*$").expect("Invalid command regex")
});

/// What the current input would do if committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Nothing but whitespace was typed
    Empty,
    /// Open this URL as typed
    Url(String),
    /// Structured command, handed to the command parser on commit
    Command(String),
    /// Free text wrapped into a search engine URL
    SearchQuery { query: String, url: String },
}

impl Intent {
    /// Status line text for this intent
    pub fn status(&self) -> DisplayStatus {
        match self {
            Intent::Empty => DisplayStatus::Idle,
            Intent::Url(url) => DisplayStatus::Goto(url.clone()),
            Intent::SearchQuery { url, .. } => DisplayStatus::Goto(url.clone()),
            Intent::Command(text) => DisplayStatus::Launch(text.clone()),
        }
    }

    /// URL to open for URL and search intents
    pub fn target_url(&self) -> Option<&str> {
        match self {
            Intent::Url(url) | Intent::SearchQuery { url, .. } => Some(url),
            Intent::Empty | Intent::Command(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Intent::Empty)
    }
}

/// Classifier with a configurable search URL template
#[derive(Debug, Clone)]
pub struct Classifier {
    search_template: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier {
            search_template: DEFAULT_SEARCH_URL_TEMPLATE.to_string(),
        }
    }
}

impl Classifier {
    /// `template` must contain `{query}`; see `Config::get_search_url_template`
    pub fn with_search_template(template: impl Into<String>) -> Self {
        Classifier {
            search_template: template.into(),
        }
    }

    pub fn search_template(&self) -> &str {
        &self.search_template
    }

    /// Classify `text`. Surrounding whitespace is ignored.
    pub fn classify(&self, text: &str) -> Intent {
        let text = text.trim();
        if text.is_empty() {
            return Intent::Empty;
        }

        if URL_RE.is_match(text) {
            Intent::Url(text.to_string())
        } else if COMMAND_RE.is_match(text) {
            Intent::Command(text.to_string())
        } else {
            Intent::SearchQuery {
                query: text.to_string(),
                url: self.search_url(text),
            }
        }
    }

    /// Search URL for a free-text query
    pub fn search_url(&self, query: &str) -> String {
        self.search_template
            .replace(SEARCH_QUERY_PLACEHOLDER, &urlencoding::encode(query))
    }
}

/// Classify with the default search template
pub fn classify(text: &str) -> Intent {
    Classifier::default().classify(text)
}
