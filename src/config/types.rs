//! Configuration type definitions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults::*;

// ============================================
// COMPLETION COSTS
// ============================================

/// Edit costs used when ranking completion candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionCosts {
    #[serde(default = "default_substitution_cost")]
    pub substitution: usize,
    #[serde(default = "default_insertion_cost")]
    pub insertion: usize,
    #[serde(default = "default_deletion_cost")]
    pub deletion: usize,
}

fn default_substitution_cost() -> usize {
    DEFAULT_SUBSTITUTION_COST
}
fn default_insertion_cost() -> usize {
    DEFAULT_INSERTION_COST
}
fn default_deletion_cost() -> usize {
    DEFAULT_DELETION_COST
}

impl Default for CompletionCosts {
    fn default() -> Self {
        CompletionCosts {
            substitution: DEFAULT_SUBSTITUTION_COST,
            insertion: DEFAULT_INSERTION_COST,
            deletion: DEFAULT_DELETION_COST,
        }
    }
}

// ============================================
// AD-HOC TAGS
// ============================================

/// How names for ad-hoc tags are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdhocTagStyle {
    /// Random v4 UUID (collision-resistant across launcher sessions)
    #[default]
    Uuid,
    /// `adhoc-<n>` from a per-launcher counter
    Counter,
}

// ============================================
// MAIN CONFIG
// ============================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Search URL template, `{query}` is replaced with the escaped input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_url_template: Option<String>,
    /// Directories whose entries make up the executable pool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable_dirs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_costs: Option<CompletionCosts>,
    /// Initial scratch buffer length for distance computations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratch_buffer_len: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adhoc_tags: Option<AdhocTagStyle>,
    /// Known tag names for hosts without a window manager to ask
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Known view names for hosts without a window manager to ask
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<Vec<String>>,
}

impl Config {
    /// Returns the search URL template, or the default if unset or missing `{query}`
    pub fn get_search_url_template(&self) -> String {
        match &self.search_url_template {
            Some(template) if template.contains(SEARCH_QUERY_PLACEHOLDER) => template.clone(),
            Some(template) => {
                tracing::warn!(
                    template = %template,
                    "searchUrlTemplate has no {{query}} placeholder, using default"
                );
                DEFAULT_SEARCH_URL_TEMPLATE.to_string()
            }
            None => DEFAULT_SEARCH_URL_TEMPLATE.to_string(),
        }
    }

    /// Returns executable directories with `~` expanded
    pub fn get_executable_dirs(&self) -> Vec<PathBuf> {
        match &self.executable_dirs {
            Some(dirs) => dirs
                .iter()
                .map(|d| PathBuf::from(shellexpand::tilde(d).as_ref()))
                .collect(),
            None => DEFAULT_EXECUTABLE_DIRS.iter().map(PathBuf::from).collect(),
        }
    }

    pub fn get_completion_costs(&self) -> CompletionCosts {
        self.completion_costs.unwrap_or_default()
    }

    /// Returns the scratch buffer length, never smaller than one entry
    pub fn get_scratch_buffer_len(&self) -> usize {
        self.scratch_buffer_len
            .unwrap_or(DEFAULT_SCRATCH_BUFFER_LEN)
            .max(1)
    }

    pub fn get_adhoc_tag_style(&self) -> AdhocTagStyle {
        self.adhoc_tags.unwrap_or_default()
    }

    pub fn get_tags(&self) -> Vec<String> {
        self.tags.clone().unwrap_or_default()
    }

    pub fn get_views(&self) -> Vec<String> {
        self.views.clone().unwrap_or_default()
    }
}
