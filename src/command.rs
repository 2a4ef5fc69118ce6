//! Structured command parsing.
//!
//! `urxvt @editor #work` means: make sure tag `work` and view `editor`
//! exist, tag the view, spawn `urxvt` and tag the new client. When a view and
//! a program are given without a tag, an ad-hoc tag is made up so the
//! program still lands on the view.

use indexmap::IndexSet;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::config::{AdhocTagStyle, ADHOC_TAG_PREFIX};

pub const TAG_SIGIL: char = '#';
pub const VIEW_SIGIL: char = '@';

/// Tags, views and programs named by one committed command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDescriptor {
    pub tags: IndexSet<String>,
    pub views: IndexSet<String>,
    pub spawn: IndexSet<String>,
    /// True when `tags` holds a generated ad-hoc tag
    pub synthetic_tag: bool,
}

impl CommandDescriptor {
    /// Whether the ad-hoc tag policy applies
    pub fn needs_adhoc_tag(&self) -> bool {
        self.tags.is_empty() && !self.views.is_empty() && !self.spawn.is_empty()
    }

    /// Add one generated tag if views and programs were given without a tag.
    ///
    /// Returns true when a tag was added.
    pub fn apply_adhoc_policy(&mut self, namer: &mut TagNamer) -> bool {
        if !self.needs_adhoc_tag() {
            return false;
        }
        let tag = namer.next_name();
        debug!(tag = %tag, "Synthesized ad-hoc tag");
        self.tags.insert(tag);
        self.synthetic_tag = true;
        true
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.views.is_empty() && self.spawn.is_empty()
    }
}

/// Split a command into tag, view and spawn sets.
///
/// Sigils are stripped; a bare sigil names nothing and is dropped. Each set
/// keeps the order tokens first appeared in. The ad-hoc policy is not
/// applied here, see [`CommandDescriptor::apply_adhoc_policy`].
pub fn parse_command(text: &str) -> CommandDescriptor {
    let mut descriptor = CommandDescriptor::default();

    for token in text.split_whitespace() {
        let (set, name) = if let Some(name) = token.strip_prefix(TAG_SIGIL) {
            (&mut descriptor.tags, name)
        } else if let Some(name) = token.strip_prefix(VIEW_SIGIL) {
            (&mut descriptor.views, name)
        } else {
            (&mut descriptor.spawn, token)
        };

        if !name.is_empty() {
            set.insert(name.to_string());
        }
    }

    descriptor
}

/// Generates names for ad-hoc tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagNamer {
    /// `adhoc-<uuid>`, unique across sessions
    #[default]
    Uuid,
    /// `adhoc-<n>`, unique within one launcher
    Counter { next: u64 },
}

impl TagNamer {
    pub fn from_style(style: AdhocTagStyle) -> Self {
        match style {
            AdhocTagStyle::Uuid => TagNamer::Uuid,
            AdhocTagStyle::Counter => TagNamer::counter(),
        }
    }

    pub fn counter() -> Self {
        TagNamer::Counter { next: 1 }
    }

    pub fn next_name(&mut self) -> String {
        match self {
            TagNamer::Uuid => format!("{}-{}", ADHOC_TAG_PREFIX, Uuid::new_v4().simple()),
            TagNamer::Counter { next } => {
                let name = format!("{}-{}", ADHOC_TAG_PREFIX, next);
                *next = next.wrapping_add(1);
                name
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> IndexSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_view_and_spawn_without_tag() {
        let mut cmd = parse_command("urxvt @editor");
        assert_eq!(cmd.spawn, set(&["urxvt"]));
        assert_eq!(cmd.views, set(&["editor"]));
        assert!(cmd.tags.is_empty());
        assert!(cmd.needs_adhoc_tag());

        assert!(cmd.apply_adhoc_policy(&mut TagNamer::default()));
        assert_eq!(cmd.tags.len(), 1);
        assert!(cmd.synthetic_tag);
        assert!(cmd.tags[0].starts_with("adhoc-"));
    }

    #[test]
    fn test_explicit_tag_prevents_synthesis() {
        let mut cmd = parse_command("urxvt #work");
        assert_eq!(cmd.tags, set(&["work"]));
        assert_eq!(cmd.spawn, set(&["urxvt"]));
        assert!(cmd.views.is_empty());

        assert!(!cmd.apply_adhoc_policy(&mut TagNamer::counter()));
        assert_eq!(cmd.tags, set(&["work"]));
        assert!(!cmd.synthetic_tag);
    }

    #[test]
    fn test_full_command() {
        let cmd = parse_command("urxvt @editor #work");
        assert_eq!(cmd.tags, set(&["work"]));
        assert_eq!(cmd.views, set(&["editor"]));
        assert_eq!(cmd.spawn, set(&["urxvt"]));
        assert!(!cmd.needs_adhoc_tag());
    }

    #[test]
    fn test_no_synthesis_without_view_or_spawn() {
        let mut only_spawn = parse_command("urxvt");
        assert!(!only_spawn.apply_adhoc_policy(&mut TagNamer::counter()));
        assert!(only_spawn.tags.is_empty());

        let mut only_view = parse_command("@editor");
        assert!(!only_view.apply_adhoc_policy(&mut TagNamer::counter()));
        assert!(only_view.tags.is_empty());
    }

    #[test]
    fn test_policy_is_idempotent() {
        let mut cmd = parse_command("urxvt @editor");
        let mut namer = TagNamer::counter();
        assert!(cmd.apply_adhoc_policy(&mut namer));
        assert!(!cmd.apply_adhoc_policy(&mut namer));
        assert_eq!(cmd.tags, set(&["adhoc-1"]));
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let cmd = parse_command("b a b #y #x #y @v @u @v a");
        assert_eq!(cmd.spawn, set(&["b", "a"]));
        assert_eq!(cmd.tags, set(&["y", "x"]));
        assert_eq!(cmd.views, set(&["v", "u"]));
        // IndexSet equality ignores order, so compare sequences too
        assert_eq!(cmd.spawn.iter().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(cmd.tags.iter().collect::<Vec<_>>(), ["y", "x"]);
        assert_eq!(cmd.views.iter().collect::<Vec<_>>(), ["v", "u"]);
    }

    #[test]
    fn test_bare_sigils_are_dropped() {
        let cmd = parse_command("urxvt # @");
        assert!(cmd.tags.is_empty());
        assert!(cmd.views.is_empty());
        assert_eq!(cmd.spawn, set(&["urxvt"]));
    }

    #[test]
    fn test_only_leading_sigil_is_stripped() {
        let cmd = parse_command("##x @#y");
        assert_eq!(cmd.tags, set(&["#x"]));
        assert_eq!(cmd.views, set(&["#y"]));
    }

    #[test]
    fn test_empty_input() {
        let cmd = parse_command("   ");
        assert!(cmd.is_empty());
        assert!(!cmd.needs_adhoc_tag());
    }

    #[test]
    fn test_counter_namer_is_monotonic() {
        let mut namer = TagNamer::counter();
        assert_eq!(namer.next_name(), "adhoc-1");
        assert_eq!(namer.next_name(), "adhoc-2");
        assert_eq!(namer.next_name(), "adhoc-3");
    }

    #[test]
    fn test_uuid_namer_is_unique_and_valid_tag_name() {
        let mut namer = TagNamer::Uuid;
        let a = namer.next_name();
        let b = namer.next_name();
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    }

    #[test]
    fn test_namer_from_style() {
        assert_eq!(TagNamer::from_style(AdhocTagStyle::Uuid), TagNamer::Uuid);
        assert_eq!(
            TagNamer::from_style(AdhocTagStyle::Counter),
            TagNamer::Counter { next: 1 }
        );
    }

    #[test]
    fn test_descriptor_serializes_in_order() {
        let mut cmd = parse_command("urxvt @editor");
        cmd.apply_adhoc_policy(&mut TagNamer::counter());
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(
            json,
            r#"{"tags":["adhoc-1"],"views":["editor"],"spawn":["urxvt"],"syntheticTag":true}"#
        );
    }
}
