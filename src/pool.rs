//! Candidate pools for completion.
//!
//! Tags and views are small flat lists. Executables can run into the
//! thousands, so they are bucketed by first character and a completion only
//! scans the bucket of the token being typed.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use indexmap::IndexSet;
use tracing::{debug, info};

use crate::error::ResultExt;

/// Which pool a completion draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Tags,
    Views,
    Executables,
}

/// Flat, ordered candidate list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePool {
    entries: Vec<String>,
}

impl CandidatePool {
    /// Build a pool, dropping empty names and later duplicates
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: IndexSet<String> = entries
            .into_iter()
            .map(Into::<String>::into)
            .filter(|entry| !entry.is_empty())
            .collect();
        CandidatePool {
            entries: unique.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Candidate list partitioned by first character.
///
/// Each bucket keeps the enumeration order of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexedPool {
    buckets: HashMap<char, CandidatePool>,
    len: usize,
}

impl IndexedPool {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut grouped: HashMap<char, Vec<String>> = HashMap::new();
        for entry in entries {
            let entry = entry.into();
            if let Some(key) = entry.chars().next() {
                grouped.entry(key).or_default().push(entry);
            }
        }

        let buckets: HashMap<char, CandidatePool> = grouped
            .into_iter()
            .map(|(key, names)| (key, CandidatePool::new(names)))
            .collect();
        let len = buckets.values().map(CandidatePool::len).sum();

        IndexedPool { buckets, len }
    }

    /// The bucket for `key`, if anything starts with it
    pub fn bucket(&self, key: char) -> Option<&CandidatePool> {
        self.buckets.get(&key)
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// All pools one launcher completes against.
///
/// Replaced wholesale on refresh, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePools {
    pub tags: CandidatePool,
    pub views: CandidatePool,
    pub executables: IndexedPool,
}

impl CandidatePools {
    pub fn from_lists<T, V, E>(tags: T, views: V, executables: E) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        CandidatePools {
            tags: CandidatePool::new(tags),
            views: CandidatePool::new(views),
            executables: IndexedPool::new(executables),
        }
    }

    /// Pool for `kind`; executables resolve through the bucket of `key`.
    pub fn lookup(&self, kind: PoolKind, key: char) -> Option<&CandidatePool> {
        match kind {
            PoolKind::Tags => Some(&self.tags),
            PoolKind::Views => Some(&self.views),
            PoolKind::Executables => self.executables.bucket(key),
        }
    }
}

/// Collect executable names from `dirs`, sorted and deduplicated.
///
/// Directories that cannot be read are logged and skipped.
pub fn scan_executables(dirs: &[PathBuf]) -> Vec<String> {
    let start = Instant::now();

    let mut names: Vec<String> = dirs
        .iter()
        .filter_map(|dir| scan_directory(dir).warn_on_err())
        .flatten()
        .collect();

    names.sort();
    names.dedup();

    info!(
        event_type = "pool_scan",
        dirs = dirs.len(),
        count = names.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Scanned executables"
    );

    names
}

fn scan_directory(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let names = file_names(entries.map(|entry| {
        entry
            .map(|entry| (entry.path().is_dir(), entry.file_name()))
            .with_context(|| format!("Failed to read entry in {}", dir.display()))
    }));

    debug!(dir = %dir.display(), count = names.len(), "Scanned directory");
    Ok(names)
}

/// Names of the non-directory entries; unreadable entries are skipped one
/// at a time.
fn file_names<I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = Result<(bool, OsString)>>,
{
    entries
        .into_iter()
        .filter_map(|entry| entry.warn_on_err())
        .filter(|(is_dir, _)| !is_dir)
        .filter_map(|(_, name)| match name.into_string() {
            Ok(name) => Some(name),
            Err(raw) => {
                debug!(name = ?raw, "Skipping non UTF-8 executable name");
                None
            }
        })
        .collect()
}
