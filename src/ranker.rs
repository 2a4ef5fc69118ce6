//! Completion ranking.
//!
//! The token under the cursor picks a pool by its sigil, every candidate of
//! that pool is scored against the token with the distance engine, and the
//! candidates are ordered by score. Ties keep pool order so repeated requests
//! cycle through the same sequence.

use std::time::Instant;

use tracing::trace;

use crate::command::{TAG_SIGIL, VIEW_SIGIL};
use crate::distance::DistanceEngine;
use crate::pool::{CandidatePool, CandidatePools, PoolKind};

/// A ranked suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    /// Candidate with the token's sigil put back in front
    pub suggestion: String,
    /// Distance from the typed token, lower is better
    pub score: usize,
}

/// Token split into the pool it completes from and the text to match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenQuery<'a> {
    pub kind: PoolKind,
    /// Sigil to put back in front of suggestions
    pub sigil: &'static str,
    /// Token without its sigil
    pub stem: &'a str,
    /// Executable bucket key (the token's first char)
    pub key: char,
}

impl<'a> TokenQuery<'a> {
    /// `None` for an empty token
    pub fn parse(token: &'a str) -> Option<Self> {
        let key = token.chars().next()?;
        let query = if let Some(stem) = token.strip_prefix(TAG_SIGIL) {
            TokenQuery {
                kind: PoolKind::Tags,
                sigil: "#",
                stem,
                key,
            }
        } else if let Some(stem) = token.strip_prefix(VIEW_SIGIL) {
            TokenQuery {
                kind: PoolKind::Views,
                sigil: "@",
                stem,
                key,
            }
        } else {
            TokenQuery {
                kind: PoolKind::Executables,
                sigil: "",
                stem: token,
                key,
            }
        };
        Some(query)
    }
}

/// Last whitespace-separated token of `text`, or "" if there is none
pub fn last_token(text: &str) -> &str {
    text.split_whitespace().next_back().unwrap_or("")
}

/// Replace the last token of `text` with `suggestion`.
///
/// Trailing whitespace after the last token is dropped.
pub fn splice_completion(text: &str, suggestion: &str) -> String {
    let trimmed = text.trim_end();
    let start = trimmed
        .rfind(char::is_whitespace)
        .map(|i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(0);
    format!("{}{}", &trimmed[..start], suggestion)
}

/// Scores pools against tokens, owning the distance engine for its scratch
/// buffers.
#[derive(Debug)]
pub struct Ranker {
    engine: DistanceEngine,
    /// (score, pool index), reused between requests
    scored: Vec<(usize, usize)>,
}

impl Ranker {
    pub fn new(engine: DistanceEngine) -> Self {
        Ranker {
            engine,
            scored: Vec::new(),
        }
    }

    pub fn engine(&self) -> &DistanceEngine {
        &self.engine
    }

    /// Suggestion at rank `select_index` for `prefix`.
    ///
    /// `None` when the prefix is empty, the pool is missing or empty, or
    /// `select_index` is past the last candidate.
    pub fn rank(
        &mut self,
        pools: &CandidatePools,
        prefix: &str,
        select_index: usize,
    ) -> Option<String> {
        let query = TokenQuery::parse(prefix)?;
        let pool = pools.lookup(query.kind, query.key)?;
        self.score_pool(pool, query.stem);

        let &(_, index) = self.scored.get(select_index)?;
        Some(format!("{}{}", query.sigil, pool.entries()[index]))
    }

    /// Every candidate for `prefix`, best first
    pub fn guesses(&mut self, pools: &CandidatePools, prefix: &str) -> Vec<Guess> {
        let Some(query) = TokenQuery::parse(prefix) else {
            return Vec::new();
        };
        let Some(pool) = pools.lookup(query.kind, query.key) else {
            return Vec::new();
        };
        self.score_pool(pool, query.stem);

        self.scored
            .iter()
            .map(|&(score, index)| Guess {
                suggestion: format!("{}{}", query.sigil, pool.entries()[index]),
                score,
            })
            .collect()
    }

    /// Fill `self.scored` with the pool ordered by distance to `stem`
    fn score_pool(&mut self, pool: &CandidatePool, stem: &str) {
        let start = Instant::now();
        self.scored.clear();

        for (index, candidate) in pool.entries().iter().enumerate() {
            match self.engine.distance(stem, candidate) {
                Ok(score) => self.scored.push((score, index)),
                Err(e) => {
                    crate::debug_panic!("Distance failed after buffer resize: {}", e);
                }
            }
        }

        // Stable: equal scores stay in pool order
        self.scored.sort_by_key(|&(score, _)| score);

        trace!(
            stem,
            candidates = pool.len(),
            duration_us = start.elapsed().as_micros() as u64,
            "Scored completion pool"
        );
    }
}
