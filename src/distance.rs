//! Weighted Levenshtein distance with caller-owned scratch buffers.
//!
//! Completion scores every candidate of a pool on every request, so the
//! distance function never allocates: it works on two rolling rows that the
//! caller hands in and that are reused across calls.

use tracing::debug;

use crate::config::CompletionCosts;
use crate::error::{LauncherError, Result};

/// Per-operation costs for [`distance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditCosts {
    pub substitution: usize,
    pub insertion: usize,
    pub deletion: usize,
}

impl EditCosts {
    /// Unit costs, i.e. plain Levenshtein
    pub const UNIT: EditCosts = EditCosts {
        substitution: 1,
        insertion: 1,
        deletion: 1,
    };

    pub const fn new(substitution: usize, insertion: usize, deletion: usize) -> Self {
        EditCosts {
            substitution,
            insertion,
            deletion,
        }
    }
}

impl From<CompletionCosts> for EditCosts {
    fn from(costs: CompletionCosts) -> Self {
        EditCosts::new(costs.substitution, costs.insertion, costs.deletion)
    }
}

/// Number of buffer entries [`distance`] needs for `a` and `b`.
#[inline]
pub fn required_buffer_len(a: &str, b: &str) -> usize {
    a.chars().count().max(b.chars().count()) + 1
}

/// Minimum cost of turning `a` into `b` with single-character edits.
///
/// Row `i` of the DP table holds the cost of turning the first `i` chars of
/// `a` into every prefix of `b`; only the previous and current rows live in
/// `prev` and `curr`. Both buffers must hold at least
/// `max(len(a), len(b)) + 1` entries, otherwise
/// [`LauncherError::InvalidBuffer`] is returned and nothing is written.
/// Costs saturate at `usize::MAX` instead of overflowing.
pub fn distance(
    a: &str,
    b: &str,
    costs: EditCosts,
    prev: &mut [usize],
    curr: &mut [usize],
) -> Result<usize> {
    let required = required_buffer_len(a, b);
    let actual = prev.len().min(curr.len());
    if actual < required {
        return Err(LauncherError::InvalidBuffer { required, actual });
    }

    let n = b.chars().count();
    let mut prev = &mut prev[..=n];
    let mut curr = &mut curr[..=n];

    for (j, cell) in prev.iter_mut().enumerate() {
        *cell = j.saturating_mul(costs.insertion);
    }

    for (i, ca) in a.chars().enumerate() {
        curr[0] = (i + 1).saturating_mul(costs.deletion);
        for (j, cb) in b.chars().enumerate() {
            let substitution = if ca == cb { 0 } else { costs.substitution };
            curr[j + 1] = prev[j + 1]
                .saturating_add(costs.deletion)
                .min(curr[j].saturating_add(costs.insertion))
                .min(prev[j].saturating_add(substitution));
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    Ok(prev[n])
}

/// Owns a scratch buffer pair and a cost table.
///
/// One engine serves one launcher; `&mut self` keeps two computations from
/// ever sharing the buffers.
#[derive(Debug)]
pub struct DistanceEngine {
    costs: EditCosts,
    prev: Vec<usize>,
    curr: Vec<usize>,
}

impl DistanceEngine {
    pub fn new(costs: EditCosts, buffer_len: usize) -> Self {
        let buffer_len = buffer_len.max(1);
        DistanceEngine {
            costs,
            prev: vec![0; buffer_len],
            curr: vec![0; buffer_len],
        }
    }

    pub fn costs(&self) -> EditCosts {
        self.costs
    }

    pub fn buffer_len(&self) -> usize {
        self.prev.len()
    }

    /// Distance from `a` to `b` with this engine's costs.
    ///
    /// Buffers grow once when an input outruns them; they never shrink.
    pub fn distance(&mut self, a: &str, b: &str) -> Result<usize> {
        match distance(a, b, self.costs, &mut self.prev, &mut self.curr) {
            Err(LauncherError::InvalidBuffer { required, actual }) => {
                debug!(required, actual, "Growing distance scratch buffers");
                self.prev.resize(required, 0);
                self.curr.resize(required, 0);
                distance(a, b, self.costs, &mut self.prev, &mut self.curr)
            }
            result => result,
        }
    }
}
