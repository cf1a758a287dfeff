/// Normalization of `(source, target)` queries into a canonical pair set.
///
/// A query arrives either as explicit pairs or as two independent id lists
/// whose cross product is wanted. Both forms normalize into a [`PairSet`]:
/// a source-major map whose sources and per-source targets are sorted and
/// unique. The sorted order is what the rest of the engine iterates in, so
/// the order in which ids were supplied never changes the result.
///
/// The cross-product form is the only place where the number of pairs can
/// grow multiplicatively; callers with large lists should prefer explicit
/// pairs.
use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::records::{Pair, VertexId};

/// A `(source, target)` query as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Combinations {
    /// Explicit pairs; duplicates collapse, no cross product.
    Explicit(Vec<Pair>),
    /// Every source paired with every target.
    CrossProduct {
        /// Source ids; duplicates collapse.
        sources: Vec<VertexId>,
        /// Target ids; duplicates collapse.
        targets: Vec<VertexId>,
    },
}

impl Combinations {
    /// Convenience constructor for the cross-product form.
    pub fn cross(
        sources: impl IntoIterator<Item = VertexId>,
        targets: impl IntoIterator<Item = VertexId>,
    ) -> Self {
        Combinations::CrossProduct {
            sources: sources.into_iter().collect(),
            targets: targets.into_iter().collect(),
        }
    }

    /// Convenience constructor for the explicit form.
    pub fn pairs<I, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Pair>,
    {
        Combinations::Explicit(pairs.into_iter().map(Into::into).collect())
    }
}

/// Errors produced by [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CombinationError {
    /// The query normalized to zero pairs.
    #[error("no (source, target) pairs in query")]
    Empty,
}

/// Canonical set of `(source, target)` pairs, grouped by source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairSet {
    by_source: BTreeMap<VertexId, BTreeSet<VertexId>>,
}

impl PairSet {
    /// Total number of pairs.
    pub fn pair_count(&self) -> usize {
        self.by_source.values().map(BTreeSet::len).sum()
    }

    /// Number of distinct sources.
    pub fn source_count(&self) -> usize {
        self.by_source.len()
    }

    /// Returns `true` when the set holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }

    /// Distinct sources in ascending order.
    pub fn sources(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.by_source.keys().copied()
    }

    /// Targets paired with `source`, in ascending order.
    pub fn targets_of(&self, source: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.by_source
            .get(&source)
            .into_iter()
            .flat_map(|targets| targets.iter().copied())
    }

    /// Every pair, source-major, targets ascending.
    pub fn iter(&self) -> impl Iterator<Item = Pair> + '_ {
        self.by_source
            .iter()
            .flat_map(|(&source, targets)| {
                targets
                    .iter()
                    .map(move |&target| Pair { source, target })
            })
    }

    fn insert(&mut self, source: VertexId, target: VertexId) {
        self.by_source.entry(source).or_default().insert(target);
    }
}

/// Normalizes a query into a [`PairSet`].
///
/// # Errors
///
/// Returns [`CombinationError::Empty`] when no pair remains, e.g. an empty
/// pair list or an empty source or target list.
pub fn normalize(combinations: &Combinations) -> Result<PairSet, CombinationError> {
    let mut set = PairSet::default();

    match combinations {
        Combinations::Explicit(pairs) => {
            for pair in pairs {
                set.insert(pair.source, pair.target);
            }
        }
        Combinations::CrossProduct { sources, targets } => {
            let targets: BTreeSet<VertexId> = targets.iter().copied().collect();
            if !targets.is_empty() {
                for &source in sources {
                    set.by_source
                        .entry(source)
                        .or_insert_with(|| targets.clone());
                }
            }
        }
    }

    if set.is_empty() {
        return Err(CombinationError::Empty);
    }

    tracing::debug!(
        sources = set.source_count(),
        pairs = set.pair_count(),
        "normalized combinations"
    );
    Ok(set)
}
