/// Flattening of reconstructed paths into output rows.
///
/// The row count is computed up front so the buffer is allocated once at its
/// exact size; filling it must then produce exactly that many rows.
///
/// Row policy per path:
/// - one row per step;
/// - the trivial self-path contributes a single row at the source with
///   [`NO_EDGE`] and zero costs;
/// - an unreachable path contributes a single sentinel row at the target
///   with [`NO_EDGE`] and infinite costs, or nothing when sentinels are
///   disabled.
use thiserror::Error;

use crate::graph::Path;
use crate::records::{EdgeId, NO_EDGE, OutputRow, VertexId};

/// Errors produced by [`flatten`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlattenError {
    /// Filling produced a different number of rows than was counted.
    #[error("row count mismatch: counted {expected}, produced {actual}")]
    CountMismatch {
        /// Rows counted before allocation.
        expected: usize,
        /// Rows actually written.
        actual: usize,
    },
}

/// Number of rows a single path contributes.
fn rows_for(path: &Path, emit_unreachable: bool) -> usize {
    if path.is_unreachable() {
        usize::from(emit_unreachable)
    } else {
        path.steps.len().max(1)
    }
}

/// Total number of rows [`flatten`] will produce for `paths`.
pub fn count_rows(paths: &[Path], emit_unreachable: bool) -> usize {
    paths.iter().map(|p| rows_for(p, emit_unreachable)).sum()
}

/// Converts `paths` into a flat row sequence in path order.
///
/// # Errors
///
/// Returns [`FlattenError::CountMismatch`] if the rows written disagree with
/// [`count_rows`].
pub fn flatten(paths: &[Path], emit_unreachable: bool) -> Result<Vec<OutputRow>, FlattenError> {
    let expected = count_rows(paths, emit_unreachable);
    let mut rows: Vec<OutputRow> = Vec::with_capacity(expected);

    for (i, path) in paths.iter().enumerate() {
        let path_id = i + 1;
        let mut push = |path_seq: usize, node: VertexId, edge: EdgeId, cost: f64, agg_cost: f64| {
            rows.push(OutputRow {
                seq: rows.len() + 1,
                path_id,
                path_seq,
                start_vid: path.source,
                end_vid: path.target,
                node,
                edge,
                cost,
                agg_cost,
            });
        };

        if path.is_trivial() {
            push(1, path.source, NO_EDGE, 0.0, 0.0);
        } else if path.is_unreachable() {
            if emit_unreachable {
                push(1, path.target, NO_EDGE, f64::INFINITY, f64::INFINITY);
            }
        } else {
            for (j, step) in path.steps.iter().enumerate() {
                push(j + 1, step.node, step.edge, step.cost, step.agg_cost);
            }
        }
    }

    if rows.len() != expected {
        return Err(FlattenError::CountMismatch {
            expected,
            actual: rows.len(),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::graph::PathStep;

    fn step(node: i64, edge: i64, cost: f64, agg_cost: f64) -> PathStep {
        PathStep {
            node,
            edge,
            cost,
            agg_cost,
        }
    }

    fn routed() -> Path {
        Path {
            source: 1,
            target: 3,
            steps: vec![step(2, 1, 1.0, 1.0), step(3, 2, 2.0, 3.0)],
        }
    }

    fn unreachable() -> Path {
        Path {
            source: 3,
            target: 1,
            steps: Vec::new(),
        }
    }

    fn trivial() -> Path {
        Path {
            source: 4,
            target: 4,
            steps: Vec::new(),
        }
    }

    /// One row per step, numbered within the path and globally.
    #[test]
    fn test_steps_become_rows() {
        let rows = flatten(&[routed()], true).expect("flattens");
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows.iter().map(|r| (r.seq, r.path_seq, r.edge)).collect::<Vec<_>>(),
            vec![(1, 1, 1), (2, 2, 2)]
        );
        assert!(rows.iter().all(|r| r.path_id == 1));
        assert!(rows.iter().all(|r| r.start_vid == 1 && r.end_vid == 3));
        assert_eq!(rows[1].agg_cost, 3.0);
    }

    /// Unreachable pairs leave a sentinel row unless sentinels are disabled.
    #[test]
    fn test_unreachable_sentinel_row() {
        let rows = flatten(&[unreachable()], true).expect("flattens");
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_unreachable());
        assert_eq!(rows[0].node, 1);

        let rows = flatten(&[unreachable()], false).expect("flattens");
        assert!(rows.is_empty());
    }

    /// The trivial self-path contributes a zero-cost row at the source.
    #[test]
    fn test_trivial_path_row() {
        let rows = flatten(&[trivial()], false).expect("flattens");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].node, 4);
        assert_eq!(rows[0].edge, NO_EDGE);
        assert_eq!(rows[0].agg_cost, 0.0);
        assert!(!rows[0].is_unreachable());
    }

    /// Path ids follow input order and `seq` runs across paths.
    #[test]
    fn test_mixed_paths_keep_order() {
        let paths = [routed(), unreachable(), trivial()];
        let rows = flatten(&paths, true).expect("flattens");
        assert_eq!(
            rows.iter().map(|r| (r.seq, r.path_id)).collect::<Vec<_>>(),
            vec![(1, 1), (2, 1), (3, 2), (4, 3)]
        );
        assert_eq!(count_rows(&paths, true), 4);
        assert_eq!(count_rows(&paths, false), 3);
    }

    /// A skipped sentinel keeps its path id reserved.
    #[test]
    fn test_skipped_path_keeps_its_id() {
        let paths = [routed(), unreachable(), trivial()];
        let rows = flatten(&paths, false).expect("flattens");
        assert_eq!(
            rows.iter().map(|r| (r.seq, r.path_id)).collect::<Vec<_>>(),
            vec![(1, 1), (2, 1), (3, 3)]
        );
    }

    /// Rows never exceed total steps plus the number of pairs.
    #[test]
    fn test_row_count_bound() {
        let paths = [routed(), unreachable(), trivial(), routed()];
        let steps: usize = paths.iter().map(|p| p.steps.len()).sum();
        let rows = flatten(&paths, true).expect("flattens");
        assert!(rows.len() <= steps + paths.len());
    }

    #[test]
    fn test_empty_input_yields_no_rows() {
        assert!(flatten(&[], true).expect("flattens").is_empty());
    }
}
