//! Bellman-Ford variant for systems of difference constraints.
//!
//! A layout is a system of constraints `x[dst] - x[src] >= w`, equivalent to
//! a longest-path problem on a digraph. Minimum sizes give non-negative
//! weights and maximum sizes give negative ones, so plain Dijkstra does not
//! apply. Bellman-Ford relaxes every arc once per sweep and needs at most one
//! sweep per vertex unless the graph has a positive cycle, which here means
//! the maximum constraints cannot all be met.
//!
//! Arcs arrive topologically sorted, so a well-formed system settles in a
//! single sweep and the second sweep confirms it. When the system is
//! infeasible, one maximum-constraint arc implicated in the cycle is removed
//! per outer pass and solving starts over.

use crate::graph::Arc;

/// What happened during one call to [`solve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveReport {
    /// Outer passes run, including the final successful one.
    pub passes: usize,
    /// Whether a sweep finished without changing any location.
    pub converged: bool,
    /// Arcs still relaxing after the sweep budget of the first pass.
    pub culprits: Vec<usize>,
    /// Arcs invalidated by this call, in removal order.
    pub removed: Vec<usize>,
}

impl SolveReport {
    /// Whether the constraints were feasible without repair.
    pub fn is_clean(&self) -> bool {
        self.converged && self.removed.is_empty()
    }
}

/// Solve the arc system into `locations`, one entry per vertex.
///
/// Every location starts at 0, so the result is the pointwise smallest
/// non-negative assignment satisfying all valid arcs. Arcs found to be
/// infeasible are marked invalid in place and stay invalid for later calls.
pub fn solve(arcs: &mut [Arc], weights: &[i32], locations: &mut [i32]) -> SolveReport {
    let vertex_count = locations.len();
    let mut report = SolveReport::default();
    locations.fill(0);

    // Each pass either converges or removes one arc, so this bounds the work.
    for pass in 0..arcs.len() {
        report.passes = pass + 1;
        locations.fill(0);

        for _ in 0..vertex_count {
            let mut changed = false;
            for arc in arcs.iter() {
                changed |= relax(locations, arc, weights);
            }
            if !changed {
                report.converged = true;
                return report;
            }
        }

        let mut culprits = vec![false; arcs.len()];
        for _ in 0..vertex_count {
            for (flag, arc) in culprits.iter_mut().zip(arcs.iter()) {
                *flag |= relax(locations, arc, weights);
            }
        }

        if pass == 0 {
            report.culprits = culprits
                .iter()
                .enumerate()
                .filter_map(|(index, &flag)| flag.then_some(index))
                .collect();
        }

        // Minimum constraints alone are never inconsistent; only drop maximums.
        let dropped = culprits
            .iter()
            .zip(arcs.iter())
            .position(|(&flag, arc)| flag && arc.is_max_constraint());
        if let Some(index) = dropped {
            arcs[index].valid = false;
            report.removed.push(index);
            tracing::trace!(pass, interval = %arcs[index].span, "dropping infeasible maximum constraint");
        }
    }

    report
}

fn relax(locations: &mut [i32], arc: &Arc, weights: &[i32]) -> bool {
    if !arc.valid {
        return false;
    }
    let candidate = locations[arc.source()].saturating_add(weights[arc.weight.0]);
    let destination = &mut locations[arc.destination()];
    if candidate > *destination {
        *destination = candidate;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{topological_sort, WeightId};
    use gridline_core::Interval;
    use proptest::prelude::*;

    fn arc(min: i32, max: i32, weight: usize) -> Arc {
        Arc::new(Interval::new(min, max), WeightId(weight))
    }

    #[test]
    fn test_chain_of_minimums() {
        let weights = [10, 20];
        let mut arcs = vec![arc(0, 1, 0), arc(1, 2, 1)];
        let mut locations = vec![0; 3];

        let report = solve(&mut arcs, &weights, &mut locations);

        assert_eq!(locations, vec![0, 10, 30]);
        assert!(report.is_clean());
        assert_eq!(report.passes, 1);
    }

    #[test]
    fn test_spanning_minimum_widens_last_cell() {
        // [0,1) >= 10, [1,2) >= 20, [0,2) >= 50
        let weights = [10, 20, 50];
        let arcs = [arc(0, 1, 0), arc(1, 2, 1), arc(0, 2, 2)];
        let mut arcs = topological_sort(&arcs, 3);
        let mut locations = vec![0; 3];

        solve(&mut arcs, &weights, &mut locations);

        assert_eq!(locations, vec![0, 10, 50]);
    }

    #[test]
    fn test_feasible_maximum_is_kept() {
        // 10 <= x1 - x0 <= 30
        let weights = [10, -30];
        let mut arcs = vec![arc(0, 1, 0), arc(1, 0, 1)];
        let mut locations = vec![0; 2];

        let report = solve(&mut arcs, &weights, &mut locations);

        assert_eq!(locations, vec![0, 10]);
        assert!(report.is_clean());
        assert!(arcs.iter().all(|a| a.valid));
    }

    #[test]
    fn test_conflicting_maximum_is_dropped() {
        // x1 - x0 >= 20 but x1 - x0 <= 5
        let weights = [20, -5];
        let mut arcs = vec![arc(0, 1, 0), arc(1, 0, 1)];
        let mut locations = vec![0; 2];

        let report = solve(&mut arcs, &weights, &mut locations);

        assert_eq!(locations, vec![0, 20]);
        assert!(report.converged);
        assert_eq!(report.removed, vec![1]);
        assert_eq!(report.culprits, vec![0, 1]);
        assert_eq!(report.passes, 2);
        assert!(!arcs[1].valid);
        assert!(arcs[0].valid);
    }

    #[test]
    fn test_invalid_arc_stays_excluded() {
        let weights = [20, -5];
        let mut arcs = vec![arc(0, 1, 0), arc(1, 0, 1)];
        let mut locations = vec![0; 2];
        solve(&mut arcs, &weights, &mut locations);

        let report = solve(&mut arcs, &weights, &mut locations);

        assert_eq!(locations, vec![0, 20]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_no_arcs() {
        let mut locations = vec![7];
        let report = solve(&mut [], &[], &mut locations);
        assert_eq!(locations, vec![0]);
        assert_eq!(report.passes, 0);
    }

    proptest! {
        #[test]
        fn minimum_only_systems_solve_to_longest_paths(
            vertices in 2usize..10,
            raw in prop::collection::vec((0usize..10, 0usize..10, 0i32..100), 0..30),
        ) {
            let mut weights = Vec::new();
            let mut arcs = Vec::new();
            for (a, b, w) in raw {
                let (lo, hi) = (a % vertices, b % vertices);
                if lo == hi {
                    continue;
                }
                let (lo, hi) = (lo.min(hi) as i32, lo.max(hi) as i32);
                arcs.push(arc(lo, hi, weights.len()));
                weights.push(w);
            }
            let mut arcs = topological_sort(&arcs, vertices);
            let mut locations = vec![0; vertices];

            let report = solve(&mut arcs, &weights, &mut locations);
            prop_assert!(report.removed.is_empty());

            // Forward arcs only: the minimal solution is a longest-path DP in index order.
            let mut expected = vec![0; vertices];
            for v in 0..vertices {
                for a in arcs.iter().filter(|a| a.destination() == v) {
                    expected[v] = expected[v].max(expected[a.source()] + weights[a.weight.0]);
                }
            }
            prop_assert_eq!(&locations, &expected);
            for a in &arcs {
                prop_assert!(locations[a.destination()] >= locations[a.source()] + weights[a.weight.0]);
            }
        }
    }
}
