//! Arc sets and their ordering.
//!
//! An arc over the interval `[src, dst]` with weight `w` states that
//! `x[dst] >= x[src] + w`. Minimum size requirements are forward arcs with
//! non-negative weights; maximum requirements are stored on the inverted
//! interval with a negated weight.

use std::fmt::Write;

use gridline_core::Interval;
use smallvec::SmallVec;

/// Index of an arc's weight in the weight table handed to the solver.
///
/// Several arcs may share one weight slot; changing the slot changes every
/// arc that points at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeightId(pub usize);

/// A weighted, invalidatable edge in the constraint graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc {
    pub span: Interval,
    pub weight: WeightId,
    /// `false` once the solver has excluded this arc as infeasible.
    pub valid: bool,
}

impl Arc {
    /// Create a new, valid arc.
    pub fn new(span: Interval, weight: WeightId) -> Self {
        Self {
            span,
            weight,
            valid: true,
        }
    }

    pub fn source(&self) -> usize {
        self.span.min as usize
    }

    pub fn destination(&self) -> usize {
        self.span.max as usize
    }

    /// Whether this arc encodes a maximum constraint.
    pub fn is_max_constraint(&self) -> bool {
        self.span.is_inverted()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    Pending,
    Done,
}

/// Group arc indices by their source vertex, keeping input order per vertex.
pub fn group_by_source(arcs: &[Arc], vertex_count: usize) -> Vec<SmallVec<[usize; 4]>> {
    let mut groups = vec![SmallVec::new(); vertex_count];
    for (index, arc) in arcs.iter().enumerate() {
        groups[arc.source()].push(index);
    }
    groups
}

/// Order arcs so that every arc entering a vertex precedes every arc leaving it.
///
/// Uses a reverse-postorder depth-first walk over the arcs grouped by source
/// vertex.
///
/// # Panics
///
/// Panics if the arcs contain a cycle. Arc sets built from a grid are acyclic
/// by construction, so a cycle means the arc set itself is malformed.
pub fn topological_sort(arcs: &[Arc], vertex_count: usize) -> Vec<Arc> {
    let by_source = group_by_source(arcs, vertex_count);
    let mut visited = vec![Visit::New; vertex_count];
    let mut postorder = Vec::with_capacity(arcs.len());

    for vertex in 0..vertex_count {
        walk(vertex, arcs, &by_source, &mut visited, &mut postorder);
    }

    postorder.iter().rev().map(|&index| arcs[index]).collect()
}

fn walk(
    vertex: usize,
    arcs: &[Arc],
    by_source: &[SmallVec<[usize; 4]>],
    visited: &mut [Visit],
    postorder: &mut Vec<usize>,
) {
    match visited[vertex] {
        Visit::New => {
            visited[vertex] = Visit::Pending;
            for &index in &by_source[vertex] {
                walk(arcs[index].destination(), arcs, by_source, visited, postorder);
                postorder.push(index);
            }
            visited[vertex] = Visit::Done;
        }
        Visit::Pending => panic!("constraint graph has a cycle through vertex {vertex}"),
        Visit::Done => {}
    }
}

/// Render arcs as inequalities over variables named `var`.
///
/// Forward arcs print as `x2 - x0 > 30`, inverted ones as `x2 - x0 < 5`.
pub fn describe_arcs<'a>(
    arcs: impl IntoIterator<Item = &'a Arc>,
    weights: &[i32],
    var: &str,
) -> String {
    let mut out = String::new();
    for (i, arc) in arcs.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let src = arc.span.min;
        let dst = arc.span.max;
        let value = weights[arc.weight.0];
        // Writing into a String cannot fail.
        let _ = if src < dst {
            write!(out, "{var}{dst} - {var}{src} > {value}")
        } else {
            write!(out, "{var}{src} - {var}{dst} < {}", -(value as i64))
        };
    }
    out
}
