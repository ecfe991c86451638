//! One axis of a grid: grouping, constraint assembly and solving.
//!
//! An axis turns the specs and measured extents of its elements into a set
//! of difference constraints over its grid lines, then solves them into line
//! locations. Every stage is cached and invalidated at one of two levels:
//!
//! - **structure**: spans or alignments changed, so groups, arc sets and the
//!   line count are rebuilt from scratch;
//! - **values**: only measurements or the container size changed, so the
//!   existing arc set is kept and just re-weighted and re-solved.
//!
//! Weights live in a table indexed by [`WeightId`]: the container minimum,
//! the negated container maximum, zero, then one slot per forward link and
//! one per backward link. Arcs hold slot ids, so a value pass refreshes the
//! table without touching the arcs.

use gridline_constraint::{describe_arcs, solve, topological_sort, Arc, SolveReport, WeightId};
use gridline_core::{Interval, MeasureSpec, SpecError, UNDEFINED};

use crate::bounds::Bounds;
use crate::packed::PackedMap;
use crate::params::Spec;

const PARENT_MIN: WeightId = WeightId(0);
const PARENT_MAX: WeightId = WeightId(1);
const ZERO: WeightId = WeightId(2);
const FIRST_LINK: usize = 3;

/// Which direction an axis runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisKind {
    /// Columns; lines are x coordinates.
    Horizontal,
    /// Rows; lines are y coordinates.
    Vertical,
}

impl AxisKind {
    pub fn is_horizontal(self) -> bool {
        self == AxisKind::Horizontal
    }

    pub fn name(self) -> &'static str {
        match self {
            AxisKind::Horizontal => "horizontal",
            AxisKind::Vertical => "vertical",
        }
    }

    /// Variable prefix used when printing constraints.
    fn variable(self) -> &'static str {
        match self {
            AxisKind::Horizontal => "x",
            AxisKind::Vertical => "y",
        }
    }
}

/// What elements align on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignmentMode {
    /// Align raw bounds: every element on a grid line is inset by the
    /// largest margin found on that line.
    AlignBounds,
    /// Align margin-expanded bounds: each element keeps its own margins.
    #[default]
    AlignMargins,
}

/// The elements an axis lays out, seen along that axis.
pub trait AxisSource {
    fn element_count(&self) -> usize;

    fn spec(&self, index: usize) -> Spec;

    /// Measured extent, margins excluded.
    fn measurement(&self, index: usize) -> i32;

    /// Offset of the element's content anchor from its leading edge.
    fn anchor(&self, _index: usize) -> Option<i32> {
        None
    }

    /// The element's own margin; `count` is the axis line count.
    fn margin(&self, _index: usize, _leading: bool, _count: i32) -> i32 {
        0
    }

    /// Collapsed elements keep their cells but contribute no extent.
    fn is_collapsed(&self, _index: usize) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
pub struct Axis {
    kind: AxisKind,
    defined_count: Option<i32>,
    order_preserved: bool,
    alignment_mode: AlignmentMode,

    max_index: Option<i32>,

    group_bounds: Option<PackedMap<Spec, Bounds>>,
    group_bounds_valid: bool,

    forward_links: Option<PackedMap<Interval, i32>>,
    forward_links_valid: bool,

    backward_links: Option<PackedMap<Interval, i32>>,
    backward_links_valid: bool,

    leading_margins: Option<Vec<i32>>,
    leading_margins_valid: bool,

    trailing_margins: Option<Vec<i32>>,
    trailing_margins_valid: bool,

    arcs: Option<Vec<Arc>>,
    arcs_valid: bool,

    locations: Option<Vec<i32>>,
    locations_valid: bool,

    parent_min: i32,
    parent_max: i32,

    report: SolveReport,
}

impl Axis {
    pub fn new(kind: AxisKind) -> Self {
        Self {
            kind,
            defined_count: None,
            order_preserved: true,
            alignment_mode: AlignmentMode::default(),
            max_index: None,
            group_bounds: None,
            group_bounds_valid: false,
            forward_links: None,
            forward_links_valid: false,
            backward_links: None,
            backward_links_valid: false,
            leading_margins: None,
            leading_margins_valid: false,
            trailing_margins: None,
            trailing_margins_valid: false,
            arcs: None,
            arcs_valid: false,
            locations: None,
            locations_valid: false,
            parent_min: 0,
            parent_max: -gridline_core::MAX_SIZE,
            report: SolveReport::default(),
        }
    }

    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    pub fn defined_count(&self) -> Option<i32> {
        self.defined_count
    }

    /// Fix the number of cells, or let the spans decide with `None`.
    pub fn set_defined_count(&mut self, count: Option<i32>) -> Result<(), SpecError> {
        if let Some(count) = count {
            if count < 0 {
                return Err(SpecError::NegativeCount { count });
            }
        }
        if self.defined_count != count {
            self.defined_count = count;
            self.invalidate_structure();
        }
        Ok(())
    }

    pub fn is_order_preserved(&self) -> bool {
        self.order_preserved
    }

    pub fn set_order_preserved(&mut self, order_preserved: bool) {
        if self.order_preserved != order_preserved {
            self.order_preserved = order_preserved;
            self.invalidate_structure();
        }
    }

    pub fn alignment_mode(&self) -> AlignmentMode {
        self.alignment_mode
    }

    pub fn set_alignment_mode(&mut self, mode: AlignmentMode) {
        if self.alignment_mode != mode {
            self.alignment_mode = mode;
            self.invalidate_values();
        }
    }

    /// Number of cells: the defined count or the highest span end point,
    /// whichever is larger.
    pub fn count<S: AxisSource>(&mut self, src: &S) -> i32 {
        let max_index = *self.max_index.get_or_insert_with(|| max_span_end(src));
        self.defined_count.unwrap_or(0).max(max_index)
    }

    /// Drop every cache, including the arc set and its exclusions.
    pub fn invalidate_structure(&mut self) {
        self.max_index = None;
        self.group_bounds = None;
        self.forward_links = None;
        self.backward_links = None;
        self.leading_margins = None;
        self.trailing_margins = None;
        self.arcs = None;
        self.locations = None;
        self.invalidate_values();
    }

    /// Keep the structure but recompute every value on next use.
    pub fn invalidate_values(&mut self) {
        self.group_bounds_valid = false;
        self.forward_links_valid = false;
        self.backward_links_valid = false;
        self.leading_margins_valid = false;
        self.trailing_margins_valid = false;
        self.arcs_valid = false;
        self.locations_valid = false;
    }

    /// Per-group extents, one entry per distinct spec.
    pub fn group_bounds<S: AxisSource>(&mut self, src: &S) -> &PackedMap<Spec, Bounds> {
        let mut groups = match self.group_bounds.take() {
            Some(groups) => groups,
            None => (0..src.element_count())
                .map(|i| {
                    let spec = src.spec(i);
                    (spec, spec.alignment.resolve(self.kind.is_horizontal()).bounds())
                })
                .collect(),
        };
        if !self.group_bounds_valid {
            self.compute_group_bounds(src, &mut groups);
            self.group_bounds_valid = true;
        }
        self.group_bounds.insert(groups)
    }

    fn compute_group_bounds<S: AxisSource>(&mut self, src: &S, groups: &mut PackedMap<Spec, Bounds>) {
        groups.values.iter_mut().for_each(Bounds::reset);
        let horizontal = self.kind.is_horizontal();
        for i in 0..src.element_count() {
            let spec = src.spec(i);
            let extent = self.extent_including_margin(src, i);
            let value = spec.alignment.resolve(horizontal).value(extent, src.anchor(i));
            groups.value_mut(i).include(extent, value, spec.is_flexible());
        }
    }

    /// Largest group minimum for every distinct span.
    pub fn forward_links<S: AxisSource>(&mut self, src: &S) -> &PackedMap<Interval, i32> {
        let mut links = match self.forward_links.take() {
            Some(links) => links,
            None => self.create_links(src, true),
        };
        if !self.forward_links_valid {
            self.compute_links(src, &mut links, true);
            self.forward_links_valid = true;
        }
        self.forward_links.insert(links)
    }

    /// Negated group maximum for every distinct span, keyed on the inverted span.
    pub fn backward_links<S: AxisSource>(&mut self, src: &S) -> &PackedMap<Interval, i32> {
        let mut links = match self.backward_links.take() {
            Some(links) => links,
            None => self.create_links(src, false),
        };
        if !self.backward_links_valid {
            self.compute_links(src, &mut links, false);
            self.backward_links_valid = true;
        }
        self.backward_links.insert(links)
    }

    fn create_links<S: AxisSource>(&mut self, src: &S, want_min: bool) -> PackedMap<Interval, i32> {
        self.group_bounds(src)
            .keys
            .iter()
            .map(|spec| {
                let span = if want_min { spec.span } else { spec.span.inverse() };
                (span, UNDEFINED)
            })
            .collect()
    }

    fn compute_links<S: AxisSource>(
        &mut self,
        src: &S,
        links: &mut PackedMap<Interval, i32>,
        want_min: bool,
    ) {
        links.values.fill(UNDEFINED);
        let groups = self.group_bounds(src);
        for (i, bounds) in groups.values.iter().enumerate() {
            let size = bounds.size(want_min);
            let value = links.value_mut(i);
            *value = (*value).max(if want_min { size } else { -size });
        }
    }

    /// The arc set, sorted: minimum arcs first, then maximum arcs.
    pub fn arcs<S: AxisSource>(&mut self, src: &S) -> &[Arc] {
        let arcs = match self.arcs.take() {
            Some(arcs) => arcs,
            None => self.create_arcs(src),
        };
        if !self.arcs_valid {
            // Arcs point at link slots; refreshing the links refreshes the arcs.
            self.forward_links(src);
            self.backward_links(src);
            self.arcs_valid = true;
        }
        self.arcs.insert(arcs)
    }

    fn create_arcs<S: AxisSource>(&mut self, src: &S) -> Vec<Arc> {
        let forward = self.forward_links(src).keys.clone();
        let backward = self.backward_links(src).keys.clone();
        let count = self.count(src);
        let mut mins = Vec::new();
        let mut maxs = Vec::new();

        for (slot, &span) in forward.iter().enumerate() {
            include(&mut mins, span, WeightId(FIRST_LINK + slot), false);
        }
        for (slot, &span) in backward.iter().enumerate() {
            include(&mut maxs, span, WeightId(FIRST_LINK + forward.len() + slot), false);
        }

        if self.order_preserved {
            for i in 0..count {
                include(&mut mins, Interval::new(i, i + 1), ZERO, true);
            }
        }

        include(&mut mins, Interval::new(0, count), PARENT_MIN, false);
        include(&mut maxs, Interval::new(count, 0), PARENT_MAX, false);

        let vertex_count = count as usize + 1;
        let mut arcs = topological_sort(&mins, vertex_count);
        arcs.extend(topological_sort(&maxs, vertex_count));
        arcs
    }

    /// Current weight table; the slots match [`WeightId`]s held by the arcs.
    pub fn weights<S: AxisSource>(&mut self, src: &S) -> Vec<i32> {
        let mut weights = vec![self.parent_min, self.parent_max, 0];
        weights.extend_from_slice(&self.forward_links(src).values);
        weights.extend_from_slice(&self.backward_links(src).values);
        weights
    }

    fn leading_margins<S: AxisSource>(&mut self, src: &S) -> &[i32] {
        let count = self.count(src);
        let mut margins = self.leading_margins.take().unwrap_or_default();
        if !self.leading_margins_valid {
            line_margins(src, &mut margins, count, true);
            self.leading_margins_valid = true;
        }
        self.leading_margins.insert(margins)
    }

    fn trailing_margins<S: AxisSource>(&mut self, src: &S) -> &[i32] {
        let count = self.count(src);
        let mut margins = self.trailing_margins.take().unwrap_or_default();
        if !self.trailing_margins_valid {
            line_margins(src, &mut margins, count, false);
            self.trailing_margins_valid = true;
        }
        self.trailing_margins.insert(margins)
    }

    /// Margin applied to element `index` on one side, per the alignment mode.
    pub fn margin<S: AxisSource>(&mut self, src: &S, index: usize, leading: bool) -> i32 {
        match self.alignment_mode {
            AlignmentMode::AlignMargins => {
                let count = self.count(src);
                src.margin(index, leading, count)
            }
            AlignmentMode::AlignBounds => {
                let span = src.spec(index).span;
                if leading {
                    self.leading_margins(src)[span.min as usize]
                } else {
                    self.trailing_margins(src)[span.max as usize]
                }
            }
        }
    }

    pub fn total_margin<S: AxisSource>(&mut self, src: &S, index: usize) -> i32 {
        self.margin(src, index, true) + self.margin(src, index, false)
    }

    /// Extent an element claims: its measurement plus margins, or 0 when
    /// collapsed.
    pub fn extent_including_margin<S: AxisSource>(&mut self, src: &S, index: usize) -> i32 {
        if src.is_collapsed(index) {
            return 0;
        }
        src.measurement(index) + self.total_margin(src, index)
    }

    /// Solved grid line positions, `count + 1` entries.
    pub fn locations<S: AxisSource>(&mut self, src: &S) -> &[i32] {
        let count = self.count(src);
        let mut locations = match self.locations.take() {
            Some(locations) => locations,
            None => vec![0; count as usize + 1],
        };
        if !self.locations_valid {
            self.compute_locations(src, &mut locations);
            self.locations_valid = true;
        }
        self.locations.insert(locations)
    }

    fn compute_locations<S: AxisSource>(&mut self, src: &S, locations: &mut [i32]) {
        self.arcs(src);
        let weights = self.weights(src);
        let Some(arcs) = self.arcs.as_mut() else {
            return;
        };

        let report = solve(arcs, &weights, locations);
        let var = self.kind.variable();
        if !report.culprits.is_empty() {
            let culprits = describe_arcs(report.culprits.iter().map(|&i| &arcs[i]), &weights, var);
            let removed = describe_arcs(arcs.iter().filter(|arc| !arc.valid), &weights, var);
            tracing::debug!(
                axis = self.kind.name(),
                passes = report.passes,
                "{} constraints: {} are inconsistent; permanently removing: {}",
                self.kind.name(),
                culprits,
                removed
            );
        }
        if !report.converged && !arcs.is_empty() {
            tracing::warn!(
                axis = self.kind.name(),
                passes = report.passes,
                "constraint repair did not converge"
            );
        }
        self.report = report;

        if !self.order_preserved {
            let origin = locations[0];
            for location in locations.iter_mut() {
                *location -= origin;
            }
        }
    }

    fn set_parent_constraints(&mut self, min: i32, max: i32) {
        self.parent_min = min;
        self.parent_max = max.saturating_neg();
        self.locations_valid = false;
    }

    /// Total extent the elements need under `spec`.
    pub fn measure<S: AxisSource>(&mut self, src: &S, spec: MeasureSpec) -> i32 {
        let (min, max) = spec.range();
        self.set_parent_constraints(min, max);
        let count = self.count(src) as usize;
        self.locations(src)[count]
    }

    /// Solve for an exact total extent.
    pub fn layout<S: AxisSource>(&mut self, src: &S, size: i32) {
        self.set_parent_constraints(size, size);
        self.locations(src);
    }

    /// Outcome of the most recent solve.
    pub fn report(&self) -> &SolveReport {
        &self.report
    }

    /// Arcs excluded as infeasible since the last structural change.
    pub fn dropped_arcs(&self) -> Vec<Arc> {
        self.arcs
            .iter()
            .flatten()
            .filter(|arc| !arc.valid)
            .copied()
            .collect()
    }

    /// Render the excluded arcs as inequalities.
    pub fn describe_dropped<S: AxisSource>(&mut self, src: &S) -> String {
        let weights = self.weights(src);
        describe_arcs(&self.dropped_arcs(), &weights, self.kind.variable())
    }
}

/// Largest span end point, 0 without elements.
fn max_span_end<S: AxisSource>(src: &S) -> i32 {
    (0..src.element_count())
        .map(|i| {
            let span = src.spec(i).span;
            span.min.max(span.max)
        })
        .max()
        .unwrap_or(0)
        .max(0)
}

fn line_margins<S: AxisSource>(src: &S, margins: &mut Vec<i32>, count: i32, leading: bool) {
    margins.clear();
    margins.resize(count as usize + 1, 0);
    for i in 0..src.element_count() {
        if src.is_collapsed(i) {
            continue;
        }
        let span = src.spec(i).span;
        let line = (if leading { span.min } else { span.max }) as usize;
        margins[line] = margins[line].max(src.margin(i, leading, count));
    }
}

/// Append an arc unless its span is empty or, when deduplicating, already present.
fn include(arcs: &mut Vec<Arc>, span: Interval, weight: WeightId, dedupe: bool) {
    if span.size() == 0 {
        return;
    }
    if dedupe && arcs.iter().any(|arc| arc.span == span) {
        return;
    }
    arcs.push(Arc::new(span, weight));
}
