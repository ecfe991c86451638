//! Core value types for the gridline engine.

use std::fmt;

/// Marker for a value that has not been defined.
///
/// Equal to `i32::MIN` so that it never wins a `max()` aggregation unless it
/// is the only contributor.
pub const UNDEFINED: i32 = i32::MIN;

/// Upper bound used for "stretch to fill" sizes and unconstrained containers.
pub const MAX_SIZE: i32 = 100_000;

/// A half-open integer range `[min, max)`.
///
/// Intervals are immutable values. Besides describing the cells an element
/// occupies, an interval names a constraint edge from vertex `min` to vertex
/// `max`; a reversed interval (`min > max`) therefore encodes an "at most"
/// constraint as a negated forward edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub min: i32,
    pub max: i32,
}

impl Interval {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// The same interval with its end points swapped.
    pub const fn inverse(self) -> Self {
        Self {
            min: self.max,
            max: self.min,
        }
    }

    /// Number of cells covered, `max - min`. Negative for inverted intervals.
    pub const fn size(self) -> i32 {
        self.max - self.min
    }

    /// Whether this interval is not strictly forward (encodes a maximum constraint).
    pub const fn is_inverted(self) -> bool {
        self.min >= self.max
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// A measured width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size::new(0, 0);

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Extent along one axis.
    pub const fn along(self, horizontal: bool) -> i32 {
        if horizontal {
            self.width
        } else {
            self.height
        }
    }
}

/// A sizing request along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeasureSpec {
    /// No constraint; report the natural extent.
    #[default]
    Unspecified,
    /// The extent must be exactly this value.
    Exactly(i32),
    /// The extent may be anything up to this value.
    AtMost(i32),
}

impl MeasureSpec {
    /// The size carried by the request, 0 for `Unspecified`.
    pub const fn size(self) -> i32 {
        match self {
            MeasureSpec::Unspecified => 0,
            MeasureSpec::Exactly(size) | MeasureSpec::AtMost(size) => size,
        }
    }

    /// The `(min, max)` range of total extents this request allows.
    pub const fn range(self) -> (i32, i32) {
        match self {
            MeasureSpec::Unspecified => (0, MAX_SIZE),
            MeasureSpec::Exactly(size) => (size, size),
            MeasureSpec::AtMost(size) => (0, size),
        }
    }

    /// Derive the request for a child from its parent's request.
    ///
    /// `used` is the space the parent consumes itself (padding and margins).
    /// A fixed child dimension always wins; otherwise the child may take up
    /// to whatever the parent has left.
    pub fn for_child(parent: MeasureSpec, used: i32, fixed: Option<i32>) -> MeasureSpec {
        if let Some(size) = fixed {
            return MeasureSpec::Exactly(size.max(0));
        }
        let available = (parent.size() - used).max(0);
        match parent {
            MeasureSpec::Unspecified => MeasureSpec::Unspecified,
            MeasureSpec::Exactly(_) | MeasureSpec::AtMost(_) => MeasureSpec::AtMost(available),
        }
    }

    /// The same request with `amount` less room, never below zero.
    pub fn shrink(self, amount: i32) -> MeasureSpec {
        match self {
            MeasureSpec::Unspecified => MeasureSpec::Unspecified,
            MeasureSpec::Exactly(size) => MeasureSpec::Exactly((size - amount).max(0)),
            MeasureSpec::AtMost(size) => MeasureSpec::AtMost((size - amount).max(0)),
        }
    }

    /// Reconcile a content size with this request.
    pub fn resolve(self, content: i32) -> i32 {
        match self {
            MeasureSpec::Unspecified => content,
            MeasureSpec::Exactly(size) => size,
            MeasureSpec::AtMost(size) => content.min(size),
        }
    }
}
