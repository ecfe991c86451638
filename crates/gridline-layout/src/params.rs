//! Cell specs and per-child layout parameters.

use std::hash::{Hash, Hasher};

use gridline_core::{Interval, SpecError};

use crate::alignment::Alignment;

/// Where an element sits along one axis: the cells it spans and how it is
/// aligned within them.
///
/// Equality and hashing consider the span and alignment only. Elements with
/// equal specs form one group that shares a single [`Bounds`](crate::Bounds).
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spec {
    pub span: Interval,
    pub alignment: Alignment,
    /// `false` until the start cell is given explicitly; auto-placement
    /// chooses the start for such specs.
    pub start_defined: bool,
}

impl Spec {
    /// One auto-placed cell, alignment left to the axis default.
    pub const UNDEFINED: Spec = Spec {
        span: Interval::new(0, 1),
        alignment: Alignment::Undefined,
        start_defined: false,
    };

    /// The single cell `start`.
    pub fn at(start: i32) -> Result<Spec, SpecError> {
        Self::span(start, 1)
    }

    /// `size` cells beginning at `start`.
    pub fn span(start: i32, size: i32) -> Result<Spec, SpecError> {
        Self::aligned(start, size, Alignment::Undefined)
    }

    pub fn aligned(start: i32, size: i32, alignment: Alignment) -> Result<Spec, SpecError> {
        if start < 0 {
            return Err(SpecError::NegativeStart { start });
        }
        if size < 0 {
            return Err(SpecError::NegativeSize { size });
        }
        Ok(Spec {
            span: Interval::new(start, start + size),
            alignment,
            start_defined: true,
        })
    }

    /// `size` cells whose start is chosen by auto-placement.
    pub fn auto(size: i32, alignment: Alignment) -> Result<Spec, SpecError> {
        if size < 0 {
            return Err(SpecError::NegativeSize { size });
        }
        Ok(Spec {
            span: Interval::new(0, size),
            alignment,
            start_defined: false,
        })
    }

    pub fn with_alignment(self, alignment: Alignment) -> Spec {
        Spec { alignment, ..self }
    }

    pub(crate) fn with_span(self, span: Interval) -> Spec {
        Spec { span, ..self }
    }

    pub fn is_flexible(&self) -> bool {
        self.alignment.is_flexible()
    }
}

impl Default for Spec {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl PartialEq for Spec {
    fn eq(&self, other: &Self) -> bool {
        self.span == other.span && self.alignment == other.alignment
    }
}

impl Eq for Spec {}

impl Hash for Spec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.span.hash(state);
        self.alignment.hash(state);
    }
}

/// Per-child settings: a spec for each axis, optional margins and optional
/// fixed dimensions.
///
/// A margin left as `None` is filled in by the container's default-margin
/// rule. A dimension left as `None` lets the child size itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutParams {
    pub row_spec: Spec,
    pub column_spec: Spec,
    pub left_margin: Option<i32>,
    pub top_margin: Option<i32>,
    pub right_margin: Option<i32>,
    pub bottom_margin: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl LayoutParams {
    pub fn new(row_spec: Spec, column_spec: Spec) -> Self {
        Self {
            row_spec,
            column_spec,
            ..Self::default()
        }
    }

    /// Child at cell `(row, column)`.
    pub fn cell(row: i32, column: i32) -> Result<Self, SpecError> {
        Ok(Self::new(Spec::at(row)?, Spec::at(column)?))
    }

    pub fn with_margins(mut self, left: i32, top: i32, right: i32, bottom: i32) -> Self {
        self.left_margin = Some(left);
        self.top_margin = Some(top);
        self.right_margin = Some(right);
        self.bottom_margin = Some(bottom);
        self
    }

    pub fn with_size(mut self, width: Option<i32>, height: Option<i32>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the column alignment and the row alignment.
    pub fn with_alignment(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.column_spec = self.column_spec.with_alignment(horizontal);
        self.row_spec = self.row_spec.with_alignment(vertical);
        self
    }

    /// The column spec for the horizontal axis, the row spec otherwise.
    pub fn spec(&self, horizontal: bool) -> &Spec {
        if horizontal {
            &self.column_spec
        } else {
            &self.row_spec
        }
    }

    pub fn spec_mut(&mut self, horizontal: bool) -> &mut Spec {
        if horizontal {
            &mut self.column_spec
        } else {
            &mut self.row_spec
        }
    }

    /// Explicit margin on the leading or trailing side of an axis.
    pub fn margin(&self, horizontal: bool, leading: bool) -> Option<i32> {
        match (horizontal, leading) {
            (true, true) => self.left_margin,
            (true, false) => self.right_margin,
            (false, true) => self.top_margin,
            (false, false) => self.bottom_margin,
        }
    }

    /// Explicit fixed dimension along an axis.
    pub fn dimension(&self, horizontal: bool) -> Option<i32> {
        if horizontal {
            self.width
        } else {
            self.height
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_constructors() {
        let spec = Spec::span(2, 3).unwrap();
        assert_eq!(spec.span, Interval::new(2, 5));
        assert!(spec.start_defined);
        assert!(!spec.is_flexible());

        let spec = Spec::auto(2, Alignment::Fill).unwrap();
        assert!(!spec.start_defined);
        assert!(spec.is_flexible());
    }

    #[test]
    fn test_rejects_negative_input() {
        assert_eq!(Spec::at(-1), Err(SpecError::NegativeStart { start: -1 }));
        assert_eq!(
            Spec::aligned(0, -2, Alignment::Center),
            Err(SpecError::NegativeSize { size: -2 })
        );
    }

    #[test]
    fn test_equality_ignores_start_defined() {
        let explicit = Spec::span(0, 1).unwrap();
        let auto = Spec::UNDEFINED;
        assert_eq!(explicit, auto);

        let set: HashSet<Spec> = [explicit, auto].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_ne!(explicit, explicit.with_alignment(Alignment::Center));
    }

    #[test]
    fn test_params_accessors() {
        let params = LayoutParams::cell(1, 2)
            .unwrap()
            .with_margins(1, 2, 3, 4)
            .with_alignment(Alignment::Center, Alignment::Fill);
        assert_eq!(params.spec(true).span, Interval::new(2, 3));
        assert_eq!(params.spec(false).alignment, Alignment::Fill);
        assert_eq!(params.margin(true, false), Some(3));
        assert_eq!(params.margin(false, true), Some(2));
        assert_eq!(params.dimension(true), None);
    }
}
