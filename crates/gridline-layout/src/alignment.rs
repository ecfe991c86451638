//! Placement of an element within its cell along one axis.

use crate::bounds::Bounds;

/// How an element sits inside the cells it spans.
///
/// `Undefined` is the alignment of a spec that did not name one. It resolves
/// to `Leading` on the column axis and `ContentAnchor` on the row axis, and
/// it is the only alignment whose cells do not stretch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    #[default]
    Undefined,
    /// Start edge (left or top).
    Leading,
    /// End edge (right or bottom).
    Trailing,
    Center,
    /// Line up on the element's content anchor (a text baseline).
    ContentAnchor,
    /// Stretch to the cell.
    Fill,
}

impl Alignment {
    pub const LEFT: Alignment = Alignment::Leading;
    pub const TOP: Alignment = Alignment::Leading;
    pub const RIGHT: Alignment = Alignment::Trailing;
    pub const BOTTOM: Alignment = Alignment::Trailing;
    pub const BASELINE: Alignment = Alignment::ContentAnchor;

    /// Replace `Undefined` with the default for the given axis.
    pub fn resolve(self, horizontal: bool) -> Alignment {
        match self {
            Alignment::Undefined if horizontal => Alignment::Leading,
            Alignment::Undefined => Alignment::ContentAnchor,
            other => other,
        }
    }

    /// Offset of the alignment point within an element of `extent`.
    ///
    /// `anchor` is the element's content anchor, if it has one. `None` means
    /// the alignment has no point of its own.
    pub fn value(self, extent: i32, anchor: Option<i32>) -> Option<i32> {
        match self {
            Alignment::Leading => Some(0),
            Alignment::Trailing => Some(extent),
            Alignment::Center => Some(extent >> 1),
            Alignment::ContentAnchor => anchor,
            Alignment::Fill | Alignment::Undefined => None,
        }
    }

    /// Final extent of an element measured at `measured` in a cell of `cell`.
    pub fn size_in_cell(self, measured: i32, cell: i32) -> i32 {
        match self {
            Alignment::Fill => cell,
            _ => measured,
        }
    }

    /// Fresh accumulator for a group of elements sharing this alignment.
    pub fn bounds(self) -> Bounds {
        match self {
            Alignment::ContentAnchor => Bounds::content_anchor(),
            _ => Bounds::new(),
        }
    }

    /// Whether cells with this (unresolved) alignment may grow.
    pub fn is_flexible(self) -> bool {
        self != Alignment::Undefined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values() {
        assert_eq!(Alignment::Leading.value(11, Some(3)), Some(0));
        assert_eq!(Alignment::Trailing.value(11, Some(3)), Some(11));
        assert_eq!(Alignment::Center.value(11, Some(3)), Some(5));
        assert_eq!(Alignment::ContentAnchor.value(11, Some(3)), Some(3));
        assert_eq!(Alignment::ContentAnchor.value(11, None), None);
        assert_eq!(Alignment::Fill.value(11, Some(3)), None);
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Alignment::Undefined.resolve(true), Alignment::Leading);
        assert_eq!(Alignment::Undefined.resolve(false), Alignment::ContentAnchor);
        assert_eq!(Alignment::Center.resolve(false), Alignment::Center);
    }

    #[test]
    fn test_size_in_cell() {
        assert_eq!(Alignment::Fill.size_in_cell(10, 40), 40);
        assert_eq!(Alignment::Center.size_in_cell(10, 40), 10);
    }

    #[test]
    fn test_flexible() {
        assert!(!Alignment::Undefined.is_flexible());
        assert!(Alignment::Leading.is_flexible());
        assert!(Alignment::Fill.is_flexible());
    }
}
