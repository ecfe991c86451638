//! Extent accumulators for groups of elements sharing a spec.
//!
//! Every element in a group reports its extent and the position of its
//! alignment point. The group keeps the largest extent before and after that
//! point, which is the smallest size the group's cells can have while every
//! member stays aligned.

use gridline_core::{MAX_SIZE, UNDEFINED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsKind {
    Plain,
    /// Members without an anchor still need room; `size` tracks the largest
    /// extent of any member.
    ContentAnchor { size: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounds {
    pub before: i32,
    pub after: i32,
    /// Cleared as soon as one member is inflexible.
    pub flexible: bool,
    pub kind: BoundsKind,
}

impl Bounds {
    pub fn new() -> Self {
        Self {
            before: UNDEFINED,
            after: UNDEFINED,
            flexible: true,
            kind: BoundsKind::Plain,
        }
    }

    pub fn content_anchor() -> Self {
        Self {
            kind: BoundsKind::ContentAnchor { size: UNDEFINED },
            ..Self::new()
        }
    }

    pub fn reset(&mut self) {
        self.before = UNDEFINED;
        self.after = UNDEFINED;
        self.flexible = true;
        if let BoundsKind::ContentAnchor { size } = &mut self.kind {
            *size = UNDEFINED;
        }
    }

    /// Add one member of `extent` whose alignment point sits at `value`.
    pub fn include(&mut self, extent: i32, value: Option<i32>, flexible: bool) {
        self.flexible &= flexible;
        match &mut self.kind {
            BoundsKind::Plain => {
                let value = value.unwrap_or(0);
                self.before = self.before.max(value);
                self.after = self.after.max(extent - value);
            }
            BoundsKind::ContentAnchor { size } => {
                if let Some(value) = value {
                    self.before = self.before.max(value);
                    self.after = self.after.max(extent - value);
                }
                *size = (*size).max(extent);
            }
        }
    }

    /// Extent the group needs.
    ///
    /// Asked for a maximum, a flexible group answers [`MAX_SIZE`].
    pub fn size(&self, want_min: bool) -> i32 {
        let aligned = if !want_min && self.flexible {
            MAX_SIZE
        } else if self.before == UNDEFINED {
            0
        } else {
            self.before + self.after
        };
        match self.kind {
            BoundsKind::Plain => aligned,
            BoundsKind::ContentAnchor { size } => aligned.max(size),
        }
    }

    /// Distance from the group's start to a member's start, given the
    /// member's alignment point.
    pub fn offset(&self, value: Option<i32>) -> i32 {
        match self.kind {
            BoundsKind::Plain => self.before - value.unwrap_or(0),
            BoundsKind::ContentAnchor { .. } => match value {
                Some(value) if self.before != UNDEFINED => (self.before - value).max(0),
                _ => 0,
            },
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_group_has_no_size() {
        assert_eq!(Bounds::new().size(true), 0);
        assert_eq!(Bounds::content_anchor().size(true), 0);
    }

    #[test]
    fn test_centered_members() {
        let mut bounds = Bounds::new();
        bounds.include(10, Some(5), true);
        bounds.include(30, Some(15), true);
        assert_eq!(bounds.size(true), 30);
        assert_eq!(bounds.offset(Some(5)), 10);
        assert_eq!(bounds.size(false), MAX_SIZE);
    }

    #[test]
    fn test_inflexible_member_pins_maximum() {
        let mut bounds = Bounds::new();
        bounds.include(20, Some(0), true);
        bounds.include(5, Some(0), false);
        assert!(!bounds.flexible);
        assert_eq!(bounds.size(false), 20);
    }

    #[test]
    fn test_fill_members_start_at_zero() {
        let mut bounds = Bounds::new();
        bounds.include(12, None, true);
        assert_eq!(bounds.size(true), 12);
        assert_eq!(bounds.offset(None), 0);
    }

    #[test]
    fn test_content_anchor_lines_up_anchors() {
        let mut bounds = Bounds::content_anchor();
        bounds.include(30, Some(20), false);
        bounds.include(20, Some(5), false);
        assert_eq!(bounds.size(true), 35);
        assert_eq!(bounds.offset(Some(20)), 0);
        assert_eq!(bounds.offset(Some(5)), 15);
    }

    #[test]
    fn test_content_anchor_without_anchor() {
        let mut bounds = Bounds::content_anchor();
        bounds.include(10, Some(8), false);
        bounds.include(25, None, false);
        assert_eq!(bounds.size(true), 25);
        assert_eq!(bounds.offset(None), 0);
    }

    #[test]
    fn test_reset() {
        let mut bounds = Bounds::content_anchor();
        bounds.include(10, Some(8), false);
        bounds.reset();
        assert_eq!(bounds, Bounds::content_anchor());
    }
}
