//! Grid container.
//!
//! Children occupy rectangular blocks of cells. Measuring solves the primary
//! axis first, re-measures children that fill their cells along it, then
//! solves the other axis. Layout solves both axes at the final size and
//! places each child inside its cells.

use gridline_core::{GridError, LayoutError, MeasureSpec, Size, SpecError};

use crate::alignment::Alignment;
use crate::axis::{AlignmentMode, Axis, AxisKind, AxisSource};
use crate::params::{LayoutParams, Spec};
use crate::placement::assign_cells;
use crate::rect::Rect;

/// Default spacing between neighbouring elements when default margins are on.
pub const DEFAULT_GAP: i32 = 16;

/// Direction auto-placed children flow in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Fill a row, then wrap to the next one at the column count.
    #[default]
    Horizontal,
    /// Fill a column, then wrap at the row count.
    Vertical,
}

/// Padding on all sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Padding {
    /// Create uniform padding.
    pub fn uniform(value: i32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create symmetric padding.
    pub fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Total horizontal padding.
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical padding.
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Container settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub orientation: Orientation,
    pub row_count: Option<i32>,
    pub column_count: Option<i32>,
    pub row_order_preserved: bool,
    pub column_order_preserved: bool,
    pub alignment_mode: AlignmentMode,
    pub use_default_margins: bool,
    pub default_gap: i32,
    pub padding: Padding,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            row_count: None,
            column_count: None,
            row_order_preserved: true,
            column_order_preserved: true,
            alignment_mode: AlignmentMode::AlignMargins,
            use_default_margins: false,
            default_gap: DEFAULT_GAP,
            padding: Padding::default(),
        }
    }
}

impl GridConfig {
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_row_count(mut self, count: i32) -> Self {
        self.row_count = Some(count);
        self
    }

    pub fn with_column_count(mut self, count: i32) -> Self {
        self.column_count = Some(count);
        self
    }

    pub fn with_order_preserved(mut self, rows: bool, columns: bool) -> Self {
        self.row_order_preserved = rows;
        self.column_order_preserved = columns;
        self
    }

    pub fn with_alignment_mode(mut self, mode: AlignmentMode) -> Self {
        self.alignment_mode = mode;
        self
    }

    pub fn with_default_margins(mut self, enabled: bool) -> Self {
        self.use_default_margins = enabled;
        self
    }

    pub fn with_gap(mut self, gap: i32) -> Self {
        self.default_gap = gap;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }
}

/// Something a grid can size and place.
pub trait Measurable {
    /// Report the element's size under the given width and height requests.
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size;

    /// Offset of the content anchor (text baseline) from the top edge.
    fn baseline(&self) -> Option<i32> {
        None
    }

    /// Collapsed elements keep their cells but take no space.
    fn is_collapsed(&self) -> bool {
        false
    }

    /// Spacers get no default margins.
    fn is_spacer(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
struct Child<C> {
    element: C,
    params: LayoutParams,
    measured: Size,
}

/// The children as seen along one axis.
struct AxisView<'a, C> {
    children: &'a [Child<C>],
    config: &'a GridConfig,
    horizontal: bool,
}

impl<C: Measurable> AxisSource for AxisView<'_, C> {
    fn element_count(&self) -> usize {
        self.children.len()
    }

    fn spec(&self, index: usize) -> Spec {
        *self.children[index].params.spec(self.horizontal)
    }

    fn measurement(&self, index: usize) -> i32 {
        self.children[index].measured.along(self.horizontal)
    }

    fn anchor(&self, index: usize) -> Option<i32> {
        // Only rows line up on baselines.
        if self.horizontal {
            None
        } else {
            self.children[index].element.baseline()
        }
    }

    fn margin(&self, index: usize, leading: bool, count: i32) -> i32 {
        let child = &self.children[index];
        if let Some(margin) = child.params.margin(self.horizontal, leading) {
            return margin;
        }
        if !self.config.use_default_margins || child.element.is_spacer() {
            return 0;
        }
        let span = child.params.spec(self.horizontal).span;
        let at_edge = if leading {
            span.min == 0
        } else {
            span.max == count
        };
        if at_edge {
            0
        } else {
            self.config.default_gap / 2
        }
    }

    fn is_collapsed(&self, index: usize) -> bool {
        self.children[index].element.is_collapsed()
    }
}

/// A container laying out children on a grid of rows and columns.
#[derive(Debug, Clone)]
pub struct GridLayout<C> {
    children: Vec<Child<C>>,
    config: GridConfig,
    horizontal_axis: Axis,
    vertical_axis: Axis,
    params_valid: bool,
}

impl<C: Measurable> GridLayout<C> {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            config: GridConfig::default(),
            horizontal_axis: Axis::new(AxisKind::Horizontal),
            vertical_axis: Axis::new(AxisKind::Vertical),
            params_valid: false,
        }
    }

    /// Create a grid from a configuration, rejecting negative counts.
    pub fn with_config(config: GridConfig) -> Result<Self, GridError> {
        let mut grid = Self::new();
        grid.horizontal_axis.set_defined_count(config.column_count)?;
        grid.vertical_axis.set_defined_count(config.row_count)?;
        grid.horizontal_axis.set_order_preserved(config.column_order_preserved);
        grid.vertical_axis.set_order_preserved(config.row_order_preserved);
        grid.horizontal_axis.set_alignment_mode(config.alignment_mode);
        grid.vertical_axis.set_alignment_mode(config.alignment_mode);
        grid.config = config;
        Ok(grid)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Append a child and return its index.
    pub fn add_child(&mut self, element: C, params: LayoutParams) -> usize {
        self.children.push(Child {
            element,
            params,
            measured: Size::ZERO,
        });
        self.invalidate_structure();
        self.children.len() - 1
    }

    pub fn remove_child(&mut self, index: usize) -> Result<C, GridError> {
        self.check_index(index)?;
        let child = self.children.remove(index);
        self.invalidate_structure();
        Ok(child.element)
    }

    pub fn child(&self, index: usize) -> Option<&C> {
        self.children.get(index).map(|child| &child.element)
    }

    /// Mutable access to a child. Measurements are refreshed on the next
    /// pass; call [`GridLayout::notify_child_changed`] if the change
    /// affects collapsing.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut C> {
        self.invalidate_values();
        self.children.get_mut(index).map(|child| &mut child.element)
    }

    /// Parameters of a child. Auto-placed spans reflect the last placement.
    pub fn params(&self, index: usize) -> Option<&LayoutParams> {
        self.children.get(index).map(|child| &child.params)
    }

    pub fn set_params(&mut self, index: usize, params: LayoutParams) -> Result<(), GridError> {
        self.check_index(index)?;
        self.children[index].params = params;
        self.invalidate_structure();
        Ok(())
    }

    /// The element's size as of the last measure or layout pass.
    pub fn measured(&self, index: usize) -> Option<Size> {
        self.children.get(index).map(|child| child.measured)
    }

    /// A child was collapsed, expanded or otherwise restructured.
    pub fn notify_child_changed(&mut self) {
        self.invalidate_structure();
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.config.orientation != orientation {
            self.config.orientation = orientation;
            self.invalidate_structure();
        }
    }

    pub fn set_row_count(&mut self, count: Option<i32>) -> Result<(), SpecError> {
        self.vertical_axis.set_defined_count(count)?;
        self.config.row_count = count;
        self.invalidate_structure();
        Ok(())
    }

    pub fn set_column_count(&mut self, count: Option<i32>) -> Result<(), SpecError> {
        self.horizontal_axis.set_defined_count(count)?;
        self.config.column_count = count;
        self.invalidate_structure();
        Ok(())
    }

    pub fn set_row_order_preserved(&mut self, preserved: bool) {
        self.config.row_order_preserved = preserved;
        self.vertical_axis.set_order_preserved(preserved);
    }

    pub fn set_column_order_preserved(&mut self, preserved: bool) {
        self.config.column_order_preserved = preserved;
        self.horizontal_axis.set_order_preserved(preserved);
    }

    pub fn set_alignment_mode(&mut self, mode: AlignmentMode) {
        self.config.alignment_mode = mode;
        self.horizontal_axis.set_alignment_mode(mode);
        self.vertical_axis.set_alignment_mode(mode);
    }

    pub fn set_use_default_margins(&mut self, enabled: bool) {
        self.config.use_default_margins = enabled;
        self.invalidate_values();
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.config.padding = padding;
        self.invalidate_values();
    }

    /// The column axis, for diagnostics.
    pub fn horizontal_axis(&self) -> &Axis {
        &self.horizontal_axis
    }

    /// The row axis, for diagnostics.
    pub fn vertical_axis(&self) -> &Axis {
        &self.vertical_axis
    }

    pub fn column_count(&mut self) -> i32 {
        self.ensure_params();
        let (axis, view) = self.parts(true);
        axis.count(&view)
    }

    pub fn row_count(&mut self) -> i32 {
        self.ensure_params();
        let (axis, view) = self.parts(false);
        axis.count(&view)
    }

    /// Column line positions from the last solve, relative to the padding.
    pub fn column_lines(&mut self) -> &[i32] {
        self.ensure_params();
        let (axis, view) = self.parts(true);
        axis.locations(&view)
    }

    /// Row line positions from the last solve, relative to the padding.
    pub fn row_lines(&mut self) -> &[i32] {
        self.ensure_params();
        let (axis, view) = self.parts(false);
        axis.locations(&view)
    }

    /// Measure every child and return the container's size.
    pub fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        self.ensure_params();
        self.invalidate_values();

        let padding = self.config.padding;
        let inner_width = width.shrink(padding.horizontal());
        let inner_height = height.shrink(padding.vertical());
        let primary_horizontal = self.config.orientation == Orientation::Horizontal;
        let (primary_spec, secondary_spec) = if primary_horizontal {
            (inner_width, inner_height)
        } else {
            (inner_height, inner_width)
        };

        self.measure_children(width, height, None);
        let primary = {
            let (axis, view) = self.parts(primary_horizontal);
            axis.measure(&view, primary_spec)
        };
        self.measure_children(width, height, Some(primary_horizontal));
        let secondary = {
            let (axis, view) = self.parts(!primary_horizontal);
            axis.measure(&view, secondary_spec)
        };

        let (content_width, content_height) = if primary_horizontal {
            (primary, secondary)
        } else {
            (secondary, primary)
        };
        let size = Size::new(
            width.resolve(content_width + padding.horizontal()),
            height.resolve(content_height + padding.vertical()),
        );
        tracing::trace!(width = size.width, height = size.height, "measured grid");
        size
    }

    /// Measure children.
    ///
    /// Without `solved`, every child is measured against the container's
    /// requests. With `solved` naming an axis that has been solved, only
    /// children filling their cells along it are re-measured, at the exact
    /// cell extent.
    fn measure_children(&mut self, width: MeasureSpec, height: MeasureSpec, solved: Option<bool>) {
        let padding = self.config.padding;
        for index in 0..self.children.len() {
            if self.children[index].element.is_collapsed() {
                continue;
            }
            let params = self.children[index].params;
            let mut fixed_width = params.width;
            let mut fixed_height = params.height;

            if let Some(horizontal) = solved {
                let spec = params.spec(horizontal);
                if spec.alignment != Alignment::Fill {
                    continue;
                }
                let (axis, view) = self.parts(horizontal);
                let locations = axis.locations(&view);
                let cell = locations[spec.span.max as usize] - locations[spec.span.min as usize];
                let size = (cell - axis.total_margin(&view, index)).max(0);
                if horizontal {
                    fixed_width = Some(size);
                } else {
                    fixed_height = Some(size);
                }
            }

            let margin_h = {
                let (axis, view) = self.parts(true);
                axis.total_margin(&view, index)
            };
            let margin_v = {
                let (axis, view) = self.parts(false);
                axis.total_margin(&view, index)
            };
            let child_width = MeasureSpec::for_child(width, padding.horizontal() + margin_h, fixed_width);
            let child_height = MeasureSpec::for_child(height, padding.vertical() + margin_v, fixed_height);

            let child = &mut self.children[index];
            child.measured = child.element.measure(child_width, child_height);
        }
    }

    /// Solve both axes for a container of exactly `width` by `height` and
    /// place every child. Collapsed children get `None`.
    pub fn layout(&mut self, width: i32, height: i32) -> Vec<Option<Rect>> {
        self.ensure_params();
        let padding = self.config.padding;
        {
            let (axis, view) = self.parts(true);
            axis.layout(&view, width - padding.horizontal());
        }
        {
            let (axis, view) = self.parts(false);
            axis.layout(&view, height - padding.vertical());
        }

        let mut frames = Vec::with_capacity(self.children.len());
        for index in 0..self.children.len() {
            if self.children[index].element.is_collapsed() {
                frames.push(None);
                continue;
            }
            let (x, w) = self.place(index, true);
            let (y, h) = self.place(index, false);

            let child = &mut self.children[index];
            if w != child.measured.width || h != child.measured.height {
                child.measured = child
                    .element
                    .measure(MeasureSpec::Exactly(w), MeasureSpec::Exactly(h));
            }
            frames.push(Some(Rect::new(padding.left + x, padding.top + y, w, h)));
        }
        frames
    }

    /// Offset and extent of child `index` along one axis, inside the padding.
    fn place(&mut self, index: usize, horizontal: bool) -> (i32, i32) {
        let (axis, view) = self.parts(horizontal);
        let spec = view.spec(index);
        let alignment = spec.alignment.resolve(horizontal);
        let measured = view.measurement(index);

        let locations = axis.locations(&view);
        let start = locations[spec.span.min as usize];
        let mut cell = locations[spec.span.max as usize] - start;

        let group = axis.group_bounds(&view).value(index).clone();
        let leading = axis.margin(&view, index, true);
        let trailing = axis.margin(&view, index, false);

        let cell_to_group = alignment.value(cell - group.size(true), None).unwrap_or(0);
        let value = alignment.value(leading + measured + trailing, view.anchor(index));
        let group_to_element = group.offset(value);

        cell -= leading + trailing;
        let offset = start + cell_to_group + group_to_element + leading;
        (offset, alignment.size_in_cell(measured, cell))
    }

    /// Run auto-placement if spans may have changed.
    fn ensure_params(&mut self) {
        if self.params_valid {
            return;
        }
        let minor_count = match self.config.orientation {
            Orientation::Horizontal => self.horizontal_axis.defined_count(),
            Orientation::Vertical => self.vertical_axis.defined_count(),
        };
        assign_cells(
            self.children.iter_mut().map(|child| &mut child.params),
            self.config.orientation,
            minor_count,
        );
        self.horizontal_axis.invalidate_structure();
        self.vertical_axis.invalidate_structure();
        self.params_valid = true;
    }

    fn invalidate_structure(&mut self) {
        self.params_valid = false;
        self.horizontal_axis.invalidate_structure();
        self.vertical_axis.invalidate_structure();
    }

    /// Mark measurements stale; the arc sets are kept.
    pub fn invalidate_values(&mut self) {
        self.horizontal_axis.invalidate_values();
        self.vertical_axis.invalidate_values();
    }

    fn check_index(&self, index: usize) -> Result<(), LayoutError> {
        if index < self.children.len() {
            Ok(())
        } else {
            Err(LayoutError::ChildOutOfRange {
                index,
                len: self.children.len(),
            })
        }
    }

    fn parts(&mut self, horizontal: bool) -> (&mut Axis, AxisView<'_, C>) {
        let axis = if horizontal {
            &mut self.horizontal_axis
        } else {
            &mut self.vertical_axis
        };
        let view = AxisView {
            children: &self.children,
            config: &self.config,
            horizontal,
        };
        (axis, view)
    }
}

impl<C: Measurable> Default for GridLayout<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    struct Block(Size);

    impl Measurable for Block {
        fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
            Size::new(width.resolve(self.0.width), height.resolve(self.0.height))
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = GridConfig::default();
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(config.column_count, None);
        assert!(config.row_order_preserved);
        assert_eq!(config.alignment_mode, AlignmentMode::AlignMargins);
        assert!(!config.use_default_margins);
        assert_eq!(config.default_gap, 16);
        assert_eq!(config.padding, Padding::default());
    }

    #[test]
    fn test_with_config_rejects_negative_count() {
        let config = GridConfig::default().with_column_count(-3);
        let err = GridLayout::<Block>::with_config(config).unwrap_err();
        assert_eq!(err, GridError::Spec(SpecError::NegativeCount { count: -3 }));
    }

    #[test]
    fn test_child_index_checked() {
        let mut grid = GridLayout::new();
        grid.add_child(Block(Size::new(1, 1)), LayoutParams::default());
        assert_eq!(
            grid.remove_child(3).unwrap_err(),
            GridError::Layout(LayoutError::ChildOutOfRange { index: 3, len: 1 })
        );
        assert!(grid.set_params(0, LayoutParams::default()).is_ok());
    }

    #[test]
    fn test_default_margins() {
        let config = GridConfig::default().with_default_margins(true);
        let mut grid = GridLayout::with_config(config).unwrap();
        grid.add_child(Block(Size::new(10, 10)), LayoutParams::cell(0, 0).unwrap());
        grid.add_child(Block(Size::new(20, 20)), LayoutParams::cell(0, 1).unwrap());

        let size = grid.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);

        assert_eq!(size, Size::new(46, 20));
        assert_eq!(grid.column_lines(), &[0, 18, 46]);

        let frames = grid.layout(46, 20);
        assert_eq!(frames[0], Some(Rect::new(0, 0, 10, 10)));
        assert_eq!(frames[1], Some(Rect::new(26, 0, 20, 20)));
    }

    #[test]
    fn test_padding() {
        let config = GridConfig::default().with_padding(Padding::symmetric(5, 3));
        let mut grid = GridLayout::with_config(config).unwrap();
        grid.add_child(Block(Size::new(10, 10)), LayoutParams::cell(0, 0).unwrap());

        let size = grid.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        assert_eq!(size, Size::new(20, 16));

        let frames = grid.layout(20, 16);
        assert_eq!(frames[0], Some(Rect::new(5, 3, 10, 10)));
    }

    #[test]
    fn test_measure_respects_at_most() {
        let mut grid = GridLayout::new();
        grid.add_child(Block(Size::new(80, 10)), LayoutParams::cell(0, 0).unwrap());

        let size = grid.measure(MeasureSpec::AtMost(50), MeasureSpec::Unspecified);

        assert_eq!(size.width, 50);
    }
}
