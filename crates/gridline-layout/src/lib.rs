//! Grid layout for rectangular elements.
//!
//! Children declare which rows and columns they span and how they align
//! within those cells. Each axis turns the children's measured extents into
//! difference constraints between grid lines and solves them with
//! gridline-constraint.
//!
//! # Architecture
//!
//! 1. **Placement**: children without an explicit start cell are assigned one
//! 2. **Grouping**: children with equal specs share one set of bounds
//! 3. **Constraint assembly**: group sizes become weighted arcs per axis
//! 4. **Solving**: arcs are solved into line locations, dropping conflicts
//! 5. **Layout**: each child is positioned inside its cells
//!
//! # Example
//!
//! ```ignore
//! use gridline_layout::{GridLayout, LayoutParams};
//! use gridline_core::MeasureSpec;
//!
//! let mut grid = GridLayout::new();
//! grid.add_child(label, LayoutParams::cell(0, 0)?);
//! grid.add_child(field, LayoutParams::cell(0, 1)?);
//!
//! let size = grid.measure(MeasureSpec::AtMost(480), MeasureSpec::Unspecified);
//! for frame in grid.layout(size.width, size.height) {
//!     println!("{:?}", frame);
//! }
//! ```

mod alignment;
mod axis;
mod bounds;
mod grid;
mod packed;
mod params;
mod placement;
mod rect;

pub use alignment::Alignment;
pub use axis::{AlignmentMode, Axis, AxisKind, AxisSource};
pub use bounds::{Bounds, BoundsKind};
pub use grid::{GridConfig, GridLayout, Measurable, Orientation, Padding, DEFAULT_GAP};
pub use packed::PackedMap;
pub use params::{LayoutParams, Spec};
pub use placement::assign_cells;
pub use rect::Rect;
