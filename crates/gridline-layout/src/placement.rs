//! Automatic cell assignment for children without an explicit start.
//!
//! Children are visited in order. The minor axis (columns when the grid
//! flows horizontally) wraps at its defined count; the major axis grows
//! without bound. An occupancy array remembers, per minor cell, the first
//! major index that is still free.

use gridline_core::Interval;

use crate::grid::Orientation;
use crate::params::LayoutParams;

/// Fill in the spans of every spec whose start is undefined.
///
/// `minor_count` is the defined count of the minor axis. Without one, no
/// wrapping happens and children follow one another along the minor axis.
pub fn assign_cells<'a, I>(params: I, orientation: Orientation, minor_count: Option<i32>)
where
    I: IntoIterator<Item = &'a mut LayoutParams>,
{
    let horizontal = orientation == Orientation::Horizontal;
    let count = minor_count.unwrap_or(0).max(0);
    let mut occupied = vec![0; count as usize];
    let mut major = 0;
    let mut minor = 0;

    for params in params {
        let major_spec = *params.spec(!horizontal);
        let minor_spec = *params.spec(horizontal);

        let major_span = major_spec.span.size();
        if major_spec.start_defined {
            major = major_spec.span.min;
        }
        let minor_span = clip(minor_spec.span, minor_spec.start_defined, count);
        if minor_spec.start_defined {
            minor = minor_spec.span.min;
        }

        if count != 0 {
            let reachable = !minor_spec.start_defined || minor + minor_span <= count;
            if reachable && !(major_spec.start_defined && minor_spec.start_defined) {
                while !fits(&occupied, major, minor, minor + minor_span) {
                    if minor_spec.start_defined {
                        major += 1;
                    } else if minor + minor_span <= count {
                        minor += 1;
                    } else {
                        minor = 0;
                        major += 1;
                    }
                }
            }
            fill(&mut occupied, minor, minor + minor_span, major + major_span);
        }

        let major_range = Interval::new(major, major + major_span);
        let minor_range = Interval::new(minor, minor + minor_span);
        let major_spec = params.spec_mut(!horizontal);
        *major_spec = major_spec.with_span(major_range);
        let minor_spec = params.spec_mut(horizontal);
        *minor_spec = minor_spec.with_span(minor_range);

        minor += minor_span;
    }
}

/// Minor span limited to what fits before the defined count.
fn clip(span: Interval, start_defined: bool, count: i32) -> i32 {
    let size = span.size();
    if count == 0 {
        return size;
    }
    let start = if start_defined { span.min.min(count) } else { 0 };
    size.min(count - start)
}

fn fits(occupied: &[i32], major: i32, start: i32, end: i32) -> bool {
    if end as usize > occupied.len() {
        return false;
    }
    occupied[start as usize..end as usize].iter().all(|&free_from| free_from <= major)
}

fn fill(occupied: &mut [i32], start: i32, end: i32, value: i32) {
    let len = occupied.len();
    let start = (start.max(0) as usize).min(len);
    let end = (end.max(0) as usize).min(len);
    if start < end {
        occupied[start..end].fill(value);
    }
}
