//! Row-major shelf packing in input order.

use tracing::{debug, trace};

use super::{PageFrame, position};
use crate::expand::ExpandedUnit;
use crate::model::LayoutPosition;

/// Places units left to right, wrapping to a new row when the next unit
/// (plus its gap) would cross the printable right edge.
///
/// A unit that does not fit below the current row is skipped; the cursor is
/// left where it is and the next unit is tried against the same row state.
pub fn place(units: &[ExpandedUnit<'_>], frame: &PageFrame) -> Vec<LayoutPosition> {
    let area = frame.printable();
    let mut positions = Vec::with_capacity(units.len());
    let mut x = area.left;
    let mut y = area.top;
    let mut row_height = 0;

    for unit in units {
        let Some(px) = frame.unit_px(unit) else {
            continue;
        };

        if x.saturating_add(px.width).saturating_add(px.gap_h) > area.right() {
            x = area.left;
            y = y.saturating_add(row_height).saturating_add(px.gap_v);
            row_height = 0;
        }

        if y.saturating_add(px.height).saturating_add(px.gap_v) > area.bottom() {
            debug!(
                photo_id = unit.photo_id(),
                copy = unit.copy,
                y,
                "grid: no vertical room"
            );
            continue;
        }
        if x.saturating_add(px.width) > area.right() {
            debug!(
                photo_id = unit.photo_id(),
                copy = unit.copy,
                "grid: wider than printable area"
            );
            continue;
        }

        trace!(photo_id = unit.photo_id(), x, y, "grid: placed");
        positions.push(position(unit, x, y, &px));
        x = x.saturating_add(px.width).saturating_add(px.gap_h);
        row_height = row_height.max(px.height);
    }

    positions
}
