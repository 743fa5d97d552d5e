//! Groups units by exact print size, then grids each group in its own block.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::{PageFrame, position};
use crate::expand::ExpandedUnit;
use crate::model::{LayoutPosition, PhotoSize};

/// Units sharing one exact `(width_mm, height_mm)` size.
#[derive(Debug, Clone)]
pub struct SizeGroup<'a> {
    pub size: PhotoSize,
    pub units: Vec<ExpandedUnit<'a>>,
}

/// Partitions units by exact size. Groups come out in descending area;
/// equal areas keep first-appearance order, and units keep input order.
pub fn group_by_size<'a>(units: &[ExpandedUnit<'a>]) -> Vec<SizeGroup<'a>> {
    let mut index: HashMap<(u64, u64), usize> = HashMap::new();
    let mut groups: Vec<SizeGroup<'a>> = Vec::new();
    for unit in units {
        let size = unit.size();
        let key = (size.width_mm.to_bits(), size.height_mm.to_bits());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(SizeGroup {
                size,
                units: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].units.push(*unit);
    }
    groups.sort_by(|a, b| b.size.area_mm2().total_cmp(&a.size.area_mm2()));
    groups
}

/// Lays out each size group row-major, `floor(printable_width / (w + gap))`
/// per row, sharing one vertical cursor across groups. Consecutive groups are
/// separated by twice the global vertical gap.
///
/// Within a group a row also wraps early when the next unit would cross the
/// printable right edge, which happens when a unit's own gap is wider than
/// the global one. A group too wide for even one unit per row places nothing
/// but still advances the cursor.
pub fn place(units: &[ExpandedUnit<'_>], frame: &PageFrame) -> Vec<LayoutPosition> {
    let area = frame.printable();
    let res = frame.resolution();
    let mut positions = Vec::with_capacity(units.len());
    let mut current_y = area.top;

    for group in group_by_size(units) {
        let unit_w = res.mm_to_px(group.size.width_mm);
        let unit_h = res.mm_to_px(group.size.height_mm);
        if unit_w <= 0 || unit_h <= 0 {
            debug!(
                width_mm = group.size.width_mm,
                height_mm = group.size.height_mm,
                dropped = group.units.len(),
                "adaptive: group has no area"
            );
            continue;
        }

        let step = unit_w.saturating_add(frame.gap_h());
        let per_row = if area.width <= 0 {
            0
        } else {
            (area.width / step) as usize
        };

        if per_row == 0 {
            debug!(
                width_mm = group.size.width_mm,
                height_mm = group.size.height_mm,
                dropped = group.units.len(),
                "adaptive: group wider than printable area"
            );
        } else {
            let mut x = area.left;
            let mut in_row = 0usize;
            for unit in &group.units {
                let Some(px) = frame.unit_px(unit) else {
                    continue;
                };

                if in_row > 0 && (in_row >= per_row || x.saturating_add(unit_w) > area.right()) {
                    x = area.left;
                    current_y = current_y.saturating_add(unit_h).saturating_add(px.gap_v);
                    in_row = 0;
                }

                if current_y.saturating_add(unit_h).saturating_add(px.gap_v) > area.bottom() {
                    debug!(
                        photo_id = unit.photo_id(),
                        copy = unit.copy,
                        current_y,
                        "adaptive: no vertical room"
                    );
                    continue;
                }
                if x.saturating_add(unit_w) > area.right() {
                    debug!(
                        photo_id = unit.photo_id(),
                        copy = unit.copy,
                        "adaptive: wider than printable area"
                    );
                    continue;
                }

                trace!(photo_id = unit.photo_id(), x, y = current_y, "adaptive: placed");
                positions.push(position(unit, x, current_y, &px));
                x = x.saturating_add(unit_w).saturating_add(px.gap_h);
                in_row += 1;
            }
        }

        current_y = current_y
            .saturating_add(unit_h)
            .saturating_add(frame.gap_v().saturating_mul(2));
    }

    positions
}
