use serde_json::{Value, json};

use crate::engine::LayoutRun;

/// Serialize a layout run as `{ positions, totalPlaced, placements, meta }`.
///
/// Positions are page pixels with the origin at the top-left; renderers map
/// each `photoId` back to image data themselves.
pub fn to_json(run: &LayoutRun) -> Value {
    let positions: Vec<Value> = run
        .result
        .positions()
        .iter()
        .map(|p| {
            json!({
                "photoId": p.photo_id,
                "left": p.left,
                "top": p.top,
                "width": p.width,
                "height": p.height,
            })
        })
        .collect();
    let placements: Vec<Value> = run
        .report
        .photos
        .iter()
        .map(|p| {
            json!({
                "photoId": p.photo_id,
                "requested": p.requested,
                "placed": p.placed,
                "unplaced": p.unplaced(),
            })
        })
        .collect();
    let stats = run.stats();
    let pr = run.printable;
    json!({
        "positions": positions,
        "totalPlaced": run.result.total_placed(),
        "placements": placements,
        "unplacedTotal": run.report.unplaced_total(),
        "meta": {
            "app": "photo-layout",
            "version": env!("CARGO_PKG_VERSION"),
            "strategy": run.strategy.name(),
            "pageSizeMm": {"w": run.page.width_mm, "h": run.page.height_mm},
            "pageSizePx": {"w": run.page.width_px(), "h": run.page.height_px()},
            "printable": {"x": pr.left, "y": pr.top, "w": pr.width, "h": pr.height},
            "pxPerMm": run.page.resolution.px_per_mm,
            "occupancy": stats.occupancy,
        }
    })
}
