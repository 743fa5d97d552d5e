use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::units::Resolution;

/// Physical page size plus the resolution used to rasterize it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f64,
    pub height_mm: f64,
    #[serde(default)]
    pub resolution: Resolution,
}

impl PageGeometry {
    /// Page at 300 DPI.
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
            resolution: Resolution::default(),
        }
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn width_px(&self) -> i64 {
        self.resolution.mm_to_px(self.width_mm)
    }

    pub fn height_px(&self) -> i64 {
        self.resolution.mm_to_px(self.height_mm)
    }

    /// Rejects non-finite or non-positive page sizes and invalid resolutions.
    ///
    /// Layout never calls this; a degenerate page simply places nothing.
    pub fn validate(&self) -> Result<()> {
        if !self.resolution.is_valid() {
            return Err(LayoutError::InvalidResolution(self.resolution.px_per_mm));
        }
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.width_mm) || !ok(self.height_mm) {
            return Err(LayoutError::InvalidPageSize {
                width_mm: self.width_mm,
                height_mm: self.height_mm,
            });
        }
        Ok(())
    }
}

/// Printable-area inset, in millimetres.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PageMargin {
    #[serde(default)]
    pub left_mm: f64,
    #[serde(default)]
    pub right_mm: f64,
    #[serde(default)]
    pub top_mm: f64,
    #[serde(default)]
    pub bottom_mm: f64,
}

impl PageMargin {
    pub fn uniform(mm: f64) -> Self {
        Self {
            left_mm: mm,
            right_mm: mm,
            top_mm: mm,
            bottom_mm: mm,
        }
    }
}

/// Gaps between photos (global default) and an optional page inset.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MarginConfig {
    #[serde(default)]
    pub horizontal_mm: f64,
    #[serde(default)]
    pub vertical_mm: f64,
    #[serde(default)]
    pub page: Option<PageMargin>,
}

impl MarginConfig {
    /// Same gap on both axes, no page inset.
    pub fn gap(mm: f64) -> Self {
        Self {
            horizontal_mm: mm,
            vertical_mm: mm,
            page: None,
        }
    }

    pub fn with_page_margin(mut self, page: PageMargin) -> Self {
        self.page = Some(page);
        self
    }
}

/// Physical print size in millimetres.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PhotoSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PhotoSize {
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    pub fn area_mm2(&self) -> f64 {
        self.width_mm * self.height_mm
    }
}

/// Per-photo gap override.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PhotoMargin {
    pub horizontal_mm: f64,
    pub vertical_mm: f64,
}

fn default_repeat() -> i32 {
    1
}

/// A print size and how many copies of it are wanted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoSpec {
    pub id: String,
    pub size: PhotoSize,
    #[serde(default = "default_repeat")]
    pub repeat_count: i32,
    #[serde(default)]
    pub margin: Option<PhotoMargin>,
}

impl PhotoSpec {
    pub fn new(id: impl Into<String>, width_mm: f64, height_mm: f64, repeat_count: i32) -> Self {
        Self {
            id: id.into(),
            size: PhotoSize::new(width_mm, height_mm),
            repeat_count,
            margin: None,
        }
    }

    pub fn with_margin(mut self, horizontal_mm: f64, vertical_mm: f64) -> Self {
        self.margin = Some(PhotoMargin {
            horizontal_mm,
            vertical_mm,
        });
        self
    }

    /// Copies this spec asks for; non-positive counts ask for none.
    pub fn requested(&self) -> usize {
        self.repeat_count.max(0) as usize
    }

    /// Upstream validation: positive finite size and `repeat_count >= 1`.
    ///
    /// The engine tolerates specs that fail this check.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| LayoutError::InvalidPhoto {
            id: self.id.clone(),
            reason,
        };
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.size.width_mm) || !ok(self.size.height_mm) {
            return Err(invalid(format!(
                "size must be positive, got {}x{} mm",
                self.size.width_mm, self.size.height_mm
            )));
        }
        if self.repeat_count < 1 {
            return Err(invalid(format!(
                "repeat_count must be >= 1, got {}",
                self.repeat_count
            )));
        }
        if let Some(m) = self.margin {
            if !m.horizontal_mm.is_finite() || !m.vertical_mm.is_finite() {
                return Err(invalid("margin must be finite".into()));
            }
        }
        Ok(())
    }
}

/// Axis-aligned pixel rectangle, `left,top` at the top-left corner.
///
/// Signed so that degenerate printable areas (margins larger than the page)
/// stay representable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PxRect {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

impl PxRect {
    pub fn new(left: i64, top: i64, width: i64, height: i64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.left.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.top.saturating_add(self.height)
    }

    /// Area, zero for empty or inverted rectangles.
    pub fn area(&self) -> u64 {
        if self.width <= 0 || self.height <= 0 {
            0
        } else {
            (self.width as u64).saturating_mul(self.height as u64)
        }
    }

    /// True if `r` lies fully inside `self`; shared edges count as inside.
    pub fn contains(&self, r: &PxRect) -> bool {
        r.left >= self.left
            && r.top >= self.top
            && r.right() <= self.right()
            && r.bottom() <= self.bottom()
    }

    /// True if the interiors intersect; touching edges do not overlap.
    pub fn overlaps(&self, r: &PxRect) -> bool {
        self.left < r.right()
            && r.left < self.right()
            && self.top < r.bottom()
            && r.top < self.bottom()
    }
}

/// One placed copy of a photo, in page pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPosition {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
    /// Id of the originating spec; repeated for every placed copy.
    pub photo_id: String,
}

impl LayoutPosition {
    pub fn rect(&self) -> PxRect {
        PxRect::new(self.left, self.top, self.width, self.height)
    }
}

/// Ordered placements from one layout run.
///
/// `total_placed` always equals `positions().len()`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    positions: Vec<LayoutPosition>,
    total_placed: usize,
}

impl LayoutResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_positions(positions: Vec<LayoutPosition>) -> Self {
        let total_placed = positions.len();
        Self {
            positions,
            total_placed,
        }
    }

    pub fn positions(&self) -> &[LayoutPosition] {
        &self.positions
    }

    pub fn total_placed(&self) -> usize {
        self.total_placed
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn into_positions(self) -> Vec<LayoutPosition> {
        self.positions
    }

    /// Number of placed copies per photo id.
    pub fn placed_counts(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for p in &self.positions {
            *counts.entry(p.photo_id.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Computes area statistics against `printable`.
    pub fn stats(&self, printable: &PxRect) -> LayoutStats {
        let used_area_px = self
            .positions
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.rect().area()));
        let printable_area_px = printable.area();
        let occupancy = if printable_area_px > 0 {
            used_area_px as f64 / printable_area_px as f64
        } else {
            0.0
        };
        LayoutStats {
            placed: self.total_placed,
            printable_area_px,
            used_area_px,
            occupancy,
        }
    }
}

/// Placed vs. requested copies for one spec.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoPlacement {
    pub photo_id: String,
    pub requested: usize,
    pub placed: usize,
}

impl PhotoPlacement {
    pub fn unplaced(&self) -> usize {
        self.requested.saturating_sub(self.placed)
    }
}

/// Unmet-demand accounting, derived from the specs and a result alone.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlacementReport {
    pub photos: Vec<PhotoPlacement>,
    pub requested_total: usize,
    pub placed_total: usize,
}

impl PlacementReport {
    pub fn new(specs: &[PhotoSpec], result: &LayoutResult) -> Self {
        let mut remaining = result.placed_counts();
        let mut photos = Vec::with_capacity(specs.len());
        for spec in specs {
            let requested = spec.requested();
            // Specs sharing an id draw from the same pool, first come first served.
            let pool = remaining.get_mut(spec.id.as_str());
            let placed = match pool {
                Some(left) => {
                    let take = (*left).min(requested);
                    *left -= take;
                    take
                }
                None => 0,
            };
            photos.push(PhotoPlacement {
                photo_id: spec.id.clone(),
                requested,
                placed,
            });
        }
        Self {
            requested_total: photos.iter().map(|p| p.requested).sum(),
            placed_total: result.total_placed(),
            photos,
        }
    }

    pub fn unplaced_total(&self) -> usize {
        self.requested_total.saturating_sub(self.placed_total)
    }

    pub fn is_complete(&self) -> bool {
        self.unplaced_total() == 0
    }
}

/// Area usage of a layout.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct LayoutStats {
    pub placed: usize,
    pub printable_area_px: u64,
    pub used_area_px: u64,
    /// `used_area_px / printable_area_px`, 0.0 when nothing is printable.
    pub occupancy: f64,
}

impl LayoutStats {
    pub fn wasted_area(&self) -> u64 {
        self.printable_area_px.saturating_sub(self.used_area_px)
    }

    pub fn summary(&self) -> String {
        format!(
            "Placed: {}, Occupancy: {:.2}%, Printable Area: {} px², Used Area: {} px²",
            self.placed,
            self.occupancy * 100.0,
            self.printable_area_px,
            self.used_area_px,
        )
    }
}
