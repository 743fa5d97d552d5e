use tracing::debug;

use crate::config::StrategyKind;
use crate::expand::{ExpandedUnit, expand_specs};
use crate::model::{LayoutPosition, LayoutResult, MarginConfig, PageGeometry, PhotoSpec, PxRect};
use crate::units::Resolution;

pub mod adaptive;
pub mod compact;
pub mod grid;

/// Page geometry resolved to pixels for a single layout run.
///
/// Gaps are clamped at zero so that a negative margin can never make
/// placements overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFrame {
    printable: PxRect,
    gap_h: i64,
    gap_v: i64,
    resolution: Resolution,
}

/// Pixel size and gaps of one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPx {
    pub width: i64,
    pub height: i64,
    pub gap_h: i64,
    pub gap_v: i64,
}

impl PageFrame {
    pub fn new(page: &PageGeometry, margin: &MarginConfig) -> Self {
        let res = page.resolution;
        let (left, right, top, bottom) = match margin.page {
            Some(pm) => (
                res.mm_to_px(pm.left_mm),
                res.mm_to_px(pm.right_mm),
                res.mm_to_px(pm.top_mm),
                res.mm_to_px(pm.bottom_mm),
            ),
            None => (0, 0, 0, 0),
        };
        let printable = PxRect::new(
            left,
            top,
            page.width_px().saturating_sub(left).saturating_sub(right),
            page.height_px().saturating_sub(top).saturating_sub(bottom),
        );
        Self {
            printable,
            gap_h: res.mm_to_px(margin.horizontal_mm).max(0),
            gap_v: res.mm_to_px(margin.vertical_mm).max(0),
            resolution: res,
        }
    }

    /// Printable rectangle; width/height may be zero or negative.
    pub fn printable(&self) -> PxRect {
        self.printable
    }

    pub fn gap_h(&self) -> i64 {
        self.gap_h
    }

    pub fn gap_v(&self) -> i64 {
        self.gap_v
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Pixel size of a unit and the gaps around it (its own override, else
    /// the global gaps).
    ///
    /// Returns `None` for a unit whose pixel width or height is not positive;
    /// such a unit is never placed.
    pub fn unit_px(&self, unit: &ExpandedUnit<'_>) -> Option<UnitPx> {
        let size = unit.size();
        let width = self.resolution.mm_to_px(size.width_mm);
        let height = self.resolution.mm_to_px(size.height_mm);
        if width <= 0 || height <= 0 {
            debug!(photo_id = unit.photo_id(), width, height, "unit has no area");
            return None;
        }
        let (gap_h, gap_v) = match unit.margin() {
            Some(m) => (
                self.resolution.mm_to_px(m.horizontal_mm).max(0),
                self.resolution.mm_to_px(m.vertical_mm).max(0),
            ),
            None => (self.gap_h, self.gap_v),
        };
        Some(UnitPx {
            width,
            height,
            gap_h,
            gap_v,
        })
    }
}

fn position(unit: &ExpandedUnit<'_>, left: i64, top: i64, px: &UnitPx) -> LayoutPosition {
    LayoutPosition {
        left,
        top,
        width: px.width,
        height: px.height,
        photo_id: unit.photo_id().to_owned(),
    }
}

impl StrategyKind {
    /// Lays out `specs` on `page` with this strategy.
    ///
    /// Units that do not fit are left out; the shortfall is visible by
    /// comparing the result against each spec's `repeat_count`.
    pub fn calculate_layout(
        &self,
        page: &PageGeometry,
        specs: &[PhotoSpec],
        margin: &MarginConfig,
    ) -> LayoutResult {
        let units = expand_specs(specs);
        if units.is_empty() {
            return LayoutResult::empty();
        }
        let frame = PageFrame::new(page, margin);
        let positions = match self {
            StrategyKind::Grid => grid::place(&units, &frame),
            StrategyKind::Compact => compact::place(&units, &frame),
            StrategyKind::Adaptive => adaptive::place(&units, &frame),
        };
        debug!(
            strategy = %self,
            requested = units.len(),
            placed = positions.len(),
            "layout computed"
        );
        LayoutResult::from_positions(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageMargin;

    #[test]
    fn printable_area_subtracts_page_margin() {
        let page = PageGeometry::new(210.0, 297.0);
        let margin = MarginConfig::gap(2.0).with_page_margin(PageMargin {
            left_mm: 5.0,
            right_mm: 5.0,
            top_mm: 10.0,
            bottom_mm: 10.0,
        });
        let frame = PageFrame::new(&page, &margin);
        let p = frame.printable();
        assert_eq!((p.left, p.top), (59, 118));
        assert_eq!(p.right(), 2480 - 59);
        assert_eq!(p.bottom(), 3508 - 118);
        assert_eq!((frame.gap_h(), frame.gap_v()), (24, 24));
    }

    #[test]
    fn oversized_page_margin_gives_negative_area() {
        let page = PageGeometry::new(20.0, 20.0);
        let margin = MarginConfig::gap(0.0).with_page_margin(PageMargin::uniform(15.0));
        let frame = PageFrame::new(&page, &margin);
        assert!(frame.printable().width < 0);
        assert_eq!(frame.printable().area(), 0);
    }

    #[test]
    fn unit_override_replaces_global_gaps() {
        let page = PageGeometry::new(100.0, 100.0);
        let frame = PageFrame::new(&page, &MarginConfig::gap(2.0));
        let specs = vec![
            PhotoSpec::new("a", 25.0, 35.0, 1),
            PhotoSpec::new("b", 25.0, 35.0, 1).with_margin(5.0, -1.0),
        ];
        let units = expand_specs(&specs);
        let a = frame.unit_px(&units[0]).expect("positive size");
        let b = frame.unit_px(&units[1]).expect("positive size");
        assert_eq!((a.width, a.height, a.gap_h, a.gap_v), (295, 413, 24, 24));
        assert_eq!((b.gap_h, b.gap_v), (59, 0));
    }

    #[test]
    fn unit_without_area_has_no_pixels() {
        let frame = PageFrame::new(&PageGeometry::new(100.0, 100.0), &MarginConfig::gap(2.0));
        let specs = vec![
            PhotoSpec::new("neg", -20.0, 10.0, 1),
            PhotoSpec::new("flat", 10.0, 0.0, 1),
            PhotoSpec::new("speck", 0.01, 10.0, 1),
            PhotoSpec::new("nan", f64::NAN, 10.0, 1),
        ];
        for unit in expand_specs(&specs) {
            assert_eq!(frame.unit_px(&unit), None, "{}", unit.photo_id());
        }
    }

    #[test]
    fn huge_page_saturates_instead_of_overflowing() {
        let page = PageGeometry::new(1e300, 1e300);
        let frame = PageFrame::new(&page, &MarginConfig::gap(1e300));
        assert_eq!(frame.printable().right(), i64::MAX);
        assert_eq!(frame.printable().area(), u64::MAX);
        assert_eq!(frame.gap_h(), i64::MAX);
    }
}
