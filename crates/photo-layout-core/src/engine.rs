use tracing::{debug, instrument, warn};

use crate::config::{LayoutConfig, StrategyKind};
use crate::error::Result;
use crate::model::{
    LayoutResult, LayoutStats, MarginConfig, PageGeometry, PhotoSpec, PlacementReport, PxRect,
};
use crate::strategy::PageFrame;
use crate::units::Resolution;

/// Holds the selected strategy and recomputes layouts on demand.
///
/// Beyond the selected strategy the engine keeps no state between calls:
/// identical inputs always give identical results.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutEngine {
    strategy: StrategyKind,
    resolution: Resolution,
}

impl LayoutEngine {
    pub fn new(cfg: LayoutConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            strategy: cfg.strategy,
            resolution: cfg.resolution,
        })
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn select(&mut self, kind: StrategyKind) {
        self.strategy = kind;
    }

    /// Selects a strategy by name.
    ///
    /// An unknown name is rejected and the current strategy is kept.
    pub fn set_strategy(&mut self, name: &str) -> Result<StrategyKind> {
        match name.parse::<StrategyKind>() {
            Ok(kind) => {
                debug!(from = %self.strategy, to = %kind, "strategy selected");
                self.strategy = kind;
                Ok(kind)
            }
            Err(e) => {
                warn!(name, current = %self.strategy, "unknown strategy, keeping current");
                Err(e)
            }
        }
    }

    /// Page of the given size at the engine's resolution.
    pub fn page(&self, width_mm: f64, height_mm: f64) -> PageGeometry {
        PageGeometry::new(width_mm, height_mm).with_resolution(self.resolution)
    }

    /// Lays out `specs` with the selected strategy.
    #[instrument(skip_all, fields(strategy = %self.strategy, photos = specs.len()))]
    pub fn recompute(
        &self,
        page: &PageGeometry,
        margin: &MarginConfig,
        specs: &[PhotoSpec],
    ) -> LayoutResult {
        self.strategy.calculate_layout(page, specs, margin)
    }

    /// Like [`recompute`](Self::recompute), bundled with unmet-demand and
    /// area accounting.
    pub fn run(
        &self,
        page: &PageGeometry,
        margin: &MarginConfig,
        specs: &[PhotoSpec],
    ) -> LayoutRun {
        let result = self.recompute(page, margin, specs);
        let report = PlacementReport::new(specs, &result);
        if !report.is_complete() {
            warn!(
                unplaced = report.unplaced_total(),
                requested = report.requested_total,
                "some photos do not fit on the page"
            );
        }
        LayoutRun {
            strategy: self.strategy,
            page: *page,
            printable: PageFrame::new(page, margin).printable(),
            result,
            report,
        }
    }
}

/// A layout result together with the context it was computed in.
#[derive(Debug, Clone)]
pub struct LayoutRun {
    pub strategy: StrategyKind,
    pub page: PageGeometry,
    pub printable: PxRect,
    pub result: LayoutResult,
    pub report: PlacementReport,
}

impl LayoutRun {
    pub fn stats(&self) -> LayoutStats {
        self.result.stats(&self.printable)
    }
}
