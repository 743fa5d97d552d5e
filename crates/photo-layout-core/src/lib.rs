//! Layout engine for printing repeated photos on a fixed-size page.
//!
//! - Strategies: Grid (row-major shelf), Compact (binary space partition, largest first),
//!   Adaptive (group by size, one grid block per group)
//! - Engine: `LayoutEngine` holds the selected strategy and recomputes layouts; no I/O
//! - Data model is serde-serializable; a JSON exporter is provided for renderers.
//!
//! Quick example:
//! ```
//! use photo_layout_core::prelude::*;
//!
//! let engine = LayoutEngine::default();
//! let page = engine.page(210.0, 297.0);
//! let specs = vec![PhotoSpec::new("me", 25.0, 35.0, 8)];
//! let result = engine.recompute(&page, &MarginConfig::gap(2.0), &specs);
//! assert_eq!(result.total_placed(), 8);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod expand;
pub mod export;
pub mod model;
pub mod presets;
pub mod strategy;
pub mod units;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use expand::*;
pub use export::*;
pub use model::*;
pub use units::*;

/// Convenience prelude for common types and functions.
/// Importing `photo_layout_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{LayoutConfig, LayoutConfigBuilder, StrategyKind};
    pub use crate::engine::{LayoutEngine, LayoutRun};
    pub use crate::error::{LayoutError, Result};
    pub use crate::export::to_json;
    pub use crate::model::{
        LayoutPosition, LayoutResult, LayoutStats, MarginConfig, PageGeometry, PageMargin,
        PhotoMargin, PhotoPlacement, PhotoSize, PhotoSpec, PlacementReport, PxRect,
    };
    pub use crate::presets::{PagePreset, PhotoSizePreset, page_preset, photo_size_preset};
    pub use crate::units::{Resolution, mm_to_pixels};
}
