use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{LayoutError, Result};
use crate::units::Resolution;

/// Placement strategies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Row-major shelf packing in input order. Suits photos of one size.
    #[default]
    Grid,
    /// Binary space partition, largest photos first. Maximizes area use.
    Compact,
    /// Groups photos by size and grids each group in its own block.
    Adaptive,
}

impl StrategyKind {
    /// All strategies in display order.
    pub const ALL: [StrategyKind; 3] = [Self::Grid, Self::Compact, Self::Adaptive];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Compact => "compact",
            Self::Adaptive => "adaptive",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Grid => "Rows and columns in input order; best for photos of the same size",
            Self::Compact => "Binary space partitioning, largest first; maximizes use of the page",
            Self::Adaptive => "Groups photos by size and lays each group out as its own grid",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = LayoutError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" | "shelf" => Ok(Self::Grid),
            "compact" | "bsp" | "binary" => Ok(Self::Compact),
            "adaptive" | "grouped" => Ok(Self::Adaptive),
            _ => Err(LayoutError::UnknownStrategy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// Strategy selected when the engine is created.
    #[serde(default)]
    pub strategy: StrategyKind,
    /// Resolution for pages the engine builds from millimetre sizes.
    #[serde(default)]
    pub resolution: Resolution,
}

impl LayoutConfig {
    /// Rejects a non-finite or non-positive resolution.
    pub fn validate(&self) -> Result<()> {
        if !self.resolution.is_valid() {
            return Err(LayoutError::InvalidResolution(self.resolution.px_per_mm));
        }
        Ok(())
    }

    /// Create a fluent builder for `LayoutConfig`.
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::new()
    }
}

/// Builder for `LayoutConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct LayoutConfigBuilder {
    cfg: LayoutConfig,
}

impl LayoutConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: LayoutConfig::default(),
        }
    }
    pub fn strategy(mut self, v: StrategyKind) -> Self {
        self.cfg.strategy = v;
        self
    }
    pub fn resolution(mut self, v: Resolution) -> Self {
        self.cfg.resolution = v;
        self
    }
    pub fn dpi(mut self, dpi: f64) -> Self {
        self.cfg.resolution = Resolution::from_dpi(dpi);
        self
    }
    pub fn build(self) -> LayoutConfig {
        self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("grid".parse::<StrategyKind>().ok(), Some(StrategyKind::Grid));
        assert_eq!("Compact".parse::<StrategyKind>().ok(), Some(StrategyKind::Compact));
        assert_eq!(" BSP ".parse::<StrategyKind>().ok(), Some(StrategyKind::Compact));
        assert_eq!("grouped".parse::<StrategyKind>().ok(), Some(StrategyKind::Adaptive));
        assert!(matches!(
            "masonry".parse::<StrategyKind>(),
            Err(LayoutError::UnknownStrategy(name)) if name == "masonry"
        ));
    }

    #[test]
    fn display_round_trips() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.to_string().parse::<StrategyKind>().ok(), Some(kind));
        }
    }

    #[test]
    fn defaults_to_grid_at_300_dpi() {
        let cfg = LayoutConfig::default();
        assert_eq!(cfg.strategy, StrategyKind::Grid);
        assert_eq!(cfg.resolution.px_per_mm, 11.811);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn deserializes_with_defaults() {
        let cfg: LayoutConfig = serde_json::from_str(r#"{"strategy":"adaptive"}"#).unwrap();
        assert_eq!(cfg.strategy, StrategyKind::Adaptive);
        assert_eq!(cfg.resolution, Resolution::PRINT_300_DPI);
    }

    #[test]
    fn builder_rejects_zero_dpi() {
        let cfg = LayoutConfig::builder().dpi(0.0).build();
        assert!(matches!(cfg.validate(), Err(LayoutError::InvalidResolution(_))));
    }
}
