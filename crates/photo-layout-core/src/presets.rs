//! Common page and ID-photo print sizes.

use serde::Serialize;

use crate::error::{LayoutError, Result};
use crate::model::{MarginConfig, PageGeometry, PhotoSpec};
use crate::units::Resolution;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PagePreset {
    pub name: &'static str,
    pub width_mm: f64,
    pub height_mm: f64,
    pub description: &'static str,
    /// Suggested gap between photos on this page.
    pub default_margin_mm: f64,
}

impl PagePreset {
    pub fn geometry(&self, resolution: Resolution) -> PageGeometry {
        PageGeometry::new(self.width_mm, self.height_mm).with_resolution(resolution)
    }

    pub fn default_margin(&self) -> MarginConfig {
        MarginConfig::gap(self.default_margin_mm)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PhotoSizePreset {
    pub name: &'static str,
    pub width_mm: f64,
    pub height_mm: f64,
    pub description: &'static str,
}

impl PhotoSizePreset {
    pub fn spec(&self, id: impl Into<String>, repeat_count: i32) -> PhotoSpec {
        PhotoSpec::new(id, self.width_mm, self.height_mm, repeat_count)
    }
}

pub const PAGE_PRESETS: &[PagePreset] = &[
    PagePreset {
        name: "A4",
        width_mm: 210.0,
        height_mm: 297.0,
        description: "Standard A4 paper",
        default_margin_mm: 5.0,
    },
    PagePreset {
        name: "A5",
        width_mm: 148.0,
        height_mm: 210.0,
        description: "Standard A5 paper",
        default_margin_mm: 4.0,
    },
    PagePreset {
        name: "Canon Postcard",
        width_mm: 100.0,
        height_mm: 148.0,
        description: "Postcard size",
        default_margin_mm: 3.0,
    },
    PagePreset {
        name: "L",
        width_mm: 89.0,
        height_mm: 127.0,
        description: "Standard photo print",
        default_margin_mm: 2.0,
    },
    PagePreset {
        name: "2L",
        width_mm: 127.0,
        height_mm: 178.0,
        description: "Large photo print",
        default_margin_mm: 3.0,
    },
];

pub const PHOTO_SIZE_PRESETS: &[PhotoSizePreset] = &[
    PhotoSizePreset {
        name: "1-inch",
        width_mm: 25.0,
        height_mm: 35.0,
        description: "ID card, driving licence",
    },
    PhotoSizePreset {
        name: "2-inch",
        width_mm: 35.0,
        height_mm: 49.0,
        description: "Passport, visa",
    },
    PhotoSizePreset {
        name: "small 2-inch",
        width_mm: 35.0,
        height_mm: 45.0,
        description: "Passport, visa",
    },
    PhotoSizePreset {
        name: "large 1-inch",
        width_mm: 33.0,
        height_mm: 48.0,
        description: "Resume",
    },
    PhotoSizePreset {
        name: "small 1-inch",
        width_mm: 22.0,
        height_mm: 32.0,
        description: "General ID documents",
    },
    PhotoSizePreset {
        name: "passport",
        width_mm: 33.0,
        height_mm: 48.0,
        description: "International passport",
    },
    PhotoSizePreset {
        name: "US visa",
        width_mm: 51.0,
        height_mm: 51.0,
        description: "United States visa",
    },
    PhotoSizePreset {
        name: "Schengen visa",
        width_mm: 35.0,
        height_mm: 45.0,
        description: "Schengen area visa",
    },
    PhotoSizePreset {
        name: "resume",
        width_mm: 35.0,
        height_mm: 45.0,
        description: "Job application",
    },
    PhotoSizePreset {
        name: "student ID",
        width_mm: 22.0,
        height_mm: 32.0,
        description: "Student card",
    },
];

/// Case-insensitive page preset lookup.
pub fn page_preset(name: &str) -> Result<&'static PagePreset> {
    PAGE_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| LayoutError::UnknownPreset(name.to_string()))
}

/// Case-insensitive photo size preset lookup.
pub fn photo_size_preset(name: &str) -> Result<&'static PhotoSizePreset> {
    PHOTO_SIZE_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| LayoutError::UnknownPreset(name.to_string()))
}
