use serde::{Deserialize, Serialize};

/// Pixels per millimetre at 300 DPI, truncated to the value print shops quote.
pub const PX_PER_MM_300_DPI: f64 = 11.811;

const MM_PER_INCH: f64 = 25.4;

/// Output resolution used to map physical sizes (mm) onto page pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Resolution {
    pub px_per_mm: f64,
}

impl Resolution {
    /// 300 DPI, the default for photo printing.
    pub const PRINT_300_DPI: Resolution = Resolution {
        px_per_mm: PX_PER_MM_300_DPI,
    };

    pub fn new(px_per_mm: f64) -> Self {
        Self { px_per_mm }
    }

    /// Builds a resolution from dots per inch (`dpi / 25.4` px/mm).
    pub fn from_dpi(dpi: f64) -> Self {
        Self {
            px_per_mm: dpi / MM_PER_INCH,
        }
    }

    /// Converts millimetres to whole pixels, rounding to nearest.
    ///
    /// Rounding happens per call; sums of converted values may drift by a
    /// pixel from the converted sum.
    #[inline]
    pub fn mm_to_px(&self, mm: f64) -> i64 {
        (mm * self.px_per_mm).round() as i64
    }

    pub fn is_valid(&self) -> bool {
        self.px_per_mm.is_finite() && self.px_per_mm > 0.0
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::PRINT_300_DPI
    }
}

/// `round(mm * 11.811)`: millimetres to pixels at 300 DPI.
#[inline]
pub fn mm_to_pixels(mm: f64) -> i64 {
    Resolution::PRINT_300_DPI.mm_to_px(mm)
}
