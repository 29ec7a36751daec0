//! Printer bed models.

use serde::{Deserialize, Serialize};

/// A powder-bed printer model.
///
/// Two fixed presets exist ([`Printer::printer_400`] and
/// [`Printer::printer_600`]); custom machines can be built with the
/// `with_*` methods.
///
/// # Example
///
/// ```
/// use powder_types::Printer;
///
/// let printer = Printer::printer_600();
/// assert!((printer.layer_time_seconds - 35.0).abs() < 1e-9);
///
/// let custom = Printer::printer_400().with_build_volume(500.0, 400.0, 300.0);
/// assert!((custom.width - 500.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Printer {
    /// Human-readable model name.
    pub name: String,
    /// Bed width (X) in mm.
    pub width: f64,
    /// Bed depth (Y) in mm.
    pub depth: f64,
    /// Maximum build height (Z) in mm.
    pub height: f64,
    /// Seconds to print one layer.
    pub layer_time_seconds: f64,
}

impl Printer {
    /// The smaller reference machine: 390×290×200 mm bed, 45 s per layer.
    #[must_use]
    pub fn printer_400() -> Self {
        Self {
            name: "Printer 400".to_owned(),
            width: 390.0,
            depth: 290.0,
            height: 200.0,
            layer_time_seconds: 45.0,
        }
    }

    /// The larger reference machine: 595×600×250 mm bed, 35 s per layer.
    #[must_use]
    pub fn printer_600() -> Self {
        Self {
            name: "Printer 600".to_owned(),
            width: 595.0,
            depth: 600.0,
            height: 250.0,
            layer_time_seconds: 35.0,
        }
    }

    /// Look up a preset by name.
    ///
    /// Returns `None` for unknown names; callers fall back to their own
    /// default rather than failing.
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "Printer 400" => Some(Self::printer_400()),
            "Printer 600" => Some(Self::printer_600()),
            _ => None,
        }
    }

    /// Override the build volume.
    #[must_use]
    pub fn with_build_volume(mut self, width: f64, depth: f64, height: f64) -> Self {
        self.width = width;
        self.depth = depth;
        self.height = height;
        self
    }

    /// Override the per-layer time.
    #[must_use]
    pub fn with_layer_time(mut self, seconds: f64) -> Self {
        self.layer_time_seconds = seconds;
        self
    }

    /// The placeable footprint after insetting the wall margin on each side.
    ///
    /// Returns `(available_width, available_depth)` in mm.
    #[must_use]
    pub fn available_footprint(&self, wall_margin: f64) -> (f64, f64) {
        (
            self.width - 2.0 * wall_margin,
            self.depth - 2.0 * wall_margin,
        )
    }
}
