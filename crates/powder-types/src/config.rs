//! Packing configuration.

use serde::{Deserialize, Serialize};

use crate::settings::PersistedSettings;

/// Parameters shared by all packing and orientation computations.
///
/// An immutable value threaded through every public entry point. Callers
/// that keep process-wide editable settings snapshot them into one of these
/// at call start, so a settings change never affects a calculation already
/// in progress.
///
/// # Example
///
/// ```
/// use powder_types::PackingConfig;
///
/// let config = PackingConfig::default().with_object_spacing(20.0);
/// assert!((config.wall_margin - 10.0).abs() < 1e-9);
/// assert!((config.object_spacing - 20.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackingConfig {
    /// Clearance from each bed edge in mm, applied to both X and Y.
    pub wall_margin: f64,

    /// Minimum XY clearance between any two placed objects in mm.
    pub object_spacing: f64,

    /// Layer height in mm.
    pub layer_height: f64,

    /// Layer time in seconds used for orientation-derived print times.
    ///
    /// Defaults to the larger bed's 35 s per layer.
    pub reference_layer_time: f64,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            wall_margin: 10.0,
            object_spacing: 15.0,
            layer_height: 0.1,
            reference_layer_time: 35.0,
        }
    }
}

impl PackingConfig {
    /// Set the wall margin.
    #[must_use]
    pub const fn with_wall_margin(mut self, margin: f64) -> Self {
        self.wall_margin = margin;
        self
    }

    /// Set the object spacing.
    #[must_use]
    pub const fn with_object_spacing(mut self, spacing: f64) -> Self {
        self.object_spacing = spacing;
        self
    }

    /// Set the layer height.
    #[must_use]
    pub const fn with_layer_height(mut self, height: f64) -> Self {
        self.layer_height = height;
        self
    }

    /// Set the reference layer time for orientation print-time estimates.
    #[must_use]
    pub const fn with_reference_layer_time(mut self, seconds: f64) -> Self {
        self.reference_layer_time = seconds;
        self
    }

    /// Fold a persisted settings record onto this configuration.
    ///
    /// Only fields present and finite-positive in the record are applied;
    /// anything missing or malformed keeps the current value, so a partial
    /// or damaged record never fails the load.
    #[must_use]
    pub fn merged_with(mut self, settings: &PersistedSettings) -> Self {
        if let Some(margin) = settings.wall_margin {
            if margin.is_finite() && margin >= 0.0 {
                self.wall_margin = margin;
            }
        }
        if let Some(spacing) = settings.object_spacing {
            if spacing.is_finite() && spacing >= 0.0 {
                self.object_spacing = spacing;
            }
        }
        self
    }
}
