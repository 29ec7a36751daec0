//! Material consumption rates.

use powder_types::MaterialSettings;

/// Material consumed per cm³ of part volume.
///
/// Powder, binder, and silica scale linearly with volume. Glaze carries a
/// fixed intercept on top of its linear term: coating setup consumes glaze
/// even for a vanishingly small part, so glazed usage never reaches zero.
///
/// # Example
///
/// ```
/// use powder_cost::MaterialRates;
///
/// let rates = MaterialRates::default();
/// assert!((rates.glaze_g(0.0) - 31.76).abs() < 1e-9);
/// assert!((rates.glaze_g(100.0) - 47.91).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialRates {
    /// Powder in kg per cm³.
    pub powder_kg_per_cm3: f64,
    /// Binder in ml per cm³.
    pub binder_ml_per_cm3: f64,
    /// Silica in g per cm³.
    pub silica_g_per_cm3: f64,
    /// Glaze linear term in g per cm³.
    pub glaze_g_per_cm3: f64,
    /// Glaze fixed setup amount in g.
    pub glaze_base_g: f64,
}

impl Default for MaterialRates {
    fn default() -> Self {
        Self {
            powder_kg_per_cm3: 0.002,
            binder_ml_per_cm3: 0.27,
            silica_g_per_cm3: 0.55,
            glaze_g_per_cm3: 0.1615,
            glaze_base_g: 31.76,
        }
    }
}

impl MaterialRates {
    /// Set the powder rate.
    #[must_use]
    pub const fn with_powder_rate(mut self, kg_per_cm3: f64) -> Self {
        self.powder_kg_per_cm3 = kg_per_cm3;
        self
    }

    /// Set the binder rate.
    #[must_use]
    pub const fn with_binder_rate(mut self, ml_per_cm3: f64) -> Self {
        self.binder_ml_per_cm3 = ml_per_cm3;
        self
    }

    /// Set the silica rate.
    #[must_use]
    pub const fn with_silica_rate(mut self, g_per_cm3: f64) -> Self {
        self.silica_g_per_cm3 = g_per_cm3;
        self
    }

    /// Glaze usage in g for a glazed part of the given volume.
    #[must_use]
    pub fn glaze_g(&self, volume_cm3: f64) -> f64 {
        self.glaze_g_per_cm3.mul_add(volume_cm3, self.glaze_base_g)
    }

    /// Fold a persisted material settings record onto these rates.
    ///
    /// Only present, finite-positive fields are applied.
    #[must_use]
    pub fn merged_with(mut self, settings: &MaterialSettings) -> Self {
        if let Some(density) = settings.powder_density {
            if density.is_finite() && density > 0.0 {
                self.powder_kg_per_cm3 = density;
            }
        }
        if let Some(ratio) = settings.binder_ratio {
            if ratio.is_finite() && ratio > 0.0 {
                self.binder_ml_per_cm3 = ratio;
            }
        }
        if let Some(density) = settings.silica_density {
            if density.is_finite() && density > 0.0 {
                self.silica_g_per_cm3 = density;
            }
        }
        self
    }
}
