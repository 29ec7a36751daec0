//! Persisted settings record.
//!
//! The external persistence layer stores a flat settings record. Its shape
//! is defined here so the core can accept it as configuration input. Every
//! field is optional: a record written by an older version, or one damaged
//! in storage, deserializes with the unknown parts simply absent, and the
//! consumer falls back to its documented defaults field by field.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Per-currency unit price overrides.
///
/// Absent fields keep the built-in price for that material.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceOverride {
    /// Powder price per kg.
    #[serde(default)]
    pub powder_per_kg: Option<f64>,
    /// Binder price per ml.
    #[serde(default)]
    pub binder_per_ml: Option<f64>,
    /// Silica price per g.
    #[serde(default)]
    pub silica_per_g: Option<f64>,
    /// Glaze price per g.
    #[serde(default)]
    pub glaze_per_g: Option<f64>,
}

/// Material consumption and pricing settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialSettings {
    /// Powder consumed per cm³ of part volume, in kg.
    #[serde(default)]
    pub powder_density: Option<f64>,
    /// Binder consumed per cm³ of part volume, in ml.
    #[serde(default)]
    pub binder_ratio: Option<f64>,
    /// Silica consumed per cm³ of part volume, in g.
    #[serde(default)]
    pub silica_density: Option<f64>,
    /// Price overrides keyed by currency code.
    #[serde(default)]
    pub prices: HashMap<String, PriceOverride>,
}

/// The flat settings record exchanged with the persistence collaborator.
///
/// # Example
///
/// ```
/// use powder_types::PersistedSettings;
///
/// // A partial record from an older version still loads.
/// let json = r#"{ "currency": "EUR", "wallMargin": 12.5 }"#;
/// let settings: PersistedSettings = serde_json::from_str(json).unwrap();
/// assert_eq!(settings.currency.as_deref(), Some("EUR"));
/// assert_eq!(settings.wall_margin, Some(12.5));
/// assert_eq!(settings.object_spacing, None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSettings {
    /// Working currency code (e.g. "USD").
    #[serde(default)]
    pub currency: Option<String>,
    /// Selected printer preset name.
    #[serde(default)]
    pub printer_type: Option<String>,
    /// Wall margin in mm.
    #[serde(default)]
    pub wall_margin: Option<f64>,
    /// Object spacing in mm.
    #[serde(default)]
    pub object_spacing: Option<f64>,
    /// Material consumption and pricing settings.
    #[serde(default)]
    pub materials: Option<MaterialSettings>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_loads() {
        let settings: PersistedSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, PersistedSettings::default());
    }

    #[test]
    fn unknown_fields_ignored() {
        let json = r#"{ "currency": "JPY", "theme": "dark", "legacyFlag": true }"#;
        let settings: PersistedSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.currency.as_deref(), Some("JPY"));
    }

    #[test]
    fn nested_materials_partial() {
        let json = r#"{
            "materials": {
                "powder_density": 0.0025,
                "prices": { "USD": { "powder_per_kg": 30.0 } }
            }
        }"#;
        let settings: PersistedSettings = serde_json::from_str(json).unwrap();
        let materials = settings.materials.unwrap();
        assert_eq!(materials.powder_density, Some(0.0025));
        assert_eq!(materials.binder_ratio, None);
        let usd = materials.prices.get("USD").unwrap();
        assert_eq!(usd.powder_per_kg, Some(30.0));
        assert_eq!(usd.glaze_per_g, None);
    }

    #[test]
    fn round_trip() {
        let settings = PersistedSettings {
            currency: Some("SGD".to_owned()),
            printer_type: Some("Printer 600".to_owned()),
            wall_margin: Some(10.0),
            object_spacing: Some(15.0),
            materials: None,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: PersistedSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
