//! Per-currency material pricing.

use hashbrown::HashMap;
use powder_types::PriceOverride;
use tracing::warn;

/// Currency used when a requested code has no pricing entry.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Unit prices for the four consumables, in one currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialPrices {
    /// Powder price per kg.
    pub powder_per_kg: f64,
    /// Binder price per ml.
    pub binder_per_ml: f64,
    /// Silica price per g.
    pub silica_per_g: f64,
    /// Glaze price per g.
    pub glaze_per_g: f64,
}

impl MaterialPrices {
    fn apply_override(mut self, overrides: &PriceOverride) -> Self {
        if let Some(price) = overrides.powder_per_kg {
            if price.is_finite() && price >= 0.0 {
                self.powder_per_kg = price;
            }
        }
        if let Some(price) = overrides.binder_per_ml {
            if price.is_finite() && price >= 0.0 {
                self.binder_per_ml = price;
            }
        }
        if let Some(price) = overrides.silica_per_g {
            if price.is_finite() && price >= 0.0 {
                self.silica_per_g = price;
            }
        }
        if let Some(price) = overrides.glaze_per_g {
            if price.is_finite() && price >= 0.0 {
                self.glaze_per_g = price;
            }
        }
        self
    }
}

/// Material prices keyed by currency code.
///
/// Codes are arbitrary strings so callers can extend beyond the built-in
/// set. Lookups for unknown codes resolve to [`DEFAULT_CURRENCY`] with the
/// fallback reported to the caller.
///
/// # Example
///
/// ```
/// use powder_cost::PricingTable;
///
/// let table = PricingTable::builtin();
/// let (_, fallback) = table.resolve("EUR");
/// assert!(!fallback);
/// let (_, fallback) = table.resolve("CHF");
/// assert!(fallback);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTable {
    prices: HashMap<String, MaterialPrices>,
}

impl PricingTable {
    /// The built-in table: USD, EUR, JPY, and SGD.
    #[must_use]
    pub fn builtin() -> Self {
        let mut prices = HashMap::new();
        prices.insert(
            "USD".to_owned(),
            MaterialPrices {
                powder_per_kg: 28.0,
                binder_per_ml: 0.12,
                silica_per_g: 0.018,
                glaze_per_g: 0.055,
            },
        );
        prices.insert(
            "EUR".to_owned(),
            MaterialPrices {
                powder_per_kg: 25.5,
                binder_per_ml: 0.11,
                silica_per_g: 0.016,
                glaze_per_g: 0.05,
            },
        );
        prices.insert(
            "JPY".to_owned(),
            MaterialPrices {
                powder_per_kg: 4200.0,
                binder_per_ml: 18.0,
                silica_per_g: 2.7,
                glaze_per_g: 8.2,
            },
        );
        prices.insert(
            "SGD".to_owned(),
            MaterialPrices {
                powder_per_kg: 37.5,
                binder_per_ml: 0.16,
                silica_per_g: 0.024,
                glaze_per_g: 0.074,
            },
        );
        Self { prices }
    }

    /// Insert or replace the prices for a currency.
    pub fn set(&mut self, currency: impl Into<String>, prices: MaterialPrices) {
        self.prices.insert(currency.into(), prices);
    }

    /// Resolve prices for a currency.
    ///
    /// Returns the prices and whether the default-currency fallback was
    /// taken. The fallback is reported, never silent: it also emits a
    /// warning so an unexpected code shows up in the logs. A table somehow
    /// missing the [`DEFAULT_CURRENCY`] entry resolves to zero prices
    /// rather than panicking.
    #[must_use]
    pub fn resolve(&self, currency: &str) -> (MaterialPrices, bool) {
        if let Some(prices) = self.prices.get(currency) {
            return (*prices, false);
        }
        warn!(currency, "unknown currency, falling back to USD pricing");
        let fallback = self
            .prices
            .get(DEFAULT_CURRENCY)
            .copied()
            .unwrap_or(MaterialPrices {
                powder_per_kg: 0.0,
                binder_per_ml: 0.0,
                silica_per_g: 0.0,
                glaze_per_g: 0.0,
            });
        (fallback, true)
    }

    /// Currencies with an entry in the table.
    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.prices.keys().map(String::as_str)
    }

    /// Fold persisted per-currency price overrides onto this table.
    ///
    /// Overrides for unknown currencies create new entries seeded from the
    /// default currency's prices; malformed values are skipped field by
    /// field.
    #[must_use]
    pub fn merged_with(mut self, overrides: &HashMap<String, PriceOverride>) -> Self {
        let (seed, _) = self.resolve(DEFAULT_CURRENCY);
        for (currency, entry) in overrides {
            let base = self.prices.get(currency).copied().unwrap_or(seed);
            self.prices
                .insert(currency.clone(), base.apply_override(entry));
        }
        self
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::builtin()
    }
}
