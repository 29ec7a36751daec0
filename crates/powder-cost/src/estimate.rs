//! Cost estimation.

use powder_types::Dimensions;
use tracing::debug;

use crate::error::{CostError, CostResult};
use crate::pricing::PricingTable;
use crate::rates::MaterialRates;

/// Input to a cost estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct CostInput {
    /// Object extents in mm. Must be strictly positive and finite.
    pub dimensions: Dimensions,
    /// Part volume in cm³. Must be strictly positive and finite.
    pub volume_cm3: f64,
    /// Whether a glaze coating is applied.
    pub apply_glaze: bool,
    /// Requested currency code.
    pub currency: String,
}

/// Material consumption for one part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialQuantities {
    /// Powder in kg.
    pub powder_kg: f64,
    /// Binder in ml.
    pub binder_ml: f64,
    /// Silica in g.
    pub silica_g: f64,
    /// Glaze in g (zero when no glaze is applied).
    pub glaze_g: f64,
}

/// Cost per material and in total, in the working currency.
///
/// `total` is the exact sum of the four components; rounding is a
/// presentation concern and never happens here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    /// Powder cost.
    pub powder: f64,
    /// Binder cost.
    pub binder: f64,
    /// Silica cost.
    pub silica: f64,
    /// Glaze cost.
    pub glaze: f64,
    /// Sum of the four components.
    pub total: f64,
}

/// A completed cost estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct CostEstimate {
    /// Material consumption.
    pub quantities: MaterialQuantities,
    /// Cost breakdown in the working currency.
    pub breakdown: CostBreakdown,
    /// Currency the costs are denominated in.
    pub currency: String,
    /// Whether the requested currency was unknown and the default was used.
    pub currency_fallback: bool,
}

/// Estimate material consumption and cost for one part.
///
/// Pure function of its inputs: no shared state is read, so a settings
/// change between calls is reflected only through the `rates` and `pricing`
/// arguments the caller snapshots at call time. All failures are returned
/// as values; nothing panics, so one bad part never aborts a batch of
/// estimates.
///
/// # Errors
///
/// [`CostError::InvalidInput`] if the volume or any dimension is
/// nonpositive or non-finite.
///
/// # Example
///
/// ```
/// use powder_cost::{estimate_cost, CostInput, MaterialRates, PricingTable};
/// use powder_types::Dimensions;
///
/// let input = CostInput {
///     dimensions: Dimensions::new(30.0, 30.0, 30.0),
///     volume_cm3: 27.0,
///     apply_glaze: true,
///     currency: "EUR".to_owned(),
/// };
/// let estimate = estimate_cost(&input, &MaterialRates::default(), &PricingTable::builtin())
///     .unwrap();
/// assert!(estimate.quantities.glaze_g > 31.0);
/// ```
pub fn estimate_cost(
    input: &CostInput,
    rates: &MaterialRates,
    pricing: &PricingTable,
) -> CostResult<CostEstimate> {
    if !input.volume_cm3.is_finite() || input.volume_cm3 <= 0.0 {
        return Err(CostError::invalid_input(format!(
            "volume must be positive and finite, got {}",
            input.volume_cm3
        )));
    }
    if !input.dimensions.is_strictly_positive() {
        return Err(CostError::invalid_input(format!(
            "dimensions must be positive and finite, got {}×{}×{} mm",
            input.dimensions.width, input.dimensions.depth, input.dimensions.height
        )));
    }

    let quantities = MaterialQuantities {
        powder_kg: input.volume_cm3 * rates.powder_kg_per_cm3,
        binder_ml: input.volume_cm3 * rates.binder_ml_per_cm3,
        silica_g: input.volume_cm3 * rates.silica_g_per_cm3,
        glaze_g: if input.apply_glaze {
            rates.glaze_g(input.volume_cm3)
        } else {
            0.0
        },
    };

    let (prices, currency_fallback) = pricing.resolve(&input.currency);
    let powder = quantities.powder_kg * prices.powder_per_kg;
    let binder = quantities.binder_ml * prices.binder_per_ml;
    let silica = quantities.silica_g * prices.silica_per_g;
    let glaze = quantities.glaze_g * prices.glaze_per_g;

    let breakdown = CostBreakdown {
        powder,
        binder,
        silica,
        glaze,
        total: powder + binder + silica + glaze,
    };

    let currency = if currency_fallback {
        crate::pricing::DEFAULT_CURRENCY.to_owned()
    } else {
        input.currency.clone()
    };

    debug!(
        volume_cm3 = input.volume_cm3,
        total = breakdown.total,
        %currency,
        currency_fallback,
        "Estimated part cost"
    );

    Ok(CostEstimate {
        quantities,
        breakdown,
        currency,
        currency_fallback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn input(volume_cm3: f64) -> CostInput {
        CostInput {
            dimensions: Dimensions::new(50.0, 50.0, 50.0),
            volume_cm3,
            apply_glaze: false,
            currency: "USD".to_owned(),
        }
    }

    #[test]
    fn quantities_scale_with_volume() {
        let estimate = estimate_cost(
            &input(100.0),
            &MaterialRates::default(),
            &PricingTable::builtin(),
        )
        .unwrap();

        assert_relative_eq!(estimate.quantities.powder_kg, 0.2, epsilon = 1e-12);
        assert_relative_eq!(estimate.quantities.binder_ml, 27.0, epsilon = 1e-12);
        assert_relative_eq!(estimate.quantities.silica_g, 55.0, epsilon = 1e-12);
        assert!((estimate.quantities.glaze_g).abs() < f64::EPSILON);
    }

    #[test]
    fn total_is_exact_component_sum() {
        let estimate = estimate_cost(
            &CostInput {
                apply_glaze: true,
                ..input(73.3)
            },
            &MaterialRates::default(),
            &PricingTable::builtin(),
        )
        .unwrap();

        let b = estimate.breakdown;
        assert!((b.total - (b.powder + b.binder + b.silica + b.glaze)).abs() < f64::EPSILON);
    }

    #[test]
    fn cost_is_linear_in_volume() {
        let rates = MaterialRates::default();
        let pricing = PricingTable::builtin();
        let one = estimate_cost(&input(10.0), &rates, &pricing).unwrap();
        let three = estimate_cost(&input(30.0), &rates, &pricing).unwrap();

        assert_relative_eq!(
            three.breakdown.total,
            3.0 * one.breakdown.total,
            max_relative = 1e-12
        );
    }

    #[test]
    fn glaze_floor_at_tiny_volume() {
        let estimate = estimate_cost(
            &CostInput {
                apply_glaze: true,
                ..input(1e-9)
            },
            &MaterialRates::default(),
            &PricingTable::builtin(),
        )
        .unwrap();

        assert_relative_eq!(estimate.quantities.glaze_g, 31.76, max_relative = 1e-6);
    }

    #[test]
    fn invalid_volume_rejected() {
        let rates = MaterialRates::default();
        let pricing = PricingTable::builtin();

        for volume in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = estimate_cost(&input(volume), &rates, &pricing);
            assert!(matches!(result, Err(CostError::InvalidInput(_))));
        }
    }

    #[test]
    fn invalid_dimensions_rejected() {
        let bad = CostInput {
            dimensions: Dimensions::new(0.0, 50.0, 50.0),
            ..input(10.0)
        };
        let result = estimate_cost(&bad, &MaterialRates::default(), &PricingTable::builtin());
        assert!(matches!(result, Err(CostError::InvalidInput(_))));
    }

    #[test]
    fn unknown_currency_reported_not_fatal() {
        let estimate = estimate_cost(
            &CostInput {
                currency: "CHF".to_owned(),
                ..input(10.0)
            },
            &MaterialRates::default(),
            &PricingTable::builtin(),
        )
        .unwrap();

        assert!(estimate.currency_fallback);
        assert_eq!(estimate.currency, "USD");
        assert!(estimate.breakdown.total > 0.0);
    }
}
