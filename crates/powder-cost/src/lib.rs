//! Material quantity and cost estimation for powder-bed printing.
//!
//! This crate maps an object's dimensions and volume to material
//! consumption (powder, binder, silica, optional glaze) and to a cost
//! breakdown in a chosen currency.
//!
//! # Features
//!
//! - **Quantities**: Linear consumption rates per cm³, glaze with a fixed
//!   setup intercept
//! - **Pricing**: Per-currency tables (USD, EUR, JPY, SGD built in),
//!   extensible by arbitrary currency codes
//! - **Currency fallback**: Unknown currencies price in USD, reported on
//!   the result rather than failing the estimate
//! - **Support heuristic**: A crude support-volume estimate over the
//!   explicit mesh-or-box [`Geometry`](powder_types::Geometry) variants
//!
//! # Example
//!
//! ```
//! use powder_cost::{estimate_cost, CostInput, MaterialRates, PricingTable};
//! use powder_types::Dimensions;
//!
//! let input = CostInput {
//!     dimensions: Dimensions::new(50.0, 50.0, 50.0),
//!     volume_cm3: 100.0,
//!     apply_glaze: false,
//!     currency: "USD".to_owned(),
//! };
//!
//! let estimate = estimate_cost(&input, &MaterialRates::default(), &PricingTable::builtin())
//!     .unwrap();
//! assert!((estimate.quantities.powder_kg - 0.2).abs() < 1e-9);
//! assert!(!estimate.currency_fallback);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod estimate;
mod pricing;
mod rates;
mod support;

pub use error::{CostError, CostResult};
pub use estimate::{estimate_cost, CostBreakdown, CostEstimate, CostInput, MaterialQuantities};
pub use pricing::{MaterialPrices, PricingTable, DEFAULT_CURRENCY};
pub use rates::MaterialRates;
pub use support::support_volume_estimate;
