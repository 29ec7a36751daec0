//! Core value types for powder-bed print costing and packing.
//!
//! This crate provides the foundational types shared by the analysis,
//! costing, and packing crates:
//!
//! - [`Dimensions`] - Object extents in millimeters
//! - [`Position`] - A placement position on a printer bed
//! - [`Printer`] - A printer bed model with layer timing
//! - [`PackingConfig`] - Wall margin, spacing, and layer parameters
//! - [`PersistedSettings`] - Tolerant shape of the external settings record
//! - [`Geometry`] - Tagged mesh-or-box geometry description
//!
//! # Units
//!
//! All lengths are **millimeters**, all volumes **cubic centimeters**, all
//! times **seconds**, unless a field name says otherwise.
//!
//! # Coordinate System
//!
//! Right-handed, Z-up:
//! - X: width (left/right)
//! - Y: depth (front/back)
//! - Z: height (build direction)
//!
//! # Example
//!
//! ```
//! use powder_types::{Dimensions, PackingConfig, Printer};
//!
//! let dims = Dimensions::new(50.0, 30.0, 20.0);
//! assert!(dims.is_strictly_positive());
//!
//! let printer = Printer::printer_400();
//! let config = PackingConfig::default();
//! let (aw, ad) = printer.available_footprint(config.wall_margin);
//! assert!((aw - 370.0).abs() < 1e-9);
//! assert!((ad - 270.0).abs() < 1e-9);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod dimensions;
mod geometry;
mod position;
mod printer;
mod settings;

pub use config::PackingConfig;
pub use dimensions::Dimensions;
pub use geometry::Geometry;
pub use position::Position;
pub use printer::Printer;
pub use settings::{MaterialSettings, PersistedSettings, PriceOverride};
