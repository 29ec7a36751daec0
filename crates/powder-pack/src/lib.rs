//! Packing engine for powder-bed print jobs.
//!
//! This crate computes how objects fill printer beds:
//!
//! - **Orientation**: [`resolve_orientations`] derives the flat
//!   (shortest-dimension-vertical) and vertical (longest-dimension-vertical)
//!   layouts of an object, with their print times
//! - **Single-bed grid**: [`pack_single_bed`] counts how many identical
//!   boxes fit one bed, generates their positions, and derives print time
//!   and batch cost
//! - **Multi-item batches**: [`pack_batches`] shelf-packs a heterogeneous
//!   item list across as many bed loads as needed, trying both 0° and 90°
//!   footprints per item
//!
//! All entry points are pure functions of their arguments; configuration is
//! passed per call and snapshotted by value, so identical inputs always
//! produce identical outputs.
//!
//! # Example
//!
//! ```
//! use powder_pack::pack_single_bed;
//! use powder_types::{Dimensions, PackingConfig, Printer};
//!
//! let packing = pack_single_bed(
//!     &Dimensions::new(50.0, 50.0, 50.0),
//!     &Printer::printer_400(),
//!     &PackingConfig::default(),
//!     12.5,
//! )
//! .unwrap();
//!
//! assert!(packing.fits);
//! assert_eq!(packing.total_objects, 80);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod batch;
mod error;
mod orientation;
mod single;

pub use batch::{
    pack_batches, Batch, BatchItemSpec, BatchPacking, BedParams, PlacedItem, UnplacedItem,
    UnplacedReason,
};
pub use error::{PackError, PackResult};
pub use orientation::{resolve_orientations, OrientationSet, OrientedLayout};
pub use single::{fits_in_printer, fits_with_rotation, pack_single_bed, SingleBedPacking};
