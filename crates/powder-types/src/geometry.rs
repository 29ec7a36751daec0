//! Tagged geometry description.

use serde::{Deserialize, Serialize};

use crate::Dimensions;

/// What is known about an object's shape.
///
/// Consumers that behave differently for a measured triangle mesh versus a
/// hand-entered box match on this explicitly instead of inspecting the
/// input's shape at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// A measured triangle mesh: exact part volume plus bounding box.
    Mesh {
        /// Part volume in cm³.
        volume_cm3: f64,
        /// Bounding-box extents in mm.
        dimensions: Dimensions,
    },
    /// A box entered by hand; the box volume is the only volume known.
    BoxApproximation {
        /// Box extents in mm.
        dimensions: Dimensions,
    },
}

impl Geometry {
    /// Bounding-box extents in mm.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        match self {
            Self::Mesh { dimensions, .. } | Self::BoxApproximation { dimensions } => *dimensions,
        }
    }

    /// Best-known part volume in cm³.
    ///
    /// For a box approximation this is the full box volume.
    #[must_use]
    pub fn volume_cm3(&self) -> f64 {
        match self {
            Self::Mesh { volume_cm3, .. } => *volume_cm3,
            Self::BoxApproximation { dimensions } => dimensions.bounding_volume_cm3(),
        }
    }
}
