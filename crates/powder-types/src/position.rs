//! Placement positions.

use serde::{Deserialize, Serialize};

/// A placement position on a printer bed, in millimeters.
///
/// Positions are absolute bed coordinates: the wall margin is already
/// included, so `(x, y)` of the first grid cell equals the margin, not zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Distance from the bed's left edge in mm.
    pub x: f64,
    /// Distance from the bed's front edge in mm.
    pub y: f64,
    /// Height above the bed floor in mm.
    pub z: f64,
}

impl Position {
    /// Create a position from coordinates.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}
