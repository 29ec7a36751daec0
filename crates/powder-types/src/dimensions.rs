//! Object dimensions.

use serde::{Deserialize, Serialize};

/// Extents of a rectangular object in millimeters.
///
/// An immutable value type. Validity (all extents strictly positive and
/// finite) is checked by consumers at their entry points via
/// [`Dimensions::is_strictly_positive`]; construction itself never fails.
///
/// # Example
///
/// ```
/// use powder_types::Dimensions;
///
/// let dims = Dimensions::new(30.0, 20.0, 10.0);
/// assert!((dims.bounding_volume_cm3() - 6.0).abs() < 1e-9);
/// assert_eq!(dims.sorted_extents(), [10.0, 20.0, 30.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Extent along X in mm.
    pub width: f64,
    /// Extent along Y in mm.
    pub depth: f64,
    /// Extent along Z in mm.
    pub height: f64,
}

impl Dimensions {
    /// Create dimensions from width, depth, and height in millimeters.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, depth: f64, height: f64) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    /// Check that every extent is finite and strictly positive.
    #[must_use]
    pub fn is_strictly_positive(&self) -> bool {
        self.width.is_finite()
            && self.depth.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.depth > 0.0
            && self.height > 0.0
    }

    /// The three extents sorted ascending: `[smallest, middle, largest]`.
    #[must_use]
    pub fn sorted_extents(&self) -> [f64; 3] {
        let mut extents = [self.width, self.depth, self.height];
        extents.sort_by(f64::total_cmp);
        extents
    }

    /// The shortest extent.
    #[must_use]
    pub fn min_extent(&self) -> f64 {
        self.width.min(self.depth).min(self.height)
    }

    /// The longest extent.
    #[must_use]
    pub fn max_extent(&self) -> f64 {
        self.width.max(self.depth).max(self.height)
    }

    /// Dimensions with the XY footprint rotated 90 degrees (width and
    /// depth swapped). Height is unchanged.
    #[must_use]
    pub const fn rotated_footprint(&self) -> Self {
        Self {
            width: self.depth,
            depth: self.width,
            height: self.height,
        }
    }

    /// Dimensions scaled uniformly by `factor` on all three axes.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            depth: self.depth * factor,
            height: self.height * factor,
        }
    }

    /// Volume of the bounding box in mm³.
    #[inline]
    #[must_use]
    pub fn bounding_volume_mm3(&self) -> f64 {
        self.width * self.depth * self.height
    }

    /// Volume of the bounding box in cm³.
    #[inline]
    #[must_use]
    pub fn bounding_volume_cm3(&self) -> f64 {
        self.bounding_volume_mm3() / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_extents_ascending() {
        let dims = Dimensions::new(5.0, 1.0, 3.0);
        assert_eq!(dims.sorted_extents(), [1.0, 3.0, 5.0]);
    }

    #[test]
    fn strictly_positive() {
        assert!(Dimensions::new(1.0, 2.0, 3.0).is_strictly_positive());
        assert!(!Dimensions::new(0.0, 2.0, 3.0).is_strictly_positive());
        assert!(!Dimensions::new(-1.0, 2.0, 3.0).is_strictly_positive());
        assert!(!Dimensions::new(f64::NAN, 2.0, 3.0).is_strictly_positive());
        assert!(!Dimensions::new(1.0, f64::INFINITY, 3.0).is_strictly_positive());
    }

    #[test]
    fn rotated_footprint_swaps_xy() {
        let dims = Dimensions::new(10.0, 20.0, 30.0);
        let rotated = dims.rotated_footprint();
        assert!((rotated.width - 20.0).abs() < f64::EPSILON);
        assert!((rotated.depth - 10.0).abs() < f64::EPSILON);
        assert!((rotated.height - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn scaled_uniform() {
        let dims = Dimensions::new(10.0, 20.0, 40.0).scaled(0.5);
        assert!((dims.width - 5.0).abs() < f64::EPSILON);
        assert!((dims.depth - 10.0).abs() < f64::EPSILON);
        assert!((dims.height - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bounding_volume() {
        let dims = Dimensions::new(10.0, 10.0, 10.0);
        assert!((dims.bounding_volume_mm3() - 1000.0).abs() < f64::EPSILON);
        assert!((dims.bounding_volume_cm3() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn min_max_extent() {
        let dims = Dimensions::new(5.0, 1.0, 3.0);
        assert!((dims.min_extent() - 1.0).abs() < f64::EPSILON);
        assert!((dims.max_extent() - 5.0).abs() < f64::EPSILON);
    }
}
