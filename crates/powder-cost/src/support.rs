//! Support-volume heuristic.

use powder_types::Geometry;

/// Fraction of the bounding-minus-part volume counted as support powder
/// for a measured mesh.
const MESH_SUPPORT_FRACTION: f64 = 0.15;

/// Estimate the support material volume for a part, in cm³.
///
/// Powder beds are self-supporting, so this estimates loose powder that
/// surrounds concavities and must be reclaimed, not printed support
/// structures. It is a crude heuristic, not a physical simulation:
///
/// - [`Geometry::Mesh`]: a fixed fraction of the bounding-box volume not
///   occupied by the part (concave parts trap more loose powder)
/// - [`Geometry::BoxApproximation`]: zero, a box has no concavities
///
/// # Example
///
/// ```
/// use powder_cost::support_volume_estimate;
/// use powder_types::{Dimensions, Geometry};
///
/// let boxy = Geometry::BoxApproximation {
///     dimensions: Dimensions::new(10.0, 10.0, 10.0),
/// };
/// assert!(support_volume_estimate(&boxy).abs() < 1e-12);
/// ```
#[must_use]
pub fn support_volume_estimate(geometry: &Geometry) -> f64 {
    match geometry {
        Geometry::Mesh {
            volume_cm3,
            dimensions,
        } => {
            let hollow = dimensions.bounding_volume_cm3() - volume_cm3;
            hollow.max(0.0) * MESH_SUPPORT_FRACTION
        }
        Geometry::BoxApproximation { .. } => 0.0,
    }
}
