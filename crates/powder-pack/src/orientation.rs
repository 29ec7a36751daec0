//! Flat and vertical orientation resolution.

use powder_types::{Dimensions, PackingConfig};

use crate::error::{PackError, PackResult};

/// One canonical layout of an object with its derived print time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedLayout {
    /// Extents in this layout, in mm.
    pub dimensions: Dimensions,

    /// Print time in seconds at the configured reference layer time.
    pub print_time_seconds: f64,

    /// Whether shrink-to-fit scaling was applied to honor the maximum
    /// build height.
    pub scaled: bool,
}

/// The two canonical layouts of an object.
///
/// Always derived from the raw dimensions, never from a previously rotated
/// state, so resolving twice from the same input is identical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationSet {
    /// Shortest dimension vertical: fastest print, largest footprint.
    pub flat: OrientedLayout,
    /// Longest dimension vertical: smallest footprint, slowest print.
    pub vertical: OrientedLayout,
}

/// Derive the flat and vertical layouts of an object.
///
/// The three extents are sorted ascending to `[s, m, l]`; the flat layout
/// is `l × m` footprint with height `s`, the vertical layout `s × m` with
/// height `l`. Print times use [`PackingConfig::reference_layer_time`] and
/// [`PackingConfig::layer_height`].
///
/// If the longest extent exceeds `max_height` (the tallest printer's build
/// height), the vertical layout is scaled down uniformly on all three axes
/// so its height equals `max_height`. This is a documented shrink-to-fit
/// fallback, flagged on the layout via [`OrientedLayout::scaled`], not a
/// silent clip. The flat layout is never scaled.
///
/// # Errors
///
/// [`PackError::InvalidInput`] if any raw extent is nonpositive or
/// non-finite, or `max_height` is not positive.
///
/// # Example
///
/// ```
/// use powder_pack::resolve_orientations;
/// use powder_types::{Dimensions, PackingConfig};
///
/// let set = resolve_orientations(
///     &Dimensions::new(40.0, 10.0, 25.0),
///     &PackingConfig::default(),
///     250.0,
/// )
/// .unwrap();
///
/// assert_eq!(set.flat.dimensions, Dimensions::new(40.0, 25.0, 10.0));
/// assert_eq!(set.vertical.dimensions, Dimensions::new(10.0, 25.0, 40.0));
/// ```
pub fn resolve_orientations(
    raw: &Dimensions,
    config: &PackingConfig,
    max_height: f64,
) -> PackResult<OrientationSet> {
    if !raw.is_strictly_positive() {
        return Err(PackError::invalid_input(format!(
            "dimensions must be positive and finite, got {}×{}×{} mm",
            raw.width, raw.depth, raw.height
        )));
    }
    if !max_height.is_finite() || max_height <= 0.0 {
        return Err(PackError::invalid_input(format!(
            "max height must be positive and finite, got {max_height}"
        )));
    }

    let [s, m, l] = raw.sorted_extents();

    let flat_dimensions = Dimensions::new(l, m, s);
    let flat = OrientedLayout {
        dimensions: flat_dimensions,
        print_time_seconds: print_time(flat_dimensions.height, config),
        scaled: false,
    };

    let mut vertical_dimensions = Dimensions::new(s, m, l);
    let mut scaled = false;
    if l > max_height {
        vertical_dimensions = vertical_dimensions.scaled(max_height / l);
        scaled = true;
    }
    let vertical = OrientedLayout {
        dimensions: vertical_dimensions,
        print_time_seconds: print_time(vertical_dimensions.height, config),
        scaled,
    };

    Ok(OrientationSet { flat, vertical })
}

/// Print time in seconds for a given build height.
fn print_time(height: f64, config: &PackingConfig) -> f64 {
    (height / config.layer_height).ceil() * config.reference_layer_time
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn flat_minimizes_height_vertical_maximizes() {
        let set = resolve_orientations(
            &Dimensions::new(30.0, 10.0, 20.0),
            &PackingConfig::default(),
            250.0,
        )
        .unwrap();

        assert_eq!(set.flat.dimensions, Dimensions::new(30.0, 20.0, 10.0));
        assert_eq!(set.vertical.dimensions, Dimensions::new(10.0, 20.0, 30.0));
        assert!(!set.flat.scaled);
        assert!(!set.vertical.scaled);
    }

    #[test]
    fn print_times_follow_height() {
        let config = PackingConfig::default(); // 0.1 mm layers, 35 s each
        let set = resolve_orientations(&Dimensions::new(30.0, 10.0, 20.0), &config, 250.0)
            .unwrap();

        // flat: 10 mm → 100 layers; vertical: 30 mm → 300 layers
        assert_relative_eq!(set.flat.print_time_seconds, 100.0 * 35.0, epsilon = 1e-9);
        assert_relative_eq!(set.vertical.print_time_seconds, 300.0 * 35.0, epsilon = 1e-9);
    }

    #[test]
    fn resolution_is_idempotent() {
        let raw = Dimensions::new(17.0, 80.0, 42.5);
        let config = PackingConfig::default();

        let first = resolve_orientations(&raw, &config, 250.0).unwrap();
        let second = resolve_orientations(&raw, &config, 250.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn vertical_shrinks_to_max_height() {
        let set = resolve_orientations(
            &Dimensions::new(500.0, 100.0, 50.0),
            &PackingConfig::default(),
            250.0,
        )
        .unwrap();

        assert!(set.vertical.scaled);
        assert_relative_eq!(set.vertical.dimensions.height, 250.0, epsilon = 1e-9);
        // Uniform scale: footprint halves along with the height.
        assert_relative_eq!(set.vertical.dimensions.width, 25.0, epsilon = 1e-9);
        assert_relative_eq!(set.vertical.dimensions.depth, 50.0, epsilon = 1e-9);
        // The flat layout is left alone.
        assert!(!set.flat.scaled);
        assert_relative_eq!(set.flat.dimensions.width, 500.0, epsilon = 1e-9);
    }

    #[test]
    fn invalid_inputs_rejected() {
        let config = PackingConfig::default();
        assert!(resolve_orientations(&Dimensions::new(0.0, 1.0, 1.0), &config, 250.0).is_err());
        assert!(
            resolve_orientations(&Dimensions::new(f64::NAN, 1.0, 1.0), &config, 250.0).is_err()
        );
        assert!(resolve_orientations(&Dimensions::new(1.0, 1.0, 1.0), &config, 0.0).is_err());
    }
}
