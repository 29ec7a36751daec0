//! Single-bed grid packing.

use powder_types::{Dimensions, PackingConfig, Position, Printer};
use tracing::debug;

use crate::error::{PackError, PackResult};

/// Ceiling on the number of generated positions. Grids beyond this come
/// from degenerate inputs (micron-scale extents on a full bed), not from
/// any real print job.
const MAX_TOTAL_OBJECTS: u64 = 1_000_000;

/// Result of packing identical boxes into one printer bed.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleBedPacking {
    /// Whether the object fits the bed at all.
    pub fits: bool,

    /// Grid count along X.
    pub count_x: u32,
    /// Grid count along Y.
    pub count_y: u32,
    /// Stacked count along Z.
    pub count_z: u32,

    /// Total object count, `count_x * count_y * count_z`.
    pub total_objects: u32,

    /// One position per object in z-outer, y-middle, x-inner order.
    ///
    /// The order is a contract: consumers render layer `k` by filtering
    /// positions with that `z`. Coordinates are absolute bed coordinates
    /// (wall margin included).
    pub positions: Vec<Position>,

    /// Height of the top of the highest stack in mm.
    pub bed_height_used: f64,

    /// Print time in seconds, `None` when the object does not fit.
    ///
    /// `None` is deliberate: a zero here would read as "instant".
    pub print_time_seconds: Option<f64>,

    /// Cost of the full bed, `total_objects` times the unit cost.
    pub batch_cost: f64,
}

impl SingleBedPacking {
    fn does_not_fit() -> Self {
        Self {
            fits: false,
            count_x: 0,
            count_y: 0,
            count_z: 0,
            total_objects: 0,
            positions: Vec::new(),
            bed_height_used: 0.0,
            print_time_seconds: None,
            batch_cost: 0.0,
        }
    }

    /// One-line human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.fits {
            format!(
                "{} objects ({}×{}×{} grid), bed height {:.1} mm",
                self.total_objects, self.count_x, self.count_y, self.count_z, self.bed_height_used
            )
        } else {
            "object does not fit the printer bed".to_owned()
        }
    }
}

/// Check whether an object fits the bed without trying a rotation.
///
/// This is the check the grid packer uses. It deliberately does **not**
/// try the 90°-rotated footprint; see [`fits_with_rotation`] for the
/// rotation-aware variant. Making the packer rotation-aware is a likely
/// future change, kept separate so current results stay reproducible.
#[must_use]
pub fn fits_in_printer(dims: &Dimensions, printer: &Printer, config: &PackingConfig) -> bool {
    let (available_width, available_depth) = printer.available_footprint(config.wall_margin);
    dims.width <= available_width && dims.depth <= available_depth && dims.height <= printer.height
}

/// Check whether an object fits the bed in either footprint orientation.
#[must_use]
pub fn fits_with_rotation(dims: &Dimensions, printer: &Printer, config: &PackingConfig) -> bool {
    fits_in_printer(dims, printer, config)
        || fits_in_printer(&dims.rotated_footprint(), printer, config)
}

/// Pack as many identical boxes as fit into one printer bed.
///
/// Objects are arranged on a grid with [`PackingConfig::object_spacing`]
/// between footprints in X and Y and stacked touching in Z (powder beds
/// need no vertical clearance). Print time covers the full stack height at
/// the printer's layer time; batch cost is the object count times
/// `unit_cost`.
///
/// # Errors
///
/// [`PackError::InvalidInput`] if any dimension is nonpositive or
/// non-finite, `unit_cost` is negative or non-finite, or the resulting
/// grid would exceed one million positions (degenerately tiny extents).
///
/// # Example
///
/// ```
/// use powder_pack::pack_single_bed;
/// use powder_types::{Dimensions, PackingConfig, Printer};
///
/// let packing = pack_single_bed(
///     &Dimensions::new(500.0, 50.0, 50.0),
///     &Printer::printer_400(),
///     &PackingConfig::default(),
///     1.0,
/// )
/// .unwrap();
///
/// assert!(!packing.fits);
/// assert!(packing.positions.is_empty());
/// assert_eq!(packing.print_time_seconds, None);
/// ```
pub fn pack_single_bed(
    dims: &Dimensions,
    printer: &Printer,
    config: &PackingConfig,
    unit_cost: f64,
) -> PackResult<SingleBedPacking> {
    if !dims.is_strictly_positive() {
        return Err(PackError::invalid_input(format!(
            "dimensions must be positive and finite, got {}×{}×{} mm",
            dims.width, dims.depth, dims.height
        )));
    }
    if !unit_cost.is_finite() || unit_cost < 0.0 {
        return Err(PackError::invalid_input(format!(
            "unit cost must be nonnegative and finite, got {unit_cost}"
        )));
    }

    if !fits_in_printer(dims, printer, config) {
        debug!(printer = %printer.name, "object does not fit bed");
        return Ok(SingleBedPacking::does_not_fit());
    }

    let (available_width, available_depth) = printer.available_footprint(config.wall_margin);
    let spacing = config.object_spacing;

    let raw_x = ((available_width + spacing) / (dims.width + spacing)).floor();
    let raw_y = ((available_depth + spacing) / (dims.depth + spacing)).floor();
    let raw_z = (printer.height / dims.height).floor();

    // A micron-scale object on a full bed produces a grid too large to
    // enumerate; reject it before the counts leave f64 range.
    let raw_total = raw_x * raw_y * raw_z;
    #[allow(clippy::cast_precision_loss)]
    if raw_total > MAX_TOTAL_OBJECTS as f64 {
        return Err(PackError::invalid_input(format!(
            "grid of {raw_x}×{raw_y}×{raw_z} objects exceeds the ceiling of {MAX_TOTAL_OBJECTS}"
        )));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count_x = raw_x as u32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count_y = raw_y as u32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count_z = raw_z as u32;

    let total_objects = count_x * count_y * count_z;

    let mut positions = Vec::with_capacity(total_objects as usize);
    for k in 0..count_z {
        for j in 0..count_y {
            for i in 0..count_x {
                positions.push(Position::new(
                    f64::from(i).mul_add(dims.width + spacing, config.wall_margin),
                    f64::from(j).mul_add(dims.depth + spacing, config.wall_margin),
                    f64::from(k) * dims.height,
                ));
            }
        }
    }

    let bed_height_used = f64::from(count_z) * dims.height;
    let layers = (bed_height_used / config.layer_height).ceil();
    let print_time_seconds = layers * printer.layer_time_seconds;

    debug!(
        printer = %printer.name,
        count_x,
        count_y,
        count_z,
        total_objects,
        print_time_seconds,
        "Packed single bed"
    );

    Ok(SingleBedPacking {
        fits: true,
        count_x,
        count_y,
        count_z,
        total_objects,
        positions,
        bed_height_used,
        print_time_seconds: Some(print_time_seconds),
        batch_cost: f64::from(total_objects) * unit_cost,
    })
}
