//! Multi-item batch packing.
//!
//! A shelf-style packer: items are expanded by quantity, sorted tallest
//! first, and placed one at a time at the free position nearest the bed's
//! origin corner, trying both the 0° and 90° footprints. When nothing fits
//! the open bed, the batch is closed and a fresh one is started; batches
//! print sequentially.
//!
//! The position search scans integer-millimeter candidates and is
//! O(bed area × batch size) per item in the worst case. That is fine for
//! beds a few hundred millimeters across and tens to low hundreds of items;
//! if inputs ever grow well past that, an occupancy grid over the bed
//! should replace the linear scan.

use powder_types::{PackingConfig, Printer};
use tracing::{debug, info, warn};

use crate::error::{PackError, PackResult};

/// One kind of item to pack, expanded by `quantity` before placement.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItemSpec {
    /// Caller-assigned identifier, carried onto every placed instance.
    pub id: usize,
    /// Footprint width in mm (as already oriented by the caller).
    pub width: f64,
    /// Footprint depth in mm.
    pub depth: f64,
    /// Height in mm.
    pub height: f64,
    /// Part volume in cm³ per instance.
    pub volume_cm3: f64,
    /// Cost per instance.
    pub unit_cost: f64,
    /// Number of instances to pack. Must be at least 1.
    pub quantity: u32,
}

/// Printer-bed parameters for batch packing.
///
/// Usually built from a [`Printer`] and [`PackingConfig`] via
/// [`BedParams::from_printer`]; constructed directly for synthetic beds in
/// tests or capacity planning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BedParams {
    /// Placeable width after margins, in mm.
    pub available_width: f64,
    /// Placeable depth after margins, in mm.
    pub available_depth: f64,
    /// Maximum item height, in mm.
    pub available_height: f64,
    /// Clearance from each bed edge, in mm.
    pub wall_margin: f64,
    /// Minimum clearance between items, in mm.
    pub spacing: f64,
    /// Layer height in mm.
    pub layer_height: f64,
    /// Seconds per printed layer.
    pub layer_time_seconds: f64,
}

impl BedParams {
    /// Derive bed parameters from a printer and packing configuration.
    #[must_use]
    pub fn from_printer(printer: &Printer, config: &PackingConfig) -> Self {
        let (available_width, available_depth) = printer.available_footprint(config.wall_margin);
        Self {
            available_width,
            available_depth,
            available_height: printer.height,
            wall_margin: config.wall_margin,
            spacing: config.object_spacing,
            layer_height: config.layer_height,
            layer_time_seconds: printer.layer_time_seconds,
        }
    }
}

/// One placed instance within a batch.
///
/// `width` and `depth` are the as-placed footprint: swapped from the spec
/// when `rotated` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedItem {
    /// Identifier of the originating [`BatchItemSpec`].
    pub id: usize,
    /// As-placed footprint width in mm.
    pub width: f64,
    /// As-placed footprint depth in mm.
    pub depth: f64,
    /// Height in mm.
    pub height: f64,
    /// Part volume in cm³.
    pub volume_cm3: f64,
    /// Cost of this instance.
    pub cost: f64,
    /// Whether the footprint was rotated 90°.
    pub rotated: bool,
    /// Bed X coordinate in mm.
    pub x: f64,
    /// Bed Y coordinate in mm.
    pub y: f64,
    /// Bed Z coordinate in mm (always zero; items sit on the bed floor).
    pub z: f64,
}

/// One bed load of placed items.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Placed items, in placement order.
    pub items: Vec<PlacedItem>,
    /// Tallest item top in mm.
    pub max_height: f64,
    /// Print time for this load in seconds.
    pub print_time_seconds: f64,
}

impl Batch {
    /// One-line human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} items, {:.1} mm tall, {:.0} s print",
            self.items.len(),
            self.max_height,
            self.print_time_seconds
        )
    }
}

/// Why an item instance could not be packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnplacedReason {
    /// Footprint exceeds the bed in both orientations, or the item is too
    /// tall. Caught by the pre-filter before any placement attempt.
    TooLargeForBed,
    /// No valid position existed even in an empty bed. Defensive: reached
    /// only when an item slips past the pre-filter but the candidate range
    /// is empty.
    NoPlacement,
}

/// An item instance that could not be packed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnplacedItem {
    /// Identifier of the originating [`BatchItemSpec`].
    pub id: usize,
    /// Footprint width in mm (unrotated).
    pub width: f64,
    /// Footprint depth in mm (unrotated).
    pub depth: f64,
    /// Height in mm.
    pub height: f64,
    /// Part volume in cm³.
    pub volume_cm3: f64,
    /// Cost of this instance.
    pub cost: f64,
    /// Why it was not packed.
    pub reason: UnplacedReason,
}

/// Result of packing an item list across batches.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPacking {
    /// Closed batches in print order.
    pub batches: Vec<Batch>,
    /// Instances that could not be packed.
    pub unpacked: Vec<UnplacedItem>,
    /// All instances after quantity expansion.
    pub total_items: u32,
    /// Instances placed into batches.
    pub packed_items: u32,
    /// Volume of all instances in cm³.
    pub total_volume_cm3: f64,
    /// Volume of packed instances in cm³.
    pub packed_volume_cm3: f64,
    /// Cost of all instances.
    pub total_cost: f64,
    /// Cost of packed instances.
    pub packed_cost: f64,
    /// Sum of all batch print times in seconds (batches print one after
    /// another, never in parallel).
    pub total_print_time_seconds: f64,
}

impl BatchPacking {
    /// Number of batches.
    #[must_use]
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// One-line human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}/{} items in {} batches, {:.0} s total print",
            self.packed_items,
            self.total_items,
            self.batches.len(),
            self.total_print_time_seconds
        )
    }
}

/// A unit item awaiting placement.
#[derive(Debug, Clone, Copy)]
struct UnitItem {
    id: usize,
    width: f64,
    depth: f64,
    height: f64,
    volume_cm3: f64,
    cost: f64,
}

/// Pack a heterogeneous item list across one or more bed loads.
///
/// Each spec is expanded into `quantity` independent instances. Instances
/// that cannot fit the bed in either footprint orientation go straight to
/// `unpacked`; the rest are placed tallest-first so later, shorter items
/// fill in around them. Every input instance ends up in exactly one of
/// `batches` or `unpacked`.
///
/// # Errors
///
/// [`PackError::InvalidInput`] if the bed parameters are malformed or any
/// spec has a nonpositive or non-finite dimension, a negative or non-finite
/// volume or cost, or a zero quantity. Placement failures are not errors;
/// they land in `unpacked`.
///
/// # Example
///
/// ```
/// use powder_pack::{pack_batches, BatchItemSpec, BedParams};
/// use powder_types::{PackingConfig, Printer};
///
/// let bed = BedParams::from_printer(&Printer::printer_400(), &PackingConfig::default());
/// let items = [BatchItemSpec {
///     id: 1,
///     width: 60.0,
///     depth: 40.0,
///     height: 30.0,
///     volume_cm3: 40.0,
///     unit_cost: 3.5,
///     quantity: 4,
/// }];
///
/// let packing = pack_batches(&items, &bed).unwrap();
/// assert_eq!(packing.packed_items, 4);
/// assert_eq!(packing.batch_count(), 1);
/// ```
pub fn pack_batches(items: &[BatchItemSpec], bed: &BedParams) -> PackResult<BatchPacking> {
    validate_bed(bed)?;

    let mut queue: Vec<UnitItem> = Vec::new();
    let mut unpacked: Vec<UnplacedItem> = Vec::new();

    for spec in items {
        validate_spec(spec)?;
        for _ in 0..spec.quantity {
            let unit = UnitItem {
                id: spec.id,
                width: spec.width,
                depth: spec.depth,
                height: spec.height,
                volume_cm3: spec.volume_cm3,
                cost: spec.unit_cost,
            };
            if fits_bed_either_orientation(&unit, bed) {
                queue.push(unit);
            } else {
                unpacked.push(unplaced(&unit, UnplacedReason::TooLargeForBed));
            }
        }
    }

    // Tallest first: later, shorter items tuck in next to tall ones
    // instead of forcing extra-tall batches.
    queue.sort_by(|a, b| b.height.total_cmp(&a.height));

    let mut batches: Vec<Batch> = Vec::new();
    let mut current: Vec<PlacedItem> = Vec::new();

    for unit in &queue {
        if let Some(placed) = try_place(&current, unit, bed) {
            current.push(placed);
            continue;
        }

        if !current.is_empty() {
            batches.push(close_batch(std::mem::take(&mut current), bed));
        }

        if let Some(placed) = try_place(&current, unit, bed) {
            current.push(placed);
        } else {
            // Pre-filter admits footprints up to the full available area,
            // but the candidate range is inset by the wall margin, so this
            // path is reachable for near-bed-sized items.
            warn!(id = unit.id, "no valid placement even in an empty bed");
            unpacked.push(unplaced(unit, UnplacedReason::NoPlacement));
        }
    }

    if !current.is_empty() {
        batches.push(close_batch(current, bed));
    }

    let packed_items = as_count(batches.iter().map(|b| b.items.len()).sum());
    let total_items = packed_items + as_count(unpacked.len());
    let packed_volume_cm3: f64 = batches
        .iter()
        .flat_map(|b| &b.items)
        .map(|i| i.volume_cm3)
        .sum();
    let packed_cost: f64 = batches.iter().flat_map(|b| &b.items).map(|i| i.cost).sum();
    let unpacked_volume: f64 = unpacked.iter().map(|i| i.volume_cm3).sum();
    let unpacked_cost: f64 = unpacked.iter().map(|i| i.cost).sum();
    let total_print_time_seconds: f64 = batches.iter().map(|b| b.print_time_seconds).sum();

    let packing = BatchPacking {
        total_items,
        packed_items,
        total_volume_cm3: packed_volume_cm3 + unpacked_volume,
        packed_volume_cm3,
        total_cost: packed_cost + unpacked_cost,
        packed_cost,
        total_print_time_seconds,
        batches,
        unpacked,
    };

    info!(
        total_items = packing.total_items,
        packed_items = packing.packed_items,
        unpacked = packing.unpacked.len(),
        batch_count = packing.batches.len(),
        total_print_time_seconds = packing.total_print_time_seconds,
        "Packed batches"
    );

    Ok(packing)
}

fn validate_bed(bed: &BedParams) -> PackResult<()> {
    let fields = [
        ("available width", bed.available_width),
        ("available depth", bed.available_depth),
        ("available height", bed.available_height),
        ("layer height", bed.layer_height),
        ("layer time", bed.layer_time_seconds),
    ];
    for (name, value) in fields {
        if !value.is_finite() || value <= 0.0 {
            return Err(PackError::invalid_input(format!(
                "{name} must be positive and finite, got {value}"
            )));
        }
    }
    for (name, value) in [("wall margin", bed.wall_margin), ("spacing", bed.spacing)] {
        if !value.is_finite() || value < 0.0 {
            return Err(PackError::invalid_input(format!(
                "{name} must be nonnegative and finite, got {value}"
            )));
        }
    }
    Ok(())
}

fn validate_spec(spec: &BatchItemSpec) -> PackResult<()> {
    let dims = [
        ("width", spec.width),
        ("depth", spec.depth),
        ("height", spec.height),
    ];
    for (name, value) in dims {
        if !value.is_finite() || value <= 0.0 {
            return Err(PackError::invalid_input(format!(
                "item {}: {name} must be positive and finite, got {value}",
                spec.id
            )));
        }
    }
    for (name, value) in [("volume", spec.volume_cm3), ("cost", spec.unit_cost)] {
        if !value.is_finite() || value < 0.0 {
            return Err(PackError::invalid_input(format!(
                "item {}: {name} must be nonnegative and finite, got {value}",
                spec.id
            )));
        }
    }
    if spec.quantity == 0 {
        return Err(PackError::invalid_input(format!(
            "item {}: quantity must be at least 1",
            spec.id
        )));
    }
    Ok(())
}

fn fits_bed_either_orientation(unit: &UnitItem, bed: &BedParams) -> bool {
    if unit.height > bed.available_height {
        return false;
    }
    (unit.width <= bed.available_width && unit.depth <= bed.available_depth)
        || (unit.depth <= bed.available_width && unit.width <= bed.available_depth)
}

fn unplaced(unit: &UnitItem, reason: UnplacedReason) -> UnplacedItem {
    UnplacedItem {
        id: unit.id,
        width: unit.width,
        depth: unit.depth,
        height: unit.height,
        volume_cm3: unit.volume_cm3,
        cost: unit.cost,
        reason,
    }
}

/// Try to place one unit in the open batch, preferring the orientation
/// whose best position is nearest the origin corner.
fn try_place(current: &[PlacedItem], unit: &UnitItem, bed: &BedParams) -> Option<PlacedItem> {
    let straight = find_position(current, unit.width, unit.depth, bed);

    // A hit exactly at the origin corner cannot be beaten (ties prefer
    // the unrotated footprint), so skip the rotated trial.
    let at_origin = straight
        .is_some_and(|(x, y)| (x - bed.wall_margin).abs() < f64::EPSILON
            && (y - bed.wall_margin).abs() < f64::EPSILON);
    let rotated = if at_origin || (unit.width - unit.depth).abs() < f64::EPSILON {
        None
    } else {
        find_position(current, unit.depth, unit.width, bed)
    };

    let (x, y, rotate) = match (straight, rotated) {
        (Some((sx, sy)), Some((rx, ry))) => {
            if rx + ry < sx + sy {
                (rx, ry, true)
            } else {
                (sx, sy, false)
            }
        }
        (Some((sx, sy)), None) => (sx, sy, false),
        (None, Some((rx, ry))) => (rx, ry, true),
        (None, None) => return None,
    };

    debug!(id = unit.id, x, y, rotated = rotate, "placed item");

    Some(PlacedItem {
        id: unit.id,
        width: if rotate { unit.depth } else { unit.width },
        depth: if rotate { unit.width } else { unit.depth },
        height: unit.height,
        volume_cm3: unit.volume_cm3,
        cost: unit.cost,
        rotated: rotate,
        x,
        y,
        z: 0.0,
    })
}

/// Scan integer-millimeter candidates row-major from the origin corner and
/// return the valid position minimizing `x + y`, if any.
fn find_position(
    placed: &[PlacedItem],
    width: f64,
    depth: f64,
    bed: &BedParams,
) -> Option<(f64, f64)> {
    let max_x = bed.available_width - width;
    let max_y = bed.available_depth - depth;
    if max_x < bed.wall_margin || max_y < bed.wall_margin {
        return None;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Bed extents are a few hundred mm; step counts are small.
    let steps_x = (max_x - bed.wall_margin).floor() as u32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps_y = (max_y - bed.wall_margin).floor() as u32;

    let mut best: Option<(f64, f64)> = None;
    for step_y in 0..=steps_y {
        let y = bed.wall_margin + f64::from(step_y);

        // Rows are scanned in increasing y; once even x = wall_margin
        // cannot beat the best sum, no later row can either.
        if let Some((bx, by)) = best {
            if y + bed.wall_margin >= bx + by {
                break;
            }
        }

        for step_x in 0..=steps_x {
            let x = bed.wall_margin + f64::from(step_x);
            if !is_free(placed, x, y, width, depth, bed.spacing) {
                continue;
            }
            if step_x == 0 && step_y == 0 {
                return Some((x, y));
            }
            let better = match best {
                None => true,
                Some((bx, by)) => x + y < bx + by,
            };
            if better {
                best = Some((x, y));
            }
            // Within one row, larger x only grows x + y.
            break;
        }
    }

    best
}

/// Padded axis-aligned non-overlap test against every placed item.
fn is_free(placed: &[PlacedItem], x: f64, y: f64, width: f64, depth: f64, spacing: f64) -> bool {
    placed.iter().all(|item| {
        x + width + spacing <= item.x
            || item.x + item.width + spacing <= x
            || y + depth + spacing <= item.y
            || item.y + item.depth + spacing <= y
    })
}

fn close_batch(items: Vec<PlacedItem>, bed: &BedParams) -> Batch {
    let max_height = items
        .iter()
        .map(|item| item.z + item.height)
        .fold(0.0, f64::max);
    let print_time_seconds = (max_height / bed.layer_height).ceil() * bed.layer_time_seconds;
    debug!(
        items = items.len(),
        max_height, print_time_seconds, "closed batch"
    );
    Batch {
        items,
        max_height,
        print_time_seconds,
    }
}

// Item counts stay far below u32::MAX.
fn as_count(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
