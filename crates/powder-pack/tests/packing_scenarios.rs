//! End-to-end scenarios: mesh analysis through costing into packing.
//!
//! These tests wire the crates together the way a print-quoting frontend
//! would: analyze an uploaded STL, resolve orientations, estimate the part
//! cost, then fill printer beds.

use powder_cost::{estimate_cost, CostInput, MaterialRates, PricingTable};
use powder_mesh::{analyze_stl, AnalyzeOptions};
use powder_pack::{
    pack_batches, pack_single_bed, resolve_orientations, BatchItemSpec, BedParams,
};
use powder_types::{PackingConfig, Printer};

/// Build a binary STL of an axis-aligned cube with the given edge in mm.
fn cube_stl(edge: f32) -> Vec<u8> {
    let e = edge;
    // 12 CCW triangles, outward normals, min corner at the origin.
    let triangles: [[[f32; 3]; 3]; 12] = [
        // bottom
        [[0.0, 0.0, 0.0], [0.0, e, 0.0], [e, e, 0.0]],
        [[0.0, 0.0, 0.0], [e, e, 0.0], [e, 0.0, 0.0]],
        // top
        [[0.0, 0.0, e], [e, 0.0, e], [e, e, e]],
        [[0.0, 0.0, e], [e, e, e], [0.0, e, e]],
        // front
        [[0.0, 0.0, 0.0], [e, 0.0, 0.0], [e, 0.0, e]],
        [[0.0, 0.0, 0.0], [e, 0.0, e], [0.0, 0.0, e]],
        // back
        [[0.0, e, 0.0], [0.0, e, e], [e, e, e]],
        [[0.0, e, 0.0], [e, e, e], [e, e, 0.0]],
        // left
        [[0.0, 0.0, 0.0], [0.0, 0.0, e], [0.0, e, e]],
        [[0.0, 0.0, 0.0], [0.0, e, e], [0.0, e, 0.0]],
        // right
        [[e, 0.0, 0.0], [e, e, 0.0], [e, e, e]],
        [[e, 0.0, 0.0], [e, e, e], [e, 0.0, e]],
    ];

    let mut buffer = vec![0u8; 80];
    buffer.extend_from_slice(&u32::try_from(triangles.len()).unwrap().to_le_bytes());
    for triangle in &triangles {
        for _ in 0..3 {
            buffer.extend_from_slice(&0.0_f32.to_le_bytes()); // normal, recomputed downstream
        }
        for vertex in triangle {
            for coordinate in vertex {
                buffer.extend_from_slice(&coordinate.to_le_bytes());
            }
        }
        buffer.extend_from_slice(&0u16.to_le_bytes());
    }
    buffer
}

#[test]
fn cube_quote_end_to_end() {
    let config = PackingConfig::default();
    let printer = Printer::printer_400();

    let analysis = analyze_stl(&cube_stl(50.0), &AnalyzeOptions::default()).unwrap();
    assert!((analysis.volume_cm3 - 125.0).abs() < 1e-6);
    assert!((analysis.dimensions.width - 50.0).abs() < 1e-6);
    assert_eq!(analysis.triangle_count, 12);

    let orientations = resolve_orientations(&analysis.dimensions, &config, printer.height).unwrap();
    // A cube orients identically either way.
    assert_eq!(orientations.flat.dimensions, orientations.vertical.dimensions);

    let estimate = estimate_cost(
        &CostInput {
            dimensions: orientations.flat.dimensions,
            volume_cm3: analysis.volume_cm3,
            apply_glaze: true,
            currency: "EUR".to_owned(),
        },
        &MaterialRates::default(),
        &PricingTable::builtin(),
    )
    .unwrap();
    assert!(!estimate.currency_fallback);
    assert!(estimate.breakdown.total > 0.0);

    let packing = pack_single_bed(
        &orientations.flat.dimensions,
        &printer,
        &config,
        estimate.breakdown.total,
    )
    .unwrap();
    assert!(packing.fits);
    assert_eq!(packing.total_objects, 80);
    assert!(
        (packing.batch_cost - 80.0 * estimate.breakdown.total).abs()
            < 1e-9 * packing.batch_cost
    );
}

#[test]
fn analyzed_parts_flow_into_batches() {
    let config = PackingConfig::default();
    let printer = Printer::printer_600();
    let bed = BedParams::from_printer(&printer, &config);

    let rates = MaterialRates::default();
    let pricing = PricingTable::builtin();

    let mut items = Vec::new();
    for (id, edge, quantity) in [(1usize, 40.0f32, 6u32), (2, 75.0, 3)] {
        let analysis = analyze_stl(&cube_stl(edge), &AnalyzeOptions::default()).unwrap();
        let layout = resolve_orientations(&analysis.dimensions, &config, printer.height)
            .unwrap()
            .flat;
        let estimate = estimate_cost(
            &CostInput {
                dimensions: layout.dimensions,
                volume_cm3: analysis.volume_cm3,
                apply_glaze: false,
                currency: "USD".to_owned(),
            },
            &rates,
            &pricing,
        )
        .unwrap();
        items.push(BatchItemSpec {
            id,
            width: layout.dimensions.width,
            depth: layout.dimensions.depth,
            height: layout.dimensions.height,
            volume_cm3: analysis.volume_cm3,
            unit_cost: estimate.breakdown.total,
            quantity,
        });
    }

    let packing = pack_batches(&items, &bed).unwrap();

    // Nine small parts easily share one Printer 600 bed.
    assert_eq!(packing.batch_count(), 1);
    assert_eq!(packing.packed_items, 9);
    assert!(packing.unpacked.is_empty());

    // Tallest-first: the 75 mm cubes lead the placement order.
    let batch = &packing.batches[0];
    assert!((batch.items[0].height - 75.0).abs() < 1e-6);
    assert!((batch.max_height - 75.0).abs() < 1e-6);
    // 750 layers at 0.1 mm, 35 s each on Printer 600.
    assert!((batch.print_time_seconds - 750.0 * 35.0).abs() < 1e-6);

    // Costs aggregate exactly.
    let expected_cost: f64 = items
        .iter()
        .map(|i| f64::from(i.quantity) * i.unit_cost)
        .sum();
    assert!((packing.packed_cost - expected_cost).abs() < 1e-9 * expected_cost);
    // Volume conservation: 6 × 64 cm³ + 3 × ~421.9 cm³.
    let expected_volume = 6.0 * 64.0 + 3.0 * 75.0_f64.powi(3) / 1000.0;
    assert!((packing.total_volume_cm3 - expected_volume).abs() < 1e-6);
}

#[test]
fn oversized_part_is_reported_not_fatal() {
    let config = PackingConfig::default();
    let printer = Printer::printer_400();
    let bed = BedParams::from_printer(&printer, &config);

    let analysis = analyze_stl(&cube_stl(450.0), &AnalyzeOptions::default()).unwrap();
    let items = [
        BatchItemSpec {
            id: 1,
            width: analysis.dimensions.width,
            depth: analysis.dimensions.depth,
            height: analysis.dimensions.height,
            volume_cm3: analysis.volume_cm3,
            unit_cost: 100.0,
            quantity: 1,
        },
        BatchItemSpec {
            id: 2,
            width: 30.0,
            depth: 30.0,
            height: 30.0,
            volume_cm3: 27.0,
            unit_cost: 2.0,
            quantity: 2,
        },
    ];

    let packing = pack_batches(&items, &bed).unwrap();
    assert_eq!(packing.packed_items, 2);
    assert_eq!(packing.unpacked.len(), 1);
    assert_eq!(packing.unpacked[0].id, 1);
    assert_eq!(packing.total_items, 3);
}
