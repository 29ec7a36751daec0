//! STL buffer analysis.

use nalgebra::{Point3, Vector3};
use powder_types::Dimensions;
use tracing::debug;

use crate::error::{MeshError, MeshResult};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle record (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// Offset of the first vertex within a triangle record (normal is skipped).
const VERTEX_OFFSET: usize = 12;

/// Options for STL analysis.
///
/// # Example
///
/// ```
/// use powder_mesh::AnalyzeOptions;
///
/// let options = AnalyzeOptions::default().with_max_triangles(100_000);
/// assert_eq!(options.max_triangles, 100_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Maximum accepted triangle count. Buffers declaring more are rejected
    /// before any per-triangle work.
    pub max_triangles: u32,

    /// Triangles processed between yield points in
    /// [`analyze_stl_chunked`](crate::analyze_stl_chunked).
    pub chunk_size: u32,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            max_triangles: 5_000_000,
            chunk_size: 16_384,
        }
    }
}

impl AnalyzeOptions {
    /// Set the triangle-count ceiling.
    #[must_use]
    pub const fn with_max_triangles(mut self, limit: u32) -> Self {
        self.max_triangles = limit;
        self
    }

    /// Set the chunk size for cooperative processing.
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: u32) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// Result of analyzing an STL buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshAnalysis {
    /// Enclosed volume in cm³ (absolute value of the signed sum).
    pub volume_cm3: f64,

    /// Bounding-box extents in mm.
    pub dimensions: Dimensions,

    /// Number of triangles in the buffer.
    pub triangle_count: u32,
}

/// Analyze a binary STL buffer.
///
/// Computes the enclosed volume via the divergence theorem (signed
/// tetrahedron sum against the origin) and the axis-aligned bounding box in
/// a single pass. Pure: identical buffers always yield bit-identical
/// results, regardless of which thread runs the computation.
///
/// The volume is only meaningful for closed, consistently-oriented meshes;
/// this is assumed, not checked.
///
/// # Errors
///
/// - [`MeshError::HeaderTooShort`] if the buffer cannot hold the header
///   and triangle count
/// - [`MeshError::TooManyTriangles`] if the declared count exceeds
///   [`AnalyzeOptions::max_triangles`]
/// - [`MeshError::Truncated`] if the buffer is shorter than the declared
///   count requires
pub fn analyze_stl(buffer: &[u8], options: &AnalyzeOptions) -> MeshResult<MeshAnalysis> {
    analyze_stl_chunked(buffer, options, |_| {})
}

/// Analyze a binary STL buffer with a per-chunk callback.
///
/// Identical to [`analyze_stl`] but invokes `on_chunk` with the number of
/// triangles processed so far after every [`AnalyzeOptions::chunk_size`]
/// triangles. Callers running on an interactive thread use the callback as
/// a voluntary yield point; the numeric result is bit-identical to the
/// plain path.
///
/// # Errors
///
/// Same as [`analyze_stl`].
pub fn analyze_stl_chunked(
    buffer: &[u8],
    options: &AnalyzeOptions,
    mut on_chunk: impl FnMut(u32),
) -> MeshResult<MeshAnalysis> {
    if buffer.len() < HEADER_SIZE + 4 {
        return Err(MeshError::HeaderTooShort { got: buffer.len() });
    }

    let triangle_count = u32::from_le_bytes([
        buffer[HEADER_SIZE],
        buffer[HEADER_SIZE + 1],
        buffer[HEADER_SIZE + 2],
        buffer[HEADER_SIZE + 3],
    ]);

    if triangle_count > options.max_triangles {
        return Err(MeshError::TooManyTriangles {
            count: triangle_count,
            limit: options.max_triangles,
        });
    }

    let expected = HEADER_SIZE + 4 + (triangle_count as usize) * TRIANGLE_SIZE;
    if buffer.len() < expected {
        return Err(MeshError::Truncated {
            triangles: triangle_count,
            expected,
            got: buffer.len(),
        });
    }

    let chunk_size = options.chunk_size.max(1);
    let mut signed_volume = 0.0_f64;
    let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
    let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);

    for index in 0..triangle_count {
        let record = HEADER_SIZE + 4 + (index as usize) * TRIANGLE_SIZE + VERTEX_OFFSET;
        let v0 = read_point(buffer, record);
        let v1 = read_point(buffer, record + 12);
        let v2 = read_point(buffer, record + 24);

        // Signed volume of tetrahedron with origin = (v0 · (v1 × v2)) / 6.
        // mul_add keeps the accumulation tight for large meshes.
        let cross = Vector3::new(
            v1.y.mul_add(v2.z, -(v1.z * v2.y)),
            v1.z.mul_add(v2.x, -(v1.x * v2.z)),
            v1.x.mul_add(v2.y, -(v1.y * v2.x)),
        );
        signed_volume += v0.z.mul_add(cross.z, v0.x.mul_add(cross.x, v0.y * cross.y));

        for v in [&v0, &v1, &v2] {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        let processed = index + 1;
        if processed % chunk_size == 0 {
            on_chunk(processed);
        }
    }

    let dimensions = if triangle_count == 0 {
        Dimensions::new(0.0, 0.0, 0.0)
    } else {
        Dimensions::new(max.x - min.x, max.y - min.y, max.z - min.z)
    };

    // mm³ → cm³
    let volume_cm3 = (signed_volume / 6.0).abs() / 1000.0;

    debug!(
        triangle_count,
        volume_cm3,
        width = dimensions.width,
        depth = dimensions.depth,
        height = dimensions.height,
        "Analyzed STL buffer"
    );

    Ok(MeshAnalysis {
        volume_cm3,
        dimensions,
        triangle_count,
    })
}

/// Read a vertex from 12 bytes (3 little-endian f32s) at `at`.
fn read_point(buffer: &[u8], at: usize) -> Point3<f64> {
    let x = f32::from_le_bytes([buffer[at], buffer[at + 1], buffer[at + 2], buffer[at + 3]]);
    let y = f32::from_le_bytes([
        buffer[at + 4],
        buffer[at + 5],
        buffer[at + 6],
        buffer[at + 7],
    ]);
    let z = f32::from_le_bytes([
        buffer[at + 8],
        buffer[at + 9],
        buffer[at + 10],
        buffer[at + 11],
    ]);
    Point3::new(f64::from(x), f64::from(y), f64::from(z))
}
