//! Binary STL volume and bounding-box analysis.
//!
//! This crate parses a binary STL byte buffer and computes the enclosed
//! volume (divergence theorem) together with the axis-aligned bounding box.
//!
//! # Features
//!
//! - **Volume**: Signed tetrahedron sum over all triangles, exact up to
//!   floating-point accumulation for closed, consistently-oriented meshes
//! - **Dimensions**: Bounding-box extents computed in the same pass
//! - **Bounded input**: Truncated buffers and oversized triangle counts are
//!   rejected before any allocation proportional to the declared count
//! - **Offload**: [`BackgroundAnalyzer`] runs the same pure function on a
//!   worker thread with last-request-wins supersession and a synchronous
//!   fallback
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored)
//! UINT32       – Number of triangles (little-endian)
//! foreach triangle (50 bytes)
//!     REAL32[3] – Normal vector (ignored)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (ignored)
//! end
//! ```
//!
//! ASCII STL is not supported.
//!
//! # Example
//!
//! ```
//! use powder_mesh::{analyze_stl, AnalyzeOptions};
//!
//! // An STL with zero triangles is still a valid buffer.
//! let mut buffer = vec![0u8; 84];
//! buffer[80..84].copy_from_slice(&0u32.to_le_bytes());
//!
//! let analysis = analyze_stl(&buffer, &AnalyzeOptions::default()).unwrap();
//! assert_eq!(analysis.triangle_count, 0);
//! assert!((analysis.volume_cm3).abs() < 1e-12);
//! ```
//!
//! # Closed-Manifold Assumption
//!
//! The divergence-theorem volume is only meaningful for closed meshes with
//! consistent outward winding. The analyzer does **not** check this; an open
//! or inconsistently wound mesh yields a number without physical meaning.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod analyze;
mod background;
mod error;

#[cfg(test)]
pub(crate) mod testutil;

pub use analyze::{analyze_stl, analyze_stl_chunked, AnalyzeOptions, MeshAnalysis};
pub use background::{AnalysisTicket, BackgroundAnalyzer};
pub use error::{MeshError, MeshResult};
