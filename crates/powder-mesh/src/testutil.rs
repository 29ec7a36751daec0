//! Test helpers for building binary STL buffers.

/// Serialize triangles into a binary STL buffer.
///
/// Normals are written as zero; the analyzer ignores them.
pub(crate) fn stl_from_triangles(triangles: &[[[f32; 3]; 3]]) -> Vec<u8> {
    let mut buffer = vec![0u8; 80];
    #[allow(clippy::cast_possible_truncation)]
    let count = triangles.len() as u32;
    buffer.extend_from_slice(&count.to_le_bytes());

    for triangle in triangles {
        // Normal (ignored by the analyzer)
        buffer.extend_from_slice(&[0u8; 12]);
        for vertex in triangle {
            for coord in vertex {
                buffer.extend_from_slice(&coord.to_le_bytes());
            }
        }
        // Attribute byte count
        buffer.extend_from_slice(&0u16.to_le_bytes());
    }

    buffer
}

/// Build a closed axis-aligned cube with CCW outward winding.
///
/// The cube spans `offset` to `offset + edge` on each axis.
pub(crate) fn cube_stl(edge: f32, offset: [f32; 3]) -> Vec<u8> {
    let corner = |x: f32, y: f32, z: f32| -> [f32; 3] {
        [
            offset[0] + x * edge,
            offset[1] + y * edge,
            offset[2] + z * edge,
        ]
    };

    let c = [
        corner(0.0, 0.0, 0.0), // 0
        corner(1.0, 0.0, 0.0), // 1
        corner(1.0, 1.0, 0.0), // 2
        corner(0.0, 1.0, 0.0), // 3
        corner(0.0, 0.0, 1.0), // 4
        corner(1.0, 0.0, 1.0), // 5
        corner(1.0, 1.0, 1.0), // 6
        corner(0.0, 1.0, 1.0), // 7
    ];

    // Two triangles per face, CCW when viewed from outside.
    let faces: [[usize; 3]; 12] = [
        [0, 2, 1],
        [0, 3, 2], // bottom (-Z)
        [4, 5, 6],
        [4, 6, 7], // top (+Z)
        [0, 1, 5],
        [0, 5, 4], // front (-Y)
        [3, 7, 6],
        [3, 6, 2], // back (+Y)
        [0, 4, 7],
        [0, 7, 3], // left (-X)
        [1, 2, 6],
        [1, 6, 5], // right (+X)
    ];

    let triangles: Vec<[[f32; 3]; 3]> = faces
        .iter()
        .map(|&[i0, i1, i2]| [c[i0], c[i1], c[i2]])
        .collect();

    stl_from_triangles(&triangles)
}
