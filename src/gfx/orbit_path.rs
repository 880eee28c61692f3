use std::f64::consts::TAU;

use three_d::{CpuMesh, Indices, Positions, Vec3};

use crate::sim::world::OrbitPath;

/// Builds a flat annulus in the XZ plane, centered on the origin.
///
/// Vertices come in pairs per angular step: outer rim first, then inner
/// rim. The first pair is repeated at the end to close the loop.
pub fn annulus_mesh(path: &OrbitPath) -> CpuMesh {
    let segments = path.segments.max(3);
    let inner = (path.radius - path.half_width).max(0.0);
    let outer = path.radius + path.half_width;

    let mut positions: Vec<Vec3> = Vec::with_capacity(2 * (segments as usize + 1));
    for i in 0..=segments {
        let (sin, cos) = (TAU * i as f64 / segments as f64).sin_cos();
        positions.push(Vec3::new((outer * cos) as f32, 0.0, (outer * sin) as f32));
        positions.push(Vec3::new((inner * cos) as f32, 0.0, (inner * sin) as f32));
    }
    let normals = vec![Vec3::new(0.0, 1.0, 0.0); positions.len()];

    CpuMesh {
        positions: Positions::F32(positions),
        indices: Indices::U32(annulus_indices(segments)),
        normals: Some(normals),
        ..Default::default()
    }
}

fn annulus_indices(segments: u32) -> Vec<u32> {
    let mut indices: Vec<u32> = Vec::with_capacity((segments * 6) as usize);
    for i in 0..segments {
        let base = i * 2;
        // outer (base), inner (base+1), next outer (base+2)
        indices.push(base);
        indices.push(base + 1);
        indices.push(base + 2);
        // next outer (base+2), inner (base+1), next inner (base+3)
        indices.push(base + 2);
        indices.push(base + 1);
        indices.push(base + 3);
    }
    indices
}
