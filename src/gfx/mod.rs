use glam::DVec3;
use three_d::Vec3;

pub mod orbit_path;
pub mod scene;
pub mod screen;

/// Narrows a simulation vector to the renderer's `f32` space.
#[inline]
pub(crate) fn to_vec3(v: DVec3) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}
