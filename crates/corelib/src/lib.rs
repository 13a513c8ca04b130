//! Core types: math re-exports, Extents, Camera.

pub use glam::{Mat4, Vec3, vec3};

pub mod camera;
pub mod extents;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_pv_is_finite() {
        let cam = camera::Camera::looking_from_z(
            vec3(1.0, 0.0, 0.0),
            80.0,
            60f32.to_radians(),
            16.0 / 9.0,
        );
        let pv = cam.proj_view();
        let a = pv.to_cols_array();
        assert!(a.iter().all(|f| f.is_finite()));
    }

    #[test]
    fn fitted_extents_center_at_origin_after_offset() {
        let e = extents::Extents::from_positions(&[2.0, 2.0, 2.0, 4.0, 6.0, 8.0]);
        let offset = -(e.min + e.range() * 0.5);
        assert_eq!(e.center() + offset, Vec3::ZERO);
    }
}
