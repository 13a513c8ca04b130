use crate::{Mat4, Vec3};

/// Perspective camera placement emitted by scene fitting (right-handed).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
}

impl Camera {
    /// Place the eye on the +Z side of `target` at `distance`, with clip
    /// planes bracketing the fitted model (near = d/50, far = d*50).
    pub fn looking_from_z(target: Vec3, distance: f32, fov_y_rad: f32, aspect: f32) -> Self {
        Self {
            eye: target + Vec3::Z * distance,
            target,
            up: Vec3::Y,
            fov_y_rad,
            z_near: distance / 50.0,
            z_far: distance * 50.0,
            aspect,
        }
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    #[inline]
    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_rad,
            self.aspect.max(1e-6),
            self.z_near,
            self.z_far,
        )
    }

    #[inline]
    pub fn proj_view(&self) -> Mat4 {
        self.proj() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3;

    #[test]
    fn eye_sits_on_the_z_axis_from_target() {
        let cam = Camera::looking_from_z(vec3(3.0, 0.0, 0.0), 100.0, 1.0, 1.0);
        assert_eq!(cam.eye, vec3(3.0, 0.0, 100.0));
        assert_eq!(cam.target, vec3(3.0, 0.0, 0.0));
        assert_eq!(cam.z_near, 2.0);
        assert_eq!(cam.z_far, 5000.0);
    }
}
