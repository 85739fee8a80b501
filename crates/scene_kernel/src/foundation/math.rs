//! Math utilities and types
//!
//! The kernel treats vectors and matrices as plain values; these aliases pin
//! the `nalgebra` types used in every public signature.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}

/// Math utility functions
pub mod utils {
    /// Returns `true` if `value` is finite and strictly positive.
    pub fn is_positive(value: f32) -> bool {
        value.is_finite() && value > 0.0
    }

    /// Returns `true` if `value` is finite and within `[0, 1]`.
    pub fn is_unit_interval(value: f32) -> bool {
        value.is_finite() && (0.0..=1.0).contains(&value)
    }

    /// Returns `true` if every component of `v` is finite.
    pub fn is_finite_vec3(v: &super::Vec3) -> bool {
        v.iter().all(|c| c.is_finite())
    }
}

/// Extension trait for Mat4 with projection helpers
///
/// All projections map depth to `[0, 1]` and look down `+Z` in view space,
/// matching the conventions of the backends this kernel feeds.
pub trait Mat4Ext {
    /// Create a symmetric perspective projection matrix
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create an off-center perspective projection from near-plane extents
    fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4;

    /// Create a look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // P = [a⁻¹/tan(φ/2)    0              0                    0           ]
        //     [0               1/tan(φ/2)     0                    0           ]
        //     [0               0              f/(f-n)              -nf/(f-n)   ]
        //     [0               0              1                    0           ]
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = far / (far - near);
        result[(2, 3)] = -(near * far) / (far - near);
        result[(3, 2)] = 1.0;
        result
    }

    fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        let width = right - left;
        let height = top - bottom;

        let mut result = Mat4::zeros();
        result[(0, 0)] = 2.0 * near / width;
        result[(0, 2)] = -(right + left) / width;
        result[(1, 1)] = 2.0 * near / height;
        result[(1, 2)] = -(top + bottom) / height;
        result[(2, 2)] = far / (far - near);
        result[(2, 3)] = -(near * far) / (far - near);
        result[(3, 2)] = 1.0;
        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let right = up.cross(&forward).normalize();
        let camera_up = forward.cross(&right);

        let translation = Mat4::new(
            1.0, 0.0, 0.0, -eye.x,
            0.0, 1.0, 0.0, -eye.y,
            0.0, 0.0, 1.0, -eye.z,
            0.0, 0.0, 0.0, 1.0,
        );

        let rotation = Mat4::new(
            right.x, right.y, right.z, 0.0,
            camera_up.x, camera_up.y, camera_up.z, 0.0,
            forward.x, forward.y, forward.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        rotation * translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_symmetric_frustum_matches_perspective() {
        let near = 0.5;
        let far = 100.0;
        let fov = constants::HALF_PI;
        let aspect = 1.5;

        let top = near * (fov * 0.5).tan();
        let right = top * aspect;

        let p = Mat4::perspective(fov, aspect, near, far);
        let f = Mat4::frustum(-right, right, -top, top, near, far);
        assert_relative_eq!(p, f, epsilon = 1e-5);
    }

    #[test]
    fn test_perspective_depth_range() {
        let p = Mat4::perspective(1.0, 1.0, 1.0, 10.0);

        let near_point = p * Vec4::new(0.0, 0.0, 1.0, 1.0);
        let far_point = p * Vec4::new(0.0, 0.0, 10.0, 1.0);
        assert_relative_eq!(near_point.z / near_point.w, 0.0, epsilon = 1e-6);
        assert_relative_eq!(far_point.z / far_point.w, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_look_at_faces_positive_z() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, -5.0), Vec3::zeros(), Vec3::y());

        let target = view * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let above = view * Vec4::new(0.0, 1.0, -5.0, 1.0);
        assert_relative_eq!(target.xyz(), Vec3::new(0.0, 0.0, 5.0), epsilon = 1e-6);
        assert_relative_eq!(above.xyz(), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_range_helpers() {
        assert!(utils::is_unit_interval(0.0));
        assert!(utils::is_unit_interval(1.0));
        assert!(!utils::is_unit_interval(1.0001));
        assert!(!utils::is_unit_interval(f32::NAN));
        assert!(utils::is_positive(0.1));
        assert!(!utils::is_positive(0.0));
        assert!(!utils::is_positive(f32::INFINITY));
    }
}
