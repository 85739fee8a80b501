//! Camera observing a visible set

use crate::error::{StructuralError, StructuralResult};
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use crate::projection::Projection;

/// View transform and projection for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    view: Mat4,
    projection: Projection,
}

impl Camera {
    /// Create a camera from an explicit view matrix
    pub const fn new(view: Mat4, projection: Projection) -> Self {
        Self { view, projection }
    }

    /// Create a camera looking from `eye` towards `target`
    ///
    /// Fails when an input is non-finite, when `eye` and `target` coincide,
    /// or when `up` is parallel to the viewing direction.
    pub fn look_at(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        projection: Projection,
    ) -> StructuralResult<Self> {
        for (name, v) in [("eye", &eye), ("target", &target), ("up", &up)] {
            if !utils::is_finite_vec3(v) {
                return Err(StructuralError::invalid(name, "components must be finite"));
            }
        }

        let forward = target - eye;
        if forward.norm_squared() <= f32::EPSILON {
            return Err(StructuralError::invalid("target", "must differ from eye"));
        }
        if up.cross(&forward.normalize()).norm_squared() <= f32::EPSILON {
            return Err(StructuralError::invalid(
                "up",
                "must be non-zero and not parallel to the view direction",
            ));
        }

        Ok(Self {
            view: Mat4::look_at(eye, target, up),
            projection,
        })
    }

    /// World-to-view matrix
    pub const fn view(&self) -> &Mat4 {
        &self.view
    }

    /// Projection
    pub const fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Combined projection * view matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection.matrix() * self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionPerspective;
    use approx::assert_relative_eq;

    fn projection() -> Projection {
        ProjectionPerspective::new(1.0, 1.0, 0.1, 100.0).unwrap().into()
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let camera = Camera::look_at(eye, Vec3::zeros(), Vec3::y(), projection()).unwrap();

        let p = camera.view().transform_point(&eye.into());
        assert_relative_eq!(p.coords, Vec3::zeros(), epsilon = 1e-6);
        assert_eq!(camera.view_projection(), projection().matrix() * camera.view());
    }

    #[test]
    fn test_look_at_rejects_eye_on_target() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        assert!(matches!(
            Camera::look_at(eye, eye, Vec3::y(), projection()),
            Err(StructuralError::InvalidArgument { name: "target", .. })
        ));
    }

    #[test]
    fn test_look_at_rejects_up_along_view_direction() {
        assert!(matches!(
            Camera::look_at(Vec3::zeros(), Vec3::y(), Vec3::y(), projection()),
            Err(StructuralError::InvalidArgument { name: "up", .. })
        ));
        assert!(matches!(
            Camera::look_at(Vec3::zeros(), Vec3::z(), Vec3::zeros(), projection()),
            Err(StructuralError::InvalidArgument { name: "up", .. })
        ));
    }

    #[test]
    fn test_look_at_rejects_non_finite_input() {
        let eye = Vec3::new(f32::NAN, 0.0, 0.0);
        assert!(matches!(
            Camera::look_at(eye, Vec3::z(), Vec3::y(), projection()),
            Err(StructuralError::InvalidArgument { name: "eye", .. })
        ));
        let target = Vec3::new(0.0, 0.0, f32::INFINITY);
        assert!(Camera::look_at(Vec3::zeros(), target, Vec3::y(), projection()).is_err());
    }
}
