//! Projections used by cameras and projective lights

use crate::error::{StructuralError, StructuralResult};
use crate::foundation::math::{utils, Mat4, Mat4Ext};

fn check_planes(near: f32, far: f32) -> StructuralResult<()> {
    if !utils::is_positive(near) {
        return Err(StructuralError::invalid("near", format!("{near} must be positive")));
    }
    if !far.is_finite() || far <= near {
        return Err(StructuralError::invalid(
            "far",
            format!("{far} must be finite and greater than near ({near})"),
        ));
    }
    Ok(())
}

/// Off-center perspective defined by near-plane extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionFrustum {
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
}

impl ProjectionFrustum {
    /// Create a frustum; extents must be non-degenerate and `0 < near < far`
    pub fn new(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> StructuralResult<Self> {
        check_planes(near, far)?;
        if !(right - left).is_finite() || right <= left {
            return Err(StructuralError::invalid("right", "must be greater than left"));
        }
        if !(top - bottom).is_finite() || top <= bottom {
            return Err(StructuralError::invalid("top", "must be greater than bottom"));
        }

        Ok(Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        })
    }

    /// Left extent at the near plane
    pub const fn left(&self) -> f32 {
        self.left
    }

    /// Right extent at the near plane
    pub const fn right(&self) -> f32 {
        self.right
    }

    /// Bottom extent at the near plane
    pub const fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Top extent at the near plane
    pub const fn top(&self) -> f32 {
        self.top
    }
}

/// Symmetric perspective defined by a vertical field of view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionPerspective {
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl ProjectionPerspective {
    /// Create a perspective; `fov_y` is in radians within `(0, π)`
    pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> StructuralResult<Self> {
        check_planes(near, far)?;
        if !utils::is_positive(fov_y) || fov_y >= std::f32::consts::PI {
            return Err(StructuralError::invalid("fov_y", format!("{fov_y} outside (0, π)")));
        }
        if !utils::is_positive(aspect) {
            return Err(StructuralError::invalid("aspect", format!("{aspect} must be positive")));
        }

        Ok(Self {
            fov_y,
            aspect,
            near,
            far,
        })
    }

    pub(crate) const fn new_unchecked(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y,
            aspect,
            near,
            far,
        }
    }

    /// Vertical field of view in radians
    pub const fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Width / height ratio
    pub const fn aspect(&self) -> f32 {
        self.aspect
    }
}

/// Closed set of projection variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Off-center frustum
    Frustum(ProjectionFrustum),
    /// Symmetric perspective
    Perspective(ProjectionPerspective),
}

impl Projection {
    /// Stable code used for shader permutation keys
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Frustum(_) => "PF",
            Self::Perspective(_) => "PP",
        }
    }

    /// Near plane distance
    pub const fn near(&self) -> f32 {
        match self {
            Self::Frustum(p) => p.near,
            Self::Perspective(p) => p.near,
        }
    }

    /// Far plane distance
    pub const fn far(&self) -> f32 {
        match self {
            Self::Frustum(p) => p.far,
            Self::Perspective(p) => p.far,
        }
    }

    /// Projection matrix mapping view space to clip space
    pub fn matrix(&self) -> Mat4 {
        match self {
            Self::Frustum(p) => Mat4::frustum(p.left, p.right, p.bottom, p.top, p.near, p.far),
            Self::Perspective(p) => Mat4::perspective(p.fov_y, p.aspect, p.near, p.far),
        }
    }
}

impl From<ProjectionFrustum> for Projection {
    fn from(p: ProjectionFrustum) -> Self {
        Self::Frustum(p)
    }
}

impl From<ProjectionPerspective> for Projection {
    fn from(p: ProjectionPerspective) -> Self {
        Self::Perspective(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perspective_validation() {
        assert!(ProjectionPerspective::new(1.0, 1.0, 0.0, 10.0).is_err());
        assert!(ProjectionPerspective::new(1.0, 1.0, 1.0, 1.0).is_err());
        assert!(ProjectionPerspective::new(0.0, 1.0, 1.0, 10.0).is_err());
        assert!(ProjectionPerspective::new(1.0, -1.0, 1.0, 10.0).is_err());
        assert!(ProjectionPerspective::new(1.0, 1.0, 0.1, 10.0).is_ok());
    }

    #[test]
    fn test_frustum_validation() {
        assert!(ProjectionFrustum::new(1.0, -1.0, -1.0, 1.0, 1.0, 10.0).is_err());
        assert!(ProjectionFrustum::new(-1.0, 1.0, 1.0, -1.0, 1.0, 10.0).is_err());
        assert!(ProjectionFrustum::new(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0).is_ok());
    }

    #[test]
    fn test_planes_and_codes() {
        let p: Projection = ProjectionPerspective::new(1.2, 1.0, 0.5, 50.0).unwrap().into();
        let f: Projection = ProjectionFrustum::new(-1.0, 1.0, -1.0, 1.0, 1.0, 20.0)
            .unwrap()
            .into();

        assert_eq!(p.code(), "PP");
        assert_eq!(f.code(), "PF");
        assert_relative_eq!(p.near(), 0.5);
        assert_relative_eq!(f.far(), 20.0);
    }

    #[test]
    fn test_square_frustum_is_ninety_degrees() {
        let f: Projection = ProjectionFrustum::new(-1.0, 1.0, -1.0, 1.0, 1.0, 20.0)
            .unwrap()
            .into();
        let p: Projection = ProjectionPerspective::new(std::f32::consts::FRAC_PI_2, 1.0, 1.0, 20.0)
            .unwrap()
            .into();
        assert_relative_eq!(f.matrix(), p.matrix(), epsilon = 1e-5);
    }
}
