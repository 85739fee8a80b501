//! Object-to-world transforms
//!
//! A transform produces its 4x4 matrix on demand. Evaluation goes through a
//! caller-owned [`TransformContext`] that holds the frame's view matrix, so
//! model-view and normal matrices for every instance share one camera.

use crate::camera::Camera;
use crate::foundation::math::{Mat3, Mat4, Quat, Vec3};

/// Orientation, scale, then translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformOST {
    /// Rotation quaternion
    pub orientation: Quat,
    /// Scale factors
    pub scale: Vec3,
    /// Position in world space
    pub translation: Vec3,
}

impl TransformOST {
    /// Create a transform from its parts
    pub const fn new(orientation: Quat, scale: Vec3, translation: Vec3) -> Self {
        Self {
            orientation,
            scale,
            translation,
        }
    }

    /// Create a transform with only a translation
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            orientation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            translation,
        }
    }
}

impl Default for TransformOST {
    fn default() -> Self {
        Self::from_translation(Vec3::zeros())
    }
}

/// Closed set of transform variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// No transformation
    Identity,
    /// Pure translation
    Translation(Vec3),
    /// Orientation, scale, translation
    OrientationScaleTranslation(TransformOST),
    /// Explicit object-to-world matrix
    Matrix(Mat4),
}

impl Transform {
    /// Compute the object-to-world matrix
    pub fn object_to_world(&self, context: &mut TransformContext) -> Mat4 {
        context.evaluations += 1;

        match self {
            Self::Identity => Mat4::identity(),
            Self::Translation(t) => Mat4::new_translation(t),
            Self::OrientationScaleTranslation(ost) => {
                Mat4::new_translation(&ost.translation)
                    * ost.orientation.to_homogeneous()
                    * Mat4::new_nonuniform_scaling(&ost.scale)
            }
            Self::Matrix(m) => *m,
        }
    }

    /// Transform a point from object space to world space
    pub fn transform_point(&self, context: &mut TransformContext, point: Vec3) -> Vec3 {
        let m = self.object_to_world(context);
        m.transform_point(&point.into()).coords
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::Identity
    }
}

impl From<TransformOST> for Transform {
    fn from(ost: TransformOST) -> Self {
        Self::OrientationScaleTranslation(ost)
    }
}

/// Per-frame state shared by transform evaluations
///
/// Owned by whoever walks the scene; transforms never store one. The view
/// matrix is set once per frame, usually from the visible set's camera, and
/// every model-view and normal matrix is derived from it.
#[derive(Debug, Clone)]
pub struct TransformContext {
    view: Mat4,
    evaluations: u64,
}

impl TransformContext {
    /// Create a context with an identity view
    pub fn new() -> Self {
        Self::with_view(Mat4::identity())
    }

    /// Create a context for the given world-to-view matrix
    pub const fn with_view(view: Mat4) -> Self {
        Self {
            view,
            evaluations: 0,
        }
    }

    /// Create a context for a camera's view
    pub fn for_camera(camera: &Camera) -> Self {
        Self::with_view(*camera.view())
    }

    /// Replace the view matrix at the start of a frame
    pub fn set_view(&mut self, view: Mat4) -> &mut Self {
        self.view = view;
        self
    }

    /// Current world-to-view matrix
    pub const fn view(&self) -> &Mat4 {
        &self.view
    }

    /// Number of matrices produced through this context
    pub const fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Object-to-view matrix for `transform`
    pub fn model_view(&mut self, transform: &Transform) -> Mat4 {
        let world = transform.object_to_world(self);
        self.view * world
    }

    /// Normal matrix (inverse transpose of the upper 3x3 of the model-view)
    ///
    /// Singular matrices yield the identity.
    pub fn normal_matrix(&mut self, transform: &Transform) -> Mat3 {
        let model_view = self.model_view(transform);
        let upper: Mat3 = model_view.fixed_view::<3, 3>(0, 0).into_owned();
        upper
            .try_inverse()
            .map_or_else(Mat3::identity, |inverse| inverse.transpose())
    }
}

impl Default for TransformContext {
    fn default() -> Self {
        Self::new()
    }
}
