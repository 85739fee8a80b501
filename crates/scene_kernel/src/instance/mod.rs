//! Instances: a mesh placed in the world with a material
//!
//! Opaque instances are lit through the light groups that contain them.
//! Translucent instances carry their own lighting (or none) and are drawn
//! in insertion order after every opaque instance.

mod opaque;
mod translucent;

pub use opaque::{InstanceOpaque, InstanceOpaqueBuilder};
pub use translucent::{
    InstanceTranslucentRefractive, InstanceTranslucentRefractiveBuilder,
    InstanceTranslucentRegularBuilder, InstanceTranslucentRegularLit,
    InstanceTranslucentRegularUnlit,
};

use crate::error::{StructuralError, StructuralResult};
use crate::foundation::ids::InstanceId;
use crate::foundation::math::Mat3;
use crate::graphics::Mesh;
use crate::material::MaterialRequirements;
use crate::transform::Transform;

pub(crate) fn check_uv_matrix(uv_matrix: Mat3) -> StructuralResult<Mat3> {
    if uv_matrix.iter().all(|v| v.is_finite()) {
        Ok(uv_matrix)
    } else {
        Err(StructuralError::invalid("uv_matrix", "elements must be finite"))
    }
}

/// Closed set of translucent instance variants
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceTranslucent {
    /// Regular material with its own lights
    RegularLit(InstanceTranslucentRegularLit),
    /// Regular material without lighting
    RegularUnlit(InstanceTranslucentRegularUnlit),
    /// Refractive material
    Refractive(InstanceTranslucentRefractive),
}

impl InstanceTranslucent {
    /// Unique id
    pub const fn id(&self) -> InstanceId {
        match self {
            Self::RegularLit(i) => i.id,
            Self::RegularUnlit(i) => i.id,
            Self::Refractive(i) => i.id,
        }
    }

    /// Mesh buffers
    pub const fn mesh(&self) -> &Mesh {
        match self {
            Self::RegularLit(i) => &i.mesh,
            Self::RegularUnlit(i) => &i.mesh,
            Self::Refractive(i) => &i.mesh,
        }
    }

    /// Object-to-world transform
    pub const fn transform(&self) -> &Transform {
        match self {
            Self::RegularLit(i) => &i.transform,
            Self::RegularUnlit(i) => &i.transform,
            Self::Refractive(i) => &i.transform,
        }
    }

    /// Permutation code of the material
    pub fn material_code(&self) -> &str {
        match self {
            Self::RegularLit(i) => i.material.code(),
            Self::RegularUnlit(i) => i.material.code(),
            Self::Refractive(i) => i.material.code(),
        }
    }

    /// Resource requirements of the material
    pub const fn material_requirements(&self) -> MaterialRequirements {
        match self {
            Self::RegularLit(i) => i.material.requirements,
            Self::RegularUnlit(i) => i.material.requirements,
            Self::Refractive(i) => i.material.requirements,
        }
    }
}

impl From<InstanceTranslucentRegularLit> for InstanceTranslucent {
    fn from(i: InstanceTranslucentRegularLit) -> Self {
        Self::RegularLit(i)
    }
}

impl From<InstanceTranslucentRegularUnlit> for InstanceTranslucent {
    fn from(i: InstanceTranslucentRegularUnlit) -> Self {
        Self::RegularUnlit(i)
    }
}

impl From<InstanceTranslucentRefractive> for InstanceTranslucent {
    fn from(i: InstanceTranslucentRefractive) -> Self {
        Self::Refractive(i)
    }
}

/// Closed set of instance variants
#[derive(Debug, Clone, PartialEq)]
pub enum Instance {
    /// Opaque, lit through light groups
    Opaque(InstanceOpaque),
    /// Translucent
    Translucent(InstanceTranslucent),
}

impl Instance {
    /// Unique id
    pub const fn id(&self) -> InstanceId {
        match self {
            Self::Opaque(i) => i.id,
            Self::Translucent(i) => i.id(),
        }
    }

    /// Mesh buffers
    pub const fn mesh(&self) -> &Mesh {
        match self {
            Self::Opaque(i) => &i.mesh,
            Self::Translucent(i) => i.mesh(),
        }
    }

    /// Object-to-world transform
    pub const fn transform(&self) -> &Transform {
        match self {
            Self::Opaque(i) => &i.transform,
            Self::Translucent(i) => i.transform(),
        }
    }

    /// Permutation code of the material
    pub fn material_code(&self) -> &str {
        match self {
            Self::Opaque(i) => i.material.code(),
            Self::Translucent(i) => i.material_code(),
        }
    }

    /// Whether the instance is drawn in the translucent pass
    pub const fn is_translucent(&self) -> bool {
        matches!(self, Self::Translucent(_))
    }
}

impl From<InstanceOpaque> for Instance {
    fn from(i: InstanceOpaque) -> Self {
        Self::Opaque(i)
    }
}

impl From<InstanceTranslucent> for Instance {
    fn from(i: InstanceTranslucent) -> Self {
        Self::Translucent(i)
    }
}

impl From<InstanceTranslucentRegularLit> for Instance {
    fn from(i: InstanceTranslucentRegularLit) -> Self {
        Self::Translucent(i.into())
    }
}

impl From<InstanceTranslucentRegularUnlit> for Instance {
    fn from(i: InstanceTranslucentRegularUnlit) -> Self {
        Self::Translucent(i.into())
    }
}

impl From<InstanceTranslucentRefractive> for Instance {
    fn from(i: InstanceTranslucentRefractive) -> Self {
        Self::Translucent(i.into())
    }
}
