//! Material families
//!
//! A material is a composite of axes. Its code, texture count, and UV and
//! tangent requirements are derived from the axis variants when the material
//! is built and never change afterwards.

use super::axes::{
    MaterialAlbedo, MaterialAlpha, MaterialAxis, MaterialDepth, MaterialEmissive,
    MaterialEnvironment, MaterialNormal, MaterialRefractive, MaterialSpecular,
};

/// Derived resource requirements of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialRequirements {
    /// Number of textures sampled
    pub texture_count: u32,
    /// Whether the mesh must supply UV coordinates
    pub requires_uv: bool,
    /// Whether the mesh must supply tangents
    pub requires_tangents: bool,
}

impl MaterialRequirements {
    pub(crate) fn derive(axes: &[&dyn MaterialAxis], normal: &MaterialNormal) -> Self {
        Self {
            texture_count: axes.iter().map(|a| a.texture_count()).sum(),
            requires_uv: axes.iter().any(|a| a.requires_uv()),
            requires_tangents: normal.requires_tangents(),
        }
    }
}

pub(crate) fn compose_code(prefix: &str, axes: &[&dyn MaterialAxis]) -> String {
    let mut code = String::from(prefix);
    for axis in axes {
        code.push('_');
        code.push_str(axis.code());
    }
    code
}

/// Opaque, lit material
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialOpaqueRegular {
    pub(crate) albedo: MaterialAlbedo,
    pub(crate) depth: MaterialDepth,
    pub(crate) emissive: MaterialEmissive,
    pub(crate) environment: MaterialEnvironment,
    pub(crate) normal: MaterialNormal,
    pub(crate) specular: MaterialSpecular,
    pub(crate) code: String,
    pub(crate) requirements: MaterialRequirements,
}

impl MaterialOpaqueRegular {
    /// Albedo axis
    pub const fn albedo(&self) -> &MaterialAlbedo {
        &self.albedo
    }

    /// Depth axis
    pub const fn depth(&self) -> &MaterialDepth {
        &self.depth
    }

    /// Emissive axis
    pub const fn emissive(&self) -> &MaterialEmissive {
        &self.emissive
    }

    /// Environment axis
    pub const fn environment(&self) -> &MaterialEnvironment {
        &self.environment
    }

    /// Normal axis
    pub const fn normal(&self) -> &MaterialNormal {
        &self.normal
    }

    /// Specular axis
    pub const fn specular(&self) -> &MaterialSpecular {
        &self.specular
    }

    /// Permutation code, e.g. `O_BT_DC_MN_EN_NM_SC`
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Derived resource requirements
    pub const fn requirements(&self) -> MaterialRequirements {
        self.requirements
    }
}

/// Translucent, optionally lit material
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTranslucentRegular {
    pub(crate) albedo: MaterialAlbedo,
    pub(crate) alpha: MaterialAlpha,
    pub(crate) environment: MaterialEnvironment,
    pub(crate) normal: MaterialNormal,
    pub(crate) specular: MaterialSpecular,
    pub(crate) code: String,
    pub(crate) requirements: MaterialRequirements,
}

impl MaterialTranslucentRegular {
    /// Albedo axis
    pub const fn albedo(&self) -> &MaterialAlbedo {
        &self.albedo
    }

    /// Alpha axis
    pub const fn alpha(&self) -> &MaterialAlpha {
        &self.alpha
    }

    /// Environment axis
    pub const fn environment(&self) -> &MaterialEnvironment {
        &self.environment
    }

    /// Normal axis
    pub const fn normal(&self) -> &MaterialNormal {
        &self.normal
    }

    /// Specular axis
    pub const fn specular(&self) -> &MaterialSpecular {
        &self.specular
    }

    /// Permutation code, e.g. `T_BU_AC_EN_NV_SN`
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Derived resource requirements
    pub const fn requirements(&self) -> MaterialRequirements {
        self.requirements
    }
}

/// Translucent material distorting what lies behind it
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTranslucentRefractive {
    pub(crate) normal: MaterialNormal,
    pub(crate) refractive: MaterialRefractive,
    pub(crate) code: String,
    pub(crate) requirements: MaterialRequirements,
}

impl MaterialTranslucentRefractive {
    /// Normal axis
    pub const fn normal(&self) -> &MaterialNormal {
        &self.normal
    }

    /// Refraction parameters
    pub const fn refractive(&self) -> &MaterialRefractive {
        &self.refractive
    }

    /// Permutation code, e.g. `R_NM_RM`
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Derived resource requirements
    pub const fn requirements(&self) -> MaterialRequirements {
        self.requirements
    }
}

/// Closed set of material families
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Opaque, lit
    OpaqueRegular(MaterialOpaqueRegular),
    /// Translucent, optionally lit
    TranslucentRegular(MaterialTranslucentRegular),
    /// Translucent, refractive
    TranslucentRefractive(MaterialTranslucentRefractive),
}

impl Material {
    /// Permutation code of the underlying material
    pub fn code(&self) -> &str {
        match self {
            Self::OpaqueRegular(m) => m.code(),
            Self::TranslucentRegular(m) => m.code(),
            Self::TranslucentRefractive(m) => m.code(),
        }
    }

    /// Derived resource requirements of the underlying material
    pub const fn requirements(&self) -> MaterialRequirements {
        match self {
            Self::OpaqueRegular(m) => m.requirements,
            Self::TranslucentRegular(m) => m.requirements,
            Self::TranslucentRefractive(m) => m.requirements,
        }
    }

    /// Number of textures sampled
    pub const fn texture_count(&self) -> u32 {
        self.requirements().texture_count
    }

    /// Whether the mesh must supply UV coordinates
    pub const fn requires_uv(&self) -> bool {
        self.requirements().requires_uv
    }

    /// Whether the material is drawn in the translucent pass
    pub const fn is_translucent(&self) -> bool {
        !matches!(self, Self::OpaqueRegular(_))
    }
}

impl From<MaterialOpaqueRegular> for Material {
    fn from(m: MaterialOpaqueRegular) -> Self {
        Self::OpaqueRegular(m)
    }
}

impl From<MaterialTranslucentRegular> for Material {
    fn from(m: MaterialTranslucentRegular) -> Self {
        Self::TranslucentRegular(m)
    }
}

impl From<MaterialTranslucentRefractive> for Material {
    fn from(m: MaterialTranslucentRefractive) -> Self {
        Self::TranslucentRefractive(m)
    }
}
