//! Material builders
//!
//! Axis values are validated when they are constructed; `build` checks the
//! cross-axis rules that depend on the whole combination.
//!
//! # Examples
//! ```
//! use scene_kernel::foundation::math::{Vec3, Vec4};
//! use scene_kernel::graphics::Texture2DHandle;
//! use scene_kernel::material::{
//!     MaterialAlbedo, MaterialNormal, MaterialOpaqueRegularBuilder, MaterialSpecular,
//! };
//!
//! let mut builder = MaterialOpaqueRegularBuilder::new();
//! builder
//!     .set_albedo(MaterialAlbedo::textured(Vec4::new(1.0, 1.0, 1.0, 1.0), 1.0, Texture2DHandle(1))?)
//!     .set_normal(MaterialNormal::mapped(Texture2DHandle(2)))
//!     .set_specular(MaterialSpecular::constant(Vec3::new(1.0, 1.0, 1.0), 32.0)?);
//!
//! let material = builder.build()?;
//! assert_eq!(material.code(), "O_BT_DC_MN_EN_NM_SC");
//! assert_eq!(material.requirements().texture_count, 2);
//! # Ok::<(), scene_kernel::error::StructuralError>(())
//! ```

use super::axes::{
    MaterialAlbedo, MaterialAlpha, MaterialAxis, MaterialDepth, MaterialEmissive,
    MaterialEnvironment, MaterialNormal, MaterialRefractive, MaterialSpecular,
};
use super::material_type::{
    compose_code, MaterialOpaqueRegular, MaterialRequirements, MaterialTranslucentRefractive,
    MaterialTranslucentRegular,
};
use crate::error::{StructuralError, StructuralResult};

fn check_reflection_mask(
    environment: &MaterialEnvironment,
    specular: &MaterialSpecular,
) -> StructuralResult<()> {
    if matches!(environment, MaterialEnvironment::ReflectionMapped(_))
        && !matches!(specular, MaterialSpecular::Mapped(_))
    {
        return Err(StructuralError::MaterialMissingTexture {
            requirement: "mapped environment reflection requires a specular map",
        });
    }
    Ok(())
}

/// Builder for [`MaterialOpaqueRegular`]
#[derive(Debug, Clone)]
pub struct MaterialOpaqueRegularBuilder {
    albedo: MaterialAlbedo,
    depth: MaterialDepth,
    emissive: MaterialEmissive,
    environment: MaterialEnvironment,
    normal: MaterialNormal,
    specular: MaterialSpecular,
}

impl MaterialOpaqueRegularBuilder {
    /// Create a builder for a plain white material
    pub fn new() -> Self {
        Self {
            albedo: MaterialAlbedo::white(),
            depth: *MaterialDepth::constant(),
            emissive: *MaterialEmissive::none(),
            environment: *MaterialEnvironment::none(),
            normal: *MaterialNormal::vertex(),
            specular: *MaterialSpecular::none(),
        }
    }

    /// Seed a builder from an existing material
    pub const fn from_existing(material: &MaterialOpaqueRegular) -> Self {
        Self {
            albedo: material.albedo,
            depth: material.depth,
            emissive: material.emissive,
            environment: material.environment,
            normal: material.normal,
            specular: material.specular,
        }
    }

    /// Set the albedo axis
    pub fn set_albedo(&mut self, albedo: MaterialAlbedo) -> &mut Self {
        self.albedo = albedo;
        self
    }

    /// Set the depth axis
    pub fn set_depth(&mut self, depth: MaterialDepth) -> &mut Self {
        self.depth = depth;
        self
    }

    /// Set the emissive axis
    pub fn set_emissive(&mut self, emissive: MaterialEmissive) -> &mut Self {
        self.emissive = emissive;
        self
    }

    /// Set the environment axis
    pub fn set_environment(&mut self, environment: MaterialEnvironment) -> &mut Self {
        self.environment = environment;
        self
    }

    /// Set the normal axis
    pub fn set_normal(&mut self, normal: MaterialNormal) -> &mut Self {
        self.normal = normal;
        self
    }

    /// Set the specular axis
    pub fn set_specular(&mut self, specular: MaterialSpecular) -> &mut Self {
        self.specular = specular;
        self
    }

    /// Validate the combination and freeze it
    pub fn build(&self) -> StructuralResult<MaterialOpaqueRegular> {
        if matches!(self.depth, MaterialDepth::Alpha(_))
            && !matches!(self.albedo, MaterialAlbedo::Textured(_))
        {
            return Err(StructuralError::MaterialMissingTexture {
                requirement: "alpha-tested depth requires a textured albedo",
            });
        }
        check_reflection_mask(&self.environment, &self.specular)?;

        let axes: [&dyn MaterialAxis; 6] = [
            &self.albedo,
            &self.depth,
            &self.emissive,
            &self.environment,
            &self.normal,
            &self.specular,
        ];

        Ok(MaterialOpaqueRegular {
            albedo: self.albedo,
            depth: self.depth,
            emissive: self.emissive,
            environment: self.environment,
            normal: self.normal,
            specular: self.specular,
            code: compose_code("O", &axes),
            requirements: MaterialRequirements::derive(&axes, &self.normal),
        })
    }
}

impl Default for MaterialOpaqueRegularBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`MaterialTranslucentRegular`]
#[derive(Debug, Clone)]
pub struct MaterialTranslucentRegularBuilder {
    albedo: MaterialAlbedo,
    alpha: MaterialAlpha,
    environment: MaterialEnvironment,
    normal: MaterialNormal,
    specular: MaterialSpecular,
}

impl MaterialTranslucentRegularBuilder {
    /// Create a builder for a white, half-transparent material
    pub fn new() -> StructuralResult<Self> {
        Ok(Self {
            albedo: MaterialAlbedo::white(),
            alpha: MaterialAlpha::constant(0.5)?,
            environment: *MaterialEnvironment::none(),
            normal: *MaterialNormal::vertex(),
            specular: *MaterialSpecular::none(),
        })
    }

    /// Seed a builder from an existing material
    pub const fn from_existing(material: &MaterialTranslucentRegular) -> Self {
        Self {
            albedo: material.albedo,
            alpha: material.alpha,
            environment: material.environment,
            normal: material.normal,
            specular: material.specular,
        }
    }

    /// Set the albedo axis
    pub fn set_albedo(&mut self, albedo: MaterialAlbedo) -> &mut Self {
        self.albedo = albedo;
        self
    }

    /// Set the alpha axis
    pub fn set_alpha(&mut self, alpha: MaterialAlpha) -> &mut Self {
        self.alpha = alpha;
        self
    }

    /// Set the environment axis
    pub fn set_environment(&mut self, environment: MaterialEnvironment) -> &mut Self {
        self.environment = environment;
        self
    }

    /// Set the normal axis
    pub fn set_normal(&mut self, normal: MaterialNormal) -> &mut Self {
        self.normal = normal;
        self
    }

    /// Set the specular axis
    pub fn set_specular(&mut self, specular: MaterialSpecular) -> &mut Self {
        self.specular = specular;
        self
    }

    /// Validate the combination and freeze it
    pub fn build(&self) -> StructuralResult<MaterialTranslucentRegular> {
        check_reflection_mask(&self.environment, &self.specular)?;

        let axes: [&dyn MaterialAxis; 5] = [
            &self.albedo,
            &self.alpha,
            &self.environment,
            &self.normal,
            &self.specular,
        ];

        Ok(MaterialTranslucentRegular {
            albedo: self.albedo,
            alpha: self.alpha,
            environment: self.environment,
            normal: self.normal,
            specular: self.specular,
            code: compose_code("T", &axes),
            requirements: MaterialRequirements::derive(&axes, &self.normal),
        })
    }
}

/// Builder for [`MaterialTranslucentRefractive`]
#[derive(Debug, Clone)]
pub struct MaterialTranslucentRefractiveBuilder {
    normal: MaterialNormal,
    refractive: MaterialRefractive,
}

impl MaterialTranslucentRefractiveBuilder {
    /// Create a builder with the given refraction parameters and vertex normals
    pub fn new(refractive: MaterialRefractive) -> Self {
        Self {
            normal: *MaterialNormal::vertex(),
            refractive,
        }
    }

    /// Seed a builder from an existing material
    pub const fn from_existing(material: &MaterialTranslucentRefractive) -> Self {
        Self {
            normal: material.normal,
            refractive: material.refractive,
        }
    }

    /// Set the normal axis
    pub fn set_normal(&mut self, normal: MaterialNormal) -> &mut Self {
        self.normal = normal;
        self
    }

    /// Set the refraction parameters
    pub fn set_refractive(&mut self, refractive: MaterialRefractive) -> &mut Self {
        self.refractive = refractive;
        self
    }

    /// Freeze the current state
    pub fn build(&self) -> MaterialTranslucentRefractive {
        let axes: [&dyn MaterialAxis; 2] = [&self.normal, &self.refractive];

        MaterialTranslucentRefractive {
            normal: self.normal,
            refractive: self.refractive,
            code: compose_code("R", &axes),
            requirements: MaterialRequirements::derive(&axes, &self.normal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Vec3, Vec4};
    use crate::graphics::{Texture2DHandle, TextureCubeHandle};
    use crate::material::Material;

    fn textured_albedo() -> MaterialAlbedo {
        MaterialAlbedo::textured(Vec4::new(1.0, 1.0, 1.0, 1.0), 1.0, Texture2DHandle(10)).unwrap()
    }

    #[test]
    fn test_default_opaque_material() {
        let material = MaterialOpaqueRegularBuilder::new().build().unwrap();

        assert_eq!(material.code(), "O_BU_DC_MN_EN_NV_SN");
        assert_eq!(
            material.requirements(),
            MaterialRequirements {
                texture_count: 0,
                requires_uv: false,
                requires_tangents: false,
            }
        );
    }

    #[test]
    fn test_requirements_follow_variants() {
        let mut builder = MaterialOpaqueRegularBuilder::new();
        builder
            .set_albedo(textured_albedo())
            .set_normal(MaterialNormal::mapped(Texture2DHandle(11)))
            .set_specular(
                MaterialSpecular::mapped(Vec3::new(1.0, 1.0, 1.0), 8.0, Texture2DHandle(12))
                    .unwrap(),
            )
            .set_environment(
                MaterialEnvironment::reflection_mapped(0.4, TextureCubeHandle(1)).unwrap(),
            )
            .set_emissive(MaterialEmissive::mapped(1.0, Texture2DHandle(13)).unwrap());

        let material = builder.build().unwrap();
        assert_eq!(material.code(), "O_BT_DC_MM_ERM_NM_SM");
        assert_eq!(material.requirements().texture_count, 5);
        assert!(material.requirements().requires_uv);
        assert!(material.requirements().requires_tangents);
    }

    #[test]
    fn test_alpha_depth_requires_textured_albedo() {
        let mut builder = MaterialOpaqueRegularBuilder::new();
        builder.set_depth(MaterialDepth::alpha(0.5).unwrap());

        assert!(matches!(
            builder.build(),
            Err(StructuralError::MaterialMissingTexture { .. })
        ));

        builder.set_albedo(textured_albedo());
        assert_eq!(builder.build().unwrap().code(), "O_BT_DA_MN_EN_NV_SN");
    }

    #[test]
    fn test_mapped_reflection_requires_specular_map() {
        let mut builder = MaterialTranslucentRegularBuilder::new().unwrap();
        builder.set_environment(
            MaterialEnvironment::reflection_mapped(0.5, TextureCubeHandle(1)).unwrap(),
        );

        assert!(matches!(
            builder.build(),
            Err(StructuralError::MaterialMissingTexture { .. })
        ));

        builder.set_specular(
            MaterialSpecular::mapped(Vec3::new(1.0, 1.0, 1.0), 4.0, Texture2DHandle(3)).unwrap(),
        );
        assert_eq!(builder.build().unwrap().code(), "T_BU_AC_ERM_NV_SM");
    }

    #[test]
    fn test_build_snapshots_are_independent() {
        let mut builder = MaterialOpaqueRegularBuilder::new();
        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        assert_eq!(first, second);

        builder.set_emissive(MaterialEmissive::constant(2.0).unwrap());
        let third = builder.build().unwrap();
        assert_eq!(*first.emissive(), MaterialEmissive::None);
        assert_ne!(first, third);
    }

    #[test]
    fn test_from_existing_round_trip() {
        let mut builder = MaterialOpaqueRegularBuilder::new();
        builder.set_albedo(textured_albedo());
        let original = builder.build().unwrap();

        let copy = MaterialOpaqueRegularBuilder::from_existing(&original).build().unwrap();
        assert_eq!(copy, original);
    }

    #[test]
    fn test_refractive_material() {
        let mut builder =
            MaterialTranslucentRefractiveBuilder::new(MaterialRefractive::new(0.1, true).unwrap());
        builder.set_normal(MaterialNormal::mapped(Texture2DHandle(4)));

        let material = Material::from(builder.build());
        assert_eq!(material.code(), "R_NM_RM");
        assert_eq!(material.texture_count(), 1);
        assert!(material.is_translucent());
    }

    #[test]
    fn test_family_codes_do_not_collide() {
        let opaque = Material::from(MaterialOpaqueRegularBuilder::new().build().unwrap());
        let translucent = Material::from(
            MaterialTranslucentRegularBuilder::new().unwrap().build().unwrap(),
        );
        assert_ne!(opaque.code(), translucent.code());
        assert!(!opaque.is_translucent());
    }
}
