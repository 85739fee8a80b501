//! Independent material axes
//!
//! Each axis is a closed enum. Parameterless variants are shared `'static`
//! values; parameterized variants hold validated payloads that can only be
//! created through their checked constructors.

use crate::error::{StructuralError, StructuralResult};
use crate::foundation::math::{utils, Vec3, Vec4};
use crate::graphics::{Texture2DHandle, TextureCubeHandle};

/// Common surface of every material axis
pub trait MaterialAxis {
    /// Stable code used to build material permutation keys
    fn code(&self) -> &'static str;

    /// Number of textures this variant samples (2D and cube)
    fn texture_count(&self) -> u32;

    /// Whether the variant samples a 2D texture and therefore needs UVs
    fn requires_uv(&self) -> bool;
}

fn check_unit(name: &'static str, value: f32) -> StructuralResult<f32> {
    if utils::is_unit_interval(value) {
        Ok(value)
    } else {
        Err(StructuralError::invalid(name, format!("{value} outside [0, 1]")))
    }
}

fn check_color(name: &'static str, color: &Vec3) -> StructuralResult<()> {
    if utils::is_finite_vec3(color) && color.iter().all(|c| *c >= 0.0) {
        Ok(())
    } else {
        Err(StructuralError::invalid(name, "components must be finite and non-negative"))
    }
}

// Albedo

fn check_albedo_color(color: &Vec4) -> StructuralResult<()> {
    if color.iter().all(|c| utils::is_unit_interval(*c)) {
        Ok(())
    } else {
        Err(StructuralError::invalid("albedo_color", "components outside [0, 1]"))
    }
}

/// Constant albedo color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlbedoUntextured {
    color: Vec4,
}

impl AlbedoUntextured {
    /// RGBA albedo color
    pub const fn color(&self) -> &Vec4 {
        &self.color
    }
}

/// Albedo color mixed with a texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlbedoTextured {
    color: Vec4,
    mix: f32,
    texture: Texture2DHandle,
}

impl AlbedoTextured {
    /// RGBA albedo color
    pub const fn color(&self) -> &Vec4 {
        &self.color
    }

    /// Blend factor between color (0) and texture (1)
    pub const fn mix(&self) -> f32 {
        self.mix
    }

    /// Albedo texture
    pub const fn texture(&self) -> Texture2DHandle {
        self.texture
    }
}

/// Albedo axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialAlbedo {
    /// Constant color
    Untextured(AlbedoUntextured),
    /// Color mixed with a texture
    Textured(AlbedoTextured),
}

impl MaterialAlbedo {
    /// Constant RGBA albedo; components must lie in `[0, 1]`
    pub fn untextured(color: Vec4) -> StructuralResult<Self> {
        check_albedo_color(&color)?;
        Ok(Self::Untextured(AlbedoUntextured { color }))
    }

    /// Textured albedo; `mix` lies in `[0, 1]`
    pub fn textured(color: Vec4, mix: f32, texture: Texture2DHandle) -> StructuralResult<Self> {
        check_albedo_color(&color)?;
        Ok(Self::Textured(AlbedoTextured {
            color,
            mix: check_unit("albedo_mix", mix)?,
            texture,
        }))
    }

    /// Opaque white
    pub fn white() -> Self {
        Self::Untextured(AlbedoUntextured {
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
        })
    }

    /// RGBA albedo color regardless of variant
    pub const fn color(&self) -> &Vec4 {
        match self {
            Self::Untextured(a) => &a.color,
            Self::Textured(a) => &a.color,
        }
    }
}

impl MaterialAxis for MaterialAlbedo {
    fn code(&self) -> &'static str {
        match self {
            Self::Untextured(_) => "BU",
            Self::Textured(_) => "BT",
        }
    }

    fn texture_count(&self) -> u32 {
        u32::from(matches!(self, Self::Textured(_)))
    }

    fn requires_uv(&self) -> bool {
        matches!(self, Self::Textured(_))
    }
}

// Depth

/// Alpha-tested depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthAlpha {
    threshold: f32,
}

impl DepthAlpha {
    /// Fragments with albedo alpha below this value are discarded
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }
}

/// Depth axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialDepth {
    /// Depth written for every fragment
    Constant,
    /// Depth written only where albedo alpha passes a threshold
    Alpha(DepthAlpha),
}

static DEPTH_CONSTANT: MaterialDepth = MaterialDepth::Constant;

impl MaterialDepth {
    /// Shared constant-depth variant
    pub fn constant() -> &'static Self {
        &DEPTH_CONSTANT
    }

    /// Alpha-tested depth with a threshold in `[0, 1]`
    pub fn alpha(threshold: f32) -> StructuralResult<Self> {
        Ok(Self::Alpha(DepthAlpha {
            threshold: check_unit("depth_threshold", threshold)?,
        }))
    }
}

impl MaterialAxis for MaterialDepth {
    fn code(&self) -> &'static str {
        match self {
            Self::Constant => "DC",
            Self::Alpha(_) => "DA",
        }
    }

    fn texture_count(&self) -> u32 {
        0
    }

    fn requires_uv(&self) -> bool {
        false
    }
}

// Emissive

/// Constant emission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissiveConstant {
    emission: f32,
}

impl EmissiveConstant {
    /// Emission amount
    pub const fn emission(&self) -> f32 {
        self.emission
    }
}

/// Emission modulated by a texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissiveMapped {
    emission: f32,
    texture: Texture2DHandle,
}

impl EmissiveMapped {
    /// Emission amount
    pub const fn emission(&self) -> f32 {
        self.emission
    }

    /// Emission mask texture
    pub const fn texture(&self) -> Texture2DHandle {
        self.texture
    }
}

/// Emissive axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialEmissive {
    /// No emission
    None,
    /// Constant emission
    Constant(EmissiveConstant),
    /// Texture-modulated emission
    Mapped(EmissiveMapped),
}

static EMISSIVE_NONE: MaterialEmissive = MaterialEmissive::None;

fn check_emission(emission: f32) -> StructuralResult<f32> {
    if emission.is_finite() && emission >= 0.0 {
        Ok(emission)
    } else {
        Err(StructuralError::invalid("emission", format!("{emission} must be non-negative")))
    }
}

impl MaterialEmissive {
    /// Shared no-emission variant
    pub fn none() -> &'static Self {
        &EMISSIVE_NONE
    }

    /// Constant non-negative emission
    pub fn constant(emission: f32) -> StructuralResult<Self> {
        Ok(Self::Constant(EmissiveConstant {
            emission: check_emission(emission)?,
        }))
    }

    /// Texture-modulated non-negative emission
    pub fn mapped(emission: f32, texture: Texture2DHandle) -> StructuralResult<Self> {
        Ok(Self::Mapped(EmissiveMapped {
            emission: check_emission(emission)?,
            texture,
        }))
    }
}

impl MaterialAxis for MaterialEmissive {
    fn code(&self) -> &'static str {
        match self {
            Self::None => "MN",
            Self::Constant(_) => "MC",
            Self::Mapped(_) => "MM",
        }
    }

    fn texture_count(&self) -> u32 {
        u32::from(matches!(self, Self::Mapped(_)))
    }

    fn requires_uv(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}

// Environment

/// Cube-map reflection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentReflection {
    mix: f32,
    texture: TextureCubeHandle,
}

impl EnvironmentReflection {
    /// Blend factor between surface color (0) and reflection (1)
    pub const fn mix(&self) -> f32 {
        self.mix
    }

    /// Environment cube map
    pub const fn texture(&self) -> TextureCubeHandle {
        self.texture
    }
}

/// Environment mapping axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialEnvironment {
    /// No environment mapping
    None,
    /// Uniform cube-map reflection
    Reflection(EnvironmentReflection),
    /// Reflection masked by the specular map
    ReflectionMapped(EnvironmentReflection),
}

static ENVIRONMENT_NONE: MaterialEnvironment = MaterialEnvironment::None;

impl MaterialEnvironment {
    /// Shared no-environment variant
    pub fn none() -> &'static Self {
        &ENVIRONMENT_NONE
    }

    /// Uniform reflection with `mix` in `[0, 1]`
    pub fn reflection(mix: f32, texture: TextureCubeHandle) -> StructuralResult<Self> {
        Ok(Self::Reflection(EnvironmentReflection {
            mix: check_unit("environment_mix", mix)?,
            texture,
        }))
    }

    /// Specular-masked reflection with `mix` in `[0, 1]`
    pub fn reflection_mapped(mix: f32, texture: TextureCubeHandle) -> StructuralResult<Self> {
        Ok(Self::ReflectionMapped(EnvironmentReflection {
            mix: check_unit("environment_mix", mix)?,
            texture,
        }))
    }
}

impl MaterialAxis for MaterialEnvironment {
    fn code(&self) -> &'static str {
        match self {
            Self::None => "EN",
            Self::Reflection(_) => "ER",
            Self::ReflectionMapped(_) => "ERM",
        }
    }

    fn texture_count(&self) -> u32 {
        u32::from(!matches!(self, Self::None))
    }

    fn requires_uv(&self) -> bool {
        false
    }
}

// Normal

/// Tangent-space normal map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalMapped {
    texture: Texture2DHandle,
}

impl NormalMapped {
    /// Normal map texture
    pub const fn texture(&self) -> Texture2DHandle {
        self.texture
    }
}

/// Normal axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialNormal {
    /// Interpolated vertex normals
    Vertex,
    /// Tangent-space normal map
    Mapped(NormalMapped),
}

static NORMAL_VERTEX: MaterialNormal = MaterialNormal::Vertex;

impl MaterialNormal {
    /// Shared vertex-normal variant
    pub fn vertex() -> &'static Self {
        &NORMAL_VERTEX
    }

    /// Normal-mapped variant
    pub const fn mapped(texture: Texture2DHandle) -> Self {
        Self::Mapped(NormalMapped { texture })
    }

    /// Whether the mesh must supply tangents
    pub const fn requires_tangents(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}

impl MaterialAxis for MaterialNormal {
    fn code(&self) -> &'static str {
        match self {
            Self::Vertex => "NV",
            Self::Mapped(_) => "NM",
        }
    }

    fn texture_count(&self) -> u32 {
        u32::from(self.requires_tangents())
    }

    fn requires_uv(&self) -> bool {
        self.requires_tangents()
    }
}

// Specular

/// Constant specular term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecularConstant {
    color: Vec3,
    exponent: f32,
}

impl SpecularConstant {
    /// Specular color
    pub const fn color(&self) -> &Vec3 {
        &self.color
    }

    /// Specular exponent
    pub const fn exponent(&self) -> f32 {
        self.exponent
    }
}

/// Specular term modulated by a texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecularMapped {
    color: Vec3,
    exponent: f32,
    texture: Texture2DHandle,
}

impl SpecularMapped {
    /// Specular color
    pub const fn color(&self) -> &Vec3 {
        &self.color
    }

    /// Specular exponent
    pub const fn exponent(&self) -> f32 {
        self.exponent
    }

    /// Specular map
    pub const fn texture(&self) -> Texture2DHandle {
        self.texture
    }
}

/// Specular axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialSpecular {
    /// No specular highlights
    None,
    /// Constant specular term
    Constant(SpecularConstant),
    /// Texture-modulated specular term
    Mapped(SpecularMapped),
}

static SPECULAR_NONE: MaterialSpecular = MaterialSpecular::None;

fn check_specular(color: &Vec3, exponent: f32) -> StructuralResult<()> {
    check_color("specular_color", color)?;
    if !utils::is_positive(exponent) {
        return Err(StructuralError::invalid(
            "specular_exponent",
            format!("{exponent} must be positive"),
        ));
    }
    Ok(())
}

impl MaterialSpecular {
    /// Shared no-specular variant
    pub fn none() -> &'static Self {
        &SPECULAR_NONE
    }

    /// Constant specular term
    pub fn constant(color: Vec3, exponent: f32) -> StructuralResult<Self> {
        check_specular(&color, exponent)?;
        Ok(Self::Constant(SpecularConstant { color, exponent }))
    }

    /// Texture-modulated specular term
    pub fn mapped(color: Vec3, exponent: f32, texture: Texture2DHandle) -> StructuralResult<Self> {
        check_specular(&color, exponent)?;
        Ok(Self::Mapped(SpecularMapped {
            color,
            exponent,
            texture,
        }))
    }
}

impl MaterialAxis for MaterialSpecular {
    fn code(&self) -> &'static str {
        match self {
            Self::None => "SN",
            Self::Constant(_) => "SC",
            Self::Mapped(_) => "SM",
        }
    }

    fn texture_count(&self) -> u32 {
        u32::from(matches!(self, Self::Mapped(_)))
    }

    fn requires_uv(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}

// Alpha

/// Constant opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaConstant {
    opacity: f32,
}

impl AlphaConstant {
    /// Opacity in `[0, 1]`
    pub const fn opacity(&self) -> f32 {
        self.opacity
    }
}

/// Opacity modulated by a texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaMapped {
    opacity: f32,
    texture: Texture2DHandle,
}

impl AlphaMapped {
    /// Opacity in `[0, 1]`
    pub const fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Opacity map
    pub const fn texture(&self) -> Texture2DHandle {
        self.texture
    }
}

/// Alpha axis of translucent materials
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialAlpha {
    /// Constant opacity
    Constant(AlphaConstant),
    /// Texture-modulated opacity
    Mapped(AlphaMapped),
}

impl MaterialAlpha {
    /// Constant opacity in `[0, 1]`
    pub fn constant(opacity: f32) -> StructuralResult<Self> {
        Ok(Self::Constant(AlphaConstant {
            opacity: check_unit("opacity", opacity)?,
        }))
    }

    /// Texture-modulated opacity in `[0, 1]`
    pub fn mapped(opacity: f32, texture: Texture2DHandle) -> StructuralResult<Self> {
        Ok(Self::Mapped(AlphaMapped {
            opacity: check_unit("opacity", opacity)?,
            texture,
        }))
    }

    /// Opacity regardless of variant
    pub const fn opacity(&self) -> f32 {
        match self {
            Self::Constant(a) => a.opacity,
            Self::Mapped(a) => a.opacity,
        }
    }
}

impl MaterialAxis for MaterialAlpha {
    fn code(&self) -> &'static str {
        match self {
            Self::Constant(_) => "AC",
            Self::Mapped(_) => "AM",
        }
    }

    fn texture_count(&self) -> u32 {
        u32::from(matches!(self, Self::Mapped(_)))
    }

    fn requires_uv(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}

// Refraction

/// Refraction parameters
///
/// Masked refraction only distorts pixels covered by the instance in the
/// scene's refraction mask; unmasked refraction distorts whatever lies behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialRefractive {
    magnitude: f32,
    masked: bool,
}

impl MaterialRefractive {
    /// Create refraction parameters; `magnitude` must be finite
    pub fn new(magnitude: f32, masked: bool) -> StructuralResult<Self> {
        if !magnitude.is_finite() {
            return Err(StructuralError::invalid("refraction_magnitude", "must be finite"));
        }
        Ok(Self { magnitude, masked })
    }

    /// Distortion magnitude
    pub const fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// Whether refraction is limited to the mask
    pub const fn masked(&self) -> bool {
        self.masked
    }
}

impl MaterialAxis for MaterialRefractive {
    fn code(&self) -> &'static str {
        if self.masked {
            "RM"
        } else {
            "RU"
        }
    }

    fn texture_count(&self) -> u32 {
        0
    }

    fn requires_uv(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons_are_shared() {
        assert!(std::ptr::eq(MaterialSpecular::none(), MaterialSpecular::none()));
        assert!(std::ptr::eq(MaterialEnvironment::none(), MaterialEnvironment::none()));
        assert!(std::ptr::eq(MaterialEmissive::none(), MaterialEmissive::none()));
        assert!(std::ptr::eq(MaterialNormal::vertex(), MaterialNormal::vertex()));
        assert!(std::ptr::eq(MaterialDepth::constant(), MaterialDepth::constant()));
        assert_eq!(*MaterialSpecular::none(), MaterialSpecular::None);
    }

    #[test]
    fn test_codes_distinct_within_axis() {
        let t = Texture2DHandle(1);
        let specular = [
            MaterialSpecular::None,
            MaterialSpecular::constant(Vec3::new(1.0, 1.0, 1.0), 16.0).unwrap(),
            MaterialSpecular::mapped(Vec3::new(1.0, 1.0, 1.0), 16.0, t).unwrap(),
        ];
        let codes: Vec<_> = specular.iter().map(MaterialAxis::code).collect();
        assert_eq!(codes, ["SN", "SC", "SM"]);

        let environment = [
            MaterialEnvironment::None,
            MaterialEnvironment::reflection(0.5, TextureCubeHandle(2)).unwrap(),
            MaterialEnvironment::reflection_mapped(0.5, TextureCubeHandle(2)).unwrap(),
        ];
        let codes: Vec<_> = environment.iter().map(MaterialAxis::code).collect();
        assert_eq!(codes, ["EN", "ER", "ERM"]);
    }

    #[test]
    fn test_texture_requirements() {
        let t = Texture2DHandle(1);

        let albedo = MaterialAlbedo::textured(Vec4::new(1.0, 1.0, 1.0, 1.0), 1.0, t).unwrap();
        assert_eq!(albedo.texture_count(), 1);
        assert!(albedo.requires_uv());
        assert_eq!(MaterialAlbedo::white().texture_count(), 0);

        let environment = MaterialEnvironment::reflection(0.3, TextureCubeHandle(5)).unwrap();
        assert_eq!(environment.texture_count(), 1);
        assert!(!environment.requires_uv());

        let normal = MaterialNormal::mapped(t);
        assert!(normal.requires_tangents());
        assert!(normal.requires_uv());
        assert!(!MaterialNormal::vertex().requires_tangents());
    }

    #[test]
    fn test_parameter_validation() {
        let t = Texture2DHandle(1);
        assert!(MaterialAlbedo::untextured(Vec4::new(1.5, 0.0, 0.0, 1.0)).is_err());
        assert!(MaterialAlbedo::textured(Vec4::new(1.0, 1.0, 1.0, 1.0), 1.5, t).is_err());
        assert!(MaterialDepth::alpha(-0.1).is_err());
        assert!(MaterialEmissive::constant(-1.0).is_err());
        assert!(MaterialSpecular::constant(Vec3::new(1.0, 1.0, 1.0), 0.0).is_err());
        assert!(MaterialSpecular::constant(Vec3::new(-1.0, 1.0, 1.0), 8.0).is_err());
        assert!(MaterialAlpha::constant(2.0).is_err());
        assert!(MaterialRefractive::new(f32::NAN, true).is_err());
    }

    #[test]
    fn test_refractive_codes() {
        assert_eq!(MaterialRefractive::new(0.5, true).unwrap().code(), "RM");
        assert_eq!(MaterialRefractive::new(0.5, false).unwrap().code(), "RU");
    }
}
