//! Material system
//!
//! Materials are composed of independent axes, each a closed set of
//! variants:
//!
//! - **Albedo**: constant color or color mixed with a texture
//! - **Depth**: constant or alpha-tested
//! - **Emissive**: none, constant, or mapped
//! - **Environment**: none, reflection, or specular-masked reflection
//! - **Normal**: vertex normals or normal map
//! - **Specular**: none, constant, or mapped
//! - **Alpha** (translucent only): constant or mapped opacity
//! - **Refraction** (refractive only): magnitude and masking
//!
//! The variant combination determines the material's permutation code and
//! its texture, UV, and tangent requirements.

pub mod axes;
pub mod material_builder;
pub mod material_type;

pub use axes::{
    AlbedoTextured, AlbedoUntextured, AlphaConstant, AlphaMapped, DepthAlpha, EmissiveConstant,
    EmissiveMapped, EnvironmentReflection, MaterialAlbedo, MaterialAlpha, MaterialAxis,
    MaterialDepth, MaterialEmissive, MaterialEnvironment, MaterialNormal, MaterialRefractive,
    MaterialSpecular, NormalMapped, SpecularConstant, SpecularMapped,
};
pub use material_builder::{
    MaterialOpaqueRegularBuilder, MaterialTranslucentRefractiveBuilder,
    MaterialTranslucentRegularBuilder,
};
pub use material_type::{
    Material, MaterialOpaqueRegular, MaterialRequirements, MaterialTranslucentRefractive,
    MaterialTranslucentRegular,
};
