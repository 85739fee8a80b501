//! # Scene Kernel
//!
//! Declarative scene model for a real-time 3D renderer. The kernel
//! describes *what* is drawn in a frame; a rendering backend decides how.
//!
//! ## Features
//!
//! - **Materials**: composites of independent axes with stable permutation codes
//! - **Lights**: directional, spherical, and projective lights with optional shadows
//! - **Shadows**: basic, soft, and variance shadow map descriptions
//! - **Visible sets**: validated, immutable frame descriptions built from light groups
//! - **Visitors**: double dispatch over every closed variant family
//! - **Configuration**: TOML or RON kernel configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_kernel::prelude::*;
//!
//! fn main() -> Result<(), StructuralError> {
//!     let mut ids = IdPool::new();
//!
//!     let projection = ProjectionPerspective::new(1.0, 16.0 / 9.0, 0.1, 100.0)?;
//!     let camera = Camera::look_at(Vec3::new(0.0, 2.0, -5.0), Vec3::zeros(), Vec3::y(), projection.into())?;
//!
//!     let material = MaterialOpaqueRegularBuilder::new().build()?;
//!     let mesh = Mesh::new(ArrayBufferHandle(1), IndexBufferHandle(2));
//!     let crate_box = InstanceOpaqueBuilder::new(ids.fresh_instance_id(), mesh, material).build();
//!     let sun = LightDirectionalBuilder::new(ids.fresh_light_id()).build();
//!
//!     let mut builder = VisibleSetBuilder::new(camera);
//!     let mut daylight = builder.light_group_new("daylight")?;
//!     daylight.add_light(sun)?.add_instance(crate_box)?;
//!     daylight.group_create()?;
//!
//!     let set = builder.build()?;
//!     assert_eq!(set.instance_count(), 1);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod camera;
pub mod config;
pub mod core;
pub mod error;
pub mod foundation;
pub mod graphics;
pub mod instance;
pub mod light;
pub mod material;
pub mod projection;
pub mod scene;
pub mod shadow;
pub mod transform;
pub mod visit;

/// Common imports for kernel users
pub mod prelude {
    pub use crate::{
        camera::Camera,
        config::{Config, ConfigError},
        core::config::{KernelConfig, LoggingConfig, SceneConfig, ShadowDefaults},
        error::{RendererError, RendererResult, StructuralError, StructuralResult},
        foundation::{
            ids::{IdPool, InstanceId, LightId},
            math::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4},
        },
        graphics::{
            ArrayBufferHandle, IndexBufferHandle, Mesh, Texture2DHandle, TextureCubeHandle,
        },
        instance::{
            Instance, InstanceOpaque, InstanceOpaqueBuilder, InstanceTranslucent,
            InstanceTranslucentRefractiveBuilder, InstanceTranslucentRegularBuilder,
        },
        light::{
            Light, LightDirectionalBuilder, LightProjectiveBuilder, LightSpherePseudoBuilder,
            LightSphericalBuilder, PseudoFaces,
        },
        material::{
            Material, MaterialAlbedo, MaterialAlpha, MaterialDepth, MaterialEmissive,
            MaterialEnvironment, MaterialNormal, MaterialOpaqueRegularBuilder, MaterialRefractive,
            MaterialSpecular, MaterialTranslucentRefractiveBuilder,
            MaterialTranslucentRegularBuilder,
        },
        projection::{Projection, ProjectionFrustum, ProjectionPerspective},
        scene::{LightGroup, LightGroupBuilder, VisibleSet, VisibleSetBuilder},
        shadow::{
            Shadow, ShadowMappedBasicBuilder, ShadowMappedBasicSoftBuilder,
            ShadowMappedVarianceBuilder,
        },
        transform::{Transform, TransformContext, TransformOST},
        visit::{
            InstanceTranslucentVisitor, InstanceVisitor, LightVisitor, MaterialVisitor,
            ProjectionVisitor, ShadowVisitor, TransformVisitor,
        },
    };
}
