//! Visitor dispatch over the closed variant families
//!
//! Each family has a visitor trait with one method per variant. `accept`
//! is an exhaustive `match`, so exactly one method runs per call and its
//! result (or error) is returned unchanged. Visitor error types absorb
//! [`RendererError`] so implementations can raise domain errors with `?`.
//!
//! Backends that prefer plain `match` can skip visitors entirely; both
//! forms see the same variants.

use crate::error::RendererError;
use crate::foundation::math::{Mat4, Vec3};
use crate::instance::{
    Instance, InstanceOpaque, InstanceTranslucent, InstanceTranslucentRefractive,
    InstanceTranslucentRegularLit, InstanceTranslucentRegularUnlit,
};
use crate::light::{Light, LightDirectional, LightProjective, LightSpherical};
use crate::material::{
    Material, MaterialOpaqueRegular, MaterialTranslucentRefractive, MaterialTranslucentRegular,
};
use crate::projection::{Projection, ProjectionFrustum, ProjectionPerspective};
use crate::shadow::{Shadow, ShadowMappedBasic, ShadowMappedBasicSoft, ShadowMappedVariance};
use crate::transform::{Transform, TransformOST};

/// Visitor over [`Light`]
pub trait LightVisitor {
    /// Value produced by a successful visit
    type Output;
    /// Error raised by a visit
    type Error: From<RendererError>;

    /// Visit a directional light
    fn directional(&mut self, light: &LightDirectional) -> Result<Self::Output, Self::Error>;
    /// Visit a spherical light
    fn spherical(&mut self, light: &LightSpherical) -> Result<Self::Output, Self::Error>;
    /// Visit a projective light
    fn projective(&mut self, light: &LightProjective) -> Result<Self::Output, Self::Error>;
}

impl Light {
    /// Dispatch to the visitor method matching this variant
    pub fn accept<V: LightVisitor>(&self, visitor: &mut V) -> Result<V::Output, V::Error> {
        match self {
            Self::Directional(l) => visitor.directional(l),
            Self::Spherical(l) => visitor.spherical(l),
            Self::Projective(l) => visitor.projective(l),
        }
    }
}

/// Visitor over [`Shadow`]
pub trait ShadowVisitor {
    /// Value produced by a successful visit
    type Output;
    /// Error raised by a visit
    type Error: From<RendererError>;

    /// Visit a basic shadow
    fn mapped_basic(&mut self, shadow: &ShadowMappedBasic) -> Result<Self::Output, Self::Error>;
    /// Visit a softened basic shadow
    fn mapped_basic_soft(
        &mut self,
        shadow: &ShadowMappedBasicSoft,
    ) -> Result<Self::Output, Self::Error>;
    /// Visit a variance shadow
    fn mapped_variance(
        &mut self,
        shadow: &ShadowMappedVariance,
    ) -> Result<Self::Output, Self::Error>;
}

impl Shadow {
    /// Dispatch to the visitor method matching this variant
    pub fn accept<V: ShadowVisitor>(&self, visitor: &mut V) -> Result<V::Output, V::Error> {
        match self {
            Self::MappedBasic(s) => visitor.mapped_basic(s),
            Self::MappedBasicSoft(s) => visitor.mapped_basic_soft(s),
            Self::MappedVariance(s) => visitor.mapped_variance(s),
        }
    }
}

/// Visitor over [`Material`]
pub trait MaterialVisitor {
    /// Value produced by a successful visit
    type Output;
    /// Error raised by a visit
    type Error: From<RendererError>;

    /// Visit an opaque material
    fn opaque_regular(
        &mut self,
        material: &MaterialOpaqueRegular,
    ) -> Result<Self::Output, Self::Error>;
    /// Visit a regular translucent material
    fn translucent_regular(
        &mut self,
        material: &MaterialTranslucentRegular,
    ) -> Result<Self::Output, Self::Error>;
    /// Visit a refractive material
    fn translucent_refractive(
        &mut self,
        material: &MaterialTranslucentRefractive,
    ) -> Result<Self::Output, Self::Error>;
}

impl Material {
    /// Dispatch to the visitor method matching this variant
    pub fn accept<V: MaterialVisitor>(&self, visitor: &mut V) -> Result<V::Output, V::Error> {
        match self {
            Self::OpaqueRegular(m) => visitor.opaque_regular(m),
            Self::TranslucentRegular(m) => visitor.translucent_regular(m),
            Self::TranslucentRefractive(m) => visitor.translucent_refractive(m),
        }
    }
}

/// Visitor over [`InstanceTranslucent`]
pub trait InstanceTranslucentVisitor {
    /// Value produced by a successful visit
    type Output;
    /// Error raised by a visit
    type Error: From<RendererError>;

    /// Visit a lit regular instance
    fn regular_lit(
        &mut self,
        instance: &InstanceTranslucentRegularLit,
    ) -> Result<Self::Output, Self::Error>;
    /// Visit an unlit regular instance
    fn regular_unlit(
        &mut self,
        instance: &InstanceTranslucentRegularUnlit,
    ) -> Result<Self::Output, Self::Error>;
    /// Visit a refractive instance
    fn refractive(
        &mut self,
        instance: &InstanceTranslucentRefractive,
    ) -> Result<Self::Output, Self::Error>;
}

impl InstanceTranslucent {
    /// Dispatch to the visitor method matching this variant
    pub fn accept<V: InstanceTranslucentVisitor>(
        &self,
        visitor: &mut V,
    ) -> Result<V::Output, V::Error> {
        match self {
            Self::RegularLit(i) => visitor.regular_lit(i),
            Self::RegularUnlit(i) => visitor.regular_unlit(i),
            Self::Refractive(i) => visitor.refractive(i),
        }
    }
}

/// Visitor over [`Instance`]
pub trait InstanceVisitor {
    /// Value produced by a successful visit
    type Output;
    /// Error raised by a visit
    type Error: From<RendererError>;

    /// Visit an opaque instance
    fn opaque(&mut self, instance: &InstanceOpaque) -> Result<Self::Output, Self::Error>;
    /// Visit a translucent instance
    fn translucent(&mut self, instance: &InstanceTranslucent)
        -> Result<Self::Output, Self::Error>;
}

impl Instance {
    /// Dispatch to the visitor method matching this variant
    pub fn accept<V: InstanceVisitor>(&self, visitor: &mut V) -> Result<V::Output, V::Error> {
        match self {
            Self::Opaque(i) => visitor.opaque(i),
            Self::Translucent(i) => visitor.translucent(i),
        }
    }
}

/// Visitor over [`Projection`]
pub trait ProjectionVisitor {
    /// Value produced by a successful visit
    type Output;
    /// Error raised by a visit
    type Error: From<RendererError>;

    /// Visit an off-center frustum
    fn frustum(&mut self, projection: &ProjectionFrustum) -> Result<Self::Output, Self::Error>;
    /// Visit a symmetric perspective
    fn perspective(
        &mut self,
        projection: &ProjectionPerspective,
    ) -> Result<Self::Output, Self::Error>;
}

impl Projection {
    /// Dispatch to the visitor method matching this variant
    pub fn accept<V: ProjectionVisitor>(&self, visitor: &mut V) -> Result<V::Output, V::Error> {
        match self {
            Self::Frustum(p) => visitor.frustum(p),
            Self::Perspective(p) => visitor.perspective(p),
        }
    }
}

/// Visitor over [`Transform`]
pub trait TransformVisitor {
    /// Value produced by a successful visit
    type Output;
    /// Error raised by a visit
    type Error: From<RendererError>;

    /// Visit the identity
    fn identity(&mut self) -> Result<Self::Output, Self::Error>;
    /// Visit a pure translation
    fn translation(&mut self, translation: &Vec3) -> Result<Self::Output, Self::Error>;
    /// Visit an orientation-scale-translation transform
    fn orientation_scale_translation(
        &mut self,
        transform: &TransformOST,
    ) -> Result<Self::Output, Self::Error>;
    /// Visit an explicit matrix
    fn matrix(&mut self, matrix: &Mat4) -> Result<Self::Output, Self::Error>;
}

impl Transform {
    /// Dispatch to the visitor method matching this variant
    pub fn accept<V: TransformVisitor>(&self, visitor: &mut V) -> Result<V::Output, V::Error> {
        match self {
            Self::Identity => visitor.identity(),
            Self::Translation(t) => visitor.translation(t),
            Self::OrientationScaleTranslation(ost) => visitor.orientation_scale_translation(ost),
            Self::Matrix(m) => visitor.matrix(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StructuralError;
    use crate::foundation::ids::LightId;
    use crate::light::{LightDirectionalBuilder, LightProjectiveBuilder, LightSphericalBuilder};
    use crate::shadow::{
        ShadowMappedBasicBuilder, ShadowMappedBasicSoftBuilder, ShadowMappedVarianceBuilder,
    };
    use thiserror::Error;

    #[derive(Error, Debug)]
    enum BackendError {
        #[error("renderer: {0}")]
        Renderer(#[from] RendererError),
        #[error("out of shadow slots")]
        OutOfSlots,
    }

    /// Allocates shadow slots and refuses variance shadows
    struct ShadowSlots {
        remaining: u32,
        visits: Vec<&'static str>,
    }

    impl ShadowSlots {
        fn take(&mut self, tag: &'static str) -> Result<u32, BackendError> {
            self.visits.push(tag);
            if self.remaining == 0 {
                return Err(BackendError::OutOfSlots);
            }
            self.remaining -= 1;
            Ok(self.remaining)
        }
    }

    impl ShadowVisitor for ShadowSlots {
        type Output = u32;
        type Error = BackendError;

        fn mapped_basic(&mut self, _: &ShadowMappedBasic) -> Result<u32, BackendError> {
            self.take("basic")
        }

        fn mapped_basic_soft(&mut self, _: &ShadowMappedBasicSoft) -> Result<u32, BackendError> {
            self.take("soft")
        }

        fn mapped_variance(&mut self, _: &ShadowMappedVariance) -> Result<u32, BackendError> {
            self.visits.push("variance");
            Err(RendererError::Unsupported("variance shadows".into()).into())
        }
    }

    #[test]
    fn test_shadow_dispatch_invokes_exactly_one_method() {
        let mut visitor = ShadowSlots {
            remaining: 2,
            visits: Vec::new(),
        };

        let basic: Shadow = ShadowMappedBasicBuilder::new().build().into();
        let soft: Shadow = ShadowMappedBasicSoftBuilder::new().build().into();

        assert_eq!(basic.accept(&mut visitor).unwrap(), 1);
        assert_eq!(soft.accept(&mut visitor).unwrap(), 0);
        assert_eq!(visitor.visits, ["basic", "soft"]);
    }

    #[test]
    fn test_visitor_errors_propagate_unchanged() {
        let mut visitor = ShadowSlots {
            remaining: 0,
            visits: Vec::new(),
        };

        let basic: Shadow = ShadowMappedBasicBuilder::new().build().into();
        let variance: Shadow = ShadowMappedVarianceBuilder::new().build().into();

        assert!(matches!(basic.accept(&mut visitor), Err(BackendError::OutOfSlots)));
        assert!(matches!(
            variance.accept(&mut visitor),
            Err(BackendError::Renderer(RendererError::Unsupported(_)))
        ));
        assert_eq!(visitor.visits, ["basic", "variance"]);
    }

    /// Collects light codes and rejects lights brighter than a limit
    struct LightCodes {
        max_intensity: f32,
    }

    impl LightCodes {
        fn check(&self, light_intensity: f32) -> Result<(), RendererError> {
            if light_intensity > self.max_intensity {
                return Err(StructuralError::invalid("intensity", "too bright").into());
            }
            Ok(())
        }
    }

    impl LightVisitor for LightCodes {
        type Output = String;
        type Error = RendererError;

        fn directional(&mut self, light: &LightDirectional) -> Result<String, RendererError> {
            self.check(light.intensity())?;
            Ok("directional".into())
        }

        fn spherical(&mut self, light: &LightSpherical) -> Result<String, RendererError> {
            self.check(light.intensity())?;
            Ok(format!("spherical r={}", light.radius()))
        }

        fn projective(&mut self, light: &LightProjective) -> Result<String, RendererError> {
            self.check(light.intensity())?;
            Ok(format!("projective {}", light.code()))
        }
    }

    #[test]
    fn test_light_dispatch_and_domain_errors() {
        let mut visitor = LightCodes { max_intensity: 2.0 };

        let mut bright = LightDirectionalBuilder::new(LightId(1));
        bright.set_intensity(5.0).unwrap();
        let bright: Light = bright.build().into();
        let lamp: Light = LightSphericalBuilder::new(LightId(2)).build().into();
        let spot: Light = LightProjectiveBuilder::new(LightId(3)).build().into();

        assert_eq!(lamp.accept(&mut visitor).unwrap(), "spherical r=1");
        assert_eq!(spot.accept(&mut visitor).unwrap(), "projective LP");
        assert!(matches!(
            bright.accept(&mut visitor),
            Err(RendererError::Structural(StructuralError::InvalidArgument { name: "intensity", .. }))
        ));
    }

    struct TransformKinds;

    impl TransformVisitor for TransformKinds {
        type Output = &'static str;
        type Error = RendererError;

        fn identity(&mut self) -> Result<&'static str, RendererError> {
            Ok("identity")
        }

        fn translation(&mut self, _: &Vec3) -> Result<&'static str, RendererError> {
            Ok("translation")
        }

        fn orientation_scale_translation(
            &mut self,
            _: &TransformOST,
        ) -> Result<&'static str, RendererError> {
            Ok("ost")
        }

        fn matrix(&mut self, _: &Mat4) -> Result<&'static str, RendererError> {
            Err(RendererError::Unsupported("explicit matrices".into()))
        }
    }

    #[test]
    fn test_transform_dispatch_is_total() {
        let transforms = [
            Transform::Identity,
            Transform::Translation(Vec3::x()),
            TransformOST::default().into(),
        ];
        let kinds: Vec<_> = transforms
            .iter()
            .map(|t| t.accept(&mut TransformKinds).unwrap())
            .collect();
        assert_eq!(kinds, ["identity", "translation", "ost"]);
        assert!(Transform::Matrix(Mat4::identity())
            .accept(&mut TransformKinds)
            .is_err());
    }
}
