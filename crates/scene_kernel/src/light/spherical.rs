use super::{attenuation, check_color, check_intensity, check_position, positive_with_inverse};
use crate::error::StructuralResult;
use crate::foundation::ids::LightId;
use crate::foundation::math::Vec3;

/// Spherical (point) light
///
/// `radius_inverse` and `falloff_inverse` are always the reciprocals of
/// `radius` and `falloff`; every path that changes a primary value
/// recomputes its inverse.
#[derive(Debug, Clone, PartialEq)]
pub struct LightSpherical {
    pub(crate) id: LightId,
    pub(crate) color: Vec3,
    pub(crate) intensity: f32,
    pub(crate) position: Vec3,
    pub(crate) radius: f32,
    pub(crate) radius_inverse: f32,
    pub(crate) falloff: f32,
    pub(crate) falloff_inverse: f32,
}

impl LightSpherical {
    /// Unique id
    pub const fn id(&self) -> LightId {
        self.id
    }

    /// Linear RGB color
    pub const fn color(&self) -> &Vec3 {
        &self.color
    }

    /// Intensity multiplier
    pub const fn intensity(&self) -> f32 {
        self.intensity
    }

    /// World-space position
    pub const fn position(&self) -> &Vec3 {
        &self.position
    }

    /// Radius of influence
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// `1 / radius`
    pub const fn radius_inverse(&self) -> f32 {
        self.radius_inverse
    }

    /// Falloff exponent
    pub const fn falloff(&self) -> f32 {
        self.falloff
    }

    /// `1 / falloff`
    pub const fn falloff_inverse(&self) -> f32 {
        self.falloff_inverse
    }

    /// Copy of this light with a different radius
    pub fn with_radius(&self, radius: f32) -> StructuralResult<Self> {
        let (radius, radius_inverse) = positive_with_inverse("radius", radius)?;
        Ok(Self {
            radius,
            radius_inverse,
            ..self.clone()
        })
    }

    /// Copy of this light with a different falloff
    pub fn with_falloff(&self, falloff: f32) -> StructuralResult<Self> {
        let (falloff, falloff_inverse) = positive_with_inverse("falloff", falloff)?;
        Ok(Self {
            falloff,
            falloff_inverse,
            ..self.clone()
        })
    }

    /// Attenuation at a world-space point, in `[0, 1]`
    pub fn attenuation_at(&self, point: &Vec3) -> f32 {
        attenuation((point - self.position).norm(), self.radius_inverse, self.falloff)
    }
}

/// Builder for [`LightSpherical`]
#[derive(Debug, Clone)]
pub struct LightSphericalBuilder {
    id: LightId,
    color: Vec3,
    intensity: f32,
    position: Vec3,
    radius: f32,
    radius_inverse: f32,
    falloff: f32,
    falloff_inverse: f32,
}

impl LightSphericalBuilder {
    /// White light of unit intensity at the origin, radius 1, linear falloff
    pub fn new(id: LightId) -> Self {
        Self {
            id,
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
            position: Vec3::zeros(),
            radius: 1.0,
            radius_inverse: 1.0,
            falloff: 1.0,
            falloff_inverse: 1.0,
        }
    }

    /// Seed a builder from an existing light, keeping its id
    pub fn from_existing(light: &LightSpherical) -> Self {
        Self {
            id: light.id,
            color: light.color,
            intensity: light.intensity,
            position: light.position,
            radius: light.radius,
            radius_inverse: light.radius_inverse,
            falloff: light.falloff,
            falloff_inverse: light.falloff_inverse,
        }
    }

    /// Set the color
    pub fn set_color(&mut self, color: Vec3) -> StructuralResult<&mut Self> {
        self.color = check_color(color)?;
        Ok(self)
    }

    /// Set the intensity
    pub fn set_intensity(&mut self, intensity: f32) -> StructuralResult<&mut Self> {
        self.intensity = check_intensity(intensity)?;
        Ok(self)
    }

    /// Set the world-space position
    pub fn set_position(&mut self, position: Vec3) -> StructuralResult<&mut Self> {
        self.position = check_position(position)?;
        Ok(self)
    }

    /// Set the radius; must be strictly positive
    pub fn set_radius(&mut self, radius: f32) -> StructuralResult<&mut Self> {
        (self.radius, self.radius_inverse) = positive_with_inverse("radius", radius)?;
        Ok(self)
    }

    /// Set the falloff exponent; must be strictly positive
    pub fn set_falloff(&mut self, falloff: f32) -> StructuralResult<&mut Self> {
        (self.falloff, self.falloff_inverse) = positive_with_inverse("falloff", falloff)?;
        Ok(self)
    }

    /// Freeze the current state
    pub fn build(&self) -> LightSpherical {
        LightSpherical {
            id: self.id,
            color: self.color,
            intensity: self.intensity,
            position: self.position,
            radius: self.radius,
            radius_inverse: self.radius_inverse,
            falloff: self.falloff,
            falloff_inverse: self.falloff_inverse,
        }
    }
}
