use super::{check_color, check_intensity};
use crate::error::{StructuralError, StructuralResult};
use crate::foundation::ids::LightId;
use crate::foundation::math::{utils, Vec3};

/// Directional light (like sunlight)
#[derive(Debug, Clone, PartialEq)]
pub struct LightDirectional {
    pub(crate) id: LightId,
    pub(crate) color: Vec3,
    pub(crate) intensity: f32,
    pub(crate) direction: Vec3,
}

impl LightDirectional {
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

    /// Normalized world-space direction the light travels in
    pub const fn direction(&self) -> &Vec3 {
        &self.direction
    }
}

/// Builder for [`LightDirectional`]
#[derive(Debug, Clone)]
pub struct LightDirectionalBuilder {
    id: LightId,
    color: Vec3,
    intensity: f32,
    direction: Vec3,
}

impl LightDirectionalBuilder {
    /// White light of unit intensity pointing straight down
    pub fn new(id: LightId) -> Self {
        Self {
            id,
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
            direction: Vec3::new(0.0, -1.0, 0.0),
        }
    }

    /// Seed a builder from an existing light, keeping its id
    pub fn from_existing(light: &LightDirectional) -> Self {
        Self {
            id: light.id,
            color: light.color,
            intensity: light.intensity,
            direction: light.direction,
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

    /// Set the direction; it is normalized and must not be zero
    pub fn set_direction(&mut self, direction: Vec3) -> StructuralResult<&mut Self> {
        if !utils::is_finite_vec3(&direction) {
            return Err(StructuralError::invalid("direction", "components must be finite"));
        }
        self.direction = direction
            .try_normalize(f32::EPSILON)
            .ok_or_else(|| StructuralError::invalid("direction", "must not be zero"))?;
        Ok(self)
    }

    /// Freeze the current state
    pub fn build(&self) -> LightDirectional {
        LightDirectional {
            id: self.id,
            color: self.color,
            intensity: self.intensity,
            direction: self.direction,
        }
    }
}
