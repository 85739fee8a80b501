//! Lighting
//!
//! Lights form a closed set: directional, spherical, and projective (which
//! may carry a shadow). A pseudo-spherical light is not a light itself but
//! an aggregate of up to six projective lights that together emulate a
//! shadow-casting spherical light.

mod directional;
mod projective;
mod pseudo;
mod spherical;

pub use directional::{LightDirectional, LightDirectionalBuilder};
pub use projective::{LightProjective, LightProjectiveBuilder};
pub use pseudo::{LightSpherePseudo, LightSpherePseudoBuilder, PseudoFaces};
pub use spherical::{LightSpherical, LightSphericalBuilder};

use crate::error::{StructuralError, StructuralResult};
use crate::foundation::ids::LightId;
use crate::foundation::math::{utils, Vec3};
use crate::shadow::Shadow;

/// Closed set of light variants
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// Parallel rays from an infinitely distant source
    Directional(LightDirectional),
    /// Omnidirectional light with a radius of influence
    Spherical(LightSpherical),
    /// Light projected through a frustum, optionally shadowed
    Projective(LightProjective),
}

impl Light {
    /// Unique id
    pub const fn id(&self) -> LightId {
        match self {
            Self::Directional(l) => l.id,
            Self::Spherical(l) => l.id,
            Self::Projective(l) => l.id,
        }
    }

    /// Stable code used for shader permutation keys
    pub fn code(&self) -> &str {
        match self {
            Self::Directional(_) => "LD",
            Self::Spherical(_) => "LS",
            Self::Projective(l) => l.code(),
        }
    }

    /// Linear RGB color
    pub const fn color(&self) -> &Vec3 {
        match self {
            Self::Directional(l) => &l.color,
            Self::Spherical(l) => &l.color,
            Self::Projective(l) => &l.color,
        }
    }

    /// Intensity multiplier
    pub const fn intensity(&self) -> f32 {
        match self {
            Self::Directional(l) => l.intensity,
            Self::Spherical(l) => l.intensity,
            Self::Projective(l) => l.intensity,
        }
    }

    /// Shadow, if this light casts one
    pub const fn shadow(&self) -> Option<&Shadow> {
        match self {
            Self::Projective(l) => l.shadow.as_ref(),
            Self::Directional(_) | Self::Spherical(_) => None,
        }
    }
}

impl From<LightDirectional> for Light {
    fn from(l: LightDirectional) -> Self {
        Self::Directional(l)
    }
}

impl From<LightSpherical> for Light {
    fn from(l: LightSpherical) -> Self {
        Self::Spherical(l)
    }
}

impl From<LightProjective> for Light {
    fn from(l: LightProjective) -> Self {
        Self::Projective(l)
    }
}

pub(crate) fn check_color(color: Vec3) -> StructuralResult<Vec3> {
    if utils::is_finite_vec3(&color) && color.iter().all(|c| *c >= 0.0) {
        Ok(color)
    } else {
        Err(StructuralError::invalid(
            "color",
            "components must be finite and non-negative",
        ))
    }
}

pub(crate) fn check_intensity(intensity: f32) -> StructuralResult<f32> {
    if intensity.is_finite() && intensity >= 0.0 {
        Ok(intensity)
    } else {
        Err(StructuralError::invalid(
            "intensity",
            format!("{intensity} must be finite and non-negative"),
        ))
    }
}

pub(crate) fn check_position(position: Vec3) -> StructuralResult<Vec3> {
    if utils::is_finite_vec3(&position) {
        Ok(position)
    } else {
        Err(StructuralError::invalid("position", "components must be finite"))
    }
}

/// Returns `(value, 1 / value)` for a strictly positive finite value
pub(crate) fn positive_with_inverse(name: &'static str, value: f32) -> StructuralResult<(f32, f32)> {
    if utils::is_positive(value) && (1.0 / value).is_finite() {
        Ok((value, 1.0 / value))
    } else {
        Err(StructuralError::invalid(
            name,
            format!("{value} must be finite and positive"),
        ))
    }
}

/// Distance attenuation shared by spherical and projective lights
///
/// `1 - (d / range)^falloff`, clamped to `[0, 1]`.
pub(crate) fn attenuation(distance: f32, range_inverse: f32, falloff: f32) -> f32 {
    let normalized = (distance * range_inverse).clamp(0.0, 1.0);
    (1.0 - normalized.powf(falloff)).clamp(0.0, 1.0)
}
