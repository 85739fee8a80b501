use super::{attenuation, check_color, check_intensity, check_position, positive_with_inverse};
use crate::error::StructuralResult;
use crate::foundation::ids::LightId;
use crate::foundation::math::{constants, Mat4, Quat, Vec3};
use crate::graphics::Texture2DHandle;
use crate::projection::{Projection, ProjectionPerspective};
use crate::shadow::Shadow;
use nalgebra::{Isometry3, Translation3};

/// Light projected through a frustum from a point, like a spotlight
///
/// The light looks down its local `+Z` axis. An optional 2D texture is
/// projected onto lit surfaces and an optional shadow is rendered from the
/// light's point of view.
#[derive(Debug, Clone, PartialEq)]
pub struct LightProjective {
    pub(crate) id: LightId,
    pub(crate) color: Vec3,
    pub(crate) intensity: f32,
    pub(crate) position: Vec3,
    pub(crate) orientation: Quat,
    pub(crate) range: f32,
    pub(crate) range_inverse: f32,
    pub(crate) falloff: f32,
    pub(crate) falloff_inverse: f32,
    pub(crate) projection: Projection,
    pub(crate) texture: Option<Texture2DHandle>,
    pub(crate) shadow: Option<Shadow>,
    pub(crate) code: String,
}

impl LightProjective {
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

    /// World-space orientation
    pub const fn orientation(&self) -> &Quat {
        &self.orientation
    }

    /// Maximum distance reached by the light
    pub const fn range(&self) -> f32 {
        self.range
    }

    /// `1 / range`
    pub const fn range_inverse(&self) -> f32 {
        self.range_inverse
    }

    /// Falloff exponent
    pub const fn falloff(&self) -> f32 {
        self.falloff
    }

    /// `1 / falloff`
    pub const fn falloff_inverse(&self) -> f32 {
        self.falloff_inverse
    }

    /// Projection defining the lit volume
    pub const fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Projected texture, if any
    pub const fn texture(&self) -> Option<Texture2DHandle> {
        self.texture
    }

    /// Shadow, if this light casts one
    pub const fn shadow(&self) -> Option<&Shadow> {
        self.shadow.as_ref()
    }

    /// Permutation code, e.g. `LP`, `LPT_SV`
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Unit vector the light points along in world space
    pub fn direction(&self) -> Vec3 {
        self.orientation * Vec3::z()
    }

    /// World-to-light matrix
    pub fn view_matrix(&self) -> Mat4 {
        Isometry3::from_parts(Translation3::from(self.position), self.orientation)
            .inverse()
            .to_homogeneous()
    }

    /// Combined projection * view matrix used when rendering the shadow map
    pub fn view_projection(&self) -> Mat4 {
        self.projection.matrix() * self.view_matrix()
    }

    /// Distance attenuation at a world-space point, in `[0, 1]`
    pub fn attenuation_at(&self, point: &Vec3) -> f32 {
        attenuation((point - self.position).norm(), self.range_inverse, self.falloff)
    }
}

fn projective_code(texture: Option<Texture2DHandle>, shadow: Option<&Shadow>) -> String {
    let mut code = String::from(if texture.is_some() { "LPT" } else { "LP" });
    if let Some(shadow) = shadow {
        code.push('_');
        code.push_str(shadow.code());
    }
    code
}

fn default_projection() -> Projection {
    Projection::Perspective(ProjectionPerspective::new_unchecked(
        constants::HALF_PI,
        1.0,
        0.01,
        8.0,
    ))
}

/// Builder for [`LightProjective`]
#[derive(Debug, Clone)]
pub struct LightProjectiveBuilder {
    id: LightId,
    color: Vec3,
    intensity: f32,
    position: Vec3,
    orientation: Quat,
    range: f32,
    range_inverse: f32,
    falloff: f32,
    falloff_inverse: f32,
    projection: Projection,
    texture: Option<Texture2DHandle>,
    shadow: Option<Shadow>,
}

impl LightProjectiveBuilder {
    /// White unshadowed light at the origin looking down `+Z`, range 8
    pub fn new(id: LightId) -> Self {
        Self {
            id,
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
            position: Vec3::zeros(),
            orientation: Quat::identity(),
            range: 8.0,
            range_inverse: 0.125,
            falloff: 1.0,
            falloff_inverse: 1.0,
            projection: default_projection(),
            texture: None,
            shadow: None,
        }
    }

    /// Seed a builder from an existing light, keeping its id
    pub fn from_existing(light: &LightProjective) -> Self {
        Self {
            id: light.id,
            color: light.color,
            intensity: light.intensity,
            position: light.position,
            orientation: light.orientation,
            range: light.range,
            range_inverse: light.range_inverse,
            falloff: light.falloff,
            falloff_inverse: light.falloff_inverse,
            projection: light.projection,
            texture: light.texture,
            shadow: light.shadow.clone(),
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

    /// Set the world-space orientation
    pub fn set_orientation(&mut self, orientation: Quat) -> &mut Self {
        self.orientation = orientation;
        self
    }

    /// Set the range; must be strictly positive
    pub fn set_range(&mut self, range: f32) -> StructuralResult<&mut Self> {
        (self.range, self.range_inverse) = positive_with_inverse("range", range)?;
        Ok(self)
    }

    /// Set the falloff exponent; must be strictly positive
    pub fn set_falloff(&mut self, falloff: f32) -> StructuralResult<&mut Self> {
        (self.falloff, self.falloff_inverse) = positive_with_inverse("falloff", falloff)?;
        Ok(self)
    }

    /// Set the projection
    pub fn set_projection(&mut self, projection: Projection) -> &mut Self {
        self.projection = projection;
        self
    }

    /// Set or clear the projected texture
    pub fn set_texture(&mut self, texture: Option<Texture2DHandle>) -> &mut Self {
        self.texture = texture;
        self
    }

    /// Set or clear the shadow
    pub fn set_shadow(&mut self, shadow: Option<Shadow>) -> &mut Self {
        self.shadow = shadow;
        self
    }

    /// Freeze the current state
    pub fn build(&self) -> LightProjective {
        LightProjective {
            id: self.id,
            color: self.color,
            intensity: self.intensity,
            position: self.position,
            orientation: self.orientation,
            range: self.range,
            range_inverse: self.range_inverse,
            falloff: self.falloff,
            falloff_inverse: self.falloff_inverse,
            projection: self.projection,
            texture: self.texture,
            shadow: self.shadow.clone(),
            code: projective_code(self.texture, self.shadow.as_ref()),
        }
    }
}
