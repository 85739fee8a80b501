use super::{check_color, check_intensity, check_position, positive_with_inverse};
use super::{LightProjective, LightProjectiveBuilder};
use crate::error::{StructuralError, StructuralResult};
use crate::foundation::ids::IdPool;
use crate::foundation::math::{constants, Quat, Vec3};
use crate::projection::ProjectionPerspective;
use crate::shadow::Shadow;
use bitflags::bitflags;

bitflags! {
    /// Cube faces a pseudo-spherical light emits through
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PseudoFaces: u8 {
        /// Face looking down `+X`
        const POSITIVE_X = 1 << 0;
        /// Face looking down `-X`
        const NEGATIVE_X = 1 << 1;
        /// Face looking down `+Y`
        const POSITIVE_Y = 1 << 2;
        /// Face looking down `-Y`
        const NEGATIVE_Y = 1 << 3;
        /// Face looking down `+Z`
        const POSITIVE_Z = 1 << 4;
        /// Face looking down `-Z`
        const NEGATIVE_Z = 1 << 5;
    }
}

/// Face, view direction and up vector, in `PseudoFaces` bit order
const FACE_TABLE: [(PseudoFaces, [f32; 3], [f32; 3]); 6] = [
    (PseudoFaces::POSITIVE_X, [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    (PseudoFaces::NEGATIVE_X, [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    (PseudoFaces::POSITIVE_Y, [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
    (PseudoFaces::NEGATIVE_Y, [0.0, -1.0, 0.0], [0.0, 0.0, 1.0]),
    (PseudoFaces::POSITIVE_Z, [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    (PseudoFaces::NEGATIVE_Z, [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
];

impl PseudoFaces {
    /// View direction and up vector of every enabled face
    fn orientations(self) -> impl Iterator<Item = (Vec3, Vec3)> {
        FACE_TABLE
            .into_iter()
            .filter(move |(face, _, _)| self.contains(*face))
            .map(|(_, direction, up)| (Vec3::from(direction), Vec3::from(up)))
    }
}

/// Aggregate of up to six projective lights emulating a spherical light
///
/// Each enabled face gets a 90 degree square projective light with its own
/// id, so the group behaves like a point light that can cast shadows in
/// every direction.
#[derive(Debug, Clone, PartialEq)]
pub struct LightSpherePseudo {
    position: Vec3,
    radius: f32,
    faces: PseudoFaces,
    lights: Vec<LightProjective>,
}

impl LightSpherePseudo {
    /// World-space center
    pub const fn position(&self) -> &Vec3 {
        &self.position
    }

    /// Radius of influence, shared as the range of every face
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Enabled faces
    pub const fn faces(&self) -> PseudoFaces {
        self.faces
    }

    /// One projective light per enabled face, in `PseudoFaces` bit order
    pub fn lights(&self) -> &[LightProjective] {
        &self.lights
    }
}

/// Builder for [`LightSpherePseudo`]
#[derive(Debug, Clone)]
pub struct LightSpherePseudoBuilder {
    color: Vec3,
    intensity: f32,
    position: Vec3,
    radius: f32,
    falloff: f32,
    faces: PseudoFaces,
    shadow: Option<Shadow>,
}

impl LightSpherePseudoBuilder {
    /// White unshadowed light at the origin emitting through all six faces
    pub fn new() -> Self {
        Self {
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
            position: Vec3::zeros(),
            radius: 1.0,
            falloff: 1.0,
            faces: PseudoFaces::all(),
            shadow: None,
        }
    }

    /// Seed a builder from an existing aggregate
    pub fn from_existing(pseudo: &LightSpherePseudo) -> Self {
        let mut builder = Self::new();
        builder.position = pseudo.position;
        builder.radius = pseudo.radius;
        builder.faces = pseudo.faces;
        if let Some(first) = pseudo.lights.first() {
            builder.color = first.color;
            builder.intensity = first.intensity;
            builder.falloff = first.falloff;
            builder.shadow = first.shadow.clone();
        }
        builder
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

    /// Set the world-space center
    pub fn set_position(&mut self, position: Vec3) -> StructuralResult<&mut Self> {
        self.position = check_position(position)?;
        Ok(self)
    }

    /// Set the radius; must be strictly positive
    pub fn set_radius(&mut self, radius: f32) -> StructuralResult<&mut Self> {
        (self.radius, _) = positive_with_inverse("radius", radius)?;
        Ok(self)
    }

    /// Set the falloff exponent; must be strictly positive
    pub fn set_falloff(&mut self, falloff: f32) -> StructuralResult<&mut Self> {
        (self.falloff, _) = positive_with_inverse("falloff", falloff)?;
        Ok(self)
    }

    /// Select the faces to emit through; at least one is required
    pub fn set_faces(&mut self, faces: PseudoFaces) -> StructuralResult<&mut Self> {
        if faces.is_empty() {
            return Err(StructuralError::invalid("faces", "at least one face is required"));
        }
        self.faces = faces;
        Ok(self)
    }

    /// Set or clear the shadow shared by every face
    pub fn set_shadow(&mut self, shadow: Option<Shadow>) -> &mut Self {
        self.shadow = shadow;
        self
    }

    /// Build the aggregate, drawing one fresh light id per face from `ids`
    pub fn build(&self, ids: &mut IdPool) -> StructuralResult<LightSpherePseudo> {
        let projection =
            ProjectionPerspective::new(constants::HALF_PI, 1.0, self.radius / 1000.0, self.radius)?;

        let mut lights = Vec::with_capacity(self.faces.iter().count());
        for (direction, up) in self.faces.orientations() {

            let mut builder = LightProjectiveBuilder::new(ids.fresh_light_id());
            builder
                .set_color(self.color)?
                .set_intensity(self.intensity)?
                .set_position(self.position)?
                .set_range(self.radius)?
                .set_falloff(self.falloff)?
                .set_orientation(Quat::face_towards(&direction, &up))
                .set_projection(projection.into())
                .set_shadow(self.shadow.clone());
            lights.push(builder.build());
        }

        Ok(LightSpherePseudo {
            position: self.position,
            radius: self.radius,
            faces: self.faces,
            lights,
        })
    }
}

impl Default for LightSpherePseudoBuilder {
    fn default() -> Self {
        Self::new()
    }
}
