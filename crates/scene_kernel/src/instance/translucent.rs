use super::check_uv_matrix;
use crate::error::{StructuralError, StructuralResult};
use crate::foundation::ids::{InstanceId, LightId};
use crate::foundation::math::Mat3;
use crate::graphics::Mesh;
use crate::light::Light;
use crate::material::{MaterialTranslucentRefractive, MaterialTranslucentRegular};
use crate::transform::Transform;

/// Translucent instance lit by its own set of lights
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceTranslucentRegularLit {
    pub(crate) id: InstanceId,
    pub(crate) mesh: Mesh,
    pub(crate) transform: Transform,
    pub(crate) material: MaterialTranslucentRegular,
    pub(crate) uv_matrix: Mat3,
    pub(crate) lights: Vec<Light>,
}

impl InstanceTranslucentRegularLit {
    /// Unique id
    pub const fn id(&self) -> InstanceId {
        self.id
    }

    /// Mesh buffers
    pub const fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Object-to-world transform
    pub const fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Surface material
    pub const fn material(&self) -> &MaterialTranslucentRegular {
        &self.material
    }

    /// Matrix applied to texture coordinates
    pub const fn uv_matrix(&self) -> &Mat3 {
        &self.uv_matrix
    }

    /// Lights affecting this instance, in insertion order
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }
}

/// Translucent instance drawn without lighting
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceTranslucentRegularUnlit {
    pub(crate) id: InstanceId,
    pub(crate) mesh: Mesh,
    pub(crate) transform: Transform,
    pub(crate) material: MaterialTranslucentRegular,
    pub(crate) uv_matrix: Mat3,
}

impl InstanceTranslucentRegularUnlit {
    /// Unique id
    pub const fn id(&self) -> InstanceId {
        self.id
    }

    /// Mesh buffers
    pub const fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Object-to-world transform
    pub const fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Surface material
    pub const fn material(&self) -> &MaterialTranslucentRegular {
        &self.material
    }

    /// Matrix applied to texture coordinates
    pub const fn uv_matrix(&self) -> &Mat3 {
        &self.uv_matrix
    }
}

/// Translucent instance refracting whatever was rendered behind it
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceTranslucentRefractive {
    pub(crate) id: InstanceId,
    pub(crate) mesh: Mesh,
    pub(crate) transform: Transform,
    pub(crate) material: MaterialTranslucentRefractive,
    pub(crate) uv_matrix: Mat3,
}

impl InstanceTranslucentRefractive {
    /// Unique id
    pub const fn id(&self) -> InstanceId {
        self.id
    }

    /// Mesh buffers
    pub const fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Object-to-world transform
    pub const fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Surface material
    pub const fn material(&self) -> &MaterialTranslucentRefractive {
        &self.material
    }

    /// Matrix applied to texture coordinates
    pub const fn uv_matrix(&self) -> &Mat3 {
        &self.uv_matrix
    }
}

/// Builder for [`InstanceTranslucentRegularLit`] and
/// [`InstanceTranslucentRegularUnlit`]
///
/// Both share a material family; `build_lit` attaches the accumulated
/// lights and `build_unlit` ignores them.
#[derive(Debug, Clone)]
pub struct InstanceTranslucentRegularBuilder {
    id: InstanceId,
    mesh: Mesh,
    transform: Transform,
    material: MaterialTranslucentRegular,
    uv_matrix: Mat3,
    lights: Vec<Light>,
}

impl InstanceTranslucentRegularBuilder {
    /// Identity transform and UV matrix, no lights
    pub fn new(id: InstanceId, mesh: Mesh, material: MaterialTranslucentRegular) -> Self {
        Self {
            id,
            mesh,
            transform: Transform::Identity,
            material,
            uv_matrix: Mat3::identity(),
            lights: Vec::new(),
        }
    }

    /// Seed a builder from an existing lit instance
    pub fn from_existing_lit(instance: &InstanceTranslucentRegularLit) -> Self {
        Self {
            id: instance.id,
            mesh: instance.mesh,
            transform: instance.transform,
            material: instance.material.clone(),
            uv_matrix: instance.uv_matrix,
            lights: instance.lights.clone(),
        }
    }

    /// Seed a builder from an existing unlit instance
    pub fn from_existing_unlit(instance: &InstanceTranslucentRegularUnlit) -> Self {
        Self {
            id: instance.id,
            mesh: instance.mesh,
            transform: instance.transform,
            material: instance.material.clone(),
            uv_matrix: instance.uv_matrix,
            lights: Vec::new(),
        }
    }

    /// Set the mesh
    pub fn set_mesh(&mut self, mesh: Mesh) -> &mut Self {
        self.mesh = mesh;
        self
    }

    /// Set the transform
    pub fn set_transform(&mut self, transform: Transform) -> &mut Self {
        self.transform = transform;
        self
    }

    /// Set the material
    pub fn set_material(&mut self, material: MaterialTranslucentRegular) -> &mut Self {
        self.material = material;
        self
    }

    /// Set the UV matrix; every element must be finite
    pub fn set_uv_matrix(&mut self, uv_matrix: Mat3) -> StructuralResult<&mut Self> {
        self.uv_matrix = check_uv_matrix(uv_matrix)?;
        Ok(self)
    }

    /// Add a light; a light whose id is already present is ignored
    pub fn add_light(&mut self, light: Light) -> &mut Self {
        if !self.contains_light(light.id()) {
            self.lights.push(light);
        }
        self
    }

    /// Remove every accumulated light
    pub fn clear_lights(&mut self) -> &mut Self {
        self.lights.clear();
        self
    }

    /// Whether a light with `id` has been added
    pub fn contains_light(&self, id: LightId) -> bool {
        self.lights.iter().any(|l| l.id() == id)
    }

    /// Freeze the current state as a lit instance
    ///
    /// At least one light is required; use `build_unlit` otherwise.
    pub fn build_lit(&self) -> StructuralResult<InstanceTranslucentRegularLit> {
        if self.lights.is_empty() {
            return Err(StructuralError::invalid(
                "lights",
                "a lit translucent instance needs at least one light",
            ));
        }
        Ok(InstanceTranslucentRegularLit {
            id: self.id,
            mesh: self.mesh,
            transform: self.transform,
            material: self.material.clone(),
            uv_matrix: self.uv_matrix,
            lights: self.lights.clone(),
        })
    }

    /// Freeze the current state as an unlit instance
    pub fn build_unlit(&self) -> InstanceTranslucentRegularUnlit {
        InstanceTranslucentRegularUnlit {
            id: self.id,
            mesh: self.mesh,
            transform: self.transform,
            material: self.material.clone(),
            uv_matrix: self.uv_matrix,
        }
    }
}

/// Builder for [`InstanceTranslucentRefractive`]
#[derive(Debug, Clone)]
pub struct InstanceTranslucentRefractiveBuilder {
    id: InstanceId,
    mesh: Mesh,
    transform: Transform,
    material: MaterialTranslucentRefractive,
    uv_matrix: Mat3,
}

impl InstanceTranslucentRefractiveBuilder {
    /// Identity transform and UV matrix
    pub fn new(id: InstanceId, mesh: Mesh, material: MaterialTranslucentRefractive) -> Self {
        Self {
            id,
            mesh,
            transform: Transform::Identity,
            material,
            uv_matrix: Mat3::identity(),
        }
    }

    /// Seed a builder from an existing instance
    pub fn from_existing(instance: &InstanceTranslucentRefractive) -> Self {
        Self {
            id: instance.id,
            mesh: instance.mesh,
            transform: instance.transform,
            material: instance.material.clone(),
            uv_matrix: instance.uv_matrix,
        }
    }

    /// Set the mesh
    pub fn set_mesh(&mut self, mesh: Mesh) -> &mut Self {
        self.mesh = mesh;
        self
    }

    /// Set the transform
    pub fn set_transform(&mut self, transform: Transform) -> &mut Self {
        self.transform = transform;
        self
    }

    /// Set the material
    pub fn set_material(&mut self, material: MaterialTranslucentRefractive) -> &mut Self {
        self.material = material;
        self
    }

    /// Set the UV matrix; every element must be finite
    pub fn set_uv_matrix(&mut self, uv_matrix: Mat3) -> StructuralResult<&mut Self> {
        self.uv_matrix = check_uv_matrix(uv_matrix)?;
        Ok(self)
    }

    /// Freeze the current state
    pub fn build(&self) -> InstanceTranslucentRefractive {
        InstanceTranslucentRefractive {
            id: self.id,
            mesh: self.mesh,
            transform: self.transform,
            material: self.material.clone(),
            uv_matrix: self.uv_matrix,
        }
    }
}
