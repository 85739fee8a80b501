use super::check_uv_matrix;
use crate::error::StructuralResult;
use crate::foundation::ids::InstanceId;
use crate::foundation::math::Mat3;
use crate::graphics::Mesh;
use crate::material::MaterialOpaqueRegular;
use crate::transform::Transform;

/// Opaque instance: rendered once per light group that contains it
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceOpaque {
    pub(crate) id: InstanceId,
    pub(crate) mesh: Mesh,
    pub(crate) transform: Transform,
    pub(crate) material: MaterialOpaqueRegular,
    pub(crate) uv_matrix: Mat3,
}

impl InstanceOpaque {
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
    pub const fn material(&self) -> &MaterialOpaqueRegular {
        &self.material
    }

    /// Matrix applied to texture coordinates
    pub const fn uv_matrix(&self) -> &Mat3 {
        &self.uv_matrix
    }
}

/// Builder for [`InstanceOpaque`]
#[derive(Debug, Clone)]
pub struct InstanceOpaqueBuilder {
    id: InstanceId,
    mesh: Mesh,
    transform: Transform,
    material: MaterialOpaqueRegular,
    uv_matrix: Mat3,
}

impl InstanceOpaqueBuilder {
    /// Identity transform and UV matrix
    pub fn new(id: InstanceId, mesh: Mesh, material: MaterialOpaqueRegular) -> Self {
        Self {
            id,
            mesh,
            transform: Transform::Identity,
            material,
            uv_matrix: Mat3::identity(),
        }
    }

    /// Seed a builder from an existing instance, keeping its id
    pub fn from_existing(instance: &InstanceOpaque) -> Self {
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
    pub fn set_material(&mut self, material: MaterialOpaqueRegular) -> &mut Self {
        self.material = material;
        self
    }

    /// Set the UV matrix; every element must be finite
    pub fn set_uv_matrix(&mut self, uv_matrix: Mat3) -> StructuralResult<&mut Self> {
        self.uv_matrix = check_uv_matrix(uv_matrix)?;
        Ok(self)
    }

    /// Freeze the current state
    pub fn build(&self) -> InstanceOpaque {
        InstanceOpaque {
            id: self.id,
            mesh: self.mesh,
            transform: self.transform,
            material: self.material.clone(),
            uv_matrix: self.uv_matrix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Vec2, Vec3};
    use crate::graphics::{ArrayBufferHandle, IndexBufferHandle};
    use crate::material::MaterialOpaqueRegularBuilder;

    fn mesh() -> Mesh {
        Mesh::new(ArrayBufferHandle(1), IndexBufferHandle(2))
    }

    #[test]
    fn test_defaults() {
        let material = MaterialOpaqueRegularBuilder::new().build().unwrap();
        let instance = InstanceOpaqueBuilder::new(InstanceId(5), mesh(), material.clone()).build();

        assert_eq!(instance.id(), InstanceId(5));
        assert_eq!(*instance.transform(), Transform::Identity);
        assert_eq!(*instance.uv_matrix(), Mat3::identity());
        assert_eq!(instance.material(), &material);
    }

    #[test]
    fn test_uv_matrix_rejects_non_finite() {
        let material = MaterialOpaqueRegularBuilder::new().build().unwrap();
        let mut builder = InstanceOpaqueBuilder::new(InstanceId(1), mesh(), material);

        let mut bad = Mat3::identity();
        bad[(1, 2)] = f32::NAN;
        assert!(builder.set_uv_matrix(bad).is_err());
        assert_eq!(*builder.build().uv_matrix(), Mat3::identity());

        let scaled = Mat3::new_nonuniform_scaling(&Vec2::new(2.0, 4.0));
        builder.set_uv_matrix(scaled).unwrap();
        assert_eq!(*builder.build().uv_matrix(), scaled);
    }

    #[test]
    fn test_from_existing_and_independence() {
        let material = MaterialOpaqueRegularBuilder::new().build().unwrap();
        let mut builder = InstanceOpaqueBuilder::new(InstanceId(1), mesh(), material);
        builder.set_transform(Transform::Translation(Vec3::new(1.0, 2.0, 3.0)));
        let first = builder.build();

        builder.set_transform(Transform::Identity);
        let second = builder.build();

        assert_ne!(first, second);
        assert_eq!(InstanceOpaqueBuilder::from_existing(&first).build(), first);
    }
}
