use super::*;
use crate::camera::Camera;
use crate::core::config::SceneConfig;
use crate::error::StructuralError;
use crate::foundation::ids::{IdPool, InstanceId, LightId};
use crate::foundation::math::{Mat4, Vec4};
use crate::graphics::{ArrayBufferHandle, IndexBufferHandle, Mesh, Texture2DHandle};
use crate::instance::{
    InstanceOpaque, InstanceOpaqueBuilder, InstanceTranslucent, InstanceTranslucentRefractiveBuilder,
    InstanceTranslucentRegularBuilder,
};
use crate::light::{
    Light, LightDirectionalBuilder, LightProjectiveBuilder, LightSpherePseudoBuilder,
    LightSphericalBuilder,
};
use crate::material::{
    MaterialAlbedo, MaterialOpaqueRegularBuilder, MaterialRefractive,
    MaterialTranslucentRefractiveBuilder, MaterialTranslucentRegularBuilder,
};
use crate::projection::ProjectionPerspective;
use crate::shadow::ShadowMappedBasicBuilder;

fn camera() -> Camera {
    let projection = ProjectionPerspective::new(1.0, 1.5, 0.1, 100.0).unwrap();
    Camera::new(Mat4::identity(), projection.into())
}

fn mesh() -> Mesh {
    Mesh::new(ArrayBufferHandle(1), IndexBufferHandle(1))
}

fn opaque(ids: &mut IdPool) -> InstanceOpaque {
    let material = MaterialOpaqueRegularBuilder::new().build().unwrap();
    InstanceOpaqueBuilder::new(ids.fresh_instance_id(), mesh(), material).build()
}

fn textured_opaque(ids: &mut IdPool) -> InstanceOpaque {
    let mut material = MaterialOpaqueRegularBuilder::new();
    material.set_albedo(
        MaterialAlbedo::textured(Vec4::new(1.0, 1.0, 1.0, 1.0), 1.0, Texture2DHandle(1))
            .unwrap(),
    );
    InstanceOpaqueBuilder::new(ids.fresh_instance_id(), mesh(), material.build().unwrap()).build()
}

fn translucent(ids: &mut IdPool) -> InstanceTranslucent {
    let material = MaterialTranslucentRegularBuilder::new().unwrap().build().unwrap();
    InstanceTranslucentRegularBuilder::new(ids.fresh_instance_id(), mesh(), material)
        .build_unlit()
        .into()
}

fn directional(ids: &mut IdPool) -> Light {
    LightDirectionalBuilder::new(ids.fresh_light_id()).build().into()
}

fn shadowed(ids: &mut IdPool) -> Light {
    let mut builder = LightProjectiveBuilder::new(ids.fresh_light_id());
    builder.set_shadow(Some(ShadowMappedBasicBuilder::new().build().into()));
    builder.build().into()
}

#[test]
fn test_single_group_end_to_end() {
    let mut ids = IdPool::new();
    let instance = opaque(&mut ids);
    let light = directional(&mut ids);

    let mut builder = VisibleSetBuilder::new(camera());
    let mut group = builder.light_group_new("G1").unwrap();
    group
        .add_instance(instance.clone())
        .unwrap()
        .add_light(light.clone())
        .unwrap();
    group.group_create().unwrap();

    assert!(matches!(
        builder.light_group_new("G1"),
        Err(StructuralError::LightGroupDuplicate { group }) if group == "G1"
    ));

    let set = builder.build().unwrap();
    let g1 = set.light_group("G1").unwrap();
    assert_eq!(g1.instances(), &[instance][..]);
    assert_eq!(g1.lights(), &[light][..]);
    assert_eq!(set.instance_count(), 1);
    assert_eq!(*set.camera(), camera());
}

#[test]
fn test_group_lacking_lights_is_checked_first() {
    let mut builder = VisibleSetBuilder::new(camera());
    let mut group = builder.light_group_new("empty").unwrap();

    assert_eq!(
        group.group_create(),
        Err(StructuralError::LightGroupLacksLights {
            group: "empty".into()
        })
    );

    let mut ids = IdPool::new();
    group.add_light(directional(&mut ids)).unwrap();
    assert_eq!(
        group.group_create(),
        Err(StructuralError::LightGroupLacksInstances {
            group: "empty".into()
        })
    );

    // Still open after a failed create
    group.add_instance(opaque(&mut ids)).unwrap();
    group.group_create().unwrap();
    assert!(!group.is_valid());
}

#[test]
fn test_group_members_have_set_semantics() {
    let mut ids = IdPool::new();
    let instance = opaque(&mut ids);
    let light = directional(&mut ids);

    let mut builder = VisibleSetBuilder::new(camera());
    let mut group = builder.light_group_new("lit").unwrap();
    for _ in 0..3 {
        group
            .add_instance(instance.clone())
            .unwrap()
            .add_light(light.clone())
            .unwrap();
    }
    group.group_create().unwrap();

    let set = builder.build().unwrap();
    let lit = set.light_group("lit").unwrap();
    assert_eq!(lit.instances().len(), 1);
    assert_eq!(lit.lights().len(), 1);
}

#[test]
fn test_translucent_order_is_preserved() {
    let mut ids = IdPool::new();
    let refractive = MaterialTranslucentRefractiveBuilder::new(
        MaterialRefractive::new(0.5, false).unwrap(),
    )
    .build();

    let first = translucent(&mut ids);
    let second: InstanceTranslucent =
        InstanceTranslucentRefractiveBuilder::new(ids.fresh_instance_id(), mesh(), refractive)
            .build()
            .into();
    let third = translucent(&mut ids);

    let mut builder = VisibleSetBuilder::new(camera());
    builder
        .add_translucent(third.clone())
        .unwrap()
        .add_translucent(first.clone())
        .unwrap()
        .add_translucent(second.clone())
        .unwrap();

    let set = builder.build().unwrap();
    let order: Vec<_> = set.translucent().iter().map(InstanceTranslucent::id).collect();
    assert_eq!(order, [third.id(), first.id(), second.id()]);
    assert!(set.light_groups().is_empty());
}

#[test]
fn test_instance_occupies_one_location() {
    let mut ids = IdPool::new();
    let instance = opaque(&mut ids);
    let mut builder = VisibleSetBuilder::new(camera());

    builder.add_opaque_unlit(instance.clone()).unwrap();
    builder.add_opaque_unlit(instance.clone()).unwrap();

    let mut group = builder.light_group_new("lit").unwrap();
    assert_eq!(
        group.add_instance(instance.clone()).map(|_| ()),
        Err(StructuralError::InstanceAlreadyPresent { id: instance.id() })
    );

    let moving = translucent(&mut ids);
    builder.add_translucent(moving.clone()).unwrap();
    assert!(matches!(
        builder.add_translucent(moving),
        Err(StructuralError::InstanceAlreadyPresent { .. })
    ));

    group
        .add_light(directional(&mut ids))
        .unwrap()
        .add_instance(opaque(&mut ids))
        .unwrap();
    group.group_create().unwrap();

    let set = builder.build().unwrap();
    assert_eq!(set.opaque_unlit().len(), 1);
    assert_eq!(set.instance_count(), 3);
    assert!(set.contains_instance(instance.id()));
    assert!(!set.contains_instance(InstanceId(999)));
}

#[test]
fn test_build_invalidates_light_group_builders() {
    let mut ids = IdPool::new();
    let mut builder = VisibleSetBuilder::new(camera());
    let mut group = builder.light_group_new("late").unwrap();
    group
        .add_light(directional(&mut ids))
        .unwrap()
        .add_instance(opaque(&mut ids))
        .unwrap();
    group.group_create().unwrap();

    let mut created = group;
    let set = builder.build().unwrap();
    assert_eq!(set.light_groups().len(), 1);

    assert!(!created.is_valid());
    assert!(matches!(
        created.add_light(directional(&mut ids)),
        Err(StructuralError::BuilderInvalid(_))
    ));
    assert!(matches!(created.group_create(), Err(StructuralError::BuilderInvalid(_))));
}

#[test]
fn test_pending_group_fails_build_and_is_invalidated() {
    let mut ids = IdPool::new();
    let mut builder = VisibleSetBuilder::new(camera());
    let mut pending = builder.light_group_new("pending").unwrap();
    pending.add_light(directional(&mut ids)).unwrap();

    assert_eq!(
        builder.build(),
        Err(StructuralError::LightGroupPending {
            group: "pending".into()
        })
    );
    assert!(matches!(
        pending.add_instance(opaque(&mut ids)),
        Err(StructuralError::BuilderInvalid(_))
    ));
}

#[test]
fn test_light_limit_per_group() {
    let mut ids = IdPool::new();
    let config = SceneConfig::default().with_max_lights_per_group(2);
    let mut builder = VisibleSetBuilder::with_config(camera(), &config).unwrap();
    let mut group = builder.light_group_new("crowded").unwrap();

    group
        .add_light(directional(&mut ids))
        .unwrap()
        .add_light(LightSphericalBuilder::new(ids.fresh_light_id()).build())
        .unwrap();
    assert_eq!(
        group.add_light(directional(&mut ids)).map(|_| ()),
        Err(StructuralError::LightGroupTooManyLights {
            group: "crowded".into(),
            max: 2
        })
    );

    let pseudo = LightSpherePseudoBuilder::new().build(&mut ids).unwrap();
    assert!(group.add_pseudo_sphere(&pseudo).is_err());
    group.add_instance(opaque(&mut ids)).unwrap();
    group.group_create().unwrap();

    let set = builder.build().unwrap();
    assert_eq!(set.light_group("crowded").unwrap().lights().len(), 2);
}

#[test]
fn test_zero_light_limit_rejected() {
    let config = SceneConfig::default().with_max_lights_per_group(0);
    assert!(matches!(
        VisibleSetBuilder::with_config(camera(), &config),
        Err(StructuralError::InvalidArgument { name: "max_lights_per_group", .. })
    ));

    let config = SceneConfig::default().with_max_lights_per_group(1);
    let mut ids = IdPool::new();
    let mut builder = VisibleSetBuilder::with_config(camera(), &config).unwrap();
    let mut group = builder.light_group_new("single").unwrap();
    group
        .add_light(directional(&mut ids))
        .unwrap()
        .add_instance(opaque(&mut ids))
        .unwrap();
    group.group_create().unwrap();
    assert_eq!(builder.build().unwrap().light_groups().len(), 1);
}

#[test]
fn test_pseudo_sphere_adds_every_face() {
    let mut ids = IdPool::new();
    let pseudo = LightSpherePseudoBuilder::new().build(&mut ids).unwrap();

    let mut builder = VisibleSetBuilder::new(camera());
    let mut group = builder.light_group_new("point").unwrap();
    group
        .add_pseudo_sphere(&pseudo)
        .unwrap()
        .add_pseudo_sphere(&pseudo)
        .unwrap()
        .add_instance(opaque(&mut ids))
        .unwrap();
    group.group_create().unwrap();

    let set = builder.build().unwrap();
    let point = set.light_group("point").unwrap();
    assert_eq!(point.lights().len(), 6);
    assert_eq!(point.lights_code(), ["LP"; 6].join("_"));
    for face in pseudo.lights() {
        assert!(point.contains_light(face.id()));
    }
}

#[test]
fn test_shadow_casters() {
    let mut ids = IdPool::new();
    let sun = directional(&mut ids);
    let spot = shadowed(&mut ids);
    let caster = opaque(&mut ids);

    let mut builder = VisibleSetBuilder::new(camera());
    assert_eq!(
        builder.add_shadow_caster(&sun, caster.clone()).map(|_| ()),
        Err(StructuralError::LightLacksShadow { id: sun.id() })
    );

    builder
        .add_shadow_caster(&spot, caster.clone())
        .unwrap()
        .add_shadow_caster(&spot, caster.clone())
        .unwrap()
        .add_opaque_unlit(caster.clone())
        .unwrap();

    let set = builder.build().unwrap();
    assert_eq!(set.shadow_casters().len(), 1);
    assert_eq!(set.shadow_casters()[0].light().id(), spot.id());
    assert_eq!(set.shadow_casters()[0].instances(), &[caster][..]);
    assert_eq!(set.instance_count(), 1);
}

#[test]
fn test_instances_by_material_code() {
    let mut ids = IdPool::new();
    let plain_a = opaque(&mut ids);
    let textured = textured_opaque(&mut ids);
    let plain_b = opaque(&mut ids);

    let mut builder = VisibleSetBuilder::new(camera());
    let mut group = builder.light_group_new("batched").unwrap();
    group
        .add_light(directional(&mut ids))
        .unwrap()
        .add_instance(plain_a.clone())
        .unwrap()
        .add_instance(textured.clone())
        .unwrap()
        .add_instance(plain_b.clone())
        .unwrap();
    group.group_create().unwrap();

    let set = builder.build().unwrap();
    let batches = set.light_group("batched").unwrap().instances_by_material_code();

    let codes: Vec<_> = batches.keys().copied().collect();
    assert_eq!(codes, ["O_BT_DC_MN_EN_NV_SN", "O_BU_DC_MN_EN_NV_SN"]);
    assert_eq!(batches["O_BU_DC_MN_EN_NV_SN"], [&plain_a, &plain_b]);
    assert_eq!(batches["O_BT_DC_MN_EN_NV_SN"], [&textured]);
}

#[test]
fn test_lights_are_deduplicated_across_groups() {
    let mut ids = IdPool::new();
    let shared = directional(&mut ids);
    let mut builder = VisibleSetBuilder::new(camera());

    for name in ["a", "b"] {
        let mut group = builder.light_group_new(name).unwrap();
        group
            .add_light(shared.clone())
            .unwrap()
            .add_instance(opaque(&mut ids))
            .unwrap();
        group.group_create().unwrap();
    }

    let set = builder.build().unwrap();
    assert_eq!(set.lights(), [&shared]);
    assert_eq!(set.light_groups()[1].lights()[0].id(), LightId(1));
}

#[test]
fn test_visible_set_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<VisibleSet>();
}
