use super::light_group::LightGroup;
use crate::camera::Camera;
use crate::foundation::ids::{InstanceId, LightId};
use crate::instance::{InstanceOpaque, InstanceTranslucent};
use crate::light::{Light, LightProjective};

/// Opaque instances rendered into one light's shadow map
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowCasters {
    light: LightProjective,
    instances: Vec<InstanceOpaque>,
}

impl ShadowCasters {
    pub(super) fn new(light: LightProjective) -> Self {
        Self {
            light,
            instances: Vec::new(),
        }
    }

    /// Returns `false` if an instance with the same id was already present
    pub(super) fn insert(&mut self, instance: InstanceOpaque) -> bool {
        if self.instances.iter().any(|i| i.id() == instance.id()) {
            return false;
        }
        self.instances.push(instance);
        true
    }

    /// The shadow-casting light
    pub const fn light(&self) -> &LightProjective {
        &self.light
    }

    /// Instances rendered into the light's shadow map
    pub fn instances(&self) -> &[InstanceOpaque] {
        &self.instances
    }
}

/// Immutable, validated description of one frame
///
/// Every instance occupies exactly one structural location: a light group,
/// the unlit opaque list, or the translucent list. Light groups are never
/// empty on either axis.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleSet {
    camera: Camera,
    light_groups: Vec<LightGroup>,
    opaque_unlit: Vec<InstanceOpaque>,
    translucent: Vec<InstanceTranslucent>,
    shadow_casters: Vec<ShadowCasters>,
}

impl VisibleSet {
    pub(super) fn new(
        camera: Camera,
        light_groups: Vec<LightGroup>,
        opaque_unlit: Vec<InstanceOpaque>,
        translucent: Vec<InstanceTranslucent>,
        shadow_casters: Vec<ShadowCasters>,
    ) -> Self {
        Self {
            camera,
            light_groups,
            opaque_unlit,
            translucent,
            shadow_casters,
        }
    }

    /// Camera observing the set
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Light groups in creation order
    pub fn light_groups(&self) -> &[LightGroup] {
        &self.light_groups
    }

    /// Look up a light group by name
    pub fn light_group(&self, name: &str) -> Option<&LightGroup> {
        self.light_groups.iter().find(|g| g.name() == name)
    }

    /// Opaque instances drawn without lighting
    pub fn opaque_unlit(&self) -> &[InstanceOpaque] {
        &self.opaque_unlit
    }

    /// Translucent instances in insertion order
    pub fn translucent(&self) -> &[InstanceTranslucent] {
        &self.translucent
    }

    /// Shadow casters grouped per light, in order of first registration
    pub fn shadow_casters(&self) -> &[ShadowCasters] {
        &self.shadow_casters
    }

    /// Every distinct light referenced by a light group, in first-seen order
    pub fn lights(&self) -> Vec<&Light> {
        let mut seen: Vec<LightId> = Vec::new();
        let mut lights = Vec::new();
        for light in self.light_groups.iter().flat_map(|g| g.lights()) {
            if !seen.contains(&light.id()) {
                seen.push(light.id());
                lights.push(light);
            }
        }
        lights
    }

    /// Total number of instances occupying a structural location
    pub fn instance_count(&self) -> usize {
        self.light_groups
            .iter()
            .map(|g| g.instances().len())
            .sum::<usize>()
            + self.opaque_unlit.len()
            + self.translucent.len()
    }

    /// Whether an instance with `id` occupies a structural location
    pub fn contains_instance(&self, id: InstanceId) -> bool {
        self.light_groups.iter().any(|g| g.contains_instance(id))
            || self.opaque_unlit.iter().any(|i| i.id() == id)
            || self.translucent.iter().any(|i| i.id() == id)
    }
}
