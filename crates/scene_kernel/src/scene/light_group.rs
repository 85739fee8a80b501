use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::builder::{AssemblyState, Placement};
use crate::error::{StructuralError, StructuralResult};
use crate::foundation::ids::{InstanceId, LightId};
use crate::instance::InstanceOpaque;
use crate::light::{Light, LightSpherePseudo};

/// Named set of lights and the opaque instances they illuminate
///
/// Both sets are non-empty. Lights and instances keep the order in which
/// they were first added.
#[derive(Debug, Clone, PartialEq)]
pub struct LightGroup {
    name: String,
    lights: Vec<Light>,
    instances: Vec<InstanceOpaque>,
}

impl LightGroup {
    /// Group name, unique within its visible set
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lights of this group
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Opaque instances lit by this group
    pub fn instances(&self) -> &[InstanceOpaque] {
        &self.instances
    }

    /// Whether the group contains a light with `id`
    pub fn contains_light(&self, id: LightId) -> bool {
        self.lights.iter().any(|l| l.id() == id)
    }

    /// Whether the group contains an instance with `id`
    pub fn contains_instance(&self, id: InstanceId) -> bool {
        self.instances.iter().any(|i| i.id() == id)
    }

    /// Concatenated light codes, e.g. `LD_LS_LP_SB`
    ///
    /// Together with a material code this identifies the shader
    /// permutation needed to draw an instance of the group.
    pub fn lights_code(&self) -> String {
        self.lights
            .iter()
            .map(Light::code)
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Instances batched by material code
    ///
    /// Batches are ordered by code; instances within a batch keep their
    /// insertion order.
    pub fn instances_by_material_code(&self) -> BTreeMap<&str, Vec<&InstanceOpaque>> {
        let mut batches: BTreeMap<&str, Vec<&InstanceOpaque>> = BTreeMap::new();
        for instance in &self.instances {
            batches
                .entry(instance.material().code())
                .or_default()
                .push(instance);
        }
        batches
    }
}

/// Sub-builder accumulating one light group of a visible set
///
/// Obtained from [`VisibleSetBuilder::light_group_new`]. The builder is
/// invalidated once [`group_create`](Self::group_create) succeeds or its
/// parent is built; every later call fails with
/// [`StructuralError::BuilderInvalid`].
///
/// [`VisibleSetBuilder::light_group_new`]: super::VisibleSetBuilder::light_group_new
#[derive(Debug)]
pub struct LightGroupBuilder {
    name: String,
    state: Rc<RefCell<AssemblyState>>,
    lights: Vec<Light>,
    instances: Vec<InstanceOpaque>,
    created: bool,
}

impl LightGroupBuilder {
    pub(super) fn new(name: String, state: Rc<RefCell<AssemblyState>>) -> Self {
        Self {
            name,
            state,
            lights: Vec::new(),
            instances: Vec::new(),
            created: false,
        }
    }

    /// Group name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether further calls will succeed
    pub fn is_valid(&self) -> bool {
        !self.created && !self.state.borrow().invalid
    }

    fn check_valid(&self) -> StructuralResult<()> {
        if self.created {
            return Err(StructuralError::BuilderInvalid(format!(
                "light group '{}' was already created",
                self.name
            )));
        }
        if self.state.borrow().invalid {
            return Err(StructuralError::BuilderInvalid(format!(
                "visible set owning light group '{}' was already built",
                self.name
            )));
        }
        Ok(())
    }

    fn check_capacity(&self, additional: usize) -> StructuralResult<()> {
        let max = self.state.borrow().max_lights_per_group;
        if self.lights.len() + additional > max {
            log::warn!(
                "Light group '{}' rejected {} light(s): limit is {}",
                self.name,
                additional,
                max
            );
            return Err(StructuralError::LightGroupTooManyLights {
                group: self.name.clone(),
                max,
            });
        }
        Ok(())
    }

    fn has_light(&self, id: LightId) -> bool {
        self.lights.iter().any(|l| l.id() == id)
    }

    /// Add a light; a light whose id is already present is ignored
    pub fn add_light(&mut self, light: impl Into<Light>) -> StructuralResult<&mut Self> {
        self.check_valid()?;
        let light = light.into();
        if self.has_light(light.id()) {
            return Ok(self);
        }

        self.check_capacity(1)?;
        log::trace!("Light group '{}': added {}", self.name, light.id());
        self.lights.push(light);
        Ok(self)
    }

    /// Add every face light of a pseudo-spherical light
    ///
    /// Either all new face lights are added or, if they would exceed the
    /// group's light limit, none are.
    pub fn add_pseudo_sphere(&mut self, pseudo: &LightSpherePseudo) -> StructuralResult<&mut Self> {
        self.check_valid()?;
        let fresh: Vec<_> = pseudo
            .lights()
            .iter()
            .filter(|l| !self.has_light(l.id()))
            .cloned()
            .collect();

        self.check_capacity(fresh.len())?;
        log::trace!(
            "Light group '{}': added pseudo-sphere with {} face(s)",
            self.name,
            fresh.len()
        );
        self.lights.extend(fresh.into_iter().map(Light::Projective));
        Ok(self)
    }

    /// Add an opaque instance lit by this group
    ///
    /// Adding an instance already in this group is a no-op. An instance
    /// already placed elsewhere in the visible set is rejected with
    /// [`StructuralError::InstanceAlreadyPresent`].
    pub fn add_instance(&mut self, instance: InstanceOpaque) -> StructuralResult<&mut Self> {
        self.check_valid()?;
        let id = instance.id();

        let placed = {
            let mut state = self.state.borrow_mut();
            match state.placements.get(&id).cloned() {
                Some(Placement::LightGroup(group)) if group == self.name => false,
                Some(other) => {
                    log::warn!("{} already placed in {}; rejected by '{}'", id, other, self.name);
                    return Err(StructuralError::InstanceAlreadyPresent { id });
                }
                None => {
                    state
                        .placements
                        .insert(id, Placement::LightGroup(self.name.clone()));
                    true
                }
            }
        };
        if !placed {
            return Ok(self);
        }

        log::trace!("Light group '{}': added {}", self.name, id);
        self.instances.push(instance);
        Ok(self)
    }

    /// Validate the accumulated group and register it with the visible set
    ///
    /// Fails with [`StructuralError::LightGroupLacksLights`] first, then
    /// [`StructuralError::LightGroupLacksInstances`]. On failure the
    /// builder stays open and may be completed and retried.
    pub fn group_create(&mut self) -> StructuralResult<()> {
        self.check_valid()?;

        if self.lights.is_empty() {
            return Err(StructuralError::LightGroupLacksLights {
                group: self.name.clone(),
            });
        }
        if self.instances.is_empty() {
            return Err(StructuralError::LightGroupLacksInstances {
                group: self.name.clone(),
            });
        }

        let mut state = self.state.borrow_mut();
        if state.groups.iter().any(|g| g.name == self.name) {
            return Err(StructuralError::LightGroupDuplicate {
                group: self.name.clone(),
            });
        }

        log::debug!(
            "Created light group '{}' with {} light(s) and {} instance(s)",
            self.name,
            self.lights.len(),
            self.instances.len()
        );

        state.pending.retain(|name| *name != self.name);
        state.groups.push(LightGroup {
            name: self.name.clone(),
            lights: std::mem::take(&mut self.lights),
            instances: std::mem::take(&mut self.instances),
        });
        drop(state);

        self.created = true;
        Ok(())
    }
}
