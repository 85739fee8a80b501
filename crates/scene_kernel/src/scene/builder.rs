use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::light_group::{LightGroup, LightGroupBuilder};
use super::visible_set::{ShadowCasters, VisibleSet};
use crate::camera::Camera;
use crate::core::config::SceneConfig;
use crate::error::{StructuralError, StructuralResult};
use crate::foundation::ids::InstanceId;
use crate::instance::{InstanceOpaque, InstanceTranslucent};
use crate::light::Light;

/// Structural location of an instance within a visible set
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Placement {
    LightGroup(String),
    OpaqueUnlit,
    Translucent,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LightGroup(name) => write!(f, "light group '{name}'"),
            Self::OpaqueUnlit => write!(f, "unlit opaque instances"),
            Self::Translucent => write!(f, "translucent instances"),
        }
    }
}

/// State shared between a visible-set builder and its light-group builders
#[derive(Debug)]
pub(crate) struct AssemblyState {
    pub(crate) invalid: bool,
    pub(crate) max_lights_per_group: usize,
    pub(crate) groups: Vec<LightGroup>,
    pub(crate) pending: Vec<String>,
    pub(crate) placements: HashMap<InstanceId, Placement>,
}

impl AssemblyState {
    fn new(config: &SceneConfig) -> Self {
        Self {
            invalid: false,
            max_lights_per_group: config.max_lights_per_group,
            groups: Vec::new(),
            pending: Vec::new(),
            placements: HashMap::new(),
        }
    }

    fn place(&mut self, id: InstanceId, placement: Placement) -> StructuralResult<()> {
        if let Some(existing) = self.placements.get(&id) {
            log::warn!("{} already placed in {}; rejected by {}", id, existing, placement);
            return Err(StructuralError::InstanceAlreadyPresent { id });
        }
        self.placements.insert(id, placement);
        Ok(())
    }
}

/// Single-use builder assembling a [`VisibleSet`]
///
/// Opaque lit instances enter through light groups opened with
/// [`light_group_new`](Self::light_group_new). Unlit opaque and translucent
/// instances are added directly. [`build`](Self::build) consumes the
/// builder and invalidates every light-group builder still referring to it.
///
/// Builders share state through `Rc<RefCell<_>>` and are therefore neither
/// `Send` nor `Sync`; the resulting [`VisibleSet`] is both.
#[derive(Debug)]
pub struct VisibleSetBuilder {
    camera: Camera,
    state: Rc<RefCell<AssemblyState>>,
    opaque_unlit: Vec<InstanceOpaque>,
    translucent: Vec<InstanceTranslucent>,
    shadow_casters: Vec<ShadowCasters>,
}

impl VisibleSetBuilder {
    /// Create a builder with the default scene configuration
    pub fn new(camera: Camera) -> Self {
        Self::from_state(camera, AssemblyState::new(&SceneConfig::default()))
    }

    /// Create a builder with an explicit scene configuration
    ///
    /// Fails when `max_lights_per_group` is zero, since no light group could
    /// ever be created.
    pub fn with_config(camera: Camera, config: &SceneConfig) -> StructuralResult<Self> {
        if config.max_lights_per_group == 0 {
            return Err(StructuralError::invalid(
                "max_lights_per_group",
                "must be at least 1",
            ));
        }
        Ok(Self::from_state(camera, AssemblyState::new(config)))
    }

    fn from_state(camera: Camera, state: AssemblyState) -> Self {
        Self {
            camera,
            state: Rc::new(RefCell::new(state)),
            opaque_unlit: Vec::new(),
            translucent: Vec::new(),
            shadow_casters: Vec::new(),
        }
    }

    /// Replace the camera
    pub fn set_camera(&mut self, camera: Camera) -> &mut Self {
        self.camera = camera;
        self
    }

    /// Open a new light group
    ///
    /// Fails with [`StructuralError::LightGroupDuplicate`] if a group with
    /// the same name was already opened or created in this visible set.
    pub fn light_group_new(&mut self, name: impl Into<String>) -> StructuralResult<LightGroupBuilder> {
        let name = name.into();
        {
            let mut state = self.state.borrow_mut();
            let taken = state.pending.contains(&name)
                || state.groups.iter().any(|g| g.name() == name);
            if taken {
                log::warn!("Light group '{}' already exists", name);
                return Err(StructuralError::LightGroupDuplicate { group: name });
            }
            state.pending.push(name.clone());
        }

        log::trace!("Opened light group '{}'", name);
        Ok(LightGroupBuilder::new(name, Rc::clone(&self.state)))
    }

    /// Add an opaque instance drawn without lighting
    ///
    /// Adding the same instance twice is a no-op.
    pub fn add_opaque_unlit(&mut self, instance: InstanceOpaque) -> StructuralResult<&mut Self> {
        let id = instance.id();
        if self.opaque_unlit.iter().any(|i| i.id() == id) {
            return Ok(self);
        }

        self.state.borrow_mut().place(id, Placement::OpaqueUnlit)?;
        log::trace!("Added unlit opaque {}", id);
        self.opaque_unlit.push(instance);
        Ok(self)
    }

    /// Append a translucent instance
    ///
    /// Translucent instances are drawn in the order they were added; the
    /// builder never reorders them.
    pub fn add_translucent(
        &mut self,
        instance: impl Into<InstanceTranslucent>,
    ) -> StructuralResult<&mut Self> {
        let instance = instance.into();
        let id = instance.id();

        self.state.borrow_mut().place(id, Placement::Translucent)?;
        log::trace!("Added translucent {} at position {}", id, self.translucent.len());
        self.translucent.push(instance);
        Ok(self)
    }

    /// Record that `instance` is rendered into the shadow map of `light`
    ///
    /// Only projective lights with a shadow accept casters; anything else
    /// fails with [`StructuralError::LightLacksShadow`]. Casters do not
    /// occupy a structural location, so an instance may also be lit by a
    /// group or cast shadows for several lights.
    pub fn add_shadow_caster(
        &mut self,
        light: &Light,
        instance: InstanceOpaque,
    ) -> StructuralResult<&mut Self> {
        let projective = match light {
            Light::Projective(l) if l.shadow().is_some() => l,
            _ => {
                log::warn!("{} has no shadow; caster {} rejected", light.id(), instance.id());
                return Err(StructuralError::LightLacksShadow { id: light.id() });
            }
        };

        let position = self
            .shadow_casters
            .iter()
            .position(|c| c.light().id() == projective.id());
        let casters = match position {
            Some(index) => &mut self.shadow_casters[index],
            None => {
                self.shadow_casters.push(ShadowCasters::new(projective.clone()));
                let last = self.shadow_casters.len() - 1;
                &mut self.shadow_casters[last]
            }
        };

        if casters.insert(instance) {
            log::trace!("Added shadow caster for {}", projective.id());
        }
        Ok(self)
    }

    /// Freeze the visible set
    ///
    /// Fails with [`StructuralError::LightGroupPending`] if a light group was
    /// opened but never created. Either way the builder is consumed and
    /// every outstanding light-group builder becomes invalid.
    pub fn build(self) -> StructuralResult<VisibleSet> {
        let mut state = self.state.borrow_mut();
        state.invalid = true;

        if let Some(name) = state.pending.first() {
            log::warn!("Visible set build failed: light group '{}' is pending", name);
            return Err(StructuralError::LightGroupPending {
                group: name.clone(),
            });
        }

        let light_groups = std::mem::take(&mut state.groups);
        drop(state);

        let set = VisibleSet::new(
            self.camera,
            light_groups,
            self.opaque_unlit,
            self.translucent,
            self.shadow_casters,
        );

        log::debug!(
            "Built visible set: {} light group(s), {} lit, {} unlit, {} translucent, {} shadowed light(s)",
            set.light_groups().len(),
            set.light_groups().iter().map(|g| g.instances().len()).sum::<usize>(),
            set.opaque_unlit().len(),
            set.translucent().len(),
            set.shadow_casters().len()
        );

        Ok(set)
    }
}
