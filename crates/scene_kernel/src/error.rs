//! Error types
//!
//! Structural errors are raised by builders at the call that would break an
//! invariant. [`RendererError`] is the fixed domain family that visitor
//! implementations may raise; visitor error types must absorb it.

use thiserror::Error;

use crate::config::ConfigError;
use crate::foundation::ids::{InstanceId, LightId};

/// Violations of the scene model's structural invariants
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructuralError {
    /// The builder was consumed or invalidated by its parent
    #[error("Builder is no longer valid: {0}")]
    BuilderInvalid(String),

    /// A light group was created without any lights
    #[error("Light group '{group}' has no lights")]
    LightGroupLacksLights {
        /// Group name
        group: String,
    },

    /// A light group was created without any instances
    #[error("Light group '{group}' has no instances")]
    LightGroupLacksInstances {
        /// Group name
        group: String,
    },

    /// A light group name is already used in this visible set
    #[error("Light group '{group}' already exists")]
    LightGroupDuplicate {
        /// Group name
        group: String,
    },

    /// A light group was opened but never created
    #[error("Light group '{group}' was opened but never created")]
    LightGroupPending {
        /// Group name
        group: String,
    },

    /// A light group exceeds the configured light limit
    #[error("Light group '{group}' exceeds the maximum of {max} lights")]
    LightGroupTooManyLights {
        /// Group name
        group: String,
        /// Configured limit
        max: usize,
    },

    /// A material variant combination needs a texture that is absent
    #[error("Material requires a texture: {requirement}")]
    MaterialMissingTexture {
        /// The unmet requirement
        requirement: &'static str,
    },

    /// An instance already occupies a location in the visible set
    #[error("{id} is already present in the visible set")]
    InstanceAlreadyPresent {
        /// Instance id
        id: InstanceId,
    },

    /// A shadow caster was registered against a light without a shadow
    #[error("{id} does not cast shadows")]
    LightLacksShadow {
        /// Light id
        id: LightId,
    },

    /// A setter rejected its argument
    #[error("Invalid {name}: {reason}")]
    InvalidArgument {
        /// Parameter name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl StructuralError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for builder operations
pub type StructuralResult<T> = Result<T, StructuralError>;

/// Renderer-level domain errors
#[derive(Error, Debug)]
pub enum RendererError {
    /// A structural invariant was violated
    #[error("Structural error: {0}")]
    Structural(#[from] StructuralError),

    /// The backend does not support a variant
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// The backend failed while processing a value
    #[error("Backend error: {0}")]
    Backend(String),

    /// Configuration could not be loaded or was invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for renderer-level operations
pub type RendererResult<T> = Result<T, RendererError>;
