//! Identifier allocation for instances and lights
//!
//! Visible-set assembly compares instances and lights by identity, so every
//! value that can enter a visible set carries an id drawn from an [`IdPool`].

use std::fmt;

/// Unique identifier of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

/// Unique identifier of a light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instance#{}", self.0)
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "light#{}", self.0)
    }
}

/// Monotonic source of fresh ids
///
/// Instance and light ids are drawn from separate counters. Ids start at 1;
/// 0 is never handed out.
#[derive(Debug)]
pub struct IdPool {
    next_instance: u64,
    next_light: u64,
}

impl IdPool {
    /// Create a new pool
    pub const fn new() -> Self {
        Self {
            next_instance: 1,
            next_light: 1,
        }
    }

    /// Allocate a fresh instance id
    pub fn fresh_instance_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        id
    }

    /// Allocate a fresh light id
    pub fn fresh_light_id(&mut self) -> LightId {
        let id = LightId(self.next_light);
        self.next_light += 1;
        id
    }
}

impl Default for IdPool {
    fn default() -> Self {
        Self::new()
    }
}
