//! Visible-set assembly
//!
//! A [`VisibleSetBuilder`] gathers one frame's worth of instances:
//!
//! - opaque instances lit by named light groups ([`LightGroupBuilder`])
//! - unlit opaque instances
//! - translucent instances, kept in insertion order
//! - shadow casters per shadow-casting light
//!
//! Structural rules are enforced at the call that would break them, and
//! [`VisibleSetBuilder::build`] freezes everything into an immutable
//! [`VisibleSet`] for a rendering backend to consume.

mod builder;
mod light_group;
mod visible_set;

#[cfg(test)]
mod tests;

pub use builder::VisibleSetBuilder;
pub use light_group::{LightGroup, LightGroupBuilder};
pub use visible_set::{ShadowCasters, VisibleSet};
