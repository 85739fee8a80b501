//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the kernel:
//! - Math types and operations
//! - Identifier allocation
//! - Logging utilities

pub mod ids;
pub mod logging;
pub mod math;
