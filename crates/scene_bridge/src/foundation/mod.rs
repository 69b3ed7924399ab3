//! Foundation module - Core utilities and types
//!
//! - Math types (vectors, poses, colors)
//! - Logging utilities

pub mod math;
pub mod logging;
