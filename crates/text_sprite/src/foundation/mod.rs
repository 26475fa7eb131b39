//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and operations
//! - Packed color handling
//! - Logging utilities

pub mod math;
pub mod color;
pub mod logging;
