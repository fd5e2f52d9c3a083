//! Configuration module for calcdeck
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::CalcPaths;
pub use settings::Settings;
