//! Runtime configuration for skillsync.
//!
//! This crate provides utilities for:
//! - Reading environment variables for configuration.
//! - Loading the optional `config.toml` settings file.
//! - Locating the canonical skills repository without relying on the cwd.

pub mod config;
pub mod env;
pub mod repo;

pub use config::{load_settings, load_settings_from, PlatformSettings, Settings};
pub use env::{config_file, env_repo_root, expand_home, home_dir};
pub use repo::{find_repo_root_from, resolve_repo_root};
