//! Configuration module
//!
//! Configuration is split into focused modules:
//! - types/mod.rs: Core configuration types (InstallerConfig, ProjectConfig, PathsConfig)
//! - types/discovery.rs: Which files count as skill documents
//! - types/templates.rs: Per-target template overrides
//! - io.rs: Configuration loading
//! - validation.rs: Configuration validation
//! - paths.rs: Configuration file and assistant directory paths
//!
//! The loaded `InstallerConfig` is built once per process and passed
//! explicitly to the pipeline.

mod io;
mod paths;
mod types;
mod validation;

// Re-export core config types
pub use types::{
    resolve_against, DiscoveryConfig, InstallerConfig, PathsConfig, ProjectConfig,
    TemplatesConfig, DEFAULT_SOURCE_DIR,
};

// Re-export IO and utilities
pub use io::{apply_env_overrides, config_to_toml, load_config, load_config_from_path, parse_config};
pub use paths::{assistant_dir, config_path, find_config_file, user_config_dir, CONFIG_FILE_NAMES};
pub use validation::{validate_config, ConfigValidationResult, ValidationIssue};
