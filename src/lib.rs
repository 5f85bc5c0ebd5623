//! # Skillport
//!
//! Installs one set of skill documents into several AI coding assistants.
//!
//! ## Features
//!
//! - **Discovery:** Recursive, deterministic search of a skills directory
//! - **Section parsing:** Title and `#`/`##` sections with normalized keys
//! - **Target profiles:** Opencode, Claude Code and Cursor output conventions
//! - **Rendering:** Handlebars templates with per-field fallback chains
//! - **Isolation:** One broken skill is reported, the rest are still written

pub mod config;
pub mod detect;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod skills;
pub mod targets;
pub mod writer;

pub use config::InstallerConfig;
pub use error::{Error, Result};
pub use pipeline::{Pipeline, RunReport};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = env!("CARGO_PKG_NAME");
