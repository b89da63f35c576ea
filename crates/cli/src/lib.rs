//! CLI tool for inspecting consistent hash rings.
//!
//! Provides commands for:
//! - Listing ring members
//! - Resolving resources to primary and fallback targets
//! - Replica placement
//! - Measuring resource distribution

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::{CliConfig, HasherKind, RingConfig, TargetSpec};
