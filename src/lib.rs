//! Skill directory synchronisation.
//!
//! Copies named skill directories from prioritised source roots into one or
//! more target directories (one per agent or IDE), so that each enabled
//! target ends up containing exactly the configured skills. Driven by a
//! single TOML configuration file.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: parse and validate the TOML configuration
//! - **[`resources`]**: idempotent `check + apply` filesystem primitives
//! - **[`sync`]**: source resolution, per-target reconciliation, and the run driver
//! - **[`commands`]**: top-level subcommand orchestration (`sync`, `version`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod resources;
pub mod sync;
