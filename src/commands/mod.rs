//! Top-level subcommand implementations.
pub mod sync;
pub mod version;
