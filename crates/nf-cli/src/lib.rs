//! `nf-cli` — the `netfuse` command.
//!
//! | Module     | Contents                                          |
//! |------------|---------------------------------------------------|
//! | [`app`]    | `CliArgs` (clap), `run` (load → merge → write)    |
//! | [`config`] | `NetfuseConfig` (TOML layer overrides)            |

pub mod app;
pub mod config;

#[cfg(test)]
mod tests;

pub use app::{run, CliArgs};
pub use config::{ConfigError, NetfuseConfig};
