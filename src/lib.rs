//! Hera library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod transport;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Built-in client presets. See `core::config::ClientProfile`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Stateless coaching client: no session id, success chips on every reply.
    #[default]
    Hera,
    /// Conversational client: session id on every request, chips only on refusal.
    Pace,
}
