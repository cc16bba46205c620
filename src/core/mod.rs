//! # Core Application Logic
//!
//! Hera's conversation logic. It knows nothing about terminals or HTTP.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (owned state)    │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • annotate() (guard)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect::SpawnRequest
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!         ┌────────────┐                  ┌────────────┐
//!         │    TUI     │  ── spawns ──▶   │ Transport  │
//!         │  Adapter   │  ◀─ Action ───   │  (reqwest) │
//!         └────────────┘                  └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `App`, the single owner of session, transcript and request state
//! - [`action`]: `Action`/`Effect` and the `update()` reducer
//! - [`annotate`]: guard payload → annotation chips
//! - [`turn`]: transcript records
//! - [`session`]: conversation identity
//! - [`config`]: settings resolution

pub mod action;
pub mod annotate;
pub mod config;
pub mod session;
pub mod state;
pub mod turn;
