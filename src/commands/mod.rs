//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `admin.rs`: `doctor`.
//! - `runtime.rs`: `casks` and `scan`: resolve artifacts, then report or review.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod admin;
pub mod runtime;

pub use admin::handle_admin_commands;
pub use runtime::handle_runtime_commands;
