//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep artifact/report/config structs in one place.
//! - Avoid cyclic imports between the verdict, report and remediation services.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs`: artifacts, group reports, config and output structs.
//! - `constants.rs`: attribute name, quarantine flag masks, default paths.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/process side effects.
//!
//! ## Compatibility note
//! Changes in the report structs affect `--json` output.

pub mod constants;
pub mod models;
