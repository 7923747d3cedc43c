//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `tools.rs`: `SystemTools` trait + process-backed `CommandTools`.
//! - `quarantine.rs`: quarantine attribute inspection and flag parsing.
//! - `verdict.rs`: per-artifact "will Gatekeeper block this" verdict.
//! - `report.rs`: grouping into clean/rejected/not-found + JSON view.
//! - `remediation.rs`: interactive review and unquarantine prompts.
//! - `casks.rs`: cask list parsing and `brew info` resolution.
//! - `doctor.rs`: tool availability checks.
//! - `config.rs`: config file loading.
//! - `logging.rs`: tracing subscriber setup.
//! - `storage.rs`: audit log.
//! - `output.rs`: JSON/console output helpers.
//!
//! ## Conventions
//! - Inspection never fails; tool errors become the conservative answer.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod casks;
pub mod config;
pub mod doctor;
pub mod logging;
pub mod output;
pub mod quarantine;
pub mod remediation;
pub mod report;
pub mod storage;
pub mod tools;
pub mod verdict;
