use crate::domain::models::{CheckItem, Config, DoctorReport};
use crate::services::tools::program_available;
use std::path::Path;

fn status(ok: bool) -> String {
    if ok { "ok" } else { "missing" }.to_string()
}

/// Checks that every tool the audit shells out to can be found.
pub fn run_doctor(config: &Config, casks_file: &Path) -> DoctorReport {
    let mut checks = vec![
        CheckItem {
            name: "xattr".to_string(),
            status: status(program_available(&config.tools.xattr)),
        },
        CheckItem {
            name: "spctl".to_string(),
            status: status(program_available(&config.tools.spctl)),
        },
        CheckItem {
            name: "file".to_string(),
            status: status(program_available(&config.tools.file)),
        },
        CheckItem {
            name: "elevate".to_string(),
            status: if config.tools.elevate.is_empty() {
                "not_configured".to_string()
            } else {
                status(program_available(&config.tools.elevate))
            },
        },
        CheckItem {
            name: "brew".to_string(),
            status: status(config.homebrew.brew.is_file()),
        },
    ];
    checks.push(CheckItem {
        name: "casks_file".to_string(),
        status: status(casks_file.is_file()),
    });

    let overall = if checks
        .iter()
        .all(|c| c.status == "ok" || c.status == "not_configured")
    {
        "ok"
    } else {
        "needs_attention"
    }
    .to_string();

    DoctorReport { overall, checks }
}
