use serde_json::json;
use std::path::{Path, PathBuf};

pub fn audit_log_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/unquarantine/audit.jsonl"))
}

/// Appends one remediation attempt to the audit log. Failures are ignored.
pub fn audit_unquarantine(group: &str, path: &Path, ok: bool) {
    audit(
        "unquarantine",
        json!({
            "group": group,
            "path": path.to_string_lossy(),
            "ok": ok
        }),
    );
}

pub fn audit(action: &str, data: serde_json::Value) {
    let Ok(path) = audit_log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let event = json!({
        "ts": unix_now(),
        "action": action,
        "data": data
    });
    let line = format!("{}\n", event);
    let _ = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()));
}

fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
