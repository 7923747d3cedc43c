//! Homebrew cask resolution: cask list → `brew info` → artifacts on disk.

use crate::domain::models::{Artifact, ArtifactKind, HomebrewConfig, LocationsConfig};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    #[error("Homebrew not found at {0}")]
    BrewMissing(PathBuf),
    #[error("Cask list not found at {0}")]
    CaskListMissing(PathBuf),
    #[error("No cask names found in {0}")]
    NoCasks(PathBuf),
    #[error("Failed to query brew info. Are all casks available?")]
    BrewQueryFailed,
}

#[derive(Debug, Deserialize)]
pub struct BrewInfo {
    #[serde(default)]
    pub casks: Vec<BrewCask>,
}

#[derive(Debug, Deserialize)]
pub struct BrewCask {
    pub token: String,
    #[serde(default)]
    pub artifacts: Vec<Value>,
}

/// Extracts cask names from a nix cask list, accepting both
/// `"cask-name"` entries and `{ name = "cask-name"; ... }` attribute sets.
pub fn parse_cask_names(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    for line in text.lines() {
        let l = line.trim();
        if l.starts_with('#') {
            continue;
        }
        if let Some(name) = attr_name(l) {
            names.push(name.to_string());
            continue;
        }
        if let Some(name) = l.strip_prefix('"').and_then(quoted) {
            names.push(name.to_string());
        }
    }
    names
}

/// Value of the first `name = "<value>"` on the line.
fn attr_name(line: &str) -> Option<&str> {
    let mut rest = line;
    while let Some(pos) = rest.find("name") {
        let after = rest[pos + 4..].trim_start();
        if let Some(value) = after.strip_prefix('=') {
            if let Some(name) = value.trim_start().strip_prefix('"').and_then(quoted) {
                return Some(name);
            }
        }
        rest = &rest[pos + 4..];
    }
    None
}

/// Non-empty text up to the closing quote.
fn quoted(s: &str) -> Option<&str> {
    let end = s.find('"')?;
    (end > 0).then(|| &s[..end])
}

pub fn load_cask_names(casks_file: &Path) -> anyhow::Result<Vec<String>> {
    if !casks_file.exists() {
        return Err(ResolveError::CaskListMissing(casks_file.to_path_buf()).into());
    }
    let names = parse_cask_names(&std::fs::read_to_string(casks_file)?);
    if names.is_empty() {
        return Err(ResolveError::NoCasks(casks_file.to_path_buf()).into());
    }
    Ok(names)
}

pub fn query_brew_info(brew: &Path, names: &[String]) -> anyhow::Result<BrewInfo> {
    if !brew.exists() {
        return Err(ResolveError::BrewMissing(brew.to_path_buf()).into());
    }
    tracing::debug!(brew = %brew.display(), count = names.len(), "querying brew info");
    let out = Command::new(brew)
        .args(["info", "--cask", "--json=v2"])
        .args(names)
        .output()?;
    if !out.status.success() {
        tracing::debug!(stderr = %String::from_utf8_lossy(&out.stderr), "brew info failed");
        return Err(ResolveError::BrewQueryFailed.into());
    }
    Ok(serde_json::from_slice(&out.stdout)?)
}

/// Where installed apps and linked binaries are looked up.
#[derive(Debug, Clone)]
pub struct Locator {
    pub app_dirs: Vec<PathBuf>,
    pub bin_dir: PathBuf,
}

impl Locator {
    pub fn from_config(homebrew: &HomebrewConfig, locations: &LocationsConfig) -> Self {
        Self {
            app_dirs: locations.app_dirs.iter().map(|d| expand_home(d)).collect(),
            bin_dir: homebrew.prefix.join("bin"),
        }
    }

    pub fn find_app(&self, name: &str) -> Option<PathBuf> {
        self.app_dirs
            .iter()
            .map(|base| base.join(name))
            .find(|candidate| candidate.is_dir())
    }

    pub fn find_binary(&self, name: &str) -> Option<PathBuf> {
        let candidate = self.bin_dir.join(name);
        candidate.exists().then_some(candidate)
    }
}

pub fn expand_home(dir: &str) -> PathBuf {
    match dir.strip_prefix("~/") {
        Some(rest) => match std::env::var("HOME") {
            Ok(home) => PathBuf::from(home).join(rest),
            Err(_) => PathBuf::from(dir),
        },
        None => PathBuf::from(dir),
    }
}

/// Turns `brew info` output into artifacts plus descriptions of skipped casks.
///
/// Casks installed through a `pkg` installer are skipped whole.
pub fn resolve_casks(info: &BrewInfo, locator: &Locator) -> (Vec<Artifact>, Vec<String>) {
    let mut artifacts = Vec::new();
    let mut skipped = Vec::new();

    for cask in &info.casks {
        let has_pkg = cask
            .artifacts
            .iter()
            .filter_map(Value::as_object)
            .any(|a| a.contains_key("pkg"));
        if has_pkg {
            skipped.push(format!("{} (pkg-installed)", cask.token));
            continue;
        }

        for entry in &cask.artifacts {
            for app in stanza(entry, "app") {
                if let Some(name) = app_name(app) {
                    let path = locator.find_app(&name);
                    artifacts.push(Artifact::new(&cask.token, name, ArtifactKind::Application, path));
                }
            }
            let binaries = stanza(entry, "binary");
            let has_target = binaries.iter().any(|b| b.get("target").is_some());
            for binary in binaries {
                // `[source, {"target": ...}]` describes one link, named by the target.
                if has_target && binary.is_string() {
                    continue;
                }
                if let Some(name) = binary_name(binary) {
                    let path = locator.find_binary(&name);
                    artifacts.push(Artifact::new(&cask.token, name, ArtifactKind::Executable, path));
                }
            }
        }
    }

    (artifacts, skipped)
}

fn stanza<'a>(entry: &'a Value, key: &str) -> &'a [Value] {
    entry
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn app_name(v: &Value) -> Option<String> {
    let name = match v {
        Value::String(s) => s.as_str(),
        Value::Object(o) => o
            .get("target")
            .or_else(|| o.get("app"))
            .and_then(Value::as_str)
            .unwrap_or(""),
        _ => "",
    };
    (!name.is_empty()).then(|| name.to_string())
}

/// Binaries are linked into `<prefix>/bin` under their file name, so a
/// source path such as `$APPDIR/Foo.app/Contents/MacOS/foo` becomes `foo`.
fn binary_name(v: &Value) -> Option<String> {
    let name = match v {
        Value::String(s) => Path::new(s)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        Value::Object(o) => o
            .get("target")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        _ => String::new(),
    };
    (!name.is_empty()).then_some(name)
}
