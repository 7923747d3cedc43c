use crate::domain::constants::{DEFAULT_BREW, DEFAULT_BREW_PREFIX, DEFAULT_CASKS_FILE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    #[serde(rename = "app")]
    Application,
    #[serde(rename = "binary")]
    Executable,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Application => f.write_str("app"),
            ArtifactKind::Executable => f.write_str("binary"),
        }
    }
}

/// An application bundle or standalone binary under evaluation.
///
/// `resolved_path` is `None` when the artifact could not be located; such
/// artifacts always land in the not-found bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub group: String,
    pub name: String,
    pub kind: ArtifactKind,
    pub resolved_path: Option<PathBuf>,
}

impl Artifact {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        kind: ArtifactKind,
        resolved_path: Option<PathBuf>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            kind,
            resolved_path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub artifact: Artifact,
    pub path: PathBuf,
}

impl ResolvedArtifact {
    /// File name of the resolved path, falling back to the declared name.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.artifact.name.clone())
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.display_name(), self.artifact.kind)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupReport {
    pub clean: Vec<ResolvedArtifact>,
    pub rejected: Vec<ResolvedArtifact>,
    pub not_found: Vec<String>,
}

impl GroupReport {
    pub fn needs_attention(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Per-group reports, iterated in the order each group was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedReport {
    groups: Vec<(String, GroupReport)>,
    index: HashMap<String, usize>,
}

impl ClassifiedReport {
    pub fn entry(&mut self, group: &str) -> &mut GroupReport {
        let pos = match self.index.get(group) {
            Some(pos) => *pos,
            None => {
                self.groups.push((group.to_string(), GroupReport::default()));
                let pos = self.groups.len() - 1;
                self.index.insert(group.to_string(), pos);
                pos
            }
        };
        &mut self.groups[pos].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupReport)> {
        self.groups.iter().map(|(g, r)| (g.as_str(), r))
    }

    pub fn rejected_count(&self) -> usize {
        self.groups.iter().map(|(_, r)| r.rejected.len()).sum()
    }
}

#[cfg(test)]
impl ClassifiedReport {
    pub fn get(&self, group: &str) -> Option<&GroupReport> {
        self.index.get(group).map(|pos| &self.groups[*pos].1)
    }

    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|(g, _)| g.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOutcome {
    pub name: String,
    pub path: PathBuf,
    pub ok: bool,
}

/// Where a group ended up after the review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupDisposition {
    Clear,
    Remediated(Vec<PathOutcome>),
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOutcome {
    pub group: String,
    pub disposition: GroupDisposition,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewSummary {
    pub groups: Vec<GroupOutcome>,
}

impl ReviewSummary {
    pub fn remediated(&self) -> usize {
        self.groups
            .iter()
            .filter(|g| matches!(g.disposition, GroupDisposition::Remediated(_)))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.groups
            .iter()
            .filter(|g| g.disposition == GroupDisposition::Skipped)
            .count()
    }

    pub fn failed_paths(&self) -> Vec<&PathOutcome> {
        self.groups
            .iter()
            .filter_map(|g| match &g.disposition {
                GroupDisposition::Remediated(outcomes) => Some(outcomes),
                _ => None,
            })
            .flatten()
            .filter(|o| !o.ok)
            .collect()
    }
}

#[derive(Serialize)]
pub struct ArtifactEntry {
    pub name: String,
    pub kind: ArtifactKind,
    pub path: String,
}

#[derive(Serialize)]
pub struct GroupEntry {
    pub group: String,
    pub status: String,
    pub clean: Vec<ArtifactEntry>,
    pub rejected: Vec<ArtifactEntry>,
    pub not_found: Vec<String>,
}

#[derive(Serialize)]
pub struct ReportOut {
    pub groups: Vec<GroupEntry>,
    pub skipped: Vec<String>,
}

#[derive(Serialize)]
pub struct CheckItem {
    pub name: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct DoctorReport {
    pub overall: String,
    pub checks: Vec<CheckItem>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub homebrew: HomebrewConfig,
    #[serde(default)]
    pub locations: LocationsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ToolsConfig {
    pub xattr: String,
    pub spctl: String,
    pub file: String,
    /// Privilege wrapper for attribute removal; empty runs `xattr` directly.
    pub elevate: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            xattr: "xattr".to_string(),
            spctl: "spctl".to_string(),
            file: "file".to_string(),
            elevate: "sudo".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HomebrewConfig {
    pub brew: PathBuf,
    pub prefix: PathBuf,
    pub casks_file: PathBuf,
}

impl Default for HomebrewConfig {
    fn default() -> Self {
        Self {
            brew: PathBuf::from(DEFAULT_BREW),
            prefix: PathBuf::from(DEFAULT_BREW_PREFIX),
            casks_file: PathBuf::from(DEFAULT_CASKS_FILE),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LocationsConfig {
    pub app_dirs: Vec<String>,
}

impl Default for LocationsConfig {
    fn default() -> Self {
        Self {
            app_dirs: vec!["/Applications".to_string(), "~/Applications".to_string()],
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub audit: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            audit: true,
        }
    }
}
