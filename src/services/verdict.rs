use crate::domain::constants::{APP_BUNDLE_EXTENSION, MACHO_MARKER};
use crate::domain::models::{Artifact, ArtifactKind};
use crate::services::quarantine::{has_quarantine_marker, is_approval_blocked};
use crate::services::tools::SystemTools;
use std::path::Path;

/// Whether macOS will refuse to launch the artifact because of quarantine.
///
/// Artifacts without a resolved path are never rejected; the report puts
/// them in the not-found bucket instead.
pub fn is_rejected(tools: &dyn SystemTools, artifact: &Artifact) -> bool {
    let Some(path) = artifact.resolved_path.as_deref() else {
        return false;
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| artifact.name.clone());
    tracing::info!(name = %name, kind = %artifact.kind, "checking artifact");

    match artifact.kind {
        ArtifactKind::Application => application_rejected(tools, path),
        ArtifactKind::Executable => executable_rejected(tools, path),
    }
}

/// Blocked flags reject outright. Otherwise a failed Gatekeeper assessment
/// only counts when the quarantine marker is present; without it the denial
/// has some other cause (e.g. a missing signature).
fn application_rejected(tools: &dyn SystemTools, path: &Path) -> bool {
    if is_approval_blocked(tools, path) {
        return true;
    }
    let allowed = match tools.assess_execute(path) {
        Ok(out) => out.success,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "gatekeeper assessment failed");
            false
        }
    };
    if allowed {
        return false;
    }
    has_quarantine_marker(tools, path)
}

/// Only real Mach-O binaries outside any `.app` bundle are considered;
/// binaries inside a bundle are covered by the bundle's own assessment.
fn executable_rejected(tools: &dyn SystemTools, path: &Path) -> bool {
    if !is_macho(tools, path) {
        return false;
    }
    if resolves_into_app_bundle(path) {
        return false;
    }
    has_quarantine_marker(tools, path)
}

fn is_macho(tools: &dyn SystemTools, path: &Path) -> bool {
    match tools.describe_file(path) {
        Ok(out) => out.stdout.contains(MACHO_MARKER),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "file probe failed");
            false
        }
    }
}

pub fn resolves_into_app_bundle(path: &Path) -> bool {
    let real = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    real.ancestors()
        .skip(1)
        .any(|p| p.extension().is_some_and(|ext| ext == APP_BUNDLE_EXTENSION))
}
