use crate::domain::models::{
    Artifact, ArtifactEntry, ClassifiedReport, GroupEntry, ReportOut, ResolvedArtifact,
};
use crate::services::tools::SystemTools;
use crate::services::verdict::is_rejected;

/// Sorts artifacts into per-group clean/rejected/not-found buckets.
///
/// Groups keep the order in which they first appear and every artifact lands
/// in exactly one bucket, in input order.
pub fn classify(tools: &dyn SystemTools, artifacts: &[Artifact]) -> ClassifiedReport {
    let mut report = ClassifiedReport::default();
    for artifact in artifacts {
        let bucket = report.entry(&artifact.group);
        match &artifact.resolved_path {
            None => bucket.not_found.push(artifact.name.clone()),
            Some(path) => {
                let resolved = ResolvedArtifact {
                    artifact: artifact.clone(),
                    path: path.clone(),
                };
                if is_rejected(tools, artifact) {
                    bucket.rejected.push(resolved);
                } else {
                    bucket.clean.push(resolved);
                }
            }
        }
    }
    report
}

pub fn report_out(report: &ClassifiedReport, skipped: &[String]) -> ReportOut {
    let entry = |r: &ResolvedArtifact| ArtifactEntry {
        name: r.display_name(),
        kind: r.artifact.kind,
        path: r.path.to_string_lossy().to_string(),
    };
    ReportOut {
        groups: report
            .iter()
            .map(|(group, r)| GroupEntry {
                group: group.to_string(),
                status: if r.needs_attention() {
                    "needs_attention"
                } else {
                    "ok"
                }
                .to_string(),
                clean: r.clean.iter().map(entry).collect(),
                rejected: r.rejected.iter().map(entry).collect(),
                not_found: r.not_found.clone(),
            })
            .collect(),
        skipped: skipped.to_vec(),
    }
}
