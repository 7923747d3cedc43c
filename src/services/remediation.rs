//! Interactive review: render the grouped report, then offer one
//! unquarantine prompt per group that has rejected artifacts.
//!
//! `on_attempt` sees every removal as soon as it has run, so callers can
//! record it even if a later write fails.

use crate::domain::models::{
    Artifact, GroupDisposition, GroupOutcome, GroupReport, PathOutcome, ReviewSummary,
};
use crate::services::output::{Console, Tag, INDENT};
use crate::services::report::classify;
use crate::services::tools::SystemTools;
use std::io::{BufRead, Write};

pub fn review_and_remediate<R: BufRead, W: Write>(
    tools: &dyn SystemTools,
    artifacts: &[Artifact],
    skipped: &[String],
    console: Console,
    input: &mut R,
    out: &mut W,
    on_attempt: &mut dyn FnMut(&str, &PathOutcome),
) -> anyhow::Result<ReviewSummary> {
    let report = classify(tools, artifacts);

    writeln!(out)?;
    if !skipped.is_empty() {
        console.write(out, Tag::Info, &format!("{} item(s) skipped:", skipped.len()))?;
        for entry in skipped {
            writeln!(out, "{INDENT}- {entry}")?;
        }
        writeln!(out)?;
    }

    let mut summary = ReviewSummary::default();
    for (group, result) in report.iter() {
        render_group(console, out, group, result)?;
        let disposition = if result.needs_attention() {
            offer_remediation(tools, console, input, out, group, result, on_attempt)?
        } else {
            GroupDisposition::Clear
        };
        summary.groups.push(GroupOutcome {
            group: group.to_string(),
            disposition,
        });
    }

    writeln!(out)?;
    console.write(
        out,
        Tag::Ok,
        &format!(
            "Done! {} group(s) checked, {} remediated, {} skipped",
            summary.groups.len(),
            summary.remediated(),
            summary.skipped()
        ),
    )?;
    Ok(summary)
}

fn render_group<W: Write>(
    console: Console,
    out: &mut W,
    group: &str,
    result: &GroupReport,
) -> std::io::Result<()> {
    let tag = if result.needs_attention() {
        Tag::Attention
    } else {
        Tag::Ok
    };
    console.write(out, tag, &console.bold(group))?;
    for r in &result.clean {
        writeln!(out, "{INDENT}✓ {}", r.label())?;
    }
    for r in &result.rejected {
        writeln!(out, "{INDENT}✗ {}", r.label())?;
    }
    for name in &result.not_found {
        writeln!(out, "{INDENT}? {name} (not found)")?;
    }
    Ok(())
}

fn offer_remediation<R: BufRead, W: Write>(
    tools: &dyn SystemTools,
    console: Console,
    input: &mut R,
    out: &mut W,
    group: &str,
    result: &GroupReport,
    on_attempt: &mut dyn FnMut(&str, &PathOutcome),
) -> anyhow::Result<GroupDisposition> {
    let labels: Vec<String> = result.rejected.iter().map(|r| r.label()).collect();
    write!(out, "{INDENT}Unquarantine {}? [y/N]: ", labels.join(", "))?;
    out.flush()?;

    if !confirmed(input)? {
        console.write(out, Tag::Warn, &format!("Skipped {group}"))?;
        return Ok(GroupDisposition::Skipped);
    }

    let mut outcomes = Vec::new();
    for r in &result.rejected {
        let name = r.display_name();
        let ok = match tools.remove_quarantine(&r.path) {
            Ok(o) => o.success,
            Err(e) => {
                tracing::warn!(path = %r.path.display(), error = %e, "unquarantine failed");
                false
            }
        };
        if ok {
            console.write(out, Tag::Ok, &format!("Unquarantined {name}"))?;
        } else {
            console.write(out, Tag::Err, &format!("Failed to unquarantine {name}"))?;
        }
        let outcome = PathOutcome {
            name,
            path: r.path.clone(),
            ok,
        };
        on_attempt(group, &outcome);
        outcomes.push(outcome);
    }
    Ok(GroupDisposition::Remediated(outcomes))
}

/// Reads one answer; only `y` (any case) accepts. End of input and
/// undecodable bytes decline.
fn confirmed<R: BufRead>(input: &mut R) -> std::io::Result<bool> {
    let mut line = Vec::new();
    if input.read_until(b'\n', &mut line)? == 0 {
        return Ok(false);
    }
    Ok(String::from_utf8_lossy(&line).trim().eq_ignore_ascii_case("y"))
}
