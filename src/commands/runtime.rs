use crate::*;
use std::path::PathBuf;

pub fn handle_runtime_commands(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let console = Console::new(config.output.color);
    let (artifacts, skipped) = match &cli.command {
        Commands::Casks { casks_file } => {
            let casks_file = casks_file
                .clone()
                .unwrap_or_else(|| config.homebrew.casks_file.clone());
            resolve_from_casks(cli, config, console, &casks_file)?
        }
        Commands::Scan { group, apps, bins } => (scan_artifacts(group, apps, bins), Vec::new()),
        Commands::Doctor { .. } => return Ok(()),
    };

    let tools = CommandTools::new(config.tools.clone());

    if cli.json {
        let report = classify(&tools, &artifacts);
        print_json(report.rejected_count() == 0, report_out(&report, &skipped))?;
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    let audit = config.logging.audit;
    let summary = review_and_remediate(
        &tools,
        &artifacts,
        &skipped,
        console,
        &mut input,
        &mut out,
        &mut |group, attempt| {
            if audit {
                audit_unquarantine(group, &attempt.path, attempt.ok);
            }
        },
    )?;

    let failed = summary.failed_paths();
    if !failed.is_empty() {
        for f in &failed {
            tracing::warn!(name = %f.name, path = %f.path.display(), "quarantine attribute still present");
        }
        std::process::exit(1);
    }
    Ok(())
}

fn resolve_from_casks(
    cli: &Cli,
    config: &Config,
    console: Console,
    casks_file: &std::path::Path,
) -> anyhow::Result<(Vec<Artifact>, Vec<String>)> {
    if !config.homebrew.brew.exists() {
        return Err(ResolveError::BrewMissing(config.homebrew.brew.clone()).into());
    }
    let names = load_cask_names(casks_file)?;

    if !cli.json {
        let file_name = casks_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| casks_file.display().to_string());
        console.info(&format!(
            "Found {} casks in {}: {}",
            names.len(),
            file_name,
            names.join(" ")
        ));
        println!();
        console.info("Querying Homebrew…");
    }

    let info = query_brew_info(&config.homebrew.brew, &names)?;
    let locator = Locator::from_config(&config.homebrew, &config.locations);
    Ok(resolve_casks(&info, &locator))
}

/// Artifacts named on the command line; apps must be directories.
fn scan_artifacts(group: &str, apps: &[PathBuf], bins: &[PathBuf]) -> Vec<Artifact> {
    let named = |p: &PathBuf| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| p.display().to_string())
    };
    let apps = apps.iter().map(|p| {
        let found = p.is_dir().then(|| p.clone());
        Artifact::new(group, named(p), ArtifactKind::Application, found)
    });
    let bins = bins.iter().map(|p| {
        let found = p.exists().then(|| p.clone());
        Artifact::new(group, named(p), ArtifactKind::Executable, found)
    });
    apps.chain(bins).collect()
}

#[cfg(test)]
mod tests {
    use super::scan_artifacts;
    use crate::ArtifactKind;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn scan_marks_missing_paths_not_found() {
        let tmp = TempDir::new().unwrap();
        let app = tmp.path().join("Foo.app");
        std::fs::create_dir_all(&app).unwrap();
        let not_a_bundle = tmp.path().join("Bar.app");
        std::fs::write(&not_a_bundle, "").unwrap();
        let tool = tmp.path().join("tool");
        std::fs::write(&tool, "").unwrap();

        let artifacts = scan_artifacts(
            "custom",
            &[app.clone(), not_a_bundle],
            &[tool.clone(), PathBuf::from("/nonexistent/gone")],
        );
        let summary: Vec<(&str, ArtifactKind, Option<PathBuf>)> = artifacts
            .iter()
            .map(|a| (a.name.as_str(), a.kind, a.resolved_path.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Foo.app", ArtifactKind::Application, Some(app)),
                ("Bar.app", ArtifactKind::Application, None),
                ("tool", ArtifactKind::Executable, Some(tool)),
                ("gone", ArtifactKind::Executable, None),
            ]
        );
        assert!(artifacts.iter().all(|a| a.group == "custom"));
    }
}
