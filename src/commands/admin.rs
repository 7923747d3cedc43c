use crate::*;

pub fn handle_admin_commands(cli: &Cli, config: &Config) -> anyhow::Result<bool> {
    let Commands::Doctor { casks_file } = &cli.command else {
        return Ok(false);
    };

    let casks_file = casks_file
        .clone()
        .unwrap_or_else(|| config.homebrew.casks_file.clone());
    let report = run_doctor(config, &casks_file);
    if cli.json {
        print_json(report.overall == "ok", report)?;
    } else {
        println!("doctor: {}", report.overall);
        for c in report.checks {
            println!("{}\t{}", c.name, c.status);
        }
    }

    Ok(true)
}
