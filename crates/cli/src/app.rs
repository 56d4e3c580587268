use crate::cli::Cli;
use crate::{hook, output};
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use skillsync_discovery::{scan_repository, ScanOptions};
use skillsync_state::{expand_home, home_dir, load_settings, resolve_repo_root, Settings};
use skillsync_sync::{in_scope, HostOs, PlatformRegistry, SyncOrchestrator, SyncParams};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

/// The main entry point for the `skillsync` application.
///
/// Usage errors and fatal preconditions exit with 1; `--help` and
/// `--version` exit with 0.
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = u8::from(err.use_stderr());
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    match execute(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(1)
        }
    }
}

fn platform_overrides(settings: &Settings, home: &Path) -> BTreeMap<String, PathBuf> {
    settings
        .platforms
        .iter()
        .filter_map(|(key, platform)| {
            platform
                .target
                .as_ref()
                .map(|target| (key.clone(), expand_home(target, home)))
        })
        .collect()
}

fn execute(cli: Cli) -> Result<ExitCode> {
    let settings = load_settings()?;
    let repo = resolve_repo_root(cli.repo.as_deref())?;
    debug!(repo = %repo.display(), "Resolved skills repository");

    if cli.install_hook {
        let exe = std::env::current_exe().context("cannot locate the running executable")?;
        let exe = exe.canonicalize().unwrap_or(exe);
        let path = hook::install_post_merge_hook(&repo, &exe)?;
        println!("Installed post-merge hook at {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let options = ScanOptions::with_exclude(settings.exclude.iter().cloned());
    let skills = scan_repository(&repo, &options)
        .with_context(|| "cannot enumerate skills; nothing was synchronized")?;

    let home = home_dir()?;
    debug!(home = %home.display(), skills = skills.len(), "Building platform registry");
    let registry = PlatformRegistry::new(&home, HostOs::current())
        .with_overrides(&platform_overrides(&settings, &home))
        .context("invalid platform override in config")?;

    let params = SyncParams {
        dry_run: cli.dry_run,
        platform: cli.platform,
    };
    let orchestrator = SyncOrchestrator::new(&registry, &skills);
    let detections = orchestrator.detect(&params);

    if cli.list {
        output::print_listing(&repo, &skills, &detections);
        return Ok(ExitCode::SUCCESS);
    }

    if !cli.json {
        output::print_header(&repo, skills.len(), params.dry_run);
        if in_scope(&detections).is_empty() {
            output::print_no_platforms(&detections);
            return Ok(ExitCode::SUCCESS);
        }
    }

    let summary = orchestrator.sync(&params, |report| {
        if !cli.json {
            output::print_platform(report);
        }
    });

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        output::print_summary(&summary);
    }
    Ok(ExitCode::from(summary.exit_code()))
}
