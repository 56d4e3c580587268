//! Human-readable report rendering.

use colored::Colorize;
use skillsync_discovery::Skill;
use skillsync_sync::{Detection, LinkAction, LinkEvent, PlatformKey, PlatformReport, RunSummary};
use std::path::Path;

pub(crate) fn print_header(repo: &Path, skills: usize, dry_run: bool) {
    println!(
        "{} {} ({} skill{})",
        "Skills repository:".bold(),
        repo.display(),
        skills,
        if skills == 1 { "" } else { "s" }
    );
    if dry_run {
        println!("{}", "Dry run: no changes will be made.".yellow());
    }
}

fn event_line(event: &LinkEvent, dry_run: bool) -> String {
    let text = event.description(dry_run);
    match &event.action {
        LinkAction::AlreadySynced => format!("  {} {}", "✓".green(), text.dimmed()),
        LinkAction::Created { .. } => format!("  {} {}", "+".green().bold(), text),
        LinkAction::Updated { .. } => format!("  {} {}", "↻".yellow().bold(), text),
        LinkAction::Pruned { .. } => format!("  {} {}", "-".cyan().bold(), text),
        LinkAction::Conflict { .. } | LinkAction::Failed { .. } => {
            format!("  {} {}", "✗".red().bold(), text.red())
        }
    }
}

/// Report lines for one platform: header, events, then any platform error.
fn platform_lines(report: &PlatformReport) -> Vec<String> {
    let mut lines = vec![format!(
        "\n{} {}",
        format!("[{}]", report.platform).bold().blue(),
        report.target_root.display()
    )];
    if report.root_created {
        let verb = if report.dry_run {
            "would make directory"
        } else {
            "made directory"
        };
        lines.push(format!("  {} {}", verb.dimmed(), report.target_root.display()));
    }
    for event in &report.events {
        lines.push(event_line(event, report.dry_run));
        if let Some(guidance) = event.guidance() {
            lines.push(format!("      {}", guidance.yellow()));
        }
    }
    if let Some(error) = &report.error {
        lines.push(format!("  {} {}", "✗".red().bold(), error.red()));
    }
    lines
}

pub(crate) fn print_platform(report: &PlatformReport) {
    for line in platform_lines(report) {
        println!("{line}");
    }
}

pub(crate) fn print_summary(summary: &RunSummary) {
    println!();
    print!("{}", summary.format_summary());
    if summary.conflicted > 0 {
        eprintln!(
            "\n{} {} path(s) are occupied by files or directories that are not symlinks.",
            "Conflicts:".red().bold(),
            summary.conflicted
        );
        eprintln!("Remove each path listed above manually, then run skillsync again.");
    }
    if summary.failed > 0 || summary.platform_errors > 0 {
        eprintln!(
            "\n{} some entries or platforms could not be processed; check the paths above.",
            "Errors:".red().bold()
        );
    }
    if summary.success() {
        let msg = if summary.dry_run {
            "Dry run complete."
        } else {
            "All platforms in sync."
        };
        println!("\n{}", msg.green());
    }
}

pub(crate) fn print_no_platforms(detections: &[Detection]) {
    println!("\n{}", "No platforms detected.".yellow().bold());
    for detection in detections {
        println!(
            "  {:<9} {} ({})",
            detection.platform.key.as_str(),
            detection.platform.target_root.display(),
            detection.status.label()
        );
    }
    println!(
        "Install one of the platforms above, or force one with --platform <{}>.",
        PlatformKey::supported().replace(", ", "|")
    );
}

pub(crate) fn print_listing(repo: &Path, skills: &[Skill], detections: &[Detection]) {
    print_header(repo, skills.len(), false);
    for skill in skills {
        if skill.has_valid_name() {
            println!("  {} {}", "•".green(), skill.name);
        } else {
            println!(
                "  {} {} {}",
                "•".yellow(),
                skill.name,
                "(name is not lowercase hyphen-case; the validator will reject it)".yellow()
            );
        }
    }
    println!("\n{}", "Platforms:".bold());
    for detection in detections {
        let status = if detection.status.in_scope() {
            detection.status.label().green()
        } else {
            detection.status.label().dimmed()
        };
        println!(
            "  {:<9} {} ({})",
            detection.platform.key.as_str(),
            detection.platform.target_root.display(),
            status
        );
    }
}
