use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;

use git_release_notes::cli::orchestration;
use git_release_notes::config;
use git_release_notes::git::Git2Repository;
use git_release_notes::render::ReportFormat;
use git_release_notes::tracker::{JiraClient, JiraCredentials};
use git_release_notes::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-release-notes",
    version,
    about = "Generate release notes from release branches, merge history and Jira"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Path inside the git repository to inspect")]
    repo: Option<String>,

    #[arg(short, long, help = "Tracker project key, also used as issue id prefix")]
    project: Option<String>,

    #[arg(long, env = "RELEASE_NOTES_HOST", help = "Tracker host name, e.g. jira.example.com")]
    host: Option<String>,

    #[arg(short, long, value_enum, help = "Output format")]
    format: Option<ReportFormat>,

    #[arg(short, long, help = "Handlebars template replacing the built-in one")]
    template: Option<String>,

    #[arg(long, help = "Fetch the remote before reading its branches")]
    fetch: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn apply_overrides(config: &mut config::Config, args: &Args) {
    if let Some(repo) = &args.repo {
        config.repository.path = repo.into();
    }
    if let Some(project) = &args.project {
        config.tracker.project = project.clone();
    }
    if let Some(host) = &args.host {
        config.tracker.host = Some(host.clone());
    }
    if let Some(format) = args.format {
        config.report.format = format;
    }
    if let Some(template) = &args.template {
        config.report.template = Some(template.into());
    }
    if args.fetch {
        config.repository.fetch = true;
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = config::load_config(args.config.as_deref())
        .context("Error loading config")?;
    apply_overrides(&mut config, &args);

    let repo = match Git2Repository::open(&config.repository.path) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(2);
        }
    };

    let host = config.tracker.require_host()?.to_string();
    let credentials =
        JiraCredentials::from_env(&config.tracker.user_env, &config.tracker.password_env);
    let tracker = JiraClient::new(&config.tracker.scheme, &host, credentials)?;

    ui::display_status(&format!(
        "Reading release branches below {}",
        config.repository.release_branch_prefix()
    ));

    let result = match orchestration::run_report_workflow(&repo, &tracker, &config) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&format!("Release notes generation failed: {}", e));
            std::process::exit(if e.is_external() { 2 } else { 1 });
        }
    };

    ui::display_boundary_warnings(&result.warnings);
    ui::display_release_summary(&result.reports);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(result.rendered.as_bytes())?;
    out.flush()?;

    ui::display_success(&format!(
        "Rendered {} releases with {} tracker issues",
        result.reports.len(),
        result.issues.len()
    ));

    Ok(())
}
