use crate::audit::{
    AuditEngine, AuditReport, AuditSession, Device, ProfileRegistry, ProgressNarrator,
    RandomJitter, SnapshotInspector,
};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "Inclusive Audit",
    about = "Score captured pages against disability-focused accessibility profiles",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List the accessibility profiles an audit can run under
    Profiles,
    /// Audit a captured page snapshot under one profile
    Audit(AuditArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct AuditArgs {
    /// Profile key, e.g. `blind` or `photosensitive`
    #[arg(long)]
    pub(crate) profile: String,
    /// Device context recorded on the report (desktop or mobile)
    #[arg(long, default_value = "desktop")]
    pub(crate) device: Device,
    /// Page facts snapshot in JSON
    #[arg(long)]
    pub(crate) facts: PathBuf,
    /// Show progress steps on stderr while the audit runs
    #[arg(long)]
    pub(crate) narrate: bool,
    /// Print the report as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Profiles => {
            render_profiles(&ProfileRegistry::standard());
            Ok(())
        }
        Command::Audit(args) => run_audit(args).await,
    }
}

pub(crate) async fn run_audit(args: AuditArgs) -> Result<(), AppError> {
    let AuditArgs {
        profile,
        device,
        facts,
        narrate,
        json,
    } = args;

    let config = AppConfig::load()?;
    let registry = ProfileRegistry::standard();
    registry.get_profile(&profile)?;

    let inspector = SnapshotInspector::from_path(&facts).await?;
    let session = AuditSession::new(
        Arc::new(inspector),
        AuditEngine::new(registry, config.audit),
    );

    let audit = session.run_audit(&profile, device);
    let report = if narrate {
        ProgressNarrator::for_profile(&profile)
            .narrate(
                config.audit.narrator_cadence,
                &mut RandomJitter,
                audit,
                |update| eprintln!("[{:>3}%] {}", update.progress, update.step),
            )
            .await?
    } else {
        audit.await?
    };

    if json {
        let rendered = serde_json::to_string_pretty(report.as_ref())
            .map_err(|err| AppError::Io(err.into()))?;
        println!("{rendered}");
    } else {
        render_report(&report);
    }

    Ok(())
}

fn render_profiles(registry: &ProfileRegistry) {
    println!("Accessibility profiles");
    for profile in registry.list_profiles() {
        println!(
            "  {:<15} {:<10} {}",
            profile.id.as_str(),
            profile.category.label(),
            profile.name
        );
        println!("      {}", profile.description);
    }
}

fn render_report(report: &AuditReport) {
    println!(
        "{} audit ({}) at {}",
        report.profile_name(),
        report.device(),
        report.timestamp().to_rfc3339()
    );

    if let Some(reason) = report.failure_reason() {
        println!("Audit failed: {reason}");
        return;
    }

    let band = report.overall_band();
    println!("Overall score: {} ({})", report.overall_score(), band.label());

    println!("\nDimensions");
    for (dimension, score, band) in report.dimension_bands() {
        println!("  {:<22} {:>3}  {}", dimension, score, band.label());
    }

    println!("\nMetrics");
    for metric in report.metrics() {
        println!(
            "  {:<24} {:<12} {}",
            metric.name,
            metric.value.to_string(),
            metric.status.label()
        );
    }

    if report.diagnostics().is_empty() {
        println!("\nNo issues found.");
    } else {
        println!("\nDiagnostics");
        for diagnostic in report.diagnostics() {
            println!(
                "  [{}] {}: {}",
                diagnostic.kind.label(),
                diagnostic.title,
                diagnostic.detail
            );
        }
    }
}
