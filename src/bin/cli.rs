//! Skillport CLI
//!
//! Command-line interface for installing skills into AI assistants.

use clap::{Parser, Subcommand};
use console::style;
use skillport::config::{
    apply_env_overrides, config_to_toml, load_config, load_config_from_path, validate_config,
    InstallerConfig,
};
use skillport::detect::{detect_all, AssistantStatus};
use skillport::pipeline::{ArtifactEvent, ArtifactOutcome, Pipeline, ProgressObserver, RunReport};
use skillport::skills::parse_document;
use skillport::targets::{TargetId, TargetRegistry};
use skillport::VERSION;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "skillport",
    version = VERSION,
    about = "Skillport - install skills into AI coding assistants",
    long_about = None
)]
struct Cli {
    /// Project root (assistant directories are created here)
    #[arg(long, global = true, env = "SKILLPORT_PROJECT_ROOT")]
    root: Option<PathBuf>,

    /// Skills source directory
    #[arg(long, global = true, env = "SKILLPORT_SOURCE_DIR")]
    source: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true, env = "SKILLPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate skills for detected (or named) assistants
    Install {
        /// Targets to install: opencode, claude, cursor
        targets: Vec<String>,
        /// Install for every supported assistant
        #[arg(long)]
        all: bool,
        /// Install even if the assistant was not detected
        #[arg(long, short)]
        force: bool,
        /// Show what would be written without writing
        #[arg(long)]
        dry_run: bool,
        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Regenerate skills for assistants that already have output
    Update {
        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which assistants are installed
    Detect,

    /// List discovered skills
    List,

    /// Remove generated skills
    Clean {
        /// Targets to clean (default: all)
        targets: Vec<String>,
    },

    /// Validate the configuration
    Validate,

    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let directive = if cli.quiet { "skillport=warn" } else { "skillport=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = build_config(&cli)?;

    let success = match cli.command {
        Commands::Install {
            targets,
            all,
            force,
            dry_run,
            json,
        } => install(&config, &targets, all, force, dry_run, json, cli.quiet).await?,
        Commands::Update { json } => update(&config, json, cli.quiet).await?,
        Commands::Detect => detect(&config).await?,
        Commands::List => list(&config)?,
        Commands::Clean { targets } => clean(&config, &targets)?,
        Commands::Validate => validate(&config),
        Commands::Config => {
            print!("{}", config_to_toml(&config)?);
            true
        }
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

/// Resolve configuration: file, then environment, then command-line flags
fn build_config(cli: &Cli) -> anyhow::Result<InstallerConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = load_config_from_path(path)?;
            apply_env_overrides(&mut config);
            config
        }
        None => load_config(cli.root.as_deref())?,
    };

    if let Some(root) = &cli.root {
        config.paths.project_root = Some(root.clone());
    }
    if config.paths.project_root.is_none() {
        config.paths.project_root = Some(std::env::current_dir()?);
    }
    if let Some(source) = &cli.source {
        config.paths.source_dir = Some(source.clone());
    }

    Ok(config)
}

fn parse_targets(names: &[String]) -> anyhow::Result<Vec<TargetId>> {
    Ok(names
        .iter()
        .map(|name| name.parse::<TargetId>())
        .collect::<Result<Vec<_>, _>>()?)
}

// ============================================================================
// Commands
// ============================================================================

async fn install(
    config: &InstallerConfig,
    names: &[String],
    all: bool,
    force: bool,
    dry_run: bool,
    json: bool,
    quiet: bool,
) -> anyhow::Result<bool> {
    let pipeline = Pipeline::new(config)?.dry_run(dry_run);
    let statuses = detect_all(pipeline.registry(), &config.project_root()).await;
    if !json && !quiet {
        print_detection(&statuses);
    }

    let targets = if all {
        TargetId::ALL.to_vec()
    } else if names.is_empty() {
        statuses
            .iter()
            .filter(|s| s.is_detected())
            .map(|s| s.id)
            .collect()
    } else {
        let requested = parse_targets(names)?;
        for id in &requested {
            let detected = statuses.iter().any(|s| s.id == *id && s.is_detected());
            if !detected && !force {
                anyhow::bail!(
                    "{} was not detected (no binary on PATH and no .{} directory); use --force to install anyway",
                    id,
                    id
                );
            }
        }
        requested
    };

    if targets.is_empty() {
        println!(
            "{} No assistants detected. Name targets explicitly or use --all.",
            style("⚠").yellow()
        );
        return Ok(true);
    }

    let report = run_pipeline(pipeline, targets, json || quiet).await?;
    print_report(&report, config, json)
}

async fn update(config: &InstallerConfig, json: bool, quiet: bool) -> anyhow::Result<bool> {
    let pipeline = Pipeline::new(config)?;
    let root = config.project_root();

    let targets: Vec<TargetId> = pipeline
        .registry()
        .iter()
        .filter(|profile| root.join(profile.output_dir()).is_dir())
        .map(|profile| profile.id)
        .collect();

    if targets.is_empty() {
        println!(
            "{} Nothing to update: no generated skills found in {}",
            style("ℹ").blue(),
            root.display()
        );
        return Ok(true);
    }

    info!("Updating {} targets", targets.len());
    let report = run_pipeline(pipeline, targets, json || quiet).await?;
    print_report(&report, config, json)
}

async fn detect(config: &InstallerConfig) -> anyhow::Result<bool> {
    let registry = TargetRegistry::builtin(&config.project);
    let statuses = detect_all(&registry, &config.project_root()).await;
    print_detection(&statuses);
    Ok(true)
}

fn list(config: &InstallerConfig) -> anyhow::Result<bool> {
    let pipeline = Pipeline::new(config)?;
    let documents = pipeline.discover()?;

    println!(
        "\n{} {} skills in {}\n",
        style("📚").bold(),
        documents.len(),
        pipeline.source_dir().display()
    );

    let mut success = true;
    for document in &documents {
        match parse_document(document) {
            Ok(skill) => {
                let keys: Vec<&str> = skill.sections.keys().collect();
                println!(
                    "  {} {}  {}",
                    style(skill.slug()).cyan().bold(),
                    style(&skill.title).dim(),
                    style(document.relative_display()).dim()
                );
                println!("      └─ sections: {}", keys.join(", "));
            }
            Err(e) => {
                success = false;
                println!("  {} {}: {}", style("✗").red(), document.relative_display(), e);
            }
        }
    }
    println!();
    Ok(success)
}

fn clean(config: &InstallerConfig, names: &[String]) -> anyhow::Result<bool> {
    let targets = if names.is_empty() {
        TargetId::ALL.to_vec()
    } else {
        parse_targets(names)?
    };
    let registry = TargetRegistry::builtin(&config.project);
    let root = config.project_root();

    for id in targets {
        let profile = registry.get(id);
        let dir = root.join(profile.output_dir());
        if dir.is_dir() {
            std::fs::remove_dir_all(&dir)?;
            info!("Removed {}", dir.display());
            println!("  {} {} {}", style("✓").green(), profile.emoji, dir.display());
        } else {
            println!(
                "  {} {} nothing to clean",
                style("○").dim(),
                profile.name
            );
        }
    }
    Ok(true)
}

fn validate(config: &InstallerConfig) -> bool {
    let result = validate_config(config);

    for issue in &result.errors {
        println!("  {} {}: {}", style("✗").red(), issue.path, issue.message);
        if let Some(suggestion) = &issue.suggestion {
            println!("      └─ {}", style(suggestion).dim());
        }
    }
    for issue in &result.warnings {
        println!("  {} {}: {}", style("⚠").yellow(), issue.path, issue.message);
        if let Some(suggestion) = &issue.suggestion {
            println!("      └─ {}", style(suggestion).dim());
        }
    }

    if result.valid {
        println!("{} Configuration is valid", style("✓").green());
    } else {
        println!("{} Configuration has {} errors", style("✗").red(), result.errors.len());
    }
    result.valid
}

// ============================================================================
// Pipeline execution and output
// ============================================================================

/// Prints one line per generated file
struct ConsoleObserver {
    silent: bool,
}

impl ProgressObserver for ConsoleObserver {
    fn on_artifact(&self, event: ArtifactEvent<'_>) {
        if self.silent {
            return;
        }
        let counter = format!("[{}/{}]", event.index + 1, event.total);
        match event.outcome {
            ArtifactOutcome::Written(path) => println!(
                "  {} {} {} {}",
                style("✓").green(),
                style(counter).dim(),
                event.target,
                path.display()
            ),
            ArtifactOutcome::Planned(path) => println!(
                "  {} {} {} {}",
                style("○").dim(),
                style(counter).dim(),
                event.target,
                path.display()
            ),
            ArtifactOutcome::Failed(failure) => println!(
                "  {} {} {} {}: {}",
                style("✗").red(),
                style(counter).dim(),
                event.target,
                failure.document,
                failure.message
            ),
        }
    }
}

/// Run the pipeline off the async runtime; Ctrl-C stops it between skills
async fn run_pipeline(
    pipeline: Pipeline,
    targets: Vec<TargetId>,
    silent: bool,
) -> anyhow::Result<RunReport> {
    let cancel = Arc::new(AtomicBool::new(false));
    let pipeline = pipeline.with_cancel_flag(cancel.clone());

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current skill");
            cancel.store(true, Ordering::SeqCst);
        }
    });

    let generated_at = chrono::Local::now().naive_local();
    let report = tokio::task::spawn_blocking(move || {
        pipeline.run_with_observer(&targets, generated_at, &ConsoleObserver { silent })
    })
    .await??;

    interrupt.abort();
    Ok(report)
}

fn print_report(report: &RunReport, config: &InstallerConfig, json: bool) -> anyhow::Result<bool> {
    let success = !report.has_failures() && !report.cancelled;

    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(success);
    }

    let registry = TargetRegistry::builtin(&config.project);
    println!();
    for target in &report.targets {
        let profile = registry.get(target.target);
        let verb = if report.dry_run { "planned" } else { "written" };
        let count = format!("{}/{} {}", target.succeeded(), target.discovered, verb);
        let count = if target.failed() == 0 {
            style(count).green()
        } else {
            style(count).yellow()
        };
        println!("  {} {:<12} {}", profile.emoji, profile.name, count);
        for failure in &target.failures {
            println!(
                "      └─ {} {} ({})",
                style("✗").red(),
                failure.document,
                failure.kind
            );
        }
    }

    if report.cancelled {
        println!("\n{} Run cancelled", style("⚠").yellow());
    } else if report.dry_run {
        println!("\n{} Dry run: nothing was written", style("ℹ").blue());
    } else if success {
        println!("\n{} Skills installed", style("✅").bold());
    }
    Ok(success)
}

fn print_detection(statuses: &[AssistantStatus]) {
    println!();
    println!("{}", style("🔍 Assistants").cyan().bold());
    println!("{}", "─".repeat(60));
    for status in statuses {
        println!(
            "  {} {:<13} {} {:<14} binary {}  config {}  {}",
            status.emoji,
            status.name,
            status.status_icon(),
            status.status_text(),
            if status.binary_found { style("✓").green() } else { style("✗").red() },
            if status.config_exists { style("✓").green() } else { style("✗").red() },
            status.version.as_deref().unwrap_or("—")
        );
    }
    println!("{}", "─".repeat(60));
    println!();
}
