//! Folio CLI
//!
//! Command-line harness for the portfolio gallery: inspect the project
//! catalog, write a default configuration, preview the headline typewriter,
//! and replay scripted gesture sessions against the carousel.

mod config;
mod replay;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_content::{
    CaseStudyView, Catalog, DetailRoute, SectionKind, Typewriter, TypewriterTimings,
};
use tracing_subscriber::EnvFilter;

use crate::config::{FolioConfig, CONFIG_FILE};
use crate::replay::{Replay, Script};

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Folio gallery tooling", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a folio.toml with every default spelled out
    Init {
        /// Directory to write into
        #[arg(long, default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// List the projects in gallery order
    Projects {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one project by id or slug
    Show {
        /// Project id or slug
        reference: String,

        /// Print one case study section (problem, solutions, results)
        #[arg(long)]
        section: Option<SectionKind>,
    },

    /// Replay a scripted gesture session, printing one JSON line per step
    Replay {
        /// Script file (TOML)
        script: PathBuf,

        /// Config file or directory containing folio.toml
        #[arg(short, long, default_value = ".")]
        config: PathBuf,

        /// Sleep for real between steps instead of advancing a virtual clock
        #[arg(long)]
        realtime: bool,
    },

    /// Print the about page headline as it types
    Headline {
        /// Config file or directory containing folio.toml
        #[arg(short, long, default_value = ".")]
        config: PathBuf,

        /// Stop after this much virtual time
        #[arg(long, default_value = "10000")]
        until_ms: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Init { path, force } => cmd_init(&path, force),
        Commands::Projects { json } => cmd_projects(json),
        Commands::Show { reference, section } => cmd_show(&reference, section),
        Commands::Replay {
            script,
            config,
            realtime,
        } => cmd_replay(&script, &config, realtime),
        Commands::Headline { config, until_ms } => cmd_headline(&config, until_ms),
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    let target = path.join(CONFIG_FILE);
    if target.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            target.display()
        );
    }

    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    fs::write(&target, FolioConfig::default().to_toml()?)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    tracing::info!("Wrote {}", target.display());
    println!("Created {}", target.display());
    Ok(())
}

fn cmd_projects(json: bool) -> Result<()> {
    let catalog = Catalog::builtin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        serde_json::to_writer_pretty(&mut out, catalog.projects())
            .context("Failed to serialize catalog")?;
        writeln!(out)?;
        return Ok(());
    }

    for project in catalog.projects() {
        writeln!(
            out,
            "{:>3}  {:<16} {}",
            project.id, project.slug, project.title
        )?;
    }
    Ok(())
}

fn cmd_show(reference: &str, section: Option<SectionKind>) -> Result<()> {
    let catalog = Catalog::builtin();
    let project = catalog.resolve(reference)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(kind) = section {
        let study = project
            .case_study
            .as_ref()
            .with_context(|| format!("{} has no case study", project.slug))?;
        if study.section(kind).is_none() {
            anyhow::bail!("{} has no {kind} section", project.slug);
        }
        let mut view = CaseStudyView::new(study).context("Case study has no sections")?;
        view.select(kind);

        writeln!(out, "{}", study.title)?;
        for tab in view.tabs() {
            let marker = if tab.active { ">" } else { " " };
            writeln!(out, "{marker} {}", tab.label)?;
        }
        writeln!(out)?;
        writeln!(out, "{}", view.active_section().body)?;
        return Ok(());
    }
    serde_json::to_writer_pretty(&mut out, project).context("Failed to serialize project")?;
    writeln!(out)?;
    writeln!(out, "route: {}", DetailRoute::new(project.id, None).to_path())?;
    Ok(())
}

fn cmd_replay(script_path: &Path, config_path: &Path, realtime: bool) -> Result<()> {
    let config = FolioConfig::load_or_default(config_path)?;
    let script = Script::load(script_path)?;
    tracing::info!(steps = script.steps.len(), realtime, "Replaying {}", script_path.display());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let (steps, replay) = if realtime {
        let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
        let mut replay = Replay::realtime(config.carousel)?;
        let steps = runtime.block_on(replay.run_realtime(&script, &mut out))?;
        (steps, replay)
    } else {
        let mut replay = Replay::manual(config.carousel, 0.0)?;
        let steps = replay.run(&script, &mut out)?;
        (steps, replay)
    };

    tracing::debug!(
        steps,
        selected = replay.carousel().selected_index(),
        "replay finished"
    );
    Ok(())
}

fn cmd_headline(config_path: &Path, until_ms: u32) -> Result<()> {
    let config = FolioConfig::load_or_default(config_path)?;
    let mut typewriter = Typewriter::new(config.site.headline, TypewriterTimings::default(), 0.0)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let until = until_ms as f64;

    while let Some(at) = typewriter.next_deadline() {
        if at > until {
            break;
        }
        if typewriter.tick(at) {
            let cursor = if typewriter.cursor_visible(at) { "|" } else { " " };
            writeln!(out, "{at:>8.0}ms  {}{cursor}", typewriter.text())?;
        }
    }
    Ok(())
}
