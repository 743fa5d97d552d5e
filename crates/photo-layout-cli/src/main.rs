use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use photo_layout_core::presets::{PAGE_PRESETS, PHOTO_SIZE_PRESETS, page_preset};
use photo_layout_core::{
    LayoutConfig, LayoutEngine, MarginConfig, PageGeometry, PhotoSpec, Resolution, StrategyKind,
    to_json,
};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "photo-layout",
    about = "Arrange repeated photo prints on a page",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute a layout for a job file and print placements as JSON
    Layout(LayoutArgs),
    /// Run every strategy on a job file and print a one-line summary each
    Compare(CompareArgs),
    /// List built-in page and photo size presets
    Presets,
}

#[derive(Parser, Debug, Clone)]
struct LayoutArgs {
    /// Job file (.json, .yaml or .yml)
    #[arg(help_heading = "Input/Output")]
    job: PathBuf,
    /// Write JSON here instead of stdout
    #[arg(short, long, help_heading = "Input/Output")]
    output: Option<PathBuf>,
    /// Job file format: json | yaml (default: from extension)
    #[arg(long, value_parser = ["json", "yaml"], help_heading = "Input/Output")]
    format: Option<String>,
    /// Strategy: grid | compact | adaptive (overrides the job file)
    #[arg(long, help_heading = "Layout")]
    strategy: Option<String>,
    /// Reject invalid photo specs instead of laying out what fits
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    strict: bool,
}

#[derive(Parser, Debug, Clone)]
struct CompareArgs {
    /// Job file (.json, .yaml or .yml)
    job: PathBuf,
    /// Job file format: json | yaml (default: from extension)
    #[arg(long, value_parser = ["json", "yaml"])]
    format: Option<String>,
}

/// Page given either by preset name or by explicit size.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PageSpec {
    Preset { preset: String },
    Custom { width_mm: f64, height_mm: f64 },
}

#[derive(Debug, Clone, Deserialize)]
struct Job {
    page: PageSpec,
    #[serde(default)]
    margin: Option<MarginConfig>,
    #[serde(default)]
    photos: Vec<PhotoSpec>,
    #[serde(default)]
    strategy: Option<String>,
    #[serde(default)]
    dpi: Option<f64>,
}

impl Job {
    /// Resolves the page and margin; a preset page without an explicit
    /// margin uses the preset's default gap.
    fn geometry(&self, resolution: Resolution) -> anyhow::Result<(PageGeometry, MarginConfig)> {
        match &self.page {
            PageSpec::Preset { preset } => {
                let p = page_preset(preset)?;
                let margin = self.margin.unwrap_or_else(|| p.default_margin());
                Ok((p.geometry(resolution), margin))
            }
            PageSpec::Custom {
                width_mm,
                height_mm,
            } => {
                let page = PageGeometry::new(*width_mm, *height_mm).with_resolution(resolution);
                Ok((page, self.margin.unwrap_or_default()))
            }
        }
    }

    fn config(&self, strategy_override: Option<&str>) -> anyhow::Result<LayoutConfig> {
        let mut builder = LayoutConfig::builder();
        if let Some(dpi) = self.dpi {
            builder = builder.dpi(dpi);
        }
        if let Some(name) = strategy_override.or(self.strategy.as_deref()) {
            builder = builder.strategy(name.parse::<StrategyKind>()?);
        }
        let cfg = builder.build();
        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Layout(args) => run_layout(args),
        Commands::Compare(args) => run_compare(args),
        Commands::Presets => {
            print_presets();
            Ok(())
        }
    }
}

fn run_layout(args: &LayoutArgs) -> anyhow::Result<()> {
    let job = load_job(&args.job, args.format.as_deref())?;
    let cfg = job.config(args.strategy.as_deref())?;
    let engine = LayoutEngine::new(cfg)?;
    let (page, margin) = job.geometry(engine.resolution())?;
    page.validate()?;

    for spec in &job.photos {
        if let Err(e) = spec.validate() {
            if args.strict {
                return Err(e).context("invalid photo spec (--strict)");
            }
            warn!(error = %e, "laying out invalid photo spec anyway");
        }
    }

    let run = engine.run(&page, &margin, &job.photos);
    info!(
        strategy = %run.strategy,
        placed = run.result.total_placed(),
        requested = run.report.requested_total,
        "layout complete"
    );
    for p in run.report.photos.iter().filter(|p| p.unplaced() > 0) {
        warn!(
            photo_id = %p.photo_id,
            placed = p.placed,
            requested = p.requested,
            "photo does not fully fit"
        );
    }

    let text = serde_json::to_string_pretty(&to_json(&run))?;
    match &args.output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "wrote layout");
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn run_compare(args: &CompareArgs) -> anyhow::Result<()> {
    let job = load_job(&args.job, args.format.as_deref())?;
    let cfg = job.config(None)?;
    let mut engine = LayoutEngine::new(cfg)?;
    let (page, margin) = job.geometry(engine.resolution())?;
    page.validate()?;

    for kind in StrategyKind::ALL {
        engine.select(kind);
        let start = Instant::now();
        let run = engine.run(&page, &margin, &job.photos);
        let dur = start.elapsed();
        println!(
            "{:<9} placed={}/{} occupancy={:.2}% time={}",
            kind.name(),
            run.result.total_placed(),
            run.report.requested_total,
            run.stats().occupancy * 100.0,
            fmt_dur(dur)
        );
    }
    Ok(())
}

fn print_presets() {
    let res = Resolution::default();
    println!("Pages:");
    for p in PAGE_PRESETS {
        println!(
            "  {:<15} {:>5}x{:<5} mm  {:>4}x{:<4} px  gap {} mm  ({})",
            p.name,
            p.width_mm,
            p.height_mm,
            res.mm_to_px(p.width_mm),
            res.mm_to_px(p.height_mm),
            p.default_margin_mm,
            p.description
        );
    }
    println!("Photo sizes:");
    for p in PHOTO_SIZE_PRESETS {
        println!(
            "  {:<15} {:>5}x{:<5} mm  {:>4}x{:<4} px  ({})",
            p.name,
            p.width_mm,
            p.height_mm,
            res.mm_to_px(p.width_mm),
            res.mm_to_px(p.height_mm),
            p.description
        );
    }
    println!("Strategies:");
    for kind in StrategyKind::ALL {
        println!("  {:<15} {}", kind.name(), kind.description());
    }
}

fn load_job(path: &Path, format: Option<&str>) -> anyhow::Result<Job> {
    let text = fs::read_to_string(path).with_context(|| format!("read job {}", path.display()))?;
    let format = match format {
        Some(f) => f.to_string(),
        None => match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => "yaml".into(),
            Some("json") => "json".into(),
            Some(other) => bail!("unknown job file extension '.{}'; pass --format", other),
            None => bail!("job file has no extension; pass --format"),
        },
    };
    let job: Job = match format.as_str() {
        "yaml" => serde_yaml::from_str(&text)
            .with_context(|| format!("parse YAML job {}", path.display()))?,
        _ => serde_json::from_str(&text)
            .with_context(|| format!("parse JSON job {}", path.display()))?,
    };
    info!(photos = job.photos.len(), "loaded job");
    Ok(job)
}

fn fmt_dur(d: Duration) -> String {
    let ms = d.as_secs_f64() * 1000.0;
    if ms < 1.0 {
        format!("{:.1}µs", ms * 1000.0)
    } else {
        format!("{:.2}ms", ms)
    }
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
