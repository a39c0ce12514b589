use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thumbsync::config::RunConfig;
use thumbsync::imaging::RustBackend;
use thumbsync::run::Runner;
use thumbsync::{config, output};

#[derive(Parser)]
#[command(name = "thumbsync")]
#[command(about = "Keep a directory of thumbnails in sync with a size configuration")]
#[command(long_about = "\
Keep a directory of thumbnails in sync with a size configuration.

Derivatives are written next to their originals as <stem>-<suffix>.<ext>.
Repeated runs are idempotent: existing derivatives are skipped (unless
--rewrite), and derivatives whose suffix is no longer configured are
deleted (unless --keep-stale).

Sizes come from thumbsync.toml. Run 'thumbsync gen-config' to print a
documented starting point.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = "thumbsync.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Flags shared by run and plan, overriding the config file.
#[derive(clap::Args, Clone)]
struct RunArgs {
    /// Working directory (overrides the config file)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Regenerate derivatives that already exist
    #[arg(long)]
    rewrite: bool,

    /// Keep derivatives whose suffix is no longer configured
    #[arg(long)]
    keep_stale: bool,

    /// Do not walk subdirectories
    #[arg(long)]
    flat: bool,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Scan, reconcile, and generate thumbnails
    Run(RunArgs),
    /// Show what a run would do without touching any file
    Plan(RunArgs),
    /// Print a documented stock thumbsync.toml
    GenConfig,
}

fn load_config(cli: &Cli, args: &RunArgs) -> Result<RunConfig, Box<dyn std::error::Error>> {
    let mut config = RunConfig::load(&cli.config)?;
    if let Some(dir) = &args.dir {
        config.dir = dir.clone();
    }
    if args.rewrite {
        config.enable_rewrite = true;
    }
    if args.keep_stale {
        config.delete_non_actual_sizes = false;
    }
    if args.flat {
        config.recursive = false;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Run(args) => {
            let config = load_config(&cli, args)?;
            let runner = Runner::new(config, RustBackend::new())?;
            let report = runner.run()?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_report(&report);
            }
            if report.failed() > 0 {
                std::process::exit(1);
            }
        }
        Command::Plan(args) => {
            let config = load_config(&cli, args)?;
            let runner = Runner::new(config, RustBackend::new())?;
            let plan = runner.plan()?;
            if args.json {
                let value = serde_json::json!({
                    "deletions": plan.deletions,
                    "generations": plan.generations.iter().map(|g| {
                        serde_json::json!({
                            "source": g.source,
                            "suffix": g.suffix,
                            "output": g.output,
                        })
                    }).collect::<Vec<_>>(),
                    "skips": plan.skips.iter().map(|g| g.output.clone()).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                output::print_plan(&plan);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
