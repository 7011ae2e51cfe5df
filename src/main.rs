//! swatch: representative block colors from texture archives.
//!
//! CLI entry point; parses arguments, sets up logging and dispatches to the
//! subcommands.

mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use exn::ResultExt;
use swatch_config::Config;
use swatch_library::Palette;
use swatch_world::{BLOCKS_PER_REGION, World};
use tracing_subscriber::EnvFilter;

use crate::error::{ErrorKind, Result};

#[derive(Debug, Parser)]
#[command(name = "swatch", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Ignored if
    /// RUST_LOG is set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (TOML, YAML or JSON).
    #[arg(short, long, env = "SWATCH_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reconcile the archive with the color snapshot and summarize the result.
    Load {
        /// Texture archive, overriding the configured one.
        #[arg(long)]
        archive: Option<PathBuf>,
        /// Snapshot file, overriding the configured one.
        #[arg(long)]
        cache: Option<PathBuf>,
    },
    /// Print the representative color of an asset.
    Color {
        id: u32,
        #[arg(default_value_t = 0)]
        meta: u32,
    },
    /// List the region files of a world and the area they cover.
    Regions {
        /// World save directory, overriding the configured one.
        world: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    match cli.command {
        Command::Load { archive, cache } => {
            if let Some(archive) = archive {
                config.archive = archive;
            }
            if cache.is_some() {
                config.cache = cache;
            }
            load(&config)
        },
        Command::Color { id, meta } => color(&config, id, meta),
        Command::Regions { world } => regions(world.or(config.world)),
    }
}

fn load(config: &Config) -> Result<()> {
    let mut palette = Palette::from_config(config);
    let report = palette.load().or_raise(|| ErrorKind::Palette)?;
    println!("{}: {} colors ({report})", palette.archive_path().display(), palette.store().len());
    for failure in &report.failures {
        println!("  failed: {}: {}", failure.name, *failure.error);
    }
    for name in &report.skipped {
        println!("  skipped: {name}");
    }
    Ok(())
}

fn color(config: &Config, id: u32, meta: u32) -> Result<()> {
    let mut palette = Palette::from_config(config);
    palette.load().or_raise(|| ErrorKind::Palette)?;
    let color = palette.color_of(id, meta);
    if color.is_unknown() {
        println!("{id}:{meta} {color} (unknown)");
    } else {
        println!("{id}:{meta} {color} {}", color.to_hsv());
    }
    Ok(())
}

fn regions(world: Option<PathBuf>) -> Result<()> {
    let Some(root) = world else {
        exn::bail!(ErrorKind::NoWorld);
    };
    let world = World::open(&root).or_raise(|| ErrorKind::World)?;
    for (coord, path) in world.regions() {
        println!("{coord}\t{}", path.display());
    }
    match world.extent() {
        Some(extent) => println!(
            "{} regions spanning {}..={} ({}x{} regions, {}x{} blocks at {BLOCKS_PER_REGION} per region)",
            world.len(),
            extent.min,
            extent.max,
            extent.width_regions(),
            extent.depth_regions(),
            extent.width_blocks(),
            extent.depth_blocks(),
        ),
        None => println!("no regions in {}", root.display()),
    }
    Ok(())
}
