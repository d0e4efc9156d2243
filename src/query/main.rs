//! Query CLI for the population grid.
//!
//! Loads the static datasets once and answers point-score and ranking
//! queries; the map front end owns everything visual, this binary only
//! prints what it would render.

mod palette;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use popgrid::dataset;
use popgrid::lookup::{top_k, DensityIndex};
use popgrid::models::GeoPoint;

use palette::color_for_density;

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "Population grid queries")]
struct Args {
    /// Population grid GeoJSON file
    #[arg(long, default_value = "data/pop_grid.json")]
    grid: PathBuf,

    /// Facilities JSON file
    #[arg(long, default_value = "data/facilities.json")]
    facilities: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Density score at a point
    Score {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
    },
    /// The K densest cells, as representative points
    Best {
        #[arg(short, default_value_t = 3)]
        k: usize,
    },
    /// List facility markers
    Facilities,
    /// List grid cells with their fill colors
    Cells,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Score { lat, lon } => {
            let index = load_index(&args.grid)?;
            let score = index.score_at(GeoPoint::new(lat, lon));
            println!("{score}");
        }
        Command::Best { k } => {
            let index = load_index(&args.grid)?;
            let ranked = top_k(index.cells(), k);
            for (rank, loc) in ranked.iter().enumerate() {
                println!(
                    "#{} ({:.5}, {:.5}) density {}",
                    rank + 1,
                    loc.point.lat,
                    loc.point.lon,
                    loc.density
                );
            }
        }
        Command::Facilities => {
            let facilities = dataset::load_facilities(&args.facilities)
                .context("loading facilities dataset")?;
            for f in &facilities {
                let pos = f.position();
                println!("{} [{}] ({:.5}, {:.5})", f.name, f.kind, pos.lat, pos.lon);
            }
        }
        Command::Cells => {
            let index = load_index(&args.grid)?;
            for cell in index.cells() {
                let density = cell.density.unwrap_or(0.0);
                println!(
                    "cell {}: density {} fill {} ({} ring points)",
                    cell.dataset_index,
                    density,
                    color_for_density(density),
                    cell.ring().0.len()
                );
            }
        }
    }

    Ok(())
}

fn load_index(grid: &Path) -> Result<DensityIndex> {
    let cells = dataset::load_grid(grid).context("loading population grid")?;
    let index = DensityIndex::build(cells);
    info!("grid ready: {} cells indexed", index.len());
    Ok(index)
}
