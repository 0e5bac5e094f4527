use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use habitat_planner::{load_dragons, load_habitats, write_grouping_report, write_placement_report, Ranking};

#[derive(Parser)]
#[command(name = "habitat-planner")]
#[command(about = "Sort dragons by their best habitat and fit them into the habitats you own")]
#[command(version)]
struct Cli {
    #[arg(long, default_value = "dragons.csv", help = "Dragon sheet (Dragon Name, Level, Stars, Type(s))")]
    dragons: PathBuf,

    #[arg(long, default_value = "habitats.csv", help = "Habitat sheet (Habitat, Level, Quantity, Available Spaces)")]
    habitats: PathBuf,

    #[arg(long, default_value = "sorted_dragons.txt", help = "Where to write the grouping report")]
    sorted_output: PathBuf,

    #[arg(long, default_value = "organized_habitats.txt", help = "Where to write the placement report")]
    organized_output: PathBuf,

    #[arg(long, value_name = "PATH", help = "JSON ranking config (defaults to the built-in ranking)")]
    ranking: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let ranking = match &cli.ranking {
        Some(path) => Ranking::from_file(path)
            .with_context(|| format!("Failed to load ranking: {}", path.display()))?,
        None => Ranking::with_defaults(),
    };

    let dragons = load_dragons(&cli.dragons)
        .with_context(|| format!("Failed to load dragons: {}", cli.dragons.display()))?;
    let habitats = load_habitats(&cli.habitats)
        .with_context(|| format!("Failed to load habitats: {}", cli.habitats.display()))?;

    write_grouping_report(&cli.sorted_output, &dragons, &ranking)
        .with_context(|| format!("Failed to write {}", cli.sorted_output.display()))?;
    write_placement_report(&cli.organized_output, &dragons, &habitats, &ranking)
        .with_context(|| format!("Failed to write {}", cli.organized_output.display()))?;

    Ok(())
}
