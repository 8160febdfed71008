use anyhow::{Context, ensure};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use minegrid_core::{GameConfig, Sampler};

const ROW_RANGE: std::ops::RangeInclusive<u8> = 5..=30;
const COL_RANGE: std::ops::RangeInclusive<u8> = 5..=40;
const SAMPLE_RANGE: std::ops::RangeInclusive<usize> = 10..=5000;

/// Batch board-statistics report: samples many freshly generated boards and
/// prints the aggregate bundle as JSON.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Board rows (5-30)
    #[arg(long, default_value_t = 9)]
    rows: u8,

    /// Board columns (5-40)
    #[arg(long, default_value_t = 9)]
    cols: u8,

    /// Mines per board
    #[arg(long, default_value_t = 10)]
    mines: u16,

    /// Boards to sample (10-5000)
    #[arg(long, default_value_t = 100)]
    samples: usize,

    /// Fixed seed for a reproducible batch
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .init();

    ensure!(
        ROW_RANGE.contains(&cli.rows),
        "rows must be between {} and {}",
        ROW_RANGE.start(),
        ROW_RANGE.end()
    );
    ensure!(
        COL_RANGE.contains(&cli.cols),
        "cols must be between {} and {}",
        COL_RANGE.start(),
        COL_RANGE.end()
    );
    ensure!(
        SAMPLE_RANGE.contains(&cli.samples),
        "samples must be between {} and {}",
        SAMPLE_RANGE.start(),
        SAMPLE_RANGE.end()
    );

    let config = GameConfig::new(cli.rows, cli.cols, cli.mines).with_context(|| {
        format!(
            "invalid board configuration: {}x{} with {} mines",
            cli.rows, cli.cols, cli.mines
        )
    })?;

    log::info!(
        "sampling {} boards at {}x{} with {} mines",
        cli.samples,
        config.rows,
        config.cols,
        config.mines
    );

    let mut sampler = Sampler::new(config, cli.samples);
    if let Some(seed) = cli.seed {
        sampler = sampler.seed(seed);
    }
    let stats = sampler.run().context("sample batch failed")?;

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
