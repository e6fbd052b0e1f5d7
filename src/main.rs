use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{BoardSize, GameConfig};
use grid_snake::modes::HumanMode;
use grid_snake::persistence::{FileStore, HighScoreStore, MemoryStore};
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Classic snake on a grid, in the terminal")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in pixels
    #[arg(long)]
    board_width: Option<u32>,

    /// Board height in pixels
    #[arg(long)]
    board_height: Option<u32>,

    /// Size the board to the terminal instead of a fixed pixel size
    #[arg(long, conflicts_with_all = ["board_width", "board_height"])]
    fit_terminal: bool,

    /// Pixels per grid cell
    #[arg(long)]
    cell_scale: Option<u32>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where to keep the high score (defaults to the platform data directory)
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Keep the high score in memory only
    #[arg(long, conflicts_with = "high_score_file")]
    no_persist: bool,

    /// Log file; the terminal itself is taken by the game
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
        }
    }
}

impl Cli {
    /// File config (or defaults) with command line overrides applied
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if self.fit_terminal {
            config.board = None;
        } else if self.board_width.is_some() || self.board_height.is_some() {
            let current = config.board.unwrap_or(BoardSize::square(480));
            config.board = Some(BoardSize::new(
                self.board_width.unwrap_or(current.width),
                self.board_height.unwrap_or(current.height),
            ));
        }
        if let Some(cell_scale) = self.cell_scale {
            config.cell_scale = cell_scale;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    fn high_score_store(&self) -> Result<Box<dyn HighScoreStore>> {
        if self.no_persist {
            return Ok(Box::new(MemoryStore::new()));
        }

        let store = match &self.high_score_file {
            Some(path) => FileStore::new(path),
            None => FileStore::default_location()
                .context("Failed to locate the high score file")?,
        };
        info!("High score file: {:?}", store.path());
        Ok(Box::new(store))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = cli.game_config().context("Invalid configuration")?;
    info!("Starting grid_snake with {:?}", config);

    let store = cli.high_score_store()?;

    let mut human_mode = HumanMode::new(config, store)?;
    human_mode.run().await?;

    info!("Bye");
    Ok(())
}
