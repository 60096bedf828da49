use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use gesture_snake::config::SessionConfig;
use gesture_snake::gesture::LandmarkFeed;
use gesture_snake::input::InputSource;
use gesture_snake::modes::PlayMode;

#[derive(Parser)]
#[command(name = "gesture_snake")]
#[command(version, about = "Snake steered by keyboard or hand gestures")]
struct Cli {
    /// Where swipe gestures come from (the keyboard always works)
    #[arg(long, value_enum, default_value = "keyboard")]
    input: InputSource,

    /// JSON-lines landmark stream written by a hand tracker (file or FIFO)
    #[arg(long, value_name = "PATH")]
    landmarks: Option<PathBuf>,

    /// JSON session config; flags below override its values
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Per-frame movement ignored as hand tremor, in pixels
    #[arg(long)]
    threshold: Option<u32>,

    /// Milliseconds per game step
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Write logs to this file (the terminal belongs to the game)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

impl Cli {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => SessionConfig::default(),
        };

        if let Some(width) = self.width {
            config.game.grid_width = width;
        }
        if let Some(height) = self.height {
            config.game.grid_height = height;
        }
        if let Some(threshold) = self.threshold {
            config.classifier.movement_threshold = threshold;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_millis = tick_ms;
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.session_config()?;

    let feed = match (cli.input, &cli.landmarks) {
        (InputSource::Landmarks, Some(path)) => Some(
            LandmarkFeed::open(path)
                .await
                .with_context(|| format!("Failed to open landmark stream {:?}", path))?,
        ),
        (InputSource::Landmarks, None) => bail!("--input landmarks requires --landmarks <PATH>"),
        (_, Some(_)) => bail!("--landmarks is only used with --input landmarks"),
        (_, None) => None,
    };

    let mut play_mode = PlayMode::new(&config, cli.input, feed)?;
    play_mode.run().await?;

    Ok(())
}
