use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use ether_config::{ConfigLoad, ConfigLoader};
use ether_core::{
    CardId, CardState, CarouselSnapshot, Rect, Row, SceneController,
    SceneEvent, Timeline,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "etherctl",
    about = "Lay out and scroll Ether carousels, printing JSON snapshots"
)]
struct Cli {
    /// Settings file (TOML or JSON); overrides ETHER_SCENE_CONFIG_PATH
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize a row with generated cards and print its snapshot
    Layout {
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Initialize a row, scroll it and print the settled snapshot
    Scroll {
        #[command(flatten)]
        scene: SceneArgs,
        /// Steps to scroll; positive scrolls left (focus moves to the
        /// right-hand neighbour), negative scrolls right
        #[arg(long, allow_negative_numbers = true)]
        steps: i64,
    },
    /// Print the effective scene settings and where they came from
    Config,
}

#[derive(clap::Args)]
struct SceneArgs {
    /// Number of generated cards
    #[arg(long)]
    cards: usize,
    #[arg(long, default_value_t = 1920.0)]
    width: f32,
    #[arg(long, default_value_t = 1080.0)]
    height: f32,
    #[arg(long, value_enum, default_value = "top")]
    row: RowArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum RowArg {
    Top,
    Bottom,
}

impl From<RowArg> for Row {
    fn from(val: RowArg) -> Self {
        match val {
            RowArg::Top => Row::Top,
            RowArg::Bottom => Row::Bottom,
        }
    }
}

#[derive(Serialize)]
struct CardReport {
    card: CardId,
    state: CardState,
}

#[derive(Serialize)]
struct SceneReport {
    row: Row,
    settings_source: String,
    snapshot: CarouselSnapshot,
    events: Vec<SceneEvent>,
    cards: Vec<CardReport>,
}

#[derive(Serialize)]
struct ConfigReport<'a> {
    source: String,
    env_file_loaded: bool,
    warnings: Vec<String>,
    settings: &'a ether_config::SceneSettings,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut loader = ConfigLoader::new().with_env_file(&cli.env_file);
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let load = loader.load().context("failed to load scene settings")?;

    match cli.command {
        Command::Layout { scene } => {
            let report = run_scene(&load, &scene, 0)?;
            print_json(&report)
        }
        Command::Scroll { scene, steps } => {
            let report = run_scene(&load, &scene, steps)?;
            print_json(&report)
        }
        Command::Config => {
            let report = ConfigReport {
                source: load.source.to_string(),
                env_file_loaded: load.env_file_loaded,
                warnings: load
                    .warnings
                    .items
                    .iter()
                    .map(|w| match &w.hint {
                        Some(hint) => format!("{} ({hint})", w.message),
                        None => w.message.clone(),
                    })
                    .collect(),
                settings: &load.settings,
            };
            print_json(&report)
        }
    }
}

fn run_scene(load: &ConfigLoad, args: &SceneArgs, steps: i64) -> Result<SceneReport> {
    if !(args.width.is_finite() && args.height.is_finite()) {
        bail!("scene size must be finite, got {}x{}", args.width, args.height);
    }

    let row = Row::from(args.row);
    let items: Vec<CardId> = (0..args.cards)
        .map(|i| CardId::from_name(&format!("{row}-{i}")))
        .collect();

    let mut timeline = Timeline::new();
    let mut scene = SceneController::new(
        load.settings.to_scene_config(),
        Rect::new(0.0, 0.0, args.width, args.height),
    );
    match row {
        Row::Top => {
            scene.load_top(&mut timeline, &items);
            scene.up_pressed();
        }
        Row::Bottom => {
            scene.load_bottom(&mut timeline, &items);
            scene.down_pressed();
        }
    }

    for _ in 0..steps.unsigned_abs() {
        if steps > 0 {
            scene.left_pressed(&mut timeline);
        } else {
            scene.right_pressed(&mut timeline);
        }
    }
    let settled = timeline.finish_all();
    scene.refresh_after_settle(&mut timeline);
    info!(%row, cards = args.cards, steps, settled, "scene settled");

    let carousel = scene.carousel(row);
    let cards = carousel
        .items()
        .iter()
        .map(|card| CardReport {
            card: *card,
            state: timeline.card(*card).copied().unwrap_or_default(),
        })
        .collect();

    Ok(SceneReport {
        row,
        settings_source: load.source.to_string(),
        snapshot: carousel.snapshot(),
        events: scene.take_events(),
        cards,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .context("failed to serialize report")?;
    println!("{text}");
    Ok(())
}
