use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use minado_core::{Difficulty, JsonFileScoreStore};
use tracing_subscriber::filter::LevelFilter;

use app::App;
use settings::Settings;

mod app;
mod command;
mod render;
mod settings;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Difficulty of the first game: easy, medium or hard
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where best scores are stored
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Settings file to use instead of the one in the platform config directory
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    // log records from the core are forwarded to the subscriber
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let settings = Settings::resolve(args.config.as_deref())?;
    let difficulty = args.difficulty.unwrap_or(settings.difficulty);
    let scores_path = args
        .scores
        .or(settings.scores_path)
        .or_else(Settings::default_scores_path)
        .context("Could not determine where to store scores, pass --scores")?;
    log::debug!("seed: {:?}, scores: {}", args.seed, scores_path.display());

    let mut app = App::new(difficulty, args.seed, JsonFileScoreStore::new(scores_path));
    app.run(io::stdin().lock(), &mut io::stdout().lock())?;
    Ok(())
}
