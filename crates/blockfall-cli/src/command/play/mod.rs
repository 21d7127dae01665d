use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::GameSession;
use blockfall_runtime::Runtime;

use crate::{command::GameConfigArg, logging};

use self::app::PlayApp;

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Milliseconds between two automatic falls (overrides the config file)
    #[clap(long)]
    tick_ms: Option<u64>,
    #[clap(flatten)]
    game: GameConfigArg,
    /// Append logs to this file; nothing is logged without it
    #[clap(long)]
    log_file: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg, verbose: u8) -> anyhow::Result<()> {
    let PlayArg {
        tick_ms,
        game,
        log_file,
    } = arg;

    if let Some(path) = log_file {
        logging::init_file(verbose, path)?;
    }

    let mut config = game.load()?;
    if let Some(tick_ms) = tick_ms {
        config.tick_interval_ms = *tick_ms;
    }
    anyhow::ensure!(
        config.tick_interval_ms > 0,
        "tick interval must be at least 1 ms"
    );
    tracing::info!(
        tick_ms = config.tick_interval_ms,
        seed = ?config.seed,
        "game started"
    );

    let mut app = PlayApp::new(GameSession::new(&config), config.tick_interval());
    Runtime::new()
        .run(&mut app)
        .context("Terminal I/O failed")?;

    let session = app.into_session();
    let state = session.state();
    tracing::info!(
        score = state.score(),
        cleared_rows = state.cleared_rows(),
        actions = session.applied_actions(),
        game_over = state.is_game_over(),
        "game finished"
    );
    println!(
        "Score: {}  Lines: {}  Pieces: {}",
        state.score(),
        state.cleared_rows(),
        state.locked_pieces()
    );
    Ok(())
}
