use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::{GameConfig, PieceSeed};
use clap::{ArgAction, Parser, Subcommand};

use crate::util;

use self::{play::PlayArg, replay::ReplayArg};

mod play;
mod replay;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Fold an action script from a fresh game and print the resulting state as JSON
    Replay(#[clap(flatten)] ReplayArg),
}

/// Game settings shared by the subcommands.
///
/// Values given on the command line override the config file.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GameConfigArg {
    /// JSON file with game settings
    #[clap(long)]
    config: Option<PathBuf>,
    /// Piece generator seed (32 hex digits)
    #[clap(long)]
    seed: Option<PieceSeed>,
}

impl GameConfigArg {
    pub(crate) fn load(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("config", path)?,
            None => GameConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        Ok(config)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg, args.verbose).context("play failed")?,
        Mode::Replay(arg) => replay::run(&arg, args.verbose)?,
    }
    Ok(())
}
