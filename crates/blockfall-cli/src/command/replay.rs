use std::{iter, path::PathBuf};

use blockfall_engine::{Action, GameSession, GameState, ParseActionError};
use serde::Serialize;

use crate::{
    command::GameConfigArg,
    logging,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Text file with whitespace-separated actions; `#` starts a comment
    script: PathBuf,
    #[clap(flatten)]
    pub(crate) game: GameConfigArg,
    /// Write every intermediate state, not only the last one
    #[clap(long)]
    trace: bool,
    /// Output file (defaults to stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

/// Actions read from a script, with the tokens that were not understood.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Script {
    pub actions: Vec<Action>,
    pub skipped: Vec<SkippedToken>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SkippedToken {
    /// 1-based line number.
    pub line: usize,
    pub error: ParseActionError,
}

impl Script {
    pub(crate) fn parse(text: &str) -> Self {
        let mut script = Self::default();
        for (index, line) in text.lines().enumerate() {
            let code = line.split_once('#').map_or(line, |(code, _comment)| code);
            for token in code.split_whitespace() {
                match token.parse() {
                    Ok(action) => script.actions.push(action),
                    Err(error) => script.skipped.push(SkippedToken {
                        line: index + 1,
                        error,
                    }),
                }
            }
        }
        script
    }
}

#[derive(Debug, Serialize)]
struct Step<'a> {
    /// `None` for the initial state.
    action: Option<Action>,
    state: &'a GameState,
}

pub(crate) fn run(arg: &ReplayArg, verbose: u8) -> anyhow::Result<()> {
    let ReplayArg {
        script,
        game,
        trace,
        output,
    } = arg;

    logging::init_stderr(verbose)?;

    let config = game.load()?;
    let text = util::read_text_file("script", script)?;
    let Script { actions, skipped } = Script::parse(&text);
    for SkippedToken { line, error } in &skipped {
        tracing::warn!(line, token = error.token(), "skipping unknown action");
    }
    tracing::info!(
        script = %script.display(),
        actions = actions.len(),
        skipped = skipped.len(),
        "replay started"
    );

    let mut session = GameSession::new(&config);
    let mut output = Output::from_output_path(output.clone())?;
    if *trace {
        let initial = session.state().clone();
        let mut states = Vec::new();
        let _ = session.fold_with(actions.iter().copied(), |action, state| {
            states.push((action, state.clone()));
        });
        let steps: Vec<_> = iter::once(Step {
            action: None,
            state: &initial,
        })
        .chain(states.iter().map(|(action, state)| Step {
            action: Some(*action),
            state,
        }))
        .collect();
        output.write_json(&steps)?;
    } else {
        let _ = session.fold(actions.iter().copied());
        output.write_json(session.state())?;
    }

    tracing::info!(
        applied = session.applied_actions(),
        total = actions.len(),
        score = session.state().score(),
        game_over = session.is_over(),
        output = %output.display_path(),
        "replay finished"
    );
    Ok(())
}
