#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic replay of multi-bot solutions.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};
use wrapbot_core::Action;
use wrapbot_world::{query, ActionError, Game};

/// Summary of a completed replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ReplayOutcome {
    /// Turn at which every cell was wrapped, if the solution got there.
    pub finished: Option<u32>,
    /// Turn counter when the replay stopped.
    pub turn: u32,
    /// Free cells left unwrapped.
    pub remaining_unwrapped: usize,
    /// Bots alive at the end, clones included.
    pub bots: usize,
    /// Actions taken from the solution.
    pub applied: usize,
    /// Waits inserted for bot 0 after its stream ran out.
    pub implicit_waits: usize,
}

/// Reasons a solution cannot be replayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// The game rejected an action from the solution.
    #[error("bot {bot} failed at step {step} ({action}): {source}")]
    Action {
        /// Bot whose stream contained the action.
        bot: usize,
        /// Position of the action within that stream.
        step: usize,
        /// Rejected action.
        action: Action,
        /// Rule that was violated.
        #[source]
        source: ActionError,
    },
    /// A stream belongs to a bot that was never cloned.
    #[error("bot {bot} has actions but was never spawned")]
    MissingBot {
        /// Index of the stream without a bot.
        bot: usize,
    },
}

/// Replays per-bot action streams against `game` in round-robin order.
///
/// Each round lets every live bot act once, in index order, so clones spawned
/// by bot 0 act in the round they appear. Once its stream is exhausted bot 0
/// keeps waiting so the turn counter advances; other exhausted bots are
/// skipped. Replay stops when the game finishes or no live bot has actions
/// left.
pub fn replay(game: &mut Game, solution: &[Vec<Action>]) -> Result<ReplayOutcome, ReplayError> {
    let mut cursors = vec![0; solution.len()];
    let mut applied = 0;
    let mut implicit_waits = 0;

    let has_actions = |cursors: &[usize], bot: usize| {
        solution
            .get(bot)
            .is_some_and(|stream| cursors[bot] < stream.len())
    };

    'rounds: while game.finished().is_none() {
        let live = query::bots(game).len();
        if !(0..live).any(|bot| has_actions(&cursors, bot)) {
            break;
        }

        let mut bot = 0;
        while bot < query::bots(game).len() {
            if game.finished().is_some() {
                break 'rounds;
            }
            if has_actions(&cursors, bot) {
                let step = cursors[bot];
                let action = solution[bot][step];
                let _ = game
                    .apply_action(action, bot)
                    .map_err(|source| ReplayError::Action {
                        bot,
                        step,
                        action,
                        source,
                    })?;
                cursors[bot] += 1;
                applied += 1;
                trace!(bot, step, %action, "replayed action");
            } else if bot == 0 {
                let _ = game
                    .apply_action(Action::Wait, 0)
                    .map_err(|source| ReplayError::Action {
                        bot,
                        step: cursors[0],
                        action: Action::Wait,
                        source,
                    })?;
                implicit_waits += 1;
            }
            bot += 1;
        }
    }

    if game.finished().is_none() {
        let live = query::bots(game).len();
        if let Some(bot) = (live..solution.len()).find(|bot| has_actions(&cursors, *bot)) {
            return Err(ReplayError::MissingBot { bot });
        }
    }

    let outcome = ReplayOutcome {
        finished: game.finished(),
        turn: query::turn(game),
        remaining_unwrapped: query::remaining_unwrapped(game),
        bots: query::bots(game).len(),
        applied,
        implicit_waits,
    };
    debug!(?outcome, "replay complete");
    Ok(outcome)
}
