#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Speculative move exploration over a live game.
//!
//! [`BacktrackingGame`] borrows a [`Game`] and copies only its coverage bitmap
//! and one bot's pose. Every applied action pushes an undo frame recording the
//! cells it wrapped, so reverting restores the exact previous state without
//! touching the terrain. Only one branch is alive at a time: applying at a
//! shallower depth first reverts everything above it.
//!
//! Moves are plain single steps. While the bot's wheels or drill would still
//! be running, moves are rejected as [`ActionError::Unsupported`].

use tracing::trace;
use wrapbot_core::{Action, Cell, Grid, Point};
use wrapbot_world::{query, ActionError, Game, Pose};

/// Undo-log overlay exploring one bot's moves and rotations.
#[derive(Clone, Debug)]
pub struct BacktrackingGame<'g> {
    game: &'g Game,
    bot_index: usize,
    wrapped: Grid<bool>,
    remaining_unwrapped: usize,
    pose: Pose,
    turn: u32,
    wheels_timer: u32,
    drill_timer: u32,
    frames: Vec<Frame>,
}

#[derive(Clone, Debug)]
struct Frame {
    pose: Pose,
    action: Action,
    newly_wrapped: Vec<Point>,
}

impl<'g> BacktrackingGame<'g> {
    /// Starts exploring from the current state of bot `bot_index`.
    pub fn new(game: &'g Game, bot_index: usize) -> Result<Self, ActionError> {
        let bot = query::bot(game, bot_index).ok_or(ActionError::UnknownBot(bot_index))?;
        Ok(Self {
            game,
            bot_index,
            wrapped: query::wrapped(game).clone(),
            remaining_unwrapped: query::remaining_unwrapped(game),
            pose: bot.pose().clone(),
            turn: query::turn(game),
            wheels_timer: bot.wheels_timer(),
            drill_timer: bot.drill_timer(),
            frames: Vec::new(),
        })
    }

    /// Game the overlay explores.
    #[must_use]
    pub const fn game(&self) -> &'g Game {
        self.game
    }

    /// Index of the explored bot.
    #[must_use]
    pub const fn bot_index(&self) -> usize {
        self.bot_index
    }

    /// Speculative pose of the explored bot.
    #[must_use]
    pub const fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Turn counter after the speculative actions. Only bot 0 advances it.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Number of speculative actions currently applied.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Speculative actions from the root, oldest first.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.frames.iter().map(|frame| frame.action)
    }

    /// Free cells still unwrapped on this branch.
    #[must_use]
    pub const fn remaining_unwrapped(&self) -> usize {
        self.remaining_unwrapped
    }

    /// Reports whether `point` is wrapped on this branch.
    #[must_use]
    pub fn is_wrapped(&self, point: Point) -> bool {
        self.wrapped.get(point).unwrap_or(false)
    }

    /// Turn counter once this branch wraps every free cell.
    #[must_use]
    pub fn finished(&self) -> Option<u32> {
        (self.remaining_unwrapped == 0).then_some(self.turn)
    }

    /// Reports whether a booster timer of the bot is still running at the
    /// current depth. Every action ticks the timers once.
    #[must_use]
    pub fn is_boosted(&self) -> bool {
        let depth = u32::try_from(self.depth()).unwrap_or(u32::MAX);
        self.wheels_timer > depth || self.drill_timer > depth
    }

    /// Applies a single-step move, a rotation or a wait on top of the branch.
    ///
    /// Returns the cells it wrapped. Booster actions, and moves while
    /// [`BacktrackingGame::is_boosted`], are [`ActionError::Unsupported`].
    pub fn apply_action(&mut self, action: Action) -> Result<Vec<Point>, ActionError> {
        if self.finished().is_some() {
            return Err(ActionError::GameFinished);
        }
        if !action.is_motion() {
            return Err(ActionError::Unsupported(action));
        }
        let grid = query::grid(self.game);
        let mut pose = self.pose.clone();
        match action {
            Action::Move(_) if self.is_boosted() => return Err(ActionError::Unsupported(action)),
            Action::Move(direction) => {
                let target = pose.pos() + direction.delta();
                match grid.get(target) {
                    None => return Err(ActionError::OutOfBounds(target)),
                    Some(Cell::Wall) => return Err(ActionError::Blocked(target)),
                    Some(Cell::Free) => pose.set_pos(target),
                }
            }
            Action::TurnCw => pose.rotate_cw(),
            Action::TurnCcw => pose.rotate_ccw(),
            _ => {}
        }

        let mut newly_wrapped = Vec::new();
        for cell in pose.covered_cells(grid) {
            if grid.get(cell) != Some(Cell::Free) {
                continue;
            }
            if let Ok(false) = self.wrapped.set(cell, true) {
                self.remaining_unwrapped -= 1;
                newly_wrapped.push(cell);
            }
        }

        let previous = std::mem::replace(&mut self.pose, pose);
        self.frames.push(Frame {
            pose: previous,
            action,
            newly_wrapped: newly_wrapped.clone(),
        });
        if self.bot_index == 0 {
            self.turn += 1;
        }
        Ok(newly_wrapped)
    }

    /// Undoes the most recent speculative action, returning it.
    pub fn revert(&mut self) -> Option<Action> {
        let frame = self.frames.pop()?;
        for cell in &frame.newly_wrapped {
            let _ = self.wrapped.set(*cell, false);
        }
        self.remaining_unwrapped += frame.newly_wrapped.len();
        self.pose = frame.pose;
        if self.bot_index == 0 {
            self.turn -= 1;
        }
        trace!(action = %frame.action, depth = self.frames.len(), "reverted speculative action");
        Some(frame.action)
    }

    /// Reverts until at most `depth` actions remain applied.
    pub fn revert_to(&mut self, depth: usize) {
        while self.frames.len() > depth {
            let _ = self.revert();
        }
    }

    /// Replaces the branch above `depth` with `action`.
    ///
    /// On error the branch is left reverted to `depth`.
    pub fn apply_at(&mut self, depth: usize, action: Action) -> Result<Vec<Point>, ActionError> {
        self.revert_to(depth);
        self.apply_action(action)
    }
}
