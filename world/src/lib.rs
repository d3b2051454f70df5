#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state for wrapbot.
//!
//! A [`Game`] owns the terrain, every bot, the shared inventory and the
//! coverage bitmap. [`Game::apply_action`] is the only way to mutate it; the
//! [`query`] module exposes read-only views for planners and adapters.

mod bot;
mod error;
mod inventory;
mod rules;
mod task;

use tracing::{debug, trace};
use wrapbot_core::{
    compose_solution, Action, Booster, BoosterCode, Cell, CellGrid, Direction, Grid, Point,
};

pub use bot::{Bot, Pose, DEFAULT_MANIPULATOR};
pub use error::{ActionError, TaskError};
pub use inventory::{Inventory, PendingPickup};
pub use rules::Rules;
pub use task::GridTask;

use inventory::PendingPickups;

/// Represents one playthrough of a task.
#[derive(Clone, Debug)]
pub struct Game {
    grid: CellGrid,
    rules: Rules,
    bots: Vec<Bot>,
    inventory: Inventory,
    boosters: Vec<Booster>,
    spawns: Vec<Point>,
    beacons: Vec<Point>,
    turn: u32,
    wrapped: Grid<bool>,
    remaining_unwrapped: usize,
    pending: PendingPickups,
}

/// Side effect of an action that survived validation.
#[derive(Clone, Copy)]
enum Effect {
    Pose,
    Move {
        direction: Direction,
        steps: u8,
        drilling: bool,
    },
    Wheels,
    Drill,
    Beacon,
    Clone,
}

impl Game {
    /// Starts a game on `task` with the default [`Rules`].
    #[must_use]
    pub fn new(task: GridTask) -> Self {
        Self::with_rules(task, Rules::default())
    }

    /// Starts a game on `task` with explicit booster durations.
    ///
    /// The first bot stands on the start cell and has already wrapped what its
    /// manipulator reaches there.
    #[must_use]
    pub fn with_rules(task: GridTask, rules: Rules) -> Self {
        let (grid, start, placed) = task.into_parts();
        let (spawns, boosters): (Vec<Booster>, Vec<Booster>) = placed
            .into_iter()
            .partition(|booster| !booster.code().is_pickable());
        let remaining_unwrapped = grid.count(Cell::Free);
        let wrapped = Grid::new(grid.width(), grid.height(), false);
        let mut game = Self {
            grid,
            rules,
            bots: vec![Bot::new(start)],
            inventory: Inventory::default(),
            boosters,
            spawns: spawns.iter().map(Booster::pos).collect(),
            beacons: Vec::new(),
            turn: 0,
            wrapped,
            remaining_unwrapped,
            pending: PendingPickups::default(),
        };
        let _ = game.refresh_coverage();
        game
    }

    /// Turn counter once every free cell is wrapped.
    #[must_use]
    pub fn finished(&self) -> Option<u32> {
        (self.remaining_unwrapped == 0).then_some(self.turn)
    }

    /// Reports whether `point` has been wrapped.
    #[must_use]
    pub fn is_wrapped(&self, point: Point) -> bool {
        self.wrapped.get(point).unwrap_or(false)
    }

    /// Action logs of every bot, in bot order.
    #[must_use]
    pub fn get_actions(&self) -> Vec<Vec<Action>> {
        self.bots.iter().map(|bot| bot.actions().to_vec()).collect()
    }

    /// Solution text reproducing every action applied so far.
    #[must_use]
    pub fn solution(&self) -> String {
        compose_solution(&self.get_actions())
    }

    /// Applies `action` on behalf of bot `bot_index`.
    ///
    /// Returns the cells wrapped by the action. On error nothing changes.
    pub fn apply_action(
        &mut self,
        action: Action,
        bot_index: usize,
    ) -> Result<Vec<Point>, ActionError> {
        if self.finished().is_some() {
            return Err(ActionError::GameFinished);
        }
        let bot = self
            .bots
            .get(bot_index)
            .ok_or(ActionError::UnknownBot(bot_index))?;
        let now = self.turn;
        let mut inventory = self.pending.credited(self.inventory, now, bot_index);
        let mut pose = bot.pose().clone();

        let effect = match action {
            Action::Move(direction) => {
                let drilling = bot.drill_timer() > 0;
                let _ = self.step_target(pose.pos(), direction, drilling)?;
                let steps = if bot.wheels_timer() > 0 { 2 } else { 1 };
                Effect::Move {
                    direction,
                    steps,
                    drilling,
                }
            }
            Action::Wait => Effect::Pose,
            Action::TurnCw => {
                pose.rotate_cw();
                Effect::Pose
            }
            Action::TurnCcw => {
                pose.rotate_ccw();
                Effect::Pose
            }
            Action::Attach(offset) => {
                if pose.manipulator().contains(&offset) {
                    return Err(ActionError::ManipulatorExists(offset));
                }
                if !pose.can_attach(offset) {
                    return Err(ActionError::ManipulatorDetached(offset));
                }
                inventory.spend(BoosterCode::Extension)?;
                pose.attach(offset);
                Effect::Pose
            }
            Action::Wheels => {
                inventory.spend(BoosterCode::Wheels)?;
                Effect::Wheels
            }
            Action::Drill => {
                inventory.spend(BoosterCode::Drill)?;
                Effect::Drill
            }
            Action::DropBeacon => {
                inventory.spend(BoosterCode::Teleport)?;
                Effect::Beacon
            }
            Action::Teleport(target) => {
                if !self.beacons.contains(&target) {
                    return Err(ActionError::UnknownBeacon(target));
                }
                pose.set_pos(target);
                Effect::Pose
            }
            Action::Clone => {
                inventory.spend(BoosterCode::Clone)?;
                if !self.spawns.contains(&pose.pos()) {
                    return Err(ActionError::NotOnSpawn(pose.pos()));
                }
                Effect::Clone
            }
        };

        let credited = self.pending.settle(now, bot_index);
        if credited > 0 {
            debug!(credited, turn = now, bot_index, "credited pending boosters");
        }
        self.inventory = inventory;

        let mut newly_wrapped = Vec::new();
        if let Effect::Move {
            direction,
            steps,
            drilling,
        } = effect
        {
            for _ in 0..steps {
                let Ok(target) = self.step_target(pose.pos(), direction, drilling) else {
                    break;
                };
                self.enter(&mut pose, target, bot_index, &mut newly_wrapped);
            }
        }

        let pos = pose.pos();
        *self.bots[bot_index].pose_mut() = pose;
        match effect {
            Effect::Pose | Effect::Move { .. } => {}
            Effect::Wheels => self.bots[bot_index].extend_wheels(self.rules.wheels_duration),
            Effect::Drill => self.bots[bot_index].extend_drill(self.rules.drill_duration),
            Effect::Beacon => {
                if !self.beacons.contains(&pos) {
                    self.beacons.push(pos);
                }
                debug!(%pos, bot_index, "dropped teleport beacon");
            }
            Effect::Clone => {
                self.bots.push(Bot::new(pos));
                debug!(%pos, bot_index, bots = self.bots.len(), "cloned bot");
            }
        }

        newly_wrapped.extend(self.refresh_coverage());

        self.bots[bot_index].record(action);
        if bot_index == 0 {
            self.turn += 1;
        }
        for bot in &mut self.bots {
            bot.tick_timers();
        }
        trace!(
            %action,
            bot_index,
            turn = self.turn,
            remaining = self.remaining_unwrapped,
            "applied action"
        );
        Ok(newly_wrapped)
    }

    /// Counter value a pickup by `bot_index` is recorded at: the value once
    /// the current action has been counted.
    fn pickup_turn(&self, bot_index: usize) -> u32 {
        if bot_index == 0 {
            self.turn + 1
        } else {
            self.turn
        }
    }

    fn step_target(
        &self,
        from: Point,
        direction: Direction,
        drilling: bool,
    ) -> Result<Point, ActionError> {
        let target = from + direction.delta();
        match self.grid.get(target) {
            None => Err(ActionError::OutOfBounds(target)),
            Some(Cell::Free) => Ok(target),
            Some(Cell::Wall) if drilling => Ok(target),
            Some(Cell::Wall) => Err(ActionError::Blocked(target)),
        }
    }

    fn enter(
        &mut self,
        pose: &mut Pose,
        target: Point,
        bot_index: usize,
        newly_wrapped: &mut Vec<Point>,
    ) {
        if let Ok(Cell::Wall) = self.grid.set(target, Cell::Free) {
            self.remaining_unwrapped += 1;
            debug!(%target, bot_index, "drilled through wall");
        }
        pose.set_pos(target);

        let turn = self.pickup_turn(bot_index);
        while let Some(index) = self.boosters.iter().position(|booster| booster.pos() == target) {
            let booster = self.boosters.remove(index);
            self.pending.push(booster.code(), turn, bot_index);
            debug!(%booster, turn, bot_index, "picked up booster");
        }

        let cells = pose.covered_cells(&self.grid);
        newly_wrapped.extend(self.wrap(&cells));
    }

    fn refresh_coverage(&mut self) -> Vec<Point> {
        let cells: Vec<Point> = self
            .bots
            .iter()
            .flat_map(|bot| bot.pose().covered_cells(&self.grid))
            .collect();
        self.wrap(&cells)
    }

    fn wrap(&mut self, cells: &[Point]) -> Vec<Point> {
        let mut newly_wrapped = Vec::new();
        for &cell in cells {
            if self.grid.get(cell) != Some(Cell::Free) {
                continue;
            }
            if let Ok(false) = self.wrapped.set(cell, true) {
                self.remaining_unwrapped -= 1;
                newly_wrapped.push(cell);
            }
        }
        newly_wrapped
    }
}

/// Query functions that provide read-only access to the game state.
pub mod query {
    use super::{Bot, Game, Inventory, PendingPickup, Rules};
    use wrapbot_core::{Booster, Cell, CellGrid, Grid, Point};

    /// Current terrain, including drilled cells.
    #[must_use]
    pub fn grid(game: &Game) -> &CellGrid {
        &game.grid
    }

    /// Booster durations in effect.
    #[must_use]
    pub fn rules(game: &Game) -> Rules {
        game.rules
    }

    /// Coverage bitmap parallel to the terrain.
    #[must_use]
    pub fn wrapped(game: &Game) -> &Grid<bool> {
        &game.wrapped
    }

    /// Free cells that are not wrapped yet.
    #[must_use]
    pub fn remaining_unwrapped(game: &Game) -> usize {
        game.remaining_unwrapped
    }

    /// Number of completed rounds, advanced by every action of bot 0.
    #[must_use]
    pub fn turn(game: &Game) -> u32 {
        game.turn
    }

    /// Every bot in index order.
    #[must_use]
    pub fn bots(game: &Game) -> &[Bot] {
        &game.bots
    }

    /// Bot at `index`, if it exists.
    #[must_use]
    pub fn bot(game: &Game, index: usize) -> Option<&Bot> {
        game.bots.get(index)
    }

    /// Credited boosters.
    #[must_use]
    pub fn inventory(game: &Game) -> Inventory {
        game.inventory
    }

    /// Collected boosters still waiting to be credited.
    #[must_use]
    pub fn pending_pickups(game: &Game) -> &[PendingPickup] {
        game.pending.entries()
    }

    /// Boosters still lying on the map.
    #[must_use]
    pub fn boosters(game: &Game) -> &[Booster] {
        &game.boosters
    }

    /// Cells where clones may be spawned.
    #[must_use]
    pub fn spawns(game: &Game) -> &[Point] {
        &game.spawns
    }

    /// Registered teleport targets.
    #[must_use]
    pub fn beacons(game: &Game) -> &[Point] {
        &game.beacons
    }

    /// Reports whether `point` lies on the map.
    #[must_use]
    pub fn in_bounds(game: &Game, point: Point) -> bool {
        game.grid.in_bounds(point)
    }

    /// Reports whether a bot may stand on `point` without drilling.
    #[must_use]
    pub fn is_passable(game: &Game, point: Point) -> bool {
        game.grid.get(point).is_some_and(Cell::is_passable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapbot_core::Task;

    fn game(text: &str) -> Game {
        let task = Task::parse(text).expect("valid task");
        Game::new(GridTask::new(&task).expect("valid terrain"))
    }

    #[test]
    fn start_cell_is_wrapped_immediately() {
        let game = game("(0,0),(3,0),(3,3),(0,3)#(0,0)##");
        assert!(game.is_wrapped(Point::new(0, 0)));
        assert!(game.is_wrapped(Point::new(1, 0)));
        assert!(game.is_wrapped(Point::new(1, 1)));
        assert_eq!(query::remaining_unwrapped(&game), 6);
        assert_eq!(game.finished(), None);
    }

    #[test]
    fn failed_actions_leave_the_game_untouched() {
        let mut game = game("(0,0),(3,0),(3,3),(0,3)#(0,0)##");
        let before = game.clone();
        assert_eq!(
            game.apply_action(Action::Move(Direction::Left), 0),
            Err(ActionError::OutOfBounds(Point::new(-1, 0)))
        );
        assert_eq!(
            game.apply_action(Action::Wheels, 0),
            Err(ActionError::MissingBooster(BoosterCode::Wheels))
        );
        assert_eq!(
            game.apply_action(Action::Wait, 3),
            Err(ActionError::UnknownBot(3))
        );
        assert_eq!(query::turn(&game), query::turn(&before));
        assert_eq!(query::bots(&game), query::bots(&before));
        assert_eq!(query::wrapped(&game), query::wrapped(&before));
    }

    #[test]
    fn moves_return_newly_wrapped_cells() {
        let mut game = game("(0,0),(3,0),(3,3),(0,3)#(0,0)##");
        let wrapped = game
            .apply_action(Action::Move(Direction::Up), 0)
            .expect("free cell above");
        assert_eq!(wrapped, vec![Point::new(0, 1), Point::new(1, 2)]);
        assert_eq!(query::turn(&game), 1);
        assert_eq!(game.solution(), "W");
    }

    #[test]
    fn walls_block_moves() {
        let mut game = game("(0,0),(3,0),(3,3),(0,3)#(0,0)#(1,0),(2,0),(2,1),(1,1)#");
        assert_eq!(
            game.apply_action(Action::Move(Direction::Right), 0),
            Err(ActionError::Blocked(Point::new(1, 0)))
        );
    }

    #[test]
    fn actions_after_the_finish_are_rejected() {
        let mut game = game("(0,0),(2,0),(2,1),(0,1)#(0,0)##");
        assert_eq!(game.finished(), Some(0));
        assert_eq!(
            game.apply_action(Action::Wait, 0),
            Err(ActionError::GameFinished)
        );
    }

    #[test]
    fn spawn_markers_are_not_collected() {
        let mut game = game("(0,0),(3,0),(3,1),(0,1)#(0,0)##X(1,0);C(2,0)");
        assert_eq!(query::spawns(&game), &[Point::new(1, 0)]);
        assert_eq!(query::boosters(&game).len(), 1);
        let _ = game
            .apply_action(Action::Move(Direction::Right), 0)
            .expect("free cell");
        assert!(query::pending_pickups(&game).is_empty());
        assert_eq!(query::spawns(&game), &[Point::new(1, 0)]);
    }
}
