//! Bot poses and per-bot state.

use wrapbot_core::{Action, CellGrid, Point};
use wrapbot_geometry::visible;

/// Manipulator shape every bot starts with: itself plus three cells to its right.
pub const DEFAULT_MANIPULATOR: [Point; 4] = [
    Point::new(0, 0),
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(1, -1),
];

/// Position, manipulator shape and net rotation of a bot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pose {
    pos: Point,
    manipulator: Vec<Point>,
    direction: u8,
}

impl Pose {
    /// Pose at `pos` with the default manipulator, facing right.
    #[must_use]
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            manipulator: DEFAULT_MANIPULATOR.to_vec(),
            direction: 0,
        }
    }

    /// Cell the bot stands on.
    #[must_use]
    pub const fn pos(&self) -> Point {
        self.pos
    }

    /// Manipulator offsets relative to [`Pose::pos`], in attachment order.
    #[must_use]
    pub fn manipulator(&self) -> &[Point] {
        &self.manipulator
    }

    /// Net number of clockwise quarter turns, modulo 4.
    #[must_use]
    pub const fn direction(&self) -> u8 {
        self.direction
    }

    /// Moves the bot without touching its manipulator.
    pub fn set_pos(&mut self, pos: Point) {
        self.pos = pos;
    }

    /// Rotates the whole manipulator a quarter turn clockwise.
    pub fn rotate_cw(&mut self) {
        for offset in &mut self.manipulator {
            *offset = offset.rotated_cw();
        }
        self.direction = (self.direction + 1) % 4;
    }

    /// Rotates the whole manipulator a quarter turn counter-clockwise.
    pub fn rotate_ccw(&mut self) {
        for offset in &mut self.manipulator {
            *offset = offset.rotated_ccw();
        }
        self.direction = (self.direction + 3) % 4;
    }

    /// Reports whether `offset` could extend the manipulator.
    ///
    /// The offset must be new and a Manhattan neighbour of an existing arm.
    #[must_use]
    pub fn can_attach(&self, offset: Point) -> bool {
        !self.manipulator.contains(&offset)
            && self
                .manipulator
                .iter()
                .any(|arm| arm.manhattan_distance(offset) == 1)
    }

    pub(crate) fn attach(&mut self, offset: Point) {
        self.manipulator.push(offset);
    }

    /// Absolute cells the manipulator currently reaches on `grid`.
    ///
    /// Arms outside the grid or hidden behind walls are skipped.
    #[must_use]
    pub fn covered_cells(&self, grid: &CellGrid) -> Vec<Point> {
        self.manipulator
            .iter()
            .map(|offset| self.pos + *offset)
            .filter(|cell| grid.in_bounds(*cell) && visible(grid, self.pos, *cell))
            .collect()
    }
}

/// A single wrapping bot owned by a [`Game`](crate::Game).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bot {
    pose: Pose,
    wheels_timer: u32,
    drill_timer: u32,
    actions: Vec<Action>,
}

impl Bot {
    pub(crate) fn new(pos: Point) -> Self {
        Self {
            pose: Pose::new(pos),
            wheels_timer: 0,
            drill_timer: 0,
            actions: Vec::new(),
        }
    }

    /// Current pose.
    #[must_use]
    pub const fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Cell the bot stands on.
    #[must_use]
    pub const fn pos(&self) -> Point {
        self.pose.pos()
    }

    /// Manipulator offsets relative to the bot.
    #[must_use]
    pub fn manipulator(&self) -> &[Point] {
        self.pose.manipulator()
    }

    /// Remaining turns of fast wheels.
    #[must_use]
    pub const fn wheels_timer(&self) -> u32 {
        self.wheels_timer
    }

    /// Remaining turns of the drill.
    #[must_use]
    pub const fn drill_timer(&self) -> u32 {
        self.drill_timer
    }

    /// Actions this bot has performed successfully, in order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub(crate) fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    pub(crate) fn extend_wheels(&mut self, base: u32) {
        self.wheels_timer = extended(self.wheels_timer, base);
    }

    pub(crate) fn extend_drill(&mut self, base: u32) {
        self.drill_timer = extended(self.drill_timer, base);
    }

    pub(crate) fn record(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub(crate) fn tick_timers(&mut self) {
        self.wheels_timer = self.wheels_timer.saturating_sub(1);
        self.drill_timer = self.drill_timer.saturating_sub(1);
    }
}

fn extended(timer: u32, base: u32) -> u32 {
    base.max(timer.saturating_add(base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapbot_core::Cell;

    #[test]
    fn four_rotations_restore_the_manipulator() {
        let mut clockwise = Pose::new(Point::new(2, 2));
        let mut counter = clockwise.clone();
        let original = clockwise.clone();
        for _ in 0..4 {
            clockwise.rotate_cw();
            counter.rotate_ccw();
        }
        assert_eq!(clockwise, original);
        assert_eq!(counter, original);
    }

    #[test]
    fn rotation_tracks_direction() {
        let mut pose = Pose::new(Point::ORIGIN);
        pose.rotate_ccw();
        assert_eq!(pose.direction(), 3);
        assert_eq!(
            pose.manipulator(),
            &[
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(-1, 1),
                Point::new(1, 1)
            ]
        );
        pose.rotate_cw();
        assert_eq!(pose.direction(), 0);
    }

    #[test]
    fn attachments_must_touch_the_manipulator() {
        let pose = Pose::new(Point::ORIGIN);
        assert!(pose.can_attach(Point::new(2, 0)), "next to (1,0)");
        assert!(pose.can_attach(Point::new(1, 2)), "next to (1,1)");
        assert!(!pose.can_attach(Point::new(1, 1)), "already attached");
        assert!(!pose.can_attach(Point::new(3, 0)), "detached");
    }

    #[test]
    fn covered_cells_skip_walls_and_edges() {
        let grid = CellGrid::from_rows(&["..", ".#"]).expect("valid rows");
        let pose = Pose::new(Point::new(0, 0));
        assert_eq!(grid.get(Point::new(1, 0)), Some(Cell::Wall));
        assert_eq!(
            pose.covered_cells(&grid),
            vec![Point::new(0, 0), Point::new(1, 1)],
            "the wall hides (1,0) but not the diagonal arm"
        );
    }

    #[test]
    fn reactivation_extends_timers() {
        let mut bot = Bot::new(Point::ORIGIN);
        bot.extend_wheels(51);
        bot.tick_timers();
        bot.extend_wheels(51);
        assert_eq!(bot.wheels_timer(), 101);
        bot.extend_drill(31);
        assert_eq!(bot.drill_timer(), 31);
    }
}
