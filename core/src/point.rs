//! Integer points and the cardinal directions used to step between them.

use std::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

use serde::{Deserialize, Serialize};

/// Integer location on the map, also used as an offset vector.
///
/// The `y` axis grows upward, matching the task description format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Offset of a bot relative to itself.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a new point from its coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Rotates the vector a quarter turn clockwise around the origin.
    #[must_use]
    pub const fn rotated_cw(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Rotates the vector a quarter turn counter-clockwise around the origin.
    #[must_use]
    pub const fn rotated_ccw(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Computes the Manhattan distance between two points.
    #[must_use]
    pub fn manhattan_distance(self, other: Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, factor: i32) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Cardinal movement directions available to bots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing `y`.
    Up,
    /// Movement toward decreasing `y`.
    Down,
    /// Movement toward decreasing `x`.
    Left,
    /// Movement toward increasing `x`.
    Right,
}

impl Direction {
    /// All directions in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector covered by a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> Point {
        match self {
            Self::Up => Point::new(0, 1),
            Self::Down => Point::new(0, -1),
            Self::Left => Point::new(-1, 0),
            Self::Right => Point::new(1, 0),
        }
    }

    /// Resolves the direction whose unit vector equals `delta`.
    #[must_use]
    pub fn from_delta(delta: Point) -> Option<Self> {
        Self::ALL.into_iter().find(|direction| direction.delta() == delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations_are_inverse() {
        let offset = Point::new(2, -1);
        assert_eq!(offset.rotated_cw().rotated_ccw(), offset);
        assert_eq!(offset.rotated_cw(), Point::new(-1, -2));
        assert_eq!(offset.rotated_ccw(), Point::new(1, 2));
    }

    #[test]
    fn four_quarter_turns_restore_the_vector() {
        let offset = Point::new(3, 1);
        let turned = offset.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        assert_eq!(turned, offset);
    }

    #[test]
    fn manhattan_distance_is_symmetric() {
        let origin = Point::new(-1, 1);
        let destination = Point::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 7);
        assert_eq!(destination.manhattan_distance(origin), 7);
    }

    #[test]
    fn direction_deltas_round_trip() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_delta(direction.delta()), Some(direction));
        }
        assert_eq!(Direction::from_delta(Point::new(1, 1)), None);
    }

    #[test]
    fn arithmetic_matches_component_math() {
        let a = Point::new(1, 2);
        let b = Point::new(3, -4);
        assert_eq!(a + b, Point::new(4, -2));
        assert_eq!(a - b, Point::new(-2, 6));
        assert_eq!(-a, Point::new(-1, -2));
        assert_eq!(b * 2, Point::new(6, -8));
        assert_eq!(a.to_string(), "(1,2)");
    }
}
