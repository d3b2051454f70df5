use thiserror::Error;
use wrapbot_core::{Action, BoosterCode, Point};
use wrapbot_geometry::GeometryError;

/// Rule violation rejected by [`Game::apply_action`](crate::Game::apply_action).
///
/// The game is left untouched whenever one of these is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Every free cell is already wrapped.
    #[error("the game is already finished")]
    GameFinished,
    /// No bot exists at the requested index.
    #[error("there is no bot with index {0}")]
    UnknownBot(usize),
    /// The target cell is a wall and no drill is active.
    #[error("cell {0} is blocked")]
    Blocked(Point),
    /// The target cell lies outside the map.
    #[error("cell {0} is outside the map")]
    OutOfBounds(Point),
    /// The inventory holds no credited booster of this kind.
    #[error("no {} booster is available", .0.description())]
    MissingBooster(BoosterCode),
    /// The manipulator already has an arm at this offset.
    #[error("the manipulator already reaches offset {0}")]
    ManipulatorExists(Point),
    /// The offset does not touch the existing manipulator.
    #[error("offset {0} is not adjacent to the manipulator")]
    ManipulatorDetached(Point),
    /// No beacon was dropped at the teleport target.
    #[error("no teleport beacon at {0}")]
    UnknownBeacon(Point),
    /// Cloning requires standing on a spawn point.
    #[error("cell {0} is not a spawn point")]
    NotOnSpawn(Point),
    /// The action is not available in this context.
    #[error("action {0} is not supported here")]
    Unsupported(Action),
}

/// Problems found while turning a [`Task`](wrapbot_core::Task) into terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The border or an obstacle polygon is malformed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// The border reaches below or to the left of the origin.
    #[error("border extends to negative coordinates")]
    NegativeBorder,
    /// The start point is not a free cell.
    #[error("start {0} is not a free cell")]
    StartBlocked(Point),
    /// A booster sits outside the free area.
    #[error("booster at {0} is not on a free cell")]
    BoosterBlocked(Point),
}
