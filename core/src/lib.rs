#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the wrapbot engine.
//!
//! This crate defines the vocabulary every other crate speaks: integer
//! [`Point`]s and [`Direction`]s, the dense [`Grid`] container, booster kinds,
//! the closed [`Action`] set with its solution text format, and the parsed
//! [`Task`] description. Geometry turns a task into terrain, the world applies
//! actions to that terrain, and systems explore or replay action sequences.

mod action;
mod booster;
mod grid;
mod parse;
mod point;
mod task;
mod validator;

pub use action::{compose_actions, compose_solution, parse_solution, Action, BOT_DELIMITER};
pub use booster::{Booster, BoosterCode};
pub use grid::{Cell, CellGrid, Grid, OutOfBounds};
pub use parse::ParseError;
pub use point::{Direction, Point};
pub use task::{Polygon, Task};
pub use validator::ValidatorReply;
