//! Bot actions and their textual solution format.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{parse::Scanner, Direction, ParseError, Point};

/// Separator placed between the action streams of different bots.
pub const BOT_DELIMITER: char = '#';

/// Every command a bot may issue during one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Step one cell (two with active wheels) in the given direction.
    Move(Direction),
    /// Do nothing for a turn.
    Wait,
    /// Rotate the manipulator a quarter turn clockwise.
    TurnCw,
    /// Rotate the manipulator a quarter turn counter-clockwise.
    TurnCcw,
    /// Attach a new manipulator arm at the offset relative to the bot.
    Attach(Point),
    /// Activate fast wheels.
    Wheels,
    /// Activate the drill.
    Drill,
    /// Register the current position as a teleport destination.
    DropBeacon,
    /// Jump to a previously registered beacon.
    Teleport(Point),
    /// Spawn a new bot at the current position.
    Clone,
}

impl Action {
    /// Parses a concatenated action stream such as `WDDB(1,2)QZ`.
    pub fn parse_sequence(text: &str) -> Result<Vec<Action>, ParseError> {
        Self::parse_at(text, 0)
    }

    fn parse_at(text: &str, base: usize) -> Result<Vec<Action>, ParseError> {
        let mut scanner = Scanner::with_base(text, base);
        let mut actions = Vec::new();
        while !scanner.is_done() {
            let offset = scanner.offset();
            let Some(symbol) = scanner.bump() else {
                break;
            };
            let action = match symbol {
                'W' => Action::Move(Direction::Up),
                'S' => Action::Move(Direction::Down),
                'A' => Action::Move(Direction::Left),
                'D' => Action::Move(Direction::Right),
                'Z' => Action::Wait,
                'E' => Action::TurnCw,
                'Q' => Action::TurnCcw,
                'F' => Action::Wheels,
                'L' => Action::Drill,
                'R' => Action::DropBeacon,
                'C' => Action::Clone,
                'B' => Action::Attach(scanner.point()?),
                'T' => Action::Teleport(scanner.point()?),
                found => return Err(ParseError::UnexpectedChar { offset, found }),
            };
            actions.push(action);
        }
        Ok(actions)
    }

    /// Reports whether the action only moves or turns the bot.
    #[must_use]
    pub const fn is_motion(&self) -> bool {
        matches!(
            self,
            Action::Move(_) | Action::TurnCw | Action::TurnCcw | Action::Wait
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(Direction::Up) => write!(f, "W"),
            Action::Move(Direction::Down) => write!(f, "S"),
            Action::Move(Direction::Left) => write!(f, "A"),
            Action::Move(Direction::Right) => write!(f, "D"),
            Action::Wait => write!(f, "Z"),
            Action::TurnCw => write!(f, "E"),
            Action::TurnCcw => write!(f, "Q"),
            Action::Attach(offset) => write!(f, "B{offset}"),
            Action::Wheels => write!(f, "F"),
            Action::Drill => write!(f, "L"),
            Action::DropBeacon => write!(f, "R"),
            Action::Teleport(target) => write!(f, "T{target}"),
            Action::Clone => write!(f, "C"),
        }
    }
}

/// Serializes one action stream without separators.
#[must_use]
pub fn compose_actions(actions: &[Action]) -> String {
    actions.iter().map(Action::to_string).collect()
}

/// Serializes the per-bot action streams in bot order, joined by `#`.
#[must_use]
pub fn compose_solution(bots: &[Vec<Action>]) -> String {
    bots.iter()
        .map(|actions| compose_actions(actions))
        .collect::<Vec<_>>()
        .join(&BOT_DELIMITER.to_string())
}

/// Parses a multi-bot solution, one stream per bot separated by `#`.
///
/// Surrounding whitespace is ignored; offsets in errors refer to the trimmed
/// text.
pub fn parse_solution(text: &str) -> Result<Vec<Vec<Action>>, ParseError> {
    let mut base = 0;
    let mut bots = Vec::new();
    for stream in text.trim().split(BOT_DELIMITER) {
        bots.push(Action::parse_at(stream, base)?);
        base += stream.len() + BOT_DELIMITER.len_utf8();
    }
    Ok(bots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_canonical_text() {
        let actions = [
            Action::Move(Direction::Up),
            Action::Move(Direction::Down),
            Action::Move(Direction::Left),
            Action::Move(Direction::Right),
            Action::Wait,
            Action::TurnCw,
            Action::TurnCcw,
            Action::Attach(Point::new(1, -2)),
            Action::Wheels,
            Action::Drill,
        ];
        assert_eq!(compose_actions(&actions), "WSADZEQB(1,-2)FL");
    }

    #[test]
    fn parses_concatenated_stream() {
        let actions = Action::parse_sequence("DWB(0,1)RT(4,7)C").expect("valid stream");
        assert_eq!(
            actions,
            vec![
                Action::Move(Direction::Right),
                Action::Move(Direction::Up),
                Action::Attach(Point::new(0, 1)),
                Action::DropBeacon,
                Action::Teleport(Point::new(4, 7)),
                Action::Clone,
            ]
        );
    }

    #[test]
    fn rejects_unknown_symbols() {
        assert_eq!(
            Action::parse_sequence("WWx"),
            Err(ParseError::UnexpectedChar {
                offset: 2,
                found: 'x'
            })
        );
        assert_eq!(
            Action::parse_sequence("B(1,"),
            Err(ParseError::UnexpectedEnd { offset: 4 })
        );
    }

    #[test]
    fn solution_streams_are_split_per_bot() {
        let text = "WB(1,0)C#SSD#\n";
        let bots = parse_solution(text).expect("valid solution");
        assert_eq!(bots.len(), 3);
        assert_eq!(bots[1].len(), 3);
        assert!(bots[2].is_empty());
        assert_eq!(compose_solution(&bots), "WB(1,0)C#SSD#");
    }

    #[test]
    fn solution_errors_point_into_the_full_text() {
        assert_eq!(
            parse_solution("WW#DQ?"),
            Err(ParseError::UnexpectedChar {
                offset: 5,
                found: '?'
            })
        );
    }

    #[test]
    fn actions_round_trip_through_bincode() {
        let action = Action::Teleport(Point::new(-4, 9));
        let bytes = bincode::serialize(&action).expect("serialize");
        let restored: Action = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, action);
    }
}
