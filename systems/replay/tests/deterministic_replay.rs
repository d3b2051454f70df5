use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use wrapbot_core::{parse_solution, Action, Direction, Point, Task};
use wrapbot_system_replay::{replay, ReplayError, ReplayOutcome};
use wrapbot_world::{query, ActionError, Game, GridTask};

const CLONES: &str = "(0,0),(4,0),(4,2),(0,2)#(0,0)##C(1,0);C(2,0);X(0,0)";
const SWEEP: &str = "(0,0),(10,0),(10,10),(0,10)#(0,0)##";

fn game(text: &str) -> Game {
    let task = Task::parse(text).expect("valid task");
    Game::new(GridTask::new(&task).expect("valid terrain"))
}

fn run(task: &str, solution: &str) -> (Game, Result<ReplayOutcome, ReplayError>) {
    let mut game = game(task);
    let streams = parse_solution(solution).expect("valid solution");
    let outcome = replay(&mut game, &streams);
    (game, outcome)
}

fn fingerprint(game: &Game) -> u64 {
    let mut hasher = DefaultHasher::new();
    query::turn(game).hash(&mut hasher);
    query::remaining_unwrapped(game).hash(&mut hasher);
    for bot in query::bots(game) {
        bot.pos().hash(&mut hasher);
        bot.manipulator().hash(&mut hasher);
    }
    for (point, wrapped) in query::wrapped(game).iter() {
        (point, wrapped).hash(&mut hasher);
    }
    game.solution().hash(&mut hasher);
    hasher.finish()
}

#[test]
fn deterministic_replay_produces_identical_games() {
    let (first, first_outcome) = run(CLONES, "DACDDZ#ZZZC#");
    let (second, second_outcome) = run(CLONES, "DACDDZ#ZZZC#");

    assert_eq!(first_outcome, second_outcome, "replay diverged between runs");
    assert_eq!(fingerprint(&first), fingerprint(&second));
    assert_eq!(
        first_outcome.expect("valid replay"),
        ReplayOutcome {
            finished: None,
            turn: 6,
            remaining_unwrapped: 1,
            bots: 3,
            applied: 10,
            implicit_waits: 0,
        }
    );
    assert_eq!(first.solution(), "DACDDZ#ZZZC#");
}

#[test]
fn exhausted_first_bot_keeps_the_clock_running() {
    let (game, outcome) = run(
        "(0,0),(4,0),(4,2),(0,2)#(0,0)##C(1,0);X(0,0)",
        "DAC#ZWDD",
    );
    let outcome = outcome.expect("valid replay");
    assert_eq!(outcome.finished, Some(6));
    assert_eq!(outcome.implicit_waits, 3);
    assert_eq!(outcome.applied, 7);
    assert_eq!(game.solution(), "DACZZZ#ZWDD");
    assert_eq!(
        query::bot(&game, 1).expect("clone").pos(),
        Point::new(2, 1)
    );
}

#[test]
fn replay_stops_once_everything_is_wrapped() {
    let mut solution = String::new();
    for column in 0..5 {
        solution.push_str(if column % 2 == 0 { "WWWWWWWWW" } else { "SSSSSSSSS" });
        if column < 4 {
            solution.push_str("DD");
        }
    }
    solution.push_str("ZZZ");

    let (game, outcome) = run(SWEEP, &solution);
    let outcome = outcome.expect("valid replay");
    assert_eq!(outcome.finished, Some(53));
    assert_eq!(outcome.applied, 53, "trailing waits are never applied");
    assert_eq!(outcome.remaining_unwrapped, 0);
    assert_eq!(game.get_actions()[0].len(), 53);
}

#[test]
fn rejected_actions_name_the_bot_and_step() {
    let (game, outcome) = run(SWEEP, "WWWWWWWWWW");
    assert_eq!(
        outcome,
        Err(ReplayError::Action {
            bot: 0,
            step: 9,
            action: Action::Move(Direction::Up),
            source: ActionError::OutOfBounds(Point::new(0, 10)),
        })
    );
    assert_eq!(query::turn(&game), 9);
}

#[test]
fn streams_without_a_bot_are_reported() {
    let (_, outcome) = run(SWEEP, "D#Z");
    assert_eq!(outcome, Err(ReplayError::MissingBot { bot: 1 }));
}
