//! Text rendering of rasterized tasks.

use wrapbot_core::Point;
use wrapbot_world::GridTask;

/// Symbol marking the start cell.
pub(crate) const START_SYMBOL: char = '@';

/// Renders the terrain top row first, overlaying boosters and the start.
///
/// The start wins over a booster sharing its cell.
pub(crate) fn render(terrain: &GridTask) -> String {
    let grid = terrain.grid();
    let mut rows: Vec<Vec<char>> = grid
        .to_string()
        .lines()
        .map(|line| line.chars().collect())
        .collect();

    let markers = terrain
        .boosters()
        .iter()
        .map(|booster| (booster.pos(), booster.code().symbol()))
        .chain(std::iter::once((terrain.start(), START_SYMBOL)));
    for (point, symbol) in markers {
        if let Some(slot) = slot(&mut rows, point) {
            *slot = symbol;
        }
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn slot(rows: &mut [Vec<char>], point: Point) -> Option<&mut char> {
    let height = rows.len();
    let y = usize::try_from(point.y()).ok()?;
    let x = usize::try_from(point.x()).ok()?;
    let row = height.checked_sub(y + 1)?;
    rows.get_mut(row)?.get_mut(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapbot_core::Task;

    fn terrain(text: &str) -> GridTask {
        GridTask::new(&Task::parse(text).expect("valid task")).expect("valid terrain")
    }

    #[test]
    fn markers_are_drawn_over_the_terrain() {
        let rendered = render(&terrain(
            "(0,0),(4,0),(4,3),(0,3)#(0,0)#(1,1),(2,1),(2,2),(1,2)#B(3,2);X(3,0)",
        ));
        assert_eq!(rendered, "...B\n.#..\n@..X");
    }

    #[test]
    fn start_hides_a_booster_underneath() {
        let rendered = render(&terrain("(0,0),(2,0),(2,1),(0,1)#(1,0)##L(1,0)"));
        assert_eq!(rendered, ".@");
    }

    #[test]
    fn cells_outside_the_border_stay_walls() {
        let rendered = render(&terrain("(0,0),(3,0),(3,1),(1,1),(1,2),(0,2)#(0,0)##"));
        assert_eq!(rendered, ".##\n@..");
    }
}
