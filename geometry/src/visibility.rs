//! Line-of-sight between cell centres.

use wrapbot_core::{Cell, CellGrid, Point};

/// Reports whether the centre of `to` can be seen from the centre of `from`.
///
/// The segment between both centres is sampled in steps of
/// `1 / (2(|dx| + |dy|) + 1)` of its length, each sample truncated to the cell
/// containing it. Every sampled cell must be free and in bounds. Samples are
/// computed with integer arithmetic in units of `1 / (2n)` cells, so they never
/// fall on a cell boundary and the same cells are visited in both directions.
#[must_use]
pub fn visible(grid: &CellGrid, from: Point, to: Point) -> bool {
    let delta = to - from;
    let steps = 2 * (i64::from(delta.x()).abs() + i64::from(delta.y()).abs()) + 1;
    let scale = 2 * steps;
    let origin_x = (2 * i64::from(from.x()) + 1) * steps;
    let origin_y = (2 * i64::from(from.y()) + 1) * steps;

    for step in 1..=steps {
        let x = (origin_x + 2 * step * i64::from(delta.x())).div_euclid(scale);
        let y = (origin_y + 2 * step * i64::from(delta.y())).div_euclid(scale);
        let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
            return false;
        };
        let cell = Point::new(x, y);
        if grid.get(cell) != Some(Cell::Free) {
            return false;
        }
        if cell == to {
            return true;
        }
    }
    false
}
