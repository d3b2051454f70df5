//! Reconstruction of a boundary polygon from a set of cells.

use std::collections::{HashMap, HashSet};

use wrapbot_core::{Point, Polygon};

use crate::GeometryError;

/// Unit edges of a cell in counter-clockwise order, each paired with the
/// neighbour lying across it.
fn boundary_edges(cell: Point) -> [(Point, Point, Point); 4] {
    let (x, y) = (cell.x(), cell.y());
    [
        (Point::new(x, y), Point::new(x + 1, y), Point::new(x, y - 1)),
        (
            Point::new(x + 1, y),
            Point::new(x + 1, y + 1),
            Point::new(x + 1, y),
        ),
        (
            Point::new(x + 1, y + 1),
            Point::new(x, y + 1),
            Point::new(x, y + 1),
        ),
        (Point::new(x, y + 1), Point::new(x, y), Point::new(x - 1, y)),
    ]
}

/// Traces the outline of a simply connected cell set.
///
/// The result is counter-clockwise with collinear vertices merged, so that
/// [`rasterize_poly`](crate::rasterize_poly) reproduces exactly the input
/// cells. Sets with holes, several components, or cells touching only at a
/// corner are rejected as [`GeometryError::NotSimplyConnected`].
pub fn trace_poly(cells: &HashSet<Point>) -> Result<Polygon, GeometryError> {
    let mut next: HashMap<Point, Point> = HashMap::new();
    for &cell in cells {
        for (from, to, neighbour) in boundary_edges(cell) {
            if cells.contains(&neighbour) {
                continue;
            }
            if next.insert(from, to).is_some() {
                return Err(GeometryError::NotSimplyConnected);
            }
        }
    }

    let start = *next.keys().min().ok_or(GeometryError::EmptyShape)?;
    let mut outline = Vec::with_capacity(next.len());
    let mut current = start;
    loop {
        outline.push(current);
        current = *next.get(&current).ok_or(GeometryError::NotSimplyConnected)?;
        if current == start {
            break;
        }
        if outline.len() > next.len() {
            return Err(GeometryError::NotSimplyConnected);
        }
    }
    if outline.len() != next.len() {
        return Err(GeometryError::NotSimplyConnected);
    }

    Ok(merge_collinear(&outline))
}

fn merge_collinear(outline: &[Point]) -> Polygon {
    let count = outline.len();
    (0..count)
        .filter(|&index| {
            let previous = outline[(index + count - 1) % count];
            let vertex = outline[index];
            let following = outline[(index + 1) % count];
            vertex - previous != following - vertex
        })
        .map(|index| outline[index])
        .collect()
}
