//! Scanline rasterization of axis-aligned polygons.

use wrapbot_core::{Cell, CellGrid, Point};

use crate::GeometryError;

/// Axis-aligned bounding box spanning `[x1, x2] × [y1, y2]` in vertex space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Smallest vertex `x`.
    pub x1: i32,
    /// Smallest vertex `y`.
    pub y1: i32,
    /// Largest vertex `x`.
    pub x2: i32,
    /// Largest vertex `y`.
    pub y2: i32,
}

/// Horizontal run of cells `[x1, x2)` on row `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Row {
    /// Row of the span.
    pub y: i32,
    /// First covered column.
    pub x1: i32,
    /// Column just past the last covered one.
    pub x2: i32,
}

impl Row {
    /// Cells covered by the span, left to right.
    pub fn cells(&self) -> impl Iterator<Item = Point> {
        let y = self.y;
        (self.x1..self.x2).map(move |x| Point::new(x, y))
    }

    /// Reports whether the span covers `point`.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.y() == self.y && self.x1 <= point.x() && point.x() < self.x2
    }
}

/// Computes the bounding box of the polygon's vertices.
#[must_use]
pub fn poly_bb(poly: &[Point]) -> Option<Rect> {
    let first = poly.first()?;
    let mut rect = Rect {
        x1: first.x(),
        y1: first.y(),
        x2: first.x(),
        y2: first.y(),
    };
    for point in poly {
        rect.x1 = rect.x1.min(point.x());
        rect.y1 = rect.y1.min(point.y());
        rect.x2 = rect.x2.max(point.x());
        rect.y2 = rect.y2.max(point.y());
    }
    Some(rect)
}

// End sorts before Start so that spans sharing a column stay separate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Crossing {
    End,
    Start,
}

/// Converts a closed counter-clockwise polygon into horizontal spans.
///
/// Every vertical edge contributes one crossing per covered row; each row's
/// crossings are sorted and paired into spans. Rows are returned bottom to
/// top, spans within a row left to right.
pub fn rasterize_poly(poly: &[Point]) -> Result<Vec<Row>, GeometryError> {
    let bb = poly_bb(poly).ok_or(GeometryError::EmptyPolygon)?;
    let row_count = usize::try_from(bb.y2 - bb.y1).unwrap_or(0);
    let mut crossings: Vec<Vec<(i32, Crossing)>> = vec![Vec::new(); row_count];

    for (index, &from) in poly.iter().enumerate() {
        let to = poly[(index + 1) % poly.len()];
        if from.y() == to.y() {
            continue;
        }
        if from.x() != to.x() {
            return Err(GeometryError::DiagonalEdge { from, to });
        }
        let (low, high, crossing) = if from.y() < to.y() {
            (from.y(), to.y(), Crossing::End)
        } else {
            (to.y(), from.y(), Crossing::Start)
        };
        for y in low..high {
            let slot = (y - bb.y1) as usize;
            crossings[slot].push((from.x(), crossing));
        }
    }

    let mut rows = Vec::new();
    for (offset, mut row) in crossings.into_iter().enumerate() {
        let y = bb.y1 + offset as i32;
        if row.len() % 2 != 0 {
            return Err(GeometryError::OddCrossings {
                y,
                count: row.len(),
            });
        }
        row.sort_unstable();
        for pair in row.chunks_exact(2) {
            let (x1, start) = pair[0];
            let (x2, end) = pair[1];
            if start != Crossing::Start || end != Crossing::End || x1 >= x2 {
                return Err(GeometryError::MalformedSpan { y, x1, x2 });
            }
            rows.push(Row { y, x1, x2 });
        }
    }
    Ok(rows)
}

/// Reports whether the cell at `point` lies inside the polygon.
pub fn point_in_poly(poly: &[Point], point: Point) -> Result<bool, GeometryError> {
    Ok(rasterize_poly(poly)?.iter().any(|row| row.contains(point)))
}

/// Overwrites the cells covered by `rows`, requiring each to hold `expected`.
///
/// Returns the number of cells painted. The first cell that is out of bounds
/// or holds anything other than `expected` aborts the fill.
pub fn paint_rows(
    grid: &mut CellGrid,
    rows: &[Row],
    expected: Cell,
    replacement: Cell,
) -> Result<usize, GeometryError> {
    let mut painted = 0;
    for row in rows {
        for point in row.cells() {
            match grid.get(point) {
                Some(found) if found == expected => {
                    let _ = grid
                        .set(point, replacement)
                        .map_err(|_| GeometryError::FillCollision {
                            point,
                            expected,
                            found: None,
                        })?;
                    painted += 1;
                }
                found => {
                    return Err(GeometryError::FillCollision {
                        point,
                        expected,
                        found,
                    })
                }
            }
        }
    }
    Ok(painted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: i32, y: i32, size: i32) -> Vec<Point> {
        vec![
            Point::new(x, y),
            Point::new(x + size, y),
            Point::new(x + size, y + size),
            Point::new(x, y + size),
        ]
    }

    #[test]
    fn unit_square_is_a_single_span() {
        assert_eq!(
            rasterize_poly(&square(0, 0, 1)),
            Ok(vec![Row { y: 0, x1: 0, x2: 1 }])
        );
    }

    #[test]
    fn bounding_box_covers_all_vertices() {
        let poly = vec![
            Point::new(2, 1),
            Point::new(5, 1),
            Point::new(5, 4),
            Point::new(2, 4),
        ];
        assert_eq!(
            poly_bb(&poly),
            Some(Rect {
                x1: 2,
                y1: 1,
                x2: 5,
                y2: 4
            })
        );
        assert_eq!(poly_bb(&[]), None);
    }

    #[test]
    fn u_shape_splits_rows_into_two_spans() {
        // 3 wide, 2 tall, with the top middle cell cut out.
        let poly = vec![
            Point::new(0, 0),
            Point::new(3, 0),
            Point::new(3, 2),
            Point::new(2, 2),
            Point::new(2, 1),
            Point::new(1, 1),
            Point::new(1, 2),
            Point::new(0, 2),
        ];
        let rows = rasterize_poly(&poly).expect("valid polygon");
        assert_eq!(
            rows,
            vec![
                Row { y: 0, x1: 0, x2: 3 },
                Row { y: 1, x1: 0, x2: 1 },
                Row { y: 1, x1: 2, x2: 3 },
            ]
        );
    }

    #[test]
    fn clockwise_polygons_are_malformed() {
        let mut poly = square(0, 0, 2);
        poly.reverse();
        assert!(matches!(
            rasterize_poly(&poly),
            Err(GeometryError::MalformedSpan { y: 0, .. })
        ));
    }

    #[test]
    fn diagonal_edges_are_rejected() {
        let poly = vec![Point::new(0, 0), Point::new(2, 0), Point::new(0, 2)];
        assert_eq!(
            rasterize_poly(&poly),
            Err(GeometryError::DiagonalEdge {
                from: Point::new(2, 0),
                to: Point::new(0, 2)
            })
        );
    }

    #[test]
    fn degenerate_outline_is_rejected() {
        let poly = vec![
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(2, 2),
            Point::new(2, 2),
            Point::new(2, 0),
        ];
        assert!(matches!(
            rasterize_poly(&poly),
            Err(GeometryError::OddCrossings { .. }) | Err(GeometryError::MalformedSpan { .. })
        ));
    }

    #[test]
    fn point_in_poly_uses_half_open_cells() {
        let poly = square(1, 1, 2);
        assert_eq!(point_in_poly(&poly, Point::new(1, 1)), Ok(true));
        assert_eq!(point_in_poly(&poly, Point::new(2, 2)), Ok(true));
        assert_eq!(point_in_poly(&poly, Point::new(3, 1)), Ok(false));
        assert_eq!(point_in_poly(&poly, Point::new(0, 1)), Ok(false));
    }

    #[test]
    fn paint_rows_rejects_unexpected_cells() {
        let mut grid = CellGrid::new(3, 3, Cell::Wall);
        let rows = rasterize_poly(&square(0, 0, 2)).expect("valid");
        assert_eq!(paint_rows(&mut grid, &rows, Cell::Wall, Cell::Free), Ok(4));
        assert_eq!(
            paint_rows(&mut grid, &rows, Cell::Wall, Cell::Free),
            Err(GeometryError::FillCollision {
                point: Point::new(0, 0),
                expected: Cell::Wall,
                found: Some(Cell::Free)
            })
        );
    }

    #[test]
    fn paint_rows_rejects_spans_outside_the_grid() {
        let mut grid = CellGrid::new(2, 2, Cell::Wall);
        let rows = rasterize_poly(&square(1, 1, 2)).expect("valid");
        assert_eq!(
            paint_rows(&mut grid, &rows, Cell::Wall, Cell::Free),
            Err(GeometryError::FillCollision {
                point: Point::new(2, 1),
                expected: Cell::Wall,
                found: None
            })
        );
    }
}
