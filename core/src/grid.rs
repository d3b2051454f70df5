//! Dense rectangular grids indexed by [`Point`].

use std::fmt;

use thiserror::Error;

use crate::Point;

/// Error raised when a grid is accessed outside its bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("index {point} is outside a {width}x{height} grid")]
pub struct OutOfBounds {
    /// Point that was requested.
    pub point: Point,
    /// Width of the grid that rejected the access.
    pub width: u32,
    /// Height of the grid that rejected the access.
    pub height: u32,
}

/// Row-major rectangular array of values addressed by [`Point`].
///
/// Row `0` holds the cells with `y == 0`. Copies are only made through
/// [`Clone`], never implicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Creates a grid of the provided size with every cell set to `fill`.
    #[must_use]
    pub fn new(width: u32, height: u32, fill: T) -> Self {
        let capacity_u64 = u64::from(width) * u64::from(height);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            width,
            height,
            cells: vec![fill; capacity],
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether `point` addresses a cell of this grid.
    #[must_use]
    pub fn in_bounds(&self, point: Point) -> bool {
        self.index(point).is_some()
    }

    /// Value stored at `point`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, point: Point) -> Option<T> {
        self.index(point).map(|index| self.cells[index])
    }

    /// Mutable access to the value stored at `point`.
    pub fn get_mut(&mut self, point: Point) -> Option<&mut T> {
        self.index(point).map(|index| &mut self.cells[index])
    }

    /// Replaces the value at `point`, returning the previous one.
    pub fn set(&mut self, point: Point, value: T) -> Result<T, OutOfBounds> {
        let error = self.out_of_bounds(point);
        let slot = self.get_mut(point).ok_or(error)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Iterates over every cell together with its location, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Point, T)> + '_ {
        let width = self.width.max(1) as usize;
        self.cells.iter().enumerate().map(move |(index, value)| {
            let x = (index % width) as i32;
            let y = (index / width) as i32;
            (Point::new(x, y), *value)
        })
    }

    fn index(&self, point: Point) -> Option<usize> {
        let column = u32::try_from(point.x()).ok()?;
        let row = u32::try_from(point.y()).ok()?;
        if column < self.width && row < self.height {
            let row = usize::try_from(row).ok()?;
            let column = usize::try_from(column).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    fn out_of_bounds(&self, point: Point) -> OutOfBounds {
        OutOfBounds {
            point,
            width: self.width,
            height: self.height,
        }
    }
}

impl<T: Copy + PartialEq> Grid<T> {
    /// Writes `value` into every listed cell, returning how many cells changed.
    pub fn update_values(&mut self, points: &[Point], value: T) -> Result<usize, OutOfBounds> {
        let mut updated = 0;
        for &point in points {
            if self.set(point, value)? != value {
                updated += 1;
            }
        }
        Ok(updated)
    }

    /// Counts the cells holding `value`.
    #[must_use]
    pub fn count(&self, value: T) -> usize {
        self.cells.iter().filter(|cell| **cell == value).count()
    }
}

/// Terrain symbol stored in the map grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Passable terrain that can be wrapped.
    Free,
    /// Impassable terrain; only drilling turns it into [`Cell::Free`].
    Wall,
}

impl Cell {
    /// Single-character symbol of the cell.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Free => '.',
            Self::Wall => '#',
        }
    }

    /// Parses a cell from its symbol.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Free),
            '#' => Some(Self::Wall),
            _ => None,
        }
    }

    /// Reports whether bots may stand on the cell.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        matches!(self, Self::Free)
    }
}

/// Map terrain grid.
pub type CellGrid = Grid<Cell>;

impl CellGrid {
    /// Builds a grid from text rows, the first row being the highest `y`.
    ///
    /// Returns `None` when the rows are ragged or contain unknown symbols.
    #[must_use]
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let height = u32::try_from(rows.len()).ok()?;
        let width = u32::try_from(rows.first().map_or(0, |row| row.chars().count())).ok()?;
        let mut grid = Self::new(width, height, Cell::Wall);
        for (row_index, row) in rows.iter().rev().enumerate() {
            if row.chars().count() != width as usize {
                return None;
            }
            for (column, symbol) in row.chars().enumerate() {
                let cell = Cell::from_symbol(symbol)?;
                let point = Point::new(i32::try_from(column).ok()?, i32::try_from(row_index).ok()?);
                let _ = grid.set(point, cell).ok()?;
            }
        }
        Some(grid)
    }
}

impl fmt::Display for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.height).rev() {
            for column in 0..self.width {
                let point = Point::new(column as i32, row as i32);
                let symbol = self.get(point).map_or('?', Cell::symbol);
                write!(f, "{symbol}")?;
            }
            if row != 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
