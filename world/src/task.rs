//! Terrain built from a parsed task description.

use wrapbot_core::{Booster, Cell, CellGrid, Point, Task};
use wrapbot_geometry::{paint_rows, poly_bb, rasterize_poly, GeometryError};

use crate::TaskError;

/// Map terrain, start point and boosters ready to seed a [`Game`](crate::Game).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridTask {
    grid: CellGrid,
    start: Point,
    boosters: Vec<Booster>,
}

impl GridTask {
    /// Rasterizes the border and obstacles of `task` into a grid.
    ///
    /// The grid spans from the origin to the top-right corner of the border.
    /// It starts as solid wall; the border is carved out and obstacles are
    /// filled back in, and each fill must only meet the terrain it replaces.
    pub fn new(task: &Task) -> Result<Self, TaskError> {
        let bounds = poly_bb(&task.border).ok_or(GeometryError::EmptyPolygon)?;
        if bounds.x1 < 0 || bounds.y1 < 0 {
            return Err(TaskError::NegativeBorder);
        }
        let width = u32::try_from(bounds.x2).map_err(|_| TaskError::NegativeBorder)?;
        let height = u32::try_from(bounds.y2).map_err(|_| TaskError::NegativeBorder)?;

        let mut grid = CellGrid::new(width, height, Cell::Wall);
        let border = rasterize_poly(&task.border)?;
        let _ = paint_rows(&mut grid, &border, Cell::Wall, Cell::Free)?;
        for obstacle in &task.obstacles {
            let rows = rasterize_poly(obstacle)?;
            let _ = paint_rows(&mut grid, &rows, Cell::Free, Cell::Wall)?;
        }

        if grid.get(task.start) != Some(Cell::Free) {
            return Err(TaskError::StartBlocked(task.start));
        }
        if let Some(booster) = task
            .boosters
            .iter()
            .find(|booster| grid.get(booster.pos()) != Some(Cell::Free))
        {
            return Err(TaskError::BoosterBlocked(booster.pos()));
        }

        Ok(Self {
            grid,
            start: task.start,
            boosters: task.boosters.clone(),
        })
    }

    /// Rasterized terrain.
    #[must_use]
    pub const fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Start position of the first bot.
    #[must_use]
    pub const fn start(&self) -> Point {
        self.start
    }

    /// Boosters and spawn markers, in task order.
    #[must_use]
    pub fn boosters(&self) -> &[Booster] {
        &self.boosters
    }

    pub(crate) fn into_parts(self) -> (CellGrid, Point, Vec<Booster>) {
        (self.grid, self.start, self.boosters)
    }
}
