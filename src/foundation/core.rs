use crate::foundation::error::{GridSnakeError, GridSnakeResult};

pub use kurbo::Point;

/// Half-width of the instantaneous style switch used by step-like programs.
///
/// Two keyframes at `t - EPS` and `t + EPS` render as a hard cut while still
/// formatting to distinct two-decimal percentages.
pub const EPS: f64 = 0.0001;

/// Integer cell coordinate. Paths may leave the grid, so coordinates are signed.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GridPos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl GridPos {
    /// Create a position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Top-left corner of this cell in pixels.
    pub fn to_px(self, cell_size_px: f64) -> Point {
        Point::new(f64::from(self.x) * cell_size_px, f64::from(self.y) * cell_size_px)
    }
}

/// Static contribution grid. `levels[y][x]` is 0 for empty cells, `1..=K` otherwise.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Row-major intensity levels.
    pub levels: Vec<Vec<u8>>,
    /// Optional raw contribution counts, same shape as `levels`.
    #[serde(default)]
    pub counts: Option<Vec<Vec<u32>>>,
}

impl Grid {
    /// Build a grid from row-major levels.
    pub fn from_levels(levels: Vec<Vec<u8>>) -> GridSnakeResult<Self> {
        let height = u32::try_from(levels.len())
            .map_err(|_| GridSnakeError::validation("grid has too many rows"))?;
        let width = levels.first().map_or(0, |r| r.len());
        let width = u32::try_from(width)
            .map_err(|_| GridSnakeError::validation("grid has too many columns"))?;
        let grid = Self {
            width,
            height,
            levels,
            counts: None,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Check that `levels` (and `counts`, when present) match `width × height`.
    pub fn validate(&self) -> GridSnakeResult<()> {
        check_shape("levels", self.width, self.height, &self.levels)?;
        if let Some(counts) = &self.counts {
            check_shape("counts", self.width, self.height, counts)?;
        }
        Ok(())
    }

    /// Level at `pos`; 0 outside the grid.
    pub fn level_at(&self, pos: GridPos) -> u8 {
        self.cell(pos, &self.levels).unwrap_or(0)
    }

    /// Weight a cell contributes when eaten: its raw count when counts are known,
    /// otherwise its level. Empty cells weigh nothing.
    pub fn weight_at(&self, pos: GridPos) -> f64 {
        let level = self.level_at(pos);
        if level == 0 {
            return 0.0;
        }
        match &self.counts {
            Some(counts) => f64::from(self.cell(pos, counts).unwrap_or(0)),
            None => f64::from(level),
        }
    }

    /// Highest level present in the grid.
    pub fn max_level(&self) -> u8 {
        self.levels
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Iterate every cell as `(pos, level)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (GridPos, u8)> + '_ {
        self.levels.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &level)| (GridPos::new(x as i32, y as i32), level))
        })
    }

    fn cell<T: Copy>(&self, pos: GridPos, rows: &[Vec<T>]) -> Option<T> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        rows.get(y)?.get(x).copied()
    }
}

fn check_shape<T>(what: &str, width: u32, height: u32, rows: &[Vec<T>]) -> GridSnakeResult<()> {
    if rows.len() != height as usize {
        return Err(GridSnakeError::validation(format!(
            "grid {what} has {} rows, expected {height}",
            rows.len()
        )));
    }
    if let Some((y, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != width as usize)
    {
        return Err(GridSnakeError::validation(format!(
            "grid {what} row {y} has {} cells, expected {width}",
            row.len()
        )));
    }
    Ok(())
}

/// One discrete sample of the snake head and the grid level beneath it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathStep {
    /// 0-based step index.
    pub index: usize,
    /// Head cell.
    pub head: GridPos,
    /// Grid level at `head` (0 = empty or outside the grid).
    pub color_at_head: u8,
}

/// Pair every head position with the grid level beneath it.
pub fn build_steps(grid: &Grid, path: &[GridPos]) -> Vec<PathStep> {
    path.iter()
        .enumerate()
        .map(|(index, &head)| PathStep {
            index,
            head,
            color_at_head: grid.level_at(head),
        })
        .collect()
}

/// Linear interpolation from `a` (k = 0) to `b` (k = 1).
pub(crate) fn lerp(k: f64, a: f64, b: f64) -> f64 {
    (1.0 - k) * a + k * b
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
