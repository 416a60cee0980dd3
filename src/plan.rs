//! Timeline planners: per-cell decay, snake body, and progress bar.
//!
//! Planners are pure. They turn the path and the resolved configuration into
//! [`AnimationProgram`](crate::keyframes::AnimationProgram)s plus per-element
//! parameters; turning those into markup is left to [`crate::compile`].

pub mod grid_cells;
pub mod progress;
pub mod snake;

pub use grid_cells::{CellPlan, GridCellState, PlannedCell, cell_states, plan_grid_cells};
pub use progress::{ProgressEvent, ProgressRun, run_programs, segment_runs};
pub use snake::{SegmentPlan, SegmentShape, SnakePlan, plan_snake, segment_shape};
