//! Keyframe program construction: style merging, waypoint reduction and
//! visibility windows.

pub mod merge;
pub mod visibility;
pub mod waypoints;

pub use merge::{AnimationProgram, Keyframe, KeyframeRule, merge_keyframes};
pub use visibility::{Window, collect_windows, visibility_keyframes};
pub use waypoints::{Waypoint, reduce_waypoints};
