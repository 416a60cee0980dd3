//! Counter displays: per-step sampling, sprite frame scheduling and rendering.

pub mod display;
pub mod sampler;
pub mod sprite;

pub use display::{DisplayLayout, DisplayTiming, display_height, render_display};
pub use sampler::{
    CounterSample, DisplayState, contribution_level, display_states, horizontal_position,
    sample_counter,
};
pub use sprite::{SpriteAnimationState, SpriteFrame, SpriteFrameScheduler};
