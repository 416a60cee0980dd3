//! Overlay configuration: the serde model and the normalization pass that turns it
//! into a [`ResolvedConfig`].

pub mod model;
pub mod normalize;
pub mod pattern;

pub use model::{
    AnimationMode, ColorCycleConfig, CounterConfig, CyclePolicy, DisplayConfig, FramesPerLevel,
    ImageConfig, ImageMode, OverlayConfig, Palette, Placement, ProgressBarConfig,
};
pub use normalize::{
    ConfigError, LevelColors, LevelFrames, NormalizeContext, ResolvedConfig, ResolvedDisplay,
    ResolvedImage, normalize,
};
pub use pattern::{generate_frame_urls, generate_level_frame_urls};
