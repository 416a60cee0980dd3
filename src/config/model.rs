use std::fmt;
use std::sync::Arc;

/// Snake body colors: either a fixed list cycled over segments, or a function of
/// `(segment_index, segment_count)`.
///
/// Resolved once into a flat table by [`Palette::resolve`] before any per-step work.
#[derive(Clone, serde::Deserialize)]
#[serde(from = "PaletteDef")]
pub enum Palette {
    /// Colors repeated over the segments.
    Fixed(Vec<String>),
    /// Color computed per segment.
    Computed(Arc<dyn Fn(usize, usize) -> String + Send + Sync>),
}

impl Palette {
    /// Flatten into exactly `count` entries. Empty fixed lists resolve to nothing.
    pub fn resolve(&self, count: usize) -> Vec<String> {
        match self {
            Self::Fixed(colors) if colors.is_empty() => Vec::new(),
            Self::Fixed(colors) => (0..count).map(|i| colors[i % colors.len()].clone()).collect(),
            Self::Computed(f) => (0..count).map(|i| f(i, count)).collect(),
        }
    }

    /// Number of distinct entries a fixed palette holds; `None` for computed ones.
    pub fn fixed_len(&self) -> Option<usize> {
        match self {
            Self::Fixed(colors) => Some(colors.len()),
            Self::Computed(_) => None,
        }
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(colors) => f.debug_tuple("Fixed").field(colors).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum PaletteDef {
    One(String),
    Many(Vec<String>),
}

impl From<PaletteDef> for Palette {
    fn from(def: PaletteDef) -> Self {
        match def {
            PaletteDef::One(c) => Self::Fixed(vec![c]),
            PaletteDef::Many(cs) => Self::Fixed(cs),
        }
    }
}

/// Top-level overlay configuration as read from JSON.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayConfig {
    /// Side of one grid cell, px.
    pub cell_size_px: f64,
    /// Side of one drawn dot inside a cell, px.
    pub dot_size_px: f64,
    /// Fill for levels `1..=K`, index 0 is level 1.
    pub color_by_level: Vec<String>,
    /// Fill for empty and eaten cells.
    pub color_empty: String,
    /// Snake body fill.
    pub color_snake: Palette,
    /// Number of body segments, head included.
    pub snake_length: usize,
    /// Wall-clock duration of one path step.
    pub step_duration_ms: f64,
    /// Duration of one sprite frame.
    pub animation_frame_duration_ms: f64,
    /// Optional flowing color along the body.
    pub snake_color_cycle: Option<ColorCycleConfig>,
    /// Optional progress bar under the grid.
    pub progress_bar: Option<ProgressBarConfig>,
    /// Optional counter displays.
    pub counter_config: Option<CounterConfig>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            cell_size_px: 16.0,
            dot_size_px: 12.0,
            color_by_level: ["#9be9a8", "#40c463", "#30a14e", "#216e39"]
                .into_iter()
                .map(String::from)
                .collect(),
            color_empty: "#ebedf0".to_string(),
            color_snake: Palette::Fixed(vec!["purple".to_string()]),
            snake_length: 4,
            step_duration_ms: 100.0,
            animation_frame_duration_ms: 100.0,
            snake_color_cycle: None,
            progress_bar: None,
            counter_config: None,
        }
    }
}

/// When the body colors shift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CyclePolicy {
    /// Shift on every step.
    EveryStep,
    /// Shift only when the head eats a colored cell.
    OnConsume,
}

/// Color cycling along the snake body.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorCycleConfig {
    /// Shift timing.
    pub policy: CyclePolicy,
    /// Colors to cycle through.
    pub palette: Palette,
}

/// Progress bar geometry.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressBarConfig {
    /// Bar height, px.
    pub height_px: f64,
    /// Gap between the grid and the bar, px.
    pub gap_px: f64,
}

impl Default for ProgressBarConfig {
    fn default() -> Self {
        Self {
            height_px: 8.0,
            gap_px: 4.0,
        }
    }
}

/// Counter displays. Each entry is kept as raw JSON so that one malformed display
/// is rejected on its own during normalization instead of failing the whole parse.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CounterConfig {
    /// Raw display definitions, see [`DisplayConfig`].
    pub displays: Vec<serde_json::Value>,
}

/// Horizontal placement policy of a counter display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Pinned to the left edge.
    FixedLeft,
    /// Pinned to the right edge.
    FixedRight,
    /// Tracks cumulative share plus an offset.
    Follow,
    /// Tracks elapsed time only.
    Free,
}

/// One counter display.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DisplayConfig {
    /// Horizontal placement.
    pub position: Placement,
    /// Text size, px.
    #[serde(default = "default_font_size")]
    pub font_size_px: f64,
    /// Text template, placeholders `{count}` and `{percent}`.
    #[serde(default = "default_format")]
    pub format: String,
    /// Added to the `follow` position, px.
    #[serde(default)]
    pub offset_px: f64,
    /// Sprite images riding with the text.
    #[serde(default)]
    pub images: Vec<ImageConfig>,
}

fn default_font_size() -> f64 {
    12.0
}

fn default_format() -> String {
    "{count} contributions".to_string()
}

/// How an image's frames are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageMode {
    /// One static image.
    Single,
    /// One horizontal strip of frames per level.
    SpriteSheet,
    /// One file per frame.
    MultiFile,
}

/// How the displayed frame is chosen over time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationMode {
    /// One frame per path step.
    #[default]
    SyncedToSteps,
    /// Level 0 looping on its own clock.
    IndependentLoop,
    /// Level picked from the step's contribution, switched on cycle boundaries.
    LevelBucketed,
}

/// Frame count per level: one number for every level, or one entry per level.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum FramesPerLevel {
    /// Same count for every level.
    Uniform(u32),
    /// Explicit count per level.
    PerLevel(Vec<u32>),
}

/// One sprite image attached to a display.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageConfig {
    /// Image URL, sprite-sheet URL (may contain `{level}`), or multi-file base path.
    /// May contain `*`/`?` wildcards resolved against known assets.
    pub url: String,
    /// Frame storage.
    pub mode: ImageMode,
    /// Frames per level.
    #[serde(default)]
    pub frames_per_level: Option<FramesPerLevel>,
    /// Number of levels; inferred from `framesPerLevel` when it is a list.
    #[serde(default)]
    pub levels: Option<u32>,
    /// Multi-file naming pattern relative to `url`, placeholders `{n}` and `{level}`.
    #[serde(default)]
    pub frame_pattern: Option<String>,
    /// Frame selection.
    #[serde(default)]
    pub animation_mode: AnimationMode,
    /// Drawn width, px.
    #[serde(default = "default_image_size")]
    pub width_px: f64,
    /// Drawn height, px.
    #[serde(default = "default_image_size")]
    pub height_px: f64,
}

fn default_image_size() -> f64 {
    32.0
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
