use std::fmt;

use rand::RngCore;

use crate::assets::wildcard::{is_wildcard, pick_wildcard};
use crate::config::model::{
    AnimationMode, CyclePolicy, DisplayConfig, FramesPerLevel, ImageConfig, ImageMode,
    OverlayConfig, Placement, ProgressBarConfig,
};
use crate::config::pattern::{
    DEFAULT_FRAME_PATTERN, DEFAULT_LEVEL_FRAME_PATTERN, Template, generate_level_frame_urls,
};
use crate::foundation::error::{GridSnakeError, GridSnakeResult};

/// Longest accepted snake, in segments.
pub const MAX_SNAKE_LENGTH: usize = 1024;
/// Most levels an image may declare.
pub const MAX_IMAGE_LEVELS: u32 = 64;
/// Most frames a single image level may declare.
pub const MAX_FRAMES_PER_LEVEL: u32 = 4096;

/// Collaborators consulted while normalizing.
pub struct NormalizeContext<'a> {
    /// Asset references known to exist, used to expand wildcard URLs.
    pub available_assets: &'a [String],
    /// Tie-breaker for wildcard URLs matching several assets.
    pub rng: &'a mut dyn RngCore,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathElem {
    Field(&'static str),
    Index(usize),
}

/// A configuration problem located by a JSON-path-like trail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    pub path: Vec<PathElem>,
    pub message: String,
}

impl ConfigError {
    fn at(path: &[PathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::from("$");
        for p in &self.path {
            match *p {
                PathElem::Field(name) => {
                    s.push('.');
                    s.push_str(name);
                }
                PathElem::Index(i) => {
                    s.push('[');
                    s.push_str(&i.to_string());
                    s.push(']');
                }
            }
        }
        write!(f, "{s}: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Cell fills addressed through CSS custom properties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelColors {
    /// Empty / eaten cell fill.
    pub empty: String,
    /// Fill of level `i + 1`.
    pub by_level: Vec<String>,
}

impl LevelColors {
    /// `var(--ce)` for level 0, `var(--cN)` otherwise, clamped to the last level.
    pub fn var_for(&self, level: u8) -> String {
        match usize::from(level).min(self.by_level.len()) {
            0 => "var(--ce)".to_string(),
            n => format!("var(--c{n})"),
        }
    }

    /// Root declarations `--ce:..;--c1:..;...`.
    pub fn custom_properties(&self) -> String {
        let mut out = format!("--ce:{}", self.empty);
        for (i, c) in self.by_level.iter().enumerate() {
            out.push_str(&format!(";--c{}:{c}", i + 1));
        }
        out
    }

    /// Literal color of `level`, clamped to the last configured level.
    pub fn literal_for(&self, level: u8) -> &str {
        if level == 0 {
            return &self.empty;
        }
        let i = usize::from(level - 1).min(self.by_level.len().saturating_sub(1));
        self.by_level.get(i).map_or(self.empty.as_str(), String::as_str)
    }
}

/// Snake body after palette resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSnake {
    pub length: usize,
    /// One static fill per segment.
    pub colors: Vec<String>,
    pub cycle: Option<ResolvedCycle>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCycle {
    pub policy: CyclePolicy,
    pub palette: Vec<String>,
}

/// Frames of one intensity level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelFrames {
    pub frame_count: u32,
    /// One href per frame (multi-file) or a single href (single image, sprite sheet).
    pub hrefs: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedImage {
    pub mode: ImageMode,
    pub animation_mode: AnimationMode,
    pub levels: Vec<LevelFrames>,
    pub width_px: f64,
    pub height_px: f64,
}

impl ResolvedImage {
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Frame count of `level`; 0 when the level does not exist.
    pub fn frames_in(&self, level: usize) -> u32 {
        self.levels.get(level).map_or(0, |l| l.frame_count)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedDisplay {
    /// Position in the configured display list.
    pub index: usize,
    pub placement: Placement,
    pub font_size_px: f64,
    pub format: Template,
    pub offset_px: f64,
    pub images: Vec<ResolvedImage>,
}

/// Fully validated configuration. Later stages read nothing else.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub cell_size_px: f64,
    pub dot_size_px: f64,
    pub colors: LevelColors,
    pub snake: ResolvedSnake,
    pub step_duration_ms: f64,
    pub frame_duration_ms: f64,
    pub progress_bar: Option<ProgressBarConfig>,
    pub displays: Vec<ResolvedDisplay>,
    /// Problems that disabled individual displays.
    pub diagnostics: Vec<ConfigError>,
}

impl ResolvedConfig {
    /// Every image href any display may reference, for asset embedding.
    pub fn asset_references(&self) -> Vec<String> {
        let mut refs: Vec<String> = self
            .displays
            .iter()
            .flat_map(|d| d.images.iter())
            .flat_map(|img| img.levels.iter())
            .flat_map(|l| l.hrefs.iter().cloned())
            .collect();
        refs.sort();
        refs.dedup();
        refs
    }
}

/// Validate `cfg` and resolve it into a [`ResolvedConfig`].
///
/// Problems with the grid-wide settings fail the call. A broken counter display is
/// dropped and reported in [`ResolvedConfig::diagnostics`] instead.
pub fn normalize(
    cfg: &OverlayConfig,
    ctx: &mut NormalizeContext<'_>,
) -> GridSnakeResult<ResolvedConfig> {
    let mut errors = Vec::new();
    check_positive(&mut errors, "cellSizePx", cfg.cell_size_px);
    check_positive(&mut errors, "dotSizePx", cfg.dot_size_px);
    check_positive(&mut errors, "stepDurationMs", cfg.step_duration_ms);
    check_positive(
        &mut errors,
        "animationFrameDurationMs",
        cfg.animation_frame_duration_ms,
    );
    if cfg.dot_size_px > cfg.cell_size_px {
        errors.push(ConfigError::at(
            &[PathElem::Field("dotSizePx")],
            "must not exceed cellSizePx",
        ));
    }
    if cfg.color_by_level.is_empty() {
        errors.push(ConfigError::at(
            &[PathElem::Field("colorByLevel")],
            "at least one level color is required",
        ));
    }
    if cfg.snake_length == 0 {
        errors.push(ConfigError::at(
            &[PathElem::Field("snakeLength")],
            "snake needs at least a head",
        ));
    }
    if cfg.snake_length > MAX_SNAKE_LENGTH {
        errors.push(ConfigError::at(
            &[PathElem::Field("snakeLength")],
            format!("must be at most {MAX_SNAKE_LENGTH}, got {}", cfg.snake_length),
        ));
    }
    let snake_length = cfg.snake_length.min(MAX_SNAKE_LENGTH);
    let snake_colors = cfg.color_snake.resolve(snake_length);
    if snake_colors.is_empty() && snake_length > 0 {
        errors.push(ConfigError::at(
            &[PathElem::Field("colorSnake")],
            "palette is empty",
        ));
    }
    let cycle = cfg.snake_color_cycle.as_ref().map(|c| {
        let n = c.palette.fixed_len().unwrap_or(snake_length);
        ResolvedCycle {
            policy: c.policy,
            palette: c.palette.resolve(n),
        }
    });
    if cycle.as_ref().is_some_and(|c| c.palette.is_empty()) {
        errors.push(ConfigError::at(
            &[
                PathElem::Field("snakeColorCycle"),
                PathElem::Field("palette"),
            ],
            "palette is empty",
        ));
    }
    if let Some(bar) = &cfg.progress_bar {
        if !(bar.height_px.is_finite() && bar.height_px > 0.0) {
            errors.push(ConfigError::at(
                &[PathElem::Field("progressBar"), PathElem::Field("heightPx")],
                "must be a positive number",
            ));
        }
        if !bar.gap_px.is_finite() {
            errors.push(ConfigError::at(
                &[PathElem::Field("progressBar"), PathElem::Field("gapPx")],
                "must be finite",
            ));
        }
    }
    if !errors.is_empty() {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(GridSnakeError::config(joined));
    }

    let mut displays = Vec::new();
    let mut diagnostics = Vec::new();
    let raw_displays = cfg
        .counter_config
        .as_ref()
        .map_or(&[][..], |c| c.displays.as_slice());
    for (index, raw) in raw_displays.iter().enumerate() {
        let path = [
            PathElem::Field("counterConfig"),
            PathElem::Field("displays"),
            PathElem::Index(index),
        ];
        match normalize_display(index, raw, &path, ctx) {
            Ok(d) => displays.push(d),
            Err(errs) => {
                for e in &errs {
                    tracing::warn!(display = index, "{e}; display disabled");
                }
                diagnostics.extend(errs);
            }
        }
    }

    Ok(ResolvedConfig {
        cell_size_px: cfg.cell_size_px,
        dot_size_px: cfg.dot_size_px,
        colors: LevelColors {
            empty: cfg.color_empty.clone(),
            by_level: cfg.color_by_level.clone(),
        },
        snake: ResolvedSnake {
            length: cfg.snake_length,
            colors: snake_colors,
            cycle,
        },
        step_duration_ms: cfg.step_duration_ms,
        frame_duration_ms: cfg.animation_frame_duration_ms,
        progress_bar: cfg.progress_bar.clone(),
        displays,
        diagnostics,
    })
}

fn check_positive(errors: &mut Vec<ConfigError>, field: &'static str, v: f64) {
    if !(v.is_finite() && v > 0.0) {
        errors.push(ConfigError::at(
            &[PathElem::Field(field)],
            format!("must be a positive number, got {v}"),
        ));
    }
}

fn normalize_display(
    index: usize,
    raw: &serde_json::Value,
    path: &[PathElem],
    ctx: &mut NormalizeContext<'_>,
) -> Result<ResolvedDisplay, Vec<ConfigError>> {
    let def: DisplayConfig = serde_json::from_value(raw.clone())
        .map_err(|e| vec![ConfigError::at(path, e.to_string())])?;

    let mut errors = Vec::new();
    let field = |name: &'static str| {
        let mut p = path.to_vec();
        p.push(PathElem::Field(name));
        p
    };

    if !(def.font_size_px.is_finite() && def.font_size_px > 0.0) {
        errors.push(ConfigError::at(
            &field("fontSizePx"),
            "must be a positive number",
        ));
    }
    if !def.offset_px.is_finite() {
        errors.push(ConfigError::at(&field("offsetPx"), "must be finite"));
    }
    let format = Template::parse(&def.format, &["count", "percent"])
        .map_err(|m| errors.push(ConfigError::at(&field("format"), m)))
        .ok();

    let mut images = Vec::with_capacity(def.images.len());
    for (i, img) in def.images.iter().enumerate() {
        let mut p = field("images");
        p.push(PathElem::Index(i));
        match normalize_image(img, &p, ctx) {
            Ok(r) => images.push(r),
            Err(errs) => errors.extend(errs),
        }
    }

    match format {
        Some(format) if errors.is_empty() => Ok(ResolvedDisplay {
            index,
            placement: def.position,
            font_size_px: def.font_size_px,
            format,
            offset_px: def.offset_px,
            images,
        }),
        _ => Err(errors),
    }
}

fn normalize_image(
    img: &ImageConfig,
    path: &[PathElem],
    ctx: &mut NormalizeContext<'_>,
) -> Result<ResolvedImage, Vec<ConfigError>> {
    let field = |name: &'static str| {
        let mut p = path.to_vec();
        p.push(PathElem::Field(name));
        p
    };
    let mut errors = Vec::new();

    let mut url = img.url.trim().to_string();
    if url.is_empty() {
        errors.push(ConfigError::at(&field("url"), "is required"));
    } else if is_wildcard(&url) {
        match pick_wildcard(&url, ctx.available_assets, &mut *ctx.rng) {
            Some(picked) => {
                tracing::debug!(pattern = %img.url, %picked, "wildcard asset selected");
                url = picked;
            }
            None => errors.push(ConfigError::at(
                &field("url"),
                format!("no known asset matches '{}'", img.url),
            )),
        }
    }
    for (name, v) in [("widthPx", img.width_px), ("heightPx", img.height_px)] {
        if !(v.is_finite() && v > 0.0) {
            errors.push(ConfigError::at(&field(name), "must be a positive number"));
        }
    }

    let counts = match frame_counts(img) {
        Ok(c) => c,
        Err((name, msg)) => {
            errors.push(ConfigError::at(&field(name), msg));
            Vec::new()
        }
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    let multi_level = counts.len() > 1;
    let levels = match img.mode {
        ImageMode::Single => vec![LevelFrames {
            frame_count: 1,
            hrefs: vec![url],
        }],
        ImageMode::SpriteSheet => {
            let t = Template::parse(&url, &["level"])
                .map_err(|m| vec![ConfigError::at(&field("url"), m)])?;
            if multi_level && !t.has("level") {
                return Err(vec![ConfigError::at(
                    &field("url"),
                    "sprite sheets with several levels need a {level} placeholder",
                )]);
            }
            counts
                .iter()
                .enumerate()
                .map(|(level, &frame_count)| LevelFrames {
                    frame_count,
                    hrefs: vec![t.render(|_| Some(level.to_string()))],
                })
                .collect()
        }
        ImageMode::MultiFile => {
            let pattern = img.frame_pattern.as_deref().unwrap_or(if multi_level {
                DEFAULT_LEVEL_FRAME_PATTERN
            } else {
                DEFAULT_FRAME_PATTERN
            });
            let t = Template::parse(pattern, &["n", "level"])
                .map_err(|m| vec![ConfigError::at(&field("framePattern"), m)])?;
            if !t.has("n") {
                return Err(vec![ConfigError::at(
                    &field("framePattern"),
                    format!("'{pattern}' has no {{n}} placeholder"),
                )]);
            }
            if multi_level && !t.has("level") {
                return Err(vec![ConfigError::at(
                    &field("framePattern"),
                    format!("'{pattern}' has no {{level}} placeholder but the image has levels"),
                )]);
            }
            counts
                .iter()
                .enumerate()
                .map(|(level, &frame_count)| LevelFrames {
                    frame_count,
                    hrefs: generate_level_frame_urls(&url, Some(pattern), level as u32, frame_count),
                })
                .collect()
        }
    };

    Ok(ResolvedImage {
        mode: img.mode,
        animation_mode: img.animation_mode,
        levels,
        width_px: img.width_px,
        height_px: img.height_px,
    })
}

fn frame_counts(img: &ImageConfig) -> Result<Vec<u32>, (&'static str, String)> {
    match img.levels {
        Some(0) => return Err(("levels", "must be at least 1".to_string())),
        Some(l) if l > MAX_IMAGE_LEVELS => {
            return Err(("levels", format!("must be at most {MAX_IMAGE_LEVELS}, got {l}")));
        }
        _ => {}
    }
    let counts = match (&img.frames_per_level, img.mode) {
        (None, ImageMode::Single) => vec![1],
        (None, _) => {
            return Err((
                "framesPerLevel",
                "is required for sprite-sheet and multi-file images".to_string(),
            ));
        }
        (Some(FramesPerLevel::Uniform(n)), _) => vec![*n; img.levels.unwrap_or(1) as usize],
        (Some(FramesPerLevel::PerLevel(v)), _) => {
            if v.is_empty() {
                return Err(("framesPerLevel", "must list at least one level".to_string()));
            }
            if v.len() > MAX_IMAGE_LEVELS as usize {
                return Err((
                    "framesPerLevel",
                    format!("lists {} levels, at most {MAX_IMAGE_LEVELS} allowed", v.len()),
                ));
            }
            if let Some(l) = img.levels
                && l as usize != v.len()
            {
                return Err((
                    "levels",
                    format!("is {l} but framesPerLevel lists {} levels", v.len()),
                ));
            }
            v.clone()
        }
    };
    if let Some((level, n)) = counts
        .iter()
        .enumerate()
        .find(|&(_, &n)| n > MAX_FRAMES_PER_LEVEL)
    {
        return Err((
            "framesPerLevel",
            format!("level {level} has {n} frames, at most {MAX_FRAMES_PER_LEVEL} allowed"),
        ));
    }
    if let Some(level) = counts.iter().position(|&n| n == 0) {
        return Err((
            "framesPerLevel",
            format!("level {level} has no frames"),
        ));
    }
    if img.mode == ImageMode::Single && (counts.len() > 1 || counts[0] > 1) {
        return Err((
            "mode",
            "single images have exactly one frame and one level".to_string(),
        ));
    }
    Ok(counts)
}

#[cfg(test)]
#[path = "../../tests/unit/config/normalize.rs"]
mod tests;
