use std::collections::BTreeSet;

use crate::assets::resolver::ResolvedAssets;
use crate::compile::output::{CompiledOverlay, MarkupFragment, Stylesheet};
use crate::config::model::OverlayConfig;
use crate::config::normalize::{NormalizeContext, ResolvedConfig, normalize};
use crate::counter::display::{DisplayLayout, DisplayTiming, display_height, render_display};
use crate::counter::sampler::{CounterSample, sample_counter};
use crate::foundation::core::{Grid, GridPos, PathStep, build_steps};
use crate::foundation::error::{GridSnakeError, GridSnakeResult};
use crate::foundation::format::{fmt_ms, fmt_num};
use crate::plan::grid_cells::{CELL_PROGRAM, cell_states, plan_grid_cells};
use crate::plan::progress::{ProgressEvent, run_programs, segment_runs};
use crate::plan::snake::{plan_snake, translate};

/// Class carrying the shared loop timing. Every animated element has it.
pub const ANIMATED_CLASS: &str = "a";
/// Cell corner radius relative to the dot size.
const CELL_RADIUS_RATIO: f64 = 0.2;
/// Vertical space between stacked counter displays, px.
const DISPLAY_GAP_PX: f64 = 4.0;

/// Input document: grid, head path and raw configuration.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDocument {
    pub grid: Grid,
    pub path: Vec<GridPos>,
    #[serde(default)]
    pub config: OverlayConfig,
}

impl SceneDocument {
    pub fn from_json(text: &str) -> GridSnakeResult<Self> {
        let doc: Self = serde_json::from_str(text)?;
        doc.grid.validate()?;
        Ok(doc)
    }
}

/// Normalize the document's configuration and compile it.
pub fn compile_scene(
    doc: &SceneDocument,
    ctx: &mut NormalizeContext<'_>,
    assets: &ResolvedAssets,
) -> GridSnakeResult<CompiledOverlay> {
    let config = normalize(&doc.config, ctx)?;
    compile_overlay(&doc.grid, &doc.path, &config, assets)
}

/// Compile the path over `grid` into a stylesheet and matching fragments.
///
/// The result is a pure function of the inputs: identical inputs give
/// byte-identical output.
#[tracing::instrument(skip_all, fields(width = grid.width, height = grid.height, steps = path.len()))]
pub fn compile_overlay(
    grid: &Grid,
    path: &[GridPos],
    config: &ResolvedConfig,
    assets: &ResolvedAssets,
) -> GridSnakeResult<CompiledOverlay> {
    grid.validate()?;
    let steps = build_steps(grid, path);
    let duration_ms = steps.len() as f64 * config.step_duration_ms;
    if !duration_ms.is_finite() {
        return Err(GridSnakeError::animation(format!(
            "loop of {} steps at {}ms per step does not fit in a finite duration",
            steps.len(),
            config.step_duration_ms
        )));
    }

    let cell = config.cell_size_px;
    let width_px = f64::from(grid.width) * cell;
    let mut css = Stylesheet::new();
    let mut fragments = Vec::new();

    let snake_fill = config.snake.colors.first().map_or("none", String::as_str);
    css.rule(
        ":root",
        &format!("{};--cs:{snake_fill}", config.colors.custom_properties()),
    );
    if !steps.is_empty() {
        css.rule(
            &format!(".{ANIMATED_CLASS}"),
            &format!(
                "animation-duration:{};animation-timing-function:linear;animation-iteration-count:infinite",
                fmt_ms(duration_ms)
            ),
        );
    }

    let samples = sample_counter(grid, &steps);
    emit_cells(grid, &steps, config, duration_ms, &mut css, &mut fragments);
    emit_snake(&steps, &samples, config, &mut css, &mut fragments);

    let mut bottom = f64::from(grid.height) * cell;
    if let Some(bar) = &config.progress_bar {
        let top = bottom + bar.gap_px;
        emit_progress(&steps, &samples, config, top, bar.height_px, width_px, &mut css, &mut fragments);
        bottom = top + bar.height_px;
    }

    let timing = DisplayTiming {
        step_duration_ms: config.step_duration_ms,
        frame_duration_ms: config.frame_duration_ms,
    };
    for display in &config.displays {
        let top = bottom + DISPLAY_GAP_PX;
        let layout = DisplayLayout {
            track_width_px: width_px,
            top_px: top,
        };
        fragments.push(render_display(display, &samples, layout, timing, assets, &mut css));
        bottom = top + display_height(display);
    }

    tracing::debug!(
        rules = css.len(),
        fragments = fragments.len(),
        duration_ms,
        "overlay compiled"
    );
    Ok(CompiledOverlay {
        stylesheet: css.finish(),
        fragments,
        diagnostics: config.diagnostics.iter().map(ToString::to_string).collect(),
        width_px,
        height_px: bottom,
        duration_ms,
    })
}

fn emit_cells(
    grid: &Grid,
    steps: &[PathStep],
    config: &ResolvedConfig,
    duration_ms: f64,
    css: &mut Stylesheet,
    fragments: &mut Vec<MarkupFragment>,
) {
    let plan = plan_grid_cells(&cell_states(grid, steps), duration_ms);
    if let Some(program) = &plan.program {
        css.program(program);
        css.rule(".ca", &format!("animation-name:{CELL_PROGRAM}"));
    }
    let levels: BTreeSet<u8> = plan.cells.iter().map(|c| c.level).collect();
    for level in levels {
        let color = config.colors.var_for(level);
        css.rule(&format!(".l{level}"), &format!("--b:{color};fill:var(--b)"));
    }

    let cell = config.cell_size_px;
    let dot = config.dot_size_px;
    let margin = (cell - dot) / 2.0;
    let radius = fmt_num(dot * CELL_RADIUS_RATIO);
    for c in &plan.cells {
        let id = format!("c{}-{}", c.pos.x, c.pos.y);
        let p = c.pos.to_px(cell);
        let class = match c.delay_ms {
            Some(delay) => {
                css.rule(&format!("#{id}"), &format!("animation-delay:{}", fmt_ms(delay)));
                format!("c l{} ca {ANIMATED_CLASS}", c.level)
            }
            None => format!("c l{}", c.level),
        };
        fragments.push(MarkupFragment::new(
            id.clone(),
            format!(
                r#"<rect id="{id}" class="{class}" x="{x}" y="{y}" width="{d}" height="{d}" rx="{radius}" ry="{radius}"/>"#,
                x = fmt_num(p.x + margin),
                y = fmt_num(p.y + margin),
                d = fmt_num(dot),
            ),
        ));
    }
    tracing::debug!(cells = plan.cells.len(), animated = plan.animated_count(), "cells planned");
}

fn emit_snake(
    steps: &[PathStep],
    samples: &[CounterSample],
    config: &ResolvedConfig,
    css: &mut Stylesheet,
    fragments: &mut Vec<MarkupFragment>,
) {
    let consumed: Vec<bool> = samples.iter().map(|s| s.consumed).collect();
    let plan = plan_snake(
        steps,
        &config.snake,
        config.cell_size_px,
        config.dot_size_px,
        &consumed,
    );
    if plan.segments.is_empty() {
        return;
    }
    css.rule(".s", "fill:var(--cs)");
    let base_fill = config.snake.colors.first();
    for seg in &plan.segments {
        let id = format!("s{}", seg.index);
        css.program(&seg.movement);
        let mut names = vec![seg.movement.name.clone()];
        if let Some(colors) = &seg.colors {
            css.program(colors);
            names.push(colors.name.clone());
        }
        let mut body = format!("{};animation-name:{}", translate(seg.start), names.join(","));
        if seg.colors.is_none() && base_fill != Some(&seg.fill) {
            body.push_str(&format!(";fill:{}", seg.fill));
        }
        css.rule(&format!(".{id}"), &body);
        fragments.push(MarkupFragment::new(
            id.clone(),
            format!(
                r#"<rect id="{id}" class="s {id} {ANIMATED_CLASS}" width="{size}" height="{size}" rx="{r}" ry="{r}"/>"#,
                size = fmt_num(seg.shape.size_px),
                r = fmt_num(seg.shape.radius_px),
            ),
        ));
    }
    tracing::debug!(segments = plan.segments.len(), "snake planned");
}

#[allow(clippy::too_many_arguments)]
fn emit_progress(
    steps: &[PathStep],
    samples: &[CounterSample],
    config: &ResolvedConfig,
    top: f64,
    height: f64,
    width: f64,
    css: &mut Stylesheet,
    fragments: &mut Vec<MarkupFragment>,
) {
    let events: Vec<ProgressEvent> = steps
        .iter()
        .zip(samples)
        .filter(|(_, s)| s.consumed)
        .map(|(step, s)| ProgressEvent {
            time: s.elapsed_share,
            color: config.colors.var_for(step.color_at_head),
            weight: s.step_contribution,
        })
        .collect();
    let runs = segment_runs(&events);
    let programs = run_programs(&runs);
    for (run, program) in runs.iter().zip(&programs) {
        let id = &program.name;
        css.program(program);
        css.rule(
            &format!(".{id}"),
            &format!("fill:{};animation-name:{id}", run.color),
        );
        fragments.push(MarkupFragment::new(
            id.clone(),
            format!(
                r#"<rect id="{id}" class="{id} {ANIMATED_CLASS}" x="0" y="{y}" width="{w}" height="{h}"/>"#,
                y = fmt_num(top),
                w = fmt_num(width),
                h = fmt_num(height),
            ),
        ));
    }
    tracing::debug!(runs = runs.len(), "progress bar planned");
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
