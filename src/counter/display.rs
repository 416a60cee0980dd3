use crate::assets::resolver::ResolvedAssets;
use crate::compile::output::{MarkupFragment, Stylesheet, escape_markup};
use crate::config::model::{ImageMode, Placement};
use crate::config::normalize::{ResolvedDisplay, ResolvedImage};
use crate::counter::sampler::{CounterSample, DisplayState, display_states};
use crate::counter::sprite::{SpriteFrame, SpriteFrameScheduler, schedule_input};
use crate::foundation::core::Point;
use crate::foundation::format::fmt_num;
use crate::keyframes::merge::{AnimationProgram, Keyframe};
use crate::keyframes::visibility::{Window, collect_windows, visibility_keyframes};
use crate::keyframes::waypoints::{Waypoint, reduce_waypoints};
use crate::plan::snake::translate;

/// Space between images and text inside a display, px.
const ITEM_GAP_PX: f64 = 4.0;

/// Where a display sits and how wide its horizontal track is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayLayout {
    pub track_width_px: f64,
    pub top_px: f64,
}

/// Timing shared by every display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayTiming {
    pub step_duration_ms: f64,
    pub frame_duration_ms: f64,
}

/// Vertical room a display needs.
pub fn display_height(display: &ResolvedDisplay) -> f64 {
    display
        .images
        .iter()
        .map(|i| i.height_px)
        .fold(display.font_size_px, f64::max)
}

/// Text shown for one state.
pub fn display_text(display: &ResolvedDisplay, state: &DisplayState) -> String {
    display.format.render(|name| match name {
        "count" => Some(state.count.to_string()),
        "percent" => Some(fmt_num(state.percentage)),
        _ => None,
    })
}

/// Frames picked for one image, one per sample. Scheduler state lives here only.
pub fn sprite_frames(
    image: &ResolvedImage,
    samples: &[CounterSample],
    timing: DisplayTiming,
) -> Vec<SpriteFrame> {
    let scheduler = SpriteFrameScheduler::for_image(image, timing.frame_duration_ms);
    let max_contribution = samples
        .iter()
        .map(|s| s.step_contribution)
        .fold(0.0, f64::max);
    let mut state = None;
    samples
        .iter()
        .map(|s| {
            let (target, t_abs) = schedule_input(
                image.animation_mode,
                s.step,
                s.step_contribution,
                max_contribution,
                scheduler.level_count(),
                timing.step_duration_ms,
                timing.frame_duration_ms,
            );
            scheduler.step(&mut state, t_abs, target)
        })
        .collect()
}

/// Render one counter display: rules go to `css`, the element group is returned.
pub fn render_display(
    display: &ResolvedDisplay,
    samples: &[CounterSample],
    layout: DisplayLayout,
    timing: DisplayTiming,
    assets: &ResolvedAssets,
    css: &mut Stylesheet,
) -> MarkupFragment {
    let id = format!("d{}", display.index);
    let total_steps = samples.len();
    let states = display_states(
        samples,
        display.placement,
        layout.track_width_px,
        display.offset_px,
    );

    let mut body = String::new();
    let right_aligned = display.placement == Placement::FixedRight;
    let images_width: f64 = display.images.iter().map(|i| i.width_px + ITEM_GAP_PX).sum();
    let mut image_x = if right_aligned { -images_width } else { 0.0 };

    for (k, image) in display.images.iter().enumerate() {
        let frames = if samples.is_empty() {
            vec![SpriteFrame { level: 0, frame: 0 }]
        } else {
            sprite_frames(image, samples, timing)
        };
        let windows = collect_windows(frames);
        let animated = windows.len() > 1;
        for (j, (frame, spans)) in windows.iter().enumerate() {
            let class = format!("{id}i{k}f{j}");
            if animated {
                animate_visibility(css, &class, spans, total_steps);
            }
            body.push_str(&image_markup(image, *frame, &class, animated, image_x, assets));
        }
        image_x += image.width_px + ITEM_GAP_PX;
    }

    let text_x = if right_aligned {
        -images_width
    } else if display.images.is_empty() {
        0.0
    } else {
        images_width
    };
    let texts: Vec<String> = if states.is_empty() {
        vec![display_text(
            display,
            &DisplayState {
                count: 0,
                percentage: 0.0,
                horizontal_position: 0.0,
                step_contribution: 0.0,
            },
        )]
    } else {
        states.iter().map(|s| display_text(display, s)).collect()
    };
    let windows = collect_windows(texts);
    let animated = windows.len() > 1;
    for (j, (text, spans)) in windows.iter().enumerate() {
        let class = format!("{id}t{j}");
        if animated {
            animate_visibility(css, &class, spans, total_steps);
        }
        body.push_str(&format!(
            r#"<text class="{class}{a}" x="{x}" y="{y}" font-size="{fs}" text-anchor="{anchor}">{t}</text>"#,
            a = if animated { " a" } else { "" },
            x = fmt_num(text_x),
            y = fmt_num(display.font_size_px),
            fs = fmt_num(display.font_size_px),
            anchor = if right_aligned { "end" } else { "start" },
            t = escape_markup(text),
        ));
    }

    let start_x = states.first().map_or(0.0, |s| s.horizontal_position);
    let start = Point::new(start_x, layout.top_px);
    let moving = matches!(display.placement, Placement::Follow | Placement::Free)
        && states.len() > 1;
    let mut group_class = id.clone();
    if moving {
        let total = total_steps as f64;
        let waypoints: Vec<Waypoint> = states
            .iter()
            .enumerate()
            .map(|(s, st)| Waypoint::new(st.horizontal_position, layout.top_px, s as f64 / total))
            .collect();
        let program = AnimationProgram::build(
            format!("{id}m"),
            reduce_waypoints(&waypoints)
                .into_iter()
                .map(|w| Keyframe::new(w.t, translate(w.pos))),
        );
        css.program(&program);
        css.rule(
            &format!(".{id}"),
            &format!("{};animation-name:{}", translate(start), program.name),
        );
        group_class.push_str(" a");
    } else {
        css.rule(&format!(".{id}"), &translate(start));
    }
    let index = display.index;
    tracing::debug!(display = index, moving, "counter display rendered");

    MarkupFragment::new(
        id.clone(),
        format!(r#"<g id="{id}" class="{group_class}">{body}</g>"#),
    )
}

fn animate_visibility(css: &mut Stylesheet, class: &str, spans: &[Window], total_steps: usize) {
    let program = AnimationProgram::build(class, visibility_keyframes(spans, total_steps));
    css.program(&program);
    css.rule(&format!(".{class}"), &format!("animation-name:{class}"));
}

fn image_markup(
    image: &ResolvedImage,
    frame: SpriteFrame,
    class: &str,
    animated: bool,
    x: f64,
    assets: &ResolvedAssets,
) -> String {
    let class = if animated {
        format!("{class} a")
    } else {
        class.to_string()
    };
    let (w, h) = (image.width_px, image.height_px);
    let Some(level) = image.levels.get(frame.level).or_else(|| image.levels.first()) else {
        return String::new();
    };
    match image.mode {
        ImageMode::Single | ImageMode::MultiFile => {
            let href = match level.hrefs.get(frame.frame as usize) {
                Some(h) => h.as_str(),
                None => {
                    tracing::warn!(
                        level = frame.level,
                        frame = frame.frame,
                        "sprite frame missing; showing frame 0"
                    );
                    level.hrefs.first().map_or("", String::as_str)
                }
            };
            format!(
                r#"<image class="{class}" href="{href}" x="{x}" y="0" width="{w}" height="{h}"/>"#,
                href = escape_markup(assets.href(href)),
                x = fmt_num(x),
                w = fmt_num(w),
                h = fmt_num(h),
            )
        }
        ImageMode::SpriteSheet => {
            let href = level.hrefs.first().map_or("", String::as_str);
            let frame_index = if frame.frame < level.frame_count {
                frame.frame
            } else {
                tracing::warn!(frame = frame.frame, "sprite frame out of range; showing frame 0");
                0
            };
            format!(
                r#"<svg class="{class}" x="{x}" y="0" width="{w}" height="{h}" viewBox="{vx} 0 {w} {h}"><image href="{href}" width="{sw}" height="{h}"/></svg>"#,
                href = escape_markup(assets.href(href)),
                x = fmt_num(x),
                vx = fmt_num(f64::from(frame_index) * w),
                sw = fmt_num(f64::from(level.frame_count) * w),
                w = fmt_num(w),
                h = fmt_num(h),
            )
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/counter/display.rs"]
mod tests;
