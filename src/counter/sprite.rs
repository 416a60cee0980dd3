use crate::config::model::AnimationMode;
use crate::config::normalize::ResolvedImage;
use crate::counter::sampler::contribution_level;

/// Playback state of one sprite slot, owned by the caller and threaded through
/// [`SpriteFrameScheduler::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteAnimationState {
    pub playing_level: usize,
    pub cycle_start_ms: f64,
    pub last_completed_cycle: u64,
}

/// Frame chosen for one sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteFrame {
    pub level: usize,
    pub frame: u32,
}

/// Picks frames so that a level change only takes effect on a cycle boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteFrameScheduler {
    frames_per_level: Vec<u32>,
    frame_duration_ms: f64,
}

impl SpriteFrameScheduler {
    pub fn new(frames_per_level: Vec<u32>, frame_duration_ms: f64) -> Self {
        Self {
            frames_per_level,
            frame_duration_ms,
        }
    }

    pub fn for_image(image: &ResolvedImage, frame_duration_ms: f64) -> Self {
        Self::new(
            image.levels.iter().map(|l| l.frame_count).collect(),
            frame_duration_ms,
        )
    }

    pub fn level_count(&self) -> usize {
        self.frames_per_level.len()
    }

    fn frames_in(&self, level: usize) -> u32 {
        self.frames_per_level.get(level).copied().unwrap_or(0)
    }

    fn elapsed_frames(&self, elapsed_ms: f64) -> u64 {
        if !(self.frame_duration_ms.is_finite() && self.frame_duration_ms > 0.0) {
            return 0;
        }
        let n = (elapsed_ms / self.frame_duration_ms).floor();
        if n.is_finite() && n > 0.0 { n as u64 } else { 0 }
    }

    /// Advance `state` to `t_abs_ms` and return the frame to show.
    ///
    /// A `None` state is created on the spot, playing `target_level` from frame 0.
    /// Afterwards the target is only adopted once the playing level completes a
    /// cycle; samples may be sparse, so completed cycles are derived from elapsed
    /// time rather than counted.
    pub fn step(
        &self,
        state: &mut Option<SpriteAnimationState>,
        t_abs_ms: f64,
        target_level: usize,
    ) -> SpriteFrame {
        let target = target_level.min(self.level_count().saturating_sub(1));
        let st = state.get_or_insert(SpriteAnimationState {
            playing_level: target,
            cycle_start_ms: t_abs_ms,
            last_completed_cycle: 0,
        });

        let mut elapsed = self.elapsed_frames(t_abs_ms - st.cycle_start_ms);
        let frames = self.frames_in(st.playing_level);
        // A level without frames always yields.
        let crossed = match frames {
            0 => None,
            n => Some(elapsed / u64::from(n)).filter(|&c| c > st.last_completed_cycle),
        };
        if frames == 0 || crossed.is_some() {
            if target != st.playing_level {
                st.playing_level = target;
                st.cycle_start_ms = t_abs_ms;
                st.last_completed_cycle = 0;
                elapsed = 0;
            } else if let Some(cycle) = crossed {
                st.last_completed_cycle = cycle;
            }
        }

        let frames = self.frames_in(st.playing_level);
        if frames == 0 {
            tracing::warn!(
                level = st.playing_level,
                "sprite level has no frames; showing frame 0"
            );
            return SpriteFrame {
                level: st.playing_level,
                frame: 0,
            };
        }
        SpriteFrame {
            level: st.playing_level,
            frame: (elapsed % u64::from(frames)) as u32,
        }
    }
}

/// Level and absolute time fed to the scheduler for one step.
pub fn schedule_input(
    mode: AnimationMode,
    step: usize,
    step_contribution: f64,
    max_contribution: f64,
    level_count: usize,
    step_duration_ms: f64,
    frame_duration_ms: f64,
) -> (usize, f64) {
    let s = step as f64;
    match mode {
        AnimationMode::SyncedToSteps => (0, s * frame_duration_ms),
        AnimationMode::IndependentLoop => (0, s * step_duration_ms),
        AnimationMode::LevelBucketed => (
            contribution_level(step_contribution, max_contribution, level_count),
            s * step_duration_ms,
        ),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/counter/sprite.rs"]
mod tests;
