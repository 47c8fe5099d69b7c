//! Playback state machine over one trace.
//!
//! [`Playback`] is synchronous and clock-free: it only knows "a tick
//! happened". Timing lives in [`crate::driver`], which calls
//! [`Playback::tick`] every [`Playback::tick_interval`].
//!
//! State transitions:
//! `Idle` (no steps) | `Paused` (cursor fixed) <-> `Playing` (cursor advancing).
//! Navigation outside the trace is ignored rather than reported.

use std::time::Duration;

use algoviz_core::{Step, Trace};
use serde::{Deserialize, Serialize};

use crate::config::PlaybackConfig;

/// Observable state of a [`Playback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// The trace is empty; there is no cursor.
    Idle,
    Paused,
    Playing,
}

/// Outcome of one [`Playback::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not playing; nothing moved.
    Idle,
    /// The cursor moved and playback continues.
    Advanced,
    /// The cursor reached the last step and playback stopped.
    Finished,
}

/// Cursor, play flag and speed over an immutable [`Trace`].
#[derive(Debug, Clone)]
pub struct Playback {
    trace: Trace,
    cursor: Option<usize>,
    playing: bool,
    speed: f64,
    config: PlaybackConfig,
    reset_pending: bool,
}

impl Playback {
    /// An idle playback with no trace.
    pub fn new(config: PlaybackConfig) -> Self {
        Playback {
            trace: Trace::empty(),
            cursor: None,
            playing: false,
            speed: 1.0,
            config,
            reset_pending: false,
        }
    }

    pub fn with_trace(trace: Trace, config: PlaybackConfig) -> Self {
        let mut playback = Playback::new(config);
        playback.load(trace);
        playback
    }

    /// Replaces the trace wholesale: cursor back to the first step, paused.
    /// Speed is kept.
    pub fn load(&mut self, trace: Trace) {
        self.cursor = if trace.is_empty() { None } else { Some(0) };
        self.trace = trace;
        self.playing = false;
        self.reset_pending = false;
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Whether an auto-reset is waiting for [`Playback::apply_auto_reset`].
    pub fn reset_pending(&self) -> bool {
        self.reset_pending
    }

    pub fn len(&self) -> usize {
        self.trace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    pub fn state(&self) -> PlaybackState {
        match (self.cursor, self.playing) {
            (None, _) => PlaybackState::Idle,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    /// The step under the cursor, `None` when idle.
    pub fn current_step(&self) -> Option<&Step> {
        self.cursor.and_then(|c| self.trace.get(c))
    }

    /// Starts playing. From the last step, playback restarts at the first.
    pub fn play(&mut self) {
        self.reset_pending = false;
        let Some(cursor) = self.cursor else {
            return;
        };
        if Some(cursor) == self.trace.last_index() {
            self.cursor = Some(0);
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.reset_pending = false;
        self.playing = false;
    }

    /// Moves one step forward and pauses. No-op on the last step.
    pub fn step_forward(&mut self) {
        self.reset_pending = false;
        if let (Some(cursor), Some(last)) = (self.cursor, self.trace.last_index()) {
            if cursor < last {
                self.cursor = Some(cursor + 1);
                self.playing = false;
            }
        }
    }

    /// Moves one step back and pauses. No-op on the first step.
    pub fn step_backward(&mut self) {
        self.reset_pending = false;
        if let Some(cursor) = self.cursor {
            if cursor > 0 {
                self.cursor = Some(cursor - 1);
                self.playing = false;
            }
        }
    }

    /// Back to the first step, paused.
    pub fn reset(&mut self) {
        self.reset_pending = false;
        if self.cursor.is_some() {
            self.cursor = Some(0);
            self.playing = false;
        }
    }

    /// Moves to step `index` and pauses. Out-of-range indices are ignored.
    pub fn jump_to_step(&mut self, index: usize) {
        self.reset_pending = false;
        if index < self.trace.len() {
            self.cursor = Some(index);
            self.playing = false;
        }
    }

    /// Sets the speed multiplier. Only positive finite values are accepted;
    /// returns whether the speed changed.
    pub fn set_speed(&mut self, speed: f64) -> bool {
        if !speed.is_finite() || speed <= 0.0 {
            return false;
        }
        self.speed = speed;
        true
    }

    /// Delay between ticks at the current speed: `base_interval / speed`.
    pub fn tick_interval(&self) -> Duration {
        let secs = self.config.base_interval.as_secs_f64() / self.speed;
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    /// Advances the cursor by one while playing.
    ///
    /// Landing on the last step stops playback and, when an auto-reset delay
    /// is configured, marks a reset as pending.
    pub fn tick(&mut self) -> Tick {
        if !self.playing {
            return Tick::Idle;
        }
        let (Some(cursor), Some(last)) = (self.cursor, self.trace.last_index()) else {
            self.playing = false;
            return Tick::Idle;
        };
        let next = (cursor + 1).min(last);
        self.cursor = Some(next);
        if next == last {
            self.playing = false;
            self.reset_pending = self.config.auto_reset_delay.is_some();
            Tick::Finished
        } else {
            Tick::Advanced
        }
    }

    /// Rewinds to the first step if an auto-reset is still pending.
    pub fn apply_auto_reset(&mut self) -> bool {
        if !self.reset_pending {
            return false;
        }
        self.reset_pending = false;
        if self.cursor.is_some() {
            self.cursor = Some(0);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::{StepKind, TraceConfig, TraceRecorder};
    use proptest::prelude::*;

    fn trace_of(len: usize) -> Trace {
        assert!(len >= 2);
        let mut rec = TraceRecorder::new(&TraceConfig::default());
        rec.step(StepKind::Init, "start").var("i", 0usize).emit().unwrap();
        for i in 1..len - 1 {
            rec.step(StepKind::Transition, format!("step {i}"))
                .var("i", i)
                .emit()
                .unwrap();
        }
        rec.step(StepKind::Terminal, "done").var("i", len - 1).emit().unwrap();
        rec.finish().unwrap()
    }

    fn playback(len: usize) -> Playback {
        Playback::with_trace(trace_of(len), PlaybackConfig::default())
    }

    #[test]
    fn empty_playback_is_idle() {
        let mut pb = Playback::new(PlaybackConfig::default());
        assert_eq!(pb.state(), PlaybackState::Idle);
        pb.play();
        pb.step_forward();
        pb.reset();
        assert_eq!(pb.state(), PlaybackState::Idle);
        assert!(pb.current_step().is_none());
        assert_eq!(pb.tick(), Tick::Idle);
    }

    #[test]
    fn load_resets_cursor_and_pauses() {
        let mut pb = playback(5);
        pb.jump_to_step(3);
        pb.play();
        pb.set_speed(2.0);
        pb.load(trace_of(3));
        assert_eq!(pb.cursor(), Some(0));
        assert_eq!(pb.state(), PlaybackState::Paused);
        assert_eq!(pb.speed(), 2.0);
        pb.load(Trace::empty());
        assert_eq!(pb.state(), PlaybackState::Idle);
    }

    #[test]
    fn play_from_last_step_restarts() {
        let mut pb = playback(4);
        pb.jump_to_step(3);
        pb.play();
        assert_eq!(pb.cursor(), Some(0));
        assert!(pb.is_playing());
    }

    #[test]
    fn stepping_forces_pause() {
        let mut pb = playback(4);
        pb.play();
        pb.step_forward();
        assert_eq!(pb.cursor(), Some(1));
        assert_eq!(pb.state(), PlaybackState::Paused);

        pb.play();
        pb.step_backward();
        assert_eq!(pb.cursor(), Some(0));
        assert!(!pb.is_playing());
    }

    #[test]
    fn stepping_stops_at_the_ends() {
        let mut pb = playback(3);
        pb.step_backward();
        assert_eq!(pb.cursor(), Some(0));
        pb.jump_to_step(2);
        pb.step_forward();
        assert_eq!(pb.cursor(), Some(2));
    }

    #[test]
    fn tick_walks_to_the_end_then_stops() {
        let mut pb = playback(3);
        pb.play();
        assert_eq!(pb.tick(), Tick::Advanced);
        assert_eq!(pb.tick(), Tick::Finished);
        assert_eq!(pb.cursor(), Some(2));
        assert_eq!(pb.state(), PlaybackState::Paused);
        assert_eq!(pb.tick(), Tick::Idle);
        assert!(!pb.reset_pending());
    }

    #[test]
    fn auto_reset_is_armed_and_cancelled() {
        let config = PlaybackConfig {
            auto_reset_delay: Some(Duration::from_millis(500)),
            ..PlaybackConfig::default()
        };
        let mut pb = Playback::with_trace(trace_of(2), config);
        pb.play();
        assert_eq!(pb.tick(), Tick::Finished);
        assert!(pb.reset_pending());
        assert!(pb.apply_auto_reset());
        assert_eq!(pb.cursor(), Some(0));

        pb.play();
        pb.tick();
        pb.step_backward();
        assert!(!pb.reset_pending());
        assert!(!pb.apply_auto_reset());
        assert_eq!(pb.cursor(), Some(0));
    }

    #[test]
    fn speed_must_be_positive_and_finite() {
        let mut pb = playback(2);
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(!pb.set_speed(bad));
        }
        assert_eq!(pb.speed(), 1.0);
        assert!(pb.set_speed(4.0));
        assert_eq!(pb.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn tiny_speed_saturates_interval() {
        let mut pb = playback(2);
        pb.set_speed(f64::MIN_POSITIVE);
        assert_eq!(pb.tick_interval(), Duration::MAX);
    }

    proptest! {
        #[test]
        fn forward_then_back_is_identity(len in 3usize..30, pick in 0usize..1000) {
            let mut pb = playback(len);
            let interior = 1 + pick % (len - 2);
            pb.jump_to_step(interior);
            let before = pb.current_step().cloned();
            pb.step_forward();
            pb.step_backward();
            prop_assert_eq!(pb.cursor(), Some(interior));
            prop_assert_eq!(pb.current_step().cloned(), before);
        }

        #[test]
        fn out_of_range_jump_is_a_no_op(len in 2usize..30, start in 0usize..30, offset in 0usize..100) {
            let mut pb = playback(len);
            let start = start % len;
            pb.jump_to_step(start);
            pb.jump_to_step(len + offset);
            prop_assert_eq!(pb.cursor(), Some(start));
        }

        #[test]
        fn cursor_stays_in_bounds(len in 2usize..20, ops in proptest::collection::vec(0u8..7, 0..60)) {
            let mut pb = playback(len);
            for op in ops {
                match op {
                    0 => pb.play(),
                    1 => pb.pause(),
                    2 => pb.step_forward(),
                    3 => pb.step_backward(),
                    4 => pb.reset(),
                    5 => { pb.tick(); }
                    _ => pb.jump_to_step(len / 2),
                }
                let cursor = pb.cursor().unwrap();
                prop_assert!(cursor < len);
            }
        }
    }
}
