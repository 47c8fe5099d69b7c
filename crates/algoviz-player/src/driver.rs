//! Timer-driven player: a tokio task that owns a [`Playback`] and advances it
//! on a schedule.
//!
//! Commands go in over an unbounded channel; every change of state comes
//! out as a [`Frame`] on a `watch` channel, so a renderer only ever sees the
//! latest frame. There is at most one pending tick deadline:
//!
//! - `Play` schedules a fresh deadline at `now + base_interval / speed`.
//! - Anything that pauses clears it.
//! - `SetSpeed` leaves an in-flight deadline alone; the new speed applies
//!   when the next one is scheduled.
//! - Each tick schedules the next from the current speed.
//! - An interval too long to represent as an instant never fires.
//!
//! A second optional deadline fires the auto-reset after the last step.
//! Dropping the [`PlayerHandle`] closes the command channel, which ends the
//! task and with it every timer.

use std::time::Duration;

use algoviz_core::{Step, Trace};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::controller::{Playback, PlaybackState, Tick};
use crate::error::PlayerError;

/// A request to the player task.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Pause,
    StepForward,
    StepBackward,
    Reset,
    JumpTo(usize),
    SetSpeed(f64),
    /// Replace the trace; cursor returns to the first step, paused.
    Load(Trace),
}

/// What a renderer needs to draw the current moment of playback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub cursor: Option<usize>,
    pub state: PlaybackState,
    pub speed: f64,
    pub total: usize,
    pub step: Option<Step>,
}

impl Frame {
    pub fn of(playback: &Playback) -> Self {
        Frame {
            cursor: playback.cursor(),
            state: playback.state(),
            speed: playback.speed(),
            total: playback.len(),
            step: playback.current_step().cloned(),
        }
    }
}

/// Handle to a running player task.
pub struct PlayerHandle {
    commands: mpsc::UnboundedSender<Command>,
    frames: watch::Receiver<Frame>,
    task: JoinHandle<Playback>,
}

impl PlayerHandle {
    /// Spawns the player task on the current tokio runtime.
    pub fn spawn(playback: Playback) -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        let (frames_tx, frames) = watch::channel(Frame::of(&playback));
        let task = tokio::spawn(run(playback, rx, frames_tx));
        PlayerHandle {
            commands,
            frames,
            task,
        }
    }

    pub fn send(&self, command: Command) -> Result<(), PlayerError> {
        self.commands.send(command).map_err(|_| PlayerError::Closed)
    }

    pub fn play(&self) -> Result<(), PlayerError> {
        self.send(Command::Play)
    }

    pub fn pause(&self) -> Result<(), PlayerError> {
        self.send(Command::Pause)
    }

    pub fn step_forward(&self) -> Result<(), PlayerError> {
        self.send(Command::StepForward)
    }

    pub fn step_backward(&self) -> Result<(), PlayerError> {
        self.send(Command::StepBackward)
    }

    pub fn reset(&self) -> Result<(), PlayerError> {
        self.send(Command::Reset)
    }

    pub fn jump_to(&self, index: usize) -> Result<(), PlayerError> {
        self.send(Command::JumpTo(index))
    }

    pub fn set_speed(&self, speed: f64) -> Result<(), PlayerError> {
        self.send(Command::SetSpeed(speed))
    }

    pub fn load(&self, trace: Trace) -> Result<(), PlayerError> {
        self.send(Command::Load(trace))
    }

    /// A receiver of published frames. Its first `changed()` resolves on the
    /// next frame published after this call.
    pub fn frames(&self) -> watch::Receiver<Frame> {
        let mut rx = self.frames.clone();
        rx.mark_unchanged();
        rx
    }

    /// The most recently published frame.
    pub fn frame(&self) -> Frame {
        self.frames.borrow().clone()
    }

    /// Stops the task and returns the playback as it was left.
    pub async fn shutdown(self) -> Result<Playback, PlayerError> {
        drop(self.commands);
        self.task.await.map_err(|e| {
            if e.is_panic() {
                PlayerError::Panicked
            } else {
                PlayerError::Closed
            }
        })
    }
}

async fn run(
    mut playback: Playback,
    mut commands: mpsc::UnboundedReceiver<Command>,
    frames: watch::Sender<Frame>,
) -> Playback {
    let mut tick_at: Option<Instant> = None;
    let mut reset_at: Option<Instant> = None;

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else { break };
                debug!(?command, "player command");
                let was_playing = playback.is_playing();
                apply(&mut playback, command);
                if playback.is_playing() && !was_playing {
                    tick_at = deadline_after(playback.tick_interval());
                }
            }
            _ = sleep_until(tick_at) => {
                match playback.tick() {
                    Tick::Advanced => {
                        tick_at = deadline_after(playback.tick_interval());
                    }
                    Tick::Finished => {
                        debug!(cursor = ?playback.cursor(), "playback finished");
                        tick_at = None;
                        if playback.reset_pending() {
                            reset_at = playback
                                .config()
                                .auto_reset_delay
                                .and_then(deadline_after);
                        }
                    }
                    Tick::Idle => tick_at = None,
                }
            }
            _ = sleep_until(reset_at) => {
                reset_at = None;
                if playback.apply_auto_reset() {
                    debug!("auto-reset to first step");
                }
            }
        }

        if !playback.is_playing() {
            tick_at = None;
        }
        if !playback.reset_pending() {
            reset_at = None;
        }

        let frame = Frame::of(&playback);
        frames.send_if_modified(|current| {
            if *current == frame {
                false
            } else {
                *current = frame;
                true
            }
        });
    }

    debug!("player stopped");
    playback
}

fn apply(playback: &mut Playback, command: Command) {
    match command {
        Command::Play => playback.play(),
        Command::Pause => playback.pause(),
        Command::StepForward => playback.step_forward(),
        Command::StepBackward => playback.step_backward(),
        Command::Reset => playback.reset(),
        Command::JumpTo(index) => playback.jump_to_step(index),
        Command::SetSpeed(speed) => {
            if !playback.set_speed(speed) {
                debug!(speed, "ignored invalid speed");
            }
        }
        Command::Load(trace) => {
            info!(steps = trace.len(), "trace loaded into player");
            playback.load(trace);
        }
    }
}

/// `now + delay`, or `None` when that instant cannot be represented.
fn deadline_after(delay: Duration) -> Option<Instant> {
    let deadline = Instant::now().checked_add(delay);
    if deadline.is_none() {
        warn!(?delay, "delay out of range, timer will not fire");
    }
    deadline
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
