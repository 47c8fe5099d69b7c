//! Playback of algorithm traces.
//!
//! - [`controller`]: the synchronous [`Playback`] state machine.
//! - [`driver`]: a tokio task that ticks a playback on a timer and publishes
//!   [`Frame`]s.
//! - [`session`]: binds a visualizer, its input and a playback together.
//! - [`config`]: timer and limit settings, readable from the environment.

pub mod config;
pub mod controller;
pub mod driver;
pub mod error;
pub mod session;

pub use config::{PlaybackConfig, SessionConfig};
pub use controller::{Playback, PlaybackState, Tick};
pub use driver::{Command, Frame, PlayerHandle};
pub use error::{PlayerError, SessionError};
pub use session::Session;
