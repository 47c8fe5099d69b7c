//! One visualizer bound to one playback.
//!
//! A [`Session`] is the unit of failure isolation: bad input is handed back
//! for inline display and leaves the current trace alone, while a generator
//! failure is logged and replaced by an empty trace.

use algoviz_core::{ProblemId, Trace, TraceConfig, TraceError};
use algoviz_trace::random::rng_from_seed;
use algoviz_trace::{AlgorithmInfo, InputError, RawInput, Registry, VisualizeError, Visualizer};
use tracing::{error, info};

use crate::config::SessionConfig;
use crate::controller::Playback;
use crate::error::SessionError;

pub struct Session {
    visualizer: Box<dyn Visualizer>,
    input: RawInput,
    playback: Playback,
    trace_config: TraceConfig,
    last_failure: Option<TraceError>,
}

impl Session {
    /// A session with no input yet (playback idle).
    pub fn new(visualizer: Box<dyn Visualizer>, config: &SessionConfig) -> Self {
        Session {
            visualizer,
            input: RawInput::new(),
            playback: Playback::new(config.playback),
            trace_config: config.trace,
            last_failure: None,
        }
    }

    /// Resolves `id` in `registry` and loads its first test case.
    pub fn open(
        registry: &Registry,
        id: ProblemId,
        config: &SessionConfig,
    ) -> Result<Self, SessionError> {
        let visualizer = registry
            .resolve(id)
            .ok_or(SessionError::UnknownProblem { id })?;
        let mut session = Session::new(visualizer, config);
        if !session.visualizer.test_cases().is_empty() {
            session.load_test_case(0)?;
        }
        Ok(session)
    }

    pub fn info(&self) -> &'static AlgorithmInfo {
        self.visualizer.info()
    }

    pub fn visualizer(&self) -> &dyn Visualizer {
        self.visualizer.as_ref()
    }

    /// The input behind the current trace.
    pub fn input(&self) -> &RawInput {
        &self.input
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    pub fn into_playback(self) -> Playback {
        self.playback
    }

    pub fn trace(&self) -> &Trace {
        self.playback.trace()
    }

    /// The generator failure behind the current (empty) trace, if any.
    pub fn last_failure(&self) -> Option<&TraceError> {
        self.last_failure.as_ref()
    }

    /// Validates `raw` and, if it is accepted, regenerates the trace.
    ///
    /// Rejected input is returned and nothing changes. A generator failure
    /// is not an error here: it is logged, recorded in
    /// [`Session::last_failure`] and leaves an empty trace.
    pub fn set_input(&mut self, raw: RawInput) -> Result<(), InputError> {
        let id = self.info().id;
        let trace = match self.visualizer.generate(&raw, &self.trace_config) {
            Ok(trace) => {
                info!(problem = %id, steps = trace.len(), "trace generated");
                self.last_failure = None;
                trace
            }
            Err(VisualizeError::Input(err)) => return Err(err),
            Err(VisualizeError::Trace(err)) => {
                error!(problem = %id, error = %err, "trace generation failed");
                self.last_failure = Some(err);
                Trace::empty()
            }
        };
        self.input = raw;
        self.playback.load(trace);
        Ok(())
    }

    /// Loads the visualizer's `index`-th example input.
    pub fn load_test_case(&mut self, index: usize) -> Result<(), SessionError> {
        let mut cases = self.visualizer.test_cases();
        let count = cases.len();
        if index >= count {
            return Err(SessionError::NoSuchTestCase { index, count });
        }
        let case = cases.swap_remove(index);
        self.set_input(case.input)?;
        Ok(())
    }

    /// Loads a random input drawn from `seed`.
    pub fn randomize(&mut self, seed: u64) -> Result<(), SessionError> {
        let raw = self.visualizer.random_input(&mut rng_from_seed(seed));
        self.set_input(raw)?;
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("problem", &self.info().id)
            .field("input", &self.input)
            .field("playback", &self.playback)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::PlaybackState;
    use algoviz_core::Value;

    const MOVE_ZEROES: ProblemId = ProblemId(283);

    fn open(config: &SessionConfig) -> Session {
        Session::open(&Registry::builtin(), MOVE_ZEROES, config).unwrap()
    }

    #[test]
    fn open_loads_first_test_case() {
        let session = open(&SessionConfig::default());
        assert_eq!(session.input().get("nums"), Some("0,1,0,3,12"));
        assert_eq!(session.playback().state(), PlaybackState::Paused);
        assert_eq!(session.playback().cursor(), Some(0));
        let last = session.trace().last().unwrap();
        assert_eq!(last.var("finished"), Some(&Value::Bool(true)));
    }

    #[test]
    fn unknown_problem() {
        let err = Session::open(&Registry::builtin(), ProblemId(9999), &SessionConfig::default())
            .unwrap_err();
        assert_eq!(err, SessionError::UnknownProblem { id: ProblemId(9999) });
    }

    #[test]
    fn invalid_input_keeps_current_trace() {
        let mut session = open(&SessionConfig::default());
        session.playback_mut().jump_to_step(2);
        let before = session.trace().clone();

        let err = session
            .set_input(RawInput::new().with("nums", "1,two,3"))
            .unwrap_err();
        assert_eq!(err.field(), Some("nums"));
        assert_eq!(session.trace(), &before);
        assert_eq!(session.playback().cursor(), Some(2));
        assert_eq!(session.input().get("nums"), Some("0,1,0,3,12"));
    }

    #[test]
    fn generator_failure_leaves_an_empty_trace() {
        let mut config = SessionConfig::default();
        config.trace.max_steps = 3;
        let mut session = Session::new(
            Registry::builtin().resolve(MOVE_ZEROES).unwrap(),
            &config,
        );
        session
            .set_input(RawInput::new().with("nums", "0,1,0,3,12"))
            .unwrap();
        assert!(session.trace().is_empty());
        assert_eq!(session.playback().state(), PlaybackState::Idle);
        assert_eq!(
            session.last_failure(),
            Some(&TraceError::StepLimitExceeded { limit: 3 })
        );

        session.set_input(RawInput::new().with("nums", "1")).unwrap();
        assert!(session.last_failure().is_none());
        assert_eq!(session.trace().len(), 3);
    }

    #[test]
    fn new_input_restarts_playback() {
        let mut session = open(&SessionConfig::default());
        session.playback_mut().jump_to_step(3);
        session.playback_mut().play();
        session.load_test_case(1).unwrap();
        assert_eq!(session.playback().cursor(), Some(0));
        assert!(!session.playback().is_playing());
    }

    #[test]
    fn missing_test_case() {
        let mut session = open(&SessionConfig::default());
        let count = session.visualizer().test_cases().len();
        assert_eq!(
            session.load_test_case(count),
            Err(SessionError::NoSuchTestCase { index: count, count })
        );
    }

    #[test]
    fn same_seed_same_trace() {
        let mut a = open(&SessionConfig::default());
        let mut b = open(&SessionConfig::default());
        a.randomize(99).unwrap();
        b.randomize(99).unwrap();
        assert_eq!(a.input(), b.input());
        assert_eq!(a.trace(), b.trace());
    }
}
