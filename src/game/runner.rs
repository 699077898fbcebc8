//! Frame Pump
//!
//! [`MatchRunner`] owns a match and its collaborators and advances it once
//! per host frame:
//!
//! ```text
//! clock ─► dt ─► input poll ─► contact poll ─► tick ─► presenter
//!                                                 └──► recording
//! ```
//!
//! Contacts are polled before the tick runs, so they describe positions at
//! the end of the previous frame.

use tracing::trace;

use crate::game::clock::{Clock, FrameTimer};
use crate::game::config::{ConfigError, MatchConfig};
use crate::game::contact::{ContactReport, ContactSource};
use crate::game::events::{dispatch, Presenter};
use crate::game::input::{InputSource, TickInput};
use crate::game::replay::MatchRecording;
use crate::game::state::{MatchState, PerPlayer, PlayerId};
use crate::game::tick::{tick, TickResult};

/// Drives a match from host-supplied collaborators.
pub struct MatchRunner<C, I, S, P> {
    clock: C,
    input: I,
    contacts: S,
    presenter: P,
    timer: FrameTimer,
    config: MatchConfig,
    state: MatchState,
    recording: MatchRecording,
}

impl<C, I, S, P> MatchRunner<C, I, S, P>
where
    C: Clock,
    I: InputSource,
    S: ContactSource,
    P: Presenter,
{
    /// Start a match. Frame timing starts at the clock's current reading.
    pub fn new(
        config: MatchConfig,
        clock: C,
        input: I,
        contacts: S,
        presenter: P,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let timer = FrameTimer::new(clock.now(), config.game_speed);
        let state = MatchState::new(&config);
        let recording = MatchRecording::new(config.clone());

        Ok(Self {
            clock,
            input,
            contacts,
            presenter,
            timer,
            config,
            state,
            recording,
        })
    }

    /// Advance one frame.
    ///
    /// Returns `None` if no time has passed since the previous pump.
    pub fn pump(&mut self) -> Option<TickResult> {
        let dt = self.timer.delta(self.clock.now());
        if dt <= 0.0 {
            trace!("Skipping frame with no elapsed time");
            return None;
        }

        let input = &mut self.input;
        let action = PerPlayer::from_fn(|id| input.is_action_pressed(id));

        let mut contact = PerPlayer::new(ContactReport::NONE, ContactReport::NONE);
        for id in PlayerId::ALL {
            if self.state.player(id).activity().is_diving() {
                contact[id] = self.contacts.report(id, &self.state);
            }
        }

        let tick_input = TickInput { action, contact };
        let result = tick(&mut self.state, dt, &tick_input, &self.config);

        dispatch(&result.events, &mut self.presenter);
        self.recording.push(dt, tick_input);

        Some(result)
    }

    /// Current match state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Match state, for external repositioning.
    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    /// Config the match runs with.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The clock driving frame timing.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The presenter receiving events.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Every tick run so far.
    pub fn recording(&self) -> &MatchRecording {
        &self.recording
    }

    /// Finish and hand back the recording.
    pub fn into_recording(self) -> MatchRecording {
        self.recording
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::clock::ManualClock;
    use crate::game::contact::{HitboxDetector, NoContact};
    use crate::game::events::NullPresenter;
    use crate::game::input::ScriptedInput;
    use crate::game::outcome::RoundOutcome;
    use crate::game::replay::replay;
    use crate::game::state::{ActivityKind, Facing};

    const DT: f64 = 1.0 / 30.0;

    #[derive(Default)]
    struct Recorder {
        moves: usize,
        activities: Vec<(PlayerId, ActivityKind, ActivityKind)>,
        rounds: Vec<(RoundOutcome, PerPlayer<u32>)>,
    }

    impl Presenter for Recorder {
        fn on_position_changed(&mut self, _player: PlayerId, _x: f64, _height: f64, _facing: Facing) {
            self.moves += 1;
        }

        fn on_activity_changed(&mut self, player: PlayerId, from: ActivityKind, to: ActivityKind) {
            self.activities.push((player, from, to));
        }

        fn on_round_end(&mut self, outcome: RoundOutcome, scores: PerPlayer<u32>) {
            self.rounds.push((outcome, scores));
        }
    }

    /// Counts which players were polled for contacts.
    #[derive(Default)]
    struct PollCounter {
        polls: PerPlayer<usize>,
    }

    impl ContactSource for PollCounter {
        fn report(&mut self, player: PlayerId, _state: &MatchState) -> ContactReport {
            self.polls[player] += 1;
            ContactReport::NONE
        }
    }

    /// Hold for 25 frames (to the top of the jump), release, press: dive.
    fn dive_from_apex() -> &'static [(usize, usize)] {
        &[(0, 25), (26, 27)]
    }

    #[test]
    fn test_both_dive_feet_meet_double_ko() {
        let input = ScriptedInput::holds(120, PerPlayer::new(dive_from_apex(), dive_from_apex()));
        let mut runner = MatchRunner::new(
            MatchConfig::default(),
            ManualClock::new(),
            input,
            HitboxDetector::default(),
            Recorder::default(),
        )
        .unwrap();

        let mut outcome = None;
        for _ in 0..120 {
            runner.clock().advance_secs(DT);
            if let Some(result) = runner.pump() {
                if result.outcome.is_some() {
                    outcome = result.outcome;
                    break;
                }
            }
        }

        assert_eq!(outcome, Some(RoundOutcome::DoubleKo));
        assert_eq!(runner.state().scores(), PerPlayer::new(1, 1));
        assert_eq!(runner.state().round, 2);
        assert_eq!(
            runner.presenter().rounds,
            vec![(RoundOutcome::DoubleKo, PerPlayer::new(1, 1))]
        );

        // Both went Stand -> Jump -> Dive, then back to Stand on the reset.
        let first: Vec<_> = runner
            .presenter()
            .activities
            .iter()
            .filter(|(id, _, _)| *id == PlayerId::First)
            .map(|&(_, from, to)| (from, to))
            .collect();
        assert_eq!(
            first,
            vec![
                (ActivityKind::Stand, ActivityKind::Jump),
                (ActivityKind::Jump, ActivityKind::Dive),
                (ActivityKind::Dive, ActivityKind::Stand),
            ]
        );
        assert!(runner.presenter().moves > 0);
    }

    #[test]
    fn test_zero_dt_frame_skipped() {
        let mut runner = MatchRunner::new(
            MatchConfig::default(),
            ManualClock::new(),
            |_: PlayerId| true,
            NoContact,
            NullPresenter,
        )
        .unwrap();

        assert!(runner.pump().is_none());
        assert_eq!(runner.state().tick, 0);
        assert!(runner.recording().is_empty());

        runner.clock().advance_secs(DT);
        assert!(runner.pump().is_some());
        assert!(runner.pump().is_none());
        assert_eq!(runner.state().tick, 1);
    }

    #[test]
    fn test_game_speed_scales_dt() {
        let config = MatchConfig {
            game_speed: 2.0,
            ..MatchConfig::default()
        };
        let mut runner =
            MatchRunner::new(config, ManualClock::new(), |_: PlayerId| false, NoContact, NullPresenter).unwrap();

        runner.clock().advance_secs(0.25);
        runner.pump();
        let recorded = runner.recording().ticks[0].dt;
        assert!((recorded - 0.5).abs() < 1e-9);
        assert!((runner.state().elapsed - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_contacts_polled_only_while_diving() {
        let first: &[(usize, usize)] = &[(0, 2), (3, 4)];
        let second: &[(usize, usize)] = &[];
        let input = ScriptedInput::holds(10, PerPlayer::new(first, second));
        let mut runner = MatchRunner::new(
            MatchConfig::default(),
            ManualClock::new(),
            input,
            PollCounter::default(),
            NullPresenter,
        )
        .unwrap();

        for _ in 0..4 {
            runner.clock().advance_secs(DT);
            runner.pump();
        }
        assert!(runner.state().player(PlayerId::First).activity().is_diving());

        // Nobody was diving before any of those four frames.
        assert_eq!(runner.contacts.polls, PerPlayer::new(0, 0));

        runner.clock().advance_secs(DT);
        runner.pump();
        assert_eq!(runner.contacts.polls, PerPlayer::new(1, 0));
    }

    #[test]
    fn test_recording_replays_to_same_state() {
        let first: &[(usize, usize)] = &[(0, 20), (22, 23)];
        let second: &[(usize, usize)] = &[(5, 40), (41, 42)];
        let input = ScriptedInput::holds(200, PerPlayer::new(first, second));
        let mut runner = MatchRunner::new(
            MatchConfig::default(),
            ManualClock::new(),
            input,
            HitboxDetector::default(),
            NullPresenter,
        )
        .unwrap();

        for frame in 0..200 {
            // Uneven frame pacing.
            let step = if frame % 3 == 0 { 0.05 } else { 0.02 };
            runner.clock().advance_secs(step);
            runner.pump();
        }

        let live_hash = runner.state().compute_hash();
        let live_scores = runner.state().scores();
        let recording = runner.into_recording();
        assert_eq!(recording.len(), 200);

        let (replayed, _) = replay(&recording).unwrap();
        assert_eq!(replayed.compute_hash(), live_hash);
        assert_eq!(replayed.scores(), live_scores);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = MatchConfig::default();
        config.game_speed = 0.0;
        let runner = MatchRunner::new(config, ManualClock::new(), |_: PlayerId| false, NoContact, NullPresenter);
        assert!(matches!(
            runner,
            Err(ConfigError::NonPositive { name: "game_speed", .. })
        ));
    }
}
