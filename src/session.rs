//! Session driver
//!
//! Runs the simulation at a fixed timestep from variable frame times and
//! starts a new run when the player chooses to play again.

use crate::consts::*;
use crate::platform::Window;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, TickOutcome, tick};

/// One game window's worth of runs
pub struct Session<W: Window> {
    settings: Settings,
    state: GameState,
    window: W,
    accumulator: f32,
    /// Completed runs that ended in "play again"
    restarts: u32,
    closed: bool,
}

impl<W: Window> Session<W> {
    pub fn new(settings: Settings, seed: u64, window: W) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self {
            settings,
            state: GameState::new(settings, seed),
            window,
            accumulator: 0.0,
            restarts: 0,
            closed: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Run as many fixed ticks as `frame_dt` covers. Returns false once the
    /// player has quit.
    pub fn advance(&mut self, frame_dt: f32, input: &TickInput) -> bool {
        if self.closed {
            return false;
        }

        // Cap frame time so a stall doesn't spiral
        let dt = frame_dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let outcome = tick(&mut self.state, input, &mut self.window, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.drain_events();

            match outcome {
                TickOutcome::Continue => {}
                TickOutcome::Reset => {
                    self.restart(self.state.seed.wrapping_add(1));
                    break;
                }
                TickOutcome::Closed => {
                    self.closed = true;
                    return false;
                }
            }
        }
        true
    }

    /// Throw away the current run and build a new one
    pub fn restart(&mut self, seed: u64) {
        self.window.set_camera(None);
        self.state = GameState::new(self.settings, seed);
        self.accumulator = 0.0;
        self.restarts += 1;
        log::info!("Game restarted with seed: {}", seed);
    }

    fn drain_events(&mut self) {
        for event in self.state.take_events() {
            match event {
                GameEvent::Sound(sound) => log::trace!("play {}", sound.0),
                GameEvent::BrickStruck { kind } => {
                    log::debug!(
                        "Brick struck ({:?}), {} left",
                        kind,
                        self.state.bricks_remaining.value()
                    )
                }
                GameEvent::StrikeLost { remaining } => log::debug!("Strike lost, {} left", remaining),
                GameEvent::PerkPaddleExpired => log::debug!("Perk paddle gone"),
                GameEvent::CameraAttached | GameEvent::CameraDetached => {
                    log::debug!("{:?}", event)
                }
                GameEvent::Won | GameEvent::Lost => log::info!("Run finished: {:?}", event),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use crate::testing::*;

    #[test]
    fn test_advance_runs_whole_ticks() {
        let mut session = Session::new(small_settings(), 3, RecordingWindow::default());

        assert!(session.advance(SIM_DT * 2.5, &TickInput::default()));
        assert_eq!(session.state().time_ticks, 2);

        // The leftover half tick carries over
        assert!(session.advance(SIM_DT * 0.6, &TickInput::default()));
        assert_eq!(session.state().time_ticks, 3);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut session = Session::new(small_settings(), 3, RecordingWindow::default());
        session.advance(10.0, &TickInput::default());
        assert!(session.state().time_ticks <= MAX_SUBSTEPS as u64);
        assert!(session.state().time_ticks >= 5);
    }

    #[test]
    fn test_play_again_starts_fresh_run() {
        let window = RecordingWindow {
            answer: true,
            ..Default::default()
        };
        let mut session = Session::new(small_settings(), 40, window);
        let input = TickInput {
            debug_win: true,
            ..Default::default()
        };

        assert!(session.advance(SIM_DT, &input));
        assert_eq!(session.restarts(), 1);
        assert_eq!(session.window().resets, 1);
        assert_eq!(session.window().cameras.last(), Some(&None));

        let state = session.state();
        assert_eq!(state.seed, 41);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.strikes.value(), STRIKES);
    }

    #[test]
    fn test_quit_closes_session() {
        let mut session = Session::new(small_settings(), 40, RecordingWindow::default());
        let input = TickInput {
            debug_win: true,
            ..Default::default()
        };

        assert!(!session.advance(SIM_DT, &input));
        assert!(session.is_closed());
        assert_eq!(session.window().closes, 1);
        assert_eq!(session.window().prompts.len(), 1);

        // Closed sessions stay closed
        assert!(!session.advance(SIM_DT, &TickInput::default()));
        assert_eq!(session.window().prompts.len(), 1);
    }
}
