//! Session lifecycle state machine
//!
//! Idle -> CountingDown -> Announcing -> Active -> Over -> CountingDown ...
//!
//! Timed phases carry their own deadlines (milliseconds on the caller's
//! clock), so the machine is advanced by passing in the current time rather
//! than by callbacks.

use super::state::{GamePhase, GameState};
use crate::settings::Settings;

/// Transition produced by advancing the timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Countdown moved to a new number
    Countdown(u8),
    /// Countdown finished, "go" banner shown
    Announce,
    /// Simulation starts on the next frame
    Activated,
}

fn begin_countdown(state: &mut GameState, settings: &Settings, now: f64) {
    state.reset_run(settings);
    let steps = settings.countdown_steps;
    state.phase = if steps == 0 {
        GamePhase::Announcing {
            until: now + settings.announce_ms,
        }
    } else {
        GamePhase::CountingDown {
            remaining: steps,
            next_step_at: now + settings.countdown_step_ms,
        }
    };
}

/// "Start new game": only valid once per session
///
/// Returns false (and changes nothing) if a game was already started.
pub fn start_new_game(state: &mut GameState, settings: &Settings, now: f64) -> bool {
    if state.started {
        return false;
    }
    state.started = true;
    begin_countdown(state, settings, now);
    log::info!("New game started");
    true
}

/// Resume a session whose start was recorded before a reload
///
/// Skips the start affordance and goes straight to a fresh countdown.
pub fn resume(state: &mut GameState, settings: &Settings, now: f64) -> bool {
    if state.phase != GamePhase::Idle {
        return false;
    }
    state.started = true;
    begin_countdown(state, settings, now);
    log::info!("Resumed started session");
    true
}

/// Restart after a run ended. No-op outside `Over`.
pub fn restart(state: &mut GameState, settings: &Settings, now: f64) -> bool {
    if !state.phase.is_over() {
        return false;
    }
    begin_countdown(state, settings, now);
    log::info!("Game restarted");
    true
}

/// End the active run
///
/// Returns the final score on the `Active -> Over` transition only, so a run
/// can be recorded exactly once.
pub fn finish_run(state: &mut GameState) -> Option<u32> {
    if !state.phase.is_active() {
        return None;
    }
    state.phase = GamePhase::Over;
    log::info!("Game over with score {} after {} ticks", state.score, state.time_ticks);
    Some(state.score)
}

/// Whether input commands (jump) are currently applied
pub fn accepts_input(state: &GameState) -> bool {
    state.phase.is_active()
}

/// Fire every deadline that has elapsed by `now`
///
/// Deadlines are chained from the previous deadline rather than from `now`,
/// so a late frame catches up without stretching the countdown.
pub fn advance(state: &mut GameState, settings: &Settings, now: f64) -> Vec<LifecycleEvent> {
    let mut events = Vec::new();
    loop {
        match state.phase {
            GamePhase::CountingDown {
                remaining,
                next_step_at,
            } if now >= next_step_at => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    state.phase = GamePhase::Announcing {
                        until: next_step_at + settings.announce_ms,
                    };
                    events.push(LifecycleEvent::Announce);
                } else {
                    state.phase = GamePhase::CountingDown {
                        remaining,
                        next_step_at: next_step_at + settings.countdown_step_ms,
                    };
                    events.push(LifecycleEvent::Countdown(remaining));
                }
            }
            GamePhase::Announcing { until } if now >= until => {
                state.phase = GamePhase::Active;
                events.push(LifecycleEvent::Activated);
                log::info!("Run active");
            }
            _ => break,
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Playfield;

    fn new_state() -> (GameState, Settings) {
        let settings = Settings::default();
        let state = GameState::new(Playfield::new(800.0, 600.0), &settings, 11);
        (state, settings)
    }

    #[test]
    fn test_full_countdown_sequence() {
        let (mut state, settings) = new_state();
        assert!(start_new_game(&mut state, &settings, 0.0));
        assert_eq!(
            state.phase,
            GamePhase::CountingDown {
                remaining: 3,
                next_step_at: 1000.0
            }
        );

        assert!(advance(&mut state, &settings, 999.0).is_empty());
        assert_eq!(advance(&mut state, &settings, 1000.0), vec![LifecycleEvent::Countdown(2)]);
        assert_eq!(advance(&mut state, &settings, 2000.0), vec![LifecycleEvent::Countdown(1)]);
        assert_eq!(advance(&mut state, &settings, 3000.0), vec![LifecycleEvent::Announce]);
        assert_eq!(state.phase, GamePhase::Announcing { until: 4000.0 });
        assert!(advance(&mut state, &settings, 3999.0).is_empty());
        assert_eq!(advance(&mut state, &settings, 4000.0), vec![LifecycleEvent::Activated]);
        assert!(state.phase.is_active());
    }

    #[test]
    fn test_late_frame_catches_up() {
        let (mut state, settings) = new_state();
        start_new_game(&mut state, &settings, 100.0);
        let events = advance(&mut state, &settings, 10_000.0);
        assert_eq!(
            events,
            vec![
                LifecycleEvent::Countdown(2),
                LifecycleEvent::Countdown(1),
                LifecycleEvent::Announce,
                LifecycleEvent::Activated,
            ]
        );
    }

    #[test]
    fn test_start_only_once_per_session() {
        let (mut state, settings) = new_state();
        assert!(start_new_game(&mut state, &settings, 0.0));
        advance(&mut state, &settings, 500.0);
        let phase = state.phase;
        assert!(!start_new_game(&mut state, &settings, 600.0));
        assert_eq!(state.phase, phase);
    }

    #[test]
    fn test_input_only_while_active() {
        let (mut state, settings) = new_state();
        assert!(!accepts_input(&state));
        start_new_game(&mut state, &settings, 0.0);
        assert!(!accepts_input(&state));
        advance(&mut state, &settings, 3500.0);
        assert!(!accepts_input(&state));
        advance(&mut state, &settings, 4000.0);
        assert!(accepts_input(&state));
        finish_run(&mut state);
        assert!(!accepts_input(&state));
    }

    #[test]
    fn test_finish_run_reports_once() {
        let (mut state, settings) = new_state();
        assert_eq!(finish_run(&mut state), None);
        start_new_game(&mut state, &settings, 0.0);
        advance(&mut state, &settings, 4000.0);
        state.score = 4;
        assert_eq!(finish_run(&mut state), Some(4));
        assert_eq!(finish_run(&mut state), None);
        assert!(state.is_game_over());
    }

    #[test]
    fn test_restart_only_from_over() {
        let (mut state, settings) = new_state();
        assert!(!restart(&mut state, &settings, 0.0));
        start_new_game(&mut state, &settings, 0.0);
        assert!(!restart(&mut state, &settings, 10.0));
        advance(&mut state, &settings, 4000.0);
        assert!(!restart(&mut state, &settings, 4010.0));

        state.score = 3;
        state.bird.pos.y = 590.0;
        state.bird.vel = 9.0;
        finish_run(&mut state);

        assert!(restart(&mut state, &settings, 5000.0));
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.bird.pos.y, 300.0);
        assert_eq!(state.bird.vel, 0.0);
        assert_eq!(
            state.phase,
            GamePhase::CountingDown {
                remaining: 3,
                next_step_at: 6000.0
            }
        );
    }

    #[test]
    fn test_resume_skips_start() {
        let (mut state, settings) = new_state();
        assert!(resume(&mut state, &settings, 0.0));
        assert!(state.started);
        assert!(matches!(state.phase, GamePhase::CountingDown { .. }));
        // The recorded start also blocks a second explicit start
        assert!(!start_new_game(&mut state, &settings, 1.0));
    }

    #[test]
    fn test_zero_step_countdown_goes_straight_to_banner() {
        let (mut state, mut settings) = new_state();
        settings.countdown_steps = 0;
        start_new_game(&mut state, &settings, 0.0);
        assert_eq!(state.phase, GamePhase::Announcing { until: 1000.0 });
    }
}
