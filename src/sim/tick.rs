//! One simulation step
//!
//! Order is fixed: integrate the bird, scroll obstacles, evaluate collisions
//! and passage, then top up the obstacle stream.

use super::collision::{self, CollisionKind};
use super::lifecycle;
use super::physics;
use super::spawn;
use super::state::GameState;
use crate::settings::Settings;

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Whether the tick ran at all (only while `Active`)
    pub ran: bool,
    pub collided: bool,
    pub cause: Option<CollisionKind>,
    /// Points earned this tick
    pub scored: u32,
    /// Final score, set on the tick that ended the run
    pub finished: Option<u32>,
}

/// Advance the game state by one tick
///
/// Does nothing unless the session is `Active`. A collision ends the run on
/// this tick, after every check and the obstacle top-up have run.
pub fn tick(state: &mut GameState, settings: &Settings) -> TickOutcome {
    if !state.phase.is_active() {
        return TickOutcome::default();
    }

    state.time_ticks += 1;

    physics::integrate(&mut state.bird);
    physics::scroll(&mut state.obstacles, settings.scroll_speed);

    let eval = collision::evaluate(&state.bird, &mut state.obstacles, &state.playfield);
    state.score += eval.scored;
    if eval.scored > 0 {
        log::debug!("Score {}", state.score);
    }

    spawn::ensure_supply(state, settings);

    let finished = if eval.collided {
        log::debug!("Collision: {:?}", eval.cause);
        lifecycle::finish_run(state)
    } else {
        None
    };

    TickOutcome {
        ran: true,
        collided: eval.collided,
        cause: eval.cause,
        scored: eval.scored,
        finished,
    }
}

/// Apply a jump if the session accepts input. Returns whether it applied.
pub fn jump(state: &mut GameState) -> bool {
    if !lifecycle::accepts_input(state) {
        return false;
    }
    physics::jump(&mut state.bird);
    true
}
