//! Obstacle generation
//!
//! New obstacles enter at the right edge with a randomly placed gap.

use rand::Rng;

use super::state::{GameState, Obstacle, Playfield};
use crate::settings::Settings;

/// Generate one obstacle at the right edge of the playfield
///
/// The top segment height is uniform in
/// `[min_clearance, height - gap - min_clearance]`, so both segments are at
/// least `min_clearance` tall and the gap is exactly `gap`. A playfield too
/// short for both clearances gets the gap centred instead, and one shorter
/// than the gap itself is all gap.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    playfield: &Playfield,
    gap: f32,
    min_clearance: f32,
    width: f32,
) -> Obstacle {
    let gap = gap.min(playfield.height);
    let max_top = playfield.height - gap - min_clearance;
    let top_height = if max_top >= min_clearance {
        rng.random_range(min_clearance..=max_top)
    } else {
        (playfield.height - gap) / 2.0
    };

    Obstacle {
        x: playfield.width,
        top_height,
        bottom_height: playfield.height - top_height - gap,
        width,
        gap,
    }
}

/// Whether the obstacle stream needs a new entry
pub fn needs_obstacle(state: &GameState, spawn_threshold: f32) -> bool {
    match state.newest_obstacle() {
        None => true,
        Some(newest) => newest.x < state.playfield.width - spawn_threshold,
    }
}

/// Keep the obstacle stream populated. Returns true if one was added.
pub fn ensure_supply(state: &mut GameState, settings: &Settings) -> bool {
    if !needs_obstacle(state, settings.spawn_threshold) {
        return false;
    }

    let obstacle = generate(
        &mut state.rng,
        &state.playfield,
        settings.gap,
        settings.min_clearance,
        settings.obstacle_width,
    );
    log::trace!(
        "Spawned obstacle top={:.1} bottom={:.1}",
        obstacle.top_height,
        obstacle.bottom_height
    );
    state.obstacles.push(obstacle);
    true
}
