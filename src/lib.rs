//! Flappy Gap - a single-screen side-scroller
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, lifecycle)
//! - `game`: Session aggregate and per-frame scheduler wiring the sim to its collaborators
//! - `renderer`: WebGPU rendering of the playfield
//! - `platform`: Clock abstraction (browser, native, manual)
//! - `persistence`: Key/value storage backends
//! - `highscores`: Newest-first score history
//! - `settings`: Data-driven game tuning

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{BootOutcome, Game, LoopControl, RenderHook};
pub use highscores::{ScoreHistory, ScoreRecord};
pub use settings::Settings;

/// Game configuration constants
///
/// Physics values are per tick, not per second: one tick is one display frame.
pub mod consts {
    /// Downward acceleration added to the bird's velocity every tick
    pub const GRAVITY: f32 = 0.5;
    /// Velocity a jump sets (negative is up)
    pub const JUMP_IMPULSE: f32 = -12.0;

    /// Bird defaults
    pub const BIRD_X: f32 = 100.0;
    pub const BIRD_WIDTH: f32 = 30.0;
    pub const BIRD_HEIGHT: f32 = 30.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_GAP: f32 = 150.0;
    /// Leftward obstacle movement per tick
    pub const SCROLL_SPEED: f32 = 2.0;
    /// Distance the newest obstacle travels before the next one spawns
    pub const SPAWN_THRESHOLD: f32 = 200.0;
    /// Minimum height of either obstacle segment
    pub const MIN_CLEARANCE: f32 = 50.0;

    /// Countdown before a run (steps of `COUNTDOWN_STEP_MS`)
    pub const COUNTDOWN_STEPS: u8 = 3;
    pub const COUNTDOWN_STEP_MS: f64 = 1000.0;
    /// "Go" banner shown between the countdown and the first tick
    pub const ANNOUNCE_MS: f64 = 1000.0;
}
