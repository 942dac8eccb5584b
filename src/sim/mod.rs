//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per tick, no wall-clock time inside a tick
//! - Seeded RNG only
//! - Lifecycle timers driven by a time value passed in by the caller
//! - No rendering or platform dependencies

pub mod collision;
pub mod lifecycle;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionKind, Evaluation, evaluate};
pub use lifecycle::LifecycleEvent;
pub use state::{Bird, GamePhase, GameState, Obstacle, Playfield};
pub use tick::{TickOutcome, jump, tick};
