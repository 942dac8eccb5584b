//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`]; components receive it by
//! reference instead of reaching for globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::settings::Settings;

/// Current phase of the session lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GamePhase {
    /// Nothing started yet, waiting for "start new game"
    Idle,
    /// Pre-run countdown; `remaining` is the number currently displayed
    CountingDown { remaining: u8, next_step_at: f64 },
    /// "Go" banner after the countdown reaches zero
    Announcing { until: f64 },
    /// Simulation running
    Active,
    /// Run ended, waiting for restart
    Over,
}

impl GamePhase {
    pub fn is_active(&self) -> bool {
        matches!(self, GamePhase::Active)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::Over)
    }
}

/// Playfield size supplied by the host, constant for the run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Where a fresh bird starts (vertically centred)
    pub fn spawn_point(&self, bird_x: f32) -> Vec2 {
        Vec2::new(bird_x, self.height / 2.0)
    }
}

/// The player-controlled bird
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    /// Top-left corner; x never changes during a run
    pub pos: Vec2,
    /// Vertical velocity in units per tick (positive is down)
    pub vel: f32,
    pub size: Vec2,
    pub gravity: f32,
    pub jump_impulse: f32,
}

impl Bird {
    pub fn new(playfield: &Playfield, settings: &Settings) -> Self {
        Self {
            pos: playfield.spawn_point(settings.bird_x),
            vel: 0.0,
            size: Vec2::new(settings.bird_width, settings.bird_height),
            gravity: settings.gravity,
            jump_impulse: settings.jump_impulse,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// A top/bottom obstacle pair with a gap between the segments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    pub top_height: f32,
    pub bottom_height: f32,
    pub width: f32,
    /// Gap used when this obstacle was generated
    pub gap: f32,
}

impl Obstacle {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// y coordinate where the bottom segment begins
    pub fn bottom_top(&self, playfield: &Playfield) -> f32 {
        playfield.height - self.bottom_height
    }

    /// True once the right edge has moved past the left side of the playfield
    pub fn has_passed(&self) -> bool {
        self.right() < 0.0
    }

    pub fn overlaps_horizontally(&self, bird: &Bird) -> bool {
        bird.left() < self.right() && bird.right() > self.x
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub rng: Pcg32,
    pub playfield: Playfield,
    pub bird: Bird,
    /// Active obstacles, oldest (leftmost) first
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub phase: GamePhase,
    /// Set once "start new game" has been accepted this session
    pub started: bool,
    /// Simulation ticks in the current run
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new idle session with the given seed
    pub fn new(playfield: Playfield, settings: &Settings, seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            playfield,
            bird: Bird::new(&playfield, settings),
            obstacles: Vec::new(),
            score: 0,
            phase: GamePhase::Idle,
            started: false,
            time_ticks: 0,
        }
    }

    /// Reset everything a run mutates. The phase and the RNG stream are left
    /// to the caller.
    pub fn reset_run(&mut self, settings: &Settings) {
        self.bird = Bird::new(&self.playfield, settings);
        self.obstacles.clear();
        self.score = 0;
        self.time_ticks = 0;
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_over()
    }

    /// Newest obstacle (the one furthest right)
    pub fn newest_obstacle(&self) -> Option<&Obstacle> {
        self.obstacles.last()
    }
}
