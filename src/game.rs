//! Session aggregate and frame scheduler
//!
//! `Game` owns the simulation state together with its collaborators (clock,
//! session flag store, score history store) and exposes the host-facing
//! commands. The host calls [`Game::frame`] once per display refresh until it
//! returns [`LoopControl::Stop`].

use crate::highscores::{ScoreHistory, ScoreRecord};
use crate::persistence::{self, Storage};
use crate::platform::Clock;
use crate::settings::Settings;
use crate::sim::{self, Bird, GamePhase, GameState, Obstacle, Playfield, lifecycle};

/// Receives the post-update world once per tick
///
/// Only shared borrows are handed out, so a hook cannot mutate the session.
pub trait RenderHook {
    fn render(&mut self, bird: &Bird, obstacles: &[Obstacle], score: u32);
}

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// What the host should show after [`Game::boot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootOutcome {
    /// Fresh session: offer "start new game"
    ShowStart,
    /// Session already started before a reload: countdown is running
    Resumed,
}

pub struct Game {
    state: GameState,
    settings: Settings,
    /// Session-scoped store holding the started flag
    session_store: Box<dyn Storage>,
    /// Durable store holding the score history
    score_store: Box<dyn Storage>,
    clock: Box<dyn Clock>,
}

impl Game {
    pub fn new(
        playfield: Playfield,
        settings: Settings,
        session_store: Box<dyn Storage>,
        score_store: Box<dyn Storage>,
        clock: Box<dyn Clock>,
        seed: u64,
    ) -> Self {
        log::info!(
            "Game created: playfield {}x{}, seed {}",
            playfield.width,
            playfield.height,
            seed
        );
        Self {
            state: GameState::new(playfield, &settings, seed),
            settings,
            session_store,
            score_store,
            clock,
        }
    }

    /// Read the session flag once and either wait for "start" or resume
    pub fn boot(&mut self) -> BootOutcome {
        if persistence::session_started(self.session_store.as_ref()) {
            let now = self.clock.now_ms();
            lifecycle::resume(&mut self.state, &self.settings, now);
            BootOutcome::Resumed
        } else {
            BootOutcome::ShowStart
        }
    }

    /// "Start new game". Only the first call per session does anything.
    pub fn start_new_game(&mut self) -> bool {
        let now = self.clock.now_ms();
        if !lifecycle::start_new_game(&mut self.state, &self.settings, now) {
            return false;
        }
        if let Err(e) = persistence::mark_session_started(self.session_store.as_mut()) {
            log::warn!("Could not record session start: {}", e);
        }
        true
    }

    /// Restart after game over. No-op in any other phase.
    pub fn restart(&mut self) -> bool {
        let now = self.clock.now_ms();
        lifecycle::restart(&mut self.state, &self.settings, now)
    }

    /// Jump command from any input source; ignored unless a run is active
    pub fn jump(&mut self) -> bool {
        sim::jump(&mut self.state)
    }

    /// One display frame
    ///
    /// Fires elapsed lifecycle timers, then runs one tick if the run is
    /// active and hands the updated world to `render`. Returns `Stop` from the
    /// tick that ends the run, and while no run is pending (Idle or Over).
    pub fn frame(&mut self, render: &mut dyn RenderHook) -> LoopControl {
        let now = self.clock.now_ms();
        for event in lifecycle::advance(&mut self.state, &self.settings, now) {
            log::debug!("Lifecycle: {:?}", event);
        }

        match self.state.phase {
            GamePhase::Idle | GamePhase::Over => LoopControl::Stop,
            GamePhase::CountingDown { .. } | GamePhase::Announcing { .. } => LoopControl::Continue,
            GamePhase::Active => {
                let outcome = sim::tick(&mut self.state, &self.settings);
                if let Some(score) = outcome.finished {
                    self.record_run(score);
                }
                render.render(&self.state.bird, &self.state.obstacles, self.state.score);
                if outcome.finished.is_some() {
                    LoopControl::Stop
                } else {
                    LoopControl::Continue
                }
            }
        }
    }

    fn record_run(&mut self, score: u32) {
        let record = ScoreRecord::new(score, self.clock.timestamp());
        if let Err(e) = ScoreHistory::append(self.score_store.as_mut(), record) {
            log::warn!("Could not save score {}: {}", score, e);
        }
    }

    /// Stored run history, newest first
    pub fn history(&self) -> ScoreHistory {
        ScoreHistory::load(self.score_store.as_ref())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Number to show while counting down
    pub fn countdown(&self) -> Option<u8> {
        match self.state.phase {
            GamePhase::CountingDown { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    pub fn is_announcing(&self) -> bool {
        matches!(self.state.phase, GamePhase::Announcing { .. })
    }

    /// Re-send the current world to a render hook without ticking
    pub fn redraw(&self, render: &mut dyn RenderHook) {
        render.render(&self.state.bird, &self.state.obstacles, self.state.score);
    }
}
