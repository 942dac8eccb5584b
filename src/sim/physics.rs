//! Per-tick integration
//!
//! Gravity and velocity are in units per tick, so simulation speed follows the
//! display refresh rate.

use super::state::{Bird, Obstacle};

/// Semi-implicit Euler step: velocity first, then position
pub fn integrate(bird: &mut Bird) {
    bird.vel += bird.gravity;
    bird.pos.y += bird.vel;
}

/// Overwrite the velocity with the jump impulse
pub fn jump(bird: &mut Bird) {
    bird.vel = bird.jump_impulse;
}

/// Move every obstacle left by `speed`
pub fn scroll(obstacles: &mut [Obstacle], speed: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= speed;
    }
}
