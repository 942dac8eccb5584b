//! Shape generation for 2D primitives
//!
//! Everything here works in playfield coordinates: origin top-left, y down.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::sim::{Bird, Obstacle, Playfield};

/// Two triangles covering the axis-aligned rectangle at `min` with `size`
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Top and bottom segments of an obstacle
pub fn obstacle(obstacle: &Obstacle, playfield: &Playfield, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(12);
    if obstacle.top_height > 0.0 {
        vertices.extend(rect(
            Vec2::new(obstacle.x, 0.0),
            Vec2::new(obstacle.width, obstacle.top_height),
            color,
        ));
    }
    if obstacle.bottom_height > 0.0 {
        vertices.extend(rect(
            Vec2::new(obstacle.x, obstacle.bottom_top(playfield)),
            Vec2::new(obstacle.width, obstacle.bottom_height),
            color,
        ));
    }
    vertices
}

/// Full scene: obstacles first, bird on top
pub fn scene(bird: &Bird, obstacles: &[Obstacle], playfield: &Playfield) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(obstacles.len() * 12 + 6);
    for o in obstacles {
        vertices.extend(obstacle(o, playfield, colors::OBSTACLE));
    }
    vertices.extend(rect(bird.pos, bird.size, colors::BIRD));
    vertices
}
