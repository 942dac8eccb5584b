//! Collision and progress evaluation
//!
//! Boundary hits, obstacle hits and passed obstacles are all checked every
//! tick. A collision never stops the remaining checks, so an obstacle that
//! leaves the screen on the same tick still scores.

use super::state::{Bird, Obstacle, Playfield};

/// What the bird hit first on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Bird's top edge above the playfield
    Ceiling,
    /// Bird's bottom edge below the playfield
    Floor,
    /// Bird overlaps an obstacle segment
    Obstacle,
}

/// Result of evaluating one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// Whether any collision occurred
    pub collided: bool,
    /// First collision detected (boundary before obstacles)
    pub cause: Option<CollisionKind>,
    /// Number of obstacles hit this tick
    pub obstacle_hits: u32,
    /// Obstacles that passed the left edge and were removed
    pub scored: u32,
}

impl Evaluation {
    fn hit(&mut self, kind: CollisionKind) {
        self.collided = true;
        if self.cause.is_none() {
            self.cause = Some(kind);
        }
    }
}

/// Check the bird against the playfield's top and bottom
pub fn boundary_collision(bird: &Bird, playfield: &Playfield) -> Option<CollisionKind> {
    if bird.bottom() > playfield.height {
        Some(CollisionKind::Floor)
    } else if bird.top() < 0.0 {
        Some(CollisionKind::Ceiling)
    } else {
        None
    }
}

/// Check the bird against one obstacle's top and bottom segments
pub fn obstacle_collision(bird: &Bird, obstacle: &Obstacle, playfield: &Playfield) -> bool {
    obstacle.overlaps_horizontally(bird)
        && (bird.top() < obstacle.top_height || bird.bottom() > obstacle.bottom_top(playfield))
}

/// Evaluate collisions and passage for one tick
///
/// Passed obstacles are removed from `obstacles`; each one adds exactly one
/// to `scored`.
pub fn evaluate(bird: &Bird, obstacles: &mut Vec<Obstacle>, playfield: &Playfield) -> Evaluation {
    let mut eval = Evaluation::default();

    if let Some(kind) = boundary_collision(bird, playfield) {
        eval.hit(kind);
    }

    for obstacle in obstacles.iter() {
        if obstacle_collision(bird, obstacle, playfield) {
            eval.obstacle_hits += 1;
            eval.hit(CollisionKind::Obstacle);
        }
    }

    let before = obstacles.len();
    obstacles.retain(|o| !o.has_passed());
    eval.scored = (before - obstacles.len()) as u32;

    eval
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn setup() -> (Bird, Playfield) {
        let playfield = Playfield::new(800.0, 600.0);
        (Bird::new(&playfield, &Settings::default()), playfield)
    }

    fn obstacle(x: f32, top_height: f32) -> Obstacle {
        Obstacle {
            x,
            top_height,
            bottom_height: 600.0 - top_height - 150.0,
            width: 50.0,
            gap: 150.0,
        }
    }

    #[test]
    fn test_no_collision_in_open_air() {
        let (bird, playfield) = setup();
        let mut obstacles = vec![obstacle(500.0, 100.0)];
        let eval = evaluate(&bird, &mut obstacles, &playfield);
        assert!(!eval.collided);
        assert_eq!(eval.scored, 0);
        assert_eq!(obstacles.len(), 1);
    }

    #[test]
    fn test_floor_and_ceiling() {
        let (mut bird, playfield) = setup();

        bird.pos.y = 570.0;
        assert_eq!(boundary_collision(&bird, &playfield), None);
        bird.pos.y = 570.5;
        assert_eq!(boundary_collision(&bird, &playfield), Some(CollisionKind::Floor));

        bird.pos.y = 0.0;
        assert_eq!(boundary_collision(&bird, &playfield), None);
        bird.pos.y = -0.5;
        assert_eq!(boundary_collision(&bird, &playfield), Some(CollisionKind::Ceiling));
    }

    #[test]
    fn test_top_and_bottom_segments() {
        let (mut bird, playfield) = setup();
        // Gap spans y in [250, 400]
        let o = obstacle(bird.left(), 250.0);

        bird.pos.y = 260.0;
        assert!(!obstacle_collision(&bird, &o, &playfield));

        bird.pos.y = 249.0;
        assert!(obstacle_collision(&bird, &o, &playfield));

        // Bottom edge 401 > 400
        bird.pos.y = 371.0;
        assert!(obstacle_collision(&bird, &o, &playfield));
    }

    #[test]
    fn test_segments_ignored_without_horizontal_overlap() {
        let (mut bird, playfield) = setup();
        bird.pos.y = 10.0;
        let o = obstacle(bird.right() + 5.0, 250.0);
        assert!(!obstacle_collision(&bird, &o, &playfield));
    }

    #[test]
    fn test_passed_obstacle_scores_once_and_is_removed() {
        let (bird, playfield) = setup();
        let mut obstacles = vec![
            obstacle(-50.5, 100.0),
            obstacle(-50.0, 100.0),
            obstacle(400.0, 100.0),
        ];
        let eval = evaluate(&bird, &mut obstacles, &playfield);
        // Right edge exactly at 0 has not passed yet
        assert_eq!(eval.scored, 1);
        assert_eq!(obstacles.len(), 2);
        assert_eq!(obstacles[0].x, -50.0);

        let eval = evaluate(&bird, &mut obstacles, &playfield);
        assert_eq!(eval.scored, 0);
    }

    #[test]
    fn test_collision_does_not_cancel_scoring() {
        let (mut bird, playfield) = setup();
        bird.pos.y = 590.0;
        let mut obstacles = vec![obstacle(-60.0, 100.0), obstacle(bird.left(), 100.0)];
        let eval = evaluate(&bird, &mut obstacles, &playfield);
        assert!(eval.collided);
        assert_eq!(eval.cause, Some(CollisionKind::Floor));
        assert_eq!(eval.obstacle_hits, 1);
        assert_eq!(eval.scored, 1);
    }

    #[test]
    fn test_every_obstacle_is_checked() {
        let (mut bird, playfield) = setup();
        bird.pos.y = 20.0;
        let mut obstacles = vec![
            obstacle(bird.left() - 10.0, 100.0),
            obstacle(bird.left() + 10.0, 100.0),
        ];
        let eval = evaluate(&bird, &mut obstacles, &playfield);
        assert_eq!(eval.cause, Some(CollisionKind::Obstacle));
        assert_eq!(eval.obstacle_hits, 2);
    }
}
