use crate::behavior::Forces;
use crate::index::PointId;
use crate::vector::Vector2D;
use serde::{Deserialize, Serialize};

/// Which behavior strategy steers a boid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoidType {
    /// Separation, alignment and cohesion with its neighbors.
    Standard,
    /// Random heading changes, ignoring neighbors.
    RandomWalker,
}

/// A single boid entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boid {
    pub id: PointId,
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub kind: BoidType,
}

impl Boid {
    pub fn new(id: PointId, position: Vector2D, velocity: Vector2D, kind: BoidType) -> Self {
        Self {
            id,
            position,
            velocity,
            kind,
        }
    }

    /// Applies one tick of motion: the (already weighted) force components are
    /// summed into an acceleration capped at `max_force`, the velocity is
    /// capped at `max_speed` and the position advances by the velocity.
    pub fn integrate(&mut self, forces: &Forces, max_speed: f64, max_force: f64) {
        let acceleration = forces.total().limit(max_force);
        self.velocity = (self.velocity + acceleration).limit(max_speed);
        self.position += self.velocity;
    }

    /// Wraps the position toroidally into `[0, width) x [0, height)`.
    pub fn wrap_edges(&mut self, width: f64, height: f64) {
        self.position.x = wrap(self.position.x, width);
        self.position.y = wrap(self.position.y, height);
    }
}

fn wrap(value: f64, extent: f64) -> f64 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid rounds tiny negative values up to `extent`
    if wrapped >= extent { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_moves_by_velocity() {
        let mut boid = Boid::new(
            0,
            Vector2D::new(0.0, 0.0),
            Vector2D::new(1.0, 1.0),
            BoidType::Standard,
        );
        boid.integrate(&Forces::ZERO, 10.0, 1.0);
        assert_eq!(boid.position, Vector2D::new(1.0, 1.0));
    }

    #[test]
    fn test_integrate_caps_force_and_speed() {
        let mut boid = Boid::new(0, Vector2D::ZERO, Vector2D::new(3.0, 0.0), BoidType::Standard);
        let forces = Forces {
            separation: Vector2D::new(100.0, 0.0),
            alignment: Vector2D::ZERO,
            cohesion: Vector2D::ZERO,
        };
        boid.integrate(&forces, 10.0, 0.5);
        assert!((boid.velocity.x - 3.5).abs() < 1e-12);

        boid.integrate(&forces, 2.0, 0.5);
        assert!(boid.velocity.magnitude() <= 2.0);
    }

    #[test]
    fn test_weighted_component_steers_harder() {
        use crate::behavior::{BehaviorStrategy, FlockBehavior, FlockWeights};

        let me = Boid::new(0, Vector2D::new(10.0, 10.0), Vector2D::new(0.0, 1.0), BoidType::Standard);
        let close = Boid::new(1, Vector2D::new(15.0, 10.0), Vector2D::new(0.0, 1.0), BoidType::Standard);

        let mut even = FlockBehavior::new(
            FlockWeights {
                separation: 1.0,
                ..FlockWeights::standard()
            },
            4.0,
            0.1,
        );
        let mut heavy = FlockBehavior::new(
            FlockWeights {
                separation: 3.0,
                ..FlockWeights::standard()
            },
            4.0,
            0.1,
        );

        let mut a = me.clone();
        a.integrate(&even.calculate_forces(&me, &[&close]), 4.0, 0.1);
        let mut b = me.clone();
        b.integrate(&heavy.calculate_forces(&me, &[&close]), 4.0, 0.1);

        // Separation pushes towards -x, cohesion towards +x.
        assert!(b.velocity.x < a.velocity.x, "{:?} vs {:?}", a.velocity, b.velocity);
    }

    #[test]
    fn test_wrap_edges() {
        let mut boid = Boid::new(0, Vector2D::new(-1.0, 101.0), Vector2D::ZERO, BoidType::Standard);
        boid.wrap_edges(100.0, 100.0);
        assert_eq!(boid.position, Vector2D::new(99.0, 1.0));

        boid.position = Vector2D::new(100.0, -1e-20);
        boid.wrap_edges(100.0, 100.0);
        assert!(boid.position.x < 100.0 && boid.position.y < 100.0);
        assert!(boid.position.x >= 0.0 && boid.position.y >= 0.0);
    }
}
