use nalgebra::Vector2;

use super::Scalar;

/// Kinematic planar model. Commanded pitch and roll map straight to a
/// velocity, there is no inertia and no rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarDynamics {
    pub position: Vector2<Scalar>,
    pub velocity: Vector2<Scalar>,
    pub flying: bool,
    speed_per_power: Scalar,
}

impl PlanarDynamics {
    pub fn new(position: Vector2<Scalar>, speed_per_power: Scalar) -> Self {
        Self {
            position,
            velocity: Vector2::zeros(),
            flying: false,
            speed_per_power,
        }
    }

    pub fn set_attitude(&mut self, pitch: i8, roll: i8) {
        self.velocity = Vector2::new(roll as Scalar, pitch as Scalar) * self.speed_per_power;
    }

    /// Integrates one time step. A landed drone stays put.
    pub fn update(&mut self, dt: Scalar) {
        if self.flying {
            self.position += self.velocity * dt;
        }
    }

    pub fn land(&mut self) {
        self.flying = false;
        self.velocity = Vector2::zeros();
    }
}
