//! Snow particle system (stateful).

use glam::Vec3;
use platonic_core::{Rgb, SceneState, Tuning, palette};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Starting particle size before the first update.
const INITIAL_SIZE: f32 = 0.12;

/// Opacity of the particle material.
pub const PARTICLE_OPACITY: f32 = 0.7;

/// A fixed set of particles sharing one color and size.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    positions: Vec<Vec3>,
    color: Rgb,
    size: f32,
}

impl ParticleSystem {
    /// Scatter `count` particles uniformly in the cube `[-bound, bound]³`.
    pub fn new(count: usize, bound: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-bound..bound),
                    rng.random_range(-bound..bound),
                    rng.random_range(-bound..bound),
                )
            })
            .collect();
        Self::from_positions(positions)
    }

    /// Build a system from explicit positions.
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            color: palette::WHITE,
            size: INITIAL_SIZE,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Color the particles fade toward in the given state.
    pub fn target_color(state: &SceneState) -> Rgb {
        if state.is_finale() {
            palette::FESTIVE_RED
        } else {
            state.active_element().particle_color()
        }
    }

    /// Advance one tick at scene time `t`.
    pub fn update(&mut self, state: &SceneState, t: f32, tuning: &Tuning) {
        self.color = self
            .color
            .lerp(Self::target_color(state), tuning.particle_color_rate);

        let rule = tuning.drift.select(state);
        self.size = rule.size_at(t);

        let bound = tuning.particle_bound;
        for (i, p) in self.positions.iter_mut().enumerate() {
            let (dx, dy) = rule.delta(t, i, p.y);
            p.x += dx;
            p.y = wrap(p.y + dy, bound);
        }
    }
}

/// Wrap `y` into `[-bound, bound]`, carrying the overshoot to the other side.
pub fn wrap(y: f32, bound: f32) -> f32 {
    if (-bound..=bound).contains(&y) {
        return y;
    }
    (y + bound).rem_euclid(2.0 * bound) - bound
}
