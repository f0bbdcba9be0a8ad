//! Christmas tree that grows into view during the finale.

use glam::{Quat, Vec3};
use platonic_core::{SceneState, Tuning};

use crate::shapes::Transform;

/// Tree position before the finale, far below the view.
const HIDDEN_POSITION: Vec3 = Vec3::new(0.0, -40.0, 0.0);
/// Tree scale before the finale.
const HIDDEN_SCALE: f32 = 0.1;
/// Tree spin per tick while growing.
const GROWTH_SPIN: f32 = 0.001;

const FOLIAGE_LAYERS: usize = 8;
const BAUBLE_RINGS: usize = 5;
/// Local height of the topper star.
pub const TOPPER_HEIGHT: f32 = 11.0;
/// Local radius of the topper star.
pub const TOPPER_RADIUS: f32 = 1.5;

/// A cone in the tree's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cone {
    /// Center of the cone, halfway up its height.
    pub center: Vec3,
    pub radius: f32,
    pub height: f32,
}

/// A bauble hanging on the tree.
#[derive(Debug, Clone)]
pub struct Bauble {
    /// Local position, bobbing over time.
    pub position: Vec3,
    pub scale: f32,
    /// Phase offset of the bob, the bauble's initial x.
    phase: f32,
}

/// The tree group and its decorations.
#[derive(Debug, Clone)]
pub struct Tree {
    pub transform: Transform,
    pub baubles: Vec<Bauble>,
    /// Sway of the topper star around the y axis.
    pub topper_sway: f32,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Self {
            transform: Transform::new(HIDDEN_POSITION, HIDDEN_SCALE),
            baubles: layout_baubles(),
            topper_sway: 0.0,
        }
    }

    /// Advance one tick. The tree only grows while the finale runs.
    pub fn update(&mut self, state: &SceneState, t: f32, tuning: &Tuning) {
        self.topper_sway = (t * 0.5).sin() * 0.2;
        for bauble in &mut self.baubles {
            bauble.position.y += (t * 1.5 + bauble.phase).sin() * 0.006;
        }

        if !state.is_finale() {
            return;
        }
        let rate = tuning.tree_growth_rate;
        let transform = &mut self.transform;
        transform.position.y += (tuning.tree_target_y - transform.position.y) * rate;
        transform.scale = transform
            .scale
            .lerp(Vec3::splat(tuning.tree_target_scale), rate);
        transform.rotation.y += GROWTH_SPIN;
    }

    /// Map a local point into world space.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        let rotation = Quat::from_rotation_y(self.transform.rotation.y);
        self.transform.position + rotation * (local * self.transform.scale)
    }

    /// Foliage layers from the bottom up.
    pub fn foliage(&self) -> impl Iterator<Item = Cone> {
        (0..FOLIAGE_LAYERS).map(|i| Cone {
            center: Vec3::new(0.0, i as f32 * 1.6, 0.0),
            radius: 5.5 - i as f32 * 0.7,
            height: 4.5,
        })
    }

    /// The trunk below the lowest layer.
    pub fn trunk(&self) -> Cone {
        Cone {
            center: Vec3::new(0.0, -2.5, 0.0),
            radius: 1.0,
            height: 8.0,
        }
    }
}

/// Rings of baubles, wider and lower toward the bottom.
fn layout_baubles() -> Vec<Bauble> {
    let mut baubles = Vec::new();
    for ring in 0..BAUBLE_RINGS {
        let ring_f = ring as f32;
        let count = 4 + ring * 2;
        let radius = 1.0 + ring_f * 0.9;
        let height = 10.0 - ring_f * 2.5;
        for j in 0..count {
            let angle = (j as f32 / count as f32) * std::f32::consts::TAU + ring_f * 0.85;
            let x = angle.cos() * radius;
            baubles.push(Bauble {
                position: Vec3::new(x, height, angle.sin() * radius),
                scale: 0.38 - ring_f * 0.03,
                phase: x,
            });
        }
    }
    baubles
}
