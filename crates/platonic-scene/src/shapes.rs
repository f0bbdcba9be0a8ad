//! The five floating element shapes.

use glam::Vec3;
use log::debug;
use platonic_core::{Element, Geometry, Rgb, SceneState, Tuning, palette};

/// Circumradius of a shape at scale 1.
pub const SHAPE_RADIUS: f32 = 1.6;

/// Position, rotation (Euler radians) and scale of a drawable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(position: Vec3, scale: f32) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::splat(scale),
        }
    }
}

/// Surface parameters handed to the rasterizer each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub transmission: f32,
    pub opacity: f32,
}

/// Emissive intensity of the hovered shape.
const ACTIVE_EMISSIVE: f32 = 18.0;
/// Emissive intensity of every other shape.
const IDLE_EMISSIVE: f32 = 0.4;

/// Material of `element`'s shape for the given scene state.
pub fn material(element: Element, state: &SceneState) -> Material {
    let active = state.is_active(element);
    let finale = state.is_finale();

    let color = if active && !finale {
        palette::WARM_WHITE
    } else if finale && element == Element::Ether {
        palette::WHITE
    } else {
        element.color()
    };

    Material {
        color,
        emissive: color,
        emissive_intensity: if active { ACTIVE_EMISSIVE } else { IDLE_EMISSIVE },
        roughness: 0.0,
        metalness: 1.0,
        transmission: 0.85,
        opacity: if finale && element != Element::Ether {
            0.0
        } else {
            1.0
        },
    }
}

/// One element's shape.
#[derive(Debug, Clone)]
pub struct ShapeInstance {
    pub element: Element,
    pub geometry: Geometry,
    pub base_position: Vec3,
    pub transform: Transform,
    has_disappeared: bool,
}

impl ShapeInstance {
    /// Create the shape for `element`, `None` for [`Element::None`].
    pub fn new(element: Element) -> Option<Self> {
        let geometry = element.geometry()?;
        let base_position = Vec3::from_array(element.base_position());
        Some(Self {
            element,
            geometry,
            base_position,
            transform: Transform::new(base_position, 1.0),
            has_disappeared: false,
        })
    }

    /// Whether the shape has risen out of view in the finale.
    pub fn has_disappeared(&self) -> bool {
        self.has_disappeared
    }

    /// Whether the shape should be drawn and can be hovered.
    pub fn is_visible(&self, state: &SceneState) -> bool {
        !(self.has_disappeared && state.is_finale())
    }

    /// Idle spin around the y axis per tick.
    pub fn spin_rate(&self, state: &SceneState, tuning: &Tuning) -> f32 {
        let base = if self.element == Element::Ether {
            tuning.ether_base_spin
        } else {
            tuning.base_spin
        };
        if state.is_active(self.element) {
            base * tuning.hover_spin_multiplier
        } else {
            base
        }
    }

    /// Advance one tick at scene time `t`.
    pub fn update(&mut self, state: &SceneState, t: f32, tuning: &Tuning) {
        if !self.is_visible(state) {
            return;
        }

        if state.is_finale() && self.element == Element::Ether {
            let target = Vec3::from_array(tuning.ascension_point);
            let transform = &mut self.transform;
            transform.position = transform.position.lerp(target, tuning.ascension_rate);
            transform.scale = transform
                .scale
                .lerp(Vec3::splat(tuning.ascension_scale), tuning.ascension_rate);
            transform.rotation.y += tuning.ascension_spin;
            if transform.position.y > tuning.disappear_height {
                self.has_disappeared = true;
                debug!("{} shape ascended", self.element);
            }
        } else if state.is_finale() {
            self.transform.scale = self.transform.scale.lerp(Vec3::ZERO, tuning.shrink_rate);
        } else {
            let spin = self.spin_rate(state, tuning);
            self.transform.rotation.y += spin;
            self.transform.rotation.z += spin * 0.5;
            self.transform.position.y = self.base_position.y
                + tuning.float_amplitude * (t + self.base_position.x).sin();
        }
    }
}

/// Create the five shapes in display order.
pub fn spawn_shapes() -> Vec<ShapeInstance> {
    Element::SHAPES
        .iter()
        .filter_map(|&element| ShapeInstance::new(element))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(element: Element) -> ShapeInstance {
        ShapeInstance::new(element).unwrap()
    }

    #[test]
    fn test_spawn_all_shapes() {
        let shapes = spawn_shapes();
        assert_eq!(shapes.len(), 5);
        assert!(ShapeInstance::new(Element::None).is_none());
    }

    #[test]
    fn test_hover_spins_eight_times_faster() {
        let tuning = Tuning::default();
        let water = shape(Element::Water);
        let idle = water.spin_rate(&SceneState::new(), &tuning);

        let mut state = SceneState::new();
        state.on_hover(Element::Water);
        let hovered = water.spin_rate(&state, &tuning);
        assert!((hovered / idle - 8.0).abs() < 1e-5);

        let earth = shape(Element::Earth);
        assert_eq!(earth.spin_rate(&state, &tuning), idle);
    }

    #[test]
    fn test_ether_spins_slower() {
        let tuning = Tuning::default();
        let state = SceneState::new();
        assert!(
            shape(Element::Ether).spin_rate(&state, &tuning)
                < shape(Element::Fire).spin_rate(&state, &tuning)
        );
    }

    #[test]
    fn test_idle_float_follows_phase() {
        let tuning = Tuning::default();
        let state = SceneState::new();
        let mut fire = shape(Element::Fire);
        fire.update(&state, 1.5, &tuning);
        let expected = 0.25 * (1.5f32 + 6.0).sin();
        assert!((fire.transform.position.y - expected).abs() < 1e-5);
        assert!((fire.transform.rotation.y - 0.025).abs() < 1e-6);
        assert!((fire.transform.rotation.z - 0.0125).abs() < 1e-6);
    }

    #[test]
    fn test_finale_shrinks_others() {
        let tuning = Tuning::default();
        let mut state = SceneState::new();
        state.on_hover(Element::Ether);
        let mut air = shape(Element::Air);
        let mut previous = air.transform.scale.x;
        for tick in 0..100 {
            air.update(&state, tick as f32 / 60.0, &tuning);
            assert!(air.transform.scale.x < previous);
            previous = air.transform.scale.x;
        }
        assert!(previous < 0.001);
        assert!(!air.has_disappeared());
    }

    #[test]
    fn test_ether_ascends_and_disappears() {
        let tuning = Tuning::default();
        let mut state = SceneState::new();
        state.on_hover(Element::Ether);
        let mut ether = shape(Element::Ether);

        let mut ticks = 0;
        while !ether.has_disappeared() {
            ether.update(&state, ticks as f32 / 60.0, &tuning);
            ticks += 1;
            assert!(ticks < 1000, "ether never disappeared");
        }
        assert!(ether.transform.position.y > 6.5);
        assert!(ether.transform.scale.x < 1.0);
        assert!(!ether.is_visible(&state));

        let frozen = ether.transform;
        ether.update(&state, 100.0, &tuning);
        assert_eq!(ether.transform, frozen);
    }

    #[test]
    fn test_material_highlight() {
        let mut state = SceneState::new();
        state.on_hover(Element::Earth);

        let earth = material(Element::Earth, &state);
        assert_eq!(earth.color, palette::WARM_WHITE);
        assert_eq!(earth.emissive_intensity, 18.0);

        let fire = material(Element::Fire, &state);
        assert_eq!(fire.color, palette::element::FIRE);
        assert_eq!(fire.emissive_intensity, 0.4);
        assert_eq!(fire.opacity, 1.0);
    }

    #[test]
    fn test_material_in_finale() {
        let mut state = SceneState::new();
        state.on_hover(Element::Ether);

        let ether = material(Element::Ether, &state);
        assert_eq!(ether.color, palette::WHITE);
        assert_eq!(ether.opacity, 1.0);

        for element in [Element::Water, Element::Earth, Element::Fire, Element::Air] {
            let m = material(element, &state);
            assert_eq!(m.opacity, 0.0);
            assert_eq!(m.color, element.color());
        }
    }
}
