//! Frame driver: owns every drawable and advances them once per tick.

use glam::Vec3;
use log::info;
use platonic_core::{AnimationSpeed, Element, SceneState, Tuning, palette};
use ratatui::layout::Rect;

use crate::camera::Camera;
use crate::chars::{BAUBLE_CHAR, LOGO_GLYPH, TOPPER_CHAR};
use crate::draw::{Anchor, DrawCommand, TextStyle};
use crate::overlay::{self, Crossfade, Overlay};
use crate::shapes::{SHAPE_RADIUS, ShapeInstance, material, spawn_shapes};
use crate::snow::{PARTICLE_OPACITY, ParticleSystem};
use crate::tree::{TOPPER_HEIGHT, TOPPER_RADIUS, Tree};

/// Fixed update rate of the frame driver.
pub const TICKS_PER_SECOND: u32 = 60;
const TICK_MS: f32 = 1000.0 / TICKS_PER_SECOND as f32;
/// Most ticks run by one [`Scene::advance`] call; the rest are dropped.
const MAX_CATCH_UP_TICKS: u32 = 12;

/// Rows between the title banner center and the subtitle.
const SUBTITLE_GAP: f32 = 5.0;

/// The whole animated scene.
#[derive(Debug)]
pub struct Scene {
    shapes: Vec<ShapeInstance>,
    tree: Tree,
    snow: ParticleSystem,
    crossfade: Crossfade,
    camera: Camera,
    tuning: Tuning,
    speed: AnimationSpeed,
    /// Ticks run so far.
    ticks: u64,
    /// Wall-clock time of the last advance in milliseconds.
    last_update_ms: u64,
    /// Scaled time not yet consumed by a tick.
    pending_ms: f32,
}

impl Scene {
    /// Build the scene with `particle_count` snow particles seeded by `seed`.
    pub fn new(tuning: Tuning, particle_count: usize, seed: u64) -> Self {
        let tuning = tuning.normalized();
        let snow = ParticleSystem::new(particle_count, tuning.particle_bound, seed);
        info!("scene ready with {} particles", snow.len());
        Self {
            shapes: spawn_shapes(),
            tree: Tree::new(),
            snow,
            crossfade: Crossfade::new(Overlay::derive(&SceneState::new())),
            camera: Camera::default(),
            tuning,
            speed: AnimationSpeed::default(),
            ticks: 0,
            last_update_ms: 0,
            pending_ms: 0.0,
        }
    }

    pub fn with_speed(mut self, speed: AnimationSpeed) -> Self {
        self.speed = speed;
        self
    }

    pub fn speed(&self) -> AnimationSpeed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.speed = speed;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn shapes(&self) -> &[ShapeInstance] {
        &self.shapes
    }

    /// The shape for `element`, if it has one.
    pub fn shape(&self, element: Element) -> Option<&ShapeInstance> {
        self.shapes.iter().find(|s| s.element == element)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.snow
    }

    /// Overlay values currently on screen.
    pub fn overlay(&self) -> &Overlay {
        self.crossfade.current()
    }

    /// Scene time in seconds.
    pub fn time(&self) -> f32 {
        self.ticks as f32 / TICKS_PER_SECOND as f32
    }

    /// Run the ticks due since the last call, `elapsed_ms` being wall-clock
    /// time since start. Returns how many ticks ran.
    pub fn advance(&mut self, state: &SceneState, elapsed_ms: u64) -> u32 {
        let delta_ms = elapsed_ms.saturating_sub(self.last_update_ms);
        self.last_update_ms = elapsed_ms;
        self.pending_ms += delta_ms as f32 * self.speed.time_scale();

        let due = (self.pending_ms / TICK_MS).floor() as u32;
        self.pending_ms -= due as f32 * TICK_MS;
        let run = due.min(MAX_CATCH_UP_TICKS);
        for _ in 0..run {
            self.tick(state);
        }
        run
    }

    /// Run a single tick.
    pub fn tick(&mut self, state: &SceneState) {
        self.ticks += 1;
        let t = self.time();
        self.update(state, t);
    }

    /// Move every drawable one tick forward at scene time `t`.
    pub fn update(&mut self, state: &SceneState, t: f32) {
        for shape in &mut self.shapes {
            shape.update(state, t, &self.tuning);
        }
        self.tree.update(state, t, &self.tuning);
        self.snow.update(state, t, &self.tuning);
        self.crossfade
            .advance(&Overlay::derive(state), 1.0 / TICKS_PER_SECOND as f32);
    }

    /// Draw commands for the current frame, back to front.
    pub fn render(&self, state: &SceneState, t: f32) -> Vec<DrawCommand<'_>> {
        let overlay = self.crossfade.current();
        let mut commands = vec![DrawCommand::Clear {
            color: overlay.page,
        }];

        for layer in &overlay.layers {
            commands.push(DrawCommand::Tint {
                color: layer.element.color(),
                opacity: layer.opacity,
                scale: layer.scale,
            });
        }
        commands.push(DrawCommand::Tint {
            color: overlay::FINALE_TINT,
            opacity: overlay.finale_opacity,
            scale: 1.0,
        });
        commands.push(DrawCommand::Tint {
            color: palette::BLACK,
            opacity: overlay.darken_opacity,
            scale: 1.0,
        });

        if !state.is_finale() {
            commands.push(DrawCommand::Stars {
                elapsed_ms: (t * 1000.0) as u64,
                period_ms: self.speed.star_twinkle_period_ms(),
            });
        }

        commands.push(DrawCommand::Particles {
            positions: self.snow.positions(),
            color: self.snow.color(),
            size: self.snow.size(),
            opacity: PARTICLE_OPACITY,
        });

        self.render_tree(&mut commands);

        for shape in self.shapes.iter().filter(|s| s.is_visible(state)) {
            commands.push(DrawCommand::Shape {
                element: shape.element,
                geometry: shape.geometry,
                transform: shape.transform,
                material: material(shape.element, state),
            });
        }

        commands.push(DrawCommand::Vignette);
        self.render_captions(overlay, &mut commands);
        commands
    }

    fn render_tree<'a>(&'a self, commands: &mut Vec<DrawCommand<'a>>) {
        let tree = &self.tree;
        let scale = tree.transform.scale.x;

        let trunk = tree.trunk();
        commands.push(DrawCommand::Cone {
            center: tree.to_world(trunk.center),
            radius: trunk.radius * scale,
            height: trunk.height * scale,
            color: palette::BARK.scale(4.0),
            leafy: false,
        });
        for cone in tree.foliage() {
            commands.push(DrawCommand::Cone {
                center: tree.to_world(cone.center),
                radius: cone.radius * scale,
                height: cone.height * scale,
                color: palette::DARK_GREEN,
                leafy: true,
            });
        }
        for bauble in &tree.baubles {
            commands.push(DrawCommand::Orb {
                center: tree.to_world(bauble.position),
                radius: bauble.scale * scale,
                color: palette::FESTIVE_RED,
                glyph: BAUBLE_CHAR,
            });
        }

        let topper = if tree.topper_sway.abs() > 0.15 {
            '✧'
        } else {
            TOPPER_CHAR
        };
        commands.push(DrawCommand::Orb {
            center: tree.to_world(Vec3::new(0.0, TOPPER_HEIGHT, 0.0)),
            radius: TOPPER_RADIUS * scale,
            color: palette::GOLD,
            glyph: topper,
        });
    }

    fn render_captions(&self, overlay: &Overlay, commands: &mut Vec<DrawCommand<'_>>) {
        let title_anchor = Anchor::Fraction(0.5 + overlay.title.offset);
        commands.push(DrawCommand::Text {
            content: overlay::TITLE,
            anchor: title_anchor,
            offset: 0.0,
            style: TextStyle::Banner,
            color: palette::WARM_WHITE,
            opacity: overlay.title.opacity,
        });
        commands.push(DrawCommand::Text {
            content: overlay::SUBTITLE,
            anchor: title_anchor,
            offset: SUBTITLE_GAP,
            style: TextStyle::Italic(1),
            color: palette::SOFT_CREME,
            opacity: overlay.title.opacity * 0.8,
        });
        commands.push(DrawCommand::Text {
            content: overlay::FOOTER,
            anchor: Anchor::Bottom(3),
            offset: overlay.footer.offset,
            style: TextStyle::Spaced(2),
            color: palette::GOLD,
            opacity: overlay.footer.opacity * 0.5,
        });
        commands.push(DrawCommand::Text {
            content: LOGO_GLYPH,
            anchor: Anchor::Bottom(1),
            offset: overlay.footer.offset,
            style: TextStyle::Spaced(0),
            color: palette::WHITE,
            opacity: overlay.footer.opacity * 0.7,
        });
    }

    /// Shape under terminal cell `(col, row)` of a viewport of `area`.
    pub fn pick(&self, state: &SceneState, area: Rect, col: u16, row: u16) -> Option<Element> {
        let local = Rect::new(0, 0, area.width, area.height);
        let col = col.checked_sub(area.x)? as f32 + 0.5;
        let row = row.checked_sub(area.y)? as f32 + 0.5;

        self.shapes
            .iter()
            .filter(|s| s.is_visible(state) && material(s.element, state).opacity > 0.0)
            .filter_map(|shape| {
                let p = self.camera.project(shape.transform.position, local)?;
                let r_rows = SHAPE_RADIUS * shape.transform.scale.x * p.rows_per_unit;
                if r_rows < 0.5 {
                    return None;
                }
                let dx = (col - p.col) / (r_rows * self.camera.cell_aspect);
                let dy = (row - p.row) / r_rows;
                let d = dx * dx + dy * dy;
                (d <= 1.0).then_some((shape.element, d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(element, _)| element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 120,
        height: 40,
    };

    fn scene() -> Scene {
        Scene::new(Tuning::default(), 200, 11)
    }

    fn center_of(scene: &Scene, element: Element) -> (u16, u16) {
        let shape = scene.shape(element).unwrap();
        let p = scene
            .camera()
            .project(shape.transform.position, AREA)
            .unwrap();
        (p.col as u16, p.row as u16)
    }

    #[test]
    fn test_advance_runs_fixed_ticks() {
        let mut scene = scene();
        let state = SceneState::new();
        assert_eq!(scene.advance(&state, 0), 0);
        assert_eq!(scene.advance(&state, 40), 2);
        assert_eq!(scene.advance(&state, 45), 0);
        assert_eq!(scene.advance(&state, 60), 1);
        assert!((scene.time() - 3.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_advance_caps_catch_up() {
        let mut scene = scene();
        let ran = scene.advance(&SceneState::new(), 10_000);
        assert_eq!(ran, MAX_CATCH_UP_TICKS);
        assert_eq!(scene.advance(&SceneState::new(), 10_001), 0);
    }

    #[test]
    fn test_zero_particle_bound_falls_back() {
        let tuning = Tuning {
            particle_bound: 0.0,
            ..Default::default()
        };
        let mut scene = Scene::new(tuning, 10, 1);
        let state = SceneState::new();
        for _ in 0..30 {
            scene.tick(&state);
        }
        assert_eq!(scene.particles().len(), 10);
        assert!(
            scene
                .particles()
                .positions()
                .iter()
                .all(|p| p.y.is_finite() && p.y.abs() <= 50.0)
        );
    }

    #[test]
    fn test_speed_scales_ticks() {
        let mut slow = scene().with_speed(AnimationSpeed::Slow);
        let mut fast = scene().with_speed(AnimationSpeed::Fast);
        let state = SceneState::new();
        let slow_ticks: u32 = (1..=20).map(|i| slow.advance(&state, i * 50)).sum();
        let fast_ticks: u32 = (1..=20).map(|i| fast.advance(&state, i * 50)).sum();
        assert!(fast_ticks > slow_ticks);
    }

    #[test]
    fn test_hovered_shape_spins_faster() {
        let mut scene = scene();
        let mut state = SceneState::new();
        state.on_hover(Element::Water);

        let before = |s: &Scene, e| s.shape(e).unwrap().transform.rotation.y;
        let water = before(&scene, Element::Water);
        let fire = before(&scene, Element::Fire);
        scene.tick(&state);
        let water_spin = before(&scene, Element::Water) - water;
        let fire_spin = before(&scene, Element::Fire) - fire;
        assert!((water_spin / fire_spin - 8.0).abs() < 1e-3);
    }

    #[test]
    fn test_stars_hidden_in_finale() {
        let scene = scene();
        let has_stars = |state: &SceneState| {
            scene
                .render(state, 1.0)
                .iter()
                .any(|c| matches!(c, DrawCommand::Stars { .. }))
        };
        let mut state = SceneState::new();
        assert!(has_stars(&state));
        state.on_hover(Element::Ether);
        assert!(!has_stars(&state));
    }

    #[test]
    fn test_disappeared_ether_not_rendered() {
        let mut scene = scene();
        let mut state = SceneState::new();
        state.on_hover(Element::Ether);
        for _ in 0..200 {
            scene.tick(&state);
        }
        assert!(scene.shape(Element::Ether).unwrap().has_disappeared());

        let commands = scene.render(&state, scene.time());
        let shapes: Vec<Element> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Shape { element, .. } => Some(*element),
                _ => None,
            })
            .collect();
        assert!(!shapes.contains(&Element::Ether));
        assert_eq!(shapes.len(), 4);
    }

    #[test]
    fn test_pick_shape_under_cursor() {
        let scene = scene();
        let state = SceneState::new();
        for element in Element::SHAPES {
            let (col, row) = center_of(&scene, element);
            assert_eq!(scene.pick(&state, AREA, col, row), Some(element));
        }
        assert_eq!(scene.pick(&state, AREA, 0, 0), None);
        assert_eq!(scene.pick(&state, AREA, 60, 2), None);
    }

    #[test]
    fn test_pick_respects_area_offset() {
        let scene = scene();
        let state = SceneState::new();
        let shifted = Rect::new(5, 3, AREA.width, AREA.height);
        let (col, row) = center_of(&scene, Element::Fire);
        assert_eq!(
            scene.pick(&state, shifted, col + 5, row + 3),
            Some(Element::Fire)
        );
        assert_eq!(scene.pick(&state, shifted, 2, 1), None);
    }

    #[test]
    fn test_pick_ignores_faded_shapes_in_finale() {
        let scene = scene();
        let mut state = SceneState::new();
        state.on_hover(Element::Ether);
        let (col, row) = center_of(&scene, Element::Water);
        assert_eq!(scene.pick(&state, AREA, col, row), None);
        let (col, row) = center_of(&scene, Element::Ether);
        assert_eq!(scene.pick(&state, AREA, col, row), Some(Element::Ether));
    }

    #[test]
    fn test_tree_enters_view_in_finale() {
        let mut scene = scene();
        let mut state = SceneState::new();
        let start = scene.tree().transform.position.y;
        state.on_hover(Element::Ether);
        for _ in 0..240 {
            scene.tick(&state);
        }
        let top = scene
            .tree()
            .to_world(Vec3::new(0.0, TOPPER_HEIGHT, 0.0));
        assert!(scene.tree().transform.position.y > start);
        let p = scene.camera().project(top, AREA).unwrap();
        assert!(p.row >= 0.0 && p.row < AREA.height as f32);
    }

    #[test]
    fn test_overlay_follows_state() {
        let mut scene = scene();
        let mut state = SceneState::new();
        state.on_hover(Element::Earth);
        for _ in 0..180 {
            scene.tick(&state);
        }
        let earth = scene.overlay().layers[0];
        assert_eq!(earth.element, Element::Earth);
        assert!(earth.opacity > 0.25);
        assert_eq!(scene.overlay().title.opacity, 0.0);
    }
}
