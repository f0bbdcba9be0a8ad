//! Animation constants.
//!
//! Every easing rate, spin rate and particle drift value used by the frame
//! driver lives here so it can be overridden from the config file. The
//! defaults reproduce the look of the card; none of them are load bearing.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::state::SceneState;

/// Tunable animation constants. Rates are per 1/60 s tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Amplitude of the idle floating oscillation.
    pub float_amplitude: f32,
    /// Idle spin per tick for every shape except Ether.
    pub base_spin: f32,
    /// Idle spin per tick for Ether.
    pub ether_base_spin: f32,
    /// Spin multiplier for the hovered shape.
    pub hover_spin_multiplier: f32,
    /// Point the Ether shape rises toward in the finale.
    pub ascension_point: [f32; 3],
    /// Lerp rate of the Ether ascent (position and scale).
    pub ascension_rate: f32,
    /// Scale the Ether shape shrinks toward while rising.
    pub ascension_scale: f32,
    /// Ether spin per tick while rising.
    pub ascension_spin: f32,
    /// Height above which the rising Ether shape is gone for good.
    pub disappear_height: f32,
    /// Lerp rate at which the other shapes shrink away in the finale.
    pub shrink_rate: f32,
    /// Lerp rate of the tree growth in the finale.
    pub tree_growth_rate: f32,
    /// Position the tree grows toward.
    pub tree_target_y: f32,
    /// Scale the tree grows toward.
    pub tree_target_scale: f32,
    /// Lerp rate of the shared particle color.
    pub particle_color_rate: f32,
    /// Half extent of the particle volume; y wraps at `±particle_bound`.
    pub particle_bound: f32,
    /// Per-element particle drift.
    pub drift: DriftTable,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            float_amplitude: 0.25,
            base_spin: 0.025,
            ether_base_spin: 0.015,
            hover_spin_multiplier: 8.0,
            ascension_point: [0.0, 7.0, 0.0],
            ascension_rate: 0.05,
            ascension_scale: 0.25,
            ascension_spin: 0.2,
            disappear_height: 6.5,
            shrink_rate: 0.1,
            tree_growth_rate: 0.03,
            tree_target_y: -10.0,
            tree_target_scale: 1.15,
            particle_color_rate: 0.05,
            particle_bound: 50.0,
            drift: DriftTable::default(),
        }
    }
}

impl Tuning {
    /// Replace values the frame driver cannot work with by their defaults.
    ///
    /// The particle volume must have a finite, positive half extent.
    pub fn normalized(mut self) -> Self {
        if !(self.particle_bound.is_finite() && self.particle_bound > 0.0) {
            let default = Self::default().particle_bound;
            warn!(
                "particle_bound {} is not a positive number, using {default}",
                self.particle_bound
            );
            self.particle_bound = default;
        }
        self
    }
}

/// Periodic function used for the horizontal sway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wave {
    Sine,
    Cosine,
}

impl Wave {
    fn eval(self, x: f32) -> f32 {
        match self {
            Wave::Sine => x.sin(),
            Wave::Cosine => x.cos(),
        }
    }
}

/// What offsets the sway phase of an individual particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseSource {
    /// The particle's index.
    Index,
    /// The particle's height times the given factor.
    Height(f32),
}

/// Motion applied to every particle each tick under one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftRule {
    /// Vertical displacement per tick; positive is up.
    pub rise: f32,
    pub sway_frequency: f32,
    pub sway_amplitude: f32,
    pub wave: Wave,
    pub phase: PhaseSource,
    /// Shared particle size.
    pub size: f32,
    /// Size pulse frequency, zero for a constant size.
    #[serde(default)]
    pub size_pulse_frequency: f32,
    #[serde(default)]
    pub size_pulse_amplitude: f32,
}

impl DriftRule {
    /// Displacement `(dx, dy)` of particle `index` at height `y` and time `t`.
    pub fn delta(&self, t: f32, index: usize, y: f32) -> (f32, f32) {
        let phase = match self.phase {
            PhaseSource::Index => index as f32,
            PhaseSource::Height(k) => y * k,
        };
        let dx = self.wave.eval(t * self.sway_frequency + phase) * self.sway_amplitude;
        (dx, self.rise)
    }

    /// Particle size at time `t`.
    pub fn size_at(&self, t: f32) -> f32 {
        if self.size_pulse_frequency == 0.0 {
            self.size
        } else {
            self.size + (t * self.size_pulse_frequency).sin() * self.size_pulse_amplitude
        }
    }
}

/// Drift rules keyed by scene state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftTable {
    /// Plain snowfall, used when no rule below applies.
    pub snow: DriftRule,
    pub fire: DriftRule,
    pub water: DriftRule,
    pub air: DriftRule,
    pub finale: DriftRule,
}

impl Default for DriftTable {
    fn default() -> Self {
        Self {
            snow: DriftRule {
                rise: -0.06,
                sway_frequency: 0.3,
                sway_amplitude: 0.03,
                wave: Wave::Sine,
                phase: PhaseSource::Index,
                size: 0.11,
                size_pulse_frequency: 0.0,
                size_pulse_amplitude: 0.0,
            },
            fire: DriftRule {
                rise: 0.25,
                sway_frequency: 6.0,
                sway_amplitude: 0.25,
                wave: Wave::Sine,
                phase: PhaseSource::Index,
                size: 0.2,
                size_pulse_frequency: 0.0,
                size_pulse_amplitude: 0.0,
            },
            water: DriftRule {
                rise: -0.05,
                sway_frequency: 1.0,
                sway_amplitude: 0.1,
                wave: Wave::Sine,
                phase: PhaseSource::Height(0.05),
                size: 0.14,
                size_pulse_frequency: 0.0,
                size_pulse_amplitude: 0.0,
            },
            air: DriftRule {
                rise: -0.01,
                sway_frequency: 0.8,
                sway_amplitude: 0.2,
                wave: Wave::Cosine,
                phase: PhaseSource::Index,
                size: 0.09,
                size_pulse_frequency: 0.0,
                size_pulse_amplitude: 0.0,
            },
            finale: DriftRule {
                rise: 0.2,
                sway_frequency: 3.0,
                sway_amplitude: 0.15,
                wave: Wave::Sine,
                phase: PhaseSource::Index,
                size: 0.08,
                size_pulse_frequency: 12.0,
                size_pulse_amplitude: 0.04,
            },
        }
    }
}

impl DriftTable {
    /// Rule in effect for `state`.
    pub fn select(&self, state: &SceneState) -> &DriftRule {
        if state.is_finale() {
            return &self.finale;
        }
        match state.active_element() {
            Element::Fire => &self.fire,
            Element::Water => &self.water,
            Element::Air => &self.air,
            Element::Earth | Element::Ether | Element::None => &self.snow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_rises_faster_than_snow() {
        let table = DriftTable::default();
        let mut state = SceneState::new();
        state.on_hover(Element::Fire);
        let (_, fire_dy) = table.select(&state).delta(1.0, 0, 0.0);
        let (_, snow_dy) = table.select(&SceneState::new()).delta(1.0, 0, 0.0);
        assert!(fire_dy > 0.0);
        assert!(fire_dy > snow_dy);
        assert!((fire_dy - 0.25).abs() < 1e-6);
        assert!((snow_dy + 0.06).abs() < 1e-6);
    }

    #[test]
    fn test_select_finale_overrides_element() {
        let table = DriftTable::default();
        let mut state = SceneState::new();
        state.on_hover(Element::Ether);
        assert_eq!(table.select(&state), &table.finale);
    }

    #[test]
    fn test_earth_uses_snow_rule() {
        let table = DriftTable::default();
        let mut state = SceneState::new();
        state.on_hover(Element::Earth);
        assert_eq!(table.select(&state), &table.snow);
    }

    #[test]
    fn test_water_sway_follows_height() {
        let rule = DriftTable::default().water;
        let (a, _) = rule.delta(0.0, 0, 0.0);
        let (b, _) = rule.delta(0.0, 999, 0.0);
        assert_eq!(a, b);
        let (c, _) = rule.delta(0.0, 0, 20.0);
        assert!((c - 1.0f32.sin() * 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_normalized_resets_bad_bound() {
        for bound in [0.0, -5.0, f32::NAN, f32::INFINITY] {
            let tuning = Tuning {
                particle_bound: bound,
                ..Default::default()
            }
            .normalized();
            assert_eq!(tuning.particle_bound, 50.0);
        }
        let tuning = Tuning {
            particle_bound: 20.0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(tuning.particle_bound, 20.0);
    }

    #[test]
    fn test_finale_size_pulses() {
        let rule = DriftTable::default().finale;
        let quarter = std::f32::consts::FRAC_PI_2 / 12.0;
        assert!((rule.size_at(0.0) - 0.08).abs() < 1e-6);
        assert!((rule.size_at(quarter) - 0.12).abs() < 1e-5);
        assert_eq!(DriftTable::default().snow.size_at(7.0), 0.11);
    }
}
