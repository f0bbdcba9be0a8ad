//! Color helpers for the rasterizer.

use platonic_core::{Rgb, palette};

/// Blend `top` over `base` with the given opacity.
pub fn blend(base: Rgb, top: Rgb, opacity: f32) -> Rgb {
    base.lerp(top, opacity.clamp(0.0, 1.0))
}

/// Color of a lit surface.
///
/// `light` is the facet brightness in `0.0..=1.0`; emissive intensity pushes
/// the color toward white so the hovered shape glows.
pub fn shade(color: Rgb, emissive_intensity: f32, light: f32) -> Rgb {
    let lit = color.scale(0.35 + 0.65 * light.clamp(0.0, 1.0));
    let glow = (emissive_intensity / 36.0).clamp(0.0, 0.5);
    blend(lit, palette::WHITE, glow)
}

/// Dim a color with distance from the camera.
pub fn fog(color: Rgb, depth: f32) -> Rgb {
    color.scale((1.2 - depth / 80.0).clamp(0.25, 1.0))
}

/// Darkening applied by the vignette at normalized radius `r`
/// (0 at the center, 1 at the corners).
pub fn vignette(r: f32) -> f32 {
    const INNER: f32 = 0.1;
    const EDGE_DARKNESS: f32 = 0.9;
    ((r - INNER) / (1.0 - INNER)).clamp(0.0, 1.0) * EDGE_DARKNESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vignette_range() {
        assert_eq!(vignette(0.0), 0.0);
        assert_eq!(vignette(0.1), 0.0);
        assert!((vignette(1.0) - 0.9).abs() < 1e-6);
        assert!(vignette(0.5) > 0.0 && vignette(0.5) < 0.9);
    }

    #[test]
    fn test_shade_glow_brightens() {
        let dim = shade(palette::element::FIRE, 0.4, 0.5);
        let glowing = shade(palette::element::FIRE, 18.0, 0.5);
        assert!(glowing.g > dim.g);
        assert!(glowing.b > dim.b);
    }

    #[test]
    fn test_fog_dims_far_points() {
        let near = fog(palette::WHITE, 5.0);
        let far = fog(palette::WHITE, 70.0);
        assert!(near.r > far.r);
        assert!(far.r >= 0.25);
    }
}
