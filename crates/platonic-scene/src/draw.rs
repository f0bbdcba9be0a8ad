//! Draw commands produced once per frame and consumed by the rasterizer.

use glam::Vec3;
use platonic_core::{Element, Geometry, Rgb};

use crate::shapes::{Material, Transform};

/// How a text block is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Block letters, letter-spaced plain text when too wide.
    Banner,
    /// Characters separated by the given number of spaces.
    Spaced(usize),
    /// Letter-spaced italics.
    Italic(usize),
}

/// Vertical anchor of a text block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// Fraction of the height, measured from the top.
    Fraction(f32),
    /// Rows above the bottom edge.
    Bottom(u16),
}

/// One drawing operation, in painter's order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand<'a> {
    /// Fill the background.
    Clear { color: Rgb },
    /// Tint the background with an image layer's stand-in color.
    Tint { color: Rgb, opacity: f32, scale: f32 },
    /// Twinkling starfield at infinity.
    Stars { elapsed_ms: u64, period_ms: u64 },
    /// Point particles sharing one color and size.
    Particles {
        positions: &'a [Vec3],
        color: Rgb,
        size: f32,
        opacity: f32,
    },
    /// Solid cone, apex up, given in world space.
    Cone {
        center: Vec3,
        radius: f32,
        height: f32,
        color: Rgb,
        leafy: bool,
    },
    /// Small glowing sphere.
    Orb {
        center: Vec3,
        radius: f32,
        color: Rgb,
        glyph: char,
    },
    /// One of the element shapes.
    Shape {
        element: Element,
        geometry: Geometry,
        transform: Transform,
        material: Material,
    },
    /// Radial darkening toward the edges.
    Vignette,
    /// Overlay text.
    Text {
        content: &'static str,
        anchor: Anchor,
        /// Extra rows to shift by, positive is down.
        offset: f32,
        style: TextStyle,
        color: Rgb,
        opacity: f32,
    },
}
