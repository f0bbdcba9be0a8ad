//! Color and asset table.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Linear RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Build a color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Move `t` of the way toward `target`.
    pub fn lerp(self, target: Rgb, t: f32) -> Rgb {
        Rgb {
            r: self.r + (target.r - self.r) * t,
            g: self.g + (target.g - self.g) * t,
            b: self.b + (target.b - self.b) * t,
        }
    }

    /// Multiply every channel by `factor`, clamped to the unit range.
    pub fn scale(self, factor: f32) -> Rgb {
        Rgb {
            r: (self.r * factor).clamp(0.0, 1.0),
            g: (self.g * factor).clamp(0.0, 1.0),
            b: (self.b * factor).clamp(0.0, 1.0),
        }
    }

    /// Largest per-channel distance to `other`.
    pub fn distance(self, other: Rgb) -> f32 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }

    /// Convert to a terminal color.
    pub fn to_color(self) -> Color {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::Rgb(channel(self.r), channel(self.g), channel(self.b))
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        rgb.to_color()
    }
}

pub const FESTIVE_RED: Rgb = Rgb::from_hex(0xb91c1c);
pub const DARK_GREEN: Rgb = Rgb::from_hex(0x064e3b);
pub const WARM_WHITE: Rgb = Rgb::from_hex(0xfafaf9);
pub const GOLD: Rgb = Rgb::from_hex(0xd4af37);
pub const MYSTERY_BLACK: Rgb = Rgb::from_hex(0x020402);
pub const SOFT_CREME: Rgb = Rgb::from_hex(0xf5f5dc);

pub const WHITE: Rgb = Rgb::from_hex(0xffffff);
pub const BLACK: Rgb = Rgb::from_hex(0x000000);
/// Tree trunk.
pub const BARK: Rgb = Rgb::from_hex(0x0c0601);

/// Page background once the finale has started.
pub const FINALE_BG: Rgb = MYSTERY_BLACK;

/// Shape body colors.
pub mod element {
    use super::Rgb;

    pub const WATER: Rgb = Rgb::from_hex(0x93c5fd);
    pub const EARTH: Rgb = Rgb::from_hex(0x3f6212);
    pub const FIRE: Rgb = Rgb::from_hex(0xef4444);
    pub const AIR: Rgb = Rgb::from_hex(0xf1f5f9);
    pub const ETHER: Rgb = Rgb::from_hex(0xffffff);
}

/// Snow particle tints per active element.
pub mod particle {
    use super::Rgb;

    pub const WATER: Rgb = Rgb::from_hex(0x60a5fa);
    pub const EARTH: Rgb = Rgb::from_hex(0x3f6212);
    pub const FIRE: Rgb = Rgb::from_hex(0xef4444);
    pub const AIR: Rgb = Rgb::from_hex(0xf8fafc);
    pub const ETHER: Rgb = Rgb::from_hex(0xffffff);
}

pub const LOGO_URL: &str = "https://maroon-advanced-tarsier-395.mypinata.cloud/ipfs/bafybeibtqhphuojqvz4rivsyflgbham4qsudva3r2t5cg2he765b33xtje";
pub const FINALE_IMAGE_URL: &str = "https://maroon-advanced-tarsier-395.mypinata.cloud/ipfs/bafkreic7g3h7fghv26cuhyozizq6p3qg5pve46d4l5zntubk6isqoy6l2y";

/// Element background images shown behind the scene on hover.
pub mod backgrounds {
    pub const EARTH: &str = "https://images.unsplash.com/photo-1542273917363-3b1817f69a2d?q=80&w=2000&auto=format&fit=crop";
    pub const FIRE: &str = "https://images.unsplash.com/photo-1520113412646-04fc68c0bc21?q=80&w=2000&auto=format&fit=crop";
    pub const WATER: &str = "https://images.unsplash.com/photo-1518128910761-3a5f8505599c?q=80&w=2000&auto=format&fit=crop";
    pub const AIR: &str = "https://images.unsplash.com/photo-1436891620584-47fd0e565afb?q=80&w=2000&auto=format&fit=crop";
}
