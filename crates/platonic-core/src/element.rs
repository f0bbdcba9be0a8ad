//! The five platonic elements.

use serde::{Deserialize, Serialize};

use crate::palette::{self, Rgb};

/// One of the five symbolic elements, or none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Water,
    Earth,
    Fire,
    Air,
    Ether,
    #[default]
    None,
}

/// Solid used to draw an element's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    Icosahedron,
    Cube,
    Tetrahedron,
    Octahedron,
    Dodecahedron,
}

impl Element {
    /// The five shapes in left-to-right display order.
    pub const SHAPES: [Element; 5] = [
        Element::Water,
        Element::Earth,
        Element::Ether,
        Element::Fire,
        Element::Air,
    ];

    /// Elements with a background image layer in the overlay.
    pub const BACKDROPS: [Element; 4] = [
        Element::Earth,
        Element::Fire,
        Element::Water,
        Element::Air,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Element::Water => "Water",
            Element::Earth => "Earth",
            Element::Fire => "Fire",
            Element::Air => "Air",
            Element::Ether => "Ether",
            Element::None => "None",
        }
    }

    /// Geometry of the element's shape, `None` for [`Element::None`].
    pub fn geometry(self) -> Option<Geometry> {
        match self {
            Element::Water => Some(Geometry::Icosahedron),
            Element::Earth => Some(Geometry::Cube),
            Element::Fire => Some(Geometry::Tetrahedron),
            Element::Air => Some(Geometry::Octahedron),
            Element::Ether => Some(Geometry::Dodecahedron),
            Element::None => None,
        }
    }

    /// Resting position of the element's shape in world space.
    pub fn base_position(self) -> [f32; 3] {
        match self {
            Element::Water => [-12.0, 0.0, 0.0],
            Element::Earth => [-6.0, 0.0, 0.0],
            Element::Ether => [0.0, 0.0, 0.0],
            Element::Fire => [6.0, 0.0, 0.0],
            Element::Air => [12.0, 0.0, 0.0],
            Element::None => [0.0, 0.0, 0.0],
        }
    }

    /// Fixed body color of the element's shape.
    pub fn color(self) -> Rgb {
        match self {
            Element::Water => palette::element::WATER,
            Element::Earth => palette::element::EARTH,
            Element::Fire => palette::element::FIRE,
            Element::Air => palette::element::AIR,
            Element::Ether => palette::element::ETHER,
            Element::None => palette::WHITE,
        }
    }

    /// Snow particle color while this element is active.
    pub fn particle_color(self) -> Rgb {
        match self {
            Element::Water => palette::particle::WATER,
            Element::Earth => palette::particle::EARTH,
            Element::Fire => palette::particle::FIRE,
            Element::Air => palette::particle::AIR,
            Element::Ether => palette::particle::ETHER,
            Element::None => palette::WHITE,
        }
    }

    /// Background image for the element's overlay layer, if it has one.
    pub fn background_url(self) -> Option<&'static str> {
        match self {
            Element::Earth => Some(palette::backgrounds::EARTH),
            Element::Fire => Some(palette::backgrounds::FIRE),
            Element::Water => Some(palette::backgrounds::WATER),
            Element::Air => Some(palette::backgrounds::AIR),
            Element::Ether | Element::None => None,
        }
    }

    /// Shape selected by the keyboard shortcut `1`..=`5`.
    pub fn from_shortcut(key: char) -> Option<Element> {
        let index = key.to_digit(10)? as usize;
        index
            .checked_sub(1)
            .and_then(|i| Self::SHAPES.get(i).copied())
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_geometry() {
        for element in Element::SHAPES {
            assert!(element.geometry().is_some(), "{element} has no geometry");
        }
        assert_eq!(Element::None.geometry(), None);
    }

    #[test]
    fn test_shapes_ordered_left_to_right() {
        let xs: Vec<f32> = Element::SHAPES
            .iter()
            .map(|e| e.base_position()[0])
            .collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_from_shortcut() {
        assert_eq!(Element::from_shortcut('1'), Some(Element::Water));
        assert_eq!(Element::from_shortcut('3'), Some(Element::Ether));
        assert_eq!(Element::from_shortcut('5'), Some(Element::Air));
        assert_eq!(Element::from_shortcut('0'), None);
        assert_eq!(Element::from_shortcut('6'), None);
        assert_eq!(Element::from_shortcut('x'), None);
    }

    #[test]
    fn test_ether_has_no_backdrop() {
        assert!(Element::Ether.background_url().is_none());
        assert!(!Element::BACKDROPS.contains(&Element::Ether));
        for element in Element::BACKDROPS {
            assert!(element.background_url().is_some());
        }
    }
}
