//! Starfield behind the scene (stateless, computed from cell and time).

use platonic_core::Rgb;

use crate::chars::STAR_CHARS;

/// Star at cell `(x, y)`, if any, using pseudo-random twinkling.
pub fn star_at(x: u16, y: u16, elapsed_ms: u64, twinkle_period_ms: u64) -> Option<(char, Rgb)> {
    let x = x as usize;
    let y = y as usize;
    let frame_num = elapsed_ms / twinkle_period_ms.max(1);

    // Twinkle only a slice of the sky per frame so the field stays stable
    let cell = x.wrapping_mul(31).wrapping_add(y.wrapping_mul(17));
    let seed = cell.wrapping_add((frame_num as usize).wrapping_mul(cell % 7));

    if seed % 100 >= 3 {
        return None;
    }

    let ch = STAR_CHARS[seed % STAR_CHARS.len()];
    let color = match seed % 3 {
        0 => Rgb::from_hex(0x3c3c50),
        1 => Rgb::from_hex(0x64648c),
        _ => Rgb::from_hex(0x9696c8),
    };
    Some((ch, color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_is_sparse() {
        let stars = (0..80u16)
            .flat_map(|x| (0..40u16).map(move |y| (x, y)))
            .filter(|&(x, y)| star_at(x, y, 0, 500).is_some())
            .count();
        assert!(stars > 0);
        assert!(stars < 80 * 40 / 10);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(star_at(10, 4, 1200, 500), star_at(10, 4, 1499, 500));
    }
}
