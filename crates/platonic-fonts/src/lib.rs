//! Block letter banner font for the finale title.

/// Glyph height in rows.
pub const GLYPH_HEIGHT: usize = 5;

/// Columns between adjacent glyphs.
const LETTER_GAP: usize = 1;

const A: [&str; GLYPH_HEIGHT] = [" ███ ", "█   █", "█████", "█   █", "█   █"];
const C: [&str; GLYPH_HEIGHT] = [" ████", "█    ", "█    ", "█    ", " ████"];
const E: [&str; GLYPH_HEIGHT] = ["█████", "█    ", "████ ", "█    ", "█████"];
const F: [&str; GLYPH_HEIGHT] = ["█████", "█    ", "████ ", "█    ", "█    "];
const H: [&str; GLYPH_HEIGHT] = ["█   █", "█   █", "█████", "█   █", "█   █"];
const I: [&str; GLYPH_HEIGHT] = ["███", " █ ", " █ ", " █ ", "███"];
const N: [&str; GLYPH_HEIGHT] = ["█   █", "██  █", "█ █ █", "█  ██", "█   █"];
const O: [&str; GLYPH_HEIGHT] = [" ███ ", "█   █", "█   █", "█   █", " ███ "];
const R: [&str; GLYPH_HEIGHT] = ["████ ", "█   █", "████ ", "█  █ ", "█   █"];
const T: [&str; GLYPH_HEIGHT] = ["█████", "  █  ", "  █  ", "  █  ", "  █  "];
const W: [&str; GLYPH_HEIGHT] = ["█   █", "█   █", "█ █ █", "██ ██", "█   █"];
const SPACE: [&str; GLYPH_HEIGHT] = ["   ", "   ", "   ", "   ", "   "];

/// Glyph rows for `ch`, if the font has it.
fn glyph(ch: char) -> Option<&'static [&'static str; GLYPH_HEIGHT]> {
    let glyph = match ch.to_ascii_uppercase() {
        'A' => &A,
        'C' => &C,
        'E' => &E,
        'F' => &F,
        'H' => &H,
        'I' => &I,
        'N' => &N,
        'O' => &O,
        'R' => &R,
        'T' => &T,
        'W' => &W,
        ' ' => &SPACE,
        _ => return None,
    };
    Some(glyph)
}

/// Width in columns of `text` rendered as a banner, if every character is
/// in the font.
pub fn banner_width(text: &str) -> Option<usize> {
    let mut width = 0;
    let mut count = 0usize;
    for ch in text.chars() {
        width += glyph(ch)?[0].chars().count();
        count += 1;
    }
    Some(width + count.saturating_sub(1) * LETTER_GAP)
}

/// Render `text` as block letters no wider than `max_width`.
///
/// Returns `None` when a character is missing from the font or the banner
/// does not fit, so the caller can fall back to plain text.
pub fn build_banner(text: &str, max_width: usize) -> Option<Vec<String>> {
    if banner_width(text)? > max_width {
        return None;
    }

    let glyphs: Vec<_> = text.chars().filter_map(glyph).collect();
    let lines = (0..GLYPH_HEIGHT)
        .map(|row| {
            let mut line = String::new();
            for (i, glyph) in glyphs.iter().enumerate() {
                if i > 0 {
                    line.push_str(&" ".repeat(LETTER_GAP));
                }
                line.push_str(glyph[row]);
            }
            line
        })
        .collect();
    Some(lines)
}

/// Spread `text` out with `gap` spaces between characters, the plain text
/// fallback for narrow terminals.
pub fn letter_spaced(text: &str, gap: usize) -> String {
    let separator = " ".repeat(gap);
    text.chars()
        .map(|ch| ch.to_string())
        .collect::<Vec<_>>()
        .join(&separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_rows_have_equal_width() {
        for ch in "ACEFHINORTW ".chars() {
            let rows = glyph(ch).unwrap();
            let width = rows[0].chars().count();
            assert!(rows.iter().all(|r| r.chars().count() == width), "{ch}");
        }
    }

    #[test]
    fn test_banner_fits_greeting() {
        let lines = build_banner("FROHE WEIHNACHTEN", 120).unwrap();
        assert_eq!(lines.len(), GLYPH_HEIGHT);
        let width = banner_width("FROHE WEIHNACHTEN").unwrap();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_banner_width_counts_gaps() {
        let a = glyph('A').unwrap()[0].chars().count();
        assert_eq!(banner_width(""), Some(0));
        assert_eq!(banner_width("A"), Some(a));
        assert_eq!(banner_width("AA"), Some(2 * a + LETTER_GAP));
    }

    #[test]
    fn test_banner_too_wide() {
        assert!(build_banner("FROHE WEIHNACHTEN", 40).is_none());
    }

    #[test]
    fn test_unknown_letter() {
        assert_eq!(banner_width("XMAS"), None);
        assert!(build_banner("XMAS", 200).is_none());
    }

    #[test]
    fn test_letter_spaced() {
        assert_eq!(letter_spaced("ABC", 1), "A B C");
        assert_eq!(letter_spaced("", 2), "");
    }
}
