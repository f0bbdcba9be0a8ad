//! Character constants for the terminal rasterizer.

/// Characters used for the starfield.
pub const STAR_CHARS: &[char] = &['.', '*', '+', '·', '✦', '✧'];

/// Snow particles from smallest to largest on screen.
pub const SNOW_CHARS: &[char] = &['·', '•', '*', '❄'];

/// Shape facets from darkest to brightest.
pub const SHADE_CHARS: &[char] = &['░', '▒', '▓', '█'];

/// Tree foliage fill and edges.
pub const FOLIAGE_FILL: char = '▓';
pub const FOLIAGE_LEFT: char = '/';
pub const FOLIAGE_RIGHT: char = '\\';

/// Tree trunk.
pub const TRUNK_CHAR: char = '█';

/// Christmas bauble.
pub const BAUBLE_CHAR: char = '●';

/// Star on top of the tree.
pub const TOPPER_CHAR: char = '✦';

/// Stand-in for the logo image.
pub const LOGO_GLYPH: &str = "◈";
