//! Animated scene for the platonic greeting card.
//!
//! [`Scene`] owns every drawable (the five element shapes, the tree and the
//! snow) and advances them on a fixed 60 Hz tick from the hover/finale
//! [`SceneState`](platonic_core::SceneState). Each frame it emits a list of
//! [`DrawCommand`]s that [`SceneView`] rasterizes into a ratatui buffer.

mod camera;
mod chars;
mod color;
mod draw;
pub mod overlay;
mod raster;
mod scene;
mod shapes;
mod snow;
mod stars;
mod tree;

pub use camera::{Camera, Projected};
pub use draw::{Anchor, DrawCommand, TextStyle};
pub use overlay::{Caption, Crossfade, Layer, Overlay, background_opacity};
pub use raster::SceneView;
pub use scene::{Scene, TICKS_PER_SECOND};
pub use shapes::{Material, SHAPE_RADIUS, ShapeInstance, Transform, material};
pub use snow::ParticleSystem;
pub use tree::{Bauble, Cone, Tree};
