//! Core types for the platonic greeting card.
//!
//! Holds the element set, the hover/finale scene state, the color and asset
//! table and the tunable animation constants shared by the scene and config
//! crates.

mod element;
pub mod palette;
mod speed;
mod state;
mod tuning;

pub use element::{Element, Geometry};
pub use palette::Rgb;
pub use speed::AnimationSpeed;
pub use state::SceneState;
pub use tuning::{DriftRule, DriftTable, PhaseSource, Tuning, Wave};
