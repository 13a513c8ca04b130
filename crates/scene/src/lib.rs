//! Scene composition: joins parsed geometry, resolved materials and computed
//! extents into renderable parts plus camera placement for the rendering
//! backend.

pub mod compose;
pub mod layout;
pub mod material;
pub mod source;

pub use compose::{FitOptions, LoadError, Scene, ScenePart, load_scene};
pub use material::{Material, TextureHandle, TextureResolver};
pub use source::{FileSource, TextSource};
