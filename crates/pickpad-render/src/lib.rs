//! Pickpad Render Library
//!
//! Render surface abstraction and frame building for the picker canvas.
//! Hosts implement [`RenderSurface`] on top of their own drawing API.

mod renderer;
mod scene;

pub use renderer::{RenderContext, RenderSurface, TextAlign};
pub use scene::{DrawCommand, RecordingSurface, build_scene, render, replay};
