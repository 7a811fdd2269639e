//! Pickpad Application
//!
//! Headless host for pickpad layouts.

mod app;
mod text_surface;

pub use app::{App, Cli, Command};
pub use text_surface::TextSurface;
