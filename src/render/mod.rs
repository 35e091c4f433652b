//! Render module - surface contract, course scene, imageproc surface, and the window canvas

mod canvas;
mod image_surface;
mod scene;
mod surface;

pub use canvas::*;
pub use image_surface::*;
pub use scene::*;
pub use surface::*;
