//! Swing module - sampling, shot resolution, and flight animation

mod animator;
mod resolver;
mod sampler;

pub use animator::*;
pub use resolver::*;
pub use sampler::*;
