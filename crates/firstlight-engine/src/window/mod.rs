//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the view window, and wires them to the GPU layer.

mod lifecycle;
mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
