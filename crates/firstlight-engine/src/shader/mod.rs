//! Shader libraries.
//!
//! A library is compiled once from inline WGSL. Its entry points are reflected up
//! front so functions can be looked up by name before any pipeline is built.

mod interface;
mod library;

pub use interface::{EntryPoint, ShaderInterface, ShaderStage};
pub use library::{ShaderFunction, ShaderLibrary};
