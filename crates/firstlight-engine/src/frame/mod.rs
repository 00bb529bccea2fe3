//! Single frame submission.
//!
//! A frame is first recorded as a `FrameScript` (plain commands, no GPU objects),
//! checked for ordering, then replayed into a wgpu render pass by `FrameRenderer`.

mod renderer;
mod script;

pub use renderer::{FrameRenderer, FrameStats};
pub use script::{FrameScript, RenderCommand, ScriptError};
