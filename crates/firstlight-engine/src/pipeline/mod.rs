//! Render pipeline state.
//!
//! A descriptor is filled in piece by piece, then turned into an immutable
//! `PipelineState` that draw calls bind.

mod descriptor;
mod state;

pub use descriptor::PipelineDescriptor;
pub use state::PipelineState;
