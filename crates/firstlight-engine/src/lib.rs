//! firstlight engine crate.
//!
//! GPU device, window runtime and the small set of render objects needed to put
//! a procedurally generated mesh on screen with a single frame submission.

pub mod abort;
pub mod core;
pub mod device;
pub mod frame;
pub mod logging;
pub mod mesh;
pub mod pipeline;
pub mod shader;
pub mod view;
pub mod window;

pub use abort::Abort;
