//! Core engine-facing contracts.
//!
//! The stable interface between the runtime (platform loop) and the program
//! driving it: one-time setup against the device, then per-frame callbacks.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
