//! GPU device + surface management.
//!
//! This module is responsible for:
//! - acquiring the adapter, logical device and command queue
//! - creating & configuring the surface the view draws into
//! - handing out drawables (surface texture + encoder) for a frame

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
