use anyhow::Result;
use winit::window::{Window, WindowId};

use crate::device::Gpu;
use crate::frame::{FrameRenderer, FrameScript, FrameStats};
use crate::mesh::Mesh;
use crate::pipeline::PipelineState;
use crate::view::ViewConfig;

/// Window handle plus its id.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Returns the logical window size as `(width, height)`.
    pub fn logical_size(&self) -> (f64, f64) {
        let logical: winit::dpi::LogicalSize<f64> =
            self.window.inner_size().to_logical(self.window.scale_factor());
        (logical.width, logical.height)
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Replays `script` onto this window's drawable and presents it.
    pub fn submit(
        &mut self,
        renderer: &mut FrameRenderer,
        view: &ViewConfig,
        mesh: &Mesh,
        pipeline: &PipelineState,
        script: &FrameScript,
    ) -> Result<FrameStats> {
        let window = self.window.window;
        renderer.submit(self.gpu, view, mesh, pipeline, script, || {
            window.pre_present_notify()
        })
    }
}
