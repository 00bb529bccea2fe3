//! Surface/view setup.
//!
//! A view is the fixed-size drawable region plus the clear color every render
//! pass into it starts from.

mod clear;

pub use clear::ClearColor;

use winit::dpi::LogicalSize;

use crate::window::RuntimeConfig;

/// Drawable region and clear behavior.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewConfig {
    /// Logical size of the view.
    pub size: LogicalSize<f64>,
    pub clear_color: ClearColor,
}

impl ViewConfig {
    pub const DEFAULT_SIZE: f64 = 600.0;

    pub fn new(width: f64, height: f64, clear_color: ClearColor) -> Self {
        Self {
            size: LogicalSize::new(width, height),
            clear_color,
        }
    }

    /// Window configuration hosting this view.
    pub fn runtime_config(&self, title: impl Into<String>) -> RuntimeConfig {
        RuntimeConfig {
            title: title.into(),
            initial_size: self.size,
            resizable: false,
        }
    }

    /// Color attachment for the current drawable: clear on load, store on finish.
    pub fn color_attachment<'a>(
        &self,
        target: &'a wgpu::TextureView,
    ) -> wgpu::RenderPassColorAttachment<'a> {
        wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(self.clear_color.into()),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_SIZE,
            Self::DEFAULT_SIZE,
            ClearColor::new(1.0, 1.0, 0.8, 1.0),
        )
    }
}
