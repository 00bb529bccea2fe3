use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};

use super::lifecycle::{RunState, Step};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "firstlight".to_string(),
            initial_size: LogicalSize::new(600.0, 600.0),
            resizable: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, binds a device to it, runs `app.setup` and requests a
    /// single frame. Returns when the window closes or the app asks to exit.
    ///
    /// Any setup or frame error stops the loop and is returned from here.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.run.into_result()
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

fn create_window_entry(
    event_loop: &ActiveEventLoop,
    config: &RuntimeConfig,
    gpu_init: &GpuInit,
) -> Result<WindowEntry> {
    let attrs = Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(config.initial_size)
        .with_resizable(config.resizable);

    let window = event_loop
        .create_window(attrs)
        .context("failed to create window")?;

    let gpu_init = gpu_init.clone();

    WindowEntryTryBuilder {
        window,
        gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
    }
    .try_build()
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    run: RunState<WindowEntry>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            run: RunState::new(),
        }
    }

    fn apply(&self, event_loop: &ActiveEventLoop, step: Step) {
        match step {
            Step::Idle => {}
            Step::RequestRedraw => {
                if let Some(entry) = self.run.entry() {
                    entry.with_window(|w| w.request_redraw());
                }
            }
            Step::Exit => event_loop.exit(),
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let (config, gpu_init, app) = (&self.config, &self.gpu_init, &mut self.app);
        let step = self.run.resume(
            || create_window_entry(event_loop, config, gpu_init),
            |entry| entry.with_gpu(|gpu| app.setup(gpu)),
        );
        self.apply(event_loop, step);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.run.exit_requested() {
            event_loop.exit();
            return;
        }

        // Redraws are requested explicitly; nothing animates.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.run.exit_requested() {
            event_loop.exit();
            return;
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            let step = self.run.request_exit();
            self.apply(event_loop, step);
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                let step = self.run.close();
                self.apply(event_loop, step);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.run.entry_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.run.entry_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::RedrawRequested => {
                let app = &mut self.app;
                let Some(entry) = self.run.take_frame() else {
                    return;
                };

                let result = entry.with_mut(|fields| {
                    let mut ctx = FrameCtx {
                        window: WindowCtx {
                            id: window_id,
                            window: fields.window,
                        },
                        gpu: fields.gpu,
                    };
                    app.on_frame(&mut ctx)
                });

                let step = self.run.finish_frame(result);
                self.apply(event_loop, step);
            }

            _ => {}
        }
    }
}
