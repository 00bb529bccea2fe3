use anyhow::{Context, Result};
use glam::{UVec2, Vec3};

use firstlight_engine::core::{App, AppControl, FrameCtx};
use firstlight_engine::device::Gpu;
use firstlight_engine::frame::{FrameRenderer, FrameScript};
use firstlight_engine::mesh::{
    GeometryType, Mesh, MeshBufferAllocator, MeshData, SphereDescriptor,
};
use firstlight_engine::pipeline::{PipelineDescriptor, PipelineState};
use firstlight_engine::shader::ShaderLibrary;
use firstlight_engine::view::{ClearColor, ViewConfig};
use firstlight_engine::Abort;

use crate::shader::{FRAGMENT_FUNCTION, SHADER_SOURCE, VERTEX_FUNCTION};

pub const TITLE: &str = "Chapter 1";

pub const VIEW_SIZE: f64 = 600.0;
pub const CLEAR_COLOR: ClearColor = ClearColor::new(1.0, 1.0, 0.8, 1.0);

pub const SPHERE_EXTENT: Vec3 = Vec3::new(0.2, 0.75, 0.2);
pub const SPHERE_SEGMENTS: UVec2 = UVec2::new(100, 100);

pub fn sphere_descriptor() -> SphereDescriptor {
    SphereDescriptor::new(SPHERE_EXTENT, SPHERE_SEGMENTS)
        .with_inward_normals(false)
        .with_geometry(GeometryType::Triangles)
}

/// Everything built during setup; lives for the rest of the process.
struct Scene {
    mesh: Mesh,
    pipeline: PipelineState,
    script: FrameScript,
}

pub struct Chapter01 {
    view: ViewConfig,
    scene: Option<Scene>,
    renderer: FrameRenderer,
}

impl Chapter01 {
    pub fn new() -> Self {
        Self {
            view: ViewConfig::new(VIEW_SIZE, VIEW_SIZE, CLEAR_COLOR),
            scene: None,
            renderer: FrameRenderer::new(),
        }
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }
}

impl Default for Chapter01 {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Builds the mesh, shader functions, pipeline and frame script, in that order.
    fn build(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Result<Self> {
        let mut allocator = MeshBufferAllocator::new(device);
        let data = MeshData::sphere(&sphere_descriptor())?;
        let mesh = Mesh::new(&data, &mut allocator)?;

        let library = ShaderLibrary::new(device, "chapter01 shaders", SHADER_SOURCE)?;
        let vertex_function = library
            .make_function(VERTEX_FUNCTION)
            .with_context(|| format!("no function named '{VERTEX_FUNCTION}'"))
            .context(Abort::MissingFunction)?;
        let fragment_function = library
            .make_function(FRAGMENT_FUNCTION)
            .with_context(|| format!("no function named '{FRAGMENT_FUNCTION}'"))
            .context(Abort::MissingFunction)?;

        let descriptor = PipelineDescriptor::new()
            .label("chapter01 pipeline")
            .color_format(color_format)
            .vertex_function(vertex_function)
            .fragment_function(fragment_function)
            .vertex_descriptor(mesh.vertex_descriptor().clone())
            .geometry(GeometryType::Triangles);
        let pipeline = PipelineState::new(device, &descriptor)?;

        let script = FrameScript::single_draw(&mesh.summary())?;

        Ok(Self {
            mesh,
            pipeline,
            script,
        })
    }
}

impl App for Chapter01 {
    fn setup(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        self.scene = Some(Scene::build(gpu.device(), gpu.surface_format())?);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        let scene = self
            .scene
            .as_ref()
            .context("frame requested before setup")?;

        let (w, h) = ctx.window.logical_size();
        log::debug!("drawing into {w}x{h} view");

        ctx.submit(
            &mut self.renderer,
            &self.view,
            &scene.mesh,
            &scene.pipeline,
            &scene.script,
        )?;

        Ok(AppControl::Continue)
    }
}
