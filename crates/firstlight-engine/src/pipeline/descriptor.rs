use anyhow::{anyhow, Result};

use crate::mesh::{GeometryType, VertexDescriptor};
use crate::shader::{EntryPoint, ShaderFunction, ShaderStage};
use crate::Abort;

/// Inputs of a render pipeline.
///
/// Everything is optional until `PipelineState::new`, which rejects an incomplete
/// descriptor.
#[derive(Debug, Clone, Default)]
pub struct PipelineDescriptor {
    pub label: Option<String>,
    pub color_format: Option<wgpu::TextureFormat>,
    pub vertex_function: Option<ShaderFunction>,
    pub fragment_function: Option<ShaderFunction>,
    pub vertex_descriptor: Option<VertexDescriptor>,
    pub geometry: GeometryType,
}

impl PipelineDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.color_format = Some(format);
        self
    }

    pub fn vertex_function(mut self, function: ShaderFunction) -> Self {
        self.vertex_function = Some(function);
        self
    }

    pub fn fragment_function(mut self, function: ShaderFunction) -> Self {
        self.fragment_function = Some(function);
        self
    }

    pub fn vertex_descriptor(mut self, descriptor: VertexDescriptor) -> Self {
        self.vertex_descriptor = Some(descriptor);
        self
    }

    pub fn geometry(mut self, geometry: GeometryType) -> Self {
        self.geometry = geometry;
        self
    }

    /// Checks that every required piece is present and each function sits in the
    /// stage it is bound to.
    pub fn validate(&self) -> Result<()> {
        validate_parts(
            self.color_format,
            self.vertex_function.as_ref().map(ShaderFunction::entry),
            self.fragment_function.as_ref().map(ShaderFunction::entry),
            self.vertex_descriptor.as_ref(),
        )
    }
}

fn validate_parts(
    color_format: Option<wgpu::TextureFormat>,
    vertex: Option<&EntryPoint>,
    fragment: Option<&EntryPoint>,
    vertex_descriptor: Option<&VertexDescriptor>,
) -> Result<()> {
    if color_format.is_none() {
        return Err(anyhow!("pipeline has no color format").context(Abort::PipelineState));
    }

    let vertex = vertex.ok_or_else(|| {
        anyhow!("pipeline has no vertex function").context(Abort::MissingFunction)
    })?;
    if vertex.stage != ShaderStage::Vertex {
        return Err(anyhow!(
            "'{}' is a {:?} entry point, not a vertex one",
            vertex.name,
            vertex.stage
        )
        .context(Abort::PipelineState));
    }

    let fragment = fragment.ok_or_else(|| {
        anyhow!("pipeline has no fragment function").context(Abort::MissingFunction)
    })?;
    if fragment.stage != ShaderStage::Fragment {
        return Err(anyhow!(
            "'{}' is a {:?} entry point, not a fragment one",
            fragment.name,
            fragment.stage
        )
        .context(Abort::PipelineState));
    }

    match vertex_descriptor {
        Some(d) if !d.attributes().is_empty() => Ok(()),
        Some(_) => {
            Err(anyhow!("vertex descriptor has no attributes").context(Abort::PipelineState))
        }
        None => Err(anyhow!("pipeline has no vertex descriptor").context(Abort::PipelineState)),
    }
}
