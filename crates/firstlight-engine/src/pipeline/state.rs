use anyhow::{anyhow, Context, Result};

use crate::mesh::GeometryType;
use crate::Abort;

use super::descriptor::PipelineDescriptor;

/// Immutable render pipeline built from a validated descriptor.
#[derive(Debug, Clone)]
pub struct PipelineState {
    pipeline: wgpu::RenderPipeline,
    color_format: wgpu::TextureFormat,
    geometry: GeometryType,
}

impl PipelineState {
    pub fn new(device: &wgpu::Device, desc: &PipelineDescriptor) -> Result<Self> {
        desc.validate()?;

        let color_format = desc.color_format.context(Abort::PipelineState)?;
        let vs = desc.vertex_function.as_ref().context(Abort::MissingFunction)?;
        let fs = desc.fragment_function.as_ref().context(Abort::MissingFunction)?;
        let vertex_descriptor = desc.vertex_descriptor.as_ref().context(Abort::PipelineState)?;

        let label = desc.label.as_deref().unwrap_or("firstlight pipeline");

        // wgpu reports creation failures to the device, not the caller.
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: vs.module(),
                entry_point: Some(vs.name()),
                compilation_options: Default::default(),
                buffers: &[vertex_descriptor.layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: fs.module(),
                entry_point: Some(fs.name()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: desc.geometry.topology(),
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(scope.pop()) {
            return Err(anyhow!("pipeline '{label}': {err}").context(Abort::PipelineState));
        }

        log::info!(
            "pipeline '{label}': {} -> {} targeting {color_format:?}",
            vs.name(),
            fs.name()
        );

        Ok(Self {
            pipeline,
            color_format,
            geometry: desc.geometry,
        })
    }

    pub fn raw(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.color_format
    }

    pub fn geometry(&self) -> GeometryType {
        self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshVertex;
    use crate::shader::ShaderLibrary;

    const PASSTHROUGH: &str = r#"
@vertex
fn vs(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(p, 1.0);
}

@fragment
fn fs() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 0.0, 1.0);
}
"#;

    // Reads a location the mesh layout does not provide.
    const UNBOUND_INPUT: &str = r#"
@vertex
fn vs(@location(5) p: vec4<f32>) -> @builtin(position) vec4<f32> {
    return p;
}

@fragment
fn fs() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 0.0, 1.0);
}
"#;

    fn device() -> wgpu::Device {
        wgpu::Device::noop(&wgpu::DeviceDescriptor::default()).0
    }

    fn descriptor(device: &wgpu::Device, source: &str) -> PipelineDescriptor {
        let library = ShaderLibrary::new(device, "test", source).unwrap();
        PipelineDescriptor::new()
            .color_format(wgpu::TextureFormat::Bgra8Unorm)
            .vertex_function(library.make_function("vs").unwrap())
            .fragment_function(library.make_function("fs").unwrap())
            .vertex_descriptor(MeshVertex::descriptor())
    }

    #[test]
    fn builds_against_the_mesh_layout() {
        let device = device();
        let state = PipelineState::new(&device, &descriptor(&device, PASSTHROUGH)).unwrap();
        assert_eq!(state.color_format(), wgpu::TextureFormat::Bgra8Unorm);
        assert_eq!(state.geometry(), GeometryType::Triangles);
    }

    #[test]
    fn device_rejection_maps_to_pipeline_state() {
        let device = device();
        let desc = descriptor(&device, UNBOUND_INPUT);
        assert!(desc.validate().is_ok());

        let err = PipelineState::new(&device, &desc).unwrap_err();
        assert_eq!(Abort::of(&err), Some(Abort::PipelineState));
    }

    #[test]
    fn incomplete_descriptor_fails_before_the_device() {
        let device = device();
        let desc = PipelineDescriptor {
            fragment_function: None,
            ..descriptor(&device, PASSTHROUGH)
        };
        let err = PipelineState::new(&device, &desc).unwrap_err();
        assert_eq!(Abort::of(&err), Some(Abort::MissingFunction));
    }
}
