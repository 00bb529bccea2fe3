use anyhow::{anyhow, Result};

use crate::Abort;

use super::allocator::{MeshBuffer, MeshBufferAllocator};
use super::data::{GeometryType, MeshData, MeshSummary, SubmeshSummary};
use super::vertex::VertexDescriptor;

/// Drawable index range backed by its own index buffer.
#[derive(Debug, Clone)]
pub struct Submesh {
    pub index_buffer: MeshBuffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
    pub geometry: GeometryType,
}

/// GPU-resident mesh. Immutable once uploaded.
#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
    vertex_buffers: Vec<MeshBuffer>,
    submeshes: Vec<Submesh>,
    vertex_descriptor: VertexDescriptor,
    vertex_count: usize,
}

impl Mesh {
    /// Uploads `data` through `allocator`.
    pub fn new(data: &MeshData, allocator: &mut MeshBufferAllocator) -> Result<Self> {
        if data.vertices.is_empty() {
            return Err(
                anyhow!("mesh '{}' has no vertices", data.name).context(Abort::MeshGeneration)
            );
        }

        let vertex_buffer = allocator.allocate(
            &format!("{} vertex buffer", data.name),
            bytemuck::cast_slice(&data.vertices),
            wgpu::BufferUsages::VERTEX,
        );

        let mut submeshes = Vec::with_capacity(data.submeshes.len());
        for (i, sub) in data.submeshes.iter().enumerate() {
            if sub.indices.is_empty() {
                return Err(anyhow!("submesh {i} of '{}' has no indices", data.name)
                    .context(Abort::MeshGeneration));
            }

            let index_buffer = allocator.allocate(
                &format!("{} submesh {i} index buffer", data.name),
                sub.indices.as_bytes(),
                wgpu::BufferUsages::INDEX,
            );
            submeshes.push(Submesh {
                index_buffer,
                index_count: sub.indices.len() as u32,
                index_format: sub.indices.format(),
                geometry: sub.geometry,
            });
        }

        log::info!(
            "mesh '{}': {} vertices, {} indices in {} submesh(es), {} buffers ({} bytes)",
            data.name,
            data.vertices.len(),
            data.index_count(),
            submeshes.len(),
            allocator.allocations(),
            allocator.allocated_bytes()
        );

        Ok(Self {
            name: data.name.clone(),
            vertex_buffers: vec![vertex_buffer],
            submeshes,
            vertex_descriptor: data.vertex_descriptor(),
            vertex_count: data.vertices.len(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_buffers(&self) -> &[MeshBuffer] {
        &self.vertex_buffers
    }

    pub fn submeshes(&self) -> &[Submesh] {
        &self.submeshes
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Vertex layout to build pipelines against.
    pub fn vertex_descriptor(&self) -> &VertexDescriptor {
        &self.vertex_descriptor
    }

    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            vertex_buffers: self.vertex_buffers.len(),
            submeshes: self
                .submeshes
                .iter()
                .map(|s| SubmeshSummary {
                    index_count: s.index_count,
                    index_format: s.index_format,
                })
                .collect(),
        }
    }
}
