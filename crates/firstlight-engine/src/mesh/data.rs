use super::vertex::{MeshVertex, VertexDescriptor};

/// Primitive topology of a submesh.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum GeometryType {
    #[default]
    Triangles,
    Lines,
}

impl GeometryType {
    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            GeometryType::Triangles => wgpu::PrimitiveTopology::TriangleList,
            GeometryType::Lines => wgpu::PrimitiveTopology::LineList,
        }
    }

    /// Indices consumed per primitive.
    pub fn indices_per_primitive(self) -> usize {
        match self {
            GeometryType::Triangles => 3,
            GeometryType::Lines => 2,
        }
    }
}

/// Index storage, narrowed to 16 bits when every index fits.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexData {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexData {
    /// Packs `indices` using the narrowest width that can address `vertex_count`
    /// vertices.
    pub fn packed(indices: Vec<u32>, vertex_count: usize) -> Self {
        if vertex_count <= u16::MAX as usize + 1 {
            IndexData::U16(indices.into_iter().map(|i| i as u16).collect())
        } else {
            IndexData::U32(indices)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            IndexData::U16(v) => v.len(),
            IndexData::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn format(&self) -> wgpu::IndexFormat {
        match self {
            IndexData::U16(_) => wgpu::IndexFormat::Uint16,
            IndexData::U32(_) => wgpu::IndexFormat::Uint32,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexData::U16(v) => bytemuck::cast_slice(v),
            IndexData::U32(v) => bytemuck::cast_slice(v),
        }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        match self {
            IndexData::U16(v) => Box::new(v.iter().map(|&i| i as u32)),
            IndexData::U32(v) => Box::new(v.iter().copied()),
        }
    }
}

/// One drawable index range of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmeshData {
    pub indices: IndexData,
    pub geometry: GeometryType,
}

/// CPU-side mesh: a single interleaved vertex stream plus submeshes.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<MeshVertex>,
    pub submeshes: Vec<SubmeshData>,
}

impl MeshData {
    pub fn vertex_descriptor(&self) -> VertexDescriptor {
        MeshVertex::descriptor()
    }

    pub fn index_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.indices.len()).sum()
    }

    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            vertex_buffers: 1,
            submeshes: self
                .submeshes
                .iter()
                .map(|s| SubmeshSummary {
                    index_count: s.indices.len() as u32,
                    index_format: s.indices.format(),
                })
                .collect(),
        }
    }
}

/// Buffer-free description of a mesh, enough to plan draw calls.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSummary {
    pub vertex_buffers: usize,
    pub submeshes: Vec<SubmeshSummary>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SubmeshSummary {
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
}
