use bytemuck::{Pod, Zeroable};

/// Interleaved vertex produced by the mesh generators (32 bytes):
///
///  offset  0  position  [f32; 3]   loc 0
///  offset 12  normal    [f32; 3]   loc 1
///  offset 24  texcoord  [f32; 2]   loc 2
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
}

impl MeshVertex {
    pub fn descriptor() -> VertexDescriptor {
        VertexDescriptor::packed(&[
            (VertexSemantic::Position, wgpu::VertexFormat::Float32x3),
            (VertexSemantic::Normal, wgpu::VertexFormat::Float32x3),
            (VertexSemantic::TextureCoordinate, wgpu::VertexFormat::Float32x2),
        ])
    }
}

/// What a vertex attribute means, independent of where it lives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VertexSemantic {
    Position,
    Normal,
    TextureCoordinate,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexAttribute {
    pub semantic: VertexSemantic,
    pub format: wgpu::VertexFormat,
    pub offset: u64,
    pub shader_location: u32,
}

/// Layout of vertex buffer 0, derived from a mesh rather than written by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexDescriptor {
    attributes: Vec<VertexAttribute>,
    raw: Vec<wgpu::VertexAttribute>,
    stride: u64,
}

impl VertexDescriptor {
    /// Tightly packs `attributes` in order; shader locations follow declaration order.
    pub fn packed(attributes: &[(VertexSemantic, wgpu::VertexFormat)]) -> Self {
        let mut offset = 0u64;
        let attributes: Vec<VertexAttribute> = attributes
            .iter()
            .enumerate()
            .map(|(location, &(semantic, format))| {
                let attr = VertexAttribute {
                    semantic,
                    format,
                    offset,
                    shader_location: location as u32,
                };
                offset += format.size();
                attr
            })
            .collect();

        let raw = attributes
            .iter()
            .map(|a| wgpu::VertexAttribute {
                format: a.format,
                offset: a.offset,
                shader_location: a.shader_location,
            })
            .collect();

        Self {
            attributes,
            raw,
            stride: offset,
        }
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn attribute(&self, semantic: VertexSemantic) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.semantic == semantic)
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    pub fn layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_vertex_layout_matches_struct() {
        let desc = MeshVertex::descriptor();
        assert_eq!(desc.stride(), std::mem::size_of::<MeshVertex>() as u64);

        let pos = desc.attribute(VertexSemantic::Position).unwrap();
        assert_eq!((pos.offset, pos.shader_location), (0, 0));
        assert_eq!(pos.format, wgpu::VertexFormat::Float32x3);

        let normal = desc.attribute(VertexSemantic::Normal).unwrap();
        assert_eq!((normal.offset, normal.shader_location), (12, 1));

        let uv = desc.attribute(VertexSemantic::TextureCoordinate).unwrap();
        assert_eq!((uv.offset, uv.shader_location), (24, 2));
    }

    #[test]
    fn wgpu_layout_mirrors_attributes() {
        let desc = MeshVertex::descriptor();
        let layout = desc.layout();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(layout.attributes[2].offset, 24);
    }

    #[test]
    fn position_only_descriptor() {
        let desc = VertexDescriptor::packed(&[(
            VertexSemantic::Position,
            wgpu::VertexFormat::Float32x4,
        )]);
        assert_eq!(desc.stride(), 16);
        assert!(desc.attribute(VertexSemantic::Normal).is_none());
    }
}
