//! Mesh generation and upload.
//!
//! CPU side: procedural generators produce `MeshData` (interleaved vertices plus
//! indexed submeshes). GPU side: `Mesh` holds device buffers allocated through a
//! `MeshBufferAllocator`, along with the vertex descriptor pipelines are built from.

mod allocator;
mod data;
mod gpu;
mod sphere;
mod vertex;

pub use allocator::{MeshBuffer, MeshBufferAllocator};
pub use data::{GeometryType, IndexData, MeshData, MeshSummary, SubmeshData, SubmeshSummary};
pub use gpu::{Mesh, Submesh};
pub use sphere::SphereDescriptor;
pub use vertex::{MeshVertex, VertexAttribute, VertexDescriptor, VertexSemantic};
