use std::f32::consts::{PI, TAU};

use anyhow::{ensure, Result};
use glam::{UVec2, Vec2, Vec3};

use crate::Abort;

use super::data::{GeometryType, IndexData, MeshData, SubmeshData};
use super::vertex::MeshVertex;

/// Parameters of a UV sphere (an ellipsoid when the extent is not uniform).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SphereDescriptor {
    /// Radius along each axis.
    pub extent: Vec3,
    /// `x`: radial (longitude) segments, `y`: vertical (latitude) segments.
    pub segments: UVec2,
    /// Point normals toward the center and flip winding accordingly.
    pub inward_normals: bool,
    pub geometry: GeometryType,
}

impl SphereDescriptor {
    pub const MIN_RADIAL_SEGMENTS: u32 = 3;
    pub const MIN_VERTICAL_SEGMENTS: u32 = 2;
    /// Per-axis cap; keeps every grid index addressable as `u32`.
    pub const MAX_SEGMENTS: u32 = 4096;

    pub fn new(extent: Vec3, segments: UVec2) -> Self {
        Self {
            extent,
            segments,
            inward_normals: false,
            geometry: GeometryType::Triangles,
        }
    }

    pub fn with_inward_normals(mut self, inward: bool) -> Self {
        self.inward_normals = inward;
        self
    }

    pub fn with_geometry(mut self, geometry: GeometryType) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.extent.is_finite() && self.extent.min_element() > 0.0,
            "sphere extent must be finite and positive, got {}",
            self.extent
        );
        ensure!(
            self.segments.x >= Self::MIN_RADIAL_SEGMENTS,
            "sphere needs at least {} radial segments, got {}",
            Self::MIN_RADIAL_SEGMENTS,
            self.segments.x
        );
        ensure!(
            self.segments.y >= Self::MIN_VERTICAL_SEGMENTS,
            "sphere needs at least {} vertical segments, got {}",
            Self::MIN_VERTICAL_SEGMENTS,
            self.segments.y
        );
        ensure!(
            self.segments.max_element() <= Self::MAX_SEGMENTS,
            "sphere segments are capped at {} per axis, got {}",
            Self::MAX_SEGMENTS,
            self.segments
        );
        Ok(())
    }

    /// Vertex count of the generated grid, seam and pole rows included.
    pub fn vertex_count(&self) -> usize {
        (self.segments.x as usize + 1) * (self.segments.y as usize + 1)
    }
}

impl MeshData {
    /// Generates a sphere with a single submesh covering the whole surface.
    pub fn sphere(desc: &SphereDescriptor) -> Result<Self> {
        desc.validate().map_err(|e| e.context(Abort::MeshGeneration))?;

        let radial = desc.segments.x;
        let vertical = desc.segments.y;
        let columns = radial + 1;

        let mut vertices = Vec::with_capacity(desc.vertex_count());
        for ring in 0..=vertical {
            let theta = PI * ring as f32 / vertical as f32;
            let (sin_t, cos_t) = theta.sin_cos();

            for col in 0..=radial {
                let phi = TAU * col as f32 / radial as f32;
                let (sin_p, cos_p) = phi.sin_cos();

                let dir = Vec3::new(sin_t * sin_p, cos_t, sin_t * cos_p);
                let position = dir * desc.extent;
                // Ellipsoid gradient: p / r^2 == dir / r.
                let mut normal = (dir / desc.extent).normalize_or_zero();
                if desc.inward_normals {
                    normal = -normal;
                }
                let uv = Vec2::new(col as f32 / radial as f32, ring as f32 / vertical as f32);

                vertices.push(MeshVertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                    texcoord: uv.to_array(),
                });
            }
        }

        let at = |ring: u32, col: u32| ring * columns + col;

        let mut indices: Vec<u32> = Vec::new();
        match desc.geometry {
            GeometryType::Triangles => {
                for ring in 0..vertical {
                    for col in 0..radial {
                        let a = at(ring, col);
                        let b = at(ring + 1, col);
                        let c = at(ring + 1, col + 1);
                        let d = at(ring, col + 1);

                        // Pole rows collapse one triangle of each quad.
                        let top = ring == 0;
                        let bottom = ring + 1 == vertical;
                        let mut tris = Vec::with_capacity(2);
                        if !bottom {
                            tris.push([a, b, c]);
                        }
                        if !top {
                            tris.push([a, c, d]);
                        }

                        for [i0, i1, i2] in tris {
                            if desc.inward_normals {
                                indices.extend_from_slice(&[i0, i2, i1]);
                            } else {
                                indices.extend_from_slice(&[i0, i1, i2]);
                            }
                        }
                    }
                }
            }
            GeometryType::Lines => {
                // Latitude rings; the pole rows are single points.
                for ring in 1..vertical {
                    for col in 0..radial {
                        indices.extend_from_slice(&[at(ring, col), at(ring, col + 1)]);
                    }
                }
                // Meridians.
                for ring in 0..vertical {
                    for col in 0..radial {
                        indices.extend_from_slice(&[at(ring, col), at(ring + 1, col)]);
                    }
                }
            }
        }

        let vertex_count = vertices.len();
        Ok(MeshData {
            name: "sphere".to_string(),
            vertices,
            submeshes: vec![SubmeshData {
                indices: IndexData::packed(indices, vertex_count),
                geometry: desc.geometry,
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(radial: u32, vertical: u32) -> SphereDescriptor {
        SphereDescriptor::new(Vec3::new(0.2, 0.75, 0.2), UVec2::new(radial, vertical))
    }

    fn pos(v: &MeshVertex) -> Vec3 {
        Vec3::from_array(v.position)
    }

    fn triangles(mesh: &MeshData) -> Vec<[Vec3; 3]> {
        let idx: Vec<u32> = mesh.submeshes[0].indices.iter().collect();
        idx.chunks_exact(3)
            .map(|t| {
                [
                    pos(&mesh.vertices[t[0] as usize]),
                    pos(&mesh.vertices[t[1] as usize]),
                    pos(&mesh.vertices[t[2] as usize]),
                ]
            })
            .collect()
    }

    #[test]
    fn chapter_sphere_counts() {
        let mesh = MeshData::sphere(&desc(100, 100)).unwrap();
        assert_eq!(mesh.vertices.len(), 101 * 101);
        assert_eq!(mesh.submeshes.len(), 1);

        // Two triangles per quad, one per quad on each pole row.
        let expected = 100 * 98 * 6 + 2 * 100 * 3;
        assert_eq!(mesh.submeshes[0].indices.len(), expected);
        assert_eq!(mesh.submeshes[0].indices.format(), wgpu::IndexFormat::Uint16);
    }

    #[test]
    fn indices_stay_in_range() {
        let mesh = MeshData::sphere(&desc(12, 7)).unwrap();
        let n = mesh.vertices.len() as u32;
        assert!(mesh.submeshes[0].indices.iter().all(|i| i < n));
    }

    #[test]
    fn positions_lie_on_the_ellipsoid() {
        let d = desc(16, 9);
        let mesh = MeshData::sphere(&d).unwrap();
        for v in &mesh.vertices {
            let p = pos(v) / d.extent;
            assert!((p.length() - 1.0).abs() < 1e-5, "off-surface vertex {p}");
        }
    }

    #[test]
    fn normals_are_unit_and_outward() {
        let mesh = MeshData::sphere(&desc(16, 9)).unwrap();
        for v in &mesh.vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.dot(pos(v)) > 0.0);
        }
    }

    #[test]
    fn inward_normals_point_to_center() {
        let mesh = MeshData::sphere(&desc(16, 9).with_inward_normals(true)).unwrap();
        for v in &mesh.vertices {
            assert!(Vec3::from_array(v.normal).dot(pos(v)) < 0.0);
        }
    }

    #[test]
    fn winding_is_ccw_from_outside() {
        let mesh = MeshData::sphere(&desc(8, 6)).unwrap();
        for [p0, p1, p2] in triangles(&mesh) {
            let face = (p1 - p0).cross(p2 - p0);
            let centroid = (p0 + p1 + p2) / 3.0;
            assert!(face.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn inward_winding_is_flipped() {
        let mesh = MeshData::sphere(&desc(8, 6).with_inward_normals(true)).unwrap();
        for [p0, p1, p2] in triangles(&mesh) {
            let face = (p1 - p0).cross(p2 - p0);
            assert!(face.dot((p0 + p1 + p2) / 3.0) < 0.0);
        }
    }

    #[test]
    fn no_degenerate_triangles_at_poles() {
        let mesh = MeshData::sphere(&desc(8, 6)).unwrap();
        for [p0, p1, p2] in triangles(&mesh) {
            assert!((p1 - p0).cross(p2 - p0).length() > 1e-7);
        }
    }

    #[test]
    fn dense_sphere_switches_to_u32() {
        let mesh = MeshData::sphere(&desc(300, 300)).unwrap();
        assert_eq!(mesh.submeshes[0].indices.format(), wgpu::IndexFormat::Uint32);
    }

    #[test]
    fn line_geometry_emits_grid_edges() {
        let mesh = MeshData::sphere(&desc(4, 3).with_geometry(GeometryType::Lines)).unwrap();
        let sub = &mesh.submeshes[0];
        assert_eq!(sub.geometry, GeometryType::Lines);
        // 2 inner rings * 4 edges + 3 rows * 4 meridian edges, two indices each.
        assert_eq!(sub.indices.len(), (2 * 4 + 3 * 4) * 2);
    }

    #[test]
    fn segment_cap_is_inclusive() {
        let d = desc(SphereDescriptor::MAX_SEGMENTS, 2);
        assert!(d.validate().is_ok());
        assert!(desc(SphereDescriptor::MAX_SEGMENTS + 1, 2).validate().is_err());
    }

    #[test]
    fn rejects_degenerate_descriptors() {
        for bad in [
            desc(2, 10),
            desc(10, 1),
            desc(SphereDescriptor::MAX_SEGMENTS + 1, 8),
            desc(8, u32::MAX),
            SphereDescriptor::new(Vec3::new(0.0, 1.0, 1.0), UVec2::new(8, 8)),
            SphereDescriptor::new(Vec3::new(f32::NAN, 1.0, 1.0), UVec2::new(8, 8)),
        ] {
            let err = MeshData::sphere(&bad).unwrap_err();
            assert_eq!(Abort::of(&err), Some(Abort::MeshGeneration));
        }
    }
}
