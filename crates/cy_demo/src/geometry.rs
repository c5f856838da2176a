//! Procedural geometry: the shared tangent-space quad, cube faces composed
//! from it, the coin cylinder, and the CPU-side batch the frame loop streams
//! into GPU buffers.

use std::sync::{Arc, OnceLock};

use cy_render::MeshVertex;
use glam::{Mat3, Mat4, Vec2, Vec3};

/// Solve the 2x2 system relating UV deltas to edge vectors for one triangle,
/// yielding its tangent and bitangent (standard tangent-space formula with
/// the 1/determinant scale factor). Degenerate UVs (zero-area in texture
/// space) have no solvable basis; those triangles get the world XY axes so
/// the result is always finite.
pub fn tangent_basis(positions: [Vec3; 3], uvs: [Vec2; 3]) -> (Vec3, Vec3) {
    let edge1 = positions[1] - positions[0];
    let edge2 = positions[2] - positions[0];
    let duv1 = uvs[1] - uvs[0];
    let duv2 = uvs[2] - uvs[0];

    let det = duv1.x * duv2.y - duv2.x * duv1.y;
    if det.abs() < f32::EPSILON {
        return (Vec3::X, Vec3::Y);
    }
    let f = 1.0 / det;
    let tangent = f * (duv2.y * edge1 - duv1.y * edge2);
    let bitangent = f * (-duv2.x * edge1 + duv1.x * edge2);
    (tangent, bitangent)
}

/// Two triangles covering the [-1, 1] XY quad, facing +Z, with per-triangle
/// tangent/bitangent. Built exactly once per process and shared by every
/// caller; only the single render thread ever triggers the build.
pub fn quad_template() -> &'static [MeshVertex; 6] {
    static QUAD: OnceLock<[MeshVertex; 6]> = OnceLock::new();
    QUAD.get_or_init(build_quad)
}

fn build_quad() -> [MeshVertex; 6] {
    let corners = [
        Vec3::new(-1.0, 1.0, 0.0),
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
    ];
    let uvs = [
        Vec2::new(0.0, 1.0),
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
    ];
    let normal = Vec3::Z;

    let tri1 = [corners[0], corners[1], corners[2]];
    let tri1_uv = [uvs[0], uvs[1], uvs[2]];
    let tri2 = [corners[0], corners[2], corners[3]];
    let tri2_uv = [uvs[0], uvs[2], uvs[3]];

    let (t1, b1) = tangent_basis(tri1, tri1_uv);
    let (t2, b2) = tangent_basis(tri2, tri2_uv);

    let vertex = |pos: Vec3, uv: Vec2, tangent: Vec3, bitangent: Vec3| MeshVertex {
        position: pos.to_array(),
        normal: normal.to_array(),
        tex_coords: uv.to_array(),
        tangent: tangent.to_array(),
        bitangent: bitangent.to_array(),
    };

    [
        vertex(tri1[0], tri1_uv[0], t1, b1),
        vertex(tri1[1], tri1_uv[1], t1, b1),
        vertex(tri1[2], tri1_uv[2], t1, b1),
        vertex(tri2[0], tri2_uv[0], t2, b2),
        vertex(tri2[1], tri2_uv[1], t2, b2),
        vertex(tri2[2], tri2_uv[2], t2, b2),
    ]
}

/// Absolute transforms for the six cube faces in front/back/right/left/
/// top/bottom order. Each is translate-to-face x face rotation x half-side
/// scale, so every face placement is independent of the others.
pub fn cube_face_transforms(center: Vec3, side: f32) -> [Mat4; 6] {
    let half = side / 2.0;
    let faces: [(Vec3, Vec3, f32); 6] = [
        (Vec3::Z, Vec3::Y, 0.0),
        (Vec3::NEG_Z, Vec3::Y, 180.0),
        (Vec3::X, Vec3::Y, 90.0),
        (Vec3::NEG_X, Vec3::Y, -90.0),
        (Vec3::Y, Vec3::X, -90.0),
        (Vec3::NEG_Y, Vec3::X, 90.0),
    ];
    faces.map(|(offset, axis, degrees)| {
        Mat4::from_translation(center + offset * half)
            * Mat4::from_axis_angle(axis, degrees.to_radians())
            * Mat4::from_scale(Vec3::splat(half))
    })
}

/// A contiguous run of indices that share the same material binding.
/// Draws are merged when consecutive geometry uses the same material,
/// minimizing bind-group switches during the render pass.
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub material_key: Arc<str>,
    pub index_start: u32,
    pub index_count: u32,
}

/// CPU-side mesh rebuilt each frame from the scene layout, then streamed
/// into grow-only GPU buffers.
#[derive(Default)]
pub struct MeshBatch {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub draw_calls: Vec<DrawCall>,
    pub quad_count: usize,
}

impl MeshBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.draw_calls.clear();
        self.quad_count = 0;
    }

    /// Bake the shared quad template through `transform` and append it.
    pub fn push_quad(&mut self, transform: Mat4, material_key: &str) {
        let normal_matrix = Mat3::from_mat4(transform);
        let base_index = self.vertices.len() as u32;
        for v in quad_template() {
            self.vertices.push(MeshVertex {
                position: transform.transform_point3(Vec3::from(v.position)).to_array(),
                normal: (normal_matrix * Vec3::from(v.normal)).normalize().to_array(),
                tex_coords: v.tex_coords,
                tangent: (normal_matrix * Vec3::from(v.tangent)).normalize().to_array(),
                bitangent: (normal_matrix * Vec3::from(v.bitangent))
                    .normalize()
                    .to_array(),
            });
        }
        let draw_start = self.indices.len() as u32;
        self.indices.extend(base_index..base_index + 6);
        self.quad_count += 1;
        self.push_draw_call(Arc::from(material_key), draw_start, 6);
    }

    /// A cube is exactly six oriented instances of the quad template.
    pub fn push_cube(&mut self, center: Vec3, side: f32, material_key: &str) {
        for transform in cube_face_transforms(center, side) {
            self.push_quad(transform, material_key);
        }
    }

    /// Append an arbitrary indexed mesh under a transform (used for coins).
    pub fn push_mesh(
        &mut self,
        mesh_vertices: &[MeshVertex],
        mesh_indices: &[u32],
        transform: Mat4,
        material_key: &str,
    ) {
        let normal_matrix = Mat3::from_mat4(transform);
        let base_index = self.vertices.len() as u32;
        for v in mesh_vertices {
            self.vertices.push(MeshVertex {
                position: transform.transform_point3(Vec3::from(v.position)).to_array(),
                normal: (normal_matrix * Vec3::from(v.normal)).normalize().to_array(),
                tex_coords: v.tex_coords,
                tangent: (normal_matrix * Vec3::from(v.tangent)).normalize().to_array(),
                bitangent: (normal_matrix * Vec3::from(v.bitangent))
                    .normalize()
                    .to_array(),
            });
        }
        let draw_start = self.indices.len() as u32;
        self.indices
            .extend(mesh_indices.iter().map(|i| base_index + i));
        self.push_draw_call(
            Arc::from(material_key),
            draw_start,
            mesh_indices.len() as u32,
        );
    }

    /// Append a draw call, merging with the previous one when the material
    /// matches and indices are contiguous. Scene geometry is emitted grouped
    /// by material, so whole geometry sets collapse into single draws.
    fn push_draw_call(&mut self, material_key: Arc<str>, index_start: u32, index_count: u32) {
        if let Some(last) = self.draw_calls.last_mut() {
            let contiguous = last.index_start + last.index_count == index_start;
            if *last.material_key == *material_key && contiguous {
                last.index_count += index_count;
                return;
            }
        }
        self.draw_calls.push(DrawCall {
            material_key,
            index_start,
            index_count,
        });
    }
}

/// Indexed coin mesh: a squat cylinder (axis along Z) with two cap fans
/// and a side wall, built at unit radius and scaled at draw time.
pub fn coin_mesh(radius: f32, half_thickness: f32, segments: u32) -> (Vec<MeshVertex>, Vec<u32>) {
    assert!(segments >= 3);
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Caps: a center vertex plus one ring each, triangulated as a fan.
    for (z, normal, tangent) in [
        (half_thickness, Vec3::Z, Vec3::X),
        (-half_thickness, Vec3::NEG_Z, Vec3::NEG_X),
    ] {
        let center_index = vertices.len() as u32;
        vertices.push(MeshVertex {
            position: [0.0, 0.0, z],
            normal: normal.to_array(),
            tex_coords: [0.5, 0.5],
            tangent: tangent.to_array(),
            bitangent: Vec3::Y.to_array(),
        });
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
            let (sin, cos) = theta.sin_cos();
            vertices.push(MeshVertex {
                position: [radius * cos, radius * sin, z],
                normal: normal.to_array(),
                tex_coords: [0.5 + cos * 0.5, 0.5 + sin * 0.5],
                tangent: tangent.to_array(),
                bitangent: Vec3::Y.to_array(),
            });
        }
        for i in 0..segments {
            indices.extend_from_slice(&[center_index, center_index + 1 + i, center_index + 2 + i]);
        }
    }

    // Side wall: radial normals, tangent along the circle, bitangent along Z.
    let wall_start = vertices.len() as u32;
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
        let (sin, cos) = theta.sin_cos();
        let normal = [cos, sin, 0.0];
        let tangent = [-sin, cos, 0.0];
        for z in [half_thickness, -half_thickness] {
            vertices.push(MeshVertex {
                position: [radius * cos, radius * sin, z],
                normal,
                tex_coords: [i as f32 / segments as f32, if z > 0.0 { 0.0 } else { 1.0 }],
                tangent,
                bitangent: [0.0, 0.0, 1.0],
            });
        }
    }
    for i in 0..segments {
        let ring = wall_start + i * 2;
        indices.extend_from_slice(&[ring, ring + 1, ring + 3, ring, ring + 3, ring + 2]);
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_template_builds_once_and_is_shared() {
        let first = quad_template();
        let second = quad_template();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn quad_tangents_align_with_uv_axes() {
        for v in quad_template() {
            let tangent = Vec3::from(v.tangent).normalize();
            let bitangent = Vec3::from(v.bitangent).normalize();
            assert!((tangent - Vec3::X).length() < 1e-5, "tangent {tangent:?}");
            assert!(
                (bitangent - Vec3::Y).length() < 1e-5,
                "bitangent {bitangent:?}"
            );
        }
    }

    #[test]
    fn tangent_basis_solves_skewed_uvs() {
        let positions = [Vec3::ZERO, Vec3::X * 2.0, Vec3::Y * 2.0];
        let uvs = [Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        let (tangent, bitangent) = tangent_basis(positions, uvs);
        assert!((tangent - Vec3::X * 2.0).length() < 1e-5);
        assert!((bitangent - Vec3::Y * 2.0).length() < 1e-5);
    }

    #[test]
    fn tangent_basis_survives_degenerate_uvs() {
        // All three UVs collapsed to one point: the 2x2 system is singular.
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let uvs = [Vec2::splat(0.5); 3];
        let (tangent, bitangent) = tangent_basis(positions, uvs);
        assert!(tangent.is_finite(), "tangent {tangent:?}");
        assert!(bitangent.is_finite(), "bitangent {bitangent:?}");

        // Colinear UVs are singular too.
        let uvs = [Vec2::ZERO, Vec2::new(0.5, 0.0), Vec2::new(1.0, 0.0)];
        let (tangent, bitangent) = tangent_basis(positions, uvs);
        assert!(tangent.is_finite() && bitangent.is_finite());
    }

    #[test]
    fn cube_face_transforms_are_pairwise_distinct() {
        let transforms = cube_face_transforms(Vec3::new(1.0, 2.0, 3.0), 2.0);
        for i in 0..6 {
            for j in (i + 1)..6 {
                assert_ne!(
                    transforms[i].to_cols_array(),
                    transforms[j].to_cols_array(),
                    "faces {i} and {j} coincide"
                );
            }
        }
    }

    #[test]
    fn cube_faces_sit_on_the_cube_surface() {
        let side = 3.0;
        let center = Vec3::new(0.5, -1.0, 2.0);
        for transform in cube_face_transforms(center, side) {
            let face_center = transform.transform_point3(Vec3::ZERO);
            let offset = face_center - center;
            // Each face center lies half a side away along exactly one axis.
            assert!((offset.length() - side / 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn push_cube_emits_exactly_six_quads() {
        let mut batch = MeshBatch::new();
        batch.push_cube(Vec3::ZERO, 1.0, "bricks");
        assert_eq!(batch.quad_count, 6);
        assert_eq!(batch.vertices.len(), 36);
        assert_eq!(batch.indices.len(), 36);
    }

    #[test]
    fn draw_calls_merge_within_material_runs() {
        let mut batch = MeshBatch::new();
        batch.push_cube(Vec3::ZERO, 1.0, "bricks");
        batch.push_cube(Vec3::X * 2.0, 1.0, "bricks");
        assert_eq!(batch.draw_calls.len(), 1);
        assert_eq!(batch.draw_calls[0].index_count, 72);

        batch.push_cube(Vec3::Y * 2.0, 1.0, "mystery");
        assert_eq!(batch.draw_calls.len(), 2);
    }

    #[test]
    fn clear_resets_all_accumulated_state() {
        let mut batch = MeshBatch::new();
        batch.push_cube(Vec3::ZERO, 1.0, "bricks");
        batch.clear();
        assert!(batch.vertices.is_empty());
        assert!(batch.indices.is_empty());
        assert!(batch.draw_calls.is_empty());
        assert_eq!(batch.quad_count, 0);
    }

    #[test]
    fn push_mesh_offsets_indices() {
        let (coin_vertices, coin_indices) = coin_mesh(1.0, 0.1, 8);
        let mut batch = MeshBatch::new();
        batch.push_quad(Mat4::IDENTITY, "bricks");
        batch.push_mesh(&coin_vertices, &coin_indices, Mat4::IDENTITY, "coin");
        let max_index = *batch.indices.iter().max().unwrap();
        assert!((max_index as usize) < batch.vertices.len());
    }

    #[test]
    fn coin_mesh_is_well_formed() {
        let segments = 24;
        let (vertices, indices) = coin_mesh(1.0, 0.1, segments);
        assert_eq!(indices.len() as u32, segments * 3 * 2 + segments * 6);
        for index in &indices {
            assert!((*index as usize) < vertices.len());
        }
        for v in &vertices {
            assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn baked_cube_quads_keep_unit_normals() {
        let mut batch = MeshBatch::new();
        batch.push_cube(Vec3::new(4.0, 0.0, -2.0), 3.0, "bricks");
        for v in &batch.vertices {
            assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-4);
            assert!((Vec3::from(v.tangent).length() - 1.0).abs() < 1e-4);
        }
    }
}
