use bytemuck::{Pod, Zeroable};

/// Cube vertex: position, outward normal, texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct CubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl CubeVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x2  // uv
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const S: f32 = 0.5;

const fn v(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> CubeVertex {
    CubeVertex { position, normal, uv }
}

/// Unit cube centered on the origin, four vertices per face so each face
/// gets its own normal and full `[0, 1]` UV square.
pub(super) const CUBE_VERTICES: [CubeVertex; 24] = [
    // +Z
    v([-S, -S, S], [0.0, 0.0, 1.0], [0.0, 1.0]),
    v([S, -S, S], [0.0, 0.0, 1.0], [1.0, 1.0]),
    v([S, S, S], [0.0, 0.0, 1.0], [1.0, 0.0]),
    v([-S, S, S], [0.0, 0.0, 1.0], [0.0, 0.0]),
    // +X
    v([S, -S, S], [1.0, 0.0, 0.0], [0.0, 1.0]),
    v([S, -S, -S], [1.0, 0.0, 0.0], [1.0, 1.0]),
    v([S, S, -S], [1.0, 0.0, 0.0], [1.0, 0.0]),
    v([S, S, S], [1.0, 0.0, 0.0], [0.0, 0.0]),
    // -Z
    v([S, -S, -S], [0.0, 0.0, -1.0], [0.0, 1.0]),
    v([-S, -S, -S], [0.0, 0.0, -1.0], [1.0, 1.0]),
    v([-S, S, -S], [0.0, 0.0, -1.0], [1.0, 0.0]),
    v([S, S, -S], [0.0, 0.0, -1.0], [0.0, 0.0]),
    // -X
    v([-S, -S, -S], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    v([-S, -S, S], [-1.0, 0.0, 0.0], [1.0, 1.0]),
    v([-S, S, S], [-1.0, 0.0, 0.0], [1.0, 0.0]),
    v([-S, S, -S], [-1.0, 0.0, 0.0], [0.0, 0.0]),
    // +Y
    v([-S, S, S], [0.0, 1.0, 0.0], [0.0, 1.0]),
    v([S, S, S], [0.0, 1.0, 0.0], [1.0, 1.0]),
    v([S, S, -S], [0.0, 1.0, 0.0], [1.0, 0.0]),
    v([-S, S, -S], [0.0, 1.0, 0.0], [0.0, 0.0]),
    // -Y
    v([-S, -S, -S], [0.0, -1.0, 0.0], [0.0, 1.0]),
    v([S, -S, -S], [0.0, -1.0, 0.0], [1.0, 1.0]),
    v([S, -S, S], [0.0, -1.0, 0.0], [1.0, 0.0]),
    v([-S, -S, S], [0.0, -1.0, 0.0], [0.0, 0.0]),
];

/// Two counter-clockwise triangles per face.
pub(super) const CUBE_INDICES: [u16; 36] = {
    let mut out = [0u16; 36];
    let mut face = 0;
    while face < 6 {
        let b = (face * 4) as u16;
        let i = face * 6;
        out[i] = b;
        out[i + 1] = b + 1;
        out[i + 2] = b + 2;
        out[i + 3] = b + 2;
        out[i + 4] = b + 3;
        out[i + 5] = b;
        face += 1;
    }
    out
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn vec3(a: [f32; 3]) -> Vec3 {
        Vec3::new(a[0], a[1], a[2])
    }

    fn cross(a: Vec3, b: Vec3) -> Vec3 {
        Vec3::new(a.y * b.z - a.z * b.y, a.z * b.x - a.x * b.z, a.x * b.y - a.y * b.x)
    }

    #[test]
    fn triangles_wind_counter_clockwise_seen_from_outside() {
        for tri in CUBE_INDICES.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| CUBE_VERTICES[i as usize]);
            let n = cross(
                vec3(b.position) - vec3(a.position),
                vec3(c.position) - vec3(a.position),
            );
            assert!(n.dot(vec3(a.normal)) > 0.0, "triangle {tri:?} faces inward");
        }
    }

    #[test]
    fn normals_point_away_from_center() {
        for vert in CUBE_VERTICES {
            assert!(vec3(vert.position).dot(vec3(vert.normal)) > 0.0);
        }
    }

    #[test]
    fn indices_stay_in_range() {
        assert!(CUBE_INDICES.iter().all(|&i| (i as usize) < CUBE_VERTICES.len()));
    }
}
