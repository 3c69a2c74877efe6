use super::core::Point3;
use super::mobius::MobiusMesh;

/// Indexed triangle mesh, ready for OBJ export or a GPU buffer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeomMesh {
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
    pub uvs: Option<Vec<[f64; 2]>>,
    pub normals: Option<Vec<[f64; 3]>>,
}

impl GeomMesh {
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices,
            uvs: None,
            normals: None,
        }
    }

    /// Triangulates a sampled strip, two triangles per grid cell.
    ///
    /// Vertices keep the grid's row-major order. UVs are the normalized
    /// `(column, row)` position and normals are area-weighted vertex normals.
    /// The grid is not wrapped at the seam, so the half-twist needs no
    /// special handling.
    #[must_use]
    pub fn from_mobius_mesh(mesh: &MobiusMesh) -> Self {
        let (rows, cols) = mesh.shape();
        let points: Vec<Point3> = mesh.points().collect();
        let indices = triangulate_grid(cols, rows);
        let normals = compute_smooth_normals(&points, &indices);

        let u_denom = cols.saturating_sub(1).max(1) as f64;
        let v_denom = rows.saturating_sub(1).max(1) as f64;
        let uvs = (0..rows)
            .flat_map(|i| (0..cols).map(move |j| [j as f64 / u_denom, i as f64 / v_denom]))
            .collect();

        Self {
            positions: points.iter().map(|p| p.to_array()).collect(),
            indices,
            uvs: Some(uvs),
            normals: Some(normals),
        }
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
    }

    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len() as u32;
        self.indices.iter().all(|&i| i < n)
    }

    #[must_use]
    pub fn has_triangle_indices(&self) -> bool {
        self.indices.len() % 3 == 0
    }

    #[must_use]
    pub fn has_valid_attribute_lengths(&self) -> bool {
        let n = self.positions.len();
        self.uvs.as_ref().is_none_or(|uvs| uvs.len() == n)
            && self.normals.as_ref().is_none_or(|normals| normals.len() == n)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.has_triangle_indices() {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if self.has_invalid_vertices() {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        if !self.has_valid_indices() {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        if !self.has_valid_attribute_lengths() {
            return Err("mesh attribute buffers do not match vertex count".to_string());
        }
        Ok(())
    }

    /// Sum of triangle areas.
    #[must_use]
    pub fn triangle_area(&self) -> f64 {
        self.indices
            .chunks_exact(3)
            .filter_map(|tri| {
                let a = Point3::from(*self.positions.get(tri[0] as usize)?);
                let b = Point3::from(*self.positions.get(tri[1] as usize)?);
                let c = Point3::from(*self.positions.get(tri[2] as usize)?);
                Some(0.5 * (b - a).cross(c - a).length())
            })
            .sum()
    }
}

/// Index buffer for a `u_count x v_count` vertex grid stored row by row
/// (`index = v * u_count + u`).
#[must_use]
pub fn triangulate_grid(u_count: usize, v_count: usize) -> Vec<u32> {
    if u_count < 2 || v_count < 2 {
        return Vec::new();
    }

    let quad_u = u_count - 1;
    let quad_v = v_count - 1;
    let mut indices = Vec::with_capacity(quad_u * quad_v * 6);

    let stride = u_count;
    for v in 0..quad_v {
        for u in 0..quad_u {
            let i0 = (v * stride + u) as u32;
            let i1 = (v * stride + u + 1) as u32;
            let i2 = ((v + 1) * stride + u) as u32;
            let i3 = ((v + 1) * stride + u + 1) as u32;

            indices.extend_from_slice(&[i0, i1, i2]);
            indices.extend_from_slice(&[i2, i1, i3]);
        }
    }

    indices
}

fn compute_smooth_normals(points: &[Point3], indices: &[u32]) -> Vec<[f64; 3]> {
    let mut normals = vec![[0.0, 0.0, 0.0]; points.len()];

    for tri in indices.chunks_exact(3) {
        let i0 = tri[0] as usize;
        let i1 = tri[1] as usize;
        let i2 = tri[2] as usize;

        let (Some(a), Some(b), Some(c)) = (points.get(i0), points.get(i1), points.get(i2)) else {
            continue;
        };

        let n = (*b - *a).cross(*c - *a);
        for i in [i0, i1, i2] {
            normals[i][0] += n.x;
            normals[i][1] += n.y;
            normals[i][2] += n.z;
        }
    }

    for n in &mut normals {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        if len.is_finite() && len > 0.0 {
            let inv = 1.0 / len;
            n[0] *= inv;
            n[1] *= inv;
            n[2] *= inv;
        } else {
            *n = [0.0, 0.0, 1.0];
        }
    }

    normals
}
