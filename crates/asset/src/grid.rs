//! Synthetic ground grid, drawn as a line list.

use crate::mesh::VertexStreams;

/// Half extent of the grid along X.
pub const GRID_X_RANGE: f32 = 100.0;
/// Half extent of the grid along Z.
pub const GRID_Z_RANGE: f32 = 100.0;

/// Line-list grid on the XZ plane. Every segment contributes two vertices.
///
/// Normals are placeholder up-vectors so the grid can share normal
/// streams with the lit triangle meshes in one buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
}

impl GridMesh {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.vertex_count() / 2
    }
}

impl VertexStreams for GridMesh {
    fn positions(&self) -> &[f32] {
        &self.positions
    }

    fn normals(&self) -> &[f32] {
        &self.normals
    }
}

/// Build a grid covering `±GRID_X_RANGE × ±GRID_Z_RANGE`.
///
/// Rows run along Z and are spaced by `row_spacing` on X; columns run along X
/// and are spaced by `col_spacing` on Z. Spacings below 1 or non-finite are
/// rejected: the error is logged and an empty grid is returned.
pub fn build_grid(row_spacing: f32, col_spacing: f32) -> GridMesh {
    if !(row_spacing >= 1.0 && col_spacing >= 1.0) {
        log::error!(
            "Cannot have grid spacing less than 1 (rows={row_spacing}, columns={col_spacing})"
        );
        return GridMesh::default();
    }
    if !(row_spacing.is_finite() && col_spacing.is_finite()) {
        log::error!("Grid spacing must be finite (rows={row_spacing}, columns={col_spacing})");
        return GridMesh::default();
    }

    let mut positions = Vec::new();

    for x in steps(-GRID_X_RANGE, GRID_X_RANGE, row_spacing) {
        positions.extend_from_slice(&[x, 0.0, -GRID_Z_RANGE]);
        positions.extend_from_slice(&[x, 0.0, GRID_Z_RANGE]);
    }

    for z in steps(-GRID_Z_RANGE, GRID_Z_RANGE, col_spacing) {
        positions.extend_from_slice(&[-GRID_X_RANGE, 0.0, z]);
        positions.extend_from_slice(&[GRID_X_RANGE, 0.0, z]);
    }

    let vertices = positions.len() / 3;
    let normals = [0.0, 1.0, 0.0].repeat(vertices);

    log::debug!(
        "Built grid: {} lines, {} vertices",
        vertices / 2,
        vertices
    );

    GridMesh { positions, normals }
}

/// `start, start + step, ...` up to but excluding `end`, without accumulating drift.
fn steps(start: f32, end: f32, step: f32) -> impl Iterator<Item = f32> {
    (0u32..)
        .map(move |i| start + i as f32 * step)
        .take_while(move |&v| v < end)
}
