//! Non-indexed draw ranges inside the shared buffer.

use std::ops::Range;

use crate::layout::{EntryId, MeshEntry, Primitive};

/// Vertices to draw for one entry. Because every attribute group lists the
/// entries in the same order, one first-vertex index is valid for all streams.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawRange {
    pub entry: EntryId,
    pub name: String,
    pub primitive: Primitive,
    pub first_vertex: u32,
    pub vertex_count: u32,
}

impl DrawRange {
    #[inline]
    pub fn vertices(&self) -> Range<u32> {
        self.first_vertex..self.first_vertex + self.vertex_count
    }

    /// Number of triangles or line segments in the range.
    pub fn primitive_count(&self) -> u32 {
        match self.primitive {
            Primitive::Triangles => self.vertex_count / 3,
            Primitive::Lines => self.vertex_count / 2,
        }
    }

    #[inline]
    pub fn topology(&self) -> wgpu::PrimitiveTopology {
        match self.primitive {
            Primitive::Triangles => wgpu::PrimitiveTopology::TriangleList,
            Primitive::Lines => wgpu::PrimitiveTopology::LineList,
        }
    }
}

pub(crate) fn draw_ranges(entries: &[MeshEntry<'_>]) -> Vec<DrawRange> {
    let mut first_vertex = 0u32;
    entries
        .iter()
        .enumerate()
        .map(|(entry, e)| {
            let vertex_count = e.streams().vertex_count() as u32;
            let range = DrawRange {
                entry,
                name: e.name.clone(),
                primitive: e.primitive,
                first_vertex,
                vertex_count,
            };
            first_vertex += vertex_count;
            range
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use asset::ExpandedMesh;

    use crate::layout::MeshSet;

    use super::*;

    #[test]
    fn first_vertex_accumulates() {
        let a = asset::obj::parse(asset::builtin::CUBE_OBJ).unwrap();
        let empty = ExpandedMesh::default();
        let grid = asset::build_grid(1.0, 1.0);

        let mut set = MeshSet::new();
        set.push_mesh("cube", &a);
        set.push_mesh("empty", &empty);
        set.push_grid("grid", &grid);
        let draws = set.pack().unwrap().draws;

        assert_eq!(draws[0].vertices(), 0..36);
        assert_eq!(draws[0].primitive_count(), 12);
        assert_eq!(draws[1].vertices(), 36..36);
        assert_eq!(draws[2].first_vertex, 36);
        assert_eq!(draws[2].vertex_count, 800);
        assert_eq!(draws[2].primitive_count(), 400);
        assert_eq!(draws[2].topology(), wgpu::PrimitiveTopology::LineList);
    }
}
