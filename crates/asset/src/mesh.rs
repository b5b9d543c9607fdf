//! CPU-side mesh representation produced by the loaders.

/// Per-vertex attribute stream kinds, in the order they are packed into a shared buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Position,
    Normal,
    TexCoord,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 3] = [Self::Position, Self::Normal, Self::TexCoord];

    /// Number of `f32` components making up one element of this attribute.
    #[inline]
    pub const fn components(self) -> usize {
        match self {
            Self::Position | Self::Normal => 3,
            Self::TexCoord => 2,
        }
    }
}

/// Read access to flat, non-interleaved attribute streams.
///
/// Implemented by every mesh that can live in a shared vertex buffer.
/// Streams that a mesh does not carry return an empty slice.
pub trait VertexStreams {
    fn positions(&self) -> &[f32];
    fn normals(&self) -> &[f32];

    fn texcoords(&self) -> &[f32] {
        &[]
    }

    fn stream(&self, kind: AttributeKind) -> &[f32] {
        match kind {
            AttributeKind::Position => self.positions(),
            AttributeKind::Normal => self.normals(),
            AttributeKind::TexCoord => self.texcoords(),
        }
    }

    #[inline]
    fn vertex_count(&self) -> usize {
        self.positions().len() / AttributeKind::Position.components()
    }
}

/// Face-expanded triangle mesh: every face corner is stored explicitly,
/// shared corners are repeated. Ready for non-indexed drawing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpandedMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub texcoords: Vec<f32>,
}

impl ExpandedMesh {
    pub fn new(positions: Vec<f32>, normals: Vec<f32>, texcoords: Vec<f32>) -> Self {
        Self {
            positions,
            normals,
            texcoords,
        }
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.vertex_count() / 3
    }

    /// Returns `true` if all three streams describe the same number of vertices
    /// and that number is a whole count of triangles.
    pub fn is_consistent(&self) -> bool {
        let n = self.vertex_count();
        self.positions.len() % 3 == 0
            && self.normals.len() == n * AttributeKind::Normal.components()
            && self.texcoords.len() == n * AttributeKind::TexCoord.components()
            && n % 3 == 0
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl VertexStreams for ExpandedMesh {
    fn positions(&self) -> &[f32] {
        &self.positions
    }

    fn normals(&self) -> &[f32] {
        &self.normals
    }

    fn texcoords(&self) -> &[f32] {
        &self.texcoords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mesh_is_consistent() {
        let mesh = ExpandedMesh::default();
        assert!(mesh.is_consistent());
        assert_eq!(mesh.vertex_count(), 0);
    }

    #[test]
    fn mismatched_streams_are_inconsistent() {
        let mesh = ExpandedMesh::new(vec![0.0; 9], vec![0.0; 9], vec![0.0; 4]);
        assert!(!mesh.is_consistent());
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn stream_by_kind() {
        let mesh = ExpandedMesh::new(vec![1.0; 9], vec![2.0; 9], vec![3.0; 6]);
        assert_eq!(mesh.stream(AttributeKind::TexCoord).len(), 6);
        assert_eq!(mesh.stream(AttributeKind::Normal)[0], 2.0);
    }
}
