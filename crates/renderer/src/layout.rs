//! Shared vertex buffer layout.
//!
//! Several meshes live in one buffer, grouped by attribute kind rather than
//! interleaved per vertex:
//!
//! ```text
//! [pos A][pos B][pos grid] [nrm A][nrm B][nrm grid] [uv A][uv B][uv grid]
//! ```
//!
//! Every span starts at `4 * (number of f32 before it)`, so one attribute
//! binding per kind plus a first-vertex offset addresses any mesh. That only
//! holds while every entry contributes `vertices * components` values to every
//! packed kind: line entries without texcoords get zero-filled ones, any other
//! length mismatch fails the pack.

use std::ops::Range;

use asset::{AttributeKind, ExpandedMesh, GridMesh, KeyframeSet, VertexStreams};

use crate::{
    draw::{DrawRange, draw_ranges},
    error::{LayoutError, LayoutResult},
};

/// Size in bytes of one packed element component.
pub const FLOAT_SIZE: u64 = std::mem::size_of::<f32>() as u64;

/// Index of an entry inside a [`MeshSet`].
pub type EntryId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Triangles,
    Lines,
}

/// A named mesh borrowed into a set.
pub struct MeshEntry<'a> {
    pub name: String,
    pub primitive: Primitive,
    streams: &'a dyn VertexStreams,
}

impl MeshEntry<'_> {
    #[inline]
    pub fn streams(&self) -> &dyn VertexStreams {
        self.streams
    }
}

/// Consecutive entries holding the poses of one animated object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyframeGroup {
    pub name: String,
    pub first_entry: EntryId,
    pub len: usize,
}

impl KeyframeGroup {
    /// Entry holding pose `frame`, if in range.
    #[inline]
    pub fn entry(&self, frame: usize) -> Option<EntryId> {
        (frame < self.len).then(|| self.first_entry + frame)
    }
}

/// Describes which meshes share a buffer and which streams are packed.
#[derive(Default)]
pub struct MeshSet<'a> {
    entries: Vec<MeshEntry<'a>>,
    groups: Vec<KeyframeGroup>,
    texcoords: bool,
}

impl<'a> MeshSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also pack texture coordinates after the normals.
    pub fn with_texcoords(mut self, enabled: bool) -> Self {
        self.texcoords = enabled;
        self
    }

    pub fn push(
        &mut self,
        name: impl Into<String>,
        primitive: Primitive,
        streams: &'a dyn VertexStreams,
    ) -> EntryId {
        let id = self.entries.len();
        self.entries.push(MeshEntry {
            name: name.into(),
            primitive,
            streams,
        });
        id
    }

    pub fn push_mesh(&mut self, name: impl Into<String>, mesh: &'a ExpandedMesh) -> EntryId {
        self.push(name, Primitive::Triangles, mesh)
    }

    pub fn push_grid(&mut self, name: impl Into<String>, grid: &'a GridMesh) -> EntryId {
        self.push(name, Primitive::Lines, grid)
    }

    /// Add every pose of `set` as its own entry (`name[0]`, `name[1]`, ...)
    /// and return the index of the new group.
    pub fn push_keyframes(&mut self, name: impl Into<String>, set: &'a KeyframeSet) -> usize {
        let name = name.into();
        let first_entry = self.entries.len();
        for (i, pose) in set.frames().iter().enumerate() {
            self.push_mesh(format!("{name}[{i}]"), pose);
        }
        self.groups.push(KeyframeGroup {
            name,
            first_entry,
            len: set.len(),
        });
        self.groups.len() - 1
    }

    pub fn entries(&self) -> &[MeshEntry<'a>] {
        &self.entries
    }

    pub fn groups(&self) -> &[KeyframeGroup] {
        &self.groups
    }

    /// Attribute kinds packed into the buffer, in packing order.
    pub fn kinds(&self) -> impl Iterator<Item = AttributeKind> + '_ {
        AttributeKind::ALL
            .into_iter()
            .filter(|&kind| kind != AttributeKind::TexCoord || self.texcoords)
    }

    /// Concatenate all streams and record where each span landed.
    pub fn pack(&self) -> LayoutResult<PackedBuffer> {
        self.check_streams()?;

        let total: usize = self
            .kinds()
            .map(|kind| {
                self.entries
                    .iter()
                    .map(|e| e.streams.vertex_count() * kind.components())
                    .sum::<usize>()
            })
            .sum();
        let mut data: Vec<f32> = Vec::with_capacity(total);
        let mut spans = Vec::with_capacity(self.entries.len() * 3);

        for kind in self.kinds() {
            for (entry, mesh) in self.entries.iter().enumerate() {
                let stream = mesh.streams.stream(kind);
                let element_count = mesh.streams.vertex_count() * kind.components();
                spans.push(AttributeSpan {
                    entry,
                    kind,
                    byte_offset: data.len() as u64 * FLOAT_SIZE,
                    element_count,
                });
                if stream.is_empty() {
                    data.resize(data.len() + element_count, 0.0);
                } else {
                    data.extend_from_slice(stream);
                }
            }
        }

        let plan = LayoutPlan { spans };
        log::info!(
            "Packed {} meshes into {} bytes ({} spans)",
            self.entries.len(),
            plan.byte_len(),
            plan.spans.len()
        );
        for span in &plan.spans {
            log::debug!(
                "  {:<16} {:?}: offset={} elements={}",
                self.entries[span.entry].name,
                span.kind,
                span.byte_offset,
                span.element_count
            );
        }

        Ok(PackedBuffer {
            data,
            plan,
            draws: draw_ranges(&self.entries),
            groups: self.groups.clone(),
        })
    }

    /// Streams of one entry must describe the same vertices, otherwise a shared
    /// first-vertex offset reads another mesh's data. Missing texcoords are
    /// allowed for line entries, which are never textured.
    fn check_streams(&self) -> LayoutResult<()> {
        for e in &self.entries {
            let n = e.streams.vertex_count();
            for kind in self.kinds() {
                let found = e.streams.stream(kind).len();
                let expected = n * kind.components();
                let padded = found == 0
                    && kind == AttributeKind::TexCoord
                    && e.primitive == Primitive::Lines;
                if padded {
                    log::debug!("{}: zero-filling {} texcoord values", e.name, expected);
                } else if found != expected {
                    return Err(LayoutError::StreamLength {
                        entry: e.name.clone(),
                        kind,
                        found,
                        expected,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Where one attribute stream of one entry lives in the shared buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeSpan {
    pub entry: EntryId,
    pub kind: AttributeKind,
    pub byte_offset: u64,
    /// Number of `f32` values (not vertices).
    pub element_count: usize,
}

impl AttributeSpan {
    #[inline]
    pub fn byte_len(&self) -> u64 {
        self.element_count as u64 * FLOAT_SIZE
    }

    #[inline]
    pub fn byte_range(&self) -> Range<u64> {
        self.byte_offset..self.byte_offset + self.byte_len()
    }
}

/// Ordered spans: all positions, then all normals, then all texcoords.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutPlan {
    spans: Vec<AttributeSpan>,
}

impl LayoutPlan {
    pub fn spans(&self) -> &[AttributeSpan] {
        &self.spans
    }

    pub fn span(&self, entry: EntryId, kind: AttributeKind) -> Option<&AttributeSpan> {
        self.spans
            .iter()
            .find(|s| s.entry == entry && s.kind == kind)
    }

    /// Byte range covering every span of `kind`, i.e. what one vertex
    /// binding for that attribute should see. `None` if the kind is not packed.
    pub fn stream_range(&self, kind: AttributeKind) -> Option<Range<u64>> {
        let mut of_kind = self.spans.iter().filter(|s| s.kind == kind);
        let first = of_kind.next()?;
        let end = of_kind.last().unwrap_or(first).byte_range().end;
        Some(first.byte_offset..end)
    }

    pub fn byte_len(&self) -> u64 {
        self.spans.last().map_or(0, |s| s.byte_range().end)
    }
}

/// Result of [`MeshSet::pack`]: upload-ready data plus everything needed to
/// bind and draw it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedBuffer {
    pub data: Vec<f32>,
    pub plan: LayoutPlan,
    pub draws: Vec<DrawRange>,
    pub groups: Vec<KeyframeGroup>,
}

impl PackedBuffer {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn draw(&self, entry: EntryId) -> Option<&DrawRange> {
        self.draws.get(entry)
    }

    pub fn group(&self, name: &str) -> Option<&KeyframeGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Draw range for pose `frame` of the named keyframe group.
    pub fn keyframe_draw(&self, group: &str, frame: usize) -> Option<&DrawRange> {
        let entry = self.group(group)?.entry(frame)?;
        self.draw(entry)
    }
}
