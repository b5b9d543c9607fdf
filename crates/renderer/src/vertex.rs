//! wgpu vertex bindings for a packed buffer: one slot per attribute kind,
//! each slot seeing only its kind's group of spans.

use std::ops::Range;

use asset::AttributeKind;
use wgpu::{
    Buffer, BufferUsages, Device, RenderPass, VertexBufferLayout, VertexStepMode, util::DeviceExt,
};

use crate::layout::{LayoutPlan, PackedBuffer};

pub const POSITION_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: 3 * crate::layout::FLOAT_SIZE,
    step_mode: VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
};

pub const NORMAL_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: 3 * crate::layout::FLOAT_SIZE,
    step_mode: VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![1 => Float32x3],
};

pub const TEXCOORD_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: 2 * crate::layout::FLOAT_SIZE,
    step_mode: VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![2 => Float32x2],
};

#[inline]
pub fn layout_for(kind: AttributeKind) -> VertexBufferLayout<'static> {
    match kind {
        AttributeKind::Position => POSITION_LAYOUT,
        AttributeKind::Normal => NORMAL_LAYOUT,
        AttributeKind::TexCoord => TEXCOORD_LAYOUT,
    }
}

/// One vertex buffer slot bound to a byte range of the shared buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamBinding {
    pub slot: u32,
    pub kind: AttributeKind,
    pub byte_range: Range<u64>,
}

/// Slots for every non-empty attribute group in the plan, in packing order.
pub fn stream_bindings(plan: &LayoutPlan) -> Vec<StreamBinding> {
    let mut bindings = Vec::new();
    for kind in AttributeKind::ALL {
        let Some(byte_range) = plan.stream_range(kind) else {
            continue;
        };
        if byte_range.is_empty() {
            log::warn!("{kind:?} stream is empty; not binding it");
            continue;
        }
        bindings.push(StreamBinding {
            slot: bindings.len() as u32,
            kind,
            byte_range,
        });
    }
    bindings
}

/// Pipeline vertex layouts matching [`stream_bindings`] slot for slot.
pub fn vertex_buffer_layouts(bindings: &[StreamBinding]) -> Vec<VertexBufferLayout<'static>> {
    bindings.iter().map(|b| layout_for(b.kind)).collect()
}

/// Upload the packed data as a single vertex buffer.
pub fn create_vertex_buffer(device: &Device, packed: &PackedBuffer, label: &str) -> Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: packed.as_bytes(),
        usage: BufferUsages::VERTEX,
    })
}

/// Bind every stream of `buffer` to its slot.
pub fn bind_streams(pass: &mut RenderPass<'_>, buffer: &Buffer, bindings: &[StreamBinding]) {
    for b in bindings {
        pass.set_vertex_buffer(b.slot, buffer.slice(b.byte_range.clone()));
    }
}

#[cfg(test)]
mod tests {
    use asset::{ExpandedMesh, VertexStreams};

    use crate::layout::MeshSet;

    use super::*;

    #[test]
    fn slots_follow_packing_order() {
        let a = ExpandedMesh::new(vec![0.0; 9], vec![0.0; 9], vec![0.0; 6]);
        let mut set = MeshSet::new().with_texcoords(true);
        set.push_mesh("a", &a);
        let packed = set.pack().unwrap();

        let bindings = stream_bindings(&packed.plan);
        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings[0].byte_range, 0..36);
        assert_eq!(bindings[1].byte_range, 36..72);
        assert_eq!(bindings[2].byte_range, 72..96);
        assert_eq!(bindings[2].kind, AttributeKind::TexCoord);

        let layouts = vertex_buffer_layouts(&bindings);
        assert_eq!(layouts[1].array_stride, 12);
        assert_eq!(layouts[2].array_stride, 8);
        assert_eq!(layouts[2].attributes[0].shader_location, 2);
    }

    #[test]
    fn empty_streams_are_skipped() {
        let empty = ExpandedMesh::default();
        let mut set = MeshSet::new().with_texcoords(true);
        set.push_mesh("empty", &empty);
        assert!(stream_bindings(&set.pack().unwrap().plan).is_empty());
    }

    #[test]
    fn grid_alone_binds_padded_texcoords() {
        let grid = asset::build_grid(100.0, 100.0);
        let mut set = MeshSet::new().with_texcoords(true);
        set.push_grid("grid", &grid);
        let bindings = stream_bindings(&set.pack().unwrap().plan);
        assert_eq!(bindings.len(), 3);
        let uv = &bindings[2];
        assert_eq!(uv.kind, AttributeKind::TexCoord);
        assert_eq!(
            uv.byte_range.end - uv.byte_range.start,
            grid.vertex_count() as u64 * 8
        );
    }
}
