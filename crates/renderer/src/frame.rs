//! CPU side of one frame: everything a render pass needs, resolved from the
//! scene and the packed buffer. No GPU objects involved.

use corelib::scene::{ObjectId, Scene};

use crate::{
    draw::DrawRange,
    layout::PackedBuffer,
    uniforms::{FrameUniforms, MaterialUniforms, ObjectUniforms},
};

#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub object: ObjectId,
    pub range: DrawRange,
    pub transforms: ObjectUniforms,
    pub material: MaterialUniforms,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameData {
    pub uniforms: FrameUniforms,
    pub calls: Vec<DrawCall>,
}

impl FrameData {
    pub fn vertex_total(&self) -> u32 {
        self.calls.iter().map(|c| c.range.vertex_count).sum()
    }
}

/// Resolve draw calls for every scene object, in scene order. Objects whose
/// draw index is not in the buffer are skipped with a warning, empty ranges
/// are skipped silently.
pub fn prepare_frame(scene: &Scene, packed: &PackedBuffer) -> FrameData {
    let mut calls = Vec::with_capacity(scene.len());
    for (id, object) in scene.iter() {
        let Some(range) = packed.draw(object.draw) else {
            log::warn!(
                "{}: draw index {} is not in the packed buffer",
                object.name,
                object.draw
            );
            continue;
        };
        if range.vertex_count == 0 {
            continue;
        }
        let Some(transforms) = ObjectUniforms::for_object(scene, id) else {
            continue;
        };
        calls.push(DrawCall {
            object: id,
            range: range.clone(),
            transforms,
            material: MaterialUniforms::from(&object.material),
        });
    }

    FrameData {
        uniforms: FrameUniforms::new(&scene.params),
        calls,
    }
}

#[cfg(test)]
mod tests {
    use asset::ExpandedMesh;
    use corelib::scene::{Material, SceneObject};

    use crate::layout::{MeshSet, Primitive};

    use super::*;

    #[test]
    fn calls_follow_scene_order_and_skip_missing() {
        let a = ExpandedMesh::new(vec![0.0; 9], vec![0.0; 9], vec![0.0; 6]);
        let empty = ExpandedMesh::default();
        let grid = asset::build_grid(100.0, 100.0);
        let mut set = MeshSet::new();
        set.push_mesh("a", &a);
        set.push_mesh("empty", &empty);
        set.push_grid("grid", &grid);
        let packed = set.pack().unwrap();

        let mut scene = Scene::default();
        scene
            .add(SceneObject::new("grid", 2).with_material(Material::GRID))
            .unwrap();
        scene.add(SceneObject::new("a", 0)).unwrap();
        scene.add(SceneObject::new("empty", 1)).unwrap();
        scene.add(SceneObject::new("ghost", 9)).unwrap();

        let frame = prepare_frame(&scene, &packed);
        assert_eq!(frame.calls.len(), 2);
        assert_eq!(frame.calls[0].range.primitive, Primitive::Lines);
        assert_eq!(frame.calls[0].material.lighting, 0);
        assert_eq!(frame.calls[1].range.first_vertex, 0);
        assert_eq!(frame.vertex_total(), 3 + 8);
    }
}
