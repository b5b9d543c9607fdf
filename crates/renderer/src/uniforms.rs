//! Uniform blocks for the Phong shader (16-byte aligned, std140-compatible).

use bytemuck::{Pod, Zeroable};
use corelib::{
    Mat4,
    camera::Camera,
    scene::{Material, ObjectId, Scene, SceneParams},
    vec3,
};

/// Per-frame data: camera, projection and light position.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub camera: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// World-space light position, `w = 1`.
    pub light: [f32; 4],
}

impl FrameUniforms {
    pub fn new(params: &SceneParams) -> Self {
        let camera = Camera::from_params(params);
        // X mirrored like the camera eye, for a right-handed frame.
        let light = vec3(-params.light.x, params.light.y, params.light.z);
        Self {
            camera: camera.view().to_cols_array_2d(),
            projection: camera.proj().to_cols_array_2d(),
            light: light.extend(1.0).to_array(),
        }
    }
}

/// Per-object transforms. `inverse_transpose` carries normals to world space.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub world: [[f32; 4]; 4],
    pub inverse_transpose: [[f32; 4]; 4],
}

impl ObjectUniforms {
    pub fn from_matrices(model: Mat4, world: Mat4) -> Self {
        let inverse_transpose = (world * model).inverse().transpose();
        Self {
            model: model.to_cols_array_2d(),
            world: world.to_cols_array_2d(),
            inverse_transpose: inverse_transpose.to_cols_array_2d(),
        }
    }

    /// Uniforms for a scene object, with its world transform resolved
    /// through the parent chain.
    pub fn for_object(scene: &Scene, id: ObjectId) -> Option<Self> {
        let object = scene.get(id)?;
        let world = scene.world(id)?;
        Some(Self::from_matrices(object.model.matrix(), world.matrix()))
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialUniforms {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 3],
    pub specular_power: f32,
    /// Non-zero enables the lighting terms.
    pub lighting: u32,
    pub _pad: [u32; 3],
}

impl From<&Material> for MaterialUniforms {
    fn from(m: &Material) -> Self {
        Self {
            ambient: m.ambient.extend(1.0).to_array(),
            diffuse: m.diffuse.extend(1.0).to_array(),
            specular: m.specular.to_array(),
            specular_power: m.specular_power,
            lighting: m.lit as u32,
            _pad: [0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use corelib::{
        Vec3,
        scene::{Param, SceneObject},
        transform::Transform,
    };

    use super::*;

    #[test]
    fn block_sizes_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 144);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 192);
        assert_eq!(std::mem::size_of::<MaterialUniforms>(), 64);
    }

    #[test]
    fn light_x_is_mirrored() {
        let mut params = SceneParams::default();
        params.set(Param::LightX, 3.0).unwrap();
        let frame = FrameUniforms::new(&params);
        assert_eq!(frame.light, [-3.0, 0.0, -2.0, 1.0]);
    }

    #[test]
    fn identity_object_has_identity_inverse_transpose() {
        let u = ObjectUniforms::from_matrices(Mat4::IDENTITY, Mat4::IDENTITY);
        assert_eq!(u.inverse_transpose, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn object_uniforms_use_resolved_world() {
        let mut scene = Scene::default();
        let parent = scene
            .add(
                SceneObject::new("parent", 0)
                    .with_world(Transform::identity().translate(1.0, 0.0, 0.0)),
            )
            .unwrap();
        let child = scene
            .add(
                SceneObject::new("child", 1)
                    .with_world(Transform::identity().translate(0.0, 2.0, 0.0))
                    .with_model(Transform::identity().scale(2.0, 2.0, 2.0))
                    .with_parent(parent),
            )
            .unwrap();

        let u = ObjectUniforms::for_object(&scene, child).unwrap();
        let world = Mat4::from_cols_array_2d(&u.world);
        assert_eq!(world.transform_point3(Vec3::ZERO), vec3(1.0, 2.0, 0.0));
        assert_eq!(u.model[0][0], 2.0);
        assert!(ObjectUniforms::for_object(&scene, 7).is_none());
    }

    #[test]
    fn grid_material_is_unlit_green() {
        let m = MaterialUniforms::from(&Material::GRID);
        assert_eq!(m.lighting, 0);
        assert_eq!(m.ambient, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(MaterialUniforms::from(&Material::MESH).lighting, 1);
    }
}
