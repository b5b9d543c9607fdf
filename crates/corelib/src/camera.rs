use crate::{Mat4, Vec3, scene::SceneParams, vec3};

/// Point every view is aimed at.
pub const LOOK_TARGET: Vec3 = vec3(0.0, 0.0, 4.0);
/// Extra translation applied after the look-at, in view space.
pub const VIEW_OFFSET: Vec3 = vec3(0.0, -0.5, 5.0);

/// Simple perspective camera (right-handed).
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_deg: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
}

impl Camera {
    /// Camera described by the scene parameters. The X coordinate is mirrored
    /// so that positive slider values move right in a right-handed frame.
    pub fn from_params(params: &SceneParams) -> Self {
        Self {
            eye: vec3(-params.camera.x, params.camera.y, params.camera.z),
            target: LOOK_TARGET,
            up: Vec3::Y,
            fov_y_deg: params.fov_y_deg,
            z_near: params.near,
            z_far: params.far,
            aspect: params.aspect,
        }
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up) * Mat4::from_translation(VIEW_OFFSET)
    }

    /// Projection with wgpu's `[0, 1]` depth range.
    #[inline]
    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_deg.to_radians(),
            self.aspect.max(1e-6),
            self.z_near,
            self.z_far,
        )
    }

    #[inline]
    pub fn proj_view(&self) -> Mat4 {
        self.proj() * self.view()
    }
}
