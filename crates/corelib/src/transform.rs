use crate::{Mat4, Vec3, vec3};

/// Matrix-stack style transform: every operation post-multiplies, so the
/// last call is the first one applied to object-space points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
        }
    }

    #[inline]
    pub const fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    #[inline]
    pub fn scale(self, x: f32, y: f32, z: f32) -> Self {
        self.then(Mat4::from_scale(vec3(x, y, z)))
    }

    #[inline]
    pub fn translate(self, x: f32, y: f32, z: f32) -> Self {
        self.then(Mat4::from_translation(vec3(x, y, z)))
    }

    /// Rotate by `degrees` around `axis`. A zero axis leaves the transform untouched.
    pub fn rotate(self, degrees: f32, axis: Vec3) -> Self {
        let axis = axis.normalize_or_zero();
        if axis == Vec3::ZERO {
            return self;
        }
        self.then(Mat4::from_axis_angle(axis, degrees.to_radians()))
    }

    /// In-place variant of [`Transform::rotate`], for per-frame animation.
    #[inline]
    pub fn rotate_mut(&mut self, degrees: f32, axis: Vec3) {
        *self = self.rotate(degrees, axis);
    }

    #[inline]
    pub fn concat(self, other: &Transform) -> Self {
        self.then(other.matrix)
    }

    /// Inverse transpose, used to carry normals through non-uniform scale.
    #[inline]
    pub fn inverse_transpose(&self) -> Mat4 {
        self.matrix.inverse().transpose()
    }

    #[inline]
    fn then(mut self, m: Mat4) -> Self {
        self.matrix *= m;
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
