//! Scene context: viewer parameters plus the objects drawn each frame.
//!
//! Everything the frame loop and UI read or write lives here and is passed
//! around by reference.

use std::{fmt, str::FromStr};

use crate::{
    Vec3,
    error::{CoreError, CoreResult},
    transform::Transform,
    vec3,
};

/// Object id (dense, index into the scene's object list).
pub type ObjectId = u32;

/// Adjustable viewer parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    LightX,
    LightY,
    LightZ,
    CameraX,
    CameraY,
    CameraZ,
    Near,
    Far,
    FovY,
    Aspect,
}

impl Param {
    pub const ALL: [Param; 10] = [
        Self::LightX,
        Self::LightY,
        Self::LightZ,
        Self::CameraX,
        Self::CameraY,
        Self::CameraZ,
        Self::Near,
        Self::Far,
        Self::FovY,
        Self::Aspect,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::LightX => "light-x",
            Self::LightY => "light-y",
            Self::LightZ => "light-z",
            Self::CameraX => "camera-x",
            Self::CameraY => "camera-y",
            Self::CameraZ => "camera-z",
            Self::Near => "near",
            Self::Far => "far",
            Self::FovY => "fovy",
            Self::Aspect => "aspect",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Param {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| CoreError::UnknownParam(s.to_owned()))
    }
}

/// Light and camera parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneParams {
    pub light: Vec3,
    pub camera: Vec3,
    pub near: f32,
    pub far: f32,
    /// Vertical field of view, degrees.
    pub fov_y_deg: f32,
    pub aspect: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            light: vec3(0.0, 0.0, -2.0),
            camera: vec3(0.0, 1.2, -3.0),
            near: 1.0,
            far: 200.0,
            fov_y_deg: 45.0,
            aspect: 1.0,
        }
    }
}

impl SceneParams {
    pub fn get(&self, param: Param) -> f32 {
        match param {
            Param::LightX => self.light.x,
            Param::LightY => self.light.y,
            Param::LightZ => self.light.z,
            Param::CameraX => self.camera.x,
            Param::CameraY => self.camera.y,
            Param::CameraZ => self.camera.z,
            Param::Near => self.near,
            Param::Far => self.far,
            Param::FovY => self.fov_y_deg,
            Param::Aspect => self.aspect,
        }
    }

    /// Set one parameter. Projection parameters are checked so the camera
    /// always yields a finite, non-degenerate projection.
    pub fn set(&mut self, param: Param, value: f32) -> CoreResult<()> {
        let invalid = |reason| CoreError::InvalidParam {
            param,
            value,
            reason,
        };
        if !value.is_finite() {
            return Err(invalid("must be finite"));
        }
        match param {
            Param::LightX => self.light.x = value,
            Param::LightY => self.light.y = value,
            Param::LightZ => self.light.z = value,
            Param::CameraX => self.camera.x = value,
            Param::CameraY => self.camera.y = value,
            Param::CameraZ => self.camera.z = value,
            Param::Near if value <= 0.0 => return Err(invalid("must be positive")),
            Param::Near if value >= self.far => return Err(invalid("must be less than far")),
            Param::Near => self.near = value,
            Param::Far if value <= self.near => return Err(invalid("must be greater than near")),
            Param::Far => self.far = value,
            Param::FovY if value <= 0.0 || value >= 180.0 => {
                return Err(invalid("must be within (0, 180) degrees"));
            }
            Param::FovY => self.fov_y_deg = value,
            Param::Aspect if value <= 0.0 => return Err(invalid("must be positive")),
            Param::Aspect => self.aspect = value,
        }
        log::debug!("{param} = {value:.2}");
        Ok(())
    }
}

/// Surface response for the Phong shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub specular_power: f32,
    /// Unlit objects are drawn with the ambient colour only.
    pub lit: bool,
}

impl Material {
    /// Lit blue-ish default used for loaded meshes.
    pub const MESH: Material = Material {
        ambient: Vec3::ZERO,
        diffuse: vec3(0.1, 0.5, 0.8),
        specular: Vec3::ONE,
        specular_power: 64.0,
        lit: true,
    };

    /// Flat green used for the ground grid.
    pub const GRID: Material = Material {
        ambient: vec3(0.0, 1.0, 0.0),
        diffuse: Vec3::ZERO,
        specular: Vec3::ZERO,
        specular_power: 1.0,
        lit: false,
    };
}

impl Default for Material {
    fn default() -> Self {
        Self::MESH
    }
}

/// Constant rotation applied every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    pub degrees_per_ms: f32,
    pub axis: Vec3,
}

/// One drawable thing in the scene. Plain data: `draw` indexes the packed
/// buffer's draw list, transforms position it.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub draw: usize,
    pub model: Transform,
    /// World transform relative to the parent (or to the world if none).
    pub world: Transform,
    pub parent: Option<ObjectId>,
    pub spin: Option<Spin>,
    pub material: Material,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, draw: usize) -> Self {
        Self {
            name: name.into(),
            draw,
            model: Transform::identity(),
            world: Transform::identity(),
            parent: None,
            spin: None,
            material: Material::default(),
        }
    }

    pub fn with_model(mut self, model: Transform) -> Self {
        self.model = model;
        self
    }

    pub fn with_world(mut self, world: Transform) -> Self {
        self.world = world;
        self
    }

    pub fn with_parent(mut self, parent: ObjectId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_spin(mut self, degrees_per_ms: f32, axis: Vec3) -> Self {
        self.spin = Some(Spin {
            degrees_per_ms,
            axis,
        });
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub params: SceneParams,
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new(params: SceneParams) -> Self {
        Self {
            params,
            objects: Vec::new(),
        }
    }

    /// Add an object. A parent must already be in the scene, which keeps the
    /// hierarchy acyclic.
    pub fn add(&mut self, object: SceneObject) -> CoreResult<ObjectId> {
        let id = self.objects.len() as ObjectId;
        if let Some(parent) = object.parent {
            if parent >= id {
                return Err(CoreError::MissingParent(parent));
            }
        }
        self.objects.push(object);
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id as usize)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, o)| (i as ObjectId, o))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Apply every object's spin for a frame lasting `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: f32) {
        for object in &mut self.objects {
            if let Some(spin) = object.spin {
                object.world.rotate_mut(spin.degrees_per_ms * dt_ms, spin.axis);
            }
        }
    }

    /// Resolved world transform: the parent chain's world transforms, outermost first.
    pub fn world(&self, id: ObjectId) -> Option<Transform> {
        let object = self.get(id)?;
        match object.parent {
            Some(parent) => Some(self.world(parent)?.concat(&object.world)),
            None => Some(object.world),
        }
    }
}
