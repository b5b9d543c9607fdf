//! Core types: math re-exports, transform chains, camera, scene context, keyframe playback.

pub use glam::{Mat4, Vec3, vec3};

pub mod camera;
pub mod error;
pub mod playback;
pub mod scene;
pub mod transform;

pub use error::{CoreError, CoreResult};
