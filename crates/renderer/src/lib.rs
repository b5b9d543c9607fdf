//! Renderer-side data plumbing: one shared vertex buffer for many meshes.
//!
//! `layout` packs meshes grouped by attribute kind and records byte offsets,
//! `draw` derives the per-mesh vertex ranges, `vertex` maps both onto wgpu
//! vertex slots and `uniforms`/`frame` prepare the Phong shader inputs.

pub mod draw;
pub mod error;
pub mod frame;
pub mod layout;
pub mod uniforms;
pub mod vertex;

pub use draw::DrawRange;
pub use error::{LayoutError, LayoutResult};
pub use frame::{DrawCall, FrameData, prepare_frame};
pub use layout::{AttributeSpan, EntryId, KeyframeGroup, LayoutPlan, MeshSet, PackedBuffer, Primitive};
