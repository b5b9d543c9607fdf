//! Asset loading/parsers.
//! OBJ meshes expanded per face corner, the synthetic ground grid and keyframe pose sets.

pub mod builtin;
pub mod error;
pub mod grid;
pub mod keyframes;
pub mod mesh;
pub mod obj;

pub use error::{KeyframeError, ObjError};
pub use grid::{GridMesh, build_grid};
pub use keyframes::KeyframeSet;
pub use mesh::{AttributeKind, ExpandedMesh, VertexStreams};
