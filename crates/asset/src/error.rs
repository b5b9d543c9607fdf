//! Typed errors for the asset loaders.

use thiserror::Error;

use crate::mesh::AttributeKind;

/// Fail-fast OBJ parse errors. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("line {line}: `{directive}` expects {expected} values, found {found}")]
    FieldCount {
        line: usize,
        directive: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid number '{token}' in `{directive}`")]
    InvalidNumber {
        line: usize,
        directive: &'static str,
        token: String,
    },
    #[error("line {line}: `f` has {found} vertex references, only triangles are supported")]
    NotTriangle { line: usize, found: usize },
    #[error("line {line}: face reference '{token}' must be `position/texcoord/normal`")]
    IncompleteReference { line: usize, token: String },
    #[error("line {line}: invalid face index '{token}' (indices are positive and 1-based)")]
    InvalidIndex { line: usize, token: String },
    #[error("line {line}: {kind:?} index {index} out of range ({len} defined)")]
    IndexOutOfRange {
        line: usize,
        kind: AttributeKind,
        index: usize,
        len: usize,
    },
    #[error("failed to read OBJ input at line {line}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Errors assembling a set of keyframe poses.
#[derive(Debug, Error)]
pub enum KeyframeError {
    #[error("keyframe set is empty")]
    Empty,
    #[error("pose {index} failed to parse")]
    Pose {
        index: usize,
        #[source]
        source: ObjError,
    },
    #[error("pose {index} has {found} vertices, expected {expected}")]
    VertexCountMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}
