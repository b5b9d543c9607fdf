//! Errors raised while packing the shared vertex buffer.

use asset::AttributeKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("{entry}: {kind:?} stream has {found} values, expected {expected}")]
    StreamLength {
        entry: String,
        kind: AttributeKind,
        found: usize,
        expected: usize,
    },
}

pub type LayoutResult<T> = Result<T, LayoutError>;
