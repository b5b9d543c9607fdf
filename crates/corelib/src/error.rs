//! Core shared errors (renderer-agnostic).

use thiserror::Error;

use crate::scene::{ObjectId, Param};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("keyframe playback needs at least one frame")]
    EmptyPlayback,
    #[error("unknown scene parameter '{0}'")]
    UnknownParam(String),
    #[error("invalid value {value} for {param}: {reason}")]
    InvalidParam {
        param: Param,
        value: f32,
        reason: &'static str,
    },
    #[error("parent object {0} does not exist")]
    MissingParent(ObjectId),
}

pub type CoreResult<T> = Result<T, CoreError>;
