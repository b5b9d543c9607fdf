//! Keyframe sets: fixed sequences of mesh poses played back by index.

use std::path::Path;

use anyhow::{Context, Result};

use crate::{
    error::KeyframeError,
    mesh::{ExpandedMesh, VertexStreams},
    obj,
};

/// Ordered, non-empty set of poses sharing one vertex count.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeSet {
    frames: Vec<ExpandedMesh>,
}

impl KeyframeSet {
    /// Validate and wrap already-parsed poses.
    pub fn new(frames: Vec<ExpandedMesh>) -> Result<Self, KeyframeError> {
        let first = frames.first().ok_or(KeyframeError::Empty)?;
        let expected = first.vertex_count();
        if let Some((index, pose)) = frames
            .iter()
            .enumerate()
            .find(|(_, pose)| pose.vertex_count() != expected)
        {
            return Err(KeyframeError::VertexCountMismatch {
                index,
                expected,
                found: pose.vertex_count(),
            });
        }
        Ok(Self { frames })
    }

    /// Parse every pose from OBJ text, in order.
    pub fn parse_all<'a, I>(sources: I) -> Result<Self, KeyframeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let frames = sources
            .into_iter()
            .enumerate()
            .map(|(index, src)| {
                obj::parse(src).map_err(|source| KeyframeError::Pose { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(frames)
    }

    /// Load every pose from OBJ files, in order.
    pub fn load_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let frames = paths
            .iter()
            .map(|path| obj::load_obj_from_path(path))
            .collect::<Result<Vec<_>>>()?;
        let set = Self::new(frames).context("Invalid keyframe set")?;
        log::info!(
            "Loaded keyframe set: {} poses, {} vertices each",
            set.len(),
            set.vertices_per_frame()
        );
        Ok(set)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Companion to [`KeyframeSet::len`]; construction rejects empty sets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn frame(&self, index: usize) -> Option<&ExpandedMesh> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[ExpandedMesh] {
        &self.frames
    }

    pub fn vertices_per_frame(&self) -> usize {
        self.frames[0].vertex_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(offset: f32) -> String {
        format!(
            "v {o} 0 0\nv 1 {o} 0\nv 0 1 {o}\nvn 0 0 1\nvt 0 0\nf 1/1/1 2/1/1 3/1/1\n",
            o = offset
        )
    }

    #[test]
    fn parses_poses_in_order() {
        let sources = [pose(0.0), pose(0.5), pose(1.0)];
        let set = KeyframeSet::parse_all(sources.iter().map(String::as_str)).unwrap();
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert_eq!(set.vertices_per_frame(), 3);
        assert_eq!(set.frame(1).unwrap().positions[0], 0.5);
        assert!(set.frame(3).is_none());
    }

    #[test]
    fn empty_set_is_rejected() {
        assert!(matches!(
            KeyframeSet::parse_all(std::iter::empty()),
            Err(KeyframeError::Empty)
        ));
    }

    #[test]
    fn vertex_count_mismatch_is_rejected() {
        let a = pose(0.0);
        let b = format!("{a}f 1/1/1 3/1/1 2/1/1\n");
        let err = KeyframeSet::parse_all([a.as_str(), b.as_str()]).unwrap_err();
        assert!(matches!(
            err,
            KeyframeError::VertexCountMismatch {
                index: 1,
                expected: 3,
                found: 6
            }
        ));
    }

    #[test]
    fn bad_pose_reports_its_index() {
        let good = pose(0.0);
        let err = KeyframeSet::parse_all([good.as_str(), "v 1 2\n"]).unwrap_err();
        assert!(matches!(err, KeyframeError::Pose { index: 1, .. }));
    }
}
