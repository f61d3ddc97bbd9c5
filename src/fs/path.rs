use crate::arena::{self, NodeId, NodeKind};

use super::{Error, Filesystem, Result};

/// The path separator.
pub const SEPARATOR: char = '/';

/// How many segments a path can carry. Segments past the cap are ignored.
pub const SEGMENTS_MAX: usize = 16;

/// Splits `path` on the separator. Consecutive separators collapse, each
/// segment is clamped to the name-length bound, and at most
/// [`SEGMENTS_MAX`] segments are kept.
pub(crate) fn split(path: &str) -> Vec<&str> {
    path.split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .take(SEGMENTS_MAX)
        .map(arena::clamp_name)
        .collect()
}

impl Filesystem {
    /// Resolves `path` against `base`.
    ///
    /// An empty path resolves to `base` unchanged; a leading separator
    /// restarts at the root regardless of `base`. `.` is a no-op and `..`
    /// moves to the parent, staying put at the root. Descending through a
    /// file fails with [`Error::NotFound`], since a file has no children.
    pub fn resolve(&self, path: &str, base: NodeId) -> Result<NodeId> {
        self.walk(&split(path), self.resolve_start(path, base))
    }

    /// Resolves everything but the last segment of `path`, returning the
    /// parent directory and the final name. Every intermediate segment must
    /// already exist and be a directory; the final segment must be a plain
    /// name, so `.`, `..` and the empty path are rejected.
    pub(crate) fn resolve_parent<'p>(
        &self,
        path: &'p str,
        base: NodeId,
    ) -> Result<(NodeId, &'p str)> {
        let segments = split(path);
        let Some((&name, intermediates)) = segments.split_last() else {
            return Err(Error::InvalidPath);
        };
        if name == "." || name == ".." {
            return Err(Error::InvalidPath);
        }

        let parent = self.walk(intermediates, self.resolve_start(path, base))?;
        if self.arena.node(parent).kind() != NodeKind::Dir {
            return Err(Error::NotADirectory);
        }
        Ok((parent, name))
    }

    fn resolve_start(&self, path: &str, base: NodeId) -> NodeId {
        if path.starts_with(SEPARATOR) {
            NodeId::ROOT
        } else {
            base
        }
    }

    fn walk(&self, segments: &[&str], start: NodeId) -> Result<NodeId> {
        let mut current = start;
        for &segment in segments {
            match segment {
                "." => {}
                ".." => {
                    if let Some(parent) = self.arena.node(current).parent() {
                        current = parent;
                    }
                }
                name => {
                    current = self.child_named(current, name).ok_or(Error::NotFound)?;
                }
            }
        }
        Ok(current)
    }

    /// Looks up a direct child of `dir` by name.
    pub(crate) fn child_named(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.arena
            .node(dir)
            .children()
            .iter()
            .copied()
            .find(|&child| self.arena.node(child).name() == name)
    }
}
