use crate::arena::{NodeId, NodeKind};

use super::path::SEPARATOR;
use super::{Error, Filesystem, Result};

/// The working directory of one shell session, with the canonical absolute
/// path cached alongside it.
///
/// Sessions are plain values: several of them can drive the same tree
/// independently, and tree operations take the session they should resolve
/// relative paths against.
pub struct Session {
    current: NodeId,
    path: String,
}

impl Session {
    /// Constructs a session positioned at the root.
    pub fn new(fs: &Filesystem) -> Self {
        let current = fs.root();
        let path = absolute_path(fs, current);
        Self { current, path }
    }

    /// Returns the current node.
    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Returns the canonical absolute path of the current node.
    ///
    /// The value is cached and refreshed on every successful
    /// [`Session::change_directory`], and at no other point.
    pub fn current_path(&self) -> &str {
        &self.path
    }

    /// Moves the session to the directory at `path`, resolved against the
    /// current node. On failure neither the current node nor the cached path
    /// changes.
    pub fn change_directory(&mut self, fs: &Filesystem, path: &str) -> Result<()> {
        if path.is_empty() {
            return Err(Error::InvalidPath);
        }

        let target = fs.resolve(path, self.current)?;
        if fs.node(target).kind() != NodeKind::Dir {
            return Err(Error::NotADirectory);
        }

        self.current = target;
        self.path = absolute_path(fs, target);
        Ok(())
    }
}

/// Walks the parent chain from `node` to the root, prepending each
/// ancestor's name behind a separator. The root renders as a single
/// separator.
pub(crate) fn absolute_path(fs: &Filesystem, node: NodeId) -> String {
    let mut names = Vec::new();
    let mut current = node;
    while let Some(parent) = fs.node(current).parent() {
        names.push(fs.node(current).name().to_string());
        current = parent;
    }

    let mut path = String::new();
    for name in names.iter().rev() {
        path.push(SEPARATOR);
        path.push_str(name);
    }
    if path.is_empty() {
        path.push(SEPARATOR);
    }
    path
}
