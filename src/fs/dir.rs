use crate::arena::{self, CHILDREN_MAX, NodeId, NodeKind};

use super::path::SEPARATOR;
use super::{Error, Filesystem, Result, Session};

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub kind: NodeKind,
}

impl Filesystem {
    /// Creates a directory at `path`, resolved against the session's working
    /// directory. Every intermediate segment must already exist and be a
    /// directory; missing intermediates are never created implicitly.
    pub fn make_directory(&mut self, session: &Session, path: &str) -> Result<NodeId> {
        self.create_node(session, path, NodeKind::Dir)
    }

    pub(crate) fn create_node(
        &mut self,
        session: &Session,
        path: &str,
        kind: NodeKind,
    ) -> Result<NodeId> {
        let (parent, name) = self.resolve_parent(path, session.current())?;
        if self.child_named(parent, name).is_some() {
            return Err(Error::AlreadyExists);
        }
        if self.arena.node(parent).children().len() == CHILDREN_MAX {
            return Err(Error::DirectoryFull);
        }

        let id = self.arena.allocate(name, kind, Some(parent));
        self.arena.node_mut(parent).children.push(id);
        Ok(id)
    }

    /// Removes the node at `path`, detaching it from its parent and keeping
    /// the order of the remaining siblings. The node's own descendants stay
    /// resident in the pool but become unreachable from the tree; no slot is
    /// ever reclaimed.
    pub fn remove(&mut self, session: &Session, path: &str) -> Result<NodeId> {
        if path.is_empty() {
            return Err(Error::InvalidPath);
        }

        let id = self.resolve(path, session.current())?;
        if id == NodeId::ROOT {
            return Err(Error::InvalidPath);
        }

        let parent = self
            .arena
            .node(id)
            .parent()
            .expect("non-root node has a parent");
        let children = &mut self.arena.node_mut(parent).children;
        let idx = children
            .iter()
            .position(|&child| child == id)
            .expect("node is linked into its parent");
        children.remove(idx);
        Ok(id)
    }

    /// Renames the node at `path` in place, keeping its children and
    /// content. The new name is clamped to the name-length bound and must
    /// not collide with a sibling.
    pub fn rename(&mut self, session: &Session, path: &str, new_name: &str) -> Result<()> {
        if path.is_empty() {
            return Err(Error::InvalidPath);
        }

        let name = arena::clamp_name(new_name);
        if name.is_empty() || name == "." || name == ".." || name.contains(SEPARATOR) {
            return Err(Error::InvalidPath);
        }

        let id = self.resolve(path, session.current())?;
        if id == NodeId::ROOT {
            return Err(Error::InvalidPath);
        }

        let parent = self
            .arena
            .node(id)
            .parent()
            .expect("non-root node has a parent");
        match self.child_named(parent, name) {
            Some(sibling) if sibling != id => return Err(Error::AlreadyExists),
            _ => {}
        }

        self.arena.node_mut(id).name = name.to_string();
        Ok(())
    }

    /// Lists the direct children of `dir`: directories first, then files,
    /// each partition sorted by byte-wise name order.
    pub fn list(&self, dir: NodeId) -> Result<Vec<ListEntry>> {
        let node = self.arena.node(dir);
        if node.kind() != NodeKind::Dir {
            return Err(Error::NotADirectory);
        }

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for &child in node.children() {
            let child = self.arena.node(child);
            let entry = ListEntry {
                name: child.name().to_string(),
                kind: child.kind(),
            };
            match child.kind() {
                NodeKind::Dir => dirs.push(entry),
                NodeKind::File => files.push(entry),
            }
        }

        dirs.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
        files.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
        dirs.append(&mut files);
        Ok(dirs)
    }
}
