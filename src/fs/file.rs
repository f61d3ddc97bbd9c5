use crate::arena::{CONTENT_MAX_LEN, NodeId, NodeKind};

use super::{Error, Filesystem, Result, Session};

impl Filesystem {
    /// Creates an empty file at `path`. Parent resolution follows the same
    /// rules as [`Filesystem::make_directory`].
    pub fn create_file(&mut self, session: &Session, path: &str) -> Result<NodeId> {
        self.create_node(session, path, NodeKind::File)
    }

    /// Replaces the content of the file at `path` wholesale, clamped to
    /// [`CONTENT_MAX_LEN`] bytes. There is no append primitive; append
    /// semantics are composed by callers from `read` and `write`.
    pub fn write(&mut self, session: &Session, path: &str, bytes: &[u8]) -> Result<()> {
        let id = self.resolve_file(session, path)?;
        let len = bytes.len().min(CONTENT_MAX_LEN);

        let node = self.arena.node_mut(id);
        node.content.clear();
        node.content.extend_from_slice(&bytes[..len]);
        Ok(())
    }

    /// Returns the content of the file at `path`. A never-written file reads
    /// as empty, indistinguishable from one written with no bytes.
    pub fn read(&self, session: &Session, path: &str) -> Result<&[u8]> {
        let id = self.resolve_file(session, path)?;
        Ok(self.arena.node(id).content())
    }

    fn resolve_file(&self, session: &Session, path: &str) -> Result<NodeId> {
        if path.is_empty() {
            return Err(Error::InvalidPath);
        }

        let id = self.resolve(path, session.current())?;
        if self.arena.node(id).kind() != NodeKind::File {
            return Err(Error::NotAFile);
        }
        Ok(id)
    }
}
