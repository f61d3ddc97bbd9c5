pub mod error;
pub mod path;
pub mod session;

mod dir;
mod file;


pub use dir::ListEntry;
pub use error::{Error, Result};
pub use session::Session;

use crate::arena::{Arena, Node, NodeId, NodeKind};

/// An in-memory filesystem tree over a fixed node pool.
///
/// All state is volatile process memory: nothing is serialized and nothing
/// survives a restart. Mutating operations leave the tree unchanged on any
/// recoverable failure.
pub struct Filesystem {
    pub(crate) arena: Arena,
}

impl Filesystem {
    /// Constructs a filesystem with a pool of `node_capacity` slots and the
    /// root directory in the first slot.
    ///
    /// # Panics
    /// Panics if `node_capacity` is zero, since the root itself needs a slot.
    pub fn new(node_capacity: usize) -> Self {
        let mut arena = Arena::new(node_capacity);
        let root = arena.allocate("/", NodeKind::Dir, None);
        assert!(root == NodeId::ROOT);
        Self { arena }
    }

    /// Returns the root directory.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Returns the node at `id`.
    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.node(id)
    }

    /// Returns the backing node pool.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }
}
