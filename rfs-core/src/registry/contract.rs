//! Registry contract - the operations a client may invoke on a handle.

use crate::error::RfsResult;
use crate::node::{DirectoryHandle, FileHandle, Handle, NodeDesc};

/// Operations valid on any node.
pub trait NodeOps: Send + Sync {
    /// Name the node was created with.
    fn name(&self, node: Handle) -> RfsResult<String>;

    /// Remove the node from its parent.
    ///
    /// Fails with `PermissionDenied` when the node may not be removed.
    fn destroy(&self, node: Handle) -> RfsResult<()>;
}

/// Operations valid on directories.
pub trait DirectoryOps: Send + Sync {
    /// Entries in creation order.
    fn list(&self, dir: DirectoryHandle) -> RfsResult<Vec<NodeDesc>>;

    /// Create an empty file. Fails with `NameInUse` if the name is taken.
    fn create_file(&self, dir: DirectoryHandle, name: &str) -> RfsResult<FileHandle>;

    /// Create an empty directory. Fails with `NameInUse` if the name is taken.
    fn create_directory(&self, dir: DirectoryHandle, name: &str) -> RfsResult<DirectoryHandle>;

    /// Look up an entry by name. Fails with `NoSuchName` if absent.
    fn find(&self, dir: DirectoryHandle, name: &str) -> RfsResult<NodeDesc>;
}

/// Operations valid on files.
pub trait FileOps: Send + Sync {
    /// Full snapshot of the file's lines.
    fn read(&self, file: FileHandle) -> RfsResult<Vec<String>>;

    /// Replace the file's lines.
    fn write(&self, file: FileHandle, lines: Vec<String>) -> RfsResult<()>;
}

/// A node registry as seen by the shell.
pub trait Registry: NodeOps + DirectoryOps + FileOps {
    /// Handle of the root directory.
    fn root(&self) -> DirectoryHandle;
}
