//! Node identity: opaque handles and entry descriptors.
//!
//! A `Handle` is the only thing a client ever holds for a node. It carries no
//! state of its own; every operation goes through a registry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, location-transparent reference to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(u64);

impl Handle {
    /// Rebuild a handle from its wire representation.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Wire representation of this handle.
    pub const fn into_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle known to refer to a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectoryHandle(Handle);

impl DirectoryHandle {
    /// View a raw handle as a directory without checking its kind.
    pub const fn unchecked(handle: Handle) -> Self {
        Self(handle)
    }

    pub const fn handle(self) -> Handle {
        self.0
    }
}

/// Handle known to refer to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileHandle(Handle);

impl FileHandle {
    /// View a raw handle as a file without checking its kind.
    pub const fn unchecked(handle: Handle) -> Self {
        Self(handle)
    }

    pub const fn handle(self) -> Handle {
        self.0
    }
}

impl From<DirectoryHandle> for Handle {
    fn from(value: DirectoryHandle) -> Self {
        value.0
    }
}

impl From<FileHandle> for Handle {
    fn from(value: FileHandle) -> Self {
        value.0
    }
}

/// Kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

impl NodeKind {
    /// Label used in listings.
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Directory => "directory",
        }
    }
}

/// One directory entry as returned by `list` and `find`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDesc {
    pub name: String,
    pub handle: Handle,
    pub kind: NodeKind,
}

/// Kind-tagged handle, for places that branch on file vs. directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    File(FileHandle),
    Directory(DirectoryHandle),
}

impl NodeDesc {
    pub fn new(name: impl Into<String>, handle: Handle, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            handle,
            kind,
        }
    }

    /// Narrow the entry's handle according to its kind.
    pub fn resolve(&self) -> NodeRef {
        match self.kind {
            NodeKind::File => NodeRef::File(FileHandle::unchecked(self.handle)),
            NodeKind::Directory => NodeRef::Directory(DirectoryHandle::unchecked(self.handle)),
        }
    }
}
