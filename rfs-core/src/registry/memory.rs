//! In-memory node registry.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;

use super::contract::{DirectoryOps, FileOps, NodeOps, Registry};
use super::seed::{SeedNode, SeedTree};
use crate::error::{RfsError, RfsResult};
use crate::node::{DirectoryHandle, FileHandle, Handle, NodeDesc, NodeKind};

/// Name given to the root directory.
pub const ROOT_NAME: &str = "/";

enum Body {
    File(Vec<String>),
    Directory(Vec<NodeDesc>),
}

struct Node {
    name: String,
    parent: Option<Handle>,
    protected: bool,
    body: Body,
}

/// Registry state (interior of Arc<RwLock<...>>).
struct RegistryInner {
    nodes: HashMap<Handle, Node>,
    next_id: u64,
    root: Handle,
}

impl RegistryInner {
    fn new() -> Self {
        let root = Handle::from_raw(0);
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            Node {
                name: ROOT_NAME.to_string(),
                parent: None,
                protected: false,
                body: Body::Directory(Vec::new()),
            },
        );
        Self {
            nodes,
            next_id: 1,
            root,
        }
    }

    fn node(&self, handle: Handle) -> RfsResult<&Node> {
        self.nodes
            .get(&handle)
            .ok_or(RfsError::ObjectNotExist(handle))
    }

    fn contents(&self, dir: Handle) -> RfsResult<&Vec<NodeDesc>> {
        match &self.node(dir)?.body {
            Body::Directory(contents) => Ok(contents),
            Body::File(_) => Err(RfsError::WrongKind(dir)),
        }
    }

    fn contents_mut(&mut self, dir: Handle) -> RfsResult<&mut Vec<NodeDesc>> {
        let node = self
            .nodes
            .get_mut(&dir)
            .ok_or(RfsError::ObjectNotExist(dir))?;
        match &mut node.body {
            Body::Directory(contents) => Ok(contents),
            Body::File(_) => Err(RfsError::WrongKind(dir)),
        }
    }

    fn lines_mut(&mut self, file: Handle) -> RfsResult<&mut Vec<String>> {
        let node = self
            .nodes
            .get_mut(&file)
            .ok_or(RfsError::ObjectNotExist(file))?;
        match &mut node.body {
            Body::File(lines) => Ok(lines),
            Body::Directory(_) => Err(RfsError::WrongKind(file)),
        }
    }

    /// Path of a node from the root, for log records.
    fn path_of(&self, handle: Handle) -> RfsResult<String> {
        let mut names = Vec::new();
        let mut current = self.node(handle)?;
        while let Some(parent) = current.parent {
            names.push(current.name.as_str());
            current = self.node(parent)?;
        }
        if names.is_empty() {
            return Ok(ROOT_NAME.to_string());
        }
        names.reverse();
        Ok(format!("/{}", names.join("/")))
    }

    fn create(&mut self, dir: Handle, name: &str, kind: NodeKind) -> RfsResult<Handle> {
        let contents = self.contents(dir)?;
        if name.is_empty() || contents.iter().any(|entry| entry.name == name) {
            return Err(RfsError::NameInUse(name.to_string()));
        }

        let handle = Handle::from_raw(self.next_id);
        self.next_id += 1;

        let body = match kind {
            NodeKind::File => Body::File(Vec::new()),
            NodeKind::Directory => Body::Directory(Vec::new()),
        };
        self.nodes.insert(
            handle,
            Node {
                name: name.to_string(),
                parent: Some(dir),
                protected: false,
                body,
            },
        );
        self.contents_mut(dir)?
            .push(NodeDesc::new(name, handle, kind));

        debug!("created {} {} as {}", kind.label(), self.path_of(handle)?, handle);
        Ok(handle)
    }

    fn destroy(&mut self, handle: Handle) -> RfsResult<()> {
        let node = self.node(handle)?;
        let Some(parent) = node.parent else {
            return Err(RfsError::PermissionDenied(
                "cannot remove root directory".to_string(),
            ));
        };
        if node.protected {
            return Err(RfsError::PermissionDenied("node is protected".to_string()));
        }
        if let Body::Directory(contents) = &node.body {
            if !contents.is_empty() {
                return Err(RfsError::PermissionDenied(
                    "directory not empty".to_string(),
                ));
            }
        }

        let path = self.path_of(handle)?;
        self.contents_mut(parent)?
            .retain(|entry| entry.handle != handle);
        self.nodes.remove(&handle);

        debug!("destroyed {} ({})", path, handle);
        Ok(())
    }
}

/// Ephemeral node tree shared between clients.
///
/// Each operation takes the lock once, so individual mutations are atomic.
/// Clone is cheap (just clones the Arc).
#[derive(Clone)]
pub struct MemoryRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    root: Handle,
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRegistry {
    /// Create a registry holding only an empty root directory.
    pub fn new() -> Self {
        let inner = RegistryInner::new();
        let root = inner.root;
        Self {
            inner: Arc::new(RwLock::new(inner)),
            root,
        }
    }

    /// Create a registry and populate its root from a seed tree.
    pub fn with_seed(seed: &SeedTree) -> RfsResult<Self> {
        let registry = Self::new();
        registry.populate(registry.root(), &seed.entries)?;
        Ok(registry)
    }

    /// Mark a node as non-removable.
    pub fn protect(&self, node: Handle) -> RfsResult<()> {
        let mut inner = self.write_lock()?;
        let node_ref = inner
            .nodes
            .get_mut(&node)
            .ok_or(RfsError::ObjectNotExist(node))?;
        node_ref.protected = true;
        Ok(())
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.inner.read().map(|inner| inner.nodes.len()).unwrap_or(0)
    }

    fn populate(&self, dir: DirectoryHandle, entries: &[SeedNode]) -> RfsResult<()> {
        for entry in entries {
            let handle = match entry {
                SeedNode::File { name, lines, .. } => {
                    let file = self.create_file(dir, name)?;
                    self.write(file, lines.clone())?;
                    file.handle()
                }
                SeedNode::Directory { name, entries, .. } => {
                    let child = self.create_directory(dir, name)?;
                    self.populate(child, entries)?;
                    child.handle()
                }
            };
            if entry.is_protected() {
                self.protect(handle)?;
            }
        }
        Ok(())
    }

    fn read_lock(&self) -> RfsResult<RwLockReadGuard<'_, RegistryInner>> {
        self.inner.read().map_err(|_| RfsError::LockPoisoned)
    }

    fn write_lock(&self) -> RfsResult<RwLockWriteGuard<'_, RegistryInner>> {
        self.inner.write().map_err(|_| RfsError::LockPoisoned)
    }
}

impl NodeOps for MemoryRegistry {
    fn name(&self, node: Handle) -> RfsResult<String> {
        Ok(self.read_lock()?.node(node)?.name.clone())
    }

    fn destroy(&self, node: Handle) -> RfsResult<()> {
        self.write_lock()?.destroy(node)
    }
}

impl DirectoryOps for MemoryRegistry {
    fn list(&self, dir: DirectoryHandle) -> RfsResult<Vec<NodeDesc>> {
        Ok(self.read_lock()?.contents(dir.handle())?.clone())
    }

    fn create_file(&self, dir: DirectoryHandle, name: &str) -> RfsResult<FileHandle> {
        let handle = self
            .write_lock()?
            .create(dir.handle(), name, NodeKind::File)?;
        Ok(FileHandle::unchecked(handle))
    }

    fn create_directory(&self, dir: DirectoryHandle, name: &str) -> RfsResult<DirectoryHandle> {
        let handle = self
            .write_lock()?
            .create(dir.handle(), name, NodeKind::Directory)?;
        Ok(DirectoryHandle::unchecked(handle))
    }

    fn find(&self, dir: DirectoryHandle, name: &str) -> RfsResult<NodeDesc> {
        self.read_lock()?
            .contents(dir.handle())?
            .iter()
            .find(|entry| entry.name == name)
            .cloned()
            .ok_or_else(|| RfsError::NoSuchName(name.to_string()))
    }
}

impl FileOps for MemoryRegistry {
    fn read(&self, file: FileHandle) -> RfsResult<Vec<String>> {
        let inner = self.read_lock()?;
        match &inner.node(file.handle())?.body {
            Body::File(lines) => Ok(lines.clone()),
            Body::Directory(_) => Err(RfsError::WrongKind(file.handle())),
        }
    }

    fn write(&self, file: FileHandle, lines: Vec<String>) -> RfsResult<()> {
        let mut inner = self.write_lock()?;
        let count = lines.len();
        *inner.lines_mut(file.handle())? = lines;
        debug!("wrote {} line(s) to {}", count, file.handle());
        Ok(())
    }
}

impl Registry for MemoryRegistry {
    fn root(&self) -> DirectoryHandle {
        DirectoryHandle::unchecked(self.root)
    }
}
