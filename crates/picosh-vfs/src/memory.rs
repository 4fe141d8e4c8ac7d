//! In-memory VFS implementation.
//!
//! The whole tree lives in a `BTreeMap` keyed by normalized absolute path,
//! so children of a directory are a contiguous, already sorted key range.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ops::Bound;

use picosh_types::error::{PicoshError, Result};

use crate::{EntryKind, Vfs, VfsEntry, VfsMetadata};

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
}

impl Node {
    fn kind(&self) -> EntryKind {
        match self {
            Node::File(_) => EntryKind::File,
            Node::Dir => EntryKind::Directory,
        }
    }
}

/// A fully in-memory file tree.
#[derive(Debug)]
pub struct MemoryVfs {
    nodes: BTreeMap<String, Node>,
}

impl MemoryVfs {
    /// Create a tree holding only the root directory.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::Dir);
        Self { nodes }
    }
}

impl Default for MemoryVfs {
    fn default() -> Self {
        Self::new()
    }
}

fn is_normalized(path: &str) -> bool {
    path.starts_with('/') && !(path.len() > 1 && path.ends_with('/')) && !path.contains("//")
}

/// Leading `/`, no repeated `/`, no trailing `/` except for the root.
fn normalize(path: &str) -> Cow<'_, str> {
    if is_normalized(path) {
        return Cow::Borrowed(path);
    }
    let mut out = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    }
    Cow::Owned(out)
}

fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(i) => &path[..i],
    }
}

impl MemoryVfs {
    /// Normalize `path` and fetch its node.
    fn lookup<'p>(&self, path: &'p str) -> Result<(Cow<'p, str>, &Node)> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(node) => Ok((path, node)),
            None => Err(PicoshError::Vfs(format!("no such file or directory: {path}"))),
        }
    }
}

impl Vfs for MemoryVfs {
    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>> {
        let (dir, node) = self.lookup(path)?;
        if let Node::File(_) = node {
            return Err(PicoshError::Vfs(format!("not a directory: {dir}")));
        }

        // Every key under `dir` sorts right after it; children are the keys
        // whose parent is `dir` itself.
        let after = (Bound::Excluded(dir.as_ref()), Bound::Unbounded);
        let entries = self
            .nodes
            .range::<str, _>(after)
            .take_while(|(key, _)| key.starts_with(dir.as_ref()))
            .filter(|(key, _)| parent(key) == dir)
            .map(|(key, node)| VfsEntry {
                name: key.rsplit('/').next().unwrap_or_default().to_string(),
                kind: node.kind(),
            })
            .collect();
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        match self.lookup(path)? {
            (_, Node::File(data)) => Ok(data.clone()),
            (path, Node::Dir) => Err(PicoshError::Vfs(format!("is a directory: {path}"))),
        }
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let path = normalize(path);
        if matches!(self.nodes.get(path.as_ref()), Some(Node::Dir)) {
            return Err(PicoshError::Vfs(format!("is a directory: {path}")));
        }
        let par = parent(&path);
        if !matches!(self.nodes.get(par), Some(Node::Dir)) {
            return Err(PicoshError::Vfs(format!("parent directory does not exist: {par}")));
        }
        self.nodes.insert(path.into_owned(), Node::File(data.to_vec()));
        Ok(())
    }

    fn stat(&self, path: &str) -> Result<VfsMetadata> {
        let (_, node) = self.lookup(path)?;
        let size = match node {
            Node::File(data) => data.len() as u64,
            Node::Dir => 0,
        };
        Ok(VfsMetadata {
            kind: node.kind(),
            size,
        })
    }

    fn mkdir(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::Dir) => return Ok(()),
            Some(Node::File(_)) => {
                return Err(PicoshError::Vfs(format!("file exists: {path}")));
            },
            None => {},
        }
        let par = parent(&path).to_string();
        if !self.nodes.contains_key(&par) {
            self.mkdir(&par)?;
        }
        self.nodes.insert(path.into_owned(), Node::Dir);
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.nodes.contains_key(normalize(path).as_ref())
    }
}
