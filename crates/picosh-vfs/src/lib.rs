//! Virtual file system used by the shell's file commands.
//!
//! Commands only see the [`Vfs`] trait. The shell ships [`MemoryVfs`]; a
//! board support package can plug in its own tree.

mod memory;

pub use memory::MemoryVfs;

use picosh_types::error::Result;

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One child returned by [`Vfs::readdir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfsEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// Metadata returned by [`Vfs::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VfsMetadata {
    pub kind: EntryKind,
    /// Size in bytes (0 for directories).
    pub size: u64,
}

/// File tree operations needed by the shell.
pub trait Vfs {
    /// List the direct children of a directory, sorted by name.
    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>>;
    /// Read a whole file.
    fn read(&self, path: &str) -> Result<Vec<u8>>;
    /// Create or replace a file. The parent directory must exist.
    fn write(&mut self, path: &str, data: &[u8]) -> Result<()>;
    /// Look up a path.
    fn stat(&self, path: &str) -> Result<VfsMetadata>;
    /// Create a directory and any missing parents.
    fn mkdir(&mut self, path: &str) -> Result<()>;
    /// Whether the path names a file or directory.
    fn exists(&self, path: &str) -> bool;
}

/// Join `input` onto `cwd` and fold `.` and `..` components.
///
/// Absolute inputs ignore `cwd`. `..` at the root stays at the root.
pub fn resolve_path(cwd: &str, input: &str) -> String {
    let joined = if input.starts_with('/') {
        input.to_string()
    } else {
        format!("{cwd}/{input}")
    };

    let mut parts: Vec<&str> = Vec::new();
    for component in joined.split('/') {
        match component {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}
