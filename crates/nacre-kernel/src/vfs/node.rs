//! Nodes of the virtual filesystem tree.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};

/// One entry in the tree: a directory with named children, or a file with
/// a byte buffer. Both carry a 9-bit permission mode and a last-modified
/// timestamp.
///
/// Nodes are exclusively owned by their parent's child map (the root by the
/// [`Vfs`](super::Vfs)); there are no parent back-references. Callers that
/// need ancestry re-walk from the root with a segment path. Child names are
/// kept in a `BTreeMap` so listings come out sorted.
#[derive(Debug, Clone)]
pub enum Node {
    Directory {
        children: BTreeMap<String, Node>,
        mode: u32,
        mtime: DateTime<Local>,
    },
    File {
        content: Vec<u8>,
        mode: u32,
        mtime: DateTime<Local>,
    },
}

impl Node {
    /// An empty directory with the default 0o755 mode, stamped now.
    pub fn dir() -> Self {
        Node::Directory {
            children: BTreeMap::new(),
            mode: 0o755,
            mtime: Local::now(),
        }
    }

    /// A file with the default 0o644 mode, stamped now.
    pub fn file(content: Vec<u8>) -> Self {
        Node::File {
            content,
            mode: 0o644,
            mtime: Local::now(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory { .. })
    }

    pub fn mode(&self) -> u32 {
        match self {
            Node::Directory { mode, .. } | Node::File { mode, .. } => *mode,
        }
    }

    pub fn set_mode(&mut self, new_mode: u32) {
        match self {
            Node::Directory { mode, .. } | Node::File { mode, .. } => *mode = new_mode & 0o777,
        }
    }

    pub fn mtime(&self) -> DateTime<Local> {
        match self {
            Node::Directory { mtime, .. } | Node::File { mtime, .. } => *mtime,
        }
    }

    pub fn set_mtime(&mut self, when: DateTime<Local>) {
        match self {
            Node::Directory { mtime, .. } | Node::File { mtime, .. } => *mtime = when,
        }
    }

    /// Listing prefix: `d` for directories, `-` for files.
    pub fn kind_char(&self) -> char {
        if self.is_dir() {
            'd'
        } else {
            '-'
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_defaults() {
        let node = Node::dir();
        assert!(node.is_dir());
        assert_eq!(node.mode(), 0o755);
        assert_eq!(node.kind_char(), 'd');
    }

    #[test]
    fn file_defaults() {
        let node = Node::file(b"data".to_vec());
        assert!(!node.is_dir());
        assert_eq!(node.mode(), 0o644);
        assert_eq!(node.kind_char(), '-');
    }

    #[test]
    fn set_mode_masks_to_nine_bits() {
        let mut node = Node::dir();
        node.set_mode(0o7777);
        assert_eq!(node.mode(), 0o777);
    }
}
