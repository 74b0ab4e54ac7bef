//! The virtual filesystem: an owned node tree plus path resolution.
//!
//! Paths are handled as segment sequences (`["usr", "bin"]` for
//! `/usr/bin`; empty for the root). [`Vfs::canonicalize`] turns a path
//! expression into such a sequence against a working directory,
//! [`Vfs::resolve`] additionally walks the tree, and
//! [`Vfs::resolve_parent`] splits off the final segment for operations
//! that create entries.

mod loader;
mod node;

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

pub use loader::LoadError;
pub use node::Node;

/// The raw description a tree was built from, kept for integrity
/// reporting (`vfs-info`).
#[derive(Debug, Clone)]
struct Source {
    name: String,
    bytes: Vec<u8>,
}

/// An in-memory filesystem tree.
///
/// Always usable: a fresh `Vfs` has an empty root directory, and every
/// command works against it. `source` is populated only by a load that
/// completed without error.
#[derive(Debug, Clone)]
pub struct Vfs {
    root: Node,
    source: Option<Source>,
}

impl Vfs {
    /// An empty tree: a root directory with mode 0o755 and no source.
    pub fn new() -> Self {
        Self {
            root: Node::dir(),
            source: None,
        }
    }

    /// Display name of the loaded description, if one loaded successfully.
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.name.as_str())
    }

    /// Hex sha-256 of the exact bytes the tree was built from.
    pub fn source_digest(&self) -> Option<String> {
        self.source.as_ref().map(|s| {
            let hash = Sha256::digest(&s.bytes);
            hash.iter().map(|b| format!("{b:02x}")).collect()
        })
    }

    /// Normalizes `path` against `cwd` without consulting the tree.
    ///
    /// Absolute paths restart from the root. Empty and `.` segments
    /// vanish, `..` pops the previous segment, and popping past the root
    /// is silently absorbed. Comparison is exact: no case folding, no
    /// Unicode normalization.
    pub fn canonicalize(cwd: &[String], path: &str) -> Vec<String> {
        let mut segments = if path.starts_with('/') {
            Vec::new()
        } else {
            cwd.to_vec()
        };
        for part in path.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                name => segments.push(name.to_string()),
            }
        }
        segments
    }

    /// Canonical segments plus the node they designate, if it exists.
    ///
    /// The segments come back even when the walk fails, so callers can
    /// still report the normalized target.
    pub fn resolve(&self, cwd: &[String], path: &str) -> (Vec<String>, Option<&Node>) {
        let segments = Self::canonicalize(cwd, path);
        let node = self.node(&segments);
        (segments, node)
    }

    /// Splits `path` into a normalized parent location, the parent node
    /// if it exists, and the raw final segment.
    ///
    /// A path with no segments at all (`/`, `.`, the empty string) has
    /// neither a basename nor a parent.
    pub fn resolve_parent(
        &self,
        cwd: &[String],
        path: &str,
    ) -> (Vec<String>, Option<&Node>, Option<String>) {
        let start: &[String] = if path.starts_with('/') { &[] } else { cwd };
        let segments: Vec<&str> = path
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        let Some((basename, prefix)) = segments.split_last() else {
            return (start.to_vec(), None, None);
        };
        let mut parent = start.to_vec();
        for segment in prefix {
            if *segment == ".." {
                parent.pop();
            } else {
                parent.push((*segment).to_string());
            }
        }
        let node = self.node(&parent);
        (parent, node, Some((*basename).to_string()))
    }

    /// Walks the tree from the root along `segments`. Fails if a child is
    /// missing or an intermediate node is a file.
    pub fn node(&self, segments: &[String]) -> Option<&Node> {
        let mut current = &self.root;
        for segment in segments {
            match current {
                Node::Directory { children, .. } => current = children.get(segment)?,
                Node::File { .. } => return None,
            }
        }
        Some(current)
    }

    /// Mutable variant of [`Vfs::node`].
    pub fn node_mut(&mut self, segments: &[String]) -> Option<&mut Node> {
        let mut current = &mut self.root;
        for segment in segments {
            match current {
                Node::Directory { children, .. } => current = children.get_mut(segment)?,
                Node::File { .. } => return None,
            }
        }
        Some(current)
    }

    /// Mutable child map of the directory at `segments`, if that location
    /// exists and is a directory.
    pub fn dir_children_mut(&mut self, segments: &[String]) -> Option<&mut BTreeMap<String, Node>> {
        match self.node_mut(segments)? {
            Node::Directory { children, .. } => Some(children),
            Node::File { .. } => None,
        }
    }
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Vfs {
        let csv = "path,type,encoding,content\n\
                   usr/bin/tool,file,,payload\n\
                   usr/share,dir,,\n\
                   etc/motd,file,,hi\n";
        Vfs::from_csv(csv.as_bytes().to_vec(), "sample.csv").unwrap()
    }

    // canonicalize

    #[test]
    fn canonicalize_absolute_restarts_from_root() {
        let cwd = segs(&["usr", "bin"]);
        assert_eq!(Vfs::canonicalize(&cwd, "/etc"), segs(&["etc"]));
    }

    #[test]
    fn canonicalize_relative_extends_cwd() {
        let cwd = segs(&["usr"]);
        assert_eq!(Vfs::canonicalize(&cwd, "bin/tool"), segs(&["usr", "bin", "tool"]));
    }

    #[test]
    fn canonicalize_skips_dot_and_empty_segments() {
        assert_eq!(Vfs::canonicalize(&[], "usr//./bin/"), segs(&["usr", "bin"]));
    }

    #[test]
    fn canonicalize_dotdot_pops() {
        let cwd = segs(&["usr", "bin"]);
        assert_eq!(Vfs::canonicalize(&cwd, "../share"), segs(&["usr", "share"]));
    }

    #[test]
    fn canonicalize_absorbs_dotdot_above_root() {
        assert_eq!(Vfs::canonicalize(&[], "../../x"), segs(&["x"]));
        assert_eq!(Vfs::canonicalize(&[], "/.."), Vec::<String>::new());
    }

    // resolve

    #[test]
    fn resolve_walks_to_existing_node() {
        let vfs = sample();
        let (segments, node) = vfs.resolve(&[], "/usr/bin/tool");
        assert_eq!(segments, segs(&["usr", "bin", "tool"]));
        assert!(matches!(node, Some(Node::File { .. })));
    }

    #[test]
    fn resolve_missing_still_returns_segments() {
        let vfs = sample();
        let (segments, node) = vfs.resolve(&segs(&["usr"]), "nope/deeper");
        assert_eq!(segments, segs(&["usr", "nope", "deeper"]));
        assert!(node.is_none());
    }

    #[test]
    fn resolve_through_file_fails() {
        let vfs = sample();
        let (segments, node) = vfs.resolve(&[], "/etc/motd/child");
        assert_eq!(segments, segs(&["etc", "motd", "child"]));
        assert!(node.is_none());
    }

    #[test]
    fn resolve_is_idempotent_over_its_canonical_output() {
        let vfs = sample();
        for (cwd, path) in [
            (segs(&["usr", "bin"]), "../share"),
            (segs(&["usr"]), "bin/./tool"),
            (Vec::new(), "/etc/../usr/bin"),
            (segs(&["etc"]), "../../.."),
        ] {
            let (canonical, node) = vfs.resolve(&cwd, path);
            let rejoined = format!("/{}", canonical.join("/"));
            let (again, node_again) = vfs.resolve(&[], &rejoined);
            assert_eq!(canonical, again);
            match (node, node_again) {
                (Some(a), Some(b)) => assert!(std::ptr::eq(a, b)),
                (None, None) => {}
                _ => panic!("resolution changed between passes"),
            }
        }
    }

    // resolve_parent

    #[test]
    fn resolve_parent_splits_basename() {
        let vfs = sample();
        let (parent, node, basename) = vfs.resolve_parent(&[], "/usr/bin/newfile");
        assert_eq!(parent, segs(&["usr", "bin"]));
        assert!(node.is_some());
        assert_eq!(basename.as_deref(), Some("newfile"));
    }

    #[test]
    fn resolve_parent_normalizes_prefix_only() {
        let vfs = sample();
        let (parent, _, basename) = vfs.resolve_parent(&[], "/usr/share/../bin/x");
        assert_eq!(parent, segs(&["usr", "bin"]));
        assert_eq!(basename.as_deref(), Some("x"));
    }

    #[test]
    fn resolve_parent_of_root_has_no_basename() {
        let vfs = sample();
        let (parent, node, basename) = vfs.resolve_parent(&segs(&["usr"]), "/");
        assert!(parent.is_empty());
        assert!(node.is_none());
        assert!(basename.is_none());
    }

    #[test]
    fn resolve_parent_reports_missing_parent() {
        let vfs = sample();
        let (parent, node, basename) = vfs.resolve_parent(&[], "/void/file");
        assert_eq!(parent, segs(&["void"]));
        assert!(node.is_none());
        assert_eq!(basename.as_deref(), Some("file"));
    }

    // source bookkeeping

    #[test]
    fn fresh_tree_has_no_source() {
        let vfs = Vfs::new();
        assert!(vfs.source_name().is_none());
        assert!(vfs.source_digest().is_none());
    }

    #[test]
    fn loaded_tree_reports_source_digest() {
        let vfs = sample();
        assert_eq!(vfs.source_name(), Some("sample.csv"));
        let digest = vfs.source_digest().unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
