//! Path walking: from a commit's root tree down a slash-separated path to a
//! directory listing or a file's content.
//!
//! Lookups are exact and case-sensitive. Empty segments are ignored, so
//! `""`, `"/"` and `"//"` all address the root tree. Listings are ordered
//! by raw entry name bytes, not by git's storage order.

use git2::Tree;

use crate::error::{AppError, Result};
use crate::git::repository::GitRepository;
use crate::models::{EntryKind, TreeEntry};

/// What the route asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Directory,
    File,
}

#[derive(Debug, Clone)]
pub enum Node {
    Directory(Vec<TreeEntry>),
    File(BlobContent),
}

#[derive(Debug, Clone)]
pub struct BlobContent {
    pub path: String,
    pub oid: String,
    pub content: Vec<u8>,
    pub is_binary: bool,
}

pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

pub fn normalize_path(path: &str) -> String {
    split_path(path).join("/")
}

impl View {
    /// Refuse to coerce a tree into a file view or a blob into a directory view.
    pub fn expect(self, node: Node, path: &str) -> Result<Node> {
        let mismatch = |expected, found| AppError::TypeMismatch {
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            expected,
            found,
        };

        match (self, node) {
            (View::Directory, node @ Node::Directory(_)) | (View::File, node @ Node::File(_)) => Ok(node),
            (View::Directory, Node::File(_)) => Err(mismatch("tree", "blob")),
            (View::File, Node::Directory(_)) => Err(mismatch("blob", "tree")),
        }
    }
}

impl GitRepository {
    pub fn walk(&self, root: &Tree, path: &str) -> Result<Node> {
        let segments = split_path(path);
        let mut current = root.clone();
        let mut walked = String::new();

        for (idx, segment) in segments.iter().enumerate() {
            self.check_deadline()?;

            if !walked.is_empty() {
                walked.push('/');
            }
            walked.push_str(segment);

            let (kind, id) = {
                let entry = current
                    .get_name(segment)
                    .ok_or_else(|| AppError::PathNotFound(walked.clone()))?;
                (EntryKind::from_object_type(entry.kind()), entry.id())
            };
            let is_last = idx + 1 == segments.len();

            match kind {
                EntryKind::Tree => current = self.repo.find_tree(id)?,
                EntryKind::Blob if is_last => {
                    let blob = self.repo.find_blob(id)?;
                    return Ok(Node::File(BlobContent {
                        path: walked,
                        oid: id.to_string(),
                        content: blob.content().to_vec(),
                        is_binary: blob.is_binary(),
                    }));
                }
                found => {
                    return Err(AppError::TypeMismatch {
                        path: walked,
                        expected: if is_last { "tree or blob" } else { "tree" },
                        found: found.as_str(),
                    });
                }
            }
        }

        Ok(Node::Directory(self.list_tree(&current, &walked)?))
    }

    pub fn open_path(&self, root: &Tree, path: &str, view: View) -> Result<Node> {
        let node = self.walk(root, path)?;
        view.expect(node, &normalize_path(path))
    }

    pub fn list_directory(&self, root: &Tree, path: &str) -> Result<Vec<TreeEntry>> {
        match self.open_path(root, path, View::Directory)? {
            Node::Directory(entries) => Ok(entries),
            Node::File(_) => Err(AppError::Internal("directory view returned a file".to_string())),
        }
    }

    pub fn read_file(&self, root: &Tree, path: &str) -> Result<BlobContent> {
        match self.open_path(root, path, View::File)? {
            Node::File(blob) => Ok(blob),
            Node::Directory(_) => Err(AppError::Internal("file view returned a directory".to_string())),
        }
    }

    fn list_tree(&self, tree: &Tree, base_path: &str) -> Result<Vec<TreeEntry>> {
        let odb = self.repo.odb()?;
        let mut entries: Vec<(Vec<u8>, TreeEntry)> = Vec::with_capacity(tree.len());

        for entry in tree.iter() {
            self.check_deadline()?;

            let raw_name = entry.name_bytes().to_vec();
            let name = String::from_utf8_lossy(&raw_name).to_string();
            let path = if base_path.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", base_path, name)
            };
            let kind = EntryKind::from_object_type(entry.kind());

            // Header read only; avoids inflating the blob.
            let size = if kind == EntryKind::Blob {
                let (size, _) = odb.read_header(entry.id())?;
                Some(size as u64)
            } else {
                None
            };

            entries.push((
                raw_name,
                TreeEntry {
                    name,
                    path,
                    kind,
                    oid: entry.id().to_string(),
                    mode: entry.filemode(),
                    size,
                },
            ));
        }

        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries.into_iter().map(|(_, entry)| entry).collect())
    }
}
