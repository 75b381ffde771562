//! Revision resolution: user-typed ref text to exactly one commit.
//!
//! Order: empty text falls back to the configured default branch or `HEAD`;
//! a full-length hex id naming an existing object is used directly; then
//! symbolic lookup tries the exact name, `refs/heads/`, `refs/tags/` and
//! `refs/remotes/` in that order; last, an abbreviated hex id.

use git2::{Commit, ErrorCode, Object, Oid, Reference};

use crate::error::{AppError, Result};
use crate::git::repository::GitRepository;

pub const OID_HEX_LEN: usize = 40;
pub const MIN_ABBREV_LEN: usize = 4;

const DWIM_PREFIXES: [&str; 4] = ["", "refs/heads/", "refs/tags/", "refs/remotes/"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Empty,
    Hash(Oid),
    Symbolic(String),
}

impl Revision {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Revision::Empty;
        }
        if text.len() == OID_HEX_LEN && is_hex(text) {
            if let Ok(oid) = Oid::from_str(text) {
                return Revision::Hash(oid);
            }
        }
        Revision::Symbolic(text.to_string())
    }
}

fn is_hex(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_hexdigit())
}

/// `HEAD`, `FETCH_HEAD` and the like live directly in the git dir.
fn is_pseudo_ref(name: &str) -> bool {
    name.bytes().all(|b| b.is_ascii_uppercase() || b == b'_')
}

/// Peel tag objects and require a commit at the end.
fn object_to_commit<'r>(object: Object<'r>, label: &str) -> Result<Commit<'r>> {
    let mut object = object;
    while let Some(tag) = object.as_tag() {
        let target = tag.target()?;
        object = target;
    }

    let kind = object.kind();
    object.into_commit().map_err(|_| {
        AppError::Resolution(format!(
            "'{}' points to a {}, not a commit",
            label,
            kind.map(|k| k.str()).unwrap_or("unknown object")
        ))
    })
}

impl GitRepository {
    pub fn resolve(&self, text: &str, default_branch: Option<&str>) -> Result<Commit<'_>> {
        match Revision::parse(text) {
            Revision::Empty => match default_branch.map(str::trim).filter(|b| !b.is_empty()) {
                Some(branch) => self.resolve_symbolic(branch),
                None => self.resolve_head(),
            },
            Revision::Hash(oid) => match self.repo.find_object(oid, None) {
                Ok(object) => object_to_commit(object, text.trim()),
                // A 40-digit name may still be a branch or tag.
                Err(e) if e.code() == ErrorCode::NotFound => self.resolve_symbolic(text.trim()),
                Err(e) => Err(e.into()),
            },
            Revision::Symbolic(name) => self.resolve_symbolic(&name),
        }
    }

    fn resolve_head(&self) -> Result<Commit<'_>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                return Err(AppError::RefNotFound("HEAD".to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let oid = head
            .target()
            .ok_or_else(|| AppError::RefNotFound("HEAD".to_string()))?;
        object_to_commit(self.repo.find_object(oid, None)?, "HEAD")
    }

    fn resolve_symbolic(&self, name: &str) -> Result<Commit<'_>> {
        for prefix in DWIM_PREFIXES {
            self.check_deadline()?;

            // Only full ref names and pseudo refs are looked up as typed,
            // so "config" never reads the git dir's config file.
            if prefix.is_empty() && !(name.starts_with("refs/") || is_pseudo_ref(name)) {
                continue;
            }

            let candidate = format!("{}{}", prefix, name);
            if !Reference::is_valid_name(&candidate) {
                continue;
            }

            let reference = match self.repo.find_reference(&candidate) {
                Ok(reference) => reference,
                Err(e) if matches!(e.code(), ErrorCode::NotFound | ErrorCode::InvalidSpec) => continue,
                Err(e) => return Err(e.into()),
            };

            let oid = reference
                .resolve()
                .ok()
                .and_then(|resolved| resolved.target())
                .ok_or_else(|| AppError::Resolution(format!("'{}' is a dangling reference", candidate)))?;

            tracing::debug!("Resolved '{}' via {} to {}", name, candidate, oid);
            return object_to_commit(self.repo.find_object(oid, None)?, name);
        }

        if (MIN_ABBREV_LEN..OID_HEX_LEN).contains(&name.len()) && is_hex(name) {
            match self.repo.find_object_by_prefix(name, None) {
                Ok(object) => return object_to_commit(object, name),
                Err(e) if e.code() == ErrorCode::Ambiguous => {
                    return Err(AppError::Resolution(format!("ambiguous revision '{}'", name)));
                }
                Err(e) if e.code() == ErrorCode::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::Resolution(format!("unknown revision '{}'", name)))
    }
}
