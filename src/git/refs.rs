use std::collections::HashSet;

use git2::{ErrorCode, Reference};

use crate::error::Result;
use crate::git::repository::GitRepository;
use crate::models::{RefInfo, RefKind};

fn ref_kind(reference: &Reference) -> RefKind {
    if reference.is_branch() {
        RefKind::Branch
    } else if reference.is_tag() {
        RefKind::Tag
    } else if reference.is_remote() {
        RefKind::Remote
    } else {
        RefKind::Other
    }
}

impl GitRepository {
    /// Every reference in the repository, sorted by full name.
    pub fn list_refs(&self) -> Result<Vec<RefInfo>> {
        let head_name = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.name().map(str::to_string));

        let mut refs = Vec::new();
        for reference in self.repo.references()? {
            let reference = reference?;
            let Some(name) = reference.name().map(str::to_string) else {
                continue;
            };

            // A symbolic ref may point at a ref that does not exist yet.
            let target = match reference.resolve() {
                Ok(resolved) => resolved.target().map(|oid| oid.to_string()),
                Err(e) if e.code() == ErrorCode::NotFound => None,
                Err(e) => return Err(e.into()),
            };

            refs.push(RefInfo {
                shorthand: reference.shorthand().unwrap_or(&name).to_string(),
                kind: ref_kind(&reference),
                target,
                is_head: head_name.as_deref() == Some(name.as_str()),
                name,
            });
        }

        refs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(refs)
    }

    /// Short names of branches and tags, for ref pickers. A name shared by
    /// a branch and a tag appears once.
    pub fn ref_shorthands(&self) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        Ok(self
            .list_refs()?
            .into_iter()
            .filter(|r| matches!(r.kind, RefKind::Branch | RefKind::Tag))
            .map(|r| r.shorthand)
            .filter(|name| seen.insert(name.clone()))
            .collect())
    }
}
