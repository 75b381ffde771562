//! Fixtures for unit tests: bare repositories built with git2 under a
//! temporary root directory.

use std::collections::BTreeMap;
use std::path::Path;

use git2::{Commit, Oid, Repository, Signature, Time};
use tempfile::TempDir;

use crate::config::Config;

pub(crate) struct TestRoot {
    dir: TempDir,
}

impl TestRoot {
    pub(crate) fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn config(&self) -> Config {
        Config::new(self.path())
    }

    /// Create `{root}/{dir_name}` as a bare repository with `HEAD` on master.
    pub(crate) fn init_bare(&self, dir_name: &str) -> Repository {
        let repo = Repository::init_bare(self.path().join(dir_name)).expect("init bare repo");
        repo.set_head("refs/heads/master").expect("set HEAD");
        repo
    }
}

pub(crate) fn signature() -> Signature<'static> {
    Signature::new("Test User", "test@example.com", &Time::new(1_700_000_000, 0))
        .expect("valid signature")
}

enum Node {
    File(Vec<u8>),
    Dir(BTreeMap<String, Node>),
}

fn insert(dir: &mut BTreeMap<String, Node>, path: &str, content: &[u8]) {
    match path.split_once('/') {
        Some((head, rest)) => {
            let child = dir
                .entry(head.to_string())
                .or_insert_with(|| Node::Dir(BTreeMap::new()));
            if let Node::Dir(children) = child {
                insert(children, rest, content);
            }
        }
        None => {
            dir.insert(path.to_string(), Node::File(content.to_vec()));
        }
    }
}

fn write_dir(repo: &Repository, dir: &BTreeMap<String, Node>) -> Oid {
    let mut builder = repo.treebuilder(None).unwrap();
    for (name, node) in dir {
        let (oid, mode) = match node {
            Node::File(content) => (repo.blob(content).unwrap(), 0o100644),
            Node::Dir(children) => (write_dir(repo, children), 0o040000),
        };
        builder.insert(name.as_str(), oid, mode).unwrap();
    }
    builder.write().unwrap()
}

/// Write a tree from `(path, content)` pairs; `/` in a path creates subtrees.
pub(crate) fn write_tree(repo: &Repository, files: &[(&str, &str)]) -> Oid {
    let mut root = BTreeMap::new();
    for (path, content) in files {
        insert(&mut root, path, content.as_bytes());
    }
    write_dir(repo, &root)
}

/// Create a commit without moving any ref.
pub(crate) fn commit(repo: &Repository, files: &[(&str, &str)], message: &str, parents: &[Oid]) -> Oid {
    let tree = repo.find_tree(write_tree(repo, files)).unwrap();
    let parents: Vec<Commit> = parents.iter().map(|p| repo.find_commit(*p).unwrap()).collect();
    let parent_refs: Vec<&Commit> = parents.iter().collect();
    let sig = signature();
    repo.commit(None, &sig, &sig, message, &tree, &parent_refs).unwrap()
}

pub(crate) fn set_ref(repo: &Repository, name: &str, target: Oid) {
    repo.reference(name, target, true, "test fixture").unwrap();
}

/// Commits of the `demo.git` fixture.
///
/// ```text
/// initial ── second          (master, release branch)
///    │           \
///    └── feature ─ merge     (merged)
/// ```
pub(crate) struct DemoRepo {
    pub root: TestRoot,
    pub initial: Oid,
    pub second: Oid,
    pub feature: Oid,
    pub merge: Oid,
}

pub(crate) const README_V1: &str = "# Demo\n";
pub(crate) const README_V2: &str = "# Demo\n\nSecond revision.\n";

pub(crate) fn demo_repo() -> DemoRepo {
    let root = TestRoot::new();
    let repo = root.init_bare("demo.git");

    let initial = commit(
        &repo,
        &[("README.md", README_V1), ("src/lib.rs", "pub fn one() {}\n")],
        "Initial commit",
        &[],
    );
    let second = commit(
        &repo,
        &[
            ("README.md", README_V2),
            ("src/lib.rs", "pub fn one() {}\n"),
            ("src/main.rs", "fn main() {}\n"),
        ],
        "Add main",
        &[initial],
    );
    let feature = commit(
        &repo,
        &[
            ("README.md", README_V1),
            ("src/lib.rs", "pub fn one() {}\npub fn two() {}\n"),
        ],
        "Feature work",
        &[initial],
    );
    let merge = commit(
        &repo,
        &[
            ("README.md", README_V2),
            ("src/lib.rs", "pub fn one() {}\npub fn two() {}\n"),
            ("src/main.rs", "fn main() {}\n"),
        ],
        "Merge feature",
        &[second, feature],
    );

    set_ref(&repo, "refs/heads/master", second);
    set_ref(&repo, "refs/heads/merged", merge);
    // Same short name in two namespaces: the branch must win.
    set_ref(&repo, "refs/heads/release", second);
    set_ref(&repo, "refs/tags/release", initial);
    set_ref(&repo, "refs/remotes/origin/master", initial);

    let sig = signature();
    let initial_obj = repo.find_object(initial, None).unwrap();
    repo.tag("v1.0", &initial_obj, &sig, "First release", false).unwrap();

    let tree_obj = repo.find_commit(initial).unwrap().tree().unwrap().into_object();
    repo.tag_lightweight("tree-tag", &tree_obj, false).unwrap();

    DemoRepo {
        root,
        initial,
        second,
        feature,
        merge,
    }
}
