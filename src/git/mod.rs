//! Git access layer on top of git2.
//!
//! - `locator`: find and open repositories under the root
//! - `revision`: ref text to commit
//! - `tree`: path walking to directory listings and file content
//! - `history`: first-parent history and commit detail
//! - `diff`: tree-to-tree diffs
//! - `refs`: reference listings

pub mod diff;
pub mod history;
pub mod locator;
pub mod refs;
pub mod repository;
pub mod revision;
pub mod tree;

pub use locator::{list_repositories, open_repository};
pub use repository::GitRepository;
