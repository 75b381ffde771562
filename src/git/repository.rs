use std::path::Path;

use chrono::{DateTime, FixedOffset, Utc};
use git2::{Commit, Repository, RepositoryOpenFlags};

use crate::config::Deadline;
use crate::error::Result;
use crate::models::{AuthorInfo, CommitDetail, CommitInfo, RepositoryResponse};

/// A repository handle scoped to a single request. Dropping it releases the
/// underlying libgit2 handle.
pub struct GitRepository {
    pub repo: Repository,
    pub name: String,
    deadline: Deadline,
}

impl GitRepository {
    /// Open exactly `path`, without searching parent directories.
    pub fn open_at<P: AsRef<Path>>(name: &str, path: P) -> std::result::Result<Self, git2::Error> {
        let repo = Repository::open_ext(
            path.as_ref(),
            RepositoryOpenFlags::NO_SEARCH,
            std::iter::empty::<&std::ffi::OsStr>(),
        )?;

        Ok(Self {
            repo,
            name: name.to_string(),
            deadline: Deadline::none(),
        })
    }

    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn check_deadline(&self) -> Result<()> {
        self.deadline.check()
    }

    /// Header shared by every revision-scoped view.
    pub fn repository_response(&self, revision: &str, commit: &Commit) -> Result<RepositoryResponse> {
        Ok(RepositoryResponse {
            name: self.name.clone(),
            revision: revision.to_string(),
            refs: self.ref_shorthands()?,
            commit: commit_to_info(commit),
        })
    }
}

pub fn commit_to_info(commit: &Commit) -> CommitInfo {
    let timestamp = commit.time().seconds();
    CommitInfo {
        oid: commit.id().to_string(),
        message: commit.message().unwrap_or("").trim().to_string(),
        author: commit.author().name().unwrap_or("Unknown").to_string(),
        timestamp,
        relative_time: format_relative_time(timestamp),
    }
}

pub fn commit_to_detail(commit: &Commit) -> CommitDetail {
    let author = commit.author();
    let committer = commit.committer();
    let time = commit.time();

    CommitDetail {
        oid: commit.id().to_string(),
        summary: commit.summary().unwrap_or("").to_string(),
        message: commit.message().unwrap_or("").trim().to_string(),
        author: AuthorInfo {
            name: author.name().unwrap_or("Unknown").to_string(),
            email: author.email().unwrap_or("").to_string(),
        },
        committer: AuthorInfo {
            name: committer.name().unwrap_or("Unknown").to_string(),
            email: committer.email().unwrap_or("").to_string(),
        },
        timestamp: time.seconds(),
        date: format_date(time.seconds(), time.offset_minutes()),
        relative_time: format_relative_time(time.seconds()),
        parents: commit.parent_ids().map(|id| id.to_string()).collect(),
    }
}

/// RFC 3339 timestamp in the committer's own offset.
pub fn format_date(timestamp: i64, offset_minutes: i32) -> String {
    let Some(utc) = DateTime::<Utc>::from_timestamp(timestamp, 0) else {
        return String::new();
    };

    match FixedOffset::east_opt(offset_minutes * 60) {
        Some(offset) => utc.with_timezone(&offset).to_rfc3339(),
        None => utc.to_rfc3339(),
    }
}

pub fn format_relative_time(timestamp: i64) -> String {
    relative_time_between(timestamp, Utc::now().timestamp())
}

fn relative_time_between(timestamp: i64, now: i64) -> String {
    let diff = now - timestamp;

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        let mins = diff / 60;
        format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff < 86400 {
        let hours = diff / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff < 2592000 {
        let days = diff / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else if diff < 31536000 {
        let months = diff / 2592000;
        format!("{} month{} ago", months, if months == 1 { "" } else { "s" })
    } else {
        let years = diff / 31536000;
        format!("{} year{} ago", years, if years == 1 { "" } else { "s" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_time_buckets() {
        let now = 1_700_000_000;
        assert_eq!(relative_time_between(now - 5, now), "just now");
        assert_eq!(relative_time_between(now - 60, now), "1 minute ago");
        assert_eq!(relative_time_between(now - 7200, now), "2 hours ago");
        assert_eq!(relative_time_between(now - 86400 * 3, now), "3 days ago");
        assert_eq!(relative_time_between(now - 2592000, now), "1 month ago");
        assert_eq!(relative_time_between(now - 31536000 * 2, now), "2 years ago");
    }

    #[test]
    fn date_keeps_committer_offset() {
        assert_eq!(format_date(0, 0), "1970-01-01T00:00:00+00:00");
        assert_eq!(format_date(0, 120), "1970-01-01T02:00:00+02:00");
    }
}
