//! Version-control history as a metadata source.
//!
//! The build only needs two facts from git: the date a file last changed and
//! a list of recent commit subjects. Both go through the [`History`] trait so
//! the pipeline can run without a repository (`--no-git`) and tests can feed
//! canned answers.
//!
//! Lookups never fail the build. A missing `git` binary, a directory outside
//! any repository, a file with no commits, or unexpected output all come back
//! as `None` (or an empty list) and the caller falls back to declared dates.

use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// One commit from `git log`: strict ISO-8601 committer timestamp and subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub timestamp: String,
    pub subject: String,
}

pub trait History {
    /// Committer date (`YYYY-MM-DD`) of the last commit touching `path`.
    fn last_modified(&self, path: &Path) -> Option<String>;

    /// Up to `limit` most recent commits touching any of `paths`, newest first.
    fn recent_commits(&self, paths: &[&Path], limit: usize) -> Vec<Commit>;
}

/// History backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct Git {
    /// Directory `git log` runs in for [`History::recent_commits`].
    pub repo_dir: PathBuf,
}

impl Git {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }
}

impl History for Git {
    fn last_modified(&self, path: &Path) -> Option<String> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file = path.file_name()?;

        let output = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(["log", "-1", "--format=%cI", "--"])
            .arg(file)
            .output();

        match output {
            Ok(out) if out.status.success() => {
                let date = date_portion(&String::from_utf8_lossy(&out.stdout));
                if date.is_none() {
                    debug!("no commits for {}", path.display());
                }
                date
            }
            Ok(out) => {
                debug!(
                    "git log failed for {}: {}",
                    path.display(),
                    String::from_utf8_lossy(&out.stderr).trim()
                );
                None
            }
            Err(e) => {
                debug!("could not run git for {}: {}", path.display(), e);
                None
            }
        }
    }

    fn recent_commits(&self, paths: &[&Path], limit: usize) -> Vec<Commit> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_dir)
            .arg("log")
            .arg("-n")
            .arg(limit.to_string())
            .args(["--date=iso-strict", "--pretty=format:%cI%x09%s", "--"])
            .args(paths)
            .output();

        match output {
            Ok(out) if out.status.success() => {
                parse_commit_log(&String::from_utf8_lossy(&out.stdout))
            }
            Ok(out) => {
                debug!(
                    "git log failed in {}: {}",
                    self.repo_dir.display(),
                    String::from_utf8_lossy(&out.stderr).trim()
                );
                Vec::new()
            }
            Err(e) => {
                debug!("could not run git in {}: {}", self.repo_dir.display(), e);
                Vec::new()
            }
        }
    }
}

/// History that knows nothing. Every post falls back to its declared date.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl History for NoHistory {
    fn last_modified(&self, _path: &Path) -> Option<String> {
        None
    }

    fn recent_commits(&self, _paths: &[&Path], _limit: usize) -> Vec<Commit> {
        Vec::new()
    }
}

/// First ten characters of a `%cI` timestamp, i.e. the calendar date.
pub fn date_portion(raw: &str) -> Option<String> {
    raw.trim().get(..10).map(str::to_string)
}

/// Parse `%cI<TAB>%s` lines. Lines missing the tab or either half are dropped.
pub fn parse_commit_log(raw: &str) -> Vec<Commit> {
    raw.lines()
        .filter_map(|line| {
            let (timestamp, subject) = line.split_once('\t')?;
            let (timestamp, subject) = (timestamp.trim(), subject.trim());
            if timestamp.is_empty() || subject.is_empty() {
                return None;
            }
            Some(Commit {
                timestamp: timestamp.to_string(),
                subject: subject.to_string(),
            })
        })
        .collect()
}
