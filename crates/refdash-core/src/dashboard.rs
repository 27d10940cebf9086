//! Dashboard records: tracked-branch commits and bot pull requests.

use crate::table::{Row, SortValue};
use serde::{Deserialize, Serialize};

/// Headline shown when there is nothing to display.
pub const EMPTY_STATE_TITLE: &str = "Oops! Nothing to see here.";

/// Hint shown under [`EMPTY_STATE_TITLE`].
pub const EMPTY_STATE_HINT: &str = "But don't worry, you can set configurations for the bot.";

/// A commit on a tracked branch that the bot looked at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRow {
    #[serde(default)]
    pub pull_id: Option<i64>,
    #[serde(default)]
    pub sha: Option<String>,
    pub message: String,
    pub author_name: String,
    pub date: String,
    /// `owner/repo` slug.
    #[serde(rename = "Repo_name")]
    pub repo_name: String,
}

impl Row for CommitRow {
    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "pull_id" => self.pull_id.into(),
            "sha" => self.sha.clone().into(),
            "message" => self.message.as_str().into(),
            "author_name" => self.author_name.as_str().into(),
            "date" => self.date.as_str().into(),
            "repo_name" | "Repo_name" => self.repo_name.as_str().into(),
            _ => SortValue::Missing,
        }
    }
}

/// A refactoring pull request opened by the bot.
///
/// Only the identifying fields are guaranteed; branch and diff statistics are
/// absent (or `null`) when the backend could not reach GitHub for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestRow {
    /// GitHub API URL of the repository (`https://api.github.com/repos/owner/repo`).
    #[serde(rename = "Repo_name")]
    pub repo_name: String,
    pub pull_id: i64,
    pub author: String,
    pub title: String,
    #[serde(default)]
    pub source_branch: Option<String>,
    #[serde(default)]
    pub target_branch: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub additions: Option<i64>,
    #[serde(default)]
    pub deletions: Option<i64>,
    #[serde(default)]
    pub comments_count: Option<i64>,
}

impl PullRequestRow {
    /// `owner/repo` slug derived from the API URL.
    pub fn repository(&self) -> String {
        repository_slug(&self.repo_name)
    }
}

impl Row for PullRequestRow {
    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "pull_id" => self.pull_id.into(),
            "author" => self.author.as_str().into(),
            "title" => self.title.as_str().into(),
            "source_branch" => self.source_branch.clone().into(),
            "target_branch" => self.target_branch.clone().into(),
            "state" => self.state.clone().into(),
            "additions" => self.additions.into(),
            "deletions" => self.deletions.into(),
            "comments_count" => self.comments_count.into(),
            "repo_name" | "Repo_name" => self.repository().into(),
            _ => SortValue::Missing,
        }
    }
}

/// Body of `POST api/account/dashboard/home/`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(rename = "json_branch_data", default)]
    pub commits: Vec<CommitRow>,
    #[serde(rename = "json_pr_data", default)]
    pub pull_requests: Vec<PullRequestRow>,
}

impl DashboardData {
    /// The dashboard only renders when both lists have data.
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty() || self.pull_requests.is_empty()
    }

    /// Repository choices, de-duplicated in first-seen order.
    pub fn repositories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for pr in &self.pull_requests {
            let slug = pr.repository();
            if !seen.contains(&slug) {
                seen.push(slug);
            }
        }
        seen
    }

    /// Rows belonging to one `owner/repo`.
    pub fn for_repository(&self, repository: &str) -> DashboardData {
        DashboardData {
            commits: self
                .commits
                .iter()
                .filter(|c| c.repo_name == repository)
                .cloned()
                .collect(),
            pull_requests: self
                .pull_requests
                .iter()
                .filter(|pr| pr.repository() == repository)
                .cloned()
                .collect(),
        }
    }
}

/// Last two `/`-separated segments of a repository URL.
pub fn repository_slug(url: &str) -> String {
    let segments: Vec<&str> = url
        .trim_end_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    let start = segments.len().saturating_sub(2);
    segments[start..].join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> DashboardData {
        serde_json::from_value(json!({
            "json_branch_data": [
                {"pull_id": 1, "sha": "a1", "message": "fix", "author_name": "ana", "date": "2024-01-02", "Repo_name": "octo/alpha"},
                {"pull_id": 2, "sha": "b2", "message": "feat", "author_name": "bo", "date": "2024-01-01", "Repo_name": "octo/beta"}
            ],
            "json_pr_data": [
                {"Repo_name": "https://api.github.com/repos/octo/alpha", "pull_id": 11, "author": "bot", "title": "Refactor a",
                 "source_branch": "refactor-a", "target_branch": "main", "state": "open", "additions": 3, "deletions": 1, "comments_count": 0},
                {"Repo_name": "https://api.github.com/repos/octo/beta", "pull_id": 12, "author": "bot", "title": "Refactor b",
                 "source_branch": "refactor-b", "target_branch": "dev", "additions": 10, "deletions": 2},
                {"Repo_name": "https://api.github.com/repos/octo/alpha/", "pull_id": 13, "author": "bot", "title": "Refactor c",
                 "source_branch": "refactor-c", "target_branch": "main", "additions": 0, "deletions": 0}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_repository_slug() {
        assert_eq!(repository_slug("https://api.github.com/repos/octo/alpha"), "octo/alpha");
        assert_eq!(repository_slug("https://api.github.com/repos/octo/alpha/"), "octo/alpha");
        assert_eq!(repository_slug("alpha"), "alpha");
        assert_eq!(repository_slug(""), "");
    }

    #[test]
    fn test_repositories_first_seen_order() {
        assert_eq!(sample().repositories(), vec!["octo/alpha", "octo/beta"]);
    }

    #[test]
    fn test_for_repository_filters_both_lists() {
        let alpha = sample().for_repository("octo/alpha");
        assert_eq!(alpha.commits.len(), 1);
        assert_eq!(alpha.commits[0].sha.as_deref(), Some("a1"));
        assert_eq!(
            alpha.pull_requests.iter().map(|p| p.pull_id).collect::<Vec<_>>(),
            vec![11, 13]
        );
    }

    #[test]
    fn test_empty_when_either_list_is_empty() {
        let mut data = sample();
        assert!(!data.is_empty());
        data.commits.clear();
        assert!(data.is_empty());
        assert!(DashboardData::default().is_empty());
    }

    #[test]
    fn test_row_keys() {
        let data = sample();
        assert_eq!(data.commits[0].sort_value("date"), SortValue::from("2024-01-02"));
        assert_eq!(data.pull_requests[1].sort_value("additions"), SortValue::Int(10));
        assert_eq!(data.pull_requests[1].sort_value("state"), SortValue::Missing);
        assert_eq!(data.pull_requests[0].sort_value("nope"), SortValue::Missing);
    }

    #[test]
    fn test_pull_request_without_github_status_still_parses() {
        let data: DashboardData = serde_json::from_value(json!({
            "json_branch_data": [
                {"sha": "a1", "message": "fix", "author_name": "ana", "date": "2024-01-02", "Repo_name": "octo/alpha"}
            ],
            "json_pr_data": [
                {"Repo_name": "https://api.github.com/repos/octo/alpha", "pull_id": 11, "author": "bot", "title": "Refactor a"},
                {"Repo_name": "https://api.github.com/repos/octo/alpha", "pull_id": 12, "author": "bot", "title": "Refactor b",
                 "source_branch": null, "target_branch": null, "additions": null, "deletions": null, "state": null}
            ]
        }))
        .unwrap();

        assert!(!data.is_empty());
        let bare = &data.pull_requests[0];
        assert_eq!(bare.source_branch, None);
        assert_eq!(bare.additions, None);
        assert_eq!(bare.sort_value("additions"), SortValue::Missing);
        assert_eq!(data.pull_requests[1].sort_value("target_branch"), SortValue::Missing);
        assert_eq!(data.repositories(), vec!["octo/alpha"]);
    }
}
