//! Dashboard view: commits on tracked branches and bot pull requests.

use crate::view::ViewState;
use refdash_core::backend::AccountBackend;
use refdash_core::dashboard::{CommitRow, DashboardData, PullRequestRow};
use refdash_core::table::{SortSpec, stable_sort};
use std::sync::Arc;

/// What the dashboard view currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashboardState {
    #[default]
    Loading,
    /// Failed load or no data ("Oops! Nothing to see here.").
    Empty,
    Ready(DashboardData),
}

/// User-selected repository filter and column orders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardQuery {
    pub repository: Option<String>,
    pub commit_sort: SortSpec,
    pub pull_request_sort: SortSpec,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self {
            repository: None,
            commit_sort: SortSpec::ascending("date"),
            pull_request_sort: SortSpec::ascending("pull_id"),
        }
    }
}

/// Rows ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardTables {
    pub repositories: Vec<String>,
    pub selected: Option<String>,
    pub commits: Vec<CommitRow>,
    pub pull_requests: Vec<PullRequestRow>,
}

impl DashboardTables {
    pub fn build(data: &DashboardData, query: &DashboardQuery) -> Self {
        let filtered;
        let visible = match query.repository.as_deref() {
            Some(repository) => {
                filtered = data.for_repository(repository);
                &filtered
            }
            None => data,
        };

        Self {
            repositories: data.repositories(),
            selected: query.repository.clone(),
            commits: stable_sort(
                &visible.commits,
                &query.commit_sort.key,
                query.commit_sort.order,
            ),
            pull_requests: stable_sort(
                &visible.pull_requests,
                &query.pull_request_sort.key,
                query.pull_request_sort.order,
            ),
        }
    }
}

pub struct DashboardService {
    backend: Arc<dyn AccountBackend>,
    view: ViewState<DashboardState>,
}

impl DashboardService {
    pub fn new(backend: Arc<dyn AccountBackend>) -> Self {
        Self {
            backend,
            view: ViewState::default(),
        }
    }

    /// Fetches the dashboard and returns the state shown afterwards.
    ///
    /// Failures are logged and shown as the empty state. If a newer load was
    /// started meanwhile, this result is discarded.
    pub async fn load(&self) -> DashboardState {
        let ticket = self.view.begin();

        let state = match self.backend.fetch_dashboard().await {
            Ok(data) if data.is_empty() => DashboardState::Empty,
            Ok(data) => DashboardState::Ready(data),
            Err(e) => {
                tracing::error!("[DashboardService] Failed to load dashboard: {}", e);
                DashboardState::Empty
            }
        };

        if !self.view.settle(ticket, state) {
            tracing::debug!("[DashboardService] Ignoring stale dashboard response");
        }
        self.view.get()
    }

    pub fn state(&self) -> DashboardState {
        self.view.get()
    }

    /// Tables for the current state, or `None` unless data is loaded.
    pub fn tables(&self, query: &DashboardQuery) -> Option<DashboardTables> {
        match self.view.get() {
            DashboardState::Ready(data) => Some(DashboardTables::build(&data, query)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockAccountBackend;
    use refdash_core::error::RefdashError;
    use refdash_core::table::Order;
    use std::time::Duration;

    fn commit(sha: &str, date: &str, repo: &str) -> CommitRow {
        CommitRow {
            pull_id: None,
            sha: Some(sha.to_string()),
            message: format!("commit {sha}"),
            author_name: "ana".to_string(),
            date: date.to_string(),
            repo_name: repo.to_string(),
        }
    }

    fn pull(id: i64, repo: &str) -> PullRequestRow {
        PullRequestRow {
            repo_name: format!("https://api.github.com/repos/{repo}"),
            pull_id: id,
            author: "bot".to_string(),
            title: format!("Refactor #{id}"),
            source_branch: Some(format!("refactor-{id}")),
            target_branch: Some("main".to_string()),
            state: None,
            additions: Some(id * 2),
            deletions: Some(id),
            comments_count: None,
        }
    }

    fn data() -> DashboardData {
        DashboardData {
            commits: vec![
                commit("c2", "2024-01-02", "octo/alpha"),
                commit("c1", "2024-01-01", "octo/alpha"),
                commit("c3", "2024-01-01", "octo/beta"),
            ],
            pull_requests: vec![pull(12, "octo/beta"), pull(3, "octo/alpha"), pull(7, "octo/alpha")],
        }
    }

    #[test]
    fn test_default_ordering() {
        let tables = DashboardTables::build(&data(), &DashboardQuery::default());
        let shas: Vec<_> = tables.commits.iter().map(|c| c.sha.clone().unwrap()).collect();
        assert_eq!(shas, vec!["c1", "c3", "c2"]);
        let ids: Vec<_> = tables.pull_requests.iter().map(|p| p.pull_id).collect();
        assert_eq!(ids, vec![3, 7, 12]);
        assert_eq!(tables.repositories, vec!["octo/beta", "octo/alpha"]);
    }

    #[test]
    fn test_repository_filter_and_descending_sort() {
        let query = DashboardQuery {
            repository: Some("octo/alpha".to_string()),
            pull_request_sort: SortSpec::new("additions", Order::Descending),
            ..Default::default()
        };
        let tables = DashboardTables::build(&data(), &query);

        assert_eq!(tables.commits.len(), 2);
        assert!(tables.commits.iter().all(|c| c.repo_name == "octo/alpha"));
        let ids: Vec<_> = tables.pull_requests.iter().map(|p| p.pull_id).collect();
        assert_eq!(ids, vec![7, 3]);
        assert_eq!(tables.repositories.len(), 2);
    }

    #[tokio::test]
    async fn test_failure_shows_empty_state() {
        let backend = Arc::new(MockAccountBackend::default());
        backend.push_dashboard(Duration::ZERO, Err(RefdashError::transport("offline")));
        let service = DashboardService::new(backend);

        assert_eq!(service.state(), DashboardState::Loading);
        assert_eq!(service.load().await, DashboardState::Empty);
        assert!(service.tables(&DashboardQuery::default()).is_none());
    }

    #[tokio::test]
    async fn test_empty_list_shows_empty_state() {
        let backend = Arc::new(MockAccountBackend::default());
        let mut only_commits = data();
        only_commits.pull_requests.clear();
        backend.push_dashboard(Duration::ZERO, Ok(only_commits));

        let service = DashboardService::new(backend);
        assert_eq!(service.load().await, DashboardState::Empty);
    }

    #[tokio::test]
    async fn test_stale_response_is_ignored() {
        let backend = Arc::new(MockAccountBackend::default());
        backend.push_dashboard(Duration::from_millis(50), Ok(data()));
        backend.push_dashboard(Duration::from_millis(5), Err(RefdashError::transport("offline")));
        let service = DashboardService::new(backend);

        let (first, second) = tokio::join!(service.load(), service.load());

        assert_eq!(second, DashboardState::Empty);
        assert_eq!(first, DashboardState::Empty);
        assert_eq!(service.state(), DashboardState::Empty);
    }
}
