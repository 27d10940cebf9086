//! Bot configuration: which branches the bot tracks and where it opens PRs.
//!
//! [`BotConfiguration`] mirrors the backend payload of
//! `api/account/github/configurations/`. [`ConfigurationDraft`] is the
//! user-editable form state; it validates itself and applies its selection
//! onto a freshly fetched configuration before it is written back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown after a successful save.
pub const SAVE_SUCCESS_MESSAGE: &str = "Your Configurations are saved successfully.";

/// Shown after a failed or rejected save.
pub const SAVE_FAILURE_MESSAGE: &str = "Something went wrong, Configurations weren't saved.";

/// A branch option with its current selection flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchOption {
    pub name: String,
    #[serde(default)]
    pub is_selected: bool,
}

/// One repository the bot has access to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub repo_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Branches the bot can track for new commits.
    #[serde(default)]
    pub source_branches: Vec<BranchOption>,
    /// Branches the bot can open pull requests against.
    #[serde(default)]
    pub target_branches: Vec<BranchOption>,
}

impl RepositoryConfig {
    /// Currently selected target branch, if any.
    pub fn selected_target(&self) -> Option<&str> {
        self.target_branches
            .iter()
            .find(|b| b.is_selected)
            .map(|b| b.name.as_str())
    }

    /// Currently tracked branches, in option order.
    pub fn selected_sources(&self) -> Vec<String> {
        self.source_branches
            .iter()
            .filter(|b| b.is_selected)
            .map(|b| b.name.clone())
            .collect()
    }
}

/// The full configuration document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BotConfiguration {
    #[serde(default)]
    pub repositories: Vec<RepositoryConfig>,
    /// Minutes between bot runs.
    #[serde(default)]
    pub commit_interval: Option<i64>,
    /// Lower bound on changed lines before the bot refactors.
    #[serde(default)]
    pub max_lines: Option<i64>,
}

impl BotConfiguration {
    pub fn repository(&self, name: &str) -> Option<&RepositoryConfig> {
        self.repositories.iter().find(|r| r.name == name)
    }

    fn repository_mut(&mut self, name: &str) -> Option<&mut RepositoryConfig> {
        self.repositories.iter_mut().find(|r| r.name == name)
    }
}

/// Why a configuration draft cannot be saved.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigurationError {
    #[error("no repository selected")]
    MissingRepository,
    #[error("no target branch selected")]
    MissingTargetBranch,
    #[error("no tracked branch selected")]
    MissingTrackedBranches,
    #[error("repository '{0}' is not available")]
    UnknownRepository(String),
    #[error("branch '{branch}' does not exist in '{repository}'")]
    UnknownBranch { repository: String, branch: String },
    #[error("commit interval must be positive")]
    NonPositiveCommitInterval,
    #[error("line count must be positive")]
    NonPositiveMaxLines,
}

/// Editable form state for the settings view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigurationDraft {
    pub repository: Option<String>,
    pub target_branch: Option<String>,
    pub tracked_branches: Vec<String>,
    pub commit_interval: i64,
    pub max_lines: i64,
}

impl ConfigurationDraft {
    /// A fresh form: nothing selected, numeric fields prefilled.
    pub fn from_configuration(config: &BotConfiguration) -> Self {
        Self {
            repository: None,
            target_branch: None,
            tracked_branches: Vec::new(),
            commit_interval: config.commit_interval.unwrap_or_default(),
            max_lines: config.max_lines.unwrap_or_default(),
        }
    }

    /// Chooses a repository and preselects its current branch selection.
    pub fn select_repository(
        &mut self,
        config: &BotConfiguration,
        name: &str,
    ) -> Result<(), ConfigurationError> {
        let repository = config
            .repository(name)
            .ok_or_else(|| ConfigurationError::UnknownRepository(name.to_string()))?;

        self.repository = Some(repository.name.clone());
        self.target_branch = repository.selected_target().map(str::to_string);
        self.tracked_branches = repository.selected_sources();
        Ok(())
    }

    /// Checks the draft without contacting the backend.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.repository.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigurationError::MissingRepository);
        }
        if self.target_branch.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigurationError::MissingTargetBranch);
        }
        if self.tracked_branches.is_empty() {
            return Err(ConfigurationError::MissingTrackedBranches);
        }
        if self.commit_interval <= 0 {
            return Err(ConfigurationError::NonPositiveCommitInterval);
        }
        if self.max_lines <= 0 {
            return Err(ConfigurationError::NonPositiveMaxLines);
        }
        Ok(())
    }

    /// Writes the draft's selection onto `config`.
    ///
    /// On the chosen repository exactly the chosen target branch and the
    /// tracked branches end up selected. Other repositories are untouched.
    pub fn apply_to(
        &self,
        mut config: BotConfiguration,
    ) -> Result<BotConfiguration, ConfigurationError> {
        self.validate()?;

        let name = self.repository.as_deref().unwrap_or_default();
        let target = self.target_branch.as_deref().unwrap_or_default();

        let repository = config
            .repository_mut(name)
            .ok_or_else(|| ConfigurationError::UnknownRepository(name.to_string()))?;

        if !repository.target_branches.iter().any(|b| b.name == target) {
            return Err(ConfigurationError::UnknownBranch {
                repository: name.to_string(),
                branch: target.to_string(),
            });
        }
        if let Some(missing) = self
            .tracked_branches
            .iter()
            .find(|t| !repository.source_branches.iter().any(|b| &b.name == *t))
        {
            return Err(ConfigurationError::UnknownBranch {
                repository: name.to_string(),
                branch: missing.clone(),
            });
        }

        for branch in &mut repository.target_branches {
            branch.is_selected = branch.name == target;
        }
        for branch in &mut repository.source_branches {
            branch.is_selected = self.tracked_branches.contains(&branch.name);
        }

        config.commit_interval = Some(self.commit_interval);
        config.max_lines = Some(self.max_lines);
        Ok(config)
    }
}
