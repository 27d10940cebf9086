use anyhow::{Result, bail};
use refdash_application::{ConfigurationForm, ConfigurationService, ConfigurationState};
use refdash_core::configuration::BotConfiguration;

use super::AppContext;
use crate::render;

const SETTINGS_PATH: &str = "/dashboard/settings";

/// Edits applied on top of the loaded configuration.
#[derive(Debug, Default)]
pub struct ConfigEdit {
    pub repository: Option<String>,
    pub target_branch: Option<String>,
    pub tracked_branches: Vec<String>,
    pub commit_interval: Option<i64>,
    pub max_lines: Option<i64>,
}

pub async fn run_show(ctx: &AppContext) -> Result<()> {
    ctx.require(SETTINGS_PATH)?;
    show(ctx).await
}

pub async fn show(ctx: &AppContext) -> Result<()> {
    let service = ConfigurationService::new(ctx.backend.clone());
    match service.load().await {
        ConfigurationState::Ready(config) => println!("{}", render::configuration(&config)),
        _ => println!("{}", render::empty_state()),
    }
    Ok(())
}

pub async fn set(ctx: &AppContext, edit: ConfigEdit) -> Result<()> {
    ctx.require(SETTINGS_PATH)?;

    let service = ConfigurationService::new(ctx.backend.clone());
    let ConfigurationState::Ready(config) = service.load().await else {
        println!("{}", render::empty_state());
        bail!("Configuration could not be loaded");
    };

    let form = edit_form(config, edit)?;
    let note = service.save(form.draft()).await;
    println!("{}", render::notification(&note));

    if !note.is_success() {
        bail!("Configuration was not saved (run with --verbose for details)");
    }
    Ok(())
}

fn edit_form(config: BotConfiguration, edit: ConfigEdit) -> Result<ConfigurationForm> {
    let mut form = ConfigurationForm::new(config);

    if let Some(name) = &edit.repository {
        form.select_repository(name)?;
    }

    let draft = form.draft_mut();
    if edit.target_branch.is_some() {
        draft.target_branch = edit.target_branch;
    }
    if !edit.tracked_branches.is_empty() {
        draft.tracked_branches = edit.tracked_branches;
    }
    if let Some(interval) = edit.commit_interval {
        draft.commit_interval = interval;
    }
    if let Some(lines) = edit.max_lines {
        draft.max_lines = lines;
    }
    Ok(form)
}
