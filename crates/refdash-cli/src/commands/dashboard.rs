use anyhow::Result;
use colored::Colorize;
use refdash_application::{DashboardQuery, DashboardService, DashboardState};
use refdash_core::routing::DASHBOARD_HOME_PATH;

use super::AppContext;
use crate::render;

pub async fn run(ctx: &AppContext, query: DashboardQuery) -> Result<()> {
    ctx.require(DASHBOARD_HOME_PATH)?;
    show(ctx, &query).await
}

pub async fn show(ctx: &AppContext, query: &DashboardQuery) -> Result<()> {
    let service = DashboardService::new(ctx.backend.clone());

    match (service.load().await, service.tables(query)) {
        (DashboardState::Ready(_), Some(tables)) => {
            if let Some(repo) = &tables.selected {
                if !tables.repositories.contains(repo) {
                    println!(
                        "{}",
                        format!("⚠ No activity for {repo}. Known: {}", tables.repositories.join(", "))
                            .yellow()
                    );
                }
            }
            println!("{}", render::dashboard(&tables));
        }
        _ => println!("{}", render::empty_state()),
    }
    Ok(())
}
