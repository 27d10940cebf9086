use anyhow::{Context, Result};
use refdash_infrastructure::{RefdashPaths, SettingsService};

pub fn path(paths: &RefdashPaths) -> Result<()> {
    println!("{}", SettingsService::new(paths).path().display());
    Ok(())
}

/// Prints the effective settings (file plus environment overrides).
pub fn show(paths: &RefdashPaths) -> Result<()> {
    let settings = SettingsService::new(paths)
        .load()
        .context("Failed to load settings")?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

pub fn init(paths: &RefdashPaths) -> Result<()> {
    let service = SettingsService::new(paths);
    if service.init()? {
        println!("✅ Wrote default settings to {}", service.path().display());
        println!("💡 Set github.client_id before running `refdash login`.");
    } else {
        println!("Settings already exist at {}", service.path().display());
    }
    Ok(())
}
