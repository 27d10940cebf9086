use anyhow::Result;
use clap::{Parser, Subcommand};
use refdash_application::DashboardQuery;
use refdash_core::table::{Order, SortSpec};
use refdash_infrastructure::RefdashPaths;
use std::path::PathBuf;

mod commands;
mod logging;
mod render;

use commands::AppContext;
use commands::config::ConfigEdit;

#[derive(Parser)]
#[command(name = "refdash")]
#[command(about = "Refactoring bot dashboard client", long_about = None)]
struct Cli {
    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Data directory (defaults to $REFDASH_HOME or the platform config dir)
    #[arg(long, global = true, value_name = "DIR")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with GitHub
    Login {
        /// OAuth code returned by GitHub
        #[arg(long, conflicts_with = "callback")]
        code: Option<String>,
        /// Full callback URL GitHub redirected to
        #[arg(long)]
        callback: Option<String>,
        /// Page to open after signing in
        #[arg(long, value_name = "PATH")]
        return_to: Option<String>,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Status,
    /// Open a page by path, e.g. /dashboard/settings
    Open { path: String },
    /// Commits on tracked branches and bot pull requests
    Dashboard {
        /// Only show this repository (owner/name)
        #[arg(long)]
        repo: Option<String>,
        /// Commit column to sort by
        #[arg(long, default_value = "date")]
        commits_by: String,
        #[arg(long, default_value_t = Order::Ascending)]
        commit_order: Order,
        /// Pull request column to sort by
        #[arg(long, default_value = "pull_id")]
        prs_by: String,
        #[arg(long, default_value_t = Order::Ascending)]
        pr_order: Order,
    },
    /// Bot configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Local client settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show tracked repositories and branches
    Show,
    /// Change the tracked branches of a repository
    Set {
        #[arg(long)]
        repo: String,
        /// Branch pull requests are opened against
        #[arg(long)]
        target: Option<String>,
        /// Branch to track (repeatable)
        #[arg(long = "track", value_name = "BRANCH")]
        tracked: Vec<String>,
        /// Minutes between commit checks
        #[arg(long)]
        commit_interval: Option<i64>,
        /// Minimum changed lines before refactoring
        #[arg(long)]
        max_lines: Option<i64>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the settings file location
    Path,
    /// Print the effective settings
    Show,
    /// Write default settings if none exist
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = RefdashPaths::new(cli.home)?;
    let _log_guard = logging::init(&paths.logs_dir(), cli.verbose);
    tracing::debug!("[main] Using data directory {}", paths.config_dir().display());

    if let Commands::Settings { action } = &cli.command {
        return match action {
            SettingsAction::Path => commands::settings::path(&paths),
            SettingsAction::Show => commands::settings::show(&paths),
            SettingsAction::Init => commands::settings::init(&paths),
        };
    }

    let ctx = AppContext::build(&paths).await?;

    match cli.command {
        Commands::Login {
            code,
            callback,
            return_to,
        } => commands::auth::login(&ctx, code, callback, return_to).await?,
        Commands::Logout => commands::auth::logout(&ctx).await?,
        Commands::Status => commands::auth::status(&ctx)?,
        Commands::Open { path } => commands::auth::open(&ctx, &path).await?,
        Commands::Dashboard {
            repo,
            commits_by,
            commit_order,
            prs_by,
            pr_order,
        } => {
            let query = DashboardQuery {
                repository: repo,
                commit_sort: SortSpec::new(commits_by, commit_order),
                pull_request_sort: SortSpec::new(prs_by, pr_order),
            };
            commands::dashboard::run(&ctx, query).await?
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_show(&ctx).await?,
            ConfigAction::Set {
                repo,
                target,
                tracked,
                commit_interval,
                max_lines,
            } => {
                let edit = ConfigEdit {
                    repository: Some(repo),
                    target_branch: target,
                    tracked_branches: tracked,
                    commit_interval,
                    max_lines,
                };
                commands::config::set(&ctx, edit).await?
            }
        },
        Commands::Settings { .. } => {}
    }

    Ok(())
}
