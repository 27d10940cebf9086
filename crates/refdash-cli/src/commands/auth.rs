use anyhow::{Context, Result, bail};
use colored::Colorize;
use refdash_application::{DashboardQuery, Navigation, extract_code};
use std::io::{self, BufRead, Write};

use super::{AppContext, config, dashboard};
use crate::render;

pub async fn login(
    ctx: &AppContext,
    code: Option<String>,
    callback: Option<String>,
    return_to: Option<String>,
) -> Result<()> {
    if ctx.store.is_authenticated() {
        println!("{}", render::session(&ctx.store.current()));
        return open(ctx, return_to.as_deref().unwrap_or("/")).await;
    }

    if let Some(path) = return_to {
        ctx.navigator.remember(path);
    }

    let auth = ctx.auth();
    let code = match (code, callback) {
        (Some(code), _) => code,
        (None, Some(callback)) => extract_code(&callback)?,
        (None, None) => {
            let url = auth.authorize_url()?;
            println!("🔑 Sign in with GitHub:\n\n  {}\n", url.as_str().underline());
            print!("Paste the URL you were redirected to: ");
            io::stdout().flush()?;

            let mut line = String::new();
            io::stdin()
                .lock()
                .read_line(&mut line)
                .context("Failed to read callback URL")?;
            extract_code(&line)?
        }
    };

    let destination = auth.complete_login(&code).await.context("Sign-in failed")?;
    println!("✅ {}", render::session(&ctx.store.current()));
    open(ctx, &destination).await
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    let was_authenticated = ctx.store.is_authenticated();
    ctx.store
        .logout()
        .await
        .context("Signed out, but the stored session could not be removed")?;

    if was_authenticated {
        println!("👋 Signed out.");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}

pub fn status(ctx: &AppContext) -> Result<()> {
    println!("{}", render::session(&ctx.store.current()));
    Ok(())
}

/// Shows a page, following the route guard.
pub async fn open(ctx: &AppContext, path: &str) -> Result<()> {
    let shown = match ctx.navigator.navigate(path) {
        Navigation::Show(path) => path,
        Navigation::Redirected { from, to } => {
            println!("{}", format!("↪ {from} redirects to {to}").dimmed());
            to
        }
        Navigation::NotFound(path) => bail!("No page at {}", path),
    };

    match shown.as_str() {
        "/" => {
            println!("{}", "Refactoring bot".bold());
            println!("Run `refdash login` to sign in with GitHub.");
        }
        "/about" => println!("The bot opens pull requests that refactor code on tracked branches."),
        "/documentation" => {
            println!("Track branches with `refdash config set`, then watch `refdash dashboard`.")
        }
        "/dashboard/settings" => config::show(ctx).await?,
        _ => dashboard::show(ctx, &DashboardQuery::default()).await?,
    }
    Ok(())
}
