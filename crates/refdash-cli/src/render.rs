//! Terminal rendering of dashboard tables and notifications.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use refdash_application::DashboardTables;
use refdash_core::configuration::BotConfiguration;
use refdash_core::dashboard::{CommitRow, EMPTY_STATE_HINT, EMPTY_STATE_TITLE, PullRequestRow};
use refdash_core::notification::Notification;
use refdash_core::session::Session;

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

pub fn commits(rows: &[CommitRow]) -> Table {
    let mut t = table(&["Date", "Repository", "Author", "Message", "SHA"]);
    for row in rows {
        t.add_row(vec![
            row.date.clone(),
            row.repo_name.clone(),
            row.author_name.clone(),
            first_line(&row.message).to_string(),
            row.sha.as_deref().map(|s| s.chars().take(7).collect::<String>()).unwrap_or_default(),
        ]);
    }
    t
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn branches(row: &PullRequestRow) -> String {
    match (row.source_branch.as_deref(), row.target_branch.as_deref()) {
        (Some(source), Some(target)) => format!("{source} -> {target}"),
        (Some(branch), None) | (None, Some(branch)) => branch.to_string(),
        (None, None) => String::new(),
    }
}

pub fn pull_requests(rows: &[PullRequestRow]) -> Table {
    let mut t = table(&["#", "Repository", "Title", "Branches", "+", "-", "State"]);
    for row in rows {
        t.add_row(vec![
            row.pull_id.to_string(),
            row.repository(),
            row.title.clone(),
            branches(row),
            optional(row.additions),
            optional(row.deletions),
            row.state.clone().unwrap_or_default(),
        ]);
    }
    t
}

pub fn dashboard(tables: &DashboardTables) -> String {
    let filter = match &tables.selected {
        Some(repo) => format!("Repository: {repo}"),
        None => format!("Repositories: {}", tables.repositories.join(", ")),
    };
    format!(
        "{}\n\n{}\n{}\n\n{}\n{}",
        filter,
        "Commits".bold(),
        commits(&tables.commits),
        "Pull requests".bold(),
        pull_requests(&tables.pull_requests)
    )
}

pub fn configuration(config: &BotConfiguration) -> String {
    let mut t = table(&["Repository", "Tracked branches", "Target branch", "Other branches"]);
    for repo in &config.repositories {
        let others: Vec<&str> = repo
            .source_branches
            .iter()
            .filter(|b| !b.is_selected)
            .map(|b| b.name.as_str())
            .collect();
        t.add_row(vec![
            repo.name.clone(),
            repo.selected_sources().join(", "),
            repo.selected_target().unwrap_or("-").to_string(),
            others.join(", "),
        ]);
    }

    let number = |n: Option<i64>| n.map_or_else(|| "-".to_string(), |n| n.to_string());
    format!(
        "{}\nCommit interval: {}\nMin lines: {}",
        t,
        number(config.commit_interval),
        number(config.max_lines)
    )
}

pub fn empty_state() -> String {
    format!("{}\n{}", EMPTY_STATE_TITLE.bold(), EMPTY_STATE_HINT)
}

pub fn notification(note: &Notification) -> String {
    if note.is_success() {
        format!("{} {}", "✔".green(), note.message.green())
    } else {
        format!("{} {}", "✘".red(), note.message.red())
    }
}

pub fn session(session: &Session) -> String {
    match session.user() {
        Some(user) => {
            let mut lines = vec![format!(
                "Signed in as {} ({})",
                user.display_name().bold(),
                user.user.user_name
            )];
            if let Some(email) = &user.user.email {
                lines.push(format!("Email: {email}"));
            }
            if let Some(company) = user.user.company.as_deref().filter(|c| !c.is_empty()) {
                lines.push(format!("Company: {company}"));
            }
            if let Some(avatar) = &user.avatar_url {
                lines.push(format!("Avatar: {avatar}"));
            }
            lines.join("\n")
        }
        None => "Not signed in.".to_string(),
    }
}
