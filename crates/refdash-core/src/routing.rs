//! Route table and auth gate.
//!
//! Public-only pages make no sense for a signed-in user and bounce to the
//! dashboard; protected pages bounce anonymous users to the landing page and
//! remember where they were headed.

/// Landing page with the GitHub sign-in button.
pub const LANDING_PATH: &str = "/";

/// Where a freshly signed-in user goes when no path was remembered.
pub const DASHBOARD_HOME_PATH: &str = "/dashboard/home";

const PUBLIC_ROUTES: &[&str] = &["/", "/about", "/documentation"];

const PROTECTED_ROUTES: &[&str] = &[
    "/dashboard",
    "/dashboard/home",
    "/dashboard/refactorings",
    "/dashboard/settings",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Only shown to anonymous users.
    Public,
    /// Requires an authenticated session.
    Protected,
    Unknown,
}

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render { path: String },
    Redirect {
        to: String,
        /// Path to return to after sign-in.
        remember: Option<String>,
    },
    NotFound { path: String },
}

/// Strips query/fragment and trailing slashes (`/dashboard/` is `/dashboard`).
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        LANDING_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

pub fn classify(path: &str) -> RouteKind {
    let path = normalize_path(path);
    if PUBLIC_ROUTES.contains(&path.as_str()) {
        RouteKind::Public
    } else if PROTECTED_ROUTES.contains(&path.as_str()) {
        RouteKind::Protected
    } else {
        RouteKind::Unknown
    }
}

/// Decides what happens when `path` is requested.
pub fn guard(path: &str, authenticated: bool) -> GuardDecision {
    let normalized = normalize_path(path);
    match (classify(&normalized), authenticated) {
        (RouteKind::Protected, false) => GuardDecision::Redirect {
            to: LANDING_PATH.to_string(),
            remember: Some(normalized),
        },
        (RouteKind::Public, true) => GuardDecision::Redirect {
            to: DASHBOARD_HOME_PATH.to_string(),
            remember: None,
        },
        (RouteKind::Unknown, _) => GuardDecision::NotFound { path: normalized },
        _ => GuardDecision::Render { path: normalized },
    }
}
