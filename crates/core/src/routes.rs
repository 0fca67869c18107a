//! Route classification and the two-phase guard decision tables.
//!
//! Guarding is deliberately split in two phases (see `DESIGN.md`):
//!
//! 1. The **edge phase** runs before any page code, sees only the cookie
//!    mirror, and proves no more than "some session exists". It never
//!    decodes the token.
//! 2. The **layout phase** runs after the durable store is readable and
//!    proves "the right kind of session exists" (role checks).
//!
//! Both decision functions here are pure; the async runtimes that apply
//! them live in `stockdeck-app`.

use crate::roles::has_admin;

/// Path users are sent to when a guard denies an unauthenticated request.
pub const LOGIN_PATH: &str = "/login";

/// Root of the admin-only subtree.
pub const ADMIN_ROOT: &str = "/admin";

/// Root of the general (non-admin) dashboard subtree.
pub const DASHBOARD_ROOT: &str = "/dashboard";

/// Paths reachable without any session.
pub const PUBLIC_PATHS: &[&str] = &["/", "/login", "/signup"];

/// Which guard regime a request path falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Public allow-list: home, login, signup.
    Public,
    /// `/admin` and everything below it (admin-only).
    Admin,
    /// `/dashboard` and everything below it (non-admin).
    Dashboard,
    /// Any other path; treated as protected but role-agnostic.
    Other,
}

impl RouteClass {
    /// Classify a request path.
    pub fn classify(path: &str) -> Self {
        if PUBLIC_PATHS.contains(&path) {
            return RouteClass::Public;
        }
        if path == ADMIN_ROOT || path.starts_with("/admin/") {
            return RouteClass::Admin;
        }
        if path == DASHBOARD_ROOT || path.starts_with("/dashboard/") {
            return RouteClass::Dashboard;
        }
        RouteClass::Other
    }
}

/// Outcome of the edge-phase check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDecision {
    /// Let the request through to the layout phase.
    Allow,
    /// No cookie token on a protected path.
    RedirectToLogin,
}

/// Edge-phase guard: public paths pass, protected paths require a
/// non-empty cookie token. Role restriction is explicitly deferred to
/// the layout phase -- the cookie value itself is never inspected beyond
/// presence.
pub fn edge_decision(path: &str, cookie_token: Option<&str>) -> EdgeDecision {
    if RouteClass::classify(path) == RouteClass::Public {
        return EdgeDecision::Allow;
    }
    match cookie_token {
        Some(token) if !token.is_empty() => EdgeDecision::Allow,
        _ => EdgeDecision::RedirectToLogin,
    }
}

/// Which subtree a layout guard protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedSubtree {
    /// Admin-only pages (`/admin/*`).
    AdminOnly,
    /// General dashboard pages (`/dashboard/*`); admins are sent away.
    GeneralUser,
}

/// Terminal outcome of the layout-phase check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutDecision {
    /// Render the subtree.
    Authorized,
    /// Redirect to the given path and render a placeholder meanwhile.
    Redirect(&'static str),
}

/// Layout-phase guard decision table.
///
/// | subtree      | unauthenticated | non-admin              | admin                |
/// |--------------|-----------------|------------------------|----------------------|
/// | `AdminOnly`  | -> `/login`     | -> `/dashboard`        | authorized           |
/// | `GeneralUser`| -> `/login`     | authorized             | -> `/admin`          |
pub fn layout_decision(
    subtree: GuardedSubtree,
    authenticated: bool,
    roles: &[String],
) -> LayoutDecision {
    if !authenticated {
        return LayoutDecision::Redirect(LOGIN_PATH);
    }
    let admin = has_admin(roles);
    match subtree {
        GuardedSubtree::AdminOnly => {
            if admin {
                LayoutDecision::Authorized
            } else {
                LayoutDecision::Redirect(DASHBOARD_ROOT)
            }
        }
        GuardedSubtree::GeneralUser => {
            if admin {
                LayoutDecision::Redirect(ADMIN_ROOT)
            } else {
                LayoutDecision::Authorized
            }
        }
    }
}
