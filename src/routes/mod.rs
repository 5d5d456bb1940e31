//! Route table and navigation guard.
//!
//! The table is a fixed shell (dashboard, menu, plans, auth pages, not-found)
//! plus the routes contributed by each [`FeatureModule`]. [`guard`] decides
//! whether a navigation proceeds, using the session cookie as the sole
//! signal of being signed in and the intended route to resume after login.

mod administration;
mod table;

pub use administration::AdministrationModule;
pub use table::{Access, Crumb, FeatureModule, Route, RouteMatch, RouteTable};

use crate::error::Result;
use crate::session::SessionManager;

/// Where unauthenticated users are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// Landing page after login when no intended route is pending.
pub const HOME_PATH: &str = "/dashboard";

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation<'a> {
    Allow(RouteMatch<'a>),
    Redirect(String),
    NotFound,
}

/// Decide whether `path` may be shown.
///
/// A protected route without a session records `path` as the intended route
/// and redirects to login. A guest-only route with a session redirects to the
/// pending intended route, or home.
pub fn guard<'a>(
    table: &'a RouteTable,
    path: &str,
    session: &SessionManager,
) -> Result<Navigation<'a>> {
    let Some(found) = table.resolve(path) else {
        return Ok(Navigation::NotFound);
    };
    if let Some(target) = found.route.redirect {
        return Ok(Navigation::Redirect(target.to_string()));
    }

    match found.route.access {
        Access::Protected if !session.is_authenticated() => {
            tracing::debug!(name: "route.guard.login_required", path, "Redirecting to login");
            session.set_intended(path)?;
            Ok(Navigation::Redirect(LOGIN_PATH.to_string()))
        }
        Access::Guest if session.is_authenticated() => {
            Ok(Navigation::Redirect(post_login_target(session)?))
        }
        _ => Ok(Navigation::Allow(found)),
    }
}

/// Route to open once a session starts: the intended route, consumed, or home.
pub fn post_login_target(session: &SessionManager) -> Result<String> {
    Ok(session
        .consume_intended()?
        .unwrap_or_else(|| HOME_PATH.to_string()))
}
