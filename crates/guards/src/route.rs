//! Navigation guard.

use policy::{Principal, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the navigation layer should do with an attempted route entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteOutcome {
    /// Enter the area.
    Allow,
    /// Nobody is signed in.
    RedirectToLogin,
    /// Signed-in staff or admin without the area's capability.
    RedirectToUnauthorized,
    /// Customers are answered as if the area did not exist.
    MaskAsNotFound,
}

impl RouteOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RouteOutcome::Allow)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteOutcome::Allow => "allow",
            RouteOutcome::RedirectToLogin => "redirect_to_login",
            RouteOutcome::RedirectToUnauthorized => "redirect_to_unauthorized",
            RouteOutcome::MaskAsNotFound => "mask_as_not_found",
        }
    }
}

impl fmt::Display for RouteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides route entry for the protected areas of the console.
pub struct RouteGuard;

impl RouteGuard {
    /// Evaluate one navigation attempt.
    ///
    /// Order matters: the customer branch runs before the capability check so
    /// that customers get a not-found answer instead of an unauthorized one,
    /// even though their capability set is empty either way.
    pub fn check(principal: Option<&Principal>, path: &str) -> RouteOutcome {
        let outcome = match principal {
            None => RouteOutcome::RedirectToLogin,
            Some(p) if p.role == Role::Customer => RouteOutcome::MaskAsNotFound,
            Some(p) if !policy::can_enter_route(Some(p), path) => {
                RouteOutcome::RedirectToUnauthorized
            }
            Some(_) => RouteOutcome::Allow,
        };

        tracing::debug!(target: "frontdesk::route", path, %outcome, "route guard");
        outcome
    }
}
