//! The current-principal slot.

use crate::{RouteGuard, RouteOutcome};
use policy::{Capability, Principal, RawPrincipal};

/// Holds the principal of the signed-in user, if any.
///
/// The login flow is the only writer: it calls [`Session::login`] and
/// [`Session::logout`]. Everything else borrows the session and reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    principal: Option<Principal>,
}

impl Session {
    /// A session with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Replace the current principal.
    pub fn login(&mut self, principal: Principal) {
        tracing::debug!(target: "frontdesk::session", %principal, "login");
        self.principal = Some(principal);
    }

    /// Replace the current principal from untrusted session data.
    ///
    /// Data that does not name a known role leaves the session signed out.
    pub fn login_raw(&mut self, raw: &RawPrincipal) {
        match Principal::from_raw(raw) {
            Some(principal) => self.login(principal),
            None => self.logout(),
        }
    }

    pub fn logout(&mut self) {
        tracing::debug!(target: "frontdesk::session", "logout");
        self.principal = None;
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    /// Check if the current principal holds a capability.
    pub fn has_capability(&self, capability: Capability) -> bool {
        policy::has_capability(self.principal(), capability)
    }

    /// Decide what happens when the current principal navigates to `path`.
    pub fn navigate(&self, path: &str) -> RouteOutcome {
        RouteGuard::check(self.principal(), path)
    }
}

impl From<Principal> for Session {
    fn from(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }
}
