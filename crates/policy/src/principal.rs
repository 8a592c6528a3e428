//! Roles, staff positions and the authenticated principal.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The role of an authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Customer,
}

impl Role {
    pub const ALL: &'static [Role] = &[Role::Admin, Role::Staff, Role::Customer];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownRole(s.to_string()))
    }
}

/// A staff member's position. Only meaningful when the role is [`Role::Staff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Manager,
    Receptionist,
    Housekeeping,
}

impl Position {
    pub const ALL: &'static [Position] = &[
        Position::Manager,
        Position::Receptionist,
        Position::Housekeeping,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::Manager => "manager",
            Position::Receptionist => "receptionist",
            Position::Housekeeping => "housekeeping",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Position::ALL
            .iter()
            .copied()
            .find(|position| position.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownPosition(s.to_string()))
    }
}

/// Principal as delivered by the authentication layer, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPrincipal {
    pub role: String,

    #[serde(default)]
    pub position: Option<String>,
}

/// An authenticated actor whose access is being evaluated.
///
/// The engine only ever reads a principal; constructing and replacing it is
/// the job of the login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    pub role: Role,
    pub position: Option<Position>,
}

impl Principal {
    pub fn new(role: Role, position: Option<Position>) -> Self {
        Self { role, position }
    }

    pub fn admin() -> Self {
        Self::new(Role::Admin, None)
    }

    pub fn customer() -> Self {
        Self::new(Role::Customer, None)
    }

    pub fn staff(position: Position) -> Self {
        Self::new(Role::Staff, Some(position))
    }

    /// Build a principal from untrusted session data.
    ///
    /// An unrecognized role yields `None`, which every check treats as "no
    /// session". For staff, an unrecognized or missing position is kept as a
    /// position-less principal that matches no policy row. Positions sent
    /// alongside other roles are dropped.
    pub fn from_raw(raw: &RawPrincipal) -> Option<Self> {
        let role = match raw.role.parse::<Role>() {
            Ok(role) => role,
            Err(e) => {
                tracing::debug!(target: "frontdesk::policy", error = %e, "discarding principal");
                return None;
            }
        };

        let position = match role {
            Role::Staff => raw.position.as_deref().and_then(|p| p.parse().ok()),
            Role::Admin | Role::Customer => None,
        };

        Some(Self::new(role, position))
    }
}

impl From<Principal> for RawPrincipal {
    fn from(principal: Principal) -> Self {
        Self {
            role: principal.role.as_str().to_string(),
            position: principal.position.map(|p| p.as_str().to_string()),
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{}/{}", self.role, position),
            None => write!(f, "{}", self.role),
        }
    }
}
