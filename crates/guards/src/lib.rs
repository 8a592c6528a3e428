//! Guards built on the authorization policy.
//!
//! This crate turns policy answers into decisions the console acts on:
//!
//! - **Session**: the single slot holding the signed-in principal. The login
//!   flow writes it; guards only borrow it.
//! - **RouteGuard**: decides whether a navigation attempt enters the area,
//!   goes to the login page, goes to the unauthorized page, or is answered
//!   as not found.
//! - **CapabilityGuard**: renders a subtree, a notice, or a fallback.
//! - **CapabilityControl**: renders an action control or nothing at all.
//!
//! # Example
//!
//! ```
//! use guards::{CapabilityControl, RouteOutcome, Session};
//! use policy::{Capability, Position, Principal};
//!
//! let mut session = Session::anonymous();
//! assert_eq!(session.navigate("/home"), RouteOutcome::RedirectToLogin);
//!
//! session.login(Principal::staff(Position::Receptionist));
//! assert_eq!(session.navigate("/staff"), RouteOutcome::RedirectToUnauthorized);
//!
//! let add_staff = CapabilityControl::new(Capability::CreateStaff, "Add staff");
//! assert_eq!(add_staff.render(session.principal()), None);
//! ```

mod render;
mod route;
mod session;

pub use render::{CapabilityControl, CapabilityGuard, DEFAULT_DENIAL_MESSAGE, Rendered};
pub use route::{RouteGuard, RouteOutcome};
pub use session::Session;
