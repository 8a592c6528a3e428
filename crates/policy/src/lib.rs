//! Role-based authorization policy for the hotel staff console.
//!
//! Core principle: **a capability is held only if the matrix says so.**
//! Anything uncertain (no session, an unknown identifier, an unregistered
//! route) is a denial, returned as a plain value rather than an error.
//!
//! # Overview
//!
//! - [`Capability`] is the closed vocabulary of things a screen may ask about.
//! - [`PolicyMatrix`] maps a (role, position) row to its granted capabilities.
//! - [`RouteMap`] maps the first segment of a path to the capability needed
//!   to enter that area.
//! - The free functions ([`has_capability`], [`can_enter_route`], ...)
//!   evaluate a [`Principal`] against both tables.
//!
//! Both tables are compiled into the build and cannot be changed at runtime.
//!
//! # Example
//!
//! ```
//! use policy::{can_enter_route, has_capability, Capability, Position, Principal};
//!
//! let housekeeping = Principal::staff(Position::Housekeeping);
//! assert!(has_capability(Some(&housekeeping), Capability::EditTask));
//! assert!(!has_capability(Some(&housekeeping), Capability::CreateStaff));
//! assert!(!can_enter_route(Some(&housekeeping), "/staff"));
//! assert!(!can_enter_route(None, "/home"));
//! ```

mod capability;
mod error;
mod evaluate;
mod matrix;
mod principal;
mod routes;

pub use capability::Capability;
pub use error::{Error, Result};
pub use evaluate::{
    accessible_routes, can_enter_route, capabilities_of, has_all_capabilities,
    has_any_capability, has_capability, has_capability_named, route_capability,
};
pub use matrix::{PolicyKey, PolicyMatrix};
pub use principal::{Position, Principal, RawPrincipal, Role};
pub use routes::{HOME_SEGMENT, RouteMap, route_segment};
