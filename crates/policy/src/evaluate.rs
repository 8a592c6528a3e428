//! Policy evaluation against the shipped tables.
//!
//! Every function here is pure and total: a missing principal, an unknown
//! identifier or an unregistered route all come back as `false`.

use crate::routes::route_segment;
use crate::{Capability, PolicyMatrix, Principal, Role, RouteMap};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Check whether `principal` holds `capability`.
pub fn has_capability(principal: Option<&Principal>, capability: Capability) -> bool {
    let Some(principal) = principal else {
        debug!(target: "frontdesk::policy", %capability, "denied: no principal");
        return false;
    };

    if principal.role == Role::Customer {
        debug!(target: "frontdesk::policy", %capability, role = %principal.role, "denied: customer");
        return false;
    }

    let granted = PolicyMatrix::global().grants(principal, capability);
    if granted {
        trace!(target: "frontdesk::policy", %capability, %principal, "granted");
    } else {
        debug!(target: "frontdesk::policy", %capability, %principal, "denied: not in policy row");
    }
    granted
}

/// Like [`has_capability`], for identifiers that arrive as strings.
///
/// An identifier outside the vocabulary is denied.
pub fn has_capability_named(principal: Option<&Principal>, name: &str) -> bool {
    match name.parse::<Capability>() {
        Ok(capability) => has_capability(principal, capability),
        Err(e) => {
            debug!(target: "frontdesk::policy", error = %e, "denied: unknown capability");
            false
        }
    }
}

/// True if any of `capabilities` is held. An empty list is denied.
pub fn has_any_capability(principal: Option<&Principal>, capabilities: &[Capability]) -> bool {
    capabilities
        .iter()
        .any(|capability| has_capability(principal, *capability))
}

/// True if every one of `capabilities` is held. An empty list is denied.
pub fn has_all_capabilities(principal: Option<&Principal>, capabilities: &[Capability]) -> bool {
    !capabilities.is_empty()
        && capabilities
            .iter()
            .all(|capability| has_capability(principal, *capability))
}

/// The full set of capabilities `principal` holds.
pub fn capabilities_of(principal: Option<&Principal>) -> BTreeSet<Capability> {
    Capability::ALL
        .iter()
        .copied()
        .filter(|capability| has_capability(principal, *capability))
        .collect()
}

/// Capability guarding `path`, or `None` if its segment is not registered.
pub fn route_capability(path: &str) -> Option<Capability> {
    RouteMap::global().resolve(path)
}

/// Check whether `principal` may enter the area addressed by `path`.
///
/// Unregistered areas are denied to everyone, Admin included.
pub fn can_enter_route(principal: Option<&Principal>, path: &str) -> bool {
    let segment = route_segment(path);
    match RouteMap::global().get(&segment) {
        Some(capability) => has_capability(principal, capability),
        None => {
            debug!(target: "frontdesk::policy", %segment, "denied: unregistered route");
            false
        }
    }
}

/// Registered route segments `principal` may enter, in route map order.
pub fn accessible_routes(principal: Option<&Principal>) -> Vec<&'static str> {
    RouteMap::global()
        .entries()
        .filter(|(_, capability)| has_capability(principal, *capability))
        .map(|(segment, _)| segment)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, RawPrincipal};
    use proptest::prelude::*;

    fn staff(position: Position) -> Option<Principal> {
        Some(Principal::staff(position))
    }

    #[test]
    fn test_no_principal_holds_nothing() {
        for capability in Capability::ALL {
            assert!(!has_capability(None, *capability));
        }
        assert!(capabilities_of(None).is_empty());
    }

    #[test]
    fn test_customer_holds_nothing() {
        let customer = Some(Principal::customer());
        for capability in Capability::ALL {
            assert!(!has_capability(customer.as_ref(), *capability));
        }
    }

    #[test]
    fn test_admin_holds_every_staff_capability() {
        let admin = Some(Principal::admin());
        for position in Position::ALL {
            for capability in capabilities_of(staff(*position).as_ref()) {
                assert!(has_capability(admin.as_ref(), capability));
            }
        }
    }

    #[test]
    fn test_housekeeping_scenarios() {
        let housekeeping = staff(Position::Housekeeping);
        assert!(!has_capability(housekeeping.as_ref(), Capability::CreateStaff));
        assert!(has_capability(housekeeping.as_ref(), Capability::EditTask));
    }

    #[test]
    fn test_manager_can_create_staff() {
        assert!(has_capability(
            staff(Position::Manager).as_ref(),
            Capability::CreateStaff
        ));
    }

    #[test]
    fn test_positionless_staff_holds_nothing() {
        let raw = RawPrincipal {
            role: "staff".into(),
            position: Some("night-auditor".into()),
        };
        let principal = Principal::from_raw(&raw);
        assert!(capabilities_of(principal.as_ref()).is_empty());
    }

    #[test]
    fn test_position_casing_is_normalized() {
        let raw = RawPrincipal {
            role: "Staff".into(),
            position: Some("RECEPTIONIST".into()),
        };
        let principal = Principal::from_raw(&raw);
        assert!(has_capability(principal.as_ref(), Capability::CreateBooking));
    }

    #[test]
    fn test_evaluation_does_not_touch_matrix() {
        let before = PolicyMatrix::global().clone();
        let manager = staff(Position::Manager);
        let first = has_capability(manager.as_ref(), Capability::EditStaff);
        let second = has_capability(manager.as_ref(), Capability::EditStaff);
        assert_eq!(first, second);
        assert_eq!(&before, PolicyMatrix::global());
    }

    #[test]
    fn test_named_capabilities() {
        let manager = staff(Position::Manager);
        assert!(has_capability_named(manager.as_ref(), "canCreateStaff"));
        assert!(has_capability_named(manager.as_ref(), "create_staff"));
        assert!(!has_capability_named(manager.as_ref(), "canCreateStaf"));
        assert!(!has_capability_named(Some(&Principal::admin()), "all"));
    }

    #[test]
    fn test_any_and_all() {
        let receptionist = staff(Position::Receptionist);
        let mixed = [Capability::CreateStaff, Capability::CreateBooking];
        assert!(has_any_capability(receptionist.as_ref(), &mixed));
        assert!(!has_all_capabilities(receptionist.as_ref(), &mixed));
        assert!(has_all_capabilities(
            receptionist.as_ref(),
            &[Capability::ViewBooking, Capability::CreateBooking]
        ));
        assert!(!has_any_capability(Some(&Principal::admin()), &[]));
        assert!(!has_all_capabilities(Some(&Principal::admin()), &[]));
    }

    #[test]
    fn test_route_entry() {
        let manager = staff(Position::Manager);
        let receptionist = staff(Position::Receptionist);
        assert!(can_enter_route(manager.as_ref(), "/staff"));
        assert!(!can_enter_route(receptionist.as_ref(), "/staff"));
        assert!(can_enter_route(receptionist.as_ref(), "/booking/12"));
        assert!(can_enter_route(receptionist.as_ref(), "/"));
        assert!(can_enter_route(receptionist.as_ref(), "home"));
        assert!(!can_enter_route(None, "/home"));
    }

    #[test]
    fn test_route_capability() {
        assert_eq!(route_capability("/statistics"), Some(Capability::ViewStatistics));
        assert_eq!(route_capability("/nowhere"), None);
    }

    #[test]
    fn test_accessible_routes() {
        let housekeeping = staff(Position::Housekeeping);
        assert_eq!(
            accessible_routes(housekeeping.as_ref()),
            vec!["", "home", "profile", "room", "task", "inventory", "issue-report"]
        );
        assert!(accessible_routes(Some(&Principal::customer())).is_empty());
        assert_eq!(
            accessible_routes(Some(&Principal::admin())).len(),
            RouteMap::global().entries().count()
        );
    }

    proptest! {
        #[test]
        fn unregistered_routes_deny_admin(segment in "[a-z][a-z-]{0,20}") {
            prop_assume!(RouteMap::global().get(&segment).is_none());
            let path = format!("/{segment}/detail");
            prop_assert!(!can_enter_route(Some(&Principal::admin()), &path));
        }

        #[test]
        fn unrecognized_positions_hold_nothing(position in "\\PC{0,16}") {
            prop_assume!(position.parse::<Position>().is_err());
            let raw = RawPrincipal { role: "staff".into(), position: Some(position) };
            let principal = Principal::from_raw(&raw);
            for capability in Capability::ALL {
                prop_assert!(!has_capability(principal.as_ref(), *capability));
            }
        }
    }
}
