//! The closed capability vocabulary.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability identifiers that can be granted to a principal.
///
/// The set is closed: asking about a capability that is not listed here is a
/// compile error. Identifiers arriving as strings go through [`FromStr`],
/// where an unknown name is an error that callers fold into a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewHome,
    ViewProfile,

    // Rooms
    ViewRoom,
    CreateRoom,
    EditRoom,
    DeleteRoom,

    // Bookings
    ViewBooking,
    CreateBooking,
    EditBooking,
    CancelBooking,

    // Customers
    ViewCustomer,
    CreateCustomer,
    EditCustomer,

    // Staff
    ViewStaff,
    CreateStaff,
    EditStaff,
    DeleteStaff,

    // Housekeeping tasks
    ViewTask,
    CreateTask,
    EditTask,
    DeleteTask,

    // Inventory
    ViewInventory,
    EditInventory,

    // Issue reports
    ViewIssueReport,
    CreateIssueReport,
    ResolveIssueReport,

    // Billing
    ViewInvoice,
    CreateInvoice,

    // Hotel services
    ViewService,
    EditService,

    // Statistics
    ViewStatistics,
    ViewAllStatistics,
}

impl Capability {
    /// Every capability in the vocabulary, in declaration order.
    pub const ALL: &'static [Capability] = &[
        Capability::ViewHome,
        Capability::ViewProfile,
        Capability::ViewRoom,
        Capability::CreateRoom,
        Capability::EditRoom,
        Capability::DeleteRoom,
        Capability::ViewBooking,
        Capability::CreateBooking,
        Capability::EditBooking,
        Capability::CancelBooking,
        Capability::ViewCustomer,
        Capability::CreateCustomer,
        Capability::EditCustomer,
        Capability::ViewStaff,
        Capability::CreateStaff,
        Capability::EditStaff,
        Capability::DeleteStaff,
        Capability::ViewTask,
        Capability::CreateTask,
        Capability::EditTask,
        Capability::DeleteTask,
        Capability::ViewInventory,
        Capability::EditInventory,
        Capability::ViewIssueReport,
        Capability::CreateIssueReport,
        Capability::ResolveIssueReport,
        Capability::ViewInvoice,
        Capability::CreateInvoice,
        Capability::ViewService,
        Capability::EditService,
        Capability::ViewStatistics,
        Capability::ViewAllStatistics,
    ];

    /// Stable snake_case identifier, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::ViewHome => "view_home",
            Capability::ViewProfile => "view_profile",
            Capability::ViewRoom => "view_room",
            Capability::CreateRoom => "create_room",
            Capability::EditRoom => "edit_room",
            Capability::DeleteRoom => "delete_room",
            Capability::ViewBooking => "view_booking",
            Capability::CreateBooking => "create_booking",
            Capability::EditBooking => "edit_booking",
            Capability::CancelBooking => "cancel_booking",
            Capability::ViewCustomer => "view_customer",
            Capability::CreateCustomer => "create_customer",
            Capability::EditCustomer => "edit_customer",
            Capability::ViewStaff => "view_staff",
            Capability::CreateStaff => "create_staff",
            Capability::EditStaff => "edit_staff",
            Capability::DeleteStaff => "delete_staff",
            Capability::ViewTask => "view_task",
            Capability::CreateTask => "create_task",
            Capability::EditTask => "edit_task",
            Capability::DeleteTask => "delete_task",
            Capability::ViewInventory => "view_inventory",
            Capability::EditInventory => "edit_inventory",
            Capability::ViewIssueReport => "view_issue_report",
            Capability::CreateIssueReport => "create_issue_report",
            Capability::ResolveIssueReport => "resolve_issue_report",
            Capability::ViewInvoice => "view_invoice",
            Capability::CreateInvoice => "create_invoice",
            Capability::ViewService => "view_service",
            Capability::EditService => "edit_service",
            Capability::ViewStatistics => "view_statistics",
            Capability::ViewAllStatistics => "view_all_statistics",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercases and drops separators so `view_room` and `ViewRoom` compare equal.
fn fold(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for Capability {
    type Err = Error;

    /// Accepts the snake_case identifier, the variant name, or the console's
    /// `canViewRoom` key, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = fold(s);
        let unprefixed = wanted.strip_prefix("can");
        Capability::ALL
            .iter()
            .copied()
            .find(|cap| {
                let id = fold(cap.as_str());
                id == wanted || unprefixed == Some(id.as_str())
            })
            .ok_or_else(|| Error::UnknownCapability(s.to_string()))
    }
}
