//! The role/position policy matrix.

use crate::{Capability, Error, Position, Principal, Result, Role};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use Capability::*;

const ADMIN: &[Capability] = &[
    ViewHome,
    ViewProfile,
    ViewRoom,
    CreateRoom,
    EditRoom,
    DeleteRoom,
    ViewBooking,
    CreateBooking,
    EditBooking,
    CancelBooking,
    ViewCustomer,
    CreateCustomer,
    EditCustomer,
    ViewStaff,
    CreateStaff,
    EditStaff,
    DeleteStaff,
    ViewTask,
    CreateTask,
    EditTask,
    DeleteTask,
    ViewInventory,
    EditInventory,
    ViewIssueReport,
    CreateIssueReport,
    ResolveIssueReport,
    ViewInvoice,
    CreateInvoice,
    ViewService,
    EditService,
    ViewStatistics,
    ViewAllStatistics,
];

const MANAGER: &[Capability] = &[
    ViewHome,
    ViewProfile,
    ViewRoom,
    CreateRoom,
    EditRoom,
    ViewBooking,
    CreateBooking,
    EditBooking,
    CancelBooking,
    ViewCustomer,
    CreateCustomer,
    EditCustomer,
    ViewStaff,
    CreateStaff,
    EditStaff,
    ViewTask,
    CreateTask,
    EditTask,
    DeleteTask,
    ViewInventory,
    EditInventory,
    ViewIssueReport,
    CreateIssueReport,
    ResolveIssueReport,
    ViewInvoice,
    CreateInvoice,
    ViewService,
    EditService,
    ViewStatistics,
];

const RECEPTIONIST: &[Capability] = &[
    ViewHome,
    ViewProfile,
    ViewRoom,
    ViewBooking,
    CreateBooking,
    EditBooking,
    CancelBooking,
    ViewCustomer,
    CreateCustomer,
    EditCustomer,
    ViewTask,
    CreateTask,
    ViewIssueReport,
    CreateIssueReport,
    ViewInvoice,
    CreateInvoice,
    ViewService,
];

const HOUSEKEEPING: &[Capability] = &[
    ViewHome,
    ViewProfile,
    ViewRoom,
    ViewTask,
    EditTask,
    ViewInventory,
    ViewIssueReport,
    CreateIssueReport,
];

const CUSTOMER: &[Capability] = &[];

static MATRIX: LazyLock<PolicyMatrix> = LazyLock::new(|| {
    PolicyMatrix::from_rows(&[
        (PolicyKey::new(Role::Admin, None), ADMIN),
        (PolicyKey::new(Role::Staff, Some(Position::Manager)), MANAGER),
        (
            PolicyKey::new(Role::Staff, Some(Position::Receptionist)),
            RECEPTIONIST,
        ),
        (
            PolicyKey::new(Role::Staff, Some(Position::Housekeeping)),
            HOUSEKEEPING,
        ),
        (PolicyKey::new(Role::Customer, None), CUSTOMER),
    ])
});

/// Identifies one row of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PolicyKey {
    pub role: Role,
    pub position: Option<Position>,
}

impl PolicyKey {
    pub fn new(role: Role, position: Option<Position>) -> Self {
        Self { role, position }
    }

    /// The row a principal is looked up under.
    ///
    /// Admin and Customer rows are position-less. Staff without a position
    /// gets a key that has no row.
    pub fn for_principal(principal: &Principal) -> Self {
        match principal.role {
            Role::Admin | Role::Customer => Self::new(principal.role, None),
            Role::Staff => Self::new(Role::Staff, principal.position),
        }
    }
}

impl fmt::Display for PolicyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{}/{}", self.role, position),
            None => write!(f, "{}", self.role),
        }
    }
}

/// Immutable mapping from (role, position) to granted capabilities.
///
/// The shipped matrix is reachable only through [`PolicyMatrix::global`],
/// which hands out a shared reference; there is no way to change a row at
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyMatrix {
    rows: HashMap<PolicyKey, HashSet<Capability>>,
}

impl PolicyMatrix {
    /// The matrix compiled into this build.
    pub fn global() -> &'static PolicyMatrix {
        &MATRIX
    }

    pub(crate) fn from_rows(rows: &[(PolicyKey, &[Capability])]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|(key, caps)| (*key, caps.iter().copied().collect()))
                .collect(),
        }
    }

    pub fn row(&self, key: &PolicyKey) -> Option<&HashSet<Capability>> {
        self.rows.get(key)
    }

    /// Whether `principal` holds `capability` according to this matrix.
    pub fn grants(&self, principal: &Principal, capability: Capability) -> bool {
        if principal.role == Role::Customer {
            return false;
        }

        self.row(&PolicyKey::for_principal(principal))
            .is_some_and(|row| row.contains(&capability))
    }

    /// Rows in a stable order, for display.
    pub fn to_table(&self) -> BTreeMap<PolicyKey, BTreeSet<Capability>> {
        self.rows
            .iter()
            .map(|(key, caps)| (*key, caps.iter().copied().collect()))
            .collect()
    }

    /// Check the structural invariants of the matrix.
    ///
    /// - exactly the rows Admin, Customer and one per staff position exist
    /// - the Customer row is empty
    /// - the Admin row contains every capability granted to any staff row
    pub fn verify(&self) -> Result<()> {
        let mut expected = vec![
            PolicyKey::new(Role::Admin, None),
            PolicyKey::new(Role::Customer, None),
        ];
        expected.extend(
            Position::ALL
                .iter()
                .map(|p| PolicyKey::new(Role::Staff, Some(*p))),
        );

        for key in &expected {
            if !self.rows.contains_key(key) {
                return Err(Error::Invariant(format!("missing row for {key}")));
            }
        }
        if let Some(extra) = self.rows.keys().find(|key| !expected.contains(key)) {
            return Err(Error::Invariant(format!("unexpected row for {extra}")));
        }

        let customer = &self.rows[&PolicyKey::new(Role::Customer, None)];
        if let Some(cap) = customer.iter().min() {
            return Err(Error::Invariant(format!("customer row grants {cap}")));
        }

        let admin = &self.rows[&PolicyKey::new(Role::Admin, None)];
        for (key, row) in self.to_table() {
            if key.role != Role::Staff {
                continue;
            }
            if let Some(missing) = row.iter().find(|cap| !admin.contains(cap)) {
                return Err(Error::Invariant(format!(
                    "admin is missing {missing}, granted to {key}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_matrix_verifies() {
        PolicyMatrix::global().verify().unwrap();
    }

    #[test]
    fn test_admin_is_superset_of_every_staff_position() {
        let matrix = PolicyMatrix::global();
        for position in Position::ALL {
            let row = matrix
                .row(&PolicyKey::new(Role::Staff, Some(*position)))
                .unwrap();
            for cap in row {
                assert!(
                    matrix.grants(&Principal::admin(), *cap),
                    "admin lacks {cap} held by {position}"
                );
            }
        }
    }

    #[test]
    fn test_customer_row_is_empty() {
        let row = PolicyMatrix::global()
            .row(&PolicyKey::new(Role::Customer, None))
            .unwrap();
        assert!(row.is_empty());
    }

    #[test]
    fn test_positionless_staff_has_no_row() {
        let principal = Principal::new(Role::Staff, None);
        let key = PolicyKey::for_principal(&principal);
        assert!(PolicyMatrix::global().row(&key).is_none());
    }

    #[test]
    fn test_admin_key_ignores_position() {
        let principal = Principal::new(Role::Admin, Some(Position::Housekeeping));
        assert_eq!(
            PolicyKey::for_principal(&principal),
            PolicyKey::new(Role::Admin, None)
        );
    }

    #[test]
    fn test_verify_rejects_admin_missing_staff_capability() {
        let matrix = PolicyMatrix::from_rows(&[
            (PolicyKey::new(Role::Admin, None), &[ViewHome]),
            (PolicyKey::new(Role::Staff, Some(Position::Manager)), &[ViewHome, CreateStaff]),
            (PolicyKey::new(Role::Staff, Some(Position::Receptionist)), &[]),
            (PolicyKey::new(Role::Staff, Some(Position::Housekeeping)), &[]),
            (PolicyKey::new(Role::Customer, None), &[]),
        ]);
        let err = matrix.verify().unwrap_err();
        assert_eq!(
            err,
            Error::Invariant("admin is missing create_staff, granted to staff/manager".into())
        );
    }

    #[test]
    fn test_verify_rejects_customer_grant() {
        let matrix = PolicyMatrix::from_rows(&[
            (PolicyKey::new(Role::Admin, None), &[ViewHome]),
            (PolicyKey::new(Role::Staff, Some(Position::Manager)), &[]),
            (PolicyKey::new(Role::Staff, Some(Position::Receptionist)), &[]),
            (PolicyKey::new(Role::Staff, Some(Position::Housekeeping)), &[]),
            (PolicyKey::new(Role::Customer, None), &[ViewHome]),
        ]);
        assert!(matches!(matrix.verify(), Err(Error::Invariant(_))));
    }

    #[test]
    fn test_verify_rejects_missing_and_extra_rows() {
        let missing = PolicyMatrix::from_rows(&[
            (PolicyKey::new(Role::Admin, None), &[]),
            (PolicyKey::new(Role::Customer, None), &[]),
        ]);
        assert!(matches!(missing.verify(), Err(Error::Invariant(_))));

        let extra = PolicyMatrix::from_rows(&[
            (PolicyKey::new(Role::Admin, None), &[]),
            (PolicyKey::new(Role::Staff, Some(Position::Manager)), &[]),
            (PolicyKey::new(Role::Staff, Some(Position::Receptionist)), &[]),
            (PolicyKey::new(Role::Staff, Some(Position::Housekeeping)), &[]),
            (PolicyKey::new(Role::Staff, None), &[ViewHome]),
            (PolicyKey::new(Role::Customer, None), &[]),
        ]);
        assert_eq!(
            extra.verify(),
            Err(Error::Invariant("unexpected row for staff".into()))
        );
    }
}
