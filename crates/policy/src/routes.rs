//! Route map: top-level application areas and the capability each requires.

use crate::{Capability, Error, Result};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Segment used by the home page in addition to the empty path.
pub const HOME_SEGMENT: &str = "home";

const ROUTES: &[(&str, Capability)] = &[
    ("", Capability::ViewHome),
    (HOME_SEGMENT, Capability::ViewHome),
    ("profile", Capability::ViewProfile),
    ("room", Capability::ViewRoom),
    ("booking", Capability::ViewBooking),
    ("customer", Capability::ViewCustomer),
    ("staff", Capability::ViewStaff),
    ("task", Capability::ViewTask),
    ("inventory", Capability::ViewInventory),
    ("issue-report", Capability::ViewIssueReport),
    ("invoice", Capability::ViewInvoice),
    ("service", Capability::ViewService),
    ("statistics", Capability::ViewStatistics),
];

static ROUTE_MAP: LazyLock<RouteMap> = LazyLock::new(|| RouteMap::from_entries(ROUTES));

/// Immutable mapping from the first path segment to its required capability.
///
/// Segments that are not registered are unreachable for every principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMap {
    entries: &'static [(&'static str, Capability)],
    index: HashMap<&'static str, Capability>,
}

impl RouteMap {
    /// The route map compiled into this build.
    pub fn global() -> &'static RouteMap {
        &ROUTE_MAP
    }

    pub(crate) fn from_entries(entries: &'static [(&'static str, Capability)]) -> Self {
        Self {
            entries,
            index: entries.iter().copied().collect(),
        }
    }

    /// Capability required to enter `segment`, if the segment is registered.
    pub fn get(&self, segment: &str) -> Option<Capability> {
        self.index.get(segment).copied()
    }

    /// Capability required to enter `path`, resolved from its first segment.
    pub fn resolve(&self, path: &str) -> Option<Capability> {
        self.get(&route_segment(path))
    }

    /// Registered segments in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, Capability)> + '_ {
        self.entries.iter().copied()
    }

    /// Check that the home alias is intact and segments are well-formed.
    pub fn verify(&self) -> Result<()> {
        if self.index.len() != self.entries.len() {
            return Err(Error::Invariant("duplicate route segment".into()));
        }

        for segment in ["", HOME_SEGMENT] {
            if self.get(segment) != Some(Capability::ViewHome) {
                return Err(Error::Invariant(format!(
                    "segment '{segment}' must resolve to {}",
                    Capability::ViewHome
                )));
            }
        }

        for (segment, capability) in self.entries() {
            if capability == Capability::ViewHome && !segment.is_empty() && segment != HOME_SEGMENT
            {
                return Err(Error::Invariant(format!(
                    "segment '{segment}' aliases the home page"
                )));
            }
            if segment.contains('/') || segment != segment.to_ascii_lowercase() {
                return Err(Error::Invariant(format!(
                    "segment '{segment}' is not a lowercase path component"
                )));
            }
        }

        Ok(())
    }
}

/// Extract the significant segment of a navigation path.
///
/// Query string and fragment are dropped, leading separators are skipped and
/// only the first component is kept, lowercased.
pub fn route_segment(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.trim()
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}
