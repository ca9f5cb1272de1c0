use serde::{Deserialize, Serialize};

/// Location unique ID, assigned by the administrator at registration.
pub type LocationId = u64;

/// Core location data, as stored in the ledger.
///
/// A location is an administrative electoral district. Its name is immutable
/// after creation; only the voter count moves, and only upwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Location unique ID.
    pub id: LocationId,
    /// Human-readable district name.
    pub name: String,
    /// Number of voters registered against this location so far.
    pub voter_count: u64,
}

impl Location {
    /// Create a new location with no registered voters.
    pub fn new(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            voter_count: 0,
        }
    }
}
