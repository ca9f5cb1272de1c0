use serde::{Deserialize, Serialize};

use crate::model::location::LocationId;

/// Center unique ID, assigned by the administrator at registration.
pub type CenterId = u64;

/// Core polling center data, as stored in the ledger.
///
/// A center is owned by exactly one location; the location must already
/// exist when the center is registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Center {
    /// Center unique ID.
    pub id: CenterId,
    /// The location this center belongs to.
    pub location_id: LocationId,
}

impl Center {
    pub fn new(id: CenterId, location_id: LocationId) -> Self {
        Self { id, location_id }
    }
}
