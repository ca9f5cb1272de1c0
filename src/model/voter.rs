use serde::{Deserialize, Serialize};

use crate::model::{address::Address, center::CenterId, location::LocationId};

/// Core voter data, as stored in the ledger.
///
/// A voter record is a capability to vote, nothing more: one record per
/// unique substrate address, bound to one center and the center's location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    /// The voter's substrate address.
    pub address: Address,
    /// The center this voter is assigned to.
    pub center_id: CenterId,
    /// The location of that center.
    pub location_id: LocationId,
}

impl Voter {
    pub fn new(address: Address, center_id: CenterId, location_id: LocationId) -> Self {
        Self {
            address,
            center_id,
            location_id,
        }
    }
}
