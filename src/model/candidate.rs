use serde::{Deserialize, Serialize};

use crate::model::{
    address::Address,
    ballot::{BallotId, Round},
};

/// Core candidate data, as stored in the ledger.
///
/// A candidate entry is bound to one ballot and the round it was registered
/// in. Advancing a round appends fresh entries for the same identities; the
/// old entries keep their tallies as the historical record of that round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// The candidate's substrate address.
    pub id: Address,
    /// The ballot this entry belongs to.
    pub ballot_id: BallotId,
    /// The round this entry was registered for.
    pub round_id: Round,
    /// Votes received in that round so far.
    pub votes_count: u64,
}

impl Candidate {
    /// Create a new zero-tally candidate entry.
    pub fn new(id: Address, ballot_id: BallotId, round_id: Round) -> Self {
        Self {
            id,
            ballot_id,
            round_id,
            votes_count: 0,
        }
    }

    /// The same candidate identity, re-registered for a later round with the
    /// tally reset.
    pub fn carried_into(&self, round_id: Round) -> Self {
        Self::new(self.id.clone(), self.ballot_id, round_id)
    }
}
