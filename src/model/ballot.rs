use serde::{Deserialize, Serialize};

use crate::model::location::LocationId;

/// Ballot unique ID, assigned by the administrator at registration.
pub type BallotId = u64;

/// A round number within a ballot. Rounds start at 1 and only increase.
pub type Round = u32;

/// The round every ballot starts in.
pub const FIRST_ROUND: Round = 1;

/// States in the ballot lifecycle.
///
/// The progression is strictly forward: `Pending` -> `Open` -> `Closed`.
/// Candidates may only be registered while `Pending`; votes are only
/// accepted while `Open`; `Closed` is terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallotState {
    /// Registered but not yet accepting votes; candidates may be added.
    Pending,
    /// Accepting votes for the current round.
    Open,
    /// Finished. No further votes, rounds, or candidates.
    Closed,
}

/// Core ballot data, as stored in the ledger.
///
/// Two variants share this shape: a governor ballot is scoped to a single
/// location, a president ballot to the whole electorate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    /// Ballot unique ID.
    pub id: BallotId,
    /// Lifecycle state.
    pub state: BallotState,
    /// Whether this contest spans the whole electorate.
    pub global: bool,
    /// The location a governor ballot is scoped to; `None` for president
    /// ballots.
    pub location_id: Option<LocationId>,
    /// The currently active round.
    pub round: Round,
}

impl Ballot {
    /// Create a new governor ballot, scoped to one location.
    pub fn governor(id: BallotId, location_id: LocationId) -> Self {
        Self {
            id,
            state: BallotState::Pending,
            global: false,
            location_id: Some(location_id),
            round: FIRST_ROUND,
        }
    }

    /// Create a new president ballot, spanning the whole electorate.
    pub fn president(id: BallotId) -> Self {
        Self {
            id,
            state: BallotState::Pending,
            global: true,
            location_id: None,
            round: FIRST_ROUND,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == BallotState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == BallotState::Closed
    }
}
