//! The election ledger state machine.
//!
//! This is the authoritative store for the five administrative collections
//! (locations, centers, voters, candidates, ballots) and the per-(voter,
//! ballot, round) vote record. Every mutating operation passes a single
//! authorization gate before touching storage, commits fully or not at all,
//! and moves entity state strictly forward: rounds increase, `Closed` is
//! terminal, tallies reset only as part of a round advancement.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::model::{
    Address, Ballot, BallotId, BallotState, Candidate, Center, CenterId, Location, LocationId,
    Round, Voter,
};

/// The election ledger.
///
/// Collections are append-only and insertion-ordered. The ledger itself is a
/// single-writer state machine; the execution substrate (for this server, the
/// mutex in [`crate::relay`]) serialises all mutating calls, so no operation
/// ever observes a partially-applied transition.
#[derive(Debug)]
pub struct Ledger {
    /// The single privileged identity, fixed at creation.
    admin: Address,
    locations: Vec<Location>,
    locations_by_id: HashMap<LocationId, usize>,
    centers: Vec<Center>,
    centers_by_id: HashMap<CenterId, usize>,
    voters: Vec<Voter>,
    voters_by_address: HashMap<Address, usize>,
    candidates: Vec<Candidate>,
    candidates_by_key: HashMap<(BallotId, Round, Address), usize>,
    ballots: Vec<Ballot>,
    ballots_by_id: HashMap<BallotId, usize>,
    /// Which (voter, ballot, round) combinations have already voted.
    votes_cast: HashSet<(Address, BallotId, Round)>,
}

impl Ledger {
    /// Create an empty ledger administered by the given address.
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            locations: Vec::new(),
            locations_by_id: HashMap::new(),
            centers: Vec::new(),
            centers_by_id: HashMap::new(),
            voters: Vec::new(),
            voters_by_address: HashMap::new(),
            candidates: Vec::new(),
            candidates_by_key: HashMap::new(),
            ballots: Vec::new(),
            ballots_by_id: HashMap::new(),
            votes_cast: HashSet::new(),
        }
    }

    /// The administrator's address.
    pub fn admin(&self) -> &Address {
        &self.admin
    }

    /// Is this address a registered voter?
    pub fn is_voter(&self, address: &Address) -> bool {
        self.voters_by_address.contains_key(address)
    }

    /// Register a new location.
    pub fn add_location(
        &mut self,
        caller: &Address,
        id: LocationId,
        name: impl Into<String>,
    ) -> Result<()> {
        self.ensure_admin(caller)?;
        if self.locations_by_id.contains_key(&id) {
            return Err(Error::malformed(format!("Location {id} already exists")));
        }

        self.locations_by_id.insert(id, self.locations.len());
        self.locations.push(Location::new(id, name));
        Ok(())
    }

    /// Register a new polling center under an existing location.
    pub fn add_center(
        &mut self,
        caller: &Address,
        id: CenterId,
        location_id: LocationId,
    ) -> Result<()> {
        self.ensure_admin(caller)?;
        self.location(location_id)?;
        if self.centers_by_id.contains_key(&id) {
            return Err(Error::malformed(format!("Center {id} already exists")));
        }

        self.centers_by_id.insert(id, self.centers.len());
        self.centers.push(Center::new(id, location_id));
        Ok(())
    }

    /// Register a new voter against an existing center.
    ///
    /// The given location must be the one the center belongs to; the
    /// location's voter count is bumped as part of the same transition.
    pub fn add_voter(
        &mut self,
        caller: &Address,
        address: Address,
        center_id: CenterId,
        location_id: LocationId,
    ) -> Result<()> {
        self.ensure_admin(caller)?;
        let center = self.center(center_id)?;
        if center.location_id != location_id {
            return Err(Error::malformed(format!(
                "Center {center_id} belongs to location {}, not {location_id}",
                center.location_id
            )));
        }
        if self.voters_by_address.contains_key(&address) {
            return Err(Error::malformed(format!(
                "Voter {address} already registered"
            )));
        }

        // The center invariant guarantees the location exists.
        let location_index = self.locations_by_id[&location_id];
        self.locations[location_index].voter_count += 1;
        self.voters_by_address
            .insert(address.clone(), self.voters.len());
        self.voters.push(Voter::new(address, center_id, location_id));
        Ok(())
    }

    /// Register a governor ballot, scoped to an existing location.
    pub fn add_governor_ballot(
        &mut self,
        caller: &Address,
        id: BallotId,
        location_id: LocationId,
    ) -> Result<()> {
        self.ensure_admin(caller)?;
        self.location(location_id)?;
        self.insert_ballot(Ballot::governor(id, location_id))
    }

    /// Register a president ballot, spanning the whole electorate.
    pub fn add_president_ballot(&mut self, caller: &Address, id: BallotId) -> Result<()> {
        self.ensure_admin(caller)?;
        self.insert_ballot(Ballot::president(id))
    }

    /// Register a candidate on a pending ballot, bound to its current round.
    pub fn add_candidate(
        &mut self,
        caller: &Address,
        ballot_id: BallotId,
        address: Address,
    ) -> Result<()> {
        self.ensure_admin(caller)?;
        let ballot = self.ballot(ballot_id)?;
        match ballot.state {
            BallotState::Pending => {}
            BallotState::Open => {
                return Err(Error::invalid_state(format!(
                    "Ballot {ballot_id} is already open; candidates are fixed"
                )));
            }
            BallotState::Closed => {
                return Err(Error::invalid_state(format!("Ballot {ballot_id} is closed")));
            }
        }
        let round = ballot.round;
        if self
            .candidates_by_key
            .contains_key(&(ballot_id, round, address.clone()))
        {
            return Err(Error::malformed(format!(
                "Candidate {address} already registered on ballot {ballot_id} round {round}"
            )));
        }

        self.candidates_by_key
            .insert((ballot_id, round, address.clone()), self.candidates.len());
        self.candidates
            .push(Candidate::new(address, ballot_id, round));
        Ok(())
    }

    /// Open a pending ballot for voting. Requires at least one candidate
    /// registered for the current round.
    pub fn open_ballot(&mut self, caller: &Address, ballot_id: BallotId) -> Result<()> {
        self.ensure_admin(caller)?;
        let ballot = self.ballot(ballot_id)?;
        match ballot.state {
            BallotState::Pending => {}
            BallotState::Open => {
                return Err(Error::invalid_state(format!(
                    "Ballot {ballot_id} is already open"
                )));
            }
            BallotState::Closed => {
                return Err(Error::invalid_state(format!("Ballot {ballot_id} is closed")));
            }
        }
        let round = ballot.round;
        if self.round_candidates(ballot_id, round).next().is_none() {
            return Err(Error::invalid_state(format!(
                "Ballot {ballot_id} has no candidates for round {round}"
            )));
        }

        self.ballot_mut(ballot_id).state = BallotState::Open;
        Ok(())
    }

    /// Cast a vote.
    ///
    /// The caller must be a registered voter, the ballot open, `round_id` the
    /// ballot's current round, the candidate registered for that round, and
    /// the caller must not have voted in this (ballot, round) yet. Every
    /// check happens before any mutation.
    pub fn vote(
        &mut self,
        caller: &Address,
        ballot_id: BallotId,
        round_id: Round,
        candidate_id: &Address,
    ) -> Result<()> {
        if !self.is_voter(caller) {
            return Err(Error::unauthorized(format!(
                "{caller} is not a registered voter"
            )));
        }
        let ballot = self.ballot(ballot_id)?;
        match ballot.state {
            BallotState::Open => {}
            BallotState::Pending => {
                return Err(Error::invalid_state(format!(
                    "Ballot {ballot_id} is not open for voting"
                )));
            }
            BallotState::Closed => {
                return Err(Error::invalid_state(format!("Ballot {ballot_id} is closed")));
            }
        }
        if round_id != ballot.round {
            return Err(Error::invalid_state(format!(
                "Ballot {ballot_id} is in round {}, not round {round_id}",
                ballot.round
            )));
        }
        let candidate_index = *self
            .candidates_by_key
            .get(&(ballot_id, round_id, candidate_id.clone()))
            .ok_or_else(|| {
                Error::not_found(format!(
                    "Candidate {candidate_id} on ballot {ballot_id} round {round_id}"
                ))
            })?;
        let vote_key = (caller.clone(), ballot_id, round_id);
        if self.votes_cast.contains(&vote_key) {
            return Err(Error::duplicate_vote(format!(
                "{caller} already voted on ballot {ballot_id} round {round_id}"
            )));
        }

        self.votes_cast.insert(vote_key);
        self.candidates[candidate_index].votes_count += 1;
        Ok(())
    }

    /// Advance an unclosed ballot to its next round.
    ///
    /// The candidate roster of the finished round is carried forward into the
    /// new round with zero tallies; the finished round's entries stay behind
    /// as its historical record. Voters who voted in the finished round may
    /// vote again.
    pub fn next_round(&mut self, caller: &Address, ballot_id: BallotId) -> Result<()> {
        self.ensure_admin(caller)?;
        let ballot = self.ballot(ballot_id)?;
        if ballot.is_closed() {
            return Err(Error::invalid_state(format!("Ballot {ballot_id} is closed")));
        }
        let finished = ballot.round;
        let next = finished + 1;

        let carried: Vec<Candidate> = self
            .round_candidates(ballot_id, finished)
            .map(|candidate| candidate.carried_into(next))
            .collect();
        for candidate in carried {
            self.candidates_by_key.insert(
                (ballot_id, next, candidate.id.clone()),
                self.candidates.len(),
            );
            self.candidates.push(candidate);
        }
        self.ballot_mut(ballot_id).round = next;
        Ok(())
    }

    /// Close an unclosed ballot, permanently.
    ///
    /// A second close is an error, not a no-op.
    pub fn close_ballot(&mut self, caller: &Address, ballot_id: BallotId) -> Result<()> {
        self.ensure_admin(caller)?;
        let ballot = self.ballot(ballot_id)?;
        if ballot.is_closed() {
            return Err(Error::invalid_state(format!(
                "Ballot {ballot_id} is already closed"
            )));
        }

        self.ballot_mut(ballot_id).state = BallotState::Closed;
        Ok(())
    }

    /// All locations, in insertion order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// All centers, in insertion order.
    pub fn centers(&self) -> &[Center] {
        &self.centers
    }

    /// All voters, in insertion order.
    pub fn voters(&self) -> &[Voter] {
        &self.voters
    }

    /// All candidate entries across every ballot and round, in insertion
    /// order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// All ballots, in insertion order.
    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }

    fn ensure_admin(&self, caller: &Address) -> Result<()> {
        if caller == &self.admin {
            Ok(())
        } else {
            Err(Error::unauthorized(format!(
                "{caller} is not the administrator"
            )))
        }
    }

    fn location(&self, id: LocationId) -> Result<&Location> {
        self.locations_by_id
            .get(&id)
            .map(|&index| &self.locations[index])
            .ok_or_else(|| Error::not_found(format!("Location {id}")))
    }

    fn center(&self, id: CenterId) -> Result<&Center> {
        self.centers_by_id
            .get(&id)
            .map(|&index| &self.centers[index])
            .ok_or_else(|| Error::not_found(format!("Center {id}")))
    }

    fn ballot(&self, id: BallotId) -> Result<&Ballot> {
        self.ballots_by_id
            .get(&id)
            .map(|&index| &self.ballots[index])
            .ok_or_else(|| Error::not_found(format!("Ballot {id}")))
    }

    /// Mutable ballot access for transitions whose preconditions have
    /// already been checked.
    fn ballot_mut(&mut self, id: BallotId) -> &mut Ballot {
        let index = self.ballots_by_id[&id];
        &mut self.ballots[index]
    }

    fn insert_ballot(&mut self, ballot: Ballot) -> Result<()> {
        if self.ballots_by_id.contains_key(&ballot.id) {
            return Err(Error::malformed(format!(
                "Ballot {} already exists",
                ballot.id
            )));
        }
        self.ballots_by_id.insert(ballot.id, self.ballots.len());
        self.ballots.push(ballot);
        Ok(())
    }

    fn round_candidates(
        &self,
        ballot_id: BallotId,
        round: Round,
    ) -> impl Iterator<Item = &Candidate> {
        self.candidates
            .iter()
            .filter(move |candidate| candidate.ballot_id == ballot_id && candidate.round_id == round)
    }
}
