//! Ballot and candidate generation.
//!
//! One governor ballot per location plus one president ballot spanning the
//! whole electorate. Candidates are a random slice of the relevant voters,
//! roughly one in a hundred and at least two where the electorate allows;
//! each ballot is opened as soon as its roster is registered.

use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::Result;
use crate::ledger::Ledger;
use crate::model::{Address, BallotId};

/// One candidate per this many voters.
const VOTERS_PER_CANDIDATE: usize = 100;

const MIN_CANDIDATES: usize = 2;

/// Create and open a governor ballot per location and one president ballot.
///
/// Ballot ids follow location order; the president ballot takes the next id
/// after the last governor ballot.
pub fn create_ballots(ledger: &mut Ledger, admin: &Address, rng: &mut impl Rng) -> Result<()> {
    let location_ids: Vec<u64> = ledger.locations().iter().map(|l| l.id).collect();
    for (index, &location_id) in location_ids.iter().enumerate() {
        let ballot_id = index as BallotId;
        ledger.add_governor_ballot(admin, ballot_id, location_id)?;
        let electorate: Vec<Address> = ledger
            .voters()
            .iter()
            .filter(|voter| voter.location_id == location_id)
            .map(|voter| voter.address.clone())
            .collect();
        register_candidates(ledger, admin, ballot_id, &electorate, rng)?;
        ledger.open_ballot(admin, ballot_id)?;
        info!("Opened governor ballot {ballot_id} for location {location_id}");
    }

    let ballot_id = location_ids.len() as BallotId;
    ledger.add_president_ballot(admin, ballot_id)?;
    let electorate: Vec<Address> = ledger
        .voters()
        .iter()
        .map(|voter| voter.address.clone())
        .collect();
    register_candidates(ledger, admin, ballot_id, &electorate, rng)?;
    ledger.open_ballot(admin, ballot_id)?;
    info!("Opened president ballot {ballot_id}");
    Ok(())
}

/// Pick the candidate subset for one ballot and register it, without
/// duplicates.
fn register_candidates(
    ledger: &mut Ledger,
    admin: &Address,
    ballot_id: BallotId,
    electorate: &[Address],
    rng: &mut impl Rng,
) -> Result<()> {
    let share = (electorate.len() + VOTERS_PER_CANDIDATE - 1) / VOTERS_PER_CANDIDATE;
    let count = share.max(MIN_CANDIDATES).min(electorate.len());
    for candidate in electorate.choose_multiple(rng, count) {
        ledger.add_candidate(admin, ballot_id, candidate.clone())?;
    }
    Ok(())
}
