//! Vote generation.
//!
//! Reads the administrative snapshots through the public read operations
//! and drives voting purely through `vote`, exactly as an external client
//! would. Each ballot draws an abstention percentage from the configured
//! bounds; the remaining voters each back a uniformly random candidate of
//! the ballot's current round.

use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::model::{Address, Ballot};

/// Abstention bounds as fractions of the electorate, `[min, max)`.
#[derive(Debug, Copy, Clone)]
pub struct AbstentionRange {
    min: f64,
    max: f64,
}

impl AbstentionRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let valid = (0.0..=1.0).contains(&min)
            && (0.0..=1.0).contains(&max)
            && ((min * 100.0) as u64) < ((max * 100.0) as u64);
        if !valid {
            return Err(Error::malformed(format!(
                "Abstention bounds [{min}, {max}) are not a valid range"
            )));
        }
        Ok(Self { min, max })
    }

    /// Draw a whole abstention percentage in `[min*100, max*100)`.
    fn draw_percent(&self, rng: &mut impl Rng) -> u64 {
        rng.gen_range((self.min * 100.0) as u64..(self.max * 100.0) as u64)
    }
}

impl Default for AbstentionRange {
    fn default() -> Self {
        Self { min: 0.1, max: 0.3 }
    }
}

/// Generate one round of votes for every open ballot.
pub fn generate_votes(
    ledger: &mut Ledger,
    range: AbstentionRange,
    rng: &mut impl Rng,
) -> Result<()> {
    let ballots: Vec<Ballot> = ledger.ballots().to_vec();
    for ballot in ballots {
        if !ballot.is_open() {
            continue;
        }
        // Governor ballots draw on their location's voters, the president
        // ballot on everyone.
        let electorate: Vec<Address> = ledger
            .voters()
            .iter()
            .filter(|voter| ballot.global || Some(voter.location_id) == ballot.location_id)
            .map(|voter| voter.address.clone())
            .collect();
        let candidates: Vec<Address> = ledger
            .candidates()
            .iter()
            .filter(|c| c.ballot_id == ballot.id && c.round_id == ballot.round)
            .map(|c| c.id.clone())
            .collect();

        let registered = electorate.len() as u64;
        let abstention = registered * range.draw_percent(rng) / 100;
        let turnout = (registered - abstention) as usize;
        info!(
            "Ballot {}: {registered} registered voters, {abstention} abstaining",
            ballot.id,
        );
        for voter in electorate.choose_multiple(rng, turnout) {
            // An open ballot always has candidates.
            let candidate = candidates.choose(rng).unwrap();
            ledger.vote(voter, ballot.id, ballot.round, candidate)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::generate::{
        accounts::AccountPool, ballots, locations::LocationRecord, voters,
    };
    use crate::model::BallotId;

    use super::*;

    fn admin() -> Address {
        Address::example_admin()
    }

    fn election() -> Ledger {
        let mut ledger = Ledger::new(admin());
        let mut accounts = AccountPool::new(StdRng::seed_from_u64(11));
        let mut rng = StdRng::seed_from_u64(12);
        let records = vec![
            LocationRecord {
                name: "Zulia".to_string(),
                voters: 120,
                centers: 3,
            },
            LocationRecord {
                name: "Miranda".to_string(),
                voters: 80,
                centers: 2,
            },
        ];
        voters::register_locations(&mut ledger, &admin(), &records, &mut accounts, &mut rng)
            .unwrap();
        ballots::create_ballots(&mut ledger, &admin(), &mut rng).unwrap();
        ledger
    }

    fn total_votes(ledger: &Ledger, ballot_id: BallotId) -> u64 {
        let round = ledger
            .ballots()
            .iter()
            .find(|b| b.id == ballot_id)
            .unwrap()
            .round;
        ledger
            .candidates()
            .iter()
            .filter(|c| c.ballot_id == ballot_id && c.round_id == round)
            .map(|c| c.votes_count)
            .sum()
    }

    #[test]
    fn turnout_respects_abstention_bounds() {
        let mut ledger = election();
        let mut rng = StdRng::seed_from_u64(13);

        generate_votes(&mut ledger, AbstentionRange::default(), &mut rng).unwrap();

        // Electorates: 120 (governor 0), 80 (governor 1), 200 (president 2).
        for (ballot_id, registered) in [(0u64, 120u64), (1, 80), (2, 200)] {
            let votes = total_votes(&ledger, ballot_id);
            // Abstention percentage is drawn from [10, 30).
            let min_votes = registered - registered * 29 / 100;
            let max_votes = registered - registered * 10 / 100;
            assert!(
                (min_votes..=max_votes).contains(&votes),
                "ballot {ballot_id}: {votes} votes outside [{min_votes}, {max_votes}]"
            );
        }
    }

    #[test]
    fn rejects_degenerate_bounds() {
        AbstentionRange::new(0.3, 0.1).unwrap_err();
        AbstentionRange::new(-0.1, 0.2).unwrap_err();
        AbstentionRange::new(0.2, 1.5).unwrap_err();
        // Collapses to an empty percentage range.
        AbstentionRange::new(0.101, 0.105).unwrap_err();

        AbstentionRange::new(0.1, 0.3).unwrap();
    }
}
