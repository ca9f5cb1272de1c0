//! Voter registration generator.
//!
//! Registers each parsed location, its polling centers, and its voters;
//! every voter is assigned a uniformly random center within their location.
//! Center ids are allocated from a running offset threaded through the
//! loop, so ids stay contiguous across locations.

use log::info;
use rand::Rng;

use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::model::{Address, CenterId};

use super::accounts::AccountPool;
use super::locations::LocationRecord;

/// Register every location in `records`, with its centers and voters.
///
/// Location ids follow record order; center ids are contiguous across the
/// whole run.
pub fn register_locations<R: Rng>(
    ledger: &mut Ledger,
    admin: &Address,
    records: &[LocationRecord],
    accounts: &mut AccountPool<R>,
    rng: &mut impl Rng,
) -> Result<()> {
    let mut centers_created: CenterId = 0;
    for (index, record) in records.iter().enumerate() {
        if record.centers == 0 && record.voters > 0 {
            return Err(Error::malformed(format!(
                "Location {} has voters but no centers",
                record.name
            )));
        }
        let location_id = index as u64;
        ledger.add_location(admin, location_id, record.name.as_str())?;
        for offset in 0..record.centers {
            ledger.add_center(admin, centers_created + offset, location_id)?;
        }
        for _ in 0..record.voters {
            let account = accounts.next_account();
            let center = centers_created + rng.gen_range(0..record.centers);
            ledger.add_voter(admin, account, center, location_id)?;
        }
        info!(
            "Registered location {location_id} ({}): {} voters across {} centers",
            record.name, record.voters, record.centers,
        );
        centers_created += record.centers;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn admin() -> Address {
        Address::example_admin()
    }

    fn records() -> Vec<LocationRecord> {
        vec![
            LocationRecord {
                name: "Zulia".to_string(),
                voters: 40,
                centers: 3,
            },
            LocationRecord {
                name: "Miranda".to_string(),
                voters: 25,
                centers: 2,
            },
        ]
    }

    #[test]
    fn registers_everything_consistently() {
        let mut ledger = Ledger::new(admin());
        let mut accounts = AccountPool::new(StdRng::seed_from_u64(1));
        let mut rng = StdRng::seed_from_u64(2);

        register_locations(&mut ledger, &admin(), &records(), &mut accounts, &mut rng).unwrap();

        assert_eq!(ledger.locations().len(), 2);
        assert_eq!(ledger.centers().len(), 5);
        assert_eq!(ledger.voters().len(), 65);
        assert_eq!(ledger.locations()[0].voter_count, 40);
        assert_eq!(ledger.locations()[1].voter_count, 25);

        // Center ids are contiguous: 0..3 belong to Zulia, 3..5 to Miranda.
        for center in ledger.centers() {
            let expected_location = if center.id < 3 { 0 } else { 1 };
            assert_eq!(center.location_id, expected_location);
        }

        // Every voter sits in a center of their own location.
        for voter in ledger.voters() {
            let center = &ledger.centers()[voter.center_id as usize];
            assert_eq!(center.location_id, voter.location_id);
        }
    }

    #[test]
    fn rejects_voters_without_centers() {
        let mut ledger = Ledger::new(admin());
        let mut accounts = AccountPool::new(StdRng::seed_from_u64(1));
        let mut rng = StdRng::seed_from_u64(2);
        let records = vec![LocationRecord {
            name: "Vargas".to_string(),
            voters: 10,
            centers: 0,
        }];

        let err = register_locations(&mut ledger, &admin(), &records, &mut accounts, &mut rng)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }
}
