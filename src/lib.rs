//! Backend ledger service for a multi-round regional election.
//!
//! The heart of the crate is [`ledger::Ledger`]: a single-writer state
//! machine holding the administrative collections (locations, centers,
//! voters, candidates, ballots) and enforcing who may mutate what, when a
//! ballot may open, advance, or close, and that no voter votes twice in one
//! round. Around it sit the datagram vote relay ([`relay`]), the
//! synthetic-data generators ([`generate`]), and the server assembly here.

use std::sync::Arc;

use log::info;
use rand::thread_rng;
use tokio::sync::Mutex;

pub mod config;
pub mod error;
pub mod generate;
pub mod ledger;
pub mod model;
pub mod relay;

pub use config::Config;

use error::Result;
use ledger::Ledger;
use relay::Master;

/// Assemble the ledger and relay described by the config.
///
/// If the config names a locations file, the ledger is seeded from it:
/// locations, centers, and voters per record, then one open governor ballot
/// per location plus an open president ballot, so the relay has contests to
/// accept votes for.
pub async fn build(config: &Config) -> Result<Master> {
    let admin = config.admin_address();
    let mut ledger = Ledger::new(admin.clone());

    if let Some(path) = config.locations_file() {
        info!("Seeding ledger from {path}");
        let records = generate::parse_locations_file(path)?;
        let mut accounts = generate::AccountPool::new(thread_rng());
        generate::register_locations(
            &mut ledger,
            &admin,
            &records,
            &mut accounts,
            &mut thread_rng(),
        )?;
        generate::create_ballots(&mut ledger, &admin, &mut thread_rng())?;
        info!(
            "Seeded {} locations, {} voters, {} ballots",
            ledger.locations().len(),
            ledger.voters().len(),
            ledger.ballots().len(),
        );
    }

    Master::bind(
        "votes-center",
        &config.bind_addr(),
        Arc::new(Mutex::new(ledger)),
    )
    .await
}
