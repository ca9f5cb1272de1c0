//! Synthetic-data generators.
//!
//! Everything here drives the ledger exclusively through its public
//! operations: registration and ballot setup as the administrator address
//! the caller hands in, voting as each generated voter. There is no
//! privileged access path into the ledger's storage.

pub mod accounts;
pub mod ballots;
pub mod locations;
pub mod voters;
pub mod votes;

pub use accounts::AccountPool;
pub use ballots::create_ballots;
pub use locations::{parse_locations, parse_locations_file, LocationRecord};
pub use voters::register_locations;
pub use votes::{generate_votes, AbstentionRange};
