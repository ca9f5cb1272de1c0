//! Entity types held by the ledger.

pub mod address;
pub mod ballot;
pub mod candidate;
pub mod center;
pub mod location;
pub mod voter;

pub use address::Address;
pub use ballot::{Ballot, BallotId, BallotState, Round, FIRST_ROUND};
pub use candidate::Candidate;
pub use center::{Center, CenterId};
pub use location::{Location, LocationId};
pub use voter::Voter;
