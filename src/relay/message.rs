//! Wire format for the datagram relay.
//!
//! Requests and replies are single JSON datagrams. The only event today is
//! `VOTE`; the enum exists so new events decode into something explicit
//! rather than being guessed from field names.

use serde::{Deserialize, Serialize};

use crate::model::{Address, BallotId, Round};

/// Events the relay understands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    #[serde(rename = "VOTE")]
    Vote,
}

/// An incoming request datagram.
#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct Request {
    pub event: Event,
    pub data: VoteData,
}

/// Payload of a `VOTE` request.
#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct VoteData {
    /// The voter's own address; the vote is applied as this identity.
    pub account: Address,
    pub ballot_id: BallotId,
    pub round_id: Round,
    pub candidate: Address,
}

/// The reply sent back over the same socket.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Response {
    pub result: RelayResult,
}

/// Outcome of handling one request.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub enum RelayResult {
    #[serde(rename = "success")]
    Success(String),
    #[serde(rename = "error")]
    Error(String),
}

impl Response {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            result: RelayResult::Success(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: RelayResult::Error(message.into()),
        }
    }
}
