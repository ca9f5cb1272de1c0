//! The vote relay.
//!
//! A small datagram server that receives `VOTE` requests over UDP, applies
//! them to the ledger as the sending voter's identity, and replies with the
//! outcome on the same socket. The relay owns its own logging and never
//! retries a rejected vote; retry policy around delivery belongs to the
//! clients.

use std::net::SocketAddr;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::UdpSocket;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::ledger::Ledger;

pub mod message;

use message::{Event, Request, Response, VoteData};

/// Maximum datagram size we will accept.
const BUFSIZE: usize = (1 << 14) - 1;

/// Master process for a votes center.
///
/// Wraps the ledger in a mutex: the relay is the execution substrate here,
/// and the mutex is what serialises mutating calls against complete state
/// snapshots.
pub struct Master {
    name: String,
    socket: Arc<UdpSocket>,
    ledger: Arc<Mutex<Ledger>>,
}

impl Master {
    /// Bind the relay to a local address.
    pub async fn bind(
        name: impl Into<String>,
        addr: &str,
        ledger: Arc<Mutex<Ledger>>,
    ) -> Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self {
            name: name.into(),
            socket: Arc::new(socket),
            ledger,
        })
    }

    /// The address the relay is actually bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Serve forever.
    pub async fn listen(self) -> Result<()> {
        info!("{} listening on {}", self.name, self.socket.local_addr()?);
        let mut buf = vec![0u8; BUFSIZE];
        loop {
            let (len, sender) = self.socket.recv_from(&mut buf).await?;
            let datagram = buf[..len].to_vec();
            let socket = Arc::clone(&self.socket);
            let ledger = Arc::clone(&self.ledger);
            // One submission job per datagram; a slow vote never blocks the
            // receive loop.
            tokio::spawn(async move {
                let response = handle_message(&datagram, &ledger).await;
                reply(&socket, sender, &response).await;
            });
        }
    }
}

/// Decode one datagram, apply it to the ledger, and build the reply.
async fn handle_message(datagram: &[u8], ledger: &Mutex<Ledger>) -> Response {
    let request: Request = match serde_json::from_slice(datagram) {
        Ok(request) => request,
        Err(err) => {
            warn!("Discarding undecodable request: {err}");
            return Response::error(format!("Malformed request: {err}"));
        }
    };
    match request.event {
        Event::Vote => event_vote(request.data, ledger).await,
    }
}

/// Handle a `VOTE` event.
async fn event_vote(data: VoteData, ledger: &Mutex<Ledger>) -> Response {
    info!("VOTE received from {}", data.account);
    let result = ledger
        .lock()
        .await
        .vote(&data.account, data.ballot_id, data.round_id, &data.candidate);
    match result {
        Ok(()) => {
            info!(
                "Vote committed. account: {}, ballotId: {}, roundId: {}, candidate: {}",
                data.account, data.ballot_id, data.round_id, data.candidate,
            );
            Response::success("Vote committed to the ledger.")
        }
        Err(err) => {
            warn!("Vote from {} rejected: {err}", data.account);
            Response::error(err.to_string())
        }
    }
}

async fn reply(socket: &UdpSocket, sender: SocketAddr, response: &Response) {
    let encoded = match serde_json::to_vec(response) {
        Ok(encoded) => encoded,
        Err(err) => {
            // Response serialisation cannot fail for these types.
            error!("Failed to encode response: {err}");
            return;
        }
    };
    if let Err(err) = socket.send_to(&encoded, sender).await {
        warn!("Failed to reply to {sender}: {err}");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::{json, Value};

    use crate::model::Address;

    use super::*;

    fn admin() -> Address {
        Address::example_admin()
    }

    fn voter() -> Address {
        Address::example_voter()
    }

    /// A ledger with one open governor ballot whose only candidate is the
    /// one registered voter.
    fn open_ledger() -> Ledger {
        let mut ledger = Ledger::new(admin());
        ledger.add_location(&admin(), 0, "Zulia").unwrap();
        ledger.add_center(&admin(), 0, 0).unwrap();
        ledger.add_voter(&admin(), voter(), 0, 0).unwrap();
        ledger.add_governor_ballot(&admin(), 0, 0).unwrap();
        ledger.add_candidate(&admin(), 0, voter()).unwrap();
        ledger.open_ballot(&admin(), 0).unwrap();
        ledger
    }

    async fn round_trip(ledger: Arc<Mutex<Ledger>>, payload: &[u8]) -> Value {
        let master = Master::bind("test-relay", "127.0.0.1:0", ledger)
            .await
            .unwrap();
        let relay_addr = master.local_addr().unwrap();
        tokio::spawn(master.listen());

        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        client.send_to(payload, relay_addr).await.unwrap();

        let mut buf = vec![0u8; BUFSIZE];
        let (len, _) = tokio::time::timeout(Duration::from_secs(5), client.recv_from(&mut buf))
            .await
            .expect("relay did not reply")
            .unwrap();
        serde_json::from_slice(&buf[..len]).unwrap()
    }

    #[tokio::test]
    async fn vote_round_trip() {
        log4rs_test_utils::test_logging::init_logging_once_for(["election_ledger"], None, None);

        let ledger = Arc::new(Mutex::new(open_ledger()));
        let request = json!({
            "event": "VOTE",
            "data": {
                "account": voter(),
                "ballot_id": 0,
                "round_id": 1,
                "candidate": voter(),
            },
        });

        let reply = round_trip(Arc::clone(&ledger), request.to_string().as_bytes()).await;
        assert!(reply["result"]["success"].is_string(), "reply: {reply}");

        let tally = ledger.lock().await.candidates()[0].votes_count;
        assert_eq!(tally, 1);
    }

    #[tokio::test]
    async fn rejected_vote_reports_error() {
        let ledger = Arc::new(Mutex::new(open_ledger()));
        let request = json!({
            "event": "VOTE",
            "data": {
                // Not a registered voter.
                "account": "0xnobody",
                "ballot_id": 0,
                "round_id": 1,
                "candidate": voter(),
            },
        });

        let reply = round_trip(Arc::clone(&ledger), request.to_string().as_bytes()).await;
        assert!(reply["result"]["error"].is_string(), "reply: {reply}");

        let tally = ledger.lock().await.candidates()[0].votes_count;
        assert_eq!(tally, 0);
    }

    #[tokio::test]
    async fn malformed_datagram_reports_error() {
        let ledger = Arc::new(Mutex::new(open_ledger()));
        let reply = round_trip(ledger, b"not json at all").await;
        assert!(reply["result"]["error"].is_string(), "reply: {reply}");
    }
}
