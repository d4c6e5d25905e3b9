use crate::{ConnectionId, EventMessage};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

/// The hub's side of one connection: its identity and the producer end of
/// its outbound queue.
///
/// The hub holds the only sender, so dropping a `Subscriber` closes the
/// queue and the connection's outbound loop sees it end.
#[derive(Debug)]
pub struct Subscriber {
    pub connection_id: ConnectionId,
    pub connected_at: DateTime<Utc>,
    outbound: mpsc::Sender<EventMessage>,
}

impl Subscriber {
    /// Create a subscriber with an empty outbound queue of `capacity` slots.
    pub fn channel(
        connection_id: ConnectionId,
        capacity: usize,
    ) -> (Self, mpsc::Receiver<EventMessage>) {
        let (outbound, receiver) = mpsc::channel(capacity.max(1));
        let subscriber = Self {
            connection_id,
            connected_at: Utc::now(),
            outbound,
        };
        (subscriber, receiver)
    }

    /// Non-blocking enqueue; never waits for the consumer.
    pub(crate) fn offer(
        &self,
        event: EventMessage,
    ) -> Result<(), mpsc::error::TrySendError<EventMessage>> {
        self.outbound.try_send(event)
    }
}
