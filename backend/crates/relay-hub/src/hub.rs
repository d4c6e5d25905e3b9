//! The hub: single owner of the subscriber set.
//!
//! All membership changes and every fan-out decision go through one control
//! loop ([`HubRunner::run`]) fed by a single intake channel. Nothing else can
//! reach the membership map, so it needs no lock. Fan-out uses `try_send`
//! onto each subscriber's bounded queue: a full queue means the message is
//! dropped for that subscriber only, and the loop moves on.

use crate::{
    ConnectionConfig, ConnectionId, EventMessage, HubError, Metrics, Result as HubResult,
    ShutdownCoordinator, ShutdownGuard, Subscriber,
};

use std::collections::HashMap;

use log::{debug, info, warn};
use tokio::sync::{mpsc, oneshot};
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;

/// Control events, processed strictly in intake order
#[derive(Debug)]
enum HubCommand {
    Register(Subscriber),
    Unregister(ConnectionId),
    Submit(EventMessage),
    ConnectionCount(oneshot::Sender<usize>),
}

/// Cloneable handle to the hub's control loop
#[derive(Clone)]
pub struct Hub {
    commands: mpsc::Sender<HubCommand>,
}

/// Result of one fan-out pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FanOut {
    delivered: usize,
    dropped: usize,
    evicted: usize,
}

impl Hub {
    /// Create a hub handle and the control loop that serves it.
    /// The loop does nothing until [`HubRunner::run`] is awaited.
    pub fn new(config: &ConnectionConfig, metrics: Metrics) -> (Self, HubRunner) {
        let (commands, intake) = mpsc::channel(config.intake_capacity.max(1));
        let runner = HubRunner {
            intake,
            members: HashMap::new(),
            metrics,
        };
        (Self { commands }, runner)
    }

    /// Create a hub and spawn its control loop. The loop stops when
    /// `shutdown` fires or every handle is dropped.
    pub fn spawn(
        config: &ConnectionConfig,
        metrics: Metrics,
        shutdown: &ShutdownCoordinator,
    ) -> (Self, JoinHandle<()>) {
        let (hub, runner) = Self::new(config, metrics);
        let guard = shutdown.subscribe_guard();
        let task = tokio::spawn(runner.run(guard));
        (hub, task)
    }

    /// Add a subscriber to the membership set.
    pub async fn register(&self, subscriber: Subscriber) -> HubResult<()> {
        self.commands
            .send(HubCommand::Register(subscriber))
            .await
            .map_err(|_| HubError::hub_closed())
    }

    /// Remove a subscriber and close its outbound queue. No-op if absent.
    pub async fn unregister(&self, connection_id: ConnectionId) {
        if self
            .commands
            .send(HubCommand::Unregister(connection_id))
            .await
            .is_err()
        {
            debug!("Hub already stopped, nothing to unregister for {connection_id}");
        }
    }

    /// Queue a message for fan-out to every current subscriber.
    ///
    /// Never reports delivery problems back to the producer.
    pub async fn submit(&self, message: EventMessage) {
        if self.commands.send(HubCommand::Submit(message)).await.is_err() {
            warn!("Hub stopped, dropping submitted message");
        }
    }

    /// Number of registered subscribers, as seen by the control loop.
    ///
    /// Goes through the same intake as every other command, so it also
    /// resolves only after everything sent before it has been processed.
    pub async fn connection_count(&self) -> HubResult<usize> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(HubCommand::ConnectionCount(reply_tx))
            .await
            .map_err(|_| HubError::hub_closed())?;
        reply_rx.await.map_err(|_| HubError::hub_closed())
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

/// The hub's control loop and the state only it may touch
pub struct HubRunner {
    intake: mpsc::Receiver<HubCommand>,
    members: HashMap<ConnectionId, Subscriber>,
    metrics: Metrics,
}

impl HubRunner {
    pub async fn run(mut self, mut shutdown: ShutdownGuard) {
        info!("Hub control loop started");

        loop {
            tokio::select! {
                command = self.intake.recv() => match command {
                    Some(command) => self.handle(command),
                    None => {
                        debug!("All hub handles dropped");
                        break;
                    }
                },
                _ = shutdown.wait() => {
                    info!("Hub shutting down");
                    break;
                }
            }
        }

        // Dropping the subscribers closes every outbound queue, which sends
        // each connection's close frame.
        let remaining = self.members.len();
        self.members.clear();
        info!("Hub control loop stopped ({remaining} subscribers released)");
    }

    fn handle(&mut self, command: HubCommand) {
        match command {
            HubCommand::Register(subscriber) => self.register(subscriber),
            HubCommand::Unregister(connection_id) => self.unregister(connection_id),
            HubCommand::Submit(message) => {
                let outcome = self.fan_out(message);
                self.metrics
                    .broadcast_published(outcome.delivered, outcome.dropped);
            }
            HubCommand::ConnectionCount(reply) => {
                let _ = reply.send(self.members.len());
            }
        }
    }

    fn register(&mut self, subscriber: Subscriber) {
        let connection_id = subscriber.connection_id;
        if self.members.insert(connection_id, subscriber).is_some() {
            warn!("Connection {connection_id} registered twice, replacing previous entry");
        }
        info!(
            "Registered connection {connection_id} ({} total)",
            self.members.len()
        );
    }

    fn unregister(&mut self, connection_id: ConnectionId) {
        if let Some(subscriber) = self.members.remove(&connection_id) {
            let lifetime = chrono::Utc::now() - subscriber.connected_at;
            info!(
                "Unregistered connection {connection_id} after {}s ({} total remaining)",
                lifetime.num_seconds(),
                self.members.len()
            );
        }
    }

    fn fan_out(&mut self, message: EventMessage) -> FanOut {
        let mut outcome = FanOut::default();
        let mut gone = Vec::new();

        for (connection_id, subscriber) in &self.members {
            match subscriber.offer(message.clone()) {
                Ok(()) => outcome.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    outcome.dropped += 1;
                    debug!("Connection {connection_id} is behind, message dropped");
                }
                Err(TrySendError::Closed(_)) => gone.push(*connection_id),
            }
        }

        // Receiver dropped: the connection tore down before its unregister
        // reached us.
        for connection_id in gone {
            self.members.remove(&connection_id);
            outcome.evicted += 1;
            debug!("Connection {connection_id} queue closed, removed from hub");
        }

        debug!(
            "Broadcast {} bytes: delivered={}, dropped={}, evicted={}",
            message.len(),
            outcome.delivered,
            outcome.dropped,
            outcome.evicted
        );

        outcome
    }
}
