use crate::{
    ConnectionConfig, ConnectionId, ConnectionLifecycle, EventMessage, EventSource, Hub,
    HubError, Ingress, Metrics, Result as HubResult, ShutdownGuard, Subscriber,
};

use std::fmt::Display;
use std::ops::ControlFlow;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use bytes::Bytes;
use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval_at, timeout, timeout_at};

/// Manages a single subscriber connection.
///
/// Two loops share the socket: the inbound loop (this task) reads frames and
/// enforces the liveness deadline, the outbound loop (a spawned task) drains
/// the subscriber's queue and sends keepalive pings. Either one ending tears
/// the whole connection down, and the hub is told exactly once.
pub struct WebSocketConnection {
    connection_id: ConnectionId,
    config: ConnectionConfig,
    hub: Hub,
    ingress: Ingress,
    metrics: Metrics,
    lifecycle: ConnectionLifecycle,
}

impl WebSocketConnection {
    pub fn new(
        connection_id: ConnectionId,
        config: ConnectionConfig,
        hub: Hub,
        ingress: Ingress,
        metrics: Metrics,
    ) -> Self {
        Self {
            connection_id,
            config,
            hub,
            ingress,
            metrics,
            lifecycle: ConnectionLifecycle::new(),
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Shared view of this connection's state, usable after `run` consumes it
    pub fn lifecycle(&self) -> ConnectionLifecycle {
        self.lifecycle.clone()
    }

    /// Handle an upgraded WebSocket until either side ends it
    pub async fn handle(self, socket: WebSocket, shutdown: ShutdownGuard) -> HubResult<()> {
        let (sink, stream) = socket.split();
        self.run(stream, sink, shutdown).await
    }

    /// Drive the connection over any frame stream and sink.
    pub async fn run<S, E, K>(
        self,
        mut stream: S,
        sink: K,
        mut shutdown: ShutdownGuard,
    ) -> HubResult<()>
    where
        S: Stream<Item = Result<Message, E>> + Unpin,
        E: Display,
        K: Sink<Message> + Unpin + Send + 'static,
        K::Error: Display + Send,
    {
        let (subscriber, outbound) =
            Subscriber::channel(self.connection_id, self.config.send_buffer_size);

        if let Err(e) = self.hub.register(subscriber).await {
            log::error!(
                "Connection {} could not register with hub: {}",
                self.connection_id,
                e
            );
            self.lifecycle.mark_closed();
            return Err(e);
        }

        self.lifecycle.open();
        self.metrics.connection_established();
        log::info!("WebSocket connection {} established", self.connection_id);

        let mut write_task = tokio::spawn(write_loop(
            self.connection_id,
            outbound,
            sink,
            self.config.clone(),
            self.metrics.clone(),
            self.lifecycle.clone(),
        ));
        let mut writer_done = false;

        let mut deadline = Instant::now() + self.config.pong_wait;

        let result = loop {
            tokio::select! {
                frame = timeout_at(deadline, stream.next()) => match frame {
                    Err(_) => {
                        log::warn!(
                            "Connection {} silent for {:?}, closing",
                            self.connection_id,
                            self.config.pong_wait
                        );
                        break Err(HubError::heartbeat_timeout(self.config.pong_wait));
                    }
                    Ok(None) => {
                        log::info!("Connection {} closed by client", self.connection_id);
                        break Ok(());
                    }
                    Ok(Some(Err(e))) => {
                        log::warn!("WebSocket error on connection {}: {}", self.connection_id, e);
                        break Err(HubError::connection_closed(format!("WebSocket error: {e}")));
                    }
                    Ok(Some(Ok(message))) => {
                        deadline = Instant::now() + self.config.pong_wait;
                        match self.handle_frame(message).await {
                            Ok(ControlFlow::Continue(())) => {}
                            Ok(ControlFlow::Break(())) => break Ok(()),
                            Err(e) => break Err(e),
                        }
                    }
                },

                outcome = &mut write_task, if !writer_done => {
                    writer_done = true;
                    break match outcome {
                        Ok(result) => result,
                        Err(e) => Err(HubError::internal(format!("outbound task failed: {e}"))),
                    };
                }

                _ = shutdown.wait() => {
                    log::info!("Shutting down connection {} gracefully", self.connection_id);
                    break Ok(());
                }
            }
        };

        // Teardown: only this task unregisters, so it runs once
        if self.lifecycle.begin_closing() {
            log::debug!("Connection {} closing from inbound side", self.connection_id);
        }
        self.hub.unregister(self.connection_id).await;

        if !writer_done {
            // Unregister closed the queue; give the writer time for the close frame
            if timeout(self.config.write_wait * 2, &mut write_task)
                .await
                .is_err()
            {
                log::warn!(
                    "Outbound loop for {} did not finish, aborting",
                    self.connection_id
                );
                write_task.abort();
            }
        }

        self.lifecycle.mark_closed();

        let reason = match &result {
            Ok(()) => "normal",
            Err(e) if e.is_timeout() => "timeout",
            Err(_) => "error",
        };
        if let Err(e) = &result {
            self.metrics
                .error_occurred(&e.error_code().to_lowercase());
        }
        self.metrics.connection_closed(reason);

        log::info!(
            "WebSocket connection {} closed ({})",
            self.connection_id,
            reason
        );

        result
    }

    async fn handle_frame(&self, message: Message) -> HubResult<ControlFlow<()>> {
        let submitted = match message {
            Message::Text(text) => {
                self.ingress
                    .submit_text(text.as_str(), EventSource::Subscriber)
                    .await
            }
            Message::Binary(data) => {
                self.ingress
                    .submit_bytes(&data, EventSource::Subscriber)
                    .await
            }
            Message::Ping(_) | Message::Pong(_) => return Ok(ControlFlow::Continue(())),
            Message::Close(frame) => {
                log::info!(
                    "Received close frame from connection {}: {:?}",
                    self.connection_id,
                    frame
                );
                return Ok(ControlFlow::Break(()));
            }
        };

        match submitted {
            Ok(()) => Ok(ControlFlow::Continue(())),
            // Protocol violation: terminates the connection
            Err(e @ HubError::MessageTooLarge { .. }) => {
                log::warn!("Connection {} sent oversized frame: {}", self.connection_id, e);
                Err(e)
            }
            Err(e) => {
                log::debug!(
                    "Ignoring frame from connection {}: {}",
                    self.connection_id,
                    e
                );
                Ok(ControlFlow::Continue(()))
            }
        }
    }
}

/// Outbound loop: one writer per connection, so frames never interleave.
async fn write_loop<K>(
    connection_id: ConnectionId,
    mut outbound: mpsc::Receiver<EventMessage>,
    mut sink: K,
    config: ConnectionConfig,
    metrics: Metrics,
    lifecycle: ConnectionLifecycle,
) -> HubResult<()>
where
    K: Sink<Message> + Unpin,
    K::Error: Display,
{
    let period = config.ping_period();
    let mut ping = interval_at(Instant::now() + period, period);
    ping.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let result = loop {
        tokio::select! {
            event = outbound.recv() => match event {
                Some(event) => {
                    if let Err(e) = write_frame(&mut sink, event.into(), config.write_wait).await {
                        break Err(e);
                    }
                    metrics.message_sent();
                }
                None => {
                    log::debug!("Outbound queue for {connection_id} closed, sending close frame");
                    // Best effort; the peer may already be gone
                    let _ = write_frame(&mut sink, Message::Close(None), config.write_wait).await;
                    break Ok(());
                }
            },

            _ = ping.tick() => {
                if let Err(e) = write_frame(&mut sink, Message::Ping(Bytes::new()), config.write_wait).await {
                    break Err(e);
                }
            }
        }
    };

    if let Err(e) = &result {
        log::warn!("Outbound loop for {connection_id} stopped: {e}");
    }

    // Only the writer owns the sink, so the transport is closed once
    if lifecycle.begin_closing() {
        log::debug!("Outbound loop for {connection_id} initiated close");
    }
    let _ = timeout(config.write_wait, sink.close()).await;

    result
}

async fn write_frame<K>(sink: &mut K, message: Message, write_wait: Duration) -> HubResult<()>
where
    K: Sink<Message> + Unpin,
    K::Error: Display,
{
    match timeout(write_wait, sink.send(message)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(HubError::connection_closed(format!("write failed: {e}"))),
        Err(_) => Err(HubError::write_timeout(write_wait)),
    }
}
