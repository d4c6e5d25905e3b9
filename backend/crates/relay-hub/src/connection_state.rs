use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Where a connection is in its single-use lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Connecting = 0,
    Open = 1,
    Closing = 2,
    Closed = 3,
}

impl ConnectionState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Connecting,
            1 => Self::Open,
            2 => Self::Closing,
            _ => Self::Closed,
        }
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closing => "closing",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Shared state machine for one connection's two loops.
///
/// Transitions only move forward: `Connecting -> Open -> Closing -> Closed`.
/// Each transition method returns `true` only for the caller that performed
/// it, which tells the two loops which of them started the close. Teardown
/// itself runs once because each step has a single owner: the inbound loop
/// unregisters and the outbound loop closes the sink.
#[derive(Debug, Clone)]
pub struct ConnectionLifecycle {
    state: Arc<AtomicU8>,
}

impl ConnectionLifecycle {
    pub fn new() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(ConnectionState::Connecting as u8)),
        }
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// `Connecting -> Open`, once registered with the hub.
    pub fn open(&self) -> bool {
        self.transition(ConnectionState::Connecting, ConnectionState::Open)
    }

    /// Enter `Closing` from `Connecting` or `Open`.
    pub fn begin_closing(&self) -> bool {
        self.transition(ConnectionState::Open, ConnectionState::Closing)
            || self.transition(ConnectionState::Connecting, ConnectionState::Closing)
    }

    /// Enter `Closed` from any earlier state. Re-entry is a no-op.
    pub fn mark_closed(&self) -> bool {
        let previous = self
            .state
            .swap(ConnectionState::Closed as u8, Ordering::AcqRel);
        previous != ConnectionState::Closed as u8
    }

    pub fn is_closing_or_closed(&self) -> bool {
        matches!(
            self.state(),
            ConnectionState::Closing | ConnectionState::Closed
        )
    }

    fn transition(&self, from: ConnectionState, to: ConnectionState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Default for ConnectionLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
