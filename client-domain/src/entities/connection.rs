// Subscription connection state machine
// CONNECTING -> OPEN -> (ERROR -> RECONNECTING -> OPEN)* -> CLOSED

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionState {
    Connecting,
    Open,
    Reconnecting,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    Opened,
    TransportError,
    Teardown,
}

impl ConnectionState {
    /// CLOSED is absorbing: nothing reopens a torn-down subscription.
    pub fn transition(self, event: ConnectionEvent) -> ConnectionState {
        match (self, event) {
            (ConnectionState::Closed, _) => ConnectionState::Closed,
            (_, ConnectionEvent::Teardown) => ConnectionState::Closed,
            (_, ConnectionEvent::Opened) => ConnectionState::Open,
            (_, ConnectionEvent::TransportError) => ConnectionState::Reconnecting,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "live",
            ConnectionState::Reconnecting => "reconnecting",
            ConnectionState::Closed => "closed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_reconnect_cycle() {
        let state = ConnectionState::Connecting
            .transition(ConnectionEvent::Opened)
            .transition(ConnectionEvent::TransportError);
        assert_eq!(state, ConnectionState::Reconnecting);
        let state = state
            .transition(ConnectionEvent::TransportError)
            .transition(ConnectionEvent::Opened);
        assert_eq!(state, ConnectionState::Open);
    }

    #[test]
    fn initial_failure_goes_straight_to_reconnecting() {
        assert_eq!(
            ConnectionState::Connecting.transition(ConnectionEvent::TransportError),
            ConnectionState::Reconnecting
        );
    }

    #[test]
    fn closed_is_terminal() {
        let closed = ConnectionState::Open.transition(ConnectionEvent::Teardown);
        assert_eq!(closed, ConnectionState::Closed);
        assert_eq!(closed.transition(ConnectionEvent::Opened), ConnectionState::Closed);
        assert_eq!(
            closed.transition(ConnectionEvent::TransportError),
            ConnectionState::Closed
        );
    }
}
