//! Connection state shared between the BLE task and the gamepad.
//!
//! The transport's connect/disconnect callbacks are the only writers;
//! the gamepad reads the state before every report. The state lives in
//! an atomic so a `&'static ConnectionStatus` can be handed to both
//! sides without a lock.

use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "defmt")]
use defmt::info;

/// Link state as seen by the gamepad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// Two-state connection cell, initially `Disconnected`.
pub struct ConnectionStatus {
    connected: AtomicBool,
}

impl ConnectionStatus {
    pub const fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> ConnectionState {
        if self.connected.load(Ordering::Acquire) {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Transport callback: a host connected.
    /// Returns `true` if this was a transition.
    pub fn on_connect(&self) -> bool {
        self.transition(ConnectionState::Connected)
    }

    /// Transport callback: the host went away.
    /// Returns `true` if this was a transition.
    pub fn on_disconnect(&self) -> bool {
        self.transition(ConnectionState::Disconnected)
    }

    fn transition(&self, to: ConnectionState) -> bool {
        let connected = to == ConnectionState::Connected;
        let was = self.connected.swap(connected, Ordering::AcqRel);
        let changed = was != connected;

        if changed {
            #[cfg(feature = "defmt")]
            info!("Connection: -> {:?}", to);
        }

        changed
    }
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disconnected() {
        let status = ConnectionStatus::new();
        assert_eq!(status.state(), ConnectionState::Disconnected);
        assert!(!status.is_connected());
    }

    #[test]
    fn connect_disconnect_cycle() {
        let status = ConnectionStatus::new();
        assert!(status.on_connect());
        assert!(status.is_connected());
        assert!(status.on_disconnect());
        assert_eq!(status.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn repeated_callbacks_are_not_transitions() {
        let status = ConnectionStatus::new();
        assert!(!status.on_disconnect());
        assert!(status.on_connect());
        assert!(!status.on_connect());
        assert!(status.is_connected());
    }
}
