use std::net::SocketAddr;

use chrono::Local;
use tokio::net::UdpSocket;
use tracing::{info, warn};

use crate::relay::{RelayError, message::Message};
use crate::store::json_store::MessageStore;

/// The largest datagram the listener accepts.
const MAX_DATAGRAM: usize = 1024;

/// The format of store keys: local wall-clock time at receipt with
/// microsecond resolution.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// The receive loop persisting every relayed message to the store.
#[derive(Debug)]
pub struct Listener {
    socket: UdpSocket,
    store: MessageStore,
}

impl Listener {
    /// Binds the listener socket on the passed address.
    ///
    /// # Errors
    ///
    /// Throws a `RelayError` if the socket cannot be bound.
    pub async fn bind(addr: &str, store: MessageStore) -> Result<Self, RelayError> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self { socket, store })
    }

    /// The local address the listener is bound to.
    ///
    /// # Errors
    ///
    /// Throws a `RelayError` if the socket has no local address.
    pub fn local_addr(&self) -> Result<SocketAddr, RelayError> {
        Ok(self.socket.local_addr()?)
    }

    /// Receives datagrams until the owning task ends or the store fails.
    ///
    /// Each datagram is decoded as a JSON object with string values,
    /// stamped with the receipt time and merged into the store. A datagram
    /// that does not decode is logged and skipped so the loop stays
    /// available.
    ///
    /// # Errors
    ///
    /// Throws a `RelayError` if receiving fails or the store cannot be
    /// rewritten.
    pub async fn run(self) -> Result<(), RelayError> {
        let mut buf = [0u8; MAX_DATAGRAM];
        loop {
            let (len, peer) = self.socket.recv_from(&mut buf).await?;
            let message: Message = match serde_json::from_slice(&buf[..len]) {
                Ok(message) => message,
                Err(e) => {
                    warn!("dropping malformed datagram from {peer}: {e}");
                    continue;
                }
            };

            let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
            self.store.insert(&timestamp, &message)?;
            info!("added message under {timestamp}: {message:?}");
        }
    }
}
