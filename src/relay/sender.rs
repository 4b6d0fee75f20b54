use tokio::net::UdpSocket;

use crate::relay::{RelayError, message::Message};

/// Sends the passed message as a single JSON datagram to the listener
/// address.
///
/// The socket is bound to an ephemeral local port for just this send; there
/// is no acknowledgment and no retry.
///
/// # Errors
///
/// Throws a `RelayError` if the message cannot be encoded or the datagram
/// cannot be sent.
pub async fn send(addr: &str, message: &Message) -> Result<(), RelayError> {
    let payload = serde_json::to_vec(message)?;
    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.send_to(&payload, addr).await?;
    Ok(())
}
