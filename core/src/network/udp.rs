use std::io;
use std::net::{Ipv4Addr, SocketAddr};

use tokio::net::UdpSocket;

const MAX_DATAGRAM: usize = 1500;

/// Sends `payload` to `target` and waits for the first reply `accept` takes.
///
/// The socket is connected, so datagrams from other peers never reach
/// `accept`. No deadline is applied here; callers wrap the future in
/// `tokio::time::timeout`.
pub async fn exchange<F>(target: SocketAddr, payload: &[u8], accept: F) -> io::Result<Vec<u8>>
where
    F: Fn(&[u8]) -> bool,
{
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
    socket.connect(target).await?;
    socket.send(payload).await?;

    let mut buffer = vec![0u8; MAX_DATAGRAM];
    loop {
        let len = socket.recv(&mut buffer).await?;
        if accept(&buffer[..len]) {
            buffer.truncate(len);
            return Ok(buffer);
        }
    }
}

/// Accepts replies whose first two bytes carry transaction `id`.
pub fn matches_id(id: u16) -> impl Fn(&[u8]) -> bool {
    move |reply| reply.len() >= 2 && u16::from_be_bytes([reply[0], reply[1]]) == id
}
