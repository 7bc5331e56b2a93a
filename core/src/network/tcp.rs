use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;

use lanward_common::ports::PortProber;

/// Plain TCP connect check. Refused, unreachable and timed out all count as closed.
pub struct TcpConnectProber;

#[async_trait]
impl PortProber for TcpConnectProber {
    async fn is_open(&self, ip: Ipv4Addr, port: u16, probe_timeout: Duration) -> bool {
        let socket_addr = SocketAddr::from((ip, port));
        matches!(timeout(probe_timeout, TcpStream::connect(socket_addr)).await, Ok(Ok(_)))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
