//! HTTP server configuration object.

use std::net::SocketAddr;

use crate::inbound::http::state::HttpStatePorts;

/// Everything the HTTP server needs besides its health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) ports: HttpStatePorts,
}

impl ServerConfig {
    /// Serve `ports` on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, ports: HttpStatePorts) -> Self {
        Self { bind_addr, ports }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
