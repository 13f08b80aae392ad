//! Virtual host server.
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::runtime::Handle;

use crate::body::DEFAULT_CHANNEL_CAPACITY;
use crate::config::{ParsingConfig, VHostConfig};
use crate::h1::Connection;
use crate::log::{debug, error, info};
use crate::service::Handler;

/// Accept loop of a single virtual host.
///
/// Every accepted connection is served on its own task, spawned on the server executor.
#[derive(Debug)]
pub struct Server<H> {
    listener: TcpListener,
    handler: Arc<H>,
    config: ParsingConfig,
    entity_buffer: usize,
}

impl<H: Handler> Server<H> {
    pub fn new(listener: TcpListener, handler: Arc<H>, config: ParsingConfig) -> Self {
        Self {
            listener,
            handler,
            config,
            entity_buffer: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Bind the address of `vhost`.
    pub async fn bind(vhost: &VHostConfig, handler: Arc<H>, config: ParsingConfig) -> io::Result<Self> {
        let listener = TcpListener::bind(vhost.address()).await?;
        Ok(Self::new(listener, handler, config).with_entity_buffer(vhost.entity_buffer()))
    }

    /// Set the capacity, in chunks, of streaming request entities.
    pub fn with_entity_buffer(mut self, entity_buffer: usize) -> Self {
        self.entity_buffer = entity_buffer;
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections forever, serving them on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub async fn serve(self) {
        self.serve_on(Handle::current()).await
    }

    /// Accept connections forever, serving them on `executor`.
    pub async fn serve_on(self, executor: Handle) {
        let Self { listener, handler, config, entity_buffer } = self;

        if let Ok(addr) = listener.local_addr() {
            info!("listening on {addr}");
        }

        loop {
            let (io, addr) = match listener.accept().await {
                Ok(ok) => ok,
                Err(err) => {
                    error!("failed to accept connection: {err}");
                    continue;
                }
            };

            debug!("accepted connection from {addr}");

            let connection = Connection::new(io, Arc::clone(&handler), config)
                .with_entity_buffer(entity_buffer);

            executor.spawn(async move {
                if let Err(err) = connection.serve().await {
                    debug!("connection {addr} closed: {err}");
                }
            });
        }
    }
}
