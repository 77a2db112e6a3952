//! Message-passing connections between clients and the server.
//!
//! A connection is a pair of halves: a sink for outbound messages and a
//! source for inbound ones, so reading and writing can run in separate
//! tasks. TCP carries length-prefixed bincode frames; the in-memory pair
//! backs tests and the local demo.

pub mod in_memory;
pub mod tcp;

/// Upper bound on one serialized frame, to bound allocation on receive.
pub const MAX_FRAME_SIZE: u32 = 1_000_000;

#[async_trait::async_trait]
pub trait MessageSink<T: Send + 'static>: Send {
    async fn send(&mut self, msg: T) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
pub trait MessageSource<T: Send + 'static>: Send {
    async fn recv(&mut self) -> anyhow::Result<T>;
}
