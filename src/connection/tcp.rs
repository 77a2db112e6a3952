//! TCP connection carrying bincode frames with a u32 big-endian length
//! prefix.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::connection::{MessageSink, MessageSource, MAX_FRAME_SIZE};

/// A framed duplex stream sending `Out` and receiving `In`.
pub struct TcpConnection<Out, In> {
    stream: TcpStream,
    max_frame: u32,
    _marker: PhantomData<fn(Out) -> In>,
}

impl<Out, In> TcpConnection<Out, In> {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            max_frame: MAX_FRAME_SIZE,
            _marker: PhantomData,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    /// Split into independently owned send and receive halves.
    pub fn split(self) -> (TcpSink<Out>, TcpSource<In>) {
        let (reader, writer) = self.stream.into_split();
        (
            TcpSink {
                writer,
                max_frame: self.max_frame,
                _marker: PhantomData,
            },
            TcpSource {
                reader,
                max_frame: self.max_frame,
                _marker: PhantomData,
            },
        )
    }
}

pub struct TcpSink<Out> {
    writer: OwnedWriteHalf,
    max_frame: u32,
    _marker: PhantomData<fn(Out)>,
}

pub struct TcpSource<In> {
    reader: OwnedReadHalf,
    max_frame: u32,
    _marker: PhantomData<fn() -> In>,
}

fn map_write_err(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        std::io::ErrorKind::BrokenPipe | std::io::ErrorKind::ConnectionReset => {
            anyhow::anyhow!("connection closed by peer")
        }
        _ => anyhow::anyhow!("write error: {}", e),
    }
}

fn map_read_err(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        std::io::ErrorKind::UnexpectedEof => anyhow::anyhow!("connection closed by peer"),
        std::io::ErrorKind::ConnectionReset => anyhow::anyhow!("connection reset by peer"),
        _ => anyhow::anyhow!("read error: {}", e),
    }
}

#[async_trait::async_trait]
impl<Out> MessageSink<Out> for TcpSink<Out>
where
    Out: Serialize + Send + 'static,
{
    async fn send(&mut self, msg: Out) -> anyhow::Result<()> {
        let data =
            bincode::serialize(&msg).map_err(|e| anyhow::anyhow!("serialization error: {}", e))?;
        if data.len() as u64 > self.max_frame as u64 {
            return Err(anyhow::anyhow!(
                "frame too large: {} bytes (max: {})",
                data.len(),
                self.max_frame
            ));
        }
        let len = (data.len() as u32).to_be_bytes();
        self.writer.write_all(&len).await.map_err(map_write_err)?;
        self.writer.write_all(&data).await.map_err(map_write_err)?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl<In> MessageSource<In> for TcpSource<In>
where
    In: DeserializeOwned + Send + 'static,
{
    async fn recv(&mut self) -> anyhow::Result<In> {
        let mut len_buf = [0u8; 4];
        self.reader
            .read_exact(&mut len_buf)
            .await
            .map_err(map_read_err)?;
        let len = u32::from_be_bytes(len_buf);
        if len > self.max_frame {
            return Err(anyhow::anyhow!(
                "frame too large: {} bytes (max: {})",
                len,
                self.max_frame
            ));
        }
        if len == 0 {
            return Err(anyhow::anyhow!("invalid frame length: 0"));
        }
        let mut buf = vec![0u8; len as usize];
        self.reader
            .read_exact(&mut buf)
            .await
            .map_err(map_read_err)?;
        bincode::deserialize(&buf).map_err(|e| anyhow::anyhow!("deserialization error: {}", e))
    }
}
