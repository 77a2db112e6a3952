//! Queue-backed connection pair for tests and the local demo.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::task::yield_now;

use crate::connection::{MessageSink, MessageSource};

pub struct InMemorySink<T> {
    queue: Arc<Mutex<VecDeque<T>>>,
}

pub struct InMemorySource<T> {
    queue: Arc<Mutex<VecDeque<T>>>,
}

/// A duplex in-memory connection sending `Out` and receiving `In`.
pub struct InMemoryConnection<Out, In> {
    sink: InMemorySink<Out>,
    source: InMemorySource<In>,
}

impl<Out, In> InMemoryConnection<Out, In> {
    pub fn split(self) -> (InMemorySink<Out>, InMemorySource<In>) {
        (self.sink, self.source)
    }
}

/// Two connected endpoints: whatever one side sends, the other receives.
pub fn pair<A, B>() -> (InMemoryConnection<A, B>, InMemoryConnection<B, A>) {
    let a_to_b = Arc::new(Mutex::new(VecDeque::new()));
    let b_to_a = Arc::new(Mutex::new(VecDeque::new()));
    (
        InMemoryConnection {
            sink: InMemorySink {
                queue: Arc::clone(&a_to_b),
            },
            source: InMemorySource { queue: b_to_a.clone() },
        },
        InMemoryConnection {
            sink: InMemorySink { queue: b_to_a },
            source: InMemorySource { queue: a_to_b },
        },
    )
}

#[async_trait::async_trait]
impl<T: Send + 'static> MessageSink<T> for InMemorySink<T> {
    async fn send(&mut self, msg: T) -> anyhow::Result<()> {
        self.queue.lock().unwrap().push_back(msg);
        Ok(())
    }
}

#[async_trait::async_trait]
impl<T: Send + 'static> MessageSource<T> for InMemorySource<T> {
    async fn recv(&mut self) -> anyhow::Result<T> {
        loop {
            if let Some(msg) = self.queue.lock().unwrap().pop_front() {
                return Ok(msg);
            }
            // The sending half holds the only other reference; once it is
            // dropped no message can ever arrive.
            if Arc::strong_count(&self.queue) == 1 {
                return Err(anyhow::anyhow!("channel closed"));
            }
            yield_now().await;
        }
    }
}
