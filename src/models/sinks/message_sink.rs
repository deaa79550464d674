//! # Async Message Sink
//!
//! Bridges encoded message buffers onto an async transport: queue whole
//! messages, flush them to an `AsyncWrite` with partial-write continuation.
//! Pairs with `BatchMessageWriter`, which produces the buffers.

use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_sink::Sink;
use tokio::io::AsyncWrite;

use crate::traits::wire_sink::WireSink;

/// Async sink for encoded wire messages: wraps an `AsyncWrite` and writes
/// queued message buffers out in order.
pub struct MessageSink<W, B>
where
    W: AsyncWrite + Unpin + Send + 'static,
    B: WireSink + Unpin + 'static,
{
    sink: W,
    queue: VecDeque<B>,
    in_flight: Option<B>,
    in_flight_pos: usize,
}

impl<W, B> MessageSink<W, B>
where
    W: AsyncWrite + Unpin + Send + 'static,
    B: WireSink + Unpin + 'static,
{
    /// Construct a new message sink over any async byte sink.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            queue: VecDeque::new(),
            in_flight: None,
            in_flight_pos: 0,
        }
    }

    /// Queue a message buffer for output.
    pub fn queue_message(&mut self, message: B) {
        self.queue.push_back(message);
    }

    /// Number of messages not yet fully written.
    pub fn pending_messages(&self) -> usize {
        self.queue.len() + usize::from(self.in_flight.is_some())
    }
}

impl<W, B> Sink<B> for MessageSink<W, B>
where
    W: AsyncWrite + Unpin + Send + 'static,
    B: WireSink + Unpin + 'static,
{
    type Error = io::Error;

    fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn start_send(mut self: Pin<&mut Self>, message: B) -> Result<(), Self::Error> {
        self.queue.push_back(message);
        Ok(())
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        loop {
            if self.in_flight.is_none() {
                match self.queue.pop_front() {
                    Some(message) => {
                        self.in_flight_pos = 0;
                        self.in_flight = Some(message);
                    }
                    None => break,
                }
            }

            if let Some(buf) = self.in_flight.take() {
                let chunk = &buf.as_ref()[self.in_flight_pos..];
                if chunk.is_empty() {
                    // Zero-length message; nothing to write
                    continue;
                }
                match Pin::new(&mut self.sink).poll_write(cx, chunk) {
                    Poll::Pending => {
                        self.in_flight = Some(buf);
                        return Poll::Pending;
                    }
                    Poll::Ready(Ok(0)) => {
                        return Poll::Ready(Err(io::ErrorKind::WriteZero.into()));
                    }
                    Poll::Ready(Ok(n)) => {
                        self.in_flight_pos += n;
                        if self.in_flight_pos < buf.as_ref().len() {
                            self.in_flight = Some(buf);
                        } else {
                            self.in_flight_pos = 0;
                        }
                    }
                    Poll::Ready(Err(e)) => return Poll::Ready(Err(e)),
                }
            }
        }
        Pin::new(&mut self.sink).poll_flush(cx)
    }

    fn poll_close(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        match self.as_mut().poll_flush(cx)? {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(()) => {}
        }
        Pin::new(&mut self.sink).poll_shutdown(cx)
    }
}
