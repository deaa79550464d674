//! # Batch Message Writer
//!
//! Outer drive loop over the size-bounded encoder: pull one encoded wire
//! message at a time until the window is exhausted or a fatal decision is
//! reached.
//!
//! Example usage:
//!   let mut writer = BatchMessageWriter::new(&items, codec, limits, kind);
//!   while let Some(message) = writer.next_message() { ... send ... }
//!
//! For callers that own an async byte stream, `send_batches_to_stream`
//! composes the same loop with a `tokio` writer and only advances the window
//! after each message has been written out, so a cancelled send leaves the
//! window retry-safe at the same offset.

use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::constants::DEFAULT_MESSAGE_ALLOCATION_SIZE;
use crate::debug_println;
use crate::enums::{DriveState, PayloadKind, SplitDecision};
use crate::error::BatchError;
use crate::models::encoders::batch::{BatchLimits, SizeBoundedEncoder};
use crate::models::payload::PayloadSection;
use crate::models::windows::adjustable::AdjustableWindow;
use crate::traits::item_codec::ItemCodec;
use crate::traits::wire_sink::WireSink;

/// Pull-based producer of size-bounded wire messages for one logical batch.
///
/// Exactly one encode-then-advance cycle runs per pulled message; the window
/// is advanced when a message is yielded, so the caller owns re-sending a
/// yielded buffer if its transport write later fails.
pub struct BatchMessageWriter<'a, T, C, B>
where
    C: ItemCodec<T>,
    B: WireSink,
{
    window: AdjustableWindow<'a, T>,
    codec: C,
    encoder: SizeBoundedEncoder,
    kind: PayloadKind,
    state: DriveState,
    _buf: PhantomData<fn() -> B>,
}

impl<'a, T, C, B> BatchMessageWriter<'a, T, C, B>
where
    C: ItemCodec<T>,
    B: WireSink,
{
    /// Create a writer over the full item sequence.
    pub fn new(items: &'a [T], codec: C, limits: BatchLimits, kind: PayloadKind) -> Self {
        Self {
            window: AdjustableWindow::new_resizable(items),
            codec,
            encoder: SizeBoundedEncoder::new(limits),
            kind,
            state: DriveState::Pending,
            _buf: PhantomData,
        }
    }

    pub fn state(&self) -> DriveState {
        self.state
    }

    /// Number of items still pending.
    pub fn remaining(&self) -> usize {
        self.window.count()
    }

    /// Encode the next sub-batch into a fresh payload section.
    ///
    /// Returns `None` once the loop is terminal (`Done` or `Failed`). A
    /// fatal decision (`SplitAt(0)`, `ItemTooLarge`, `BatchTooLarge`) is
    /// yielded once as an error, after which the writer stays `Failed`; no
    /// partial message is ever yielded for the rejected item.
    pub fn next_message(&mut self) -> Option<Result<PayloadSection<B>, BatchError>> {
        if self.state != DriveState::Pending {
            return None;
        }
        if !self.window.has_more() {
            self.state = DriveState::Done;
            return None;
        }

        let mut section = PayloadSection::with_sink(
            self.kind.clone(),
            B::with_capacity(DEFAULT_MESSAGE_ALLOCATION_SIZE),
        );
        let decision = self
            .encoder
            .encode(&mut self.window, &mut self.codec, section.sink_mut());

        match decision {
            Err(e) => {
                self.state = DriveState::Failed;
                Some(Err(e))
            }
            // Zero confirmed items cannot make forward progress: sending an
            // empty message is treated as the aggregate ceiling being fatal.
            Ok(SplitDecision::SplitAt(0)) => {
                self.state = DriveState::Failed;
                Some(Err(BatchError::BatchTooLarge(format!(
                    "first pending item alone exceeds the aggregate limit of {} bytes",
                    self.encoder.limits().max_batch_size()
                ))))
            }
            Ok(SplitDecision::SplitAt(k)) => {
                debug_println!("split batch: {} items accepted, {} pending", k, self.window.count() - k);
                if let Err(e) = self.window.advance_confirmed() {
                    self.state = DriveState::Failed;
                    return Some(Err(e));
                }
                Some(Ok(section))
            }
            Ok(SplitDecision::NotSplit) => {
                if let Err(e) = self.window.advance_confirmed() {
                    self.state = DriveState::Failed;
                    return Some(Err(e));
                }
                self.state = DriveState::Done;
                Some(Ok(section))
            }
        }
    }
}

impl<'a, T, C, B> Stream for BatchMessageWriter<'a, T, C, B>
where
    C: ItemCodec<T> + Unpin,
    B: WireSink + Unpin,
{
    type Item = Result<PayloadSection<B>, BatchError>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // The encode loop is synchronous over an in-memory sink; a pull is
        // always ready.
        Poll::Ready(self.get_mut().next_message())
    }
}

/// Encode a window and write every produced message to an arbitrary async
/// byte stream (socket, pipe, etc.), one sub-batch per message.
///
/// * `stream`  - the destination async byte sink
/// * `window`  - the pending items; must be resizable
/// * `codec`   - the document codec
/// * `limits`  - per-item and aggregate size ceilings
///
/// The window is advanced only after the corresponding message has been
/// written to `stream`; cancellation between encode and write leaves it
/// unchanged and safe to retry from the same offset.
pub async fn send_window_to_stream<W, T, C, B>(
    mut stream: W,
    window: &mut AdjustableWindow<'_, T>,
    codec: &mut C,
    limits: BatchLimits,
) -> Result<(), BatchError>
where
    W: AsyncWrite + Unpin + Send,
    C: ItemCodec<T>,
    B: WireSink,
{
    let encoder = SizeBoundedEncoder::new(limits);

    while window.has_more() {
        let mut sink = B::with_capacity(DEFAULT_MESSAGE_ALLOCATION_SIZE);
        match encoder.encode(window, codec, &mut sink)? {
            SplitDecision::SplitAt(0) => {
                return Err(BatchError::BatchTooLarge(format!(
                    "first pending item alone exceeds the aggregate limit of {} bytes",
                    encoder.limits().max_batch_size()
                )));
            }
            _ => {
                stream.write_all(sink.as_ref()).await?;
                window.advance_confirmed()?;
            }
        }
    }
    stream.flush().await?;
    Ok(())
}

/// Convenience over `send_window_to_stream`: batch a full item sequence.
pub async fn send_batches_to_stream<W, T, C, B>(
    stream: W,
    items: &[T],
    mut codec: C,
    limits: BatchLimits,
) -> Result<(), BatchError>
where
    W: AsyncWrite + Unpin + Send,
    C: ItemCodec<T>,
    B: WireSink,
{
    let mut window = AdjustableWindow::new_resizable(items);
    send_window_to_stream::<W, T, C, B>(stream, &mut window, &mut codec, limits).await
}
