//! # Payload Section
//!
//! Wire-level container an encoded batch is written into: either a single
//! document or an identified multi-document payload. The numeric
//! payload-type tag and message framing belong to the transport layer; this
//! core only owns the sink and the position counter the encoder measures
//! against.

use crate::enums::PayloadKind;
use crate::traits::wire_sink::WireSink;

/// One payload section of an outgoing wire message.
#[derive(Debug)]
pub struct PayloadSection<S: WireSink> {
    kind: PayloadKind,
    sink: S,
    opened_at: u64,
}

impl<S: WireSink> PayloadSection<S> {
    /// Single-document payload with a fresh sink.
    pub fn single() -> Self {
        Self::with_sink(PayloadKind::Single, S::default())
    }

    /// Identified multi-document payload with a fresh sink.
    pub fn identified(identifier: impl Into<String>) -> Self {
        Self::with_sink(PayloadKind::Identified(identifier.into()), S::default())
    }

    /// Wrap an existing sink, e.g. a message buffer that already carries
    /// header bytes. The section's length is counted from the sink's
    /// position at this point.
    pub fn with_sink(kind: PayloadKind, sink: S) -> Self {
        let opened_at = sink.position();
        Self {
            kind,
            sink,
            opened_at,
        }
    }

    pub fn kind(&self) -> &PayloadKind {
        &self.kind
    }

    /// Current sink position. The encoder samples this before and after each
    /// item; it never inspects payload contents.
    pub fn position(&self) -> u64 {
        self.sink.position()
    }

    /// Bytes written into this section so far.
    pub fn len_since_open(&self) -> u64 {
        self.sink.position() - self.opened_at
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn bytes(&self) -> &[u8] {
        self.sink.as_ref()
    }

    /// Hand the buffer to the transport for framing and transmission.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
