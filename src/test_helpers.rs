//! # Test Helpers - *Fixture Items and Codecs*
//!
//! Deterministic byte-blob items with exact encoded sizes, plus a raw codec
//! that honours the scoped per-item size limit. Encoded size equals the blob
//! length, which keeps size-limit arithmetic in tests readable.

use crate::error::BatchError;
use crate::traits::item_codec::{CodecConfig, CodecOverrides, ItemCodec};
use crate::traits::wire_sink::WireSink;

/// Build one blob per entry of `sizes`, filled with distinct letters
/// (`a`, `b`, `c`, ...) so sub-batch boundaries are visible in the bytes.
pub(crate) fn blobs(sizes: &[usize]) -> Vec<Vec<u8>> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &n)| vec![b'a' + (i % 26) as u8; n])
        .collect()
}

/// Codec that writes a blob's bytes verbatim. Encoded size == item length.
pub(crate) struct RawCodec {
    overrides: CodecOverrides,
}

impl RawCodec {
    pub(crate) fn new() -> Self {
        Self {
            overrides: CodecOverrides::default(),
        }
    }
}

impl CodecConfig for RawCodec {
    fn overrides(&self) -> CodecOverrides {
        self.overrides
    }

    fn set_overrides(&mut self, overrides: CodecOverrides) {
        self.overrides = overrides;
    }
}

impl ItemCodec<Vec<u8>> for RawCodec {
    fn encode_one<S: WireSink>(&mut self, item: &Vec<u8>, sink: &mut S) -> Result<(), BatchError> {
        if let Some(limit) = self.overrides.item_size_limit {
            if item.len() as u64 > limit {
                return Err(BatchError::ItemTooLarge(format!(
                    "item of {} bytes exceeds limit of {} bytes",
                    item.len(),
                    limit
                )));
            }
        }
        sink.extend_from_slice(item);
        Ok(())
    }
}
