//! # Size-Bounded Batch Encoder
//!
//! Incremental encode-and-measure loop that packs a window of items into one
//! wire message under two independent ceilings: a per-item size limit and an
//! aggregate payload limit.
//!
//! Items are encoded one at a time against the sink; when the next item would
//! overflow the aggregate limit, its bytes are rolled back via sink
//! truncation and the window is partitioned into an accepted prefix and a
//! pending suffix. The rollback is not error recovery - it is the mechanism
//! that makes splitting possible at all.

use crate::constants::{DEFAULT_MAX_BATCH_SIZE, DEFAULT_MAX_ITEM_SIZE};
use crate::enums::{NameValidation, SplitDecision};
use crate::error::BatchError;
use crate::models::windows::adjustable::AdjustableWindow;
use crate::models::windows::splittable::SplittableBatch;
use crate::traits::item_codec::{CodecOverrides, ItemCodec, OverrideGuard};
use crate::traits::wire_sink::WireSink;

/// Validated pair of size ceilings for one message.
///
/// `max_item_size <= max_batch_size` is checked once here, at construction,
/// so that at least one item under the per-item ceiling can always start a
/// non-empty batch. Violating the ordering per encode call would otherwise
/// have to be re-checked on every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchLimits {
    max_item_size: u64,
    max_batch_size: u64,
}

impl BatchLimits {
    /// Validate and build a limit pair.
    ///
    /// Returns `Config` when `max_item_size > max_batch_size`.
    pub fn new(max_item_size: u64, max_batch_size: u64) -> Result<Self, BatchError> {
        if max_item_size > max_batch_size {
            return Err(BatchError::Config(format!(
                "max_item_size ({}) must not exceed max_batch_size ({})",
                max_item_size, max_batch_size
            )));
        }
        Ok(Self {
            max_item_size,
            max_batch_size,
        })
    }

    pub fn max_item_size(&self) -> u64 {
        self.max_item_size
    }

    pub fn max_batch_size(&self) -> u64 {
        self.max_batch_size
    }
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            max_item_size: DEFAULT_MAX_ITEM_SIZE,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

/// Drives the encode-and-measure loop for one window per call.
///
/// The encoder is a pure, synchronous function over an in-memory sink: no
/// suspension points, no I/O. It may be reused across windows and messages.
pub struct SizeBoundedEncoder {
    limits: BatchLimits,
    validation: NameValidation,
}

impl SizeBoundedEncoder {
    pub fn new(limits: BatchLimits) -> Self {
        Self {
            limits,
            validation: NameValidation::Inherit,
        }
    }

    /// Encoder that also pushes an element-name validation policy onto the
    /// codec for the duration of each pass.
    pub fn with_validation(limits: BatchLimits, validation: NameValidation) -> Self {
        Self { limits, validation }
    }

    pub fn limits(&self) -> &BatchLimits {
        &self.limits
    }

    /// Encode as many pending items as fit under the aggregate limit.
    ///
    /// Walks the full pending slice (membership is recomputed from scratch
    /// each call), measuring the sink position around every item. On
    /// overflow of a resizable window the overflowing item's bytes are
    /// truncated away, the window's adjusted count records the accepted
    /// prefix, and `SplitAt(i)` is returned - including `SplitAt(0)` when
    /// not even the first item fits. A fixed window fails with
    /// `BatchTooLarge` instead, with the sink rewound to where it started.
    ///
    /// On success the sink contains exactly the bytes of the accepted
    /// prefix, appended after whatever it already held.
    ///
    /// Codec errors (`ItemTooLarge` among them) propagate with the rejected
    /// item's partial bytes rolled back; the scoped codec overrides are
    /// restored on every exit path.
    pub fn encode<T, C, S>(
        &self,
        window: &mut AdjustableWindow<'_, T>,
        codec: &mut C,
        sink: &mut S,
    ) -> Result<SplitDecision, BatchError>
    where
        C: ItemCodec<T>,
        S: WireSink,
    {
        let pending = window.pending();
        let start = sink.position();
        let mut codec = OverrideGuard::push(
            codec,
            CodecOverrides {
                item_size_limit: Some(self.limits.max_item_size),
                validation: self.validation,
            },
        );

        for (i, item) in pending.iter().enumerate() {
            let item_start = sink.position();
            if let Err(e) = codec.encode_one(item, sink) {
                sink.truncate_to(item_start);
                return Err(e);
            }
            let batch_size = sink.position() - start;
            if batch_size > self.limits.max_batch_size {
                if window.is_resizable() {
                    sink.truncate_to(item_start);
                    window.set_adjusted_count(i)?;
                    return Ok(SplitDecision::SplitAt(i));
                }
                sink.truncate_to(start);
                return Err(BatchError::BatchTooLarge(format!(
                    "batch of {} bytes exceeds limit of {} bytes and the window is fixed",
                    batch_size, self.limits.max_batch_size
                )));
            }
        }

        // A fixed window's adjusted count is already pinned at count.
        if window.is_resizable() {
            window.set_adjusted_count(pending.len())?;
        }
        Ok(SplitDecision::NotSplit)
    }

    /// Two-phase variant: encode a `SplittableBatch` and, when a cut is
    /// needed, record it on the batch so `first_half`/`second_half` describe
    /// the partition.
    ///
    /// Produces partitions identical to the window form for the same input
    /// and limits; internally it drives the same loop over a window derived
    /// from the batch's indices.
    pub fn encode_two_phase<T, C, S>(
        &self,
        batch: &mut SplittableBatch<'_, T>,
        codec: &mut C,
        sink: &mut S,
    ) -> Result<SplitDecision, BatchError>
    where
        C: ItemCodec<T>,
        S: WireSink,
    {
        let mut window =
            AdjustableWindow::new_from_list(batch.items(), 0, batch.len(), batch.can_be_split())?;
        let decision = self.encode(&mut window, codec, sink)?;
        if let SplitDecision::SplitAt(index) = decision {
            batch.split(index)?;
        }
        Ok(decision)
    }
}

impl Default for SizeBoundedEncoder {
    fn default() -> Self {
        Self::new(BatchLimits::default())
    }
}
