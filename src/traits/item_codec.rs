//! # Item Codec Interface
//!
//! Serialise a single application item into **on-the-wire bytes** via any
//! `WireSink`.
//!
//! **Why this is useful**
//! - Keeps the document byte format (BSON, protobuf, custom binary) entirely
//!   outside the batching core; the encoder only measures sink positions.
//! - Carries the scoped per-batch settings (item size ceiling, element-name
//!   validation) that the size-bounded encoder pushes and pops around each
//!   encode pass.
//!
//! Implement `ItemCodec` for your document format; the batching layer calls
//! `encode_one()` once per accepted item, in input order, at most once per
//! item over the lifetime of a window.

use std::ops::{Deref, DerefMut};

use crate::enums::NameValidation;
use crate::error::BatchError;
use crate::traits::wire_sink::WireSink;

/// Per-batch settings the encoder brackets around an encode pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecOverrides {
    /// Refuse to write more than this many bytes for a single item
    /// (`ItemTooLarge`). `None` means no per-item ceiling.
    pub item_size_limit: Option<u64>,

    /// Element-name validation policy for the batch.
    pub validation: NameValidation,
}

/// Scoped-settings surface of a codec, separate from the item type so that
/// guards need not be generic over it.
pub trait CodecConfig {
    /// Current settings.
    fn overrides(&self) -> CodecOverrides;

    /// Replace the current settings.
    fn set_overrides(&mut self, overrides: CodecOverrides);
}

/// Implement this trait for any document format whose items are packed into
/// size-bounded batches.
///
/// ### Safety Contract
/// - The codec must not mutate the item being encoded.
/// - The codec must not retain references to input data after the call.
/// - All writes must go through the provided sink, so that the sink's
///   position reflects every byte the item produced.
/// - When `overrides().item_size_limit` is set, the codec must fail with
///   `BatchError::ItemTooLarge` rather than write an item exceeding it.
pub trait ItemCodec<T>: CodecConfig {
    /// Encode one item, appending its wire bytes to `sink`.
    fn encode_one<S: WireSink>(&mut self, item: &T, sink: &mut S) -> Result<(), BatchError>;
}

/// RAII guard that applies `CodecOverrides` for a scope and restores the
/// prior settings on drop, on every exit path including error returns.
///
/// The encoder brackets its whole pass with one of these rather than a
/// push/pop pair it would have to balance by hand.
pub struct OverrideGuard<'a, C: CodecConfig> {
    codec: &'a mut C,
    prior: CodecOverrides,
}

impl<'a, C: CodecConfig> OverrideGuard<'a, C> {
    /// Apply `overrides` to `codec`, remembering the prior settings.
    pub fn push(codec: &'a mut C, overrides: CodecOverrides) -> Self {
        let prior = codec.overrides();
        codec.set_overrides(overrides);
        Self { codec, prior }
    }
}

impl<C: CodecConfig> Deref for OverrideGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.codec
    }
}

impl<C: CodecConfig> DerefMut for OverrideGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.codec
    }
}

impl<C: CodecConfig> Drop for OverrideGuard<'_, C> {
    fn drop(&mut self) {
        self.codec.set_overrides(self.prior);
    }
}
