/// The outcome of a single size-bounded encode pass over a window.
///
/// Communicates whether the whole window fit under the aggregate limit or
/// where the sequence was cut. A decision belongs to exactly one encode
/// attempt; after the caller has acted on it (send then advance), window
/// state must be re-derived rather than the decision retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDecision {
    /// Every pending item was accepted into the current message.
    NotSplit,

    /// The sequence was cut: `index` items were accepted, the rest stay
    /// pending for the next message. `SplitAt(0)` means not even the first
    /// item fit under the aggregate ceiling.
    SplitAt(usize),
}

/// Wire-level container flavour for a serialised batch.
///
/// The numeric payload-type tag and framing are assigned by the transport
/// layer; this core only distinguishes the two shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadKind {
    /// A single document, no identifier.
    Single,

    /// An identified multi-document payload (e.g. `"documents"`).
    Identified(String),
}

/// State machine for the outer encode-send-advance loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveState {
    /// Items remain pending; another encode pass may be attempted.
    Pending,

    /// All items have been emitted.
    Done,

    /// A fatal decision was reached for this logical batch; no further
    /// messages will be produced.
    Failed,
}

/// Element-name validation policy pushed onto the codec for the duration of
/// one batch encode.
///
/// Opaque to this core: the codec interprets it, the encoder only brackets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameValidation {
    /// Keep whatever policy the codec currently has.
    #[default]
    Inherit,

    /// Skip element-name checks for the batch.
    Relaxed,

    /// Enforce full element-name checks for the batch.
    Strict,
}
