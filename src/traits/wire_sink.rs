/// Abstraction over the outgoing wire-message byte buffer.
///
/// This trait defines the interface the size-bounded encoder measures and
/// rolls back against. It is implemented for standard `Vec<u8>`, but can also
/// be implemented for alternative buffer types (e.g. a transport's own frame
/// buffer), supporting scenarios where the byte-level stack is fixed or
/// externally controlled.
///
/// The encoder relies on exactly two capabilities beyond appending:
/// - `position()` — a monotonically increasing write cursor, sampled before
///   and after each item to measure its encoded size
/// - `truncate_to(pos)` — rewind to a previously sampled position, undoing
///   the bytes of an item that overflowed the aggregate limit
///
/// `position()` need not start at zero; the encoder only ever subtracts two
/// samples taken from the same sink.
pub trait WireSink: AsRef<[u8]> + Default + 'static {
    /// Create with given capacity.
    fn with_capacity(n: usize) -> Self;

    /// Reserve additional capacity in the buffer.
    fn reserve(&mut self, additional: usize);

    /// Current write position (in bytes).
    fn position(&self) -> u64;

    /// Rewind the write position, discarding bytes written after `pos`.
    ///
    /// `pos` must have been obtained from a prior `position()` call on this
    /// sink; passing a position beyond the current one is a programmer error.
    fn truncate_to(&mut self, pos: u64);

    /// Append bytes from a slice.
    fn extend_from_slice(&mut self, data: &[u8]);

    /// Push a single byte to the end of the buffer.
    fn push(&mut self, byte: u8);

    /// Current length (in bytes).
    fn len(&self) -> usize;

    /// Whether the buffer is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create a buffer from a slice (copies the bytes).
    fn from_slice(data: &[u8]) -> Self;
}

impl WireSink for Vec<u8> {
    fn with_capacity(n: usize) -> Self {
        Vec::with_capacity(n)
    }

    fn reserve(&mut self, additional: usize) {
        Vec::<u8>::reserve(self, additional);
    }

    fn position(&self) -> u64 {
        self.len() as u64
    }

    fn truncate_to(&mut self, pos: u64) {
        debug_assert!(pos <= self.len() as u64);
        self.truncate(pos as usize);
    }

    fn extend_from_slice(&mut self, data: &[u8]) {
        Vec::<u8>::extend_from_slice(self, data)
    }

    fn push(&mut self, byte: u8) {
        Vec::<u8>::push(self, byte)
    }

    fn len(&self) -> usize {
        Vec::<u8>::len(self)
    }

    fn from_slice(data: &[u8]) -> Self {
        data.to_vec()
    }
}
