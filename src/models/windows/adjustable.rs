//! # Adjustable Window
//!
//! Resumable view over an ordered item sequence, sized for one wire message
//! at a time.
//!
//! The items themselves are immutable and borrowed for the whole
//! send-and-possibly-retry cycle; only the window indices move. The encoder
//! records how many pending items fit the current message via
//! `set_adjusted_count`, and the driver moves past them with
//! `advance_confirmed` once that message has been durably sent. Each item is
//! therefore consumed at most once across repeated send attempts, in input
//! order, and repeated splitting of a large sequence allocates nothing.

use crate::error::BatchError;

/// Mutable window over an immutable item sequence.
///
/// Invariants, maintained by every operation:
/// - `offset + count <= items.len()`
/// - `adjusted_count <= count`
/// - when `resizable == false`, `adjusted_count` is pinned at `count` from
///   construction and the mutating operations fail with `NotResizable`
pub struct AdjustableWindow<'a, T> {
    items: &'a [T],
    offset: usize,
    count: usize,
    adjusted_count: usize,
    resizable: bool,
}

impl<'a, T> AdjustableWindow<'a, T> {
    /// Create a window over `items[offset .. offset + count]`.
    ///
    /// Returns `Range` if `offset` or `count` fall outside the sequence.
    /// `adjusted_count` starts at `count`.
    pub fn new_from_list(
        items: &'a [T],
        offset: usize,
        count: usize,
        resizable: bool,
    ) -> Result<Self, BatchError> {
        if offset > items.len() {
            return Err(BatchError::Range(format!(
                "offset {} exceeds sequence length {}",
                offset,
                items.len()
            )));
        }
        if count > items.len() - offset {
            return Err(BatchError::Range(format!(
                "count {} exceeds remaining length {} at offset {}",
                count,
                items.len() - offset,
                offset
            )));
        }
        Ok(Self {
            items,
            offset,
            count,
            adjusted_count: count,
            resizable,
        })
    }

    /// Fixed window over the full sequence, for callers that already know the
    /// batch is small enough never to require splitting.
    pub fn new_single_batch(items: &'a [T]) -> Self {
        Self {
            items,
            offset: 0,
            count: items.len(),
            adjusted_count: items.len(),
            resizable: false,
        }
    }

    /// Resizable window over the full sequence.
    pub fn new_resizable(items: &'a [T]) -> Self {
        Self {
            items,
            offset: 0,
            count: items.len(),
            adjusted_count: items.len(),
            resizable: true,
        }
    }

    /// The confirmed slice: `items[offset .. offset + adjusted_count]`.
    ///
    /// This is what a message carries. The returned slice borrows from the
    /// underlying sequence, not from the window.
    pub fn window(&self) -> &'a [T] {
        &self.items[self.offset..self.offset + self.adjusted_count]
    }

    /// The pending slice: `items[offset .. offset + count]`.
    ///
    /// The encoder walks this in full on every pass, since membership is
    /// recomputed from scratch per attempt.
    pub fn pending(&self) -> &'a [T] {
        &self.items[self.offset..self.offset + self.count]
    }

    /// Record how many pending items fit the current message.
    ///
    /// Called by the encoder, once per encode attempt. Returns
    /// `NotResizable` on a fixed window and `Range` if `value > count`.
    pub fn set_adjusted_count(&mut self, value: usize) -> Result<(), BatchError> {
        if !self.resizable {
            return Err(BatchError::NotResizable);
        }
        if value > self.count {
            return Err(BatchError::Range(format!(
                "adjusted count {} exceeds window count {}",
                value, self.count
            )));
        }
        self.adjusted_count = value;
        Ok(())
    }

    /// Move past the confirmed slice after its message has been durably sent.
    ///
    /// Shifts `offset` forward by `adjusted_count`, shrinks `count`
    /// accordingly and resets `adjusted_count` to the new `count`. Driver
    /// side only; returns `NotResizable` on a fixed window.
    pub fn advance_confirmed(&mut self) -> Result<(), BatchError> {
        if !self.resizable {
            return Err(BatchError::NotResizable);
        }
        self.offset += self.adjusted_count;
        self.count -= self.adjusted_count;
        self.adjusted_count = self.count;
        Ok(())
    }

    /// Whether any items remain pending.
    pub fn has_more(&self) -> bool {
        self.count > 0
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn adjusted_count(&self) -> usize {
        self.adjusted_count
    }

    pub fn is_resizable(&self) -> bool {
        self.resizable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_from_list_valid_ranges() {
        let items = [1, 2, 3, 4, 5];
        let w = AdjustableWindow::new_from_list(&items, 1, 3, true).unwrap();
        assert_eq!(w.offset(), 1);
        assert_eq!(w.count(), 3);
        assert_eq!(w.adjusted_count(), 3);
        assert_eq!(w.window(), &[2, 3, 4]);
        assert!(w.has_more());

        // Zero-width windows at every offset, including one past the end
        for off in 0..=items.len() {
            let w = AdjustableWindow::new_from_list(&items, off, 0, true).unwrap();
            assert!(!w.has_more());
            assert!(w.window().is_empty());
        }
    }

    #[test]
    fn test_new_from_list_rejects_bad_ranges() {
        let items = [1, 2, 3];
        assert!(matches!(
            AdjustableWindow::new_from_list(&items, 4, 0, true),
            Err(BatchError::Range(_))
        ));
        assert!(matches!(
            AdjustableWindow::new_from_list(&items, 1, 3, true),
            Err(BatchError::Range(_))
        ));
        assert!(matches!(
            AdjustableWindow::new_from_list(&items, 0, 4, false),
            Err(BatchError::Range(_))
        ));
    }

    #[test]
    fn test_set_adjusted_count_bounds() {
        let items = [10, 20, 30];
        let mut w = AdjustableWindow::new_from_list(&items, 0, 3, true).unwrap();

        w.set_adjusted_count(2).unwrap();
        assert_eq!(w.adjusted_count(), 2);
        assert_eq!(w.window(), &[10, 20]);
        // count is untouched; only the confirmed portion shrank
        assert_eq!(w.count(), 3);

        w.set_adjusted_count(0).unwrap();
        assert!(w.window().is_empty());

        assert!(matches!(
            w.set_adjusted_count(4),
            Err(BatchError::Range(_))
        ));
    }

    #[test]
    fn test_fixed_window_rejects_mutation() {
        let items = [1, 2];
        let mut w = AdjustableWindow::new_single_batch(&items);
        assert!(!w.is_resizable());
        assert_eq!(w.window(), &[1, 2]);
        assert!(matches!(
            w.set_adjusted_count(1),
            Err(BatchError::NotResizable)
        ));
        assert!(matches!(
            w.advance_confirmed(),
            Err(BatchError::NotResizable)
        ));
        // State is unchanged after the rejected calls
        assert_eq!(w.adjusted_count(), 2);
        assert_eq!(w.offset(), 0);
    }

    #[test]
    fn test_advance_confirmed_shifts_window() {
        let items = [1, 2, 3, 4, 5];
        let mut w = AdjustableWindow::new_resizable(&items);

        w.set_adjusted_count(2).unwrap();
        w.advance_confirmed().unwrap();
        assert_eq!(w.offset(), 2);
        assert_eq!(w.count(), 3);
        assert_eq!(w.adjusted_count(), 3);
        assert_eq!(w.pending(), &[3, 4, 5]);

        w.set_adjusted_count(3).unwrap();
        w.advance_confirmed().unwrap();
        assert_eq!(w.offset(), 5);
        assert_eq!(w.count(), 0);
        assert!(!w.has_more());
    }

    #[test]
    fn test_window_slice_outlives_mutation() {
        // window() borrows the item storage, so a slice taken before an
        // advance stays valid and unchanged afterwards
        let items = [7, 8, 9];
        let mut w = AdjustableWindow::new_resizable(&items);
        w.set_adjusted_count(1).unwrap();
        let first = w.window();
        w.advance_confirmed().unwrap();
        assert_eq!(first, &[7]);
        assert_eq!(w.pending(), &[8, 9]);
    }
}
