//! # Splittable Batch
//!
//! Two-phase, immutable companion to `AdjustableWindow`: compute one explicit
//! split, then read off the halves.
//!
//! Some call sites prefer an already-sent/still-pending pair over in-place
//! index mutation. Both halves are index-derived views over the same borrowed
//! sequence, so repeated splitting of a large batch copies no item data.

use crate::error::BatchError;

/// A batch that can be split once into an accepted first half and a pending
/// second half.
///
/// `first_half()` is never further splittable (it represents a message
/// already sent); `second_half()` always is (it may need further splitting).
pub struct SplittableBatch<'a, T> {
    items: &'a [T],
    offset: usize,
    len: usize,
    can_be_split: bool,
    split_index: Option<usize>,
}

impl<'a, T> SplittableBatch<'a, T> {
    /// Splittable batch over the full sequence.
    pub fn new(items: &'a [T]) -> Self {
        Self {
            items,
            offset: 0,
            len: items.len(),
            can_be_split: true,
            split_index: None,
        }
    }

    /// Batch over the full sequence that refuses to be split.
    pub fn new_unsplittable(items: &'a [T]) -> Self {
        Self {
            can_be_split: false,
            ..Self::new(items)
        }
    }

    fn view(items: &'a [T], offset: usize, len: usize, can_be_split: bool) -> Self {
        Self {
            items,
            offset,
            len,
            can_be_split,
            split_index: None,
        }
    }

    /// The items this batch covers.
    pub fn items(&self) -> &'a [T] {
        &self.items[self.offset..self.offset + self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn can_be_split(&self) -> bool {
        self.can_be_split
    }

    /// Record the cut point: `index` items accepted, the rest pending.
    ///
    /// Returns `NotSplittable` if the batch was constructed with
    /// `can_be_split = false`, `Range` if `index > len`.
    pub fn split(&mut self, index: usize) -> Result<(), BatchError> {
        if !self.can_be_split {
            return Err(BatchError::NotSplittable);
        }
        if index > self.len {
            return Err(BatchError::Range(format!(
                "split index {} exceeds batch length {}",
                index, self.len
            )));
        }
        self.split_index = Some(index);
        Ok(())
    }

    /// The accepted half. Fails with `SplitNotCalledYet` before `split`.
    pub fn first_half(&self) -> Result<SplittableBatch<'a, T>, BatchError> {
        let index = self.split_index.ok_or(BatchError::SplitNotCalledYet)?;
        Ok(Self::view(self.items, self.offset, index, false))
    }

    /// The pending half. Fails with `SplitNotCalledYet` before `split`.
    pub fn second_half(&self) -> Result<SplittableBatch<'a, T>, BatchError> {
        let index = self.split_index.ok_or(BatchError::SplitNotCalledYet)?;
        Ok(Self::view(
            self.items,
            self.offset + index,
            self.len - index,
            true,
        ))
    }
}
