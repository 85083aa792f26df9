//! An observable list.
//!
//! [`NotifyingList`] wraps a `Vec` and calls every registered [`Listener`]
//! once after each mutating operation. Multi-valued tags use it to learn that
//! their parsed value was edited in place.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Deref, Range};
use std::rc::Rc;

use thiserror::Error;

/// Receives a callback after every mutation of a [`NotifyingList`].
pub trait Listener {
    fn contents_changed(&self) -> anyhow::Result<()>;
}

#[derive(Debug, Error)]
pub enum ListError {
    #[error("List index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Value not found in list")]
    NotFound,
    /// A listener failed. The mutation that triggered it has been applied.
    #[error("Listener failed: {0}")]
    Listener(#[source] anyhow::Error),
}

/// A list that notifies its listeners of every change.
///
/// Listeners are called in registration order after the mutation took
/// effect. The first failing listener stops the fan-out and its error is
/// returned; the mutation is not rolled back. Operations that fail before
/// mutating (bad index, missing value) do not notify.
pub struct NotifyingList<T> {
    items: Vec<T>,
    listeners: Vec<Rc<dyn Listener>>,
}

impl<T> NotifyingList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            listeners: Vec::new(),
        }
    }

    pub fn register_listener(&mut self, listener: Rc<dyn Listener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    fn notify(&self) -> Result<(), ListError> {
        for listener in &self.listeners {
            if let Err(e) = listener.contents_changed() {
                log::warn!("List listener failed: {e}");
                return Err(ListError::Listener(e));
            }
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), ListError> {
        if index >= self.items.len() {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    /// Clamp a range the way host slices do: out-of-bounds ends are cut to
    /// the length and an inverted range is empty.
    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(self.items.len());
        let start = range.start.min(end);
        start..end
    }

    /// `list[index] = value`
    pub fn set(&mut self, index: usize, value: T) -> Result<(), ListError> {
        self.check_index(index)?;
        self.items[index] = value;
        self.notify()
    }

    /// `list[range] = values`. Notifies even when nothing changes.
    pub fn set_slice<I>(&mut self, range: Range<usize>, values: I) -> Result<(), ListError>
    where
        I: IntoIterator<Item = T>,
    {
        let range = self.clamp(range);
        self.items.splice(range, values);
        self.notify()
    }

    /// `del list[index]`
    pub fn remove_at(&mut self, index: usize) -> Result<(), ListError> {
        self.check_index(index)?;
        self.items.remove(index);
        self.notify()
    }

    /// `del list[range]`. Notifies even when nothing changes.
    pub fn delete_slice(&mut self, range: Range<usize>) -> Result<(), ListError> {
        let range = self.clamp(range);
        self.items.drain(range);
        self.notify()
    }

    pub fn push(&mut self, value: T) -> Result<(), ListError> {
        self.items.push(value);
        self.notify()
    }

    /// Also serves as in-place concatenation (`list += values`).
    pub fn extend<I>(&mut self, values: I) -> Result<(), ListError>
    where
        I: IntoIterator<Item = T>,
    {
        self.items.extend(values);
        self.notify()
    }

    /// Insert before `index`; an index past the end appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), ListError> {
        let index = index.min(self.items.len());
        self.items.insert(index, value);
        self.notify()
    }

    /// Remove and return the last item.
    ///
    /// If a listener fails the item is dropped along with the error.
    pub fn pop(&mut self) -> Result<T, ListError> {
        let value = self
            .items
            .pop()
            .ok_or(ListError::IndexOutOfRange { index: 0, len: 0 })?;
        self.notify()?;
        Ok(value)
    }

    pub fn pop_at(&mut self, index: usize) -> Result<T, ListError> {
        self.check_index(index)?;
        let value = self.items.remove(index);
        self.notify()?;
        Ok(value)
    }

    pub fn reverse(&mut self) -> Result<(), ListError> {
        self.items.reverse();
        self.notify()
    }

    pub fn sort_by<F>(&mut self, compare: F) -> Result<(), ListError>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_by(compare);
        self.notify()
    }
}

impl<T: PartialEq> NotifyingList<T> {
    /// Remove the first item equal to `value`.
    pub fn remove(&mut self, value: &T) -> Result<(), ListError> {
        let index = self
            .items
            .iter()
            .position(|item| item == value)
            .ok_or(ListError::NotFound)?;
        self.items.remove(index);
        self.notify()
    }
}

impl<T: Ord> NotifyingList<T> {
    pub fn sort(&mut self) -> Result<(), ListError> {
        self.items.sort();
        self.notify()
    }
}

impl<T: Clone> NotifyingList<T> {
    /// In-place repetition (`list *= count`); zero empties the list.
    pub fn repeat(&mut self, count: usize) -> Result<(), ListError> {
        self.items = (0..count)
            .flat_map(|_| self.items.iter().cloned())
            .collect();
        self.notify()
    }
}

impl<T> Deref for NotifyingList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for NotifyingList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: PartialEq> PartialEq for NotifyingList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for NotifyingList<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        &self.items == other
    }
}

impl<T: PartialEq> PartialEq<[T]> for NotifyingList<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.items.as_slice() == other
    }
}

impl<T: fmt::Debug> fmt::Debug for NotifyingList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyingList")
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Counter {
        changes: Cell<usize>,
    }

    impl Counter {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                changes: Cell::new(0),
            })
        }
    }

    impl Listener for Counter {
        fn contents_changed(&self) -> anyhow::Result<()> {
            self.changes.set(self.changes.get() + 1);
            Ok(())
        }
    }

    struct Failing;

    impl Listener for Failing {
        fn contents_changed(&self) -> anyhow::Result<()> {
            anyhow::bail!("not implemented")
        }
    }

    fn values() -> NotifyingList<i32> {
        NotifyingList::new(vec![5, 7, 9, 14, 57, 3, 2])
    }

    fn with_counters(list: &mut NotifyingList<i32>, n: usize) -> Vec<Rc<Counter>> {
        let counters: Vec<_> = (0..n).map(|_| Counter::new()).collect();
        for counter in &counters {
            list.register_listener(counter.clone());
        }
        counters
    }

    fn assert_notified_once(counters: &[Rc<Counter>]) {
        for counter in counters {
            assert_eq!(counter.changes.get(), 1);
            counter.changes.set(0);
        }
    }

    // ── without listeners ────────────────────────────────────────────

    #[test]
    fn no_listener() {
        let mut values = values();

        values.set(3, 13).unwrap();
        assert_eq!(values, vec![5, 7, 9, 13, 57, 3, 2]);

        values.remove_at(5).unwrap();
        assert_eq!(values, vec![5, 7, 9, 13, 57, 2]);

        values.push(17).unwrap();
        values.extend([11, 22]).unwrap();
        assert_eq!(values, vec![5, 7, 9, 13, 57, 2, 17, 11, 22]);

        values.insert(4, 24).unwrap();
        assert_eq!(values.pop().unwrap(), 22);
        assert_eq!(values, vec![5, 7, 9, 13, 24, 57, 2, 17, 11]);

        values.remove(&9).unwrap();
        values.reverse().unwrap();
        assert_eq!(values, vec![11, 17, 2, 57, 24, 13, 7, 5]);

        values.sort().unwrap();
        values.extend([8, 4]).unwrap();
        assert_eq!(values, vec![2, 5, 7, 11, 13, 17, 24, 57, 8, 4]);

        values.set_slice(3..4, [8, 4]).unwrap();
        assert_eq!(values, vec![2, 5, 7, 8, 4, 13, 17, 24, 57, 8, 4]);

        values.delete_slice(3..5).unwrap();
        assert_eq!(values, vec![2, 5, 7, 13, 17, 24, 57, 8, 4]);

        values.repeat(2).unwrap();
        assert_eq!(values.len(), 18);
        assert_eq!(values[9..], [2, 5, 7, 13, 17, 24, 57, 8, 4]);
    }

    #[test]
    fn repeat_owned_items() {
        let mut words = NotifyingList::new(vec!["sea".to_string(), "sky".to_string()]);
        let counter = Counter::new();
        words.register_listener(counter.clone());

        words.repeat(2).unwrap();
        assert_eq!(
            words,
            ["sea", "sky", "sea", "sky"].map(String::from).to_vec()
        );
        words.repeat(0).unwrap();
        assert!(words.is_empty());
        assert_eq!(counter.changes.get(), 2);
    }

    // ── notification ─────────────────────────────────────────────────

    #[test]
    fn every_mutation_notifies_once() {
        let mut values = values();
        let counters = with_counters(&mut values, 5);

        values.set(3, 13).unwrap();
        assert_notified_once(&counters);
        values.remove_at(0).unwrap();
        assert_notified_once(&counters);
        values.push(17).unwrap();
        assert_notified_once(&counters);
        values.extend([1, 2]).unwrap();
        assert_notified_once(&counters);
        values.insert(1, 24).unwrap();
        assert_notified_once(&counters);
        values.pop().unwrap();
        assert_notified_once(&counters);
        values.pop_at(0).unwrap();
        assert_notified_once(&counters);
        values.remove(&24).unwrap();
        assert_notified_once(&counters);
        values.reverse().unwrap();
        assert_notified_once(&counters);
        values.sort().unwrap();
        assert_notified_once(&counters);
        values.sort_by(|a, b| b.cmp(a)).unwrap();
        assert_notified_once(&counters);
        values.set_slice(0..1, [3, 3]).unwrap();
        assert_notified_once(&counters);
        values.delete_slice(0..2).unwrap();
        assert_notified_once(&counters);
        values.repeat(3).unwrap();
        assert_notified_once(&counters);
    }

    #[test]
    fn append_notifies_every_listener() {
        let mut values = values();
        let counters = with_counters(&mut values, 12);
        values.push(42).unwrap();
        assert_eq!(values, vec![5, 7, 9, 14, 57, 3, 2, 42]);
        assert_notified_once(&counters);
    }

    #[test]
    fn empty_slice_operations_still_notify() {
        let mut values = values();
        let counters = with_counters(&mut values, 3);
        values.set_slice(2..2, []).unwrap();
        assert_eq!(values, vec![5, 7, 9, 14, 57, 3, 2]);
        assert_notified_once(&counters);
        values.delete_slice(20..30).unwrap();
        assert_notified_once(&counters);
    }

    #[test]
    fn reads_do_not_notify() {
        let mut values = values();
        let counters = with_counters(&mut values, 2);
        assert_eq!(values[0], 5);
        assert_eq!(values.len(), 7);
        assert!(values.contains(&57));
        let _: Vec<_> = values.iter().collect();
        for counter in &counters {
            assert_eq!(counter.changes.get(), 0);
        }
    }

    #[test]
    fn failed_preconditions_do_not_notify() {
        let mut values = values();
        let counters = with_counters(&mut values, 2);
        assert!(matches!(
            values.set(7, 1),
            Err(ListError::IndexOutOfRange { index: 7, len: 7 })
        ));
        assert!(matches!(values.remove(&1000), Err(ListError::NotFound)));
        let mut empty = NotifyingList::<i32>::new(Vec::new());
        assert!(empty.pop().is_err());
        for counter in &counters {
            assert_eq!(counter.changes.get(), 0);
        }
    }

    // ── failing listener ─────────────────────────────────────────────

    #[test]
    fn failing_listener_keeps_mutation() {
        let mut values = values();
        values.register_listener(Rc::new(Failing));

        assert!(matches!(values.set(3, 13), Err(ListError::Listener(_))));
        assert_eq!(values, vec![5, 7, 9, 13, 57, 3, 2]);

        assert!(values.pop().is_err());
        assert_eq!(values, vec![5, 7, 9, 13, 57, 3]);

        assert!(values.set_slice(3..4, [8, 4]).is_err());
        assert_eq!(values, vec![5, 7, 9, 8, 4, 57, 3]);
    }

    #[test]
    fn failing_listener_stops_fan_out() {
        let mut values = values();
        let before = Counter::new();
        let after = Counter::new();
        values.register_listener(before.clone());
        values.register_listener(Rc::new(Failing));
        values.register_listener(after.clone());

        assert!(values.push(1).is_err());
        assert_eq!(before.changes.get(), 1);
        assert_eq!(after.changes.get(), 0);
    }
}
