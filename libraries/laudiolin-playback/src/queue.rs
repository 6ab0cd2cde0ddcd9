//! FIFO track queue
//!
//! The controller owns two of these: the forward queue ("what plays next")
//! and the back-history queue ("what played before").

use crate::shuffle::shuffle_random;
use std::collections::VecDeque;

/// Ordered queue with FIFO dequeue
///
/// Insertion order is play order unless [`Queue::shuffle`] is called.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    /// Create new empty queue
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Append one item to the end
    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Append items to the end, keeping their relative order
    pub fn enqueue_all<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.items.extend(items);
    }

    /// Remove and return the front item
    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Front item without removing it
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Randomly permute the remaining items in place
    pub fn shuffle(&mut self) {
        shuffle_random(self.items.make_contiguous());
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in play order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.enqueue_all(iter);
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
