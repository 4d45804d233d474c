//! Fixed-capacity sliding window used for debouncing per-frame measurements.

use std::collections::VecDeque;

/// Ring buffer holding the most recent `capacity` samples
#[derive(Debug, Clone)]
pub struct SlidingWindow<T> {
    capacity: usize,
    samples: VecDeque<T>,
}

impl<T> SlidingWindow<T> {
    /// Create an empty window
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Push a sample, evicting the oldest one when the window is full
    pub fn push(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.samples.len() == self.capacity
    }

    /// True only when the window is full and every sample satisfies `pred`
    pub fn all_full<F: FnMut(&T) -> bool>(&self, pred: F) -> bool {
        self.is_full() && self.samples.iter().all(pred)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
