//! Fixed-capacity moving average for temporal smoothing of visibility.

use std::collections::VecDeque;

/// Running mean over the last `capacity` samples.
///
/// While the window is still filling, the sum is divided by the full
/// capacity rather than the sample count, deliberately underestimating
/// visibility until enough history exists. A sensor that has only seen a
/// target for one tick should not report it fully visible.
#[derive(Debug, Clone)]
pub struct MovingAverageFilter {
    samples: VecDeque<f32>,
    sum: f32,
    capacity: usize,
}

impl MovingAverageFilter {
    /// Create a filter holding up to `capacity` samples (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        MovingAverageFilter {
            samples: VecDeque::with_capacity(capacity),
            sum: 0.0,
            capacity,
        }
    }

    /// Push a sample, evicting the oldest if the window is full.
    pub fn push(&mut self, value: f32) {
        if self.samples.len() == self.capacity {
            if let Some(oldest) = self.samples.pop_front() {
                self.sum -= oldest;
            }
        }
        self.samples.push_back(value);
        self.sum += value;
    }

    /// Current filtered value: `sum / max(capacity, len)`.
    pub fn value(&self) -> f32 {
        self.sum / self.capacity.max(self.samples.len()) as f32
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Window size the filter was built with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the filter holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop all history. Used when the tracked target changes identity.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.sum = 0.0;
    }
}
