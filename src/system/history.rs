use std::collections::VecDeque;

use super::error::SampleError;

pub const DEFAULT_CAPACITY: usize = 100;

/// `(tick_index, value)` pair as stored in a [`TimeSeries`].
pub type SeriesPoint = (u64, f64);

/// Fixed-capacity FIFO of `(tick_index, value)` pairs.
///
/// The buffer stores whatever indices it is given; keeping them consecutive
/// is the caller's job.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    points: VecDeque<SeriesPoint>,
    capacity: usize,
}

impl TimeSeries {
    pub fn new(capacity: usize) -> Result<Self, SampleError> {
        if capacity == 0 {
            return Err(SampleError::InvalidCapacity(capacity));
        }
        Ok(Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    pub fn append(&mut self, tick_index: u64, value: f64) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back((tick_index, value));
    }

    /// Copy of the current contents, oldest first.
    pub fn snapshot(&self) -> Vec<SeriesPoint> {
        self.points.iter().copied().collect()
    }

    pub fn latest(&self) -> Option<SeriesPoint> {
        self.points.back().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TimeSeries {
    fn default() -> Self {
        Self {
            points: VecDeque::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
        }
    }
}
