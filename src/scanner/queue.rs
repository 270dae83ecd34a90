// SPDX-License-Identifier: GPL-3.0-only

//! Bounded freshest-N buffer of pending frames
//!
//! The producer is never blocked: when the queue is full, the oldest
//! pending frame is evicted to make room, because stalling the capture
//! source would stall the preview pipeline it belongs to.

use crate::frame::RawFrame;
use std::collections::VecDeque;

/// Fixed-capacity FIFO of frames awaiting dispatch
#[derive(Debug)]
pub struct ScanQueue {
    frames: VecDeque<RawFrame>,
    capacity: usize,
}

impl ScanQueue {
    /// Create a queue holding at most `capacity` frames (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a frame, evicting the oldest one first when full.
    ///
    /// Returns the evicted frame, if any.
    pub fn push(&mut self, frame: RawFrame) -> Option<RawFrame> {
        let evicted = if self.frames.len() >= self.capacity {
            self.frames.pop_front()
        } else {
            None
        };
        self.frames.push_back(frame);
        debug_assert!(self.frames.len() <= self.capacity);
        evicted
    }

    /// Remove and return the oldest pending frame
    pub fn pop_oldest(&mut self) -> Option<RawFrame> {
        self.frames.pop_front()
    }

    /// Drop all pending frames
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> RawFrame {
        RawFrame::new(vec![0u8; 4], 2, 2)
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        let mut queue = ScanQueue::new(4);
        for _ in 0..20 {
            queue.push(frame());
            assert!(queue.len() <= 4);
        }
    }

    #[test]
    fn test_overflow_keeps_freshest_in_arrival_order() {
        let mut queue = ScanQueue::new(4);
        let frames: Vec<RawFrame> = (0..5).map(|_| frame()).collect();
        let ids: Vec<u64> = frames.iter().map(|f| f.id()).collect();

        let mut evicted = Vec::new();
        for f in frames {
            if let Some(old) = queue.push(f) {
                evicted.push(old.id());
            }
        }

        // The first frame is evicted, exactly the last four remain in order
        assert_eq!(evicted, vec![ids[0]]);
        let remaining: Vec<u64> = std::iter::from_fn(|| queue.pop_oldest())
            .map(|f| f.id())
            .collect();
        assert_eq!(remaining, ids[1..].to_vec());
    }

    #[test]
    fn test_pop_is_fifo() {
        let mut queue = ScanQueue::new(4);
        let a = frame();
        let b = frame();
        let (id_a, id_b) = (a.id(), b.id());
        queue.push(a);
        queue.push(b);
        assert_eq!(queue.pop_oldest().map(|f| f.id()), Some(id_a));
        assert_eq!(queue.pop_oldest().map(|f| f.id()), Some(id_b));
        assert_eq!(queue.pop_oldest().map(|f| f.id()), None);
    }

    #[test]
    fn test_clear_empties_queue() {
        let mut queue = ScanQueue::new(2);
        queue.push(frame());
        queue.push(frame());
        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut queue = ScanQueue::new(0);
        assert_eq!(queue.capacity(), 1);
        queue.push(frame());
        let evicted = queue.push(frame());
        assert!(evicted.is_some());
        assert_eq!(queue.len(), 1);
    }
}
