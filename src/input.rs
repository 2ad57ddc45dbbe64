use std::fmt;

use ringbuffer::{AllocRingBuffer, RingBuffer};
use tracing::trace;

use crate::grid::Direction;

pub const INPUT_QUEUE_CAPACITY: usize = 8;

/// Directional key presses waiting for the next tick.
///
/// The queue is drained by [`InputQueue::resolve`] once per tick. Producers can
/// outrun the tick rate, so the buffer is capped and evicts its oldest entry
/// when full.
pub struct InputQueue {
    pending: AllocRingBuffer<Direction>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::with_capacity(INPUT_QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        InputQueue { pending: AllocRingBuffer::new(capacity) }
    }

    pub fn push(&mut self, direction: Direction) {
        if self.pending.is_full() {
            trace!(?direction, "input queue full, dropping oldest entry");
        }
        self.pending.enqueue(direction);
    }

    /// Picks the direction for this tick.
    ///
    /// Leading entries that repeat `current` or reverse it are discarded. The
    /// first remaining entry is consumed and returned; entries behind it stay
    /// queued for later ticks. An exhausted queue keeps `current`.
    pub fn resolve(&mut self, current: Direction) -> Direction {
        while let Some(candidate) = self.pending.dequeue() {
            if candidate != current && candidate != current.opposite() {
                return candidate;
            }
        }

        current
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn to_vec(&self) -> Vec<Direction> {
        self.pending.iter().copied().collect()
    }
}

impl fmt::Debug for InputQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.pending.iter()).finish()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction::*;

    fn queue_of(dirs: &[Direction]) -> InputQueue {
        let mut queue = InputQueue::new();
        for dir in dirs {
            queue.push(*dir);
        }
        queue
    }

    #[test]
    fn empty_queue_keeps_current_direction() {
        let mut queue = InputQueue::new();
        assert_eq!(queue.resolve(Up), Up);
        assert!(queue.is_empty());
    }

    #[test]
    fn reversal_is_dropped() {
        let mut queue = queue_of(&[Down, Left]);
        assert_eq!(queue.resolve(Up), Left);
        assert!(queue.is_empty());
    }

    #[test]
    fn repeats_and_reversals_are_all_discarded() {
        let mut queue = queue_of(&[Right, Left, Right]);
        assert_eq!(queue.resolve(Right), Right);
        assert!(queue.is_empty());
    }

    #[test]
    fn entries_behind_the_first_turn_survive() {
        let mut queue = queue_of(&[Up, Left, Down, Right]);
        assert_eq!(queue.resolve(Up), Left);
        assert_eq!(queue.to_vec(), vec![Down, Right]);

        assert_eq!(queue.resolve(Left), Down);
        assert_eq!(queue.to_vec(), vec![Right]);
    }

    #[test]
    fn full_queue_evicts_oldest() {
        let mut queue = InputQueue::with_capacity(2);
        queue.push(Left);
        queue.push(Up);
        queue.push(Down);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.to_vec(), vec![Up, Down]);
    }

    #[test]
    fn default_capacity_bounds_growth() {
        let mut queue = InputQueue::new();
        for i in 0..100 {
            queue.push(Direction::ALL[i % 4]);
        }
        assert_eq!(queue.len(), INPUT_QUEUE_CAPACITY);
    }
}
