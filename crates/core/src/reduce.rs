//! Global max-delta reduction across workers
//!
//! Each worker publishes the maximum absolute change over its own cells
//! into a fixed slot; after the post-sweep barrier every worker folds all
//! slots with `max`. The combine is associative and commutative, so the
//! reduced value does not depend on worker count or arrival order.

use std::sync::atomic::{AtomicU64, Ordering};

/// One `f64` slot per worker, stored as bits
#[derive(Debug)]
pub struct DeltaSlots {
    slots: Vec<AtomicU64>,
}

impl DeltaSlots {
    /// Create slots for `workers` workers, all starting at zero.
    #[must_use]
    pub fn new(workers: usize) -> Self {
        Self {
            slots: (0..workers)
                .map(|_| AtomicU64::new(0.0_f64.to_bits()))
                .collect(),
        }
    }

    /// Publish one worker's local maximum change for the sweep just
    /// finished. Relaxed ordering suffices: publication and the reads in
    /// [`global_max`](Self::global_max) are separated by the sweep barrier.
    ///
    /// # Panics
    ///
    /// Panics if `worker_id` has no slot.
    pub fn record(&self, worker_id: usize, local_max: f64) {
        self.slots[worker_id].store(local_max.to_bits(), Ordering::Relaxed);
    }

    /// Fold every slot with `max`.
    #[must_use]
    pub fn global_max(&self) -> f64 {
        self.slots
            .iter()
            .map(|slot| f64::from_bits(slot.load(Ordering::Relaxed)))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_largest_slot() {
        let slots = DeltaSlots::new(3);
        slots.record(0, 0.5);
        slots.record(1, 2.0);
        slots.record(2, 1.0);
        assert_eq!(slots.global_max(), 2.0);
    }

    #[test]
    fn reduction_ignores_publication_order() {
        let values = [0.3, 0.7, 0.1, 0.4];

        let forward = DeltaSlots::new(4);
        for (worker, value) in values.iter().enumerate() {
            forward.record(worker, *value);
        }

        let shuffled = DeltaSlots::new(4);
        for &worker in &[2, 0, 3, 1] {
            shuffled.record(worker, values[worker]);
        }

        assert_eq!(forward.global_max(), shuffled.global_max());
        assert_eq!(forward.global_max(), 0.7);
    }

    #[test]
    fn single_worker_reduces_to_its_own_delta() {
        let slots = DeltaSlots::new(1);
        slots.record(0, 0.0125);
        assert_eq!(slots.global_max(), 0.0125);
    }

    #[test]
    fn fresh_slots_reduce_to_zero() {
        assert_eq!(DeltaSlots::new(4).global_max(), 0.0);
    }
}
