use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::dataset::normalize::NormalizedFrame;

// ============================================================================
// RollingWindow: bounded ring buffer of the most recent feature rows
// ============================================================================

/// Fixed-capacity ring buffer. Once full, pushing evicts the oldest row;
/// the buffer never grows past its capacity.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    capacity: usize,
    slots: Vec<Vec<f64>>,
    /// Index of the oldest slot once the buffer is full
    head: usize,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "capacity must be positive");
        RollingWindow {
            capacity,
            slots: Vec::with_capacity(capacity),
            head: 0,
        }
    }

    pub fn push(&mut self, row: Vec<f64>) {
        if self.slots.len() < self.capacity {
            self.slots.push(row);
        } else {
            self.slots[self.head] = row;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    /// Copy of the buffered rows, oldest first.
    pub fn snapshot(&self) -> Vec<Vec<f64>> {
        (0..self.slots.len())
            .map(|i| self.slots[(self.head + i) % self.slots.len()].clone())
            .collect()
    }
}

// ============================================================================
// Sequence samples
// ============================================================================

/// One model input: `seq_len` consecutive feature rows plus the target of
/// the last row in the window.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSample {
    pub features: Vec<Vec<f64>>,
    pub target: u8,
}

/// Slide a window of `seq_len` rows over the frame. Each row completes one
/// window once the buffer is full, so a frame with R rows yields
/// `max(0, R - seq_len + 1)` samples. A frame shorter than `seq_len` yields
/// none; that is reported, never silently succeeded past.
pub fn build_windows(frame: &NormalizedFrame, seq_len: usize) -> Vec<SequenceSample> {
    if frame.rows() < seq_len {
        log::warn!(
            "{} rows is fewer than the sequence length {}; no windows emitted",
            frame.rows(),
            seq_len
        );
        return Vec::new();
    }

    let mut window = RollingWindow::new(seq_len);
    let mut samples = Vec::with_capacity(frame.rows() - seq_len + 1);
    for row in 0..frame.rows() {
        window.push(frame.feature_row(row));
        if window.is_full() {
            samples.push(SequenceSample {
                features: window.snapshot(),
                target: frame.targets[row],
            });
        }
    }
    samples
}

/// Permute sample order within a split. Seeded, so a run is reproducible;
/// never applied across the train/validation boundary.
pub fn shuffle_samples(samples: &mut [SequenceSample], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);
}
