//! Decorative highlight board.
//!
//! A fixed set of slots of which at most one is highlighted. The selection is
//! re-randomized every work minute through an injectable [`RandomSource`].

use fastrand::Rng;

/// Color state of a single decorative slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotColor {
    /// Resting color
    #[default]
    Neutral,
    /// The one slot picked for emphasis
    Highlighted,
}

// ============================================================================
// RandomSource
// ============================================================================

/// Source of random slot indices.
pub trait RandomSource {
    /// Returns an index in `[0, upper)`. `upper` is always at least 1.
    fn pick(&mut self, upper: usize) -> usize;
}

/// Random source backed by `fastrand`.
#[derive(Debug, Clone)]
pub struct FastRandSource {
    rng: Rng,
}

impl FastRandSource {
    /// Creates a source, seeded when `seed` is given.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        Self { rng }
    }
}

impl RandomSource for FastRandSource {
    fn pick(&mut self, upper: usize) -> usize {
        self.rng.usize(..upper)
    }
}

/// Scripted random source cycling through fixed values.
///
/// Values are reduced modulo `upper`.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: Vec<usize>,
    position: usize,
}

impl SequenceSource {
    /// Creates a source that yields `values` in order, then repeats.
    pub fn new(values: Vec<usize>) -> Self {
        Self {
            values,
            position: 0,
        }
    }
}

impl RandomSource for SequenceSource {
    fn pick(&mut self, upper: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value % upper
    }
}

// ============================================================================
// HighlightBoard
// ============================================================================

/// Fixed set of decorative slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightBoard {
    slots: Vec<SlotColor>,
}

impl HighlightBoard {
    /// Creates a board of `count` neutral slots.
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![SlotColor::Neutral; count],
        }
    }

    /// Highlights one random slot and resets the rest.
    ///
    /// Returns the highlighted index, or `None` for an empty board.
    pub fn randomize<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if self.slots.is_empty() {
            return None;
        }
        let chosen = rng.pick(self.slots.len()).min(self.slots.len() - 1);
        for (index, slot) in self.slots.iter_mut().enumerate() {
            *slot = if index == chosen {
                SlotColor::Highlighted
            } else {
                SlotColor::Neutral
            };
        }
        Some(chosen)
    }

    /// Restores every slot to neutral.
    pub fn clear(&mut self) {
        self.slots.fill(SlotColor::Neutral);
    }

    /// Index of the highlighted slot, if any.
    pub fn highlighted(&self) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| *slot == SlotColor::Highlighted)
    }

    /// Current slot colors.
    pub fn slots(&self) -> &[SlotColor] {
        &self.slots
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true for a board without slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
