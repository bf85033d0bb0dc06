//! Packing of up to three clump labels into one grid value.
//!
//! Clump ids are compacted to `[0, 99]` and stacked into a base-100 code: a
//! single label is stored as itself, a second label adds `label * 100`, and a
//! third adds `label * 10000`. Once three labels are present the code is
//! saturated and never changes.
//!
//! `compact(99) == 0`, and a zero label can only ever occupy the first slot,
//! so id 99 is indistinguishable from a cell whose first label is zero.

/// Label codes at or above this value hold two labels.
pub const TWO_LABELS: u32 = 100;

/// Label codes at or above this value hold three labels and are saturated.
pub const THREE_LABELS: u32 = 10_000;

/// Maximum number of labels a cell can hold.
pub const CAPACITY: usize = 3;

/// Maps a clump id to a compact label in `[0, 99]`.
pub fn compact(id: usize) -> u32 {
    ((id % 100 + 1) % 100) as u32
}

/// Adds the compact label of `id` to `previous`.
///
/// Labels already present and merges into a saturated code are dropped.
pub fn merge(previous: u32, id: usize) -> u32 {
    if previous >= THREE_LABELS {
        return previous;
    }
    let mut labels = PackedLabel::from_code(previous);
    labels.insert(compact(id));
    labels.code()
}

/// Unpacks a code into its labels, most recently added first.
pub fn decode(packed: u32) -> Vec<u32> {
    PackedLabel::from_code(packed).newest_first().collect()
}

/// Set of up to [`CAPACITY`] compact labels in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackedLabel {
    slots: [u32; CAPACITY],
    len: usize,
}

impl PackedLabel {
    /// Creates a set holding one label.
    pub fn single(label: u32) -> Self {
        Self {
            slots: [label, 0, 0],
            len: 1,
        }
    }

    /// Decodes a base-100 label code.
    pub fn from_code(code: u32) -> Self {
        if code < TWO_LABELS {
            Self::single(code)
        } else if code < THREE_LABELS {
            Self {
                slots: [code % 100, code / 100, 0],
                len: 2,
            }
        } else {
            Self {
                slots: [code % 100, (code % THREE_LABELS) / 100, code / THREE_LABELS],
                len: 3,
            }
        }
    }

    /// Encodes the set as a base-100 label code.
    pub fn code(&self) -> u32 {
        self.slots[..self.len]
            .iter()
            .rev()
            .fold(0, |acc, &label| acc * 100 + label)
    }

    /// Number of labels held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a packed label holds at least one label.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True once no further labels can be added.
    pub fn is_saturated(&self) -> bool {
        self.len == CAPACITY
    }

    /// True when `label` is already held.
    pub fn contains(&self, label: u32) -> bool {
        self.slots[..self.len].contains(&label)
    }

    /// Adds `label`. Returns false when it is already present, the set is
    /// saturated, or the label is zero (zero cannot occupy a later slot).
    pub fn insert(&mut self, label: u32) -> bool {
        let label = label % 100;
        if self.is_saturated() || self.contains(label) || label == 0 {
            return false;
        }
        self.slots[self.len] = label;
        self.len += 1;
        true
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> &[u32] {
        &self.slots[..self.len]
    }

    /// Labels, most recently added first.
    pub fn newest_first(&self) -> impl Iterator<Item = u32> + '_ {
        self.labels().iter().rev().copied()
    }
}
