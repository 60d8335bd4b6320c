//! Compact byte-indexed transition table for DFA states.
//!
//! A DFA state has at most one successor per byte, and in practice long
//! runs of bytes share a successor (`.` sends 125 bytes to one place).
//! The table stores those runs as ceilings/steps: each ceiling is the
//! exclusive upper bound of a run, and the matching step is the state that
//! run leads to.
//!
//! Example: bytes `a`-`c` to S1 and `z` to S2:
//! ```text
//! ceilings: [0x61, 0x64, 0x7a, 0x7b, 0x80]
//! steps:    [None, S1,   None, S2,   None]
//! ```

use super::byte_set::ALPHABET_SIZE;
use super::subset::DfaStateId;

/// One slot per alphabet byte, the form transitions are built in.
pub type UnpackedTable = [Option<DfaStateId>; ALPHABET_SIZE];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmallTable {
    /// Upper bounds (exclusive) for each byte run
    ceilings: Vec<u8>,
    /// States to transition to for each run
    steps: Vec<Option<DfaStateId>>,
}

impl Default for SmallTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SmallTable {
    /// A table with no transitions, holding only the final ceiling.
    pub fn new() -> Self {
        Self {
            ceilings: vec![ALPHABET_SIZE as u8],
            steps: vec![None],
        }
    }

    /// Build a table from a full per-byte array.
    pub fn from_unpacked(unpacked: &UnpackedTable) -> Self {
        let mut table = Self::new();
        table.pack(unpacked);
        table
    }

    /// Deterministic step on `byte`. Bytes outside the alphabet have no step.
    #[inline]
    pub fn dstep(&self, byte: u8) -> Option<DfaStateId> {
        for (i, &ceiling) in self.ceilings.iter().enumerate() {
            if byte < ceiling {
                return self.steps[i];
            }
        }
        None
    }

    /// Replace the contents with the runs of `unpacked`.
    fn pack(&mut self, unpacked: &UnpackedTable) {
        self.ceilings.clear();
        self.steps.clear();

        let mut current = unpacked[0];
        for (i, &step) in unpacked.iter().enumerate().skip(1) {
            if step != current {
                self.ceilings.push(i as u8);
                self.steps.push(current);
                current = step;
            }
        }
        self.ceilings.push(ALPHABET_SIZE as u8);
        self.steps.push(current);
    }

    /// Number of bytes with a transition.
    pub fn transition_count(&self) -> usize {
        let mut floor = 0usize;
        let mut count = 0;
        for (&ceiling, step) in self.ceilings.iter().zip(&self.steps) {
            if step.is_some() {
                count += ceiling as usize - floor;
            }
            floor = ceiling as usize;
        }
        count
    }

    /// `(byte, target)` for every byte with a transition, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (u8, DfaStateId)> + '_ {
        let mut floor = 0u8;
        self.ceilings
            .iter()
            .zip(&self.steps)
            .flat_map(move |(&ceiling, &step)| {
                let lo = floor;
                floor = ceiling;
                (lo..ceiling).filter_map(move |b| step.map(|s| (b, s)))
            })
    }
}
