//! Character classes over the 7-bit alphabet.
//!
//! An NFA edge consumes one byte out of a set. The alphabet is only 128
//! values wide, so the whole set fits in a single `u128` with bit `b`
//! standing for byte `b`.

use std::fmt;

/// Number of byte values the automata work over (0..=127).
pub const ALPHABET_SIZE: usize = 128;

/// Lowest byte of the control range used by an empty bracket (`[]`).
pub const CONTROL_RANGE_LO: u8 = 0x00;

/// Highest byte of the control range used by an empty bracket (`[]`), i.e. space.
pub const CONTROL_RANGE_HI: u8 = 0x20;

/// A set of bytes in 0..=127.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ByteSet(u128);

impl ByteSet {
    pub const fn empty() -> Self {
        ByteSet(0)
    }

    /// The set matched by `.`: every byte 1..=127 except `\n` and `\r`.
    pub fn printable() -> Self {
        let mut set = Self::range(1, 0x7F);
        set.remove(b'\n');
        set.remove(b'\r');
        set
    }

    /// The set an empty bracket expands to: 0x00..=0x20.
    pub fn control() -> Self {
        Self::range(CONTROL_RANGE_LO, CONTROL_RANGE_HI)
    }

    pub fn single(byte: u8) -> Self {
        let mut set = Self::empty();
        set.insert(byte);
        set
    }

    /// Inclusive range. A reversed range (`lo > hi`) is empty.
    pub fn range(lo: u8, hi: u8) -> Self {
        let mut set = Self::empty();
        set.insert_range(lo, hi);
        set
    }

    /// Insert a byte. Bytes outside the alphabet are ignored.
    #[inline]
    pub fn insert(&mut self, byte: u8) {
        if (byte as usize) < ALPHABET_SIZE {
            self.0 |= 1u128 << byte;
        }
    }

    pub fn insert_range(&mut self, lo: u8, hi: u8) {
        if lo > hi {
            return;
        }
        for byte in lo..=hi {
            self.insert(byte);
        }
    }

    #[inline]
    pub fn remove(&mut self, byte: u8) {
        if (byte as usize) < ALPHABET_SIZE {
            self.0 &= !(1u128 << byte);
        }
    }

    #[inline]
    pub fn contains(&self, byte: u8) -> bool {
        (byte as usize) < ALPHABET_SIZE && self.0 & (1u128 << byte) != 0
    }

    pub fn union_with(&mut self, other: &ByteSet) {
        self.0 |= other.0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..ALPHABET_SIZE as u8).filter(move |&b| self.contains(b))
    }
}

impl FromIterator<u8> for ByteSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = ByteSet::empty();
        for byte in iter {
            set.insert(byte);
        }
        set
    }
}

impl fmt::Debug for ByteSet {
    // Printed as collapsed ranges, e.g. `[0x61-0x63, 0x7a]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut bytes = self.iter().peekable();
        while let Some(lo) = bytes.next() {
            let mut hi = lo;
            while bytes.peek() == Some(&(hi + 1)) {
                hi += 1;
                bytes.next();
            }
            if lo == hi {
                list.entry(&format_args!("{:#04x}", lo));
            } else {
                list.entry(&format_args!("{:#04x}-{:#04x}", lo, hi));
            }
        }
        list.finish()
    }
}
