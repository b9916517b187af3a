//! Fixed-capacity square sets, one per color and piece type.

use board88_core::Square;

/// An unordered set of up to [`PieceList::CAPACITY`] squares.
///
/// Removal swaps the last entry into the vacated slot, so iteration order
/// changes as pieces come and go. Unused slots hold [`Square::OTB`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PieceList {
    squares: [Square; Self::CAPACITY],
    len: u8,
}

impl PieceList {
    pub const CAPACITY: usize = 16;

    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        PieceList {
            squares: [Square::OTB; Self::CAPACITY],
            len: 0,
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn is_full(&self) -> bool {
        self.len as usize == Self::CAPACITY
    }

    /// Appends a square.
    #[inline]
    pub fn push(&mut self, sq: Square) {
        debug_assert!(!self.is_full());
        self.squares[self.len as usize] = sq;
        self.len += 1;
    }

    /// Removes a square, moving the last entry into its slot.
    ///
    /// Returns false if the square was not listed.
    pub fn remove(&mut self, sq: Square) -> bool {
        match self.position(sq) {
            Some(i) => {
                let last = self.len as usize - 1;
                self.squares[i] = self.squares[last];
                self.squares[last] = Square::OTB;
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Replaces `from` with `to` in place. Returns false if `from` was not
    /// listed.
    pub fn relocate(&mut self, from: Square, to: Square) -> bool {
        match self.position(from) {
            Some(i) => {
                self.squares[i] = to;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        self.position(sq).is_some()
    }

    #[inline]
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len as usize]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Square> {
        self.as_slice().iter()
    }

    fn position(&self, sq: Square) -> Option<usize> {
        self.as_slice().iter().position(|&s| s == sq)
    }
}

impl Default for PieceList {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a PieceList {
    type Item = &'a Square;
    type IntoIter = std::slice::Iter<'a, Square>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for PieceList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
