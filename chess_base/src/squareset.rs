use crate::types::{File, Rank, Square};
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::fmt;

/// Set of on-board squares, one bit per square
#[derive(
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);
    pub const FULL: SquareSet = SquareSet(!0);

    pub const fn from_square(square: Square) -> SquareSet {
        SquareSet(1_u64 << square.index())
    }

    pub const fn with(self, square: Square) -> SquareSet {
        SquareSet(self.0 | (1_u64 << square.index()))
    }

    pub const fn without(self, square: Square) -> SquareSet {
        SquareSet(self.0 & !(1_u64 << square.index()))
    }

    pub fn set(&mut self, square: Square) {
        *self = self.with(square);
    }

    /// Returns `true` if `square` is in the set
    ///
    /// Off-board squares are never in the set.
    pub const fn has(&self, square: Square) -> bool {
        square.on_board() && ((self.0 >> square.index()) & 1) != 0
    }

    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "SquareSet({})", self)
    }
}

/// Formats the set rank by rank, from the eighth rank to the first, each rank from the
/// a-file to the h-file
impl fmt::Display for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, rank) in Rank::iter().rev().enumerate() {
            if i != 0 {
                write!(f, "/")?;
            }
            for file in File::iter().rev() {
                let bit = self.has(Square::from_parts(file, rank));
                write!(f, "{}", if bit { '1' } else { '0' })?;
            }
        }
        Ok(())
    }
}

pub struct Iter(u64);

impl Iterator for Iter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros();
        self.0 &= self.0.wrapping_sub(1_u64);
        Some(Square::from_index(bit as usize))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        Iter(self.0)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut res = SquareSet::EMPTY;
        for square in iter {
            res.set(square);
        }
        res
    }
}
