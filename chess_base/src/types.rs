use std::fmt::{self, Display};
use std::hint;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRankChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellParseError {
    #[error("unexpected cell char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unexpected color char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

/// Board file
///
/// Files are numbered from the h-file, so [`File::index()`] is equal to the column
/// of the square on the internal grid.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum File {
    H = 0,
    G = 1,
    F = 2,
    E = 3,
    D = 4,
    C = 5,
    B = 6,
    A = 7,
}

impl File {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => File::H,
            1 => File::G,
            2 => File::F,
            3 => File::E,
            4 => File::D,
            5 => File::C,
            6 => File::B,
            7 => File::A,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "file index must be between 0 and 7");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..8).map(|x| unsafe { Self::from_index_unchecked(x) })
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(unsafe {
                Self::from_index_unchecked((u32::from('h') - u32::from(c)) as usize)
            }),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'h' - *self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Board rank
///
/// [`Rank::index()`] is equal to the row of the square on the internal grid, so
/// the first rank has index 0.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => Rank::R1,
            1 => Rank::R2,
            2 => Rank::R3,
            3 => Rank::R4,
            4 => Rank::R5,
            5 => Rank::R6,
            6 => Rank::R7,
            7 => Rank::R8,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "rank index must be between 0 and 7");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..8).map(|x| unsafe { Self::from_index_unchecked(x) })
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(unsafe {
                Self::from_index_unchecked((u32::from(c) - u32::from('1')) as usize)
            }),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'1' + *self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Square on the board, addressed by row and column
///
/// Row 0 is the first rank and column 0 is the h-file. Shifting a square may move it
/// off the board; such squares are still valid values, but [`Square::on_board()`]
/// returns `false` for them and they must never be used to index a board.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Square {
    row: i8,
    col: i8,
}

impl Square {
    pub const fn of(row: i8, col: i8) -> Square {
        Square { row, col }
    }

    pub const fn from_parts(file: File, rank: Rank) -> Square {
        Square {
            row: rank as i8,
            col: file as i8,
        }
    }

    pub const fn from_index(val: usize) -> Square {
        assert!(val < 64, "square index must be between 0 and 63");
        Square {
            row: (val >> 3) as i8,
            col: (val & 7) as i8,
        }
    }

    pub const fn row(&self) -> i8 {
        self.row
    }

    pub const fn col(&self) -> i8 {
        self.col
    }

    pub const fn on_board(&self) -> bool {
        0 <= self.row && self.row < 8 && 0 <= self.col && self.col < 8
    }

    pub const fn index(&self) -> usize {
        assert!(self.on_board(), "square must be on board");
        ((self.row as usize) << 3) | self.col as usize
    }

    pub fn file(&self) -> Option<File> {
        match self.col {
            0..=7 => Some(File::from_index(self.col as usize)),
            _ => None,
        }
    }

    pub fn rank(&self) -> Option<Rank> {
        match self.row {
            0..=7 => Some(Rank::from_index(self.row as usize)),
            _ => None,
        }
    }

    pub const fn shift(self, delta_row: i8, delta_col: i8) -> Square {
        Square {
            row: self.row.wrapping_add(delta_row),
            col: self.col.wrapping_add(delta_col),
        }
    }

    pub const fn try_shift(self, delta_row: i8, delta_col: i8) -> Option<Square> {
        let res = self.shift(delta_row, delta_col);
        if res.on_board() {
            Some(res)
        } else {
            None
        }
    }

    /// Returns the square name like `"e4"`, or an empty string if the square is off the board
    pub fn name(&self) -> String {
        match (self.file(), self.rank()) {
            (Some(file), Some(rank)) => format!("{}{}", file.as_char(), rank.as_char()),
            _ => String::new(),
        }
    }

    pub fn from_name(s: &str) -> Result<Square, SquareParseError> {
        Square::from_str(s)
    }

    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..64).map(Square::from_index)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.on_board() {
            return write!(f, "Square({})", self.name());
        }
        write!(f, "Square(?{}, {})", self.row, self.col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (file_ch, rank_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file_ch), Some(rank_ch), None) => (file_ch, rank_ch),
            _ => return Err(SquareParseError::BadLength),
        };
        Ok(Square::from_parts(
            File::from_char(file_ch).ok_or(SquareParseError::UnexpectedFileChar(file_ch))?,
            Rank::from_char(rank_ch).ok_or(SquareParseError::UnexpectedRankChar(rank_ch))?,
        ))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Color::from_char(ch).ok_or(ColorParseError::UnexpectedChar(ch)),
            _ => Err(ColorParseError::BadLength),
        }
    }
}

/// Kind of a chess piece
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    pub fn iter() -> impl Iterator<Item = Self> {
        [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ]
        .into_iter()
    }

    /// Returns the upper-case letter used for this kind in algebraic notation
    pub fn as_char(&self) -> char {
        b"PNBRQK"[*self as usize] as char
    }

    /// Parses the upper-case letter of the piece kind
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Returns `true` if a pawn may be promoted into this kind
    pub const fn is_promotion_target(&self) -> bool {
        matches!(
            *self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Contents of a single square: either empty or a piece of some color and kind
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    pub const COUNT: usize = 13;

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_occupied(&self) -> bool {
        self.0 != 0
    }

    pub const fn from_parts(c: Color, k: PieceKind) -> Cell {
        Cell(match c {
            Color::White => 1 + k as u8,
            Color::Black => 7 + k as u8,
        })
    }

    pub const fn color(&self) -> Option<Color> {
        match self.0 {
            0 => None,
            1..=6 => Some(Color::White),
            _ => Some(Color::Black),
        }
    }

    pub const fn kind(&self) -> Option<PieceKind> {
        match self.0 {
            0 => None,
            1 | 7 => Some(PieceKind::Pawn),
            2 | 8 => Some(PieceKind::Knight),
            3 | 9 => Some(PieceKind::Bishop),
            4 | 10 => Some(PieceKind::Rook),
            5 | 11 => Some(PieceKind::Queen),
            _ => Some(PieceKind::King),
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(|x| Cell(x as u8))
    }

    pub fn as_char(&self) -> char {
        b".PNBRQKpnbrqk"[self.0 as usize] as char
    }

    pub fn as_utf8_char(&self) -> char {
        [
            '.', '♙', '♘', '♗', '♖', '♕', '♔', '♟', '♞', '♝', '♜', '♛', '♚',
        ][self.0 as usize]
    }

    pub fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Cell::EMPTY);
        }
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = PieceKind::from_char(c.to_ascii_uppercase())?;
        Some(Cell::from_parts(color, kind))
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Cell({})", self.as_char())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Cell {
    type Err = CellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Cell::from_char(ch).ok_or(CellParseError::UnexpectedChar(ch)),
            _ => Err(CellParseError::BadLength),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    Queen = 0,
    King = 1,
}
