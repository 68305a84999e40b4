//! Board and related things

use crate::moves::{Applied, Make, PlyError, San};
use crate::piece::{Piece, PieceId};
use crate::types::{self, Cell, Color, File, PieceKind, Rank, Square};

use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing the piece placement (i.e. the first part of FEN)
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PlacementParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Error parsing [`Setup`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    /// FEN doesn't have board part
    #[error("board not specified")]
    NoBoard,
    /// Error parsing board from FEN
    #[error("bad board: {0}")]
    Board(#[from] PlacementParseError),
    /// Error parsing move side from FEN
    #[error("bad move side: {0}")]
    MoveSide(#[from] types::ColorParseError),
    /// Error parsing move number
    #[error("bad move number: {0}")]
    MoveNumber(ParseIntError),
    /// FEN contains extra data
    #[error("extra data in FEN")]
    ExtraData,
}

/// Starting position read from FEN
///
/// Only the piece placement, the side to move and the move number are taken into
/// account. Castling rights, enpassant square and move counter are accepted but
/// ignored, as they are derived from piece histories during the replay.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Setup {
    pub cells: [Cell; 64],
    pub side: Color,
    pub move_number: u16,
}

impl Setup {
    /// Returns the standard initial position
    pub fn initial() -> Setup {
        Setup {
            cells: INITIAL_CELLS,
            side: Color::White,
            move_number: 1,
        }
    }

    /// Parses the position from FEN
    ///
    /// All the fields except the piece placement are optional. Missing side defaults
    /// to White, and missing move number defaults to 1.
    pub fn from_fen(s: &str) -> Result<Setup, FenParseError> {
        type Error = FenParseError;

        let mut iter = s.split_ascii_whitespace().fuse();

        let cells = parse_cells(iter.next().ok_or(Error::NoBoard)?)?;
        let side = match iter.next() {
            Some(s) => Color::from_str(s)?,
            None => Color::White,
        };
        let _castling = iter.next();
        let _enpassant = iter.next();
        let _move_counter = iter.next();
        let move_number = match iter.next() {
            Some(s) => u16::from_str(s).map_err(Error::MoveNumber)?,
            None => 1,
        };

        if iter.next().is_some() {
            return Err(Error::ExtraData);
        }

        Ok(Setup {
            cells,
            side,
            move_number,
        })
    }

    #[inline]
    pub fn to_board(&self) -> Board {
        Board::from_cells(&self.cells)
    }
}

impl FromStr for Setup {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Setup, Self::Err> {
        Setup::from_fen(s)
    }
}

const INITIAL_CELLS: [Cell; 64] = {
    use Color::*;
    use PieceKind::*;

    let back = [Rook, Knight, Bishop, King, Queen, Bishop, Knight, Rook];
    let mut cells = [Cell::EMPTY; 64];
    let mut col = 0;
    while col < 8 {
        cells[col] = Cell::from_parts(White, back[col]);
        cells[8 + col] = Cell::from_parts(White, Pawn);
        cells[48 + col] = Cell::from_parts(Black, Pawn);
        cells[56 + col] = Cell::from_parts(Black, back[col]);
        col += 1;
    }
    cells
};

/// Chess board
///
/// The board owns an arena of [`Piece`]s and a grid which refers to them by [`PieceId`].
/// Captured pieces leave the grid, but stay in the arena with their full history.
///
/// The board doesn't know whose move it is. Also, no chess rules are enforced beyond
/// piece movement: kings may be left in check, and castling doesn't verify that the
/// king and the rook have never moved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [Option<PieceId>; 64],
    pieces: Vec<Piece>,
    ply_count: u32,
}

impl Board {
    /// Creates a board without any pieces
    pub fn empty() -> Board {
        Board {
            grid: [None; 64],
            pieces: Vec::new(),
            ply_count: 0,
        }
    }

    /// Returns the standard initial position
    pub fn initial() -> Board {
        Board::from_cells(&INITIAL_CELLS)
    }

    /// Creates a board from the cells
    ///
    /// Pieces are put into the arena in the order of square indices.
    pub fn from_cells(cells: &[Cell; 64]) -> Board {
        let mut res = Board::empty();
        for square in Square::iter() {
            let cell = cells[square.index()];
            if let (Some(color), Some(kind)) = (cell.color(), cell.kind()) {
                res.insert(Piece::new(color, kind, square));
            }
        }
        res
    }

    /// Creates a board from the FEN piece placement, like `"8/8/8/8/8/8/8/R3K2R"`
    pub fn from_placement(s: &str) -> Result<Board, PlacementParseError> {
        Ok(Board::from_cells(&parse_cells(s)?))
    }

    /// Creates a board from FEN
    ///
    /// Side to move and move number are dropped; use [`Setup::from_fen()`] to get them.
    pub fn from_fen(s: &str) -> Result<Board, FenParseError> {
        Ok(Setup::from_fen(s)?.to_board())
    }

    /// Returns the number of relocations made on the board so far
    #[inline]
    pub fn ply_count(&self) -> u32 {
        self.ply_count
    }

    /// Returns the piece with identifier `id`
    ///
    /// # Panics
    ///
    /// The function panics if `id` doesn't belong to this board.
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// Returns all the pieces ever placed on the board, including captured ones
    #[inline]
    pub fn arena(&self) -> &[Piece] {
        &self.pieces
    }

    /// Returns the identifier of the piece standing on `square`
    ///
    /// # Panics
    ///
    /// The function panics if `square` is off the board.
    #[inline]
    pub fn piece_id_at(&self, square: Square) -> Option<PieceId> {
        self.grid[square.index()]
    }

    /// Returns the piece standing on `square`
    ///
    /// # Panics
    ///
    /// The function panics if `square` is off the board.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.piece_id_at(square).map(|id| self.piece(id))
    }

    #[inline]
    pub fn is_free(&self, square: Square) -> bool {
        self.piece_id_at(square).is_none()
    }

    /// Returns the contents of `square`
    #[inline]
    pub fn get(&self, square: Square) -> Cell {
        self.piece_at(square).map_or(Cell::EMPTY, Piece::cell)
    }

    /// Returns the contents of the square with the given file and rank
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.get(Square::from_parts(file, rank))
    }

    /// Iterates over the pieces standing on the board, in the order of square indices
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.grid
            .iter()
            .filter_map(move |&id| id.map(|id| (id, self.piece(id))))
    }

    /// Makes a deep copy of the occupancy
    pub fn snapshot(&self) -> Snapshot {
        let mut cells = [Cell::EMPTY; 64];
        for (_, piece) in self.pieces() {
            cells[piece.square().index()] = piece.cell();
        }
        Snapshot { cells }
    }

    /// Formats the piece placement part of FEN
    pub fn as_placement(&self) -> String {
        self.snapshot().as_placement()
    }

    /// Parses the ply `s` for the side `color` and applies it to a copy of the board
    ///
    /// The board itself is left untouched.
    pub fn make_ply(&self, s: &str, color: Color) -> Result<Board, PlyError> {
        San(s, color).make(self)
    }

    /// Parses the ply `s` for the side `color` and applies it in place
    ///
    /// On error, the board is left untouched.
    pub fn apply_ply(&mut self, s: &str, color: Color) -> Result<Applied, PlyError> {
        San(s, color).make_raw(self)
    }

    fn insert(&mut self, piece: Piece) -> PieceId {
        let id = PieceId(self.pieces.len() as u16);
        self.grid[piece.square().index()] = Some(id);
        self.pieces.push(piece);
        id
    }

    /// Relocates the piece `id` to `dst`, capturing anything that stands there
    pub(crate) fn move_piece(&mut self, id: PieceId, dst: Square) {
        self.ply_count += 1;
        let src = self.piece(id).square();
        self.grid[src.index()] = None;
        self.grid[dst.index()] = Some(id);
        self.pieces[id.index()].relocate(dst, self.ply_count);
    }

    /// Removes the piece standing on `square` from the grid
    pub(crate) fn remove(&mut self, square: Square) -> Option<PieceId> {
        self.grid[square.index()].take()
    }

    /// Puts a fresh piece on `square`, dropping whatever stood there from the grid
    pub(crate) fn replace(&mut self, square: Square, color: Color, kind: PieceKind) -> PieceId {
        self.insert(Piece::new(color, kind, square))
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::initial()
    }
}

impl FromStr for Board {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        Board::from_fen(s)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.snapshot().fmt(f)
    }
}

/// Immutable copy of the board occupancy
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot {
    cells: [Cell; 64],
}

impl Snapshot {
    #[inline]
    pub fn cells(&self) -> &[Cell; 64] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, square: Square) -> Cell {
        self.cells[square.index()]
    }

    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.get(Square::from_parts(file, rank))
    }

    /// Formats the piece placement part of FEN
    pub fn as_placement(&self) -> String {
        self.to_string()
    }

    /// Wraps the snapshot to allow pretty-printing with the given style `Style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use chessreplay::{Board, board::PrettyStyle};
    /// #
    /// let s = Board::initial().snapshot();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    ///  |abcdefgh
    /// "#;
    /// assert_eq!(s.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { snap: self, style }
    }
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        format_cells(&self.cells, f)
    }
}

/// Style for [`Snapshot::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the snapshot
///
/// See docs for [`Snapshot::pretty()`] for more details.
pub struct Pretty<'a> {
    snap: &'a Snapshot,
    style: PrettyStyle,
}

fn parse_cells(s: &str) -> Result<[Cell; 64], PlacementParseError> {
    type Error = PlacementParseError;

    // Placement goes from the eighth rank to the first, each rank from the a-file
    let mut files = 0_usize;
    let mut ranks = 0_usize;
    let mut cells = [Cell::EMPTY; 64];
    let rank_at = |ranks: usize| Rank::from_index(7 - ranks);
    for c in s.chars() {
        match c {
            '1'..='8' => {
                let add = (c as u8 - b'0') as usize;
                if files + add > 8 {
                    return Err(Error::RankOverflow(rank_at(ranks)));
                }
                files += add;
            }
            '/' => {
                if files < 8 {
                    return Err(Error::RankUnderflow(rank_at(ranks)));
                }
                ranks += 1;
                files = 0;
                if ranks >= 8 {
                    return Err(Error::Overflow);
                }
            }
            _ => {
                if files >= 8 {
                    return Err(Error::RankOverflow(rank_at(ranks)));
                }
                let cell = match c {
                    '.' => None,
                    _ => Cell::from_char(c),
                };
                let square = Square::of(7 - ranks as i8, 7 - files as i8);
                cells[square.index()] = cell.ok_or(Error::UnexpectedChar(c))?;
                files += 1;
            }
        };
    }

    if files < 8 {
        return Err(Error::RankUnderflow(rank_at(ranks)));
    }
    if ranks < 7 {
        return Err(Error::Underflow);
    }

    Ok(cells)
}

fn format_cells(cells: &[Cell; 64], f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
    for rank in Rank::iter().rev() {
        if rank != Rank::R8 {
            write!(f, "/")?;
        }
        let mut empty = 0;
        for file in File::iter().rev() {
            let cell = cells[Square::from_parts(file, rank).index()];
            if cell.is_empty() {
                empty += 1;
                continue;
            }
            if empty != 0 {
                write!(f, "{}", (b'0' + empty) as char)?;
                empty = 0;
            }
            write!(f, "{}", cell)?;
        }
        if empty != 0 {
            write!(f, "{}", (b'0' + empty) as char)?;
        }
    }
    Ok(())
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;

    fn cell(c: Cell) -> char;

    fn fmt(s: &Snapshot, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter().rev() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter().rev() {
                write!(f, "{}", Self::cell(s.get2(file, rank)))?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, " {}", Self::VERT_FRAME)?;
        for file in File::iter().rev() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';

    fn cell(c: Cell) -> char {
        c.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';

    fn cell(c: Cell) -> char {
        c.as_utf8_char()
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.snap, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.snap, f),
        }
    }
}

/// Checks that the grid and the arena agree with each other
#[cfg(test)]
pub(crate) fn assert_consistent(board: &Board) {
    for square in Square::iter() {
        if let Some(id) = board.piece_id_at(square) {
            assert_eq!(board.piece(id).square(), square);
        }
    }
    let mut seen = std::collections::HashSet::new();
    for (id, _) in board.pieces() {
        assert!(seen.insert(id), "piece {:?} is on the grid twice", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_name(name).unwrap()
    }

    #[test]
    fn test_initial() {
        let board = Board::initial();
        assert_eq!(
            board.as_placement(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.arena().len(), 32);
        assert_eq!(board.ply_count(), 0);
        assert_eq!(
            board.get(sq("e1")),
            Cell::from_parts(Color::White, PieceKind::King)
        );
        assert_eq!(
            board.get(sq("d8")),
            Cell::from_parts(Color::Black, PieceKind::Queen)
        );
        assert_eq!(board.get(sq("e4")), Cell::EMPTY);
        assert_consistent(&board);
    }

    #[test]
    fn test_placement() {
        for placement in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "r3k2r/8/8/8/8/8/8/R3K2R",
            "8/4P3/8/8/8/8/8/4k2K",
            "8/8/8/8/8/8/8/8",
            "1n4N1/8/2p5/8/3Pp3/8/8/7K",
        ] {
            let board = Board::from_placement(placement).unwrap();
            assert_eq!(board.as_placement(), placement);
            assert_consistent(&board);
        }
        let board = Board::from_placement("1n4N1/8/8/8/8/8/8/8").unwrap();
        assert_eq!(
            board.get(sq("b8")),
            Cell::from_parts(Color::Black, PieceKind::Knight)
        );
        assert_eq!(
            board.get(sq("g8")),
            Cell::from_parts(Color::White, PieceKind::Knight)
        );
    }

    #[test]
    fn test_placement_errors() {
        assert_eq!(
            Board::from_placement("9/8/8/8/8/8/8/8"),
            Err(PlacementParseError::UnexpectedChar('9'))
        );
        assert_eq!(
            Board::from_placement("8/8/8/8/8/8/8/7"),
            Err(PlacementParseError::RankUnderflow(Rank::R1))
        );
        assert_eq!(
            Board::from_placement("8/44p/8/8/8/8/8/8"),
            Err(PlacementParseError::RankOverflow(Rank::R7))
        );
        assert_eq!(
            Board::from_placement("8/8/8/8/8/8/8"),
            Err(PlacementParseError::Underflow)
        );
        assert_eq!(
            Board::from_placement("8/8/8/8/8/8/8/8/8"),
            Err(PlacementParseError::Overflow)
        );
        assert_eq!(
            Board::from_placement("8/8/8/8/3x4/8/8/8"),
            Err(PlacementParseError::UnexpectedChar('x'))
        );
        assert_eq!(
            Board::from_placement("8/8/8/8/3.4/8/8/8"),
            Err(PlacementParseError::UnexpectedChar('.'))
        );
    }

    #[test]
    fn test_fen() {
        let setup =
            Setup::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();
        assert_eq!(setup.side, Color::Black);
        assert_eq!(setup.move_number, 1);
        assert_eq!(
            setup.to_board().get(sq("e4")),
            Cell::from_parts(Color::White, PieceKind::Pawn)
        );

        let setup = Setup::from_fen("8/8/8/8/8/8/8/4K3 w - - 10 42").unwrap();
        assert_eq!(setup.side, Color::White);
        assert_eq!(setup.move_number, 42);

        let setup = Setup::from_fen("8/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(setup.side, Color::White);
        assert_eq!(setup.move_number, 1);

        assert_eq!(Setup::from_fen(""), Err(FenParseError::NoBoard));
        assert!(matches!(
            Setup::from_fen("8/8/8/8/8/8/8/4K3 x"),
            Err(FenParseError::MoveSide(_))
        ));
        assert!(matches!(
            Setup::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 z"),
            Err(FenParseError::MoveNumber(_))
        ));
        assert_eq!(
            Setup::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1 junk"),
            Err(FenParseError::ExtraData)
        );
        assert!(matches!(
            Board::from_fen("8/8/8/8/8/8/8/4K w - - 0 1"),
            Err(FenParseError::Board(PlacementParseError::RankUnderflow(
                Rank::R1
            )))
        ));
        assert_eq!(
            Board::from_str("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
                .unwrap()
                .as_placement(),
            "r3k2r/8/8/8/8/8/8/R3K2R"
        );
    }

    #[test]
    fn test_relocate() {
        let mut board = Board::initial();
        let pawn = board.piece_id_at(sq("e2")).unwrap();
        board.move_piece(pawn, sq("e4"));
        assert_eq!(board.ply_count(), 1);
        assert!(board.is_free(sq("e2")));
        assert_eq!(board.piece_id_at(sq("e4")), Some(pawn));
        assert_eq!(board.piece(pawn).history(), &[(0, sq("e2")), (1, sq("e4"))]);
        assert_consistent(&board);

        let knight = board.piece_id_at(sq("g8")).unwrap();
        board.move_piece(knight, sq("f6"));
        board.move_piece(knight, sq("e4"));
        assert_eq!(board.ply_count(), 3);
        assert_eq!(board.piece_id_at(sq("e4")), Some(knight));
        assert_eq!(board.pieces().count(), 31);
        assert_eq!(board.arena().len(), 32);
        assert_eq!(board.piece(pawn).square(), sq("e4"));
        assert_consistent(&board);
    }

    #[test]
    fn test_replace() {
        let mut board = Board::from_placement("8/4P3/8/8/8/8/8/8").unwrap();
        let pawn = board.piece_id_at(sq("e7")).unwrap();
        board.move_piece(pawn, sq("e8"));
        let queen = board.replace(sq("e8"), Color::White, PieceKind::Queen);
        assert_ne!(queen, pawn);
        let piece = board.piece(queen);
        assert_eq!(piece.cell(), Cell::from_parts(Color::White, PieceKind::Queen));
        assert_eq!(piece.history(), &[(0, sq("e8"))]);
        assert_eq!(board.arena().len(), 2);
        assert_eq!(board.pieces().count(), 1);
        assert_consistent(&board);

        assert_eq!(board.remove(sq("e8")), Some(queen));
        assert_eq!(board.remove(sq("e8")), None);
        assert_eq!(board.pieces().count(), 0);
    }

    #[test]
    fn test_snapshot_is_copy() {
        let mut board = Board::initial();
        let snap = board.snapshot();
        let pawn = board.piece_id_at(sq("d2")).unwrap();
        board.move_piece(pawn, sq("d4"));
        assert_eq!(snap, Board::initial().snapshot());
        assert_eq!(
            snap.get(sq("d2")),
            Cell::from_parts(Color::White, PieceKind::Pawn)
        );
        assert_eq!(board.snapshot().get(sq("d2")), Cell::EMPTY);
    }

    #[test]
    fn test_pretty() {
        let snap = Board::from_placement("8/4P3/8/8/8/8/8/4k2K")
            .unwrap()
            .snapshot();
        let res = r#"
8|........
7|....P...
6|........
5|........
4|........
3|........
2|........
1|....k..K
-+--------
 |abcdefgh
"#;
        assert_eq!(
            snap.pretty(PrettyStyle::Ascii).to_string(),
            res.trim_start()
        );

        let res = r#"
8│........
7│....♙...
6│........
5│........
4│........
3│........
2│........
1│....♚..♔
─┼────────
 │abcdefgh
"#;
        assert_eq!(snap.pretty(PrettyStyle::Utf8).to_string(), res.trim_start());
    }
}
