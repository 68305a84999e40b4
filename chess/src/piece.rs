//! Pieces and their reachable squares

use crate::board::Board;
use crate::geometry::{self, Delta};
use crate::squareset::SquareSet;
use crate::types::{Cell, Color, PieceKind, Square};

use arrayvec::ArrayVec;

/// Index of the piece inside the [`Board`] that owns it
///
/// Identifiers are stable for the whole lifetime of the board: a piece keeps its identifier
/// after being captured, and a promoted piece gets a new one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(pub(crate) u16);

impl PieceId {
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Directions which a pawn gains from the current position
///
/// There are at most three of them: the double step and the two diagonals.
pub type SituationalDirections = ArrayVec<Delta, 4>;

/// Chess piece with its occupancy history
///
/// The history lists every square the piece has stood on, together with the ply counter
/// of the board at the moment the piece arrived there. It always starts with the initial
/// square at ply `0`, and its last entry is the current square of the piece.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    history: Vec<(u32, Square)>,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind, square: Square) -> Piece {
        Piece {
            color,
            kind,
            history: vec![(0, square)],
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn cell(&self) -> Cell {
        Cell::from_parts(self.color, self.kind)
    }

    /// Returns the square where the piece stands now
    #[inline]
    pub fn square(&self) -> Square {
        self.history[self.history.len() - 1].1
    }

    #[inline]
    pub fn history(&self) -> &[(u32, Square)] {
        &self.history
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.history.len() > 1
    }

    #[inline]
    pub fn move_directions(&self) -> &'static [Delta] {
        geometry::directions(self.kind, self.color)
    }

    pub(crate) fn relocate(&mut self, square: Square, ply: u32) {
        self.history.push((ply, square));
    }

    /// Returns `true` if the piece is a pawn which made a double step exactly at ply `ply`
    fn just_double_stepped(&self, ply: u32) -> bool {
        self.kind == PieceKind::Pawn && self.history.len() == 2 && self.history[1].0 == ply
    }

    /// Returns the directions a pawn gains from the position on `board`
    ///
    /// These are the double step from an unmoved pawn with a free square ahead, the
    /// diagonal captures, and the en passant captures of a pawn which has just made its
    /// first move at ply `ply`. Other pieces have no situational directions.
    pub fn situational_directions(&self, board: &Board, ply: u32) -> SituationalDirections {
        let mut res = SituationalDirections::new();
        if self.kind != PieceKind::Pawn {
            return res;
        }
        let square = self.square();

        let ahead = square.shift(geometry::pawn_forward(self.color), 0);
        if !self.has_moved() && ahead.on_board() && board.is_free(ahead) {
            res.push(geometry::pawn_double_step(self.color));
        }

        let captures = geometry::pawn_captures(self.color);
        for (d_row, d_col) in captures {
            let target = square.shift(d_row, d_col);
            if !target.on_board() {
                continue;
            }
            if let Some(other) = board.piece_at(target) {
                if other.color != self.color {
                    res.push((d_row, d_col));
                }
            }
        }

        if square.row() != geometry::enpassant_src_row(self.color) {
            return res;
        }
        for (d_row, d_col) in captures {
            // The victim stands beside the pawn, not on the diagonal
            let beside = square.shift(0, d_col);
            if !beside.on_board() {
                continue;
            }
            let other = match board.piece_at(beside) {
                Some(other) => other,
                None => continue,
            };
            if other.color != self.color
                && other.just_double_stepped(ply)
                && !res.contains(&(d_row, d_col))
            {
                res.push((d_row, d_col));
            }
        }

        res
    }

    /// Returns all the squares the piece can reach on `board` at ply `ply`
    ///
    /// Sliding stops at the first occupied square, which is included only when it holds
    /// an opponent's piece. Pawns never capture along their own file.
    pub fn possible_positions(&self, board: &Board, ply: u32) -> SquareSet {
        let square = self.square();
        let max_steps = geometry::max_steps(self.kind);
        let situational = self.situational_directions(board, ply);

        let mut res = SquareSet::EMPTY;
        for &(d_row, d_col) in self.move_directions().iter().chain(situational.iter()) {
            let mut target = square;
            for _ in 0..max_steps {
                target = target.shift(d_row, d_col);
                if !target.on_board() {
                    break;
                }
                match board.piece_at(target) {
                    None => res.set(target),
                    Some(other) if other.color != self.color => {
                        if self.kind != PieceKind::Pawn || target.col() != square.col() {
                            res.set(target);
                        }
                        break;
                    }
                    Some(_) => break,
                }
            }
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn sq(name: &str) -> Square {
        Square::from_name(name).unwrap()
    }

    fn positions(board: &Board, name: &str) -> SquareSet {
        let piece = board.piece_at(sq(name)).unwrap();
        piece.possible_positions(board, board.ply_count())
    }

    #[test]
    fn test_new() {
        let piece = Piece::new(Color::Black, PieceKind::Pawn, sq("h1"));
        assert_eq!(piece.color(), Color::Black);
        assert_eq!(piece.cell(), Cell::from_parts(Color::Black, PieceKind::Pawn));
        assert_eq!(piece.square(), sq("h1"));
        assert_eq!(piece.history(), &[(0, sq("h1"))]);
        assert!(!piece.has_moved());
        assert_eq!(piece.move_directions(), &[(-1, 0)]);
    }

    #[test]
    fn test_relocate() {
        let mut piece = Piece::new(Color::White, PieceKind::Pawn, sq("h1"));
        piece.relocate(sq("h2"), 1);
        assert!(piece.has_moved());
        assert_eq!(piece.square(), sq("h2"));
        assert_eq!(piece.history().last(), Some(&(1, sq("h2"))));
    }

    #[test]
    fn test_no_situational_for_pieces() {
        let board = Board::from_placement("8/8/8/8/8/8/8/N7").unwrap();
        let knight = board.piece_at(sq("a1")).unwrap();
        assert!(knight.situational_directions(&board, 1).is_empty());
    }

    #[test]
    fn test_knight() {
        let board = Board::from_placement("8/8/8/8/3N4/8/8/8").unwrap();
        assert_eq!(positions(&board, "d4").len(), 8);
        let board = Board::from_placement("8/8/8/8/8/8/8/N7").unwrap();
        let set = positions(&board, "a1");
        assert_eq!(set.len(), 2);
        assert!(set.has(sq("b3")));
        assert!(set.has(sq("c2")));
    }

    #[test]
    fn test_rook_corner() {
        for (placement, name) in [
            ("8/8/8/8/8/8/8/R7", "a1"),
            ("7R/8/8/8/8/8/8/8", "h8"),
            ("8/8/8/8/8/8/8/7r", "h1"),
        ] {
            let board = Board::from_placement(placement).unwrap();
            assert_eq!(positions(&board, name).len(), 14);
        }
    }

    #[test]
    fn test_sliding_blocked() {
        let board = Board::from_placement("8/8/8/8/1p6/8/8/R1B5").unwrap();
        let set = positions(&board, "a1");
        assert!(set.has(sq("b1")));
        assert!(!set.has(sq("c1")));
        assert!(!set.has(sq("d1")));
        assert_eq!(set.len(), 8);

        let bishop = positions(&board, "c1");
        assert!(bishop.has(sq("a3")));
        assert!(bishop.has(sq("h6")));
        assert_eq!(bishop.len(), 7);
    }

    #[test]
    fn test_queen_and_king() {
        let board = Board::from_placement("8/8/8/8/3Q4/8/8/7K").unwrap();
        assert_eq!(positions(&board, "d4").len(), 27);
        assert_eq!(positions(&board, "h1").len(), 3);
    }

    #[test]
    fn test_pawn_initial() {
        let board = Board::initial();
        let set = positions(&board, "e2");
        assert_eq!(set, SquareSet::EMPTY.with(sq("e3")).with(sq("e4")));
        let set = positions(&board, "d7");
        assert_eq!(set, SquareSet::EMPTY.with(sq("d6")).with(sq("d5")));
        assert_eq!(positions(&board, "g1").len(), 2);
        assert!(positions(&board, "a1").is_empty());
    }

    #[test]
    fn test_pawn_blocked() {
        let board = Board::from_placement("8/8/8/8/8/4n3/4P3/8").unwrap();
        assert!(positions(&board, "e2").is_empty());
        let board = Board::from_placement("8/8/8/8/4n3/8/4P3/8").unwrap();
        assert_eq!(positions(&board, "e2"), SquareSet::from_square(sq("e3")));
    }

    #[test]
    fn test_pawn_captures() {
        let board = Board::from_placement("8/8/8/8/8/3n1B2/4P3/8").unwrap();
        let pawn = board.piece_at(sq("e2")).unwrap();
        assert_eq!(pawn.situational_directions(&board, 0).as_slice(), &[(2, 0), (1, 1)]);
        let set = positions(&board, "e2");
        assert_eq!(
            set,
            SquareSet::EMPTY
                .with(sq("e3"))
                .with(sq("e4"))
                .with(sq("d3"))
        );
    }

    fn advance(board: &mut Board, src: &str, dst: &str) {
        let id = board.piece_id_at(sq(src)).unwrap();
        board.move_piece(id, sq(dst));
    }

    #[test]
    fn test_en_passant() {
        let mut board = Board::from_placement("8/3p4/8/8/4P3/8/8/8").unwrap();
        advance(&mut board, "e4", "e5");
        advance(&mut board, "d7", "d5");
        let white = board.piece_at(sq("e5")).unwrap();
        assert_eq!(
            white.situational_directions(&board, board.ply_count()).as_slice(),
            &[(1, 1)]
        );
        let set = positions(&board, "e5");
        assert_eq!(set, SquareSet::EMPTY.with(sq("e6")).with(sq("d6")));

        // The window closes after the next ply
        assert!(!white
            .possible_positions(&board, board.ply_count() + 1)
            .has(sq("d6")));
    }

    #[test]
    fn test_en_passant_black() {
        let mut board = Board::from_placement("8/8/8/8/3p4/8/4P3/8").unwrap();
        advance(&mut board, "e2", "e4");
        let black = board.piece_at(sq("d4")).unwrap();
        assert_eq!(
            black.situational_directions(&board, board.ply_count()).as_slice(),
            &[(-2, 0), (-1, -1)]
        );
        let set = positions(&board, "d4");
        assert_eq!(
            set,
            SquareSet::EMPTY
                .with(sq("d3"))
                .with(sq("d2"))
                .with(sq("e3"))
        );
    }

    #[test]
    fn test_en_passant_history() {
        // Only the number of moves matters, not their length
        let mut board = Board::from_placement("8/8/3p4/8/4P3/8/8/8").unwrap();
        advance(&mut board, "e4", "e5");
        advance(&mut board, "d6", "d5");
        assert!(positions(&board, "e5").has(sq("d6")));

        let mut board = Board::from_placement("8/3p4/8/8/4P3/8/8/8").unwrap();
        advance(&mut board, "e4", "e5");
        advance(&mut board, "d7", "d6");
        advance(&mut board, "d6", "d5");
        assert!(!positions(&board, "e5").has(sq("d6")));
    }

    #[test]
    fn test_no_en_passant_on_wrong_row() {
        let mut board = Board::from_placement("8/8/8/8/3p4/8/4P3/8").unwrap();
        advance(&mut board, "e2", "e3");
        advance(&mut board, "d4", "d3");
        let white = board.piece_at(sq("e3")).unwrap();
        assert!(white
            .situational_directions(&board, board.ply_count())
            .is_empty());
    }
}
