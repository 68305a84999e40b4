use crate::types::{CastlingSide, Color, PieceKind};

/// Step on the grid, as `(delta_row, delta_col)`
pub type Delta = (i8, i8);

pub const KNIGHT_DIRS: [Delta; 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

pub const BISHOP_DIRS: [Delta; 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

pub const ROOK_DIRS: [Delta; 4] = [(1, 0), (0, 1), (0, -1), (-1, 0)];

pub const ROYAL_DIRS: [Delta; 8] = [
    (1, 1),
    (-1, 1),
    (-1, -1),
    (1, -1),
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, 0),
];

pub const WHITE_PAWN_DIRS: [Delta; 1] = [(1, 0)];

pub const BLACK_PAWN_DIRS: [Delta; 1] = [(-1, 0)];

/// Returns the fixed movement directions of the piece
///
/// Pawns only get their forward step here, as all the other pawn moves depend on the
/// position.
pub fn directions(kind: PieceKind, color: Color) -> &'static [Delta] {
    match kind {
        PieceKind::Pawn => match color {
            Color::White => &WHITE_PAWN_DIRS,
            Color::Black => &BLACK_PAWN_DIRS,
        },
        PieceKind::Knight => &KNIGHT_DIRS,
        PieceKind::Bishop => &BISHOP_DIRS,
        PieceKind::Rook => &ROOK_DIRS,
        PieceKind::Queen | PieceKind::King => &ROYAL_DIRS,
    }
}

/// Returns how many times a piece may repeat a single step in one move
pub const fn max_steps(kind: PieceKind) -> i8 {
    match kind {
        PieceKind::Pawn | PieceKind::Knight | PieceKind::King => 1,
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => 7,
    }
}

pub const fn pawn_forward(c: Color) -> i8 {
    match c {
        Color::White => 1,
        Color::Black => -1,
    }
}

pub const fn pawn_double_step(c: Color) -> Delta {
    (2 * pawn_forward(c), 0)
}

pub const fn pawn_captures(c: Color) -> [Delta; 2] {
    let fwd = pawn_forward(c);
    [(fwd, -1), (fwd, 1)]
}

/// Row on which a pawn of color `c` can capture en passant
pub const fn enpassant_src_row(c: Color) -> i8 {
    match c {
        Color::White => 4,
        Color::Black => 3,
    }
}

pub const fn back_row(c: Color) -> i8 {
    match c {
        Color::White => 0,
        Color::Black => 7,
    }
}

pub const fn promote_row(c: Color) -> i8 {
    back_row(c.inv())
}

pub const KING_START_COL: i8 = 3;

pub const fn castling_rook_col(s: CastlingSide) -> i8 {
    match s {
        CastlingSide::King => 0,
        CastlingSide::Queen => 7,
    }
}

pub const fn castling_king_dst_col(s: CastlingSide) -> i8 {
    match s {
        CastlingSide::King => KING_START_COL - 2,
        CastlingSide::Queen => KING_START_COL + 2,
    }
}

pub const fn castling_rook_dst_col(s: CastlingSide) -> i8 {
    match s {
        CastlingSide::King => castling_king_dst_col(s) + 1,
        CastlingSide::Queen => castling_king_dst_col(s) - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank, Square};

    #[test]
    fn test_castling_squares() {
        let row = back_row(Color::White);
        let king = |s| Square::of(row, castling_king_dst_col(s));
        let rook = |s| Square::of(row, castling_rook_dst_col(s));
        assert_eq!(
            Square::of(row, KING_START_COL),
            Square::from_parts(File::E, Rank::R1)
        );
        assert_eq!(
            Square::of(row, castling_rook_col(CastlingSide::King)),
            Square::from_parts(File::H, Rank::R1)
        );
        assert_eq!(
            Square::of(row, castling_rook_col(CastlingSide::Queen)),
            Square::from_parts(File::A, Rank::R1)
        );
        assert_eq!(king(CastlingSide::King).name(), "g1");
        assert_eq!(rook(CastlingSide::King).name(), "f1");
        assert_eq!(king(CastlingSide::Queen).name(), "c1");
        assert_eq!(rook(CastlingSide::Queen).name(), "d1");
    }

    #[test]
    fn test_directions() {
        assert_eq!(directions(PieceKind::Pawn, Color::White), &[(1, 0)]);
        assert_eq!(directions(PieceKind::Pawn, Color::Black), &[(-1, 0)]);
        assert_eq!(
            directions(PieceKind::Bishop, Color::White),
            &[(1, 1), (-1, 1), (-1, -1), (1, -1)]
        );
        assert_eq!(directions(PieceKind::King, Color::Black).len(), 8);
        assert_eq!(max_steps(PieceKind::King), 1);
        assert_eq!(max_steps(PieceKind::Queen), 7);
        assert_eq!(pawn_captures(Color::Black), [(-1, -1), (-1, 1)]);
        assert_eq!(pawn_double_step(Color::White), (2, 0));
    }
}
