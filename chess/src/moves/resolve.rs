//! Finding the piece which makes a ply

use super::ply::{Data, Ply};
use crate::board::Board;
use crate::geometry;
use crate::piece::PieceId;
use crate::types::{CastlingSide, Cell, Color, File, PieceKind, Rank, Square};

use arrayvec::ArrayVec;
use thiserror::Error;

/// Error resolving [`Ply`] on the board
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ResolveError {
    /// No piece can make the ply
    #[error("no legal move for {ply:?}")]
    NoLegalMove { ply: String },
    /// Several pieces can make the ply, and the disambiguation doesn't select exactly one
    #[error("ambiguous or invalid move {ply:?} ({candidates} candidates)")]
    AmbiguousOrInvalidMove { ply: String, candidates: usize },
}

/// What a ply does to the board
///
/// Values are created by [`plan()`] without touching the board, so the board stays intact
/// if the ply cannot be resolved.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Applied {
    /// Relocation of a single piece
    Move {
        /// Moving piece
        piece: PieceId,
        src: Square,
        dst: Square,
        /// Captured piece, if any
        captured: Option<Cell>,
        /// Square of the pawn captured en passant
        enpassant: Option<Square>,
        /// Kind of the piece which replaces the pawn, if any
        promote: Option<PieceKind>,
    },
    /// Castling, as two consecutive relocations
    Castling {
        side: CastlingSide,
        king: PieceId,
        rook: PieceId,
    },
}

type Candidates = ArrayVec<(PieceId, Square), 64>;

fn castling_squares(color: Color, side: CastlingSide) -> (Square, Square, Square, Square) {
    let row = geometry::back_row(color);
    (
        Square::of(row, geometry::KING_START_COL),
        Square::of(row, geometry::castling_king_dst_col(side)),
        Square::of(row, geometry::castling_rook_col(side)),
        Square::of(row, geometry::castling_rook_dst_col(side)),
    )
}

fn find(board: &Board, square: Square, color: Color, kind: PieceKind) -> Option<PieceId> {
    let id = board.piece_id_at(square)?;
    if board.piece(id).cell() != Cell::from_parts(color, kind) {
        return None;
    }
    Some(id)
}

fn candidates(board: &Board, color: Color, kind: PieceKind, dst: Square) -> Candidates {
    let ply = board.ply_count();
    board
        .pieces()
        .filter(|(_, piece)| {
            piece.color() == color
                && piece.kind() == kind
                && piece.possible_positions(board, ply).has(dst)
        })
        .map(|(id, piece)| (id, piece.square()))
        .collect()
}

fn disambiguate(
    candidates: &Candidates,
    file: Option<File>,
    rank: Option<Rank>,
) -> Option<(PieceId, Square)> {
    let matches = |src: &Square| match (file, rank) {
        (Some(file), Some(rank)) => *src == Square::from_parts(file, rank),
        (None, Some(rank)) => src.rank() == Some(rank),
        (Some(file), None) => src.file() == Some(file),
        (None, None) => false,
    };
    let mut found = candidates.iter().filter(|(_, src)| matches(src));
    match (found.next(), found.next()) {
        (Some(&res), None) => Some(res),
        _ => None,
    }
}

/// Finds out what the ply `ply` made by `color` does on `board`
///
/// The board is not modified.
pub fn plan(board: &Board, ply: &Ply, color: Color) -> Result<Applied, ResolveError> {
    match ply.data() {
        Data::Castling(side) => {
            let (king_src, _, rook_src, _) = castling_squares(color, side);
            let no_move = || ResolveError::NoLegalMove {
                ply: ply.raw().to_string(),
            };
            let king = find(board, king_src, color, PieceKind::King).ok_or_else(no_move)?;
            let rook = find(board, rook_src, color, PieceKind::Rook).ok_or_else(no_move)?;
            Ok(Applied::Castling { side, king, rook })
        }
        Data::Move {
            kind,
            file,
            rank,
            is_capture,
            dst,
            promote,
        } => {
            let candidates = candidates(board, color, kind, dst);
            let (piece, src) = match candidates.len() {
                0 => {
                    return Err(ResolveError::NoLegalMove {
                        ply: ply.raw().to_string(),
                    })
                }
                1 => candidates[0],
                len => disambiguate(&candidates, file, rank).ok_or_else(|| {
                    ResolveError::AmbiguousOrInvalidMove {
                        ply: ply.raw().to_string(),
                        candidates: len,
                    }
                })?,
            };

            // A capturing pawn which lands on an empty square takes en passant
            let enpassant = if is_capture
                && kind == PieceKind::Pawn
                && src.col() != dst.col()
                && board.is_free(dst)
            {
                Some(Square::of(src.row(), dst.col()))
            } else {
                None
            };
            let captured = match enpassant {
                Some(square) => board.get(square),
                None => board.get(dst),
            };
            Ok(Applied::Move {
                piece,
                src,
                dst,
                captured: captured.is_occupied().then_some(captured),
                enpassant,
                promote,
            })
        }
    }
}

/// Performs the changes described by `applied`, which must be planned on the same board
pub(crate) fn commit(board: &mut Board, applied: &Applied) {
    match *applied {
        Applied::Move {
            piece,
            dst,
            enpassant,
            promote,
            ..
        } => {
            board.move_piece(piece, dst);
            if let Some(square) = enpassant {
                board.remove(square);
            }
            if let Some(kind) = promote {
                let color = board.piece(piece).color();
                board.replace(dst, color, kind);
            }
        }
        Applied::Castling { side, king, rook } => {
            let color = board.piece(king).color();
            let (_, king_dst, _, rook_dst) = castling_squares(color, side);
            board.move_piece(king, king_dst);
            board.move_piece(rook, rook_dst);
        }
    }
}

/// Resolves the ply `ply` made by `color` and applies it to `board`
///
/// On error, the board is left untouched.
pub fn apply(board: &mut Board, ply: &Ply, color: Color) -> Result<Applied, ResolveError> {
    let applied = plan(board, ply, color)?;
    commit(board, &applied);
    Ok(applied)
}
