//! # Chess game replay
//!
//! This crate plays chess games written in algebraic notation on a board and records
//! the position after each ply.
//!
//! Plies are parsed without looking at the board (see [`moves::Ply`]), then resolved
//! against the board by finding the only piece which can make them. Piece movement
//! follows the chess rules, but the legality of the resulting position is not checked.
//!
//! # Example
//!
//! ```
//! use chessreplay::{chain::Replay, Color};
//!
//! let mut replay = Replay::new_initial();
//! replay.push_movetext("1. e4 e5 2. Nf3 Nc6 3. Bb5 a6").unwrap();
//! assert_eq!(replay.len(), 6);
//! assert_eq!(replay.side(), Color::White);
//! assert_eq!(replay.frames()[6].label, "3... a6");
//! assert_eq!(
//!     replay.last().as_placement(),
//!     "r1bqkbnr/1ppp1ppp/p1n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R",
//! );
//! ```

pub mod board;
pub mod chain;
pub mod moves;
pub mod piece;

pub use chessreplay_base::{geometry, squareset, types};

pub use board::{Board, Setup, Snapshot};
pub use chain::Replay;
pub use moves::{Make, Ply};
pub use piece::{Piece, PieceId};
pub use squareset::SquareSet;
pub use types::{CastlingSide, Cell, Color, File, PieceKind, Rank, Square};
