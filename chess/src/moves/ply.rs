//! Parsing plies written in algebraic notation

use crate::types::{CastlingSide, File, PieceKind, Rank, Square, SquareParseError};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Reason why a ply string cannot be parsed
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawParseError {
    /// String is empty
    #[error("string is empty")]
    EmptyString,
    /// String contains non-ASCII characters
    #[error("non-ASCII data")]
    NonAscii,
    /// String is too short to contain the destination
    #[error("no destination cell")]
    TooShort,
    /// Destination cell is invalid
    #[error("invalid destination cell: {0}")]
    InvalidDst(#[from] SquareParseError),
    /// Promotion to a piece which is not allowed
    #[error("cannot promote to {0:?}")]
    BadPromotion(char),
    /// Promotion of a piece which is not a pawn
    #[error("only pawns can be promoted")]
    NonPawnPromotion,
    /// Parsing failed for unspecified reasons
    #[error("syntax error")]
    Syntax,
}

/// Error parsing [`Ply`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("unrecognised ply {ply:?}: {reason}")]
    UnrecognisedPly {
        /// Original string
        ply: String,
        /// Why it was rejected
        #[source]
        reason: RawParseError,
    },
}

/// Parsed ply, without check mark and annotations
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Data {
    /// Castling
    Castling(CastlingSide),
    /// Any other move
    Move {
        /// Kind of the moving piece
        kind: PieceKind,
        /// Source file, if specified
        file: Option<File>,
        /// Source rank, if specified
        rank: Option<Rank>,
        /// Is the move marked as capture?
        is_capture: bool,
        /// Destination square
        dst: Square,
        /// Piece to promote, if any
        promote: Option<PieceKind>,
    },
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Self::Castling(CastlingSide::King) => write!(f, "O-O"),
            Self::Castling(CastlingSide::Queen) => write!(f, "O-O-O"),
            Self::Move {
                kind,
                file,
                rank,
                is_capture,
                dst,
                promote,
            } => {
                if kind != PieceKind::Pawn {
                    write!(f, "{}", kind.as_char())?;
                }
                if let Some(file) = file {
                    write!(f, "{}", file.as_char())?;
                }
                if let Some(rank) = rank {
                    write!(f, "{}", rank.as_char())?;
                }
                if is_capture {
                    write!(f, "x")?;
                }
                write!(f, "{}", dst)?;
                if let Some(promote) = promote {
                    write!(f, "={}", promote.as_char())?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for Data {
    type Err = RawParseError;

    fn from_str(data: &str) -> Result<Data, Self::Err> {
        if data == "O-O" || data == "0-0" {
            return Ok(Self::Castling(CastlingSide::King));
        }
        if data == "O-O-O" || data == "0-0-0" {
            return Ok(Self::Castling(CastlingSide::Queen));
        }
        if data.is_empty() {
            return Err(RawParseError::EmptyString);
        }
        // All the slicing below relies on one byte per char
        if !data.is_ascii() {
            return Err(RawParseError::NonAscii);
        }

        let (kind, rest) = match data.as_bytes()[0] {
            b'N' => (PieceKind::Knight, &data[1..]),
            b'B' => (PieceKind::Bishop, &data[1..]),
            b'R' => (PieceKind::Rook, &data[1..]),
            b'Q' => (PieceKind::Queen, &data[1..]),
            b'K' => (PieceKind::King, &data[1..]),
            _ => (PieceKind::Pawn, data),
        };

        let (promote, rest) = match *rest.as_bytes() {
            [.., b'=', p] => {
                let promote = PieceKind::from_char(p as char)
                    .filter(PieceKind::is_promotion_target)
                    .ok_or(RawParseError::BadPromotion(p as char))?;
                (Some(promote), &rest[..rest.len() - 2])
            }
            _ => (None, rest),
        };
        if promote.is_some() && kind != PieceKind::Pawn {
            return Err(RawParseError::NonPawnPromotion);
        }

        if rest.len() < 2 {
            return Err(RawParseError::TooShort);
        }
        let (rest, dst) = rest.split_at(rest.len() - 2);
        let dst = Square::from_str(dst)?;

        let (is_capture, rest) = match rest.strip_suffix('x') {
            Some(rest) => (true, rest),
            None => (false, rest),
        };
        let (file, rest) = match rest.as_bytes().first() {
            Some(&b @ b'a'..=b'h') => (File::from_char(b as char), &rest[1..]),
            _ => (None, rest),
        };
        let (rank, rest) = match rest.as_bytes().first() {
            Some(&b @ b'1'..=b'8') => (Rank::from_char(b as char), &rest[1..]),
            _ => (None, rest),
        };
        if !rest.is_empty() {
            return Err(RawParseError::Syntax);
        }

        Ok(Data::Move {
            kind,
            file,
            rank,
            is_capture,
            dst,
            promote,
        })
    }
}

/// Check indication
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CheckMark {
    /// Check (a.k.a. "+")
    Single,
    /// Double check (a.k.a "++")
    Double,
    /// Checkmate (a.k.a "#")
    Checkmate,
}

/// Ply parsed from algebraic notation
///
/// Parsing is purely syntactic and never looks at the board. Check marks are kept, and
/// annotation glyphs like `!?` are dropped. The original string is kept as well, so
/// error messages and labels can quote it.
///
/// # Example
///
/// ```
/// # use chessreplay::{moves::Ply, types::{PieceKind, Square}};
/// #
/// let ply: Ply = "Nbxd2+!".parse().unwrap();
/// assert_eq!(ply.piece_kind(), PieceKind::Knight);
/// assert_eq!(ply.destination(), Some(Square::from_name("d2").unwrap()));
/// assert!(ply.is_capture());
/// assert_eq!(ply.to_string(), "Nbxd2+");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Ply {
    raw: String,
    data: Data,
    check: Option<CheckMark>,
}

impl Ply {
    pub fn parse(s: &str) -> Result<Ply, ParseError> {
        let data = s.trim_end_matches(&['!', '?'][..]);
        let (check, data) = if let Some(data) = data.strip_suffix("++") {
            (Some(CheckMark::Double), data)
        } else if let Some(data) = data.strip_suffix('+') {
            (Some(CheckMark::Single), data)
        } else if let Some(data) = data.strip_suffix('#') {
            (Some(CheckMark::Checkmate), data)
        } else {
            (None, data)
        };
        let data = Data::from_str(data).map_err(|reason| ParseError::UnrecognisedPly {
            ply: s.to_string(),
            reason,
        })?;
        Ok(Ply {
            raw: s.to_string(),
            data,
            check,
        })
    }

    /// Returns the string from which the ply was parsed
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[inline]
    pub fn data(&self) -> Data {
        self.data
    }

    #[inline]
    pub fn check(&self) -> Option<CheckMark> {
        self.check
    }

    /// Returns the kind of the moving piece
    ///
    /// For castling, this is the king.
    pub fn piece_kind(&self) -> PieceKind {
        match self.data {
            Data::Castling(_) => PieceKind::King,
            Data::Move { kind, .. } => kind,
        }
    }

    pub fn disambig_col(&self) -> Option<File> {
        match self.data {
            Data::Castling(_) => None,
            Data::Move { file, .. } => file,
        }
    }

    pub fn disambig_row(&self) -> Option<Rank> {
        match self.data {
            Data::Castling(_) => None,
            Data::Move { rank, .. } => rank,
        }
    }

    /// Returns the destination square, or `None` for castling
    pub fn destination(&self) -> Option<Square> {
        match self.data {
            Data::Castling(_) => None,
            Data::Move { dst, .. } => Some(dst),
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(
            self.data,
            Data::Move {
                is_capture: true,
                ..
            }
        )
    }

    pub fn promotion_kind(&self) -> Option<PieceKind> {
        match self.data {
            Data::Castling(_) => None,
            Data::Move { promote, .. } => promote,
        }
    }

    pub fn castling(&self) -> Option<CastlingSide> {
        match self.data {
            Data::Castling(side) => Some(side),
            Data::Move { .. } => None,
        }
    }

    #[inline]
    pub fn castle_kingside(&self) -> bool {
        self.castling() == Some(CastlingSide::King)
    }

    #[inline]
    pub fn castle_queenside(&self) -> bool {
        self.castling() == Some(CastlingSide::Queen)
    }
}

impl fmt::Display for Ply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.data)?;
        match self.check {
            Some(CheckMark::Single) => write!(f, "+")?,
            Some(CheckMark::Double) => write!(f, "++")?,
            Some(CheckMark::Checkmate) => write!(f, "#")?,
            None => {}
        };
        Ok(())
    }
}

impl FromStr for Ply {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Ply, Self::Err> {
        Ply::parse(s)
    }
}
