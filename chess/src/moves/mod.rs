//! Parsing plies and playing them on the board

mod make;

pub mod ply;
pub mod resolve;

pub use make::{Make, Resolved, San};
pub use ply::{CheckMark, Data, ParseError, Ply, RawParseError};
pub use resolve::{apply, plan, Applied, ResolveError};

use thiserror::Error;

/// Error playing a ply given as a string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PlyError {
    /// Cannot parse the ply
    #[error("cannot parse ply: {0}")]
    Parse(#[from] ParseError),
    /// Cannot find the piece which makes the ply
    #[error("cannot resolve ply: {0}")]
    Resolve(#[from] ResolveError),
}
