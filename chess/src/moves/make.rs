use super::ply::Ply;
use super::resolve::{self, Applied, ResolveError};
use super::PlyError;
use crate::board::Board;
use crate::types::Color;

/// Something that can be played on the board
pub trait Make {
    type Err;

    /// Applies the changes in place
    ///
    /// On error, `board` is left untouched.
    fn make_raw(&self, board: &mut Board) -> Result<Applied, Self::Err>;

    /// Applies the changes to a copy of `board`
    fn make(&self, board: &Board) -> Result<Board, Self::Err> {
        let mut cloned = board.clone();
        let _ = self.make_raw(&mut cloned)?;
        Ok(cloned)
    }
}

/// Parsed ply together with the side which makes it
pub struct Resolved<'a>(pub &'a Ply, pub Color);

impl<'a> Make for Resolved<'a> {
    type Err = ResolveError;

    #[inline]
    fn make_raw(&self, board: &mut Board) -> Result<Applied, Self::Err> {
        resolve::apply(board, self.0, self.1)
    }

    #[inline]
    fn make(&self, board: &Board) -> Result<Board, Self::Err> {
        let applied = resolve::plan(board, self.0, self.1)?;
        let mut cloned = board.clone();
        resolve::commit(&mut cloned, &applied);
        Ok(cloned)
    }
}

/// Ply in algebraic notation together with the side which makes it
pub struct San<S: AsRef<str>>(pub S, pub Color);

impl<S: AsRef<str>> Make for San<S> {
    type Err = PlyError;

    #[inline]
    fn make_raw(&self, board: &mut Board) -> Result<Applied, Self::Err> {
        let ply = Ply::parse(self.0.as_ref())?;
        Ok(Resolved(&ply, self.1).make_raw(board)?)
    }

    #[inline]
    fn make(&self, board: &Board) -> Result<Board, Self::Err> {
        let ply = Ply::parse(self.0.as_ref())?;
        Ok(Resolved(&ply, self.1).make(board)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{ParseError, RawParseError};
    use crate::types::Square;

    #[test]
    fn test_make_keeps_source() {
        let board = Board::initial();
        let next = San("Nf3", Color::White).make(&board).unwrap();
        assert_eq!(board, Board::initial());
        assert_eq!(
            next.as_placement(),
            "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R"
        );
        assert_eq!(next.ply_count(), 1);
    }

    #[test]
    fn test_make_raw() {
        let mut board = Board::initial();
        let ply = Ply::parse("e4").unwrap();
        let applied = Resolved(&ply, Color::White).make_raw(&mut board).unwrap();
        assert!(matches!(applied, Applied::Move { dst, .. } if dst == Square::from_name("e4").unwrap()));

        let applied = board.apply_ply("e5", Color::Black).unwrap();
        assert!(matches!(applied, Applied::Move { captured: None, .. }));
        assert_eq!(
            board.as_placement(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR"
        );
    }

    #[test]
    fn test_errors() {
        let mut board = Board::initial();
        assert!(matches!(
            board.make_ply("Zz9", Color::White),
            Err(PlyError::Parse(ParseError::UnrecognisedPly {
                reason: RawParseError::InvalidDst(_),
                ..
            }))
        ));
        assert_eq!(
            board.apply_ply("Ra1", Color::White),
            Err(PlyError::Resolve(ResolveError::NoLegalMove {
                ply: "Ra1".to_string()
            }))
        );
        assert_eq!(board, Board::initial());
    }
}
