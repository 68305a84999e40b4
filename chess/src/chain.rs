use crate::board::{self, Board, Setup, Snapshot};
use crate::moves::{self, Ply, PlyError};
use crate::types::Color;

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot play ply #{} {:?}: {}", .pos + 1, .ply, .source)]
pub struct ReplayError {
    /// Index of the failing ply in the game
    pub pos: usize,
    pub ply: String,
    pub source: PlyError,
}

/// Result of the game, as written at the end of movetext
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
    Unknown,
}

impl GameResult {
    pub fn from_token(s: &str) -> Option<GameResult> {
        match s {
            "1-0" => Some(GameResult::WhiteWins),
            "0-1" => Some(GameResult::BlackWins),
            "1/2-1/2" => Some(GameResult::Draw),
            "*" => Some(GameResult::Unknown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Unknown => "*",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

/// Meaningful piece of movetext
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Token<'a> {
    Ply(&'a str),
    Result(GameResult),
}

/// Strips the move number like `12.` or `12...` from the beginning of `s`
fn strip_move_number(s: &str) -> &str {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || !s[digits..].starts_with('.') {
        return s;
    }
    s[digits..].trim_start_matches('.')
}

/// Splits the movetext into plies
///
/// Move numbers are skipped, and the game result ends the movetext. Comments and
/// variations are not supported.
///
/// # Example
///
/// ```
/// # use chessreplay::chain::{tokenize, GameResult, Token};
/// #
/// assert_eq!(
///     tokenize("1. e4 e5 2.Nf3 2... Nc6 1-0 3. Bb5"),
///     vec![
///         Token::Ply("e4"),
///         Token::Ply("e5"),
///         Token::Ply("Nf3"),
///         Token::Ply("Nc6"),
///         Token::Result(GameResult::WhiteWins),
///     ],
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut res = Vec::new();
    for word in text.split_ascii_whitespace() {
        if let Some(result) = GameResult::from_token(word) {
            res.push(Token::Result(result));
            break;
        }
        let ply = strip_move_number(word);
        if !ply.is_empty() {
            res.push(Token::Ply(ply));
        }
    }
    res
}

/// Position recorded after each ply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Label like `"12. e4"` or `"12... e5"`; empty for the starting position
    pub label: String,
    /// Ply which led to this position; `None` for the starting position
    pub ply: Option<Ply>,
    pub snapshot: Snapshot,
}

/// Replay of a whole game
///
/// Plies are played one by one on the board, and a [`Frame`] is recorded after each of them.
/// The first frame holds the starting position.
#[derive(Debug, Clone)]
pub struct Replay {
    board: Board,
    side: Color,
    move_number: u16,
    frames: Vec<Frame>,
    result: Option<GameResult>,
}

impl Replay {
    pub fn new(board: Board, side: Color, move_number: u16) -> Self {
        let frames = vec![Frame {
            label: String::new(),
            ply: None,
            snapshot: board.snapshot(),
        }];
        Replay {
            board,
            side,
            move_number,
            frames,
            result: None,
        }
    }

    pub fn new_initial() -> Self {
        Self::from_setup(&Setup::initial())
    }

    pub fn from_setup(setup: &Setup) -> Self {
        Self::new(setup.to_board(), setup.side, setup.move_number)
    }

    pub fn from_fen(s: &str) -> Result<Self, board::FenParseError> {
        Ok(Self::from_setup(&Setup::from_fen(s)?))
    }

    pub fn from_movetext(board: Board, text: &str) -> Result<Self, ReplayError> {
        let mut res = Replay::new(board, Color::White, 1);
        res.push_movetext(text)?;
        Ok(res)
    }

    pub fn last(&self) -> &Board {
        &self.board
    }

    pub fn side(&self) -> Color {
        self.side
    }

    pub fn move_number(&self) -> u16 {
        self.move_number
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Returns the number of plies played
    pub fn len(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// Plays the ply `s` for the side to move
    ///
    /// On error, the replay is left untouched.
    pub fn push(&mut self, s: &str) -> Result<&Frame, PlyError> {
        let ply = Ply::parse(s)?;
        moves::apply(&mut self.board, &ply, self.side)?;

        let label = match self.side {
            Color::White => format!("{}. {}", self.move_number, s),
            Color::Black => format!("{}... {}", self.move_number, s),
        };
        self.frames.push(Frame {
            label,
            ply: Some(ply),
            snapshot: self.board.snapshot(),
        });
        if self.side == Color::Black {
            self.move_number += 1;
        }
        self.side = self.side.inv();
        Ok(&self.frames[self.frames.len() - 1])
    }

    fn push_at(&mut self, pos: usize, s: &str) -> Result<(), ReplayError> {
        self.push(s).map_err(|source| ReplayError {
            pos,
            ply: s.to_string(),
            source,
        })?;
        Ok(())
    }

    /// Plays the plies one by one, stopping at the first error
    pub fn push_list<'a, I>(&mut self, plies: I) -> Result<(), ReplayError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for (pos, s) in plies.into_iter().enumerate() {
            self.push_at(pos, s)?;
        }
        Ok(())
    }

    /// Plays the plies from movetext like `"1. e4 e5 2. Nf3 1-0"`
    ///
    /// If the movetext ends with the game result, it is recorded and returned.
    pub fn push_movetext(&mut self, text: &str) -> Result<Option<GameResult>, ReplayError> {
        let mut pos = 0;
        for token in tokenize(text) {
            match token {
                Token::Ply(s) => {
                    self.push_at(pos, s)?;
                    pos += 1;
                }
                Token::Result(result) => {
                    self.result = Some(result);
                    return Ok(Some(result));
                }
            }
        }
        Ok(None)
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> + '_ {
        self.frames.iter().map(|frame| &frame.snapshot)
    }
}
