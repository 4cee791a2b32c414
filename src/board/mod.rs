// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! Chess board with legal move generation and reversible moves
//!
//! A _board_ holds the pieces, whose turn it is and every move played so
//! far. Moves are applied and undone in place, which is what lets the
//! legality filter and the search reuse a single board for thousands of
//! trial moves. The following features are supported:
//!
//! [x] Standard chess rules, including castling, en passant and promotion
//! [x] Check, checkmate and stalemate detection
//! [x] Fifty-move rule and bare-kings draw
//! [x] Undo of any number of moves
//! [x] Pass moves
//! [ ] Threefold repetition
//! [ ] Insufficient material beyond bare kings
//!
//! Some of the key abstractions include:
//!
//! * A `Square` names one of the 64 squares and a `Mask` is a set of
//!   squares packed into a `u64`, a8 being the most significant bit and
//!   h1 the least. `BoardPosition` is the (row, column) form callers use;
//!   it may lie off the board, and `BoardPosition::PASS` marks a pass.
//!
//! * `Bitboards` keeps one mask per `ChessPiece` (a `Piece` of a given
//!   `Color`). All queries and updates of square contents go through it,
//!   as does attack detection.
//!
//! * A `ChessMove` names a start and end square, how the move is played
//!   (`MoveType`) and, for promotions, the piece the pawn becomes. Once
//!   applied, it also records who played it.
//!
//! * `ChessBoard` ties it together: `possible_moves`, `apply_move`,
//!   `undo_last_move`, the game status, and a heuristic `board_weight`
//!   used by the search.
//!

use anyhow::Result;
use std::fmt;
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::debug;

mod attacks;
mod bitboards;
mod eval;
mod history;
mod material;
mod movegen;
mod moves;
mod square;
mod status;

pub use bitboards::*;
pub use material::*;
pub use moves::*;
pub use square::*;
pub use status::*;

use history::UndoEntry;

use crate::game::GameAdvantage;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Expected one king per side, found {white} white and {black} black")]
    KingCount { white: usize, black: usize },
    #[error("Position {0} is off the board")]
    OutOfBounds(BoardPosition),
    #[error("No {player} piece at {position}")]
    NotOwnPiece {
        position: BoardPosition,
        player: Color,
    },
    #[error("No move to undo")]
    EmptyHistory,
    #[error("Unknown square '{0}'")]
    UnknownSquare(String),
}

#[derive(Debug, Clone)]
pub struct ChessBoard {
    bitboards: Bitboards,
    turn: Color,
    history: Vec<UndoEntry>,
    // white material minus black material
    advantage: i32,
    draw_counter: u32,
    pass_count: u32,
    status: Option<GameStatus>,
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::new()
    }
}

// The cached status is left out: it is derived from the rest.
impl PartialEq for ChessBoard {
    fn eq(&self, other: &Self) -> bool {
        self.bitboards == other.bitboards
            && self.turn == other.turn
            && self.history == other.history
            && self.advantage == other.advantage
            && self.draw_counter == other.draw_counter
            && self.pass_count == other.pass_count
    }
}

impl Eq for ChessBoard {}

impl ChessBoard {
    /// The standard starting position with white to move.
    pub fn new() -> Self {
        const BACK_RANK: [Piece; 8] = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        let mut bitboards = Bitboards::empty();
        for color in Color::iter() {
            for file in File::iter() {
                let piece = ChessPiece::new(color, BACK_RANK[file.to_index()]);
                bitboards.set_piece_at(Square::new(file, Rank::back_rank(color)), Some(piece));
                let pawn = ChessPiece::new(color, Piece::Pawn);
                bitboards.set_piece_at(Square::new(file, Rank::pawn_rank(color)), Some(pawn));
            }
        }
        Self::with_bitboards(bitboards)
    }

    /// Builds a board from explicit placements, white to move. Fails
    /// unless each side has exactly one king. A later placement on the
    /// same square replaces an earlier one.
    pub fn from_placement<I>(pieces: I) -> Result<Self>
    where
        I: IntoIterator<Item = (BoardPosition, ChessPiece)>,
    {
        let mut bitboards = Bitboards::empty();
        for (position, piece) in pieces {
            let square = Square::try_from(position)?;
            bitboards.set_piece_at(square, Some(piece));
        }
        let white = bitboards.count(ChessPiece::WK);
        let black = bitboards.count(ChessPiece::BK);
        if white != 1 || black != 1 {
            debug!(white, black, "rejecting placement");
            return Err(BoardError::KingCount { white, black }.into());
        }
        Ok(Self::with_bitboards(bitboards))
    }

    fn with_bitboards(bitboards: Bitboards) -> Self {
        let advantage = bitboards
            .pieces()
            .map(|(_, piece)| piece.signed_value())
            .sum();
        Self {
            bitboards,
            turn: Color::White,
            history: Vec::new(),
            advantage,
            draw_counter: 0,
            pass_count: 0,
            status: None,
        }
    }

    /// Hands the first move to `turn`. Only meaningful before any move
    /// has been played.
    pub fn with_turn(mut self, turn: Color) -> Self {
        self.turn = turn;
        self.status = None;
        self
    }

    #[inline]
    pub fn bitboards(&self) -> &Bitboards {
        &self.bitboards
    }

    /// The piece at `position`, if any. Never fails, even off the board.
    pub fn piece_at(&self, position: impl Into<BoardPosition>) -> Option<ChessPiece> {
        let square = position.into().square()?;
        self.bitboards.piece_at(square)
    }

    pub fn player_at(&self, position: impl Into<BoardPosition>) -> Option<Color> {
        let square = position.into().square()?;
        self.bitboards.player_at(square)
    }

    pub fn positions_of(&self, piece: ChessPiece) -> impl Iterator<Item = BoardPosition> {
        self.bitboards.positions_of(piece).map(BoardPosition::from)
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.turn
    }

    pub fn move_history(
        &self,
    ) -> impl DoubleEndedIterator<Item = &ChessMove> + ExactSizeIterator + '_ {
        self.history.iter().map(|entry| &entry.mv)
    }

    /// Material balance, positive when white is ahead.
    #[inline]
    pub fn advantage(&self) -> i32 {
        self.advantage
    }

    pub fn current_advantage(&self) -> GameAdvantage {
        GameAdvantage::from_signed(self.advantage)
    }

    /// Half-moves since the last capture or pawn move.
    #[inline]
    pub fn draw_counter(&self) -> u32 {
        self.draw_counter
    }

    /// Consecutive passes since the last real move.
    #[inline]
    pub fn pass_count(&self) -> u32 {
        self.pass_count
    }

    /// Finds the legal move `mv` refers to. `mv` typically comes from
    /// parsed text and so carries no move type; the returned move does.
    pub fn resolve_move(&mut self, mv: &ChessMove) -> Result<ChessMove> {
        if mv.is_pass() {
            return Ok(ChessMove::pass());
        }
        let legal = self
            .possible_moves()
            .into_iter()
            .find(|candidate| candidate == mv)
            .ok_or(MoveError::InvalidMove)?;
        Ok(legal)
    }

    /// Parses, checks and applies a move such as `(e2, e4)`. Returns the
    /// move as applied.
    pub fn play(&mut self, text: &str) -> Result<ChessMove> {
        let parsed: ChessMove = text.parse()?;
        let mv = self.resolve_move(&parsed)?;
        self.apply_move(mv)?;
        self.move_history()
            .next_back()
            .copied()
            .ok_or_else(|| BoardError::EmptyHistory.into())
    }

    /// Plays a sequence of moves with `play`, stopping at the first error.
    pub fn play_all<'a, I>(&mut self, moves: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for text in moves {
            self.play(text)?;
        }
        Ok(())
    }
}

impl fmt::Display for ChessBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter() {
            write!(f, "{}", rank)?;
            for file in File::iter() {
                let c = self
                    .bitboards
                    .piece_at(Square::new(file, rank))
                    .map_or('.', |piece| piece.to_char());
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, " ")?;
        for file in File::iter() {
            write!(f, " {}", file)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square::*;

    #[test]
    fn test_new_board() {
        let b = ChessBoard::new();
        assert_eq!(b.piece_at(E1), Some(ChessPiece::WK));
        assert_eq!(b.piece_at(D8), Some(ChessPiece::BQ));
        assert_eq!(b.piece_at(A2), Some(ChessPiece::WP));
        assert_eq!(b.piece_at(E4), None);
        assert_eq!(b.player_at(G8), Some(Color::Black));
        assert_eq!(b.current_player(), Color::White);
        assert_eq!(b.advantage(), 0);
        assert_eq!(b.bitboards().occupied().len(), 32);
    }
    #[test]
    fn test_queries_off_board() {
        let b = ChessBoard::new();
        assert_eq!(b.piece_at(BoardPosition::new(8, 0)), None);
        assert_eq!(b.player_at(BoardPosition::PASS), None);
    }
    #[test]
    fn test_placement_needs_kings() {
        let err = ChessBoard::from_placement([(E1.position(), ChessPiece::WK)]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<BoardError>(),
            Some(&BoardError::KingCount { white: 1, black: 0 })
        );
        let two = [
            (E1.position(), ChessPiece::WK),
            (D1.position(), ChessPiece::WK),
            (E8.position(), ChessPiece::BK),
        ];
        assert!(ChessBoard::from_placement(two).is_err());
    }
    #[test]
    fn test_placement_off_board() {
        let pieces = [
            (E1.position(), ChessPiece::WK),
            (E8.position(), ChessPiece::BK),
            (BoardPosition::new(-1, 3), ChessPiece::WQ),
        ];
        assert!(ChessBoard::from_placement(pieces).is_err());
    }
    #[test]
    fn test_placement_seeds_advantage() {
        let pieces = [
            (E1.position(), ChessPiece::WK),
            (E8.position(), ChessPiece::BK),
            (D1.position(), ChessPiece::WQ),
            (A8.position(), ChessPiece::BR),
        ];
        let b = ChessBoard::from_placement(pieces).unwrap();
        assert_eq!(b.advantage(), 4);
        assert_eq!(
            b.current_advantage(),
            GameAdvantage {
                player: Some(Color::White),
                advantage: 4
            }
        );
    }
    #[test]
    fn test_play_and_resolve() {
        let mut b = ChessBoard::new();
        let mv = b.play("(e2, e4)").unwrap();
        assert_eq!(mv.player(), Some(Color::White));
        assert_eq!(b.piece_at(E4), Some(ChessPiece::WP));
        let err = b.play("(e7, e4)").unwrap_err();
        assert_eq!(
            err.downcast_ref::<MoveError>(),
            Some(&MoveError::InvalidMove)
        );
        assert!(b.play("e7 e5").is_err());
        assert_eq!(b.move_history().len(), 1);
    }
    #[test]
    fn test_resolve_keeps_move_type() {
        let mut b = ChessBoard::from_placement([
            (E1.position(), ChessPiece::WK),
            (H1.position(), ChessPiece::WR),
            (E8.position(), ChessPiece::BK),
        ])
        .unwrap();
        let mv = b.resolve_move(&"(e1, g1)".parse().unwrap()).unwrap();
        assert_eq!(mv.move_type(), MoveType::CastleKingSide);
    }
    #[test]
    fn test_positions_of() {
        let b = ChessBoard::new();
        let knights: Vec<_> = b.positions_of(ChessPiece::BN).collect();
        assert_eq!(knights, vec![B8.position(), G8.position()]);
    }
    #[test]
    fn test_display() {
        let b = ChessBoard::new();
        let text = b.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "8 r n b q k b n r");
        assert_eq!(lines[3], "5 . . . . . . . .");
        assert_eq!(lines[7], "1 R N B Q K B N R");
        assert_eq!(lines[8], "  a b c d e f g h");
    }
}
