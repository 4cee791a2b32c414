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

//! The contract between a two-player board game and the players that
//! search it.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::{ChessBoard, ChessMove, Color};

/// Which side is ahead on material, and by how much.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameAdvantage {
    pub player: Option<Color>,
    pub advantage: u32,
}

impl GameAdvantage {
    /// From a balance that is positive when white is ahead.
    pub fn from_signed(balance: i32) -> Self {
        let player = match balance {
            0 => None,
            b if b > 0 => Some(Color::White),
            _ => Some(Color::Black),
        };
        Self {
            player,
            advantage: balance.unsigned_abs(),
        }
    }
}

/// A board two players take turns on. Moves are applied and undone in
/// place; a searcher explores the game tree by applying a move, looking
/// deeper and undoing it again.
pub trait GameBoard {
    type Move: Clone + PartialEq + Debug;

    fn possible_moves(&mut self) -> Vec<Self::Move>;
    fn apply_move(&mut self, mv: Self::Move) -> Result<()>;
    fn undo_last_move(&mut self) -> Result<Self::Move>;
    fn move_history(&self) -> impl DoubleEndedIterator<Item = &Self::Move> + ExactSizeIterator;
    fn is_finished(&mut self) -> bool;
    /// Whether the side to move is the one a positive `board_weight`
    /// favours. That side maximizes and its opponent minimizes.
    fn is_maximizing(&self) -> bool;
    fn board_weight(&self) -> i64;

    /// Applies `mv`, hands the board to `f` and undoes `mv` again, on
    /// every path out of `f`.
    fn try_move<R>(&mut self, mv: Self::Move, f: impl FnOnce(&mut Self) -> R) -> Result<R>
    where
        Self: Sized,
    {
        self.apply_move(mv)?;
        let result = f(self);
        self.undo_last_move()?;
        Ok(result)
    }
}

impl GameBoard for ChessBoard {
    type Move = ChessMove;

    fn possible_moves(&mut self) -> Vec<ChessMove> {
        ChessBoard::possible_moves(self)
    }
    fn apply_move(&mut self, mv: ChessMove) -> Result<()> {
        ChessBoard::apply_move(self, mv)
    }
    fn undo_last_move(&mut self) -> Result<ChessMove> {
        ChessBoard::undo_last_move(self)
    }
    fn move_history(&self) -> impl DoubleEndedIterator<Item = &ChessMove> + ExactSizeIterator {
        ChessBoard::move_history(self)
    }
    fn is_finished(&mut self) -> bool {
        ChessBoard::is_finished(self)
    }
    fn is_maximizing(&self) -> bool {
        ChessBoard::current_player(self) == Color::White
    }
    fn board_weight(&self) -> i64 {
        ChessBoard::board_weight(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square::*;

    #[test]
    fn test_advantage_from_signed() {
        assert_eq!(
            GameAdvantage::from_signed(0),
            GameAdvantage {
                player: None,
                advantage: 0
            }
        );
        assert_eq!(
            GameAdvantage::from_signed(-3),
            GameAdvantage {
                player: Some(Color::Black),
                advantage: 3
            }
        );
    }
    #[test]
    fn test_try_move_restores() {
        let mut board = ChessBoard::new();
        let before = board.clone();
        let seen = board
            .try_move(ChessMove::normal(E2, E4), |b| {
                GameBoard::move_history(b).len()
            })
            .unwrap();
        assert_eq!(seen, 1);
        assert_eq!(board, before);
    }
    #[test]
    fn test_white_maximizes() {
        let mut board = ChessBoard::new();
        assert!(board.is_maximizing());
        board.apply_move(ChessMove::normal(E2, E4)).unwrap();
        assert!(!board.is_maximizing());
    }
    #[test]
    fn test_try_move_rejects_bad_move() {
        let mut board = ChessBoard::new();
        assert!(board
            .try_move(ChessMove::normal(E7, E5), |_| ())
            .is_err());
        assert_eq!(board, ChessBoard::new());
    }
}
