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

use serde::{Deserialize, Serialize};

use super::material::ChessPiece;
use super::ChessBoard;

/// Half-moves without a capture or pawn move after which the game is drawn.
pub const FIFTY_MOVE_LIMIT: u32 = 100;

/// How things stand for the side to move.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl ChessBoard {
    /// Classifies the position from whether the mover's king is attacked
    /// and whether the mover has any legal move. The result is kept until
    /// the next apply or undo.
    pub fn status(&mut self) -> GameStatus {
        if let Some(status) = self.status {
            return status;
        }
        let threatened = self.bitboards.is_king_attacked(self.turn);
        let can_move = !self.possible_moves().is_empty();
        let status = match (threatened, can_move) {
            (true, false) => GameStatus::Checkmate,
            (true, true) => GameStatus::Check,
            (false, false) => GameStatus::Stalemate,
            (false, true) => GameStatus::Normal,
        };
        self.status = Some(status);
        status
    }

    /// In check with at least one way out.
    pub fn is_check(&mut self) -> bool {
        self.status() == GameStatus::Check
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.status() == GameStatus::Checkmate
    }

    pub fn is_stalemate(&mut self) -> bool {
        self.status() == GameStatus::Stalemate
    }

    /// Only the two kings are left, or the fifty-move counter ran out.
    pub fn is_draw(&self) -> bool {
        let kings = self.bitboards.mask(ChessPiece::WK) | self.bitboards.mask(ChessPiece::BK);
        (self.bitboards.occupied() - kings).is_empty() || self.draw_counter >= FIFTY_MOVE_LIMIT
    }

    pub fn is_finished(&mut self) -> bool {
        self.is_draw()
            || matches!(
                self.status(),
                GameStatus::Checkmate | GameStatus::Stalemate
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::material::ChessPiece as P;
    use crate::Square::*;
    use crate::{ChessMove, Square};

    fn board(pieces: &[(Square, ChessPiece)]) -> ChessBoard {
        ChessBoard::from_placement(pieces.iter().map(|(s, p)| (s.position(), *p))).unwrap()
    }

    #[test]
    fn test_initial_status() {
        let mut b = ChessBoard::new();
        assert_eq!(b.status(), GameStatus::Normal);
        assert!(!b.is_finished());
        assert!(!b.is_draw());
    }
    #[test]
    fn test_back_rank_mate() {
        let mut b = board(&[
            (G1, P::WK),
            (F2, P::WP),
            (G2, P::WP),
            (H2, P::WP),
            (A1, P::BR),
            (A8, P::BK),
        ]);
        assert!(b.is_checkmate());
        assert!(!b.is_check());
        assert!(b.is_finished());
    }
    #[test]
    fn test_check_not_mate() {
        let mut b = board(&[(G1, P::WK), (G2, P::WP), (A1, P::BR), (A8, P::BK)]);
        assert_eq!(b.status(), GameStatus::Check);
        assert!(!b.is_finished());
    }
    #[test]
    fn test_stalemate() {
        let mut b = board(&[(A8, P::BK), (B6, P::WQ), (C1, P::WK)]).with_turn(crate::Color::Black);
        assert!(b.is_stalemate());
        assert!(!b.is_checkmate());
        assert!(b.is_finished());
    }
    #[test]
    fn test_bare_kings_draw() {
        let b = board(&[(A8, P::BK), (C1, P::WK)]);
        assert!(b.is_draw());
    }
    #[test]
    fn test_status_refreshes_after_move() {
        let mut b = board(&[(G1, P::WK), (G2, P::WP), (B1, P::BR), (A8, P::BK)]);
        assert_eq!(b.status(), GameStatus::Check);
        b.apply_move(ChessMove::normal(G1, H2)).unwrap();
        assert_eq!(b.status(), GameStatus::Normal);
        b.undo_last_move().unwrap();
        assert_eq!(b.status(), GameStatus::Check);
    }
    #[test]
    fn test_fifty_move_counter() {
        let mut b = board(&[(A1, P::WK), (H8, P::BK), (D4, P::WN), (D5, P::BN)]);
        let shuffle = [
            ChessMove::normal(D4, F3),
            ChessMove::normal(D5, F6),
            ChessMove::normal(F3, D4),
            ChessMove::normal(F6, D5),
        ];
        for i in 0..FIFTY_MOVE_LIMIT as usize {
            assert!(!b.is_draw());
            b.apply_move(shuffle[i % 4]).unwrap();
        }
        assert_eq!(b.draw_counter(), FIFTY_MOVE_LIMIT);
        assert!(b.is_draw());
        assert!(b.is_finished());
        b.undo_last_move().unwrap();
        assert!(!b.is_draw());
    }
}
