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

use strum::IntoEnumIterator;

use super::material::{ChessPiece, Color, Piece};
use super::square::Rank;
use super::ChessBoard;

impl ChessBoard {
    /// Heuristic score of the position, positive when white is better.
    ///
    /// Starts from the material balance, rewards pawns for every rank
    /// they have advanced, and then credits the side to move for each
    /// enemy piece it attacks and for each guard on its own knights and
    /// bishops.
    pub fn board_weight(&self) -> i64 {
        let mover = self.turn;
        let sign = mover.sign() as i64;
        let mut weight = self.advantage as i64;

        for color in Color::iter() {
            let start = Rank::pawn_rank(color);
            for square in self.bitboards.positions_of(ChessPiece::new(color, Piece::Pawn)) {
                // rank indices grow towards rank 1
                weight -= (square.rank() - start) as i64;
            }
        }

        for square in self.bitboards.attacked_squares(mover).iter() {
            if let Some(piece) = self.bitboards.piece_at(square) {
                weight += sign * piece.piece().threat_value() as i64;
            }
        }

        let minors = self
            .bitboards
            .occupied_by(mover)
            .iter()
            .filter(|square| {
                self.bitboards
                    .piece_at(*square)
                    .map_or(false, |piece| piece.piece().is_minor())
            })
            .collect::<Vec<_>>();
        if !minors.is_empty() {
            for from in self.bitboards.occupied_by(mover).iter() {
                let Some(guard) = self.bitboards.piece_at(from) else {
                    continue;
                };
                let covered = self.bitboards.attacks_from(from, guard);
                let guarded = minors.iter().filter(|minor| covered.contains(**minor)).count();
                weight += sign * guarded as i64;
            }
        }
        weight
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
    fn test_initial_weight() {
        // material is level and each of white's minor pieces has one guard
        assert_eq!(ChessBoard::new().board_weight(), 4);
    }
    #[test]
    fn test_more_material_scores_higher() {
        let even = board(&[(A1, P::WK), (H8, P::BK)]);
        let up = board(&[(A1, P::WK), (H8, P::BK), (D1, P::WR)]);
        let down = board(&[(A1, P::WK), (H8, P::BK), (D8, P::BR)]);
        assert!(up.board_weight() > even.board_weight());
        assert!(down.board_weight() < even.board_weight());
    }
    #[test]
    fn test_pawn_advance_rewarded() {
        let home = board(&[(A1, P::WK), (H8, P::BK), (C2, P::WP)]);
        let advanced = board(&[(A1, P::WK), (H8, P::BK), (C5, P::WP)]);
        assert_eq!(advanced.board_weight() - home.board_weight(), 3);
        let black = board(&[(A1, P::WK), (H8, P::BK), (C5, P::BP)]);
        assert_eq!(black.board_weight(), -1 - 2);
    }
    #[test]
    fn test_threats_credit_the_mover() {
        let mut b = board(&[(A1, P::WK), (H8, P::BK), (D1, P::WR), (D7, P::BQ)]);
        let material = 5 - 9;
        // white to move attacks the queen
        assert_eq!(b.board_weight(), material + 5);
        b.apply_move(ChessMove::normal(A1, B1)).unwrap();
        // black to move attacks the rook
        assert_eq!(b.board_weight(), material - 2);
    }
    #[test]
    fn test_guarded_minor() {
        let b = board(&[(A1, P::WK), (H8, P::BK), (C3, P::WN), (B2, P::WP)]);
        // material 3 + 1, the b2 pawn has not moved, the pawn guards the knight
        assert_eq!(b.board_weight(), 4 + 1);
    }
}
