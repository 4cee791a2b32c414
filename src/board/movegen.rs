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

//! Legal move generation.
//!
//! Candidates are produced per piece from the movement geometry alone and
//! then filtered by playing each one on the board and checking whether
//! the mover's king is left attacked.

use strum::IntoEnumIterator;

use super::attacks::pawn_attacks;
use super::material::{ChessPiece, Color, Piece};
use super::moves::{ChessMove, Promotion};
use super::square::{Direction, Rank, Square};
use super::ChessBoard;

use Piece::*;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    mv: ChessMove,
    from: Square,
    to: Square,
    moved: ChessPiece,
}

impl ChessBoard {
    /// Every legal move for the side to move, generated fresh.
    ///
    /// Pieces are visited from a8 to h1 and each piece's moves are
    /// emitted in a fixed order, so the sequence is deterministic for a
    /// given position.
    pub fn possible_moves(&mut self) -> Vec<ChessMove> {
        let color = self.turn;
        let mut candidates = Vec::new();
        for from in self.bitboards.occupied_by(color).iter() {
            if let Some(moved) = self.bitboards.piece_at(from) {
                self.pseudo_moves(from, moved, &mut candidates);
            }
        }
        candidates
            .into_iter()
            .filter(|c| self.is_safe(c, color))
            .map(|c| c.mv)
            .collect()
    }

    fn is_safe(&mut self, candidate: &Candidate, color: Color) -> bool {
        let memo = self.status.take();
        let safe = self.probe(
            candidate.mv,
            candidate.from,
            candidate.to,
            candidate.moved,
            |board| !board.bitboards.is_king_attacked(color),
        );
        self.status = memo;
        safe
    }

    fn pseudo_moves(&mut self, from: Square, moved: ChessPiece, out: &mut Vec<Candidate>) {
        match moved.piece() {
            Pawn => self.pawn_moves(from, moved, out),
            King => {
                self.step_moves(from, moved, out);
                self.castling_moves(from, moved, out);
            }
            Knight | Bishop | Rook | Queen => self.step_moves(from, moved, out),
        }
    }

    // Destinations come straight from the attack geometry, minus our
    // own pieces and the enemy king.
    fn step_moves(&self, from: Square, moved: ChessPiece, out: &mut Vec<Candidate>) {
        let ours = self.bitboards.occupied_by(moved.color());
        let their_king = self.bitboards.mask(ChessPiece::new(!moved.color(), King));
        let destinations = self.bitboards.attacks_from(from, moved) - ours - their_king;
        for to in destinations.iter() {
            out.push(Candidate {
                mv: ChessMove::normal(from, to),
                from,
                to,
                moved,
            });
        }
    }

    fn pawn_moves(&self, from: Square, moved: ChessPiece, out: &mut Vec<Candidate>) {
        let color = moved.color();
        let forward = Direction::forward(color);
        let occupied = self.bitboards.occupied();

        if let Some(one) = from + forward {
            if !occupied.contains(one) {
                push_pawn_move(from, one, moved, out);
                if from.rank() == Rank::pawn_rank(color) {
                    if let Some(two) = one + forward {
                        if !occupied.contains(two) {
                            push_pawn_move(from, two, moved, out);
                        }
                    }
                }
            }
        }

        let their_king = self.bitboards.mask(ChessPiece::new(!color, King));
        let targets = self.bitboards.occupied_by(!color) - their_king;
        let captures = pawn_attacks(color, from) & targets;
        for to in captures.iter() {
            push_pawn_move(from, to, moved, out);
        }

        let their_pawn = ChessPiece::new(!color, Pawn);
        for side in [Direction::Left, Direction::Right] {
            let Some(beside) = from + side else { continue };
            if self.bitboards.piece_at(beside) != Some(their_pawn)
                || !self.last_move_was_double_push(!color, beside)
            {
                continue;
            }
            if let Some(to) = beside + forward {
                out.push(Candidate {
                    mv: ChessMove::en_passant(from, to),
                    from,
                    to,
                    moved,
                });
            }
        }
    }

    fn castling_moves(&mut self, from: Square, king: ChessPiece, out: &mut Vec<Candidate>) {
        let color = king.color();
        if !from.rank().is_back_rank(color)
            || self.bitboards.is_king_attacked(color)
            || self.has_been_landed_on(from)
        {
            return;
        }
        let rook = ChessPiece::new(color, Rook);
        for (king_side, direction) in [(true, Direction::Right), (false, Direction::Left)] {
            let Some(rook_square) = self.first_piece(from, direction) else {
                continue;
            };
            if self.bitboards.piece_at(rook_square) != Some(rook)
                || (rook_square.file() - from.file()).abs() < 3
                || self.has_been_landed_on(rook_square)
            {
                continue;
            }
            let Some(step) = from + direction else { continue };
            let Some(to) = step + direction else { continue };
            let stepping = Candidate {
                mv: ChessMove::normal(from, step),
                from,
                to: step,
                moved: king,
            };
            if !self.is_safe(&stepping, color) {
                continue;
            }
            out.push(Candidate {
                mv: ChessMove::castle(from, to, king_side),
                from,
                to,
                moved: king,
            });
        }
    }
}

fn push_pawn_move(from: Square, to: Square, moved: ChessPiece, out: &mut Vec<Candidate>) {
    if to.rank().is_back_rank(!moved.color()) {
        for promotion in Promotion::iter() {
            out.push(Candidate {
                mv: ChessMove::promote(from, to, promotion),
                from,
                to,
                moved,
            });
        }
    } else {
        out.push(Candidate {
            mv: ChessMove::normal(from, to),
            from,
            to,
            moved,
        });
    }
}
