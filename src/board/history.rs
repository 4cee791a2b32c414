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

//! Applying and undoing moves.
//!
//! Every applied move pushes one `UndoEntry` carrying exactly what is
//! needed to restore the previous position, so history, captures and
//! counters can never drift apart.

use anyhow::Result;

use super::material::{ChessPiece, Color, Piece};
use super::moves::{ChessMove, MoveError, MoveType};
use super::square::{Direction, Square};
use super::{BoardError, ChessBoard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct UndoEntry {
    pub(super) mv: ChessMove,
    // None for a pass
    moved: Option<(Square, Square, ChessPiece)>,
    captured: Option<(Square, ChessPiece)>,
    rook: Option<(Square, Square)>,
    draw_counter: u32,
    pass_count: u32,
    advantage: i32,
}

impl ChessBoard {
    /// Applies `mv` for the side to move. The move is not checked for
    /// legality, only for being well formed: its squares are on the board,
    /// its start holds one of the mover's pieces, a castle has a rook to
    /// move and a promotion names its piece.
    pub fn apply_move(&mut self, mv: ChessMove) -> Result<()> {
        if mv.is_pass() {
            self.make_pass(mv);
            return Ok(());
        }
        let from = Square::try_from(mv.start())?;
        let to = Square::try_from(mv.end())?;
        let moved = self
            .bitboards
            .piece_at(from)
            .filter(|piece| piece.color() == self.turn)
            .ok_or(BoardError::NotOwnPiece {
                position: mv.start(),
                player: self.turn,
            })?;
        let malformed = match mv.move_type() {
            MoveType::PawnPromote => mv.promotion().is_none(),
            MoveType::CastleKingSide | MoveType::CastleQueenSide => {
                self.castling_rook(from, to, mv.move_type()).is_none()
            }
            _ => false,
        };
        if malformed {
            return Err(MoveError::InvalidMove.into());
        }
        self.make(mv, from, to, moved);
        Ok(())
    }

    /// Reverts the most recent move and returns it.
    pub fn undo_last_move(&mut self) -> Result<ChessMove> {
        let entry = self.history.pop().ok_or(BoardError::EmptyHistory)?;
        self.unmake(&entry);
        Ok(entry.mv)
    }

    /// Applies `mv`, runs `f` on the resulting position and undoes the
    /// move again before returning `f`'s result.
    pub(super) fn probe<R>(
        &mut self,
        mv: ChessMove,
        from: Square,
        to: Square,
        moved: ChessPiece,
        f: impl FnOnce(&Self) -> R,
    ) -> R {
        self.make(mv, from, to, moved);
        let result = f(self);
        if let Some(entry) = self.history.pop() {
            self.unmake(&entry);
        }
        result
    }

    fn make_pass(&mut self, mut mv: ChessMove) {
        mv.set_player(self.turn);
        self.history.push(UndoEntry {
            mv,
            moved: None,
            captured: None,
            rook: None,
            draw_counter: self.draw_counter,
            pass_count: self.pass_count,
            advantage: 0,
        });
        self.pass_count += 1;
        self.turn = !self.turn;
        self.status = None;
    }

    pub(super) fn make(&mut self, mut mv: ChessMove, from: Square, to: Square, moved: ChessPiece) {
        let mover = self.turn;
        mv.set_player(mover);
        // resolved while the king still stands on `from`
        let rook = if mv.is_castle() {
            self.castling_rook(from, to, mv.move_type())
        } else {
            None
        };

        let captured = match mv.move_type() {
            MoveType::EnPassant => {
                let victim = Square::new(to.file(), from.rank());
                self.bitboards
                    .set_piece_at(victim, None)
                    .map(|piece| (victim, piece))
            }
            _ => self.bitboards.piece_at(to).map(|piece| (to, piece)),
        };

        let placed = match (mv.move_type(), mv.promotion()) {
            (MoveType::PawnPromote, Some(promotion)) => {
                ChessPiece::new(mover, Piece::from(promotion))
            }
            _ => moved,
        };
        self.bitboards.set_piece_at(from, None);
        self.bitboards.set_piece_at(to, Some(placed));

        if let Some((rook_from, rook_to)) = rook {
            let piece = self.bitboards.set_piece_at(rook_from, None);
            self.bitboards.set_piece_at(rook_to, piece);
        }

        let mut advantage = 0;
        if placed != moved {
            advantage += mover.sign() * (placed.piece().value() - moved.piece().value());
        }
        if let Some((_, piece)) = captured {
            advantage -= piece.signed_value();
        }

        self.history.push(UndoEntry {
            mv,
            moved: Some((from, to, moved)),
            captured,
            rook,
            draw_counter: self.draw_counter,
            pass_count: self.pass_count,
            advantage,
        });
        self.draw_counter = if moved.piece().is_pawn() || captured.is_some() {
            0
        } else {
            self.draw_counter + 1
        };
        self.pass_count = 0;
        self.advantage += advantage;
        self.turn = !self.turn;
        self.status = None;
    }

    fn unmake(&mut self, entry: &UndoEntry) {
        if let Some((from, to, moved)) = entry.moved {
            if let Some((rook_from, rook_to)) = entry.rook {
                let piece = self.bitboards.set_piece_at(rook_to, None);
                self.bitboards.set_piece_at(rook_from, piece);
            }
            self.bitboards.set_piece_at(to, None);
            self.bitboards.set_piece_at(from, Some(moved));
            if let Some((square, piece)) = entry.captured {
                self.bitboards.set_piece_at(square, Some(piece));
            }
        }
        self.advantage -= entry.advantage;
        self.draw_counter = entry.draw_counter;
        self.pass_count = entry.pass_count;
        self.turn = !self.turn;
        self.status = None;
    }

    /// Where the rook for a castle from `king` to `to` stands and where
    /// it lands: the first piece along the king's path must be one of
    /// the king's rooks, and it ends up on the far side of `to`.
    pub(super) fn castling_rook(
        &self,
        king: Square,
        to: Square,
        move_type: MoveType,
    ) -> Option<(Square, Square)> {
        let (outward, inward) = match move_type {
            MoveType::CastleKingSide => (Direction::Right, Direction::Left),
            MoveType::CastleQueenSide => (Direction::Left, Direction::Right),
            _ => return None,
        };
        let color = self.bitboards.player_at(king)?;
        let rook_from = self.first_piece(king, outward)?;
        if self.bitboards.piece_at(rook_from) != Some(ChessPiece::new(color, Piece::Rook)) {
            return None;
        }
        Some((rook_from, (to + inward)?))
    }

    pub(super) fn first_piece(&self, from: Square, direction: Direction) -> Option<Square> {
        let occupied = self.bitboards.occupied();
        let mut next = from + direction;
        while let Some(square) = next {
            if occupied.contains(square) {
                return Some(square);
            }
            next = square + direction;
        }
        None
    }

    /// Whether the most recent move was `color` advancing a pawn two
    /// squares onto `square`.
    pub(super) fn last_move_was_double_push(&self, color: Color, square: Square) -> bool {
        match self.history.last().and_then(|entry| entry.moved) {
            Some((from, to, piece)) => {
                piece == ChessPiece::new(color, Piece::Pawn)
                    && to == square
                    && (to.rank() - from.rank()).abs() == 2
            }
            None => false,
        }
    }

    /// Whether any applied move ended on `square`.
    pub(super) fn has_been_landed_on(&self, square: Square) -> bool {
        let position = square.position();
        self.history.iter().any(|entry| entry.mv.end() == position)
    }
}
