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
use strum::IntoEnumIterator;

use super::material::{ChessPiece, Color, Pair, Piece};
use super::square::{Mask, Square};

use Color::*;

/// Twelve occupancy masks, one per (color, piece). Every square is set
/// in at most one of them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bitboards {
    masks: Pair<[Mask; 6]>,
}

impl Bitboards {
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mask(&self, piece: ChessPiece) -> Mask {
        self.masks[piece.color()][piece.piece().to_index()]
    }

    pub fn occupied_by(&self, color: Color) -> Mask {
        self.masks[color]
            .iter()
            .fold(Mask::empty(), |acc, mask| acc | *mask)
    }

    #[inline]
    pub fn occupied(&self) -> Mask {
        self.occupied_by(White) | self.occupied_by(Black)
    }

    pub fn piece_at(&self, square: Square) -> Option<ChessPiece> {
        for color in Color::iter() {
            for (index, mask) in self.masks[color].iter().enumerate() {
                if mask.contains(square) {
                    return Some(ChessPiece::new(color, Piece::from_index(index)));
                }
            }
        }
        None
    }

    pub fn player_at(&self, square: Square) -> Option<Color> {
        Color::iter().find(|color| self.occupied_by(*color).contains(square))
    }

    /// Clears `square` from every mask, then sets it in the mask for
    /// `piece` (if any). Returns what was there before.
    pub fn set_piece_at(&mut self, square: Square, piece: Option<ChessPiece>) -> Option<ChessPiece> {
        let previous = self.piece_at(square);
        for color in Color::iter() {
            for mask in self.masks[color].iter_mut() {
                mask.reset(square);
            }
        }
        if let Some(piece) = piece {
            self.masks[piece.color()][piece.piece().to_index()].set(square);
        }
        previous
    }

    #[inline]
    pub fn positions_of(&self, piece: ChessPiece) -> impl Iterator<Item = Square> {
        self.mask(piece).iter()
    }

    /// The square of `color`'s king, if it has one.
    #[inline]
    pub fn king(&self, color: Color) -> Option<Square> {
        self.mask(ChessPiece::new(color, Piece::King)).iter().next()
    }

    pub fn count(&self, piece: ChessPiece) -> usize {
        self.mask(piece).len()
    }

    /// Every occupied square with its piece, in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, ChessPiece)> + '_ {
        self.occupied()
            .iter()
            .filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square::*;

    #[test]
    fn test_set_and_query() {
        let mut boards = Bitboards::empty();
        assert_eq!(boards.set_piece_at(E4, Some(ChessPiece::WN)), None);
        assert_eq!(boards.piece_at(E4), Some(ChessPiece::WN));
        assert_eq!(boards.player_at(E4), Some(White));
        assert_eq!(boards.piece_at(E5), None);
        assert_eq!(boards.player_at(E5), None);
    }
    #[test]
    fn test_set_is_exclusive() {
        let mut boards = Bitboards::empty();
        boards.set_piece_at(D4, Some(ChessPiece::WQ));
        let previous = boards.set_piece_at(D4, Some(ChessPiece::BP));
        assert_eq!(previous, Some(ChessPiece::WQ));
        assert!(boards.mask(ChessPiece::WQ).is_empty());
        assert_eq!(boards.occupied().len(), 1);
        boards.set_piece_at(D4, None);
        assert!(boards.occupied().is_empty());
    }
    #[test]
    fn test_positions_and_king() {
        let mut boards = Bitboards::empty();
        boards.set_piece_at(A2, Some(ChessPiece::WP));
        boards.set_piece_at(H2, Some(ChessPiece::WP));
        boards.set_piece_at(E1, Some(ChessPiece::WK));
        let pawns: Vec<_> = boards.positions_of(ChessPiece::WP).collect();
        assert_eq!(pawns.len(), 2);
        assert!(pawns.contains(&A2) && pawns.contains(&H2));
        assert_eq!(boards.king(White), Some(E1));
        assert_eq!(boards.king(Black), None);
        assert_eq!(boards.occupied_by(White).len(), 3);
    }
}
