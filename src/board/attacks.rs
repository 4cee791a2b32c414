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

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use super::bitboards::Bitboards;
use super::material::{ChessPiece, Color, Piece};
use super::square::{Direction, Mask, Offset, Square};

use Color::*;
use Piece::*;

impl Bitboards {
    /// Squares a piece standing on `from` bears on. Sliding rays stop at
    /// the first occupied square and include it, whoever owns it.
    pub fn attacks_from(&self, from: Square, piece: ChessPiece) -> Mask {
        let occupied = self.occupied();
        match piece.piece() {
            King => KING_MOVES[from],
            Knight => KNIGHT_MOVES[from],
            Pawn => pawn_attacks(piece.color(), from),
            Rook => rays(from, Direction::horizontals(), occupied),
            Bishop => rays(from, Direction::diagonals(), occupied),
            Queen => rays(from, Direction::all(), occupied),
        }
    }

    /// Squares held by the opponent of `by` that `by` attacks. Empty
    /// squares are never part of the set.
    pub fn attacked_squares(&self, by: Color) -> Mask {
        let mut attacked = Mask::empty();
        for piece in Piece::iter() {
            let material = ChessPiece::new(by, piece);
            for from in self.positions_of(material) {
                attacked |= self.attacks_from(from, material);
            }
        }
        attacked & self.occupied_by(!by)
    }

    #[inline]
    pub fn is_threatened(&self, square: Square, by: Color) -> bool {
        self.attacked_squares(by).contains(square)
    }

    /// Whether `color`'s king is attacked. A side with no king is never
    /// in check.
    pub fn is_king_attacked(&self, color: Color) -> bool {
        self.king(color)
            .map(|king| self.is_threatened(king, !color))
            .unwrap_or(false)
    }
}

#[inline]
pub(super) fn pawn_attacks(color: Color, from: Square) -> Mask {
    match color {
        White => WHITE_PAWN_ATTACKS[from],
        Black => BLACK_PAWN_ATTACKS[from],
    }
}

/// Walks each direction from `from` until the edge or the first
/// occupied square, which is included.
pub(super) fn rays<I>(from: Square, directions: I, occupied: Mask) -> Mask
where
    I: IntoIterator<Item = Direction>,
{
    let mut mask = Mask::empty();
    for direction in directions {
        let mut next = from + direction;
        while let Some(square) = next {
            mask |= square;
            if occupied.contains(square) {
                break;
            }
            next = square + direction;
        }
    }
    mask
}

static KING_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    let mut array = [Mask::default(); 64];
    for square in Square::iter() {
        array[square] = Mask::from_squares(Direction::all().filter_map(|d| square + d));
    }
    array
});

static KNIGHT_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    const OFFSETS: [Offset; 8] = [
        Offset::new(-2, -1),
        Offset::new(-2, 1),
        Offset::new(2, -1),
        Offset::new(2, 1),
        Offset::new(-1, -2),
        Offset::new(-1, 2),
        Offset::new(1, -2),
        Offset::new(1, 2),
    ];
    let mut array = [Mask::default(); 64];
    for square in Square::iter() {
        array[square] =
            Mask::from_squares(OFFSETS.into_iter().filter_map(|offset| square + offset));
    }
    array
});

static WHITE_PAWN_ATTACKS: Lazy<[Mask; 64]> = Lazy::new(|| {
    let mut array = [Mask::default(); 64];
    for square in Square::iter() {
        array[square] = Mask::from_squares(
            [Direction::UpLeft, Direction::UpRight]
                .into_iter()
                .filter_map(|d| square + d),
        );
    }
    array
});

static BLACK_PAWN_ATTACKS: Lazy<[Mask; 64]> = Lazy::new(|| {
    let mut array = [Mask::default(); 64];
    for square in Square::iter() {
        array[square] = Mask::from_squares(
            [Direction::DownLeft, Direction::DownRight]
                .into_iter()
                .filter_map(|d| square + d),
        );
    }
    array
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square::*;

    fn boards(pieces: &[(Square, ChessPiece)]) -> Bitboards {
        let mut boards = Bitboards::empty();
        for (square, piece) in pieces {
            boards.set_piece_at(*square, Some(*piece));
        }
        boards
    }

    #[test]
    fn test_knight_table() {
        assert_eq!(KNIGHT_MOVES[A1], Mask::from_squares([B3, C2]));
        assert_eq!(KNIGHT_MOVES[E4].len(), 8);
    }
    #[test]
    fn test_pawn_tables() {
        assert_eq!(WHITE_PAWN_ATTACKS[E2], Mask::from_squares([D3, F3]));
        assert_eq!(BLACK_PAWN_ATTACKS[A7], Mask::from_squares([B6]));
        assert!(WHITE_PAWN_ATTACKS[C8].is_empty());
    }
    #[test]
    fn test_rook_ray_stops_at_blocker() {
        let b = boards(&[(A1, ChessPiece::WR), (A4, ChessPiece::BP), (C1, ChessPiece::WN)]);
        let attacks = b.attacks_from(A1, ChessPiece::WR);
        assert_eq!(attacks, Mask::from_squares([A2, A3, A4, B1, C1]));
    }
    #[test]
    fn test_attacked_squares_only_enemy() {
        let b = boards(&[
            (A1, ChessPiece::WR),
            (A4, ChessPiece::BP),
            (C1, ChessPiece::WN),
            (B3, ChessPiece::BN),
        ]);
        // c1 is our own knight and a2, a3, b1 are empty
        assert_eq!(b.attacked_squares(White), Mask::from_squares([A4, B3]));
    }
    #[test]
    fn test_king_attacked() {
        let b = boards(&[
            (E1, ChessPiece::WK),
            (E8, ChessPiece::BK),
            (E5, ChessPiece::BQ),
        ]);
        assert!(b.is_king_attacked(White));
        assert!(!b.is_king_attacked(Black));
        let b = boards(&[
            (E1, ChessPiece::WK),
            (E8, ChessPiece::BK),
            (E5, ChessPiece::BQ),
            (E3, ChessPiece::WP),
        ]);
        assert!(!b.is_king_attacked(White));
    }
    #[test]
    fn test_pawn_attacks_forward_only() {
        let b = boards(&[(D4, ChessPiece::WP), (C5, ChessPiece::BN), (C3, ChessPiece::BN)]);
        assert!(b.is_threatened(C5, White));
        assert!(!b.is_threatened(C3, White));
    }
}
