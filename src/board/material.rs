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
use std::fmt;
use std::ops::{Index, IndexMut, Not};
use strum_macros::Display;
use strum_macros::EnumIter;

/// A piece of a given color standing on the board.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessPiece {
    color: Color,
    piece: Piece,
}

impl ChessPiece {
    pub const WK: Self = Self::white(King);
    pub const WQ: Self = Self::white(Queen);
    pub const WR: Self = Self::white(Rook);
    pub const WB: Self = Self::white(Bishop);
    pub const WN: Self = Self::white(Knight);
    pub const WP: Self = Self::white(Pawn);

    pub const BK: Self = Self::black(King);
    pub const BQ: Self = Self::black(Queen);
    pub const BR: Self = Self::black(Rook);
    pub const BB: Self = Self::black(Bishop);
    pub const BN: Self = Self::black(Knight);
    pub const BP: Self = Self::black(Pawn);

    #[inline]
    pub const fn new(color: Color, piece: Piece) -> Self {
        Self { color, piece }
    }

    #[inline]
    pub const fn white(piece: Piece) -> Self {
        Self::new(White, piece)
    }

    #[inline]
    pub const fn black(piece: Piece) -> Self {
        Self::new(Black, piece)
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// Material value signed towards white: positive for white pieces,
    /// negative for black ones.
    #[inline]
    pub const fn signed_value(&self) -> i32 {
        self.color.sign() * self.piece.value()
    }

    /// Diagram letter, uppercase for white and lowercase for black.
    pub const fn to_char(&self) -> char {
        let c = self.piece.to_char();
        match self.color {
            White => c.to_ascii_uppercase(),
            Black => c,
        }
    }
}

impl fmt::Display for ChessPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.piece)
    }
}

use Color::{Black, White};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    /// Player number: 1 for white, 2 for black.
    pub const fn number(&self) -> u8 {
        match self {
            White => 1,
            Black => 2,
        }
    }
    /// +1 for white, -1 for black.
    pub const fn sign(&self) -> i32 {
        match self {
            White => 1,
            Black => -1,
        }
    }
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pair<T>((T, T));

impl<T> Index<Color> for Pair<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        match index {
            White => &self.0 .0,
            Black => &self.0 .1,
        }
    }
}

impl<T> IndexMut<Color> for Pair<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        match index {
            White => &mut self.0 .0,
            Black => &mut self.0 .1,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
use Piece::{Bishop, King, Knight, Pawn, Queen, Rook};

impl Piece {
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < 6);
        const PIECE_MAP: [Piece; 6] = [Pawn, Knight, Bishop, Rook, Queen, King];
        PIECE_MAP[index]
    }

    pub const fn to_index(&self) -> usize {
        *self as usize
    }

    /// Material value used by the advantage accumulator.
    pub const fn value(&self) -> i32 {
        match self {
            Pawn => 1,
            Knight | Bishop => 3,
            Rook => 5,
            Queen => 9,
            King => 50,
        }
    }

    /// Weight the evaluator gives to attacking a piece of this kind.
    pub const fn threat_value(&self) -> i32 {
        match self {
            Pawn => 0,
            Knight | Bishop => 1,
            Rook => 2,
            Queen => 5,
            King => 4,
        }
    }

    pub const fn to_char(&self) -> char {
        match self {
            Pawn => 'p',
            Knight => 'n',
            Bishop => 'b',
            Rook => 'r',
            Queen => 'q',
            King => 'k',
        }
    }

    pub fn is_pawn(&self) -> bool {
        matches!(*self, Pawn)
    }
    pub fn is_minor(&self) -> bool {
        matches!(*self, Knight | Bishop)
    }
}
