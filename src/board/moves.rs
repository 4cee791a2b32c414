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
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use strum_macros::EnumIter;
use thiserror::Error;

use super::material::{Color, Piece};
use super::square::BoardPosition;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Not a legal move")]
    InvalidMove,
    #[error("Cannot parse move '{0}'")]
    Notation(String),
}
use MoveError::*;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveType {
    Normal,
    EnPassant,
    CastleKingSide,
    CastleQueenSide,
    PawnPromote,
}

/// Pieces a pawn may promote to, in the order moves are generated.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Promotion {
    Rook,
    Knight,
    Bishop,
    Queen,
}

impl From<Promotion> for Piece {
    fn from(value: Promotion) -> Self {
        match value {
            Promotion::Queen => Piece::Queen,
            Promotion::Rook => Piece::Rook,
            Promotion::Bishop => Piece::Bishop,
            Promotion::Knight => Piece::Knight,
        }
    }
}

impl TryFrom<Piece> for Promotion {
    type Error = MoveError;

    fn try_from(value: Piece) -> Result<Self, Self::Error> {
        match value {
            Piece::Queen => Ok(Promotion::Queen),
            Piece::Rook => Ok(Promotion::Rook),
            Piece::Bishop => Ok(Promotion::Bishop),
            Piece::Knight => Ok(Promotion::Knight),
            _ => Err(InvalidMove),
        }
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Piece::from(*self))
    }
}

impl FromStr for Promotion {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "queen" | "q" => Ok(Promotion::Queen),
            "rook" | "r" => Ok(Promotion::Rook),
            "bishop" | "b" => Ok(Promotion::Bishop),
            "knight" | "n" => Ok(Promotion::Knight),
            _ => Err(Notation(s.to_string())),
        }
    }
}

/// A move from `start` to `end`. Two moves are equal when they share
/// start, end and promotion piece; the move type and the recorded player
/// are annotations and do not take part in comparisons.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct ChessMove {
    start: BoardPosition,
    end: BoardPosition,
    move_type: MoveType,
    promotion: Option<Promotion>,
    player: Option<Color>,
}

impl ChessMove {
    const fn with(start: BoardPosition, end: BoardPosition, move_type: MoveType) -> Self {
        Self {
            start,
            end,
            move_type,
            promotion: None,
            player: None,
        }
    }

    pub fn normal(start: impl Into<BoardPosition>, end: impl Into<BoardPosition>) -> Self {
        Self::with(start.into(), end.into(), MoveType::Normal)
    }

    pub fn en_passant(start: impl Into<BoardPosition>, end: impl Into<BoardPosition>) -> Self {
        Self::with(start.into(), end.into(), MoveType::EnPassant)
    }

    pub fn castle(
        start: impl Into<BoardPosition>,
        end: impl Into<BoardPosition>,
        king_side: bool,
    ) -> Self {
        let move_type = if king_side {
            MoveType::CastleKingSide
        } else {
            MoveType::CastleQueenSide
        };
        Self::with(start.into(), end.into(), move_type)
    }

    pub fn promote(
        start: impl Into<BoardPosition>,
        end: impl Into<BoardPosition>,
        promotion: Promotion,
    ) -> Self {
        Self {
            promotion: Some(promotion),
            ..Self::with(start.into(), end.into(), MoveType::PawnPromote)
        }
    }

    /// A move that moves nothing and only hands the turn over.
    pub const fn pass() -> Self {
        Self::with(BoardPosition::PASS, BoardPosition::PASS, MoveType::Normal)
    }

    #[inline]
    pub fn start(&self) -> BoardPosition {
        self.start
    }
    #[inline]
    pub fn end(&self) -> BoardPosition {
        self.end
    }
    #[inline]
    pub fn move_type(&self) -> MoveType {
        self.move_type
    }
    #[inline]
    pub fn promotion(&self) -> Option<Promotion> {
        self.promotion
    }
    /// The side that made this move, once it has been applied.
    #[inline]
    pub fn player(&self) -> Option<Color> {
        self.player
    }
    #[inline]
    pub fn is_pass(&self) -> bool {
        self.start.is_pass() || self.end.is_pass()
    }
    #[inline]
    pub fn is_castle(&self) -> bool {
        matches!(
            self.move_type,
            MoveType::CastleKingSide | MoveType::CastleQueenSide
        )
    }

    pub(super) fn set_player(&mut self, player: Color) {
        self.player = Some(player);
    }
}

impl PartialEq for ChessMove {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end && self.promotion == other.promotion
    }
}

impl Eq for ChessMove {}

impl Hash for ChessMove {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        self.promotion.hash(state);
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pass() {
            return write!(f, "(pass)");
        }
        match self.promotion {
            Some(promotion) => write!(f, "({}, {}, {})", self.start, self.end, promotion),
            None => write!(f, "({}, {})", self.start, self.end),
        }
    }
}

/// Parses `(e2, e4)` and `(a7, a8, Queen)`. The parentheses are optional.
/// A parsed move is only a request: `ChessBoard::resolve_move` finds the
/// legal move it names.
impl FromStr for ChessMove {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .trim();
        if inner.eq_ignore_ascii_case("pass") {
            return Ok(Self::pass());
        }
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let square = |text: &str| -> Result<BoardPosition, MoveError> {
            text.parse().map_err(|_| Notation(s.to_string()))
        };
        match parts.as_slice() {
            [start, end] => Ok(Self::normal(square(start)?, square(end)?)),
            [start, end, promotion] => {
                let promotion = promotion.parse().map_err(|_| Notation(s.to_string()))?;
                Ok(Self::promote(square(start)?, square(end)?, promotion))
            }
            _ => Err(Notation(s.to_string())),
        }
    }
}
