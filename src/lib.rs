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

//! A chess rules engine with an alpha-beta computer player.
//!
//! ```
//! use minimax_chess::{ChessBoard, GameAi, MinimaxAi};
//!
//! let mut board = ChessBoard::new();
//! board.play("(e2, e4)").unwrap();
//! let reply = MinimaxAi::new(2).find_best_move(&mut board).unwrap();
//! assert!(reply.is_some());
//! ```

pub mod board;
pub mod game;
pub mod search;

pub use board::*;
pub use game::*;
pub use search::*;
