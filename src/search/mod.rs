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

//! Computer players.
//!
//! `MinimaxAi` searches a fixed number of plies with alpha-beta pruning.
//! The side the board weight favours maximizes it and the other side
//! minimizes it. Moves are
//! tried in the order the board generates them and only a strictly
//! better score replaces the current choice, so the first of several
//! equally good moves wins and a search is repeatable.

use anyhow::Result;
#[cfg(feature = "random")]
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, trace};

use crate::game::GameBoard;

/// Plies searched by `MinimaxAi::default()`.
pub const DEFAULT_SEARCH_DEPTH: u32 = 4;

/// Picks a move for the side to move.
pub trait GameAi<B: GameBoard> {
    /// The chosen move, or `None` when the game is over. The board is
    /// left as it was found.
    fn find_best_move(&mut self, board: &mut B) -> Result<Option<B::Move>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMove<M> {
    pub weight: i64,
    pub mv: Option<M>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimaxAi {
    depth: u32,
}

impl Default for MinimaxAi {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH)
    }
}

impl MinimaxAi {
    /// A searcher looking `depth` plies ahead. A depth of 0 is raised to
    /// 1 so a live position always yields a move.
    pub fn new(depth: u32) -> Self {
        Self {
            depth: depth.max(1),
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Searches `board` and returns the chosen move with its score.
    pub fn search<B: GameBoard>(&self, board: &mut B) -> Result<BestMove<B::Move>> {
        let maximize = board.is_maximizing();
        let best = alpha_beta(board, self.depth, maximize, i64::MIN, i64::MAX)?;
        debug!(
            depth = self.depth,
            weight = best.weight,
            mv = ?best.mv,
            "minimax search"
        );
        Ok(best)
    }
}

impl<B: GameBoard> GameAi<B> for MinimaxAi {
    fn find_best_move(&mut self, board: &mut B) -> Result<Option<B::Move>> {
        Ok(self.search(board)?.mv)
    }
}

// Fail-hard: a cut-off reports the bound that caused it.
fn alpha_beta<B: GameBoard>(
    board: &mut B,
    depth: u32,
    maximize: bool,
    mut alpha: i64,
    mut beta: i64,
) -> Result<BestMove<B::Move>> {
    if depth == 0 || board.is_finished() {
        return Ok(BestMove {
            weight: board.board_weight(),
            mv: None,
        });
    }
    let mut best = None;
    for mv in board.possible_moves() {
        let reply =
            board.try_move(mv.clone(), |b| alpha_beta(b, depth - 1, !maximize, alpha, beta))??;
        if maximize && reply.weight > alpha {
            alpha = reply.weight;
            best = Some(mv.clone());
        } else if !maximize && reply.weight < beta {
            beta = reply.weight;
            best = Some(mv.clone());
        }
        if alpha >= beta {
            trace!(depth, alpha, beta, "cut-off");
            return Ok(BestMove {
                weight: if maximize { beta } else { alpha },
                mv: Some(mv),
            });
        }
    }
    Ok(BestMove {
        weight: if maximize { alpha } else { beta },
        mv: best,
    })
}

/// Plays a uniformly random legal move.
#[cfg(feature = "random")]
#[derive(Debug, Clone)]
pub struct RandomAi {
    rng: StdRng,
}

#[cfg(feature = "random")]
impl Default for RandomAi {
    fn default() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

#[cfg(feature = "random")]
impl RandomAi {
    /// A player whose choices are fixed by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[cfg(feature = "random")]
impl<B: GameBoard> GameAi<B> for RandomAi {
    fn find_best_move(&mut self, board: &mut B) -> Result<Option<B::Move>> {
        if board.is_finished() {
            return Ok(None);
        }
        Ok(board.possible_moves().choose(&mut self.rng).cloned())
    }
}
