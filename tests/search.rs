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

use std::thread;

use minimax_chess::Square::*;
use minimax_chess::*;

// Plain minimax without pruning, breaking ties the same way.
fn minimax<B: GameBoard>(board: &mut B, depth: u32, maximize: bool) -> BestMove<B::Move> {
    if depth == 0 || board.is_finished() {
        return BestMove {
            weight: board.board_weight(),
            mv: None,
        };
    }
    let mut best = BestMove {
        weight: if maximize { i64::MIN } else { i64::MAX },
        mv: None,
    };
    for mv in board.possible_moves() {
        let reply = board
            .try_move(mv.clone(), |b| minimax(b, depth - 1, !maximize))
            .unwrap();
        let better = if maximize {
            reply.weight > best.weight
        } else {
            reply.weight < best.weight
        };
        if better {
            best = BestMove {
                weight: reply.weight,
                mv: Some(mv),
            };
        }
    }
    best
}

fn positions() -> Vec<ChessBoard> {
    let mut opening = ChessBoard::new();
    opening
        .play_all(["(e2, e4)", "(e7, e5)", "(g1, f3)", "(b8, c6)"])
        .unwrap();

    let mut tactical = ChessBoard::new();
    tactical
        .play_all([
            "(e2, e4)", "(e7, e5)", "(d1, h5)", "(b8, c6)", "(f1, c4)", "(g8, f6)",
        ])
        .unwrap();

    let endgame = ChessBoard::from_placement([
        (E1.position(), ChessPiece::WK),
        (E8.position(), ChessPiece::BK),
        (D4.position(), ChessPiece::WR),
        (C6.position(), ChessPiece::BN),
        (B2.position(), ChessPiece::WP),
        (G7.position(), ChessPiece::BP),
    ])
    .unwrap()
    .with_turn(Color::Black);

    vec![ChessBoard::new(), opening, tactical, endgame]
}

#[test]
fn test_pruning_matches_minimax() {
    for mut board in positions() {
        let maximize = GameBoard::is_maximizing(&board);
        let expected = minimax(&mut board, 2, maximize);
        let actual = MinimaxAi::new(2).search(&mut board).unwrap();
        assert_eq!(actual, expected, "\n{}", board);
    }
}

#[test]
fn test_pruning_matches_minimax_three_plies() {
    let mut board = positions().pop().unwrap();
    let expected = minimax(&mut board, 3, false);
    let actual = MinimaxAi::new(3).search(&mut board).unwrap();
    assert_eq!(actual.weight, expected.weight);
    assert_eq!(actual.mv, expected.mv);
}

#[test]
fn test_search_is_deterministic() {
    for board in positions() {
        let mut first = board.clone();
        let mut second = board.clone();
        let a = MinimaxAi::new(3).find_best_move(&mut first).unwrap();
        let b = MinimaxAi::new(3).find_best_move(&mut second).unwrap();
        assert_eq!(a, b);
        assert_eq!(first, board);
    }
}

#[test]
fn test_search_on_worker_thread() {
    let mut board = ChessBoard::new();
    let handle = thread::spawn(move || {
        let mv = MinimaxAi::new(2).find_best_move(&mut board).unwrap();
        (board, mv)
    });
    let (board, mv) = handle.join().unwrap();
    assert_eq!(board, ChessBoard::new());
    let mut check = ChessBoard::new();
    assert!(check.possible_moves().contains(&mv.unwrap()));
}
