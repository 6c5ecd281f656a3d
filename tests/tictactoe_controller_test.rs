//! Tests for the tic-tac-toe round controller.

use std::time::Duration;

use rapidread::GameOutcome;
use rapidread::games::tictactoe::{
    Effect, Event, GameEvent, Mark, Phase, Position, Square, TicTacToeController,
};

const DELAY: Duration = Duration::from_millis(500);

fn counts(game: &TicTacToeController) -> (usize, usize) {
    let squares = game.board().squares();
    let x = squares.iter().filter(|s| **s == Square::Occupied(Mark::X)).count();
    let o = squares.iter().filter(|s| **s == Square::Occupied(Mark::O)).count();
    (x, o)
}

/// Plays one game, the user always taking the first free square.
fn play_out(game: &mut TicTacToeController) -> GameOutcome {
    loop {
        assert_eq!(game.to_move(), Some(Mark::X));
        let pos = Position::valid_moves(game.board())[0];
        match game.apply(Event::CellSelected(pos)) {
            Effect::Finished(outcome) => return outcome,
            Effect::ScheduleOpponent { round, after } => {
                assert_eq!(after, DELAY);
                assert_eq!(game.to_move(), Some(Mark::O));
                let (x, o) = counts(game);
                assert_eq!(x, o + 1);

                match game.apply(Event::OpponentDue(round)) {
                    Effect::Finished(outcome) => return outcome,
                    Effect::OpponentMoved(_) => {
                        let (x, o) = counts(game);
                        assert_eq!(x, o);
                    }
                    other => panic!("unexpected effect {:?}", other),
                }
            }
            other => panic!("unexpected effect {:?}", other),
        }
    }
}

#[test]
fn test_seeded_games_alternate_and_terminate() {
    for seed in 0..50 {
        let mut game = TicTacToeController::seeded(DELAY, seed);
        let outcome = play_out(&mut game);

        assert_eq!(game.phase(), Phase::Terminal(outcome));
        assert_eq!(game.to_move(), None);
        assert!(game.status().is_some());
        assert_eq!(game.history().len(), 1);
        assert_eq!(*game.history().entries()[0].outcome(), outcome);
    }
}

#[test]
fn test_input_locked_after_game_over() {
    let mut game = TicTacToeController::seeded(DELAY, 4);
    play_out(&mut game);

    let before = game.board().clone();
    for pos in Position::ALL {
        assert_eq!(game.apply(Event::CellSelected(pos)), Effect::Ignored);
    }
    assert_eq!(game.board(), &before);
}

#[test]
fn test_history_grows_across_resets() {
    let mut game = TicTacToeController::seeded(DELAY, 9);
    for played in 1..=4 {
        play_out(&mut game);
        assert_eq!(game.history().len(), played);

        let effect = game.apply(Event::Reset);
        assert!(matches!(effect, Effect::Reset { .. }));
        assert_eq!(game.history().len(), played);
        assert_eq!(game.board().occupied(), 0);
        assert_eq!(game.phase(), Phase::AwaitingUser);
        assert_eq!(game.status(), None);
    }
}

#[test]
fn test_reset_mid_game_drops_stale_reply() {
    let mut game = TicTacToeController::seeded(DELAY, 1);
    let Effect::ScheduleOpponent { round, .. } = game.apply(Event::CellSelected(Position::Center))
    else {
        panic!("expected a scheduled reply");
    };

    let Effect::Reset { round: fresh } = game.apply(Event::Reset) else {
        panic!("expected reset");
    };
    assert_ne!(round, fresh);

    assert_eq!(game.apply(Event::OpponentDue(round)), Effect::Ignored);
    assert_eq!(game.board().occupied(), 0);
    assert!(game.history().is_empty());
}

#[test]
fn test_moves_ignored_while_cpu_thinks() {
    let mut game = TicTacToeController::seeded(DELAY, 1);
    game.apply(Event::CellSelected(Position::TopLeft));
    assert_eq!(
        game.apply(Event::CellSelected(Position::TopRight)),
        Effect::Ignored
    );
    assert_eq!(game.board().occupied(), 1);
}

#[test]
fn test_subscribers_see_moves_and_result() {
    let mut game = TicTacToeController::seeded(DELAY, 2);
    let mut rx = game.subscribe();
    let outcome = play_out(&mut game);

    let mut moves = 0;
    let mut finished = None;
    while let Ok(event) = rx.try_recv() {
        match event {
            GameEvent::MoveMade { .. } => moves += 1,
            GameEvent::Finished(o) => finished = Some(o),
            GameEvent::Reset(_) => {}
        }
    }
    assert_eq!(moves, game.board().occupied());
    assert_eq!(finished, Some(outcome));
}
