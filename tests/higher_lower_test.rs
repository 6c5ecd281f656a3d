//! Tests for the higher/lower rules and session controller.

use rapidread::GameOutcome;
use rapidread::games::higher_lower::{
    Effect, Event, Guess, HigherLowerController, MAX_NUMBER, MIN_NUMBER, Phase, REVEAL_DELAY,
    ROUNDS, is_correct, session_outcome,
};

#[test]
fn test_higher_is_correct_when_next_is_bigger() {
    assert!(is_correct(Guess::Higher, 10, 15));
    assert!(!is_correct(Guess::Lower, 10, 15));
}

#[test]
fn test_equal_numbers_never_score() {
    assert!(!is_correct(Guess::Higher, 10, 10));
    assert!(!is_correct(Guess::Lower, 10, 10));
}

#[test]
fn test_session_thresholds() {
    assert_eq!(session_outcome(5), GameOutcome::Win);
    assert_eq!(session_outcome(3), GameOutcome::Win);
    assert_eq!(session_outcome(2), GameOutcome::Draw);
    assert_eq!(session_outcome(1), GameOutcome::Loss);
    assert_eq!(session_outcome(0), GameOutcome::Loss);
}

/// Plays a full session with `pick`, checking each reveal against the rules.
fn play_session(
    game: &mut HigherLowerController,
    pick: impl Fn(u8) -> Guess,
) -> (u32, GameOutcome) {
    let mut expected_score = 0;
    for round in 0..ROUNDS {
        assert_eq!(game.phase(), Phase::AwaitingGuess);
        assert_eq!(game.played(), round);
        assert_eq!(game.revealed(), None);

        let current = game.current();
        assert!((MIN_NUMBER..=MAX_NUMBER).contains(&current));

        let guess = pick(current);
        let Effect::ScheduleReveal { round: session, after, correct } =
            game.apply(Event::Guess(guess))
        else {
            panic!("expected a scheduled reveal");
        };
        assert_eq!(after, REVEAL_DELAY);

        let next = game.revealed().expect("next number shown during reveal");
        assert_eq!(correct, is_correct(guess, current, next));
        if correct {
            expected_score += 1;
        }
        assert_eq!(game.score(), expected_score);

        // A second guess during the reveal is ignored.
        assert_eq!(game.apply(Event::Guess(guess)), Effect::Ignored);

        match game.apply(Event::RevealElapsed(session)) {
            Effect::NextRound { played } => {
                assert_eq!(played, round + 1);
                assert_eq!(game.current(), next);
            }
            Effect::Finished(outcome) => {
                assert_eq!(round + 1, ROUNDS);
                return (expected_score, outcome);
            }
            other => panic!("unexpected effect {:?}", other),
        }
    }
    unreachable!("session must finish after {} rounds", ROUNDS)
}

#[test]
fn test_full_session_scores_and_records() {
    for seed in 0..20 {
        let mut game = HigherLowerController::seeded(REVEAL_DELAY, seed);
        let (score, outcome) =
            play_session(&mut game, |n| if n <= 10 { Guess::Higher } else { Guess::Lower });

        assert_eq!(outcome, session_outcome(score));
        assert_eq!(game.phase(), Phase::RoundOver(outcome));
        assert!(game.status().is_some());
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.apply(Event::Guess(Guess::Higher)), Effect::Ignored);
    }
}

#[test]
fn test_replay_starts_fresh_and_keeps_history() {
    let mut game = HigherLowerController::seeded(REVEAL_DELAY, 7);
    play_session(&mut game, |_| Guess::Higher);
    let before = game.session();

    let Effect::Replayed { round } = game.apply(Event::Replay) else {
        panic!("expected replay");
    };
    assert_ne!(round, before);
    assert_eq!(game.score(), 0);
    assert_eq!(game.played(), 0);
    assert_eq!(game.phase(), Phase::AwaitingGuess);
    assert_eq!(game.history().len(), 1);

    play_session(&mut game, |_| Guess::Lower);
    assert_eq!(game.history().len(), 2);
}

#[test]
fn test_reveal_from_previous_session_is_dropped() {
    let mut game = HigherLowerController::seeded(REVEAL_DELAY, 3);
    let Effect::ScheduleReveal { round: stale, .. } = game.apply(Event::Guess(Guess::Higher))
    else {
        panic!("expected a scheduled reveal");
    };
    game.apply(Event::Replay);

    assert_eq!(game.apply(Event::RevealElapsed(stale)), Effect::Ignored);
    assert_eq!(game.played(), 0);
    assert_eq!(game.phase(), Phase::AwaitingGuess);
}
