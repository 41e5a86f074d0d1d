//! Tests for stake handling, round resolution and restart.

use rand::SeedableRng;
use rand::rngs::StdRng;
use shell_game_logic::{
    BALL_SHELL, GameState, GameStatus, RoundOutcome, RuleError, SequenceTimings, invariants,
};

/// Runs the instant shuffle sequence so the state waits for a choice.
fn shuffle(state: &mut GameState, rng: &mut StdRng) {
    state.place_stake().expect("Stake should be valid");
    for timed in SequenceTimings::instant().shuffle_round(BALL_SHELL) {
        state.apply_step(timed.step(), rng).expect("Step should apply");
        invariants::check_all(state).expect("Invariants hold mid-sequence");
    }
}

fn stake(state: &mut GameState, amount: u32) {
    while state.balls_selected() < amount {
        state.increase_stake().expect("Stake increase failed");
    }
}

fn losing_shell(state: &GameState) -> usize {
    state
        .shells()
        .iter()
        .find(|s| !s.has_ball())
        .map(|s| s.id())
        .expect("Two shells are empty")
}

#[test]
fn test_initial_state() {
    let state = GameState::new(0);

    assert_eq!(state.status(), GameStatus::WaitForStart);
    assert_eq!(state.shell_order(), vec![0, 1, 2]);
    assert_eq!(state.ball_shell_id(), Some(1));
    assert!(state.shells().iter().all(|s| !s.is_up()));
    assert_eq!(state.score(), 5);
    assert_eq!(state.balls_amount(), 5);
    assert_eq!(state.balls_selected(), 1);
    invariants::check_all(&state).expect("Initial state is valid");
}

#[test]
fn test_stake_clamped_to_pool() {
    let mut state = GameState::new(0);

    assert!(!state.can_decrease_stake());
    assert!(matches!(
        state.decrease_stake(),
        Err(RuleError::StakeOutOfRange { stake: 0, .. })
    ));

    stake(&mut state, 5);
    assert!(!state.can_increase_stake());
    assert!(matches!(
        state.increase_stake(),
        Err(RuleError::StakeOutOfRange { stake: 6, max: 5, .. })
    ));
    assert_eq!(state.balls_selected(), 5);

    assert_eq!(state.decrease_stake(), Ok(4));
}

#[test]
fn test_stake_locked_outside_wait_for_start() {
    let mut state = GameState::new(0);
    state.place_stake().expect("Stake should be valid");

    let before = state.clone();
    assert!(matches!(
        state.increase_stake(),
        Err(RuleError::WrongStatus {
            expected: GameStatus::WaitForStart,
            actual: GameStatus::ShuffleAnimation,
        })
    ));
    assert_eq!(state, before);
}

#[test]
fn test_place_stake_deducts_balls() {
    let mut state = GameState::new(0);
    stake(&mut state, 2);

    assert_eq!(state.place_stake(), Ok(2));
    assert_eq!(state.balls_amount(), 3);
    assert_eq!(state.status(), GameStatus::ShuffleAnimation);
}

#[test]
fn test_shuffle_preserves_ids_and_ball() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = GameState::new(0);
    shuffle(&mut state, &mut rng);

    assert_eq!(state.status(), GameStatus::WaitForChoose);
    assert_eq!(state.ball_shell_id(), Some(BALL_SHELL));
    let mut ids = state.shell_order();
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn test_win_pays_double_and_raises_score() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut state = GameState::new(0);
    stake(&mut state, 2);
    shuffle(&mut state, &mut rng);
    assert_eq!(state.balls_amount(), 3);

    let outcome = state.resolve_choice(BALL_SHELL).expect("Choice is valid");

    assert_eq!(
        outcome,
        RoundOutcome::Won {
            payout: 4,
            balls_amount: 7,
            new_best: true,
        }
    );
    assert_eq!(state.balls_amount(), 7);
    assert_eq!(state.score(), 7);
    assert_eq!(state.balls_selected(), 1);
    assert_eq!(state.status(), GameStatus::WaitForStart);
    assert_eq!(state.shell_order(), vec![0, 1, 2]);
}

#[test]
fn test_small_win_keeps_score() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut state = GameState::new(0);
    shuffle(&mut state, &mut rng);

    // 5 - 1 + 2 = 6 > 5, so a stake of one still sets a new best.
    let outcome = state.resolve_choice(BALL_SHELL).expect("Choice is valid");
    assert!(matches!(outcome, RoundOutcome::Won { new_best: true, .. }));

    // Lose one, win one: 6 - 1 = 5, then 5 - 1 + 2 = 6, not above 6.
    shuffle(&mut state, &mut rng);
    let empty = losing_shell(&state);
    state.resolve_choice(empty).expect("Choice is valid");
    shuffle(&mut state, &mut rng);
    let outcome = state.resolve_choice(BALL_SHELL).expect("Choice is valid");
    assert!(matches!(
        outcome,
        RoundOutcome::Won {
            new_best: false,
            balls_amount: 6,
            ..
        }
    ));
    assert_eq!(state.score(), 6);
}

#[test]
fn test_loss_with_balls_left_resets_round() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut state = GameState::new(0);
    stake(&mut state, 3);
    shuffle(&mut state, &mut rng);

    let empty = losing_shell(&state);
    let outcome = state.resolve_choice(empty).expect("Choice is valid");

    assert_eq!(outcome, RoundOutcome::Lost { balls_amount: 2 });
    assert_eq!(state.status(), GameStatus::WaitForStart);
    assert_eq!(state.balls_selected(), 1);
    assert_eq!(state.score(), 5);
    assert_eq!(state.shell_order(), vec![0, 1, 2]);
}

#[test]
fn test_losing_last_balls_ends_game_with_high_score() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut state = GameState::new(5);

    // 5 -> 10 -> 11 -> 12
    for amount in [5, 1, 1] {
        stake(&mut state, amount);
        shuffle(&mut state, &mut rng);
        state.resolve_choice(BALL_SHELL).expect("Choice is valid");
    }
    assert_eq!(state.score(), 12);

    stake(&mut state, 12);
    shuffle(&mut state, &mut rng);
    let empty = losing_shell(&state);
    let outcome = state.resolve_choice(empty).expect("Choice is valid");

    assert_eq!(
        outcome,
        RoundOutcome::GameOver {
            score: 12,
            high_score: 12,
            new_high_score: true,
        }
    );
    assert_eq!(outcome.high_score_to_persist(), Some(12));
    assert_eq!(state.status(), GameStatus::GameOver);
    assert_eq!(state.high_score(), 12);
}

#[test]
fn test_game_over_below_high_score_keeps_it() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut state = GameState::new(50);
    stake(&mut state, 5);
    shuffle(&mut state, &mut rng);
    let empty = losing_shell(&state);

    let outcome = state.resolve_choice(empty).expect("Choice is valid");

    assert_eq!(outcome.high_score_to_persist(), None);
    assert_eq!(state.high_score(), 50);
    assert_eq!(state.status(), GameStatus::GameOver);
}

#[test]
fn test_restart_is_idempotent_from_game_over() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut state = GameState::new(0);
    stake(&mut state, 5);
    shuffle(&mut state, &mut rng);
    let empty = losing_shell(&state);
    state.resolve_choice(empty).expect("Choice is valid");
    assert_eq!(state.status(), GameStatus::GameOver);

    state.restart().expect("Restart from game over");

    assert_eq!(state.score(), 5);
    assert_eq!(state.balls_amount(), 5);
    assert_eq!(state.balls_selected(), 1);
    assert_eq!(state.status(), GameStatus::WaitForStart);
    assert_eq!(state.shell_order(), vec![0, 1, 2]);
    assert_eq!(state.high_score(), 5);

    assert!(matches!(
        state.restart(),
        Err(RuleError::WrongStatus { .. })
    ));
}

#[test]
fn test_choice_rejected_outside_wait_for_choose() {
    let mut state = GameState::new(0);
    let before = state.clone();

    assert!(matches!(
        state.resolve_choice(BALL_SHELL),
        Err(RuleError::WrongStatus {
            expected: GameStatus::WaitForChoose,
            ..
        })
    ));
    assert_eq!(state, before);
}

#[test]
fn test_unknown_shell_rejected() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut state = GameState::new(0);
    shuffle(&mut state, &mut rng);
    let before = state.clone();

    assert_eq!(state.resolve_choice(9), Err(RuleError::UnknownShell(9)));
    assert_eq!(state, before);
}

#[test]
fn test_state_serializes_for_observers() {
    let state = GameState::new(3);
    let json = serde_json::to_value(&state).expect("Serialize failed");

    assert_eq!(json["status"], "WaitForStart");
    assert_eq!(json["high_score"], 3);
    assert_eq!(json["shells"][1]["has_ball"], true);
}
