//! Property-based tests for hand evaluation and the turn controller.

use proptest::prelude::*;

use zilch::ai::{play_turn, AiPolicy};
use zilch::dice::{Die, NUM_DICE};
use zilch::engine::{Game, Winner};
use zilch::player::Player;
use zilch::scoring::{evaluate, is_straight, n_of_a_kind_points, CombinationKind};

/// Strategy: six faces, each 1-6.
fn faces_strategy() -> impl Strategy<Value = [u8; NUM_DICE]> {
    prop::array::uniform6(1..=6u8)
}

/// Strategy: held flags for six dice.
fn held_strategy() -> impl Strategy<Value = [bool; NUM_DICE]> {
    prop::array::uniform6(any::<bool>())
}

fn to_dice(faces: [u8; NUM_DICE], held: [bool; NUM_DICE]) -> [Die; NUM_DICE] {
    let mut dice = [Die::default(); NUM_DICE];
    for i in 0..NUM_DICE {
        dice[i] = Die {
            face: faces[i],
            held: held[i],
        };
    }
    dice
}

proptest! {
    // 1. Every combination uses only unheld dice, as many as its kind says
    #[test]
    fn combinations_use_free_dice(faces in faces_strategy(), held in held_strategy()) {
        let dice = to_dice(faces, held);
        let combos = evaluate(&dice);
        prop_assert!(!combos.is_empty());
        for combo in &combos {
            prop_assert_eq!(combo.dice.len(), combo.kind.dice_count(), "{:?}", combo);
            prop_assert!(combo.points >= 0);
            for &i in &combo.dice {
                prop_assert!(i < NUM_DICE);
                prop_assert!(!held[i], "held die {} used by {:?}", i, combo);
            }
        }
    }

    // 2. Zilch is offered alone and only when nothing scores
    #[test]
    fn zilch_is_exclusive(faces in faces_strategy(), held in held_strategy()) {
        let combos = evaluate(&to_dice(faces, held));
        let zilch = combos.iter().any(|c| c.kind == CombinationKind::Zilch);
        if zilch {
            prop_assert_eq!(combos.len(), 1);
        }
        let free: Vec<u8> = (0..NUM_DICE).filter(|&i| !held[i]).map(|i| faces[i]).collect();
        if free.iter().any(|&f| f == 1 || f == 5) {
            prop_assert!(!zilch);
        }
    }

    // 3. A fresh six-dice roll never zilches
    #[test]
    fn fresh_roll_always_scores(faces in faces_strategy()) {
        let combos = evaluate(&to_dice(faces, [false; NUM_DICE]));
        prop_assert!(combos.iter().all(|c| c.kind != CombinationKind::Zilch));
    }

    // 4. Held dice do not influence the result
    #[test]
    fn held_faces_are_ignored(faces in faces_strategy(), other in faces_strategy(), held in held_strategy()) {
        let mut swapped = faces;
        for i in 0..NUM_DICE {
            if held[i] {
                swapped[i] = other[i];
            }
        }
        prop_assert_eq!(evaluate(&to_dice(faces, held)), evaluate(&to_dice(swapped, held)));
    }

    // 5. is_straight matches the sorted definition
    #[test]
    fn straight_definition(faces in faces_strategy()) {
        let mut sorted = faces;
        sorted.sort_unstable();
        prop_assert_eq!(is_straight(&faces), sorted == [1, 2, 3, 4, 5, 6]);
    }

    // 6. Each extra die of a kind doubles the value
    #[test]
    fn n_of_a_kind_doubles(face in 1..=6u8, count in 3..=5u8) {
        prop_assert_eq!(
            n_of_a_kind_points(face, count + 1),
            2 * n_of_a_kind_points(face, count)
        );
    }

    // 7. Toggling twice restores soft points and held dice
    #[test]
    fn toggle_round_trip(faces in faces_strategy(), seed in any::<u64>()) {
        let mut game = Game::with_seed(seed);
        game.roll_with_faces(&faces).unwrap();
        let dice = game.dice().clone();
        let soft = game.soft_points();
        for id in 0..game.current_combinations().len() {
            prop_assert!(game.toggle_combination(id));
            prop_assert!(game.toggle_combination(id));
            prop_assert_eq!(game.dice(), &dice);
            prop_assert_eq!(game.soft_points(), soft);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    // 8. Seeded AI matches finish, and the ledger adds up
    #[test]
    fn ai_matches_finish(seed in any::<u64>(), first in 0..3usize, second in 0..3usize) {
        let mut game = Game::with_seed(seed);
        game.set_win_threshold(3000).unwrap();
        game.set_player(0, Player::ai(AiPolicy::ALL[first]));
        game.set_player(1, Player::ai(AiPolicy::ALL[second]));
        let mut turns = 0;
        while !game.is_game_over() {
            prop_assert!(play_turn(&mut game).is_ok());
            turns += 1;
            prop_assert!(turns < 5000);
        }
        let result = game.winner_result().unwrap();
        for seat in 0..2 {
            let total: i32 = game.history(seat).iter().map(|e| e.points).sum();
            prop_assert_eq!(total, result.scores[seat]);
        }
        match result.winner {
            Winner::Player(seat) => prop_assert!(result.scores[seat] > result.scores[1 - seat]),
            Winner::Tie => prop_assert_eq!(result.scores[0], result.scores[1]),
        }
        prop_assert!(result.scores[0] >= 3000 || result.scores[1] >= 3000);
    }
}
