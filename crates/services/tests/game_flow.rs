use std::time::Duration;

use services::{AppServices, Clock, RoundTimer, answer_message};
use storage::{Latency, Storage};
use wordplay_core::model::{AnswerOutcome, GameRules, TickOutcome};
use wordplay_core::time::fixed_now;

fn services(seed: u64) -> AppServices {
    AppServices::new(Storage::mock(fixed_now(), Latency::NONE), Clock::fixed(fixed_now()))
        .with_seed(Some(seed))
}

#[test]
fn solving_three_sentences_scores_three_hundred() {
    let mut game = services(21).game();
    game.start();

    for solved in 1..=3u32 {
        let round = game.session().round().expect("active round").clone();
        let mut wrong = round.canonical_order().to_vec();
        wrong.rotate_left(1);
        let outcome = game.submit_and_check(wrong).expect("valid permutation");
        assert_eq!(
            answer_message(outcome).as_deref(),
            Some("Not quite right. Try again!")
        );

        let outcome = game
            .submit_and_check(round.canonical_order().to_vec())
            .expect("valid permutation");
        assert_eq!(outcome, AnswerOutcome::Correct { awarded: 100 });
        assert_eq!(game.snapshot().score, solved * 100);
        assert_eq!(game.snapshot().completed, solved);
    }
}

#[test]
fn clock_runs_down_with_custom_rules() {
    let rules = GameRules::new(3, 250).expect("valid rules");
    let mut game = services(5).with_rules(rules).game();
    game.start();
    let canonical = game
        .session()
        .round()
        .expect("active round")
        .canonical_order()
        .to_vec();
    game.submit_and_check(canonical).expect("valid permutation");

    assert_eq!(game.tick(), TickOutcome::Running { remaining: 2 });
    assert_eq!(game.tick(), TickOutcome::Running { remaining: 1 });
    assert_eq!(
        game.tick(),
        TickOutcome::GameOver {
            final_score: 250,
            completed: 1
        }
    );

    let snapshot = game.snapshot();
    let summary = snapshot.game_over.expect("game over summary");
    assert_eq!(summary.message(), "Game Over! Final Score: 250");
    assert!(snapshot.words.is_empty());
}

#[tokio::test(start_paused = true)]
async fn answers_between_ticks_count_until_time_runs_out() {
    let mut game = services(9).game();
    game.start();
    let mut timer = RoundTimer::new(Duration::from_secs(1));

    for _ in 0..10 {
        timer.next().await;
        game.tick();
    }
    let canonical = game
        .session()
        .round()
        .expect("active round")
        .canonical_order()
        .to_vec();
    game.submit_and_check(canonical).expect("valid permutation");
    assert_eq!(game.snapshot().remaining_secs, 50);

    let summary = timer.run_to_end(&mut game).await.expect("game ends");
    assert_eq!(summary.final_score, 100);
    assert_eq!(summary.completed, 1);
}
