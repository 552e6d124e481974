use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::debug;
use wordplay_core::model::TickOutcome;

use super::service::GameService;
use super::view::GameOverSummary;

/// Timer driver: produces one tick per period while a game is running.
///
/// The first tick fires one full period after creation or [`RoundTimer::reset`],
/// never immediately. Late ticks are delayed rather than bunched up.
#[derive(Debug)]
pub struct RoundTimer {
    period: Duration,
    interval: Interval,
}

impl RoundTimer {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: Self::interval(period),
        }
    }

    #[must_use]
    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    fn interval(period: Duration) -> Interval {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Restart the countdown so the next tick is one period away.
    pub fn reset(&mut self) {
        self.interval.reset();
    }

    /// Wait for the next period to elapse.
    pub async fn next(&mut self) {
        self.interval.tick().await;
    }

    /// Tick `game` every period until its clock runs out.
    ///
    /// Returns immediately if the game is not playing.
    pub async fn run_to_end(&mut self, game: &mut GameService) -> Option<GameOverSummary> {
        if !game.session().is_playing() {
            return None;
        }
        self.reset();
        loop {
            self.next().await;
            match game.tick() {
                TickOutcome::Running { remaining } => debug!(remaining, "tick"),
                TickOutcome::GameOver {
                    final_score,
                    completed,
                } => {
                    return Some(GameOverSummary {
                        final_score,
                        completed,
                    });
                }
                TickOutcome::Idle => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordplay_core::model::GameRules;

    #[tokio::test(start_paused = true)]
    async fn full_round_lasts_sixty_seconds() {
        let mut game = GameService::default().with_seed(1);
        game.start();
        let mut timer = RoundTimer::every_second();

        let started = Instant::now();
        let summary = timer.run_to_end(&mut game).await;

        assert_eq!(
            summary,
            Some(GameOverSummary {
                final_score: 0,
                completed: 0
            })
        );
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(60));
        assert!(elapsed < Duration::from_secs(61));
        assert_eq!(game.session().remaining_secs(), 0);
        assert!(!game.session().is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_game_is_not_driven() {
        let mut game = GameService::new(GameRules::default());
        let mut timer = RoundTimer::every_second();
        assert_eq!(timer.run_to_end(&mut game).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_a_full_period() {
        let mut timer = RoundTimer::new(Duration::from_millis(250));
        let started = Instant::now();
        timer.next().await;
        assert!(started.elapsed() >= Duration::from_millis(250));
    }
}
