use std::time::{Duration, Instant};

use crate::game::{GameState, GameStatus};

/// Per-process statistics; nothing is written to disk.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub boards_cleared: u32,
    /// Set once the current game has been counted
    recorded: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            boards_cleared: 0,
            recorded: false,
        }
    }

    /// Advance the clock while the game is running
    pub fn update(&mut self, state: &GameState) {
        if !state.is_terminal() {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.recorded = false;
    }

    /// Count a finished game. Repeated calls for the same game are ignored.
    pub fn on_game_over(&mut self, state: &GameState) {
        if self.recorded || !state.is_terminal() {
            return;
        }
        self.recorded = true;
        self.games_played += 1;
        self.high_score = self.high_score.max(state.score);
        if state.status == GameStatus::BoardCleared {
            self.boards_cleared += 1;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, Direction, Position, Snake};

    fn finished(score: u32, status: GameStatus) -> GameState {
        let mut state = GameState::new(
            Snake::new(Position::new(1, 1), Direction::Right, 1),
            Position::new(3, 3),
            5,
            5,
        );
        state.score = score;
        state.status = status;
        state
    }

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let crash = GameStatus::Crashed(CollisionType::Wall);
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(&finished(10, crash));
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_start();
        metrics.on_game_over(&finished(5, crash));
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_start();
        metrics.on_game_over(&finished(24, GameStatus::BoardCleared));
        assert_eq!(metrics.high_score, 24);
        assert_eq!(metrics.games_played, 3);
        assert_eq!(metrics.boards_cleared, 1);
    }

    #[test]
    fn test_game_counted_once() {
        let mut metrics = GameMetrics::new();
        let state = finished(3, GameStatus::Crashed(CollisionType::SelfCollision));

        metrics.on_game_over(&state);
        metrics.on_game_over(&state);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(&finished(9, GameStatus::Running));
        assert_eq!(metrics.high_score, 3);
    }

    #[test]
    fn test_clock_stops_after_game_over() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(42);
        metrics.update(&finished(0, GameStatus::Crashed(CollisionType::Wall)));
        assert_eq!(metrics.elapsed_time, Duration::from_secs(42));
    }
}
