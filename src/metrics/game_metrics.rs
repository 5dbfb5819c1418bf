use std::time::{Duration, Instant};

/// Clock of the game in progress. Stops at game over.
#[derive(Debug, Clone, Copy)]
enum GameClock {
    Running { since: Instant },
    Stopped { elapsed: Duration },
}

impl GameClock {
    fn elapsed(&self) -> Duration {
        match *self {
            GameClock::Running { since } => since.elapsed(),
            GameClock::Stopped { elapsed } => elapsed,
        }
    }
}

/// Per-process play statistics. Nothing here outlives the process.
#[derive(Debug)]
pub struct GameMetrics {
    clock: GameClock,
    high_score: u32,
    games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            clock: GameClock::Running {
                since: Instant::now(),
            },
            high_score: 0,
            games_played: 0,
        }
    }

    pub fn on_game_start(&mut self) {
        self.clock = GameClock::Running {
            since: Instant::now(),
        };
    }

    /// Stop the clock and fold the final score into the session record
    pub fn on_game_over(&mut self, final_score: u32) {
        self.clock = GameClock::Stopped {
            elapsed: self.clock.elapsed(),
        };
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Elapsed game time as `mm:ss`; minutes are not wrapped into hours
    pub fn elapsed_label(&self) -> String {
        mm_ss(self.elapsed())
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn mm_ss(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
