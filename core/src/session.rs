use std::time::Duration;

use web_time::Instant;

use crate::*;

/// Wall-clock time of a game, running from the first reveal until the game ends.
#[derive(Copy, Clone, Debug, Default)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    stopped_after: Option<Duration>,
}

impl Stopwatch {
    /// Starts timing, later calls keep the original start.
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    /// Freezes the elapsed time, does nothing if it never started or already stopped.
    pub fn stop(&mut self) {
        if self.stopped_after.is_none() && self.started_at.is_some() {
            self.stopped_after = Some(self.elapsed());
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_after.is_none()
    }

    pub fn elapsed(&self) -> Duration {
        match (self.started_at, self.stopped_after) {
            (_, Some(stopped_after)) => stopped_after,
            (Some(started_at), None) => started_at.elapsed(),
            (None, None) => Duration::ZERO,
        }
    }
}

/// Score of a finished, won game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameScore {
    pub score: Score,
    /// Whether it replaced the stored best for the difficulty.
    pub new_best: bool,
}

/// One game on a preset difficulty, timed, with its score recorded when it is won.
#[derive(Clone, Debug)]
pub struct Session<G = RandomMinefieldGenerator> {
    difficulty: Difficulty,
    board: Board<G>,
    stopwatch: Stopwatch,
}

impl Session {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_generator(difficulty, RandomMinefieldGenerator::default())
    }

    /// Throws the current board away and starts over on `difficulty`.
    pub fn restart(&mut self, difficulty: Difficulty) {
        log::debug!("Restarting on {}", difficulty);
        *self = Self::new(difficulty);
    }
}

impl<G> Session<G> {
    pub fn with_generator(difficulty: Difficulty, generator: G) -> Self {
        Self {
            difficulty,
            board: Board::with_generator(difficulty.config(), generator),
            stopwatch: Stopwatch::default(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn board(&self) -> &Board<G> {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.board.state()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.stopwatch.elapsed().as_secs()
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.board.toggle_flag(coords)
    }

    /// Score of the game, only once it has been won.
    pub fn score(&self) -> Option<Score> {
        match self.board.state() {
            GameState::Won => Some(score_for(&self.board.config(), self.elapsed_secs())),
            _ => None,
        }
    }

    /// Offers the score of a won game to `store`, see [`record_best`].
    pub fn record_score(&self, store: &mut impl ScoreStore) -> Option<GameScore> {
        let score = self.score()?;
        let new_best = record_best(store, self.difficulty, score);
        Some(GameScore { score, new_best })
    }
}

impl<G: MinefieldGenerator> Session<G> {
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let outcome = self.board.reveal(coords)?;
        if outcome.has_update() {
            self.stopwatch.start();
        }
        if self.board.is_finished() {
            self.stopwatch.stop();
        }
        Ok(outcome)
    }
}
