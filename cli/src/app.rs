use std::io::{self, BufRead, Write};

use minado_core::*;

use crate::command::{Command, HELP};
use crate::render;

/// Every game gets its own generator, with a fixed seed the games stay reproducible in order.
fn generator(seed: Option<u64>, game: u64) -> SeededMinefieldGenerator {
    match seed {
        Some(seed) => SeededMinefieldGenerator::from_seed(seed.wrapping_add(game)),
        None => SeededMinefieldGenerator::from_entropy(),
    }
}

/// Text front-end: reads commands line by line and prints the board after every move.
pub struct App<S> {
    session: Session<SeededMinefieldGenerator>,
    store: S,
    seed: Option<u64>,
    games: u64,
}

impl<S: ScoreStore> App<S> {
    pub fn new(difficulty: Difficulty, seed: Option<u64>, store: S) -> Self {
        Self {
            session: Session::with_generator(difficulty, generator(seed, 0)),
            store,
            seed,
            games: 0,
        }
    }

    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{HELP}\n")?;
        self.print_board(out)?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                return Ok(());
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(command) => {
                    log::trace!("command: {:?}", command);
                    if !self.execute(command, out)? {
                        return Ok(());
                    }
                }
                Err(err) => writeln!(out, "{err}")?,
            }
        }
    }

    /// Applies one command, returns `false` once the player wants to quit.
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<bool> {
        use Command::*;

        match command {
            Reveal(coords) => match self.session.reveal(coords) {
                Ok(RevealOutcome::NoChange) => writeln!(out, "Nothing to reveal at {coords:?}")?,
                Ok(outcome) => {
                    self.print_board(out)?;
                    self.report(outcome, out)?;
                }
                Err(err) => writeln!(out, "{err}")?,
            },
            Flag(coords) => match self.session.toggle_flag(coords) {
                Ok(MarkOutcome::Changed) => self.print_board(out)?,
                Ok(MarkOutcome::NoChange) => writeln!(out, "Cannot flag {coords:?}")?,
                Err(err) => writeln!(out, "{err}")?,
            },
            NewGame(difficulty) => {
                let difficulty = difficulty.unwrap_or(self.session.difficulty());
                self.games += 1;
                self.session = Session::with_generator(difficulty, generator(self.seed, self.games));
                log::info!("New {} game", difficulty);
                self.print_board(out)?;
            }
            Scores => self.print_scores(out)?,
            Help => writeln!(out, "{HELP}")?,
            Quit => return Ok(false),
        }
        Ok(true)
    }

    fn report(&mut self, outcome: RevealOutcome, out: &mut impl Write) -> io::Result<()> {
        match outcome {
            RevealOutcome::Won => {
                log::info!("Won {} game in {}s", self.session.difficulty(), self.session.elapsed_secs());
                if let Some(GameScore { score, new_best }) = self.session.record_score(&mut self.store) {
                    let best = if new_best { " New best!" } else { "" };
                    writeln!(out, "You won! Score: {score}.{best} Type n for a new game.")?;
                }
            }
            RevealOutcome::Lost => {
                log::info!("Lost {} game", self.session.difficulty());
                writeln!(out, "Boom! You hit a mine. Type n for a new game.")?;
            }
            RevealOutcome::InProgress | RevealOutcome::NoChange => {}
        }
        Ok(())
    }

    fn print_board(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}", render::board(self.session.board()))?;
        writeln!(out, "{}", render::status(&self.session))
    }

    fn print_scores(&self, out: &mut impl Write) -> io::Result<()> {
        let scores = self.store.get_all();
        writeln!(out, "best scores:")?;
        for difficulty in Difficulty::ALL {
            match scores.get(difficulty.key()) {
                Some(score) => writeln!(out, "{difficulty:>8}: {score}")?,
                None => writeln!(out, "{difficulty:>8}: ---")?,
            }
        }
        Ok(())
    }
}
