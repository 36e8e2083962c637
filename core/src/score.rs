use crate::*;

pub type Score = u64;

/// Score of a won game: bigger boards and faster clears score higher.
///
/// Games won in under a second count as taking one second.
pub fn score_for(config: &BoardConfig, elapsed_secs: u64) -> Score {
    1000 * Score::from(config.total_cells()) / elapsed_secs.max(1)
}
