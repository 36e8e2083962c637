use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of the mine layout, asked exactly once when the first cell of a board is revealed.
///
/// Implementations must return a layout of `config.size()` holding exactly `config.mines()` mines, none of them at
/// `exclude`. The board rejects anything else with [`GameError::InvalidLayout`].
pub trait MinefieldGenerator {
    fn generate(&mut self, config: &BoardConfig, exclude: Coord2) -> Result<MineLayout>;
}
