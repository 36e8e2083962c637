use super::*;

/// Generator that always places the same mines, regardless of where the first reveal happens.
///
/// Useful for replaying a known board. If the first reveal lands on one of the preset mines the board refuses the
/// layout.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator {
    mines: Vec<Coord2>,
}

impl FixedMinefieldGenerator {
    pub fn new(mines: &[Coord2]) -> Self {
        Self {
            mines: mines.to_vec(),
        }
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(&mut self, config: &BoardConfig, _exclude: Coord2) -> Result<MineLayout> {
        MineLayout::from_mine_coords(config.size(), &self.mines)
    }
}
