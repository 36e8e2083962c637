use rand::SeedableRng;
use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;

use super::*;

/// Purely random generation, the only guarantee is that the first revealed cell is not a mine. Its neighbors may
/// still be.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator<R = ThreadRng> {
    rng: R,
}

/// Random generator with its own reproducible RNG.
pub type SeededMinefieldGenerator = RandomMinefieldGenerator<StdRng>;

impl<R: rand::Rng> RandomMinefieldGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl SeededMinefieldGenerator {
    /// Reproducible generator, the same seed always yields the same layout for the same board and first click.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded once from the thread-local RNG.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_rng(&mut rand::rng()))
    }
}

impl Default for RandomMinefieldGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: rand::Rng> MinefieldGenerator for RandomMinefieldGenerator<R> {
    fn generate(&mut self, config: &BoardConfig, exclude: Coord2) -> Result<MineLayout> {
        let exclude = config.validate_coords(exclude)?;
        let (rows, cols) = config.size();

        let mut candidates: Vec<Coord2> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&coords| coords != exclude)
            .collect();

        // every cell except the excluded one is equally likely to hold any of the mines
        let (mines, _) = candidates.partial_shuffle(&mut self.rng, config.mines().into());

        log::debug!(
            "Placing {} mines on a {}x{} board, excluding {:?}",
            mines.len(),
            rows,
            cols,
            exclude
        );
        MineLayout::from_mine_coords(config.size(), mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_mine_count_without_excluded_cell() {
        let config = BoardConfig::new(8, 8, 10).unwrap();

        for seed in 0..200 {
            let exclude = ((seed % 8) as Coord, (seed / 8 % 8) as Coord);
            let layout = SeededMinefieldGenerator::from_seed(seed)
                .generate(&config, exclude)
                .unwrap();

            assert_eq!(layout.mine_count(), 10);
            assert_eq!(layout.iter_mines().count(), 10);
            assert!(!layout.contains_mine(exclude), "seed {seed} mined {exclude:?}");
        }
    }

    #[test]
    fn fills_every_cell_but_the_excluded_one() {
        let config = BoardConfig::new(3, 3, 8).unwrap();
        let layout = SeededMinefieldGenerator::from_seed(7)
            .generate(&config, (1, 2))
            .unwrap();

        let mines: Vec<_> = layout.iter_mines().collect();
        assert_eq!(mines.len(), 8);
        assert!(!mines.contains(&(1, 2)));
        assert_eq!(layout.adjacent_mine_count((1, 2)), 5);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = BoardConfig::new(16, 16, 50).unwrap();
        let a = SeededMinefieldGenerator::from_seed(42)
            .generate(&config, (3, 3))
            .unwrap();
        let b = SeededMinefieldGenerator::from_seed(42)
            .generate(&config, (3, 3))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn neighbors_of_excluded_cell_can_hold_mines() {
        // only the clicked cell itself is protected
        let config = BoardConfig::new(3, 3, 1).unwrap();
        let hit_neighbor = (0..100).any(|seed| {
            let layout = SeededMinefieldGenerator::from_seed(seed)
                .generate(&config, (1, 1))
                .unwrap();
            layout.adjacent_mine_count((1, 1)) > 0
        });
        assert!(hit_neighbor);
    }

    #[test]
    fn entropy_seeded_generator_respects_exclusion() {
        let config = BoardConfig::new(2, 2, 3).unwrap();
        let layout = SeededMinefieldGenerator::from_entropy()
            .generate(&config, (0, 1))
            .unwrap();
        assert_eq!(layout.iter_mines().collect::<Vec<_>>(), vec![(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn zero_mines_yields_empty_layout() {
        let config = BoardConfig::new(4, 4, 0).unwrap();
        let layout = RandomMinefieldGenerator::default()
            .generate(&config, (0, 0))
            .unwrap();
        assert_eq!(layout.mine_count(), 0);
    }

    #[test]
    fn rejects_out_of_range_exclusion() {
        let config = BoardConfig::new(4, 4, 2).unwrap();
        assert!(
            SeededMinefieldGenerator::from_seed(1)
                .generate(&config, (4, 0))
                .is_err()
        );
    }
}
