use std::collections::{BTreeSet, VecDeque};

use ndarray::Array2;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - NotStarted -> Won (a single reveal cleared the whole board)
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    /// No cell revealed yet, mines not placed
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_started(self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Snapshot of a single cell as seen from outside the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    mine: bool,
    revealed: bool,
    flagged: bool,
    adjacent_mines: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    /// Always 0 for mines and before mine placement.
    pub const fn neighbor_mine_count(self) -> u8 {
        self.adjacent_mines
    }
}

/// What the player did to a cell, independent of what lies under it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct Marks {
    revealed: bool,
    flagged: bool,
}

/// Mines exist only after the first reveal, until then the board holds the generator that will place them.
#[derive(Clone, Debug)]
enum Minefield<G> {
    Unplaced(G),
    Placed(MineLayout),
}

impl<G: MinefieldGenerator> Minefield<G> {
    fn place(&mut self, config: &BoardConfig, exclude: Coord2) -> Result<&MineLayout> {
        if let Self::Unplaced(generator) = self {
            let layout = generator.generate(config, exclude)?;
            if !layout.fits(config, exclude) {
                log::warn!(
                    "Rejected mine layout of size {:?} with {} mines for {:?}, first reveal at {:?}",
                    layout.size(),
                    layout.mine_count(),
                    config,
                    exclude
                );
                return Err(GameError::InvalidLayout);
            }
            log::debug!("Placed {} mines, first reveal at {:?}", layout.mine_count(), exclude);
            *self = Self::Placed(layout);
        }

        match &*self {
            Self::Placed(layout) => Ok(layout),
            Self::Unplaced(_) => Err(GameError::InvalidLayout),
        }
    }
}

impl<G> Minefield<G> {
    fn layout(&self) -> Option<&MineLayout> {
        match self {
            Self::Unplaced(_) => None,
            Self::Placed(layout) => Some(layout),
        }
    }
}

/// A single game from the first reveal to a win or a loss.
#[derive(Clone, Debug)]
pub struct Board<G = RandomMinefieldGenerator> {
    config: BoardConfig,
    minefield: Minefield<G>,
    marks: Array2<Marks>,
    revealed_count: CellCount,
    flags_placed: CellCount,
    state: GameState,
}

impl Board {
    /// Board whose mines will be placed at random by the thread-local RNG.
    pub fn new(config: BoardConfig) -> Self {
        Self::with_generator(config, RandomMinefieldGenerator::default())
    }
}

impl<G> Board<G> {
    pub fn with_generator(config: BoardConfig, generator: G) -> Self {
        Self {
            config,
            minefield: Minefield::Unplaced(generator),
            marks: Array2::default(config.size().to_nd_index()),
            revealed_count: 0,
            flags_placed: 0,
            state: Default::default(),
        }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn mines_placed(&self) -> bool {
        self.minefield.layout().is_some()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    /// Mines not covered by a flag yet, never negative since flags are capped at the mine count.
    pub fn mines_left(&self) -> CellCount {
        self.config.mines() - self.flags_placed
    }

    /// Safe cells revealed by the player, the final reveal after a loss is not counted.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.cell_unchecked(coords))
    }

    /// All cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        let (rows, cols) = self.size();
        (0..rows)
            .flat_map(move |row| (0..cols).map(move |col| (row, col)))
            .map(|coords| (coords, self.cell_unchecked(coords)))
    }

    fn cell_unchecked(&self, coords: Coord2) -> Cell {
        let Marks { revealed, flagged } = self.marks[coords.to_nd_index()];
        let (mine, adjacent_mines) = match self.minefield.layout() {
            Some(layout) if layout.contains_mine(coords) => (true, 0),
            Some(layout) => (false, layout.adjacent_mine_count(coords)),
            None => (false, 0),
        };
        Cell {
            mine,
            revealed,
            flagged,
            adjacent_mines,
        }
    }

    /// Flag or unflag a hidden cell.
    ///
    /// New flags are refused once as many flags as mines are on the board, removing one is always possible.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.config.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(NoChange);
        }

        let marks = &mut self.marks[coords.to_nd_index()];
        Ok(match *marks {
            Marks { revealed: true, .. } => NoChange,
            Marks { flagged: true, .. } => {
                marks.flagged = false;
                self.flags_placed -= 1;
                Changed
            }
            Marks { flagged: false, .. } if self.flags_placed >= self.config.mines() => {
                log::debug!("Flag limit of {} reached, ignoring {:?}", self.config.mines(), coords);
                NoChange
            }
            Marks { flagged: false, .. } => {
                marks.flagged = true;
                self.flags_placed += 1;
                Changed
            }
        })
    }
}

impl<G: MinefieldGenerator> Board<G> {
    /// Reveal a hidden, unflagged cell.
    ///
    /// The first reveal of the game places the mines, never under the revealed cell. Revealing a mine exposes the
    /// whole board, revealing a cell without adjacent mines also reveals its neighbors, transitively.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.config.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(NoChange);
        }

        let marks = self.marks[coords.to_nd_index()];
        if marks.revealed || marks.flagged {
            return Ok(NoChange);
        }

        let layout = self.minefield.place(&self.config, coords)?;

        if layout.contains_mine(coords) {
            log::debug!("Mine hit at {:?}", coords);
            self.marks.iter_mut().for_each(|marks| marks.revealed = true);
            self.state = GameState::Lost;
            return Ok(Lost);
        }

        self.revealed_count += flood_fill(layout, &mut self.marks, coords);

        if self.revealed_count == self.config.safe_cells() {
            log::debug!("All {} safe cells revealed", self.revealed_count);
            self.state = GameState::Won;
            Ok(Won)
        } else {
            self.state = GameState::InProgress;
            Ok(InProgress)
        }
    }
}

/// Reveals `start` and, through cells without adjacent mines, every cell connected to it.
///
/// Revealed and flagged cells stop the expansion. Returns how many cells were newly revealed.
fn flood_fill(layout: &MineLayout, marks: &mut Array2<Marks>, start: Coord2) -> CellCount {
    let mut revealed = 0;
    let mut visited = BTreeSet::new();
    let mut to_visit = VecDeque::from([start]);

    while let Some(coords) = to_visit.pop_front() {
        if !visited.insert(coords) {
            continue;
        }

        let cell = &mut marks[coords.to_nd_index()];
        if cell.revealed || cell.flagged {
            log::trace!("Skipping cell at {:?}", coords);
            continue;
        }

        cell.revealed = true;
        revealed += 1;

        let count = layout.adjacent_mine_count(coords);
        log::trace!("Revealed cell at {:?}, mine count: {}", coords, count);

        // only zero cells spread, and their neighbors can never be mines
        if count == 0 {
            to_visit.extend(
                layout
                    .iter_neighbors(coords)
                    .filter(|pos| !visited.contains(pos)),
            );
        }
    }

    revealed
}
