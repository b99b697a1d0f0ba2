use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Running,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Running
    }
}

/// Every transition a front end can request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    Restart,
    Tick,
    Reveal(Coord2),
    ToggleFlag(Coord2),
    SetWonder(bool),
}

/// Board state machine for one game.
///
/// The minefield stays unset until the first reveal, which generates it around the clicked cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    config: GameConfig,
    seed: u64,
    minefield: Option<Minefield>,
    flags: Array2<FlagState>,
    opened: Array2<bool>,
    flag_count: CellCount,
    elapsed: u32,
    status: GameStatus,
    wondering: bool,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let config = config.validate()?;
        let size = (config.size, config.size).to_nd_index();
        Ok(Self {
            config,
            seed,
            minefield: None,
            flags: Array2::default(size),
            opened: Array2::default(size),
            flag_count: 0,
            elapsed: 0,
            status: Default::default(),
            wondering: false,
        })
    }

    /// Starts a game on a known layout instead of generating one on first reveal.
    pub fn with_minefield(minefield: Minefield, seed: u64) -> Result<Self> {
        let mut game = Self::new(minefield.game_config(), seed)?;
        game.minefield = Some(minefield);
        Ok(game)
    }

    /// Applies `action` to a copy of this state and returns the next state.
    pub fn apply(&self, action: GameAction) -> Result<Game> {
        let mut next = self.clone();
        next.dispatch(action)?;
        Ok(next)
    }

    /// Applies `action` in place, returning whether anything changed.
    pub fn dispatch(&mut self, action: GameAction) -> Result<bool> {
        use GameAction::*;

        Ok(match action {
            Restart => {
                self.restart();
                true
            }
            Tick => {
                self.tick();
                true
            }
            Reveal(coords) => self.reveal(coords)?.has_update(),
            ToggleFlag(coords) => self.toggle_flag(coords)?.has_update(),
            SetWonder(active) => {
                let before = self.wondering;
                self.set_wonder(active);
                before != self.wondering
            }
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord {
        self.config.size
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// How many mines have not been flagged yet
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flag_count as isize)
    }

    pub fn is_wondering(&self) -> bool {
        self.wondering
    }

    pub fn has_minefield(&self) -> bool {
        self.minefield.is_some()
    }

    pub fn minefield(&self) -> Option<&Minefield> {
        self.minefield.as_ref()
    }

    pub fn is_opened(&self, coords: Coord2) -> Result<bool> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.opened[coords.to_nd_index()])
    }

    pub fn flag_at(&self, coords: Coord2) -> Result<FlagState> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.flags[coords.to_nd_index()])
    }

    /// Content of the cell when the player may see it: once opened, or anywhere after the game ended.
    pub fn content_at(&self, coords: Coord2) -> Result<Option<CellContent>> {
        let coords = self.config.validate_coords(coords)?;
        if !self.opened[coords.to_nd_index()] && !self.is_finished() {
            return Ok(None);
        }
        Ok(self.minefield.as_ref().map(|minefield| minefield[coords]))
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.config.validate_coords(coords)?;
        let flag = self.flags[coords.to_nd_index()];
        if !self.opened[coords.to_nd_index()] || !flag.is_none() {
            return Ok(flag.into());
        }
        Ok(self
            .minefield
            .as_ref()
            .map_or(CellView::Hidden, |minefield| minefield[coords].into()))
    }

    pub fn restart(&mut self) {
        use rand::prelude::*;

        let seed = SmallRng::seed_from_u64(self.seed).random();
        log::debug!("Restarting {}x{} game", self.config.size, self.config.size);
        let size = (self.config.size, self.config.size).to_nd_index();
        *self = Self {
            config: self.config,
            seed,
            minefield: None,
            flags: Array2::default(size),
            opened: Array2::default(size),
            flag_count: 0,
            elapsed: 0,
            status: GameStatus::Running,
            wondering: false,
        };
    }

    /// Advances the timer by one unit, whatever the status; the caller stops ticking when the game ends.
    pub fn tick(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
    }

    pub fn set_wonder(&mut self, active: bool) {
        self.wondering = active && self.status.is_running();
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;

        if !self.status.is_running() || self.flags[coords.to_nd_index()] == FlagState::Flagged {
            return Ok(RevealOutcome::NoChange);
        }

        let generated = self.minefield.is_none();
        let minefield = self.minefield.get_or_insert_with(|| {
            RandomMinefieldGenerator::new(self.seed, coords).generate(self.config)
        });

        if minefield.contains_mine(coords) {
            self.detonate(coords);
            return Ok(RevealOutcome::HitMine);
        }

        let opened = self.flood_open(coords);

        // flags placed before generation may already cover every mine
        if generated && self.check_win() {
            return Ok(RevealOutcome::Won);
        }

        Ok(if opened > 0 {
            RevealOutcome::Revealed
        } else {
            RevealOutcome::NoChange
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;

        let coords = self.config.validate_coords(coords)?;

        if !self.status.is_running() || self.opened[coords.to_nd_index()] {
            return Ok(NoChange);
        }

        let flag = self.flags[coords.to_nd_index()];
        if flag.is_none() && self.flag_count >= self.config.mines {
            return Ok(NoChange);
        }

        let next = flag.next();
        self.flags[coords.to_nd_index()] = next;
        match next {
            FlagState::Flagged => self.flag_count += 1,
            FlagState::Questioned => self.flag_count -= 1,
            FlagState::None => {}
        }

        Ok(if self.check_win() { Won } else { Changed })
    }

    /// Ends the game as won when the flag quota is used up and every mine is flagged.
    fn check_win(&mut self) -> bool {
        if self.flag_count == 0
            || self.flag_count != self.config.mines
            || !self.all_mines_flagged()
        {
            return false;
        }

        self.status = GameStatus::Won;
        self.wondering = false;
        log::debug!("Won after {} ticks", self.elapsed);
        true
    }

    /// Opens `start` and cascades through zero cells, returns how many cells were opened.
    fn flood_open(&mut self, start: Coord2) -> usize {
        let Some(minefield) = self.minefield.as_ref() else {
            return 0;
        };

        let mut opened = 0;
        let mut to_visit = Vec::from([start]);
        while let Some(coords) = to_visit.pop() {
            let index = coords.to_nd_index();
            // opened doubles as visited, flagged and questioned cells are never opened by a cascade
            if self.opened[index] || !self.flags[index].is_none() {
                continue;
            }

            self.opened[index] = true;
            opened += 1;

            if minefield[coords] == CellContent::Empty(0) {
                to_visit.extend(
                    self.config
                        .iter_neighbors(coords)
                        .filter(|&pos| !self.opened[pos.to_nd_index()]),
                );
            }
        }

        log::trace!("Opened {} cells starting from {:?}", opened, start);
        opened
    }

    fn detonate(&mut self, coords: Coord2) {
        let Some(minefield) = self.minefield.as_mut() else {
            return;
        };

        for ((row, col), opened) in self.opened.indexed_iter_mut() {
            let cell = (row as Coord, col as Coord);
            if minefield.contains_mine(cell) {
                *opened = true;
            } else if self.flags[(row, col)] == FlagState::Flagged {
                self.flags[(row, col)] = FlagState::None;
                self.flag_count -= 1;
                *opened = true;
                minefield.set_content(cell, CellContent::WrongFlag);
            }
        }
        minefield.set_content(coords, CellContent::Detonated);

        self.status = GameStatus::Lost;
        self.wondering = false;
        log::debug!("Hit mine at {:?} after {} ticks", coords, self.elapsed);
    }

    fn all_mines_flagged(&self) -> bool {
        let Some(minefield) = self.minefield.as_ref() else {
            return false;
        };

        minefield
            .iter_mines()
            .all(|coords| self.flags[coords.to_nd_index()] == FlagState::Flagged)
    }
}
