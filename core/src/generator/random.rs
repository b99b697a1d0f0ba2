use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Uniformly random placement that always keeps the starting cell free of mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    start: Coord2,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, start: Coord2) -> Self {
        Self { seed, start }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Minefield {
        use rand::prelude::*;

        let size = config.size;
        let start = flat_index(self.start, size);
        let mut candidates: Vec<CellCount> = (0..config.total_cells())
            .filter(|&index| index != start)
            .collect();

        let mines = if usize::from(config.mines) > candidates.len() {
            log::warn!(
                "Cannot fit {} mines next to a safe start, placing {}",
                config.mines,
                candidates.len()
            );
            candidates.len()
        } else {
            usize::from(config.mines)
        };

        // partial Fisher-Yates, the first `mines` slots end up as the sample
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in 0..mines {
            let j = rng.random_range(i..candidates.len());
            candidates.swap(i, j);
        }

        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());
        for &index in &candidates[..mines] {
            mine_mask[from_flat_index(index, size).to_nd_index()] = true;
        }

        let minefield = Minefield::from_mine_mask(&mine_mask);
        log::debug!(
            "Generated {}x{} minefield with {} mines, start at {:?}, seed {}",
            size,
            size,
            minefield.mine_count(),
            self.start,
            self.seed
        );
        minefield
    }
}
