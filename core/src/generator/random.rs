use super::*;

/// Uniformly random placement by rejection sampling, no start-tile guarantees.
///
/// Only reproducible for a given seed, not across `rand` versions.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Array2<bool> {
        use rand::prelude::*;

        let total_cells = config.total_cells();
        let shape = config.size().to_nd_index();

        // optimize for full boards
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "Minefield already full, generated anyway, requested {} but only fits {}",
                    config.mines,
                    total_cells
                );
            }
            return Array2::from_elem(shape, true);
        }

        let mut mines: Array2<bool> = Array2::default(shape);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed = 0;
        let mut collisions = 0usize;

        while mines_placed < config.mines {
            let coords: Coord2 = (
                rng.random_range(0..config.width),
                rng.random_range(0..config.height),
            );
            let cell = &mut mines[coords.to_nd_index()];
            if *cell {
                collisions += 1;
                continue;
            }
            *cell = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines with seed {} ({} collisions)",
            mines_placed,
            self.seed,
            collisions
        );
        mines
    }
}
