use rand::prelude::*;

use super::*;

/// Generates a batch of independent boards and reduces them to a
/// [`BatchStats`] bundle.
///
/// Each iteration constructs a fresh board, forces mine placement at a
/// uniformly random origin, and forces the initial reveal at that origin.
/// Iterations that fail to generate are logged and skipped; they do not
/// count toward the batch.
#[derive(Clone, Debug)]
pub struct Sampler {
    config: GameConfig,
    sample_size: usize,
    seed: Option<u64>,
}

impl Sampler {
    pub fn new(config: GameConfig, sample_size: usize) -> Self {
        Self {
            config,
            sample_size,
            seed: None,
        }
    }

    /// Fixes the batch seed for reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Runs the batch. Fails with [`GameError::EmptyBatch`] only when not a
    /// single board could be generated.
    pub fn run(&self) -> Result<BatchStats> {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let mut samples: Vec<(Board, Vec<Coord2>)> = Vec::with_capacity(self.sample_size);
        for attempt in 0..self.sample_size {
            let origin = (
                rng.random_range(0..self.config.rows),
                rng.random_range(0..self.config.cols),
            );

            let mut board = Board::new(self.config);
            if let Err(err) = board.place_mines(origin, &mut rng) {
                log::warn!("skipping sample {attempt}, generation failed: {err}");
                continue;
            }

            let revealed = board.reveal(origin);
            samples.push((board, revealed));
        }

        if samples.is_empty() {
            return Err(GameError::EmptyBatch);
        }
        log::debug!(
            "generated {} of {} requested boards",
            samples.len(),
            self.sample_size
        );

        Ok(aggregate(self.config, &samples))
    }
}

/// Pure post-processing over the retained boards; none of them is mutated.
fn aggregate(config: GameConfig, samples: &[(Board, Vec<Coord2>)]) -> BatchStats {
    let mut blank_counts = Vec::with_capacity(samples.len());
    let mut value_freq = [0u64; 9];
    let mut cluster_counts = Vec::with_capacity(samples.len());
    let mut density: Array2<f64> = Array2::zeros(config.size().to_nd_index());

    for (board, revealed) in samples {
        let mut blanks: CellCount = 0;
        for &coords in revealed {
            let cell = board.cell_at(coords);
            if cell.is_mine() {
                continue;
            }
            value_freq[usize::from(cell.adjacent_mines())] += 1;
            if cell.adjacent_mines() == 0 {
                blanks += 1;
            }
        }
        blank_counts.push(blanks);

        cluster_counts.push(mine_cluster_count(board));

        for row in 0..config.rows {
            for col in 0..config.cols {
                let mines_nearby = board
                    .neighbors((row, col))
                    .filter(|&pos| board.is_mine(pos))
                    .count();
                density[(row, col).to_nd_index()] += mines_nearby as f64;
            }
        }
    }

    let boards_used = samples.len();
    density.mapv_inplace(|sum| sum / boards_used as f64);

    BatchStats {
        blank_counts,
        value_freq,
        cluster_counts,
        density,
        boards_used,
    }
}
