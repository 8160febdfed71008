use std::collections::{BTreeSet, VecDeque};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use sampler::*;

use crate::*;

mod sampler;

/// Aggregate statistics over a batch of sampled boards, consumed by an
/// external report renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Per-board count of revealed zero-value non-mine cells.
    pub blank_counts: Vec<CellCount>,
    /// Frequency of revealed non-mine cell values 0-8 across all boards.
    pub value_freq: [u64; 9],
    /// Per-board count of 8-connected mine clusters.
    pub cluster_counts: Vec<usize>,
    /// Per-cell mean count of mine neighbors across all boards.
    pub density: Array2<f64>,
    /// Boards that generated successfully and entered the aggregates.
    pub boards_used: usize,
}

/// Counts the connected components of the mine subgraph under 8-neighbor
/// adjacency. Independent of revealed/marked state.
pub fn mine_cluster_count(board: &Board) -> usize {
    let mut visited: BTreeSet<Coord2> = BTreeSet::new();
    let mut clusters = 0;

    for &start in board.mine_positions() {
        if !visited.insert(start) {
            continue;
        }
        clusters += 1;

        let mut queue = VecDeque::from([start]);
        while let Some(coords) = queue.pop_front() {
            for neighbor in board.neighbors(coords) {
                if board.is_mine(neighbor) && visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
    }

    clusters
}
