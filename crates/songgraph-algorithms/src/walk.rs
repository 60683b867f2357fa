//! Node2vec-style biased random walks
//!
//! Second-order walks after Grover & Leskovec (2016). From `curr`, having arrived from `prev`,
//! a neighbor `x` of `curr` is weighted:
//!
//! ```text
//! 1/p  if x == prev              (return)
//! 1    if x is adjacent to prev  (stay local)
//! 1/q  otherwise                 (move outward)
//! ```
//!
//! Weights are normalized over the neighbor set and sampled exactly. The first step has no
//! `prev` and is uniform.

use super::common::GraphView;
use rand::distributions::{Distribution, WeightedIndex};
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;

/// Random walk configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkConfig {
    /// Walks started from every node
    pub walks_per_node: usize,
    /// Maximum number of nodes per walk, start node included
    pub walk_length: usize,
    /// Return parameter (p). Larger values discourage backtracking.
    pub return_bias: f64,
    /// In-out parameter (q). Smaller values push the walk outward (DFS-like).
    pub exploration_bias: f64,
    /// Base seed; every (node, repetition) pair derives its own stream from it
    pub seed: u64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            walks_per_node: 200,
            walk_length: 30,
            return_bias: 1.0,
            exploration_bias: 1.0,
            seed: 42,
        }
    }
}

impl WalkConfig {
    fn is_unbiased(&self) -> bool {
        (self.return_bias - 1.0).abs() < f64::EPSILON
            && (self.exploration_bias - 1.0).abs() < f64::EPSILON
    }
}

/// Generate `walks_per_node` walks from every node of the view.
///
/// Runs on the current rayon pool; call inside `ThreadPool::install` to bound the worker count.
/// The result is node-major, repetition-minor and does not depend on the number of threads.
pub fn generate_walks(view: &GraphView, config: &WalkConfig) -> Vec<Vec<usize>> {
    let reps = config.walks_per_node;
    if view.node_count == 0 || reps == 0 || config.walk_length == 0 {
        return Vec::new();
    }

    (0..view.node_count * reps)
        .into_par_iter()
        .map(|job| {
            let start = job / reps;
            let repetition = job % reps;
            let mut rng = StdRng::seed_from_u64(stream_seed(config.seed, start, repetition));
            biased_walk(view, start, config, &mut rng)
        })
        .collect()
}

/// Single walk starting at `start`
pub fn biased_walk<R: Rng>(
    view: &GraphView,
    start: usize,
    config: &WalkConfig,
    rng: &mut R,
) -> Vec<usize> {
    let mut walk = Vec::with_capacity(config.walk_length);
    if config.walk_length == 0 {
        return walk;
    }
    walk.push(start);

    let unbiased = config.is_unbiased();
    let mut prev: Option<usize> = None;
    let mut curr = start;

    while walk.len() < config.walk_length {
        let neighbors = view.neighbors(curr);
        if neighbors.is_empty() {
            break;
        }

        let next = match prev {
            Some(prev_node) if !unbiased => {
                sample_biased(view, prev_node, neighbors, config, rng)
            }
            _ => neighbors[rng.gen_range(0..neighbors.len())],
        };

        walk.push(next);
        prev = Some(curr);
        curr = next;
    }

    walk
}

/// Unnormalized transition weight of moving to `candidate` having come from `prev`
pub fn transition_weight(
    view: &GraphView,
    prev: usize,
    candidate: usize,
    return_bias: f64,
    exploration_bias: f64,
) -> f64 {
    if candidate == prev {
        1.0 / return_bias
    } else if view.is_neighbor(prev, candidate) {
        1.0
    } else {
        1.0 / exploration_bias
    }
}

fn sample_biased<R: Rng>(
    view: &GraphView,
    prev: usize,
    neighbors: &[usize],
    config: &WalkConfig,
    rng: &mut R,
) -> usize {
    let weights: Vec<f64> = neighbors
        .iter()
        .map(|&x| {
            transition_weight(view, prev, x, config.return_bias, config.exploration_bias)
        })
        .collect();

    match WeightedIndex::new(&weights) {
        Ok(dist) => neighbors[dist.sample(rng)],
        // Non-positive biases; degrade to a uniform step
        Err(_) => neighbors[rng.gen_range(0..neighbors.len())],
    }
}

/// SplitMix64 over (seed, node, repetition)
fn stream_seed(seed: u64, node: usize, repetition: usize) -> u64 {
    let mut z = seed
        ^ (node as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (repetition as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> GraphView {
        // 0 - 1 - 2 - 3
        GraphView::from_edges(4, vec![(0, 1), (1, 2), (2, 3)])
    }

    #[test]
    fn test_walk_count_and_length() {
        let view = path_graph();
        let config = WalkConfig {
            walks_per_node: 3,
            walk_length: 5,
            ..Default::default()
        };

        let walks = generate_walks(&view, &config);
        assert_eq!(walks.len(), 12);
        for walk in &walks {
            assert_eq!(walk.len(), 5);
        }
        // Node-major ordering
        assert_eq!(walks[0][0], 0);
        assert_eq!(walks[3][0], 1);
        assert_eq!(walks[11][0], 3);
    }

    #[test]
    fn test_walk_follows_edges() {
        let view = path_graph();
        let config = WalkConfig {
            walks_per_node: 10,
            walk_length: 8,
            return_bias: 0.5,
            exploration_bias: 2.0,
            seed: 7,
        };

        for walk in generate_walks(&view, &config) {
            for pair in walk.windows(2) {
                assert!(view.is_neighbor(pair[0], pair[1]), "illegal step {:?}", pair);
            }
        }
    }

    #[test]
    fn test_isolated_node_walk_is_single_node() {
        let view = GraphView::from_edges(3, vec![(0, 1)]);
        let config = WalkConfig {
            walks_per_node: 2,
            walk_length: 10,
            ..Default::default()
        };

        let walks = generate_walks(&view, &config);
        assert_eq!(walks[4], vec![2]);
        assert_eq!(walks[5], vec![2]);
    }

    #[test]
    fn test_walks_are_reproducible_across_pools() {
        let view = GraphView::from_edges(5, vec![(0, 1), (1, 2), (2, 0), (2, 3), (3, 4)]);
        let config = WalkConfig {
            walks_per_node: 4,
            walk_length: 12,
            return_bias: 2.0,
            exploration_bias: 0.5,
            seed: 99,
        };

        let single = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let many = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();

        let a = single.install(|| generate_walks(&view, &config));
        let b = many.install(|| generate_walks(&view, &config));
        assert_eq!(a, b);
    }

    #[test]
    fn test_transition_weights() {
        // Triangle 0-1-2 plus a tail 1-3
        let view = GraphView::from_edges(4, vec![(0, 1), (1, 2), (2, 0), (1, 3)]);

        // Arrived at 1 from 0
        assert_eq!(transition_weight(&view, 0, 0, 4.0, 0.25), 0.25);
        assert_eq!(transition_weight(&view, 0, 2, 4.0, 0.25), 1.0);
        assert_eq!(transition_weight(&view, 0, 3, 4.0, 0.25), 4.0);
    }

    #[test]
    fn test_low_return_bias_backtracks_often() {
        // Star: 0 is the hub, leaves 1..=5
        let view = GraphView::from_edges(6, (1..6).map(|leaf| (0, leaf)));
        let config = WalkConfig {
            walks_per_node: 50,
            walk_length: 3,
            return_bias: 0.01,
            exploration_bias: 1.0,
            seed: 3,
        };

        let mut returned = 0;
        let mut total = 0;
        for walk in generate_walks(&view, &config) {
            if walk.len() == 3 && walk[0] != 0 {
                total += 1;
                if walk[2] == walk[0] {
                    returned += 1;
                }
            }
        }
        // 1/p = 100 against four siblings weighted 1/q = 1
        assert!(returned * 10 > total * 8, "returned {} of {}", returned, total);
    }
}
