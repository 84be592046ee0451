//! Instance pool: holds candidate instance base URLs and produces a
//! randomized ordering per call.
//!
//! No per-instance health state is kept across calls; every call reshuffles
//! from scratch.

use rand::seq::SliceRandom;
use rand::Rng;

/// A pool of candidate search instance base URLs.
#[derive(Debug, Clone, Default)]
pub struct InstancePool {
    instances: Vec<String>,
}

impl InstancePool {
    /// Creates a pool from a list of base URLs.
    ///
    /// Empty and whitespace-only entries are dropped; trailing slashes are
    /// trimmed so URL assembly is uniform.
    pub fn new(instances: Vec<String>) -> Self {
        let instances = instances
            .into_iter()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self { instances }
    }

    /// Creates a pool from a semicolon-delimited list of base URLs.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(';').map(str::to_string).collect())
    }

    /// Returns the number of instances in the pool.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Returns the instances in configured order.
    pub fn instances(&self) -> &[String] {
        &self.instances
    }

    /// Returns a random permutation of the pool.
    pub fn shuffled(&self) -> Vec<String> {
        self.shuffled_with(&mut rand::thread_rng())
    }

    /// Returns a random permutation of the pool using the given RNG.
    ///
    /// A single-element pool is returned as-is. Tests pass a seeded RNG to
    /// get deterministic orderings.
    pub fn shuffled_with<R: Rng>(&self, rng: &mut R) -> Vec<String> {
        let mut order = self.instances.clone();
        order.shuffle(rng);
        order
    }
}
