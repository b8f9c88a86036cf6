use crate::directory::ARTIST_BATCH_SIZE;

/// Bounds for graph building and distance labeling
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Only the first N seed artists get a related-artist lookup
    pub expanded_seed_limit: usize,
    /// Keep at most N related artists per expanded seed
    pub related_per_seed: usize,
    /// Ids per artist lookup (capped at the directory limit)
    pub artist_batch_size: usize,
    /// Full relaxation passes before distance labeling gives up
    pub max_label_iterations: usize,
    /// Popularity shown for artists the directory did not rate
    pub default_popularity: u8,
}

impl GraphConfig {
    pub fn new(expanded_seed_limit: usize, related_per_seed: usize, max_label_iterations: usize) -> Self {
        Self {
            expanded_seed_limit,
            related_per_seed,
            max_label_iterations,
            ..Self::default()
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            expanded_seed_limit: 3,
            related_per_seed: 5,
            artist_batch_size: ARTIST_BATCH_SIZE,
            max_label_iterations: 10,
            default_popularity: 50,
        }
    }
}
