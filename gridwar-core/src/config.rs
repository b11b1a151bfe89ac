//! Configuration for random playouts

/// Random playout configuration
#[derive(Clone, Debug)]
pub struct RolloutConfig {
    /// Chance that a given unit requests a move in a round (0.0-1.0)
    pub move_probability: f64,
    /// Rounds before an undecided game is abandoned
    pub max_rounds: u32,
    /// Random seed for reproducibility (None = fixed default)
    pub seed: Option<u64>,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            move_probability: 0.75,
            max_rounds: 200,
            seed: None,
        }
    }
}

impl RolloutConfig {
    /// Set move probability, clamped into 0.0-1.0 (NaN becomes 0.0)
    pub fn with_move_probability(mut self, probability: f64) -> Self {
        self.move_probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed actually used for game `index` of a batch
    pub fn game_seed(&self, index: u64) -> u64 {
        self.seed.unwrap_or(42).wrapping_add(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_is_clamped() {
        assert_eq!(RolloutConfig::default().with_move_probability(2.0).move_probability, 1.0);
        assert_eq!(RolloutConfig::default().with_move_probability(-1.0).move_probability, 0.0);
        assert_eq!(RolloutConfig::default().with_move_probability(f64::NAN).move_probability, 0.0);
    }

    #[test]
    fn test_game_seeds_are_distinct() {
        let config = RolloutConfig::default().with_seed(7);
        assert_eq!(config.game_seed(0), 7);
        assert_eq!(config.game_seed(3), 10);
    }
}
