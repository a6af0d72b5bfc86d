use serde::{Deserialize, Serialize};

/// Point values used by the candidate scorer.
///
/// The defaults were tuned by hand against real course pages; they are
/// loadable from a JSON file so they can be adjusted without a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Normalized surname equality
    pub exact_last: f64,

    /// Normalized surname containment in either direction
    pub partial_last: f64,

    /// Normalized given-name equality
    pub first_name: f64,

    /// First initial equality
    pub first_initial: f64,

    /// Multiplier on log10(num_ratings + 1)
    pub popularity_scale: f64,

    /// Upper bound on the popularity bonus
    pub popularity_cap: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact_last: 50.0,
            partial_last: 35.0,
            first_name: 20.0,
            first_initial: 10.0,
            popularity_scale: 5.0,
            popularity_cap: 10.0,
        }
    }
}

impl ScoringWeights {
    /// Diminishing bonus for candidates with more reviews
    pub fn popularity_bonus(&self, num_ratings: u32) -> f64 {
        let raw = (f64::from(num_ratings) + 1.0).log10() * self.popularity_scale;
        raw.min(self.popularity_cap)
    }
}
