//! Per-feature contribution breakdown
//!
//! The element-wise product of the query composite and a candidate composite is normalized
//! by its sum. The first half of the dimensions is credited to `artist`, the second half to
//! `genre`. This is a presentation bucketing only; both features share the whole vector space.

use serde::{Deserialize, Serialize};
use songgraph_algorithms::hadamard;
use std::fmt;

/// Feature that feeds a composite vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Artist,
    Genre,
}

impl Feature {
    /// Features in rendering order
    pub const ALL: [Feature; 2] = [Feature::Artist, Feature::Genre];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Artist => "artist",
            Feature::Genre => "genre",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Share of the match attributed to each feature
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureContributions {
    pub artist: f32,
    pub genre: f32,
}

impl FeatureContributions {
    /// All contributions zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// Contributions of `candidate` to its match against `query`.
    ///
    /// Zero for both features when the products sum to zero or the ratio is not finite.
    pub fn between(query: &[f32], candidate: &[f32]) -> Self {
        let products = hadamard(query, candidate);
        let total: f32 = products.iter().sum();
        if total == 0.0 || !total.is_finite() {
            return Self::zero();
        }

        let split = products.len() / 2;
        let artist: f32 = products[..split].iter().sum::<f32>() / total;
        let genre: f32 = products[split..].iter().sum::<f32>() / total;
        if !artist.is_finite() || !genre.is_finite() {
            return Self::zero();
        }

        Self { artist, genre }
    }

    pub fn get(&self, feature: Feature) -> f32 {
        match feature {
            Feature::Artist => self.artist,
            Feature::Genre => self.genre,
        }
    }

    /// Human-readable summary, e.g. `artist: 41.23%, genre: 58.77%`
    pub fn influence(&self) -> String {
        Feature::ALL
            .iter()
            .map(|f| format!("{}: {:.2}%", f, self.get(*f) * 100.0))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_contributions() {
        // products: [1, 1, 2, 0] -> total 4, artist 2/4, genre 2/4
        let c = FeatureContributions::between(&[1.0, 1.0, 2.0, 5.0], &[1.0, 1.0, 1.0, 0.0]);
        assert!((c.artist - 0.5).abs() < 1e-6);
        assert!((c.genre - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_contributions_sum_to_one() {
        let c = FeatureContributions::between(&[0.3, -0.1, 0.8, 0.2], &[0.5, 0.4, 0.1, 0.9]);
        assert!((c.artist + c.genre - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_sum_yields_zero() {
        // products: [1, -1] sum to zero
        let c = FeatureContributions::between(&[1.0, 1.0], &[1.0, -1.0]);
        assert_eq!(c, FeatureContributions::zero());

        let c = FeatureContributions::between(&[0.0, 0.0], &[0.0, 0.0]);
        assert_eq!(c, FeatureContributions::zero());
    }

    #[test]
    fn test_influence_format() {
        let c = FeatureContributions { artist: 0.4123, genre: 0.5877 };
        assert_eq!(c.influence(), "artist: 41.23%, genre: 58.77%");
        assert_eq!(FeatureContributions::zero().influence(), "artist: 0.00%, genre: 0.00%");
    }
}
