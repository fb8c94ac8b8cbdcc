//! Random sources selected from configuration.
//!
//! [`ConfiguredSource`] is an enum over every generator/variance-reduction
//! combination, so the simulation loop dispatches statically with a single
//! `match` per draw sequence.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::antithetic::Antithetic;
use super::park_miller::ParkMiller;
use super::prng::PricerRng;
use super::source::{RandomSource, SeedError};

/// Underlying uniform generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
    /// Park-Miller minimal standard LCG with inverse-CDF normals.
    #[default]
    ParkMiller,
    /// `StdRng` with Ziggurat normals.
    StdRng,
}

impl FromStr for GeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "park-miller" | "park_miller" | "parkmiller" => Ok(Self::ParkMiller),
            "std-rng" | "std_rng" | "stdrng" => Ok(Self::StdRng),
            other => Err(format!("unknown generator '{}'", other)),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParkMiller => write!(f, "park-miller"),
            Self::StdRng => write!(f, "std-rng"),
        }
    }
}

/// Variance reduction applied to the draw stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VarianceReduction {
    /// Plain draws.
    #[default]
    None,
    /// Antithetic variates.
    Antithetic,
}

impl FromStr for VarianceReduction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "antithetic" => Ok(Self::Antithetic),
            other => Err(format!("unknown variance reduction '{}'", other)),
        }
    }
}

/// A random source built from a [`GeneratorKind`] and [`VarianceReduction`].
#[derive(Clone, Debug)]
pub enum ConfiguredSource {
    /// Plain Park-Miller.
    ParkMiller(ParkMiller),
    /// Antithetic Park-Miller.
    AntitheticParkMiller(Antithetic<ParkMiller>),
    /// Plain `StdRng`.
    StdRng(PricerRng),
    /// Antithetic `StdRng`.
    AntitheticStdRng(Antithetic<PricerRng>),
}

impl ConfiguredSource {
    /// Builds a source for `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::SeedInvalid`] when the generator rejects the seed.
    pub fn build(
        generator: GeneratorKind,
        reduction: VarianceReduction,
        seed: u64,
    ) -> Result<Self, SeedError> {
        Ok(match (generator, reduction) {
            (GeneratorKind::ParkMiller, VarianceReduction::None) => {
                Self::ParkMiller(ParkMiller::new(seed)?)
            }
            (GeneratorKind::ParkMiller, VarianceReduction::Antithetic) => {
                Self::AntitheticParkMiller(Antithetic::new(ParkMiller::new(seed)?))
            }
            (GeneratorKind::StdRng, VarianceReduction::None) => {
                Self::StdRng(PricerRng::from_seed(seed))
            }
            (GeneratorKind::StdRng, VarianceReduction::Antithetic) => {
                Self::AntitheticStdRng(Antithetic::new(PricerRng::from_seed(seed)))
            }
        })
    }
}

impl RandomSource for ConfiguredSource {
    #[inline]
    fn fill_gaussians(&mut self, draws: &mut [f64]) {
        match self {
            Self::ParkMiller(source) => source.fill_gaussians(draws),
            Self::AntitheticParkMiller(source) => source.fill_gaussians(draws),
            Self::StdRng(source) => source.fill_gaussians(draws),
            Self::AntitheticStdRng(source) => source.fill_gaussians(draws),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::ParkMiller(source) => source.reset(),
            Self::AntitheticParkMiller(source) => source.reset(),
            Self::StdRng(source) => source.reset(),
            Self::AntitheticStdRng(source) => source.reset(),
        }
    }

    fn skip(&mut self, sequences: usize, len: usize) {
        match self {
            Self::ParkMiller(source) => source.skip(sequences, len),
            Self::AntitheticParkMiller(source) => source.skip(sequences, len),
            Self::StdRng(source) => source.skip(sequences, len),
            Self::AntitheticStdRng(source) => source.skip(sequences, len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_matches_direct_construction() {
        let mut configured =
            ConfiguredSource::build(GeneratorKind::ParkMiller, VarianceReduction::None, 9)
                .unwrap();
        let mut direct = ParkMiller::new(9).unwrap();
        assert_eq!(configured.generate(6), direct.generate(6));
    }

    #[test]
    fn test_build_antithetic_reflects() {
        let mut source =
            ConfiguredSource::build(GeneratorKind::StdRng, VarianceReduction::Antithetic, 9)
                .unwrap();
        let a = source.generate(2);
        let b = source.generate(2);
        assert_eq!(a[0], -b[0]);
        assert_eq!(a[1], -b[1]);
    }

    #[test]
    fn test_build_propagates_seed_error() {
        let result = ConfiguredSource::build(GeneratorKind::ParkMiller, VarianceReduction::None, 0);
        assert!(matches!(result, Err(SeedError::SeedInvalid { seed: 0, .. })));
        assert!(
            ConfiguredSource::build(GeneratorKind::StdRng, VarianceReduction::None, 0).is_ok()
        );
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!(
            "Park-Miller".parse::<GeneratorKind>().unwrap(),
            GeneratorKind::ParkMiller
        );
        assert_eq!("std_rng".parse::<GeneratorKind>().unwrap(), GeneratorKind::StdRng);
        assert!("mersenne".parse::<GeneratorKind>().is_err());
        assert_eq!(
            "ANTITHETIC".parse::<VarianceReduction>().unwrap(),
            VarianceReduction::Antithetic
        );
        assert_eq!(GeneratorKind::StdRng.to_string(), "std-rng");
    }
}
