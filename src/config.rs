//! Engine parameters.

use serde::{Deserialize, Serialize};

use crate::error::{IcaError, Result};

/// Hyperparameters of one ICA run.
///
/// Every field has a default, so a partial JSON document deserializes:
///
/// ```
/// use aprender_ica::IcaConfig;
///
/// let config = IcaConfig::default().with_decades(100).with_empires(4);
/// assert_eq!(config.num_decades, 100);
/// assert_eq!(config.num_countries, 80);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IcaConfig {
    /// Initial population size (default: 80)
    pub num_countries: usize,
    /// Initial number of empires (default: 8)
    pub num_empires: usize,
    /// Number of decades to run (default: 2500)
    pub num_decades: usize,
    /// Assimilation coefficient, "beta" in the literature (default: 2.0)
    pub assimilation_coefficient: f64,
    /// Weight of the mean colony cost in an empire's total cost (default: 0.02)
    pub zeta: f64,
    /// Initial per-empire revolution rate (default: 0.1)
    pub revolution_rate: f64,
    /// Multiplicative decay of the revolution rate per revolution (default: 0.99)
    pub damp_ratio: f64,
    /// Fraction of the search-space diagonal under which two empires unite (default: 0.02)
    pub uniting_threshold: f64,
    /// Probability that imperialistic competition runs in a decade (default: 0.11)
    pub competition_probability: f64,
    /// End the run as soon as a single empire remains (default: false)
    pub stop_if_single_empire: bool,
}

impl Default for IcaConfig {
    fn default() -> Self {
        Self {
            num_countries: 80,
            num_empires: 8,
            num_decades: 2500,
            assimilation_coefficient: 2.0,
            zeta: 0.02,
            revolution_rate: 0.1,
            damp_ratio: 0.99,
            uniting_threshold: 0.02,
            competition_probability: 0.11,
            stop_if_single_empire: false,
        }
    }
}

impl IcaConfig {
    /// Create a configuration with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set population size and empire count together.
    #[must_use]
    pub fn with_population(mut self, num_countries: usize, num_empires: usize) -> Self {
        self.num_countries = num_countries;
        self.num_empires = num_empires;
        self
    }

    /// Set the initial number of empires.
    #[must_use]
    pub fn with_empires(mut self, num_empires: usize) -> Self {
        self.num_empires = num_empires;
        self
    }

    /// Set the number of decades.
    #[must_use]
    pub fn with_decades(mut self, num_decades: usize) -> Self {
        self.num_decades = num_decades;
        self
    }

    /// Set the assimilation coefficient.
    #[must_use]
    pub fn with_assimilation_coefficient(mut self, beta: f64) -> Self {
        self.assimilation_coefficient = beta;
        self
    }

    /// Set zeta.
    #[must_use]
    pub fn with_zeta(mut self, zeta: f64) -> Self {
        self.zeta = zeta;
        self
    }

    /// Set the initial revolution rate and its damping ratio.
    #[must_use]
    pub fn with_revolution(mut self, rate: f64, damp_ratio: f64) -> Self {
        self.revolution_rate = rate;
        self.damp_ratio = damp_ratio;
        self
    }

    /// Set the uniting threshold fraction.
    #[must_use]
    pub fn with_uniting_threshold(mut self, threshold: f64) -> Self {
        self.uniting_threshold = threshold;
        self
    }

    /// Set the per-decade competition probability.
    #[must_use]
    pub fn with_competition_probability(mut self, p: f64) -> Self {
        self.competition_probability = p;
        self
    }

    /// Stop as soon as a single empire remains.
    #[must_use]
    pub fn with_stop_if_single_empire(mut self, stop: bool) -> Self {
        self.stop_if_single_empire = stop;
        self
    }

    /// Check every parameter against its admissible range.
    pub fn validate(&self) -> Result<()> {
        if self.num_empires == 0 {
            return Err(IcaError::invalid_param("num_empires", self.num_empires, "> 0"));
        }
        if self.num_countries < self.num_empires {
            return Err(IcaError::invalid_param(
                "num_countries",
                self.num_countries,
                &format!(">= num_empires ({})", self.num_empires),
            ));
        }
        check_finite_non_negative("assimilation_coefficient", self.assimilation_coefficient)?;
        check_finite_non_negative("zeta", self.zeta)?;
        check_finite_non_negative("uniting_threshold", self.uniting_threshold)?;
        check_unit_interval("revolution_rate", self.revolution_rate)?;
        check_unit_interval("damp_ratio", self.damp_ratio)?;
        check_unit_interval("competition_probability", self.competition_probability)?;
        Ok(())
    }
}

fn check_finite_non_negative(param: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(IcaError::invalid_param(param, value, "finite and >= 0"))
    }
}

fn check_unit_interval(param: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(IcaError::invalid_param(param, value, "in [0, 1]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = IcaConfig::default();
        assert_eq!(c.num_countries, 80);
        assert_eq!(c.num_empires, 8);
        assert_eq!(c.num_decades, 2500);
        assert!((c.assimilation_coefficient - 2.0).abs() < 1e-12);
        assert!((c.zeta - 0.02).abs() < 1e-12);
        assert!((c.revolution_rate - 0.1).abs() < 1e-12);
        assert!((c.damp_ratio - 0.99).abs() < 1e-12);
        assert!((c.uniting_threshold - 0.02).abs() < 1e-12);
        assert!((c.competition_probability - 0.11).abs() < 1e-12);
        assert!(!c.stop_if_single_empire);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let c = IcaConfig::new()
            .with_population(30, 3)
            .with_decades(10)
            .with_zeta(0.1)
            .with_revolution(0.3, 0.95)
            .with_stop_if_single_empire(true);
        assert_eq!(c.num_countries, 30);
        assert_eq!(c.num_empires, 3);
        assert_eq!(c.num_decades, 10);
        assert!((c.revolution_rate - 0.3).abs() < 1e-12);
        assert!((c.damp_ratio - 0.95).abs() < 1e-12);
        assert!(c.stop_if_single_empire);
    }

    #[test]
    fn test_validate_rejects_zero_empires() {
        let err = IcaConfig::default().with_empires(0).validate().unwrap_err();
        assert!(err.to_string().contains("num_empires"));
    }

    #[test]
    fn test_validate_rejects_more_empires_than_countries() {
        let err = IcaConfig::default()
            .with_population(5, 6)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("num_countries"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_rates() {
        assert!(IcaConfig::default().with_revolution(1.5, 0.99).validate().is_err());
        assert!(IcaConfig::default().with_revolution(0.1, -0.1).validate().is_err());
        assert!(IcaConfig::default().with_zeta(f64::NAN).validate().is_err());
        assert!(IcaConfig::default()
            .with_competition_probability(2.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let c: IcaConfig =
            serde_json::from_str(r#"{"num_decades": 50, "stop_if_single_empire": true}"#)
                .expect("valid json");
        assert_eq!(c.num_decades, 50);
        assert!(c.stop_if_single_empire);
        assert_eq!(c.num_countries, 80);
        assert!((c.damp_ratio - 0.99).abs() < 1e-12);
    }
}
