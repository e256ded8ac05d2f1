//! # HillClimbingConfig
//!
//! The `HillClimbingConfig` struct is the configuration record of a hill
//! climbing run: the execution mode, the inner iteration budget, the number of
//! outer restarts (iterated modes only) and the acceptance temperature
//! (stochastic modes only).
//!
//! ## Example
//!
//! ```rust
//! use trajex::trajectory::options::{ClimbMode, HillClimbingConfig};
//!
//! let config = HillClimbingConfig::builder()
//!     .mode(ClimbMode::IteratedStochastic)
//!     .max_iterations(500)
//!     .restarts(8)
//!     .temperature(2.5)
//!     .build();
//! assert!(config.validate().is_ok());
//!
//! let mode: ClimbMode = "iterated_default".parse().unwrap();
//! assert_eq!(mode, ClimbMode::IteratedDefault);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SearchError};

/// Execution mode of a hill climbing run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClimbMode {
    /// Greedy descent accepting strict improvements only.
    #[default]
    Default,
    /// Best of several default runs.
    IteratedDefault,
    /// Logistic acceptance driven by the temperature.
    Stochastic,
    /// Best of several stochastic runs.
    IteratedStochastic,
}

/// The single-trajectory loop run by a mode, on its own or inside restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InnerLoop {
    Default,
    Stochastic,
}

impl ClimbMode {
    pub fn inner_loop(self) -> InnerLoop {
        match self {
            ClimbMode::Default | ClimbMode::IteratedDefault => InnerLoop::Default,
            ClimbMode::Stochastic | ClimbMode::IteratedStochastic => InnerLoop::Stochastic,
        }
    }

    pub fn is_iterated(self) -> bool {
        matches!(self, ClimbMode::IteratedDefault | ClimbMode::IteratedStochastic)
    }

    pub fn is_stochastic(self) -> bool {
        self.inner_loop() == InnerLoop::Stochastic
    }

    /// Numeric code of the mode: 0 default, 1 iterated default, 2 stochastic,
    /// 3 iterated stochastic.
    pub fn code(self) -> u8 {
        match self {
            ClimbMode::Default => 0,
            ClimbMode::IteratedDefault => 1,
            ClimbMode::Stochastic => 2,
            ClimbMode::IteratedStochastic => 3,
        }
    }
}

impl TryFrom<u8> for ClimbMode {
    type Error = SearchError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(ClimbMode::Default),
            1 => Ok(ClimbMode::IteratedDefault),
            2 => Ok(ClimbMode::Stochastic),
            3 => Ok(ClimbMode::IteratedStochastic),
            other => Err(SearchError::Configuration(format!(
                "Unrecognized hill climbing mode: {}",
                other
            ))),
        }
    }
}

impl FromStr for ClimbMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "default" => Ok(ClimbMode::Default),
            "iterated_default" => Ok(ClimbMode::IteratedDefault),
            "stochastic" => Ok(ClimbMode::Stochastic),
            "iterated_stochastic" => Ok(ClimbMode::IteratedStochastic),
            _ => Err(SearchError::Configuration(format!(
                "Unrecognized hill climbing mode: {:?}",
                s
            ))),
        }
    }
}

impl fmt::Display for ClimbMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClimbMode::Default => "default",
            ClimbMode::IteratedDefault => "iterated_default",
            ClimbMode::Stochastic => "stochastic",
            ClimbMode::IteratedStochastic => "iterated_stochastic",
        };
        f.write_str(name)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HillClimbingConfig {
    mode: ClimbMode,
    max_iterations: usize,
    /// Outer restarts of the iterated modes
    restarts: usize,
    /// Acceptance temperature of the stochastic modes
    temperature: f64,
}

impl HillClimbingConfig {
    pub fn new(mode: ClimbMode, max_iterations: usize, restarts: usize, temperature: f64) -> Self {
        Self {
            mode,
            max_iterations,
            restarts,
            temperature,
        }
    }

    pub fn get_mode(&self) -> ClimbMode {
        self.mode
    }

    pub fn get_max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn get_restarts(&self) -> usize {
        self.restarts
    }

    pub fn get_temperature(&self) -> f64 {
        self.temperature
    }

    pub fn set_mode(&mut self, mode: ClimbMode) {
        self.mode = mode;
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    pub fn set_restarts(&mut self, restarts: usize) {
        self.restarts = restarts;
    }

    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature = temperature;
    }

    /// Checks the parameters used by the configured mode.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - `max_iterations` is 0
    /// - the mode is iterated and `restarts` is 0
    /// - the mode is stochastic and `temperature` is not positive
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(SearchError::Configuration(
                "Maximum iterations must be greater than 0".to_string(),
            ));
        }
        if self.mode.is_iterated() && self.restarts == 0 {
            return Err(SearchError::Configuration(
                "Iterated modes need at least one restart".to_string(),
            ));
        }
        // NaN fails the comparison as well.
        if self.mode.is_stochastic() && !(self.temperature > 0.0) {
            return Err(SearchError::Configuration(
                "Temperature must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns a builder for creating a `HillClimbingConfig` instance.
    pub fn builder() -> HillClimbingConfigBuilder {
        HillClimbingConfigBuilder::default()
    }
}

impl Default for HillClimbingConfig {
    fn default() -> Self {
        Self {
            mode: ClimbMode::Default,
            max_iterations: 1000,
            restarts: 10,
            temperature: 1.0,
        }
    }
}

/// Builder for `HillClimbingConfig`.
#[derive(Debug, Clone, Default)]
pub struct HillClimbingConfigBuilder {
    mode: Option<ClimbMode>,
    max_iterations: Option<usize>,
    restarts: Option<usize>,
    temperature: Option<f64>,
}

impl HillClimbingConfigBuilder {
    pub fn mode(mut self, value: ClimbMode) -> Self {
        self.mode = Some(value);
        self
    }

    pub fn max_iterations(mut self, value: usize) -> Self {
        self.max_iterations = Some(value);
        self
    }

    pub fn restarts(mut self, value: usize) -> Self {
        self.restarts = Some(value);
        self
    }

    pub fn temperature(mut self, value: f64) -> Self {
        self.temperature = Some(value);
        self
    }

    /// Builds the config, filling unset fields from `HillClimbingConfig::default()`.
    pub fn build(self) -> HillClimbingConfig {
        let default = HillClimbingConfig::default();
        HillClimbingConfig {
            mode: self.mode.unwrap_or(default.mode),
            max_iterations: self.max_iterations.unwrap_or(default.max_iterations),
            restarts: self.restarts.unwrap_or(default.restarts),
            temperature: self.temperature.unwrap_or(default.temperature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_codes_round_trip() {
        for code in 0..=3u8 {
            let mode = ClimbMode::try_from(code).unwrap();
            assert_eq!(mode.code(), code);
        }
        match ClimbMode::try_from(4) {
            Err(SearchError::Configuration(msg)) => {
                assert!(msg.contains("Unrecognized hill climbing mode"))
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Stochastic".parse::<ClimbMode>().unwrap(), ClimbMode::Stochastic);
        assert_eq!(
            "iterated-stochastic".parse::<ClimbMode>().unwrap(),
            ClimbMode::IteratedStochastic
        );
        assert!("annealing".parse::<ClimbMode>().is_err());
        assert_eq!(ClimbMode::IteratedDefault.to_string(), "iterated_default");
    }

    #[test]
    fn test_inner_loop_selection() {
        assert_eq!(ClimbMode::IteratedDefault.inner_loop(), InnerLoop::Default);
        assert_eq!(ClimbMode::IteratedStochastic.inner_loop(), InnerLoop::Stochastic);
        assert!(!ClimbMode::Stochastic.is_iterated());
    }

    #[test]
    fn test_validate() {
        assert!(HillClimbingConfig::default().validate().is_ok());

        let zero_budget = HillClimbingConfig::builder().max_iterations(0).build();
        assert!(zero_budget.validate().is_err());

        // Restarts only matter for iterated modes.
        let no_restarts = HillClimbingConfig::builder().restarts(0).build();
        assert!(no_restarts.validate().is_ok());
        let no_restarts = HillClimbingConfig::builder()
            .mode(ClimbMode::IteratedDefault)
            .restarts(0)
            .build();
        assert!(no_restarts.validate().is_err());

        let cold = HillClimbingConfig::builder()
            .mode(ClimbMode::Stochastic)
            .temperature(0.0)
            .build();
        assert!(cold.validate().is_err());
        let nan = HillClimbingConfig::builder()
            .mode(ClimbMode::Stochastic)
            .temperature(f64::NAN)
            .build();
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_builder_defaults() {
        let config = HillClimbingConfig::builder().restarts(3).build();
        assert_eq!(config.get_mode(), ClimbMode::Default);
        assert_eq!(config.get_max_iterations(), 1000);
        assert_eq!(config.get_restarts(), 3);
        assert_eq!(config.get_temperature(), 1.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let config = HillClimbingConfig::new(ClimbMode::IteratedStochastic, 250, 4, 0.5);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("iterated_stochastic"));
        let back: HillClimbingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
