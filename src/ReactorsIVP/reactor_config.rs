//! Reactor configuration file: which mechanism and which operation mode.
//!
//! ```json
//! {
//!   "mechanism": "data/h2o2_usc_mech2.json",
//!   "reactor": {"mode": "constant_pressure", "pressure": 101325.0}
//! }
//! ```
//! `"mechanism"` may also be `"builtin:h2o2_usc"` for the bundled mechanism. A relative path
//! is resolved against the directory of the configuration file. The mode is turned into a
//! [`Reactor`] once, here.
use crate::Kinetics::mechanism::Mechanism;
use crate::ReactorsIVP::dydt::{ConstantPressure, ConstantVolume, Reactor};
use crate::Utils::load_from_file::{ConfigError, load_mechanism, parse_json, read_file};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// name of the bundled mechanism in configuration files
pub const BUILTIN_H2O2: &str = "builtin:h2o2_usc";

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ReactorMode {
    ConstantPressure {
        /// Pa
        pressure: f64,
    },
    ConstantVolume {
        /// kg/m^3
        density: f64,
    },
}

impl ReactorMode {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            ReactorMode::ConstantPressure { pressure } if !(pressure > 0.0 && pressure.is_finite()) => Err(
                ConfigError::InvalidReactor(format!("pressure must be positive, got {}", pressure)),
            ),
            ReactorMode::ConstantVolume { density } if !(density > 0.0 && density.is_finite()) => Err(
                ConfigError::InvalidReactor(format!("density must be positive, got {}", density)),
            ),
            _ => Ok(()),
        }
    }
    /// builds the strategy object for this mode
    pub fn build(&self, mech: Arc<Mechanism>) -> Result<Reactor, ConfigError> {
        self.validate()?;
        Ok(match *self {
            ReactorMode::ConstantPressure { pressure } => ConstantPressure::new(mech, pressure).into(),
            ReactorMode::ConstantVolume { density } => ConstantVolume::new(mech, density).into(),
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReactorConfig {
    pub mechanism: String,
    pub reactor: ReactorMode,
}

impl ReactorConfig {
    /// reads a configuration file; the mechanism is not loaded yet
    pub fn from_file(file_name: &str) -> Result<Self, ConfigError> {
        let text = read_file(file_name)?;
        let mut config: ReactorConfig = parse_json(&text, file_name)?;
        config.reactor.validate()?;
        if config.mechanism != BUILTIN_H2O2 {
            let mech_path = Path::new(&config.mechanism);
            if mech_path.is_relative() {
                if let Some(dir) = Path::new(file_name).parent() {
                    config.mechanism = dir.join(mech_path).to_string_lossy().into_owned();
                }
            }
        }
        Ok(config)
    }

    pub fn load_mechanism(&self) -> Result<Mechanism, ConfigError> {
        if self.mechanism == BUILTIN_H2O2 {
            Mechanism::h2o2_usc()
        } else {
            load_mechanism(&self.mechanism)
        }
    }

    /// loads the mechanism and builds the reactor
    pub fn build(&self) -> Result<Reactor, ConfigError> {
        let mech = Arc::new(self.load_mechanism()?);
        let reactor = self.reactor.build(mech)?;
        info!("reactor {:?} with mechanism '{}'", self.reactor, self.mechanism);
        Ok(reactor)
    }
}

/// reads a configuration file and builds the reactor it describes
pub fn load_reactor(file_name: &str) -> Result<Reactor, ConfigError> {
    ReactorConfig::from_file(file_name)?.build()
}
