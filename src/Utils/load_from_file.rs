//! Reading JSON data files (mechanisms, reactor configurations) with error reports that point
//! at the offending line and column.
use crate::Kinetics::mechanism::{Mechanism, MechanismData, MechanismError};
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("file '{0}' does not exist")]
    NotFound(String),
    #[error("failed to read file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("error parsing '{origin}' at line {line}, column {column}: {message}")]
    Json {
        origin: String,
        line: usize,
        column: usize,
        message: String,
    },
    #[error(transparent)]
    Mechanism(#[from] MechanismError),
    #[error("invalid reactor configuration: {0}")]
    InvalidReactor(String),
}

/// reads a whole text file
pub fn read_file(file_name: &str) -> Result<String, ConfigError> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(ConfigError::NotFound(file_name.to_string()));
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: file_name.to_string(),
        source: e,
    })?;
    info!("read file '{}' ({} bytes)", file_name, text.len());
    Ok(text)
}

/// Parses JSON text into `T`. On failure the problematic line is logged with a pointer to the
/// error position. `origin` names the text in messages (usually the file name).
pub fn parse_json<T: DeserializeOwned>(text: &str, origin: &str) -> Result<T, ConfigError> {
    match serde_json::from_str::<T>(text) {
        Ok(data) => {
            info!("Successfully parsed '{}'", origin);
            Ok(data)
        }
        Err(e) => {
            let error_line = e.line();
            let error_column = e.column();
            let error_msg = format!(
                "Error parsing '{}' at line {}, column {}: {}",
                origin, error_line, error_column, e
            );
            error!("{}", error_msg);
            // serde_json counts lines from 1; line 0 means the error has no position
            if error_line > 0 {
                if let Some(problem_line) = text.lines().nth(error_line - 1) {
                    error!("Problematic line: {}", problem_line);
                    if error_column >= 1 && error_column <= problem_line.len() + 1 {
                        let pointer = " ".repeat(error_column - 1) + "^";
                        error!("{}", pointer);
                    }
                }
            }
            Err(ConfigError::Json {
                origin: origin.to_string(),
                line: error_line,
                column: error_column,
                message: e.to_string(),
            })
        }
    }
}

/// parses and compiles a mechanism from JSON text
pub fn parse_mechanism(text: &str, origin: &str) -> Result<Mechanism, ConfigError> {
    let data: MechanismData = parse_json(text, origin)?;
    if data.reactions.is_empty() {
        warn!("mechanism '{}' contains no reactions", origin);
    }
    match Mechanism::from_data(data) {
        Ok(mech) => Ok(mech),
        Err(e) => {
            error!("invalid mechanism '{}': {}", origin, e);
            Err(e.into())
        }
    }
}

/// loads and compiles a mechanism file
pub fn load_mechanism(file_name: &str) -> Result<Mechanism, ConfigError> {
    let text = read_file(file_name)?;
    parse_mechanism(&text, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TINY: &str = r#"{
  "name": "tiny",
  "units": {"length": "m", "quantity": "kmol", "activation_energy": "K"},
  "species": [
    {"name": "A", "molar_mass": 10.0, "thermo": {"low": [3.5,0,0,0,0,-1000,4], "high": [3.5,0,0,0,0,-1000,4]}},
    {"name": "B", "molar_mass": 10.0, "thermo": {"low": [3.5,0,0,0,0,-2000,4], "high": [3.5,0,0,0,0,-2000,4]}},
    {"name": "N2", "molar_mass": 28.0134, "thermo": {"low": [3.5,0,0,0,0,-1000,5], "high": [3.5,0,0,0,0,-1000,5]}}
  ],
  "reactions": [
    {"type": "elem", "eq": "A <=> B", "Arrhenius": [1e6, 0, 5000]}
  ]
}"#;

    #[test]
    fn test_load_mechanism_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", TINY).unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();
        let mech = load_mechanism(&path).unwrap();
        assert_eq!(mech.name, "tiny");
        assert_eq!(mech.n_species(), 3);
        assert_eq!(mech.n_reactions(), 1);
        assert_eq!(mech.bath_species(), "N2");
    }

    #[test]
    fn test_missing_file() {
        let result = load_mechanism("/nonexistent/dir/mech.json");
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_json_error_position() {
        let broken = "{\n  \"name\": \"x\",\n  \"species\": [,]\n}";
        match parse_mechanism(broken, "broken.json") {
            Err(ConfigError::Json { line, column, .. }) => {
                assert_eq!(line, 3);
                assert!(column > 0);
            }
            other => panic!("expected JSON error, got {:?}", other),
        }
    }

    #[test]
    fn test_mechanism_error_is_wrapped() {
        let bad = TINY.replace("A <=> B", "A <=> C");
        let result = parse_mechanism(&bad, "bad.json");
        assert!(matches!(
            result,
            Err(ConfigError::Mechanism(MechanismError::UnknownSpecies { .. }))
        ));
    }
}
