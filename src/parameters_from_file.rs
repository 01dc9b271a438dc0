//! Supports extracting correction parameters from YAML file (optional)

use std::path::Path;
use yaml_rust2::{Yaml, YamlLoader};

use crate::correction_error::CorrectionError;
use crate::parameters::path_correction::{Parameters, PathLayout};

/// Reads a float that may be written as integer (`20` as well as `20.0`).
fn read_f64(section: &Yaml, key: &str, default: f64) -> Result<f64, CorrectionError> {
    match &section[key] {
        Yaml::BadValue | Yaml::Null => Ok(default),
        Yaml::Integer(value) => Ok(*value as f64),
        Yaml::Real(_) => section[key]
            .as_f64()
            .ok_or_else(|| CorrectionError::ParseError(format!("'{}' is not a number", key))),
        other => Err(CorrectionError::ParseError(format!(
            "'{}' must be a number (got {:?})",
            key, other
        ))),
    }
}

fn read_usize(section: &Yaml, key: &str) -> Result<Option<usize>, CorrectionError> {
    match &section[key] {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::Integer(value) if *value >= 0 => Ok(Some(*value as usize)),
        other => Err(CorrectionError::ParseError(format!(
            "'{}' must be a non-negative integer (got {:?})",
            key, other
        ))),
    }
}

impl Parameters {
    /// Read the correction parameters from YAML file. YAML file like this is supported:
    /// ```yaml
    /// path_correction_parameters:
    ///   total_duration: 20.0
    ///   gate_frequency: 4.0
    ///   gate_amplitude: 0.02
    ///   oscillation_axis: 1
    ///   max_acceleration: 1.0
    /// path_layout:
    ///   time_column: 0
    ///   gate_column: 1
    ///   gate_count: 8
    ///   tooltip_column: 25
    ///   rating_column: 28
    /// ```
    /// Every key is optional and defaults to [`Parameters::default`]. If `gate_count`
    /// is given without `tooltip_column`, the tooltip is assumed to follow the gates.
    /// `rating_column: ~` means the path is not rated.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, CorrectionError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, CorrectionError> {
        let docs = YamlLoader::load_from_str(contents)
            .map_err(|e| CorrectionError::ParseError(e.to_string()))?;
        let doc = docs
            .first()
            .ok_or_else(|| CorrectionError::MissingField("YAML document".into()))?;

        let defaults = Parameters::default();
        let cp = &doc["path_correction_parameters"];
        let lp = &doc["path_layout"];
        if cp.is_badvalue() && lp.is_badvalue() {
            return Err(CorrectionError::MissingField(
                "path_correction_parameters or path_layout".into(),
            ));
        }

        let oscillation_axis = read_usize(cp, "oscillation_axis")?.unwrap_or(defaults.oscillation_axis);

        let gate_column = read_usize(lp, "gate_column")?.unwrap_or(defaults.layout.gate_column);
        let explicit_gates = read_usize(lp, "gate_count")?;
        let gate_count = explicit_gates.unwrap_or(defaults.layout.gate_count);
        let tooltip_column = match read_usize(lp, "tooltip_column")? {
            Some(column) => column,
            None if explicit_gates.is_some() => gate_column + gate_count * 3,
            None => defaults.layout.tooltip_column,
        };
        let rating_column = match &lp["rating_column"] {
            Yaml::Null => None,
            Yaml::BadValue if explicit_gates.is_some() => None,
            Yaml::BadValue => defaults.layout.rating_column,
            _ => read_usize(lp, "rating_column")?,
        };

        let parameters = Parameters {
            total_duration: read_f64(cp, "total_duration", defaults.total_duration)?,
            gate_frequency: read_f64(cp, "gate_frequency", defaults.gate_frequency)?,
            gate_amplitude: read_f64(cp, "gate_amplitude", defaults.gate_amplitude)?,
            oscillation_axis,
            max_acceleration: read_f64(cp, "max_acceleration", defaults.max_acceleration)?,
            layout: PathLayout {
                time_column: read_usize(lp, "time_column")?.unwrap_or(defaults.layout.time_column),
                gate_column,
                gate_count,
                tooltip_column,
                rating_column,
            },
        };
        parameters.validate()?;
        Ok(parameters)
    }
}
