//! Filter configuration via TOML files.
//!
//! Wavelengths and orientations arrive flattened (row-major, one row per
//! scale or orientation) and are validated against the declared
//! dimensionality before being reshaped into matrices. All parameter range
//! checks happen here or in [`PhaseSymmetryParams::validate`], before any
//! image work starts.

use std::fs;
use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use toml::Value;

use crate::error::{PhaseSymmetryError, PhaseSymmetryResult};

/// Selects which symmetry polarity contributes to the energy accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Polarity {
    /// Bright and dark symmetric structures both respond.
    #[default]
    Both,
    /// Only bright-on-dark symmetric structures respond.
    Bright,
    /// Only dark-on-bright symmetric structures respond.
    Dark,
}

impl Polarity {
    /// Map the conventional integer encoding {-1, 0, 1} to a polarity.
    pub fn from_i8(value: i8) -> Option<Self> {
        match value {
            0 => Some(Polarity::Both),
            1 => Some(Polarity::Bright),
            -1 => Some(Polarity::Dark),
            _ => None,
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Polarity::Both => 0,
            Polarity::Bright => 1,
            Polarity::Dark => -1,
        }
    }
}

/// Validated parameter set consumed by the filter bank builder and engine.
///
/// `wavelengths` is scales x dimension, one wavelength-per-axis row per
/// scale. `orientations` is orientations x dimension, one direction row per
/// orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSymmetryParams {
    pub wavelengths: Array2<f64>,
    pub orientations: Array2<f64>,
    pub sigma: f64,
    pub angular_bandwidth: f64,
    pub cutoff: f64,
    pub order: f64,
    pub noise_threshold: f64,
    pub polarity: Polarity,
}

impl PhaseSymmetryParams {
    /// Stock parameters for a given dimensionality: scales at wavelengths
    /// 10 and 20 on every axis, one orientation per coordinate axis.
    pub fn defaults(dimension: usize) -> Self {
        let mut wavelengths = Array2::zeros((2, dimension));
        for axis in 0..dimension {
            wavelengths[[0, axis]] = 10.0;
            wavelengths[[1, axis]] = 20.0;
        }
        Self {
            wavelengths,
            orientations: Array2::eye(dimension),
            sigma: default_sigma(),
            angular_bandwidth: default_angular_bandwidth(),
            cutoff: default_cutoff(),
            order: default_order(),
            noise_threshold: default_noise_threshold(),
            polarity: Polarity::Both,
        }
    }

    /// Check every parameter range and the matrix shapes against the grid
    /// dimensionality. Called by the filter bank builder before any kernel
    /// is generated.
    pub fn validate(&self, dimension: usize) -> PhaseSymmetryResult<()> {
        if self.sigma <= 0.0 || self.sigma == 1.0 || !self.sigma.is_finite() {
            return Err(PhaseSymmetryError::configuration(
                "sigma",
                self.sigma,
                "sigma > 0 and sigma != 1",
            ));
        }
        if !(self.angular_bandwidth > 0.0 && self.angular_bandwidth.is_finite()) {
            return Err(PhaseSymmetryError::configuration(
                "angular_bandwidth",
                self.angular_bandwidth,
                "angular_bandwidth > 0",
            ));
        }
        if !(self.cutoff > 0.0 && self.cutoff <= 0.5) {
            return Err(PhaseSymmetryError::configuration(
                "cutoff",
                self.cutoff,
                "cutoff in (0, 0.5]",
            ));
        }
        if !(self.order > 0.0 && self.order.is_finite()) {
            return Err(PhaseSymmetryError::configuration(
                "order",
                self.order,
                "order > 0",
            ));
        }
        if !self.noise_threshold.is_finite() {
            return Err(PhaseSymmetryError::configuration(
                "noise_threshold",
                self.noise_threshold,
                "finite value",
            ));
        }
        if self.wavelengths.nrows() == 0 {
            return Err(PhaseSymmetryError::configuration(
                "wavelengths",
                "0 rows",
                "at least one scale",
            ));
        }
        if self.wavelengths.ncols() != dimension {
            return Err(PhaseSymmetryError::configuration(
                "wavelengths",
                format!("{} columns", self.wavelengths.ncols()),
                format!("{dimension} columns matching the grid dimensionality"),
            ));
        }
        if self.wavelengths.iter().any(|&w| !w.is_finite() || w < 0.0) {
            return Err(PhaseSymmetryError::configuration(
                "wavelengths",
                "negative or non-finite entry",
                "every wavelength finite and >= 0",
            ));
        }
        if self.orientations.nrows() == 0 {
            return Err(PhaseSymmetryError::configuration(
                "orientations",
                "0 rows",
                "at least one orientation",
            ));
        }
        if self.orientations.ncols() != dimension {
            return Err(PhaseSymmetryError::configuration(
                "orientations",
                format!("{} columns", self.orientations.ncols()),
                format!("{dimension} columns matching the grid dimensionality"),
            ));
        }
        for (row, orientation) in self.orientations.rows().into_iter().enumerate() {
            let norm = orientation.iter().map(|v| v * v).sum::<f64>();
            if !norm.is_finite() || norm == 0.0 {
                return Err(PhaseSymmetryError::configuration(
                    "orientations",
                    format!("row {row}"),
                    "every orientation row non-zero and finite",
                ));
            }
        }
        Ok(())
    }
}

/// Filter configuration loaded from a TOML `[filter]` section.
///
/// # Examples
///
/// ```
/// use phasesym::FilterConfig;
///
/// let config = FilterConfig::from_str("[filter]\ndimension = 3\nsigma = 0.25")
///     .unwrap();
/// assert_eq!(config.dimension, 3);
/// let params = config.params().unwrap();
/// assert_eq!(params.wavelengths.ncols(), 3);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct FilterConfig {
    /// Grid dimensionality the flattened matrices are reshaped against.
    pub dimension: usize,
    /// Flattened scales x dimension wavelength matrix.
    pub wavelengths: Vec<f64>,
    /// Flattened orientations x dimension orientation matrix.
    pub orientations: Vec<f64>,
    /// Log-Gabor bandwidth, dimensionless.
    pub sigma: f64,
    /// Angular bandwidth in radians.
    pub angular_bandwidth: f64,
    /// Butterworth cutoff as a fraction of Nyquist.
    pub cutoff: f64,
    /// Butterworth order.
    pub order: f64,
    /// Noise floor subtracted from each orientation's energy.
    pub noise_threshold: f64,
    /// Symmetry polarity, encoded as -1, 0, or 1 in the file.
    pub polarity: Polarity,
}

impl FilterConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PhaseSymmetryResult<Self> {
        let contents = fs::read_to_string(&path)?;
        Self::from_str(&contents)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(toml_str: &str) -> PhaseSymmetryResult<Self> {
        let value: Value =
            toml::from_str(toml_str).map_err(|err| PhaseSymmetryError::Parse(err.to_string()))?;
        let table = value
            .get("filter")
            .and_then(|v| v.as_table())
            .cloned()
            .unwrap_or_default();

        let dimension = match table.get("dimension") {
            Some(value) => {
                let raw = value.as_integer().ok_or_else(|| {
                    PhaseSymmetryError::configuration(
                        "dimension",
                        value.to_string(),
                        "integer >= 1",
                    )
                })?;
                if raw < 1 {
                    return Err(PhaseSymmetryError::configuration(
                        "dimension",
                        raw,
                        "integer >= 1",
                    ));
                }
                raw as usize
            }
            None => 2,
        };

        let wavelengths = match table.get("wavelengths") {
            Some(value) => float_array(value, "wavelengths")?,
            None => default_wavelengths(dimension),
        };
        let orientations = match table.get("orientations") {
            Some(value) => float_array(value, "orientations")?,
            None => default_orientations(dimension),
        };

        let sigma = float_or(&table, "sigma", default_sigma());
        let angular_bandwidth =
            float_or(&table, "angular_bandwidth", default_angular_bandwidth());
        let cutoff = float_or(&table, "cutoff", default_cutoff());
        let order = float_or(&table, "order", default_order());
        let noise_threshold = float_or(&table, "noise_threshold", default_noise_threshold());

        let polarity_raw = table
            .get("polarity")
            .and_then(|v| v.as_integer())
            .unwrap_or(0);
        let polarity = i8::try_from(polarity_raw)
            .ok()
            .and_then(Polarity::from_i8)
            .ok_or_else(|| {
                PhaseSymmetryError::configuration("polarity", polarity_raw, "one of -1, 0, 1")
            })?;

        Ok(Self {
            dimension,
            wavelengths,
            orientations,
            sigma,
            angular_bandwidth,
            cutoff,
            order,
            noise_threshold,
            polarity,
        })
    }

    /// Reshape the flattened matrices and validate every parameter,
    /// producing the parameter set the engine consumes.
    pub fn params(&self) -> PhaseSymmetryResult<PhaseSymmetryParams> {
        let wavelengths = reshape(&self.wavelengths, self.dimension, "wavelengths")?;
        let orientations = reshape(&self.orientations, self.dimension, "orientations")?;
        let params = PhaseSymmetryParams {
            wavelengths,
            orientations,
            sigma: self.sigma,
            angular_bandwidth: self.angular_bandwidth,
            cutoff: self.cutoff,
            order: self.order,
            noise_threshold: self.noise_threshold,
            polarity: self.polarity,
        };
        params.validate(self.dimension)?;
        Ok(params)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            dimension: 2,
            wavelengths: default_wavelengths(2),
            orientations: default_orientations(2),
            sigma: default_sigma(),
            angular_bandwidth: default_angular_bandwidth(),
            cutoff: default_cutoff(),
            order: default_order(),
            noise_threshold: default_noise_threshold(),
            polarity: Polarity::Both,
        }
    }
}

fn reshape(flat: &[f64], dimension: usize, parameter: &str) -> PhaseSymmetryResult<Array2<f64>> {
    if flat.is_empty() || flat.len() % dimension != 0 {
        return Err(PhaseSymmetryError::configuration(
            parameter,
            format!("{} entries", flat.len()),
            format!("non-empty length divisible by dimension {dimension}"),
        ));
    }
    let rows = flat.len() / dimension;
    Array2::from_shape_vec((rows, dimension), flat.to_vec())
        .map_err(|err| PhaseSymmetryError::Parse(err.to_string()))
}

fn float_array(value: &Value, parameter: &str) -> PhaseSymmetryResult<Vec<f64>> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    item.as_float()
                        .or_else(|| item.as_integer().map(|v| v as f64))
                        .ok_or_else(|| {
                            PhaseSymmetryError::Parse(format!(
                                "{parameter} entries must be numbers"
                            ))
                        })
                })
                .collect()
        })
        .unwrap_or_else(|| {
            Err(PhaseSymmetryError::Parse(format!(
                "{parameter} must be an array of numbers"
            )))
        })
}

fn float_or(table: &toml::map::Map<String, Value>, key: &str, default: f64) -> f64 {
    table
        .get(key)
        .and_then(|v| {
            v.as_float()
                .or_else(|| v.as_integer().map(|value| value as f64))
        })
        .unwrap_or(default)
}

fn default_wavelengths(dimension: usize) -> Vec<f64> {
    let mut flat = vec![10.0; dimension];
    flat.extend(std::iter::repeat(20.0).take(dimension));
    flat
}

fn default_orientations(dimension: usize) -> Vec<f64> {
    let mut flat = vec![0.0; dimension * dimension];
    for axis in 0..dimension {
        flat[axis * dimension + axis] = 1.0;
    }
    flat
}

fn default_sigma() -> f64 {
    0.55
}

fn default_angular_bandwidth() -> f64 {
    std::f64::consts::PI
}

fn default_cutoff() -> f64 {
    0.4
}

fn default_order() -> f64 {
    10.0
}

fn default_noise_threshold() -> f64 {
    10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_section_missing() {
        let config = FilterConfig::from_str("[other]\nvalue = 1").unwrap();
        assert_eq!(config.dimension, 2);
        assert_eq!(config.wavelengths, vec![10.0, 10.0, 20.0, 20.0]);
        assert_eq!(config.orientations, vec![1.0, 0.0, 0.0, 1.0]);
        assert!((config.sigma - 0.55).abs() < f64::EPSILON);
        assert_eq!(config.polarity, Polarity::Both);
    }

    #[test]
    fn parses_custom_values() {
        let toml = r#"
[filter]
dimension = 3
wavelengths = [10.0, 10.0, 10.0, 20, 20, 20, 30.0, 30.0, 30.0]
sigma = 0.25
noise_threshold = 10.0
polarity = 1
"#;
        let config = FilterConfig::from_str(toml).unwrap();
        assert_eq!(config.dimension, 3);
        assert_eq!(config.wavelengths.len(), 9);
        assert!((config.sigma - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.polarity, Polarity::Bright);

        let params = config.params().unwrap();
        assert_eq!(params.wavelengths.nrows(), 3);
        assert_eq!(params.orientations.nrows(), 3);
    }

    #[test]
    fn rejects_non_positive_dimension() {
        assert!(FilterConfig::from_str("[filter]\ndimension = 0").is_err());
        assert!(FilterConfig::from_str("[filter]\ndimension = -2").is_err());
        assert!(FilterConfig::from_str("[filter]\ndimension = \"two\"").is_err());
    }

    #[test]
    fn rejects_polarity_outside_range() {
        let result = FilterConfig::from_str("[filter]\npolarity = 2");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_wavelengths_not_divisible_by_dimension() {
        let config =
            FilterConfig::from_str("[filter]\ndimension = 2\nwavelengths = [10.0, 10.0, 20.0]")
                .unwrap();
        assert!(config.params().is_err());
    }

    #[test]
    fn rejects_sigma_of_one() {
        let config = FilterConfig::from_str("[filter]\nsigma = 1.0").unwrap();
        assert!(config.params().is_err());
    }

    #[test]
    fn rejects_cutoff_above_nyquist_fraction() {
        let config = FilterConfig::from_str("[filter]\ncutoff = 0.6").unwrap();
        assert!(config.params().is_err());
    }

    #[test]
    fn rejects_zero_orientation_row() {
        let config =
            FilterConfig::from_str("[filter]\norientations = [1.0, 0.0, 0.0, 0.0]").unwrap();
        assert!(config.params().is_err());
    }

    #[test]
    fn polarity_round_trips_through_integers() {
        for value in [-1i8, 0, 1] {
            let polarity = Polarity::from_i8(value).unwrap();
            assert_eq!(polarity.as_i8(), value);
        }
        assert!(Polarity::from_i8(2).is_none());
    }

    #[test]
    fn default_params_match_stock_configuration() {
        let params = PhaseSymmetryParams::defaults(3);
        assert_eq!(params.wavelengths.nrows(), 2);
        assert_eq!(params.wavelengths[[0, 0]], 10.0);
        assert_eq!(params.wavelengths[[1, 2]], 20.0);
        assert_eq!(params.orientations, Array2::<f64>::eye(3));
        assert!(params.validate(3).is_ok());
    }
}
