//! Flat parameter map supplied by an external parameter source.
//!
//! A parameter source (form UI, config file, test fixture) hands the
//! core a mapping of named scalar values. The core validates types
//! and ranges through the typed getters here; it never fetches or
//! parses anything itself.

use indexmap::IndexMap;

use crate::error::ConfigError;

/// An ordered mapping of parameter names to scalar values.
///
/// Insertion order is preserved so that diagnostics and round-trips
/// list parameters the way the source supplied them.
///
/// # Examples
///
/// ```
/// use orrery_core::Params;
///
/// let params = Params::new()
///     .with("max_step", 100.0)
///     .with("dt", 0.01);
/// assert_eq!(params.count("max_step").unwrap(), 100);
/// assert_eq!(params.positive("dt").unwrap(), 0.01);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Params {
    values: IndexMap<String, f64>,
}

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named scalar, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set(name, value);
        self
    }

    /// Raw lookup without validation.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Number of parameters in the map.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A finite scalar parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingParameter`] when absent, or
    /// [`ConfigError::InvalidParameter`] when the value is NaN or
    /// infinite.
    pub fn scalar(&self, name: &'static str) -> Result<f64, ConfigError> {
        let value = self
            .get(name)
            .ok_or_else(|| ConfigError::MissingParameter { name: name.into() })?;
        if !value.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name,
                reason: format!("must be finite, got {value}"),
            });
        }
        Ok(value)
    }

    /// A strictly positive finite scalar (step sizes, resolutions).
    ///
    /// # Errors
    ///
    /// As [`scalar`](Self::scalar), plus
    /// [`ConfigError::InvalidParameter`] when the value is `<= 0`.
    pub fn positive(&self, name: &'static str) -> Result<f64, ConfigError> {
        let value = self.scalar(name)?;
        if value <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name,
                reason: format!("must be positive, got {value}"),
            });
        }
        Ok(value)
    }

    /// A positive integer-valued count (step budgets, grid extents).
    ///
    /// # Errors
    ///
    /// As [`positive`](Self::positive), plus
    /// [`ConfigError::InvalidParameter`] when the value has a
    /// fractional part.
    pub fn count(&self, name: &'static str) -> Result<usize, ConfigError> {
        let value = self.positive(name)?;
        // usize::MAX as f64 rounds up to 2^64, which is itself out of
        // range, hence >= rather than >.
        if value.fract() != 0.0 || value >= usize::MAX as f64 {
            return Err(ConfigError::InvalidParameter {
                name,
                reason: format!("must be a positive integer, got {value}"),
            });
        }
        Ok(value as usize)
    }

    /// A non-negative integer-valued parameter (RNG seeds).
    ///
    /// Zero is valid here, unlike [`count`](Self::count): a seed of 0
    /// selects a perfectly usable RNG stream.
    ///
    /// # Errors
    ///
    /// As [`scalar`](Self::scalar), plus
    /// [`ConfigError::InvalidParameter`] when the value is negative,
    /// has a fractional part, or exceeds `u64` range.
    pub fn unsigned(&self, name: &'static str) -> Result<u64, ConfigError> {
        let value = self.scalar(name)?;
        if value < 0.0 || value.fract() != 0.0 || value >= u64::MAX as f64 {
            return Err(ConfigError::InvalidParameter {
                name,
                reason: format!("must be a non-negative integer, got {value}"),
            });
        }
        Ok(value as u64)
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, f64)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
