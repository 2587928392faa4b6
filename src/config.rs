//! # Configuration property source.
//!
//! [`Config`] is a string-keyed property map with required/optional typed
//! accessors. It is the surface `configure_all` hands to every component; how
//! the map is populated (files, deployment protocol, tests) is a collaborator
//! concern outside this crate.
//!
//! ## Rules
//! - Optional accessors return `Ok(None)` for a missing key but still fail on
//!   a malformed value.
//! - Required accessors fail with [`ComponentError::Config`] naming the key.
//!
//! ## Example
//! ```rust
//! use activisor::Config;
//!
//! let mut config = Config::new();
//! config.set("space.activity.webapp.port", "9000");
//!
//! assert_eq!(config.required_i64("space.activity.webapp.port").unwrap(), 9000);
//! assert!(config.i64("space.activity.missing").unwrap().is_none());
//! assert!(config.required_string("space.activity.missing").is_err());
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ComponentError;

/// String-keyed property source with typed accessors.
#[derive(Clone, Debug, Default)]
pub struct Config {
    values: HashMap<String, String>,
}

impl Config {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns `true` if the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Optional string property.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Required string property.
    pub fn required_string(&self, key: &str) -> Result<&str, ComponentError> {
        self.string(key).ok_or_else(|| ComponentError::Config {
            key: key.to_string(),
            reason: "required property is missing".to_string(),
        })
    }

    /// Optional integer property.
    pub fn i64(&self, key: &str) -> Result<Option<i64>, ComponentError> {
        self.parsed(key)
    }

    /// Required integer property.
    pub fn required_i64(&self, key: &str) -> Result<i64, ComponentError> {
        self.required(key, self.i64(key)?)
    }

    /// Optional float property.
    pub fn f64(&self, key: &str) -> Result<Option<f64>, ComponentError> {
        self.parsed(key)
    }

    /// Required float property.
    pub fn required_f64(&self, key: &str) -> Result<f64, ComponentError> {
        self.required(key, self.f64(key)?)
    }

    /// Optional boolean property (`true`/`false`).
    pub fn bool(&self, key: &str) -> Result<Option<bool>, ComponentError> {
        self.parsed(key)
    }

    /// Required boolean property.
    pub fn required_bool(&self, key: &str) -> Result<bool, ComponentError> {
        self.required(key, self.bool(key)?)
    }

    fn parsed<T: FromStr>(&self, key: &str) -> Result<Option<T>, ComponentError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|_| ComponentError::Config {
                key: key.to_string(),
                reason: format!("malformed value {raw:?}"),
            }),
        }
    }

    fn required<T>(&self, key: &str, value: Option<T>) -> Result<T, ComponentError> {
        value.ok_or_else(|| ComponentError::Config {
            key: key.to_string(),
            reason: "required property is missing".to_string(),
        })
    }
}

impl FromIterator<(String, String)> for Config {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
