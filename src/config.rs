//! Directions provider configuration.
//!
//! The configuration is built once (usually from the process environment at
//! startup) and handed to [`crate::directions::DirectionsClient::new`], which
//! validates it. A missing credential is a startup error, never a per-request one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_KEY: &str = "DIRECTIONS_API_KEY";
pub const ENV_BASE_URL: &str = "DIRECTIONS_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "DIRECTIONS_TIMEOUT_SECS";
pub const ENV_RETURN_TO_ORIGIN: &str = "DIRECTIONS_RETURN_TO_ORIGIN";
pub const ENV_TRAVEL_MODE: &str = "DIRECTIONS_TRAVEL_MODE";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TravelMode::Driving => "driving",
                TravelMode::Walking => "walking",
                TravelMode::Bicycling => "bicycling",
            }
        )
    }
}

impl FromStr for TravelMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "bicycling" => Ok(TravelMode::Bicycling),
            _ => Err(()),
        }
    }
}

#[derive(Clone)]
pub struct DirectionsConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    /// When set, the route ends back at the origin (depot loop). Otherwise
    /// the last destination is the endpoint of an open route.
    pub return_to_origin: bool,
    pub travel_mode: TravelMode,
}

// Hand-written so the key never lands in logs.
impl fmt::Debug for DirectionsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectionsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("return_to_origin", &self.return_to_origin)
            .field("travel_mode", &self.travel_mode)
            .finish()
    }
}

impl DirectionsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            return_to_origin: true,
            travel_mode: TravelMode::Driving,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_return_to_origin(mut self, return_to_origin: bool) -> Self {
        self.return_to_origin = return_to_origin;
        self
    }

    pub fn with_travel_mode(mut self, travel_mode: TravelMode) -> Self {
        self.travel_mode = travel_mode;
        self
    }

    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey { var: ENV_API_KEY })?;
        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: ENV_TIMEOUT_SECS,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(ENV_RETURN_TO_ORIGIN) {
            config.return_to_origin = parse_bool(&value).ok_or(ConfigError::InvalidValue {
                var: ENV_RETURN_TO_ORIGIN,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(ENV_TRAVEL_MODE) {
            config.travel_mode = value.parse().map_err(|_| ConfigError::InvalidValue {
                var: ENV_TRAVEL_MODE,
                value: value.clone(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey { var: ENV_API_KEY });
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                var: ENV_TIMEOUT_SECS,
                value: self.timeout_secs.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
