//! HTTP adapter for the directions provider.

use tracing::debug;

use crate::config::DirectionsConfig;
use crate::error::{ConfigError, RouteError};
use crate::request::RouteRequest;
use crate::response::DirectionsResponse;
use crate::traits::DirectionsProvider;

#[derive(Debug, Clone)]
pub struct DirectionsClient {
    config: DirectionsConfig,
    client: reqwest::blocking::Client,
}

impl DirectionsClient {
    /// Validates the configuration and builds the HTTP client.
    pub fn new(config: DirectionsConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &DirectionsConfig {
        &self.config
    }
}

impl DirectionsProvider for DirectionsClient {
    fn returns_to_origin(&self) -> bool {
        self.config.return_to_origin
    }

    fn directions(&self, request: &RouteRequest) -> Result<DirectionsResponse, RouteError> {
        let params = request.query_params(self.config.return_to_origin, self.config.travel_mode);

        debug!(
            url = %self.config.base_url,
            destinations = request.destinations().len(),
            "requesting optimized directions"
        );

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&params)
            .query(&[("key", self.config.api_key.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouteError::Transport(format!(
                "directions provider responded with HTTP {}",
                status
            )));
        }

        let body = response.text()?;
        serde_json::from_str::<DirectionsResponse>(&body)
            .map_err(|err| RouteError::Provider(format!("malformed directions response: {}", err)))
    }
}
