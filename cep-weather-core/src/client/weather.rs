use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::{
    config::{Config, ENV_WEATHER_API_KEY},
    context::RequestContext,
    error::{BuildError, Classifier, LookupError},
    model::WeatherObservation,
    transport,
};

use super::WeatherLookup;

/// WeatherAPI.com `current.json` client.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: Url,
    api_key: String,
    http: Client,
}

impl WeatherClient {
    pub fn new(base_url: &str, api_key: impl Into<String>, http: Client) -> Result<Self, BuildError> {
        let base_url = Url::parse(base_url)
            .map_err(|source| BuildError::InvalidUrl { url: base_url.to_string(), source })?;

        Ok(Self { base_url, api_key: api_key.into(), http })
    }

    /// Warns when no API key is configured; the provider will then answer 401/403.
    pub fn from_config(config: &Config, http: Client) -> Result<Self, BuildError> {
        if !config.has_weather_api_key() {
            tracing::warn!("{ENV_WEATHER_API_KEY} is not set");
        }
        Self::new(&config.weather_base_url, config.weather_api_key.clone(), http)
    }

    /// Base endpoint plus `key`, `q` and `aqi=no`, form-URL-escaped.
    pub fn endpoint(&self, place: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("q", place)
            .append_pair("aqi", "no");
        url
    }
}

#[async_trait]
impl WeatherLookup for WeatherClient {
    async fn lookup(
        &self,
        ctx: &RequestContext,
        place: &str,
    ) -> Result<WeatherObservation, LookupError> {
        let url = self.endpoint(place);
        tracing::debug!(%place, "looking up current weather");

        transport::get_json(&self.http, ctx, Classifier::WEATHER, url).await
    }
}
