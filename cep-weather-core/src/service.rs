use reqwest::Client;
use thiserror::Error;

use crate::{
    client::{CepClient, CepLookup, WeatherClient, WeatherLookup},
    config::Config,
    context::RequestContext,
    convert::convert_observation,
    error::{BuildError, ConversionError, ErrorKind, LookupError, Namespace},
    model::Temperature,
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid zipcode")]
    InvalidZipcode,

    #[error("can not find zipcode")]
    ZipcodeNotFound,

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// CEP → city → current weather → temperature in three scales.
#[derive(Debug)]
pub struct TemperatureService {
    cep: Box<dyn CepLookup>,
    weather: Box<dyn WeatherLookup>,
}

impl TemperatureService {
    pub fn new(cep: Box<dyn CepLookup>, weather: Box<dyn WeatherLookup>) -> Self {
        Self { cep, weather }
    }

    /// Wire the real clients over one shared HTTP client.
    pub fn from_config(config: &Config, http: Client) -> Result<Self, BuildError> {
        let cep = CepClient::from_config(config, http.clone())?;
        let weather = WeatherClient::from_config(config, http)?;
        Ok(Self::new(Box::new(cep), Box::new(weather)))
    }

    pub async fn temperature_for_cep(
        &self,
        ctx: &RequestContext,
        cep: &str,
    ) -> Result<Temperature, ServiceError> {
        if !is_valid_cep(cep) {
            return Err(ServiceError::InvalidZipcode);
        }

        let address = match self.cep.lookup(ctx, cep).await {
            Ok(address) => address,
            Err(LookupError::Http(err)) if err.is(Namespace::Postal, ErrorKind::NotFound) => {
                return Err(ServiceError::ZipcodeNotFound);
            }
            Err(err) => return Err(err.into()),
        };
        if address.is_not_found() {
            return Err(ServiceError::ZipcodeNotFound);
        }

        tracing::debug!(%cep, city = %address.city, "resolved CEP");

        let weather = self.weather.lookup(ctx, &address.city).await?;
        Ok(convert_observation(&weather)?)
    }
}

/// Exactly eight ASCII digits, no separator.
pub fn is_valid_cep(cep: &str) -> bool {
    cep.len() == 8 && cep.bytes().all(|b| b.is_ascii_digit())
}
