use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    context::RequestContext,
    error::LookupError,
    model::{PostalAddress, WeatherObservation},
};

pub mod cep;
pub mod weather;

pub use cep::CepClient;
pub use weather::WeatherClient;

/// Resolves a CEP into an address.
#[async_trait]
pub trait CepLookup: Send + Sync + Debug {
    async fn lookup(&self, ctx: &RequestContext, cep: &str) -> Result<PostalAddress, LookupError>;
}

/// Fetches current conditions for a free-text place.
#[async_trait]
pub trait WeatherLookup: Send + Sync + Debug {
    async fn lookup(
        &self,
        ctx: &RequestContext,
        place: &str,
    ) -> Result<WeatherObservation, LookupError>;
}
