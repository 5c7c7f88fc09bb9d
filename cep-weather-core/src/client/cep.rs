use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::Config,
    context::RequestContext,
    error::{BuildError, Classifier, LookupError},
    model::PostalAddress,
    transport,
};

use super::CepLookup;

const PLACEHOLDER: &str = "{cep}";

/// ViaCEP client.
#[derive(Debug, Clone)]
pub struct CepClient {
    url_template: String,
    http: Client,
}

impl CepClient {
    /// Fails when the template has no `{cep}` placeholder.
    pub fn new(url_template: impl Into<String>, http: Client) -> Result<Self, BuildError> {
        let url_template = url_template.into();
        if !url_template.contains(PLACEHOLDER) {
            return Err(BuildError::MissingPlaceholder(url_template));
        }
        Ok(Self { url_template, http })
    }

    pub fn from_config(config: &Config, http: Client) -> Result<Self, BuildError> {
        Self::new(config.via_cep_url.clone(), http)
    }

    /// Substitute the code into the first placeholder, verbatim.
    pub fn endpoint(&self, cep: &str) -> String {
        self.url_template.replacen(PLACEHOLDER, cep, 1)
    }
}

#[async_trait]
impl CepLookup for CepClient {
    async fn lookup(&self, ctx: &RequestContext, cep: &str) -> Result<PostalAddress, LookupError> {
        let url = self.endpoint(cep);
        tracing::debug!(%cep, "looking up CEP");

        transport::get_json(&self.http, ctx, Classifier::POSTAL, url).await
    }
}
