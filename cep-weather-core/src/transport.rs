//! HTTP plumbing shared by both lookup clients.

use std::time::Duration;

use reqwest::{Client, IntoUrl, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    context::RequestContext,
    error::{BuildError, Classifier, LookupError},
};

/// Transport-level timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the shared HTTP client. Clone the result to share its connection
/// pool between lookup clients.
pub fn http_client() -> Result<Client, BuildError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Issue one GET and decode a 200 body as JSON.
///
/// Non-200 statuses are classified without reading the body. The whole
/// exchange is bound to `ctx`.
pub(crate) async fn get_json<T, U>(
    http: &Client,
    ctx: &RequestContext,
    classifier: Classifier,
    url: U,
) -> Result<T, LookupError>
where
    T: DeserializeOwned,
    U: IntoUrl,
{
    ctx.run(async move {
        let res = http.get(url).send().await?;

        let status = res.status();
        tracing::debug!(
            namespace = %classifier.namespace(),
            status = status.as_u16(),
            "upstream responded"
        );

        if status != StatusCode::OK {
            let err = classifier.classify(status.as_u16());
            tracing::warn!(
                namespace = %classifier.namespace(),
                status = status.as_u16(),
                %err,
                "upstream returned error status"
            );
            return Err(LookupError::Http(err));
        }

        let body = res.bytes().await?;
        serde_json::from_slice(&body).map_err(LookupError::Decode)
    })
    .await
}
