//! Blocking HTTPS client for gateway round trips.

use bytes::Bytes;
use common_utils::errors::CustomResult;
use domain_types::{errors::ApiClientError, types::GatewayResponse};
use error_stack::report;
use interfaces::GatewayTransport;
use url::Url;

/// Synchronous gateway client: one POST per call, no retries, the
/// client's default timeouts only. The calling thread blocks for the
/// duration of the round trip.
pub struct GatewayHttpClient {
    client: reqwest::blocking::Client,
}

impl GatewayHttpClient {
    pub fn new() -> CustomResult<Self, ApiClientError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|error| {
                tracing::error!(?error, "failed to construct the HTTP client");
                report!(ApiClientError::ClientConstructionFailed)
            })?;
        Ok(Self { client })
    }
}

impl GatewayTransport for GatewayHttpClient {
    fn submit_request(
        &self,
        url: &str,
        xml_body: String,
    ) -> CustomResult<GatewayResponse, ApiClientError> {
        let endpoint = Url::parse(url).map_err(|error| {
            tracing::error!(?error, url, "endpoint is not a valid URL");
            report!(ApiClientError::RequestNotSent(url.to_string()))
        })?;

        let response = self
            .client
            .post(endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/xml")
            .body(xml_body)
            .send()
            .map_err(|error| {
                tracing::error!(?error, url, "failed getting a response from the gateway");
                report!(ApiClientError::RequestNotSent(url.to_string()))
            })?;

        let status_code = response.status().as_u16();
        tracing::info!(url = %endpoint, status_code, "gateway responded");

        if !response.status().is_success() {
            return Err(report!(ApiClientError::UnexpectedServerResponse {
                status_code
            }));
        }

        let body: Bytes = response.bytes().map_err(|error| {
            tracing::error!(?error, "failed to read the gateway response body");
            report!(ApiClientError::ResponseDecodingFailed)
        })?;
        Ok(GatewayResponse { status_code, body })
    }
}
