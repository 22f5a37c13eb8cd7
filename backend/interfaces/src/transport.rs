//! HTTP seam towards the gateway.

use common_utils::errors::CustomResult;
use domain_types::{errors::ApiClientError, types::GatewayResponse};

/// Sends one serialized request document to a gateway endpoint and returns
/// the raw response.
///
/// Implementations are synchronous and single-shot: the calling thread
/// blocks for the round trip, there are no retries, and only the
/// transport's default timeouts apply.
pub trait GatewayTransport {
    fn submit_request(
        &self,
        url: &str,
        xml_body: String,
    ) -> CustomResult<GatewayResponse, ApiClientError>;
}
