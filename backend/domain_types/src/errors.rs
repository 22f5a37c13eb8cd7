#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum ApiClientError {
    #[error("Client construction failed")]
    ClientConstructionFailed,
    #[error("Failed to send request to gateway {0}")]
    RequestNotSent(String),
    #[error("Gateway responded with non-success status {status_code}")]
    UnexpectedServerResponse { status_code: u16 },
    #[error("Failed to read the gateway response body")]
    ResponseDecodingFailed,
}

/// Failures raised while building, sending, or interpreting a gateway
/// request. Gateway-declined payments are not errors and never appear
/// here; they are reported through the flow's outcome value.
#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum GatewayError {
    /// A request needed a configuration value that was never provided.
    /// Raised at serialization time, not at configuration load, so unset
    /// credentials leave unrelated code paths untouched.
    #[error("Please specify {0} in the gateway configuration")]
    MissingSetting(&'static str),
    #[error("Failed to encode the request document")]
    RequestEncodingFailed,
    #[error("Gateway call failed")]
    RequestFailed,
    #[error("Failed to parse the gateway response as XML")]
    ResponseDeserializationFailed,
    #[error("Gateway response is missing the {0} element")]
    MissingResponseField(&'static str),
}

#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum StorageError {
    #[error("Failed to persist transaction {0}")]
    SaveFailed(String),
    #[error("Transaction {0} not found")]
    NotFound(String),
}

/// Top-level reconciliation failure; the underlying gateway or storage
/// report is attached as context.
#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum PaymentError {
    #[error("Gateway processing failed")]
    GatewayFailure,
    #[error("Transaction record could not be persisted")]
    StorageFailure,
}
