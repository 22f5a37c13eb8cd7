//! Contract towards the hosting web layer.

/// Request metadata supplied by the web layer. Handing a context to
/// `make_payment` is what selects the interactive flow.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Host used to qualify relative return URLs, e.g. `shop.example.com`.
    pub host: String,
}

impl RequestContext {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}
