//! Non-owning back-reference to the configured API client.

use std::sync::Arc;

/// Endpoint configuration for a connected accounting API client.
///
/// Authentication and transport live outside this workspace; the
/// configuration carried here is only what decoded entities need to issue
/// follow-up calls against the same endpoint.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the remote API, without a trailing slash.
    pub endpoint: String,
    /// Optional decimal-place override for unit amounts, forwarded to the
    /// service as the `unitdp` query parameter by the transport layer.
    pub unit_decimal_places: Option<u8>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.example.com/api.xro/2.0".to_owned(),
            unit_decimal_places: None,
        }
    }
}

/// Cheap-to-clone, non-owning handle to a configured client.
///
/// Stored on decoded entities that support follow-up calls (reloading a
/// contact, fetching the line items a list response omitted). The handle is
/// never serialized to the wire and never takes part in comparisons;
/// entities decoded without one (`None`) are fully usable data.
#[derive(Debug, Clone)]
pub struct ClientHandle(Arc<ClientConfig>);

impl ClientHandle {
    /// Wrap a configuration in a shareable handle.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self(Arc::new(config))
    }

    /// The configuration this handle points at.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.0
    }

    /// Base URL of the remote API.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.0.endpoint
    }
}

impl From<ClientConfig> for ClientHandle {
    fn from(config: ClientConfig) -> Self {
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_share_config_between_clones() {
        let handle = ClientHandle::new(ClientConfig {
            endpoint: "https://api.test/api.xro/2.0".to_owned(),
            unit_decimal_places: Some(4),
        });
        let clone = handle.clone();

        assert_eq!(clone.endpoint(), "https://api.test/api.xro/2.0");
        assert_eq!(clone.config().unit_decimal_places, Some(4));
    }
}
