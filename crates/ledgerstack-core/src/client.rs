//! The client value: configuration plus response parsing.
//!
//! Transport and authentication are external collaborators. The client
//! holds the endpoint configuration, tells the transport where to send each
//! operation, and parses the bodies the transport brings back.

use ledgerstack_model::client::{ClientConfig, ClientHandle};

use crate::dispatch::parse_response;
use crate::error::ResponseError;
use crate::operations::ApiOperation;
use crate::response::{ApiResponse, RequestEcho};

/// A configured API client.
#[derive(Debug, Clone)]
pub struct Client {
    handle: ClientHandle,
}

impl Client {
    /// Create a client from endpoint configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            handle: ClientHandle::new(config),
        }
    }

    /// The shareable handle stored on entities this client decodes.
    #[must_use]
    pub fn handle(&self) -> &ClientHandle {
        &self.handle
    }

    /// The configured endpoint base URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.handle.endpoint()
    }

    /// The full URL of an operation, for the collaborating transport.
    #[must_use]
    pub fn url_for(&self, op: &ApiOperation) -> String {
        format!("{}{}", self.endpoint(), op.path())
    }

    /// Parse a response body produced by the given operation.
    ///
    /// Decoded entities that support follow-up calls carry this client's
    /// handle.
    ///
    /// # Errors
    ///
    /// Returns `ResponseError` if the envelope is structurally invalid or a
    /// child fails to decode.
    pub fn parse_response(
        &self,
        op: &ApiOperation,
        echo: Option<RequestEcho>,
        raw: &[u8],
    ) -> Result<ApiResponse, ResponseError> {
        parse_response(raw, echo, op.signature(), Some(&self.handle))
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use ledgerstack_model::types::Entity;

    use super::*;

    #[test]
    fn test_should_build_operation_urls() {
        let client = Client::new(ClientConfig {
            endpoint: "https://ledger.example.test/api/2.0".to_owned(),
            unit_decimal_places: None,
        });

        assert_eq!(
            client.url_for(&ApiOperation::ListInvoices),
            "https://ledger.example.test/api/2.0/Invoices"
        );
        assert_eq!(
            client.url_for(&ApiOperation::GetContact("c-9".to_owned())),
            "https://ledger.example.test/api/2.0/Contacts/c-9"
        );
    }

    #[test]
    fn test_should_parse_with_operation_signature_and_attach_handle() {
        let client = Client::default();
        let xml = br"<Response>
            <Invoices>
                <Invoice>
                    <InvoiceID>inv-1</InvoiceID>
                    <LineItems><LineItem><Description>Widgets</Description></LineItem></LineItems>
                </Invoice>
            </Invoices>
        </Response>";

        // List operation: line items stay unloaded, handle attached.
        let response = client
            .parse_response(&ApiOperation::ListInvoices, None, xml)
            .expect("parsing should succeed");
        match response.into_single().expect("one invoice") {
            Entity::Invoice(invoice) => {
                assert!(!invoice.line_items.is_loaded());
                assert!(invoice.client.is_some());
            }
            other => panic!("expected invoice, got {}", other.kind_name()),
        }

        // Single fetch: line items load.
        let response = client
            .parse_response(
                &ApiOperation::GetInvoice("inv-1".to_owned()),
                None,
                xml,
            )
            .expect("parsing should succeed");
        match response.into_single().expect("one invoice") {
            Entity::Invoice(invoice) => {
                assert_eq!(invoice.line_items.len(), Some(1));
            }
            other => panic!("expected invoice, got {}", other.kind_name()),
        }
    }
}
