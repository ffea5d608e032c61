//! Error types for response parsing.

use ledgerstack_xml::XmlError;

/// Errors that can occur while parsing a response envelope.
///
/// These are structural failures of the envelope itself. Business-level
/// failures reported by the service travel as `ApiError` records inside a
/// successfully parsed [`ApiResponse`](crate::ApiResponse).
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// The root element was not `<Response>`.
    #[error("expected <Response> root element, found <{0}>")]
    UnrecognizedEnvelope(String),

    /// The body contained no root element at all.
    #[error("response body contained no root element")]
    MissingRoot,

    /// A child of the envelope failed to decode.
    #[error(transparent)]
    Xml(#[from] XmlError),
}
