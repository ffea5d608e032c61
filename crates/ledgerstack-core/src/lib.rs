//! Response dispatch for the Ledgerstack accounting API client.
//!
//! Every response from the remote service arrives as a single `<Response>`
//! XML envelope whose immediate children are a mix of scalar metadata and
//! the result payload. This crate parses that envelope with one tag-driven
//! dispatch table, producing a typed [`ApiResponse`]:
//!
//! - scalar metadata (`ID`, `Status`, `ProviderName`, `DateTimeUTC`) fills
//!   envelope fields;
//! - singular and plural entity tags decode into [`ResponseItem`], with a
//!   result of exactly one entity collapsed to [`ResponseItem::One`];
//! - `<Errors>` children become [`ApiError`](ledgerstack_model::ApiError)
//!   data records, never Rust errors;
//! - unknown tags are skipped for forward compatibility.
//!
//! Parsing is a pure function of the body, the request signature, and an
//! optional client back-reference. It performs no I/O and holds no shared
//! state; transport and authentication are external collaborators that feed
//! bodies in and take request bodies out.

pub mod client;
pub mod dispatch;
pub mod error;
pub mod operations;
pub mod response;

pub use client::Client;
pub use dispatch::parse_response;
pub use error::ResponseError;
pub use operations::ApiOperation;
pub use response::{ApiResponse, RequestEcho, ResponseItem, propagate_assigned_ids};
