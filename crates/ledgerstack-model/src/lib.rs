//! Domain types for the Ledgerstack accounting API client.
//!
//! This crate defines the typed shapes of every entity kind the remote
//! accounting service returns (contacts, invoices, credit notes, bank
//! transactions, manual journals, payments, reference data, payroll
//! resources, and reports), plus the supporting pieces the decode layer
//! needs:
//!
//! - [`Loadable`] — tri-state container for nested collections that the
//!   service only includes on single-item fetches
//! - [`ClientHandle`] — non-owning back-reference to the configured client,
//!   stored on decoded entities to support follow-up calls
//! - [`ApiError`] — a remote-reported error record (always data, never a
//!   Rust error)
//! - [`Entity`] — the closed union over all entity kinds, used as the
//!   polymorphic result payload of a response envelope
#![allow(missing_docs)]
#![allow(clippy::struct_excessive_bools)]

pub mod client;
pub mod error;
pub mod loadable;
pub mod types;

pub use client::{ClientConfig, ClientHandle};
pub use error::ApiError;
pub use loadable::Loadable;
pub use types::{Entity, Identified};
