//! XML wire codec for the Ledgerstack accounting API client.
//!
//! The remote service speaks a tag-driven, loosely-typed XML protocol: every
//! scalar is optional text content, unknown tags must be ignored for forward
//! compatibility, and nested collections are only present on single-item
//! fetches. This crate converts between that wire format and the typed
//! entities in `ledgerstack-model`.
//!
//! # Key components
//!
//! - [`FromXml`] trait and [`from_xml`] function for decoding XML elements
//!   into entities, driven by a [`DecodeContext`] carrying the owning-client
//!   back-reference and the [`Hydration`] flags
//! - [`ToXml`] trait and [`to_xml`] / [`to_xml_collection`] functions for
//!   serializing writable entities into request bodies
//!
//! # Wire conventions
//!
//! - Booleans: `true`/`false`
//! - Timestamps: ISO 8601, with or without a UTC offset
//! - Dates: `2009-05-27T00:00:00` (time-of-day always zero) or `2009-05-27`
//! - Tag names are case-sensitive and must match exactly

pub mod deserialize;
pub mod error;
pub mod serialize;

pub use deserialize::{DecodeContext, FromXml, Hydration, from_xml};
pub use error::XmlError;
pub use serialize::{ToXml, to_xml, to_xml_collection};
