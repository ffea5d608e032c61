//! The typed response envelope and positional identifier write-back.

use bytes::Bytes;
use chrono::{DateTime, Utc};

use ledgerstack_model::error::ApiError;
use ledgerstack_model::types::{Entity, Identified};

/// The request that produced a response, kept for diagnostics.
///
/// Stored unmodified on the envelope; the parser never inspects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestEcho {
    /// Query parameters of a GET request, in submission order.
    Params(Vec<(String, String)>),
    /// The XML body of a PUT or POST request.
    Xml(Bytes),
}

/// The result slot of a response envelope.
///
/// A result of exactly one entity is always collapsed to `One`, whether it
/// arrived under a singular tag or as a one-element plural wrapper. An
/// empty plural wrapper yields `Many(vec![])`, which is distinct from
/// `Empty` (no result tag at all): the former is a confirmed empty match,
/// the latter means the response carried no result.
#[derive(Debug, Clone, Default)]
pub enum ResponseItem {
    /// The response carried no result payload.
    #[default]
    Empty,
    /// Exactly one entity.
    One(Box<Entity>),
    /// Zero, two, or more entities, in document order.
    Many(Vec<Entity>),
}

/// A fully parsed `<Response>` envelope.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// The `ID` scalar: the provider's identifier for this exchange.
    pub response_id: Option<String>,
    /// The `Status` scalar, `"OK"` on success.
    pub status: Option<String>,
    /// The `ProviderName` scalar: the registered application name.
    pub provider: Option<String>,
    /// The `DateTimeUTC` scalar: when the provider produced the response.
    pub date_time_utc: Option<DateTime<Utc>>,
    /// The decoded result payload.
    pub result: ResponseItem,
    /// Remote-reported errors, in document order. Empty on success.
    pub errors: Vec<ApiError>,
    /// The request that produced this response, if the caller supplied it.
    pub request_echo: Option<RequestEcho>,
    /// The raw response body, byte for byte.
    pub raw_body: Bytes,
}

impl ApiResponse {
    /// Whether the remote service reported no errors.
    #[must_use]
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    /// The result entities as a slice, regardless of collapse state.
    #[must_use]
    pub fn items(&self) -> &[Entity] {
        match &self.result {
            ResponseItem::Empty => &[],
            ResponseItem::One(entity) => std::slice::from_ref(entity.as_ref()),
            ResponseItem::Many(entities) => entities,
        }
    }

    /// Consume the envelope, returning the single result entity if the
    /// result collapsed to one.
    #[must_use]
    pub fn into_single(self) -> Option<Entity> {
        match self.result {
            ResponseItem::One(entity) => Some(*entity),
            ResponseItem::Empty | ResponseItem::Many(_) => None,
        }
    }
}

/// Write server-assigned identifiers back onto submitted objects.
///
/// Batch create and update responses echo the submitted entities in
/// submission order, so matching is positional: index `i` of `submitted`
/// receives the identifier of the `i`-th decoded entity when both exist.
/// Names play no part, which keeps batches with duplicate names correct. A
/// length mismatch truncates to the shorter side.
pub fn propagate_assigned_ids<T: Identified>(response: &ApiResponse, submitted: &mut [T]) {
    for (object, entity) in submitted.iter_mut().zip(response.items()) {
        if let Some(id) = entity.assigned_id() {
            object.set_assigned_id(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use ledgerstack_model::types::Contact;

    use super::*;

    fn envelope(result: ResponseItem) -> ApiResponse {
        ApiResponse {
            response_id: None,
            status: Some("OK".to_owned()),
            provider: None,
            date_time_utc: None,
            result,
            errors: Vec::new(),
            request_echo: None,
            raw_body: Bytes::new(),
        }
    }

    fn contact_entity(id: &str) -> Entity {
        Entity::Contact(Contact {
            contact_id: Some(id.to_owned()),
            ..Contact::default()
        })
    }

    #[test]
    fn test_should_expose_items_for_each_result_shape() {
        assert!(envelope(ResponseItem::Empty).items().is_empty());

        let one = envelope(ResponseItem::One(Box::new(contact_entity("c-1"))));
        assert_eq!(one.items().len(), 1);

        let many = envelope(ResponseItem::Many(vec![
            contact_entity("c-1"),
            contact_entity("c-2"),
        ]));
        assert_eq!(many.items().len(), 2);
        assert!(many.into_single().is_none());
    }

    #[test]
    fn test_should_write_back_ids_by_position() {
        let response = envelope(ResponseItem::Many(vec![
            contact_entity("id-a"),
            contact_entity("id-b"),
        ]));

        // Both submitted objects carry the same name; position decides.
        let mut submitted = vec![
            Contact {
                name: Some("Duplicate".to_owned()),
                ..Contact::default()
            },
            Contact {
                name: Some("Duplicate".to_owned()),
                ..Contact::default()
            },
        ];

        propagate_assigned_ids(&response, &mut submitted);
        assert_eq!(submitted[0].contact_id.as_deref(), Some("id-a"));
        assert_eq!(submitted[1].contact_id.as_deref(), Some("id-b"));
    }

    #[test]
    fn test_should_truncate_write_back_on_length_mismatch() {
        let response = envelope(ResponseItem::One(Box::new(contact_entity("id-a"))));

        let mut submitted = vec![Contact::default(), Contact::default()];
        propagate_assigned_ids(&response, &mut submitted);

        assert_eq!(submitted[0].contact_id.as_deref(), Some("id-a"));
        assert_eq!(submitted[1].contact_id, None);
    }
}
