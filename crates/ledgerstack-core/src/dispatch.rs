//! Envelope parsing: routes each child of `<Response>` through one
//! tag-driven dispatch table.
//!
//! The table maps a child tag to what it is: scalar metadata, a singular
//! entity, a plural wrapper, the authoritative-first-child `Organisations`
//! wrapper, or the `Errors` collection. Tags not in the table are skipped,
//! so schema additions on the provider side never break parsing.
//!
//! Hydration of nested collections is keyed on the request signature, not
//! on document content: a response produced by a kind's list operation has
//! that kind's nested collections marked `NotLoaded` even if a wrapper tag
//! happens to appear.

use bytes::Bytes;
use quick_xml::Reader;
use quick_xml::events::Event;

use ledgerstack_model::client::ClientHandle;
use ledgerstack_model::types::{
    Account, BankTransaction, Contact, ContactGroup, CreditNote, Currency, Entity, Invoice, Item,
    ManualJournal, Organisation, PayRun, Payment, PayrollCalendar, Report, TaxRate,
    TrackingCategory,
};
use ledgerstack_xml::XmlError;
use ledgerstack_xml::deserialize::{
    DecodeContext, FromXml, Hydration, decode_list, parse_timestamp, read_text_content,
    skip_element,
};

use crate::error::ResponseError;
use crate::response::{ApiResponse, RequestEcho, ResponseItem};

/// The kinds of entity the envelope can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntityKind {
    Contact,
    ContactGroup,
    Invoice,
    CreditNote,
    BankTransaction,
    ManualJournal,
    Payment,
    Account,
    TaxRate,
    Item,
    Currency,
    Organisation,
    TrackingCategory,
    PayrollCalendar,
    PayRun,
    Report,
}

impl EntityKind {
    /// The singular wire tag used for items inside this kind's plural wrapper.
    fn item_tag(self) -> &'static str {
        match self {
            Self::Contact => "Contact",
            Self::ContactGroup => "ContactGroup",
            Self::Invoice => "Invoice",
            Self::CreditNote => "CreditNote",
            Self::BankTransaction => "BankTransaction",
            Self::ManualJournal => "ManualJournal",
            Self::Payment => "Payment",
            Self::Account => "Account",
            Self::TaxRate => "TaxRate",
            Self::Item => "Item",
            Self::Currency => "Currency",
            Self::Organisation => "Organisation",
            Self::TrackingCategory => "TrackingCategory",
            Self::PayrollCalendar => "PayrollCalendar",
            Self::PayRun => "PayRun",
            Self::Report => "Report",
        }
    }

    /// Decode one entity of this kind from the reader.
    fn decode(
        self,
        reader: &mut Reader<&[u8]>,
        ctx: &DecodeContext,
    ) -> Result<Entity, XmlError> {
        Ok(match self {
            Self::Contact => Entity::Contact(Contact::from_xml_reader(reader, ctx)?),
            Self::ContactGroup => Entity::ContactGroup(ContactGroup::from_xml_reader(reader, ctx)?),
            Self::Invoice => Entity::Invoice(Invoice::from_xml_reader(reader, ctx)?),
            Self::CreditNote => Entity::CreditNote(CreditNote::from_xml_reader(reader, ctx)?),
            Self::BankTransaction => {
                Entity::BankTransaction(BankTransaction::from_xml_reader(reader, ctx)?)
            }
            Self::ManualJournal => {
                Entity::ManualJournal(ManualJournal::from_xml_reader(reader, ctx)?)
            }
            Self::Payment => Entity::Payment(Payment::from_xml_reader(reader, ctx)?),
            Self::Account => Entity::Account(Account::from_xml_reader(reader, ctx)?),
            Self::TaxRate => Entity::TaxRate(TaxRate::from_xml_reader(reader, ctx)?),
            Self::Item => Entity::Item(Item::from_xml_reader(reader, ctx)?),
            Self::Currency => Entity::Currency(Currency::from_xml_reader(reader, ctx)?),
            Self::Organisation => Entity::Organisation(Organisation::from_xml_reader(reader, ctx)?),
            Self::TrackingCategory => {
                Entity::TrackingCategory(TrackingCategory::from_xml_reader(reader, ctx)?)
            }
            Self::PayrollCalendar => {
                Entity::PayrollCalendar(PayrollCalendar::from_xml_reader(reader, ctx)?)
            }
            Self::PayRun => Entity::PayRun(PayRun::from_xml_reader(reader, ctx)?),
            Self::Report => Entity::Report(Report::from_xml_reader(reader, ctx)?),
        })
    }

    /// An entity of this kind with every field at its default, for
    /// self-closing item tags.
    fn empty(self) -> Entity {
        match self {
            Self::Contact => Entity::Contact(Contact::default()),
            Self::ContactGroup => Entity::ContactGroup(ContactGroup::default()),
            Self::Invoice => Entity::Invoice(Invoice::default()),
            Self::CreditNote => Entity::CreditNote(CreditNote::default()),
            Self::BankTransaction => Entity::BankTransaction(BankTransaction::default()),
            Self::ManualJournal => Entity::ManualJournal(ManualJournal::default()),
            Self::Payment => Entity::Payment(Payment::default()),
            Self::Account => Entity::Account(Account::default()),
            Self::TaxRate => Entity::TaxRate(TaxRate::default()),
            Self::Item => Entity::Item(Item::default()),
            Self::Currency => Entity::Currency(Currency::default()),
            Self::Organisation => Entity::Organisation(Organisation::default()),
            Self::TrackingCategory => Entity::TrackingCategory(TrackingCategory::default()),
            Self::PayrollCalendar => Entity::PayrollCalendar(PayrollCalendar::default()),
            Self::PayRun => Entity::PayRun(PayRun::default()),
            Self::Report => Entity::Report(Report::default()),
        }
    }
}

/// What to do with one immediate child of the `<Response>` root.
#[derive(Debug, Clone, Copy)]
enum TagHandler {
    /// The `ID` scalar.
    ResponseId,
    /// The `Status` scalar.
    Status,
    /// The `ProviderName` scalar.
    Provider,
    /// The `DateTimeUTC` scalar.
    DateTimeUtc,
    /// A bare entity element; decode exactly one.
    Singular(EntityKind),
    /// A plural wrapper; decode all children in document order.
    Plural(EntityKind),
    /// A plural wrapper whose first child is authoritative; decode it,
    /// skip any siblings, and fail if the wrapper is empty.
    FirstOfPlural(EntityKind),
    /// The `Errors` collection of remote-reported error records.
    Errors,
}

/// The one routing table for envelope children. Linear scan; the envelope
/// has at most a handful of children.
static DISPATCH_TABLE: &[(&str, TagHandler)] = &[
    ("ID", TagHandler::ResponseId),
    ("Status", TagHandler::Status),
    ("ProviderName", TagHandler::Provider),
    ("DateTimeUTC", TagHandler::DateTimeUtc),
    ("Contact", TagHandler::Singular(EntityKind::Contact)),
    ("Invoice", TagHandler::Singular(EntityKind::Invoice)),
    ("CreditNote", TagHandler::Singular(EntityKind::CreditNote)),
    ("BankTransaction", TagHandler::Singular(EntityKind::BankTransaction)),
    ("ManualJournal", TagHandler::Singular(EntityKind::ManualJournal)),
    ("Payment", TagHandler::Singular(EntityKind::Payment)),
    ("Organisation", TagHandler::Singular(EntityKind::Organisation)),
    ("Report", TagHandler::Singular(EntityKind::Report)),
    ("Contacts", TagHandler::Plural(EntityKind::Contact)),
    ("ContactGroups", TagHandler::Plural(EntityKind::ContactGroup)),
    ("Invoices", TagHandler::Plural(EntityKind::Invoice)),
    ("CreditNotes", TagHandler::Plural(EntityKind::CreditNote)),
    ("BankTransactions", TagHandler::Plural(EntityKind::BankTransaction)),
    ("ManualJournals", TagHandler::Plural(EntityKind::ManualJournal)),
    ("Payments", TagHandler::Plural(EntityKind::Payment)),
    ("Accounts", TagHandler::Plural(EntityKind::Account)),
    ("TaxRates", TagHandler::Plural(EntityKind::TaxRate)),
    ("Items", TagHandler::Plural(EntityKind::Item)),
    ("Currencies", TagHandler::Plural(EntityKind::Currency)),
    ("TrackingCategories", TagHandler::Plural(EntityKind::TrackingCategory)),
    ("PayrollCalendars", TagHandler::Plural(EntityKind::PayrollCalendar)),
    ("PayRuns", TagHandler::Plural(EntityKind::PayRun)),
    ("Reports", TagHandler::Plural(EntityKind::Report)),
    ("Organisations", TagHandler::FirstOfPlural(EntityKind::Organisation)),
    ("Errors", TagHandler::Errors),
];

fn lookup(tag: &str) -> Option<TagHandler> {
    DISPATCH_TABLE
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, handler)| *handler)
}

/// Nested-collection flags for a response produced by the given signature.
///
/// List operations omit nested collections, so a signature equal to a
/// kind's list signature turns that kind's flag off. Every other signature
/// (single fetch, create, update) includes them.
fn derive_hydration(signature: &str) -> Hydration {
    Hydration {
        line_items: !matches!(
            signature,
            "GET/Invoices" | "GET/CreditNotes" | "GET/BankTransactions"
        ),
        journal_lines: signature != "GET/ManualJournals",
        group_contacts: signature != "GET/ContactGroups",
    }
}

/// Parse a raw response body into a typed [`ApiResponse`].
///
/// `signature` is the `VERB/Resource` label of the operation that produced
/// the body (see [`ApiOperation::signature`](crate::ApiOperation::signature));
/// it keys hydration of nested collections. `client`, when given, is stored
/// on decoded entities that support follow-up calls. `echo` and the raw
/// body are kept on the envelope unmodified.
///
/// Pure function: no I/O, no shared state, safe to call concurrently.
///
/// # Errors
///
/// Returns [`ResponseError::UnrecognizedEnvelope`] naming the offending tag
/// if the root element is not `<Response>`, [`ResponseError::MissingRoot`]
/// for a body with no root element, and [`ResponseError::Xml`] if any child
/// fails to decode. A malformed child fails the whole parse; no partial
/// envelope is returned.
pub fn parse_response(
    raw: &[u8],
    echo: Option<RequestEcho>,
    signature: &str,
    client: Option<&ClientHandle>,
) -> Result<ApiResponse, ResponseError> {
    tracing::debug!(signature, len = raw.len(), "parsing response envelope");

    let mut reader = Reader::from_reader(raw);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event().map_err(XmlError::from)? {
            Event::Start(e) => {
                let name = e.name();
                let root = std::str::from_utf8(name.as_ref())
                    .map_err(|err| XmlError::Parse(err.to_string()))?;
                if root != "Response" {
                    return Err(ResponseError::UnrecognizedEnvelope(root.to_owned()));
                }
                break;
            }
            Event::Empty(e) => {
                let name = e.name();
                let root = std::str::from_utf8(name.as_ref())
                    .map_err(|err| XmlError::Parse(err.to_string()))?;
                if root != "Response" {
                    return Err(ResponseError::UnrecognizedEnvelope(root.to_owned()));
                }
                // A self-closing <Response/> carries nothing.
                return Ok(empty_envelope(echo, raw));
            }
            Event::Eof => return Err(ResponseError::MissingRoot),
            _ => {}
        }
    }

    let ctx = DecodeContext::new(client.cloned(), derive_hydration(signature));

    let mut response = empty_envelope(echo, raw);
    let mut items: Vec<Entity> = Vec::new();
    let mut saw_collection = false;

    loop {
        match reader.read_event().map_err(XmlError::from)? {
            Event::Start(e) => {
                let name = e.name();
                let tag = std::str::from_utf8(name.as_ref())
                    .map_err(|err| XmlError::Parse(err.to_string()))?;
                match lookup(tag) {
                    Some(TagHandler::ResponseId) => {
                        response.response_id = Some(read_text_content(&mut reader)?);
                    }
                    Some(TagHandler::Status) => {
                        response.status = Some(read_text_content(&mut reader)?);
                    }
                    Some(TagHandler::Provider) => {
                        response.provider = Some(read_text_content(&mut reader)?);
                    }
                    Some(TagHandler::DateTimeUtc) => {
                        let text = read_text_content(&mut reader)?;
                        response.date_time_utc = Some(parse_timestamp(&text)?);
                    }
                    Some(TagHandler::Singular(kind)) => {
                        items.push(kind.decode(&mut reader, &ctx)?);
                    }
                    Some(TagHandler::Plural(kind)) => {
                        saw_collection = true;
                        decode_entity_children(&mut reader, kind, &ctx, &mut items)?;
                    }
                    Some(TagHandler::FirstOfPlural(kind)) => {
                        items.push(decode_first_child(&mut reader, kind, &ctx)?);
                    }
                    Some(TagHandler::Errors) => {
                        response.errors = decode_list(&mut reader, "Error", &ctx)?;
                    }
                    None => {
                        tracing::trace!(tag, "skipping unrecognized envelope child");
                        skip_element(&mut reader)?;
                    }
                }
            }
            Event::Empty(e) => {
                let name = e.name();
                let tag = std::str::from_utf8(name.as_ref())
                    .map_err(|err| XmlError::Parse(err.to_string()))?;
                match lookup(tag) {
                    // A self-closing plural wrapper is a confirmed empty match.
                    Some(TagHandler::Plural(_)) => saw_collection = true,
                    Some(TagHandler::Singular(kind)) => items.push(kind.empty()),
                    Some(TagHandler::FirstOfPlural(kind)) => {
                        return Err(XmlError::MissingElement(format!(
                            "{} wrapper contained no {} child",
                            tag,
                            kind.item_tag()
                        ))
                        .into());
                    }
                    _ => {
                        tracing::trace!(tag, "skipping empty envelope child");
                    }
                }
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF in Response".to_string(),
                )
                .into());
            }
            _ => {}
        }
    }

    // Collapse: exactly one entity becomes One no matter how it arrived.
    // An empty plural wrapper stays distinguishable from an absent one.
    response.result = match (items.len(), saw_collection) {
        (1, _) => ResponseItem::One(Box::new(items.remove(0))),
        (0, true) => ResponseItem::Many(Vec::new()),
        (0, false) => ResponseItem::Empty,
        _ => ResponseItem::Many(items),
    };

    Ok(response)
}

fn empty_envelope(echo: Option<RequestEcho>, raw: &[u8]) -> ApiResponse {
    ApiResponse {
        response_id: None,
        status: None,
        provider: None,
        date_time_utc: None,
        result: ResponseItem::Empty,
        errors: Vec::new(),
        request_echo: echo,
        raw_body: Bytes::copy_from_slice(raw),
    }
}

/// Decode every matching child of a plural wrapper, preserving document
/// order. Children with other tags are skipped.
fn decode_entity_children(
    reader: &mut Reader<&[u8]>,
    kind: EntityKind,
    ctx: &DecodeContext,
    items: &mut Vec<Entity>,
) -> Result<(), XmlError> {
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                let tag = std::str::from_utf8(name.as_ref())
                    .map_err(|err| XmlError::Parse(err.to_string()))?;
                if tag == kind.item_tag() {
                    items.push(kind.decode(reader, ctx)?);
                } else {
                    skip_element(reader)?;
                }
            }
            Event::Empty(e) => {
                let name = e.name();
                let tag = std::str::from_utf8(name.as_ref())
                    .map_err(|err| XmlError::Parse(err.to_string()))?;
                if tag == kind.item_tag() {
                    items.push(kind.empty());
                }
            }
            Event::End(_) => return Ok(()),
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF in entity collection".to_string(),
                ));
            }
            _ => {}
        }
    }
}

/// Decode the authoritative first child of a wrapper, skipping any
/// siblings. An empty wrapper is an error: the protocol guarantees the
/// record is present.
fn decode_first_child(
    reader: &mut Reader<&[u8]>,
    kind: EntityKind,
    ctx: &DecodeContext,
) -> Result<Entity, XmlError> {
    let mut first = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                let tag = std::str::from_utf8(name.as_ref())
                    .map_err(|err| XmlError::Parse(err.to_string()))?;
                if first.is_none() && tag == kind.item_tag() {
                    first = Some(kind.decode(reader, ctx)?);
                } else {
                    skip_element(reader)?;
                }
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF in entity wrapper".to_string(),
                ));
            }
            _ => {}
        }
    }

    first.ok_or_else(|| {
        XmlError::MissingElement(format!("wrapper contained no {} child", kind.item_tag()))
    })
}

#[cfg(test)]
mod tests {
    use ledgerstack_model::client::{ClientConfig, ClientHandle};
    use ledgerstack_model::types::Contact;

    use super::*;
    use crate::response::propagate_assigned_ids;

    #[test]
    fn test_should_decode_scalar_metadata() {
        let xml = br"<Response>
            <ID>resp-123</ID>
            <Status>OK</Status>
            <ProviderName>Ledgerstack Demo App</ProviderName>
            <DateTimeUTC>2024-03-01T09:30:00Z</DateTimeUTC>
        </Response>";

        let response =
            parse_response(xml, None, "GET/Organisation", None).expect("parsing should succeed");
        assert_eq!(response.response_id.as_deref(), Some("resp-123"));
        assert_eq!(response.status.as_deref(), Some("OK"));
        assert_eq!(response.provider.as_deref(), Some("Ledgerstack Demo App"));
        assert!(response.date_time_utc.is_some());
        assert!(matches!(response.result, ResponseItem::Empty));
        assert!(response.success());
    }

    #[test]
    fn test_should_collapse_single_element_sequence() {
        // One invoice under the plural wrapper collapses to One.
        let xml = br"<Response>
            <Status>OK</Status>
            <Invoices>
                <Invoice><InvoiceID>inv-1</InvoiceID></Invoice>
            </Invoices>
        </Response>";

        let response =
            parse_response(xml, None, "GET/Invoice", None).expect("parsing should succeed");
        let entity = response.into_single().expect("result collapsed to one");
        match entity {
            Entity::Invoice(invoice) => {
                assert_eq!(invoice.invoice_id.as_deref(), Some("inv-1"));
            }
            other => panic!("expected invoice, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_should_distinguish_empty_collection_from_absent() {
        let empty_match = br"<Response><Status>OK</Status><Invoices></Invoices></Response>";
        let response = parse_response(empty_match, None, "GET/Invoices", None)
            .expect("parsing should succeed");
        match response.result {
            ResponseItem::Many(items) => assert!(items.is_empty()),
            other => panic!("expected confirmed empty collection, got {other:?}"),
        }

        let self_closing = br"<Response><Status>OK</Status><Invoices/></Response>";
        let response = parse_response(self_closing, None, "GET/Invoices", None)
            .expect("parsing should succeed");
        assert!(matches!(response.result, ResponseItem::Many(ref v) if v.is_empty()));

        let absent = br"<Response><Status>OK</Status></Response>";
        let response =
            parse_response(absent, None, "GET/Invoices", None).expect("parsing should succeed");
        assert!(matches!(response.result, ResponseItem::Empty));
    }

    #[test]
    fn test_should_derive_hydration_from_signature() {
        // The same body, parsed under a list signature and a single-fetch
        // signature. Only the signature decides whether line items load.
        let xml = br"<Response>
            <Invoices>
                <Invoice>
                    <InvoiceID>inv-1</InvoiceID>
                    <LineItems>
                        <LineItem><Description>Widgets</Description></LineItem>
                    </LineItems>
                </Invoice>
            </Invoices>
        </Response>";

        let listed =
            parse_response(xml, None, "GET/Invoices", None).expect("parsing should succeed");
        match listed.into_single().expect("one invoice") {
            Entity::Invoice(invoice) => assert!(!invoice.line_items.is_loaded()),
            other => panic!("expected invoice, got {}", other.kind_name()),
        }

        let fetched =
            parse_response(xml, None, "GET/Invoice", None).expect("parsing should succeed");
        match fetched.into_single().expect("one invoice") {
            Entity::Invoice(invoice) => {
                let lines = invoice.line_items.items().expect("line items loaded");
                assert_eq!(lines.len(), 1);
            }
            other => panic!("expected invoice, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_should_confirm_empty_collections_on_single_fetch() {
        // No LineItems wrapper at all, but the single-fetch signature
        // confirms the invoice genuinely has no lines.
        let xml = br"<Response>
            <Invoices><Invoice><InvoiceID>inv-1</InvoiceID></Invoice></Invoices>
        </Response>";

        let response =
            parse_response(xml, None, "GET/Invoice", None).expect("parsing should succeed");
        match response.into_single().expect("one invoice") {
            Entity::Invoice(invoice) => {
                assert!(invoice.line_items.is_loaded());
                assert!(invoice.line_items.is_empty());
            }
            other => panic!("expected invoice, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_should_preserve_document_order() {
        let xml = br"<Response>
            <Contacts>
                <Contact><Name>Alpha</Name></Contact>
                <Contact><Name>Beta</Name></Contact>
                <Contact><Name>Gamma</Name></Contact>
            </Contacts>
        </Response>";

        let response =
            parse_response(xml, None, "GET/Contacts", None).expect("parsing should succeed");
        let names: Vec<_> = response
            .items()
            .iter()
            .map(|entity| match entity {
                Entity::Contact(c) => c.name.clone().expect("name present"),
                other => panic!("expected contact, got {}", other.kind_name()),
            })
            .collect();
        assert_eq!(names, ["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_should_write_back_ids_positionally_after_batch_create() {
        // Two submitted contacts with the same name; the response echoes
        // them in submission order with assigned identifiers.
        let xml = br"<Response>
            <Status>OK</Status>
            <Contacts>
                <Contact><ContactID>id-a</ContactID><Name>Duplicate</Name></Contact>
                <Contact><ContactID>id-b</ContactID><Name>Duplicate</Name></Contact>
            </Contacts>
        </Response>";

        let response =
            parse_response(xml, None, "PUT/Contacts", None).expect("parsing should succeed");

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
    fn test_should_fail_on_unrecognized_root_naming_the_tag() {
        let xml = br"<Payload><Status>OK</Status></Payload>";
        let err = parse_response(xml, None, "GET/Contacts", None)
            .expect_err("unrecognized root must fail");
        match &err {
            ResponseError::UnrecognizedEnvelope(tag) => assert_eq!(tag, "Payload"),
            other => panic!("expected UnrecognizedEnvelope, got {other:?}"),
        }
        // The rendered message names the offending tag.
        assert!(err.to_string().contains("Payload"));
    }

    #[test]
    fn test_should_fail_on_empty_body() {
        let err = parse_response(b"  ", None, "GET/Contacts", None)
            .expect_err("empty body must fail");
        assert!(matches!(err, ResponseError::MissingRoot));
    }

    #[test]
    fn test_should_collect_errors_only_response() {
        let xml = br"<Response>
            <Status>ERROR</Status>
            <Errors>
                <Error><ErrorNumber>10</ErrorNumber><Message>First failure</Message></Error>
                <Error><ErrorNumber>20</ErrorNumber><Message>Second failure</Message></Error>
            </Errors>
        </Response>";

        let response =
            parse_response(xml, None, "PUT/Invoices", None).expect("parsing should succeed");
        assert!(!response.success());
        assert!(matches!(response.result, ResponseItem::Empty));
        assert_eq!(response.errors.len(), 2);
        assert_eq!(response.errors[0].code.as_deref(), Some("10"));
        assert_eq!(
            response.errors[1].description.as_deref(),
            Some("Second failure")
        );
    }

    #[test]
    fn test_should_take_first_organisation_and_skip_siblings() {
        let xml = br"<Response>
            <Organisations>
                <Organisation><Name>Primary Org</Name></Organisation>
                <Organisation><Name>Stale Sibling</Name></Organisation>
            </Organisations>
        </Response>";

        let response =
            parse_response(xml, None, "GET/Organisation", None).expect("parsing should succeed");
        match response.into_single().expect("one organisation") {
            Entity::Organisation(org) => {
                assert_eq!(org.name.as_deref(), Some("Primary Org"));
            }
            other => panic!("expected organisation, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_should_fail_on_empty_organisations_wrapper() {
        let xml = br"<Response><Organisations></Organisations></Response>";
        let err = parse_response(xml, None, "GET/Organisation", None)
            .expect_err("empty wrapper must fail");
        assert!(matches!(err, ResponseError::Xml(XmlError::MissingElement(_))));
    }

    #[test]
    fn test_should_skip_unrecognized_envelope_children() {
        let xml = br"<Response>
            <Status>OK</Status>
            <Warnings><Warning>deprecated endpoint</Warning></Warnings>
            <Contacts><Contact><ContactID>c-1</ContactID></Contact></Contacts>
        </Response>";

        let response =
            parse_response(xml, None, "GET/Contacts", None).expect("parsing should succeed");
        assert_eq!(response.items().len(), 1);
    }

    #[test]
    fn test_should_fail_whole_parse_on_malformed_child() {
        // IsCustomer carries a non-boolean; the envelope must not come back
        // partially filled.
        let xml = br"<Response>
            <Contacts>
                <Contact><ContactID>c-1</ContactID><IsCustomer>maybe</IsCustomer></Contact>
            </Contacts>
        </Response>";

        let err = parse_response(xml, None, "GET/Contacts", None)
            .expect_err("malformed child must fail the parse");
        assert!(matches!(err, ResponseError::Xml(XmlError::Parse(_))));
    }

    #[test]
    fn test_should_attach_client_handle_and_keep_echo_and_raw_body() {
        let handle = ClientHandle::new(ClientConfig::default());
        let xml = br"<Response>
            <Contacts><Contact><ContactID>c-1</ContactID></Contact></Contacts>
        </Response>";
        let echo = RequestEcho::Params(vec![("where".to_owned(), "Name==\"Acme\"".to_owned())]);

        let response = parse_response(xml, Some(echo.clone()), "GET/Contacts", Some(&handle))
            .expect("parsing should succeed");

        assert_eq!(response.request_echo, Some(echo));
        assert_eq!(response.raw_body.as_ref(), xml.as_slice());
        match response.into_single().expect("one contact") {
            Entity::Contact(contact) => assert!(contact.client.is_some()),
            other => panic!("expected contact, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_should_decode_singular_entity_tag() {
        let xml = br"<Response>
            <Organisation><Name>Solo Org</Name></Organisation>
        </Response>";

        let response =
            parse_response(xml, None, "GET/Organisation", None).expect("parsing should succeed");
        match response.into_single().expect("one organisation") {
            Entity::Organisation(org) => assert_eq!(org.name.as_deref(), Some("Solo Org")),
            other => panic!("expected organisation, got {}", other.kind_name()),
        }
    }
}
