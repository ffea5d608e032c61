//! XML deserialization: decoding accounting API elements into typed entities.
//!
//! This module provides the [`FromXml`] trait and implementations for every
//! entity kind the remote service returns. Decoding is deliberately lenient:
//! any scalar tag may be absent, and unknown child tags are skipped so that
//! additions to the remote schema never break existing callers.
//!
//! Whether a nested collection (line items, journal lines, group members)
//! ends up [`Loadable::Loaded`] or [`Loadable::NotLoaded`] is controlled by
//! the [`Hydration`] flags in the [`DecodeContext`], never by the document
//! itself: list responses omit nested collections, so the dispatcher derives
//! the flags from the request signature that produced the response.

use chrono::{DateTime, NaiveDate, Utc};
use quick_xml::Reader;
use quick_xml::events::Event;

use ledgerstack_model::client::ClientHandle;
use ledgerstack_model::error::ApiError;
use ledgerstack_model::loadable::Loadable;
use ledgerstack_model::types::{
    Account, BankTransaction, BankTransactionType, Contact, ContactGroup, ContactStatus,
    CreditNote, CreditNoteType, Currency, Invoice, InvoiceStatus, InvoiceType, Item, JournalLine,
    LineAmountType, LineItem, ManualJournal, Organisation, PayRun, Payment, PayrollCalendar,
    Report, ReportCell, ReportRow, TaxRate, TrackingCategory, TrackingOption,
};

use crate::error::XmlError;

/// Which nested collections the producing operation includes.
///
/// The flags are derived by the response dispatcher from the request
/// signature, because the remote service omits nested collections on list
/// and search operations but includes them on single-item fetches. A codec
/// consults the relevant flag to decide between `Loaded` (possibly empty)
/// and `NotLoaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hydration {
    /// Invoice, credit note, and bank transaction line items.
    pub line_items: bool,
    /// Manual journal lines.
    pub journal_lines: bool,
    /// Contact-group member lists.
    pub group_contacts: bool,
}

impl Hydration {
    /// All nested collections included (single-item fetches, round trips).
    #[must_use]
    pub fn all() -> Self {
        Self {
            line_items: true,
            journal_lines: true,
            group_contacts: true,
        }
    }

    /// No nested collections included (list and search operations).
    #[must_use]
    pub fn none() -> Self {
        Self {
            line_items: false,
            journal_lines: false,
            group_contacts: false,
        }
    }
}

impl Default for Hydration {
    fn default() -> Self {
        Self::all()
    }
}

/// Context threaded through every decode call.
#[derive(Debug, Clone, Default)]
pub struct DecodeContext {
    /// Back-reference stored on decoded entities that support follow-up
    /// calls. `None` is legal and leaves entities detached.
    pub client: Option<ClientHandle>,
    /// Nested-collection inclusion flags for this response.
    pub hydration: Hydration,
}

impl DecodeContext {
    /// Context with a client back-reference and explicit hydration flags.
    #[must_use]
    pub fn new(client: Option<ClientHandle>, hydration: Hydration) -> Self {
        Self { client, hydration }
    }

    /// Context with no client and full hydration, for standalone decoding.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }
}

/// Trait for decoding entity kinds from XML.
///
/// The opening tag of the element has already been consumed by the caller;
/// the implementation reads child elements until the matching end tag is
/// consumed and must not read past it.
pub trait FromXml: Sized {
    /// Decode an instance from the given XML reader.
    ///
    /// # Errors
    ///
    /// Returns `XmlError` if the XML is malformed or a structurally
    /// required element is missing.
    fn from_xml_reader(reader: &mut Reader<&[u8]>, ctx: &DecodeContext) -> Result<Self, XmlError>;
}

/// Decode a standalone XML document into a typed entity.
///
/// Finds the root element and delegates to the type's [`FromXml`]
/// implementation. The root tag name is not checked; callers that need to
/// validate it (the response dispatcher does) inspect it themselves.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed or decoding fails.
pub fn from_xml<T: FromXml>(xml: &[u8], ctx: &DecodeContext) -> Result<T, XmlError> {
    tracing::trace!(len = xml.len(), "decoding XML document");
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    // Skip the XML declaration and find the root element.
    loop {
        match reader.read_event()? {
            Event::Start(_) => {
                return T::from_xml_reader(&mut reader, ctx);
            }
            Event::Eof => {
                return Err(XmlError::MissingElement("root element".to_string()));
            }
            // Skip declaration, comments, processing instructions, whitespace.
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Helper functions for reading common XML patterns
// ---------------------------------------------------------------------------

/// Read the text content of the current element and consume its end tag.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed or ends prematurely.
pub fn read_text_content(reader: &mut Reader<&[u8]>) -> Result<String, XmlError> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(e) => {
                let decoded = e.decode().map_err(|err| XmlError::Parse(err.to_string()))?;
                let unescaped = quick_xml::escape::unescape(&decoded)
                    .map_err(|err| XmlError::Parse(err.to_string()))?;
                text.push_str(&unescaped);
            }
            Event::End(_) => {
                return Ok(text);
            }
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while reading text content".to_string(),
                ));
            }
            _ => {}
        }
    }
}

/// Skip over an element and all its children.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed or ends prematurely.
pub fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), XmlError> {
    let mut depth: u32 = 1;
    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while skipping element".to_string(),
                ));
            }
            _ => {}
        }
    }
}

/// Decode a list of items where each item is wrapped in the given tag.
///
/// Children with other tag names are skipped; document order is preserved.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed or an item fails to decode.
pub fn decode_list<T: FromXml>(
    reader: &mut Reader<&[u8]>,
    item_tag: &str,
    ctx: &DecodeContext,
) -> Result<Vec<T>, XmlError> {
    let mut items = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                let tag_name = std::str::from_utf8(name.as_ref())
                    .map_err(|e| XmlError::Parse(e.to_string()))?;
                if tag_name == item_tag {
                    items.push(T::from_xml_reader(reader, ctx)?);
                } else {
                    skip_element(reader)?;
                }
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF in list".to_string(),
                ));
            }
            _ => {}
        }
    }

    Ok(items)
}

/// Parse a boolean from XML text ("true"/"false", case-insensitive).
fn parse_bool(s: &str) -> Result<bool, XmlError> {
    if s.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if s.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(XmlError::Parse(format!("invalid boolean: {s}")))
    }
}

/// Parse an f64 amount from XML text.
fn parse_f64(s: &str) -> Result<f64, XmlError> {
    s.parse::<f64>()
        .map_err(|e| XmlError::Parse(format!("invalid number '{s}': {e}")))
}

/// Parse a calendar date from XML text.
///
/// The service writes dates as `2009-05-27T00:00:00` with a zero
/// time-of-day; a bare `2009-05-27` is also accepted.
fn parse_date(s: &str) -> Result<NaiveDate, XmlError> {
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|ndt| ndt.date())
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .map_err(|e| XmlError::Parse(format!("invalid date '{s}': {e}")))
}

/// Parse an ISO 8601 timestamp from XML text.
///
/// Accepts RFC 3339 and the provider's zone-less form, which is UTC.
///
/// # Errors
///
/// Returns `XmlError::Parse` if the text matches neither form.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, XmlError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|ndt| ndt.and_utc())
        })
        .map_err(|e| XmlError::Parse(format!("invalid timestamp '{s}': {e}")))
}

// ---------------------------------------------------------------------------
// FromXml implementations
// ---------------------------------------------------------------------------

impl FromXml for Contact {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut contact = Contact {
            client: ctx.client.clone(),
            ..Contact::default()
        };

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "ContactID" => contact.contact_id = Some(read_text_content(reader)?),
                        "ContactNumber" => {
                            contact.contact_number = Some(read_text_content(reader)?);
                        }
                        "ContactStatus" => {
                            let text = read_text_content(reader)?;
                            contact.status = Some(ContactStatus::from(text.as_str()));
                        }
                        "Name" => contact.name = Some(read_text_content(reader)?),
                        "FirstName" => contact.first_name = Some(read_text_content(reader)?),
                        "LastName" => contact.last_name = Some(read_text_content(reader)?),
                        "EmailAddress" => {
                            contact.email_address = Some(read_text_content(reader)?);
                        }
                        "IsCustomer" => {
                            let text = read_text_content(reader)?;
                            contact.is_customer = Some(parse_bool(&text)?);
                        }
                        "IsSupplier" => {
                            let text = read_text_content(reader)?;
                            contact.is_supplier = Some(parse_bool(&text)?);
                        }
                        "DefaultCurrency" => {
                            contact.default_currency = Some(read_text_content(reader)?);
                        }
                        "UpdatedDateUTC" => {
                            let text = read_text_content(reader)?;
                            contact.updated_date_utc = Some(parse_timestamp(&text)?);
                        }
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Contact".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(contact)
    }
}

impl FromXml for ContactGroup {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut group = ContactGroup {
            client: ctx.client.clone(),
            // A list response omits members entirely; only a single-group
            // fetch confirms the membership, even when it is empty.
            contacts: if ctx.hydration.group_contacts {
                Loadable::Loaded(Vec::new())
            } else {
                Loadable::NotLoaded
            },
            ..ContactGroup::default()
        };

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "ContactGroupID" => {
                            group.contact_group_id = Some(read_text_content(reader)?);
                        }
                        "Name" => group.name = Some(read_text_content(reader)?),
                        "Status" => group.status = Some(read_text_content(reader)?),
                        "Contacts" => {
                            if ctx.hydration.group_contacts {
                                group.contacts =
                                    Loadable::Loaded(decode_list(reader, "Contact", ctx)?);
                            } else {
                                skip_element(reader)?;
                            }
                        }
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in ContactGroup".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(group)
    }
}

impl FromXml for LineItem {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, _ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut line = LineItem::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "Description" => line.description = Some(read_text_content(reader)?),
                        "Quantity" => {
                            let text = read_text_content(reader)?;
                            line.quantity = Some(parse_f64(&text)?);
                        }
                        "UnitAmount" => {
                            let text = read_text_content(reader)?;
                            line.unit_amount = Some(parse_f64(&text)?);
                        }
                        "ItemCode" => line.item_code = Some(read_text_content(reader)?),
                        "AccountCode" => line.account_code = Some(read_text_content(reader)?),
                        "TaxType" => line.tax_type = Some(read_text_content(reader)?),
                        "TaxAmount" => {
                            let text = read_text_content(reader)?;
                            line.tax_amount = Some(parse_f64(&text)?);
                        }
                        "LineAmount" => {
                            let text = read_text_content(reader)?;
                            line.line_amount = Some(parse_f64(&text)?);
                        }
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in LineItem".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(line)
    }
}

impl FromXml for Invoice {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut invoice = Invoice {
            client: ctx.client.clone(),
            line_items: if ctx.hydration.line_items {
                Loadable::Loaded(Vec::new())
            } else {
                Loadable::NotLoaded
            },
            ..Invoice::default()
        };

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "InvoiceID" => invoice.invoice_id = Some(read_text_content(reader)?),
                        "InvoiceNumber" => {
                            invoice.invoice_number = Some(read_text_content(reader)?);
                        }
                        "Type" => {
                            let text = read_text_content(reader)?;
                            invoice.invoice_type = Some(InvoiceType::from(text.as_str()));
                        }
                        "Status" => {
                            let text = read_text_content(reader)?;
                            invoice.status = Some(InvoiceStatus::from(text.as_str()));
                        }
                        "Reference" => invoice.reference = Some(read_text_content(reader)?),
                        "Date" => {
                            let text = read_text_content(reader)?;
                            invoice.date = Some(parse_date(&text)?);
                        }
                        "DueDate" => {
                            let text = read_text_content(reader)?;
                            invoice.due_date = Some(parse_date(&text)?);
                        }
                        "LineAmountTypes" => {
                            let text = read_text_content(reader)?;
                            invoice.line_amount_types = Some(LineAmountType::from(text.as_str()));
                        }
                        "CurrencyCode" => {
                            invoice.currency_code = Some(read_text_content(reader)?);
                        }
                        "SubTotal" => {
                            let text = read_text_content(reader)?;
                            invoice.sub_total = Some(parse_f64(&text)?);
                        }
                        "TotalTax" => {
                            let text = read_text_content(reader)?;
                            invoice.total_tax = Some(parse_f64(&text)?);
                        }
                        "Total" => {
                            let text = read_text_content(reader)?;
                            invoice.total = Some(parse_f64(&text)?);
                        }
                        "AmountDue" => {
                            let text = read_text_content(reader)?;
                            invoice.amount_due = Some(parse_f64(&text)?);
                        }
                        "AmountPaid" => {
                            let text = read_text_content(reader)?;
                            invoice.amount_paid = Some(parse_f64(&text)?);
                        }
                        "Contact" => {
                            invoice.contact = Some(Contact::from_xml_reader(reader, ctx)?);
                        }
                        "LineItems" => {
                            if ctx.hydration.line_items {
                                invoice.line_items =
                                    Loadable::Loaded(decode_list(reader, "LineItem", ctx)?);
                            } else {
                                skip_element(reader)?;
                            }
                        }
                        "UpdatedDateUTC" => {
                            let text = read_text_content(reader)?;
                            invoice.updated_date_utc = Some(parse_timestamp(&text)?);
                        }
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Invoice".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(invoice)
    }
}

impl FromXml for CreditNote {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut note = CreditNote {
            client: ctx.client.clone(),
            line_items: if ctx.hydration.line_items {
                Loadable::Loaded(Vec::new())
            } else {
                Loadable::NotLoaded
            },
            ..CreditNote::default()
        };

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "CreditNoteID" => note.credit_note_id = Some(read_text_content(reader)?),
                        "CreditNoteNumber" => {
                            note.credit_note_number = Some(read_text_content(reader)?);
                        }
                        "Type" => {
                            let text = read_text_content(reader)?;
                            note.credit_note_type = Some(CreditNoteType::from(text.as_str()));
                        }
                        "Status" => {
                            let text = read_text_content(reader)?;
                            note.status = Some(InvoiceStatus::from(text.as_str()));
                        }
                        "Reference" => note.reference = Some(read_text_content(reader)?),
                        "Date" => {
                            let text = read_text_content(reader)?;
                            note.date = Some(parse_date(&text)?);
                        }
                        "LineAmountTypes" => {
                            let text = read_text_content(reader)?;
                            note.line_amount_types = Some(LineAmountType::from(text.as_str()));
                        }
                        "CurrencyCode" => note.currency_code = Some(read_text_content(reader)?),
                        "SubTotal" => {
                            let text = read_text_content(reader)?;
                            note.sub_total = Some(parse_f64(&text)?);
                        }
                        "TotalTax" => {
                            let text = read_text_content(reader)?;
                            note.total_tax = Some(parse_f64(&text)?);
                        }
                        "Total" => {
                            let text = read_text_content(reader)?;
                            note.total = Some(parse_f64(&text)?);
                        }
                        "RemainingCredit" => {
                            let text = read_text_content(reader)?;
                            note.remaining_credit = Some(parse_f64(&text)?);
                        }
                        "Contact" => {
                            note.contact = Some(Contact::from_xml_reader(reader, ctx)?);
                        }
                        "LineItems" => {
                            if ctx.hydration.line_items {
                                note.line_items =
                                    Loadable::Loaded(decode_list(reader, "LineItem", ctx)?);
                            } else {
                                skip_element(reader)?;
                            }
                        }
                        "UpdatedDateUTC" => {
                            let text = read_text_content(reader)?;
                            note.updated_date_utc = Some(parse_timestamp(&text)?);
                        }
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in CreditNote".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(note)
    }
}

impl FromXml for BankTransaction {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut txn = BankTransaction {
            client: ctx.client.clone(),
            line_items: if ctx.hydration.line_items {
                Loadable::Loaded(Vec::new())
            } else {
                Loadable::NotLoaded
            },
            ..BankTransaction::default()
        };

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "BankTransactionID" => {
                            txn.bank_transaction_id = Some(read_text_content(reader)?);
                        }
                        "Type" => {
                            let text = read_text_content(reader)?;
                            txn.transaction_type = Some(BankTransactionType::from(text.as_str()));
                        }
                        "Status" => txn.status = Some(read_text_content(reader)?),
                        "Reference" => txn.reference = Some(read_text_content(reader)?),
                        "Date" => {
                            let text = read_text_content(reader)?;
                            txn.date = Some(parse_date(&text)?);
                        }
                        "IsReconciled" => {
                            let text = read_text_content(reader)?;
                            txn.is_reconciled = Some(parse_bool(&text)?);
                        }
                        "LineAmountTypes" => {
                            let text = read_text_content(reader)?;
                            txn.line_amount_types = Some(LineAmountType::from(text.as_str()));
                        }
                        "CurrencyCode" => txn.currency_code = Some(read_text_content(reader)?),
                        "SubTotal" => {
                            let text = read_text_content(reader)?;
                            txn.sub_total = Some(parse_f64(&text)?);
                        }
                        "TotalTax" => {
                            let text = read_text_content(reader)?;
                            txn.total_tax = Some(parse_f64(&text)?);
                        }
                        "Total" => {
                            let text = read_text_content(reader)?;
                            txn.total = Some(parse_f64(&text)?);
                        }
                        "Contact" => {
                            txn.contact = Some(Contact::from_xml_reader(reader, ctx)?);
                        }
                        "BankAccount" => {
                            txn.bank_account = Some(Account::from_xml_reader(reader, ctx)?);
                        }
                        "LineItems" => {
                            if ctx.hydration.line_items {
                                txn.line_items =
                                    Loadable::Loaded(decode_list(reader, "LineItem", ctx)?);
                            } else {
                                skip_element(reader)?;
                            }
                        }
                        "UpdatedDateUTC" => {
                            let text = read_text_content(reader)?;
                            txn.updated_date_utc = Some(parse_timestamp(&text)?);
                        }
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in BankTransaction".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(txn)
    }
}

impl FromXml for JournalLine {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, _ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut line = JournalLine::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "Description" => line.description = Some(read_text_content(reader)?),
                        "AccountCode" => line.account_code = Some(read_text_content(reader)?),
                        "TaxType" => line.tax_type = Some(read_text_content(reader)?),
                        "LineAmount" => {
                            let text = read_text_content(reader)?;
                            line.line_amount = Some(parse_f64(&text)?);
                        }
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in JournalLine".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(line)
    }
}

impl FromXml for ManualJournal {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut journal = ManualJournal {
            client: ctx.client.clone(),
            journal_lines: if ctx.hydration.journal_lines {
                Loadable::Loaded(Vec::new())
            } else {
                Loadable::NotLoaded
            },
            ..ManualJournal::default()
        };

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "ManualJournalID" => {
                            journal.manual_journal_id = Some(read_text_content(reader)?);
                        }
                        "Narration" => journal.narration = Some(read_text_content(reader)?),
                        "Status" => journal.status = Some(read_text_content(reader)?),
                        "Date" => {
                            let text = read_text_content(reader)?;
                            journal.date = Some(parse_date(&text)?);
                        }
                        "LineAmountTypes" => {
                            let text = read_text_content(reader)?;
                            journal.line_amount_types = Some(LineAmountType::from(text.as_str()));
                        }
                        "JournalLines" => {
                            if ctx.hydration.journal_lines {
                                journal.journal_lines =
                                    Loadable::Loaded(decode_list(reader, "JournalLine", ctx)?);
                            } else {
                                skip_element(reader)?;
                            }
                        }
                        "UpdatedDateUTC" => {
                            let text = read_text_content(reader)?;
                            journal.updated_date_utc = Some(parse_timestamp(&text)?);
                        }
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in ManualJournal".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(journal)
    }
}

impl FromXml for Payment {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, _ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut payment = Payment::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "PaymentID" => payment.payment_id = Some(read_text_content(reader)?),
                        "Date" => {
                            let text = read_text_content(reader)?;
                            payment.date = Some(parse_date(&text)?);
                        }
                        "Amount" => {
                            let text = read_text_content(reader)?;
                            payment.amount = Some(parse_f64(&text)?);
                        }
                        "CurrencyRate" => {
                            let text = read_text_content(reader)?;
                            payment.currency_rate = Some(parse_f64(&text)?);
                        }
                        "Reference" => payment.reference = Some(read_text_content(reader)?),
                        "Status" => payment.status = Some(read_text_content(reader)?),
                        // Payments embed skeleton references to the invoice
                        // and account they touch.
                        "Invoice" => {
                            read_payment_invoice_ref(reader, &mut payment)?;
                        }
                        "Account" => {
                            read_payment_account_ref(reader, &mut payment)?;
                        }
                        "UpdatedDateUTC" => {
                            let text = read_text_content(reader)?;
                            payment.updated_date_utc = Some(parse_timestamp(&text)?);
                        }
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Payment".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(payment)
    }
}

/// Read the `<Invoice>` skeleton nested in a payment.
fn read_payment_invoice_ref(
    reader: &mut Reader<&[u8]>,
    payment: &mut Payment,
) -> Result<(), XmlError> {
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                let tag = std::str::from_utf8(name.as_ref())
                    .map_err(|e| XmlError::Parse(e.to_string()))?;
                match tag {
                    "InvoiceID" => payment.invoice_id = Some(read_text_content(reader)?),
                    "InvoiceNumber" => payment.invoice_number = Some(read_text_content(reader)?),
                    _ => skip_element(reader)?,
                }
            }
            Event::End(_) => return Ok(()),
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF in Payment/Invoice".to_string(),
                ));
            }
            _ => {}
        }
    }
}

/// Read the `<Account>` skeleton nested in a payment.
fn read_payment_account_ref(
    reader: &mut Reader<&[u8]>,
    payment: &mut Payment,
) -> Result<(), XmlError> {
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                let tag = std::str::from_utf8(name.as_ref())
                    .map_err(|e| XmlError::Parse(e.to_string()))?;
                match tag {
                    "AccountID" => payment.account_id = Some(read_text_content(reader)?),
                    "Code" => payment.account_code = Some(read_text_content(reader)?),
                    _ => skip_element(reader)?,
                }
            }
            Event::End(_) => return Ok(()),
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF in Payment/Account".to_string(),
                ));
            }
            _ => {}
        }
    }
}

impl FromXml for Account {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, _ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut account = Account::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "AccountID" => account.account_id = Some(read_text_content(reader)?),
                        "Code" => account.code = Some(read_text_content(reader)?),
                        "Name" => account.name = Some(read_text_content(reader)?),
                        "Type" => account.account_type = Some(read_text_content(reader)?),
                        "Class" => account.account_class = Some(read_text_content(reader)?),
                        "Status" => account.status = Some(read_text_content(reader)?),
                        "Description" => account.description = Some(read_text_content(reader)?),
                        "TaxType" => account.tax_type = Some(read_text_content(reader)?),
                        "CurrencyCode" => account.currency_code = Some(read_text_content(reader)?),
                        "EnablePaymentsToAccount" => {
                            let text = read_text_content(reader)?;
                            account.enable_payments_to_account = Some(parse_bool(&text)?);
                        }
                        "SystemAccount" => {
                            account.system_account = Some(read_text_content(reader)?);
                        }
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Account".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(account)
    }
}

impl FromXml for TaxRate {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, _ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut rate = TaxRate::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "Name" => rate.name = Some(read_text_content(reader)?),
                        "TaxType" => rate.tax_type = Some(read_text_content(reader)?),
                        "Status" => rate.status = Some(read_text_content(reader)?),
                        "DisplayTaxRate" => {
                            let text = read_text_content(reader)?;
                            rate.display_tax_rate = Some(parse_f64(&text)?);
                        }
                        "EffectiveRate" => {
                            let text = read_text_content(reader)?;
                            rate.effective_rate = Some(parse_f64(&text)?);
                        }
                        "CanApplyToAssets" => {
                            let text = read_text_content(reader)?;
                            rate.can_apply_to_assets = Some(parse_bool(&text)?);
                        }
                        "CanApplyToLiabilities" => {
                            let text = read_text_content(reader)?;
                            rate.can_apply_to_liabilities = Some(parse_bool(&text)?);
                        }
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in TaxRate".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(rate)
    }
}

impl FromXml for Item {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, _ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut item = Item::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "ItemID" => item.item_id = Some(read_text_content(reader)?),
                        "Code" => item.code = Some(read_text_content(reader)?),
                        "Name" => item.name = Some(read_text_content(reader)?),
                        "Description" => item.description = Some(read_text_content(reader)?),
                        "IsSold" => {
                            let text = read_text_content(reader)?;
                            item.is_sold = Some(parse_bool(&text)?);
                        }
                        "IsPurchased" => {
                            let text = read_text_content(reader)?;
                            item.is_purchased = Some(parse_bool(&text)?);
                        }
                        "QuantityOnHand" => {
                            let text = read_text_content(reader)?;
                            item.quantity_on_hand = Some(parse_f64(&text)?);
                        }
                        "UpdatedDateUTC" => {
                            let text = read_text_content(reader)?;
                            item.updated_date_utc = Some(parse_timestamp(&text)?);
                        }
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Item".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(item)
    }
}

impl FromXml for Currency {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, _ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut currency = Currency::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "Code" => currency.code = Some(read_text_content(reader)?),
                        "Description" => currency.description = Some(read_text_content(reader)?),
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Currency".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(currency)
    }
}

impl FromXml for Organisation {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, _ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut org = Organisation::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "Name" => org.name = Some(read_text_content(reader)?),
                        "LegalName" => org.legal_name = Some(read_text_content(reader)?),
                        "OrganisationType" => {
                            org.organisation_type = Some(read_text_content(reader)?);
                        }
                        "OrganisationStatus" => {
                            org.organisation_status = Some(read_text_content(reader)?);
                        }
                        "BaseCurrency" => org.base_currency = Some(read_text_content(reader)?),
                        "CountryCode" => org.country_code = Some(read_text_content(reader)?),
                        "Timezone" => org.timezone = Some(read_text_content(reader)?),
                        "IsDemoCompany" => {
                            let text = read_text_content(reader)?;
                            org.is_demo_company = Some(parse_bool(&text)?);
                        }
                        "APIKey" => org.api_key = Some(read_text_content(reader)?),
                        "Version" => org.version = Some(read_text_content(reader)?),
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Organisation".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(org)
    }
}

impl FromXml for TrackingOption {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, _ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut option = TrackingOption::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "TrackingOptionID" => {
                            option.tracking_option_id = Some(read_text_content(reader)?);
                        }
                        "Name" => option.name = Some(read_text_content(reader)?),
                        "Status" => option.status = Some(read_text_content(reader)?),
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in TrackingOption".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(option)
    }
}

impl FromXml for TrackingCategory {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut category = TrackingCategory::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "TrackingCategoryID" => {
                            category.tracking_category_id = Some(read_text_content(reader)?);
                        }
                        "Name" => category.name = Some(read_text_content(reader)?),
                        "Status" => category.status = Some(read_text_content(reader)?),
                        "Options" => {
                            category.options = decode_list(reader, "Option", ctx)?;
                        }
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in TrackingCategory".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(category)
    }
}

impl FromXml for PayrollCalendar {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, _ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut calendar = PayrollCalendar::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "PayrollCalendarID" => {
                            calendar.payroll_calendar_id = Some(read_text_content(reader)?);
                        }
                        "Name" => calendar.name = Some(read_text_content(reader)?),
                        "CalendarType" => calendar.calendar_type = Some(read_text_content(reader)?),
                        "StartDate" => {
                            let text = read_text_content(reader)?;
                            calendar.start_date = Some(parse_date(&text)?);
                        }
                        "PaymentDate" => {
                            let text = read_text_content(reader)?;
                            calendar.payment_date = Some(parse_date(&text)?);
                        }
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in PayrollCalendar".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(calendar)
    }
}

impl FromXml for PayRun {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, _ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut pay_run = PayRun::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "PayRunID" => pay_run.pay_run_id = Some(read_text_content(reader)?),
                        "PayrollCalendarID" => {
                            pay_run.payroll_calendar_id = Some(read_text_content(reader)?);
                        }
                        "PayRunPeriodStartDate" => {
                            let text = read_text_content(reader)?;
                            pay_run.pay_run_period_start_date = Some(parse_date(&text)?);
                        }
                        "PayRunPeriodEndDate" => {
                            let text = read_text_content(reader)?;
                            pay_run.pay_run_period_end_date = Some(parse_date(&text)?);
                        }
                        "PaymentDate" => {
                            let text = read_text_content(reader)?;
                            pay_run.payment_date = Some(parse_date(&text)?);
                        }
                        "PayRunStatus" => pay_run.pay_run_status = Some(read_text_content(reader)?),
                        "Wages" => {
                            let text = read_text_content(reader)?;
                            pay_run.wages = Some(parse_f64(&text)?);
                        }
                        "Deductions" => {
                            let text = read_text_content(reader)?;
                            pay_run.deductions = Some(parse_f64(&text)?);
                        }
                        "Tax" => {
                            let text = read_text_content(reader)?;
                            pay_run.tax = Some(parse_f64(&text)?);
                        }
                        "NetPay" => {
                            let text = read_text_content(reader)?;
                            pay_run.net_pay = Some(parse_f64(&text)?);
                        }
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in PayRun".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(pay_run)
    }
}

impl FromXml for ReportCell {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, _ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut cell = ReportCell::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "Value" => cell.value = Some(read_text_content(reader)?),
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Cell".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(cell)
    }
}

impl FromXml for ReportRow {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut row = ReportRow::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "RowType" => row.row_type = Some(read_text_content(reader)?),
                        "Title" => row.title = Some(read_text_content(reader)?),
                        "Cells" => row.cells = decode_list(reader, "Cell", ctx)?,
                        "Rows" => row.rows = decode_list(reader, "Row", ctx)?,
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Row".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(row)
    }
}

impl FromXml for Report {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut report = Report::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "ReportID" => report.report_id = Some(read_text_content(reader)?),
                        "ReportName" => report.report_name = Some(read_text_content(reader)?),
                        "ReportType" => report.report_type = Some(read_text_content(reader)?),
                        "ReportTitles" => {
                            report.report_titles = read_report_titles(reader)?;
                        }
                        "ReportDate" => report.report_date = Some(read_text_content(reader)?),
                        "UpdatedDateUTC" => {
                            let text = read_text_content(reader)?;
                            report.updated_date_utc = Some(parse_timestamp(&text)?);
                        }
                        "Rows" => report.rows = decode_list(reader, "Row", ctx)?,
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Report".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(report)
    }
}

/// Read the `<ReportTitles>` wrapper of `<ReportTitle>` text children.
fn read_report_titles(reader: &mut Reader<&[u8]>) -> Result<Vec<String>, XmlError> {
    let mut titles = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                let tag = std::str::from_utf8(name.as_ref())
                    .map_err(|e| XmlError::Parse(e.to_string()))?;
                if tag == "ReportTitle" {
                    titles.push(read_text_content(reader)?);
                } else {
                    skip_element(reader)?;
                }
            }
            Event::End(_) => return Ok(titles),
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF in ReportTitles".to_string(),
                ));
            }
            _ => {}
        }
    }
}

impl FromXml for ApiError {
    fn from_xml_reader(reader: &mut Reader<&[u8]>, _ctx: &DecodeContext) -> Result<Self, XmlError> {
        let mut error = ApiError::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(|e| XmlError::Parse(e.to_string()))?;
                    match tag {
                        "ErrorNumber" => error.code = Some(read_text_content(reader)?),
                        "Description" | "Message" => {
                            error.description = Some(read_text_content(reader)?);
                        }
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Error".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_decode_contact_with_unknown_tags_skipped() {
        let xml = br"<Contact>
            <ContactID>c-001</ContactID>
            <Name>Acme Trading</Name>
            <EmailAddress>billing@acme.test</EmailAddress>
            <ContactStatus>ACTIVE</ContactStatus>
            <IsCustomer>true</IsCustomer>
            <SomeFutureTag><Nested>ignored</Nested></SomeFutureTag>
            <UpdatedDateUTC>2024-03-01T09:30:00Z</UpdatedDateUTC>
        </Contact>";

        let contact: Contact =
            from_xml(xml, &DecodeContext::detached()).expect("decoding should succeed");
        assert_eq!(contact.contact_id.as_deref(), Some("c-001"));
        assert_eq!(contact.name.as_deref(), Some("Acme Trading"));
        assert_eq!(contact.email_address.as_deref(), Some("billing@acme.test"));
        assert_eq!(contact.status, Some(ContactStatus::Active));
        assert_eq!(contact.is_customer, Some(true));
        assert!(contact.updated_date_utc.is_some());
    }

    #[test]
    fn test_should_decode_invoice_line_items_when_hydrated() {
        let xml = br"<Invoice>
            <InvoiceID>inv-1</InvoiceID>
            <InvoiceNumber>INV-0001</InvoiceNumber>
            <Type>ACCREC</Type>
            <Status>AUTHORISED</Status>
            <Date>2024-02-10T00:00:00</Date>
            <Contact><ContactID>c-1</ContactID><Name>Acme</Name></Contact>
            <LineItems>
                <LineItem>
                    <Description>Widgets</Description>
                    <Quantity>3</Quantity>
                    <UnitAmount>12.50</UnitAmount>
                    <LineAmount>37.50</LineAmount>
                </LineItem>
                <LineItem><Description>Freight</Description><LineAmount>9.00</LineAmount></LineItem>
            </LineItems>
            <Total>46.50</Total>
        </Invoice>";

        let invoice: Invoice =
            from_xml(xml, &DecodeContext::detached()).expect("decoding should succeed");
        assert_eq!(invoice.invoice_id.as_deref(), Some("inv-1"));
        assert_eq!(invoice.invoice_type, Some(InvoiceType::AccountsReceivable));
        assert_eq!(invoice.status, Some(InvoiceStatus::Authorised));
        assert_eq!(
            invoice.date,
            Some(NaiveDate::from_ymd_opt(2024, 2, 10).expect("valid date"))
        );
        assert_eq!(invoice.total, Some(46.50));

        let lines = invoice.line_items.items().expect("line items loaded");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].description.as_deref(), Some("Widgets"));
        assert_eq!(lines[0].quantity, Some(3.0));
        assert_eq!(lines[1].line_amount, Some(9.00));
    }

    #[test]
    fn test_should_leave_line_items_not_loaded_when_hydration_off() {
        // Content-wise the line items are present; the flag still wins.
        let xml = br"<Invoice>
            <InvoiceID>inv-2</InvoiceID>
            <LineItems>
                <LineItem><Description>Widgets</Description></LineItem>
            </LineItems>
        </Invoice>";

        let ctx = DecodeContext::new(None, Hydration::none());
        let invoice: Invoice = from_xml(xml, &ctx).expect("decoding should succeed");
        assert!(!invoice.line_items.is_loaded());
        assert_eq!(invoice.line_items, Loadable::NotLoaded);
    }

    #[test]
    fn test_should_confirm_empty_line_items_when_hydrated() {
        let xml = br"<Invoice><InvoiceID>inv-3</InvoiceID></Invoice>";

        let invoice: Invoice =
            from_xml(xml, &DecodeContext::detached()).expect("decoding should succeed");
        assert!(invoice.line_items.is_loaded());
        assert!(invoice.line_items.is_empty());
    }

    #[test]
    fn test_should_decode_contact_group_members_by_flag() {
        let xml = br"<ContactGroup>
            <ContactGroupID>g-1</ContactGroupID>
            <Name>Wholesale</Name>
            <Contacts>
                <Contact><ContactID>c-1</ContactID></Contact>
                <Contact><ContactID>c-2</ContactID></Contact>
            </Contacts>
        </ContactGroup>";

        let hydrated: ContactGroup =
            from_xml(xml, &DecodeContext::detached()).expect("decoding should succeed");
        assert_eq!(hydrated.contacts.len(), Some(2));

        let ctx = DecodeContext::new(None, Hydration::none());
        let listed: ContactGroup = from_xml(xml, &ctx).expect("decoding should succeed");
        assert!(!listed.contacts.is_loaded());
    }

    #[test]
    fn test_should_decode_manual_journal_lines() {
        let xml = br"<ManualJournal>
            <ManualJournalID>mj-1</ManualJournalID>
            <Narration>Year-end accrual</Narration>
            <Date>2024-06-30T00:00:00</Date>
            <JournalLines>
                <JournalLine><AccountCode>200</AccountCode><LineAmount>100.00</LineAmount></JournalLine>
                <JournalLine><AccountCode>400</AccountCode><LineAmount>-100.00</LineAmount></JournalLine>
            </JournalLines>
        </ManualJournal>";

        let journal: ManualJournal =
            from_xml(xml, &DecodeContext::detached()).expect("decoding should succeed");
        let lines = journal.journal_lines.items().expect("lines loaded");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].account_code.as_deref(), Some("200"));
        assert_eq!(lines[1].line_amount, Some(-100.00));
    }

    #[test]
    fn test_should_decode_payment_with_nested_references() {
        let xml = br"<Payment>
            <PaymentID>p-1</PaymentID>
            <Date>2024-04-02T00:00:00</Date>
            <Amount>250.00</Amount>
            <Invoice><InvoiceID>inv-9</InvoiceID><InvoiceNumber>INV-0009</InvoiceNumber></Invoice>
            <Account><AccountID>a-1</AccountID><Code>090</Code></Account>
        </Payment>";

        let payment: Payment =
            from_xml(xml, &DecodeContext::detached()).expect("decoding should succeed");
        assert_eq!(payment.payment_id.as_deref(), Some("p-1"));
        assert_eq!(payment.amount, Some(250.00));
        assert_eq!(payment.invoice_id.as_deref(), Some("inv-9"));
        assert_eq!(payment.invoice_number.as_deref(), Some("INV-0009"));
        assert_eq!(payment.account_code.as_deref(), Some("090"));
    }

    #[test]
    fn test_should_decode_tracking_category_options() {
        let xml = br"<TrackingCategory>
            <TrackingCategoryID>t-1</TrackingCategoryID>
            <Name>Region</Name>
            <Options>
                <Option><Name>North</Name></Option>
                <Option><Name>South</Name></Option>
            </Options>
        </TrackingCategory>";

        let category: TrackingCategory =
            from_xml(xml, &DecodeContext::detached()).expect("decoding should succeed");
        assert_eq!(category.name.as_deref(), Some("Region"));
        assert_eq!(category.options.len(), 2);
        assert_eq!(category.options[1].name.as_deref(), Some("South"));
    }

    #[test]
    fn test_should_decode_report_rows_and_titles() {
        let xml = br"<Report>
            <ReportID>TrialBalance</ReportID>
            <ReportName>Trial Balance</ReportName>
            <ReportTitles>
                <ReportTitle>Trial Balance</ReportTitle>
                <ReportTitle>Demo Company</ReportTitle>
            </ReportTitles>
            <Rows>
                <Row>
                    <RowType>Header</RowType>
                    <Cells><Cell><Value>Account</Value></Cell><Cell><Value>Debit</Value></Cell></Cells>
                </Row>
                <Row>
                    <RowType>Section</RowType>
                    <Title>Revenue</Title>
                    <Rows>
                        <Row><Cells><Cell><Value>Sales</Value></Cell><Cell><Value>100.00</Value></Cell></Cells></Row>
                    </Rows>
                </Row>
            </Rows>
        </Report>";

        let report: Report =
            from_xml(xml, &DecodeContext::detached()).expect("decoding should succeed");
        assert_eq!(report.report_titles.len(), 2);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].cells[1].value.as_deref(), Some("Debit"));
        assert_eq!(report.rows[1].title.as_deref(), Some("Revenue"));
        assert_eq!(
            report.rows[1].rows[0].cells[0].value.as_deref(),
            Some("Sales")
        );
    }

    #[test]
    fn test_should_decode_error_record() {
        let xml = br"<Error>
            <ErrorNumber>10</ErrorNumber>
            <Type>ValidationException</Type>
            <Message>A validation exception occurred</Message>
        </Error>";

        let error: ApiError =
            from_xml(xml, &DecodeContext::detached()).expect("decoding should succeed");
        assert_eq!(error.code.as_deref(), Some("10"));
        assert_eq!(
            error.description.as_deref(),
            Some("A validation exception occurred")
        );
    }

    #[test]
    fn test_should_unescape_text_content() {
        let xml = br"<Contact><Name>Jones &amp; Sons &lt;Ltd&gt;</Name></Contact>";

        let contact: Contact =
            from_xml(xml, &DecodeContext::detached()).expect("decoding should succeed");
        assert_eq!(contact.name.as_deref(), Some("Jones & Sons <Ltd>"));
    }

    #[test]
    fn test_should_fail_on_empty_document() {
        let result: Result<Contact, _> = from_xml(b"   ", &DecodeContext::detached());
        assert!(matches!(result, Err(XmlError::MissingElement(_))));
    }

    #[test]
    fn test_should_attach_client_handle_to_decoded_entities() {
        use ledgerstack_model::client::{ClientConfig, ClientHandle};

        let handle = ClientHandle::new(ClientConfig::default());
        let ctx = DecodeContext::new(Some(handle), Hydration::all());

        let xml = br"<Contact><ContactID>c-1</ContactID></Contact>";
        let contact: Contact = from_xml(xml, &ctx).expect("decoding should succeed");
        assert!(contact.client.is_some());

        let detached: Contact =
            from_xml(xml, &DecodeContext::detached()).expect("decoding should succeed");
        assert!(detached.client.is_none());
    }
}
