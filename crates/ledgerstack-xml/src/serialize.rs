//! XML serialization: converting writable entities into request bodies.
//!
//! This module provides the [`ToXml`] trait and implementations for the
//! entity kinds that can be sent to the remote service (contacts, invoices,
//! credit notes, bank transactions, manual journals, payments, items,
//! accounts). Read-only kinds such as reports, currencies, and the
//! organisation have no serializer.
//!
//! Conventions on the wire:
//!
//! - Booleans: lowercase `true`/`false`
//! - Dates: `2009-05-27T00:00:00` with a zero time-of-day
//! - No XML namespace; the declaration is `<?xml version="1.0" encoding="UTF-8"?>`
//! - Server-managed fields (`UpdatedDateUTC`) are never written

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesText, Event};

use ledgerstack_model::loadable::Loadable;
use ledgerstack_model::types::{
    Account, BankTransaction, BankTransactionType, Contact, ContactStatus, CreditNote,
    CreditNoteType, Invoice, InvoiceStatus, InvoiceType, Item, JournalLine, LineAmountType,
    LineItem, ManualJournal, Payment,
};

use crate::error::XmlError;

/// Trait for serializing entities to request XML.
///
/// Implementors write their content as child elements inside the current XML
/// context. The wrapping element name is handled by the caller, because the
/// same entity appears under different tags in different requests.
///
/// Uses `io::Result` because `quick_xml::Writer` closures require `io::Result<()>`.
pub trait ToXml {
    /// Serialize this value as XML child elements into the given writer.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if writing to the underlying writer fails.
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()>;
}

/// Serialize a single entity as a complete XML document.
///
/// Produces the XML declaration followed by `<root_element>` wrapping the
/// entity's serialized content.
///
/// # Errors
///
/// Returns `XmlError` if serialization fails.
pub fn to_xml<T: ToXml>(root_element: &str, value: &T) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(512);
    let mut writer = Writer::new(&mut buf);

    writer.write_event(Event::Decl(quick_xml::events::BytesDecl::new(
        "1.0",
        Some("UTF-8"),
        None,
    )))?;

    writer
        .create_element(root_element)
        .write_inner_content(|w| value.serialize_xml(w))?;

    Ok(buf)
}

/// Serialize a batch of entities as a complete XML document.
///
/// Produces `<wrapper><item_tag>...</item_tag>...</wrapper>`, the shape the
/// service expects for batch create and update requests. Submission order is
/// preserved, which is what positional identifier write-back relies on.
///
/// # Errors
///
/// Returns `XmlError` if serialization fails.
pub fn to_xml_collection<T: ToXml>(
    wrapper: &str,
    item_tag: &str,
    values: &[T],
) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(1024);
    let mut writer = Writer::new(&mut buf);

    writer.write_event(Event::Decl(quick_xml::events::BytesDecl::new(
        "1.0",
        Some("UTF-8"),
        None,
    )))?;

    writer.create_element(wrapper).write_inner_content(|w| {
        for value in values {
            w.create_element(item_tag)
                .write_inner_content(|inner| value.serialize_xml(inner))?;
        }
        Ok(())
    })?;

    Ok(buf)
}

// ---------------------------------------------------------------------------
// Helper functions for writing common XML patterns
// ---------------------------------------------------------------------------

/// Write a simple `<tag>text</tag>` element.
fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

/// Write `<tag>text</tag>` only if the value is `Some`.
fn write_optional_text<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<&str>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, v)?;
    }
    Ok(())
}

/// Write `<tag>value</tag>` for an optional boolean.
fn write_optional_bool<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<bool>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, if v { "true" } else { "false" })?;
    }
    Ok(())
}

/// Write `<tag>value</tag>` for an optional amount.
fn write_optional_f64<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<f64>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, &v.to_string())?;
    }
    Ok(())
}

/// Write `<tag>value</tag>` for an optional enum that has `as_str()`.
fn write_optional_enum<W: Write, E: AsStr>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<&E>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, v.as_str())?;
    }
    Ok(())
}

/// Write `<tag>date</tag>` for an optional calendar date.
fn write_optional_date<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<&chrono::NaiveDate>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, &v.format("%Y-%m-%dT00:00:00").to_string())?;
    }
    Ok(())
}

/// Write a `Loaded` line collection wrapped in the given tags.
///
/// A `NotLoaded` collection is omitted entirely so that partial objects can
/// be resubmitted without wiping lines the caller never fetched.
fn write_loadable_lines<W: Write, T: ToXml>(
    writer: &mut Writer<W>,
    wrapper: &str,
    item_tag: &str,
    lines: &Loadable<T>,
) -> io::Result<()> {
    if let Some(items) = lines.items() {
        writer.create_element(wrapper).write_inner_content(|w| {
            for item in items {
                w.create_element(item_tag)
                    .write_inner_content(|inner| item.serialize_xml(inner))?;
            }
            Ok(())
        })?;
    }
    Ok(())
}

/// Trait for enum types that can convert to their string representation.
trait AsStr {
    fn as_str(&self) -> &'static str;
}

macro_rules! impl_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl AsStr for $ty {
                fn as_str(&self) -> &'static str {
                    self.as_str()
                }
            }
        )+
    };
}

impl_as_str!(
    ContactStatus,
    InvoiceType,
    InvoiceStatus,
    CreditNoteType,
    BankTransactionType,
    LineAmountType,
);

// ---------------------------------------------------------------------------
// ToXml implementations for writable entities
// ---------------------------------------------------------------------------

impl ToXml for Contact {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_text(writer, "ContactID", self.contact_id.as_deref())?;
        write_optional_text(writer, "ContactNumber", self.contact_number.as_deref())?;
        write_optional_enum(writer, "ContactStatus", self.status.as_ref())?;
        write_optional_text(writer, "Name", self.name.as_deref())?;
        write_optional_text(writer, "FirstName", self.first_name.as_deref())?;
        write_optional_text(writer, "LastName", self.last_name.as_deref())?;
        write_optional_text(writer, "EmailAddress", self.email_address.as_deref())?;
        write_optional_text(writer, "DefaultCurrency", self.default_currency.as_deref())?;
        Ok(())
    }
}

impl ToXml for LineItem {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_text(writer, "Description", self.description.as_deref())?;
        write_optional_f64(writer, "Quantity", self.quantity)?;
        write_optional_f64(writer, "UnitAmount", self.unit_amount)?;
        write_optional_text(writer, "ItemCode", self.item_code.as_deref())?;
        write_optional_text(writer, "AccountCode", self.account_code.as_deref())?;
        write_optional_text(writer, "TaxType", self.tax_type.as_deref())?;
        write_optional_f64(writer, "TaxAmount", self.tax_amount)?;
        write_optional_f64(writer, "LineAmount", self.line_amount)?;
        Ok(())
    }
}

impl ToXml for Invoice {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_text(writer, "InvoiceID", self.invoice_id.as_deref())?;
        write_optional_text(writer, "InvoiceNumber", self.invoice_number.as_deref())?;
        write_optional_enum(writer, "Type", self.invoice_type.as_ref())?;
        write_optional_enum(writer, "Status", self.status.as_ref())?;
        write_optional_text(writer, "Reference", self.reference.as_deref())?;
        write_optional_date(writer, "Date", self.date.as_ref())?;
        write_optional_date(writer, "DueDate", self.due_date.as_ref())?;
        write_optional_enum(writer, "LineAmountTypes", self.line_amount_types.as_ref())?;
        write_optional_text(writer, "CurrencyCode", self.currency_code.as_deref())?;
        if let Some(contact) = &self.contact {
            writer
                .create_element("Contact")
                .write_inner_content(|w| contact.serialize_xml(w))?;
        }
        write_loadable_lines(writer, "LineItems", "LineItem", &self.line_items)?;
        Ok(())
    }
}

impl ToXml for CreditNote {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_text(writer, "CreditNoteID", self.credit_note_id.as_deref())?;
        write_optional_text(
            writer,
            "CreditNoteNumber",
            self.credit_note_number.as_deref(),
        )?;
        write_optional_enum(writer, "Type", self.credit_note_type.as_ref())?;
        write_optional_enum(writer, "Status", self.status.as_ref())?;
        write_optional_text(writer, "Reference", self.reference.as_deref())?;
        write_optional_date(writer, "Date", self.date.as_ref())?;
        write_optional_enum(writer, "LineAmountTypes", self.line_amount_types.as_ref())?;
        write_optional_text(writer, "CurrencyCode", self.currency_code.as_deref())?;
        if let Some(contact) = &self.contact {
            writer
                .create_element("Contact")
                .write_inner_content(|w| contact.serialize_xml(w))?;
        }
        write_loadable_lines(writer, "LineItems", "LineItem", &self.line_items)?;
        Ok(())
    }
}

impl ToXml for BankTransaction {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_text(
            writer,
            "BankTransactionID",
            self.bank_transaction_id.as_deref(),
        )?;
        write_optional_enum(writer, "Type", self.transaction_type.as_ref())?;
        write_optional_text(writer, "Status", self.status.as_deref())?;
        write_optional_text(writer, "Reference", self.reference.as_deref())?;
        write_optional_date(writer, "Date", self.date.as_ref())?;
        write_optional_bool(writer, "IsReconciled", self.is_reconciled)?;
        write_optional_enum(writer, "LineAmountTypes", self.line_amount_types.as_ref())?;
        write_optional_text(writer, "CurrencyCode", self.currency_code.as_deref())?;
        if let Some(contact) = &self.contact {
            writer
                .create_element("Contact")
                .write_inner_content(|w| contact.serialize_xml(w))?;
        }
        if let Some(account) = &self.bank_account {
            writer
                .create_element("BankAccount")
                .write_inner_content(|w| account.serialize_xml(w))?;
        }
        write_loadable_lines(writer, "LineItems", "LineItem", &self.line_items)?;
        Ok(())
    }
}

impl ToXml for JournalLine {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_text(writer, "Description", self.description.as_deref())?;
        write_optional_text(writer, "AccountCode", self.account_code.as_deref())?;
        write_optional_text(writer, "TaxType", self.tax_type.as_deref())?;
        write_optional_f64(writer, "LineAmount", self.line_amount)?;
        Ok(())
    }
}

impl ToXml for ManualJournal {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_text(writer, "ManualJournalID", self.manual_journal_id.as_deref())?;
        write_optional_text(writer, "Narration", self.narration.as_deref())?;
        write_optional_text(writer, "Status", self.status.as_deref())?;
        write_optional_date(writer, "Date", self.date.as_ref())?;
        write_optional_enum(writer, "LineAmountTypes", self.line_amount_types.as_ref())?;
        write_loadable_lines(writer, "JournalLines", "JournalLine", &self.journal_lines)?;
        Ok(())
    }
}

impl ToXml for Payment {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_text(writer, "PaymentID", self.payment_id.as_deref())?;
        if self.invoice_id.is_some() || self.invoice_number.is_some() {
            writer.create_element("Invoice").write_inner_content(|w| {
                write_optional_text(w, "InvoiceID", self.invoice_id.as_deref())?;
                write_optional_text(w, "InvoiceNumber", self.invoice_number.as_deref())?;
                Ok(())
            })?;
        }
        if self.account_id.is_some() || self.account_code.is_some() {
            writer.create_element("Account").write_inner_content(|w| {
                write_optional_text(w, "AccountID", self.account_id.as_deref())?;
                write_optional_text(w, "Code", self.account_code.as_deref())?;
                Ok(())
            })?;
        }
        write_optional_date(writer, "Date", self.date.as_ref())?;
        write_optional_f64(writer, "Amount", self.amount)?;
        write_optional_f64(writer, "CurrencyRate", self.currency_rate)?;
        write_optional_text(writer, "Reference", self.reference.as_deref())?;
        Ok(())
    }
}

impl ToXml for Account {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_text(writer, "AccountID", self.account_id.as_deref())?;
        write_optional_text(writer, "Code", self.code.as_deref())?;
        write_optional_text(writer, "Name", self.name.as_deref())?;
        write_optional_text(writer, "Type", self.account_type.as_deref())?;
        write_optional_text(writer, "Status", self.status.as_deref())?;
        write_optional_text(writer, "Description", self.description.as_deref())?;
        write_optional_text(writer, "TaxType", self.tax_type.as_deref())?;
        write_optional_text(writer, "CurrencyCode", self.currency_code.as_deref())?;
        write_optional_bool(
            writer,
            "EnablePaymentsToAccount",
            self.enable_payments_to_account,
        )?;
        Ok(())
    }
}

impl ToXml for Item {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_text(writer, "ItemID", self.item_id.as_deref())?;
        write_optional_text(writer, "Code", self.code.as_deref())?;
        write_optional_text(writer, "Name", self.name.as_deref())?;
        write_optional_text(writer, "Description", self.description.as_deref())?;
        write_optional_bool(writer, "IsSold", self.is_sold)?;
        write_optional_bool(writer, "IsPurchased", self.is_purchased)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::deserialize::{DecodeContext, Hydration, from_xml};

    #[test]
    fn test_should_serialize_contact_with_declaration() {
        let contact = Contact {
            name: Some("Acme Trading".to_owned()),
            email_address: Some("billing@acme.test".to_owned()),
            status: Some(ContactStatus::Active),
            ..Contact::default()
        };

        let xml = to_xml("Contact", &contact).expect("serialization should succeed");
        let xml = String::from_utf8(xml).expect("valid UTF-8");

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<Contact>"));
        assert!(xml.contains("<Name>Acme Trading</Name>"));
        assert!(xml.contains("<ContactStatus>ACTIVE</ContactStatus>"));
        // Absent scalars produce no tags at all.
        assert!(!xml.contains("ContactID"));
        assert!(!xml.contains("FirstName"));
    }

    #[test]
    fn test_should_escape_text_content() {
        let contact = Contact {
            name: Some("Jones & Sons <Ltd>".to_owned()),
            ..Contact::default()
        };

        let xml = to_xml("Contact", &contact).expect("serialization should succeed");
        let xml = String::from_utf8(xml).expect("valid UTF-8");
        assert!(xml.contains("<Name>Jones &amp; Sons &lt;Ltd&gt;</Name>"));
    }

    #[test]
    fn test_should_serialize_invoice_with_line_items_and_date() {
        let invoice = Invoice {
            invoice_type: Some(InvoiceType::AccountsReceivable),
            date: Some(NaiveDate::from_ymd_opt(2024, 2, 10).expect("valid date")),
            contact: Some(Contact {
                contact_id: Some("c-1".to_owned()),
                ..Contact::default()
            }),
            line_items: Loadable::Loaded(vec![LineItem {
                description: Some("Widgets".to_owned()),
                quantity: Some(3.0),
                unit_amount: Some(12.5),
                ..LineItem::default()
            }]),
            ..Invoice::default()
        };

        let xml = to_xml("Invoice", &invoice).expect("serialization should succeed");
        let xml = String::from_utf8(xml).expect("valid UTF-8");

        assert!(xml.contains("<Type>ACCREC</Type>"));
        assert!(xml.contains("<Date>2024-02-10T00:00:00</Date>"));
        assert!(xml.contains("<Contact><ContactID>c-1</ContactID></Contact>"));
        assert!(xml.contains("<LineItems><LineItem>"));
        assert!(xml.contains("<Description>Widgets</Description>"));
    }

    #[test]
    fn test_should_omit_not_loaded_line_items() {
        let invoice = Invoice {
            invoice_id: Some("inv-1".to_owned()),
            line_items: Loadable::NotLoaded,
            ..Invoice::default()
        };

        let xml = to_xml("Invoice", &invoice).expect("serialization should succeed");
        let xml = String::from_utf8(xml).expect("valid UTF-8");
        assert!(!xml.contains("LineItems"));
    }

    #[test]
    fn test_should_serialize_batch_in_submission_order() {
        let contacts = vec![
            Contact {
                name: Some("First".to_owned()),
                ..Contact::default()
            },
            Contact {
                name: Some("Second".to_owned()),
                ..Contact::default()
            },
        ];

        let xml =
            to_xml_collection("Contacts", "Contact", &contacts).expect("serialization should succeed");
        let xml = String::from_utf8(xml).expect("valid UTF-8");

        assert!(xml.contains("<Contacts><Contact>"));
        let first = xml.find("First").expect("first contact present");
        let second = xml.find("Second").expect("second contact present");
        assert!(first < second);
    }

    #[test]
    fn test_should_serialize_payment_with_nested_references() {
        let payment = Payment {
            invoice_number: Some("INV-0009".to_owned()),
            account_code: Some("090".to_owned()),
            date: Some(NaiveDate::from_ymd_opt(2024, 4, 2).expect("valid date")),
            amount: Some(250.0),
            ..Payment::default()
        };

        let xml = to_xml("Payment", &payment).expect("serialization should succeed");
        let xml = String::from_utf8(xml).expect("valid UTF-8");

        assert!(xml.contains("<Invoice><InvoiceNumber>INV-0009</InvoiceNumber></Invoice>"));
        assert!(xml.contains("<Account><Code>090</Code></Account>"));
        assert!(xml.contains("<Amount>250</Amount>"));
    }

    #[test]
    fn test_should_round_trip_manual_journal() {
        let journal = ManualJournal {
            narration: Some("Year-end accrual".to_owned()),
            date: Some(NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date")),
            line_amount_types: Some(LineAmountType::NoTax),
            journal_lines: Loadable::Loaded(vec![
                JournalLine {
                    account_code: Some("200".to_owned()),
                    line_amount: Some(100.0),
                    ..JournalLine::default()
                },
                JournalLine {
                    account_code: Some("400".to_owned()),
                    line_amount: Some(-100.0),
                    ..JournalLine::default()
                },
            ]),
            ..ManualJournal::default()
        };

        let xml = to_xml("ManualJournal", &journal).expect("serialization should succeed");
        let decoded: ManualJournal = from_xml(
            &xml,
            &DecodeContext::new(None, Hydration::all()),
        )
        .expect("decoding should succeed");

        assert_eq!(decoded.narration, journal.narration);
        assert_eq!(decoded.date, journal.date);
        assert_eq!(decoded.line_amount_types, Some(LineAmountType::NoTax));
        let lines = decoded.journal_lines.items().expect("lines loaded");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].line_amount, Some(-100.0));
    }
}
