//! The catalog of logical API operations.
//!
//! Each operation carries two derived strings:
//!
//! - [`signature`](ApiOperation::signature), a static `VERB/Resource` label
//!   (`"GET/Invoices"`, `"PUT/Contacts"`). List signatures double as the
//!   hydration keys the response dispatcher consults: a response produced by
//!   a kind's list operation omits that kind's nested collections.
//! - [`path`](ApiOperation::path), the URL path for the collaborating
//!   transport layer, relative to the configured endpoint.

/// A logical operation against the accounting API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// List all contacts.
    ListContacts,
    /// Fetch a single contact by identifier.
    GetContact(String),
    /// Create one or more contacts.
    CreateContacts,
    /// Update one or more contacts.
    UpdateContacts,
    /// List all contact groups, without members.
    ListContactGroups,
    /// Fetch a single contact group with its members.
    GetContactGroup(String),
    /// List all invoices, without line items.
    ListInvoices,
    /// Fetch a single invoice with line items.
    GetInvoice(String),
    /// Create one or more invoices.
    CreateInvoices,
    /// Update one or more invoices.
    UpdateInvoices,
    /// List all credit notes, without line items.
    ListCreditNotes,
    /// Fetch a single credit note with line items.
    GetCreditNote(String),
    /// Create one or more credit notes.
    CreateCreditNotes,
    /// Update one or more credit notes.
    UpdateCreditNotes,
    /// List all bank transactions, without line items.
    ListBankTransactions,
    /// Fetch a single bank transaction with line items.
    GetBankTransaction(String),
    /// Create one or more bank transactions.
    CreateBankTransactions,
    /// Update one or more bank transactions.
    UpdateBankTransactions,
    /// List all manual journals, without journal lines.
    ListManualJournals,
    /// Fetch a single manual journal with journal lines.
    GetManualJournal(String),
    /// Create one or more manual journals.
    CreateManualJournals,
    /// Update one or more manual journals.
    UpdateManualJournals,
    /// List all payments.
    ListPayments,
    /// Fetch a single payment by identifier.
    GetPayment(String),
    /// Create one or more payments.
    CreatePayments,
    /// List the chart of accounts.
    ListAccounts,
    /// Fetch a single account by identifier.
    GetAccount(String),
    /// Create one or more accounts.
    CreateAccounts,
    /// Update one or more accounts.
    UpdateAccounts,
    /// List all tax rates.
    ListTaxRates,
    /// List all items.
    ListItems,
    /// Fetch a single item by identifier.
    GetItem(String),
    /// Create one or more items.
    CreateItems,
    /// Update one or more items.
    UpdateItems,
    /// List the organisation's currencies.
    ListCurrencies,
    /// Fetch the connected organisation record.
    GetOrganisation,
    /// List all tracking categories with their options.
    ListTrackingCategories,
    /// List all payroll calendars.
    ListPayrollCalendars,
    /// Fetch a single payroll calendar by identifier.
    GetPayrollCalendar(String),
    /// List all pay runs.
    ListPayRuns,
    /// Fetch a single pay run by identifier.
    GetPayRun(String),
    /// Fetch a named report.
    GetReport(String),
}

impl ApiOperation {
    /// The `VERB/Resource` signature of this operation.
    ///
    /// The dispatcher compares this against each entity kind's list
    /// signature to decide whether nested collections were included.
    #[must_use]
    pub fn signature(&self) -> &'static str {
        match self {
            Self::ListContacts => "GET/Contacts",
            Self::GetContact(_) => "GET/Contact",
            Self::CreateContacts => "PUT/Contacts",
            Self::UpdateContacts => "POST/Contacts",
            Self::ListContactGroups => "GET/ContactGroups",
            Self::GetContactGroup(_) => "GET/ContactGroup",
            Self::ListInvoices => "GET/Invoices",
            Self::GetInvoice(_) => "GET/Invoice",
            Self::CreateInvoices => "PUT/Invoices",
            Self::UpdateInvoices => "POST/Invoices",
            Self::ListCreditNotes => "GET/CreditNotes",
            Self::GetCreditNote(_) => "GET/CreditNote",
            Self::CreateCreditNotes => "PUT/CreditNotes",
            Self::UpdateCreditNotes => "POST/CreditNotes",
            Self::ListBankTransactions => "GET/BankTransactions",
            Self::GetBankTransaction(_) => "GET/BankTransaction",
            Self::CreateBankTransactions => "PUT/BankTransactions",
            Self::UpdateBankTransactions => "POST/BankTransactions",
            Self::ListManualJournals => "GET/ManualJournals",
            Self::GetManualJournal(_) => "GET/ManualJournal",
            Self::CreateManualJournals => "PUT/ManualJournals",
            Self::UpdateManualJournals => "POST/ManualJournals",
            Self::ListPayments => "GET/Payments",
            Self::GetPayment(_) => "GET/Payment",
            Self::CreatePayments => "PUT/Payments",
            Self::ListAccounts => "GET/Accounts",
            Self::GetAccount(_) => "GET/Account",
            Self::CreateAccounts => "PUT/Accounts",
            Self::UpdateAccounts => "POST/Accounts",
            Self::ListTaxRates => "GET/TaxRates",
            Self::ListItems => "GET/Items",
            Self::GetItem(_) => "GET/Item",
            Self::CreateItems => "PUT/Items",
            Self::UpdateItems => "POST/Items",
            Self::ListCurrencies => "GET/Currencies",
            Self::GetOrganisation => "GET/Organisation",
            Self::ListTrackingCategories => "GET/TrackingCategories",
            Self::ListPayrollCalendars => "GET/PayrollCalendars",
            Self::GetPayrollCalendar(_) => "GET/PayrollCalendar",
            Self::ListPayRuns => "GET/PayRuns",
            Self::GetPayRun(_) => "GET/PayRun",
            Self::GetReport(_) => "GET/Report",
        }
    }

    /// The URL path of this operation, relative to the configured endpoint.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::ListContacts | Self::CreateContacts | Self::UpdateContacts => {
                "/Contacts".to_owned()
            }
            Self::GetContact(id) => format!("/Contacts/{id}"),
            Self::ListContactGroups => "/ContactGroups".to_owned(),
            Self::GetContactGroup(id) => format!("/ContactGroups/{id}"),
            Self::ListInvoices | Self::CreateInvoices | Self::UpdateInvoices => {
                "/Invoices".to_owned()
            }
            Self::GetInvoice(id) => format!("/Invoices/{id}"),
            Self::ListCreditNotes | Self::CreateCreditNotes | Self::UpdateCreditNotes => {
                "/CreditNotes".to_owned()
            }
            Self::GetCreditNote(id) => format!("/CreditNotes/{id}"),
            Self::ListBankTransactions
            | Self::CreateBankTransactions
            | Self::UpdateBankTransactions => "/BankTransactions".to_owned(),
            Self::GetBankTransaction(id) => format!("/BankTransactions/{id}"),
            Self::ListManualJournals | Self::CreateManualJournals | Self::UpdateManualJournals => {
                "/ManualJournals".to_owned()
            }
            Self::GetManualJournal(id) => format!("/ManualJournals/{id}"),
            Self::ListPayments | Self::CreatePayments => "/Payments".to_owned(),
            Self::GetPayment(id) => format!("/Payments/{id}"),
            Self::ListAccounts | Self::CreateAccounts | Self::UpdateAccounts => {
                "/Accounts".to_owned()
            }
            Self::GetAccount(id) => format!("/Accounts/{id}"),
            Self::ListTaxRates => "/TaxRates".to_owned(),
            Self::ListItems | Self::CreateItems | Self::UpdateItems => "/Items".to_owned(),
            Self::GetItem(id) => format!("/Items/{id}"),
            Self::ListCurrencies => "/Currencies".to_owned(),
            Self::GetOrganisation => "/Organisation".to_owned(),
            Self::ListTrackingCategories => "/TrackingCategories".to_owned(),
            Self::ListPayrollCalendars => "/PayrollCalendars".to_owned(),
            Self::GetPayrollCalendar(id) => format!("/PayrollCalendars/{id}"),
            Self::ListPayRuns => "/PayRuns".to_owned(),
            Self::GetPayRun(id) => format!("/PayRuns/{id}"),
            Self::GetReport(name) => format!("/Reports/{name}"),
        }
    }
}

impl std::fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.signature())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_expose_signature_and_path() {
        let op = ApiOperation::ListInvoices;
        assert_eq!(op.signature(), "GET/Invoices");
        assert_eq!(op.path(), "/Invoices");

        let op = ApiOperation::GetInvoice("inv-1".to_owned());
        assert_eq!(op.signature(), "GET/Invoice");
        assert_eq!(op.path(), "/Invoices/inv-1");

        let op = ApiOperation::CreateContacts;
        assert_eq!(op.signature(), "PUT/Contacts");
        assert_eq!(op.path(), "/Contacts");
    }

    #[test]
    fn test_should_display_as_signature() {
        assert_eq!(ApiOperation::GetOrganisation.to_string(), "GET/Organisation");
    }
}
