//! Payment data models shared by the extractors and the payment store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::receipt::rules::dates::parse_payment_date;

/// One of the ten normalized payment attributes extracted from a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalFieldKey {
    TotalPaidAmount,
    PaymentMode,
    PaymentReason,
    PayerName,
    PayerAccountNo,
    PaymentDate,
    InvoiceNo,
    Status,
    CreditedPartyName,
    CreditedPartyAccountNo,
}

impl CanonicalFieldKey {
    /// All keys, in output order.
    pub const ALL: [CanonicalFieldKey; 10] = [
        CanonicalFieldKey::TotalPaidAmount,
        CanonicalFieldKey::PaymentMode,
        CanonicalFieldKey::PaymentReason,
        CanonicalFieldKey::PayerName,
        CanonicalFieldKey::PayerAccountNo,
        CanonicalFieldKey::PaymentDate,
        CanonicalFieldKey::InvoiceNo,
        CanonicalFieldKey::Status,
        CanonicalFieldKey::CreditedPartyName,
        CanonicalFieldKey::CreditedPartyAccountNo,
    ];

    /// Wire name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalFieldKey::TotalPaidAmount => "totalPaidAmount",
            CanonicalFieldKey::PaymentMode => "paymentMode",
            CanonicalFieldKey::PaymentReason => "paymentReason",
            CanonicalFieldKey::PayerName => "payerName",
            CanonicalFieldKey::PayerAccountNo => "payerAccountNo",
            CanonicalFieldKey::PaymentDate => "paymentDate",
            CanonicalFieldKey::InvoiceNo => "invoiceNo",
            CanonicalFieldKey::Status => "status",
            CanonicalFieldKey::CreditedPartyName => "creditedPartyName",
            CanonicalFieldKey::CreditedPartyAccountNo => "creditedPartyAccountNo",
        }
    }
}

impl std::fmt::Display for CanonicalFieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-shape result of a receipt extraction.
///
/// Every key is always present. Unmatched text fields hold an empty string;
/// `payment_date` holds the raw date text and is `None` when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalFieldSet {
    pub total_paid_amount: String,
    pub payment_mode: String,
    pub payment_reason: String,
    pub payer_name: String,
    pub payer_account_no: String,
    pub payment_date: Option<String>,
    pub invoice_no: String,
    pub status: String,
    pub credited_party_name: String,
    pub credited_party_account_no: String,
}

impl CanonicalFieldSet {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of a field; empty when unset.
    pub fn get(&self, key: CanonicalFieldKey) -> &str {
        match key {
            CanonicalFieldKey::TotalPaidAmount => &self.total_paid_amount,
            CanonicalFieldKey::PaymentMode => &self.payment_mode,
            CanonicalFieldKey::PaymentReason => &self.payment_reason,
            CanonicalFieldKey::PayerName => &self.payer_name,
            CanonicalFieldKey::PayerAccountNo => &self.payer_account_no,
            CanonicalFieldKey::PaymentDate => self.payment_date.as_deref().unwrap_or(""),
            CanonicalFieldKey::InvoiceNo => &self.invoice_no,
            CanonicalFieldKey::Status => &self.status,
            CanonicalFieldKey::CreditedPartyName => &self.credited_party_name,
            CanonicalFieldKey::CreditedPartyAccountNo => &self.credited_party_account_no,
        }
    }

    /// Whether a field holds a non-empty value.
    pub fn is_set(&self, key: CanonicalFieldKey) -> bool {
        !self.get(key).is_empty()
    }

    /// Overwrite a field unconditionally.
    pub fn set(&mut self, key: CanonicalFieldKey, value: impl Into<String>) {
        let value = value.into();
        match key {
            CanonicalFieldKey::TotalPaidAmount => self.total_paid_amount = value,
            CanonicalFieldKey::PaymentMode => self.payment_mode = value,
            CanonicalFieldKey::PaymentReason => self.payment_reason = value,
            CanonicalFieldKey::PayerName => self.payer_name = value,
            CanonicalFieldKey::PayerAccountNo => self.payer_account_no = value,
            CanonicalFieldKey::PaymentDate => {
                self.payment_date = if value.is_empty() { None } else { Some(value) };
            }
            CanonicalFieldKey::InvoiceNo => self.invoice_no = value,
            CanonicalFieldKey::Status => self.status = value,
            CanonicalFieldKey::CreditedPartyName => self.credited_party_name = value,
            CanonicalFieldKey::CreditedPartyAccountNo => self.credited_party_account_no = value,
        }
    }

    /// Set a field only if it is still empty. Returns true if the value was stored.
    pub fn fill(&mut self, key: CanonicalFieldKey, value: impl Into<String>) -> bool {
        if self.is_set(key) {
            return false;
        }
        self.set(key, value);
        true
    }

    /// True when no field holds a value.
    pub fn is_empty(&self) -> bool {
        CanonicalFieldKey::ALL.iter().all(|key| !self.is_set(*key))
    }

    /// Keys that are still unset.
    pub fn missing(&self) -> Vec<CanonicalFieldKey> {
        CanonicalFieldKey::ALL
            .into_iter()
            .filter(|key| !self.is_set(*key))
            .collect()
    }
}

/// Receipt layout a provider name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Commercial Bank of Ethiopia.
    Cbe,
    /// TeleBirr mobile money.
    TeleBirr,
    /// Any other provider name. Uses the TeleBirr layout.
    Default,
}

impl ProviderKind {
    /// Resolve a provider name. Unknown names map to `Default`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "CBE" => ProviderKind::Cbe,
            "TeleBirr" => ProviderKind::TeleBirr,
            _ => ProviderKind::Default,
        }
    }

    /// Layout whose extraction rules apply to this provider.
    pub fn layout(self) -> ProviderKind {
        match self {
            ProviderKind::Cbe => ProviderKind::Cbe,
            ProviderKind::TeleBirr | ProviderKind::Default => ProviderKind::TeleBirr,
        }
    }
}

/// A registered payment provider and its receipt URL template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Provider name, e.g. "CBE" or "TeleBirr".
    pub name: String,
    /// Base URL of the receipt verification page.
    pub url: String,
}

impl Provider {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        ProviderKind::from_name(&self.name)
    }

    /// Build the receipt page URL for a receipt identifier.
    pub fn receipt_url(&self, receipt_id: &str) -> String {
        match self.kind() {
            ProviderKind::Cbe => format!("{}?id={}", self.url, receipt_id),
            ProviderKind::TeleBirr | ProviderKind::Default => format!("{}{}", self.url, receipt_id),
        }
    }
}

/// A verified payment as persisted by a payment store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: Uuid,
    pub user_id: String,
    pub total_amount: String,
    pub payment_mode: String,
    pub payment_reason: String,
    pub payer_name: String,
    pub payer_account_no: String,
    /// Normalized payment date; `None` when the receipt date could not be parsed.
    pub payment_date: Option<DateTime<Utc>>,
    pub invoice_no: String,
    pub status: String,
    pub receiver_name: String,
    pub receiver_account_no: String,
    pub created_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Build a new record from extracted fields.
    pub fn from_fields(user_id: impl Into<String>, fields: &CanonicalFieldSet) -> Self {
        let payment_date = fields
            .payment_date
            .as_deref()
            .and_then(parse_payment_date)
            .map(|dt| dt.and_utc());

        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            total_amount: fields.total_paid_amount.clone(),
            payment_mode: fields.payment_mode.clone(),
            payment_reason: fields.payment_reason.clone(),
            payer_name: fields.payer_name.clone(),
            payer_account_no: fields.payer_account_no.clone(),
            payment_date,
            invoice_no: fields.invoice_no.clone(),
            status: fields.status.clone(),
            receiver_name: fields.credited_party_name.clone(),
            receiver_account_no: fields.credited_party_account_no.clone(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_set_serializes_all_keys() {
        let value = serde_json::to_value(CanonicalFieldSet::new()).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 10);
        for key in CanonicalFieldKey::ALL {
            assert!(obj.contains_key(key.as_str()), "missing {}", key);
        }
        assert!(obj["paymentDate"].is_null());
        assert_eq!(obj["payerName"], "");
    }

    #[test]
    fn test_fill_keeps_first_value() {
        let mut fields = CanonicalFieldSet::new();

        assert!(fields.fill(CanonicalFieldKey::PayerName, "Abebe"));
        assert!(!fields.fill(CanonicalFieldKey::PayerName, "Kebede"));
        assert_eq!(fields.payer_name, "Abebe");

        fields.set(CanonicalFieldKey::PayerName, "Kebede");
        assert_eq!(fields.payer_name, "Kebede");
    }

    #[test]
    fn test_empty_payment_date_stays_absent() {
        let mut fields = CanonicalFieldSet::new();
        fields.set(CanonicalFieldKey::PaymentDate, "");
        assert_eq!(fields.payment_date, None);
        assert!(fields.is_empty());

        fields.set(CanonicalFieldKey::PaymentDate, "06-11-2025 11:40:12");
        assert!(fields.is_set(CanonicalFieldKey::PaymentDate));
        assert_eq!(fields.missing().len(), 9);
    }

    #[test]
    fn test_provider_kind_resolution() {
        assert_eq!(ProviderKind::from_name("CBE"), ProviderKind::Cbe);
        assert_eq!(ProviderKind::from_name("TeleBirr"), ProviderKind::TeleBirr);
        assert_eq!(ProviderKind::from_name("cbe"), ProviderKind::Default);
        assert_eq!(ProviderKind::from_name("XYZ").layout(), ProviderKind::TeleBirr);
    }

    #[test]
    fn test_receipt_url() {
        let telebirr = Provider::new("TeleBirr", "https://transactioninfo.ethiotelecom.et/receipt/");
        assert_eq!(
            telebirr.receipt_url("CHQ0FJ403O"),
            "https://transactioninfo.ethiotelecom.et/receipt/CHQ0FJ403O"
        );

        let cbe = Provider::new("CBE", "https://apps.cbe.com.et:100/");
        assert_eq!(
            cbe.receipt_url("FT25311ABCDE12345678"),
            "https://apps.cbe.com.et:100/?id=FT25311ABCDE12345678"
        );

        let other = Provider::new("Awash", "https://example.com/r/");
        assert_eq!(other.receipt_url("42"), "https://example.com/r/42");
    }

    #[test]
    fn test_record_from_fields() {
        let mut fields = CanonicalFieldSet::new();
        fields.set(CanonicalFieldKey::TotalPaidAmount, "500.00 Birr");
        fields.set(CanonicalFieldKey::CreditedPartyName, "Selam Shop");
        fields.set(CanonicalFieldKey::PaymentDate, "06-11-2025 11:40:12");

        let record = PaymentRecord::from_fields("user-1", &fields);

        assert_eq!(record.user_id, "user-1");
        assert_eq!(record.total_amount, "500.00 Birr");
        assert_eq!(record.receiver_name, "Selam Shop");
        let expected = NaiveDate::from_ymd_opt(2025, 11, 6)
            .unwrap()
            .and_hms_opt(11, 40, 12)
            .unwrap()
            .and_utc();
        assert_eq!(record.payment_date, Some(expected));
    }

    #[test]
    fn test_record_unparseable_date_is_none() {
        let mut fields = CanonicalFieldSet::new();
        fields.set(CanonicalFieldKey::PaymentDate, "yesterday");

        let record = PaymentRecord::from_fields("user-1", &fields);
        assert_eq!(record.payment_date, None);
    }
}
