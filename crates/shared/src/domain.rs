use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-collection metadata the store needs to mint new records.
pub trait RecordKind: Clone + Send + Sync + 'static {
    /// Prepended to the millisecond timestamp that forms a record id.
    const ID_PREFIX: &'static str;
    /// Status a freshly created record starts with.
    const INITIAL_STATUS: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactUrgency {
    Urgent,
    #[default]
    Normal,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingUrgency {
    Urgent,
    #[default]
    Normal,
    Flexible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationType {
    Phone,
    Video,
    #[serde(rename = "inperson")]
    InPerson,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
    #[serde(default)]
    pub urgency: ContactUrgency,
}

impl RecordKind for ContactForm {
    const ID_PREFIX: &'static str = "";
    const INITIAL_STATUS: &'static str = "new";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub consultation_type: ConsultationType,
    pub preferred_date: String,
    pub preferred_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub urgency: BookingUrgency,
    pub agree_to_terms: bool,
}

impl RecordKind for BookingForm {
    const ID_PREFIX: &'static str = "BK";
    const INITIAL_STATUS: &'static str = "pending";
}

/// A stored intake record. Only `status` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: String,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub data: T,
    pub status: String,
}

/// UTC with exactly three fractional digits, e.g. `2024-06-12T09:30:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}

pub type ContactSubmission = Record<ContactForm>;
pub type Booking = Record<BookingForm>;
