//! Per-recipient email records

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a single email item within a send job
///
/// The page emits database ids, so both JSON strings and integers are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EmailId(String);

impl EmailId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmailId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EmailId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'de> Deserialize<'de> for EmailId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EmailIdVisitor;

        impl Visitor<'_> for EmailIdVisitor {
            type Value = EmailId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer email id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<EmailId, E> {
                Ok(EmailId::new(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<EmailId, E> {
                Ok(EmailId(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<EmailId, E> {
                Ok(EmailId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<EmailId, E> {
                Ok(EmailId(v.to_string()))
            }
        }

        deserializer.deserialize_any(EmailIdVisitor)
    }
}

/// Delivery state of one recipient as reported by the send job
///
/// The server leaves `email`, `fullName` and `retries` null for recipients
/// without a profile name or attempt yet; null reads as empty / zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRecord {
    pub email_id: EmailId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub retries: u32,
    #[serde(default)]
    pub last_error: Option<String>,
}

impl EmailRecord {
    /// Creates a record with no address details, as used for bare ids
    pub fn with_id(email_id: impl Into<EmailId>) -> Self {
        Self {
            email_id: email_id.into(),
            email: String::new(),
            full_name: String::new(),
            retries: 0,
            last_error: None,
        }
    }
}

/// Deserializes `null` as the type's default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Entry of the `successful` list
///
/// The page only sends the id for delivered emails; a full record is
/// accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Delivered {
    Record(EmailRecord),
    Id(EmailId),
}

impl Delivered {
    pub fn email_id(&self) -> &EmailId {
        match self {
            Delivered::Record(record) => &record.email_id,
            Delivered::Id(id) => id,
        }
    }
}

impl From<EmailRecord> for Delivered {
    fn from(record: EmailRecord) -> Self {
        Delivered::Record(record)
    }
}
