//! Customer resource types.
//!
//! The client treats a customer as opaque: apart from its id, fields are
//! carried as raw JSON and sent back exactly as they were given.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Keys under which the service and its clients send the customer id.
const ID_KEYS: [&str; 2] = ["id", "Id"];

/// Identifier assigned to a customer by the service.
///
/// The service hands out integer ids, but textual ids are accepted too.
/// Any form serializes back the way it was read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerId {
    /// Numeric id (the service default).
    Number(i64),
    /// Textual id.
    Text(String),
    /// Any other JSON number (floats, values beyond `i64`), kept as sent.
    Other(Number),
}

impl CustomerId {
    /// Whether this id would produce an empty path segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Number(n) => Value::from(*n),
            Self::Text(s) => Value::String(s.clone()),
            Self::Other(n) => Value::Number(n.clone()),
        }
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Other(n) => write!(f, "{n}"),
        }
    }
}

impl From<i64> for CustomerId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<i32> for CustomerId {
    fn from(id: i32) -> Self {
        Self::Number(i64::from(id))
    }
}

impl From<String> for CustomerId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl From<&str> for CustomerId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// A customer record.
///
/// Only `id` is interpreted. Every other field lives in `fields` and is
/// neither validated nor reshaped. Go through [`Customer::set`] rather than
/// inserting into `fields` directly, so an `id` key lands in `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Service-assigned id. Absent on customers that have not been created yet.
    #[serde(default, alias = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerId>,

    /// All remaining fields, verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Customer {
    /// Create an empty customer with no id.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the id (builder style).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<CustomerId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set a field (builder style).
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Look up a field by name. Use [`Customer::id`] for the identifier.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a field, returning the previous value if there was one.
    ///
    /// `id` and `Id` set the identifier when the value is a string, a
    /// number or `null`; any other value is stored as a plain field.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();

        if ID_KEYS.contains(&name.as_str()) {
            if let Ok(id) = serde_json::from_value::<Option<CustomerId>>(value.clone()) {
                return std::mem::replace(&mut self.id, id).map(|previous| previous.to_json());
            }
        }

        self.fields.insert(name, value)
    }

    /// JSON body sent to the service on create and update.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut body = self.fields.clone();
        if let Some(id) = &self.id {
            body.insert("id".to_string(), id.to_json());
        }
        Value::Object(body)
    }
}

/// Error body returned by the customers service on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Request path that failed.
    pub path: String,
    /// Human-readable reason. The service sends `null` when the failing
    /// exception carried no message.
    #[serde(default)]
    pub message: Option<String>,
    /// HTTP status code echoed by the service.
    pub status_code: u16,
    /// Server-local timestamp of the failure.
    #[serde(default)]
    pub local_date_time: Option<String>,
}
