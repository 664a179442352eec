//! Customer Data Model
//!
//! Wire types shared by the loader, the form controller and the views.
//! All JSON keys are camelCase to match the customers API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A customer record as returned by `GET /api/customers`.
///
/// The email doubles as the list key. Uniqueness is enforced by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

impl Customer {
    /// Name shown in the customer list.
    ///
    /// A non-empty business name wins; otherwise "first last".
    pub fn display_name(&self) -> String {
        match self.business_name.as_deref() {
            Some(business) if !business.is_empty() => business.to_string(),
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// Key used to identify the row in list views
    pub fn key(&self) -> &str {
        &self.email
    }
}

/// In-progress customer being edited in the create dialog.
///
/// Every field is optional; absent fields are left out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

impl Draft {
    /// Draft with every field set to the empty string, the state of a freshly
    /// opened dialog.
    pub fn blank() -> Self {
        Self {
            first_name: Some(String::new()),
            last_name: Some(String::new()),
            email: Some(String::new()),
            business_name: Some(String::new()),
        }
    }

    /// Current value of a field, empty when unset
    pub fn get(&self, field: Field) -> &str {
        let value = match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::BusinessName => &self.business_name,
        };
        value.as_deref().unwrap_or("")
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::BusinessName => &mut self.business_name,
        };
        *slot = Some(value.into());
    }
}

/// Editable customer fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    BusinessName,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::BusinessName,
    ];

    /// JSON key used by the API
    pub fn key(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::BusinessName => "businessName",
        }
    }

    /// Human-readable label for form inputs
    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::BusinessName => "Business Name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error body returned by the API on a non-2xx response.
///
/// Decoding never fails on field types: a numeric or `null` code is kept as
/// text, and a `message` that is not a string reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, deserialize_with = "code_text")]
    pub code: String,
    #[serde(default, deserialize_with = "message_text")]
    pub message: String,
}

fn code_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(code) => code,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn message_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(message) => message,
        _ => String::new(),
    })
}

impl ApiError {
    /// Decode an error response body.
    ///
    /// Returns `None` for bodies that are not a JSON object, so callers can
    /// fall back to a generic message.
    pub fn from_body(body: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(body).ok()? {
            value @ Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }

    /// The message, if the backend sent a non-empty one
    pub fn message(&self) -> Option<&str> {
        Some(self.message.as_str()).filter(|m| !m.is_empty())
    }
}
