//! Paginated response decoding
//!
//! The API answers list calls in one of two shapes: an envelope
//! `{"data": [...], "pagination": {"next": ...}}` or a bare JSON array.
//! Decoding is an explicit tagged union so every shape is handled
//! exhaustively instead of duck-typed inline.

use serde_json::Value;

/// Opaque token or id used to request the next page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// Numeric record id.
    Id(i64),
    /// Opaque string token.
    Token(String),
}

impl Cursor {
    /// Returns the cursor as a query-parameter value.
    #[must_use]
    pub fn as_query_value(&self) -> Value {
        match self {
            Self::Id(id) => Value::from(*id),
            Self::Token(token) => Value::from(token.clone()),
        }
    }

    /// Extracts a cursor from a JSON value, if it is an id or a
    /// non-empty string.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Id),
            Value::String(s) if !s.is_empty() => Some(Self::Token(s.clone())),
            _ => None,
        }
    }
}

/// One decoded page of a list response.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    /// Envelope shape: records plus an explicit next-page cursor.
    Envelope {
        /// Records on this page.
        items: Vec<Value>,
        /// Cursor for the next page; absent on the last page.
        next: Option<Cursor>,
    },
    /// Bare array of records with no pagination metadata.
    BareArray(Vec<Value>),
    /// Anything else; pagination stops here.
    Unrecognized,
}

impl Page {
    /// Decodes a response body into a page shape.
    #[must_use]
    pub fn decode(value: &Value) -> Self {
        if let Value::Array(items) = value {
            return Self::BareArray(items.clone());
        }

        if let Some(Value::Array(items)) = value.get("data") {
            let next = value
                .get("pagination")
                .and_then(|pagination| pagination.get("next"))
                .and_then(Cursor::from_value);
            return Self::Envelope {
                items: items.clone(),
                next,
            };
        }

        Self::Unrecognized
    }

    /// Cursor inferred from the last record's `id` field.
    ///
    /// Used by the full-page heuristic when a bare array carries no
    /// pagination metadata.
    #[must_use]
    pub fn last_id_cursor(items: &[Value]) -> Option<Cursor> {
        items
            .last()
            .and_then(|item| item.get("id"))
            .and_then(Cursor::from_value)
    }
}
