//! # Response Envelopes
//!
//! Parsing for the REST API's response envelopes.
//!
//! ## Envelope Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Server Response Shapes                             │
//! │                                                                         │
//! │  List endpoints (either shape, unwrapped defensively):                 │
//! │    { "data": { "data": [...], "pagination": {...} } }                  │
//! │    { "data": [...] }                                                   │
//! │    [...]                                                               │
//! │                                                                         │
//! │  Mutation endpoints:                                                   │
//! │    { "data": <entity>, "message": "Company created" }                  │
//! │                                                                         │
//! │  Single-record reads:                                                  │
//! │    { "data": <entity> }  or  <entity>                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All unwrapping happens here, once, so services and stores only ever see
//! precise types. The fallback order for lists is `data.data` → `data` → `[]`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Pagination
// =============================================================================

/// Server-reported paging cursor state for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// Returns true if a next page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

// =============================================================================
// Parsed Envelope Results
// =============================================================================

/// A parsed list response: the records plus pagination when the server sent it.
#[derive(Debug, Clone)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

/// A parsed mutation response: the affected record plus the server's message.
#[derive(Debug, Clone)]
pub struct Mutation<T> {
    pub data: T,
    pub message: String,
}

// =============================================================================
// Parsers
// =============================================================================

/// Parses a list payload, falling back through the known envelope shapes.
///
/// ## Fallback Order
/// 1. `payload.data.data` (nested envelope with pagination)
/// 2. `payload.data` (flat envelope)
/// 3. bare array
/// 4. anything else → empty list
///
/// Pagination is taken from whichever envelope level carries it.
pub fn parse_list<T: DeserializeOwned>(payload: Value) -> CoreResult<ListPage<T>> {
    let (raw_items, raw_pagination) = unwrap_list_shape(payload);

    let mut items = Vec::with_capacity(raw_items.len());
    for item in raw_items {
        items.push(decode::<T>(item)?);
    }

    let pagination = match raw_pagination {
        Some(p) => Some(decode::<Pagination>(p)?),
        None => None,
    };

    Ok(ListPage { items, pagination })
}

/// Parses a single-record read, unwrapping `{data}` when present.
pub fn parse_one<T: DeserializeOwned>(payload: Value) -> CoreResult<T> {
    match payload {
        Value::Object(mut map) if map.contains_key("data") => {
            // `data` existence checked just above
            decode::<T>(map.remove("data").unwrap_or(Value::Null))
        }
        other => decode::<T>(other),
    }
}

/// Parses a mutation response into `{data, message}`.
///
/// The `data` field is required; a missing `message` becomes the empty string
/// rather than an error, since some endpoints omit it.
pub fn parse_mutation<T: DeserializeOwned>(payload: Value) -> CoreResult<Mutation<T>> {
    let Value::Object(mut map) = payload else {
        return Err(CoreError::UnexpectedShape(
            "mutation response is not an object".to_string(),
        ));
    };

    let data = map
        .remove("data")
        .ok_or_else(|| CoreError::UnexpectedShape("mutation response has no `data`".to_string()))?;

    let message = match map.remove("message") {
        Some(Value::String(s)) => s,
        _ => String::new(),
    };

    Ok(Mutation {
        data: decode::<T>(data)?,
        message,
    })
}

/// Pulls the raw item array and pagination value out of any list shape.
fn unwrap_list_shape(payload: Value) -> (Vec<Value>, Option<Value>) {
    match payload {
        // Bare array, no envelope at all.
        Value::Array(items) => (items, None),
        Value::Object(mut map) => {
            let pagination_outer = map.remove("pagination");
            match map.remove("data") {
                // Flat envelope: { data: [...], pagination? }
                Some(Value::Array(items)) => (items, pagination_outer),
                // Nested envelope: { data: { data: [...], pagination? } }
                Some(Value::Object(mut inner)) => {
                    let pagination = inner.remove("pagination").or(pagination_outer);
                    match inner.remove("data") {
                        Some(Value::Array(items)) => (items, pagination),
                        _ => (Vec::new(), pagination),
                    }
                }
                _ => (Vec::new(), pagination_outer),
            }
        }
        _ => (Vec::new(), None),
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> CoreResult<T> {
    serde_json::from_value(value).map_err(|e| CoreError::Decode {
        entity: std::any::type_name::<T>(),
        reason: e.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Row {
        id: i64,
        name: String,
    }

    #[test]
    fn test_parse_list_nested_envelope() {
        let payload = json!({
            "data": {
                "data": [{"id": 1, "name": "a"}, {"id": 2, "name": "b"}],
                "pagination": {"page": 1, "limit": 10, "total": 2, "totalPages": 1}
            }
        });

        let page = parse_list::<Row>(payload).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, 1);
        let p = page.pagination.unwrap();
        assert_eq!(p.total, 2);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next());
    }

    #[test]
    fn test_parse_list_flat_envelope() {
        let payload = json!({"data": [{"id": 3, "name": "c"}]});
        let page = parse_list::<Row>(payload).unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.pagination.is_none());
    }

    #[test]
    fn test_parse_list_bare_array() {
        let payload = json!([{"id": 4, "name": "d"}]);
        let page = parse_list::<Row>(payload).unwrap();
        assert_eq!(page.items[0].id, 4);
    }

    #[test]
    fn test_parse_list_unknown_shape_is_empty() {
        let page = parse_list::<Row>(json!({"status": "ok"})).unwrap();
        assert!(page.items.is_empty());
        assert!(page.pagination.is_none());
    }

    #[test]
    fn test_parse_mutation() {
        let payload = json!({
            "data": {"id": 7, "name": "Acme"},
            "message": "Company created"
        });
        let m = parse_mutation::<Row>(payload).unwrap();
        assert_eq!(m.data.id, 7);
        assert_eq!(m.message, "Company created");
    }

    #[test]
    fn test_parse_mutation_without_message() {
        let m = parse_mutation::<Row>(json!({"data": {"id": 1, "name": "x"}})).unwrap();
        assert_eq!(m.message, "");
    }

    #[test]
    fn test_parse_mutation_missing_data_is_error() {
        let err = parse_mutation::<Row>(json!({"message": "ok"})).unwrap_err();
        assert!(err.to_string().contains("no `data`"));
    }

    #[test]
    fn test_parse_one_wrapped_and_bare() {
        let wrapped = parse_one::<Row>(json!({"data": {"id": 9, "name": "w"}})).unwrap();
        assert_eq!(wrapped.id, 9);

        let bare = parse_one::<Row>(json!({"id": 10, "name": "b"})).unwrap();
        assert_eq!(bare.id, 10);
    }
}
