//! JSON response envelope.
//!
//! Every success body has the shape `{ "msg", "data", "meta" }`; `data` and
//! `meta` are `null` when there is nothing to return.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

use catalog_core::{Page, PageRequest};

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T, M = ()> {
    pub msg: &'static str,
    pub data: Option<T>,
    pub meta: Option<M>,
}

/// Pagination metadata for list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListMeta {
    pub limit: u32,
    pub total_this_page: usize,
    pub next_cursor: String,
}

pub type ApiResponse<T, M = ()> = Json<Envelope<T, M>>;

#[must_use]
pub const fn ok<T>(msg: &'static str, data: T) -> ApiResponse<T> {
    Json(Envelope {
        msg,
        data: Some(data),
        meta: None,
    })
}

#[must_use]
pub const fn created<T>(msg: &'static str, data: T) -> (StatusCode, ApiResponse<T>) {
    (StatusCode::CREATED, ok(msg, data))
}

/// A response with neither data nor meta.
#[must_use]
pub const fn message(msg: &'static str) -> ApiResponse<()> {
    Json(Envelope {
        msg,
        data: None,
        meta: None,
    })
}

#[must_use]
pub fn page<T>(msg: &'static str, request: &PageRequest, page: Page<T>) -> ApiResponse<Vec<T>, ListMeta> {
    let meta = ListMeta {
        limit: request.limit().get(),
        total_this_page: page.len(),
        next_cursor: page.next_cursor,
    };

    Json(Envelope {
        msg,
        data: Some(page.items),
        meta: Some(meta),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;

    #[test]
    fn test_message_serializes_nulls() {
        let Json(body) = message("delete product success");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["msg"], "delete product success");
        assert!(json["data"].is_null());
        assert!(json["meta"].is_null());
    }

    #[test]
    fn test_page_meta() {
        let request = PageRequest::first(NonZeroU32::new(2).unwrap());
        let items = Page {
            items: vec!["a", "b"],
            next_cursor: "AAAAAAAAAAEAAAAA".to_string(),
        };

        let Json(body) = page("get all products success", &request, items);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["data"], serde_json::json!(["a", "b"]));
        assert_eq!(json["meta"]["limit"], 2);
        assert_eq!(json["meta"]["total_this_page"], 2);
        assert_eq!(json["meta"]["next_cursor"], "AAAAAAAAAAEAAAAA");
    }
}
