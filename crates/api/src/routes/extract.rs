//! Extractors whose rejections render as `{ "msg" }` 400 responses.

use axum::extract::{FromRequest, FromRequestParts};
use serde::Deserialize;

use catalog_core::{PageRequest, Price};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Path parameters; IDs that are not UUIDs are rejected here.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

/// Query string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

/// `?limit=&cursor=` for list endpoints. There is no default limit.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    #[serde(default)]
    pub cursor: String,
}

impl ListParams {
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if `limit` is missing or not positive.
    pub fn into_page_request(self) -> Result<PageRequest, AppError> {
        let limit = self
            .limit
            .ok_or_else(|| AppError::BadRequest("limit is required".to_string()))?;
        Ok(PageRequest::new(limit, self.cursor)?)
    }
}

/// Reject blank names and prices the datastore cannot hold exactly before
/// they reach a service.
///
/// # Errors
///
/// Returns `AppError::BadRequest` describing the first invalid field.
pub fn validate_fields(name: &str, price: Option<Price>) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    if let Some(price) = price {
        price
            .check_storable()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_require_limit() {
        let params = ListParams {
            limit: None,
            cursor: String::new(),
        };
        assert!(matches!(params.into_page_request(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_list_params_reject_non_positive_limit() {
        for limit in [0, -5] {
            let params = ListParams {
                limit: Some(limit),
                cursor: String::new(),
            };
            assert!(matches!(params.into_page_request(), Err(AppError::BadRequest(_))));
        }
    }

    #[test]
    fn test_list_params_keep_cursor() {
        let params = ListParams {
            limit: Some(10),
            cursor: "abc".to_string(),
        };
        let request = params.into_page_request();
        assert!(request.is_ok_and(|r| r.limit().get() == 10 && r.cursor() == "abc"));
    }

    #[test]
    fn test_validate_fields() {
        assert!(validate_fields("Mug", Some(Price::from_cents(1999))).is_ok());
        assert!(validate_fields("Mug", Some(Price::from_cents(0))).is_ok());
        assert!(validate_fields("color", None).is_ok());
        assert!(validate_fields("   ", None).is_err());
        assert!(validate_fields("Mug", Some(Price::from_cents(-1))).is_err());
    }

    #[test]
    fn test_validate_fields_rejects_unstorable_prices() {
        let sub_cent = Price::new("19.999".parse().unwrap_or_default());
        assert!(matches!(
            validate_fields("Mug", Some(sub_cent)),
            Err(AppError::BadRequest(msg)) if msg == "price must have at most 2 decimal places"
        ));

        let huge = Price::from_cents(1_000_000_000_000);
        assert!(matches!(
            validate_fields("Mug", Some(huge)),
            Err(AppError::BadRequest(msg)) if msg == "price must be less than 10000000000"
        ));
    }
}
