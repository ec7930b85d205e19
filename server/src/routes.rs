//! HTTP handlers for `/items`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{FromRequest, Path, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, StoreError};
use crate::store::{Item, ItemPatch, ItemStore, NewItem};

pub type SharedStore = Arc<ItemStore>;

pub async fn list_items(State(store): State<SharedStore>) -> Json<Vec<Item>> {
    Json(store.list().await)
}

pub async fn create_item(
    State(store): State<SharedStore>,
    Payload(input): Payload<NewItem>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = store.create(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get_item(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let id = lookup_id(&raw_id)?;
    Ok(Json(store.get(id).await?))
}

pub async fn update_item(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
    Payload(patch): Payload<ItemPatch>,
) -> Result<Json<Item>, ApiError> {
    let id = lookup_id(&raw_id)?;
    Ok(Json(store.update(id, patch).await?))
}

pub async fn delete_item(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = lookup_id(&raw_id)?;
    store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Parse a path identifier the lenient way: skip leading whitespace, accept
/// an optional sign, then read the leading decimal digits and ignore the
/// rest. Returns `None` when there are no digits, or the value is negative
/// or does not fit.
pub fn parse_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse().ok()
}

// An identifier that cannot be parsed matches nothing.
fn lookup_id(raw: &str) -> Result<u64, StoreError> {
    parse_id(raw).ok_or_else(|| {
        tracing::debug!(raw, "unparseable item id");
        StoreError::NotFound
    })
}

/// JSON request body that falls back to `T::default()` when the request
/// carries no JSON: no JSON content type, or an empty or blank body.
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;

        if !is_json || bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Self(T::default()));
        }
        let Json(value) = Json::<T>::from_bytes(&bytes)
            .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
        Ok(Self(value))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json") || essence.ends_with("+json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_reads_plain_numbers() {
        assert_eq!(parse_id("1"), Some(1));
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("007"), Some(7));
    }

    #[test]
    fn parse_id_ignores_trailing_text() {
        assert_eq!(parse_id("12abc"), Some(12));
        assert_eq!(parse_id("3.5"), Some(3));
        assert_eq!(parse_id("  +9"), Some(9));
    }

    #[test]
    fn parse_id_rejects_non_numeric() {
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("+"), None);
        assert_eq!(parse_id("99999999999999999999999"), None);
    }

    #[test]
    fn json_content_type_detection() {
        let mut headers = HeaderMap::new();
        assert!(!has_json_content_type(&headers));

        headers.insert(CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        assert!(has_json_content_type(&headers));

        headers.insert(CONTENT_TYPE, "application/merge-patch+json".parse().unwrap());
        assert!(has_json_content_type(&headers));

        headers.insert(CONTENT_TYPE, "text/plain".parse().unwrap());
        assert!(!has_json_content_type(&headers));
    }

    #[test]
    fn lookup_id_maps_failure_to_not_found() {
        assert_eq!(lookup_id("nope").unwrap_err(), StoreError::NotFound);
        assert_eq!(lookup_id("5").unwrap(), 5);
    }
}
