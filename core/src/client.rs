//! Stateless HTTP request builder and response parser for the item API.
//!
//! # Design
//! `ItemClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ErrorBody, Item, ItemPatch, NewItem};

/// Synchronous, stateless client for the item API.
#[derive(Debug, Clone)]
pub struct ItemClient {
    base_url: String,
}

impl ItemClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_items(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/items")
    }

    pub fn build_get_item(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/items/{id}"))
    }

    pub fn build_create_item(&self, input: &NewItem) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/items", input)
    }

    pub fn build_update_item(&self, id: u64, input: &ItemPatch) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, &format!("/items/{id}"), input)
    }

    pub fn build_delete_item(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/items/{id}"))
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<Item>, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        check_status(&response, 201)?;
        decode(&response.body)
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut request = self.request(method, path);
        request
            .headers
            .push(("content-type".to_string(), "application/json".to_string()));
        request.body = Some(body);
        Ok(request)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        400 => {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .map(|body| body.error)
                .unwrap_or_else(|_| response.body.clone());
            Err(ApiError::Validation(message))
        }
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ItemClient {
        ItemClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_items_produces_correct_request() {
        let req = client().build_list_items();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/items");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_item_produces_correct_request() {
        let req = client().build_get_item(7);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/items/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_item_produces_correct_request() {
        let input = NewItem {
            name: "A".to_string(),
            description: "B".to_string(),
        };
        let req = client().build_create_item(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/items");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"name": "A", "description": "B"}));
    }

    #[test]
    fn build_update_item_omits_absent_fields() {
        let input = ItemPatch {
            name: None,
            description: Some("C".to_string()),
        };
        let req = client().build_update_item(1, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/items/1");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["description"], "C");
        assert!(body.get("name").is_none());
    }

    #[test]
    fn build_delete_item_produces_correct_request() {
        let req = client().build_delete_item(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/items/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ItemClient::new("http://localhost:3000/");
        assert_eq!(client.build_list_items().path, "http://localhost:3000/items");
    }

    #[test]
    fn parse_list_items_success() {
        let resp = response(200, r#"[{"id":1,"name":"A","description":"B"}]"#);
        let items = client().parse_list_items(resp).unwrap();
        assert_eq!(
            items,
            vec![Item {
                id: 1,
                name: "A".to_string(),
                description: "B".to_string()
            }]
        );
    }

    #[test]
    fn parse_list_items_bad_json() {
        let err = client().parse_list_items(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_get_item_not_found() {
        let resp = response(404, r#"{"error":"Item not found"}"#);
        let err = client().parse_get_item(resp).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_item_success() {
        let resp = response(201, r#"{"id":1,"name":"A","description":"B"}"#);
        let item = client().parse_create_item(resp).unwrap();
        assert_eq!(item.id, 1);
        assert_eq!(item.name, "A");
    }

    #[test]
    fn parse_create_item_validation_error_carries_message() {
        let resp = response(400, r#"{"error":"Name and description are required"}"#);
        match client().parse_create_item(resp).unwrap_err() {
            ApiError::Validation(message) => {
                assert_eq!(message, "Name and description are required")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_create_item_wrong_status() {
        let err = client()
            .parse_create_item(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_update_item_success() {
        let resp = response(200, r#"{"id":1,"name":"A","description":"C"}"#);
        let item = client().parse_update_item(resp).unwrap();
        assert_eq!(item.description, "C");
    }

    #[test]
    fn parse_delete_item_success() {
        assert!(client().parse_delete_item(response(204, "")).is_ok());
    }

    #[test]
    fn parse_delete_item_not_found() {
        let err = client().parse_delete_item(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }
}
