//! Stateless HTTP request builder and response parser for the todoman API.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, PatchTodo, Todo, TodoEnvelope, TodosEnvelope};

/// Synchronous, stateless client for the todoman API.
///
/// The caller executes the HTTP round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, format!("{}/todos", self.base_url), input)
    }

    /// `id` is sent as-is; malformed ids come back as `ApiError::NotFound`.
    pub fn build_patch_todo(&self, id: &str, input: &PatchTodo) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Patch, format!("{}/todos/{id}", self.base_url), input)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_ok::<TodosEnvelope>(response).map(|envelope| envelope.todos)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_ok::<TodoEnvelope>(response).map(|envelope| envelope.todo)
    }

    pub fn parse_patch_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_ok::<TodoEnvelope>(response).map(|envelope| envelope.todo)
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Every successful todoman response is a 200 with a JSON envelope.
fn parse_ok<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    if response.status != 200 {
        return Err(ApiError::from_response(response.status, &response.body));
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
