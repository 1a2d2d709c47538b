use async_trait::async_trait;
use serde_json::Value;

use super::ApiError;

/// JSON transport to the clinic REST backend.
///
/// Paths are relative to the backend's base URL, e.g. `/api/pacientes/7`.
/// An empty response body is returned as `Value::Null`.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value, ApiError>;

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn patch(&self, path: &str, body: Option<&Value>) -> Result<Value, ApiError>;

    async fn delete(&self, path: &str) -> Result<Value, ApiError>;
}
