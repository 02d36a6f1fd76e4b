//! Public types for the toasts API
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct ToastsResponse {
    pub ok: bool,
    pub items: Vec<Value>,
}
