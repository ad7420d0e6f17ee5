use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

// Every successful response uses the same envelope the error layer emits on
// failure: { success, message?, data? }.

pub fn ok<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

pub fn ok_message(message: &str) -> Json<Value> {
    Json(json!({ "success": true, "message": message }))
}
