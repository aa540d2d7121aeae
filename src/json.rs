// SPDX-License-Identifier: MPL-2.0

//! The `{"kind": ..., "data": ...}` serialization contract shared by every
//! composite and atom in the crate (§6). This is deliberately independent of
//! the optional `serde` feature: `to_json`/`from_json` are always available,
//! while `#[derive(Serialize, Deserialize)]` (gated behind `serde`) is an
//! additional convenience for consumers that want direct, non-tagged serde
//! integration.

use crate::error::{Error, Result};
use serde_json::{json, Value};

/// A value that can be losslessly turned into a tagged JSON document and
/// reconstructed from one: `from_json(v.to_json()) == v` for every `v`.
pub trait ToJson {
    fn to_json(&self) -> Value;
}

pub trait FromJson: Sized {
    fn from_json(value: &Value) -> Result<Self>;
}

/// Builds the `{"kind": kind, "data": data}` envelope every type in this
/// crate uses.
pub fn envelope(kind: &str, data: Value) -> Value {
    json!({ "kind": kind, "data": data })
}

/// Extracts and checks the `"kind"` tag of an envelope, returning the `"data"`
/// field on success.
pub fn expect_kind<'a>(value: &'a Value, expected: &str) -> Result<&'a Value> {
    let kind = value
        .get("kind")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Json {
            message: "missing or non-string \"kind\" field".to_string(),
        })?;
    if kind != expected {
        return Err(Error::Json {
            message: format!("expected kind \"{expected}\", found \"{kind}\""),
        });
    }
    value.get("data").ok_or_else(|| Error::Json {
        message: "missing \"data\" field".to_string(),
    })
}

/// Reads a required `f64` field out of a JSON object.
pub fn field_f64(value: &Value, field: &str) -> Result<f64> {
    value
        .get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| Error::Json {
            message: format!("missing or non-numeric field \"{field}\""),
        })
}

/// Reads a required string field out of a JSON object.
pub fn field_str<'a>(value: &'a Value, field: &str) -> Result<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Json {
            message: format!("missing or non-string field \"{field}\""),
        })
}

/// Reads a required array field out of a JSON object.
pub fn field_array<'a>(value: &'a Value, field: &str) -> Result<&'a Vec<Value>> {
    value
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Json {
            message: format!("missing or non-array field \"{field}\""),
        })
}
