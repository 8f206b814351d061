//! Bulk product import.
//!
//! Import input is a JSON array of loosely typed objects. Each object needs
//! `title`, `price` and `description`; `category`, `image`, `stock` and
//! `vendor` are optional. Objects that lack a required field are skipped
//! rather than failing the batch.

use crate::catalog::product::{IMPORT_DEFAULT_STOCK, IMPORT_VENDOR};
use crate::catalog::ProductDraft;
use crate::error::CommerceError;
use serde_json::Value;

/// Parse import text into its records.
///
/// Fails with `ImportParseError` if the text is not JSON and with
/// `ImportShapeError` if the top-level value is not an array.
pub fn parse_import(text: &str) -> Result<Vec<Value>, CommerceError> {
    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| CommerceError::ImportParseError(e.to_string()))?;
    match value {
        Value::Array(records) => Ok(records),
        other => Err(CommerceError::ImportShapeError(json_kind(&other).to_string())),
    }
}

/// Turn one import record into a draft, or `None` if it must be skipped.
pub fn draft_from_record(record: &Value) -> Option<ProductDraft> {
    let object = record.as_object()?;

    let title = text_field(object.get("title"))?;
    let description = text_field(object.get("description"))?;
    let price = match object.get("price") {
        None | Some(Value::Null) => return None,
        Some(value) => number(value).unwrap_or(0.0),
    };

    let stock = object
        .get("stock")
        .and_then(number)
        .map(|s| s.trunc() as i64)
        .unwrap_or(i64::from(IMPORT_DEFAULT_STOCK));

    Some(ProductDraft {
        title,
        description,
        price,
        category: text_field(object.get("category")),
        image: text_field(object.get("image")),
        stock,
        vendor: text_field(object.get("vendor")).or_else(|| Some(IMPORT_VENDOR.to_string())),
    })
}

fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a number from a JSON number or a numeric string.
fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
