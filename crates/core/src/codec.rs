//! JSON wire codec for expressions.
//!
//! An expression serializes as an object carrying a `"type"` discriminant
//! plus the fields of that variant:
//!
//! ```json
//! { "type": "string", "value": "admin" }
//! { "type": "int",    "value": 42 }
//! { "type": "float",  "value": 42.5 }
//! { "type": "bool",   "value": true }
//! { "type": "ident",  "value": "userType" }
//! { "type": "binary", "op": "==", "left": { ... }, "right": { ... } }
//! { "type": "unary",  "op": "!", "expr": { ... } }
//! ```
//!
//! Decoding reads `"type"` first and dispatches to the matching variant's
//! fields. Unlike evaluation, which degrades silently, a missing or
//! unrecognized tag here is a hard [`DecodeError`]: stored rules with a bad
//! shape must fail loudly rather than quietly evaluate to something else.
//!
//! [`Serialize`]/[`Deserialize`] impls for [`Expr`] and [`BinOp`] are
//! defined here on top of [`expr_to_json`]/[`expr_from_json`], so rule and
//! toggle records can simply derive.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value as Json};

use crate::expr::{BinOp, Expr, UnaryOp};
use crate::value::Value;

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Errors while decoding an expression from its JSON wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The encoded expression is not a JSON object.
    NotAnObject,
    /// The `"type"` discriminant is absent or not a string.
    MissingTag,
    /// The `"type"` discriminant names no known variant.
    UnknownTag { tag: String },
    /// A field required by the tagged variant is absent or mistyped.
    InvalidField {
        tag: &'static str,
        field: &'static str,
    },
    /// An operator string is not valid for the tagged variant.
    InvalidOp { tag: &'static str, op: String },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::NotAnObject => {
                write!(f, "expression must be a JSON object")
            }
            DecodeError::MissingTag => {
                write!(f, "expression is missing the 'type' field")
            }
            DecodeError::UnknownTag { tag } => {
                write!(f, "unknown expression type '{}'", tag)
            }
            DecodeError::InvalidField { tag, field } => {
                write!(f, "{} expression has a missing or invalid '{}'", tag, field)
            }
            DecodeError::InvalidOp { tag, op } => {
                write!(f, "invalid {} operator '{}'", tag, op)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

// ──────────────────────────────────────────────
// Encoding
// ──────────────────────────────────────────────

/// Encode an expression into its JSON wire form.
pub fn expr_to_json(expr: &Expr) -> Json {
    match expr {
        Expr::Literal(value) => {
            let val = match value {
                Value::Str(s) => json!(s),
                Value::Int(n) => json!(n),
                Value::Float(n) => json!(n),
                Value::Bool(b) => json!(b),
            };
            json!({ "type": value.kind(), "value": val })
        }
        Expr::Ident(name) => json!({ "type": "ident", "value": name }),
        Expr::Binary { left, right, op } => json!({
            "type": "binary",
            "op": op.as_str(),
            "left": expr_to_json(left),
            "right": expr_to_json(right),
        }),
        Expr::Unary { expr, op } => json!({
            "type": "unary",
            "op": op.as_str(),
            "expr": expr_to_json(expr),
        }),
    }
}

// ──────────────────────────────────────────────
// Decoding
// ──────────────────────────────────────────────

/// Decode an expression from its JSON wire form.
///
/// The `"type"` tag is read first; exactly the matching variant's fields
/// are then required. Structural identity with the encoder's input is not
/// guaranteed, but evaluation results are.
pub fn expr_from_json(raw: &Json) -> Result<Expr, DecodeError> {
    let obj = raw.as_object().ok_or(DecodeError::NotAnObject)?;
    let tag = obj
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or(DecodeError::MissingTag)?;

    match tag {
        "string" => {
            let v = field_str(obj, "string", "value")?;
            Ok(Expr::Literal(Value::Str(v)))
        }
        "int" => {
            let v = obj
                .get("value")
                .and_then(|v| v.as_i64())
                .ok_or(DecodeError::InvalidField {
                    tag: "int",
                    field: "value",
                })?;
            Ok(Expr::Literal(Value::Int(v)))
        }
        "float" => {
            let v = obj
                .get("value")
                .and_then(|v| v.as_f64())
                .ok_or(DecodeError::InvalidField {
                    tag: "float",
                    field: "value",
                })?;
            Ok(Expr::Literal(Value::Float(v)))
        }
        "bool" => {
            let v = obj
                .get("value")
                .and_then(|v| v.as_bool())
                .ok_or(DecodeError::InvalidField {
                    tag: "bool",
                    field: "value",
                })?;
            Ok(Expr::Literal(Value::Bool(v)))
        }
        "ident" => {
            let name = field_str(obj, "ident", "value")?;
            Ok(Expr::Ident(name))
        }
        "binary" => {
            let op_str = field_str(obj, "binary", "op")?;
            let op = BinOp::from_str(&op_str).ok_or(DecodeError::InvalidOp {
                tag: "binary",
                op: op_str,
            })?;
            let left = expr_from_json(obj.get("left").ok_or(DecodeError::InvalidField {
                tag: "binary",
                field: "left",
            })?)?;
            let right = expr_from_json(obj.get("right").ok_or(DecodeError::InvalidField {
                tag: "binary",
                field: "right",
            })?)?;
            Ok(Expr::binary(left, right, op))
        }
        "unary" => {
            let op_str = field_str(obj, "unary", "op")?;
            let op = UnaryOp::from_str(&op_str).ok_or(DecodeError::InvalidOp {
                tag: "unary",
                op: op_str,
            })?;
            let operand = expr_from_json(obj.get("expr").ok_or(DecodeError::InvalidField {
                tag: "unary",
                field: "expr",
            })?)?;
            Ok(Expr::unary(operand, op))
        }
        _ => Err(DecodeError::UnknownTag {
            tag: tag.to_string(),
        }),
    }
}

fn field_str(
    obj: &serde_json::Map<String, Json>,
    tag: &'static str,
    field: &'static str,
) -> Result<String, DecodeError> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or(DecodeError::InvalidField { tag, field })
}

// ──────────────────────────────────────────────
// Serde integration
// ──────────────────────────────────────────────

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        expr_to_json(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Expr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Expr, D::Error> {
        let raw = Json::deserialize(deserializer)?;
        expr_from_json(&raw).map_err(D::Error::custom)
    }
}

impl Serialize for BinOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BinOp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<BinOp, D::Error> {
        let s = String::deserialize(deserializer)?;
        BinOp::from_str(&s)
            .ok_or_else(|| D::Error::custom(format!("unknown binary operator '{}'", s)))
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
