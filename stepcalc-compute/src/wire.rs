//! JSON forms of the decision and computation responses.
//!
//! An outside collaborator answers a decision request with an object such as:
//!
//! ```json
//! {"operator": "*", "lhs": "2", "rhs": "3", "span": [2, 5], "tool": "mul"}
//! ```
//!
//! where `span` and `tool` are optional, and the operands may be given as strings or numbers. A
//! computation request is answered with either `{"value": 6}` or `{"error": "division by zero"}`.
//! Responses may be wrapped in a Markdown code fence, which is removed before decoding.

use crate::collab::ComputeError;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use stepcalc_parser::{parse_number, BinOpKind, PendingOperation};

/// An operand given either as literal text or as a JSON number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Operand {
    Text(String),
    Number(f64),
}

impl Operand {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Number(n) => crate::fmt::format(n),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDecision {
    operator: String,
    lhs: Operand,
    rhs: Operand,
    #[serde(default)]
    span: Option<[usize; 2]>,
    #[serde(default)]
    tool: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawToolResult {
    #[serde(default)]
    value: Option<Operand>,
    #[serde(default)]
    error: Option<String>,
}

/// Removes a surrounding Markdown code fence, with or without a language tag.
fn strip_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);

    // drop the language tag on the opening line, if any
    match inner.split_once('\n') {
        Some((tag, body)) if !tag.trim_start().starts_with('{') => body.trim(),
        _ => inner.trim(),
    }
}

/// Parses a response that must be a JSON object. Arrays are rejected even when their elements
/// line up with the fields of `T`.
fn from_object<T: DeserializeOwned>(text: &str) -> Result<T, String> {
    let value: Value = serde_json::from_str(strip_fence(text)).map_err(|err| err.to_string())?;
    if !value.is_object() {
        return Err(format!("expected a JSON object, found `{}`", value));
    }
    serde_json::from_value(value).map_err(|err| err.to_string())
}

/// Decodes a decision response into the operation it describes.
pub fn decode_decision(text: &str) -> Result<PendingOperation, String> {
    let raw: RawDecision = from_object(text)
        .map_err(|err| format!("malformed decision: {}", err))?;

    let op = BinOpKind::from_symbol(raw.operator.trim())
        .ok_or_else(|| format!("unknown operator `{}`", raw.operator))?;
    let span = raw.span.map(|[start, end]| start..end);

    let mut pending = PendingOperation::new(op, raw.lhs.into_text(), raw.rhs.into_text(), span);
    if let Some(tool) = raw.tool {
        pending.tool = tool;
    }
    Ok(pending)
}

/// Decodes a computation response into the value it carries, or the error it reports.
pub fn decode_tool_result(text: &str) -> Result<f64, ComputeError> {
    let raw: RawToolResult = from_object(text)
        .map_err(|err| ComputeError::Malformed(format!("malformed tool result: {}", err)))?;

    if let Some(error) = raw.error {
        return Err(ComputeError::Tool(error));
    }

    match raw.value {
        Some(Operand::Number(n)) => Ok(n),
        Some(Operand::Text(text)) => parse_number(&text)
            .ok_or_else(|| ComputeError::Malformed(format!("`{}` is not a number", text))),
        None => Err(ComputeError::Malformed("tool result has no value".to_string())),
    }
}
