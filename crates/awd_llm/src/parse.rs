//! Best-effort decoding of generation output. Backends routinely wrap JSON in
//! markdown fences or truncate it mid-array when they hit the token limit, so
//! decoding strips fences first and then tries a minimal truncation repair
//! before giving up.

use awd_core::{Error, Result};
use serde_json::Value;
use tracing::debug;

/// Default score for any article the backend failed to rate.
pub const NEUTRAL_SCORE: i64 = 5;

/// Strip a markdown code fence (with or without a language tag) wrapping the
/// response.
fn strip_code_fence(raw: &str) -> &str {
    let mut cleaned = raw.trim();
    if cleaned.starts_with("```") {
        cleaned = match cleaned.split_once('\n') {
            Some((_, rest)) => rest,
            None => &cleaned[3..],
        };
        if let Some(stripped) = cleaned.trim_end().strip_suffix("```") {
            cleaned = stripped;
        }
        cleaned = cleaned.trim();
    }
    cleaned
}

/// Append a minimal closer to text that was cut off before its final `]`.
/// The choice depends on the last character: mid-object gets `]`, mid-string
/// gets `}]`, anything else gets `"]`.
fn repair_truncated(cleaned: &str) -> String {
    let mut repaired = cleaned.to_string();
    if !repaired.ends_with(']') {
        if repaired.ends_with('}') {
            repaired.push(']');
        } else if repaired.ends_with('"') {
            repaired.push_str("}]");
        } else {
            repaired.push_str("\"]");
        }
    }
    repaired
}

/// Decode a JSON value from raw generation output, unwrapping a single-key
/// `{"items": [...]}` envelope when present.
pub fn parse_value(raw: &str) -> Result<Value> {
    let cleaned = strip_code_fence(raw);
    let data = match serde_json::from_str::<Value>(cleaned) {
        Ok(data) => data,
        Err(_) => {
            debug!("direct decode failed, attempting truncation repair");
            let repaired = repair_truncated(cleaned);
            serde_json::from_str::<Value>(&repaired)
                .map_err(|e| Error::MalformedResponse(e.to_string()))?
        }
    };
    match data {
        Value::Object(map) if map.contains_key("items") => {
            Ok(map.get("items").cloned().unwrap_or(Value::Null))
        }
        other => Ok(other),
    }
}

/// Decode raw output into a JSON array of objects.
pub fn parse_array(raw: &str) -> Result<Vec<Value>> {
    match parse_value(raw)? {
        Value::Array(values) => Ok(values),
        other => Err(Error::MalformedResponse(format!(
            "expected a JSON array, got {other}"
        ))),
    }
}

/// Decode an indexed-score payload (`[{"index": 1, "score": 8}, ...]`) into a
/// score per article position. Every position starts at [`NEUTRAL_SCORE`];
/// entries overwrite by 1-based index; out-of-range indices and non-numeric
/// entries are ignored.
pub fn parse_scores(raw: &str, count: usize) -> Result<Vec<i64>> {
    let entries = parse_array(raw)?;
    let mut scores = vec![NEUTRAL_SCORE; count];
    for obj in &entries {
        let idx = obj.get("index").and_then(Value::as_i64).unwrap_or(0) - 1;
        if idx >= 0 && (idx as usize) < count {
            scores[idx as usize] = obj
                .get("score")
                .and_then(Value::as_i64)
                .unwrap_or(NEUTRAL_SCORE);
        }
    }
    Ok(scores)
}
