//! # Guard Annotations
//!
//! Turns a raw `/chat` response body into the assistant reply text, a refusal
//! flag, and an ordered list of chips. Total over any JSON value: missing or
//! wrongly typed fields fall back to their defaults.
//!
//! | field              | used as                          | default     |
//! |--------------------|----------------------------------|-------------|
//! | `response`         | reply text (trimmed)             | `""`        |
//! | `guard_label`      | guard chip label                 | `"UNKNOWN"` |
//! | `guard_confidence` | guard chip confidence (2 dp)     | absent      |
//! | `refused`          | truthiness → refusal flag        | `false`     |

use serde_json::Value;

use crate::core::turn::{Annotation, AnnotationKind};

/// Confidence below this marks a non-refused reply as `Warn`.
pub const WARN_CONFIDENCE_THRESHOLD: f64 = 0.45;

pub const UNKNOWN_GUARD_LABEL: &str = "UNKNOWN";

/// Everything the controller needs to build an assistant turn.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardReport {
    pub text: String,
    pub annotations: Vec<Annotation>,
    pub refused: bool,
}

/// Derive the assistant turn contents from a response payload.
///
/// Chips are emitted guard summary first, then refusal status. With
/// `include_success` off, non-refused replies carry only the guard chip.
pub fn annotate(payload: &Value, include_success: bool) -> GuardReport {
    let label = payload
        .get("guard_label")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_GUARD_LABEL);
    let confidence = payload.get("guard_confidence").and_then(confidence_of);
    let refused = payload.get("refused").is_some_and(truthy);
    let text = payload
        .get("response")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string();

    let guard_kind = if refused {
        AnnotationKind::Bad
    } else if confidence.is_some_and(|c| c < WARN_CONFIDENCE_THRESHOLD) {
        AnnotationKind::Warn
    } else {
        AnnotationKind::Ok
    };

    let mut annotations =
        vec![Annotation::new(guard_summary(label, confidence), guard_kind).with_confidence(confidence)];
    if refused {
        annotations.push(Annotation::new("REFUSED", AnnotationKind::Bad));
    } else if include_success {
        annotations.push(Annotation::new("OK", AnnotationKind::Ok));
    }

    GuardReport {
        text,
        annotations,
        refused,
    }
}

/// The single chip on the synthetic turn shown when a request fails.
pub fn failure_annotations() -> Vec<Annotation> {
    vec![Annotation::new("ERROR", AnnotationKind::Bad)]
}

/// The single chip on the conversation greeting.
pub fn greeting_annotations() -> Vec<Annotation> {
    vec![Annotation::new("ready", AnnotationKind::Ok)]
}

/// `guard=<label>` plus ` <confidence>` to two places when known.
fn guard_summary(label: &str, confidence: Option<f64>) -> String {
    match confidence {
        Some(c) => format!("guard={label} {c:.2}"),
        None => format!("guard={label}"),
    }
}

/// Numeric confidence clamped into `[0, 1]`; anything else is absent.
fn confidence_of(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .filter(|c| c.is_finite())
        .map(|c| c.clamp(0.0, 1.0))
}

/// JSON truthiness: `false`, `null`, `0`, and `""` are false; everything else is true.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
