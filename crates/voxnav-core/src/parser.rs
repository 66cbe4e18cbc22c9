//! Model response parsing and action validation.
//!
//! The model is untrusted free text. Everything it returns goes through
//! [`parse_response`], which yields either a validated [`ActionDescriptor`] or
//! an [`ActionError`], never both and never neither.

use serde_json::{Map, Value};
use tracing::{debug, warn};
use voxnav_protocols::{ActionDescriptor, ActionError, Position, ScrollDirection};

use crate::direction::{classify_scroll_direction, classify_tab_direction};

/// Parse a raw model response into an action or an action error.
pub fn parse_response(raw: &str) -> Result<ActionDescriptor, ActionError> {
    let value: Value = serde_json::from_str(raw.trim()).map_err(|e| {
        warn!(error = %e, "Model response is not valid JSON");
        ActionError::parse_failure()
    })?;

    let Value::Object(object) = value else {
        warn!("Model response is not a JSON object");
        return Err(ActionError::parse_failure());
    };

    if let Some(error) = object.get("error") {
        let message = match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        debug!(%message, "Model reported an error");
        return Err(ActionError::reported(message));
    }

    let descriptor = validate(&object)?;
    debug!(action = descriptor.kind(), "Model response validated");
    Ok(descriptor)
}

fn validate(object: &Map<String, Value>) -> Result<ActionDescriptor, ActionError> {
    let action_raw = text_field(object, "action");
    let action = action_raw.trim().to_lowercase();
    let target = text_field(object, "target");
    let value = text_field(object, "value");

    match action.as_str() {
        "" => Err(ActionError::validation("No action provided")),
        "click" => {
            let position = position_field(object).ok_or_else(|| {
                ActionError::validation("Position for click action not provided")
            })?;
            Ok(ActionDescriptor::Click { target, position })
        }
        "open" => {
            if target.trim().is_empty() {
                return Err(ActionError::validation("No URL provided for open action"));
            }
            Ok(ActionDescriptor::Open { target })
        }
        "type" => {
            if value.is_empty() {
                return Err(ActionError::validation("No text provided for type action"));
            }
            Ok(ActionDescriptor::Type { value })
        }
        "scroll" => {
            let direction = scroll_direction(object, &target)?;
            Ok(ActionDescriptor::Scroll { direction })
        }
        "change" => {
            let hint = first_non_blank(&value, &text_field(object, "direction"));
            if hint.trim().is_empty() {
                return Err(ActionError::validation("No tab direction provided"));
            }
            classify_tab_direction(&hint)
                .direction()
                .map(|direction| ActionDescriptor::ChangeTab { direction })
                .ok_or_else(|| {
                    ActionError::validation(format!(
                        "Tab direction '{}' is not recognized",
                        hint.trim()
                    ))
                })
        }
        _ => Err(ActionError::validation(format!(
            "Action '{}' is not supported",
            action_raw.trim()
        ))),
    }
}

/// Scroll direction comes from `direction`, falling back to `target` as the
/// legacy carrier. No hint at all means down.
fn scroll_direction(
    object: &Map<String, Value>,
    target: &str,
) -> Result<ScrollDirection, ActionError> {
    let hint = first_non_blank(&text_field(object, "direction"), target);
    if hint.trim().is_empty() {
        return Ok(ScrollDirection::Down);
    }

    classify_scroll_direction(&hint).direction().ok_or_else(|| {
        ActionError::validation(format!(
            "Scroll direction '{}' is not recognized",
            hint.trim()
        ))
    })
}

fn first_non_blank(primary: &str, fallback: &str) -> String {
    if primary.trim().is_empty() {
        fallback.to_string()
    } else {
        primary.to_string()
    }
}

/// Read a field as text. Absent and `null` are empty; non-string values use
/// their JSON rendering.
fn text_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Read `position.x` and `position.y`. Fractional coordinates are rounded.
fn position_field(object: &Map<String, Value>) -> Option<Position> {
    let position = object.get("position")?.as_object()?;
    let x = coordinate(position.get("x")?)?;
    let y = coordinate(position.get("y")?)?;
    Some(Position::new(x, y))
}

fn coordinate(value: &Value) -> Option<i32> {
    if let Some(n) = value.as_i64() {
        return i32::try_from(n).ok();
    }
    let f = value.as_f64()?.round();
    if f.is_finite() && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
        Some(f as i32)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
