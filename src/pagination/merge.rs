//! Accumulator merging
//!
//! Arrays concatenate, objects merge key by key (recursively), scalars of
//! the same type are replaced. Anything else is a type mismatch and leaves
//! the accumulator untouched.

use serde_json::Value;
use thiserror::Error;

/// Failure to merge a page into the accumulator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("cannot merge {found} into {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

/// Merge `page` into `accumulator`
///
/// On error the accumulator is left exactly as it was.
pub fn merge_page(accumulator: &mut Value, page: Value) -> Result<(), MergeError> {
    check(accumulator, &page)?;
    apply(accumulator, page);
    Ok(())
}

/// Number of items a page contributes
pub fn item_count(page: &Value) -> usize {
    match page {
        Value::Array(items) => items.len(),
        Value::Null => 0,
        _ => 1,
    }
}

fn check(target: &Value, incoming: &Value) -> Result<(), MergeError> {
    match (target, incoming) {
        (Value::Object(existing), Value::Object(new)) => {
            for (key, value) in new {
                if let Some(current) = existing.get(key) {
                    check(current, value)?;
                }
            }
            Ok(())
        }
        _ if type_name(target) == type_name(incoming) => Ok(()),
        _ => Err(MergeError::TypeMismatch {
            expected: type_name(target),
            found: type_name(incoming),
        }),
    }
}

fn apply(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Array(existing), Value::Array(new)) => existing.extend(new),
        (Value::Object(existing), Value::Object(new)) => {
            for (key, value) in new {
                match existing.get_mut(&key) {
                    Some(current) => apply(current, value),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (target, incoming) => *target = incoming,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
