//! Structural equality for test assertions
//!
//! Compares values by shape rather than identity: two objects are equal iff
//! they have the same key set (order-independent) and every corresponding
//! value is recursively equal. Values are compared through their
//! `serde_json::Value` form, which is acyclic by construction, so the
//! recursion always terminates.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Failure of a structural equality check
///
/// The message embeds both serialized operands unless the caller supplied
/// its own.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct NotEqual {
    message: String,
}

impl NotEqual {
    /// The diagnostic message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Recursively compare two JSON values by structure
///
/// Objects: same key set and recursively equal values. Arrays: same length
/// and elementwise equal. Everything else by value equality; a primitive
/// compared against an object or array is never equal.
pub fn structurally_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, va)| b.get(key).is_some_and(|vb| structurally_equal(va, vb)))
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|(va, vb)| structurally_equal(va, vb))
        }
        _ => left == right,
    }
}

/// Check two serializable values for structural equality
///
/// On mismatch the returned error names both operands in serialized form.
pub fn ensure_structural_eq<L, R>(left: &L, right: &R) -> Result<(), NotEqual>
where
    L: Serialize,
    R: Serialize,
{
    check(left, right, None)
}

/// Like [`ensure_structural_eq`], but a mismatch reports `message` instead of
/// the serialized operands
pub fn ensure_structural_eq_msg<L, R>(left: &L, right: &R, message: &str) -> Result<(), NotEqual>
where
    L: Serialize,
    R: Serialize,
{
    check(left, right, Some(message))
}

fn check<L, R>(left: &L, right: &R, message: Option<&str>) -> Result<(), NotEqual>
where
    L: Serialize,
    R: Serialize,
{
    let left = serde_json::to_value(left).map_err(|e| NotEqual {
        message: format!("failed to serialize left operand: {e}"),
    })?;
    let right = serde_json::to_value(right).map_err(|e| NotEqual {
        message: format!("failed to serialize right operand: {e}"),
    })?;

    if structurally_equal(&left, &right) {
        Ok(())
    } else {
        Err(NotEqual {
            message: match message {
                Some(message) => message.to_string(),
                None => format!("values are not structurally equal.\n\t{left}\n\t{right}"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_structures_compare_by_shape() {
        let left = json!({"a": 1, "b": {"c": 2}});
        let right = json!({"b": {"c": 2}, "a": 1});
        assert!(structurally_equal(&left, &right));
    }

    #[test]
    fn changed_leaf_breaks_equality() {
        let left = json!({"a": 1, "b": {"c": 2}});
        let right = json!({"a": 1, "b": {"c": 3}});
        assert!(!structurally_equal(&left, &right));
    }

    #[test]
    fn extra_key_breaks_equality() {
        let left = json!({"a": 1});
        let right = json!({"a": 1, "b": 2});
        assert!(!structurally_equal(&left, &right));
        assert!(!structurally_equal(&right, &left));
    }

    #[test]
    fn primitive_never_equals_object_or_null() {
        assert!(!structurally_equal(&json!(1), &json!({"a": 1})));
        assert!(!structurally_equal(&json!(1), &json!(null)));
        assert!(structurally_equal(&json!(null), &json!(null)));
    }

    #[test]
    fn arrays_compare_elementwise() {
        assert!(structurally_equal(&json!([1, 2, 3]), &json!([1, 2, 3])));
        assert!(!structurally_equal(&json!([1, 2, 3]), &json!([1, 2])));
        assert!(!structurally_equal(&json!([1, 2, 3]), &json!([3, 2, 1])));
    }

    #[test]
    fn ensure_reports_both_operands() {
        let err = ensure_structural_eq(&(1 + 1), &3).unwrap_err();
        assert!(err.message().contains('2'));
        assert!(err.message().contains('3'));
    }

    #[test]
    fn ensure_accepts_freshly_built_equal_structures() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let as_struct = Point { x: 1, y: 2 };
        let as_json = json!({"x": 1, "y": 2});
        assert!(ensure_structural_eq(&as_struct, &as_json).is_ok());
    }

    #[test]
    fn caller_message_is_used_verbatim() {
        let err = ensure_structural_eq_msg(&1, &2, "custom mismatch").unwrap_err();
        assert_eq!(err.message(), "custom mismatch");
    }
}
