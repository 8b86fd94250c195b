//! Payload normalization.
//!
//! A payload is "structured" when it is an object, an array or `null`.
//! Structured payloads are delivered as-is; scalar arguments are gathered
//! into an ordered array.

use serde_json::Value;

/// Whether `value` is delivered unchanged when passed as the leading argument.
#[must_use]
pub fn is_structured(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_) | Value::Null)
}

/// Normalize the arguments of a variadic emission into a single payload.
///
/// If the first argument is structured it becomes the payload and the rest
/// are dropped. Otherwise every argument is collected, in order, into an
/// array. No arguments at all yield an empty array.
pub fn normalize<I>(args: I) -> Value
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let mut args = args.into_iter().map(Into::into);
    match args.next() {
        Some(first) if is_structured(&first) => first,
        Some(first) => Value::Array(std::iter::once(first).chain(args).collect()),
        None => Value::Array(Vec::new()),
    }
}

/// Normalize the payload of a single-argument emission.
#[must_use]
pub fn normalize_single(payload: Value) -> Value {
    if is_structured(&payload) {
        payload
    } else {
        Value::Array(vec![payload])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_kinds() {
        assert!(is_structured(&json!({"k": 1})));
        assert!(is_structured(&json!([1, 2])));
        assert!(is_structured(&Value::Null));
        assert!(!is_structured(&json!("a")));
        assert!(!is_structured(&json!(3)));
        assert!(!is_structured(&json!(true)));
    }

    #[test]
    fn test_scalars_are_collected() {
        assert_eq!(normalize(["a", "b", "c"]), json!(["a", "b", "c"]));
        assert_eq!(normalize([json!(1), json!("two"), json!(false)]), json!([1, "two", false]));
    }

    #[test]
    fn test_leading_structured_wins() {
        let payload = normalize([json!({"k": 1}), json!("ignored")]);
        assert_eq!(payload, json!({"k": 1}));

        let payload = normalize([json!([1, 2, 3])]);
        assert_eq!(payload, json!([1, 2, 3]));
    }

    #[test]
    fn test_structured_after_scalar_is_kept_in_list() {
        let payload = normalize([json!("a"), json!({"k": 1})]);
        assert_eq!(payload, json!(["a", {"k": 1}]));
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(normalize(Vec::<Value>::new()), json!([]));
    }

    #[test]
    fn test_single_payload() {
        assert_eq!(normalize_single(json!("a")), json!(["a"]));
        assert_eq!(normalize_single(json!([1, 2, 3])), json!([1, 2, 3]));
        assert_eq!(normalize_single(Value::Null), Value::Null);
    }
}
