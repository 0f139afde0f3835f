//! Type narrowers: `&Value -> Result<T, String>`.
//!
//! JSON `null` is treated as an absent value and fails every narrower with
//! that narrower's type message.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Lifts a nullable value into an `Option`, mapping `null` to `None`.
pub fn lift(x: &Value) -> Option<&Value> {
    match x {
        Value::Null => None,
        other => Some(other),
    }
}

/// Narrow any value to a `String`.
pub fn as_string(x: &Value) -> Result<String, String> {
    lift(x)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| "value is not of type 'string'".to_string())
}

/// A loose number narrower that **does not** check for `NaN`.
pub fn as_any_number(x: &Value) -> Result<f64, String> {
    lift(x)
        .and_then(Value::as_f64)
        .ok_or_else(|| "value is not of type 'number'".to_string())
}

/// A strict number narrower that fails on `NaN`.
pub fn as_number(x: &Value) -> Result<f64, String> {
    as_any_number(x).and_then(|n| {
        if n.is_nan() {
            return Err("number is NaN".to_string());
        }

        Ok(n)
    })
}

/// Narrow any value to an integer.
///
/// Integral floats such as `3.0` are accepted as long as they fit in `i64`.
pub fn as_int(x: &Value) -> Result<i64, String> {
    if let Some(n) = x.as_i64() {
        return Ok(n);
    }

    as_number(x).and_then(|n| {
        // i64::MAX is not exactly representable; its f64 rounds up to 2^63.
        if n.fract() != 0.0 || n < i64::MIN as f64 || n >= i64::MAX as f64 {
            return Err("value is not an integer".to_string());
        }

        Ok(n as i64)
    })
}

/// Narrow any value to a `bool`.
pub fn as_bool(x: &Value) -> Result<bool, String> {
    lift(x)
        .and_then(Value::as_bool)
        .ok_or_else(|| "value is not of type 'boolean'".to_string())
}

/// Narrow any value to an array of values.
pub fn as_array(x: &Value) -> Result<Vec<Value>, String> {
    lift(x)
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| "value is not an Array".to_string())
}

/// Builds a narrower for any deserializable type.
///
/// The value must have the shape `T` deserializes from; the error names the
/// type, e.g. `value is not an instance of LoginRequest`.
pub fn as_instance_of<T>() -> impl Fn(&Value) -> Result<T, String>
where
    T: DeserializeOwned,
{
    |x: &Value| {
        lift(x)
            .and_then(|value| <T as Deserialize>::deserialize(value).ok())
            .ok_or_else(|| format!("value is not an instance of {}", type_label::<T>()))
    }
}

/// Last path segment of a type's name, without generic arguments.
fn type_label<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    let base = name.split('<').next().unwrap_or(name);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_as_string() {
        assert_eq!(as_string(&json!("hello")), Ok("hello".to_string()));
        assert_eq!(as_string(&json!(5)), Err("value is not of type 'string'".to_string()));
        assert_eq!(as_string(&Value::Null), Err("value is not of type 'string'".to_string()));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(as_any_number(&json!(1.5)), Ok(1.5));
        assert_eq!(as_number(&json!(-3)), Ok(-3.0));
        assert_eq!(as_number(&json!("3")), Err("value is not of type 'number'".to_string()));
    }

    #[test]
    fn test_as_int() {
        assert_eq!(as_int(&json!(42)), Ok(42));
        assert_eq!(as_int(&json!(3.0)), Ok(3));
        assert_eq!(as_int(&json!(3.25)), Err("value is not an integer".to_string()));
        assert_eq!(as_int(&json!(u64::MAX)), Err("value is not an integer".to_string()));
        assert_eq!(as_int(&json!(true)), Err("value is not of type 'number'".to_string()));
    }

    #[test]
    fn test_as_bool_and_array() {
        assert_eq!(as_bool(&json!(false)), Ok(false));
        assert_eq!(as_bool(&json!(0)), Err("value is not of type 'boolean'".to_string()));
        assert_eq!(as_array(&json!([1, "a"])), Ok(vec![json!(1), json!("a")]));
        assert_eq!(as_array(&json!({})), Err("value is not an Array".to_string()));
    }

    #[test]
    fn test_as_instance_of() {
        let as_point = as_instance_of::<Point>();
        assert_eq!(as_point(&json!({ "x": 1, "y": 2 })), Ok(Point { x: 1, y: 2 }));
        assert_eq!(
            as_point(&json!({ "x": 1 })),
            Err("value is not an instance of Point".to_string())
        );
        assert_eq!(
            as_instance_of::<Vec<String>>()(&Value::Null),
            Err("value is not an instance of Vec".to_string())
        );
    }
}
