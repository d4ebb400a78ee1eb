//! JSON comparison helpers

use serde_json::Value;

/// Assert that every field present in `input` survives in `output` with the
/// same value.
///
/// Objects are compared key by key (extra keys in `output` are allowed, since
/// mapped entities always serialize every declared field) and arrays element
/// by element.
pub fn assert_fields_preserved(input: &Value, output: &Value) {
  compare(input, output, "$");
}

fn compare(input: &Value, output: &Value, path: &str) {
  match (input, output) {
    (Value::Object(expected), Value::Object(actual)) => {
      for (key, value) in expected {
        let child = format!("{path}.{key}");
        let Some(actual_value) = actual.get(key) else {
          panic!("field {child} missing after re-serialization");
        };
        compare(value, actual_value, &child);
      }
    }
    (Value::Array(expected), Value::Array(actual)) => {
      assert_eq!(expected.len(), actual.len(), "array length differs at {path}");
      for (index, (e, a)) in expected.iter().zip(actual).enumerate() {
        compare(e, a, &format!("{path}[{index}]"));
      }
    }
    (Value::Number(expected), Value::Number(actual)) => {
      assert_eq!(expected.as_f64(), actual.as_f64(), "number differs at {path}");
    }
    _ => assert_eq!(input, output, "value differs at {path}"),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_extra_output_fields_are_allowed() {
    assert_fields_preserved(&json!({"id": 1}), &json!({"id": 1, "name": ""}));
  }

  #[test]
  #[should_panic(expected = "value differs at $.commit.sha")]
  fn test_changed_nested_value_is_reported() {
    assert_fields_preserved(
      &json!({"commit": {"sha": "abc"}}),
      &json!({"commit": {"sha": "def"}}),
    );
  }

  #[test]
  #[should_panic(expected = "missing after re-serialization")]
  fn test_missing_field_is_reported() {
    assert_fields_preserved(&json!({"id": 1, "url": "x"}), &json!({"id": 1}));
  }
}
