//! # Entity Mapping
//!
//! The [`FromJson`] contract implemented by every GitHub entity, plus the
//! top-level entry points that turn a parsed document into one entity or an
//! ordered list of entities.

use serde_json::Value;

use crate::error::{MappingError, json_kind};
use crate::json::JsonObject;

/// Construct an entity from one JSON object.
///
/// Implementations read each attribute through the [`JsonObject`] accessors
/// with the wire's snake_case key and a zero-value default, and delegate
/// composite attributes to the nested entity's own `from_json`.
pub trait FromJson: Sized {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError>;
}

/// A function turning a parsed document into a typed value.
pub type Mapper<T> = fn(&Value) -> Result<T, MappingError>;

/// Parse raw response text into a generic JSON tree.
pub fn parse_document(raw: &str) -> Result<Value, MappingError> {
  Ok(serde_json::from_str(raw)?)
}

/// Map a top-level JSON object into `T`.
pub fn map_entity<T: FromJson>(value: &Value) -> Result<T, MappingError> {
  let object = JsonObject::from_value(value)?;
  T::from_json(&object)
}

/// Map a top-level JSON array into a `Vec<T>`, keeping response order.
pub fn map_list<T: FromJson>(value: &Value) -> Result<Vec<T>, MappingError> {
  let Value::Array(items) = value else {
    return Err(MappingError::NotAnArray {
      found: json_kind(value),
    });
  };

  items
    .iter()
    .enumerate()
    .map(|(index, item)| {
      let path = format!("[{index}]");
      let object = JsonObject::from_value(item).map_err(|e| e.within(&path))?;
      T::from_json(&object).map_err(|e| e.within(&path))
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[derive(Debug)]
  struct Label {
    id: u64,
    name: String,
  }

  impl FromJson for Label {
    fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
      Ok(Self {
        id: object.get_u64("id", 0)?,
        name: object.get_str("name", "")?,
      })
    }
  }

  #[test]
  fn test_parse_document_reports_malformed_text() {
    let error = parse_document("{not json").unwrap_err();
    assert!(matches!(error, MappingError::Parse(_)));
  }

  #[test]
  fn test_map_entity_requires_an_object() {
    let error = map_entity::<Label>(&json!("just a string")).unwrap_err();
    assert!(matches!(error, MappingError::NotAnObject { found: "string" }));
  }

  #[test]
  fn test_map_list_preserves_length_and_order() {
    let value = json!([
      {"id": 3, "name": "c"},
      {"id": 1, "name": "a"},
      {"id": 2, "name": "b"}
    ]);

    let labels = map_list::<Label>(&value).unwrap();
    assert_eq!(labels.len(), 3);
    assert_eq!(labels.iter().map(|l| l.id).collect::<Vec<_>>(), vec![3, 1, 2]);
    assert_eq!(labels[0].name, "c");
  }

  #[test]
  fn test_map_list_requires_an_array() {
    let error = map_list::<Label>(&json!({"id": 1})).unwrap_err();
    assert!(matches!(error, MappingError::NotAnArray { found: "object" }));
  }

  #[test]
  fn test_map_list_reports_element_index() {
    let value = json!([{"id": 1}, {"id": "two"}]);
    let error = map_list::<Label>(&value).unwrap_err();
    assert_eq!(error.field(), Some("[1].id"));
  }
}
