//! # Field Extraction
//!
//! Typed, defaulted access to the fields of a JSON object. Every accessor
//! treats an absent key and an explicit `null` the same way: the caller's
//! default is returned. A value of the wrong JSON type is an error naming the
//! offending field, so mappers stay tolerant of schema growth without
//! silently accepting garbage.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{MappingError, json_kind};
use crate::mapping::FromJson;

/// Read-only view over a JSON object used by entity mappers.
///
/// A `JsonObject` may also be empty (backed by no map at all), which is what
/// nested mappers receive when the owning payload omits the sub-object.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonObject<'a> {
  map: Option<&'a Map<String, Value>>,
}

impl<'a> JsonObject<'a> {
  /// Wrap an existing JSON map
  pub const fn new(map: &'a Map<String, Value>) -> Self {
    Self { map: Some(map) }
  }

  /// An object with no fields
  pub const fn empty() -> Self {
    Self { map: None }
  }

  /// View `value` as an object, failing when it is any other JSON type.
  pub fn from_value(value: &'a Value) -> Result<Self, MappingError> {
    match value {
      Value::Object(map) => Ok(Self::new(map)),
      other => Err(MappingError::NotAnObject {
        found: json_kind(other),
      }),
    }
  }

  /// Returns true when the object has no fields
  pub fn is_empty(&self) -> bool {
    self.map.is_none_or(Map::is_empty)
  }

  /// Returns true when `field` is present with a non-null value
  pub fn contains(&self, field: &str) -> bool {
    self.lookup(field).is_some()
  }

  /// Raw access to a field; `None` when absent or null.
  pub fn get_value(&self, field: &str) -> Option<&'a Value> {
    self.lookup(field)
  }

  /// Clone a field as an untyped JSON value (`null` when absent).
  /// Copy of every field except those named in `skip`
  pub fn fields_except(&self, skip: &[&str]) -> Map<String, Value> {
    self
      .map
      .into_iter()
      .flatten()
      .filter(|(key, _)| !skip.contains(&key.as_str()))
      .map(|(key, value)| (key.clone(), value.clone()))
      .collect()
  }

  pub fn get_json(&self, field: &str) -> Value {
    self.lookup(field).cloned().unwrap_or(Value::Null)
  }

  pub fn get_str(&self, field: &str, default: &str) -> Result<String, MappingError> {
    Ok(self.get_opt_str(field)?.unwrap_or_else(|| default.to_string()))
  }

  pub fn get_opt_str(&self, field: &str) -> Result<Option<String>, MappingError> {
    match self.lookup(field) {
      None => Ok(None),
      Some(Value::String(value)) => Ok(Some(value.clone())),
      Some(other) => Err(MappingError::coercion(field, "string", other)),
    }
  }

  /// Read a scalar that GitHub sends either as a string or as a number
  /// (e.g. webhook `insecure_ssl`). The value keeps its JSON type.
  pub fn get_scalar(&self, field: &str) -> Result<Option<&'a Value>, MappingError> {
    match self.lookup(field) {
      None => Ok(None),
      Some(value) if value.is_string() || value.is_number() => Ok(Some(value)),
      Some(other) => Err(MappingError::coercion(field, "string or number", other)),
    }
  }

  pub fn get_u64(&self, field: &str, default: u64) -> Result<u64, MappingError> {
    Ok(self.get_opt_u64(field)?.unwrap_or(default))
  }

  pub fn get_opt_u64(&self, field: &str) -> Result<Option<u64>, MappingError> {
    match self.lookup(field) {
      None => Ok(None),
      Some(value) => value
        .as_u64()
        .map(Some)
        .ok_or_else(|| MappingError::coercion(field, "unsigned integer", value)),
    }
  }

  pub fn get_i64(&self, field: &str, default: i64) -> Result<i64, MappingError> {
    match self.lookup(field) {
      None => Ok(default),
      Some(value) => value
        .as_i64()
        .ok_or_else(|| MappingError::coercion(field, "integer", value)),
    }
  }

  pub fn get_f64(&self, field: &str, default: f64) -> Result<f64, MappingError> {
    match self.lookup(field) {
      None => Ok(default),
      Some(value) => value
        .as_f64()
        .ok_or_else(|| MappingError::coercion(field, "number", value)),
    }
  }

  pub fn get_bool(&self, field: &str, default: bool) -> Result<bool, MappingError> {
    Ok(self.get_opt_bool(field)?.unwrap_or(default))
  }

  pub fn get_opt_bool(&self, field: &str) -> Result<Option<bool>, MappingError> {
    match self.lookup(field) {
      None => Ok(None),
      Some(Value::Bool(value)) => Ok(Some(*value)),
      Some(other) => Err(MappingError::coercion(field, "boolean", other)),
    }
  }

  /// Nested object access. Absent sub-objects come back empty so nested
  /// mappers never see a missing payload.
  pub fn get_object(&self, field: &str) -> Result<JsonObject<'a>, MappingError> {
    match self.lookup(field) {
      None => Ok(Self::empty()),
      Some(Value::Object(map)) => Ok(Self::new(map)),
      Some(other) => Err(MappingError::coercion(field, "object", other)),
    }
  }

  /// Map a nested object with its own mapper; absent yields the mapping of
  /// an empty object (every field at its default).
  pub fn get_entity<T: FromJson>(&self, field: &str) -> Result<T, MappingError> {
    let object = self.get_object(field)?;
    T::from_json(&object).map_err(|e| e.within(field))
  }

  /// Like [`Self::get_entity`] for sub-objects GitHub documents as nullable.
  pub fn get_opt_entity<T: FromJson>(&self, field: &str) -> Result<Option<T>, MappingError> {
    if self.contains(field) {
      self.get_entity(field).map(Some)
    } else {
      Ok(None)
    }
  }

  /// Map every element of an array of objects, preserving order.
  pub fn get_entities<T: FromJson>(&self, field: &str) -> Result<Vec<T>, MappingError> {
    let Some(items) = self.get_array(field)? else {
      return Ok(Vec::new());
    };

    items
      .iter()
      .enumerate()
      .map(|(index, item)| {
        let path = format!("{field}[{index}]");
        let object = JsonObject::from_value(item).map_err(|e| e.within(&path))?;
        T::from_json(&object).map_err(|e| e.within(&path))
      })
      .collect()
  }

  /// Read an array of strings, preserving order.
  pub fn get_strings(&self, field: &str) -> Result<Vec<String>, MappingError> {
    let Some(items) = self.get_array(field)? else {
      return Ok(Vec::new());
    };

    items
      .iter()
      .enumerate()
      .map(|(index, item)| match item {
        Value::String(value) => Ok(value.clone()),
        other => Err(MappingError::coercion(&format!("{field}[{index}]"), "string", other)),
      })
      .collect()
  }

  /// Map an object whose keys are names (e.g. runner environments) and whose
  /// values share one entity shape.
  pub fn get_map<T: FromJson>(&self, field: &str) -> Result<BTreeMap<String, T>, MappingError> {
    let object = self.get_object(field)?;
    let Some(map) = object.map else {
      return Ok(BTreeMap::new());
    };

    map
      .iter()
      .filter(|(_, value)| !value.is_null())
      .map(|(key, value)| {
        let path = format!("{field}.{key}");
        let entry = JsonObject::from_value(value).map_err(|e| e.within(&path))?;
        let mapped = T::from_json(&entry).map_err(|e| e.within(&path))?;
        Ok((key.clone(), mapped))
      })
      .collect()
  }

  fn get_array(&self, field: &str) -> Result<Option<&'a Vec<Value>>, MappingError> {
    match self.lookup(field) {
      None => Ok(None),
      Some(Value::Array(items)) => Ok(Some(items)),
      Some(other) => Err(MappingError::coercion(field, "array", other)),
    }
  }

  fn lookup(&self, field: &str) -> Option<&'a Value> {
    self.map?.get(field).filter(|value| !value.is_null())
  }
}
