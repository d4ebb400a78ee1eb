//! Collection wrapper for paginated list endpoints that report a separate
//! `total_count` next to the visible page of items.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::MappingError;
use crate::json::JsonObject;
use crate::mapping::FromJson;

/// Entities that GitHub returns inside a `{"total_count": n, "<key>": [...]}`
/// envelope.
pub trait Listed: FromJson {
  /// Name of the array field holding the items
  const COLLECTION_KEY: &'static str;
}

/// One page of a paginated collection.
///
/// `total_count` is reported by GitHub and is not reconciled with the number
/// of visible items: a page may legitimately hold fewer items than the total,
/// and concurrent upstream changes may make the two disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
  pub total_count: u64,
  pub items: Vec<T>,
}

impl<T> Page<T> {
  pub const fn new(total_count: u64, items: Vec<T>) -> Self {
    Self { total_count, items }
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, T> {
    self.items.iter()
  }

  /// True when GitHub reports more items than this page holds.
  pub fn has_more(&self) -> bool {
    (self.items.len() as u64) < self.total_count
  }

  pub fn into_items(self) -> Vec<T> {
    self.items
  }
}

impl<T: Listed> FromJson for Page<T> {
  fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
    let items: Vec<T> = object.get_entities(T::COLLECTION_KEY)?;
    // Without a reported total the visible page is all we know about.
    let total_count = object.get_u64("total_count", items.len() as u64)?;
    Ok(Self { total_count, items })
  }
}

impl<T: Listed + Serialize> Serialize for Page<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(2))?;
    map.serialize_entry("total_count", &self.total_count)?;
    map.serialize_entry(T::COLLECTION_KEY, &self.items)?;
    map.end()
  }
}

impl<T> IntoIterator for Page<T> {
  type Item = T;
  type IntoIter = std::vec::IntoIter<T>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.into_iter()
  }
}

impl<'a, T> IntoIterator for &'a Page<T> {
  type Item = &'a T;
  type IntoIter = std::slice::Iter<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.iter()
  }
}

#[cfg(test)]
mod tests {
  use serde::Serialize;
  use serde_json::json;

  use super::*;
  use crate::mapping::map_entity;

  #[derive(Debug, PartialEq, Serialize)]
  struct Run {
    id: u64,
  }

  impl FromJson for Run {
    fn from_json(object: &JsonObject<'_>) -> Result<Self, MappingError> {
      Ok(Self {
        id: object.get_u64("id", 0)?,
      })
    }
  }

  impl Listed for Run {
    const COLLECTION_KEY: &'static str = "workflow_runs";
  }

  #[test]
  fn test_page_keeps_reported_total_and_order() {
    let value = json!({
      "total_count": 10,
      "workflow_runs": [{"id": 5}, {"id": 4}]
    });

    let page: Page<Run> = map_entity(&value).unwrap();
    assert_eq!(page.total_count, 10);
    assert_eq!(page.len(), 2);
    assert!(page.has_more());
    assert_eq!(page.items, vec![Run { id: 5 }, Run { id: 4 }]);
  }

  #[test]
  fn test_page_total_may_disagree_with_items() {
    let value = json!({
      "total_count": 1,
      "workflow_runs": [{"id": 1}, {"id": 2}, {"id": 3}]
    });

    let page: Page<Run> = map_entity(&value).unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.len(), 3);
    assert!(!page.has_more());
  }

  #[test]
  fn test_page_without_total_counts_visible_items() {
    let value = json!({"workflow_runs": [{"id": 1}]});

    let page: Page<Run> = map_entity(&value).unwrap();
    assert_eq!(page.total_count, 1);
  }

  #[test]
  fn test_page_serializes_under_collection_key() {
    let page = Page::new(3, vec![Run { id: 9 }]);
    let value = serde_json::to_value(&page).unwrap();
    assert_eq!(value, json!({"total_count": 3, "workflow_runs": [{"id": 9}]}));
  }
}
