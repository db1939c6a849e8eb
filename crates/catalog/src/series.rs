use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use serieshub_core::{DomainError, DomainResult, RecordId};

/// A series record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct CreateSeries {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSeries {
    pub name: Option<String>,
}

/// In-memory series store.
///
/// Series names are unique across the store.
#[derive(Debug, Default)]
pub struct SeriesStore {
    records: RwLock<HashMap<RecordId, Series>>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, input: CreateSeries) -> DomainResult<Series> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("series name cannot be empty"));
        }

        let mut records = self.records.write().expect("series store lock poisoned");

        if records.values().any(|s| s.name == name) {
            tracing::warn!(%name, "series name already exists");
            return Err(DomainError::conflict(format!(
                "series with name '{name}' already exists"
            )));
        }

        let series = Series {
            id: RecordId::new(),
            name,
        };
        records.insert(series.id, series.clone());
        tracing::debug!(id = %series.id, "created series");
        Ok(series)
    }

    pub fn list(&self) -> Vec<Series> {
        let records = self.records.read().expect("series store lock poisoned");
        let mut items: Vec<Series> = records.values().cloned().collect();
        items.sort_by_key(|s| s.id);
        items
    }

    pub fn get(&self, id: RecordId) -> Option<Series> {
        self.records
            .read()
            .expect("series store lock poisoned")
            .get(&id)
            .cloned()
    }

    pub fn update(&self, id: RecordId, input: UpdateSeries) -> DomainResult<Series> {
        let mut records = self.records.write().expect("series store lock poisoned");

        if !records.contains_key(&id) {
            tracing::warn!(%id, "series not found for update");
            return Err(DomainError::NotFound);
        }

        if let Some(name) = input.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(DomainError::validation("series name cannot be empty"));
            }
            if records.values().any(|s| s.id != id && s.name == name) {
                tracing::warn!(%name, "series name already exists");
                return Err(DomainError::conflict(format!(
                    "series with name '{name}' already exists"
                )));
            }
            if let Some(series) = records.get_mut(&id) {
                series.name = name;
            }
        } else {
            tracing::debug!(%id, "series name not provided for update");
        }

        records.get(&id).cloned().ok_or(DomainError::NotFound)
    }

    pub fn remove(&self, id: RecordId) -> Option<Series> {
        let removed = self
            .records
            .write()
            .expect("series store lock poisoned")
            .remove(&id);
        if removed.is_some() {
            tracing::debug!(%id, "removed series");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_get() {
        let store = SeriesStore::new();
        let created = store
            .create(CreateSeries {
                name: "World Cup".to_string(),
            })
            .unwrap();

        assert_eq!(store.get(created.id), Some(created));
    }

    #[test]
    fn names_are_unique() {
        let store = SeriesStore::new();
        store
            .create(CreateSeries {
                name: "World Cup".to_string(),
            })
            .unwrap();

        let err = store
            .create(CreateSeries {
                name: "World Cup".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn empty_name_is_rejected() {
        let store = SeriesStore::new();
        let err = store
            .create(CreateSeries {
                name: "   ".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_renames_and_keeps_uniqueness() {
        let store = SeriesStore::new();
        let first = store
            .create(CreateSeries {
                name: "World Cup".to_string(),
            })
            .unwrap();
        let second = store
            .create(CreateSeries {
                name: "Ashes".to_string(),
            })
            .unwrap();

        let renamed = store
            .update(
                second.id,
                UpdateSeries {
                    name: Some("Champions Trophy".to_string()),
                },
            )
            .unwrap();
        assert_eq!(renamed.name, "Champions Trophy");

        // Renaming onto an existing name conflicts.
        let err = store
            .update(
                second.id,
                UpdateSeries {
                    name: Some(first.name.clone()),
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn update_without_a_name_is_a_no_op() {
        let store = SeriesStore::new();
        let created = store
            .create(CreateSeries {
                name: "World Cup".to_string(),
            })
            .unwrap();

        let updated = store.update(created.id, UpdateSeries::default()).unwrap();
        assert_eq!(updated, created);
    }

    #[test]
    fn keeping_your_own_name_is_not_a_conflict() {
        let store = SeriesStore::new();
        let created = store
            .create(CreateSeries {
                name: "World Cup".to_string(),
            })
            .unwrap();

        let updated = store
            .update(
                created.id,
                UpdateSeries {
                    name: Some("World Cup".to_string()),
                },
            )
            .unwrap();
        assert_eq!(updated, created);
    }

    #[test]
    fn missing_records_are_reported() {
        let store = SeriesStore::new();
        assert_eq!(store.get(RecordId::new()), None);
        assert_eq!(
            store.update(RecordId::new(), UpdateSeries::default()),
            Err(DomainError::NotFound)
        );
        assert_eq!(store.remove(RecordId::new()), None);
    }

    #[test]
    fn remove_deletes_the_record() {
        let store = SeriesStore::new();
        let created = store
            .create(CreateSeries {
                name: "World Cup".to_string(),
            })
            .unwrap();

        assert_eq!(store.remove(created.id), Some(created.clone()));
        assert_eq!(store.get(created.id), None);
    }
}
