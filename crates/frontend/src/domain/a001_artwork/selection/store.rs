use super::selection_set::SelectionSet;
use crate::shared::storage::{KeyValueStorage, StorageError};

/// Persists the selection under one fixed key as a JSON array of ids.
/// Every save overwrites the previous value.
pub struct SelectionStore<S: KeyValueStorage> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> SelectionStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn save(&self, selection: &SelectionSet) -> Result<(), StorageError> {
        let json = serde_json::to_string(selection).map_err(|e| StorageError::Corrupt {
            key: self.key.clone(),
            reason: e.to_string(),
        })?;
        self.storage.set_item(&self.key, &json)
    }

    /// `Ok(None)` when nothing has been stored yet
    pub fn load(&self) -> Result<Option<SelectionSet>, StorageError> {
        let Some(raw) = self.storage.get_item(&self.key) else {
            return Ok(None);
        };
        serde_json::from_str::<SelectionSet>(&raw)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: self.key.clone(),
                reason: e.to_string(),
            })
    }

    /// Like [`load`](Self::load) but logs and swallows corrupt values
    pub fn load_or_warn(&self) -> Option<SelectionSet> {
        match self.load() {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("Ignoring stored selection: {}", e);
                None
            }
        }
    }

    /// Drop the stored value entirely
    pub fn clear(&self) {
        self.storage.remove_item(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_artwork::selection::accumulator::SelectionAccumulator;
    use crate::domain::a001_artwork::test_support::FakeFetcher;
    use crate::shared::storage::MemoryStorage;
    use futures::executor::block_on;

    const KEY: &str = "artworks_selected_ids";

    #[test]
    fn test_load_empty_storage() {
        let store = SelectionStore::new(MemoryStorage::default(), KEY);
        assert_eq!(store.load(), Ok(None));
    }

    #[test]
    fn test_save_overwrites() {
        let storage = MemoryStorage::default();
        let store = SelectionStore::new(&storage, KEY);
        store.save(&[1, 2, 3].into_iter().collect()).unwrap();
        store.save(&[9].into_iter().collect()).unwrap();
        assert_eq!(storage.get_item(KEY).as_deref(), Some("[9]"));
        assert_eq!(store.load().unwrap().unwrap().to_vec(), vec![9]);
    }

    #[test]
    fn test_corrupt_value_is_reported() {
        let storage = MemoryStorage::default();
        storage.set_item(KEY, "not json").unwrap();
        let store = SelectionStore::new(&storage, KEY);
        assert!(matches!(store.load(), Err(StorageError::Corrupt { .. })));
        assert_eq!(store.load_or_warn(), None);
    }

    #[test]
    fn test_clear_removes_key() {
        let storage = MemoryStorage::default();
        let store = SelectionStore::new(&storage, KEY);
        store.save(&[4].into_iter().collect()).unwrap();
        store.clear();
        assert_eq!(storage.get_item(KEY), None);
    }

    #[test]
    fn test_accumulate_store_reload_intersect() {
        let fetcher = FakeFetcher::with_total(30);
        let acc = block_on(SelectionAccumulator::new(&fetcher, 12).accumulate(15, 1, || false));

        let storage = MemoryStorage::default();
        let store = SelectionStore::new(&storage, KEY);
        store.save(&acc.ids()).unwrap();

        // page 2 holds ids 13..=24, of which 13..=15 were stored
        let reloaded = SelectionStore::new(&storage, KEY).load().unwrap().unwrap();
        let page_two: Vec<i64> = (13..=24).collect();
        assert_eq!(reloaded.intersect_ids(page_two).to_vec(), vec![13, 14, 15]);
    }
}
