//! In-memory feature store backed by a key → tensor map.

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::store::{FeatureInfo, FeatureStore};
use crate::tensor::Tensor;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key-value feature store where keys are strings and values are tensors.
///
/// The store exclusively owns its map. It is single-threaded: callers that
/// share a store across threads must serialize access themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryFeatureStore {
    features: HashMap<String, Tensor>,
}

impl InMemoryFeatureStore {
    /// Build a store from a map of feature name to tensor.
    pub fn new(features: HashMap<String, Tensor>) -> Self {
        Self { features }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.features.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterate over feature names, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }

    /// Dtype and shape of the feature stored under `key`.
    pub fn info(&self, key: &str) -> Result<FeatureInfo, StoreError> {
        let tensor = self
            .features
            .get(key)
            .ok_or_else(|| StoreError::key_not_found(key))?;
        Ok(FeatureInfo {
            dtype: tensor.dtype(),
            shape: tensor.shape().to_vec(),
        })
    }

    /// Load a store from a JSON file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path)?;
        let store: Self = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), features = store.len(), "Loaded feature store");
        Ok(store)
    }

    /// Save the store to a JSON file (atomic write).
    pub fn save(&self, path: &Path, pretty: bool) -> Result<(), StoreError> {
        let content = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, &content)?;
        std::fs::rename(&tmp, path)?;
        tracing::debug!(path = %path.display(), features = self.len(), "Saved feature store");
        Ok(())
    }

    /// Save a named snapshot under the configured snapshot directory.
    pub fn save_snapshot(&self, name: &str, config: &StoreConfig) -> Result<PathBuf, StoreError> {
        std::fs::create_dir_all(&config.snapshot_dir)?;
        let path = config.snapshot_path(name);
        self.save(&path, config.pretty_json)?;
        Ok(path)
    }

    /// Load a named snapshot from the configured snapshot directory.
    pub fn load_snapshot(name: &str, config: &StoreConfig) -> Result<Self, StoreError> {
        Self::load(&config.snapshot_path(name))
    }
}

impl FeatureStore for InMemoryFeatureStore {
    fn read(&self, key: &str, ids: Option<&[usize]>) -> Result<Cow<'_, Tensor>, StoreError> {
        let tensor = self
            .features
            .get(key)
            .ok_or_else(|| StoreError::key_not_found(key))?;
        match ids {
            None => Ok(Cow::Borrowed(tensor)),
            Some(ids) => {
                tracing::trace!(key, rows = ids.len(), "Gather read");
                Ok(Cow::Owned(tensor.select_rows(ids)?))
            }
        }
    }

    fn update(
        &mut self,
        key: &str,
        value: Tensor,
        ids: Option<&[usize]>,
    ) -> Result<(), StoreError> {
        let tensor = self
            .features
            .get_mut(key)
            .ok_or_else(|| StoreError::key_not_found(key))?;
        match ids {
            None => {
                *tensor = value;
            }
            Some(ids) => {
                tracing::trace!(key, rows = ids.len(), "Scatter update");
                tensor
                    .scatter_rows(ids, &value)
                    .map_err(|e| e.for_key(key))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn user_store() -> InMemoryFeatureStore {
        let mut features = HashMap::new();
        features.insert("user".to_string(), Tensor::from(array![0i64, 1, 2, 3, 4]));
        InMemoryFeatureStore::new(features)
    }

    #[test]
    fn test_full_read_returns_stored_value() {
        let store = user_store();
        let value = store.read("user", None).unwrap();
        assert!(matches!(value, Cow::Borrowed(_)));
        assert_eq!(value.as_ref(), &Tensor::from(array![0i64, 1, 2, 3, 4]));
    }

    #[test]
    fn test_indexed_read_gathers_rows() {
        let store = user_store();
        let rows = store.read("user", Some(&[0, 1, 2])).unwrap();
        assert!(matches!(rows, Cow::Owned(_)));
        assert_eq!(rows.as_ref(), &Tensor::from(array![0i64, 1, 2]));
    }

    #[test]
    fn test_read_missing_key() {
        let store = user_store();
        let err = store.read("item", None).unwrap_err();
        assert!(matches!(err, StoreError::KeyNotFound { .. }));
    }

    #[test]
    fn test_whole_update_replaces_with_any_shape() {
        let mut store = user_store();
        store
            .update("user", Tensor::from(array![[1.0f32, 2.0], [3.0, 4.0]]), None)
            .unwrap();
        let info = store.info("user").unwrap();
        assert_eq!(info.shape, vec![2, 2]);
    }

    #[test]
    fn test_indexed_update_round_trip() {
        let mut store = user_store();
        store
            .update("user", Tensor::from(array![9i64, 9, 9]), Some(&[0, 1, 2]))
            .unwrap();
        let rows = store.read("user", Some(&[0, 1, 2])).unwrap();
        assert_eq!(rows.as_ref(), &Tensor::from(array![9i64, 9, 9]));
        // untouched rows keep their values
        let rest = store.read("user", Some(&[3, 4])).unwrap();
        assert_eq!(rest.as_ref(), &Tensor::from(array![3i64, 4]));
    }

    #[test]
    fn test_failed_indexed_update_leaves_store_unchanged() {
        let mut store = user_store();
        let err = store
            .update("user", Tensor::from(array![9i64, 9]), Some(&[0, 1, 2]))
            .unwrap_err();
        assert!(matches!(err, StoreError::ShapeMismatch { .. }));
        let value = store.read("user", None).unwrap();
        assert_eq!(value.as_ref(), &Tensor::from(array![0i64, 1, 2, 3, 4]));
    }

    #[test]
    fn test_update_missing_key() {
        let mut store = user_store();
        let err = store
            .update("item", Tensor::from(array![1i64]), None)
            .unwrap_err();
        assert!(matches!(err, StoreError::KeyNotFound { .. }));
    }

    #[test]
    fn test_info_and_keys() {
        let store = user_store();
        assert!(store.contains("user"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["user"]);
        let info = store.info("user").unwrap();
        assert_eq!(info.dtype, crate::tensor::DType::I64);
        assert_eq!(info.shape, vec![5]);
    }
}
