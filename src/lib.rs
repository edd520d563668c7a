//! # featstore — in-memory feature store for graph data loading
//!
//! A keyed store of dense feature tensors for graph-learning data-loading
//! pipelines. Features are named N-dimensional arrays whose first axis is the
//! row (entity) dimension; reads and updates may be restricted to a list of
//! row indices (gather/scatter).
//!
//! ```
//! use featstore::{FeatureStore, InMemoryFeatureStore, Tensor};
//! use ndarray::array;
//! use std::collections::HashMap;
//!
//! let mut features = HashMap::new();
//! features.insert("user".to_string(), Tensor::from(array![0i64, 1, 2, 3, 4]));
//! let mut store = InMemoryFeatureStore::new(features);
//!
//! let rows = store.read("user", Some(&[0, 1, 2]))?;
//! assert_eq!(rows.as_ref(), &Tensor::from(array![0i64, 1, 2]));
//!
//! store.update("user", Tensor::from(array![9i64, 9, 9]), Some(&[0, 1, 2]))?;
//! let rows = store.read("user", Some(&[0, 1, 2]))?;
//! assert_eq!(rows.as_ref(), &Tensor::from(array![9i64, 9, 9]));
//! # Ok::<(), featstore::StoreError>(())
//! ```

pub mod config;
pub mod error;
pub mod store;
pub mod tensor;

pub use config::StoreConfig;
pub use error::StoreError;
pub use store::{FeatureInfo, FeatureStore, InMemoryFeatureStore};
pub use tensor::{DType, Tensor};
