//! Feature store contract and its concrete variants.

use crate::error::StoreError;
use crate::tensor::{DType, Tensor};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub mod memory;

pub use memory::InMemoryFeatureStore;

/// Dtype and shape metadata for one stored feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureInfo {
    pub dtype: DType,
    pub shape: Vec<usize>,
}

/// Keyed store of dense feature tensors.
///
/// The capability set is exactly `{read, update}`; further variants (for
/// example a memory-mapped store) implement the same seam.
pub trait FeatureStore {
    /// Read the feature stored under `key`.
    ///
    /// Without `ids` this returns `Cow::Borrowed` of the stored tensor — the
    /// live value, not a defensive copy. With `ids` it returns `Cow::Owned`
    /// of a newly materialized tensor whose row `i` is stored row `ids[i]`.
    fn read(&self, key: &str, ids: Option<&[usize]>) -> Result<Cow<'_, Tensor>, StoreError>;

    /// Update the feature stored under `key`.
    ///
    /// Without `ids` the stored tensor is replaced wholesale; shape and dtype
    /// need not match the previous value. With `ids`, row `ids[i]` is
    /// overwritten with row `i` of `value` (last-write-wins on duplicates),
    /// and any validation failure leaves the store unchanged.
    fn update(
        &mut self,
        key: &str,
        value: Tensor,
        ids: Option<&[usize]>,
    ) -> Result<(), StoreError>;
}
