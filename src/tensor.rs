//! Dtype-tagged dense tensors with row gather/scatter primitives.
//!
//! A [`Tensor`] wraps an `ndarray::ArrayD` of one of four scalar dtypes. The
//! first axis is the row dimension: gather and scatter operate on whole rows,
//! whatever the trailing shape is.

use crate::error::StoreError;
use ndarray::{ArrayD, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar element type of a [`Tensor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    F32,
    F64,
    I32,
    I64,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::I32 => "i32",
            DType::I64 => "i64",
        };
        f.write_str(name)
    }
}

/// A dense N-dimensional feature value.
///
/// Rank is arbitrary; rank ≥ 1 is required for indexed (per-row) operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dtype", content = "data", rename_all = "lowercase")]
pub enum Tensor {
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
}

impl Tensor {
    pub fn dtype(&self) -> DType {
        match self {
            Tensor::F32(_) => DType::F32,
            Tensor::F64(_) => DType::F64,
            Tensor::I32(_) => DType::I32,
            Tensor::I64(_) => DType::I64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Tensor::F32(a) => a.shape(),
            Tensor::F64(a) => a.shape(),
            Tensor::I32(a) => a.shape(),
            Tensor::I64(a) => a.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Length of the row axis. Zero for rank-0 tensors, which have no rows.
    pub fn num_rows(&self) -> usize {
        self.shape().first().copied().unwrap_or(0)
    }

    /// Gather rows by index into a newly materialized tensor.
    ///
    /// Row `i` of the result equals row `ids[i]` of `self`. Duplicate indices
    /// are allowed and preserved in order.
    pub fn select_rows(&self, ids: &[usize]) -> Result<Tensor, StoreError> {
        self.check_row_axis()?;
        self.check_bounds(ids)?;
        let out = match self {
            Tensor::F32(a) => Tensor::F32(a.select(Axis(0), ids)),
            Tensor::F64(a) => Tensor::F64(a.select(Axis(0), ids)),
            Tensor::I32(a) => Tensor::I32(a.select(Axis(0), ids)),
            Tensor::I64(a) => Tensor::I64(a.select(Axis(0), ids)),
        };
        Ok(out)
    }

    /// Scatter rows of `value` into `self` at the given indices.
    ///
    /// Row `ids[i]` of `self` is overwritten with row `i` of `value`;
    /// duplicate indices are last-write-wins in `ids` order. All validation
    /// happens before the first row is written, so a failed scatter leaves
    /// `self` untouched.
    pub fn scatter_rows(&mut self, ids: &[usize], value: &Tensor) -> Result<(), StoreError> {
        self.check_row_axis()?;
        value.check_row_axis()?;
        if value.dtype() != self.dtype() {
            // the store attaches the feature key via StoreError::for_key
            return Err(StoreError::DtypeMismatch {
                key: String::new(),
                expected: self.dtype(),
                actual: value.dtype(),
            });
        }
        if ids.len() != value.num_rows() {
            return Err(StoreError::shape_mismatch(
                format!("{} rows to match ids length", ids.len()),
                format!("{} rows", value.num_rows()),
            ));
        }
        if self.shape()[1..] != value.shape()[1..] {
            return Err(StoreError::shape_mismatch(
                format!("row shape {:?}", &self.shape()[1..]),
                format!("row shape {:?}", &value.shape()[1..]),
            ));
        }
        self.check_bounds(ids)?;
        match (self, value) {
            (Tensor::F32(a), Tensor::F32(v)) => assign_rows(a, ids, v),
            (Tensor::F64(a), Tensor::F64(v)) => assign_rows(a, ids, v),
            (Tensor::I32(a), Tensor::I32(v)) => assign_rows(a, ids, v),
            (Tensor::I64(a), Tensor::I64(v)) => assign_rows(a, ids, v),
            // dtype equality was checked above
            _ => unreachable!("dtype mismatch past validation"),
        }
        Ok(())
    }

    fn check_row_axis(&self) -> Result<(), StoreError> {
        if self.ndim() == 0 {
            return Err(StoreError::shape_mismatch(
                "tensor with a row axis",
                "rank-0 tensor",
            ));
        }
        Ok(())
    }

    fn check_bounds(&self, ids: &[usize]) -> Result<(), StoreError> {
        let num_rows = self.num_rows();
        for &id in ids {
            if id >= num_rows {
                return Err(StoreError::IndexOutOfBounds { index: id, num_rows });
            }
        }
        Ok(())
    }
}

fn assign_rows<T: Clone>(dst: &mut ArrayD<T>, ids: &[usize], src: &ArrayD<T>) {
    for (i, &id) in ids.iter().enumerate() {
        dst.index_axis_mut(Axis(0), id)
            .assign(&src.index_axis(Axis(0), i));
    }
}

macro_rules! impl_tensor_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<ArrayD<$ty>> for Tensor {
                fn from(a: ArrayD<$ty>) -> Self {
                    Tensor::$variant(a)
                }
            }

            impl From<ndarray::Array1<$ty>> for Tensor {
                fn from(a: ndarray::Array1<$ty>) -> Self {
                    Tensor::$variant(a.into_dyn())
                }
            }

            impl From<ndarray::Array2<$ty>> for Tensor {
                fn from(a: ndarray::Array2<$ty>) -> Self {
                    Tensor::$variant(a.into_dyn())
                }
            }
        )*
    };
}

impl_tensor_from! {
    f32 => F32,
    f64 => F64,
    i32 => I32,
    i64 => I64,
}
