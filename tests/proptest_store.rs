//! Property-based tests for gather/scatter semantics using proptest.

use proptest::prelude::*;

use featstore::{FeatureStore, InMemoryFeatureStore, Tensor};
use ndarray::Array1;
use std::collections::HashMap;

fn store_with(data: &[i64]) -> InMemoryFeatureStore {
    let mut features = HashMap::new();
    features.insert(
        "feat".to_string(),
        Tensor::from(Array1::from(data.to_vec())),
    );
    InMemoryFeatureStore::new(features)
}

fn rows_and_ids() -> impl Strategy<Value = (Vec<i64>, Vec<usize>)> {
    (1usize..16).prop_flat_map(|len| {
        (
            proptest::collection::vec(any::<i64>(), len),
            proptest::collection::vec(0..len, 0..8),
        )
    })
}

proptest! {
    #[test]
    fn gather_equals_full_read_indexed((data, ids) in rows_and_ids()) {
        let store = store_with(&data);
        let gathered = store.read("feat", Some(&ids)).unwrap().into_owned();
        let expected: Vec<i64> = ids.iter().map(|&id| data[id]).collect();
        prop_assert_eq!(gathered, Tensor::from(Array1::from(expected)));
    }

    #[test]
    fn scatter_is_last_write_wins_in_ids_order(
        (data, ids) in rows_and_ids(),
        seed in any::<i64>(),
    ) {
        let mut store = store_with(&data);
        let values: Vec<i64> = (0..ids.len() as i64).map(|i| seed.wrapping_add(i)).collect();
        store
            .update(
                "feat",
                Tensor::from(Array1::from(values.clone())),
                Some(&ids),
            )
            .unwrap();

        let mut expected = data.clone();
        for (i, &id) in ids.iter().enumerate() {
            expected[id] = values[i];
        }
        let full = store.read("feat", None).unwrap().into_owned();
        prop_assert_eq!(full, Tensor::from(Array1::from(expected)));
    }

    #[test]
    fn mismatched_scatter_never_mutates((data, ids) in rows_and_ids()) {
        let mut store = store_with(&data);
        // one value too many for the id list
        let values: Vec<i64> = vec![0; ids.len() + 1];
        let result = store.update(
            "feat",
            Tensor::from(Array1::from(values)),
            Some(&ids),
        );
        prop_assert!(result.is_err());
        let full = store.read("feat", None).unwrap().into_owned();
        prop_assert_eq!(full, Tensor::from(Array1::from(data)));
    }
}
